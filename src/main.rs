use anyhow::Result;
use blather::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
