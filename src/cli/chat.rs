use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::bot::{Author, Bot};
use crate::core::AppConfig;

pub async fn run() -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    let config = AppConfig::default();
    let bot = Bot::from_config(&config);

    // Everything typed here comes from the operator, so they get the
    // admin role and every line counts as mentioning the bot
    let author = Author {
        name: whoami(),
        roles: vec![config.admin_role.clone()],
        bot: false,
    };

    println!(
        "Preset {} loaded. Commands start with {}",
        config.default_preset, config.command_prefix
    );

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());
                if let Some(reply) = bot.handle_message(&author, &line, true).await {
                    println!("{}", reply);
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}

fn whoami() -> String {
    std::env::var("USER").unwrap_or_else(|_| "operator".to_string())
}
