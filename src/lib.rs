pub mod api;
pub mod bot;
pub mod cli;
pub mod core;
pub mod openai;
