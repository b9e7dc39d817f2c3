use crate::bot::Bot;

pub struct AppState {
    // Guards its own session, so no lock is needed around the state
    pub bot: Bot,
}

impl AppState {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}
