pub mod commands;
pub mod config;
pub mod github;
pub mod notify;
pub mod store;
pub mod watcher;
pub mod webhook;

/// Custom data passed to all commands
pub struct Data {
    pub config: config::Config,
    pub store: store::SeenStore,
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
