pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod server;
