pub mod calendar;
pub mod client;
pub mod form;
pub mod handlers;
pub mod listing;
pub mod models;
pub mod router;
pub mod state;
pub mod templates;

pub use client::{ActivityClient, ClientError};
pub use router::app_router;
pub use state::AppState;
