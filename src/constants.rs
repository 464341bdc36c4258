//! Route constants shared by the router, the handlers and the tests.

pub const ACTIVITIES_ROUTE: &str = "/api/activities";
pub const ACTIVITY_ROUTE: &str = "/api/activities/:id";
pub const HEALTH_ROUTE: &str = "/health";

pub const SERVICE_NAME: &str = "activities-api";

// Defaults used when neither the config file, the environment nor the CLI say otherwise
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE_PATH: &str = "activities.db";
pub const DEFAULT_CONFIG_PATH: &str = "activities.toml";

/// Location of a single activity, as returned in the `Location` header.
pub fn activity_location(id: &uuid::Uuid) -> String {
    format!("{ACTIVITIES_ROUTE}/{id}")
}
