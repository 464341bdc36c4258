use crate::client::ActivityClient;

#[derive(Clone)]
pub struct AppState {
    pub client: ActivityClient,
}

impl AppState {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: ActivityClient::new(api_url),
        }
    }
}
