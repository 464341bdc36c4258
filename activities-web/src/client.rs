use activities_core::{Activity, ActivityInput};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::ListFilter;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Activity not found")]
    NotFound,

    #[error("Rejected by the API: {0}")]
    Validation(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API responded with {0}")]
    Server(StatusCode),
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Thin wrapper over the activities REST API.
#[derive(Clone)]
pub struct ActivityClient {
    http: Client,
    base_url: String,
}

impl ActivityClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/api/activities", self.base_url)
    }

    fn item_url(&self, id: Uuid) -> String {
        format!("{}/api/activities/{}", self.base_url, id)
    }

    pub async fn list(&self, filter: &ListFilter) -> Result<Vec<Activity>> {
        let response = self
            .http
            .get(self.collection_url())
            .query(filter)
            .send()
            .await?;
        let activities: Vec<Activity> = check(response).await?.json().await?;
        debug!("Fetched {} activities with {:?}", activities.len(), filter);
        Ok(activities)
    }

    /// `None` when the API has no activity with this id.
    pub async fn get(&self, id: Uuid) -> Result<Option<Activity>> {
        let response = self.http.get(self.item_url(id)).send().await?;
        match check(response).await {
            Ok(response) => Ok(Some(response.json().await?)),
            Err(ClientError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn create(&self, input: &ActivityInput) -> Result<Activity> {
        let response = self
            .http
            .post(self.collection_url())
            .json(input)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// Full overwrite. The id always travels in the body as well as the path.
    pub async fn update(&self, id: Uuid, input: &ActivityInput) -> Result<()> {
        let body = ActivityInput {
            id: Some(id),
            ..input.clone()
        };
        let response = self.http.put(self.item_url(id)).json(&body).send().await?;
        check(response).await?;
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let response = self.http.delete(self.item_url(id)).send().await?;
        check(response).await?;
        Ok(())
    }
}

async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::NOT_FOUND => Err(ClientError::NotFound),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error)
                .unwrap_or(text);
            Err(ClientError::Validation(message))
        }
        other => {
            warn!("Activities API responded with {}", other);
            Err(ClientError::Server(other))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_ignore_trailing_slash() {
        let client = ActivityClient::new("http://localhost:5000/");
        assert_eq!(client.collection_url(), "http://localhost:5000/api/activities");

        let id = Uuid::nil();
        assert_eq!(
            client.item_url(id),
            "http://localhost:5000/api/activities/00000000-0000-0000-0000-000000000000"
        );
    }
}
