//! REST client for the users API.

use crate::config::TuiConfig;
use serde::Deserialize;
use std::time::Duration;
use userdesk_core::user::ListUsersResponse;
use userdesk_core::UserRow;

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

/// Error body some servers send alongside a failure status.
#[derive(Debug, Deserialize)]
struct ServerError {
    message: String,
}

#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
    users_path: String,
}

impl RestClient {
    pub fn new(config: &TuiConfig) -> Result<Self, ApiClientError> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            users_path: config.users_path.clone(),
        })
    }

    /// Fetch every user and map it to a table row.
    pub async fn fetch_users(&self) -> Result<Vec<UserRow>, ApiClientError> {
        let response: ListUsersResponse = self.get_json(&self.users_path).await?;
        Ok(response.into_rows())
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, ApiClientError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(url = %url, "GET");
        let response = self.client.get(url).send().await?;
        parse_response(response.status(), &response.text().await?)
    }
}

/// Decode a response body, turning failure statuses into errors.
pub fn parse_response<T: serde::de::DeserializeOwned>(
    status: reqwest::StatusCode,
    text: &str,
) -> Result<T, ApiClientError> {
    if status.is_success() {
        return Ok(serde_json::from_str::<T>(text)?);
    }
    if let Ok(server_error) = serde_json::from_str::<ServerError>(text) {
        return Err(ApiClientError::InvalidResponse(format!(
            "HTTP {}: {}",
            status.as_u16(),
            server_error.message
        )));
    }
    Err(ApiClientError::InvalidResponse(format!(
        "HTTP {}: {}",
        status.as_u16(),
        text
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_parse_success_body() {
        let body = r#"{"data":[{"id":7,"firstName":"Omar","lastName":"Haddad","email":"o@x.io"}]}"#;
        let parsed: ListUsersResponse = parse_response(StatusCode::OK, body).unwrap();
        let rows = parsed.into_rows();
        assert_eq!(rows[0].id, "7");
        assert_eq!(rows[0].name, "Omar Haddad");
    }

    #[test]
    fn test_parse_failure_uses_server_message() {
        let err = parse_response::<ListUsersResponse>(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"message":"database down"}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Unexpected response: HTTP 500: database down");
    }

    #[test]
    fn test_parse_failure_with_plain_body() {
        let err = parse_response::<ListUsersResponse>(StatusCode::NOT_FOUND, "nope").unwrap_err();
        assert!(matches!(err, ApiClientError::InvalidResponse(ref m) if m == "HTTP 404: nope"));
    }

    #[test]
    fn test_parse_malformed_success_body() {
        let err = parse_response::<ListUsersResponse>(StatusCode::OK, "<html>").unwrap_err();
        assert!(matches!(err, ApiClientError::Serde(_)));
    }
}
