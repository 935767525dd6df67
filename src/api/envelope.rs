use crate::api::transport::HttpResponse;
use crate::errors::{Error, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Pagination block sent with list responses; `{}` on single resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default)]
    pub is_first_page: bool,
    #[serde(default)]
    pub is_last_page: bool,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub previous_page: Option<u32>,
    #[serde(default)]
    pub next_page: Option<u32>,
    #[serde(default)]
    pub page_count: u32,
    #[serde(default)]
    pub total_count: u32,
}

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub meta: PageMeta,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorItem>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorItem {
    message: String,
}

/// Decode a successful `{ data, meta }` body.
pub fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<Envelope<T>> {
    if !response.is_success() {
        return Err(error_for(response));
    }
    serde_json::from_str(&response.body).map_err(|e| {
        Error::Api {
            status: response.status,
            message: format!("Unexpected response shape: {e}"),
        }
    })
}

/// Turn a failed response into the crate error, keeping the API's own wording.
pub fn error_for(response: &HttpResponse) -> Error {
    let body: ErrorBody = serde_json::from_str(&response.body).unwrap_or_default();
    let message = if !body.errors.is_empty() {
        body.errors
            .iter()
            .map(|e| e.message.trim())
            .collect::<Vec<_>>()
            .join("; ")
    } else if let Some(status) = body.status {
        status
    } else if !response.body.trim().is_empty() {
        response.body.trim().to_string()
    } else {
        format!("HTTP {}", response.status)
    };
    Error::from_status(response.status, message)
}
