//! Read-only clients for the external metadata and playback providers.

pub mod availability;
pub mod tmdb;

pub use availability::{AvailabilityProvider, HttpAvailabilityProvider};
pub use tmdb::{
    BackdropSize, MetadataProvider, PosterSize, TmdbMetadataProvider,
};

use serde::{Deserialize, Serialize, de::DeserializeOwned};

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Not found")]
    NotFound,

    #[error("Rate limited")]
    RateLimited,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Issue a GET request and decode the JSON body, mapping non-success
/// statuses onto the provider error taxonomy.
pub(crate) async fn get_json<Q, T>(
    http: &reqwest::Client,
    url: &str,
    query: &Q,
) -> Result<T, ProviderError>
where
    Q: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let response = http.get(url).query(query).send().await?;

    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(ProviderError::from);
    }

    #[derive(Debug, Deserialize)]
    struct ErrorBody {
        #[serde(default)]
        status_message: Option<String>,
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.status_message)
        .unwrap_or_else(|| format!("request failed with status {}", status));

    match status.as_u16() {
        401 => Err(ProviderError::InvalidApiKey),
        404 => Err(ProviderError::NotFound),
        429 => Err(ProviderError::RateLimited),
        _ => Err(ProviderError::ApiError(message)),
    }
}
