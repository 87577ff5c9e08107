use std::collections::HashSet;
use std::fmt;

use async_trait::async_trait;
use marquee_model::MediaType;
use serde::Deserialize;
use url::Url;

use super::{ProviderError, get_json};

/// Read-only access to the playback provider's availability listing.
///
/// A fetch always returns the complete current set for one content type;
/// the cache replaces its snapshot wholesale with whatever comes back.
#[async_trait]
pub trait AvailabilityProvider: Send + Sync {
    async fn available_ids(
        &self,
        media_type: MediaType,
    ) -> Result<HashSet<String>, ProviderError>;
}

/// Identifiers arrive as bare numbers or strings depending on the
/// provider's export; both canonicalize to the decimal string form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum WireId {
    Number(u64),
    Text(String),
}

impl WireId {
    fn into_canonical(self) -> String {
        match self {
            WireId::Number(raw) => raw.to_string(),
            WireId::Text(raw) => raw.trim().to_string(),
        }
    }
}

fn list_segment(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Movie => "movie",
        MediaType::Series => "tv",
    }
}

pub struct HttpAvailabilityProvider {
    http: reqwest::Client,
    base_url: Url,
}

impl fmt::Debug for HttpAvailabilityProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpAvailabilityProvider")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl HttpAvailabilityProvider {
    pub fn new(base_url: &str) -> Result<Self, ProviderError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            ProviderError::ParseError(format!(
                "invalid availability base url {base_url}: {e}"
            ))
        })?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    fn list_url(&self, media_type: MediaType) -> String {
        format!(
            "{}/ids/{}.json",
            self.base_url.as_str().trim_end_matches('/'),
            list_segment(media_type)
        )
    }
}

#[async_trait]
impl AvailabilityProvider for HttpAvailabilityProvider {
    async fn available_ids(
        &self,
        media_type: MediaType,
    ) -> Result<HashSet<String>, ProviderError> {
        let url = self.list_url(media_type);
        let no_query: [(&str, &str); 0] = [];
        let ids: Vec<WireId> =
            get_json(&self.http, &url, &no_query).await?;

        Ok(ids.into_iter().map(WireId::into_canonical).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_ids_canonicalize_to_decimal_strings() {
        let ids: Vec<WireId> =
            serde_json::from_str(r#"[603, "60625", " 550 "]"#).unwrap();
        let canonical: HashSet<String> =
            ids.into_iter().map(WireId::into_canonical).collect();

        assert!(canonical.contains("603"));
        assert!(canonical.contains("60625"));
        assert!(canonical.contains("550"));
    }

    #[test]
    fn list_url_uses_tv_segment_for_series() {
        let provider =
            HttpAvailabilityProvider::new("https://provider.example").unwrap();
        assert_eq!(
            provider.list_url(MediaType::Series),
            "https://provider.example/ids/tv.json"
        );
        assert_eq!(
            provider.list_url(MediaType::Movie),
            "https://provider.example/ids/movie.json"
        );
    }
}
