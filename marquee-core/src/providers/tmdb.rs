use std::fmt;

use async_trait::async_trait;
use chrono::NaiveDate;
use marquee_model::{MediaMetadata, MediaType, SeasonOutline, TmdbId};
use serde::{Deserialize, Serialize};

use super::{ProviderError, get_json};

const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
const TMDB_V3_BASE: &str = "https://api.themoviedb.org/3";

#[derive(Debug, Clone, Copy)]
pub enum PosterSize {
    W92,
    W154,
    W185,
    W342,
    W500,
    W780,
    Original,
}

impl PosterSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            PosterSize::W92 => "w92",
            PosterSize::W154 => "w154",
            PosterSize::W185 => "w185",
            PosterSize::W342 => "w342",
            PosterSize::W500 => "w500",
            PosterSize::W780 => "w780",
            PosterSize::Original => "original",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum BackdropSize {
    W300,
    W780,
    W1280,
    Original,
}

impl BackdropSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackdropSize::W300 => "w300",
            BackdropSize::W780 => "w780",
            BackdropSize::W1280 => "w1280",
            BackdropSize::Original => "original",
        }
    }
}

/// Read-only access to the external metadata provider.
///
/// One call fetches the full structured record for a single identifier;
/// the resolver and the repair pass are the only consumers.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn fetch(
        &self,
        media_type: MediaType,
        id: TmdbId,
    ) -> Result<MediaMetadata, ProviderError>;
}

pub struct TmdbMetadataProvider {
    http: reqwest::Client,
    api_key: String,
    language: Option<String>,
}

impl fmt::Debug for TmdbMetadataProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbMetadataProvider")
            .field("language", &self.language)
            .finish()
    }
}

impl TmdbMetadataProvider {
    pub fn new(
        api_key: impl Into<String>,
        language: Option<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            language,
        }
    }

    pub fn from_env() -> Self {
        let api_key =
            std::env::var("TMDB_API_KEY").unwrap_or_else(|_| String::new());
        let language = std::env::var("TMDB_LANG").ok();
        Self::new(api_key, language)
    }

    /// Build a poster URL from a poster path
    pub fn poster_url(&self, path: &str, size: PosterSize) -> String {
        format!("{}/{}{}", TMDB_IMAGE_BASE, size.as_str(), path)
    }

    /// Build a backdrop URL from a backdrop path
    pub fn backdrop_url(&self, path: &str, size: BackdropSize) -> String {
        format!("{}/{}{}", TMDB_IMAGE_BASE, size.as_str(), path)
    }

    async fn get_movie(
        &self,
        id: TmdbId,
    ) -> Result<MovieDetailsBody, ProviderError> {
        let query = DetailsQuery {
            api_key: &self.api_key,
            language: self.language.as_deref(),
        };
        get_json(
            &self.http,
            &format!("{TMDB_V3_BASE}/movie/{id}"),
            &query,
        )
        .await
    }

    async fn get_series(
        &self,
        id: TmdbId,
    ) -> Result<TvDetailsBody, ProviderError> {
        let query = DetailsQuery {
            api_key: &self.api_key,
            language: self.language.as_deref(),
        };
        get_json(&self.http, &format!("{TMDB_V3_BASE}/tv/{id}"), &query)
            .await
    }
}

#[async_trait]
impl MetadataProvider for TmdbMetadataProvider {
    async fn fetch(
        &self,
        media_type: MediaType,
        id: TmdbId,
    ) -> Result<MediaMetadata, ProviderError> {
        match media_type {
            MediaType::Movie => {
                let body = self.get_movie(id).await?;
                Ok(MediaMetadata {
                    tmdb_id: TmdbId(body.id),
                    media_type: MediaType::Movie,
                    title: body.title,
                    overview: body.overview,
                    poster_path: body.poster_path,
                    backdrop_path: body.backdrop_path,
                    genres: genre_names(body.genres),
                    release_date: body.release_date,
                    seasons: Vec::new(),
                })
            }
            MediaType::Series => {
                let body = self.get_series(id).await?;
                Ok(MediaMetadata {
                    tmdb_id: TmdbId(body.id),
                    media_type: MediaType::Series,
                    title: body.name,
                    overview: body.overview,
                    poster_path: body.poster_path,
                    backdrop_path: body.backdrop_path,
                    genres: genre_names(body.genres),
                    release_date: body.first_air_date,
                    seasons: body
                        .seasons
                        .into_iter()
                        .map(|season| SeasonOutline {
                            season_number: season.season_number,
                            name: season.name,
                            episode_count: season.episode_count,
                        })
                        .collect(),
                })
            }
        }
    }
}

fn genre_names(genres: Vec<GenreEntry>) -> Vec<String> {
    genres.into_iter().map(|genre| genre.name).collect()
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

#[derive(Debug, Clone, Serialize)]
struct DetailsQuery<'a> {
    api_key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
}

#[derive(Debug, Clone, Deserialize)]
struct GenreEntry {
    name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct MovieDetailsBody {
    id: u64,
    title: String,
    overview: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    #[serde(default)]
    genres: Vec<GenreEntry>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    release_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
struct SeasonBody {
    season_number: u32,
    name: Option<String>,
    #[serde(default)]
    episode_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
struct TvDetailsBody {
    id: u64,
    name: String,
    overview: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    #[serde(default)]
    genres: Vec<GenreEntry>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    first_air_date: Option<NaiveDate>,
    #[serde(default)]
    seasons: Vec<SeasonBody>,
}
