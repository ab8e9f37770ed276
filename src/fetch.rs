use crate::models::Hero;
use crate::portrait::SpriteThumb;
use reqwest::{StatusCode, Url};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_API_URL: &str = "https://akabab.github.io/superhero-api/api/all.json";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("failed to decode heroes: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
}

/// Tracks whether a hero fetch is in flight so the UI never starts a second one.
#[derive(Debug, Default)]
pub struct FetchState {
    pub in_progress: bool,
}

/// Decode a JSON array of heroes. Any missing field fails the whole payload.
pub fn decode_heroes(body: &[u8]) -> Result<Vec<Hero>, FetchError> {
    Ok(serde_json::from_slice(body)?)
}

#[derive(Clone)]
pub struct HeroClient {
    url: Url,
    http: reqwest::Client,
}

impl HeroClient {
    pub fn new(url: Url) -> Self {
        Self::with_client(url, reqwest::Client::new())
    }

    pub fn with_client(url: Url, http: reqwest::Client) -> Self {
        Self { url, http }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Issue one GET for the hero list and decode it.
    pub async fn fetch_heroes(&self) -> Result<Vec<Hero>, FetchError> {
        debug!(url = %self.url, "fetching heroes");
        let body = self.get_bytes(self.url.clone()).await?;
        let heroes = decode_heroes(&body)?;
        info!("Heroes fetched successfully: {}", heroes.len());
        Ok(heroes)
    }

    /// Download a portrait and shrink it to a cache thumbnail.
    pub async fn fetch_portrait(&self, url: Url) -> Result<SpriteThumb, FetchError> {
        debug!(%url, "fetching portrait");
        let bytes = self.get_bytes(url).await?;
        let img = image::load_from_memory(&bytes)?;
        Ok(SpriteThumb::from_image(&img))
    }

    async fn get_bytes(&self, url: Url) -> Result<Vec<u8>, FetchError> {
        let res = self.http.get(url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(res.bytes().await?.to_vec())
    }
}
