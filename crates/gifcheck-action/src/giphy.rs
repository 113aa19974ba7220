//! Giphy random-gif client

use std::time::Duration;

use async_trait::async_trait;
use gifcheck_core::{
    Gif,
    GifProvider,
    NotifierError,
    NotifierResult,
};
use reqwest::StatusCode;
use secrecy::{
    ExposeSecret,
    SecretString,
};
use serde::Deserialize;

const GIPHY_API_URL: &str = "https://api.giphy.com";

/// Most explicit rating the fetched gifs may carry.
const GIF_RATING: &str = "pg-13";

#[derive(Debug, Deserialize)]
struct RandomGifResponse {
    data: GifData,
}

#[derive(Debug, Deserialize)]
struct GifData {
    #[serde(default)]
    title: String,
    images: GifImages,
}

#[derive(Debug, Deserialize)]
struct GifImages {
    original: GifImage,
}

#[derive(Debug, Deserialize)]
struct GifImage {
    url: String,
}

pub struct GiphyClient {
    http_client: reqwest::Client,
    api_url: String,
    api_key: SecretString,
}

impl GiphyClient {
    pub fn new(api_key: SecretString) -> NotifierResult<Self> {
        Self::with_api_url(api_key, GIPHY_API_URL)
    }

    pub fn with_api_url(api_key: SecretString, api_url: &str) -> NotifierResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("gifcheck")
            .build()
            .map_err(|e| {
                NotifierError::NetworkError(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    async fn handle_response(
        &self, response: reqwest::Response,
    ) -> NotifierResult<RandomGifResponse> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(NotifierError::ApiError(
                "Giphy rejected the API key".to_string(),
            ));
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(NotifierError::ApiError(format!(
                "Giphy API error ({status}): {error_text}"
            )));
        }

        response.json::<RandomGifResponse>().await.map_err(|e| {
            NotifierError::SerializationError(format!("Failed to parse Giphy response: {e}"))
        })
    }
}

#[async_trait]
impl GifProvider for GiphyClient {
    async fn random_gif(&self, tag: &str) -> NotifierResult<Gif> {
        let url = format!(
            "{}/v1/gifs/random?api_key={}&tag={}&rating={GIF_RATING}&fmt=json",
            self.api_url,
            self.api_key.expose_secret(),
            urlencoding::encode(tag),
        );

        // The request URL carries the API key; errors must not echo it.
        let response = self.http_client.get(&url).send().await.map_err(|e| {
            NotifierError::NetworkError(format!("Failed to reach Giphy: {}", e.without_url()))
        })?;

        let parsed = self.handle_response(response).await?;

        Ok(Gif {
            title: parsed.data.title,
            url: parsed.data.images.original.url,
        })
    }
}
