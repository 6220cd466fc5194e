//! Couche d'accès à l'API REST YouTube Data v3
//!
//! Ce module fournit une interface bas-niveau pour communiquer avec YouTube.

pub mod auth;
pub mod playlist_items;

use crate::error::{Result, YoutubeError};
use auth::{AccessToken, OAuthCredentials};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// URL de base de l'API YouTube Data v3
pub const API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Endpoint OAuth2 de Google pour l'échange du refresh token
pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Client API bas-niveau pour communiquer avec YouTube
pub struct YoutubeApi {
    /// Client HTTP
    client: Client,
    /// URL de base de l'API
    base_url: String,
    /// URL d'échange des tokens OAuth2
    token_url: String,
    /// Credentials OAuth2 de l'application et de l'utilisateur
    credentials: OAuthCredentials,
    /// Access token courant et son expiration
    access_token: RwLock<Option<AccessToken>>,
}

impl YoutubeApi {
    /// Crée une nouvelle instance de l'API pointant sur les serveurs Google
    pub fn new(credentials: OAuthCredentials) -> Result<Self> {
        Self::with_endpoints(credentials, API_BASE_URL, TOKEN_URL)
    }

    /// Crée une instance avec des endpoints personnalisés
    pub fn with_endpoints(
        credentials: OAuthCredentials,
        base_url: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Result<Self> {
        credentials.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("pmotube/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token_url: token_url.into(),
            credentials,
            access_token: RwLock::new(None),
        })
    }

    /// Retourne l'URL de base de l'API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Effectue une requête GET à l'API
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.url(endpoint);
        debug!("GET {} with {} params", url, params.len());
        let response = self.send(self.client.get(&url).query(params)).await?;
        Self::parse_json(response).await
    }

    /// Effectue une requête POST avec un corps JSON
    pub(crate) async fn post_json<B, T>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        body: &B,
    ) -> Result<T>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(endpoint);
        debug!("POST {} with {} params", url, params.len());
        let response = self
            .send(self.client.post(&url).query(params).json(body))
            .await?;
        Self::parse_json(response).await
    }

    /// Effectue une requête DELETE (réponse sans corps)
    pub(crate) async fn delete(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<()> {
        let url = self.url(endpoint);
        debug!("DELETE {} with {} params", url, params.len());
        self.send(self.client.delete(&url).query(params)).await?;
        Ok(())
    }

    /// Ajoute l'access token et envoie la requête
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let token = self.access_token().await?;
        let response = request.bearer_auth(token).send().await?;
        Self::check_status(response).await
    }

    /// Vérifie le statut HTTP et convertit les erreurs de l'API
    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        debug!("Response status: {}", status);

        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_default();
        warn!("API error ({}): {}", status.as_u16(), error_text);
        Err(YoutubeError::from_api_error(status.as_u16(), &error_text))
    }

    async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            warn!("Failed to parse response: {}", e);
            YoutubeError::JsonParse(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> OAuthCredentials {
        OAuthCredentials::new("client.apps.googleusercontent.com", "secret", "1//refresh")
    }

    #[test]
    fn test_api_creation() {
        let api = YoutubeApi::new(credentials()).unwrap();
        assert_eq!(api.base_url(), API_BASE_URL);
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let api = YoutubeApi::with_endpoints(credentials(), "http://localhost:1234/", TOKEN_URL)
            .unwrap();
        assert_eq!(api.url("/playlistItems"), "http://localhost:1234/playlistItems");
    }

    #[test]
    fn test_missing_credentials_are_rejected() {
        let result = YoutubeApi::new(OAuthCredentials::new("id", "", "token"));
        assert!(matches!(result, Err(YoutubeError::Configuration(_))));
    }
}
