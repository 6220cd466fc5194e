//! Client principal pour interagir avec l'API YouTube
//!
//! Ce module fournit un client haut-niveau authentifié dès sa création.

use crate::api::auth::OAuthCredentials;
use crate::api::YoutubeApi;
use crate::config_ext::YoutubeConfigExt;
use crate::error::Result;
use crate::models::{PlaylistItemPage, PlaylistItemResource};
use pmoconfig::Config;
use tracing::info;

/// Client YouTube haut-niveau
pub struct YoutubeClient {
    /// API bas-niveau
    api: YoutubeApi,
}

impl YoutubeClient {
    /// Crée un nouveau client et obtient un premier access token
    ///
    /// L'échange initial valide les credentials avant toute opération sur
    /// les playlists.
    ///
    /// # Exemple
    ///
    /// ```rust,no_run
    /// use pmoyoutube::{OAuthCredentials, YoutubeClient};
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let credentials = OAuthCredentials::new("id", "secret", "refresh-token");
    ///     let client = YoutubeClient::new(credentials).await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn new(credentials: OAuthCredentials) -> Result<Self> {
        Self::from_api(YoutubeApi::new(credentials)?).await
    }

    /// Crée un client sur des endpoints personnalisés
    pub async fn with_endpoints(
        credentials: OAuthCredentials,
        base_url: &str,
        token_url: &str,
    ) -> Result<Self> {
        Self::from_api(YoutubeApi::with_endpoints(credentials, base_url, token_url)?).await
    }

    async fn from_api(api: YoutubeApi) -> Result<Self> {
        api.refresh_access_token().await?;
        info!("YouTube client authenticated");
        Ok(Self { api })
    }

    /// Crée un client en utilisant la configuration de pmoconfig
    pub async fn from_config() -> Result<Self> {
        let config = pmoconfig::get_config();
        Self::from_config_obj(config.as_ref()).await
    }

    /// Crée un client depuis un objet Config spécifique
    pub async fn from_config_obj(config: &Config) -> Result<Self> {
        let credentials = config.get_youtube_credentials()?;
        Self::new(credentials).await
    }

    /// Retourne l'API bas-niveau
    pub fn api(&self) -> &YoutubeApi {
        &self.api
    }

    // ============ Playlist items ============

    /// Récupère une page d'éléments d'une playlist
    pub async fn list_playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
        max_results: u32,
    ) -> Result<PlaylistItemPage> {
        self.api
            .list_playlist_items(playlist_id, page_token, max_results)
            .await
    }

    /// Retire un élément d'une playlist
    pub async fn delete_playlist_item(&self, playlist_item_id: &str) -> Result<()> {
        self.api.delete_playlist_item(playlist_item_id).await
    }

    /// Ajoute une vidéo à une playlist
    pub async fn insert_playlist_item(
        &self,
        playlist_id: &str,
        video_id: &str,
    ) -> Result<PlaylistItemResource> {
        self.api.insert_playlist_item(playlist_id, video_id).await
    }
}
