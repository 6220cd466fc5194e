//! Extension pour intégrer la configuration YouTube dans pmoconfig
//!
//! Ce module fournit le trait `YoutubeConfigExt` qui ajoute à
//! pmoconfig::Config la gestion des credentials OAuth2 YouTube.

use crate::api::auth::OAuthCredentials;
use anyhow::{anyhow, Result};
use pmoconfig::Config;

/// Trait d'extension pour gérer la configuration YouTube dans pmoconfig
///
/// Les valeurs peuvent aussi venir des variables d'environnement
/// `YOUTUBE_OAUTH_CLIENT_ID`, `YOUTUBE_OAUTH_CLIENT_SECRET` et
/// `YOUTUBE_OAUTH_REFRESH_TOKEN`.
///
/// # Exemple
///
/// ```rust,ignore
/// use pmoconfig::get_config;
/// use pmoyoutube::YoutubeConfigExt;
///
/// let config = get_config();
/// let credentials = config.get_youtube_credentials()?;
/// println!("YouTube client: {}", credentials.client_id);
/// ```
pub trait YoutubeConfigExt {
    /// Récupère le client ID OAuth2
    fn get_youtube_client_id(&self) -> Result<String>;

    /// Définit le client ID OAuth2
    fn set_youtube_client_id(&self, client_id: &str) -> Result<()>;

    /// Récupère le client secret OAuth2
    fn get_youtube_client_secret(&self) -> Result<String>;

    /// Définit le client secret OAuth2
    fn set_youtube_client_secret(&self, client_secret: &str) -> Result<()>;

    /// Récupère le refresh token de l'utilisateur
    fn get_youtube_refresh_token(&self) -> Result<String>;

    /// Définit le refresh token de l'utilisateur
    fn set_youtube_refresh_token(&self, refresh_token: &str) -> Result<()>;

    /// Récupère les trois credentials
    ///
    /// # Errors
    ///
    /// Retourne une erreur si l'un des credentials n'est pas configuré
    fn get_youtube_credentials(&self) -> Result<OAuthCredentials>;
}

impl YoutubeConfigExt for Config {
    fn get_youtube_client_id(&self) -> Result<String> {
        self.get_string(&["accounts", "youtube", "client_id"])
            .ok_or_else(|| anyhow!("YouTube OAuth client ID not configured"))
    }

    fn set_youtube_client_id(&self, client_id: &str) -> Result<()> {
        self.set_string(&["accounts", "youtube", "client_id"], client_id)
    }

    fn get_youtube_client_secret(&self) -> Result<String> {
        self.get_string(&["accounts", "youtube", "client_secret"])
            .ok_or_else(|| anyhow!("YouTube OAuth client secret not configured"))
    }

    fn set_youtube_client_secret(&self, client_secret: &str) -> Result<()> {
        self.set_string(&["accounts", "youtube", "client_secret"], client_secret)
    }

    fn get_youtube_refresh_token(&self) -> Result<String> {
        self.get_string(&["accounts", "youtube", "refresh_token"])
            .ok_or_else(|| anyhow!("YouTube OAuth refresh token not configured"))
    }

    fn set_youtube_refresh_token(&self, refresh_token: &str) -> Result<()> {
        self.set_string(&["accounts", "youtube", "refresh_token"], refresh_token)
    }

    fn get_youtube_credentials(&self) -> Result<OAuthCredentials> {
        Ok(OAuthCredentials::new(
            self.get_youtube_client_id()?,
            self.get_youtube_client_secret()?,
            self.get_youtube_refresh_token()?,
        ))
    }
}
