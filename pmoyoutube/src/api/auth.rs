//! Module d'authentification OAuth2 pour l'API YouTube
//!
//! L'application dispose d'un refresh token obtenu une fois pour toutes par
//! le consentement de l'utilisateur. Il est échangé contre un access token de
//! courte durée, conservé en mémoire et renouvelé avant son expiration.

use super::YoutubeApi;
use crate::error::{Result, YoutubeError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Marge de renouvellement avant l'expiration annoncée
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Credentials OAuth2 nécessaires pour agir au nom de l'utilisateur
#[derive(Clone, Serialize, Deserialize)]
pub struct OAuthCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

// Les secrets ne doivent jamais apparaître dans les logs
impl std::fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("refresh_token", &"***")
            .finish()
    }
}

impl OAuthCredentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// Vérifie qu'aucun credential n'est vide
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("refresh_token", &self.refresh_token),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(YoutubeError::Configuration(format!(
                "Missing OAuth credentials: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Access token et date d'expiration
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Vrai si le token reste valide au-delà de la marge de renouvellement
    pub fn is_fresh(&self) -> bool {
        self.expires_at - Duration::seconds(EXPIRY_MARGIN_SECS) > Utc::now()
    }
}

/// Réponse de l'endpoint token
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

/// Réponse d'erreur de l'endpoint token
#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

fn default_expires_in() -> i64 {
    3600
}

impl YoutubeApi {
    /// Échange le refresh token contre un nouvel access token
    ///
    /// # Errors
    ///
    /// * `YoutubeError::Unauthorized` - refresh token révoqué ou client invalide
    pub async fn refresh_access_token(&self) -> Result<AccessToken> {
        info!(
            "Refreshing YouTube access token for client {}",
            self.credentials.client_id
        );

        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("refresh_token", self.credentials.refresh_token.as_str()),
        ];

        let response = self
            .client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<TokenErrorResponse>(&text) {
                Ok(err) => match err.error_description {
                    Some(description) => format!("{}: {}", err.error, description),
                    None => err.error,
                },
                Err(_) => text,
            };
            warn!("Token refresh failed ({}): {}", status.as_u16(), message);
            return Err(YoutubeError::Unauthorized(message));
        }

        let response: TokenResponse = serde_json::from_str(&text)?;
        let token = AccessToken {
            token: response.access_token,
            expires_at: Utc::now() + Duration::seconds(response.expires_in),
        };

        debug!("Access token valid until {}", token.expires_at);
        *self.access_token.write().await = Some(token.clone());

        Ok(token)
    }

    /// Retourne un access token valide, en le renouvelant si nécessaire
    pub async fn access_token(&self) -> Result<String> {
        if let Some(token) = self.access_token.read().await.as_ref() {
            if token.is_fresh() {
                return Ok(token.token.clone());
            }
        }

        Ok(self.refresh_access_token().await?.token)
    }

    /// Vérifie si un access token valide est en cache
    pub async fn is_authenticated(&self) -> bool {
        self.access_token
            .read()
            .await
            .as_ref()
            .is_some_and(AccessToken::is_fresh)
    }

    /// Oublie l'access token courant
    pub async fn logout(&self) {
        debug!("Dropping cached access token");
        *self.access_token.write().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_freshness() {
        let fresh = AccessToken {
            token: "a".to_string(),
            expires_at: Utc::now() + Duration::seconds(3600),
        };
        let stale = AccessToken {
            token: "b".to_string(),
            expires_at: Utc::now() + Duration::seconds(30),
        };
        assert!(fresh.is_fresh());
        assert!(!stale.is_fresh());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let credentials = OAuthCredentials::new("id", "topsecret", "1//refresh");
        let text = format!("{credentials:?}");
        assert!(!text.contains("topsecret"));
        assert!(!text.contains("1//refresh"));
    }

    #[test]
    fn test_validate_lists_missing_fields() {
        let err = OAuthCredentials::new("id", " ", "").validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "YouTube configuration error: Missing OAuth credentials: client_secret, refresh_token"
        );
    }

    #[test]
    fn test_not_authenticated_initially() {
        let api = YoutubeApi::new(OAuthCredentials::new("id", "secret", "token")).unwrap();
        assert!(!tokio_test::block_on(api.is_authenticated()));
    }
}
