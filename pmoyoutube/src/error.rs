//! Gestion des erreurs pour le client YouTube

use serde::Deserialize;
use thiserror::Error;

/// Type Result personnalisé pour pmoyoutube
pub type Result<T> = std::result::Result<T, YoutubeError>;

/// Raisons d'erreur de l'API signalant un contenu inaccessible
///
/// Le service répond ainsi quand une vidéo privée ou supprimée est visée
/// par une suppression ou une insertion.
const NOT_ACCESSIBLE_REASONS: &[&str] = &[
    "playlistItemsNotAccessible",
    "playlistItemNotAccessible",
    "videoNotFound",
    "failedPrecondition",
];

/// Raisons d'erreur de l'API signalant un dépassement de quota
const RATE_LIMIT_REASONS: &[&str] = &["quotaExceeded", "rateLimitExceeded", "userRateLimitExceeded"];

/// Erreurs possibles lors de l'utilisation du client YouTube
#[derive(Error, Debug)]
pub enum YoutubeError {
    /// Erreur d'authentification (refresh token invalide ou révoqué)
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Ressource non trouvée (playlist, élément de playlist)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Le contenu visé n'est plus accessible (vidéo privée ou supprimée)
    #[error("Content not accessible: {0}")]
    NotAccessible(String),

    /// Quota dépassé
    #[error("Quota or rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Erreur HTTP
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Erreur de parsing JSON
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Erreur de configuration (anyhow)
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    /// Erreur de configuration YouTube (client ID, refresh token, etc.)
    #[error("YouTube configuration error: {0}")]
    Configuration(String),

    /// Erreur de l'API YouTube
    #[error("YouTube API error (code {code}, reason {reason}): {message}")]
    ApiError {
        code: u16,
        reason: String,
        message: String,
    },
}

/// Enveloppe d'erreur des API Google
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    reason: String,
}

impl YoutubeError {
    /// Crée une erreur depuis un code de statut HTTP et le corps de la réponse
    pub fn from_api_error(code: u16, body: &str) -> Self {
        let (message, reasons, status) = match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => (
                envelope.error.message,
                envelope
                    .error
                    .errors
                    .into_iter()
                    .map(|e| e.reason)
                    .filter(|r| !r.is_empty())
                    .collect::<Vec<_>>(),
                envelope.error.status,
            ),
            Err(_) => (body.to_string(), Vec::new(), None),
        };

        let has_reason = |known: &[&str]| reasons.iter().any(|r| known.contains(&r.as_str()));

        if has_reason(NOT_ACCESSIBLE_REASONS)
            || code == 412
            || status.as_deref() == Some("FAILED_PRECONDITION")
            || message.contains("Precondition check failed")
        {
            return Self::NotAccessible(message);
        }

        if code == 429 || has_reason(RATE_LIMIT_REASONS) {
            return Self::RateLimitExceeded(message);
        }

        match code {
            401 | 403 => Self::Unauthorized(message),
            404 => Self::NotFound(message),
            _ => Self::ApiError {
                code,
                reason: reasons.into_iter().next().unwrap_or_default(),
                message,
            },
        }
    }

    /// Vérifie si l'erreur signale un contenu inaccessible
    pub fn is_not_accessible(&self) -> bool {
        matches!(self, YoutubeError::NotAccessible(_))
    }

    /// Vérifie si l'erreur est une erreur de credentials
    pub fn is_auth_error(&self) -> bool {
        matches!(self, YoutubeError::Unauthorized(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(code: u16, reason: &str, message: &str) -> String {
        serde_json::json!({
            "error": {
                "code": code,
                "message": message,
                "errors": [{ "domain": "youtube.playlistItem", "reason": reason, "message": message }]
            }
        })
        .to_string()
    }

    #[test]
    fn test_not_accessible_reason() {
        let err = YoutubeError::from_api_error(
            403,
            &body(403, "playlistItemsNotAccessible", "The request is not properly authorized."),
        );
        assert!(err.is_not_accessible());
    }

    #[test]
    fn test_precondition_failed() {
        let err = YoutubeError::from_api_error(
            400,
            &body(400, "failedPrecondition", "Precondition check failed."),
        );
        assert!(err.is_not_accessible());
    }

    #[test]
    fn test_precondition_status_and_forbidden() {
        let failed = serde_json::json!({
            "error": { "code": 400, "message": "Bad request", "status": "FAILED_PRECONDITION" }
        })
        .to_string();
        assert!(YoutubeError::from_api_error(400, &failed).is_not_accessible());
        assert!(YoutubeError::from_api_error(412, "").is_not_accessible());

        let forbidden = YoutubeError::from_api_error(403, &body(403, "forbidden", "Forbidden"));
        assert!(forbidden.is_auth_error());
    }

    #[test]
    fn test_quota_exceeded() {
        let err = YoutubeError::from_api_error(403, &body(403, "quotaExceeded", "quota"));
        assert!(matches!(err, YoutubeError::RateLimitExceeded(_)));
    }

    #[test]
    fn test_plain_status_codes() {
        assert!(YoutubeError::from_api_error(401, "nope").is_auth_error());
        assert!(matches!(
            YoutubeError::from_api_error(404, &body(404, "playlistNotFound", "gone")),
            YoutubeError::NotFound(_)
        ));
        match YoutubeError::from_api_error(500, &body(500, "backendError", "oops")) {
            YoutubeError::ApiError { code, reason, .. } => {
                assert_eq!(code, 500);
                assert_eq!(reason, "backendError");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
