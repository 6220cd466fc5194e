//! Gestion des erreurs du moteur de synchronisation

use thiserror::Error;

/// Type Result personnalisé pour pmosync
pub type Result<T> = std::result::Result<T, SyncError>;

/// Opération distante ayant échoué
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Delete,
    Insert,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Delete => "delete",
            Operation::Insert => "insert",
        };
        f.write_str(name)
    }
}

/// Erreurs possibles lors d'une synchronisation
#[derive(Error, Debug)]
pub enum SyncError {
    /// Configuration incomplète (playlist cible absente, etc.)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Le service distant refuse l'opération car le contenu n'est plus accessible
    #[error("{operation} rejected for {id}: content not accessible ({message})")]
    NotAccessible {
        operation: Operation,
        id: String,
        message: String,
    },

    /// Toute autre erreur du service distant ou du réseau
    #[error("Remote service error: {0}")]
    Remote(String),

    /// Erreur générique
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SyncError {
    /// Crée une erreur de refus pour contenu inaccessible
    pub fn not_accessible(
        operation: Operation,
        id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::NotAccessible {
            operation,
            id: id.into(),
            message: message.into(),
        }
    }

    /// Vérifie si l'erreur est un refus pour contenu inaccessible
    pub fn is_not_accessible(&self) -> bool {
        matches!(self, SyncError::NotAccessible { .. })
    }
}
