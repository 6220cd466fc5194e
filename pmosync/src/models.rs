//! Structures de données manipulées par le moteur de synchronisation

use serde::{Deserialize, Serialize};

/// Appartenance d'une vidéo à une playlist
///
/// `entry_id` identifie l'appartenance elle-même (c'est lui qu'on supprime),
/// `content_id` identifie la vidéo sous-jacente (clé de déduplication).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    /// Identifiant de l'appartenance à la playlist
    pub entry_id: String,
    /// Identifiant stable de la vidéo
    pub content_id: String,
    /// Titre affiché par le service, utilisé comme signal de disponibilité
    #[serde(default)]
    pub visibility_label: Option<String>,
}

impl PlaylistItem {
    pub fn new(
        entry_id: impl Into<String>,
        content_id: impl Into<String>,
        visibility_label: Option<String>,
    ) -> Self {
        Self {
            entry_id: entry_id.into(),
            content_id: content_id.into(),
            visibility_label,
        }
    }

    /// Retourne le titre s'il est présent
    pub fn label(&self) -> Option<&str> {
        self.visibility_label.as_deref()
    }
}

/// Une page de résultats retournée par le service distant
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub items: Vec<PlaylistItem>,
    /// Curseur de continuation, absent sur la dernière page
    pub next_page_token: Option<String>,
}

/// Extrait les identifiants de contenu d'une liste, dans l'ordre
pub fn content_ids(items: &[PlaylistItem]) -> Vec<String> {
    items.iter().map(|item| item.content_id.clone()).collect()
}

/// Mode d'exécution d'une synchronisation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Les suppressions et insertions sont envoyées au service
    #[default]
    Apply,
    /// Les décisions sont calculées et rapportées, sans modification distante
    DryRun,
}

impl RunMode {
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run { RunMode::DryRun } else { RunMode::Apply }
    }

    pub fn is_apply(self) -> bool {
        self == RunMode::Apply
    }
}
