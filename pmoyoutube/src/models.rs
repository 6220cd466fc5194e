//! Structures de données pour représenter les ressources YouTube

use pmosync::PlaylistItem;
use serde::{Deserialize, Serialize};

/// Ressource `playlistItem` retournée par l'API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemResource {
    /// Identifiant de l'appartenance à la playlist
    pub id: String,
    #[serde(default)]
    pub snippet: Option<Snippet>,
    #[serde(default)]
    pub content_details: Option<ContentDetails>,
    #[serde(default)]
    pub status: Option<Status>,
}

/// Partie `snippet` d'un élément de playlist
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    /// Titre de la vidéo, remplacé par "Private video" ou "Deleted video"
    /// quand la vidéo n'est plus accessible
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub playlist_id: Option<String>,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub resource_id: Option<ResourceId>,
}

/// Référence vers la ressource ajoutée à la playlist
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub video_id: Option<String>,
}

/// Partie `contentDetails` d'un élément de playlist
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentDetails {
    #[serde(default)]
    pub video_id: Option<String>,
}

/// Partie `status` d'un élément de playlist
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    #[serde(default)]
    pub privacy_status: Option<String>,
}

/// Une page de l'endpoint `playlistItems.list`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemPage {
    #[serde(default)]
    pub items: Vec<PlaylistItemResource>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl PlaylistItemResource {
    /// Identifiant de la vidéo, depuis `contentDetails` ou à défaut `snippet.resourceId`
    pub fn video_id(&self) -> Option<&str> {
        self.content_details
            .as_ref()
            .and_then(|c| c.video_id.as_deref())
            .or_else(|| {
                self.snippet
                    .as_ref()
                    .and_then(|s| s.resource_id.as_ref())
                    .and_then(|r| r.video_id.as_deref())
            })
            .filter(|id| !id.is_empty())
    }

    pub fn title(&self) -> Option<&str> {
        self.snippet.as_ref().and_then(|s| s.title.as_deref())
    }

    /// Convertit en élément du moteur, `None` si aucune vidéo n'est référencée
    pub fn to_playlist_item(&self) -> Option<PlaylistItem> {
        let video_id = self.video_id()?;
        Some(PlaylistItem::new(
            self.id.clone(),
            video_id,
            self.title().map(str::to_string),
        ))
    }
}
