//! Module d'accès aux éléments de playlist (`playlistItems`)

use super::YoutubeApi;
use crate::error::Result;
use crate::models::{PlaylistItemPage, PlaylistItemResource};
use serde::Serialize;
use tracing::debug;

/// Parties demandées lors de la lecture d'une playlist
const LIST_PARTS: &str = "contentDetails,status,snippet";

/// Corps de la requête `playlistItems.insert`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InsertRequest<'a> {
    snippet: InsertSnippet<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InsertSnippet<'a> {
    playlist_id: &'a str,
    resource_id: VideoResource<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoResource<'a> {
    kind: &'a str,
    video_id: &'a str,
}

impl YoutubeApi {
    /// Récupère une page d'éléments d'une playlist
    ///
    /// # Arguments
    ///
    /// * `playlist_id` - Identifiant de la playlist
    /// * `page_token` - Curseur `nextPageToken` de la page précédente
    /// * `max_results` - Taille de page (50 au maximum côté API)
    pub async fn list_playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
        max_results: u32,
    ) -> Result<PlaylistItemPage> {
        debug!(
            "Fetching items of playlist {} (page token {:?})",
            playlist_id, page_token
        );

        let max_results = max_results.to_string();
        let mut params = vec![
            ("part", LIST_PARTS),
            ("playlistId", playlist_id),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        self.get("/playlistItems", &params).await
    }

    /// Retire un élément d'une playlist (la vidéo n'est pas supprimée)
    pub async fn delete_playlist_item(&self, playlist_item_id: &str) -> Result<()> {
        debug!("Deleting playlist item {}", playlist_item_id);
        self.delete("/playlistItems", &[("id", playlist_item_id)])
            .await
    }

    /// Ajoute une vidéo à la fin d'une playlist
    pub async fn insert_playlist_item(
        &self,
        playlist_id: &str,
        video_id: &str,
    ) -> Result<PlaylistItemResource> {
        debug!("Adding video {} to playlist {}", video_id, playlist_id);

        let body = InsertRequest {
            snippet: InsertSnippet {
                playlist_id,
                resource_id: VideoResource {
                    kind: "youtube#video",
                    video_id,
                },
            },
        };

        self.post_json("/playlistItems", &[("part", "snippet")], &body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_body_shape() {
        let body = InsertRequest {
            snippet: InsertSnippet {
                playlist_id: "PL123",
                resource_id: VideoResource {
                    kind: "youtube#video",
                    video_id: "dQw4w9WgXcQ",
                },
            },
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "snippet": {
                    "playlistId": "PL123",
                    "resourceId": { "kind": "youtube#video", "videoId": "dQw4w9WgXcQ" }
                }
            })
        );
    }
}
