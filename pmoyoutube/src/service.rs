//! Implémentation du trait `PlaylistService` pour le client YouTube

use crate::client::YoutubeClient;
use crate::error::YoutubeError;
use pmosync::{Operation, Page, PlaylistService, SyncError};
use tracing::warn;

/// Convertit une erreur YouTube en erreur du moteur
///
/// Les refus pour contenu inaccessible restent distincts des autres erreurs.
pub fn to_sync_error(err: YoutubeError, operation: Operation, id: &str) -> SyncError {
    match err {
        YoutubeError::NotAccessible(message) => SyncError::not_accessible(operation, id, message),
        other => SyncError::Remote(format!("{operation} {id}: {other}")),
    }
}

#[async_trait::async_trait]
impl PlaylistService for YoutubeClient {
    async fn list_members(
        &self,
        collection_id: &str,
        page_token: Option<&str>,
        page_size: u32,
    ) -> pmosync::Result<Page> {
        let page = self
            .list_playlist_items(collection_id, page_token, page_size)
            .await
            .map_err(|e| to_sync_error(e, Operation::List, collection_id))?;

        let items = page
            .items
            .iter()
            .filter_map(|resource| {
                let item = resource.to_playlist_item();
                if item.is_none() {
                    warn!(
                        "Playlist item {} in {} references no video, ignoring it",
                        resource.id, collection_id
                    );
                }
                item
            })
            .collect();

        Ok(Page {
            items,
            next_page_token: page.next_page_token,
        })
    }

    async fn delete_member(&self, entry_id: &str) -> pmosync::Result<()> {
        self.delete_playlist_item(entry_id)
            .await
            .map_err(|e| to_sync_error(e, Operation::Delete, entry_id))
    }

    async fn insert_member(&self, collection_id: &str, content_id: &str) -> pmosync::Result<()> {
        self.insert_playlist_item(collection_id, content_id)
            .await
            .map(|_| ())
            .map_err(|e| to_sync_error(e, Operation::Insert, content_id))
    }
}
