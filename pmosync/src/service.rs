//! Abstraction du service distant de gestion des playlists
//!
//! Le moteur ne connaît que ces trois opérations. Le client HTTP concret
//! (`pmoyoutube`) et le service en mémoire ([`crate::memory`]) les implémentent.

use crate::error::Result;
use crate::models::Page;
use std::sync::Arc;

/// Service distant exposant les appartenances d'une playlist
///
/// # Exemple
///
/// ```rust,ignore
/// use pmosync::{Page, PlaylistService, Result};
///
/// struct MyService;
///
/// #[async_trait::async_trait]
/// impl PlaylistService for MyService {
///     async fn list_members(
///         &self,
///         collection_id: &str,
///         page_token: Option<&str>,
///         page_size: u32,
///     ) -> Result<Page> {
///         Ok(Page::default())
///     }
///
///     async fn delete_member(&self, entry_id: &str) -> Result<()> {
///         Ok(())
///     }
///
///     async fn insert_member(&self, collection_id: &str, content_id: &str) -> Result<()> {
///         Ok(())
///     }
/// }
/// ```
#[async_trait::async_trait]
pub trait PlaylistService: Send + Sync {
    /// Récupère une page d'appartenances
    ///
    /// # Arguments
    ///
    /// * `collection_id` - Identifiant de la playlist
    /// * `page_token` - Curseur retourné par la page précédente, `None` pour la première
    /// * `page_size` - Nombre maximum d'éléments par page
    async fn list_members(
        &self,
        collection_id: &str,
        page_token: Option<&str>,
        page_size: u32,
    ) -> Result<Page>;

    /// Supprime une appartenance (la vidéo elle-même n'est pas touchée)
    ///
    /// Échoue si la vidéo sous-jacente n'est plus accessible.
    async fn delete_member(&self, entry_id: &str) -> Result<()>;

    /// Ajoute une vidéo à la fin d'une playlist
    ///
    /// Échoue si `content_id` désigne une vidéo inaccessible.
    async fn insert_member(&self, collection_id: &str, content_id: &str) -> Result<()>;
}

#[async_trait::async_trait]
impl<T: PlaylistService + ?Sized> PlaylistService for &T {
    async fn list_members(
        &self,
        collection_id: &str,
        page_token: Option<&str>,
        page_size: u32,
    ) -> Result<Page> {
        (**self)
            .list_members(collection_id, page_token, page_size)
            .await
    }

    async fn delete_member(&self, entry_id: &str) -> Result<()> {
        (**self).delete_member(entry_id).await
    }

    async fn insert_member(&self, collection_id: &str, content_id: &str) -> Result<()> {
        (**self).insert_member(collection_id, content_id).await
    }
}

#[async_trait::async_trait]
impl<T: PlaylistService + ?Sized> PlaylistService for Arc<T> {
    async fn list_members(
        &self,
        collection_id: &str,
        page_token: Option<&str>,
        page_size: u32,
    ) -> Result<Page> {
        (**self)
            .list_members(collection_id, page_token, page_size)
            .await
    }

    async fn delete_member(&self, entry_id: &str) -> Result<()> {
        (**self).delete_member(entry_id).await
    }

    async fn insert_member(&self, collection_id: &str, content_id: &str) -> Result<()> {
        (**self).insert_member(collection_id, content_id).await
    }
}
