//! Énumération complète d'une playlist par pagination à curseur

use crate::error::Result;
use crate::models::PlaylistItem;
use crate::service::PlaylistService;
use tracing::debug;

/// Taille de page demandée au service distant
pub const PAGE_SIZE: u32 = 50;

/// Récupère toutes les appartenances d'une playlist, dans l'ordre du service
///
/// Les pages sont demandées une par une : le curseur de la page N+1 n'est
/// connu qu'à réception de la page N. La première erreur est propagée telle
/// quelle, sans résultat partiel ni nouvelle tentative.
pub async fn fetch_all<S>(service: &S, collection_id: &str) -> Result<Vec<PlaylistItem>>
where
    S: PlaylistService + ?Sized,
{
    let mut items = Vec::new();
    let mut page_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = service
            .list_members(collection_id, page_token.as_deref(), PAGE_SIZE)
            .await?;
        pages += 1;

        debug!(
            "Playlist {} page {}: {} items",
            collection_id,
            pages,
            page.items.len()
        );
        items.extend(page.items);

        match page.next_page_token {
            Some(token) if !token.is_empty() => page_token = Some(token),
            _ => break,
        }
    }

    debug!(
        "Fetched {} items from playlist {} in {} page(s)",
        items.len(),
        collection_id,
        pages
    );
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryPlaylistService;

    #[tokio::test]
    async fn test_fetch_all_concatenates_pages_in_order() {
        let ids: Vec<String> = (0..120).map(|i| format!("v{i:03}")).collect();
        let service = MemoryPlaylistService::new();
        let members: Vec<(&str, Option<&str>)> = ids.iter().map(|id| (id.as_str(), None)).collect();
        service.add_collection("PL", &members);

        let items = fetch_all(&service, "PL").await.unwrap();

        let fetched: Vec<String> = items.into_iter().map(|i| i.content_id).collect();
        assert_eq!(fetched, ids);
        // 50 + 50 + 20
        assert_eq!(service.list_calls("PL"), 3);
    }

    #[tokio::test]
    async fn test_fetch_all_empty_collection() {
        let service = MemoryPlaylistService::new();
        service.add_collection("PL", &[]);

        let items = fetch_all(&service, "PL").await.unwrap();

        assert!(items.is_empty());
        assert_eq!(service.list_calls("PL"), 1);
    }

    #[tokio::test]
    async fn test_fetch_all_propagates_failure_without_partial_result() {
        let ids: Vec<String> = (0..60).map(|i| format!("v{i}")).collect();
        let service = MemoryPlaylistService::new();
        let members: Vec<(&str, Option<&str>)> = ids.iter().map(|id| (id.as_str(), None)).collect();
        service.add_collection("PL", &members);
        service.fail_list_after("PL", 1);

        let result = fetch_all(&service, "PL").await;

        assert!(result.is_err());
        assert_eq!(service.list_calls("PL"), 2);
    }
}
