//! Déduplication d'une playlist par identité de contenu
//!
//! La première occurrence de chaque vidéo est conservée, les suivantes sont
//! supprimées. Le parcours est un pli séquentiel sur la liste : l'ensemble des
//! vidéos déjà vues est l'accumulateur, et chaque suppression est attendue
//! avant de passer à l'élément suivant. Paralléliser ce parcours changerait
//! l'occurrence considérée comme « première ».

use crate::availability::AvailabilityFilter;
use crate::error::{Result, SyncError};
use crate::models::{PlaylistItem, RunMode};
use crate::pager::fetch_all;
use crate::service::PlaylistService;
use futures::{stream, TryStreamExt};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Résultat d'une passe de déduplication
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DedupOutcome {
    /// Premières occurrences, dans l'ordre de la playlist
    pub kept: Vec<PlaylistItem>,
    /// Doublons supprimés (ou qui le seraient en mode simulation)
    pub removed: Vec<PlaylistItem>,
    /// Doublons laissés en place car leur vidéo n'est plus accessible
    pub skipped_unavailable: Vec<PlaylistItem>,
}

impl DedupOutcome {
    /// Vrai si aucune suppression n'a été nécessaire
    pub fn is_clean(&self) -> bool {
        self.removed.is_empty()
    }
}

/// État du pli : vidéos déjà vues et décisions prises
#[derive(Default)]
struct Scan {
    seen: HashSet<String>,
    outcome: DedupOutcome,
}

/// Déduplique une liste déjà récupérée en entier
///
/// # Arguments
///
/// * `service` - Service distant recevant les suppressions
/// * `filter` - Filtre de disponibilité : un doublon inaccessible n'est jamais supprimé
/// * `items` - Contenu complet de la playlist, dans l'ordre du service
/// * `mode` - En [`RunMode::DryRun`], aucune suppression n'est envoyée
pub async fn dedup<S>(
    service: &S,
    filter: &AvailabilityFilter,
    items: Vec<PlaylistItem>,
    mode: RunMode,
) -> Result<DedupOutcome>
where
    S: PlaylistService + ?Sized,
{
    let scan = stream::iter(items.into_iter().map(Ok::<_, SyncError>))
        .try_fold(Scan::default(), |mut scan, item| async move {
            if scan.seen.insert(item.content_id.clone()) {
                scan.outcome.kept.push(item);
            } else if filter.is_item_eligible(&item) {
                debug!(
                    "Duplicate of {} at entry {}, removing",
                    item.content_id, item.entry_id
                );
                if mode.is_apply() {
                    remove_entry(service, &item).await?;
                }
                scan.outcome.removed.push(item);
            } else {
                warn!(
                    "Duplicate of {} at entry {} is unavailable ({:?}), leaving it in place",
                    item.content_id,
                    item.entry_id,
                    item.label()
                );
                scan.outcome.skipped_unavailable.push(item);
            }
            Ok(scan)
        })
        .await?;

    Ok(scan.outcome)
}

/// Récupère une playlist puis la déduplique
pub async fn deduplicate_collection<S>(
    service: &S,
    filter: &AvailabilityFilter,
    collection_id: &str,
    mode: RunMode,
) -> Result<DedupOutcome>
where
    S: PlaylistService + ?Sized,
{
    let items = fetch_all(service, collection_id).await?;
    let outcome = dedup(service, filter, items, mode).await?;
    info!(
        "Playlist {}: {} duplicate(s) removed, {} unavailable duplicate(s) left",
        collection_id,
        outcome.removed.len(),
        outcome.skipped_unavailable.len()
    );
    Ok(outcome)
}

async fn remove_entry<S>(service: &S, item: &PlaylistItem) -> Result<()>
where
    S: PlaylistService + ?Sized,
{
    service
        .delete_member(&item.entry_id)
        .await
        .inspect_err(|err| {
            if err.is_not_accessible() {
                warn!(
                    "Service rejected removal of entry {} (video {}, title {:?}); \
                     this title may need to be added to the unavailable markers",
                    item.entry_id,
                    item.content_id,
                    item.label()
                );
            }
        })
}
