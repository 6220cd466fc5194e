//! Fusion d'une playlist source dans la playlist cible
//!
//! Seules les vidéos disponibles et absentes de la cible sont ajoutées, à la
//! fin de la cible, dans l'ordre de la source. La source n'est jamais modifiée
//! et aucune appartenance existante de la cible n'est touchée.

use crate::availability::AvailabilityFilter;
use crate::error::Result;
use crate::models::{PlaylistItem, RunMode};
use crate::pager::fetch_all;
use crate::service::PlaylistService;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Résultat de la fusion d'une source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeOutcome {
    pub source_id: String,
    /// Vidéos ajoutées à la cible (ou qui le seraient en mode simulation)
    pub inserted: Vec<String>,
    /// Vidéos de la source déjà présentes dans la cible
    pub already_present: Vec<String>,
    /// Éléments de la source ignorés car leur vidéo n'est plus accessible
    pub skipped_unavailable: Vec<PlaylistItem>,
}

impl MergeOutcome {
    fn new(source_id: &str) -> Self {
        Self {
            source_id: source_id.to_string(),
            ..Default::default()
        }
    }
}

/// Ajoute à la cible les vidéos disponibles de la source qui y manquent
///
/// Source et cible sont relues au moment de la fusion : une fusion précédente
/// ou un acteur externe a pu modifier la cible depuis la dernière lecture.
///
/// L'ensemble des vidéos présentes dans la cible est mis à jour après chaque
/// insertion, si bien qu'une vidéo listée deux fois dans la source n'est
/// ajoutée qu'une fois.
pub async fn merge<S>(
    service: &S,
    filter: &AvailabilityFilter,
    source_id: &str,
    target_id: &str,
    mode: RunMode,
) -> Result<MergeOutcome>
where
    S: PlaylistService + ?Sized,
{
    merge_planned(service, filter, source_id, target_id, mode, &HashSet::new()).await
}

/// Comme [`merge`], en comptant `planned` comme déjà présentes dans la cible
///
/// En [`RunMode::DryRun`] la cible relue ne contient pas les ajouts prévus
/// par les fusions précédentes : `planned` les fournit.
pub async fn merge_planned<S>(
    service: &S,
    filter: &AvailabilityFilter,
    source_id: &str,
    target_id: &str,
    mode: RunMode,
    planned: &HashSet<String>,
) -> Result<MergeOutcome>
where
    S: PlaylistService + ?Sized,
{
    let source_items = fetch_all(service, source_id).await?;
    let target_items = fetch_all(service, target_id).await?;

    let mut present: HashSet<String> = target_items
        .into_iter()
        .map(|item| item.content_id)
        .chain(planned.iter().cloned())
        .collect();
    let mut outcome = MergeOutcome::new(source_id);

    for item in source_items {
        if !filter.is_item_eligible(&item) {
            debug!(
                "Skipping unavailable video {} from {} ({:?})",
                item.content_id,
                source_id,
                item.label()
            );
            outcome.skipped_unavailable.push(item);
            continue;
        }

        if present.contains(&item.content_id) {
            outcome.already_present.push(item.content_id);
            continue;
        }

        if mode.is_apply() {
            add_video(service, target_id, &item).await?;
        }
        debug!("Added video {} to {}", item.content_id, target_id);
        present.insert(item.content_id.clone());
        outcome.inserted.push(item.content_id);
    }

    info!(
        "Merged {} into {}: {} added, {} already present, {} unavailable",
        source_id,
        target_id,
        outcome.inserted.len(),
        outcome.already_present.len(),
        outcome.skipped_unavailable.len()
    );
    Ok(outcome)
}

async fn add_video<S>(service: &S, target_id: &str, item: &PlaylistItem) -> Result<()>
where
    S: PlaylistService + ?Sized,
{
    service
        .insert_member(target_id, &item.content_id)
        .await
        .inspect_err(|err| {
            if err.is_not_accessible() {
                warn!(
                    "Service rejected insertion of video {} (title {:?}) into {}; \
                     this title may need to be added to the unavailable markers",
                    item.content_id,
                    item.label(),
                    target_id
                );
            }
        })
}
