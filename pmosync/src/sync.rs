//! Orchestration d'une synchronisation complète
//!
//! Séquence d'une exécution :
//!
//! ```text
//! lecture cible → déduplication cible → pour chaque source : fusion → relecture cible
//! ```
//!
//! Tout est séquentiel : chaque source est fusionnée contre l'état le plus
//! récent de la cible. Aucun état n'est conservé d'une exécution à l'autre.

use crate::availability::AvailabilityFilter;
use crate::dedup::{dedup, DedupOutcome};
use crate::error::{Result, SyncError};
use crate::merger::{merge_planned, MergeOutcome};
use crate::models::{content_ids, RunMode};
use crate::pager::fetch_all;
use crate::service::PlaylistService;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::{info, warn};

/// Playlists concernées par une exécution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Playlist cible, dédupliquée puis enrichie
    pub target: String,
    /// Playlists sources, fusionnées dans l'ordre
    pub sources: Vec<String>,
}

impl SyncPlan {
    pub fn new(target: impl Into<String>, sources: Vec<String>) -> Self {
        Self {
            target: target.into(),
            sources,
        }
    }

    /// Vérifie qu'une cible est définie
    pub fn validate(&self) -> Result<()> {
        if self.target.trim().is_empty() {
            return Err(SyncError::Configuration(
                "Target playlist ID not set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Compte rendu d'une exécution
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub target: String,
    pub mode: RunMode,
    /// Vidéos de la cible avant toute modification
    pub before: Vec<String>,
    pub dedup: DedupOutcome,
    pub merges: Vec<MergeOutcome>,
    /// Vidéos de la cible à la fin de l'exécution
    pub after: Vec<String>,
}

impl SyncReport {
    /// Nombre total de vidéos ajoutées, toutes sources confondues
    pub fn inserted_count(&self) -> usize {
        self.merges.iter().map(|m| m.inserted.len()).sum()
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mode == RunMode::DryRun {
            writeln!(f, "Dry run: no change was sent to playlist {}", self.target)?;
        }
        writeln!(f, "num vids in playlist before: {}", self.before.len())?;
        writeln!(f, "{:?}", self.before)?;
        writeln!(
            f,
            "duplicates removed: {} (unavailable duplicates left: {})",
            self.dedup.removed.len(),
            self.dedup.skipped_unavailable.len()
        )?;
        for merge in &self.merges {
            writeln!(
                f,
                "from {}: {} added, {} already present, {} unavailable",
                merge.source_id,
                merge.inserted.len(),
                merge.already_present.len(),
                merge.skipped_unavailable.len()
            )?;
        }
        writeln!(f, "num vids in playlist after: {}", self.after.len())?;
        write!(f, "{:?}", self.after)
    }
}

/// Moteur de convergence d'une playlist cible
///
/// # Exemple
///
/// ```rust,ignore
/// use pmosync::{MemoryPlaylistService, SyncPlan, Synchronizer};
///
/// let service = MemoryPlaylistService::new();
/// let sync = Synchronizer::new(&service);
/// let report = sync.run(&SyncPlan::new("PLtarget", vec!["PLsource".into()])).await?;
/// println!("{report}");
/// ```
pub struct Synchronizer<S> {
    service: S,
    filter: AvailabilityFilter,
    mode: RunMode,
}

impl<S: PlaylistService> Synchronizer<S> {
    /// Crée un moteur avec le filtre par défaut, en mode [`RunMode::Apply`]
    pub fn new(service: S) -> Self {
        Self {
            service,
            filter: AvailabilityFilter::default(),
            mode: RunMode::Apply,
        }
    }

    pub fn with_filter(mut self, filter: AvailabilityFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn filter(&self) -> &AvailabilityFilter {
        &self.filter
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    /// Exécute une synchronisation complète
    ///
    /// La première erreur interrompt l'exécution : les suppressions et
    /// insertions déjà envoyées restent acquises, sans retour arrière.
    pub async fn run(&self, plan: &SyncPlan) -> Result<SyncReport> {
        plan.validate()?;
        let target = plan.target.as_str();

        if plan.sources.is_empty() {
            warn!(
                "No source playlists! All that will happen is the target playlist will be made unique"
            );
        }

        let items = fetch_all(&self.service, target).await?;
        let before = content_ids(&items);
        info!("Playlist {} holds {} videos before sync", target, before.len());

        let dedup = dedup(&self.service, &self.filter, items, self.mode).await?;
        info!(
            "Playlist {}: {} duplicate(s) removed, {} unavailable duplicate(s) left",
            target,
            dedup.removed.len(),
            dedup.skipped_unavailable.len()
        );

        // Ajouts prévus mais non envoyés, invisibles à la relecture de la cible
        let mut planned = HashSet::new();
        let mut merges = Vec::with_capacity(plan.sources.len());
        for source in &plan.sources {
            let outcome = merge_planned(
                &self.service,
                &self.filter,
                source,
                target,
                self.mode,
                &planned,
            )
            .await?;
            if !self.mode.is_apply() {
                planned.extend(outcome.inserted.iter().cloned());
            }
            merges.push(outcome);
        }

        let after = content_ids(&fetch_all(&self.service, target).await?);
        info!("Playlist {} holds {} videos after sync", target, after.len());

        Ok(SyncReport {
            target: target.to_string(),
            mode: self.mode,
            before,
            dedup,
            merges,
            after,
        })
    }
}
