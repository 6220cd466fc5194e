//! Extension de pmoconfig pour la synchronisation

use crate::availability::AvailabilityFilter;
use crate::error::{Result, SyncError};
use crate::models::RunMode;
use crate::sync::SyncPlan;
use pmoconfig::Config;

/// Trait d'extension pour pmoconfig::Config
///
/// # Exemple
///
/// ```rust,ignore
/// use pmoconfig::get_config;
/// use pmosync::SyncConfigExt;
///
/// let config = get_config();
/// let plan = config.sync_plan()?;
/// println!("Target: {}", plan.target);
/// ```
pub trait SyncConfigExt {
    /// Récupère l'identifiant de la playlist cible
    ///
    /// # Errors
    ///
    /// Retourne `SyncError::Configuration` si la cible n'est pas configurée
    fn get_sync_target(&self) -> Result<String>;

    /// Définit la playlist cible
    fn set_sync_target(&self, playlist_id: &str) -> Result<()>;

    /// Récupère les playlists sources, dans l'ordre de fusion
    fn get_sync_sources(&self) -> Result<Vec<String>>;

    /// Définit les playlists sources
    fn set_sync_sources(&self, playlist_ids: &[String]) -> Result<()>;

    /// Construit le filtre de disponibilité
    ///
    /// Les marqueurs configurés s'ajoutent aux marqueurs par défaut.
    fn availability_filter(&self) -> Result<AvailabilityFilter>;

    /// Mode d'exécution configuré
    fn run_mode(&self) -> Result<RunMode>;

    /// Construit le plan de synchronisation complet
    fn sync_plan(&self) -> Result<SyncPlan>;
}

impl SyncConfigExt for Config {
    fn get_sync_target(&self) -> Result<String> {
        self.get_string(&["sync", "target_playlist"])
            .ok_or_else(|| SyncError::Configuration("Target playlist ID not set".to_string()))
    }

    fn set_sync_target(&self, playlist_id: &str) -> Result<()> {
        Ok(self.set_string(&["sync", "target_playlist"], playlist_id)?)
    }

    fn get_sync_sources(&self) -> Result<Vec<String>> {
        Ok(self.get_sync_source_playlists()?)
    }

    fn set_sync_sources(&self, playlist_ids: &[String]) -> Result<()> {
        Ok(self.set_sync_source_playlists(playlist_ids)?)
    }

    fn availability_filter(&self) -> Result<AvailabilityFilter> {
        let mut filter = AvailabilityFilter::default();
        for marker in self.get_sync_unavailable_markers()? {
            filter.add_marker(marker);
        }
        Ok(filter)
    }

    fn run_mode(&self) -> Result<RunMode> {
        Ok(RunMode::from_dry_run(self.get_sync_dry_run()?))
    }

    fn sync_plan(&self) -> Result<SyncPlan> {
        Ok(SyncPlan::new(self.get_sync_target()?, self.get_sync_sources()?))
    }
}
