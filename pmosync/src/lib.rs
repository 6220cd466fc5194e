//! # pmosync - Moteur de convergence de playlists
//!
//! Cette crate synchronise une playlist *cible* avec zéro ou plusieurs
//! playlists *sources* sur un service distant, puis garantit qu'aucune vidéo
//! disponible n'y figure deux fois.
//!
//! ## Architecture
//!
//! - [`pager`] : énumération complète d'une playlist par pagination à curseur
//! - [`availability`] : filtre des vidéos que le service refusera de modifier
//! - [`dedup`] : suppression des doublons, première occurrence conservée
//! - [`merger`] : ajout à la cible des vidéos des sources qui y manquent
//! - [`sync`] : enchaînement d'une exécution complète et compte rendu
//! - [`service`] : trait [`PlaylistService`] implémenté par les clients distants
//! - [`memory`] : service en mémoire pour les tests et les répétitions hors ligne
//!
//! ## Utilisation
//!
//! ```rust,no_run
//! use pmosync::{MemoryPlaylistService, SyncPlan, Synchronizer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let service = MemoryPlaylistService::new();
//!     service.add_collection("target", &[("A", None), ("A", None)]);
//!     service.add_collection("source", &[("B", None)]);
//!
//!     let report = Synchronizer::new(&service)
//!         .run(&SyncPlan::new("target", vec!["source".to_string()]))
//!         .await?;
//!     println!("{report}");
//!     Ok(())
//! }
//! ```
//!
//! ## Ordre des opérations
//!
//! Toutes les opérations distantes sont attendues avant l'étape suivante. La
//! déduplication est un pli séquentiel sur l'ordre de la playlist et chaque
//! source est fusionnée contre la dernière version de la cible. Deux
//! exécutions simultanées sur la même cible ne sont pas supportées.

pub mod availability;
pub mod config_ext;
pub mod dedup;
pub mod error;
pub mod memory;
pub mod merger;
pub mod models;
pub mod pager;
pub mod service;
pub mod sync;

pub use availability::{AvailabilityFilter, DEFAULT_UNAVAILABLE_MARKERS};
pub use config_ext::SyncConfigExt;
pub use dedup::{dedup, deduplicate_collection, DedupOutcome};
pub use error::{Operation, Result, SyncError};
pub use memory::{MemoryCall, MemoryPlaylistService};
pub use merger::{merge, merge_planned, MergeOutcome};
pub use models::{content_ids, Page, PlaylistItem, RunMode};
pub use pager::{fetch_all, PAGE_SIZE};
pub use service::PlaylistService;
pub use sync::{SyncPlan, SyncReport, Synchronizer};
