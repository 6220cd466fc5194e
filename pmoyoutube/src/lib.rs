//! # pmoyoutube - Client YouTube pour PMOTube
//!
//! Cette crate fournit un client Rust pour la partie `playlistItems` de l'API
//! YouTube Data v3, et l'implémentation du trait [`pmosync::PlaylistService`]
//! qui permet au moteur de synchronisation de travailler sur de vraies playlists.
//!
//! ## Architecture
//!
//! - `YoutubeClient` : client principal, authentifié à la création
//! - `api` : couche d'accès à l'API REST (OAuth2, `playlistItems`)
//! - `models` : ressources retournées par l'API
//! - `service` : implémentation de `PlaylistService`
//! - `config_ext` : credentials OAuth2 dans pmoconfig
//!
//! ## Utilisation
//!
//! ```rust,no_run
//! use pmosync::{SyncPlan, Synchronizer};
//! use pmoyoutube::YoutubeClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Utilise automatiquement la config depuis pmoconfig
//!     let client = YoutubeClient::from_config().await?;
//!
//!     let plan = SyncPlan::new("PLtarget", vec!["PLsource".to_string()]);
//!     let report = Synchronizer::new(&client).run(&plan).await?;
//!     println!("{report}");
//!     Ok(())
//! }
//! ```
//!
//! ## Gestion des erreurs
//!
//! Les refus de l'API pour une vidéo privée ou supprimée
//! (`playlistItemsNotAccessible`, `Precondition check failed`) sont isolés
//! dans [`YoutubeError::NotAccessible`] puis dans
//! [`pmosync::SyncError::NotAccessible`]. Aucune requête n'est rejouée.

pub mod api;
pub mod client;
pub mod config_ext;
pub mod error;
pub mod models;
pub mod service;

pub use api::auth::OAuthCredentials;
pub use client::YoutubeClient;
pub use config_ext::YoutubeConfigExt;
pub use error::{Result, YoutubeError};
pub use models::{PlaylistItemPage, PlaylistItemResource};
