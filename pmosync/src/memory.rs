//! Service de playlists en mémoire
//!
//! Implémentation de [`PlaylistService`] sans réseau, utilisée par les tests
//! du moteur et pour rejouer une synchronisation hors ligne. Il se comporte
//! comme le service distant sur les points qui comptent pour le moteur :
//!
//! - pagination par curseur opaque, en respectant `page_size`
//! - refus (`NotAccessible`) de supprimer ou d'insérer une vidéo dont le titre
//!   est un marqueur d'indisponibilité
//! - insertion en fin de playlist
//!
//! Chaque tentative de modification est journalisée, y compris celles refusées.

use crate::availability::DEFAULT_UNAVAILABLE_MARKERS;
use crate::error::{Operation, Result, SyncError};
use crate::models::{Page, PlaylistItem};
use crate::service::PlaylistService;
use std::collections::HashMap;
use std::sync::Mutex;

/// Modification demandée au service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryCall {
    /// Suppression d'une appartenance (entry_id)
    Delete(String),
    /// Insertion d'une vidéo (collection_id, content_id)
    Insert(String, String),
}

#[derive(Debug, Default)]
struct State {
    collections: HashMap<String, Vec<PlaylistItem>>,
    next_entry: u64,
    calls: Vec<MemoryCall>,
    list_calls: HashMap<String, usize>,
    list_failures: HashMap<String, usize>,
    rejected_labels: Vec<String>,
}

impl State {
    fn new_entry_id(&mut self) -> String {
        self.next_entry += 1;
        format!("entry-{}", self.next_entry)
    }

    fn is_rejected(&self, label: Option<&str>) -> bool {
        label.is_some_and(|label| self.rejected_labels.iter().any(|l| l == label))
    }
}

/// Service de playlists en mémoire
#[derive(Debug)]
pub struct MemoryPlaylistService {
    state: Mutex<State>,
}

impl Default for MemoryPlaylistService {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPlaylistService {
    /// Crée un service vide qui refuse les vidéos privées ou supprimées
    pub fn new() -> Self {
        let state = State {
            rejected_labels: DEFAULT_UNAVAILABLE_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            ..Default::default()
        };
        Self {
            state: Mutex::new(state),
        }
    }

    /// Crée (ou remplace) une playlist
    ///
    /// Chaque membre est un couple `(content_id, titre)`. Retourne les
    /// `entry_id` générés, dans l'ordre.
    pub fn add_collection(
        &self,
        collection_id: &str,
        members: &[(&str, Option<&str>)],
    ) -> Vec<String> {
        let mut state = self.state.lock().unwrap();
        let items: Vec<PlaylistItem> = members
            .iter()
            .map(|(content_id, label)| {
                PlaylistItem::new(
                    state.new_entry_id(),
                    *content_id,
                    label.map(str::to_string),
                )
            })
            .collect();
        let entry_ids = items.iter().map(|item| item.entry_id.clone()).collect();
        state.collections.insert(collection_id.to_string(), items);
        entry_ids
    }

    /// Ajoute un titre que le service refusera de modifier
    pub fn reject_label(&self, label: &str) {
        let mut state = self.state.lock().unwrap();
        if !state.rejected_labels.iter().any(|l| l == label) {
            state.rejected_labels.push(label.to_string());
        }
    }

    /// Fait échouer la lecture d'une playlist après `successful` pages servies
    pub fn fail_list_after(&self, collection_id: &str, successful: usize) {
        self.state
            .lock()
            .unwrap()
            .list_failures
            .insert(collection_id.to_string(), successful);
    }

    /// Contenu actuel d'une playlist
    pub fn items(&self, collection_id: &str) -> Vec<PlaylistItem> {
        self.state
            .lock()
            .unwrap()
            .collections
            .get(collection_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Identifiants de contenu d'une playlist, dans l'ordre
    pub fn content_ids(&self, collection_id: &str) -> Vec<String> {
        self.items(collection_id)
            .into_iter()
            .map(|item| item.content_id)
            .collect()
    }

    /// Journal des modifications demandées, dans l'ordre
    pub fn calls(&self) -> Vec<MemoryCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Nombre de pages demandées pour une playlist (échecs compris)
    pub fn list_calls(&self, collection_id: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .list_calls
            .get(collection_id)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl PlaylistService for MemoryPlaylistService {
    async fn list_members(
        &self,
        collection_id: &str,
        page_token: Option<&str>,
        page_size: u32,
    ) -> Result<Page> {
        let mut state = self.state.lock().unwrap();

        let calls = state
            .list_calls
            .entry(collection_id.to_string())
            .or_insert(0);
        *calls += 1;
        let calls = *calls;

        if let Some(successful) = state.list_failures.get(collection_id) {
            if calls > *successful {
                return Err(SyncError::Remote(format!(
                    "listing {collection_id} failed"
                )));
            }
        }

        let items = state
            .collections
            .get(collection_id)
            .ok_or_else(|| SyncError::Remote(format!("playlist {collection_id} not found")))?;

        let offset = match page_token {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| SyncError::Remote(format!("invalid page token {token}")))?,
            None => 0,
        };
        let end = items.len().min(offset + page_size as usize);
        let page_items = items.get(offset..end).map(<[_]>::to_vec).unwrap_or_default();

        Ok(Page {
            items: page_items,
            next_page_token: (end < items.len()).then(|| end.to_string()),
        })
    }

    async fn delete_member(&self, entry_id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(MemoryCall::Delete(entry_id.to_string()));

        let location = state.collections.iter().find_map(|(collection_id, items)| {
            items
                .iter()
                .position(|item| item.entry_id == entry_id)
                .map(|index| (collection_id.clone(), index))
        });

        let (collection_id, index) = location
            .ok_or_else(|| SyncError::Remote(format!("playlist item {entry_id} not found")))?;

        let label = state.collections[&collection_id][index]
            .visibility_label
            .clone();
        if state.is_rejected(label.as_deref()) {
            return Err(SyncError::not_accessible(
                Operation::Delete,
                entry_id,
                "playlistItemsNotAccessible",
            ));
        }

        if let Some(items) = state.collections.get_mut(&collection_id) {
            items.remove(index);
        }
        Ok(())
    }

    async fn insert_member(&self, collection_id: &str, content_id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(MemoryCall::Insert(
            collection_id.to_string(),
            content_id.to_string(),
        ));

        if !state.collections.contains_key(collection_id) {
            return Err(SyncError::Remote(format!(
                "playlist {collection_id} not found"
            )));
        }

        let unavailable = state
            .collections
            .values()
            .flatten()
            .any(|item| item.content_id == content_id && state.is_rejected(item.label()));
        if unavailable {
            return Err(SyncError::not_accessible(
                Operation::Insert,
                content_id,
                "videoNotFound",
            ));
        }

        let entry_id = state.new_entry_id();
        if let Some(items) = state.collections.get_mut(collection_id) {
            items.push(PlaylistItem::new(entry_id, content_id, None));
        }
        Ok(())
    }
}
