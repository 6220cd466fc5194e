//! Filtre de disponibilité des vidéos
//!
//! Le service distant refuse de supprimer ou d'insérer une appartenance dont
//! la vidéo n'est plus accessible. Il ne l'annonce pas explicitement : la seule
//! trace est le titre de remplacement qu'il affiche à la place du vrai titre.
//! La liste des titres connus est incomplète, elle est donc extensible.

use crate::models::PlaylistItem;

/// Titres affichés par le service pour une vidéo privée ou supprimée
pub const DEFAULT_UNAVAILABLE_MARKERS: [&str; 2] = ["Private video", "Deleted video"];

/// Classe une appartenance en éligible ou non aux opérations de modification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityFilter {
    markers: Vec<String>,
}

impl Default for AvailabilityFilter {
    fn default() -> Self {
        Self::with_markers(DEFAULT_UNAVAILABLE_MARKERS)
    }
}

impl AvailabilityFilter {
    /// Crée un filtre à partir d'une liste explicite de titres marqueurs
    pub fn with_markers<I, M>(markers: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        let mut filter = Self {
            markers: Vec::new(),
        };
        for marker in markers {
            filter.add_marker(marker);
        }
        filter
    }

    /// Ajoute un titre marqueur (ignoré s'il est déjà connu)
    pub fn add_marker(&mut self, marker: impl Into<String>) {
        let marker = marker.into();
        if !self.markers.contains(&marker) {
            self.markers.push(marker);
        }
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Une vidéo sans titre est considérée comme disponible
    pub fn is_eligible(&self, label: Option<&str>) -> bool {
        match label {
            Some(label) => !self.markers.iter().any(|marker| marker == label),
            None => true,
        }
    }

    pub fn is_item_eligible(&self, item: &PlaylistItem) -> bool {
        self.is_eligible(item.label())
    }
}
