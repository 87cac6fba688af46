//! crates/health_assistant_core/src/selection.rs
//!
//! The user's symptom picks for one assessment session.

use crate::catalog::SymptomCatalog;
use crate::domain::{Locale, SelectedSymptom, SymptomDuration};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("unknown symptom '{0}'")]
    UnknownSymptom(String),
    #[error("intensity {0} is outside 1..=10")]
    IntensityOutOfRange(u8),
}

/// Ordered, append-only list of confirmed symptoms. Re-selecting a symptom
/// drops its earlier entry and appends the new one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymptomSelection {
    entries: Vec<SelectedSymptom>,
}

impl SymptomSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(
        &mut self,
        symptom_id: &str,
        duration: SymptomDuration,
        intensity: u8,
        notes: Option<String>,
        locale: Locale,
    ) -> Result<&SelectedSymptom, SelectionError> {
        let symptom = SymptomCatalog::get(symptom_id)
            .ok_or_else(|| SelectionError::UnknownSymptom(symptom_id.to_string()))?;
        if !(1..=10).contains(&intensity) {
            return Err(SelectionError::IntensityOutOfRange(intensity));
        }

        self.entries.retain(|e| e.id != symptom.id);
        self.entries.push(SelectedSymptom {
            id: symptom.id.to_string(),
            display_name: symptom.display_name(locale).to_string(),
            category: symptom.category,
            severity_tag: symptom.severity,
            body_part: symptom.body_part,
            duration,
            intensity,
            notes: notes.filter(|n| !n.trim().is_empty()),
        });

        Ok(&self.entries[self.entries.len() - 1])
    }

    pub fn remove(&mut self, symptom_id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != symptom_id);
        self.entries.len() != before
    }

    pub fn symptoms(&self) -> &[SelectedSymptom] {
        &self.entries
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_symptoms(self) -> Vec<SelectedSymptom> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reselecting_replaces_and_moves_to_end() {
        let mut selection = SymptomSelection::new();
        selection.select("headache", SymptomDuration::LessThanDay, 4, None, Locale::En).unwrap();
        selection.select("fever", SymptomDuration::OneToThreeDays, 5, None, Locale::En).unwrap();
        selection
            .select("headache", SymptomDuration::OneToThreeDays, 8, Some("worse at night".into()), Locale::En)
            .unwrap();

        let ids: Vec<_> = selection.ids().collect();
        assert_eq!(ids, vec!["fever", "headache"]);
        assert_eq!(selection.symptoms()[1].intensity, 8);
        assert_eq!(selection.symptoms()[1].notes.as_deref(), Some("worse at night"));
    }

    #[test]
    fn rejects_unknown_symptom_and_bad_intensity() {
        let mut selection = SymptomSelection::new();
        assert_eq!(
            selection.select("toothache", SymptomDuration::LessThanDay, 3, None, Locale::En),
            Err(SelectionError::UnknownSymptom("toothache".into()))
        );
        assert_eq!(
            selection.select("cough", SymptomDuration::LessThanDay, 11, None, Locale::En),
            Err(SelectionError::IntensityOutOfRange(11))
        );
        assert!(selection.is_empty());
    }

    #[test]
    fn blank_notes_are_dropped() {
        let mut selection = SymptomSelection::new();
        let entry = selection
            .select("cough", SymptomDuration::LessThanDay, 2, Some("  ".into()), Locale::Bn)
            .unwrap();
        assert!(entry.notes.is_none());
        assert_eq!(entry.display_name, "কাশি");
        assert!(selection.remove("cough"));
        assert!(!selection.remove("cough"));
    }
}
