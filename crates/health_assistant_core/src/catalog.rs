//! crates/health_assistant_core/src/catalog.rs
//!
//! The static, versioned symptom table. Declaration order matters: follow-up
//! question blocks and several rule evaluations walk symptoms in this order.

use crate::domain::{BodyPart, Locale, Severity, SymptomCategory};
use crate::messages;

/// Bumped whenever an entry is added, removed or re-tagged.
pub const CATALOG_VERSION: u32 = 1;

/// An immutable catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symptom {
    pub id: &'static str,
    pub name_key: &'static str,
    pub category: SymptomCategory,
    pub severity: Severity,
    pub body_part: BodyPart,
}

impl Symptom {
    pub fn display_name(&self, locale: Locale) -> &'static str {
        messages::text(self.name_key, locale)
    }
}

const fn symptom(
    id: &'static str,
    name_key: &'static str,
    category: SymptomCategory,
    severity: Severity,
    body_part: BodyPart,
) -> Symptom {
    Symptom { id, name_key, category, severity, body_part }
}

static SYMPTOMS: &[Symptom] = &[
    // head
    symptom("headache", "symptom.headache", SymptomCategory::Neurological, Severity::Moderate, BodyPart::Head),
    symptom("dizziness", "symptom.dizziness", SymptomCategory::Neurological, Severity::Mild, BodyPart::Head),
    // chest
    symptom("chest-pain", "symptom.chest_pain", SymptomCategory::Cardiovascular, Severity::Severe, BodyPart::Chest),
    symptom(
        "breathing-difficulty",
        "symptom.breathing_difficulty",
        SymptomCategory::Respiratory,
        Severity::Severe,
        BodyPart::Chest,
    ),
    symptom("palpitations", "symptom.palpitations", SymptomCategory::Cardiovascular, Severity::Moderate, BodyPart::Chest),
    symptom("cough", "symptom.cough", SymptomCategory::Respiratory, Severity::Mild, BodyPart::Chest),
    // abdomen
    symptom("abdominal-pain", "symptom.abdominal_pain", SymptomCategory::Digestive, Severity::Moderate, BodyPart::Abdomen),
    symptom("nausea", "symptom.nausea", SymptomCategory::Digestive, Severity::Mild, BodyPart::Abdomen),
    symptom("vomiting", "symptom.vomiting", SymptomCategory::Digestive, Severity::Moderate, BodyPart::Abdomen),
    symptom("diarrhea", "symptom.diarrhea", SymptomCategory::Digestive, Severity::Moderate, BodyPart::Abdomen),
    // general
    symptom("fever", "symptom.fever", SymptomCategory::General, Severity::Moderate, BodyPart::General),
    symptom("fatigue", "symptom.fatigue", SymptomCategory::General, Severity::Mild, BodyPart::General),
    symptom("body-ache", "symptom.body_ache", SymptomCategory::General, Severity::Mild, BodyPart::General),
];

/// Read access to the symptom table.
pub struct SymptomCatalog;

impl SymptomCatalog {
    pub fn all() -> &'static [Symptom] {
        SYMPTOMS
    }

    pub fn get(id: &str) -> Option<&'static Symptom> {
        SYMPTOMS.iter().find(|s| s.id == id)
    }

    /// Position of a symptom in declaration order.
    pub fn position(id: &str) -> Option<usize> {
        SYMPTOMS.iter().position(|s| s.id == id)
    }

    pub fn by_body_part(part: BodyPart) -> impl Iterator<Item = &'static Symptom> {
        SYMPTOMS.iter().filter(move |s| s.body_part == part)
    }
}
