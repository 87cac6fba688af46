//! crates/health_assistant_core/src/routing.rs
//!
//! Maps the finalized symptoms onto medical specialties with an urgency tier, then
//! fills in doctors from the directory collaborator.

use crate::domain::{Locale, SelectedSymptom, Specialty, SpecialtyRecommendation, SymptomCategory, Urgency};
use crate::messages;
use crate::ports::DoctorDirectory;
use tracing::warn;

/// Any symptom at or above this intensity makes a neurology referral high urgency.
pub const NEUROLOGY_HIGH_INTENSITY: u8 = 8;

const CARDIOLOGY_TRIGGERS: &[&str] = &["chest-pain", "breathing-difficulty", "palpitations"];
const GASTROENTEROLOGY_TRIGGERS: &[&str] = &["abdominal-pain", "diarrhea", "vomiting", "nausea"];
const NEUROLOGY_TRIGGERS: &[&str] = &["headache", "dizziness"];

fn reason_key(specialty: Specialty) -> &'static str {
    match specialty {
        Specialty::Cardiology => "specialty.cardiology.reason",
        Specialty::Gastroenterology => "specialty.gastroenterology.reason",
        Specialty::Neurology => "specialty.neurology.reason",
        Specialty::GeneralMedicine => "specialty.general_medicine.reason",
    }
}

/// Evaluates the specialty guards in order. Several specialties may fire; doctors are
/// left empty for [`attach_doctors`].
pub fn recommend_specialties(symptoms: &[SelectedSymptom], locale: Locale) -> Vec<SpecialtyRecommendation> {
    let has = |id: &str| symptoms.iter().any(|s| s.id == id);
    let has_any = |ids: &[&str]| ids.iter().any(|id| has(*id));

    let mut fired: Vec<(Specialty, Urgency)> = Vec::new();

    if has_any(CARDIOLOGY_TRIGGERS) {
        let urgency = if has("chest-pain") { Urgency::High } else { Urgency::Medium };
        fired.push((Specialty::Cardiology, urgency));
    }

    if has_any(GASTROENTEROLOGY_TRIGGERS) {
        fired.push((Specialty::Gastroenterology, Urgency::Medium));
    }

    if has_any(NEUROLOGY_TRIGGERS) {
        let urgency = if symptoms.iter().any(|s| s.intensity >= NEUROLOGY_HIGH_INTENSITY) {
            Urgency::High
        } else {
            Urgency::Medium
        };
        fired.push((Specialty::Neurology, urgency));
    }

    if fired.is_empty() || symptoms.iter().any(|s| s.category == SymptomCategory::General) {
        fired.push((Specialty::GeneralMedicine, Urgency::Low));
    }

    fired
        .into_iter()
        .map(|(specialty, urgency)| SpecialtyRecommendation {
            specialty,
            reason: messages::text(reason_key(specialty), locale).to_string(),
            urgency,
            doctors: Vec::new(),
        })
        .collect()
}

/// Looks up doctors for each recommendation. A directory failure leaves that
/// recommendation without doctors rather than failing the assessment.
pub async fn attach_doctors(recommendations: &mut [SpecialtyRecommendation], directory: &dyn DoctorDirectory) {
    for rec in recommendations.iter_mut() {
        match directory.lookup_doctors(rec.specialty.directory_key()).await {
            Ok(doctors) => rec.doctors = doctors,
            Err(e) => {
                warn!(specialty = rec.specialty.directory_key(), error = %e, "Doctor lookup failed");
                rec.doctors.clear();
            }
        }
    }
}
