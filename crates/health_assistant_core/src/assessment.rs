//! crates/health_assistant_core/src/assessment.rs
//!
//! Combines the heuristic tables and the specialty router into one report, and
//! checks the static tables for dangling references.

use crate::catalog::SymptomCatalog;
use crate::domain::{AssessmentRecord, AssessmentReport, Locale, SelectedSymptom};
use crate::heuristics::{self, BASELINE_TEST, DIAGNOSIS_RULES, GENERAL_LIFESTYLE, LIFESTYLE_RULES, TEST_RULES};
use crate::medication;
use crate::messages;
use crate::ports::DoctorDirectory;
use crate::questions::{self, QuestionnaireResponses, SYMPTOM_BLOCKS};
use crate::routing;
use chrono::Utc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("Rule table '{table}' references unknown symptom '{symptom}'")]
    UnknownSymptom { table: &'static str, symptom: &'static str },
    #[error("Rule table '{table}' references missing message '{message}'")]
    MissingMessage { table: &'static str, message: &'static str },
}

/// Builds the report for a finalized symptom list. Doctors are not filled in here.
pub fn assess(symptoms: &[SelectedSymptom], locale: Locale) -> AssessmentReport {
    AssessmentReport {
        diagnoses: heuristics::diagnose(symptoms, locale),
        tests: heuristics::recommend_tests(symptoms, locale),
        lifestyle: heuristics::lifestyle_advice(symptoms, locale),
        specialties: routing::recommend_specialties(symptoms, locale),
        disclaimer: messages::text("assessment.disclaimer", locale).to_string(),
    }
}

/// Runs [`assess`], fills doctors from the directory and wraps the result as a
/// history record for `user_id`.
pub async fn assess_with_doctors(
    user_id: Uuid,
    symptoms: Vec<SelectedSymptom>,
    responses: &QuestionnaireResponses,
    locale: Locale,
    directory: &dyn DoctorDirectory,
) -> AssessmentRecord {
    let mut report = assess(&symptoms, locale);
    routing::attach_doctors(&mut report.specialties, directory).await;
    info!(
        %user_id,
        symptoms = symptoms.len(),
        diagnoses = report.diagnoses.len(),
        specialties = report.specialties.len(),
        "Assessment completed"
    );

    AssessmentRecord {
        id: Uuid::new_v4(),
        user_id,
        recorded_at: Utc::now(),
        symptoms,
        responses: responses.responses(),
        report,
    }
}

/// Verifies every symptom id and message id the static tables refer to. Returns
/// every problem found, not just the first.
pub fn validate_tables() -> Result<(), Vec<TableError>> {
    let mut errors = Vec::new();

    let symptom = |table: &'static str, id: &'static str, errors: &mut Vec<TableError>| {
        if SymptomCatalog::get(id).is_none() {
            errors.push(TableError::UnknownSymptom { table, symptom: id });
        }
    };
    let message = |table: &'static str, id: &'static str, errors: &mut Vec<TableError>| {
        if !messages::contains(id) {
            errors.push(TableError::MissingMessage { table, message: id });
        }
    };

    for s in SymptomCatalog::all() {
        message("catalog", s.name_key, &mut errors);
    }

    for rule in DIAGNOSIS_RULES {
        for &id in rule.triggers {
            symptom("diagnosis", id, &mut errors);
        }
        for c in rule.candidates {
            message("diagnosis", c.condition_key, &mut errors);
            message("diagnosis", c.description_key, &mut errors);
        }
    }

    for rule in TEST_RULES {
        symptom("tests", rule.symptom, &mut errors);
    }
    for rule in TEST_RULES.iter().chain(std::iter::once(&BASELINE_TEST)) {
        message("tests", rule.name_key, &mut errors);
        message("tests", rule.reason_key, &mut errors);
        message("tests", rule.cost_key, &mut errors);
    }

    for rule in LIFESTYLE_RULES {
        for &id in rule.symptoms {
            symptom("lifestyle", id, &mut errors);
        }
    }
    for rule in LIFESTYLE_RULES.iter().chain(std::iter::once(&GENERAL_LIFESTYLE)) {
        message("lifestyle", rule.category_key, &mut errors);
        for &key in rule.suggestion_keys {
            message("lifestyle", key, &mut errors);
        }
    }

    for &(id, _) in SYMPTOM_BLOCKS {
        symptom("questions", id, &mut errors);
    }
    for template in questions::all_templates() {
        message("questions", template.text_key, &mut errors);
        for &option in template.options {
            message("questions", option, &mut errors);
        }
    }

    for &(_, key) in medication::INSTRUCTION_PATTERNS.iter() {
        message("medication", key, &mut errors);
    }

    for key in [
        "specialty.cardiology.reason",
        "specialty.gastroenterology.reason",
        "specialty.neurology.reason",
        "specialty.general_medicine.reason",
        "assessment.disclaimer",
        "chat.fallback",
        "chat.advisory_label",
        "chat.consensus_label",
        "chat.opinion_label",
        "chat.consult_professional",
        "provider.system_prompt",
    ] {
        message("fixed", key, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Specialty, SymptomDuration, TestUrgency};
    use crate::selection::SymptomSelection;

    #[test]
    fn shipped_tables_are_consistent() {
        assert_eq!(validate_tables(), Ok(()));
    }

    #[test]
    fn report_carries_every_section() {
        let mut selection = SymptomSelection::new();
        selection
            .select("fever", SymptomDuration::OneToThreeDays, 5, None, Locale::Bn)
            .unwrap();
        let report = assess(selection.symptoms(), Locale::Bn);

        assert!(!report.diagnoses.is_empty());
        assert_eq!(report.tests.last().unwrap().urgency, TestUrgency::Routine);
        assert!(!report.lifestyle.is_empty());
        assert_eq!(report.specialties[0].specialty, Specialty::GeneralMedicine);
        assert_eq!(report.disclaimer, messages::text("assessment.disclaimer", Locale::Bn));
    }

    #[test]
    fn test_costs_are_localized() {
        let report = assess(&[], Locale::Bn);
        assert_eq!(report.tests[0].cost_range, messages::text("test.cbc.cost", Locale::Bn));
        assert_ne!(report.tests[0].cost_range, assess(&[], Locale::En).tests[0].cost_range);
    }

    #[test]
    fn empty_selection_still_produces_a_report() {
        let report = assess(&[], Locale::En);
        assert!(report.diagnoses.is_empty());
        assert_eq!(report.tests.len(), 1);
        assert_eq!(report.lifestyle.len(), 1);
        assert_eq!(report.specialties.len(), 1);
    }
}
