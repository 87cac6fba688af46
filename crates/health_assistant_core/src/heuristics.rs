//! crates/health_assistant_core/src/heuristics.rs
//!
//! Deterministic rule tables that turn a finalized symptom list into ranked
//! differential diagnoses, recommended tests and lifestyle advice.
//!
//! Question responses are not inputs here; every rule keys on symptom ids and the
//! reported intensity only.

use crate::domain::{
    Diagnosis, LifestyleRecommendation, Locale, RecommendedTest, SelectedSymptom, Severity, TestUrgency,
};
use crate::messages;
use std::collections::{HashMap, HashSet};

/// Reported intensity at which diagnoses and tests escalate.
pub const ESCALATION_INTENSITY: u8 = 7;
/// Probability points added by one escalation step.
pub const ESCALATION_STEP: u8 = 15;
pub const PROBABILITY_CAP: u8 = 95;
pub const MAX_DIAGNOSES: usize = 5;

//=========================================================================================
// Rule Tables
//=========================================================================================

pub(crate) struct Candidate {
    pub condition_key: &'static str,
    pub description_key: &'static str,
    pub probability: u8,
    pub severity: Severity,
}

/// Fires when every symptom in `triggers` is present.
pub(crate) struct DiagnosisRule {
    pub triggers: &'static [&'static str],
    pub candidates: &'static [Candidate],
}

const fn dx(condition_key: &'static str, description_key: &'static str, probability: u8, severity: Severity) -> Candidate {
    Candidate { condition_key, description_key, probability, severity }
}

pub(crate) const DIAGNOSIS_RULES: &[DiagnosisRule] = &[
    DiagnosisRule {
        triggers: &["chest-pain", "breathing-difficulty"],
        candidates: &[dx("dx.acute_coronary_syndrome", "dx.acute_coronary_syndrome.desc", 65, Severity::Severe)],
    },
    DiagnosisRule {
        triggers: &["chest-pain"],
        candidates: &[
            dx("dx.angina", "dx.angina.desc", 50, Severity::Moderate),
            dx("dx.costochondritis", "dx.costochondritis.desc", 30, Severity::Mild),
        ],
    },
    DiagnosisRule {
        triggers: &["headache"],
        candidates: &[
            dx("dx.migraine", "dx.migraine.desc", 60, Severity::Moderate),
            dx("dx.tension_headache", "dx.tension_headache.desc", 50, Severity::Mild),
        ],
    },
    DiagnosisRule {
        triggers: &["dizziness"],
        candidates: &[dx("dx.vertigo", "dx.vertigo.desc", 40, Severity::Mild)],
    },
    DiagnosisRule {
        triggers: &["breathing-difficulty"],
        candidates: &[dx("dx.asthma", "dx.asthma.desc", 45, Severity::Moderate)],
    },
    DiagnosisRule {
        triggers: &["palpitations"],
        candidates: &[
            dx("dx.arrhythmia", "dx.arrhythmia.desc", 45, Severity::Moderate),
            dx("dx.anxiety", "dx.anxiety.desc", 35, Severity::Mild),
        ],
    },
    DiagnosisRule {
        triggers: &["fever", "cough"],
        candidates: &[dx("dx.respiratory_infection", "dx.respiratory_infection.desc", 60, Severity::Moderate)],
    },
    DiagnosisRule {
        triggers: &["cough"],
        candidates: &[dx("dx.bronchitis", "dx.bronchitis.desc", 40, Severity::Mild)],
    },
    DiagnosisRule {
        triggers: &["nausea", "vomiting"],
        candidates: &[dx("dx.gastroenteritis", "dx.gastroenteritis.desc", 60, Severity::Moderate)],
    },
    DiagnosisRule {
        triggers: &["abdominal-pain"],
        candidates: &[
            dx("dx.gastritis", "dx.gastritis.desc", 55, Severity::Mild),
            dx("dx.appendicitis", "dx.appendicitis.desc", 25, Severity::Severe),
        ],
    },
    DiagnosisRule {
        triggers: &["diarrhea"],
        candidates: &[dx("dx.gastroenteritis", "dx.gastroenteritis.desc", 50, Severity::Moderate)],
    },
    DiagnosisRule {
        triggers: &["fever", "body-ache"],
        candidates: &[dx("dx.dengue", "dx.dengue.desc", 45, Severity::Moderate)],
    },
    DiagnosisRule {
        triggers: &["fever"],
        candidates: &[dx("dx.viral_fever", "dx.viral_fever.desc", 60, Severity::Mild)],
    },
    DiagnosisRule {
        triggers: &["fatigue"],
        candidates: &[dx("dx.anemia", "dx.anemia.desc", 35, Severity::Mild)],
    },
];

pub(crate) struct TestRule {
    pub symptom: &'static str,
    pub name_key: &'static str,
    pub reason_key: &'static str,
    /// Whether an intense symptom makes this test `Immediate`.
    pub escalates: bool,
    pub cost_key: &'static str,
}

pub(crate) const TEST_RULES: &[TestRule] = &[
    TestRule { symptom: "chest-pain", name_key: "test.ecg", reason_key: "test.ecg.reason", escalates: true, cost_key: "test.ecg.cost" },
    TestRule { symptom: "headache", name_key: "test.ct_brain", reason_key: "test.ct_brain.reason", escalates: true, cost_key: "test.ct_brain.cost" },
    TestRule { symptom: "palpitations", name_key: "test.holter", reason_key: "test.holter.reason", escalates: false, cost_key: "test.holter.cost" },
    TestRule { symptom: "breathing-difficulty", name_key: "test.chest_xray", reason_key: "test.chest_xray.reason", escalates: false, cost_key: "test.chest_xray.cost" },
    TestRule { symptom: "cough", name_key: "test.chest_xray", reason_key: "test.chest_xray.reason", escalates: false, cost_key: "test.chest_xray.cost" },
    TestRule { symptom: "abdominal-pain", name_key: "test.abdominal_ultrasound", reason_key: "test.abdominal_ultrasound.reason", escalates: false, cost_key: "test.abdominal_ultrasound.cost" },
    TestRule { symptom: "diarrhea", name_key: "test.stool", reason_key: "test.stool.reason", escalates: false, cost_key: "test.stool.cost" },
    TestRule { symptom: "fever", name_key: "test.dengue_ns1", reason_key: "test.dengue_ns1.reason", escalates: false, cost_key: "test.dengue_ns1.cost" },
];

/// Recommended regardless of which symptoms are present.
pub(crate) const BASELINE_TEST: TestRule = TestRule {
    symptom: "",
    name_key: "test.cbc",
    reason_key: "test.cbc.reason",
    escalates: false,
    cost_key: "test.cbc.cost",
};

pub(crate) struct LifestyleRule {
    pub symptoms: &'static [&'static str],
    pub category_key: &'static str,
    pub suggestion_keys: &'static [&'static str],
}

pub(crate) const LIFESTYLE_RULES: &[LifestyleRule] = &[
    LifestyleRule {
        symptoms: &["headache", "dizziness"],
        category_key: "life.sleep_stress",
        suggestion_keys: &["life.sleep_stress.1", "life.sleep_stress.2", "life.sleep_stress.3"],
    },
    LifestyleRule {
        symptoms: &["chest-pain", "palpitations"],
        category_key: "life.heart",
        suggestion_keys: &["life.heart.1", "life.heart.2", "life.heart.3"],
    },
    LifestyleRule {
        symptoms: &["breathing-difficulty", "cough"],
        category_key: "life.breathing",
        suggestion_keys: &["life.breathing.1", "life.breathing.2", "life.breathing.3"],
    },
    LifestyleRule {
        symptoms: &["abdominal-pain", "nausea", "vomiting", "diarrhea"],
        category_key: "life.diet",
        suggestion_keys: &["life.diet.1", "life.diet.2", "life.diet.3"],
    },
    LifestyleRule {
        symptoms: &["fever", "body-ache", "fatigue"],
        category_key: "life.rest_hydration",
        suggestion_keys: &["life.rest_hydration.1", "life.rest_hydration.2", "life.rest_hydration.3"],
    },
];

/// Used when no other lifestyle rule fires.
pub(crate) const GENERAL_LIFESTYLE: LifestyleRule = LifestyleRule {
    symptoms: &[],
    category_key: "life.general",
    suggestion_keys: &["life.general.1", "life.general.2", "life.general.3"],
};

//=========================================================================================
// Evaluation
//=========================================================================================

fn intensities(symptoms: &[SelectedSymptom]) -> HashMap<&str, u8> {
    symptoms.iter().map(|s| (s.id.as_str(), s.intensity)).collect()
}

/// Ranked differential: deduplicated by condition (highest probability kept), sorted
/// by descending probability with rule-table order breaking ties, at most five entries.
pub fn diagnose(symptoms: &[SelectedSymptom], locale: Locale) -> Vec<Diagnosis> {
    let present = intensities(symptoms);
    let mut ranked: Vec<(&'static str, Diagnosis)> = Vec::new();

    for rule in DIAGNOSIS_RULES {
        let Some(peak) = rule
            .triggers
            .iter()
            .map(|id| present.get(id).copied())
            .collect::<Option<Vec<u8>>>()
            .and_then(|levels| levels.into_iter().max())
        else {
            continue;
        };
        let escalate = peak >= ESCALATION_INTENSITY;

        for candidate in rule.candidates {
            let (probability, severity) = if escalate {
                (
                    candidate.probability.saturating_add(ESCALATION_STEP).min(PROBABILITY_CAP),
                    candidate.severity.escalate(),
                )
            } else {
                (candidate.probability.min(PROBABILITY_CAP), candidate.severity)
            };

            match ranked.iter_mut().find(|(key, _)| *key == candidate.condition_key) {
                Some((_, existing)) if existing.probability >= probability => {}
                Some((_, existing)) => {
                    existing.probability = probability;
                    existing.severity = severity;
                }
                None => ranked.push((
                    candidate.condition_key,
                    Diagnosis {
                        condition: messages::text(candidate.condition_key, locale).to_string(),
                        probability,
                        severity,
                        description: messages::text(candidate.description_key, locale).to_string(),
                    },
                )),
            }
        }
    }

    let mut diagnoses: Vec<Diagnosis> = ranked.into_iter().map(|(_, d)| d).collect();
    diagnoses.sort_by(|a, b| b.probability.cmp(&a.probability));
    diagnoses.truncate(MAX_DIAGNOSES);
    diagnoses
}

/// Tests per present symptom in rule order, deduplicated by test, followed by the
/// routine baseline.
pub fn recommend_tests(symptoms: &[SelectedSymptom], locale: Locale) -> Vec<RecommendedTest> {
    let present = intensities(symptoms);
    let mut tests: Vec<(&'static str, RecommendedTest)> = Vec::new();

    for rule in TEST_RULES {
        let Some(&intensity) = present.get(rule.symptom) else {
            continue;
        };
        let urgency = if rule.escalates && intensity >= ESCALATION_INTENSITY {
            TestUrgency::Immediate
        } else {
            TestUrgency::WithinWeek
        };

        match tests.iter_mut().find(|(key, _)| *key == rule.name_key) {
            Some((_, existing)) => {
                if urgency == TestUrgency::Immediate {
                    existing.urgency = urgency;
                }
            }
            None => tests.push((rule.name_key, build_test(rule, urgency, locale))),
        }
    }

    tests.push((BASELINE_TEST.name_key, build_test(&BASELINE_TEST, TestUrgency::Routine, locale)));
    tests.into_iter().map(|(_, t)| t).collect()
}

fn build_test(rule: &TestRule, urgency: TestUrgency, locale: Locale) -> RecommendedTest {
    RecommendedTest {
        name: messages::text(rule.name_key, locale).to_string(),
        reason: messages::text(rule.reason_key, locale).to_string(),
        urgency,
        cost_range: messages::text(rule.cost_key, locale).to_string(),
    }
}

/// One fixed suggestion list per category whose symptoms are present, in rule order.
pub fn lifestyle_advice(symptoms: &[SelectedSymptom], locale: Locale) -> Vec<LifestyleRecommendation> {
    let present: HashSet<&str> = symptoms.iter().map(|s| s.id.as_str()).collect();

    let mut advice: Vec<LifestyleRecommendation> = LIFESTYLE_RULES
        .iter()
        .filter(|rule| rule.symptoms.iter().any(|id| present.contains(id)))
        .map(|rule| localize_lifestyle(rule, locale))
        .collect();

    if advice.is_empty() {
        advice.push(localize_lifestyle(&GENERAL_LIFESTYLE, locale));
    }
    advice
}

fn localize_lifestyle(rule: &LifestyleRule, locale: Locale) -> LifestyleRecommendation {
    LifestyleRecommendation {
        category: messages::text(rule.category_key, locale).to_string(),
        suggestions: rule
            .suggestion_keys
            .iter()
            .map(|&key| messages::text(key, locale).to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SymptomDuration;
    use crate::selection::SymptomSelection;

    fn picks(entries: &[(&str, u8)]) -> Vec<SelectedSymptom> {
        let mut selection = SymptomSelection::new();
        for (id, intensity) in entries {
            selection
                .select(id, SymptomDuration::OneToThreeDays, *intensity, None, Locale::En)
                .unwrap();
        }
        selection.into_symptoms()
    }

    fn conditions(diagnoses: &[Diagnosis]) -> Vec<&str> {
        diagnoses.iter().map(|d| d.condition.as_str()).collect()
    }

    #[test]
    fn headache_yields_migraine_and_tension_headache() {
        let diagnoses = diagnose(&picks(&[("headache", 4)]), Locale::En);
        assert_eq!(conditions(&diagnoses), vec!["Migraine", "Tension Headache"]);
        assert_eq!(diagnoses[0].probability, 60);
        assert_eq!(diagnoses[0].severity, Severity::Moderate);
    }

    #[test]
    fn high_intensity_escalates_probability_and_severity() {
        let diagnoses = diagnose(&picks(&[("headache", 8)]), Locale::En);
        assert_eq!(diagnoses[0].probability, 75);
        assert_eq!(diagnoses[0].severity, Severity::Severe);
        assert_eq!(diagnoses[1].probability, 65);
        assert_eq!(diagnoses[1].severity, Severity::Moderate);
    }

    #[test]
    fn conjunction_rule_needs_every_trigger() {
        let alone = diagnose(&picks(&[("chest-pain", 5)]), Locale::En);
        assert!(!conditions(&alone).contains(&"Acute Coronary Syndrome"));

        let both = diagnose(&picks(&[("chest-pain", 5), ("breathing-difficulty", 9)]), Locale::En);
        assert_eq!(both[0].condition, "Acute Coronary Syndrome");
        assert_eq!(both[0].probability, 80);
    }

    #[test]
    fn duplicate_conditions_keep_highest_probability() {
        let diagnoses = diagnose(&picks(&[("nausea", 3), ("vomiting", 3), ("diarrhea", 9)]), Locale::En);
        let gastro: Vec<_> = diagnoses.iter().filter(|d| d.condition == "Gastroenteritis").collect();
        assert_eq!(gastro.len(), 1);
        assert_eq!(gastro[0].probability, 65);
    }

    #[test]
    fn output_is_sorted_capped_and_bounded() {
        let everything: Vec<(&str, u8)> = crate::catalog::SymptomCatalog::all()
            .iter()
            .map(|s| (s.id, 10))
            .collect();
        let diagnoses = diagnose(&picks(&everything), Locale::En);
        assert_eq!(diagnoses.len(), MAX_DIAGNOSES);
        assert!(diagnoses.windows(2).all(|w| w[0].probability >= w[1].probability));
        assert!(diagnoses.iter().all(|d| d.probability <= 100));
        assert!(diagnoses.iter().all(|d| d.probability <= PROBABILITY_CAP));
    }

    #[test]
    fn no_symptoms_no_diagnoses() {
        assert!(diagnose(&[], Locale::En).is_empty());
    }

    #[test]
    fn intense_chest_pain_makes_ecg_immediate() {
        let tests = recommend_tests(&picks(&[("chest-pain", 7)]), Locale::En);
        assert_eq!(tests[0].name, "Electrocardiogram (ECG)");
        assert_eq!(tests[0].urgency, TestUrgency::Immediate);

        let mild = recommend_tests(&picks(&[("chest-pain", 6)]), Locale::En);
        assert_eq!(mild[0].urgency, TestUrgency::WithinWeek);
    }

    #[test]
    fn non_escalating_tests_stay_within_week() {
        let tests = recommend_tests(&picks(&[("abdominal-pain", 10)]), Locale::En);
        assert_eq!(tests[0].urgency, TestUrgency::WithinWeek);
    }

    #[test]
    fn baseline_test_is_routine_and_last() {
        let tests = recommend_tests(&picks(&[("cough", 3), ("breathing-difficulty", 3)]), Locale::En);
        let names: Vec<_> = tests.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Chest X-ray", "Complete Blood Count (CBC)"]);
        assert_eq!(tests.last().unwrap().urgency, TestUrgency::Routine);
    }

    #[test]
    fn lifestyle_is_deterministic_per_category() {
        let symptoms = picks(&[("diarrhea", 3), ("nausea", 2), ("headache", 5)]);
        let first = lifestyle_advice(&symptoms, Locale::En);
        let again = lifestyle_advice(&symptoms, Locale::En);
        assert_eq!(first, again);
        let categories: Vec<_> = first.iter().map(|l| l.category.as_str()).collect();
        assert_eq!(categories, vec!["Sleep & Stress", "Diet"]);
        assert_eq!(first[1].suggestions.len(), 3);
    }

    #[test]
    fn lifestyle_falls_back_to_general_wellness() {
        let advice = lifestyle_advice(&[], Locale::Bn);
        assert_eq!(advice.len(), 1);
        assert_eq!(advice[0].category, "সাধারণ সুস্থতা");
    }
}
