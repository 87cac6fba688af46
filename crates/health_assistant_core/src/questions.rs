//! crates/health_assistant_core/src/questions.rs
//!
//! Builds the follow-up questionnaire for a set of selected symptoms and tracks
//! the user's answers to it.

use crate::catalog::SymptomCatalog;
use crate::domain::{Answer, DetailedQuestion, Locale, QuestionCategory, QuestionResponse, QuestionType};
use crate::messages;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

use QuestionCategory as C;
use QuestionType as T;

//=========================================================================================
// Question Templates
//=========================================================================================

/// A question before localization. `options` holds message ids.
#[derive(Debug, Clone, Copy)]
pub(crate) struct QuestionTemplate {
    pub id: &'static str,
    pub text_key: &'static str,
    pub kind: QuestionType,
    pub options: &'static [&'static str],
    pub required: bool,
    pub category: QuestionCategory,
}

impl QuestionTemplate {
    fn localize(&self, locale: Locale) -> DetailedQuestion {
        let options = (!self.options.is_empty()).then(|| {
            self.options
                .iter()
                .map(|&key| messages::text(key, locale).to_string())
                .collect()
        });
        DetailedQuestion {
            id: self.id,
            text: messages::text(self.text_key, locale).to_string(),
            question_type: self.kind,
            options,
            required: self.required,
            category: self.category,
        }
    }
}

const fn q(
    id: &'static str,
    text_key: &'static str,
    kind: QuestionType,
    options: &'static [&'static str],
    required: bool,
    category: QuestionCategory,
) -> QuestionTemplate {
    QuestionTemplate { id, text_key, kind, options, required, category }
}

const TIMING: &[QuestionTemplate] = &[
    q(
        "onset",
        "q.onset",
        T::MultipleChoice,
        &["q.onset.today", "q.onset.few_days", "q.onset.week", "q.onset.longer"],
        true,
        C::Timing,
    ),
    q(
        "pattern",
        "q.pattern",
        T::MultipleChoice,
        &["q.pattern.constant", "q.pattern.comes_and_goes", "q.pattern.worse", "q.pattern.better"],
        true,
        C::Timing,
    ),
];

const HISTORY: &[QuestionTemplate] = &[
    q("previous_conditions", "q.previous_conditions", T::Text, &[], false, C::MedicalHistory),
    q("current_medications", "q.current_medications", T::Text, &[], false, C::MedicalHistory),
    q("allergies", "q.allergies", T::YesNo, &[], true, C::MedicalHistory),
];

const LIFESTYLE: &[QuestionTemplate] = &[
    q(
        "smoking",
        "q.smoking",
        T::MultipleChoice,
        &["q.smoking.never", "q.smoking.former", "q.smoking.current"],
        true,
        C::Lifestyle,
    ),
    q("stress_level", "q.stress_level", T::Scale, &[], true, C::Lifestyle),
];

const HEADACHE: &[QuestionTemplate] = &[
    q(
        "headache_location",
        "q.headache_location",
        T::MultipleChoice,
        &[
            "q.headache_location.one_side",
            "q.headache_location.both_sides",
            "q.headache_location.forehead",
            "q.headache_location.back",
        ],
        true,
        C::Severity,
    ),
    q("headache_light", "q.headache_light", T::YesNo, &[], true, C::Associated),
    q(
        "headache_triggers",
        "q.headache_triggers",
        T::MultipleChoice,
        &[
            "q.headache_triggers.stress",
            "q.headache_triggers.sleep",
            "q.headache_triggers.screen",
            "q.headache_triggers.none",
        ],
        false,
        C::Triggers,
    ),
];

const CHEST_PAIN: &[QuestionTemplate] = &[
    q(
        "chest_pain_character",
        "q.chest_pain_character",
        T::MultipleChoice,
        &[
            "q.chest_pain_character.pressure",
            "q.chest_pain_character.sharp",
            "q.chest_pain_character.burning",
        ],
        true,
        C::Severity,
    ),
    q("chest_pain_radiation", "q.chest_pain_radiation", T::YesNo, &[], true, C::Associated),
    q("chest_pain_exertion", "q.chest_pain_exertion", T::YesNo, &[], true, C::Triggers),
];

const ABDOMINAL_PAIN: &[QuestionTemplate] = &[
    q(
        "abdominal_pain_location",
        "q.abdominal_pain_location",
        T::MultipleChoice,
        &[
            "q.abdominal_pain_location.upper",
            "q.abdominal_pain_location.lower_right",
            "q.abdominal_pain_location.lower_left",
            "q.abdominal_pain_location.navel",
        ],
        true,
        C::Severity,
    ),
    q(
        "abdominal_pain_meals",
        "q.abdominal_pain_meals",
        T::MultipleChoice,
        &[
            "q.abdominal_pain_meals.before",
            "q.abdominal_pain_meals.after",
            "q.abdominal_pain_meals.none",
        ],
        false,
        C::Triggers,
    ),
];

const FEVER: &[QuestionTemplate] = &[
    q(
        "fever_temperature",
        "q.fever_temperature",
        T::MultipleChoice,
        &[
            "q.fever_temperature.low",
            "q.fever_temperature.mid",
            "q.fever_temperature.high",
            "q.fever_temperature.unknown",
        ],
        true,
        C::Severity,
    ),
    q("fever_chills", "q.fever_chills", T::YesNo, &[], false, C::Associated),
    q("fever_rash", "q.fever_rash", T::YesNo, &[], true, C::Associated),
];

/// Symptom-specific blocks, keyed by catalog id.
pub(crate) const SYMPTOM_BLOCKS: &[(&str, &[QuestionTemplate])] = &[
    ("headache", HEADACHE),
    ("chest-pain", CHEST_PAIN),
    ("abdominal-pain", ABDOMINAL_PAIN),
    ("fever", FEVER),
];

pub(crate) fn all_templates() -> impl Iterator<Item = &'static QuestionTemplate> {
    TIMING
        .iter()
        .chain(HISTORY)
        .chain(LIFESTYLE)
        .chain(SYMPTOM_BLOCKS.iter().flat_map(|(_, block)| block.iter()))
}

//=========================================================================================
// Question Generation
//=========================================================================================

/// Produces the ordered questionnaire: timing, medical history, lifestyle, then one
/// block per selected symptom in catalog order. Only the *set* of ids matters.
pub fn generate_questions<'a, I>(selected_ids: I, locale: Locale) -> Vec<DetailedQuestion>
where
    I: IntoIterator<Item = &'a str>,
{
    let selected: HashSet<&str> = selected_ids.into_iter().collect();

    let symptom_blocks = SymptomCatalog::all()
        .iter()
        .filter(|s| selected.contains(s.id))
        .filter_map(|s| SYMPTOM_BLOCKS.iter().find(|(id, _)| *id == s.id))
        .flat_map(|(_, block)| block.iter());

    TIMING
        .iter()
        .chain(HISTORY)
        .chain(LIFESTYLE)
        .chain(symptom_blocks)
        .map(|t| t.localize(locale))
        .collect()
}

//=========================================================================================
// Questionnaire Responses
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionnaireError {
    #[error("question '{0}' is required and cannot be skipped")]
    RequiredQuestion(String),
}

/// One answer per question id; a later answer for the same id overwrites the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireResponses {
    answers: BTreeMap<String, Answer>,
    skipped: BTreeSet<String>,
}

impl QuestionnaireResponses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(&mut self, question_id: impl Into<String>, answer: Answer) {
        let id = question_id.into();
        self.skipped.remove(&id);
        self.answers.insert(id, answer);
    }

    /// Explicitly skips an optional question.
    pub fn skip(&mut self, question: &DetailedQuestion) -> Result<(), QuestionnaireError> {
        if question.required {
            return Err(QuestionnaireError::RequiredQuestion(question.id.to_string()));
        }
        self.answers.remove(question.id);
        self.skipped.insert(question.id.to_string());
        Ok(())
    }

    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    pub fn is_skipped(&self, question_id: &str) -> bool {
        self.skipped.contains(question_id)
    }

    /// Required questions that still have no answer, in questionnaire order.
    pub fn missing_required<'q>(&self, questions: &'q [DetailedQuestion]) -> Vec<&'q DetailedQuestion> {
        questions
            .iter()
            .filter(|q| q.required && !self.answers.contains_key(q.id))
            .collect()
    }

    /// True once every required question is answered.
    pub fn is_complete(&self, questions: &[DetailedQuestion]) -> bool {
        self.missing_required(questions).is_empty()
    }

    pub fn responses(&self) -> Vec<QuestionResponse> {
        self.answers
            .iter()
            .map(|(id, answer)| QuestionResponse {
                question_id: id.clone(),
                answer: answer.clone(),
            })
            .collect()
    }
}

impl FromIterator<QuestionResponse> for QuestionnaireResponses {
    fn from_iter<I: IntoIterator<Item = QuestionResponse>>(iter: I) -> Self {
        let mut responses = Self::new();
        for r in iter {
            responses.answer(r.question_id, r.answer);
        }
        responses
    }
}
