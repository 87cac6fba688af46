//! crates/health_assistant_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs carry no database or HTTP concerns; the serde derives only
//! describe their JSON shape for the persistence and transport adapters.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

//=========================================================================================
// Locale and Providers
//=========================================================================================

/// The language every user-facing string is resolved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Bn,
    #[default]
    En,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::Bn => "bn",
            Locale::En => "en",
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bn" | "bangla" | "bengali" => Ok(Locale::Bn),
            "en" | "english" => Ok(Locale::En),
            other => Err(format!("unsupported locale '{}'", other)),
        }
    }
}

/// Identifies one of the AI text-generation backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    OpenAi,
    Gemini,
    DeepSeek,
}

impl ProviderId {
    pub const ALL: [ProviderId; 3] = [ProviderId::OpenAi, ProviderId::Gemini, ProviderId::DeepSeek];

    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "OpenAI",
            ProviderId::Gemini => "Gemini",
            ProviderId::DeepSeek => "DeepSeek",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One successful provider reply, scored for ranking. Lives for a single aggregation call.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub provider_id: ProviderId,
    pub text: String,
    /// Heuristic score in `[0, 1]`, not a probability of correctness.
    pub confidence: f64,
}

/// The single answer handed back to the chat surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedAnswer {
    pub text: String,
    pub consensus: bool,
}

/// Readiness of one registered provider.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderStatus {
    pub id: ProviderId,
    pub name: &'static str,
    pub ready: bool,
}

//=========================================================================================
// Symptoms
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    /// The next tier up; `Severe` stays `Severe`.
    pub fn escalate(self) -> Self {
        match self {
            Severity::Mild => Severity::Moderate,
            Severity::Moderate | Severity::Severe => Severity::Severe,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomCategory {
    Neurological,
    Cardiovascular,
    Respiratory,
    Digestive,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    Head,
    Chest,
    Abdomen,
    General,
}

impl BodyPart {
    pub const ALL: [BodyPart; 4] = [BodyPart::Head, BodyPart::Chest, BodyPart::Abdomen, BodyPart::General];
}

/// How long the user has had a symptom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomDuration {
    LessThanDay,
    OneToThreeDays,
    FourToSevenDays,
    OneToTwoWeeks,
    MoreThanTwoWeeks,
}

/// A catalog symptom plus the details the user reported for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedSymptom {
    pub id: String,
    pub display_name: String,
    pub category: SymptomCategory,
    pub severity_tag: Severity,
    pub body_part: BodyPart,
    pub duration: SymptomDuration,
    /// Self-assessed strength, always within `1..=10`.
    pub intensity: u8,
    pub notes: Option<String>,
}

//=========================================================================================
// Follow-up Questions
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    Scale,
    YesNo,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    Timing,
    Severity,
    Associated,
    Triggers,
    MedicalHistory,
    Lifestyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedQuestion {
    pub id: &'static str,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub required: bool,
    pub category: QuestionCategory,
}

/// A user's answer to one follow-up question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Bool(bool),
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub question_id: String,
    pub answer: Answer,
}

//=========================================================================================
// Assessment Output
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub condition: String,
    /// Percentage within `0..=100`.
    pub probability: u8,
    pub severity: Severity,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestUrgency {
    Immediate,
    WithinWeek,
    Routine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedTest {
    pub name: String,
    pub reason: String,
    pub urgency: TestUrgency,
    pub cost_range: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifestyleRecommendation {
    pub category: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specialty {
    Cardiology,
    Gastroenterology,
    Neurology,
    GeneralMedicine,
}

impl Specialty {
    /// The key the doctor directory files doctors under.
    pub fn directory_key(&self) -> &'static str {
        match self {
            Specialty::Cardiology => "cardiology",
            Specialty::Gastroenterology => "gastroenterology",
            Specialty::Neurology => "neurology",
            Specialty::GeneralMedicine => "general_medicine",
        }
    }
}

/// A doctor as returned by the external directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    pub experience_years: u32,
    pub rating: f32,
    pub fee: u32,
    pub availability: String,
    pub hospital: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialtyRecommendation {
    pub specialty: Specialty,
    pub reason: String,
    pub urgency: Urgency,
    pub doctors: Vec<Doctor>,
}

/// Everything the assessment path produces for one finalized symptom list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub diagnoses: Vec<Diagnosis>,
    pub tests: Vec<RecommendedTest>,
    pub lifestyle: Vec<LifestyleRecommendation>,
    pub specialties: Vec<SpecialtyRecommendation>,
    pub disclaimer: String,
}

/// One entry of a user's symptom-session history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub symptoms: Vec<SelectedSymptom>,
    pub responses: Vec<QuestionResponse>,
    pub report: AssessmentReport,
}

//=========================================================================================
// Medications
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum FrequencyCode {
    OD,
    BD,
    TID,
    QID,
}

impl FrequencyCode {
    pub fn doses_per_day(&self) -> u8 {
        match self {
            FrequencyCode::OD => 1,
            FrequencyCode::BD => 2,
            FrequencyCode::TID => 3,
            FrequencyCode::QID => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationInfo {
    pub name: String,
    pub strength: Option<String>,
    pub frequency_code: FrequencyCode,
    pub dose_times_per_day: u8,
    pub duration_days: u32,
    pub instructions: Option<String>,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledDose {
    /// 1-based position within the course.
    pub sequence: u32,
    pub due_at: DateTime<Utc>,
    pub taken: bool,
}

/// A parsed medication expanded into concrete reminder timestamps for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationSchedule {
    pub id: Uuid,
    pub user_id: Uuid,
    pub medication: MedicationInfo,
    pub doses: Vec<ScheduledDose>,
}

impl MedicationSchedule {
    /// Expands `doses_per_day × duration_days` doses, evenly spaced across each day,
    /// with dose 1 at the medication's start time.
    pub fn build(user_id: Uuid, medication: MedicationInfo) -> Self {
        let per_day = u32::from(medication.dose_times_per_day.max(1));
        let interval = Duration::minutes(24 * 60 / i64::from(per_day));
        let total = per_day * medication.duration_days.max(1);

        let doses = (0..total)
            .map(|i| ScheduledDose {
                sequence: i + 1,
                due_at: medication.start_time + interval * i as i32,
                taken: false,
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            user_id,
            medication,
            doses,
        }
    }

    /// Marks a dose as taken. Returns `false` when no dose has that sequence number.
    pub fn mark_dose_taken(&mut self, sequence: u32) -> bool {
        match self.doses.iter_mut().find(|d| d.sequence == sequence) {
            Some(dose) => {
                dose.taken = true;
                true
            }
            None => false,
        }
    }

    /// The earliest untaken dose due at or after `now`.
    pub fn next_due(&self, now: DateTime<Utc>) -> Option<&ScheduledDose> {
        self.doses.iter().find(|d| !d.taken && d.due_at >= now)
    }
}
