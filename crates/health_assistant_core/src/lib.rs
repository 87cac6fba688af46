pub mod aggregator;
pub mod assessment;
pub mod catalog;
pub mod domain;
pub mod heuristics;
pub mod history;
pub mod medication;
pub mod messages;
pub mod ports;
pub mod questions;
pub mod registry;
pub mod routing;
pub mod selection;

pub use aggregator::ResponseAggregator;
pub use assessment::{assess, assess_with_doctors, validate_tables, TableError};
pub use catalog::{Symptom, SymptomCatalog};
pub use domain::{
    AggregatedAnswer, Answer, AssessmentRecord, AssessmentReport, Doctor, Locale, MedicationInfo, MedicationSchedule,
    ProviderId, ProviderStatus, SelectedSymptom, SymptomDuration,
};
pub use medication::parse_medication_intent;
pub use ports::{DoctorDirectory, KeyValueStore, PortError, PortResult, ProviderError, ProviderResult, TextProvider};
pub use questions::{generate_questions, QuestionnaireError, QuestionnaireResponses};
pub use registry::{ProviderCredentials, ProviderRegistry};
pub use selection::{SelectionError, SymptomSelection};
