use async_trait::async_trait;
use health_assistant_core::domain::{QuestionCategory, Specialty, Urgency};
use health_assistant_core::{
    assess, assess_with_doctors, generate_questions, messages, Answer, Doctor, DoctorDirectory, Locale, PortResult,
    QuestionnaireResponses, SymptomDuration, SymptomSelection,
};
use uuid::Uuid;

fn headache_and_dizziness() -> SymptomSelection {
    let mut selection = SymptomSelection::new();
    selection
        .select("headache", SymptomDuration::OneToThreeDays, 8, None, Locale::En)
        .unwrap();
    selection
        .select("dizziness", SymptomDuration::LessThanDay, 6, None, Locale::En)
        .unwrap();
    selection
}

#[test]
fn headache_session_end_to_end() {
    let selection = headache_and_dizziness();

    let questions = generate_questions(selection.ids(), Locale::En);
    let count = |category| questions.iter().filter(|q| q.category == category).count();
    assert_eq!(count(QuestionCategory::Timing), 2);
    assert_eq!(count(QuestionCategory::MedicalHistory), 3);
    assert_eq!(count(QuestionCategory::Lifestyle), 2);
    assert!(questions.iter().any(|q| q.id.starts_with("headache_")));
    assert!(questions[..7].iter().all(|q| !q.id.starts_with("headache_")));

    let report = assess(selection.symptoms(), Locale::En);
    let probability = |key: &'static str| {
        let name = messages::text(key, Locale::En);
        report.diagnoses.iter().find(|d| d.condition == name).map(|d| d.probability)
    };
    let migraine = probability("dx.migraine").expect("migraine candidate");
    let tension = probability("dx.tension_headache").expect("tension headache candidate");
    assert!(migraine >= 50);
    assert!(migraine > tension);

    assert!(report.diagnoses.len() <= 5);
    assert!(report.diagnoses.windows(2).all(|w| w[0].probability >= w[1].probability));
    assert!(report.diagnoses.iter().all(|d| d.probability <= 100));

    let neurology = report
        .specialties
        .iter()
        .find(|s| s.specialty == Specialty::Neurology)
        .expect("neurology referral");
    assert_eq!(neurology.urgency, Urgency::High);
}

#[test]
fn question_order_ignores_selection_order() {
    let forward = generate_questions(["headache", "chest-pain", "fever"], Locale::Bn);
    let reverse = generate_questions(["fever", "chest-pain", "headache"], Locale::Bn);
    let ids = |qs: &[health_assistant_core::domain::DetailedQuestion]| qs.iter().map(|q| q.id).collect::<Vec<_>>();
    assert_eq!(ids(&forward), ids(&reverse));
}

struct OneDoctor;

#[async_trait]
impl DoctorDirectory for OneDoctor {
    async fn lookup_doctors(&self, specialty: &str) -> PortResult<Vec<Doctor>> {
        Ok(vec![Doctor {
            id: Uuid::new_v4(),
            name: format!("Dr. {specialty}"),
            specialty: specialty.to_string(),
            experience_years: 8,
            rating: 4.5,
            fee: 1000,
            availability: "Sat-Wed".into(),
            hospital: "Square Hospital".into(),
        }])
    }
}

#[tokio::test]
async fn assessment_record_keeps_answers_and_doctors() {
    let selection = headache_and_dizziness();
    let mut responses = QuestionnaireResponses::new();
    responses.answer("onset", Answer::Text("Suddenly".into()));
    responses.answer("stress_level", Answer::Number(7.0));
    responses.answer("allergies", Answer::Bool(false));

    let user = Uuid::new_v4();
    let record = assess_with_doctors(user, selection.into_symptoms(), &responses, Locale::En, &OneDoctor).await;

    assert_eq!(record.user_id, user);
    assert_eq!(record.symptoms.len(), 2);
    assert_eq!(record.responses.len(), 3);
    assert!(record.report.specialties.iter().all(|s| s.doctors.len() == 1));
}
