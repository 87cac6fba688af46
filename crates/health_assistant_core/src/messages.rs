//! crates/health_assistant_core/src/messages.rs
//!
//! Locale resource table. Every user-facing string the core produces is looked up
//! here by a stable message id; rule tables and generators only hold ids.

use crate::domain::Locale;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::warn;

/// One message in every supported locale.
#[derive(Debug, Clone, Copy)]
pub struct LocalizedText {
    pub en: &'static str,
    pub bn: &'static str,
}

impl LocalizedText {
    pub fn get(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.en,
            Locale::Bn => self.bn,
        }
    }
}

static TABLE: LazyLock<HashMap<&'static str, LocalizedText>> = LazyLock::new(|| {
    MESSAGES
        .iter()
        .map(|&(id, en, bn)| (id, LocalizedText { en, bn }))
        .collect()
});

/// Resolves a message id. An unknown id is a table bug; it is logged and the id
/// itself is returned so the caller still renders something.
pub fn text(id: &'static str, locale: Locale) -> &'static str {
    match TABLE.get(id) {
        Some(entry) => entry.get(locale),
        None => {
            warn!(message_id = id, "Missing locale message");
            id
        }
    }
}

pub fn contains(id: &str) -> bool {
    TABLE.contains_key(id)
}

// (id, en, bn)
const MESSAGES: &[(&str, &str, &str)] = &[
    // --- Chat aggregation ---
    (
        "chat.fallback",
        "Sorry, no AI service is available right now. Please try again shortly. If your symptoms are serious, contact a doctor or call 999.",
        "দুঃখিত, এই মুহূর্তে কোনো এআই সেবা পাওয়া যাচ্ছে না। একটু পরে আবার চেষ্টা করুন। উপসর্গ গুরুতর হলে একজন ডাক্তারের সাথে যোগাযোগ করুন অথবা ৯৯৯-এ কল করুন।",
    ),
    ("chat.advisory_label", "🤖 AI advisory (single source):", "🤖 এআই পরামর্শ (একক উৎস):"),
    ("chat.consensus_label", "✅ Expert consensus:", "✅ বিশেষজ্ঞ ঐকমত্য:"),
    ("chat.opinion_label", "Opinion {rank} (confidence {confidence}%):", "মতামত {rank} (আস্থা {confidence}%):"),
    (
        "chat.consult_professional",
        "⚠️ The AI opinions above do not agree. Please consult a qualified healthcare professional.",
        "⚠️ উপরের এআই মতামতগুলো একমত নয়। অনুগ্রহ করে একজন যোগ্য স্বাস্থ্যসেবা পেশাদারের পরামর্শ নিন।",
    ),
    (
        "provider.system_prompt",
        "You are a careful health assistant. Explain possible causes and sensible next steps in plain language. Never give a definitive diagnosis, and advise seeing a doctor when symptoms are serious. Answer in English.",
        "আপনি একজন সতর্ক স্বাস্থ্য সহকারী। সহজ ভাষায় সম্ভাব্য কারণ ও করণীয় ব্যাখ্যা করুন। কখনো নিশ্চিত রোগনির্ণয় দেবেন না, এবং উপসর্গ গুরুতর হলে ডাক্তার দেখানোর পরামর্শ দিন। বাংলায় উত্তর দিন।",
    ),
    (
        "assessment.disclaimer",
        "This assessment is informational only and is not a medical diagnosis. Please consult a doctor.",
        "এই মূল্যায়ন শুধুমাত্র তথ্যের জন্য, এটি কোনো চিকিৎসা রোগনির্ণয় নয়। অনুগ্রহ করে একজন ডাক্তারের পরামর্শ নিন।",
    ),
    // --- Symptom names ---
    ("symptom.headache", "Headache", "মাথাব্যথা"),
    ("symptom.dizziness", "Dizziness", "মাথা ঘোরা"),
    ("symptom.chest_pain", "Chest pain", "বুকে ব্যথা"),
    ("symptom.breathing_difficulty", "Difficulty breathing", "শ্বাসকষ্ট"),
    ("symptom.palpitations", "Palpitations", "বুক ধড়ফড়"),
    ("symptom.cough", "Cough", "কাশি"),
    ("symptom.abdominal_pain", "Abdominal pain", "পেটে ব্যথা"),
    ("symptom.nausea", "Nausea", "বমি বমি ভাব"),
    ("symptom.vomiting", "Vomiting", "বমি"),
    ("symptom.diarrhea", "Diarrhea", "ডায়রিয়া"),
    ("symptom.fever", "Fever", "জ্বর"),
    ("symptom.fatigue", "Fatigue", "ক্লান্তি"),
    ("symptom.body_ache", "Body ache", "শরীর ব্যথা"),
    // --- Timing questions ---
    ("q.onset", "When did your symptoms start?", "আপনার উপসর্গ কখন শুরু হয়েছে?"),
    ("q.onset.today", "Today", "আজ"),
    ("q.onset.few_days", "A few days ago", "কয়েক দিন আগে"),
    ("q.onset.week", "About a week ago", "প্রায় এক সপ্তাহ আগে"),
    ("q.onset.longer", "More than a week ago", "এক সপ্তাহেরও বেশি আগে"),
    ("q.pattern", "How have your symptoms changed since they started?", "শুরু হওয়ার পর থেকে উপসর্গ কেমন বদলেছে?"),
    ("q.pattern.constant", "Constant", "একটানা আছে"),
    ("q.pattern.comes_and_goes", "Comes and goes", "আসে আর যায়"),
    ("q.pattern.worse", "Getting worse", "বাড়ছে"),
    ("q.pattern.better", "Getting better", "কমছে"),
    // --- Medical history questions ---
    (
        "q.previous_conditions",
        "Do you have any long-term conditions (e.g. diabetes, high blood pressure)?",
        "আপনার কি কোনো দীর্ঘমেয়াদি রোগ আছে (যেমন ডায়াবেটিস, উচ্চ রক্তচাপ)?",
    ),
    ("q.current_medications", "Which medicines are you currently taking?", "আপনি বর্তমানে কোন কোন ওষুধ খাচ্ছেন?"),
    ("q.allergies", "Do you have any known drug or food allergies?", "আপনার কি কোনো ওষুধ বা খাবারে অ্যালার্জি আছে?"),
    // --- Lifestyle questions ---
    ("q.smoking", "Do you smoke?", "আপনি কি ধূমপান করেন?"),
    ("q.smoking.never", "Never", "কখনো না"),
    ("q.smoking.former", "I used to", "আগে করতাম"),
    ("q.smoking.current", "Yes, currently", "হ্যাঁ, এখনো করি"),
    ("q.stress_level", "How stressed have you felt lately? (1-10)", "সম্প্রতি আপনি কতটা মানসিক চাপে আছেন? (১-১০)"),
    // --- Headache block ---
    ("q.headache_location", "Where is the headache?", "মাথাব্যথা কোথায় হয়?"),
    ("q.headache_location.one_side", "One side of the head", "মাথার এক পাশে"),
    ("q.headache_location.both_sides", "Both sides", "দুই পাশে"),
    ("q.headache_location.forehead", "Forehead", "কপালে"),
    ("q.headache_location.back", "Back of the head", "মাথার পেছনে"),
    ("q.headache_light", "Does light or noise make it worse?", "আলো বা শব্দে কি ব্যথা বাড়ে?"),
    ("q.headache_triggers", "What seems to trigger it?", "কী কারণে ব্যথা শুরু হয় বলে মনে হয়?"),
    ("q.headache_triggers.stress", "Stress", "মানসিক চাপ"),
    ("q.headache_triggers.sleep", "Lack of sleep", "ঘুমের অভাব"),
    ("q.headache_triggers.screen", "Screen time", "স্ক্রিনে দীর্ঘ সময়"),
    ("q.headache_triggers.none", "Nothing in particular", "নির্দিষ্ট কিছু না"),
    // --- Chest pain block ---
    ("q.chest_pain_character", "How would you describe the chest pain?", "বুকের ব্যথা কেমন?"),
    ("q.chest_pain_character.pressure", "Pressure or tightness", "চাপ বা আঁটসাঁট ভাব"),
    ("q.chest_pain_character.sharp", "Sharp or stabbing", "তীক্ষ্ণ বা খোঁচা দেওয়ার মতো"),
    ("q.chest_pain_character.burning", "Burning", "জ্বালাপোড়া"),
    (
        "q.chest_pain_radiation",
        "Does the pain spread to your arm, jaw or back?",
        "ব্যথা কি হাত, চোয়াল বা পিঠে ছড়িয়ে যায়?",
    ),
    ("q.chest_pain_exertion", "Does it get worse with physical activity?", "শারীরিক পরিশ্রমে কি ব্যথা বাড়ে?"),
    // --- Abdominal pain block ---
    ("q.abdominal_pain_location", "Where in the abdomen is the pain?", "পেটের কোথায় ব্যথা?"),
    ("q.abdominal_pain_location.upper", "Upper abdomen", "পেটের উপরের অংশে"),
    ("q.abdominal_pain_location.lower_right", "Lower right", "নিচের ডান দিকে"),
    ("q.abdominal_pain_location.lower_left", "Lower left", "নিচের বাম দিকে"),
    ("q.abdominal_pain_location.navel", "Around the navel", "নাভির চারপাশে"),
    ("q.abdominal_pain_meals", "Is the pain related to meals?", "ব্যথা কি খাবারের সাথে সম্পর্কিত?"),
    ("q.abdominal_pain_meals.before", "Worse before meals", "খাবারের আগে বাড়ে"),
    ("q.abdominal_pain_meals.after", "Worse after meals", "খাবারের পরে বাড়ে"),
    ("q.abdominal_pain_meals.none", "No relation", "কোনো সম্পর্ক নেই"),
    // --- Fever block ---
    ("q.fever_temperature", "What was your highest temperature?", "আপনার সর্বোচ্চ তাপমাত্রা কত ছিল?"),
    ("q.fever_temperature.low", "Below 100°F", "১০০°F এর নিচে"),
    ("q.fever_temperature.mid", "100-102°F", "১০০-১০২°F"),
    ("q.fever_temperature.high", "Above 102°F", "১০২°F এর বেশি"),
    ("q.fever_temperature.unknown", "Not measured", "মাপা হয়নি"),
    ("q.fever_chills", "Have you had chills or shivering?", "আপনার কি কাঁপুনি দিয়ে জ্বর এসেছে?"),
    ("q.fever_rash", "Have you noticed any skin rash?", "ত্বকে কি কোনো র‍্যাশ দেখা দিয়েছে?"),
    // --- Diagnoses ---
    ("dx.migraine", "Migraine", "মাইগ্রেন"),
    (
        "dx.migraine.desc",
        "Recurring headaches, often one-sided, sometimes with sensitivity to light or nausea.",
        "বারবার হওয়া মাথাব্যথা, প্রায়ই এক পাশে, কখনো আলোতে অস্বস্তি বা বমি ভাবসহ।",
    ),
    ("dx.tension_headache", "Tension Headache", "টেনশন মাথাব্যথা"),
    (
        "dx.tension_headache.desc",
        "A band-like headache usually linked to stress, posture or poor sleep.",
        "সাধারণত মানসিক চাপ, ভঙ্গি বা ঘুমের অভাবের সাথে যুক্ত ফিতার মতো চাপা মাথাব্যথা।",
    ),
    ("dx.vertigo", "Benign Positional Vertigo", "বিনাইন পজিশনাল ভার্টিগো"),
    (
        "dx.vertigo.desc",
        "Brief spinning sensations triggered by changes in head position.",
        "মাথার অবস্থান বদলালে অল্প সময়ের জন্য চারপাশ ঘোরার অনুভূতি।",
    ),
    ("dx.angina", "Angina", "অ্যানজাইনা"),
    (
        "dx.angina.desc",
        "Chest discomfort caused by reduced blood flow to the heart muscle.",
        "হৃদপেশিতে রক্তপ্রবাহ কমে যাওয়ার কারণে বুকে অস্বস্তি।",
    ),
    ("dx.costochondritis", "Costochondritis", "কস্টোকন্ড্রাইটিস"),
    (
        "dx.costochondritis.desc",
        "Inflammation of the rib cartilage causing localized chest wall pain.",
        "পাঁজরের তরুণাস্থির প্রদাহ, যা বুকের নির্দিষ্ট জায়গায় ব্যথা করে।",
    ),
    ("dx.acute_coronary_syndrome", "Acute Coronary Syndrome", "অ্যাকিউট করোনারি সিনড্রোম"),
    (
        "dx.acute_coronary_syndrome.desc",
        "Chest pain with breathlessness can signal a heart emergency and needs prompt evaluation.",
        "শ্বাসকষ্টসহ বুকে ব্যথা হৃদরোগজনিত জরুরি অবস্থার লক্ষণ হতে পারে, দ্রুত পরীক্ষা প্রয়োজন।",
    ),
    ("dx.asthma", "Asthma", "হাঁপানি"),
    (
        "dx.asthma.desc",
        "Narrowing of the airways causing wheeze and shortness of breath.",
        "শ্বাসনালী সরু হয়ে শোঁ শোঁ শব্দ ও শ্বাসকষ্ট।",
    ),
    ("dx.bronchitis", "Bronchitis", "ব্রংকাইটিস"),
    (
        "dx.bronchitis.desc",
        "Inflamed airways producing a persistent cough, often after a cold.",
        "শ্বাসনালীর প্রদাহ, প্রায়ই সর্দির পরে দীর্ঘস্থায়ী কাশি হয়।",
    ),
    ("dx.respiratory_infection", "Respiratory Tract Infection", "শ্বাসতন্ত্রের সংক্রমণ"),
    (
        "dx.respiratory_infection.desc",
        "A viral or bacterial infection of the airways with fever and cough.",
        "জ্বর ও কাশিসহ শ্বাসনালীর ভাইরাস বা ব্যাকটেরিয়াজনিত সংক্রমণ।",
    ),
    ("dx.arrhythmia", "Cardiac Arrhythmia", "হৃদস্পন্দনের অনিয়ম"),
    (
        "dx.arrhythmia.desc",
        "An irregular heartbeat that may feel like fluttering or pounding.",
        "অনিয়মিত হৃদস্পন্দন, যা বুক ধড়ফড় বা কাঁপার মতো লাগতে পারে।",
    ),
    ("dx.anxiety", "Anxiety", "উদ্বেগ"),
    (
        "dx.anxiety.desc",
        "Stress-related symptoms such as a racing heart and restlessness.",
        "মানসিক চাপজনিত উপসর্গ, যেমন বুক ধড়ফড় ও অস্থিরতা।",
    ),
    ("dx.gastritis", "Gastritis", "গ্যাস্ট্রাইটিস"),
    (
        "dx.gastritis.desc",
        "Inflammation of the stomach lining, often with upper abdominal pain.",
        "পাকস্থলীর আবরণের প্রদাহ, প্রায়ই পেটের উপরের অংশে ব্যথা।",
    ),
    ("dx.appendicitis", "Appendicitis", "অ্যাপেন্ডিসাইটিস"),
    (
        "dx.appendicitis.desc",
        "Inflammation of the appendix; pain often moves to the lower right abdomen.",
        "অ্যাপেন্ডিক্সের প্রদাহ; ব্যথা প্রায়ই পেটের নিচের ডান দিকে সরে যায়।",
    ),
    ("dx.gastroenteritis", "Gastroenteritis", "গ্যাস্ট্রোএন্টারাইটিস"),
    (
        "dx.gastroenteritis.desc",
        "A stomach and gut infection causing vomiting or diarrhea.",
        "পাকস্থলী ও অন্ত্রের সংক্রমণ, যাতে বমি বা ডায়রিয়া হয়।",
    ),
    ("dx.viral_fever", "Viral Fever", "ভাইরাল জ্বর"),
    (
        "dx.viral_fever.desc",
        "A common viral illness that usually settles with rest and fluids.",
        "সাধারণ ভাইরাসজনিত অসুস্থতা, যা বিশ্রাম ও তরল খাবারে সাধারণত সেরে যায়।",
    ),
    ("dx.dengue", "Dengue Fever", "ডেঙ্গু জ্বর"),
    (
        "dx.dengue.desc",
        "A mosquito-borne infection with high fever and body aches; platelet count should be monitored.",
        "মশাবাহিত সংক্রমণ, তীব্র জ্বর ও শরীর ব্যথা হয়; প্লাটিলেট পর্যবেক্ষণ করা প্রয়োজন।",
    ),
    ("dx.anemia", "Anemia", "রক্তস্বল্পতা"),
    (
        "dx.anemia.desc",
        "A low red blood cell count that can cause tiredness and weakness.",
        "লোহিত রক্তকণিকা কমে যাওয়া, যাতে ক্লান্তি ও দুর্বলতা হয়।",
    ),
    // --- Tests ---
    ("test.ecg", "Electrocardiogram (ECG)", "ইসিজি"),
    ("test.ecg.reason", "Checks the heart's rhythm and signs of strain.", "হৃদস্পন্দনের ছন্দ ও চাপের লক্ষণ পরীক্ষা করে।"),
    ("test.holter", "Holter Monitoring", "হল্টার মনিটরিং"),
    ("test.holter.reason", "Records the heartbeat over 24 hours to catch irregular rhythms.", "অনিয়মিত ছন্দ ধরতে ২৪ ঘণ্টা হৃদস্পন্দন রেকর্ড করে।"),
    ("test.chest_xray", "Chest X-ray", "বুকের এক্স-রে"),
    ("test.chest_xray.reason", "Looks at the lungs and airways.", "ফুসফুস ও শ্বাসনালী দেখা হয়।"),
    ("test.ct_brain", "CT Scan of the Brain", "মস্তিষ্কের সিটি স্ক্যান"),
    ("test.ct_brain.reason", "Rules out structural causes of a severe headache.", "তীব্র মাথাব্যথার কাঠামোগত কারণ বাদ দিতে।"),
    ("test.abdominal_ultrasound", "Abdominal Ultrasound", "পেটের আল্ট্রাসনোগ্রাফি"),
    ("test.abdominal_ultrasound.reason", "Examines the abdominal organs for inflammation or stones.", "পেটের অঙ্গগুলোতে প্রদাহ বা পাথর আছে কিনা দেখে।"),
    ("test.stool", "Stool Routine Examination", "মল পরীক্ষা"),
    ("test.stool.reason", "Looks for infection behind diarrhea.", "ডায়রিয়ার পেছনে সংক্রমণ আছে কিনা দেখে।"),
    ("test.dengue_ns1", "Dengue NS1 Antigen", "ডেঙ্গু এনএস১ অ্যান্টিজেন"),
    ("test.dengue_ns1.reason", "Detects early dengue infection.", "প্রাথমিক পর্যায়ের ডেঙ্গু সংক্রমণ শনাক্ত করে।"),
    ("test.cbc", "Complete Blood Count (CBC)", "সিবিসি (কমপ্লিট ব্লাড কাউন্ট)"),
    ("test.cbc.reason", "Baseline check for infection, anemia and platelets.", "সংক্রমণ, রক্তস্বল্পতা ও প্লাটিলেটের প্রাথমিক পরীক্ষা।"),
    ("test.ecg.cost", "BDT 300-600", "৩০০-৬০০ টাকা"),
    ("test.ct_brain.cost", "BDT 3,000-5,000", "৩,০০০-৫,০০০ টাকা"),
    ("test.holter.cost", "BDT 2,500-4,000", "২,৫০০-৪,০০০ টাকা"),
    ("test.chest_xray.cost", "BDT 400-800", "৪০০-৮০০ টাকা"),
    ("test.abdominal_ultrasound.cost", "BDT 1,000-2,000", "১,০০০-২,০০০ টাকা"),
    ("test.stool.cost", "BDT 200-400", "২০০-৪০০ টাকা"),
    ("test.dengue_ns1.cost", "BDT 300-500", "৩০০-৫০০ টাকা"),
    ("test.cbc.cost", "BDT 400-600", "৪০০-৬০০ টাকা"),
    // --- Medication instructions ---
    ("med.instructions.after_meals", "After meals", "খাবারের পরে"),
    ("med.instructions.before_meals", "Before meals", "খাবারের আগে"),
    ("med.instructions.with_food", "With food", "খাবারের সাথে"),
    ("med.instructions.bedtime", "At bedtime", "ঘুমানোর আগে"),
    // --- Lifestyle ---
    ("life.sleep_stress", "Sleep & Stress", "ঘুম ও মানসিক চাপ"),
    ("life.sleep_stress.1", "Keep a regular sleep schedule of 7-8 hours.", "প্রতিদিন নিয়মিত ৭-৮ ঘণ্টা ঘুমান।"),
    ("life.sleep_stress.2", "Take short breaks from screens every hour.", "প্রতি ঘণ্টায় স্ক্রিন থেকে ছোট বিরতি নিন।"),
    ("life.sleep_stress.3", "Practice relaxation or breathing exercises daily.", "প্রতিদিন শিথিলকরণ বা শ্বাসের ব্যায়াম করুন।"),
    ("life.heart", "Heart Health", "হৃদযন্ত্রের যত্ন"),
    ("life.heart.1", "Avoid heavy exertion until you have been checked.", "পরীক্ষা না হওয়া পর্যন্ত ভারী পরিশ্রম এড়িয়ে চলুন।"),
    ("life.heart.2", "Reduce salt and fried food.", "লবণ ও ভাজাপোড়া খাবার কমান।"),
    ("life.heart.3", "Stop smoking and limit caffeine.", "ধূমপান বন্ধ করুন এবং ক্যাফেইন কমান।"),
    ("life.breathing", "Breathing", "শ্বাস-প্রশ্বাস"),
    ("life.breathing.1", "Avoid dust, smoke and other irritants.", "ধুলা, ধোঁয়া ও অন্যান্য উত্তেজক এড়িয়ে চলুন।"),
    ("life.breathing.2", "Drink warm fluids to soothe the airways.", "শ্বাসনালী আরাম পেতে গরম তরল পান করুন।"),
    ("life.breathing.3", "Wear a mask outdoors when air quality is poor.", "বাতাসের মান খারাপ হলে বাইরে মাস্ক পরুন।"),
    ("life.diet", "Diet", "খাদ্যাভ্যাস"),
    ("life.diet.1", "Eat small, light meals at regular times.", "নিয়মিত সময়ে অল্প ও হালকা খাবার খান।"),
    ("life.diet.2", "Avoid spicy, oily and street food for now.", "আপাতত ঝাল, তেলযুক্ত ও রাস্তার খাবার এড়িয়ে চলুন।"),
    ("life.diet.3", "Drink oral saline and safe water to stay hydrated.", "পানিশূন্যতা এড়াতে খাবার স্যালাইন ও নিরাপদ পানি পান করুন।"),
    ("life.rest_hydration", "Rest & Hydration", "বিশ্রাম ও তরল গ্রহণ"),
    ("life.rest_hydration.1", "Rest as much as possible.", "যতটা সম্ভব বিশ্রাম নিন।"),
    ("life.rest_hydration.2", "Drink plenty of water, juice or soup.", "প্রচুর পানি, শরবত বা স্যুপ পান করুন।"),
    ("life.rest_hydration.3", "Use a mosquito net and remove standing water.", "মশারি ব্যবহার করুন এবং জমে থাকা পানি সরিয়ে ফেলুন।"),
    ("life.general", "General Wellness", "সাধারণ সুস্থতা"),
    ("life.general.1", "Eat a balanced diet with fruit and vegetables.", "ফলমূল ও শাকসবজিসহ সুষম খাবার খান।"),
    ("life.general.2", "Walk or exercise for 30 minutes most days.", "সপ্তাহের বেশিরভাগ দিন ৩০ মিনিট হাঁটুন বা ব্যায়াম করুন।"),
    ("life.general.3", "Keep track of your symptoms and see a doctor if they persist.", "উপসর্গগুলো লিখে রাখুন এবং না কমলে ডাক্তার দেখান।"),
    // --- Specialty reasons ---
    (
        "specialty.cardiology.reason",
        "Chest pain, breathlessness or palpitations should be reviewed by a heart specialist.",
        "বুকে ব্যথা, শ্বাসকষ্ট বা বুক ধড়ফড় একজন হৃদরোগ বিশেষজ্ঞকে দেখানো উচিত।",
    ),
    (
        "specialty.gastroenterology.reason",
        "Digestive symptoms are best assessed by a gastroenterologist.",
        "হজমজনিত উপসর্গ একজন গ্যাস্ট্রোএন্টারোলজিস্ট ভালোভাবে মূল্যায়ন করতে পারেন।",
    ),
    (
        "specialty.neurology.reason",
        "Headache or dizziness may need a neurologist's evaluation.",
        "মাথাব্যথা বা মাথা ঘোরার জন্য একজন নিউরোলজিস্টের মূল্যায়ন প্রয়োজন হতে পারে।",
    ),
    (
        "specialty.general_medicine.reason",
        "A general physician can assess your overall symptoms and refer you if needed.",
        "একজন সাধারণ চিকিৎসক আপনার সামগ্রিক উপসর্গ দেখে প্রয়োজনে বিশেষজ্ঞের কাছে পাঠাতে পারবেন।",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn message_ids_are_unique() {
        let mut seen = HashSet::new();
        for (id, _, _) in MESSAGES {
            assert!(seen.insert(*id), "duplicate message id {}", id);
        }
    }

    #[test]
    fn every_message_has_both_locales() {
        for (id, en, bn) in MESSAGES {
            assert!(!en.trim().is_empty(), "{} has no English text", id);
            assert!(!bn.trim().is_empty(), "{} has no Bengali text", id);
        }
    }

    #[test]
    fn unknown_id_falls_back_to_itself() {
        assert_eq!(text("no.such.message", Locale::En), "no.such.message");
        assert_eq!(text("chat.consensus_label", Locale::En), "✅ Expert consensus:");
    }
}
