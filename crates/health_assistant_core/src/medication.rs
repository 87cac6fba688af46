//! crates/health_assistant_core/src/medication.rs
//!
//! Pulls a medication reminder out of a free-text chat message.
//!
//! Parsing is an ordered cascade of pattern tables: intent, then medicine name,
//! then frequency / duration / instructions. A message that does not match is not
//! an error; it simply produces no medication.

use crate::domain::{FrequencyCode, Locale, MedicationInfo};
use crate::messages;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

pub const DEFAULT_DURATION_DAYS: u32 = 7;
pub const MAX_DURATION_DAYS: u32 = 90;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid medication pattern {pattern}: {e}"))
}

/// Reminder-setting intent, English and Bengali. First match wins.
static INTENT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\bset\b.*\breminders?\b",
        r"(?i)\bremind\s+me\b",
        r"(?i)\b(?:medicine|medication|pill|dose)\s+reminders?\b",
        r"(?i)\bschedule\b.*\b(?:medicine|medication|dose|tablet)s?\b",
        r"রিমাইন্ডার",
        r"মনে\s*করিয়ে",
        r"ওষুধ.*(?:সময়|মনে)",
    ]
    .into_iter()
    .map(compile)
    .collect()
});

/// Medicine-name extractors, tried in order; capture group 1 is the name.
static NAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // "medicine: Napa", "ওষুধ: নাপা"
        r"(?i)(?:medicine|medication|drug|name|ওষুধ|ঔষধ)\s*[:：-]\s*([\p{L}\p{M}][\p{L}\p{M}\p{N}-]*)",
        // "Napa tablet", "Seclo capsule"
        r"(?i)\b([a-z][a-z0-9-]*)\s+(?:tablets?|tabs?|capsules?|caps?|syrup)\b",
        // "Napa 500mg"
        r"(?i)\b([a-z][a-z0-9-]*)\s*\d+(?:\.\d+)?\s*(?:mg|mcg|g|ml|iu)\b",
    ]
    .into_iter()
    .map(compile)
    .collect()
});

/// Last resort, "take Napa" / "for Napa". Only tried when [`MEDICATION_CONTEXT`] matches.
static CONTEXTUAL_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)\b(?:take|taking|for|of)\s+(?:(?:my|the|a|an|this)\s+)?([a-z][a-z0-9-]*)")
});

static MEDICATION_CONTEXT: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)\b(?:take|taking|medicines?|medications?|meds|drugs?|pills?|doses?|tablets?|capsules?|syrup)\b|ওষুধ|ঔষধ|ট্যাবলেট")
});

static STRENGTH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)(\d+(?:\.\d+)?)\s*(mg|mcg|g|ml|iu)\b"));

static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)(\d+)\s*(?:days?|দিন)"));

/// Frequency keywords, checked from most to fewest doses per day.
static FREQUENCY_PATTERNS: LazyLock<Vec<(FrequencyCode, Regex)>> = LazyLock::new(|| {
    vec![
        (
            FrequencyCode::QID,
            compile(r"(?i)\b(?:four\s+times|4\s*times|qid|qds)\b|চারবার|[4৪]\s*বার"),
        ),
        (
            FrequencyCode::TID,
            compile(r"(?i)\b(?:three\s+times|thrice|3\s*times|tid|tds)\b|তিনবার|[3৩]\s*বার"),
        ),
        (
            FrequencyCode::BD,
            compile(r"(?i)\b(?:twice|two\s+times|2\s*times|bd|bid)\b|দুইবার|দুবার|[2২]\s*বার"),
        ),
    ]
});

/// Meal-relation phrases and the message id each one resolves to.
pub(crate) static INSTRUCTION_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (compile(r"(?i)\bafter\s+(?:meals?|food|eating)\b|খাবারের\s*পরে"), "med.instructions.after_meals"),
        (compile(r"(?i)\bbefore\s+(?:meals?|food|eating)\b|খাবারের\s*আগে"), "med.instructions.before_meals"),
        (compile(r"(?i)\bwith\s+(?:meals?|food)\b|খাবারের\s*সাথে"), "med.instructions.with_food"),
        (compile(r"(?i)\b(?:at\s+bedtime|before\s+(?:bed|sleep))\b|ঘুমানোর\s*আগে"), "med.instructions.bedtime"),
    ]
});

/// Words the name cascade can catch that are never medicine names.
const NAME_STOPWORDS: &[&str] = &[
    "a", "an", "the", "my", "me", "this", "that", "it", "medicine", "medication", "reminder", "reminders",
    "pill", "pills", "dose", "doses", "tablet", "tablets", "capsule", "capsules", "days", "day", "daily", "week", "out", "up", "it",
];

/// Maps Bengali digits to ASCII so numeric patterns see one alphabet.
pub fn normalize_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '০'..='৯' => char::from_digit(c as u32 - '০' as u32, 10).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// True when the message asks for a medication reminder.
pub fn detect_intent(text: &str) -> bool {
    INTENT_PATTERNS.iter().any(|p| p.is_match(text))
}

/// First accepted medicine name from the ordered name patterns.
pub fn extract_name(text: &str) -> Option<String> {
    let contextual = MEDICATION_CONTEXT.is_match(text).then_some(&*CONTEXTUAL_NAME_PATTERN);
    NAME_PATTERNS.iter().chain(contextual).find_map(|pattern| {
        pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .find(|name| !name.is_empty() && !NAME_STOPWORDS.contains(&name.to_lowercase().as_str()))
            .map(capitalize)
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn extract_strength(text: &str) -> Option<String> {
    STRENGTH_PATTERN
        .captures(text)
        .map(|caps| format!("{}{}", &caps[1], caps[2].to_lowercase()))
}

pub fn infer_frequency(text: &str) -> FrequencyCode {
    FREQUENCY_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(text))
        .map(|(code, _)| *code)
        .unwrap_or(FrequencyCode::OD)
}

/// Days from a `<number> days` phrase. Zero or missing falls back to the default;
/// longer courses are capped.
pub fn extract_duration_days(text: &str) -> u32 {
    DURATION_PATTERN
        .captures(text)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .filter(|days| *days > 0)
        .map(|days| days.min(MAX_DURATION_DAYS))
        .unwrap_or(DEFAULT_DURATION_DAYS)
}

pub fn extract_instructions(text: &str, locale: Locale) -> Option<String> {
    INSTRUCTION_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(text))
        .map(|(_, key)| messages::text(key, locale).to_string())
}

/// Parses a reminder request. Returns `None` when there is no reminder intent or no
/// recognizable medicine name; `now` becomes the time of dose 1 and `locale` picks
/// the language of the instructions.
pub fn parse_medication_intent(message: &str, locale: Locale, now: DateTime<Utc>) -> Option<MedicationInfo> {
    let text = normalize_digits(message);
    if !detect_intent(&text) {
        return None;
    }
    let name = extract_name(&text)?;
    let frequency_code = infer_frequency(&text);

    Some(MedicationInfo {
        name,
        strength: extract_strength(&text),
        frequency_code,
        dose_times_per_day: frequency_code.doses_per_day(),
        duration_days: extract_duration_days(&text),
        instructions: extract_instructions(&text, locale),
        start_time: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap()
    }

    #[test]
    fn parses_full_reminder_request() {
        let info = parse_medication_intent("Set a reminder for Napa 500mg twice daily for 5 days", Locale::En, now()).unwrap();
        assert_eq!(info.name, "Napa");
        assert_eq!(info.strength.as_deref(), Some("500mg"));
        assert_eq!(info.frequency_code, FrequencyCode::BD);
        assert_eq!(info.dose_times_per_day, 2);
        assert_eq!(info.duration_days, 5);
        assert_eq!(info.start_time, now());
    }

    #[test]
    fn unrelated_message_has_no_intent() {
        assert!(parse_medication_intent("What is the weather today?", Locale::En, now()).is_none());
        assert!(!detect_intent("I have a headache"));
    }

    #[test]
    fn intent_without_a_name_fails_soft() {
        assert!(parse_medication_intent("Set a reminder", Locale::En, now()).is_none());
    }

    #[test]
    fn intent_patterns() {
        assert!(detect_intent("Please set my medicine reminder"));
        assert!(detect_intent("remind me to take Seclo"));
        assert!(detect_intent("medication reminder for Fexo"));
        assert!(detect_intent("নাপা ওষুধের রিমাইন্ডার দাও"));
        assert!(detect_intent("আমাকে ওষুধ খাওয়ার কথা মনে করিয়ে দিও"));
    }

    #[test]
    fn labeled_name_wins() {
        assert_eq!(extract_name("reminder, medicine: Seclo 20mg").as_deref(), Some("Seclo"));
        assert_eq!(extract_name("ওষুধ: নাপা").as_deref(), Some("নাপা"));
    }

    #[test]
    fn tablet_and_capsule_names() {
        assert_eq!(extract_name("remind me to take the Maxpro capsule").as_deref(), Some("Maxpro"));
        assert_eq!(extract_name("set reminder napa tablet").as_deref(), Some("Napa"));
    }

    #[test]
    fn bare_word_with_dose() {
        assert_eq!(extract_name("set reminder Monas 10mg at night").as_deref(), Some("Monas"));
    }

    #[test]
    fn take_or_for_skips_stopwords() {
        assert_eq!(extract_name("remind me to take my Losectil").as_deref(), Some("Losectil"));
        assert_eq!(extract_name("set a reminder for the medicine").as_deref(), None);
    }

    #[test]
    fn frequency_keywords() {
        assert_eq!(infer_frequency("take it three times a day"), FrequencyCode::TID);
        assert_eq!(infer_frequency("1 tab QID"), FrequencyCode::QID);
        assert_eq!(infer_frequency("দিনে দুইবার"), FrequencyCode::BD);
        assert_eq!(infer_frequency("once at night"), FrequencyCode::OD);
    }

    #[test]
    fn duration_defaults_and_caps() {
        assert_eq!(extract_duration_days("for 10 days"), 10);
        assert_eq!(extract_duration_days("for 1 day"), 1);
        assert_eq!(extract_duration_days("no duration"), DEFAULT_DURATION_DAYS);
        assert_eq!(extract_duration_days("for 0 days"), DEFAULT_DURATION_DAYS);
        assert_eq!(extract_duration_days("for 400 days"), MAX_DURATION_DAYS);
    }

    #[test]
    fn bengali_digits_are_normalized() {
        let info = parse_medication_intent("রিমাইন্ডার: ওষুধ: নাপা দিনে ৩ বার ৫ দিন", Locale::Bn, now()).unwrap();
        assert_eq!(info.name, "নাপা");
        assert_eq!(info.frequency_code, FrequencyCode::TID);
        assert_eq!(info.duration_days, 5);
    }

    #[test]
    fn instructions_from_meal_phrases() {
        let info = parse_medication_intent("remind me to take Napa tablet after meals", Locale::En, now()).unwrap();
        assert_eq!(info.instructions.as_deref(), Some("After meals"));
        assert_eq!(extract_instructions("whenever", Locale::En), None);
    }

    #[test]
    fn instructions_follow_the_request_locale() {
        let info = parse_medication_intent("রিমাইন্ডার: ওষুধ: নাপা খাবারের পরে ৫ দিন", Locale::Bn, now()).unwrap();
        assert_eq!(
            info.instructions.as_deref(),
            Some(messages::text("med.instructions.after_meals", Locale::Bn))
        );
        assert_ne!(info.instructions.as_deref(), Some("After meals"));
        assert_eq!(
            extract_instructions("before sleep", Locale::Bn).as_deref(),
            Some(messages::text("med.instructions.bedtime", Locale::Bn))
        );
    }

    #[test]
    fn generic_reminders_are_not_medications() {
        assert!(parse_medication_intent("Set a reminder for my meeting tomorrow", Locale::En, now()).is_none());
        assert!(parse_medication_intent("remind me to call mom", Locale::En, now()).is_none());
        assert_eq!(extract_name("set a reminder for my Napa pills").as_deref(), Some("Napa"));
    }
}
