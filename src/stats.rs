use serde::Deserialize;

/// Completion required to accept a language that was not accepted before
pub const ACCEPT_THRESHOLD: u64 = 95;
/// Completion required to keep a language that is already accepted
pub const RETAIN_THRESHOLD: u64 = 75;

/// Per-language entry of the resource stats response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LanguageStat {
    #[serde(rename = "translated_entities")]
    pub translated: u64,
    #[serde(rename = "untranslated_entities")]
    pub untranslated: u64,
}

impl LanguageStat {
    pub fn new(translated: u64, untranslated: u64) -> Self {
        Self {
            translated,
            untranslated,
        }
    }

    /// Integer percentage of translated entities, truncated. Zero for an empty resource.
    pub fn completion_percentage(&self) -> u64 {
        // u128 so that huge counts cannot overflow
        let total = u128::from(self.translated) + u128::from(self.untranslated);
        if total == 0 {
            return 0;
        }
        (u128::from(self.translated) * 100 / total) as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Include,
    Exclude,
}

impl Decision {
    pub fn is_included(self) -> bool {
        self == Decision::Include
    }
}

/// Decide whether a language ships, given its completion and whether it shipped before
pub fn decide(percentage: u64, previously_accepted: bool) -> Decision {
    if percentage >= ACCEPT_THRESHOLD || (percentage >= RETAIN_THRESHOLD && previously_accepted) {
        Decision::Include
    } else {
        Decision::Exclude
    }
}

/// Transifex reports `pt_BR`, the GUI expects `pt-BR`. Only the first underscore is replaced.
pub fn normalize_code(code: &str) -> String {
    code.replacen('_', "-", 1)
}

/// Codes end up in file names, so anything that could escape the output directory is rejected.
pub fn is_valid_code(code: &str) -> bool {
    !code.is_empty()
        && !code.contains("..")
        && !code.chars().any(|c| c == '/' || c == '\\' || c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ==================== LanguageStat Tests ====================

    #[test]
    fn test_language_stat_deserialization() {
        let json = r#"{
            "completed": "80%",
            "translated_entities": 80,
            "untranslated_entities": 20,
            "last_update": "2014-10-01 12:00:00"
        }"#;

        let stat: LanguageStat = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(stat, LanguageStat::new(80, 20));
    }

    #[test]
    fn test_stats_map_deserialization() {
        let json = r#"{
            "en": {"translated_entities": 100, "untranslated_entities": 0},
            "pt_BR": {"translated_entities": 3, "untranslated_entities": 1}
        }"#;

        let stats: std::collections::BTreeMap<String, LanguageStat> =
            serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(stats.len(), 2);
        assert_eq!(stats["pt_BR"].completion_percentage(), 75);
    }

    #[test]
    fn test_completion_percentage_truncates() {
        // 2/3 = 66.67%
        assert_eq!(LanguageStat::new(2, 1).completion_percentage(), 66);
        // 949/1000 = 94.9%
        assert_eq!(LanguageStat::new(949, 51).completion_percentage(), 94);
        assert_eq!(LanguageStat::new(100, 0).completion_percentage(), 100);
        assert_eq!(LanguageStat::new(0, 10).completion_percentage(), 0);
    }

    #[test]
    fn test_completion_percentage_empty_resource() {
        assert_eq!(LanguageStat::new(0, 0).completion_percentage(), 0);
    }

    #[test]
    fn test_completion_percentage_large_counts() {
        let stat = LanguageStat::new(u64::MAX / 2, u64::MAX / 2);
        assert_eq!(stat.completion_percentage(), 50);
    }

    // ==================== decide Tests ====================

    #[test]
    fn test_decide_boundaries() {
        assert_eq!(decide(95, false), Decision::Include);
        assert_eq!(decide(94, false), Decision::Exclude);
        assert_eq!(decide(94, true), Decision::Include);
        assert_eq!(decide(75, true), Decision::Include);
        assert_eq!(decide(74, true), Decision::Exclude);
        assert_eq!(decide(0, true), Decision::Exclude);
    }

    #[test]
    fn test_decide_matches_worked_example() {
        let en = LanguageStat::new(100, 0).completion_percentage();
        let fr = LanguageStat::new(80, 20).completion_percentage();
        let de = LanguageStat::new(50, 50).completion_percentage();

        assert!(decide(en, false).is_included());
        assert!(decide(fr, true).is_included());
        assert!(!decide(de, false).is_included());
    }

    // ==================== Code Tests ====================

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("pt_BR"), "pt-BR");
        assert_eq!(normalize_code("fr"), "fr");
        assert_eq!(normalize_code("sr_RS_latin"), "sr-RS_latin");
        assert_eq!(normalize_code("zh-CN"), "zh-CN");
    }

    #[test]
    fn test_is_valid_code() {
        assert!(is_valid_code("en"));
        assert!(is_valid_code("pt-BR"));
        assert!(is_valid_code("es-419"));
        assert!(is_valid_code("sr-RS_latin"));
        assert!(is_valid_code("ca@valencia"));
        assert!(!is_valid_code(""));
        assert!(!is_valid_code("../etc"));
        assert!(!is_valid_code(".."));
        assert!(!is_valid_code("en/fr"));
        assert!(!is_valid_code("en\\fr"));
        assert!(!is_valid_code("en\nfr"));
        assert!(!is_valid_code("en\0"));
    }

    // ==================== Property Tests ====================

    proptest! {
        #[test]
        fn prop_high_completion_always_included(pct in ACCEPT_THRESHOLD..=100u64, prior: bool) {
            prop_assert_eq!(decide(pct, prior), Decision::Include);
        }

        #[test]
        fn prop_one_in_twenty_missing_is_accepted(translated in 1u64..1_000_000, prior: bool) {
            let stat = LanguageStat::new(translated, translated / 20);
            prop_assert!(stat.completion_percentage() >= ACCEPT_THRESHOLD);
            prop_assert!(decide(stat.completion_percentage(), prior).is_included());
        }

        #[test]
        fn prop_low_completion_always_excluded(pct in 0u64..RETAIN_THRESHOLD, prior: bool) {
            prop_assert_eq!(decide(pct, prior), Decision::Exclude);
        }

        #[test]
        fn prop_middle_band_follows_prior(pct in RETAIN_THRESHOLD..ACCEPT_THRESHOLD, prior: bool) {
            prop_assert_eq!(decide(pct, prior).is_included(), prior);
        }

        #[test]
        fn prop_percentage_never_exceeds_100(translated: u64, untranslated: u64) {
            prop_assert!(LanguageStat::new(translated, untranslated).completion_percentage() <= 100);
        }
    }
}
