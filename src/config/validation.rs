//! Config validation: unknown-key detection with Levenshtein suggestions
//! and city tier list checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::{HashMap, HashSet};

use super::CityTierConfig;
use crate::features::normalize_city;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " — did you mean '{s}'?")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for ServiceConfig.
///
/// Any new field added to ServiceConfig must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [server]
        "server",
        "server.addr",
        "server.max_body_bytes",
        // [model]
        "model",
        "model.path",
        "model.version_override",
        // [city_tiers]
        "city_tiers",
        "city_tiers.tier_1",
        "city_tiers.tier_2",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Collect the dotted path of every table and key in a parsed config.
///
/// `[server]\naddr = ".."` yields `["server", "server.addr"]`. Arrays such as
/// `city_tiers.tier_1` are leaves; their elements are not walked.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Edit distance between two config keys, counted in chars so non-ASCII
/// keys compare correctly.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1)
                .min(curr[j] + 1)
                .min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Closest entry of [`known_config_keys`] within edit distance 3, e.g.
/// `city_tiers.teir_1` -> `city_tiers.tier_1`.
///
/// Ties go to the lexicographically smaller key so output is stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|(dist, _)| *dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys — it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// City Tier Validation
// ============================================================================

/// Validate the tier lists.
///
/// Returns (errors, warnings). Errors: blank entries, a city listed in both
/// tiers. Warnings: entries not already in title case, duplicates within a
/// tier.
pub fn validate_city_tiers(tiers: &CityTierConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut seen: HashMap<String, &'static str> = HashMap::new();

    for (tier_key, entries) in [("city_tiers.tier_1", &tiers.tier_1), ("city_tiers.tier_2", &tiers.tier_2)] {
        for raw in entries {
            let normalized = normalize_city(raw);
            if normalized.is_empty() {
                errors.push(format!("{tier_key} contains a blank city name"));
                continue;
            }

            if normalized != *raw {
                warnings.push(ValidationWarning {
                    field: tier_key.to_string(),
                    message: format!("{tier_key}: '{raw}' will be matched as '{normalized}'"),
                    suggestion: Some(normalized.clone()),
                });
            }

            match seen.get(&normalized) {
                Some(&other) if other == tier_key => warnings.push(ValidationWarning {
                    field: tier_key.to_string(),
                    message: format!("{tier_key}: '{normalized}' is listed more than once"),
                    suggestion: None,
                }),
                Some(&other) => errors.push(format!(
                    "'{normalized}' is listed in both {other} and {tier_key}"
                )),
                None => {
                    seen.insert(normalized, tier_key);
                }
            }
        }
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("hello", "hello"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("tier_l", "tier_1"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            [server]
            addr = "x"
            [city_tiers]
            tier_1 = ["A"]
        "#
        .parse()
        .unwrap();
        let mut keys = walk_toml_keys(&toml, "");
        keys.sort();
        assert_eq!(
            keys,
            vec!["city_tiers", "city_tiers.tier_1", "server", "server.addr"]
        );
    }

    #[test]
    fn test_suggest_none_when_far() {
        let known = known_config_keys();
        assert_eq!(suggest_correction("completely.unrelated", &known), None);
    }

    #[test]
    fn test_lowercase_tier_entry_warns() {
        let tiers = CityTierConfig {
            tier_1: vec!["mumbai".to_string()],
            tier_2: vec![],
        };
        let (errors, warnings) = validate_city_tiers(&tiers);
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].suggestion.as_deref(), Some("Mumbai"));
    }

    #[test]
    fn test_city_in_both_tiers_is_error() {
        let tiers = CityTierConfig {
            tier_1: vec!["Pune".to_string()],
            tier_2: vec![" pune".to_string()],
        };
        let (errors, _) = validate_city_tiers(&tiers);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("both"));
    }

    #[test]
    fn test_blank_entry_is_error() {
        let tiers = CityTierConfig {
            tier_1: vec!["  ".to_string()],
            tier_2: vec![],
        };
        let (errors, _) = validate_city_tiers(&tiers);
        assert!(errors[0].contains("blank"));
    }

    #[test]
    fn test_duplicate_within_tier_warns() {
        let tiers = CityTierConfig {
            tier_1: vec!["Delhi".to_string(), "Delhi".to_string()],
            tier_2: vec![],
        };
        let (errors, warnings) = validate_city_tiers(&tiers);
        assert!(errors.is_empty());
        assert!(warnings[0].message.contains("more than once"));
    }

    #[test]
    fn test_default_tiers_are_clean() {
        let (errors, warnings) = validate_city_tiers(&CityTierConfig::default());
        assert!(errors.is_empty());
        assert!(warnings.is_empty());
    }
}
