//! City name normalization and tier lookup

use std::collections::HashSet;

use crate::config::defaults::{DEFAULT_TIER_1_CITIES, DEFAULT_TIER_2_CITIES};
use crate::types::CityTier;

/// Trim surrounding whitespace and title-case a city name.
///
/// A letter is uppercased when it starts the string or follows a non-letter,
/// and lowercased otherwise; non-letters pass through. Case mappings that
/// would expand a letter into several characters are skipped so the result
/// is stable under repeated normalization.
pub fn normalize_city(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_is_letter = false;

    for ch in raw.trim().chars() {
        if ch.is_alphabetic() {
            let mapped = if prev_is_letter {
                single_char(ch.to_lowercase())
            } else {
                single_char(ch.to_uppercase())
            };
            out.push(mapped.unwrap_or(ch));
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }

    out
}

fn single_char(mut mapping: impl Iterator<Item = char>) -> Option<char> {
    let first = mapping.next()?;
    match mapping.next() {
        None => Some(first),
        Some(_) => None,
    }
}

/// Static tier-1 and tier-2 membership lists.
///
/// Entries are stored normalized, so lookups with a normalized city are
/// case- and whitespace-insensitive. Cities in neither list are tier 3.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityTierTable {
    tier_1: HashSet<String>,
    tier_2: HashSet<String>,
}

impl CityTierTable {
    /// Build a table from raw lists; every entry is normalized.
    pub fn new<I, J, S, T>(tier_1: I, tier_2: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            tier_1: tier_1.into_iter().map(|c| normalize_city(c.as_ref())).collect(),
            tier_2: tier_2.into_iter().map(|c| normalize_city(c.as_ref())).collect(),
        }
    }

    /// Tier of a normalized city name. Total: unknown cities are tier 3.
    ///
    /// Tier 1 wins if a name were ever present in both lists.
    pub fn tier_of(&self, city: &str) -> CityTier {
        if self.tier_1.contains(city) {
            CityTier::Tier1
        } else if self.tier_2.contains(city) {
            CityTier::Tier2
        } else {
            CityTier::Tier3
        }
    }

    pub fn tier_1_len(&self) -> usize {
        self.tier_1.len()
    }

    pub fn tier_2_len(&self) -> usize {
        self.tier_2.len()
    }
}

impl Default for CityTierTable {
    fn default() -> Self {
        Self::new(DEFAULT_TIER_1_CITIES, DEFAULT_TIER_2_CITIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_title_cases() {
        assert_eq!(normalize_city(" mumbai "), "Mumbai");
        assert_eq!(normalize_city("NEW DELHI"), "New Delhi");
        assert_eq!(normalize_city("\tthiruvananthapuram\n"), "Thiruvananthapuram");
    }

    #[test]
    fn test_normalize_capitalizes_after_non_letters() {
        assert_eq!(normalize_city("port-blair"), "Port-Blair");
        assert_eq!(normalize_city("o'neil"), "O'Neil");
        assert_eq!(normalize_city("sector 62b"), "Sector 62B");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "",
            "   ",
            " mumbai ",
            "nEw   yORK",
            "straße",
            "İstanbul",
            "ǆemal",
            "123 main st",
            "são paulo",
            "x-y_z.w",
        ];
        for s in samples {
            let once = normalize_city(s);
            assert_eq!(normalize_city(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn test_normalize_empty_after_trim() {
        assert_eq!(normalize_city("   "), "");
    }

    #[test]
    fn test_tier_lookup_defaults() {
        let table = CityTierTable::default();
        assert_eq!(table.tier_of("Mumbai"), CityTier::Tier1);
        assert_eq!(table.tier_of("Bangalore"), CityTier::Tier1);
        assert_eq!(table.tier_of("Jaipur"), CityTier::Tier2);
        assert_eq!(table.tier_of("Siliguri"), CityTier::Tier2);
        assert_eq!(table.tier_of("Shimla"), CityTier::Tier3);
        assert_eq!(table.tier_of(""), CityTier::Tier3);
    }

    #[test]
    fn test_tier_lookup_expects_normalized_input() {
        let table = CityTierTable::default();
        assert_eq!(table.tier_of("mumbai"), CityTier::Tier3);
        assert_eq!(table.tier_of(&normalize_city("mumbai")), CityTier::Tier1);
    }

    #[test]
    fn test_table_normalizes_entries() {
        let table = CityTierTable::new(["  springfield "], ["SHELBYVILLE"]);
        assert_eq!(table.tier_of("Springfield"), CityTier::Tier1);
        assert_eq!(table.tier_of("Shelbyville"), CityTier::Tier2);
    }

    #[test]
    fn test_tier_1_wins_on_overlap() {
        let table = CityTierTable::new(["Pune"], ["Pune"]);
        assert_eq!(table.tier_of("Pune"), CityTier::Tier1);
    }

    #[test]
    fn test_tier_lookup_is_deterministic() {
        let table = CityTierTable::default();
        for city in ["Delhi", "Agra", "Atlantis"] {
            assert_eq!(table.tier_of(city), table.tier_of(city));
        }
    }
}
