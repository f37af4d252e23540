//! SDG code catalogue
//!
//! The source data uses sixteen goal codes (`SDG14`, life below water, never
//! appears) plus a synthetic `NONE` bucket for items with no mapping.

/// Goal codes present in the data, in goal-number order
pub const SDG_CODES: [&str; 16] = [
    "SDG1", "SDG2", "SDG3", "SDG4", "SDG5", "SDG6", "SDG7", "SDG8", "SDG9", "SDG10", "SDG11",
    "SDG12", "SDG13", "SDG15", "SDG16", "SDG17",
];

/// Bucket for items not mapped to any goal
pub const NONE_KEY: &str = "NONE";

/// Climate action, the goal tracked by the topic distribution
pub const CLIMATE_ACTION: &str = "SDG13";

/// Traditional Chinese goal titles
const SDG_TITLES: [(&str, &str); 16] = [
    ("SDG1", "消除貧窮"),
    ("SDG2", "消除飢餓"),
    ("SDG3", "良好健康與福祉"),
    ("SDG4", "優質教育"),
    ("SDG5", "性別平等"),
    ("SDG6", "清潔飲水與衛生設施"),
    ("SDG7", "可負擔的潔淨能源"),
    ("SDG8", "尊嚴就業與經濟成長"),
    ("SDG9", "工業、創新與基礎設施"),
    ("SDG10", "減少不平等"),
    ("SDG11", "永續城市與社區"),
    ("SDG12", "負責任的消費與生產"),
    ("SDG13", "氣候行動"),
    ("SDG15", "陸地生態"),
    ("SDG16", "和平、正義與強健制度"),
    ("SDG17", "促進目標的夥伴關係"),
];

/// Whether `key` is one of the known goal codes
#[must_use]
pub fn is_sdg_code(key: &str) -> bool {
    SDG_CODES.contains(&key)
}

/// Whether `key` names a count column: a known goal code or `NONE`
#[must_use]
pub fn is_count_column(key: &str) -> bool {
    key == NONE_KEY || is_sdg_code(key)
}

/// Goal number of a code (`"SDG10"` -> 10), used for natural ordering
#[must_use]
pub fn goal_number(code: &str) -> Option<u8> {
    code.strip_prefix("SDG")?.parse().ok()
}

/// Human readable title for a code, or the code itself when unknown
#[must_use]
pub fn describe(code: &str) -> &str {
    SDG_TITLES
        .iter()
        .find(|(known, _)| *known == code)
        .map_or(code, |(_, title)| title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_skips_life_below_water() {
        assert!(!is_sdg_code("SDG14"));
        assert!(is_sdg_code("SDG17"));
        assert!(is_count_column(NONE_KEY));
        assert!(!is_count_column("科系名稱"));
    }

    #[test]
    fn goal_numbers_sort_naturally() {
        let mut codes = vec!["SDG10", "SDG2", "SDG1"];
        codes.sort_by_key(|code| goal_number(code));
        assert_eq!(codes, vec!["SDG1", "SDG2", "SDG10"]);
        assert_eq!(goal_number("NONE"), None);
    }

    #[test]
    fn describes_known_and_unknown_codes() {
        assert_eq!(describe(CLIMATE_ACTION), "氣候行動");
        assert_eq!(describe("SDG99"), "SDG99");
    }
}
