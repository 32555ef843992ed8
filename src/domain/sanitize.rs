//! Identifier sanitization for developer (API) names.

use std::sync::LazyLock;

use regex::Regex;

static NON_ALPHANUMERIC_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("static regex"));

/// Convert a display name into an identifier of ASCII letters, digits and
/// single `_` separators, with no leading or trailing `_`.
///
/// Collisions between distinct inputs are not detected.
pub fn developer_name(text: &str) -> String {
    NON_ALPHANUMERIC_RUN
        .replace_all(text, "_")
        .trim_matches('_')
        .to_string()
}

/// Developer name for a multi-segment path (segments joined with `_`).
pub fn developer_name_for<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    let joined: Vec<&str> = segments.into_iter().collect();
    developer_name(&joined.join("_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_apostrophe_and_space_when_sanitizing_then_each_becomes_one_underscore() {
        assert_eq!(developer_name("Men's Mikvah"), "Men_s_Mikvah");
    }

    #[test]
    fn given_runs_and_edges_when_sanitizing_then_collapses_and_trims() {
        assert_eq!(developer_name("  Yahrtzeit/Yizkor -- "), "Yahrtzeit_Yizkor");
        assert_eq!(developer_name("{year} - Tishrei"), "year_Tishrei");
        assert_eq!(developer_name("___"), "");
    }

    #[test]
    fn given_path_segments_when_sanitizing_then_joins_with_single_underscores() {
        assert_eq!(
            developer_name_for(["Kibudim", "Simchas Torah", "Kol Hane'orim"]),
            "Kibudim_Simchas_Torah_Kol_Hane_orim"
        );
        assert_eq!(developer_name_for(["Events", "19 Kislev"]), "Events_19_Kislev");
    }

    #[test]
    fn given_non_ascii_letters_when_sanitizing_then_they_are_separators() {
        assert_eq!(developer_name("Café Fund"), "Caf_Fund");
    }
}
