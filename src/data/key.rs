use serde::Deserialize;

// ---------------------------------------------------------------------------
// Step-size key formatting
// ---------------------------------------------------------------------------

/// How a step size is turned into the key used by the derivative categories.
///
/// The policy must match whatever wrote `plots.json`; a mismatch does not
/// fail, the series simply isn't found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyFormat {
    /// Six decimal places with trailing zeros removed: `0.2`, `0.000123`, `1`.
    /// This is the form the results producer writes.
    #[default]
    Trimmed,
    /// Shortest round-trip form: `0.2`, `0.0001234`, `1`.
    Shortest,
    /// Exactly six decimal places: `0.200000`.
    Fixed6,
}

impl KeyFormat {
    pub fn format(self, h: f64) -> String {
        match self {
            KeyFormat::Trimmed => {
                let fixed = format!("{h:.6}");
                fixed.trim_end_matches('0').trim_end_matches('.').to_string()
            }
            KeyFormat::Shortest => format!("{h}"),
            KeyFormat::Fixed6 => format!("{h:.6}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trimmed_matches_producer_keys() {
        assert_eq!(KeyFormat::Trimmed.format(0.2), "0.2");
        assert_eq!(KeyFormat::Trimmed.format(0.05), "0.05");
        assert_eq!(KeyFormat::Trimmed.format(1.0), "1");
        assert_eq!(KeyFormat::Trimmed.format(10.0), "10");
        assert_eq!(KeyFormat::Trimmed.format(0.0), "0");
        assert_eq!(KeyFormat::Trimmed.format(0.0001234), "0.000123");
    }

    #[test]
    fn shortest_keeps_every_digit() {
        assert_eq!(KeyFormat::Shortest.format(0.2), "0.2");
        assert_eq!(KeyFormat::Shortest.format(1.0), "1");
        assert_eq!(KeyFormat::Shortest.format(0.0001234), "0.0001234");
    }

    #[test]
    fn fixed6_always_has_six_decimals() {
        for h in [0.2, 0.05, 1.0, 123456.789, 1e-9, 0.0] {
            let key = KeyFormat::Fixed6.format(h);
            let (_, decimals) = key.split_once('.').expect("decimal point");
            assert_eq!(decimals.len(), 6, "{key}");
        }
        assert_eq!(KeyFormat::Fixed6.format(0.2), "0.200000");
    }

    #[test]
    fn formatting_is_deterministic() {
        for policy in [KeyFormat::Trimmed, KeyFormat::Shortest, KeyFormat::Fixed6] {
            assert_eq!(policy.format(0.05), policy.format(0.05));
        }
    }

    #[test]
    fn deserializes_lowercase_names() {
        let f: KeyFormat = serde_json::from_str("\"fixed6\"").unwrap();
        assert_eq!(f, KeyFormat::Fixed6);
        let s: KeyFormat = serde_json::from_str("\"shortest\"").unwrap();
        assert_eq!(s, KeyFormat::Shortest);
        let t: KeyFormat = serde_json::from_str("\"trimmed\"").unwrap();
        assert_eq!(t, KeyFormat::Trimmed);
    }
}
