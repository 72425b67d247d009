/// Seed value and increment for one input field, chosen by a substring of the
/// feature name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultRule {
    pub pattern: &'static str,
    pub default: f64,
    pub step: f64,
}

/// Checked top to bottom; the first pattern found in the lowercased name wins.
pub const DEFAULT_RULES: &[DefaultRule] = &[
    DefaultRule {
        pattern: "temp",
        default: 25.0,
        step: 0.1,
    },
    DefaultRule {
        pattern: "humid",
        default: 50.0,
        step: 0.1,
    },
    DefaultRule {
        pattern: "press",
        default: 1000.0,
        step: 0.1,
    },
    DefaultRule {
        pattern: "pm",
        default: 20.0,
        step: 1.0,
    },
];

pub const FALLBACK_DEFAULT: f64 = 10.0;
pub const FALLBACK_STEP: f64 = 1.0;

/// Returns `(default, step)` for a feature name.
pub fn default_for(name: &str) -> (f64, f64) {
    let lowered = name.to_lowercase();
    DEFAULT_RULES
        .iter()
        .find(|rule| lowered.contains(rule.pattern))
        .map(|rule| (rule.default, rule.step))
        .unwrap_or((FALLBACK_DEFAULT, FALLBACK_STEP))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_are_case_insensitive() {
        assert_eq!(default_for("Temperature_C"), (25.0, 0.1));
        assert_eq!(default_for("Humidity%"), (50.0, 0.1));
        assert_eq!(default_for("PRESSURE_hPa"), (1000.0, 0.1));
        assert_eq!(default_for("pm2_5"), (20.0, 1.0));
    }

    #[test]
    fn unmatched_name_falls_back() {
        assert_eq!(default_for("wind_speed"), (10.0, 1.0));
        assert_eq!(default_for(""), (10.0, 1.0));
    }

    #[test]
    fn earlier_rule_wins_when_several_match() {
        assert_eq!(default_for("pm_temp_sensor"), (25.0, 0.1));
        assert_eq!(default_for("humid_press"), (50.0, 0.1));
        assert_eq!(default_for("pressure_pm"), (1000.0, 0.1));
    }
}
