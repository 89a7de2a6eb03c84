//! Assembler configuration.
//!
//! The defaults reproduce the historical behavior of the condition builder:
//! falsy values are absent, nested predicates are always emitted, and day
//! boundaries are computed in the local time zone.

use serde::{Deserialize, Serialize};

use crate::range::Zone;
use crate::value::Literal;

/// Rule deciding whether a supplied filter value produces a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    /// Empty strings, zero and NaN count as absent.
    #[default]
    Truthy,
    /// Any supplied value is present, including `0` and `""`.
    Defined,
}

impl Presence {
    /// Applies the rule to a literal.
    pub fn admits(self, value: &Literal) -> bool {
        match self {
            Presence::Truthy => value.is_truthy(),
            Presence::Defined => true,
        }
    }

    /// Applies the rule to a string.
    pub fn admits_str(self, value: &str) -> bool {
        match self {
            Presence::Truthy => !value.is_empty(),
            Presence::Defined => true,
        }
    }
}

/// Rule for nested predicates whose children are all absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NestedPolicy {
    /// Emit the nested key with an empty inner document.
    #[default]
    Always,
    /// Omit the nested key entirely.
    OmitEmpty,
}

/// Configuration shared by both construction styles.
///
/// Deserializes from any serde format with every field optional:
///
/// ```
/// use whereabouts::{AssemblerConfig, NestedPolicy, Presence, Zone};
///
/// let config: AssemblerConfig = serde_json::from_str(r#"{"presence": "defined"}"#).unwrap();
/// assert_eq!(config.presence, Presence::Defined);
/// assert_eq!(config.nested, NestedPolicy::Always);
/// assert_eq!(config.zone, Zone::Local);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssemblerConfig {
    pub presence: Presence,
    pub nested: NestedPolicy,
    pub zone: Zone,
}

impl AssemblerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the presence rule.
    pub fn presence(mut self, presence: Presence) -> Self {
        self.presence = presence;
        self
    }

    /// Sets the nested policy.
    pub fn nested(mut self, nested: NestedPolicy) -> Self {
        self.nested = nested;
        self
    }

    /// Sets the zone used for day boundaries.
    pub fn zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn defaults_match_historical_behavior() {
        let config = AssemblerConfig::default();
        assert_eq!(config.presence, Presence::Truthy);
        assert_eq!(config.nested, NestedPolicy::Always);
        assert_eq!(config.zone, Zone::Local);
    }

    #[test]
    fn presence_rules() {
        assert!(!Presence::Truthy.admits(&Literal::from(0i64)));
        assert!(Presence::Defined.admits(&Literal::from(0i64)));
        assert!(!Presence::Truthy.admits_str(""));
        assert!(Presence::Defined.admits_str(""));
        assert!(Presence::Truthy.admits_str("a"));
    }

    #[test]
    fn deserializes_from_yaml() {
        let yaml = "presence: defined\nnested: omit_empty\nzone: \"+02:00\"\n";
        let config: AssemblerConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config,
            AssemblerConfig::new()
                .presence(Presence::Defined)
                .nested(NestedPolicy::OmitEmpty)
                .zone(Zone::Fixed(FixedOffset::east_opt(7200).unwrap()))
        );
    }

    #[test]
    fn rejects_bad_zone() {
        let err = serde_json::from_str::<AssemblerConfig>(r#"{"zone": "mars"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid time zone"));

        let err = serde_json::from_str::<AssemblerConfig>(r#"{"zone": "-1é2"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid time zone '-1é2'"));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(serde_json::from_str::<AssemblerConfig>(r#"{"timezone": "utc"}"#).is_err());
    }

    #[test]
    fn serializes_round_trip() {
        let config = AssemblerConfig::new().zone(Zone::Utc);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(
            json,
            r#"{"presence":"truthy","nested":"always","zone":"utc"}"#
        );
        assert_eq!(serde_json::from_str::<AssemblerConfig>(&json).unwrap(), config);
    }
}
