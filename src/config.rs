// In: src/config.rs

//! The single source of truth for reduction configuration.
//!
//! `ReductionConfig` is created once at the call site (directly, or from a
//! JSON document with `from_json_str`) and passed by reference into the
//! missing-aware reductions of `stats`. Every field has a serde default, so a
//! partial document such as `{"missing": "skip"}` is a complete config.

use serde::{Deserialize, Serialize};

use crate::error::NumericsError;

//==================================================================================
// I. Core Configuration Enums
//==================================================================================

/// Selects the floating-point summation algorithm.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SummationCompensation {
    /// **Default:** Plain left-to-right accumulation.
    #[default]
    None,

    /// Kahan–Babuška–Neumaier compensated summation. Stays accurate when
    /// addends have widely different magnitudes.
    KahanBabushkaNeumaier,

    /// **Reserved:** classic Kahan summation. Rejected with `Unsupported`.
    KahanBabushka,

    /// **Reserved:** pairwise summation. Rejected with `Unsupported`.
    Pairwise,
}

impl SummationCompensation {
    pub fn is_implemented(self) -> bool {
        matches!(
            self,
            SummationCompensation::None | SummationCompensation::KahanBabushkaNeumaier
        )
    }
}

/// What a reduction over a wrapper sequence does with missing elements.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// **Default:** Any missing element makes the result missing.
    #[default]
    Propagate,

    /// Missing elements are dropped before reducing.
    Skip,
}

//==================================================================================
// II. The Unified ReductionConfig
//==================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct ReductionConfig {
    /// Summation algorithm for float sums and everything built on them.
    #[serde(default)]
    pub compensation: SummationCompensation,

    #[serde(default)]
    pub missing: MissingPolicy,

    /// Under `MissingPolicy::Skip`, a reduction with fewer present values than
    /// this returns missing. Zero lets the sum of nothing be zero.
    #[serde(default = "default_min_count")]
    pub min_count: usize,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            compensation: SummationCompensation::default(),
            missing: MissingPolicy::default(),
            min_count: default_min_count(),
        }
    }
}

impl ReductionConfig {
    /// Parses a JSON document. Absent fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, NumericsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_compensation(mut self, compensation: SummationCompensation) -> Self {
        self.compensation = compensation;
        self
    }

    pub fn with_missing(mut self, missing: MissingPolicy) -> Self {
        self.missing = missing;
        self
    }

    /// Fails with `Unsupported` for a reserved compensation mode.
    pub fn validate(&self) -> Result<(), NumericsError> {
        if !self.compensation.is_implemented() {
            log::debug!("rejecting reserved compensation mode {:?}", self.compensation);
            return Err(NumericsError::Unsupported(format!(
                "Summation compensation {:?} is reserved and not implemented",
                self.compensation
            )));
        }
        Ok(())
    }
}

/// Helper for `serde` to provide a default for `min_count`.
fn default_min_count() -> usize {
    0
}

//==================================================================================
// III. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReductionConfig::default();
        assert_eq!(config.compensation, SummationCompensation::None);
        assert_eq!(config.missing, MissingPolicy::Propagate);
        assert_eq!(config.min_count, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = ReductionConfig::from_json_str(r#"{"missing": "skip"}"#).unwrap();
        assert_eq!(config.missing, MissingPolicy::Skip);
        assert_eq!(config.compensation, SummationCompensation::None);

        let config = ReductionConfig::from_json_str(
            r#"{"compensation": "kahan_babushka_neumaier", "min_count": 2}"#,
        )
        .unwrap();
        assert_eq!(
            config.compensation,
            SummationCompensation::KahanBabushkaNeumaier
        );
        assert_eq!(config.min_count, 2);
    }

    #[test]
    fn test_round_trip_uses_snake_case() {
        let config = ReductionConfig::default().with_missing(MissingPolicy::Skip);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(
            json,
            r#"{"compensation":"none","missing":"skip","min_count":0}"#
        );
        assert_eq!(ReductionConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_reserved_modes_are_rejected() {
        for mode in [SummationCompensation::KahanBabushka, SummationCompensation::Pairwise] {
            let config = ReductionConfig::default().with_compensation(mode);
            assert!(matches!(
                config.validate(),
                Err(NumericsError::Unsupported(_))
            ));
        }
        assert!(ReductionConfig::from_json_str(r#"{"compensation": "fast"}"#).is_err());
    }
}
