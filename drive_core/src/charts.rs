//! # Thermal Capacity Charts
//!
//! Fixed manufacturer chart data used by the thermal pass/fail check.
//!
//! ## Overview
//!
//! Two lookups feed the thermal check:
//!
//! ```text
//! P1_test = PG1 × f_t × f_u
//! ```
//!
//! where `f_t` is the duty factor (ambient temperature × duty cycle) and
//! `f_u` is the utilization factor (motor loading ratio).
//!
//! ## Duty Factor Chart
//!
//! | Ambient | 100% | 80%  | 60%  | 40%  | 20%  |
//! |---------|------|------|------|------|------|
//! | 10 °C   | 1.14 | 1.20 | 1.32 | 1.54 | 2.04 |
//! | 20 °C   | 1.00 | 1.06 | 1.16 | 1.35 | 1.79 |
//! | 30 °C   | 0.87 | 0.93 | 1.00 | 1.18 | 1.56 |
//! | 40 °C   | 0.71 | 0.75 | 0.82 | 0.96 | 1.27 |
//! | 50 °C   | 0.55 | 0.58 | 0.64 | 0.74 | 0.98 |
//!
//! Rows are keyed by exact ambient temperature, no interpolation. Column
//! selection takes the smallest duty-cycle head that still covers the
//! requested operating cycle.
//!
//! ## Lookup Misses
//!
//! Chart misses are sentinel results, never errors: the duty lookups return
//! `None` and the utilization lookup returns [`UTILIZATION_SENTINEL`].
//! Callers check the sentinel instead of matching an error variant.

use serde::{Deserialize, Serialize};

/// Utilization chart: `(threshold, factor)` pairs, ascending by threshold.
///
/// The factor for a loading ratio is the factor of the first pair whose
/// threshold strictly exceeds it.
pub const UTILIZATION_CHART: [(f64, f64); 7] = [
    (0.35, 0.66),
    (0.45, 0.77),
    (0.55, 0.83),
    (0.65, 0.90),
    (0.75, 0.90),
    (0.85, 0.95),
    (0.95, 1.00),
];

/// Returned by [`utilization_factor`] when the loading ratio is at or above
/// the highest chart bucket (≥ 0.95).
pub const UTILIZATION_SENTINEL: f64 = -1.0;

/// Duty-cycle head values (% of each hour under load), descending.
pub const DUTY_HEAD: [f64; 5] = [100.0, 80.0, 60.0, 40.0, 20.0];

/// Look up the utilization factor for a motor loading ratio.
///
/// Returns [`UTILIZATION_SENTINEL`] when the ratio exceeds every chart
/// bucket. A NaN ratio compares false against every threshold and also
/// yields the sentinel.
///
/// ```rust
/// use drive_core::charts::{utilization_factor, UTILIZATION_SENTINEL};
///
/// assert_eq!(utilization_factor(0.50), 0.83);
/// assert_eq!(utilization_factor(0.96), UTILIZATION_SENTINEL);
/// ```
pub fn utilization_factor(utilization: f64) -> f64 {
    for (threshold, factor) in UTILIZATION_CHART {
        if utilization < threshold {
            return factor;
        }
    }
    UTILIZATION_SENTINEL
}

/// Ambient temperature chart key.
///
/// The chart carries exactly five rows; any other temperature is a lookup
/// miss, not a candidate for interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AmbientTemp {
    /// 10 °C row
    C10,
    /// 20 °C row
    C20,
    /// 30 °C row
    #[default]
    C30,
    /// 40 °C row
    C40,
    /// 50 °C row
    C50,
}

impl AmbientTemp {
    /// All chart rows for UI selection
    pub const ALL: [AmbientTemp; 5] = [
        AmbientTemp::C10,
        AmbientTemp::C20,
        AmbientTemp::C30,
        AmbientTemp::C40,
        AmbientTemp::C50,
    ];

    /// Ambient temperature of this row in °C
    pub fn degrees_c(&self) -> f64 {
        match self {
            AmbientTemp::C10 => 10.0,
            AmbientTemp::C20 => 20.0,
            AmbientTemp::C30 => 30.0,
            AmbientTemp::C40 => 40.0,
            AmbientTemp::C50 => 50.0,
        }
    }

    /// Resolve a raw temperature input to a chart row.
    ///
    /// Exact match only: 25 °C is `None`, not an interpolation between the
    /// 20 and 30 rows.
    pub fn from_value(value: f64) -> Option<AmbientTemp> {
        AmbientTemp::ALL.iter().copied().find(|t| t.degrees_c() == value)
    }

    /// Duty factors for this row, one per [`DUTY_HEAD`] column
    pub fn duty_row(&self) -> [f64; 5] {
        match self {
            AmbientTemp::C10 => [1.14, 1.20, 1.32, 1.54, 2.04],
            AmbientTemp::C20 => [1.00, 1.06, 1.16, 1.35, 1.79],
            AmbientTemp::C30 => [0.87, 0.93, 1.00, 1.18, 1.56],
            AmbientTemp::C40 => [0.71, 0.75, 0.82, 0.96, 1.27],
            AmbientTemp::C50 => [0.55, 0.58, 0.64, 0.74, 0.98],
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            AmbientTemp::C10 => "10 °C",
            AmbientTemp::C20 => "20 °C",
            AmbientTemp::C30 => "30 °C",
            AmbientTemp::C40 => "40 °C",
            AmbientTemp::C50 => "50 °C",
        }
    }
}

impl std::fmt::Display for AmbientTemp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Look up the duty factor for an ambient row and operating cycle.
///
/// Scans the heads from the smallest upward and takes the first head that
/// still covers `op_cycle_pct`. `None` when the operating cycle exceeds
/// every head value (> 100%), or when it is NaN.
///
/// ```rust
/// use drive_core::charts::{duty_factor, AmbientTemp};
///
/// assert_eq!(duty_factor(AmbientTemp::C30, 20.0), Some(1.56));
/// assert_eq!(duty_factor(AmbientTemp::C30, 150.0), None);
/// ```
pub fn duty_factor(ambient: AmbientTemp, op_cycle_pct: f64) -> Option<f64> {
    let row = ambient.duty_row();
    for i in (0..DUTY_HEAD.len()).rev() {
        if op_cycle_pct <= DUTY_HEAD[i] {
            return Some(row[i]);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utilization_buckets() {
        assert_eq!(utilization_factor(0.30), 0.66);
        assert_eq!(utilization_factor(0.50), 0.83);
        assert_eq!(utilization_factor(0.70), 0.90);
        assert_eq!(utilization_factor(0.90), 1.00);
    }

    #[test]
    fn test_utilization_threshold_is_strict() {
        // A ratio sitting exactly on a threshold falls into the next bucket
        assert_eq!(utilization_factor(0.35), 0.77);
        assert_eq!(utilization_factor(0.55), 0.90);
    }

    #[test]
    fn test_utilization_sentinel() {
        assert_eq!(utilization_factor(0.95), UTILIZATION_SENTINEL);
        assert_eq!(utilization_factor(0.96), UTILIZATION_SENTINEL);
        assert_eq!(utilization_factor(2.0), UTILIZATION_SENTINEL);
        assert_eq!(utilization_factor(f64::NAN), UTILIZATION_SENTINEL);
    }

    #[test]
    fn test_ambient_exact_match() {
        assert_eq!(AmbientTemp::from_value(30.0), Some(AmbientTemp::C30));
        assert_eq!(AmbientTemp::from_value(10.0), Some(AmbientTemp::C10));
        assert_eq!(AmbientTemp::from_value(25.0), None);
        assert_eq!(AmbientTemp::from_value(f64::NAN), None);
    }

    #[test]
    fn test_duty_factor_smallest_covering_head() {
        // 20% cycle is covered by the 20 head itself
        assert_eq!(duty_factor(AmbientTemp::C30, 20.0), Some(1.56));
        // 25% skips the 20 head, lands on 40
        assert_eq!(duty_factor(AmbientTemp::C30, 25.0), Some(1.18));
        assert_eq!(duty_factor(AmbientTemp::C10, 100.0), Some(1.14));
        assert_eq!(duty_factor(AmbientTemp::C50, 0.0), Some(0.98));
    }

    #[test]
    fn test_duty_factor_miss() {
        assert_eq!(duty_factor(AmbientTemp::C30, 150.0), None);
        assert_eq!(duty_factor(AmbientTemp::C30, 100.1), None);
        assert_eq!(duty_factor(AmbientTemp::C30, f64::NAN), None);
    }

    #[test]
    fn test_row_lengths_match_heads() {
        for ambient in AmbientTemp::ALL {
            assert_eq!(ambient.duty_row().len(), DUTY_HEAD.len());
        }
    }

    #[test]
    fn test_serialization() {
        let ambient = AmbientTemp::C40;
        let json = serde_json::to_string(&ambient).unwrap();
        let roundtrip: AmbientTemp = serde_json::from_str(&json).unwrap();
        assert_eq!(ambient, roundtrip);
    }
}
