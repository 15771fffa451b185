//! # Gearbox Sizing Calculation
//!
//! Derives the gearbox sizing figures from the motor and gearbox catalog
//! data: belt-stage input speed, service/safety factor, output speed and
//! torque, and a thermal pass/fail check against the capacity charts.
//!
//! ## Formulas
//!
//! ```text
//! n_in  = n_motor × d_motor / d_gearbox
//! SF    = (T2N × 1000) / ((P1 × 1000 × 9.5493 / n_in) × i_ex)
//! n_out = n_in / i_ex
//! T_out = T2N / SF
//! ```
//!
//! The thermal check scales the catalog thermal rating P1N to the actual
//! input speed, derates it by the duty and utilization chart factors, and
//! compares the result against the installed motor power.
//!
//! ## Example
//!
//! ```rust
//! use drive_core::calculations::gearbox::{calculate, GearboxInput};
//!
//! let result = calculate(&GearboxInput::default());
//! assert!((result.gearbox_input_rpm - 1346.1538).abs() < 1e-3);
//! assert!(result.thermal.passes());
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::charts::{self, AmbientTemp};

/// Torque constant: P (kW) × 1000 × 9.5493 / n (rpm) gives shaft torque in
/// N·m (9.5493 ≈ 60 / 2π).
pub const TORQUE_CONSTANT: f64 = 9.5493;

/// kN·m → N·m, kW → W
pub const KILO: f64 = 1000.0;

/// Input parameters for a gearbox sizing run.
///
/// All values arrive as raw numbers from the bound form fields; a field
/// holding non-numeric text contributes NaN.
///
/// ## JSON Example
///
/// ```json
/// {
///   "motor_rpm": 1750.0,
///   "motor_kw": 37.3,
///   "motor_pulley_in": 7.5,
///   "gearbox_pulley_in": 9.75,
///   "iex": 40.781,
///   "t2n_knm": 31.0,
///   "p1n_kw": 115.0,
///   "n1_rpm": 1450.0,
///   "pg1_kw": 37.0,
///   "ambient_temp_c": 30.0,
///   "op_cycle_pct": 20.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearboxInput {
    /// Motor nameplate speed (rpm)
    pub motor_rpm: f64,

    /// Installed motor power P1 (kW)
    pub motor_kw: f64,

    /// Motor pulley diameter (in)
    pub motor_pulley_in: f64,

    /// Gearbox pulley diameter (in)
    pub gearbox_pulley_in: f64,

    /// Exact gearbox reduction ratio i_ex
    pub iex: f64,

    /// Catalog nominal output torque T2N (kN·m)
    pub t2n_knm: f64,

    /// Catalog thermal rating P1N at reference speed (kW)
    pub p1n_kw: f64,

    /// Reference input speed n1 for the thermal rating (rpm)
    pub n1_rpm: f64,

    /// Catalog thermal capacity PG1 (kW)
    pub pg1_kw: f64,

    /// Ambient temperature (°C); must hit a chart row exactly
    pub ambient_temp_c: f64,

    /// Operating cycle (% of each hour under load)
    pub op_cycle_pct: f64,
}

impl Default for GearboxInput {
    fn default() -> Self {
        GearboxInput {
            motor_rpm: 1750.0,
            motor_kw: 37.3,
            motor_pulley_in: 7.5,
            gearbox_pulley_in: 9.75,
            iex: 40.781,
            t2n_knm: 31.0,
            p1n_kw: 115.0,
            n1_rpm: 1450.0,
            pg1_kw: 37.0,
            ambient_temp_c: 30.0,
            op_cycle_pct: 20.0,
        }
    }
}

impl GearboxInput {
    /// Gearbox input speed after the belt stage (rpm)
    pub fn gearbox_input_rpm(&self) -> f64 {
        (self.motor_rpm * self.motor_pulley_in) / self.gearbox_pulley_in
    }

    /// Safety factor: catalog torque over the torque the motor delivers at
    /// the gearbox output.
    pub fn safety_factor(&self) -> f64 {
        (self.t2n_knm * KILO)
            / (((self.motor_kw * KILO * TORQUE_CONSTANT) / self.gearbox_input_rpm()) * self.iex)
    }

    /// Output shaft speed (rpm)
    pub fn gearbox_output_rpm(&self) -> f64 {
        self.gearbox_input_rpm() / self.iex
    }

    /// Output torque actually demanded (kN·m)
    pub fn gearbox_output_torque_knm(&self) -> f64 {
        self.t2n_knm / self.safety_factor()
    }

    /// Thermal rating P1N scaled from the reference speed n1 to the actual
    /// input speed (kW)
    pub fn actual_p1n_kw(&self) -> f64 {
        (self.p1n_kw / self.n1_rpm) * self.gearbox_input_rpm()
    }

    /// Thermal pass/fail check.
    ///
    /// Both chart misses (ambient temperature off the chart, operating
    /// cycle above every head value) short-circuit to FAIL. A utilization
    /// lookup miss contributes the -1 sentinel, which drives the test power
    /// negative and fails the comparison.
    pub fn thermal(&self) -> ThermalRating {
        let ambient = match AmbientTemp::from_value(self.ambient_temp_c) {
            Some(ambient) => ambient,
            None => {
                debug!(ambient = self.ambient_temp_c, "ambient temperature not in duty chart");
                return ThermalRating::Fail;
            }
        };
        let ft = match charts::duty_factor(ambient, self.op_cycle_pct) {
            Some(ft) => ft,
            None => {
                debug!(op_cycle = self.op_cycle_pct, "operating cycle exceeds every chart head");
                return ThermalRating::Fail;
            }
        };

        let utilization = self.motor_kw / self.actual_p1n_kw();
        let test_p1 = self.pg1_kw * ft * charts::utilization_factor(utilization);
        if test_p1 >= self.motor_kw {
            ThermalRating::Pass
        } else {
            ThermalRating::Fail
        }
    }
}

/// Outcome of the thermal check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThermalRating {
    /// Derated thermal capacity covers the installed motor power
    #[serde(rename = "PASS")]
    Pass,

    /// Chart miss, or capacity below the installed motor power
    #[serde(rename = "FAIL")]
    Fail,
}

impl ThermalRating {
    /// True for [`ThermalRating::Pass`]
    pub fn passes(&self) -> bool {
        matches!(self, ThermalRating::Pass)
    }

    /// Display string, as written into the output field
    pub fn as_str(&self) -> &'static str {
        match self {
            ThermalRating::Pass => "PASS",
            ThermalRating::Fail => "FAIL",
        }
    }
}

impl std::fmt::Display for ThermalRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Results of a gearbox sizing run.
///
/// ## JSON Example
///
/// ```json
/// {
///   "gearbox_input_rpm": 1346.15,
///   "safety_factor": 2.87,
///   "gearbox_output_rpm": 33.01,
///   "gearbox_output_torque_knm": 10.79,
///   "thermal": "PASS"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearboxResult {
    /// Input speed after the belt stage (rpm)
    pub gearbox_input_rpm: f64,

    /// Safety factor against the catalog torque
    pub safety_factor: f64,

    /// Output shaft speed (rpm)
    pub gearbox_output_rpm: f64,

    /// Demanded output torque (kN·m)
    pub gearbox_output_torque_knm: f64,

    /// Thermal check outcome
    pub thermal: ThermalRating,
}

/// Derive every output figure from the current inputs.
///
/// Pure and idempotent: the same input produces the same result on every
/// call.
pub fn calculate(input: &GearboxInput) -> GearboxResult {
    GearboxResult {
        gearbox_input_rpm: input.gearbox_input_rpm(),
        safety_factor: input.safety_factor(),
        gearbox_output_rpm: input.gearbox_output_rpm(),
        gearbox_output_torque_knm: input.gearbox_output_torque_knm(),
        thermal: input.thermal(),
    }
}
