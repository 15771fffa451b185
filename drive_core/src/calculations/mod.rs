//! # Drive Calculations
//!
//! Pure calculation layer. Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> *Result` - Pure calculation function
//!
//! The gearbox sizing formulas carry no validation: degenerate inputs
//! (zero pulley diameter, NaN from a non-numeric edit) flow through IEEE
//! arithmetic, and chart misses surface as sentinel results.
//!
//! ## Available Calculations
//!
//! - [`gearbox`] - Motor/gearbox sizing figures and thermal check

pub mod gearbox;

pub use gearbox::{calculate, GearboxInput, GearboxResult, ThermalRating};
