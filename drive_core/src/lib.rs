//! # drive_core - Gearbox Drive Sizing Engine
//!
//! `drive_core` is the computational heart of Drivesize: it keeps a set of
//! named output fields consistent with a set of named input fields through
//! a chain of pure sizing formulas and two capacity-chart lookups.
//!
//! ## Design Philosophy
//!
//! - **Pure core**: the sizing formulas are stateless functions over a
//!   serializable input snapshot
//! - **Explicit wiring**: bindings are constructed fallibly and the
//!   recompute callback is injected by the bootstrap, not registered in
//!   process-wide state
//! - **Sentinels over errors**: chart lookup misses come back as FAIL or
//!   -1, never as `Err`
//!
//! ## Quick Start
//!
//! ```rust
//! use drive_core::calculations::gearbox::{calculate, GearboxInput};
//!
//! let result = calculate(&GearboxInput::default());
//! assert!(result.thermal.passes());
//!
//! // All inputs and results are JSON-serializable
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("safety_factor"));
//! ```
//!
//! ## Modules
//!
//! - [`form`] - In-process form document the frontend owns
//! - [`binding`] - Named input/output field bindings
//! - [`calc`] - The full-recompute engine over the bound fields
//! - [`calculations`] - Pure gearbox sizing formulas
//! - [`charts`] - Fixed duty and utilization chart data
//! - [`errors`] - Structured error types

pub mod binding;
pub mod calc;
pub mod calculations;
pub mod charts;
pub mod errors;
pub mod form;

// Re-export commonly used types at crate root for convenience
pub use binding::{BoundInput, BoundOutput, ChangeHandler};
pub use calc::Calc;
pub use calculations::{calculate, GearboxInput, GearboxResult, ThermalRating};
pub use errors::{CalcError, CalcResult};
