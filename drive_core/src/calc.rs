//! # Recompute Engine
//!
//! [`Calc`] holds the bound inputs and outputs by name and rewrites every
//! output from the current input values on each [`Calc::recalc`]. The
//! changed-field name is accepted for the trace log but never used to
//! prune work: recomputation is always full, and idempotent for unchanged
//! inputs.
//!
//! Construction does not check that the required names are present; a
//! missing name surfaces as [`crate::errors::CalcError::MissingInput`]
//! only when `recalc` dereferences it.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use crate::binding::{BoundInput, BoundOutput};
use crate::calculations::gearbox::{self, GearboxInput};
use crate::errors::{CalcError, CalcResult};

/// Logical field names the engine reads and writes.
///
/// These key the engine's maps; the kebab-case element names and ids of
/// the host form live in the frontend bootstrap.
pub mod field {
    // Inputs
    pub const MOTOR_RPM: &str = "motor_rpm";
    pub const MOTOR_KW: &str = "motor_kw";
    pub const MOTOR_PULLEY: &str = "motor_pulley";
    pub const GEARBOX_PULLEY: &str = "gearbox_pulley";
    pub const IEX: &str = "iex";
    pub const T2N: &str = "t2n";
    pub const P1N: &str = "p1n";
    pub const N1: &str = "n1";
    pub const PG1: &str = "pg1";
    pub const AMBIENT_TEMP: &str = "ambient_temp";
    pub const OP_CYCLE: &str = "op_cycle";

    // Outputs
    pub const SAFETY_FACTOR: &str = "safety_factor";
    pub const THERMAL: &str = "thermal";
    pub const GEARBOX_INPUT_RPM: &str = "gearbox_input_rpm";
    pub const GEARBOX_OUTPUT_RPM: &str = "gearbox_output_rpm";
    pub const GEARBOX_OUTPUT_TORQUE: &str = "gearbox_output_torque";

    /// All input keys, in bootstrap order
    pub const INPUTS: [&str; 11] = [
        MOTOR_RPM,
        MOTOR_KW,
        MOTOR_PULLEY,
        GEARBOX_PULLEY,
        IEX,
        T2N,
        P1N,
        N1,
        PG1,
        AMBIENT_TEMP,
        OP_CYCLE,
    ];

    /// All output keys, in recompute write order
    pub const OUTPUTS: [&str; 5] = [
        SAFETY_FACTOR,
        THERMAL,
        GEARBOX_INPUT_RPM,
        GEARBOX_OUTPUT_RPM,
        GEARBOX_OUTPUT_TORQUE,
    ];
}

/// The recompute engine over the bound form fields.
pub struct Calc {
    inputs: HashMap<String, Rc<BoundInput>>,
    outputs: HashMap<String, BoundOutput>,
}

impl Calc {
    /// Store the input and output maps. Nothing is validated here; missing
    /// names fail at dereference time.
    pub fn new(inputs: HashMap<String, Rc<BoundInput>>, outputs: HashMap<String, BoundOutput>) -> Self {
        Calc { inputs, outputs }
    }

    fn input(&self, name: &str) -> CalcResult<f64> {
        self.inputs
            .get(name)
            .map(|input| input.value())
            .ok_or_else(|| CalcError::missing_input(name))
    }

    fn output(&self, name: &str) -> CalcResult<&BoundOutput> {
        self.outputs
            .get(name)
            .ok_or_else(|| CalcError::missing_input(name))
    }

    /// Current input values as one calculation input.
    pub fn snapshot(&self) -> CalcResult<GearboxInput> {
        Ok(GearboxInput {
            motor_rpm: self.input(field::MOTOR_RPM)?,
            motor_kw: self.input(field::MOTOR_KW)?,
            motor_pulley_in: self.input(field::MOTOR_PULLEY)?,
            gearbox_pulley_in: self.input(field::GEARBOX_PULLEY)?,
            iex: self.input(field::IEX)?,
            t2n_knm: self.input(field::T2N)?,
            p1n_kw: self.input(field::P1N)?,
            n1_rpm: self.input(field::N1)?,
            pg1_kw: self.input(field::PG1)?,
            ambient_temp_c: self.input(field::AMBIENT_TEMP)?,
            op_cycle_pct: self.input(field::OP_CYCLE)?,
        })
    }

    /// Recompute every output from the current input values.
    ///
    /// `changed` names the edited field when the recompute was triggered by
    /// an edit; it is logged and otherwise unused.
    pub fn recalc(&self, changed: Option<&str>) -> CalcResult<()> {
        debug!(changed = changed.unwrap_or("<initial>"), "recalc");

        let result = gearbox::calculate(&self.snapshot()?);

        self.output(field::SAFETY_FACTOR)?.change(result.safety_factor);
        self.output(field::THERMAL)?.change(result.thermal);
        self.output(field::GEARBOX_INPUT_RPM)?.change(result.gearbox_input_rpm);
        self.output(field::GEARBOX_OUTPUT_RPM)?.change(result.gearbox_output_rpm);
        self.output(field::GEARBOX_OUTPUT_TORQUE)?
            .change(result.gearbox_output_torque_knm);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::gearbox::calculate;
    use crate::form::Document;

    /// Defaults from the application bootstrap
    const DEFAULTS: [(&str, f64); 11] = [
        (field::MOTOR_RPM, 1750.0),
        (field::MOTOR_KW, 37.3),
        (field::MOTOR_PULLEY, 7.5),
        (field::GEARBOX_PULLEY, 9.75),
        (field::IEX, 40.781),
        (field::T2N, 31.0),
        (field::P1N, 115.0),
        (field::N1, 1450.0),
        (field::PG1, 37.0),
        (field::AMBIENT_TEMP, 30.0),
        (field::OP_CYCLE, 20.0),
    ];

    fn engine() -> (Document, Rc<Calc>) {
        let mut doc = Document::new();
        for (key, _) in DEFAULTS {
            doc = doc.with_field(key, key, "");
        }
        for key in field::OUTPUTS {
            doc = doc.with_field(key, "", "-");
        }

        let mut inputs = HashMap::new();
        for (key, default) in DEFAULTS {
            inputs.insert(
                key.to_string(),
                Rc::new(BoundInput::bind(&doc, key, default).unwrap()),
            );
        }
        let mut outputs = HashMap::new();
        for key in field::OUTPUTS {
            outputs.insert(key.to_string(), BoundOutput::by_id(&doc, key, "-").unwrap());
        }
        (doc, Rc::new(Calc::new(inputs, outputs)))
    }

    fn output_text(doc: &Document, key: &str) -> String {
        doc.element_by_id(key).unwrap().value()
    }

    #[test]
    fn test_initial_recalc_populates_every_output() {
        let (doc, calc) = engine();
        calc.recalc(None).unwrap();

        assert_eq!(output_text(&doc, field::THERMAL), "PASS");
        let input_rpm: f64 = output_text(&doc, field::GEARBOX_INPUT_RPM).parse().unwrap();
        assert!((input_rpm - 1346.1538461538462).abs() < 1e-9);
        let output_rpm: f64 = output_text(&doc, field::GEARBOX_OUTPUT_RPM).parse().unwrap();
        assert!((output_rpm - 33.0093).abs() < 1e-3);
        let sf: f64 = output_text(&doc, field::SAFETY_FACTOR).parse().unwrap();
        assert!((sf - 2.8729).abs() < 1e-3);
        let torque: f64 = output_text(&doc, field::GEARBOX_OUTPUT_TORQUE).parse().unwrap();
        assert!((torque - 10.7904).abs() < 1e-3);
    }

    #[test]
    fn test_recalc_is_full_not_incremental() {
        let (doc, calc) = engine();
        calc.recalc(None).unwrap();

        // Seed every output with a marker, then claim only one input changed:
        // every marker must still be overwritten.
        for key in field::OUTPUTS {
            doc.element_by_id(key).unwrap().set_value("stale");
        }
        calc.recalc(Some(field::MOTOR_RPM)).unwrap();
        for key in field::OUTPUTS {
            assert_ne!(output_text(&doc, key), "stale", "{key} not rewritten");
        }
    }

    #[test]
    fn test_recalc_idempotent() {
        let (doc, calc) = engine();
        calc.recalc(None).unwrap();
        let first: Vec<String> = field::OUTPUTS
            .iter()
            .map(|key| output_text(&doc, key))
            .collect();

        calc.recalc(None).unwrap();
        let second: Vec<String> = field::OUTPUTS
            .iter()
            .map(|key| output_text(&doc, key))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_edit_flows_through_subscription() {
        let (doc, calc) = engine();
        calc.recalc(None).unwrap();

        let handler: crate::binding::ChangeHandler = {
            let calc = Rc::downgrade(&calc);
            Rc::new(move |name: &str| {
                if let Some(calc) = calc.upgrade() {
                    calc.recalc(Some(name)).unwrap();
                }
            })
        };
        for input in calc.inputs.values() {
            input.subscribe(Rc::clone(&handler));
        }

        // Halving the gearbox pulley doubles the belt-stage output
        calc.inputs[field::GEARBOX_PULLEY].on_change("4.875");
        let input_rpm: f64 = output_text(&doc, field::GEARBOX_INPUT_RPM).parse().unwrap();
        assert!((input_rpm - 2692.3076923076924).abs() < 1e-9);
    }

    #[test]
    fn test_missing_input_surfaces_at_dereference() {
        let (_, calc) = engine();
        let mut inputs = calc.inputs.clone();
        inputs.remove(field::IEX);
        let outputs = HashMap::new();
        let broken = Calc::new(inputs, outputs);

        let err = broken.recalc(None).unwrap_err();
        assert_eq!(err, CalcError::missing_input(field::IEX));
    }

    #[test]
    fn test_snapshot_matches_pure_calculation() {
        let (doc, calc) = engine();
        calc.recalc(None).unwrap();

        let snapshot = calc.snapshot().unwrap();
        let result = calculate(&snapshot);
        let displayed: f64 = output_text(&doc, field::SAFETY_FACTOR).parse().unwrap();
        assert_eq!(displayed, result.safety_factor);
    }
}
