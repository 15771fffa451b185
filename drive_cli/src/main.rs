//! # Drivesize CLI Application
//!
//! Terminal front end for the gearbox sizing form. The CLI owns the form
//! document that the host page owns in a browser deployment: it creates
//! the named input and output fields, binds them, wires the recompute
//! handler into every input, runs the initial recompute, and then turns
//! stdin edits into change events.
//!
//! ```text
//! > set motor-rpm 1500
//! > json
//! > quit
//! ```

use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use tracing_subscriber::EnvFilter;

use drive_core::binding::{BoundInput, BoundOutput, ChangeHandler};
use drive_core::calc::{field, Calc};
use drive_core::calculations::gearbox::calculate;
use drive_core::errors::CalcResult;
use drive_core::form::{Document, Element};

/// Input fields: (engine key, form field name, default value)
const INPUT_FIELDS: [(&str, &str, f64); 11] = [
    (field::MOTOR_RPM, "motor-rpm", 1750.0),
    (field::MOTOR_KW, "motor-kw", 37.3),
    (field::MOTOR_PULLEY, "motor-pulley", 7.5),
    (field::GEARBOX_PULLEY, "gearbox-pulley", 9.75),
    (field::IEX, "ratio-iex", 40.781),
    (field::T2N, "t2n", 31.0),
    (field::P1N, "p1n", 115.0),
    (field::N1, "n1", 1450.0),
    (field::PG1, "pg1", 37.0),
    (field::AMBIENT_TEMP, "ambient-temp", 30.0),
    (field::OP_CYCLE, "op-cycle", 20.0),
];

/// Output fields: (engine key, form field id, display label)
const OUTPUT_FIELDS: [(&str, &str, &str); 5] = [
    (field::SAFETY_FACTOR, "safety-factor", "Safety factor"),
    (field::THERMAL, "thermal", "Thermal check"),
    (field::GEARBOX_INPUT_RPM, "gearbox-input-rpm", "Gearbox input speed (rpm)"),
    (field::GEARBOX_OUTPUT_RPM, "gearbox-output-rpm", "Gearbox output speed (rpm)"),
    (
        field::GEARBOX_OUTPUT_TORQUE,
        "gearbox-output-torque",
        "Gearbox output torque (kN·m)",
    ),
];

struct App {
    document: Document,
    /// Inputs keyed by their form field name, for edit dispatch
    inputs: HashMap<&'static str, Rc<BoundInput>>,
    calc: Rc<Calc>,
}

impl App {
    /// Build the form, bind every field, wire the recompute handler and
    /// populate the outputs once.
    fn bootstrap() -> CalcResult<App> {
        let mut document = Document::new();
        for (_, name, _) in INPUT_FIELDS {
            document.push(Element::new(name, name, ""));
        }
        for (_, id, _) in OUTPUT_FIELDS {
            document.push(Element::new(id, "", "-"));
        }

        let mut by_name = HashMap::new();
        let mut inputs = HashMap::new();
        for (key, name, default) in INPUT_FIELDS {
            let input = Rc::new(BoundInput::bind(&document, name, default)?);
            by_name.insert(name, Rc::clone(&input));
            inputs.insert(key.to_string(), input);
        }

        let mut outputs = HashMap::new();
        for (key, id, _) in OUTPUT_FIELDS {
            outputs.insert(key.to_string(), BoundOutput::by_id(&document, id, "-")?);
        }

        let calc = Rc::new(Calc::new(inputs, outputs));

        // Weak handle breaks the engine -> input -> handler -> engine cycle
        let handler: ChangeHandler = {
            let calc = Rc::downgrade(&calc);
            Rc::new(move |name: &str| {
                if let Some(calc) = calc.upgrade() {
                    if let Err(e) = calc.recalc(Some(name)) {
                        tracing::error!(error = %e, "recompute failed");
                    }
                }
            })
        };
        for input in by_name.values() {
            input.subscribe(Rc::clone(&handler));
        }

        calc.recalc(None)?;
        Ok(App {
            document,
            inputs: by_name,
            calc,
        })
    }

    /// Dispatch one edit to the named input field.
    fn edit(&self, name: &str, raw: &str) -> bool {
        match self.inputs.get(name) {
            Some(input) => {
                input.on_activate();
                input.on_change(raw);
                true
            }
            None => false,
        }
    }

    fn render(&self) {
        println!();
        println!("═══════════════════════════════════════════════");
        println!("  GEARBOX SIZING");
        println!("═══════════════════════════════════════════════");
        println!();
        println!("Inputs:");
        for (_, name, _) in INPUT_FIELDS {
            let value = self.inputs[name].element().value();
            println!("  {:<16} {}", name, value);
        }
        println!();
        println!("Outputs:");
        for (_, id, label) in OUTPUT_FIELDS {
            if let Some(element) = self.document.element_by_id(id) {
                println!("  {:<28} {}", label, element.value());
            }
        }
        println!("═══════════════════════════════════════════════");
    }

    fn print_json(&self) {
        match self.calc.snapshot() {
            Ok(snapshot) => {
                let result = calculate(&snapshot);
                println!("Input snapshot:");
                if let Ok(json) = serde_json::to_string_pretty(&snapshot) {
                    println!("{}", json);
                }
                println!();
                println!("Result:");
                if let Ok(json) = serde_json::to_string_pretty(&result) {
                    println!("{}", json);
                }
            }
            Err(e) => eprintln!("Error: {}", e),
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  set <field> <value>   edit an input field and recompute");
    println!("  show                  print the whole form");
    println!("  json                  print input snapshot and result as JSON");
    println!("  help                  this message");
    println!("  quit                  exit");
    println!();
    println!("Fields:");
    for (_, name, default) in INPUT_FIELDS {
        println!("  {:<16} (default {})", name, default);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Drivesize CLI - Gearbox Sizing Calculator");
    println!("=========================================");
    println!();

    let app = match App::bootstrap() {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Bootstrap error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            std::process::exit(1);
        }
    };

    app.render();
    println!();
    println!("Type 'help' for commands.");

    let stdin = io::stdin();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("set") => {
                let name = parts.next();
                let value = parts.next();
                match (name, value) {
                    (Some(name), Some(value)) => {
                        if app.edit(name, value) {
                            app.render();
                        } else {
                            println!("Unknown field '{}'. Type 'help' for the field list.", name);
                        }
                    }
                    _ => println!("Usage: set <field> <value>"),
                }
            }
            Some("show") => app.render(),
            Some("json") => app.print_json(),
            Some("help") => print_help(),
            Some("quit") | Some("exit") => break,
            Some(other) => println!("Unknown command '{}'. Type 'help' for commands.", other),
            None => {}
        }
    }
}
