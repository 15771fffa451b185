//! # Named Field Bindings
//!
//! [`BoundInput`] and [`BoundOutput`] tie a named value to one form field.
//! Inputs are bidirectional: user edits update the stored value and notify
//! a subscribed change handler; the normalized number is written back to
//! the field. Outputs are write-only: the engine overwrites them on every
//! recompute.
//!
//! The change handler is injected by the bootstrap rather than registered
//! through process-wide state; each input carries a single handler slot and
//! a later [`BoundInput::subscribe`] silently replaces the earlier handler.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::errors::{CalcError, CalcResult};
use crate::form::{Document, Element};

/// Callback invoked with the changed input's name after every edit.
pub type ChangeHandler = Rc<dyn Fn(&str)>;

/// One named input field.
pub struct BoundInput {
    name: String,
    element: Element,
    data: Cell<f64>,
    handler: RefCell<Option<ChangeHandler>>,
}

impl BoundInput {
    /// Bind to the first element in the document whose name matches.
    ///
    /// Fails when no element carries the name. When several do, the first
    /// match wins and a warning is logged; this is a policy choice, not an
    /// error. On success the element displays `initial`.
    pub fn bind(doc: &Document, name: &str, initial: f64) -> CalcResult<Self> {
        let matches = doc.elements_by_name(name);
        let element = match matches.first() {
            Some(element) => element.clone(),
            None => {
                return Err(CalcError::binding_failed(
                    name,
                    "no element with this name",
                ))
            }
        };
        if matches.len() > 1 {
            warn!(
                name,
                count = matches.len(),
                "multiple elements share a name, binding the first"
            );
        }
        element.set_value(initial.to_string());
        Ok(BoundInput {
            name: name.to_string(),
            element,
            data: Cell::new(initial),
            handler: RefCell::new(None),
        })
    }

    /// Handle the "value changed" interaction signal.
    ///
    /// Parses the raw text as f64. A parseable value is stored and its
    /// normalized form written back to the field; anything else stores NaN
    /// (which then flows through the arithmetic) and leaves the raw text as
    /// typed. Afterwards the subscribed handler, if any, is invoked with
    /// this input's name.
    pub fn on_change(&self, raw: &str) {
        match raw.trim().parse::<f64>() {
            Ok(value) => {
                self.data.set(value);
                self.element.set_value(value.to_string());
            }
            Err(_) => {
                debug!(name = %self.name, raw, "field text is not numeric, computing with NaN");
                self.data.set(f64::NAN);
                self.element.set_value(raw);
            }
        }
        // Clone out of the slot so the handler can run without the borrow held
        let handler = self.handler.borrow().as_ref().map(Rc::clone);
        if let Some(handler) = handler {
            handler(&self.name);
        }
    }

    /// Handle the "pointer/selection" interaction signal: highlight the
    /// field content for easy overwrite. No data mutation.
    pub fn on_activate(&self) {
        self.element.select();
    }

    /// Subscribe the recompute handler. Replaces any previously subscribed
    /// handler; there is no unsubscribe.
    pub fn subscribe(&self, handler: ChangeHandler) {
        *self.handler.borrow_mut() = Some(handler);
    }

    /// Name this input was bound under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current stored value (NaN after a non-numeric edit)
    pub fn value(&self) -> f64 {
        self.data.get()
    }

    /// The bound form field
    pub fn element(&self) -> &Element {
        &self.element
    }
}

impl fmt::Debug for BoundInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundInput")
            .field("name", &self.name)
            .field("data", &self.data.get())
            .field("subscribed", &self.handler.borrow().is_some())
            .finish()
    }
}

/// One named output field. Mutated only by the engine.
#[derive(Debug)]
pub struct BoundOutput {
    element: Element,
    value: RefCell<String>,
}

impl BoundOutput {
    /// Bind to a directly supplied element handle.
    pub fn new(element: Element, initial: impl fmt::Display) -> Self {
        let text = initial.to_string();
        element.set_value(text.clone());
        BoundOutput {
            element,
            value: RefCell::new(text),
        }
    }

    /// Bind by id, resolving through the document.
    pub fn by_id(doc: &Document, id: &str, initial: impl fmt::Display) -> CalcResult<Self> {
        let element = doc
            .element_by_id(id)
            .ok_or_else(|| CalcError::binding_failed(id, "no element with this id"))?;
        Ok(BoundOutput::new(element, initial))
    }

    /// Store the value and overwrite the field's displayed text. Accepts
    /// anything displayable; no validation.
    pub fn change(&self, value: impl fmt::Display) {
        let text = value.to_string();
        self.element.set_value(text.clone());
        *self.value.borrow_mut() = text;
    }

    /// Last rendered value
    pub fn value(&self) -> String {
        self.value.borrow().clone()
    }
}
