//! # Form Document Model
//!
//! In-process stand-in for the host page. The frontend owns a [`Document`]
//! of named fields; the binding layer resolves fields by name or id and
//! reads/writes their displayed text through shared [`Element`] handles.
//!
//! Names identify input fields and may repeat (the binding layer warns and
//! takes the first match). Ids identify output fields.
//!
//! ## Example
//!
//! ```rust
//! use drive_core::form::{Document, Element};
//!
//! let doc = Document::new()
//!     .with_field("motor-rpm", "motor-rpm", "")
//!     .with_field("safety-factor", "", "-");
//!
//! assert_eq!(doc.elements_by_name("motor-rpm").len(), 1);
//! assert!(doc.element_by_id("safety-factor").is_some());
//! ```

use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to one form field.
///
/// Cloning the handle aliases the same underlying field, so a binding and
/// the frontend both observe every write.
#[derive(Debug, Clone)]
pub struct Element {
    inner: Rc<RefCell<ElementInner>>,
}

#[derive(Debug)]
struct ElementInner {
    id: String,
    name: String,
    value: String,
    selected: bool,
}

impl Element {
    /// Create a field with an id, a name, and initial displayed text.
    pub fn new(id: impl Into<String>, name: impl Into<String>, value: impl Into<String>) -> Self {
        Element {
            inner: Rc::new(RefCell::new(ElementInner {
                id: id.into(),
                name: name.into(),
                value: value.into(),
                selected: false,
            })),
        }
    }

    /// Field id
    pub fn id(&self) -> String {
        self.inner.borrow().id.clone()
    }

    /// Field name
    pub fn name(&self) -> String {
        self.inner.borrow().name.clone()
    }

    /// Currently displayed text
    pub fn value(&self) -> String {
        self.inner.borrow().value.clone()
    }

    /// Overwrite the displayed text. Clears any selection highlight.
    pub fn set_value(&self, value: impl Into<String>) {
        let mut inner = self.inner.borrow_mut();
        inner.value = value.into();
        inner.selected = false;
    }

    /// Highlight the whole field content for easy overwrite.
    pub fn select(&self) {
        self.inner.borrow_mut().selected = true;
    }

    /// Whether the field content is currently highlighted
    pub fn is_selected(&self) -> bool {
        self.inner.borrow().selected
    }
}

/// Ordered collection of form fields.
#[derive(Debug, Default)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Document::default()
    }

    /// Append a field
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Builder-style field append
    pub fn with_field(mut self, id: &str, name: &str, value: &str) -> Self {
        self.push(Element::new(id, name, value));
        self
    }

    /// All fields whose name matches, in document order.
    pub fn elements_by_name(&self, name: &str) -> Vec<Element> {
        self.elements
            .iter()
            .filter(|el| el.name() == name)
            .cloned()
            .collect()
    }

    /// First field whose id matches.
    pub fn element_by_id(&self, id: &str) -> Option<Element> {
        self.elements.iter().find(|el| el.id() == id).cloned()
    }

    /// All fields in document order
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_alias_one_field() {
        let element = Element::new("f", "f", "1");
        let alias = element.clone();
        alias.set_value("2");
        assert_eq!(element.value(), "2");
    }

    #[test]
    fn test_lookup_by_name_keeps_document_order() {
        let doc = Document::new()
            .with_field("a", "dup", "first")
            .with_field("b", "other", "")
            .with_field("c", "dup", "second");

        let matches = doc.elements_by_name("dup");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].value(), "first");
        assert_eq!(matches[1].value(), "second");
        assert!(doc.elements_by_name("missing").is_empty());
    }

    #[test]
    fn test_lookup_by_id() {
        let doc = Document::new().with_field("out", "", "-");
        assert_eq!(doc.element_by_id("out").unwrap().value(), "-");
        assert!(doc.element_by_id("missing").is_none());
    }

    #[test]
    fn test_select_cleared_on_write() {
        let element = Element::new("f", "f", "1");
        element.select();
        assert!(element.is_selected());
        element.set_value("3");
        assert!(!element.is_selected());
    }
}
