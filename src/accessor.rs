//! Schema-aware access over the generic XML tree.
//!
//! Every lookup returns an `Option` and every coercion has a default, so field
//! extraction reads as a list of paths. Repetition is resolved here and only
//! here: singular positions take the first entry of a sequence, repeatable
//! positions are always normalized to a sequence.

use crate::xml_tree::TEXT_KEY;
use serde_json::Value;
use std::fmt;

/// A required element was not found in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingElement {
    pub path: String,
}

impl fmt::Display for MissingElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "missing required element `{}`", self.path)
    }
}

impl std::error::Error for MissingElement {}

/// Returns the value itself, or the first entry when it is a sequence.
pub fn first_of_sequence(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items.first(),
        other => Some(other),
    }
}

/// Normalizes a possibly-repeated element to an ordered sequence.
///
/// Absent → empty, single node → one entry, sequence → unchanged.
pub fn as_sequence(value: Option<&Value>) -> Vec<&Value> {
    match value {
        None => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(single) => vec![single],
    }
}

/// Parses numeric text, falling back to `0.0` when absent, blank, non-numeric
/// or not finite. Sign and fraction are kept as-is.
///
/// Only decimal and float syntax is accepted: `0x2C9` or `0b101` read as `0.0`.
pub fn coerce_number(text: Option<&str>) -> f64 {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .and_then(|t| t.parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Borrowed view of one node in the generic tree.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a>(&'a Value);

impl<'a> Node<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self(value)
    }

    /// Child element by name. A repeated child resolves to its first entry.
    pub fn child(&self, name: &str) -> Option<Node<'a>> {
        self.0
            .as_object()?
            .get(name)
            .and_then(first_of_sequence)
            .map(Node)
    }

    pub fn at(&self, path: &[&str]) -> Option<Node<'a>> {
        path.iter().try_fold(*self, |node, name| node.child(name))
    }

    /// Like [`Node::at`], but absence is an error naming the full path.
    pub fn require(&self, path: &[&str]) -> Result<Node<'a>, MissingElement> {
        self.at(path).ok_or_else(|| MissingElement {
            path: path.join("/"),
        })
    }

    /// All occurrences of the element at `path`, in document order.
    ///
    /// Intermediate steps resolve like [`Node::at`]; only the last step is
    /// treated as repeatable.
    pub fn sequence_at(&self, path: &[&str]) -> Vec<Node<'a>> {
        let Some((last, parents)) = path.split_last() else {
            return vec![*self];
        };
        let Some(parent) = self.at(parents) else {
            return Vec::new();
        };
        let value = parent.0.as_object().and_then(|object| object.get(*last));
        as_sequence(value).into_iter().map(Node).collect()
    }

    /// Text content of a leaf, or the text of an element that also carries
    /// attributes.
    pub fn text(&self) -> Option<&'a str> {
        match self.0 {
            Value::String(text) => Some(text),
            Value::Object(object) => object.get(TEXT_KEY).and_then(Value::as_str),
            _ => None,
        }
    }

    pub fn text_at(&self, path: &[&str]) -> Option<&'a str> {
        self.at(path).and_then(|node| node.text())
    }

    pub fn string_or_default(&self, path: &[&str]) -> String {
        self.text_at(path).unwrap_or_default().to_string()
    }

    pub fn number_or_default(&self, path: &[&str]) -> f64 {
        coerce_number(self.text_at(path))
    }
}
