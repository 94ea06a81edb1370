//! Generic XML to tree conversion.
//!
//! Produces a loosely-typed `serde_json::Value` with no knowledge of the bureau
//! schema:
//!
//! - an element without attributes or child elements becomes a string holding
//!   its text (an empty element becomes `""`)
//! - any other element becomes an object keyed by child element name, with
//!   attributes under `"$"` and non-blank text under `"_"`
//! - a child name seen once maps to its node, a child name seen more than once
//!   maps to an array of nodes in document order
//!
//! The last rule means the shape of a repeatable element depends on how many
//! times it occurs. Callers resolve that through [`crate::accessor`].

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};
use std::fmt;

pub const ATTRIBUTES_KEY: &str = "$";
pub const TEXT_KEY: &str = "_";

/// Malformed document error with the byte offset where reading stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlError {
    pub message: String,
    pub position: u64,
}

impl XmlError {
    fn new(message: impl Into<String>, position: u64) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

impl fmt::Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}", self.message, self.position)
    }
}

impl std::error::Error for XmlError {}

/// An element that has been opened but not yet closed.
struct Frame {
    name: String,
    attributes: Map<String, Value>,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn new(name: String, attributes: Map<String, Value>) -> Self {
        Self {
            name,
            attributes,
            children: Map::new(),
            text: String::new(),
        }
    }

    fn add_child(&mut self, name: String, node: Value) {
        match self.children.get_mut(&name) {
            Some(Value::Array(siblings)) => siblings.push(node),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, node]);
            }
            None => {
                self.children.insert(name, node);
            }
        }
    }

    fn into_node(self) -> (String, Value) {
        if self.children.is_empty() && self.attributes.is_empty() {
            return (self.name, Value::String(self.text));
        }

        let mut object = self.children;
        if !self.attributes.is_empty() {
            object.insert(ATTRIBUTES_KEY.to_string(), Value::Object(self.attributes));
        }
        if !self.text.trim().is_empty() {
            object.insert(TEXT_KEY.to_string(), Value::String(self.text));
        }
        (self.name, Value::Object(object))
    }
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

fn read_attributes(start: &BytesStart<'_>, position: u64) -> Result<Map<String, Value>, XmlError> {
    let mut attributes = Map::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| XmlError::new(err.to_string(), position))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|err| XmlError::new(err.to_string(), position))?;
        attributes.insert(key, Value::String(value.into_owned()));
    }
    Ok(attributes)
}

/// Builds the generic tree for `text`.
///
/// The returned value is an object with a single entry: the root element name
/// mapped to the root node.
pub fn parse_tree(text: &str) -> Result<Value, XmlError> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) => {
                return Err(XmlError::new(
                    err.to_string(),
                    reader.buffer_position() as u64,
                ))
            }
        };
        let position = reader.buffer_position() as u64;

        match event {
            Event::Start(start) => {
                if stack.is_empty() && root.is_some() {
                    return Err(XmlError::new("multiple root elements", position));
                }
                let attributes = read_attributes(&start, position)?;
                stack.push(Frame::new(element_name(&start), attributes));
            }
            Event::Empty(start) => {
                if stack.is_empty() && root.is_some() {
                    return Err(XmlError::new("multiple root elements", position));
                }
                let attributes = read_attributes(&start, position)?;
                let (name, node) = Frame::new(element_name(&start), attributes).into_node();
                match stack.last_mut() {
                    Some(parent) => parent.add_child(name, node),
                    None => root = Some((name, node)),
                }
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| XmlError::new("unexpected closing tag", position))?;
                let (name, node) = frame.into_node();
                match stack.last_mut() {
                    Some(parent) => parent.add_child(name, node),
                    None => root = Some((name, node)),
                }
            }
            Event::Text(content) => {
                let content = content
                    .unescape()
                    .map_err(|err| XmlError::new(err.to_string(), position))?;
                match stack.last_mut() {
                    Some(frame) => frame.text.push_str(&content),
                    None if content.trim().is_empty() => {}
                    None => {
                        return Err(XmlError::new("text outside of the root element", position))
                    }
                }
            }
            Event::CData(content) => {
                let content = String::from_utf8_lossy(&content.into_inner()).into_owned();
                match stack.last_mut() {
                    Some(frame) => frame.text.push_str(&content),
                    None => {
                        return Err(XmlError::new("CDATA outside of the root element", position))
                    }
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctypes
            _ => {}
        }
    }

    let end = reader.buffer_position() as u64;
    if let Some(open) = stack.last() {
        return Err(XmlError::new(
            format!("unclosed element `{}`", open.name),
            end,
        ));
    }

    let (name, node) = root.ok_or_else(|| XmlError::new("document has no root element", end))?;
    let mut document = Map::new();
    document.insert(name, node);
    Ok(Value::Object(document))
}
