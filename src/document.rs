use std::borrow::Cow;

const UTF8_BOM: char = '\u{feff}';

/// Raw report document as handed to the parser.
///
/// Uploads arrive as bytes, while the CLI and tests usually hold text; both
/// are accepted and decoded the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentInput {
    Bytes(Vec<u8>),
    Text(String),
}

impl DocumentInput {
    /// Decodes the document as UTF-8.
    ///
    /// Invalid byte sequences are replaced with U+FFFD rather than rejected, so
    /// decoding never fails. A leading byte-order mark is dropped.
    pub fn into_text(self) -> String {
        let text = match self {
            DocumentInput::Bytes(bytes) => match String::from_utf8_lossy(&bytes) {
                Cow::Borrowed(valid) => valid.to_string(),
                Cow::Owned(repaired) => {
                    tracing::debug!("Document contained invalid UTF-8, replaced lossy");
                    repaired
                }
            },
            DocumentInput::Text(text) => text,
        };

        match text.strip_prefix(UTF8_BOM) {
            Some(stripped) => stripped.to_string(),
            None => text,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            DocumentInput::Bytes(bytes) => bytes.len(),
            DocumentInput::Text(text) => text.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<u8>> for DocumentInput {
    fn from(bytes: Vec<u8>) -> Self {
        DocumentInput::Bytes(bytes)
    }
}

impl From<&[u8]> for DocumentInput {
    fn from(bytes: &[u8]) -> Self {
        DocumentInput::Bytes(bytes.to_vec())
    }
}

impl From<String> for DocumentInput {
    fn from(text: String) -> Self {
        DocumentInput::Text(text)
    }
}

impl From<&str> for DocumentInput {
    fn from(text: &str) -> Self {
        DocumentInput::Text(text.to_string())
    }
}
