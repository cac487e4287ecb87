//! Session domain entities

use serde::{Deserialize, Serialize};

/// Role of a message in the transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An in-memory PNG buffer produced from a generated chart (Value Object)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartImage {
    png: Vec<u8>,
    width: u32,
    height: u32,
}

impl ChartImage {
    pub fn new(png: Vec<u8>, width: u32, height: u32) -> Self {
        Self { png, width, height }
    }

    /// Encoded PNG bytes
    pub fn png(&self) -> &[u8] {
        &self.png
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn byte_len(&self) -> usize {
        self.png.len()
    }
}

/// Exactly one payload per message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Image(ChartImage),
}

/// A transcript entry (Entity)
///
/// Fields are private so that the only way to build a message is through
/// the constructors below: a user message always carries text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    role: Role,
    payload: Payload,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            payload: Payload::Text(text.into()),
        }
    }

    pub fn assistant_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            payload: Payload::Text(text.into()),
        }
    }

    pub fn assistant_image(image: ChartImage) -> Self {
        Self {
            role: Role::Assistant,
            payload: Payload::Image(image),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Text payload, if this message carries one
    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            Payload::Text(text) => Some(text),
            Payload::Image(_) => None,
        }
    }

    /// Image payload, if this message carries one
    pub fn image(&self) -> Option<&ChartImage> {
        match &self.payload {
            Payload::Image(image) => Some(image),
            Payload::Text(_) => None,
        }
    }
}
