//! Response definitions
//!
//! Represents responses from the uniauth service.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::field::{field_by_name, Field};

/// Response kind codes (first byte of every response)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum ResponseKind {
    Message = 0x00,
    Error = 0x01,
    Record = 0x02,
}

impl ResponseKind {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(ResponseKind::Message),
            0x01 => Some(ResponseKind::Error),
            0x02 => Some(ResponseKind::Record),
            _ => None,
        }
    }
}

/// A decoded response
///
/// `Error` is a protocol-level refusal reported by the service, not a
/// failure to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    Message(String),
    Error(String),
    Record(Vec<Field>),
}

impl Response {
    /// Create a MESSAGE response
    pub fn message(text: impl Into<String>) -> Self {
        Response::Message(text.into())
    }

    /// Create an ERROR response
    pub fn error(text: impl Into<String>) -> Self {
        Response::Error(text.into())
    }

    /// Create a RECORD response
    pub fn record(fields: Vec<Field>) -> Self {
        Response::Record(fields)
    }

    pub fn kind(&self) -> ResponseKind {
        match self {
            Response::Message(_) => ResponseKind::Message,
            Response::Error(_) => ResponseKind::Error,
            Response::Record(_) => ResponseKind::Record,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error(_))
    }

    /// Text payload of a MESSAGE or ERROR response
    pub fn text(&self) -> Option<&str> {
        match self {
            Response::Message(text) | Response::Error(text) => Some(text.as_str()),
            Response::Record(_) => None,
        }
    }

    /// Fields of a RECORD response, in wire order
    pub fn fields(&self) -> Option<&[Field]> {
        match self {
            Response::Record(fields) => Some(fields.as_slice()),
            _ => None,
        }
    }

    /// First record field carrying the given name
    pub fn field(&self, name: &str) -> Option<&Field> {
        let tag = field_by_name(name)?.tag;
        self.fields()?.iter().find(|f| f.tag == tag)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Message(text) | Response::Error(text) => f.write_str(text),
            Response::Record(fields) => {
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}", field)?;
                }
                Ok(())
            }
        }
    }
}
