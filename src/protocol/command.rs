//! Command definitions
//!
//! Request-side types: the command selector, the raw field mapping a request
//! is built from, and the parsed form of a received request.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EncodeError;
use super::field::{field_by_name, Field};

/// Command types (first byte of every request)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CommandType {
    Lookup = 0x00,
    Commit = 0x01,
    Create = 0x02,
    Transfer = 0x03,
}

impl CommandType {
    pub const ALL: [CommandType; 4] = [
        CommandType::Lookup,
        CommandType::Commit,
        CommandType::Create,
        CommandType::Transfer,
    ];

    /// Map a selector byte back to its command
    pub fn from_selector(selector: u8) -> Option<Self> {
        Self::ALL.get(selector as usize).copied()
    }

    pub fn selector(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            CommandType::Lookup => "lookup",
            CommandType::Commit => "commit",
            CommandType::Create => "create",
            CommandType::Transfer => "transfer",
        }
    }
}

impl FromStr for CommandType {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| EncodeError::UnknownCommand(s.to_string()))
    }
}

// =============================================================================
// Request Input
// =============================================================================

/// Raw request fields, field name -> value bytes
///
/// Integer fields hold decimal text; it is parsed when the request is encoded.
/// Names outside the field table are kept but never encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    values: BTreeMap<String, Vec<u8>>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field
    pub fn insert(&mut self, name: impl Into<String>, value: impl AsRef<[u8]>) {
        self.values.insert(name.into(), value.as_ref().to_vec());
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl AsRef<[u8]>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.values.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Names that do not correspond to any known field
    pub fn unknown_names(&self) -> impl Iterator<Item = &str> {
        self.values
            .keys()
            .map(String::as_str)
            .filter(|name| field_by_name(name).is_none())
    }
}

impl<K, V> FromIterator<(K, V)> for Fields
where
    K: Into<String>,
    V: AsRef<[u8]>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (name, value) in iter {
            fields.insert(name, value);
        }
        fields
    }
}

// =============================================================================
// Parsed Request
// =============================================================================

/// A request as read off the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub command: CommandType,

    /// Fields in wire order
    pub fields: Vec<Field>,
}

impl Request {
    /// First field carrying the given request-side name
    pub fn field(&self, name: &str) -> Option<&Field> {
        let tag = field_by_name(name)?.tag;
        self.fields.iter().find(|f| f.tag == tag)
    }
}
