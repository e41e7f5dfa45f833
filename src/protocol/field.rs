//! Field table
//!
//! The single registry of field tags shared by requests and responses.
//! Entries are indexed by tag, so `FIELD_TABLE[tag].tag == tag`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag byte terminating the field list in both directions
pub const FIELD_END: u8 = 0xFF;

/// Wire representation of a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// UTF-8 bytes followed by a single 0x00
    CString,

    /// 4-byte little-endian two's complement
    Int32LE,

    /// 8-byte little-endian two's complement
    Int64LE,
}

/// Static description of one field tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub tag: u8,
    pub kind: FieldKind,

    /// Name used when building a request
    pub name: &'static str,

    /// Label used when presenting a response
    pub label: &'static str,
}

const fn descriptor(
    tag: u8,
    kind: FieldKind,
    name: &'static str,
    label: &'static str,
) -> FieldDescriptor {
    FieldDescriptor { tag, kind, name, label }
}

/// Every known field, indexed by tag
pub static FIELD_TABLE: [FieldDescriptor; 10] = [
    descriptor(0, FieldKind::CString, "key", "key"),
    descriptor(1, FieldKind::Int32LE, "id", "id"),
    descriptor(2, FieldKind::CString, "user", "user"),
    descriptor(3, FieldKind::CString, "display", "display"),
    descriptor(4, FieldKind::Int64LE, "expire", "expire"),
    descriptor(5, FieldKind::CString, "redirect", "redirect"),
    descriptor(6, FieldKind::CString, "src", "transsrc"),
    descriptor(7, FieldKind::CString, "dst", "transdst"),
    descriptor(8, FieldKind::CString, "tag", "tag"),
    descriptor(9, FieldKind::Int32LE, "lifetime", "lifetime"),
];

// Well-known tags referenced by the encoder
pub const TAG_KEY: u8 = 0;
pub const TAG_ID: u8 = 1;
pub const TAG_USER: u8 = 2;
pub const TAG_DISPLAY: u8 = 3;
pub const TAG_EXPIRE: u8 = 4;
pub const TAG_REDIRECT: u8 = 5;
pub const TAG_SRC: u8 = 6;
pub const TAG_DST: u8 = 7;
pub const TAG_TAG: u8 = 8;
pub const TAG_LIFETIME: u8 = 9;

/// Look up a field by its wire tag
pub fn field_by_tag(tag: u8) -> Option<&'static FieldDescriptor> {
    FIELD_TABLE.get(tag as usize)
}

/// Look up a field by its request-side name
pub fn field_by_name(name: &str) -> Option<&'static FieldDescriptor> {
    FIELD_TABLE.iter().find(|d| d.name == name)
}

// =============================================================================
// Decoded Values
// =============================================================================

/// A decoded field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    Str(String),
    Int32(i32),
    Int64(i64),
}

impl FieldValue {
    /// The wire kind this value encodes as
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Str(_) => FieldKind::CString,
            FieldValue::Int32(_) => FieldKind::Int32LE,
            FieldValue::Int64(_) => FieldKind::Int64LE,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Integer value widened to i64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int32(v) => Some(i64::from(*v)),
            FieldValue::Int64(v) => Some(*v),
            FieldValue::Str(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::Int32(v) => write!(f, "{}", v),
            FieldValue::Int64(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(s)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int32(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int64(v)
    }
}

/// A (tag, value) pair as it appears on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub tag: u8,
    pub value: FieldValue,
}

impl Field {
    pub fn new(tag: u8, value: impl Into<FieldValue>) -> Self {
        Self {
            tag,
            value: value.into(),
        }
    }

    pub fn descriptor(&self) -> Option<&'static FieldDescriptor> {
        field_by_tag(self.tag)
    }

    /// Response-side label, or "unknown" for tags outside the table
    pub fn label(&self) -> &'static str {
        self.descriptor().map_or("unknown", |d| d.label)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label(), self.value)
    }
}
