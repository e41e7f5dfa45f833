//! Protocol Module
//!
//! Defines the uniauth wire protocol.
//!
//! ## Request Format
//! ```text
//! ┌──────────┬──────────────────────────────┬──────┐
//! │ Cmd (1)  │ (Tag (1) + Value)*           │ 0xFF │
//! └──────────┴──────────────────────────────┴──────┘
//! ```
//!
//! ### Commands
//! - 0x00: LOOKUP   - key + optional fields
//! - 0x01: COMMIT   - key + optional fields
//! - 0x02: CREATE   - key + optional fields
//! - 0x03: TRANSFER - src + dst
//!
//! ## Response Format
//! ```text
//! ┌──────────┬──────────────────────────────────────────┐
//! │ Kind (1) │ Text + trailing byte, or tagged fields   │
//! └──────────┴──────────────────────────────────────────┘
//! ```
//!
//! ### Response Kinds
//! - 0x00: MESSAGE
//! - 0x01: ERROR
//! - 0x02: RECORD
//!
//! Field tags and their value encodings live in [`field::FIELD_TABLE`].

pub mod field;
mod command;
mod response;
mod codec;

pub use command::{CommandType, Fields, Request};
pub use response::{Response, ResponseKind};
pub use field::{field_by_name, field_by_tag, Field, FieldDescriptor, FieldKind, FieldValue, FIELD_END};
pub use codec::{
    decode_request, decode_response, decode_value, encode_command, encode_request,
    encode_response, encode_value, OPTIONAL_FIELD_ORDER, TRANSFER_FIELDS,
};
