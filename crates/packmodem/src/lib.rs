//! Token-oriented streaming reader and writer for MessagePack.
//!
//! Hosts that serialize through a JSON-style token API (`begin_object`,
//! `next_field`, `value_*`, `end_object`, ...) can target MessagePack through
//! [`MsgpackReader`] and [`MsgpackWriter`]. The writer defers each top-level
//! container until it closes so that every array and map header carries its
//! final size; the reader turns those header counts back into
//! `has_next_element` / `has_next_field` answers, one frame per open
//! container.
//!
//! ```
//! use packmodem::{MsgpackAdapter, TokenRead, TokenWrite, Value};
//!
//! let adapter = MsgpackAdapter::new();
//! let mut writer = adapter.bytes_writer();
//! writer.json_value(&Value::Array(vec![1.into(), "two".into()]))?;
//!
//! let bytes = writer.into_result();
//! let mut reader = adapter.reader_from_slice(&bytes);
//! assert_eq!(
//!     reader.read_value()?,
//!     Value::Array(vec![1.into(), "two".into()])
//! );
//! # Ok::<(), packmodem::Error>(())
//! ```

#![allow(missing_docs)]

mod adapter;
mod error;
mod names;
mod options;
mod reader;
mod stream;
mod token;
mod value;
mod writer;

#[cfg(test)]
mod tests;

pub use adapter::{BufferedWriter, BytesWriter, MsgpackAdapter};
pub use error::{CodecError, Error, Result};
pub use names::PropertyNames;
pub use options::AdapterOptions;
pub use reader::MsgpackReader;
pub use stream::{TokenRead, TokenWrite};
pub use token::{ContainerKind, Token, ValueKind};
pub use value::{Array, Map, Value};
pub use writer::MsgpackWriter;

pub use bigdecimal::BigDecimal;
pub use num_bigint::BigInt;
