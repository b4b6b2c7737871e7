//! The token contract hosts drive.
//!
//! Generated marshalling code talks to these traits only. [`TokenRead`] is a
//! pull cursor (`begin_object`, `has_next_field`, `next_field`, scalar reads,
//! `end_object`), [`TokenWrite`] is a push encoder with the mirror-image
//! calls.
//!
//! # Examples
//!
//! ```
//! use packmodem::{MsgpackAdapter, TokenRead, TokenWrite};
//!
//! let adapter = MsgpackAdapter::new();
//! let mut writer = adapter.bytes_writer();
//! writer.begin_object()?;
//! writer.name("id")?;
//! writer.value_str("id")?;
//! writer.value_i64(7)?;
//! writer.end_object()?;
//!
//! let bytes = writer.into_result();
//! let mut reader = adapter.reader_from_slice(&bytes);
//! reader.begin_object()?;
//! assert!(reader.has_next_field()?);
//! assert_eq!(reader.next_field()?, "id");
//! assert_eq!(reader.read_long()?, 7);
//! assert!(!reader.has_next_field()?);
//! reader.end_object()?;
//! # Ok::<(), packmodem::Error>(())
//! ```
use bigdecimal::BigDecimal;
use bstr::BString;
use num_bigint::BigInt;

use crate::{Error, PropertyNames, Result, Token, Value};

/// Pull-based token reader.
pub trait TokenRead {
    fn begin_array(&mut self) -> Result<()>;
    fn end_array(&mut self) -> Result<()>;
    /// `true` while the innermost open array has elements left.
    fn has_next_element(&mut self) -> Result<bool>;

    fn begin_object(&mut self) -> Result<()>;
    fn begin_object_with(&mut self, _names: &PropertyNames) -> Result<()> {
        self.begin_object()
    }
    fn end_object(&mut self) -> Result<()>;
    /// `true` while the innermost open object has fields left.
    fn has_next_field(&mut self) -> Result<bool>;
    fn next_field(&mut self) -> Result<String>;

    /// Peeks whether the next value is null without consuming it.
    fn is_null_value(&mut self) -> Result<bool>;
    fn read_null(&mut self) -> Result<()>;
    fn read_boolean(&mut self) -> Result<bool>;
    fn read_int(&mut self) -> Result<i32>;
    fn read_long(&mut self) -> Result<i64>;
    fn read_double(&mut self) -> Result<f64>;
    fn read_decimal(&mut self) -> Result<BigDecimal>;
    fn read_big_integer(&mut self) -> Result<BigInt>;
    fn read_string(&mut self) -> Result<String>;
    fn read_binary(&mut self) -> Result<Vec<u8>>;
    /// Reads a text or binary payload without validating it as UTF-8.
    fn read_raw(&mut self) -> Result<BString>;
    /// Reads one complete value of any shape.
    fn read_value(&mut self) -> Result<Value>;

    /// Discards one complete value, including any nested containers.
    fn skip_value(&mut self) -> Result<()>;
    /// Reports a field the host has no mapping for.
    fn unmapped_field(&mut self, name: &str) -> Result<()>;

    /// A diagnostic description of the current position.
    fn location(&self) -> String;
    fn current_token(&self) -> Option<Token>;
}

/// Push-based token writer.
pub trait TokenWrite {
    fn begin_array(&mut self) -> Result<()>;
    fn end_array(&mut self) -> Result<()>;
    fn empty_array(&mut self) -> Result<()>;

    fn begin_object(&mut self) -> Result<()>;
    fn begin_object_with(&mut self, _names: &PropertyNames) -> Result<()> {
        self.begin_object()
    }
    fn end_object(&mut self) -> Result<()>;

    fn name(&mut self, name: &str) -> Result<()>;
    fn name_at(&mut self, position: usize) -> Result<()>;
    fn all_names(&mut self, names: &PropertyNames) -> Result<()>;

    fn null_value(&mut self) -> Result<()>;
    fn value_str(&mut self, value: &str) -> Result<()>;
    fn value_bool(&mut self, value: bool) -> Result<()>;
    fn value_i32(&mut self, value: i32) -> Result<()>;
    fn value_i64(&mut self, value: i64) -> Result<()>;
    fn value_u64(&mut self, value: u64) -> Result<()>;
    fn value_f32(&mut self, value: f32) -> Result<()>;
    fn value_f64(&mut self, value: f64) -> Result<()>;
    fn value_decimal(&mut self, value: &BigDecimal) -> Result<()>;
    fn value_big_integer(&mut self, value: &BigInt) -> Result<()>;
    fn value_binary(&mut self, value: &[u8]) -> Result<()>;

    fn value_opt_str(&mut self, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) => self.value_str(value),
            None => self.null_value(),
        }
    }

    fn value_opt_bool(&mut self, value: Option<bool>) -> Result<()> {
        match value {
            Some(value) => self.value_bool(value),
            None => self.null_value(),
        }
    }

    fn value_opt_i64(&mut self, value: Option<i64>) -> Result<()> {
        match value {
            Some(value) => self.value_i64(value),
            None => self.null_value(),
        }
    }

    fn value_opt_f64(&mut self, value: Option<f64>) -> Result<()> {
        match value {
            Some(value) => self.value_f64(value),
            None => self.null_value(),
        }
    }

    /// Writes a value whose shape is only known at runtime.
    ///
    /// Arrays and objects open a nested container and recurse into their
    /// entries; object keys are written as ordinary string values.
    fn json_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Null => self.null_value(),
            Value::Boolean(v) => self.value_bool(*v),
            Value::Integer(v) => self.value_i64(*v),
            Value::Unsigned(v) => self.value_u64(*v),
            Value::Float(v) => self.value_f64(*v),
            Value::Decimal(v) => self.value_decimal(v),
            Value::String(v) => self.value_str(v),
            Value::Binary(v) => self.value_binary(v),
            Value::Array(items) => {
                self.begin_array()?;
                for item in items {
                    self.json_value(item)?;
                }
                self.end_array()
            }
            Value::Object(map) => {
                self.begin_object()?;
                for (key, item) in map {
                    self.value_str(key)?;
                    self.json_value(item)?;
                }
                self.end_object()
            }
            Value::Extension(..) => Err(Error::UnsupportedType("msgpack extension value")),
        }
    }

    /// Injects pre-rendered text. Formats without a textual form ignore it.
    fn raw_value(&mut self, value: &str) -> Result<()>;
    fn write_new_line(&mut self) -> Result<()>;
    fn mark_incomplete(&mut self);
    fn pretty(&mut self, pretty: bool);

    fn serialize_nulls(&self) -> bool;
    fn set_serialize_nulls(&mut self, serialize_nulls: bool);
    fn serialize_empty(&self) -> bool;
    fn set_serialize_empty(&mut self, serialize_empty: bool);

    fn flush(&mut self) -> Result<()>;
    /// Flushes the sink and checks that every container was closed.
    fn close(&mut self) -> Result<()>;
}
