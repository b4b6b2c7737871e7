//! Pull cursor over a MessagePack byte stream.
//!
//! MessagePack containers declare their size up front and have no closing
//! marker. The cursor keeps one [`Frame`](frame::Frame) per open container,
//! holding the number of elements (arrays) or pairs (objects) not consumed
//! yet, and answers `has_next_element` / `has_next_field` from the innermost
//! frame only. Closing a container pops its frame, so the enclosing
//! container's count is exactly where it was left.
//!
//! Element accounting
//! - Inside an array, every value read at that level consumes one element:
//!   scalar reads, `read_null`, `skip_value`, `read_value` and the
//!   `begin_*` of a nested container.
//! - Inside an object, `next_field` consumes one pair. The value that
//!   follows the key does not decrement the count again.
//! - `skip_value` discards nested content without touching any frame.
mod frame;
mod source;

use std::{
    io::BufRead,
    str::{self, FromStr},
};

use bigdecimal::{BigDecimal, ParseBigDecimalError};
use bstr::BString;
use num_bigint::BigInt;
use num_traits::FromPrimitive as _;
use rmp::{Marker, decode};
use tracing::{debug, trace};

use self::{frame::FrameStack, source::CountingSource};
use crate::{
    ContainerKind, Error, Map, Result, Token, TokenRead, Value, ValueKind, error::CodecError,
};

/// Containers nested deeper than this are rejected by `read_value`.
const MAX_VALUE_DEPTH: usize = 512;

/// Token reader over a MessagePack byte source.
///
/// # Examples
///
/// ```
/// use packmodem::{MsgpackReader, Token, TokenRead};
///
/// // [1, "two"]
/// let bytes = [0x92, 0x01, 0xa3, b't', b'w', b'o'];
/// let mut reader = MsgpackReader::new(&bytes[..], false);
/// reader.begin_array()?;
/// assert_eq!(reader.read_int()?, 1);
/// assert_eq!(reader.read_string()?, "two");
/// assert_eq!(reader.current_token(), Some(Token::String));
/// assert!(!reader.has_next_element()?);
/// reader.end_array()?;
/// # Ok::<(), packmodem::Error>(())
/// ```
#[derive(Debug)]
pub struct MsgpackReader<R> {
    source: CountingSource<R>,
    frames: FrameStack,
    current: Option<Token>,
    fail_on_unknown: bool,
}

impl<R: BufRead> MsgpackReader<R> {
    pub fn new(source: R, fail_on_unknown: bool) -> Self {
        Self {
            source: CountingSource::new(source),
            frames: FrameStack::default(),
            current: None,
            fail_on_unknown,
        }
    }

    /// Bytes consumed so far.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.source.consumed()
    }

    /// Number of containers currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.depth()
    }

    /// The wire kind of the next value, or `None` at end of input.
    pub fn peek_kind(&mut self) -> Result<Option<ValueKind>> {
        match self.source.peek_byte()? {
            Some(byte) => kind_of(Marker::from_u8(byte)).map(Some),
            None => Ok(None),
        }
    }

    /// Borrows the underlying source.
    pub fn get_ref(&self) -> &R {
        self.source.get_ref()
    }

    /// Mutably borrows the underlying source. Reading from it directly
    /// desynchronises the cursor's frame state.
    pub fn get_mut(&mut self) -> &mut R {
        self.source.get_mut()
    }

    pub fn into_inner(self) -> R {
        self.source.into_inner()
    }

    fn peek_marker(&mut self) -> Result<Marker> {
        match self.source.peek_byte()? {
            Some(byte) => Ok(Marker::from_u8(byte)),
            None => Err(Error::unexpected_eof()),
        }
    }

    /// Checks that the next value is one of `accepted` and accounts for it as
    /// one element of the enclosing array. The first accepted kind is the one
    /// reported on mismatch.
    fn expect(&mut self, accepted: &[ValueKind]) -> Result<Marker> {
        let marker = self.peek_marker()?;
        let actual = kind_of(marker)?;
        if !accepted.contains(&actual) {
            return Err(Error::TypeMismatch {
                expected: accepted[0],
                actual,
            });
        }
        self.frames.consume_element();
        Ok(marker)
    }

    fn begin(&mut self, kind: ContainerKind) -> Result<()> {
        self.expect(&[kind.wire_kind()])?;
        let len = match kind {
            ContainerKind::Array => decode::read_array_len(&mut self.source)?,
            ContainerKind::Object => decode::read_map_len(&mut self.source)?,
        };
        self.frames.push(kind, len);
        self.current = Some(kind.token());
        trace!(?kind, len, depth = self.frames.depth(), "container begin");
        Ok(())
    }

    fn end(&mut self, kind: ContainerKind) -> Result<()> {
        let frame = self.frames.pop(kind)?;
        if frame.remaining > 0 {
            debug!(
                ?kind,
                remaining = frame.remaining,
                offset = self.offset(),
                "container closed with unread entries"
            );
        }
        trace!(?kind, depth = self.frames.depth(), "container end");
        Ok(())
    }

    /// Reads any integer marker into the widest signed type.
    fn read_integer(&mut self) -> Result<i128> {
        self.expect(&[ValueKind::Integer])?;
        self.current = Some(Token::Number);
        Ok(decode::read_int::<i128, _>(&mut self.source)?)
    }

    /// Reads the payload of a string or binary value at `marker`.
    fn read_payload(&mut self, marker: Marker) -> Result<Vec<u8>> {
        let len = match kind_of(marker)? {
            ValueKind::Binary => decode::read_bin_len(&mut self.source)?,
            _ => decode::read_str_len(&mut self.source)?,
        };
        Ok(self.source.read_payload(len)?)
    }

    fn read_text(&mut self) -> Result<String> {
        let marker = self.expect(&[ValueKind::String, ValueKind::Binary])?;
        self.current = Some(Token::String);
        let bytes = self.read_payload(marker)?;
        String::from_utf8(bytes).map_err(|err| err.utf8_error().into())
    }

    fn read_value_at(&mut self, depth: usize) -> Result<Value> {
        if depth > MAX_VALUE_DEPTH {
            return Err(CodecError::NestingTooDeep(MAX_VALUE_DEPTH).into());
        }
        let marker = self.peek_marker()?;
        let value = match kind_of(marker)? {
            ValueKind::Nil => {
                self.read_null()?;
                Value::Null
            }
            ValueKind::Boolean => Value::Boolean(self.read_boolean()?),
            ValueKind::Integer => {
                let value = self.read_integer()?;
                if let Ok(value) = i64::try_from(value) {
                    Value::Integer(value)
                } else {
                    Value::Unsigned(u64::try_from(value).map_err(|_| {
                        Error::IntegerOverflow {
                            target: "u64",
                        }
                    })?)
                }
            }
            ValueKind::Float => Value::Float(self.read_double()?),
            ValueKind::String => Value::String(self.read_string()?),
            ValueKind::Binary => Value::Binary(self.read_binary()?),
            ValueKind::Array => {
                self.begin_array()?;
                let mut items = Vec::new();
                while self.has_next_element()? {
                    items.push(self.read_value_at(depth + 1)?);
                }
                self.finish_value_container(ContainerKind::Array)?;
                Value::Array(items)
            }
            ValueKind::Map => {
                self.begin_object()?;
                let mut map = Map::new();
                while self.has_next_field()? {
                    let key = self.next_field()?;
                    let item = self.read_value_at(depth + 1)?;
                    map.insert(key, item);
                }
                self.finish_value_container(ContainerKind::Object)?;
                Value::Object(map)
            }
            ValueKind::Extension => {
                self.expect(&[ValueKind::Extension])?;
                let meta = decode::read_ext_meta(&mut self.source)?;
                Value::Extension(meta.typeid, self.source.read_payload(meta.size)?)
            }
        };
        Ok(value)
    }

    /// Closes a container read by `read_value`, which must have been read to
    /// its declared end.
    fn finish_value_container(&mut self, kind: ContainerKind) -> Result<()> {
        if self.frames.has_remaining() {
            return Err(Error::unexpected_eof());
        }
        self.end(kind)
    }

    /// Discards one value and everything nested in it. Works from a count of
    /// values still owed rather than recursion, so hostile nesting depth
    /// cannot exhaust the stack.
    #[allow(clippy::enum_glob_use)]
    fn discard_value(&mut self) -> Result<()> {
        use Marker::*;

        let mut pending: u64 = 1;
        while pending > 0 {
            pending -= 1;
            let marker = self.peek_marker()?;
            self.source.consume(1);
            match marker {
                FixPos(_) | FixNeg(_) | Null | True | False => {}
                U8 | I8 => self.source.discard(1)?,
                U16 | I16 => self.source.discard(2)?,
                U32 | I32 | F32 => self.source.discard(4)?,
                U64 | I64 | F64 => self.source.discard(8)?,
                FixStr(len) => self.source.discard(u64::from(len))?,
                Str8 | Bin8 => self.discard_sized(1, 0)?,
                Str16 | Bin16 => self.discard_sized(2, 0)?,
                Str32 | Bin32 => self.discard_sized(4, 0)?,
                FixArray(len) => pending += u64::from(len),
                Array16 => pending = pending.saturating_add(self.source.read_length(2)?),
                Array32 => pending = pending.saturating_add(self.source.read_length(4)?),
                FixMap(len) => pending += 2 * u64::from(len),
                Map16 => pending = pending.saturating_add(2 * self.source.read_length(2)?),
                Map32 => pending = pending.saturating_add(2 * self.source.read_length(4)?),
                // type byte plus fixed payload
                FixExt1 => self.source.discard(2)?,
                FixExt2 => self.source.discard(3)?,
                FixExt4 => self.source.discard(5)?,
                FixExt8 => self.source.discard(9)?,
                FixExt16 => self.source.discard(17)?,
                Ext8 => self.discard_sized(1, 1)?,
                Ext16 => self.discard_sized(2, 1)?,
                Ext32 => self.discard_sized(4, 1)?,
                Reserved => return Err(CodecError::ReservedMarker.into()),
            }
        }
        Ok(())
    }

    /// Discards a payload whose length is stored in `width` bytes, plus
    /// `extra` bytes that follow the length.
    fn discard_sized(&mut self, width: usize, extra: u64) -> Result<()> {
        let len = self.source.read_length(width)?;
        Ok(self.source.discard(len + extra)?)
    }
}

fn kind_of(marker: Marker) -> Result<ValueKind> {
    ValueKind::from_marker(marker).ok_or_else(|| CodecError::ReservedMarker.into())
}

impl<R: BufRead> TokenRead for MsgpackReader<R> {
    fn begin_array(&mut self) -> Result<()> {
        self.begin(ContainerKind::Array)
    }

    fn end_array(&mut self) -> Result<()> {
        self.end(ContainerKind::Array)
    }

    fn has_next_element(&mut self) -> Result<bool> {
        Ok(self.frames.has_remaining() && self.source.has_remaining()?)
    }

    fn begin_object(&mut self) -> Result<()> {
        self.begin(ContainerKind::Object)
    }

    fn end_object(&mut self) -> Result<()> {
        self.end(ContainerKind::Object)
    }

    fn has_next_field(&mut self) -> Result<bool> {
        Ok(self.frames.has_remaining() && self.source.has_remaining()?)
    }

    fn next_field(&mut self) -> Result<String> {
        self.frames.consume_field()?;
        self.read_text()
    }

    fn is_null_value(&mut self) -> Result<bool> {
        Ok(self.peek_marker()? == Marker::Null)
    }

    fn read_null(&mut self) -> Result<()> {
        self.expect(&[ValueKind::Nil])?;
        self.current = Some(Token::Null);
        Ok(decode::read_nil(&mut self.source)?)
    }

    fn read_boolean(&mut self) -> Result<bool> {
        self.expect(&[ValueKind::Boolean])?;
        self.current = Some(Token::Boolean);
        Ok(decode::read_bool(&mut self.source)?)
    }

    fn read_int(&mut self) -> Result<i32> {
        let value = self.read_integer()?;
        i32::try_from(value).map_err(|_| Error::IntegerOverflow { target: "i32" })
    }

    fn read_long(&mut self) -> Result<i64> {
        let value = self.read_integer()?;
        i64::try_from(value).map_err(|_| Error::IntegerOverflow { target: "i64" })
    }

    #[allow(clippy::cast_precision_loss)]
    fn read_double(&mut self) -> Result<f64> {
        let marker = self.expect(&[ValueKind::Float, ValueKind::Integer])?;
        self.current = Some(Token::Number);
        let value = match marker {
            Marker::F32 => f64::from(decode::read_f32(&mut self.source)?),
            Marker::F64 => decode::read_f64(&mut self.source)?,
            _ => decode::read_int::<i128, _>(&mut self.source)? as f64,
        };
        Ok(value)
    }

    fn read_decimal(&mut self) -> Result<BigDecimal> {
        let marker = self.expect(&[ValueKind::Integer, ValueKind::String, ValueKind::Float])?;
        self.current = Some(Token::Number);
        match kind_of(marker)? {
            ValueKind::Integer => {
                let value = decode::read_int::<i128, _>(&mut self.source)?;
                Ok(BigDecimal::new(BigInt::from(value), 0))
            }
            ValueKind::Float => {
                let value = match marker {
                    Marker::F32 => f64::from(decode::read_f32(&mut self.source)?),
                    _ => decode::read_f64(&mut self.source)?,
                };
                BigDecimal::from_f64(value).ok_or_else(|| {
                    Error::from(ParseBigDecimalError::Other(format!("non-finite float {value}")))
                })
            }
            _ => {
                let bytes = self.read_payload(marker)?;
                Ok(BigDecimal::from_str(str::from_utf8(&bytes)?)?)
            }
        }
    }

    fn read_big_integer(&mut self) -> Result<BigInt> {
        Ok(BigInt::from(self.read_integer()?))
    }

    fn read_string(&mut self) -> Result<String> {
        self.read_text()
    }

    fn read_binary(&mut self) -> Result<Vec<u8>> {
        let marker = self.expect(&[ValueKind::Binary, ValueKind::String])?;
        self.current = Some(Token::String);
        self.read_payload(marker)
    }

    fn read_raw(&mut self) -> Result<BString> {
        let marker = self.expect(&[ValueKind::String, ValueKind::Binary])?;
        self.current = Some(Token::String);
        Ok(BString::from(self.read_payload(marker)?))
    }

    fn read_value(&mut self) -> Result<Value> {
        self.read_value_at(0)
    }

    fn skip_value(&mut self) -> Result<()> {
        let marker = self.peek_marker()?;
        kind_of(marker)?;
        self.frames.consume_element();
        self.discard_value()
    }

    fn unmapped_field(&mut self, name: &str) -> Result<()> {
        let offset = self.offset();
        if self.fail_on_unknown {
            return Err(Error::UnknownField {
                name: name.to_owned(),
                offset,
            });
        }
        debug!(field = name, offset, "ignoring unknown field");
        Ok(())
    }

    fn location(&self) -> String {
        self.offset().to_string()
    }

    fn current_token(&self) -> Option<Token> {
        self.current
    }
}
