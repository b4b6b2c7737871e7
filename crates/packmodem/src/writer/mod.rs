//! Push encoder producing MessagePack from token calls.
//!
//! A MessagePack container must state its size before its first element, but
//! a token writer only learns the size when `end_array` / `end_object` is
//! called. The writer therefore records each call as a pending action on the
//! innermost open [`OperationNode`] and writes nothing until the outermost
//! container closes. At that point the tree is emitted top down: every node
//! writes its header, now that its size is known, followed by its actions in
//! the order they were made.
//!
//! Open nodes live on a stack; the node below another is its parent. A
//! closed node becomes the last action of its parent. No value can be added
//! to the parent while a child is open, so sibling order is preserved.
mod node;

use std::io::Write;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{ToPrimitive as _, Zero as _};
use tracing::{debug, trace};

use self::node::{Action, OperationNode, Scalar};
use crate::{ContainerKind, Error, PropertyNames, Result, TokenWrite};

/// A non-zero decimal scaled by more than this many powers of ten is outside
/// 64-bit integer range.
const MAX_DECIMAL_SHIFT: u32 = 19;

/// Token writer that defers emission of each top-level container until it
/// closes.
///
/// # Examples
///
/// ```
/// use packmodem::{MsgpackWriter, TokenWrite};
///
/// let mut writer = MsgpackWriter::new(Vec::new(), true, true);
/// writer.begin_array()?;
/// writer.value_i32(1)?;
/// writer.begin_array()?;
/// writer.value_i32(2)?;
/// writer.end_array()?;
/// // nothing is written until the outermost array closes
/// assert!(writer.get_ref().is_empty());
/// writer.end_array()?;
/// assert_eq!(writer.get_ref(), &[0x92, 0x01, 0x91, 0x02]);
/// # Ok::<(), packmodem::Error>(())
/// ```
#[derive(Debug)]
pub struct MsgpackWriter<W> {
    sink: W,
    open: Vec<OperationNode>,
    serialize_nulls: bool,
    serialize_empty: bool,
}

impl<W: Write> MsgpackWriter<W> {
    pub fn new(sink: W, serialize_nulls: bool, serialize_empty: bool) -> Self {
        Self {
            sink,
            open: Vec::new(),
            serialize_nulls,
            serialize_empty,
        }
    }

    /// Number of containers currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Entries recorded so far in the innermost open container.
    #[cfg(any(test, feature = "fuzzing"))]
    #[must_use]
    pub fn pending_entries(&self) -> usize {
        self.open.last().map_or(0, OperationNode::len)
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Mutably borrows the sink. Bytes written through it land before any
    /// container still pending in the writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Returns the sink. Containers still open are discarded.
    pub fn into_inner(self) -> W {
        if !self.open.is_empty() {
            debug!(depth = self.open.len(), "discarding unclosed containers");
        }
        self.sink
    }

    fn begin(&mut self, kind: ContainerKind) {
        self.open.push(OperationNode::new(kind));
        trace!(?kind, depth = self.open.len(), "container begin");
    }

    fn end(&mut self, kind: ContainerKind) -> Result<()> {
        let Some(node) = self.open.pop() else {
            return Err(Error::IllegalState("container end with no open container"));
        };
        if node.kind() != kind {
            self.open.push(node);
            return Err(Error::IllegalState(
                "container end does not match the open container",
            ));
        }
        if kind == ContainerKind::Object && node.len() % 2 != 0 {
            self.open.push(node);
            return Err(Error::IllegalState("object closed with a key that has no value"));
        }
        trace!(?kind, depth = self.open.len(), "container end");

        match self.open.last_mut() {
            Some(parent) => parent.push(Action::Child(node)),
            None => {
                debug!(?kind, entries = node.len(), "emitting root container");
                node.emit(&mut self.sink)?;
            }
        }
        Ok(())
    }

    fn append(&mut self, scalar: Scalar) -> Result<()> {
        let node = self
            .open
            .last_mut()
            .ok_or(Error::IllegalState("value written with no open container"))?;
        node.push(Action::Scalar(scalar));
        Ok(())
    }
}

impl<W: Write> TokenWrite for MsgpackWriter<W> {
    fn begin_array(&mut self) -> Result<()> {
        self.begin(ContainerKind::Array);
        Ok(())
    }

    fn end_array(&mut self) -> Result<()> {
        self.end(ContainerKind::Array)
    }

    fn empty_array(&mut self) -> Result<()> {
        if self.open.is_empty() {
            return Scalar::EmptyArray.pack(&mut self.sink);
        }
        self.append(Scalar::EmptyArray)
    }

    fn begin_object(&mut self) -> Result<()> {
        self.begin(ContainerKind::Object);
        Ok(())
    }

    fn end_object(&mut self) -> Result<()> {
        self.end(ContainerKind::Object)
    }

    // Map keys are written through `value_str`, so names carry nothing here.
    fn name(&mut self, _name: &str) -> Result<()> {
        Ok(())
    }

    fn name_at(&mut self, _position: usize) -> Result<()> {
        Ok(())
    }

    fn all_names(&mut self, _names: &PropertyNames) -> Result<()> {
        Ok(())
    }

    fn null_value(&mut self) -> Result<()> {
        self.append(Scalar::Nil)
    }

    fn value_str(&mut self, value: &str) -> Result<()> {
        self.append(Scalar::Text(value.to_owned()))
    }

    fn value_bool(&mut self, value: bool) -> Result<()> {
        self.append(Scalar::Boolean(value))
    }

    fn value_i32(&mut self, value: i32) -> Result<()> {
        self.append(Scalar::Signed(i64::from(value)))
    }

    fn value_i64(&mut self, value: i64) -> Result<()> {
        self.append(Scalar::Signed(value))
    }

    fn value_u64(&mut self, value: u64) -> Result<()> {
        self.append(Scalar::Unsigned(value))
    }

    fn value_f32(&mut self, value: f32) -> Result<()> {
        self.append(Scalar::Float32(value))
    }

    fn value_f64(&mut self, value: f64) -> Result<()> {
        self.append(Scalar::Float64(value))
    }

    /// Integral decimals that fit 64 bits travel as integers; anything else
    /// travels as its decimal string, which `read_decimal` also accepts.
    fn value_decimal(&mut self, value: &BigDecimal) -> Result<()> {
        let (digits, scale) = value.as_bigint_and_exponent();
        if digits.is_zero() {
            return self.value_i64(0);
        }
        if let Some(shift) = u32::try_from(scale.unsigned_abs())
            .ok()
            .filter(|shift| *shift <= MAX_DECIMAL_SHIFT)
        {
            let power = BigInt::from(10u8).pow(shift);
            let integral = if scale <= 0 {
                Some(digits * power)
            } else if (&digits % &power).is_zero() {
                Some(digits / power)
            } else {
                None
            };
            if let Some(integral) = integral {
                if let Some(v) = integral.to_i64() {
                    return self.value_i64(v);
                }
                if let Some(v) = integral.to_u64() {
                    return self.value_u64(v);
                }
            }
        }
        self.value_str(&value.to_string())
    }

    fn value_big_integer(&mut self, value: &BigInt) -> Result<()> {
        if let Some(v) = value.to_i64() {
            self.value_i64(v)
        } else if let Some(v) = value.to_u64() {
            self.value_u64(v)
        } else {
            Err(Error::IntegerOverflow {
                target: "64-bit msgpack integer",
            })
        }
    }

    fn value_binary(&mut self, value: &[u8]) -> Result<()> {
        self.append(Scalar::Binary(value.to_vec()))
    }

    fn raw_value(&mut self, _value: &str) -> Result<()> {
        Ok(())
    }

    fn write_new_line(&mut self) -> Result<()> {
        Ok(())
    }

    fn mark_incomplete(&mut self) {}

    fn pretty(&mut self, _pretty: bool) {}

    fn serialize_nulls(&self) -> bool {
        self.serialize_nulls
    }

    fn set_serialize_nulls(&mut self, serialize_nulls: bool) {
        self.serialize_nulls = serialize_nulls;
    }

    fn serialize_empty(&self) -> bool {
        self.serialize_empty
    }

    fn set_serialize_empty(&mut self, serialize_empty: bool) {
        self.serialize_empty = serialize_empty;
    }

    fn flush(&mut self) -> Result<()> {
        Ok(self.sink.flush()?)
    }

    fn close(&mut self) -> Result<()> {
        self.flush()?;
        if self.open.is_empty() {
            Ok(())
        } else {
            Err(Error::IllegalState("writer closed with containers still open"))
        }
    }
}
