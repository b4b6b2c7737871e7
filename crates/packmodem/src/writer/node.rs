use std::{io::Write, mem, vec};

use rmp::encode;

use crate::{ContainerKind, Error, Result};

/// A scalar captured by value, packed when its container is emitted.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Scalar {
    Nil,
    Boolean(bool),
    Signed(i64),
    Unsigned(u64),
    Float32(f32),
    Float64(f64),
    Text(String),
    Binary(Vec<u8>),
    EmptyArray,
}

impl Scalar {
    pub(crate) fn pack<W: Write>(&self, sink: &mut W) -> Result<()> {
        match self {
            Self::Nil => encode::write_nil(sink)?,
            Self::Boolean(v) => encode::write_bool(sink, *v)?,
            Self::Signed(v) => {
                encode::write_sint(sink, *v)?;
            }
            Self::Unsigned(v) => {
                encode::write_uint(sink, *v)?;
            }
            Self::Float32(v) => encode::write_f32(sink, *v)?,
            Self::Float64(v) => encode::write_f64(sink, *v)?,
            Self::Text(v) => encode::write_str(sink, v)?,
            Self::Binary(v) => encode::write_bin(sink, v)?,
            Self::EmptyArray => {
                encode::write_array_len(sink, 0)?;
            }
        }
        Ok(())
    }
}

/// A pending write inside an [`OperationNode`].
#[derive(Debug)]
pub(crate) enum Action {
    Scalar(Scalar),
    Child(OperationNode),
}

/// One open array or map. Actions are kept in the order they were appended,
/// which is the order they are emitted in.
#[derive(Debug)]
pub(crate) struct OperationNode {
    kind: ContainerKind,
    actions: Vec<Action>,
}

impl OperationNode {
    pub(crate) fn new(kind: ContainerKind) -> Self {
        Self {
            kind,
            actions: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn kind(&self) -> ContainerKind {
        self.kind
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.actions.len()
    }

    pub(crate) fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Elements for an array, key/value pairs for a map.
    fn header_count(&self) -> Result<u32> {
        let count = match self.kind {
            ContainerKind::Array => self.actions.len(),
            ContainerKind::Object => self.actions.len() / 2,
        };
        u32::try_from(count).map_err(|_| Error::IllegalState("container exceeds 2^32 - 1 entries"))
    }

    fn write_header<W: Write>(&self, sink: &mut W) -> Result<()> {
        let count = self.header_count()?;
        match self.kind {
            ContainerKind::Array => encode::write_array_len(sink, count)?,
            ContainerKind::Object => encode::write_map_len(sink, count)?,
        };
        Ok(())
    }

    /// Writes the header, then every action in order, descending into
    /// children. Consumes the node. Nesting is walked with an explicit stack
    /// of action iterators, so depth is bounded by memory only.
    pub(crate) fn emit<W: Write>(mut self, sink: &mut W) -> Result<()> {
        self.write_header(sink)?;
        let mut stack: Vec<vec::IntoIter<Action>> = vec![mem::take(&mut self.actions).into_iter()];
        while let Some(actions) = stack.last_mut() {
            match actions.next() {
                Some(Action::Scalar(scalar)) => scalar.pack(sink)?,
                Some(Action::Child(mut child)) => {
                    child.write_header(sink)?;
                    stack.push(mem::take(&mut child.actions).into_iter());
                }
                None => {
                    stack.pop();
                }
            }
        }
        Ok(())
    }
}

impl Drop for OperationNode {
    // Children are detached before they drop, so freeing never recurses.
    fn drop(&mut self) {
        let mut pending = mem::take(&mut self.actions);
        while let Some(action) = pending.pop() {
            if let Action::Child(mut child) = action {
                pending.append(&mut child.actions);
            }
        }
    }
}
