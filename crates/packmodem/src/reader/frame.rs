use crate::{ContainerKind, Error, Result};

/// Per-container read state: how many elements (arrays) or pairs (objects)
/// the header declared and have not been consumed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Frame {
    pub(crate) kind: ContainerKind,
    pub(crate) remaining: u32,
}

/// One frame per open container; the last frame is the innermost one.
#[derive(Debug, Default)]
pub(crate) struct FrameStack {
    frames: Vec<Frame>,
}

impl FrameStack {
    pub(crate) fn push(&mut self, kind: ContainerKind, remaining: u32) {
        self.frames.push(Frame { kind, remaining });
    }

    /// Pops the innermost frame, which must be of `kind`.
    pub(crate) fn pop(&mut self, kind: ContainerKind) -> Result<Frame> {
        match self.frames.pop() {
            Some(frame) if frame.kind == kind => Ok(frame),
            Some(frame) => {
                self.frames.push(frame);
                Err(Error::IllegalState(
                    "container end does not match the open container",
                ))
            }
            None => Err(Error::IllegalState("container end with no open container")),
        }
    }

    #[inline]
    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub(crate) fn has_remaining(&self) -> bool {
        self.frames.last().is_some_and(|frame| frame.remaining > 0)
    }

    /// Accounts for one value read at the current level. Only arrays count
    /// values; object pairs are counted by [`consume_field`](Self::consume_field).
    pub(crate) fn consume_element(&mut self) {
        if let Some(frame) = self
            .frames
            .last_mut()
            .filter(|frame| frame.kind == ContainerKind::Array)
        {
            frame.remaining = frame.remaining.saturating_sub(1);
        }
    }

    pub(crate) fn consume_field(&mut self) -> Result<()> {
        match self.frames.last_mut() {
            Some(frame) if frame.kind == ContainerKind::Object => {
                frame.remaining = frame.remaining.saturating_sub(1);
                Ok(())
            }
            _ => Err(Error::IllegalState("next_field called outside an object")),
        }
    }
}
