use std::io::{self, BufRead, Read};

/// Byte source that tracks how many bytes have been consumed, for
/// diagnostics.
#[derive(Debug)]
pub(crate) struct CountingSource<R> {
    inner: R,
    consumed: u64,
}

impl<R> CountingSource<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self { inner, consumed: 0 }
    }

    #[inline]
    pub(crate) fn consumed(&self) -> u64 {
        self.consumed
    }

    pub(crate) fn get_ref(&self) -> &R {
        &self.inner
    }

    pub(crate) fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub(crate) fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: BufRead> CountingSource<R> {
    /// The next byte, without consuming it. `None` at end of input.
    pub(crate) fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.inner.fill_buf()?.first().copied())
    }

    pub(crate) fn has_remaining(&mut self) -> io::Result<bool> {
        Ok(!self.inner.fill_buf()?.is_empty())
    }

    /// Reads a big-endian length of `width` bytes (1, 2 or 4).
    pub(crate) fn read_length(&mut self, width: usize) -> io::Result<u64> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf[..width])?;
        Ok(buf[..width]
            .iter()
            .fold(0, |acc, byte| (acc << 8) | u64::from(*byte)))
    }

    /// Reads exactly `len` bytes. Never allocates more than the source
    /// actually yields, so a corrupt length cannot exhaust memory.
    pub(crate) fn read_payload(&mut self, len: u32) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.by_ref().take(u64::from(len)).read_to_end(&mut buf)?;
        if buf.len() as u64 == u64::from(len) {
            Ok(buf)
        } else {
            Err(io::ErrorKind::UnexpectedEof.into())
        }
    }

    pub(crate) fn discard(&mut self, mut len: u64) -> io::Result<()> {
        while len > 0 {
            let available = self.inner.fill_buf()?.len();
            if available == 0 {
                return Err(io::ErrorKind::UnexpectedEof.into());
            }
            let step = usize::try_from(len).map_or(available, |len| len.min(available));
            self.consume(step);
            len -= step as u64;
        }
        Ok(())
    }
}

impl<R: Read> Read for CountingSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.consumed += n as u64;
        Ok(n)
    }
}

impl<R: BufRead> BufRead for CountingSource<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt);
        self.consumed += amt as u64;
    }
}
