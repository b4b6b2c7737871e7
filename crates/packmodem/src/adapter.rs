use std::{
    io::{BufRead, BufReader, Read, Write},
    ops::{Deref, DerefMut},
};

use bstr::{BStr, BString};

use crate::{AdapterOptions, MsgpackReader, MsgpackWriter, PropertyNames};

/// Builds readers and writers that share one set of [`AdapterOptions`].
///
/// # Examples
///
/// ```
/// use packmodem::{MsgpackAdapter, TokenRead, TokenWrite};
///
/// let adapter = MsgpackAdapter::new();
/// let mut writer = adapter.bytes_writer();
/// writer.begin_array()?;
/// writer.value_bool(true)?;
/// writer.end_array()?;
///
/// let bytes = writer.into_result();
/// let mut reader = adapter.reader(&bytes[..]);
/// reader.begin_array()?;
/// assert!(reader.read_boolean()?);
/// reader.end_array()?;
/// # Ok::<(), packmodem::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MsgpackAdapter {
    options: AdapterOptions,
}

impl MsgpackAdapter {
    /// An adapter with the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: AdapterOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> AdapterOptions {
        self.options
    }

    /// A reader over any byte source, buffered internally.
    pub fn reader<R: Read>(&self, source: R) -> MsgpackReader<BufReader<R>> {
        self.reader_from_bufread(BufReader::new(source))
    }

    pub fn reader_from_bufread<R: BufRead>(&self, source: R) -> MsgpackReader<R> {
        MsgpackReader::new(source, self.options.fail_on_unknown)
    }

    pub fn reader_from_slice<'a>(&self, bytes: &'a [u8]) -> MsgpackReader<&'a [u8]> {
        self.reader_from_bufread(bytes)
    }

    /// A reader over the UTF-8 bytes of `text`.
    pub fn reader_from_str<'a>(&self, text: &'a str) -> MsgpackReader<&'a [u8]> {
        self.reader_from_slice(text.as_bytes())
    }

    pub fn writer<W: Write>(&self, sink: W) -> MsgpackWriter<W> {
        MsgpackWriter::new(
            sink,
            self.options.serialize_nulls,
            self.options.serialize_empty,
        )
    }

    #[must_use]
    pub fn buffered_writer(&self) -> BufferedWriter {
        BufferedWriter {
            inner: self.writer(Vec::new()),
        }
    }

    #[must_use]
    pub fn bytes_writer(&self) -> BytesWriter {
        BytesWriter {
            inner: self.writer(Vec::new()),
        }
    }

    #[must_use]
    pub fn properties(&self, names: &[&str]) -> PropertyNames {
        PropertyNames::new(names.iter().copied())
    }
}

/// A writer collecting into memory, exposing the output as a byte string.
#[derive(Debug)]
pub struct BufferedWriter {
    inner: MsgpackWriter<Vec<u8>>,
}

impl BufferedWriter {
    #[must_use]
    pub fn result(&self) -> &BStr {
        BStr::new(self.inner.get_ref())
    }

    #[must_use]
    pub fn into_result(self) -> BString {
        BString::from(self.inner.into_inner())
    }
}

impl Deref for BufferedWriter {
    type Target = MsgpackWriter<Vec<u8>>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for BufferedWriter {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

/// A writer collecting into memory, exposing the output as raw bytes.
#[derive(Debug)]
pub struct BytesWriter {
    inner: MsgpackWriter<Vec<u8>>,
}

impl BytesWriter {
    #[must_use]
    pub fn result(&self) -> &[u8] {
        self.inner.get_ref()
    }

    #[must_use]
    pub fn into_result(self) -> Vec<u8> {
        self.inner.into_inner()
    }
}

impl Deref for BytesWriter {
    type Target = MsgpackWriter<Vec<u8>>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for BytesWriter {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}
