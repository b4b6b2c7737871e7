use std::{io, str::Utf8Error};

use bigdecimal::ParseBigDecimalError;
use rmp::{
    decode::{NumValueReadError, ValueReadError},
    encode::ValueWriteError,
};
use thiserror::Error;

use crate::token::ValueKind;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors surfaced by [`MsgpackReader`](crate::MsgpackReader) and
/// [`MsgpackWriter`](crate::MsgpackWriter).
///
/// None of these are retried internally. After an error the reader or writer
/// should be considered spent and dropped.
#[derive(Error, Debug)]
pub enum Error {
    /// The transport or the MessagePack codec failed.
    #[error("i/o error: {0}")]
    Io(#[from] CodecError),
    /// The wire type of the next value is not one the call accepts.
    #[error("expected {expected} but got {actual}")]
    TypeMismatch {
        expected: ValueKind,
        actual: ValueKind,
    },
    /// A field was not recognised and the reader is set to fail on unknown
    /// fields.
    #[error("unknown property '{name}' at {offset}")]
    UnknownField { name: String, offset: u64 },
    /// A dynamic value has no token-level encoding.
    #[error("unsupported type: {0}")]
    UnsupportedType(&'static str),
    /// A token call was made in a state where it has no meaning.
    #[error("illegal state: {0}")]
    IllegalState(&'static str),
    /// An integer did not fit the requested width.
    #[error("integer out of range for {target}")]
    IntegerOverflow { target: &'static str },
}

/// The underlying cause of an [`Error::Io`].
#[derive(Error, Debug)]
pub enum CodecError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Read(#[from] ValueReadError<io::Error>),
    #[error(transparent)]
    ReadNumber(#[from] NumValueReadError<io::Error>),
    #[error(transparent)]
    Write(#[from] ValueWriteError<io::Error>),
    #[error("invalid utf-8 in string payload: {0}")]
    Utf8(#[from] Utf8Error),
    #[error("invalid decimal literal: {0}")]
    Decimal(#[from] ParseBigDecimalError),
    #[error("reserved marker byte 0xc1")]
    ReservedMarker,
    #[error("value nested deeper than {0} levels")]
    NestingTooDeep(usize),
}

macro_rules! impl_from_codec_error {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Error {
                fn from(err: $t) -> Self {
                    Error::Io(CodecError::from(err))
                }
            }
        )*
    };
}

impl_from_codec_error!(
    io::Error,
    ValueReadError<io::Error>,
    NumValueReadError<io::Error>,
    ValueWriteError<io::Error>,
    Utf8Error,
    ParseBigDecimalError,
);

impl Error {
    pub(crate) fn unexpected_eof() -> Self {
        io::Error::from(io::ErrorKind::UnexpectedEof).into()
    }
}
