#![allow(clippy::struct_excessive_bools)]

/// Policies applied by readers and writers built from a
/// [`MsgpackAdapter`](crate::MsgpackAdapter).
///
/// # Examples
///
/// ```rust
/// use packmodem::{AdapterOptions, MsgpackAdapter};
///
/// let adapter = MsgpackAdapter::with_options(AdapterOptions {
///     fail_on_unknown: true,
///     ..Default::default()
/// });
/// assert!(adapter.options().serialize_nulls);
/// ```
///
/// # Default
///
/// `serialize_nulls` and `serialize_empty` default to `true`,
/// `fail_on_unknown` defaults to `false`.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(any(test, feature = "serde"), serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterOptions {
    /// Whether hosts should write fields whose value is null.
    ///
    /// The writer only reports this flag; the host decides whether to call
    /// `null_value` for a missing field.
    ///
    /// # Default
    ///
    /// `true`
    pub serialize_nulls: bool,

    /// Whether hosts should write empty arrays even when nulls are omitted.
    ///
    /// # Default
    ///
    /// `true`
    pub serialize_empty: bool,

    /// Whether `unmapped_field` fails with
    /// [`Error::UnknownField`](crate::Error::UnknownField) instead of being
    /// ignored.
    ///
    /// # Default
    ///
    /// `false`
    pub fail_on_unknown: bool,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            serialize_nulls: true,
            serialize_empty: true,
            fail_on_unknown: false,
        }
    }
}
