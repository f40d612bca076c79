use crate::decoder::Encoding;

/// Configuration options for the reader.
///
/// # Examples
///
/// ```rust
/// use jsonread::{Encoding, ReaderOptions};
///
/// let options = ReaderOptions {
///     reject_non_finite_numbers: true,
///     encoding: Some(Encoding::Utf16Le),
/// };
/// let err = jsonread::read_with_options(&b"N\0a\0N\0"[..], options).unwrap_err();
/// assert_eq!(err.to_string(), "Unexpected token 'N' at 1:1.");
/// ```
///
/// # Default
///
/// The default accepts the non-finite number literals and sniffs the encoding
/// of byte input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Whether to reject the `NaN`, `Infinity` and `-Infinity` literals.
    ///
    /// These are accepted by default as an extension to JSON and read as the
    /// corresponding `f64` values.
    ///
    /// # Default
    ///
    /// `false`
    pub reject_non_finite_numbers: bool,

    /// Decode byte input with this encoding instead of detecting it.
    ///
    /// A byte-order mark matching the encoding is still skipped. Native text
    /// input is never re-decoded, so this has no effect on `&str` input.
    ///
    /// # Default
    ///
    /// `None`
    pub encoding: Option<Encoding>,
}
