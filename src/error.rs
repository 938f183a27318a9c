use thiserror::Error;

/// Errors that can occur when encoding, decoding or generating ULIDs.
///
/// None of these are transient: each one reflects a value handed in by the caller.
#[derive(Debug, Error, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Error {
    /// A caller supplied value lies outside the accepted domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// A character is outside the base32 alphabet, or a decoded value is out of range.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(&'static str),
    /// Incrementing would exceed the fixed width of the value.
    #[error("cannot increment: value would overflow its fixed width")]
    Overflow,
}

impl Error {
    /// Returns `true` for [`Error::InvalidArgument`].
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Returns `true` for [`Error::InvalidEncoding`].
    #[must_use]
    pub const fn is_invalid_encoding(&self) -> bool {
        matches!(self, Self::InvalidEncoding(_))
    }
}
