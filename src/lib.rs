//! # ULIDs as Text
//!
//! This crate generates and manipulates ULIDs (Universally Unique Lexicographically Sortable Identifiers)
//! in their 26 character base32 text form: a 48 bit millisecond timestamp in the first 10 characters,
//! followed by 80 bits of randomness in the remaining 16 characters.
//!
//! ## Generating ULIDs
//!
//! ```
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let id = ulid_kit::generate(None)?;
//!
//! assert!(ulid_kit::is_valid(&id));
//! # Ok(()) }
//! ```
//!
//! ULIDs from [`generate()`] are not ordered within the same millisecond. When that
//! matters, keep one [`MonotonicGenerator`] around and use it for all ULIDs of a sequence:
//!
//! ```
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! use ulid_kit::MonotonicGenerator;
//!
//! let mut generator = MonotonicGenerator::new(ulid_kit::detect_prng());
//!
//! let u1 = generator.generate(Some(150_000))?;
//! let u2 = generator.generate(Some(150_000))?;
//!
//! assert!(u1 < u2);
//! # Ok(()) }
//! ```
//!
//! A `MonotonicGenerator` is not synchronized. Put it behind a `Mutex` to share it between threads.
//!
//! ## Timestamps
//!
//! ```
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let id = ulid_kit::generate(Some(1469918176385))?;
//!
//! assert_eq!(&id[..10], ulid_kit::encode_time(1469918176385, 10)?);
//! assert_eq!(ulid_kit::decode_time(&id)?, 1469918176385);
//! # Ok(()) }
//! ```
//!
//! ## Converting to and from UUIDs
//!
//! ```
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
// cspell:disable-next-line
//! let uuid = ulid_kit::ulid_to_uuid("01JB05JV6H9ZA2YQ6X3K1DAGVA")?;
//!
//! assert_eq!(uuid, "0192c059-6cd1-4fd4-2f5c-dd1cc2d5436a");
// cspell:disable-next-line
//! assert_eq!(ulid_kit::uuid_to_ulid(&uuid)?, "01JB05JV6H9ZA2YQ6X3K1DAGVA");
//! # Ok(()) }
//! ```
//!
//! ## Feature Flags
//!
//! - **`rand`**: Provides the default random source ([`detect_prng`]) based on the `rand` crate, enabled by default.
//! - **`serde`**: Serialization and deserialization of [`Ulid`] via `Serde`, optional.
//! - **`tracing`**: Trace spans and debug events for the generators via `tracing`, optional.
//!

mod base32;
mod convert;
mod error;
mod generator;
mod random;
#[cfg(feature = "serde")]
mod serde;
mod time;
mod ulid;
mod util;

pub use convert::{ulid_to_uuid, uuid_to_ulid};
pub use error::Error;
#[cfg(feature = "rand")]
pub use generator::generate;
pub use generator::{Generator, MonotonicGenerator};
#[cfg(feature = "rand")]
pub use random::{CryptoRandom, detect_prng};
pub use random::{RandomSource, encode_random, random_char};
pub use time::{SystemClock, TimeSource, Timestamp, decode_time, encode_time};
pub use ulid::Ulid;

/// Number of characters holding the timestamp.
pub const TIME_LEN: usize = 10;
/// Number of characters holding the randomness.
pub const RANDOM_LEN: usize = 16;
/// Number of characters of a ULID.
pub const ULID_LEN: usize = TIME_LEN + RANDOM_LEN;

const RANDOM_BITS: u32 = 80;
const RANDOM_MASK: u128 = (1 << RANDOM_BITS) - 1;

const TIMESTAMP_BITS: u32 = 48;
const TIMESTAMP_MAX: u64 = (1 << TIMESTAMP_BITS) - 1;

/// Checks a ULID string for the right length and alphabet.
///
/// Upper and lower case characters are both accepted. The timestamp range is not checked,
/// so a string starting with `8` or higher still counts as valid here.
///
/// # Example
///
/// ```
// cspell:disable-next-line
/// assert!(ulid_kit::is_valid("01ARYZ6S41TSV4RRFFQ69G5FAV"));
// cspell:disable-next-line
/// assert!(ulid_kit::is_valid("01aryz6s41tsv4rrffq69g5fav"));
///
// cspell:disable-next-line
/// assert!(!ulid_kit::is_valid("01ARYZ6S41TSV4RRFFQ69G5FA"));
// cspell:disable-next-line
/// assert!(!ulid_kit::is_valid("01ARYZ6S41TSV4RRFFQ69G5FAU"));
/// ```
#[must_use]
pub fn is_valid(id: &str) -> bool {
    id.len() == ULID_LEN && id.bytes().all(base32::is_valid_char)
}

/// Repairs common transcription mistakes in a ULID string.
///
/// `i`, `I`, `l` and `L` become `1`, `o` and `O` become `0`, and hyphens are removed.
/// Everything else is passed through unchanged, so validate the result afterwards.
///
/// # Example
///
/// ```
// cspell:disable-next-line
/// let fixed = ulid_kit::fix_base32("o1ARYZ-6S4i-TSV4-RRFF-Q69G5FAV");
///
// cspell:disable-next-line
/// assert_eq!(fixed, "01ARYZ6S41TSV4RRFFQ69G5FAV");
/// assert!(ulid_kit::is_valid(&fixed));
/// ```
#[must_use]
pub fn fix_base32(id: &str) -> String {
    base32::fix(id)
}

/// Increments a base32 string by one, carrying from the last character to the first.
///
/// Only the canonical upper case alphabet is accepted.
///
/// # Errors
///
/// - [`Error::Overflow`] if every character already is `Z`, since the string cannot grow.
/// - [`Error::InvalidEncoding`] if a character is outside the alphabet.
///
/// # Example
///
/// ```
/// assert_eq!(ulid_kit::increment_base32("A109C"), Ok("A109D".to_string()));
/// assert_eq!(ulid_kit::increment_base32("A1YZZ"), Ok("A1Z00".to_string()));
/// assert_eq!(ulid_kit::increment_base32("ZZZ"), Err(ulid_kit::Error::Overflow));
/// ```
pub fn increment_base32(s: &str) -> Result<String, Error> {
    base32::increment_str(s)
}

/// Encodes arbitrary bytes as base32 without padding.
///
/// # Example
///
/// ```
/// assert_eq!(ulid_kit::base32_encode(&[0xFF; 16]), "7ZZZZZZZZZZZZZZZZZZZZZZZZZ");
/// assert_eq!(ulid_kit::base32_encode(&[]), "");
/// ```
#[must_use]
pub fn base32_encode(bytes: &[u8]) -> String {
    base32::encode(bytes)
}

/// Decodes a base32 string (any case) produced by [`base32_encode`] back into bytes.
///
/// # Errors
///
/// Returns [`Error::InvalidEncoding`] if a character is outside the alphabet.
///
/// # Example
///
/// ```
/// assert_eq!(ulid_kit::base32_decode("7z"), Ok(vec![0xFF]));
/// assert!(ulid_kit::base32_decode("7U").is_err());
/// ```
pub fn base32_decode(s: &str) -> Result<Vec<u8>, Error> {
    base32::decode(s)
}
