use std::{
    fmt,
    str::FromStr,
    time::{Duration, SystemTime},
};

use uuid::Uuid;

use crate::{Error, RANDOM_BITS, RANDOM_MASK, TIMESTAMP_BITS, base32, convert};

/// A ULID as a 128 bit value.
///
/// The string functions of this crate work on the text form directly. `Ulid` is the
/// typed counterpart for code that wants to store, compare or inspect ULIDs.
/// Its text form is always the canonical, upper case, 26 character string.
///
/// # Example
///
/// ```
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// use ulid_kit::Ulid;
///
// cspell:disable-next-line
/// let u: Ulid = "01ARYZ6S41TSV4RRFFQ69G5FAV".parse()?;
///
/// assert_eq!(u.timestamp(), 1469918176385);
// cspell:disable-next-line
/// assert_eq!(u.to_string(), "01ARYZ6S41TSV4RRFFQ69G5FAV");
/// # Ok(()) }
/// ```
#[derive(Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Ulid(u128);

impl Ulid {
    /// The smallest ULID, `"00000000000000000000000000"`.
    pub const MIN: Self = Self(0);

    /// The largest ULID, `"7ZZZZZZZZZZZZZZZZZZZZZZZZZ"`.
    pub const MAX: Self = Self(u128::MAX);

    /// Returns the timestamp part in milliseconds since the Unix epoch.
    #[must_use]
    pub const fn timestamp(self) -> u64 {
        (self.0 >> RANDOM_BITS) as u64
    }

    /// Returns the 80 bit random part.
    #[must_use]
    pub const fn randomness(self) -> u128 {
        self.0 & RANDOM_MASK
    }

    /// Returns the timestamp part as a [`SystemTime`], or `None` if it is not representable.
    #[must_use]
    pub fn datetime(self) -> Option<SystemTime> {
        SystemTime::UNIX_EPOCH.checked_add(Duration::from_millis(self.timestamp()))
    }

    /// Creates a `Ulid` from a timestamp and randomness parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the timestamp does not fit into 48 bits
    /// or the randomness does not fit into 80 bits.
    ///
    /// # Example
    ///
    /// ```
    /// use ulid_kit::Ulid;
    ///
    /// let u = Ulid::from_parts(1469918176385, 1).unwrap();
    ///
    /// assert_eq!(u.to_string(), "01ARYZ6S410000000000000001");
    /// assert!(Ulid::from_parts(1 << 48, 0).is_err());
    /// assert!(Ulid::from_parts(0, 1 << 80).is_err());
    /// ```
    pub const fn from_parts(timestamp: u64, randomness: u128) -> Result<Self, Error> {
        if (timestamp >> TIMESTAMP_BITS) != 0 {
            Err(Error::InvalidArgument("timestamp is too large"))
        } else if randomness > RANDOM_MASK {
            Err(Error::InvalidArgument("randomness is too large"))
        } else {
            Ok(Self(((timestamp as u128) << RANDOM_BITS) | randomness))
        }
    }

    /// Returns the bytes in network byte order (big endian).
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0.to_be_bytes()
    }

    /// Creates a `Ulid` from bytes in network byte order (big endian).
    ///
    /// # Example
    ///
    /// ```
    /// use ulid_kit::Ulid;
    ///
    /// let bytes = [1, 146, 192, 89, 108, 209, 79, 212, 47, 92, 221, 28, 194, 213, 67, 106];
    ///
    // cspell:disable-next-line
    /// assert_eq!(Ulid::from_bytes(bytes).to_string(), "01JB05JV6H9ZA2YQ6X3K1DAGVA");
    /// ```
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(u128::from_be_bytes(bytes))
    }

    #[must_use]
    pub const fn to_u128(self) -> u128 {
        self.0
    }

    #[must_use]
    pub const fn from_u128(n: u128) -> Self {
        Self(n)
    }

    /// Returns the same 128 bits as a [`Uuid`].
    #[must_use]
    pub const fn to_uuid(self) -> Uuid {
        Uuid::from_u128(self.0)
    }

    /// Returns the canonical lower case UUID text form of the same 128 bits.
    ///
    /// # Example
    ///
    /// ```
    /// use ulid_kit::Ulid;
    ///
    /// let u = Ulid::from_u128(1);
    ///
    /// assert_eq!(u.to_uuid_string(), "00000000-0000-0000-0000-000000000001");
    /// ```
    #[must_use]
    pub fn to_uuid_string(self) -> String {
        self.to_uuid().hyphenated().to_string()
    }
}

impl fmt::Debug for Ulid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ulid")
            .field("string", &self.to_string())
            .field("timestamp", &self.timestamp())
            .field("randomness", &format_args!("{:020X}", self.randomness()))
            .finish()
    }
}

impl fmt::Display for Ulid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&base32::encode(&self.to_bytes()))
    }
}

impl FromStr for Ulid {
    type Err = Error;

    /// Parses a ULID string, in any case.
    ///
    /// Transcription mistakes like `O` for `0` are not repaired; see [`fix_base32`](crate::fix_base32).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = convert::decode_ulid(s)?;
        Ok(Self::from_bytes(bytes))
    }
}

impl From<Ulid> for u128 {
    fn from(ulid: Ulid) -> Self {
        ulid.to_u128()
    }
}

impl From<u128> for Ulid {
    fn from(n: u128) -> Self {
        Self::from_u128(n)
    }
}

impl From<Ulid> for [u8; 16] {
    fn from(ulid: Ulid) -> Self {
        ulid.to_bytes()
    }
}

impl From<[u8; 16]> for Ulid {
    fn from(bytes: [u8; 16]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Ulid> for Uuid {
    fn from(ulid: Ulid) -> Self {
        ulid.to_uuid()
    }
}

impl From<Uuid> for Ulid {
    fn from(uuid: Uuid) -> Self {
        Self::from_u128(uuid.as_u128())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // cspell:disable-next-line
    const S: &str = "01JB07NQ643XZXVHZDY0JNYR02";
    const N: u128 = 2_091_207_293_934_528_941_058_695_985_186_693_122;

    #[test]
    fn test_parse_and_display() {
        let u: Ulid = S.parse().unwrap();
        assert_eq!(u.to_u128(), N);
        assert_eq!(u.to_string(), S);

        let lower: Ulid = S.to_lowercase().parse().unwrap();
        assert_eq!(lower, u);
    }

    #[test]
    fn test_parse_rejects() {
        assert!("".parse::<Ulid>().is_err());
        assert!("80000000000000000000000000".parse::<Ulid>().is_err());
        assert!("0000000000000000000000000U".parse::<Ulid>().is_err());
        assert!("0000000000000000000000000O".parse::<Ulid>().is_err());
        assert!("000000000000000000000000000".parse::<Ulid>().is_err());
    }

    #[test]
    fn test_min_max() {
        assert_eq!(Ulid::MIN.to_string(), "00000000000000000000000000");
        assert_eq!(Ulid::MAX.to_string(), "7ZZZZZZZZZZZZZZZZZZZZZZZZZ");
        assert_eq!(Ulid::MAX.timestamp(), (1 << 48) - 1);
        assert_eq!(Ulid::MAX.randomness(), (1 << 80) - 1);
    }

    #[test]
    fn test_parts() {
        let u = Ulid::from_u128(N);
        let v = Ulid::from_parts(u.timestamp(), u.randomness()).unwrap();
        assert_eq!(u, v);
        assert_eq!(u.datetime(), Some(SystemTime::UNIX_EPOCH + Duration::from_millis(u.timestamp())));
    }

    #[test]
    fn test_ordering_matches_text() {
        let a: Ulid = "01ARYZ6S41YYYYYYYYYYYYYYYZ".parse().unwrap();
        let b: Ulid = "01ARYZ6S41YYYYYYYYYYYYYYZ0".parse().unwrap();
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }

    #[test]
    fn test_uuid_conversions() {
        let u = Ulid::from_u128(N);
        let uuid = Uuid::from(u);
        assert_eq!(Ulid::from(uuid), u);
        assert_eq!(u.to_uuid_string(), uuid.hyphenated().to_string());
    }

    #[test]
    fn test_debug_fmt() {
        let u = Ulid::from_parts(1_469_918_176_385, 1).unwrap();

        assert_eq!(
            format!("{u:?}"),
            r#"Ulid { string: "01ARYZ6S410000000000000001", timestamp: 1469918176385, randomness: 00000000000000000001 }"#
        );
    }
}
