use std::{fmt, time::SystemTime};

use crate::{Error, RANDOM_LEN, TIME_LEN, TIMESTAMP_MAX, base32};

/// A ULID timestamp: milliseconds since the Unix epoch, limited to 48 bits.
///
/// The conversions from signed and floating point values reject everything that is
/// negative, not a whole number, or larger than 2<sup>48</sup>-1.
///
/// # Example
///
/// ```
/// use ulid_kit::Timestamp;
///
/// assert!(Timestamp::try_from(1_469_918_176_385_u64).is_ok());
/// assert!(Timestamp::try_from(-1_i64).is_err());
/// assert!(Timestamp::try_from(100.1_f64).is_err());
/// assert!(Timestamp::try_from(f64::INFINITY).is_err());
/// ```
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The smallest timestamp, the Unix epoch.
    pub const MIN: Self = Self(0);

    /// The largest timestamp, 2<sup>48</sup>-1 milliseconds after the Unix epoch.
    pub const MAX: Self = Self(TIMESTAMP_MAX);

    /// Creates a timestamp, checking the 48 bit range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when `millis` is larger than [`Timestamp::MAX`].
    pub const fn new(millis: u64) -> Result<Self, Error> {
        if millis > TIMESTAMP_MAX {
            Err(Error::InvalidArgument("cannot encode time greater than 2^48-1"))
        } else {
            Ok(Self(millis))
        }
    }

    #[must_use]
    pub const fn millis(self) -> u64 {
        self.0
    }

    /// Encodes the timestamp into exactly `length` base32 characters, most significant first.
    ///
    /// Digits which do not fit into `length` characters are dropped from the front.
    ///
    /// # Example
    ///
    /// ```
    /// use ulid_kit::Timestamp;
    ///
    /// let t = Timestamp::new(1_469_918_176_385).unwrap();
    ///
    /// assert_eq!(t.encode(10), "01ARYZ6S41");
    /// ```
    #[must_use]
    pub fn encode(self, length: usize) -> String {
        let mut chars = vec![base32::ALPHABET[0]; length];
        let mut n = self.0;

        for c in chars.iter_mut().rev() {
            *c = base32::ALPHABET[(n % 32) as usize];
            n /= 32;
        }

        // Safety: Only characters from the ASCII alphabet are written
        unsafe { String::from_utf8_unchecked(chars) }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for Timestamp {
    type Error = Error;
    fn try_from(millis: u64) -> Result<Self, Self::Error> {
        Self::new(millis)
    }
}

impl TryFrom<i64> for Timestamp {
    type Error = Error;
    fn try_from(millis: i64) -> Result<Self, Self::Error> {
        let millis = u64::try_from(millis).or(Err(Error::InvalidArgument("time must be positive")))?;
        Self::new(millis)
    }
}

impl TryFrom<f64> for Timestamp {
    type Error = Error;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn try_from(millis: f64) -> Result<Self, Self::Error> {
        if millis.is_nan() {
            Err(Error::InvalidArgument("time must be a number"))
        } else if millis > TIMESTAMP_MAX as f64 {
            Err(Error::InvalidArgument("cannot encode time greater than 2^48-1"))
        } else if millis < 0.0 {
            Err(Error::InvalidArgument("time must be positive"))
        } else if millis.fract() != 0.0 {
            Err(Error::InvalidArgument("time must be an integer"))
        } else {
            // In range and integral, so the cast is exact
            Ok(Self(millis as u64))
        }
    }
}

impl From<Timestamp> for u64 {
    fn from(timestamp: Timestamp) -> Self {
        timestamp.0
    }
}

/// Encodes a millisecond timestamp into `length` base32 characters.
///
/// The standard ULID uses a length of 10. If `length` is too short for the value,
/// the high order digits are silently truncated.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `timestamp` exceeds 2<sup>48</sup>-1.
/// For negative or fractional inputs go through [`Timestamp::try_from`].
///
/// # Example
///
/// ```
/// assert_eq!(ulid_kit::encode_time(1469918176385, 10).unwrap(), "01ARYZ6S41");
/// assert_eq!(ulid_kit::encode_time(1470264322240, 12).unwrap(), "0001AS99AA60");
/// assert!(ulid_kit::encode_time(1 << 48, 10).is_err());
/// ```
pub fn encode_time(timestamp: u64, length: usize) -> Result<String, Error> {
    Ok(Timestamp::new(timestamp)?.encode(length))
}

/// Extracts the millisecond timestamp from a 26 character ULID string.
///
/// Only the first 10 characters are inspected, and they must be in the canonical upper case alphabet.
///
/// # Errors
///
/// Returns [`Error::InvalidEncoding`] if the string has the wrong length, if one
/// of the timestamp characters is outside the alphabet, or if the timestamp is larger than 2<sup>48</sup>-1.
///
/// # Example
///
/// ```
/// assert_eq!(ulid_kit::decode_time("7ZZZZZZZZZZZZZZZZZZZZZZZZZ"), Ok(281474976710655));
/// assert!(ulid_kit::decode_time("80000000000000000000000000").is_err());
// cspell:disable-next-line
/// assert!(ulid_kit::decode_time("01aryz6s41yyyyyyyyyyyyyyyy").is_err());
/// ```
pub fn decode_time(id: &str) -> Result<u64, Error> {
    if id.len() != TIME_LEN + RANDOM_LEN {
        return Err(Error::InvalidEncoding("malformed ulid"));
    }

    let mut time: u64 = 0;

    for &c in &id.as_bytes()[..TIME_LEN] {
        let value = base32::canonical_digit(c).ok_or(Error::InvalidEncoding("invalid character found"))?;
        time = (time << 5) | u64::from(value);
    }

    if time > TIMESTAMP_MAX {
        return Err(Error::InvalidEncoding("malformed ulid, timestamp too large"));
    }

    Ok(time)
}

/// A source of the current time in milliseconds since the Unix epoch.
///
/// Generators consult it whenever no explicit seed time is given.
///
/// # Example
///
/// ```
/// struct FixedClock(u64);
///
/// impl ulid_kit::TimeSource for FixedClock {
///     fn now_millis(&mut self) -> u64 {
///         self.0
///     }
/// }
/// ```
pub trait TimeSource {
    fn now_millis(&mut self) -> u64;
}

/// The wall clock.
///
/// Times before the Unix epoch are reported as 0.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now_millis(&mut self) -> u64 {
        SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_or(0, |since_epoch| u64::try_from(since_epoch.as_millis()).unwrap_or(u64::MAX))
    }
}

impl<F: FnMut() -> u64> TimeSource for F {
    fn now_millis(&mut self) -> u64 {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_time() {
        assert_eq!(encode_time(1_469_918_176_385, 10), Ok("01ARYZ6S41".to_string()));
        assert_eq!(encode_time(1_470_264_322_240, 12), Ok("0001AS99AA60".to_string()));
        assert_eq!(encode_time(0, 10), Ok("0000000000".to_string()));
        assert_eq!(encode_time(TIMESTAMP_MAX, 10), Ok("7ZZZZZZZZZ".to_string()));
        assert_eq!(encode_time(5, 0), Ok(String::new()));
    }

    #[test]
    fn test_encode_time_truncates() {
        assert_eq!(encode_time(1_470_118_279_201, 8), Ok("AS4Y1E11".to_string()));
    }

    #[test]
    fn test_encode_time_rejects() {
        assert!(encode_time(1 << 48, 8).unwrap_err().is_invalid_argument());
        assert!(encode_time(u64::MAX, 10).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_timestamp_conversions() {
        assert_eq!(Timestamp::try_from(150_000_u64).map(u64::from), Ok(150_000));
        assert_eq!(Timestamp::try_from(150_000_i64).map(u64::from), Ok(150_000));
        assert_eq!(Timestamp::try_from(150_000.0_f64).map(u64::from), Ok(150_000));
        assert_eq!(Timestamp::try_from(281_474_976_710_655.0_f64), Ok(Timestamp::MAX));

        assert!(Timestamp::try_from(-1_i64).unwrap_err().is_invalid_argument());
        assert!(Timestamp::try_from(-1.0_f64).unwrap_err().is_invalid_argument());
        assert!(Timestamp::try_from(100.1_f64).unwrap_err().is_invalid_argument());
        assert!(Timestamp::try_from(f64::INFINITY).unwrap_err().is_invalid_argument());
        assert!(Timestamp::try_from(f64::NEG_INFINITY).unwrap_err().is_invalid_argument());
        assert!(Timestamp::try_from(f64::NAN).unwrap_err().is_invalid_argument());
        assert!(Timestamp::try_from(281_474_976_710_656.0_f64).unwrap_err().is_invalid_argument());
        assert!(Timestamp::try_from(1_i64 << 48).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_decode_time() {
        assert_eq!(decode_time("7ZZZZZZZZZZZZZZZZZZZZZZZZZ"), Ok(281_474_976_710_655));
        assert_eq!(decode_time("01ARYZ6S41YYYYYYYYYYYYYYYY"), Ok(1_469_918_176_385));
        assert_eq!(decode_time("00000000000000000000000000"), Ok(0));
    }

    #[test]
    fn test_decode_time_rejects() {
        assert!(decode_time("FFFF").unwrap_err().is_invalid_encoding());
        assert!(decode_time("80000000000000000000000000").unwrap_err().is_invalid_encoding());
        assert!(decode_time("&1ARZ3NDEKTSV4RRFFQ69G5FAV").unwrap_err().is_invalid_encoding());
        assert!(decode_time("01ARZ3NDEKTSV4RRFFQ69G5FAVX").unwrap_err().is_invalid_encoding());
    }

    #[test]
    fn test_decode_time_rejects_lower_case() {
        // cspell:disable
        assert!(decode_time("01aryz6s41yyyyyyyyyyyyyyyy").unwrap_err().is_invalid_encoding());
        assert!(decode_time("01ARYz6S41YYYYYYYYYYYYYYYY").unwrap_err().is_invalid_encoding());
        // Lower case in the random part is never inspected.
        assert_eq!(decode_time("01ARYZ6S41yyyyyyyyyyyyyyyy"), Ok(1_469_918_176_385));
        // cspell:enable
    }

    #[test]
    fn test_decode_time_ignores_random_part() {
        // cspell:disable-next-line
        assert_eq!(decode_time("01ARYZ6S41&&&&&&&&&&&&&&&&"), Ok(1_469_918_176_385));
    }

    #[test]
    fn test_system_clock() {
        // 1st January 2024
        assert!(SystemClock.now_millis() > 1_704_067_200_000);
    }
}
