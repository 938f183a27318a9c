use uuid::Uuid;

use crate::{Error, base32, util};

const INVALID_ULID: &str = "Invalid ULID";
const INVALID_UUID: &str = "Invalid UUID";

/// Decodes a strictly shaped ULID string into its 16 bytes.
///
/// The string must have 26 characters, all from the alphabet (any case), and the
/// first character must be `0` to `7` so the value fits into 128 bits.
pub fn decode_ulid(ulid: &str) -> Result<[u8; 16], Error> {
    let chars = util::as_array::<26>(ulid.as_bytes(), INVALID_ULID)?;

    let first_ok = matches!(chars[0], b'0'..=b'7');
    let rest_ok = chars.iter().all(|&c| base32::is_valid_char(c));

    if !(first_ok && rest_ok) {
        return Err(Error::InvalidArgument(INVALID_ULID));
    }

    let bytes = base32::decode(ulid)?;
    util::as_array::<16>(&bytes, INVALID_ULID).copied()
}

fn is_uuid_shaped(chars: &[u8; 36]) -> bool {
    chars.iter().enumerate().all(|(i, &c)| match i {
        8 | 13 | 18 | 23 => c == b'-',
        _ => c.is_ascii_hexdigit(),
    })
}

/// Converts a ULID string into the canonical UUID text form of the same 128 bits.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] unless `ulid` has 26 alphabet characters
/// (any case) and starts with `0` to `7`.
///
/// # Example
///
/// ```
// cspell:disable-next-line
/// let uuid = ulid_kit::ulid_to_uuid("01JB05JV6H9ZA2YQ6X3K1DAGVA").unwrap();
///
/// assert_eq!(uuid, "0192c059-6cd1-4fd4-2f5c-dd1cc2d5436a");
/// ```
pub fn ulid_to_uuid(ulid: &str) -> Result<String, Error> {
    let bytes = decode_ulid(ulid)?;
    Ok(Uuid::from_bytes(bytes).hyphenated().to_string())
}

/// Converts a UUID string into the ULID text form of the same 128 bits.
///
/// Only the hyphenated 36 character form is accepted, in any case.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `uuid` is not a hyphenated UUID.
///
/// # Example
///
/// ```
/// let ulid = ulid_kit::uuid_to_ulid("0192C059-6CD1-4FD4-2F5C-DD1CC2D5436A").unwrap();
///
// cspell:disable-next-line
/// assert_eq!(ulid, "01JB05JV6H9ZA2YQ6X3K1DAGVA");
/// ```
pub fn uuid_to_ulid(uuid: &str) -> Result<String, Error> {
    let chars = util::as_array::<36>(uuid.as_bytes(), INVALID_UUID)?;

    if !is_uuid_shaped(chars) {
        return Err(Error::InvalidArgument(INVALID_UUID));
    }

    let uuid = Uuid::try_parse(uuid).or(Err(Error::InvalidArgument(INVALID_UUID)))?;
    Ok(base32::encode(uuid.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // cspell:disable-next-line
    const ULID: &str = "01JB05JV6H9ZA2YQ6X3K1DAGVA";
    const UUID: &str = "0192c059-6cd1-4fd4-2f5c-dd1cc2d5436a";

    #[test]
    fn test_ulid_to_uuid() {
        assert_eq!(ulid_to_uuid(ULID), Ok(UUID.to_string()));
        assert_eq!(ulid_to_uuid(&ULID.to_lowercase()), Ok(UUID.to_string()));
        assert_eq!(
            ulid_to_uuid("00000000000000000000000000"),
            Ok("00000000-0000-0000-0000-000000000000".to_string())
        );
        assert_eq!(
            ulid_to_uuid("7ZZZZZZZZZZZZZZZZZZZZZZZZZ"),
            Ok("ffffffff-ffff-ffff-ffff-ffffffffffff".to_string())
        );
    }

    #[test]
    fn test_ulid_to_uuid_rejects() {
        let invalid = Err(Error::InvalidArgument(INVALID_ULID));

        assert_eq!(ulid_to_uuid(""), invalid);
        assert_eq!(ulid_to_uuid("01JB05JV6H9ZA2YQ6X3K1DAGV"), invalid);
        assert_eq!(ulid_to_uuid("01JB05JV6H9ZA2YQ6X3K1DAGVAA"), invalid);
        assert_eq!(ulid_to_uuid("81JB05JV6H9ZA2YQ6X3K1DAGVA"), invalid);
        assert_eq!(ulid_to_uuid("01JB05JV6H9ZA2YQ6X3K1DAGVU"), invalid);
        assert_eq!(ulid_to_uuid("01JB05JV6H9ZA2YQ6X3K1DAGVO"), invalid);
    }

    #[test]
    fn test_uuid_to_ulid() {
        assert_eq!(uuid_to_ulid(UUID), Ok(ULID.to_string()));
        assert_eq!(uuid_to_ulid(&UUID.to_uppercase()), Ok(ULID.to_string()));
        assert_eq!(
            uuid_to_ulid("ffffffff-ffff-ffff-ffff-ffffffffffff"),
            Ok("7ZZZZZZZZZZZZZZZZZZZZZZZZZ".to_string())
        );
    }

    #[test]
    fn test_uuid_to_ulid_rejects() {
        let invalid = Err(Error::InvalidArgument(INVALID_UUID));

        assert_eq!(uuid_to_ulid(""), invalid);
        assert_eq!(uuid_to_ulid("0192c0596cd14fd42f5cdd1cc2d5436a"), invalid);
        assert_eq!(uuid_to_ulid("{0192c059-6cd1-4fd4-2f5c-dd1cc2d5436a}"), invalid);
        assert_eq!(uuid_to_ulid("0192c059-6cd1-4fd4-2f5c-dd1cc2d5436g"), invalid);
        assert_eq!(uuid_to_ulid("0192c0596-cd1-4fd4-2f5c-dd1cc2d5436a"), invalid);
        assert_eq!(uuid_to_ulid("urn:uuid:0192c059-6cd1-4fd4-2f5c-dd1c"), invalid);
    }

    #[test]
    fn test_round_trips() {
        let ulid = "01ARYZ6S41TSV4RRFFQ69G5FAV"; // cspell:disable-line
        assert_eq!(uuid_to_ulid(&ulid_to_uuid(ulid).unwrap()), Ok(ulid.to_string()));

        let uuid = "e5c6a1b2-0c3d-4e5f-8a9b-0c1d2e3f4a5b";
        assert_eq!(ulid_to_uuid(&uuid_to_ulid(uuid).unwrap()), Ok(uuid.to_string()));
    }
}
