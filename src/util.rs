use crate::Error;

/// Views a slice as a fixed size array, failing with `InvalidArgument(message)` on a length mismatch.
pub fn as_array<'a, const N: usize>(bytes: &'a [u8], message: &'static str) -> Result<&'a [u8; N], Error> {
    bytes.try_into().or(Err(Error::InvalidArgument(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_array() {
        assert_eq!(as_array::<3>(b"abc", "nope"), Ok(b"abc"));
        assert_eq!(as_array::<3>(b"ab", "nope"), Err(Error::InvalidArgument("nope")));
        assert_eq!(as_array::<3>(b"abcd", "nope"), Err(Error::InvalidArgument("nope")));
    }
}
