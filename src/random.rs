#[cfg(feature = "rand")]
use rand::{Rng as _, SeedableRng as _, rngs::StdRng}; // cspell:disable-line

use crate::base32::ALPHABET;

/// Trait for sources of uniform random values.
///
/// A source returns values in the range `[0, 1)`. A value of exactly `1.0` is
/// tolerated and maps to the highest base32 digit.
///
/// Any `FnMut() -> f64` closure is a `RandomSource`, which comes in handy for tests:
///
/// ```
/// use ulid_kit::encode_random;
///
/// let mut stub = || 0.96;
///
/// assert_eq!(encode_random(4, &mut stub), "YYYY");
/// ```
pub trait RandomSource {
    /// Returns the next random value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl<F: FnMut() -> f64> RandomSource for F {
    fn next_unit(&mut self) -> f64 {
        self()
    }
}

/// Cryptographically secure random source.
///
/// Draws one byte at a time from a [`StdRng`] seeded from the operating system
/// and scales it into `[0, 1]` by dividing by 255.
#[cfg(feature = "rand")]
#[derive(Debug, Clone)]
pub struct CryptoRandom {
    rng: StdRng,
}

#[cfg(feature = "rand")]
impl CryptoRandom {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

#[cfg(feature = "rand")]
impl Default for CryptoRandom {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "rand")]
impl RandomSource for CryptoRandom {
    fn next_unit(&mut self) -> f64 {
        f64::from(self.rng.gen::<u8>()) / 255.0
    }
}

/// Returns the default random source.
///
/// It is backed by a cryptographically secure generator seeded from the operating system.
#[cfg(feature = "rand")]
#[must_use]
pub fn detect_prng() -> CryptoRandom {
    CryptoRandom::new()
}

/// Draws one random alphabet character.
///
/// Values are scaled to `[0, 32)` and floored; the boundary value `1.0` is clamped to the last character.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn random_char(rng: &mut dyn RandomSource) -> u8 {
    let index = (rng.next_unit() * 32.0).floor();
    let index = if index.is_nan() { 0 } else { (index as usize).min(31) };
    ALPHABET[index]
}

/// Draws `length` random base32 characters.
///
/// # Example
///
/// ```
/// let mut rng = ulid_kit::detect_prng();
///
/// assert_eq!(ulid_kit::encode_random(16, &mut rng).len(), 16);
/// ```
pub fn encode_random(length: usize, rng: &mut dyn RandomSource) -> String {
    let mut chars = vec![ALPHABET[0]; length];
    fill_random(&mut chars, rng);

    // Safety: `fill_random` only writes ASCII alphabet characters
    unsafe { String::from_utf8_unchecked(chars) }
}

/// Fills `chars` with random alphabet characters, starting from the end.
pub fn fill_random(chars: &mut [u8], rng: &mut dyn RandomSource) {
    for c in chars.iter_mut().rev() {
        *c = random_char(rng);
    }
}
