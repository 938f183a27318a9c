#[cfg(feature = "rand")]
use std::cell::RefCell;

#[cfg(feature = "tracing")]
use tracing::{debug, instrument};

#[cfg(feature = "rand")]
use crate::random::{CryptoRandom, detect_prng};
use crate::{
    Error, RANDOM_LEN, TIME_LEN, base32,
    random::{RandomSource, encode_random, fill_random},
    time::{SystemClock, TimeSource, Timestamp, decode_time},
};

/// A plain ULID generator.
///
/// Every ULID gets a freshly drawn random part. ULIDs generated within the same
/// millisecond are unique with overwhelming probability, but not ordered.
/// For ordering within a millisecond use [`MonotonicGenerator`].
///
/// # Example
///
/// ```
/// use ulid_kit::Generator;
///
/// let mut generator = Generator::new(|| 0.5);
///
/// assert_eq!(generator.generate(Some(150_000)).unwrap(), "0000004JFGGGGGGGGGGGGGGGGG");
/// ```
#[derive(Debug, Clone)]
pub struct Generator<R, C = SystemClock> {
    rng: R,
    clock: C,
}

impl<R: RandomSource> Generator<R> {
    /// Creates a generator reading the current time from the system clock.
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self::with_clock(rng, SystemClock)
    }
}

impl<R: RandomSource, C: TimeSource> Generator<R, C> {
    /// Creates a generator with an explicit time source.
    #[must_use]
    pub const fn with_clock(rng: R, clock: C) -> Self {
        Self { rng, clock }
    }

    /// Generates a ULID for `seed_time`, or for the current time if `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the time exceeds 2<sup>48</sup>-1.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&mut self, seed_time: Option<u64>) -> Result<String, Error> {
        let seed_time = seed_time.unwrap_or_else(|| self.clock.now_millis());

        let mut ulid = Timestamp::new(seed_time)?.encode(TIME_LEN);
        ulid.push_str(&encode_random(RANDOM_LEN, &mut self.rng));

        Ok(ulid)
    }
}

#[cfg(feature = "rand")]
impl Default for Generator<CryptoRandom> {
    fn default() -> Self {
        Self::new(detect_prng())
    }
}

/// A ULID generator producing strictly increasing ULIDs.
///
/// The generator remembers the timestamp and random part of the last ULID. When the
/// next seed time is not greater than the remembered timestamp, the random part is
/// incremented by one instead of drawn again.
///
/// **Note:** in that case the *remembered* timestamp is encoded, not the seed time.
/// Once a generator has seen a timestamp, passing an earlier seed time yields ULIDs
/// carrying the later timestamp. This keeps the output strictly increasing.
///
/// The generator is not synchronized. To share one between threads, wrap it in a `Mutex`.
///
/// # Example
///
/// ```
/// use ulid_kit::MonotonicGenerator;
///
/// let mut generator = MonotonicGenerator::new(|| 0.96);
///
/// // cspell:disable
/// assert_eq!(generator.generate(Some(1469918176385)).unwrap(), "01ARYZ6S41YYYYYYYYYYYYYYYY");
/// assert_eq!(generator.generate(Some(1469918176385)).unwrap(), "01ARYZ6S41YYYYYYYYYYYYYYYZ");
/// assert_eq!(generator.generate(Some(100000000)).unwrap(), "01ARYZ6S41YYYYYYYYYYYYYYZ0");
/// assert_eq!(generator.generate(Some(1469918176386)).unwrap(), "01ARYZ6S42YYYYYYYYYYYYYYYY");
/// // cspell:enable
/// ```
#[derive(Debug, Clone)]
pub struct MonotonicGenerator<R, C = SystemClock> {
    rng: R,
    clock: C,
    last_timestamp: u64,
    last_random: Option<[u8; RANDOM_LEN]>,
}

impl<R: RandomSource> MonotonicGenerator<R> {
    /// Creates a monotonic generator reading the current time from the system clock.
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self::with_clock(rng, SystemClock)
    }
}

impl<R: RandomSource, C: TimeSource> MonotonicGenerator<R, C> {
    /// Creates a monotonic generator with an explicit time source.
    #[must_use]
    pub const fn with_clock(rng: R, clock: C) -> Self {
        Self {
            rng,
            clock,
            last_timestamp: 0,
            last_random: None,
        }
    }

    /// Continues the sequence after a previously generated ULID.
    ///
    /// The next ULID generated for a seed time not after the timestamp of `last`
    /// will be `last` incremented by one. `last` may be given in any case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] if `last` is not a valid ULID string.
    pub fn resume_after(mut self, last: &str) -> Result<Self, Error> {
        let last = last.to_ascii_uppercase();
        let timestamp = decode_time(&last)?;

        let mut random = [0; RANDOM_LEN];
        random.copy_from_slice(&last.as_bytes()[TIME_LEN..]);
        base32::as_str(&random)?;

        self.last_timestamp = timestamp;
        self.last_random = Some(random);

        Ok(self)
    }

    /// The timestamp of the last generated ULID, or 0 if none was generated yet.
    #[must_use]
    pub const fn last_timestamp(&self) -> u64 {
        self.last_timestamp
    }

    /// Generates the next ULID for `seed_time`, or for the current time if `None`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if the time exceeds 2<sup>48</sup>-1.
    /// - [`Error::Overflow`] if the random part cannot be incremented any further
    ///   within the same millisecond (after 2<sup>80</sup> ULIDs at worst).
    ///
    /// The generator state is unchanged when an error is returned.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&mut self, seed_time: Option<u64>) -> Result<String, Error> {
        let seed_time = seed_time.unwrap_or_else(|| self.clock.now_millis());

        Timestamp::new(seed_time)?;

        let (timestamp, random) = match self.last_random {
            Some(mut random) if seed_time <= self.last_timestamp => {
                #[cfg(feature = "tracing")]
                if seed_time < self.last_timestamp {
                    debug!(
                        seed_time,
                        last_timestamp = self.last_timestamp,
                        "seed time is behind, keeping last timestamp"
                    );
                }

                base32::increment(&mut random)?;
                (self.last_timestamp, random)
            }
            _ => {
                let mut random = [base32::ALPHABET[0]; RANDOM_LEN];
                fill_random(&mut random, &mut self.rng);
                (seed_time.max(self.last_timestamp), random)
            }
        };

        let mut ulid = Timestamp::new(timestamp)?.encode(TIME_LEN);
        ulid.push_str(base32::as_str(&random)?);

        self.last_timestamp = timestamp;
        self.last_random = Some(random);

        Ok(ulid)
    }
}

#[cfg(feature = "rand")]
impl Default for MonotonicGenerator<CryptoRandom> {
    fn default() -> Self {
        Self::new(detect_prng())
    }
}

#[cfg(feature = "rand")]
thread_local! {
    static GENERATOR: RefCell<Generator<CryptoRandom>> = RefCell::new(Generator::default());
}

/// Generates a ULID for `seed_time`, or for the current time if `None`.
///
/// Uses a per-thread [`Generator`] backed by the default random source.
/// Multiple ULIDs for the same millisecond are not ordered.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the time exceeds 2<sup>48</sup>-1.
///
/// # Example
///
/// ```
/// let id = ulid_kit::generate(Some(1469918176385)).unwrap();
///
/// assert_eq!(&id[..10], "01ARYZ6S41");
/// ```
#[cfg(feature = "rand")]
pub fn generate(seed_time: Option<u64>) -> Result<String, Error> {
    GENERATOR.with(|generator| generator.borrow_mut().generate(seed_time))
}
