//! Stateful generators that assemble identifiers from injected clock, entropy, and node inputs.
//!
//! The value model never generates anything on its own; these collaborators own the mutable
//! pieces (per-millisecond counters, last issued tick counts, clock sequences) as explicit
//! instance state and hand finished field values to the [`Uuid`] constructors. Wrap a generator
//! in a mutex to share one ordering scope across threads.

use crate::fields::Timestamp;
use crate::Uuid;

/// A trait that defines the minimum random number generator interface for the generators.
pub trait Rng {
    /// Returns the next random `u32`.
    fn next_u32(&mut self) -> u32;

    /// Returns the next random `u64`.
    fn next_u64(&mut self) -> u64;

    /// Fills `dest` with random data.
    fn fill_bytes(&mut self, dest: &mut [u8]);
}

/// Integration with `rand` (v0.8) crate.
pub mod with_rand08 {
    use super::{Rng, V1Generator, V7Generator};
    use rand::RngCore;

    /// An adapter that implements [`Rng`] for [`RngCore`] types.
    #[derive(Clone, Eq, PartialEq, Debug, Default)]
    pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

    impl<T: RngCore> Rng for Adapter<T> {
        fn next_u32(&mut self) -> u32 {
            self.0.next_u32()
        }

        fn next_u64(&mut self) -> u64 {
            self.0.next_u64()
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            self.0.fill_bytes(dest)
        }
    }

    impl<T: RngCore> V7Generator<Adapter<T>> {
        /// Creates a generator with a random number generator that implements [`RngCore`] from
        /// `rand` (v0.8) crate.
        pub const fn with_rand08(rng: T) -> Self {
            Self::new(Adapter(rng))
        }
    }

    impl<T: RngCore> V1Generator<Adapter<T>> {
        /// Creates a generator for `node` with a random number generator that implements
        /// [`RngCore`] from `rand` (v0.8) crate.
        pub fn with_rand08(node: u64, rng: T) -> Self {
            Self::new(node, Adapter(rng))
        }
    }
}

/// Represents a UUIDv7 generator that encapsulates a counter and guarantees the monotonic order
/// of UUIDs generated within the same millisecond.
///
/// The generator also produces UUIDv4 values from the same entropy source through
/// [`generate_v4`](V7Generator::generate_v4).
///
/// # Examples
///
/// ```rust
/// use uuidx::V7Generator;
///
/// let mut g = V7Generator::with_rand08(rand::rngs::OsRng);
/// let first = g.generate();
/// let second = g.generate();
/// assert!(first < second);
/// ```
///
/// # Generator functions
///
/// | Flavor                     | Timestamp | On big clock rewind |
/// | -------------------------- | --------- | ------------------- |
/// | [`generate`]               | Now       | Resets generator    |
/// | [`generate_or_abort`]      | Now       | Returns `None`      |
/// | [`generate_or_reset_core`] | Argument  | Resets generator    |
/// | [`generate_or_abort_core`] | Argument  | Returns `None`      |
///
/// All of the four return a monotonically increasing UUID by reusing the previous timestamp even
/// if the one provided is smaller than the immediately preceding UUID's. However, when such a
/// clock rollback is considered significant (by default, more than ten seconds), the `generate`
/// (or_reset) methods reset the generator and return a new UUID based on the given timestamp,
/// while the `or_abort` variants abort and return `None` immediately.
///
/// [`generate`]: V7Generator::generate
/// [`generate_or_abort`]: V7Generator::generate_or_abort
/// [`generate_or_reset_core`]: V7Generator::generate_or_reset_core
/// [`generate_or_abort_core`]: V7Generator::generate_or_abort_core
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct V7Generator<R> {
    timestamp: u64,
    counter: u64,

    /// The random number generator used by the generator.
    rng: R,
}

impl<R: Rng> V7Generator<R> {
    /// Creates a generator instance.
    pub const fn new(rng: R) -> Self {
        Self {
            timestamp: 0,
            counter: 0,
            rng,
        }
    }

    /// Generates a new UUIDv7 object from the current timestamp, or resets the generator upon
    /// significant timestamp rollback.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn generate(&mut self) -> Uuid {
        self.generate_or_reset_core(unix_ts_ms_now(), 10_000)
    }

    /// Generates a new UUIDv7 object from the current timestamp, or returns `None` upon
    /// significant timestamp rollback.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn generate_or_abort(&mut self) -> Option<Uuid> {
        self.generate_or_abort_core(unix_ts_ms_now(), 10_000)
    }

    /// Generates a new UUIDv7 object from the `unix_ts_ms` passed, or resets the generator upon
    /// significant timestamp rollback.
    ///
    /// The `rollback_allowance` parameter specifies the amount of `unix_ts_ms` rollback that is
    /// considered significant. A suggested value is `10_000` (milliseconds).
    ///
    /// # Panics
    ///
    /// Panics if `unix_ts_ms` is not a 48-bit positive integer.
    pub fn generate_or_reset_core(&mut self, unix_ts_ms: u64, rollback_allowance: u64) -> Uuid {
        if let Some(value) = self.generate_or_abort_core(unix_ts_ms, rollback_allowance) {
            value
        } else {
            // reset state and resume
            self.timestamp = 0;
            self.generate_or_abort_core(unix_ts_ms, rollback_allowance)
                .unwrap()
        }
    }

    /// Generates a new UUIDv7 object from the `unix_ts_ms` passed, or returns `None` upon
    /// significant timestamp rollback.
    ///
    /// The `rollback_allowance` parameter specifies the amount of `unix_ts_ms` rollback that is
    /// considered significant. A suggested value is `10_000` (milliseconds).
    ///
    /// # Panics
    ///
    /// Panics if `unix_ts_ms` is not a 48-bit positive integer.
    pub fn generate_or_abort_core(
        &mut self,
        unix_ts_ms: u64,
        rollback_allowance: u64,
    ) -> Option<Uuid> {
        const MAX_COUNTER: u64 = (1 << 42) - 1;

        assert!(
            0 < unix_ts_ms && unix_ts_ms < 1 << 48,
            "`unix_ts_ms` must be a 48-bit positive integer"
        );
        assert!(
            rollback_allowance < 1 << 48,
            "`rollback_allowance` out of reasonable range"
        );

        if unix_ts_ms > self.timestamp {
            self.timestamp = unix_ts_ms;
            self.counter = self.rng.next_u64() & MAX_COUNTER;
        } else if unix_ts_ms + rollback_allowance >= self.timestamp {
            // go on with previous timestamp if new one is not much smaller
            self.counter += 1;
            if self.counter > MAX_COUNTER {
                // increment timestamp at counter overflow
                self.timestamp += 1;
                self.counter = self.rng.next_u64() & MAX_COUNTER;
            }
        } else {
            // abort if clock went backwards to unbearable extent
            return None;
        }

        Some(Uuid::from_fields_v7(
            self.timestamp,
            (self.counter >> 30) as u16,
            ((self.counter & 0x3fff_ffff) << 32) | u64::from(self.rng.next_u32()),
        ))
    }

    /// Generates a new UUIDv4 object utilizing the random number generator inside.
    pub fn generate_v4(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        bytes[6] = 0x40 | (bytes[6] >> 4);
        bytes[8] = 0x80 | (bytes[8] >> 2);
        Uuid::from(bytes)
    }
}

/// Supports operations as an infinite iterator that produces a new UUIDv7 object for each call of
/// `next()`.
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl<R: Rng> Iterator for V7Generator<R> {
    type Item = Uuid;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl<R: Rng> std::iter::FusedIterator for V7Generator<R> {}

/// Represents a Gregorian-time generator for UUID versions 1, 2, and 6 that owns the last issued
/// tick count and clock sequence as explicit instance state.
///
/// The caller supplies the 48-bit node value up front (a hardware address, a random stand-in, or
/// any other stable bit pattern) and, through the `_core` methods, the tick count itself, so the
/// generator performs no discovery or I/O of its own. The clock sequence is drawn from the
/// random number generator at construction and changes only when the clock is observed running
/// significantly backwards.
///
/// # Examples
///
/// ```rust
/// use uuidx::V1Generator;
///
/// let mut g = V1Generator::with_rand08(0x0123_4567_89ab, rand::rngs::OsRng);
/// let e = g.generate();
/// assert_eq!(e.version(), Some(1));
/// assert_eq!(e.node(), Some(0x0123_4567_89ab));
/// ```
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct V1Generator<R> {
    ticks: u64,
    clock_seq: u16,
    node: u64,

    /// The random number generator used by the generator.
    rng: R,
}

impl<R: Rng> V1Generator<R> {
    /// Ten seconds of clock rollback tolerated before the clock sequence changes.
    const ROLLBACK_ALLOWANCE: u64 = 100_000_000;

    /// Creates a generator for the given 48-bit node value, drawing the initial clock sequence
    /// from `rng`.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not fit in 48 bits.
    pub fn new(node: u64, mut rng: R) -> Self {
        assert!(node < 1 << 48, "`node` must be a 48-bit value");
        let clock_seq = (rng.next_u32() & 0x3fff) as u16;
        Self {
            ticks: 0,
            clock_seq,
            node,
            rng,
        }
    }

    /// Generates a new UUIDv1 object from the current timestamp.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn generate(&mut self) -> Uuid {
        self.generate_core(Timestamp::now().ticks())
    }

    /// Generates a new UUIDv6 object from the current timestamp.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn generate_v6(&mut self) -> Uuid {
        self.generate_v6_core(Timestamp::now().ticks())
    }

    /// Generates a new UUIDv2 object of the given local domain and identifier from the current
    /// timestamp.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn generate_v2(&mut self, domain: crate::Domain, local_id: u32) -> Uuid {
        self.generate_v2_core(domain, local_id, Timestamp::now().ticks())
    }

    /// Generates a new UUIDv1 object from the given tick count.
    ///
    /// # Panics
    ///
    /// Panics if `ticks` does not fit in 60 bits.
    pub fn generate_core(&mut self, ticks: u64) -> Uuid {
        let (ticks, clock_seq) = self.advance(Timestamp::from_ticks(ticks).ticks());
        Uuid::from_fields_v1(ticks, clock_seq, self.node)
    }

    /// Generates a new UUIDv6 object from the given tick count.
    ///
    /// # Panics
    ///
    /// Panics if `ticks` does not fit in 60 bits.
    pub fn generate_v6_core(&mut self, ticks: u64) -> Uuid {
        let (ticks, clock_seq) = self.advance(Timestamp::from_ticks(ticks).ticks());
        Uuid::from_fields_v6(ticks, clock_seq, self.node)
    }

    /// Generates a new UUIDv2 object of the given local domain and identifier from the given
    /// tick count.
    ///
    /// The identifier keeps only the middle and high timestamp sub-fields, so values generated
    /// within the same seven-minute window for the same domain and local identifier collide;
    /// that coarseness is inherent to the layout.
    ///
    /// # Panics
    ///
    /// Panics if `ticks` does not fit in 60 bits.
    pub fn generate_v2_core(&mut self, domain: crate::Domain, local_id: u32, ticks: u64) -> Uuid {
        let (ticks, clock_seq) = self.advance(Timestamp::from_ticks(ticks).ticks());
        Uuid::from_fields_v2(local_id, domain.as_byte(), ticks, (clock_seq >> 8) as u8, self.node)
    }

    /// Advances the clock state: a repeated or slightly rewound reading reuses the next tick; a
    /// rollback beyond the allowance takes the new reading and bumps the clock sequence to mark
    /// the discontinuity.
    fn advance(&mut self, ticks: u64) -> (u64, u16) {
        if ticks > self.ticks {
            self.ticks = ticks;
        } else if ticks + Self::ROLLBACK_ALLOWANCE > self.ticks {
            self.ticks += 1;
        } else {
            self.ticks = ticks;
            self.clock_seq = (self.clock_seq + 1) & 0x3fff;
        }
        (self.ticks, self.clock_seq)
    }
}

#[cfg(feature = "std")]
fn unix_ts_ms_now() -> u64 {
    use std::time;
    time::SystemTime::now()
        .duration_since(time::UNIX_EPOCH)
        .expect("clock may have gone backwards")
        .as_millis() as u64
}
