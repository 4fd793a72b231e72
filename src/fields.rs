//! Version-specific field layouts decoded from the canonical byte form.
//!
//! Each decodable version places the same envelope of logical fields (timestamp, clock sequence,
//! node, or opaque custom bits) at different positions inside the 16 bytes; [`Fields`] carries
//! one variant per layout so the placement knowledge lives here and nowhere else.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::{Uuid, Variant};

/// A 60-bit timestamp counted in 100-nanosecond ticks since 1582-10-15 00:00:00 UTC, as used by
/// versions 1, 2, and 6.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Ticks between the Gregorian reform epoch and the Unix epoch.
    const UNIX_OFFSET: u64 = 122_192_928_000_000_000;

    /// Creates a timestamp from a raw tick count.
    ///
    /// # Panics
    ///
    /// Panics if `ticks` does not fit in 60 bits.
    pub const fn from_ticks(ticks: u64) -> Self {
        if ticks >= 1 << 60 {
            panic!("invalid field value");
        }
        Self(ticks)
    }

    /// Returns the raw tick count.
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Converts the tick count to a calendar date-time, truncating sub-microsecond ticks toward
    /// the epoch.
    ///
    /// The zero tick count maps exactly to 1582-10-15 00:00:00.000000.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use uuidx::Timestamp;
    ///
    /// let dt = Timestamp::from_ticks(0).to_datetime();
    /// assert_eq!(dt.date(), NaiveDate::from_ymd_opt(1582, 10, 15).unwrap());
    /// ```
    pub fn to_datetime(self) -> NaiveDateTime {
        epoch() + Duration::microseconds((self.0 / 10) as i64)
    }

    /// Creates a timestamp from a calendar date-time, or returns `None` for date-times outside
    /// the representable range.
    pub fn from_datetime(at: NaiveDateTime) -> Option<Self> {
        let ticks = (at - epoch()).num_microseconds()?.checked_mul(10)?;
        if (0..1i64 << 60).contains(&ticks) {
            Some(Self(ticks as u64))
        } else {
            None
        }
    }

    /// Returns the timestamp of the current instant.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn now() -> Self {
        use std::time;
        let unix = time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .expect("clock may have gone backwards");
        Self((unix.as_nanos() / 100) as u64 + Self::UNIX_OFFSET)
    }
}

fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1582, 10, 15)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("Gregorian reform epoch is representable")
}

/// DCE Security local domain of a version 2 identifier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Domain {
    /// The POSIX UID domain.
    Person,
    /// The POSIX GID domain.
    Group,
    /// The organization domain.
    Org,
    /// A site-defined domain.
    Other(u8),
}

impl Domain {
    /// Creates a domain from the raw local-domain octet.
    pub const fn from_byte(value: u8) -> Self {
        match value {
            0 => Self::Person,
            1 => Self::Group,
            2 => Self::Org,
            e => Self::Other(e),
        }
    }

    /// Returns the raw local-domain octet.
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Person => 0,
            Self::Group => 1,
            Self::Org => 2,
            Self::Other(e) => e,
        }
    }
}

/// Version-specific fields decoded from the canonical byte layout.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Fields {
    /// Gregorian-time fields of a version 1 identifier.
    V1 {
        /// The 60-bit timestamp, reassembled from the low-mid-high sub-fields.
        timestamp: Timestamp,
        /// The 14-bit clock sequence.
        clock_seq: u16,
        /// The 48-bit node value.
        node: u64,
    },
    /// DCE Security fields of a version 2 identifier.
    V2 {
        /// The 32-bit local identifier occupying the low timestamp sub-field.
        local_id: u32,
        /// The local domain the identifier belongs to.
        domain: Domain,
        /// The truncated timestamp; its low 32 bits read as zero.
        timestamp: Timestamp,
        /// The 6-bit clock sequence.
        clock_seq: u8,
        /// The 48-bit node value.
        node: u64,
    },
    /// Gregorian-time fields of a version 6 identifier, stored high-to-low.
    V6 {
        /// The 60-bit timestamp.
        timestamp: Timestamp,
        /// The 14-bit clock sequence.
        clock_seq: u16,
        /// The 48-bit node value.
        node: u64,
    },
    /// Unix-time fields of a version 7 identifier.
    V7 {
        /// The 48-bit Unix timestamp in milliseconds.
        unix_ts_ms: u64,
        /// The 12 random or counter bits next to the version nibble.
        rand_a: u16,
        /// The 62 random or counter bits after the variant bits.
        rand_b: u64,
    },
    /// Opaque custom fields of a version 8 identifier, with no semantic decode.
    V8 {
        /// The 48 bits before the version nibble.
        custom_a: u64,
        /// The 12 bits after the version nibble.
        custom_b: u16,
        /// The 62 bits after the variant bits.
        custom_c: u64,
    },
}

impl Uuid {
    /// Decodes the version-specific fields of `self`, or returns `None` for a sentinel, a value
    /// of a non-RFC variant, or a version with no defined field layout (3, 4, and 5 carry only
    /// hash or random bits).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuidx::{Fields, Uuid};
    ///
    /// let e: Uuid = "a6a011d2-7433-6d43-9161-1550863792c9".parse()?;
    /// match e.fields() {
    ///     Some(Fields::V6 { node, .. }) => assert_eq!(node, 0x1550_863792c9),
    ///     _ => unreachable!(),
    /// }
    /// # Ok::<(), uuidx::ParseError>(())
    /// ```
    pub fn fields(&self) -> Option<Fields> {
        if self.variant() != Variant::Rfc {
            return None;
        }
        let b = self.as_bytes();
        match self.version()? {
            1 => Some(Fields::V1 {
                timestamp: Timestamp(
                    u64::from(b[6] & 0x0f) << 56
                        | u64::from(b[7]) << 48
                        | be(&b[4..6]) << 32
                        | be(&b[0..4]),
                ),
                clock_seq: clock_seq_14(b),
                node: be(&b[10..16]),
            }),
            2 => Some(Fields::V2 {
                local_id: be(&b[0..4]) as u32,
                domain: Domain::from_byte(b[9]),
                timestamp: Timestamp(
                    u64::from(b[6] & 0x0f) << 56 | u64::from(b[7]) << 48 | be(&b[4..6]) << 32,
                ),
                clock_seq: b[8] & 0x3f,
                node: be(&b[10..16]),
            }),
            6 => Some(Fields::V6 {
                timestamp: Timestamp(
                    be(&b[0..4]) << 28 | be(&b[4..6]) << 12 | u64::from(b[6] & 0x0f) << 8
                        | u64::from(b[7]),
                ),
                clock_seq: clock_seq_14(b),
                node: be(&b[10..16]),
            }),
            7 => Some(Fields::V7 {
                unix_ts_ms: be(&b[0..6]),
                rand_a: u16::from(b[6] & 0x0f) << 8 | u16::from(b[7]),
                rand_b: be(&b[8..16]) & ((1 << 62) - 1),
            }),
            8 => Some(Fields::V8 {
                custom_a: be(&b[0..6]),
                custom_b: u16::from(b[6] & 0x0f) << 8 | u16::from(b[7]),
                custom_c: be(&b[8..16]) & ((1 << 62) - 1),
            }),
            _ => None,
        }
    }

    /// Returns the Gregorian timestamp of a version 1, 2, or 6 identifier.
    pub fn timestamp(&self) -> Option<Timestamp> {
        match self.fields()? {
            Fields::V1 { timestamp, .. }
            | Fields::V2 { timestamp, .. }
            | Fields::V6 { timestamp, .. } => Some(timestamp),
            _ => None,
        }
    }

    /// Returns the clock sequence of a version 1, 2, or 6 identifier; the 6-bit value of a
    /// version 2 identifier is widened.
    pub fn clock_sequence(&self) -> Option<u16> {
        match self.fields()? {
            Fields::V1 { clock_seq, .. } | Fields::V6 { clock_seq, .. } => Some(clock_seq),
            Fields::V2 { clock_seq, .. } => Some(u16::from(clock_seq)),
            _ => None,
        }
    }

    /// Returns the 48-bit node value of a version 1, 2, or 6 identifier.
    pub fn node(&self) -> Option<u64> {
        match self.fields()? {
            Fields::V1 { node, .. } | Fields::V2 { node, .. } | Fields::V6 { node, .. } => {
                Some(node)
            }
            _ => None,
        }
    }
}

/// Reads up to eight bytes as a big-endian unsigned integer.
fn be(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0, |acc, &e| acc << 8 | u64::from(e))
}

fn clock_seq_14(b: &[u8; 16]) -> u16 {
    u16::from(b[8] & 0x3f) << 8 | u16::from(b[9])
}
