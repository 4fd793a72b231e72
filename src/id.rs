#[cfg(not(feature = "std"))]
use core as std;

use std::{fmt, str};

use fstr::FStr;

/// Represents a Universally Unique IDentifier of any version, stored as the canonical 16-byte
/// big-endian form.
///
/// A value is immutable once constructed; the variant, version, and version-specific fields are
/// all computed on demand from the byte payload. The derived ordering is the unsigned big-endian
/// lexicographic order of the bytes, which coincides with the unsigned 128-bit integer order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Creates an object from a 16-byte big-endian array, accepting any bit pattern.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Consumes `self`, returning the underlying byte array.
    pub const fn into_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Returns `true` if `self` is the Nil UUID.
    pub const fn is_nil(&self) -> bool {
        let mut i = 0;
        while i < 16 {
            if self.0[i] != 0x00 {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Returns `true` if `self` is the Max UUID.
    pub const fn is_max(&self) -> bool {
        let mut i = 0;
        while i < 16 {
            if self.0[i] != 0xff {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Returns the variant of `self`, read from the top bits of octet 8.
    ///
    /// The Nil and Max UUIDs carry no meaningful variant bits of their own but report
    /// [`Variant::Rfc`], matching how the governing document classifies the two sentinels.
    pub const fn variant(&self) -> Variant {
        if self.is_nil() || self.is_max() {
            return Variant::Rfc;
        }
        match self.0[8] >> 5 {
            0b111 => Variant::Future,
            0b110 => Variant::Microsoft,
            0b100 | 0b101 => Variant::Rfc,
            _ => Variant::Ncs,
        }
    }

    /// Returns the version of `self`, read from the top nibble of octet 6, or `None` for the Nil
    /// and Max UUIDs.
    ///
    /// A sentinel has no version at all; unwrapping the `None` is the caller's bug, not a
    /// recoverable input error.
    pub const fn version(&self) -> Option<u8> {
        if self.is_nil() || self.is_max() {
            None
        } else {
            Some(self.0[6] >> 4)
        }
    }

    /// Returns `true` if the variant bits are [`Variant::Rfc`] and the version nibble equals
    /// `version`.
    pub const fn conforms_to(&self, version: u8) -> bool {
        self.0[8] >> 6 == 0b10 && self.0[6] >> 4 == version
    }

    /// Creates an object from `bytes`, checking the variant and version bits against `version`.
    ///
    /// Well-formed bytes that carry the wrong variant or version fail with the
    /// [`Mismatch`](ParseErrorKind::Mismatch) kind: from the caller's point of view the input is
    /// simply not a valid identifier of the requested kind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuidx::Uuid;
    ///
    /// let bytes = *"a6a011d2-7433-6d43-9161-1550863792c9".parse::<Uuid>()?.as_bytes();
    /// assert!(Uuid::from_bytes_checked(bytes, 6).is_ok());
    /// assert!(Uuid::from_bytes_checked(bytes, 7).is_err());
    /// # Ok::<(), uuidx::ParseError>(())
    /// ```
    pub const fn from_bytes_checked(bytes: [u8; 16], version: u8) -> Result<Self, ParseError> {
        let candidate = Self(bytes);
        if candidate.conforms_to(version) {
            Ok(candidate)
        } else {
            Err(ParseError::new(ParseErrorKind::Mismatch))
        }
    }

    /// Creates a UUID byte array from UUIDv1 field values: a 60-bit Gregorian tick count, a
    /// 14-bit clock sequence, and a 48-bit node value.
    ///
    /// The tick count is split into its low, middle, and high sub-fields in that byte order.
    ///
    /// # Panics
    ///
    /// Panics if any argument exceeds its field width.
    pub const fn from_fields_v1(ticks: u64, clock_seq: u16, node: u64) -> Self {
        if ticks >= 1 << 60 || clock_seq >= 1 << 14 || node >= 1 << 48 {
            panic!("invalid field value");
        }

        Self([
            (ticks >> 24) as u8,
            (ticks >> 16) as u8,
            (ticks >> 8) as u8,
            ticks as u8,
            (ticks >> 40) as u8,
            (ticks >> 32) as u8,
            0x10 | (ticks >> 56) as u8,
            (ticks >> 48) as u8,
            0x80 | (clock_seq >> 8) as u8,
            clock_seq as u8,
            (node >> 40) as u8,
            (node >> 32) as u8,
            (node >> 24) as u8,
            (node >> 16) as u8,
            (node >> 8) as u8,
            node as u8,
        ])
    }

    /// Creates a UUID byte array from DCE Security (UUIDv2) field values.
    ///
    /// The 32-bit local identifier takes the place of the low timestamp sub-field, so the low 32
    /// bits of `ticks` are discarded; `domain` is the raw local-domain octet.
    ///
    /// # Panics
    ///
    /// Panics if `ticks`, `clock_seq`, or `node` exceeds its field width (60, 6, and 48 bits).
    pub const fn from_fields_v2(
        local_id: u32,
        domain: u8,
        ticks: u64,
        clock_seq: u8,
        node: u64,
    ) -> Self {
        if ticks >= 1 << 60 || clock_seq >= 1 << 6 || node >= 1 << 48 {
            panic!("invalid field value");
        }

        Self([
            (local_id >> 24) as u8,
            (local_id >> 16) as u8,
            (local_id >> 8) as u8,
            local_id as u8,
            (ticks >> 40) as u8,
            (ticks >> 32) as u8,
            0x20 | (ticks >> 56) as u8,
            (ticks >> 48) as u8,
            0x80 | clock_seq,
            domain,
            (node >> 40) as u8,
            (node >> 32) as u8,
            (node >> 24) as u8,
            (node >> 16) as u8,
            (node >> 8) as u8,
            node as u8,
        ])
    }

    /// Creates a UUID byte array from UUIDv6 field values: the same fields as
    /// [`from_fields_v1`](Uuid::from_fields_v1) with the tick count stored high-to-low, so that
    /// byte order follows chronological order.
    ///
    /// # Panics
    ///
    /// Panics if any argument exceeds its field width.
    pub const fn from_fields_v6(ticks: u64, clock_seq: u16, node: u64) -> Self {
        if ticks >= 1 << 60 || clock_seq >= 1 << 14 || node >= 1 << 48 {
            panic!("invalid field value");
        }

        Self([
            (ticks >> 52) as u8,
            (ticks >> 44) as u8,
            (ticks >> 36) as u8,
            (ticks >> 28) as u8,
            (ticks >> 20) as u8,
            (ticks >> 12) as u8,
            0x60 | ((ticks >> 8) as u8 & 0x0f),
            ticks as u8,
            0x80 | (clock_seq >> 8) as u8,
            clock_seq as u8,
            (node >> 40) as u8,
            (node >> 32) as u8,
            (node >> 24) as u8,
            (node >> 16) as u8,
            (node >> 8) as u8,
            node as u8,
        ])
    }

    /// Creates a UUID byte array from UUIDv7 field values.
    ///
    /// # Panics
    ///
    /// Panics if any argument exceeds its field width (48, 12, and 62 bits).
    pub const fn from_fields_v7(unix_ts_ms: u64, rand_a: u16, rand_b: u64) -> Self {
        if unix_ts_ms >= 1 << 48 || rand_a >= 1 << 12 || rand_b >= 1 << 62 {
            panic!("invalid field value");
        }

        Self([
            (unix_ts_ms >> 40) as u8,
            (unix_ts_ms >> 32) as u8,
            (unix_ts_ms >> 24) as u8,
            (unix_ts_ms >> 16) as u8,
            (unix_ts_ms >> 8) as u8,
            unix_ts_ms as u8,
            0x70 | (rand_a >> 8) as u8,
            rand_a as u8,
            0x80 | (rand_b >> 56) as u8,
            (rand_b >> 48) as u8,
            (rand_b >> 40) as u8,
            (rand_b >> 32) as u8,
            (rand_b >> 24) as u8,
            (rand_b >> 16) as u8,
            (rand_b >> 8) as u8,
            rand_b as u8,
        ])
    }

    /// Creates a UUID byte array from UUIDv8 custom field values of 48, 12, and 62 bits.
    ///
    /// The three fields carry no semantics here; they are placed around the version and variant
    /// bits exactly as given.
    ///
    /// # Panics
    ///
    /// Panics if any argument exceeds its field width.
    pub const fn from_fields_v8(custom_a: u64, custom_b: u16, custom_c: u64) -> Self {
        if custom_a >= 1 << 48 || custom_b >= 1 << 12 || custom_c >= 1 << 62 {
            panic!("invalid field value");
        }

        Self([
            (custom_a >> 40) as u8,
            (custom_a >> 32) as u8,
            (custom_a >> 24) as u8,
            (custom_a >> 16) as u8,
            (custom_a >> 8) as u8,
            custom_a as u8,
            0x80 | (custom_b >> 8) as u8,
            custom_b as u8,
            0x80 | (custom_c >> 56) as u8,
            (custom_c >> 48) as u8,
            (custom_c >> 40) as u8,
            (custom_c >> 32) as u8,
            (custom_c >> 24) as u8,
            (custom_c >> 16) as u8,
            (custom_c >> 8) as u8,
            custom_c as u8,
        ])
    }

    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation stored in a
    /// stack-allocated string-like type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuidx::Uuid;
    ///
    /// let x = "01809424-3e59-7c05-9219-566f82fff672".parse::<Uuid>()?;
    /// assert_eq!(&x.encode() as &str, "01809424-3e59-7c05-9219-566f82fff672");
    /// # Ok::<(), uuidx::ParseError>(())
    /// ```
    pub const fn encode(&self) -> FStr<36> {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";
        let mut buffer = [0u8; 36];
        let mut r = 0;
        let mut w = 0;
        while r < 16 {
            let e = self.0[r] as usize;
            buffer[w] = DIGITS[e >> 4];
            buffer[w + 1] = DIGITS[e & 15];
            w += 2;
            if r == 3 || r == 5 || r == 7 || r == 9 {
                buffer[w] = b'-';
                w += 1;
            }
            r += 1;
        }
        // SAFETY: ok because buffer consists of ASCII bytes only
        unsafe { FStr::from_inner_unchecked(buffer) }
    }
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation.
    ///
    /// Upper- and mixed-case hex digits are accepted; anything else, including whitespace or
    /// misplaced dashes, is rejected.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        if src.len() != 36 {
            return Err(ParseError::new(ParseErrorKind::Length));
        }
        const ERR: ParseError = ParseError::new(ParseErrorKind::Syntax);
        let mut dst = [0u8; 16];
        let mut iter = src.chars();
        for (i, e) in dst.iter_mut().enumerate() {
            let hi = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            let lo = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            *e = (hi << 4) | lo;
            if (i == 3 || i == 5 || i == 7 || i == 9) && iter.next().ok_or(ERR)? != '-' {
                return Err(ERR);
            }
        }
        if iter.next().is_none() {
            Ok(Self(dst))
        } else {
            Err(ERR)
        }
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl TryFrom<&[u8]> for Uuid {
    type Error = ParseError;

    /// Creates an object from a slice of exactly 16 bytes.
    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        <[u8; 16]>::try_from(src)
            .map(Self)
            .map_err(|_| ParseError::new(ParseErrorKind::Length))
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

/// UUID variant field values, read from the top bits of octet 8.
///
/// The four patterns are checked most-specific first: `111x`, then `110x`, then `10xx`, with
/// everything else falling into the NCS range.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// Reserved for NCS backward compatibility (`0xxx`).
    Ncs,
    /// The variant defined by RFC 9562 and its predecessors (`10xx`).
    Rfc,
    /// Reserved for Microsoft backward compatibility (`110x`).
    Microsoft,
    /// Reserved for future definition (`111x`).
    Future,
}

/// Error parsing or validating a UUID representation.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {
    kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) const fn new(kind: ParseErrorKind) -> Self {
        Self { kind }
    }

    /// Returns the broad category of the failure.
    pub const fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

/// Broad categories of [`ParseError`] failures.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// The input has the wrong length for its representation.
    Length,
    /// The input contains an invalid character or a misplaced separator.
    Syntax,
    /// The integer input does not fit in 128 bits.
    Range,
    /// The bytes are well formed but the variant or version bits do not match the expected kind.
    Mismatch,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.kind {
            ParseErrorKind::Length => "invalid length for a UUID representation",
            ParseErrorKind::Syntax => "invalid character or separator in UUID representation",
            ParseErrorKind::Range => "integer out of the 128-bit UUID range",
            ParseErrorKind::Mismatch => "variant or version bits do not match the expected kind",
        })
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
mod std_ext {
    use super::{ParseError, Uuid};

    impl From<Uuid> for String {
        fn from(src: Uuid) -> Self {
            src.to_string()
        }
    }

    impl TryFrom<String> for Uuid {
        type Error = ParseError;

        fn try_from(src: String) -> Result<Self, Self::Error> {
            src.parse()
        }
    }

    impl std::error::Error for ParseError {}
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            // accepts the hyphenated, bare hexadecimal, and URN text shapes
            Self::Value::parse(value).map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            Self::Value::try_from(value).map_err(de::Error::custom)
        }
    }

}
