//! The mixed-endian byte layout used by Microsoft-style GUID encodings.

use crate::Uuid;

/// A UUID value re-encoded in the mixed-endian byte order that Microsoft GUID interfaces expect:
/// the three leading fields of 4, 2, and 2 bytes are each byte-reversed, and the trailing 8 bytes
/// are unchanged.
///
/// The reordering is a deliberate re-encoding, not a view: a `Guid` built from an RFC-ordered
/// value holds a different bit pattern and compares equal only to other `Guid`s of the same
/// logical value. Convert back with [`Guid::to_uuid`] before mixing the two forms.
///
/// # Examples
///
/// ```rust
/// use uuidx::{Guid, Uuid};
///
/// let e: Uuid = "00112233-4455-6677-8899-aabbccddeeff".parse()?;
/// let guid = Guid::from(e);
/// assert_eq!(
///     guid.as_bytes(),
///     b"\x33\x22\x11\x00\x55\x44\x77\x66\x88\x99\xaa\xbb\xcc\xdd\xee\xff"
/// );
/// assert_eq!(guid.to_uuid(), e);
/// # Ok::<(), uuidx::ParseError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Guid([u8; 16]);

impl Guid {
    /// Creates an object from an array already in the mixed-endian order, without reordering.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Returns a reference to the underlying mixed-endian byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Consumes `self`, returning the underlying mixed-endian byte array.
    pub const fn into_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Reorders the leading fields back into the canonical big-endian form.
    pub const fn to_uuid(self) -> Uuid {
        Uuid::from_guid_bytes(self.0)
    }
}

impl From<Uuid> for Guid {
    fn from(src: Uuid) -> Self {
        Self(src.to_guid_bytes())
    }
}

impl From<Guid> for Uuid {
    fn from(src: Guid) -> Self {
        src.to_uuid()
    }
}

impl From<Guid> for [u8; 16] {
    fn from(src: Guid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Guid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl Uuid {
    /// Returns the 16 bytes reordered into the mixed-endian layout.
    pub const fn to_guid_bytes(self) -> [u8; 16] {
        swap_fields(self.into_bytes())
    }

    /// Creates an object from 16 bytes in the mixed-endian layout, reordering them into the
    /// canonical form.
    pub const fn from_guid_bytes(bytes: [u8; 16]) -> Self {
        Self::from_bytes(swap_fields(bytes))
    }
}

/// Reverses the bytes within the leading 4-2-2 fields; applying it twice returns the input.
const fn swap_fields(b: [u8; 16]) -> [u8; 16] {
    [
        b[3], b[2], b[1], b[0], b[5], b[4], b[7], b[6], b[8], b[9], b[10], b[11], b[12], b[13],
        b[14], b[15],
    ]
}

#[cfg(test)]
mod tests {
    use super::Guid;
    use crate::Uuid;

    /// Swaps the leading fields and leaves the trailing bytes untouched
    #[test]
    fn swaps_leading_fields_only() {
        let e: Uuid = "c232ab00-9414-11ec-b3c8-9f6bdeced846".parse().unwrap();
        let swapped = e.to_guid_bytes();
        assert_eq!(
            swapped,
            *b"\x00\xab\x32\xc2\x14\x94\xec\x11\xb3\xc8\x9f\x6b\xde\xce\xd8\x46"
        );
        assert_eq!(swapped[8..], e.as_bytes()[8..]);
        assert_eq!(Uuid::from_guid_bytes(swapped), e);
    }

    /// Returns the original value when applied twice
    #[test]
    fn double_application_is_identity() {
        let cases = [
            [0u8; 16],
            [0xff; 16],
            *b"\x00\x11\x22\x33\x44\x55\x66\x77\x88\x99\xaa\xbb\xcc\xdd\xee\xff",
            *b"\x27\x43\x3d\x43\x01\x1d\x8a\x6a\x91\x61\x15\x50\x86\x37\x92\xc9",
            *b"\xc2\x32\xab\x00\x94\x14\x11\xec\xb3\xc8\x9f\x6b\xde\xce\xd8\x46",
        ];

        for bytes in cases {
            assert_eq!(super::swap_fields(super::swap_fields(bytes)), bytes);
            let e = Uuid::from_bytes(bytes);
            assert_eq!(Uuid::from_guid_bytes(e.to_guid_bytes()), e);
            assert_eq!(Guid::from(e).to_uuid(), e);
        }
    }

    /// Re-encodes rather than aliases: the swapped pattern is a different value
    #[test]
    fn reordering_changes_the_bit_pattern() {
        let e: Uuid = "00112233-4455-6677-8899-aabbccddeeff".parse().unwrap();
        let guid = Guid::from(e);
        assert_ne!(guid.into_bytes(), e.into_bytes());
        assert_eq!(Uuid::from_bytes(guid.into_bytes()).version(), Some(7));
        assert_eq!(e.version(), Some(6));
    }
}
