//! Ordering and equality across the recognized operand kinds.
//!
//! Both sides of a comparison are first normalized to the canonical 16-byte form where one
//! exists: identifier values directly, mixed-endian values through the inverse byte reordering,
//! integers through their big-endian reading, and strings through the textual and decimal
//! parsers. Normalized bytes order as unsigned big-endian integers. Strings that normalize to
//! nothing keep their text and order against the canonical hyphenated rendering of the other
//! side, which is consistent with byte order because lowercase hexadecimal strings sort exactly
//! like the bytes they spell. Absent values and booleans sort below every identifier; these two
//! rules exist for compatibility with loosely-typed callers and carry no deeper meaning.

use core::cmp::Ordering;
use core::fmt;

use crate::{Guid, Uuid};

/// A comparison operand in one of the recognized kinds.
///
/// `From` impls cover the concrete types; a foreign identifier type participates by implementing
/// [`CanonicalBytes`] and entering through [`Operand::from_canonical`]. Anything else can only be
/// represented as [`Operand::Foreign`], which every comparison rejects by name.
#[derive(Copy, Clone, Debug)]
pub enum Operand<'a> {
    /// An identifier value.
    Uuid(Uuid),
    /// A mixed-endian encoded identifier, normalized through the inverse byte reordering.
    Guid(Guid),
    /// A textual operand: any parsable representation, a decimal integer string, or — failing
    /// both — a plain string ordered by the lexical fallback rule.
    Text(&'a str),
    /// A raw byte payload; only 16-byte slices have a canonical form.
    Bytes(&'a [u8]),
    /// An unsigned 128-bit integer.
    Int(u128),
    /// A boolean, sorting below every identifier.
    Bool(bool),
    /// An absent value, sorting below everything else.
    Null,
    /// A value of a type with no recognized normalization, named for error reporting.
    Foreign(&'static str),
}

impl<'a> Operand<'a> {
    /// Creates an operand from any type exposing its canonical byte form.
    pub fn from_canonical(src: &impl CanonicalBytes) -> Self {
        Self::Uuid(Uuid::from_bytes(src.canonical_bytes()))
    }
}

impl From<Uuid> for Operand<'_> {
    fn from(src: Uuid) -> Self {
        Self::Uuid(src)
    }
}

impl From<&Uuid> for Operand<'_> {
    fn from(src: &Uuid) -> Self {
        Self::Uuid(*src)
    }
}

impl From<Guid> for Operand<'_> {
    fn from(src: Guid) -> Self {
        Self::Guid(src)
    }
}

impl From<&Guid> for Operand<'_> {
    fn from(src: &Guid) -> Self {
        Self::Guid(*src)
    }
}

impl<'a> From<&'a str> for Operand<'a> {
    fn from(src: &'a str) -> Self {
        Self::Text(src)
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl<'a> From<&'a String> for Operand<'a> {
    fn from(src: &'a String) -> Self {
        Self::Text(src)
    }
}

impl<'a> From<&'a [u8]> for Operand<'a> {
    fn from(src: &'a [u8]) -> Self {
        Self::Bytes(src)
    }
}

impl<'a> From<&'a [u8; 16]> for Operand<'a> {
    fn from(src: &'a [u8; 16]) -> Self {
        Self::Bytes(src)
    }
}

impl From<u128> for Operand<'_> {
    fn from(src: u128) -> Self {
        Self::Int(src)
    }
}

impl From<bool> for Operand<'_> {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl<'a, T: Into<Operand<'a>>> From<Option<T>> for Operand<'a> {
    fn from(src: Option<T>) -> Self {
        src.map_or(Self::Null, Into::into)
    }
}

/// Exposes the canonical 16-byte form of an identifier-like type so that it can participate in
/// cross-representation comparisons.
pub trait CanonicalBytes {
    /// Returns the RFC-ordered 16-byte form.
    fn canonical_bytes(&self) -> [u8; 16];
}

impl CanonicalBytes for Uuid {
    fn canonical_bytes(&self) -> [u8; 16] {
        self.into_bytes()
    }
}

impl CanonicalBytes for Guid {
    fn canonical_bytes(&self) -> [u8; 16] {
        self.to_uuid().into_bytes()
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
impl CanonicalBytes for uuid::Uuid {
    fn canonical_bytes(&self) -> [u8; 16] {
        *self.as_bytes()
    }
}

/// Error comparing an operand that has no defined normalization to canonical bytes.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct NotComparable {
    type_name: &'static str,
}

impl NotComparable {
    /// Returns the name of the offending operand type.
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Display for NotComparable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "operand of type `{}` has no canonical byte form",
            self.type_name
        )
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl std::error::Error for NotComparable {}

/// Compares two operands after normalizing each side, in canonical byte order.
///
/// The order is total over everything that normalizes: antisymmetric, transitive, and consistent
/// with [`equals`]. Only operands with no normalization at all fail.
///
/// # Examples
///
/// ```rust
/// use core::cmp::Ordering;
/// use uuidx::{compare, Uuid};
///
/// assert_eq!(compare(Uuid::NIL, "foobar"), Ok(Ordering::Less));
/// assert_eq!(
///     compare("255", "000000000000000000000000000000ff"),
///     Ok(Ordering::Equal)
/// );
/// ```
pub fn compare<'a, 'b>(
    a: impl Into<Operand<'a>>,
    b: impl Into<Operand<'b>>,
) -> Result<Ordering, NotComparable> {
    let a = normalize(a.into())?;
    let b = normalize(b.into())?;
    Ok(cmp_norm(&a, &b))
}

/// Reports whether two operands normalize to the same point in the order.
pub fn equals<'a, 'b>(
    a: impl Into<Operand<'a>>,
    b: impl Into<Operand<'b>>,
) -> Result<bool, NotComparable> {
    compare(a, b).map(|ordering| ordering == Ordering::Equal)
}

impl Uuid {
    /// Compares `self` against any recognized operand.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use core::cmp::Ordering;
    /// use uuidx::Uuid;
    ///
    /// let e = Uuid::NIL;
    /// assert_eq!(e.compare_to(None::<Uuid>), Ok(Ordering::Greater));
    /// assert_eq!(e.compare_to("00000000000000000000000000000000"), Ok(Ordering::Equal));
    /// ```
    pub fn compare_to<'a>(
        &self,
        other: impl Into<Operand<'a>>,
    ) -> Result<Ordering, NotComparable> {
        compare(*self, other)
    }

    /// Reports loose equality against any recognized operand; an operand that fails to normalize
    /// is simply not equal.
    pub fn matches<'a>(&self, other: impl Into<Operand<'a>>) -> bool {
        matches!(self.compare_to(other), Ok(Ordering::Equal))
    }
}

/// The normal form of an operand, ready for pairwise ordering.
enum Norm<'a> {
    Id([u8; 16]),
    Text(&'a str),
    Bool(bool),
    Null,
}

fn normalize(op: Operand<'_>) -> Result<Norm<'_>, NotComparable> {
    match op {
        Operand::Uuid(e) => Ok(Norm::Id(e.into_bytes())),
        Operand::Guid(e) => Ok(Norm::Id(e.to_uuid().into_bytes())),
        Operand::Text(s) => Ok(match Uuid::parse(s).or_else(|_| Uuid::parse_decimal(s)) {
            Ok(e) => Norm::Id(e.into_bytes()),
            Err(_) => Norm::Text(s),
        }),
        Operand::Bytes(b) => <[u8; 16]>::try_from(b).map(Norm::Id).map_err(|_| {
            NotComparable {
                type_name: "byte slice",
            }
        }),
        Operand::Int(e) => Ok(Norm::Id(e.to_be_bytes())),
        Operand::Bool(e) => Ok(Norm::Bool(e)),
        Operand::Null => Ok(Norm::Null),
        Operand::Foreign(type_name) => Err(NotComparable { type_name }),
    }
}

fn cmp_norm(a: &Norm<'_>, b: &Norm<'_>) -> Ordering {
    match (a, b) {
        (Norm::Null, Norm::Null) => Ordering::Equal,
        (Norm::Bool(x), Norm::Bool(y)) => x.cmp(y),
        (Norm::Id(x), Norm::Id(y)) => x.cmp(y),
        (Norm::Text(x), Norm::Text(y)) => x.cmp(y),
        (Norm::Id(x), Norm::Text(y)) => lexical(x, y),
        (Norm::Text(x), Norm::Id(y)) => lexical(y, x).reverse(),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn rank(n: &Norm<'_>) -> u8 {
    match n {
        Norm::Null => 0,
        Norm::Bool(_) => 1,
        Norm::Id(_) | Norm::Text(_) => 2,
    }
}

/// Orders canonical bytes against an unparsable string by the canonical hyphenated rendering.
fn lexical(id: &[u8; 16], text: &str) -> Ordering {
    let rendered = Uuid::from_bytes(*id).encode();
    (&rendered as &str).cmp(text)
}

#[cfg(test)]
mod tests {
    use super::{compare, equals, CanonicalBytes, Operand};
    use crate::{Guid, Uuid};
    use core::cmp::Ordering;

    /// Sorts Nil below unparsable strings and below the Max string
    #[test]
    fn sorts_nil_below_lexical_fallback_and_max() {
        assert_eq!(compare(Uuid::NIL, "foobar"), Ok(Ordering::Less));
        assert_eq!(
            compare(Uuid::NIL, "ffffffff-ffff-ffff-ffff-ffffffffffff"),
            Ok(Ordering::Less)
        );
        assert_eq!(compare("foobar", Uuid::NIL), Ok(Ordering::Greater));
        assert_eq!(Uuid::NIL.compare_to("foobar"), Ok(Ordering::Less));
        // the fallback compares against the hyphenated rendering, so a string below "0" wins
        assert_eq!(compare(Uuid::NIL, "!"), Ok(Ordering::Greater));
    }

    /// Treats every representation of one value as the same point in the order
    #[test]
    fn equates_every_representation_of_one_value() {
        let e: Uuid = "a6a011d2-7433-6d43-9161-1550863792c9".parse().unwrap();
        let bytes = *e.as_bytes();

        assert!(equals(e, "A6A011D2-7433-6D43-9161-1550863792C9").unwrap());
        assert!(equals(e, "a6a011d274336d4391611550863792c9").unwrap());
        assert!(equals(e, "urn:uuid:a6a011d2-7433-6d43-9161-1550863792c9").unwrap());
        assert!(equals(e, "221482976272501429736935490600400556745").unwrap());
        assert!(equals(e, 221482976272501429736935490600400556745u128).unwrap());
        assert!(equals(e, &bytes[..]).unwrap());
        assert!(equals(e, Guid::from(e)).unwrap());
        assert!(equals(e, Operand::from_canonical(&e)).unwrap());
        assert!(e.matches("221482976272501429736935490600400556745"));
        assert!(!e.matches(Uuid::NIL));

        // the mixed-endian bytes alone are a different value
        assert!(!equals(e, &e.to_guid_bytes()[..]).unwrap());
    }

    /// Orders integer-valued strings numerically
    #[test]
    fn orders_integer_strings_numerically() {
        let small: Uuid = Uuid::from(255u128);
        assert_eq!(compare("255", small), Ok(Ordering::Equal));
        assert_eq!(compare("256", small), Ok(Ordering::Greater));
        assert_eq!(compare("254", small), Ok(Ordering::Less));
        // out-of-range integer strings fall back to the lexical rule
        assert_eq!(
            compare("340282366920938463463374607431768211456", Uuid::MAX),
            Ok(Ordering::Less)
        );
    }

    /// Sorts absent values and booleans below every identifier
    #[test]
    fn sorts_null_and_booleans_below_identifiers() {
        assert_eq!(compare(Uuid::NIL, None::<Uuid>), Ok(Ordering::Greater));
        assert_eq!(compare(None::<Uuid>, Uuid::NIL), Ok(Ordering::Less));
        assert_eq!(compare(None::<Uuid>, None::<Uuid>), Ok(Ordering::Equal));
        assert_eq!(compare(Some(Uuid::NIL), Uuid::NIL), Ok(Ordering::Equal));

        assert_eq!(compare(false, true), Ok(Ordering::Less));
        assert_eq!(compare(true, Uuid::NIL), Ok(Ordering::Less));
        assert_eq!(compare(false, Uuid::NIL), Ok(Ordering::Less));
        assert_eq!(compare(None::<bool>, false), Ok(Ordering::Less));
        assert_eq!(compare(true, "foobar"), Ok(Ordering::Less));
    }

    /// Rejects operands with no normalization, naming the type
    #[test]
    fn rejects_unrecognized_operands_by_name() {
        let err = compare(Uuid::NIL, &[0u8; 5][..]).unwrap_err();
        assert_eq!(err.type_name(), "byte slice");

        let foreign = Operand::Foreign(core::any::type_name::<[u32; 4]>());
        let err = compare(Uuid::NIL, foreign).unwrap_err();
        assert_eq!(err.type_name(), core::any::type_name::<[u32; 4]>());
        assert!(equals(foreign, foreign).is_err());
    }

    /// Upholds antisymmetry, transitivity, and consistency with equality
    #[test]
    fn upholds_total_order_over_mixed_operands() {
        let v6: Uuid = "a6a011d2-7433-6d43-9161-1550863792c9".parse().unwrap();
        let v7: Uuid = "017f22e2-79b0-7cc3-98c4-dc0c0c07398f".parse().unwrap();
        let operands: &[Operand<'_>] = &[
            Operand::Null,
            Operand::Bool(false),
            Operand::Bool(true),
            Operand::Uuid(Uuid::NIL),
            Operand::Uuid(Uuid::MAX),
            Operand::Uuid(v6),
            Operand::Guid(Guid::from(v7)),
            Operand::Text("017f22e2-79b0-7cc3-98c4-dc0c0c07398f"),
            Operand::Text("221482976272501429736935490600400556745"),
            Operand::Text("foobar"),
            Operand::Text("zzz"),
            Operand::Int(0),
            Operand::Int(u128::MAX),
        ];

        for &a in operands {
            for &b in operands {
                let ab = compare(a, b).unwrap();
                let ba = compare(b, a).unwrap();
                assert_eq!(ab, ba.reverse(), "{:?} / {:?}", a, b);
                assert_eq!(equals(a, b).unwrap(), ab == Ordering::Equal);

                for &c in operands {
                    let bc = compare(b, c).unwrap();
                    if ab != Ordering::Greater && bc != Ordering::Greater {
                        assert_ne!(
                            compare(a, c).unwrap(),
                            Ordering::Greater,
                            "{:?} / {:?} / {:?}",
                            a,
                            b,
                            c
                        );
                    }
                }
            }
        }
    }

    /// Exposes canonical bytes through the capability trait
    #[test]
    fn exposes_canonical_bytes_through_the_capability_trait() {
        let e: Uuid = "27433d43-011d-8a6a-9161-1550863792c9".parse().unwrap();
        assert_eq!(e.canonical_bytes(), *e.as_bytes());
        assert_eq!(Guid::from(e).canonical_bytes(), *e.as_bytes());
        #[cfg(feature = "uuid")]
        assert_eq!(uuid::Uuid::from(e).canonical_bytes(), *e.as_bytes());
    }
}
