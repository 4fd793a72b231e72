//! Detection, parsing, and rendering of the interchangeable representations.
//!
//! Every representation converts to and from the same canonical 16-byte form: the 8-4-4-4-12
//! hyphenated text, the bare 32-digit hexadecimal text, the `urn:uuid:` form, and the unsigned
//! 128-bit decimal integer. Parsing accepts any hex digit case; rendering is always lowercase.

use fstr::FStr;

use crate::{ParseError, ParseErrorKind, Uuid};

/// The textual representations of a UUID value.
///
/// The 16-byte binary form and the `u128` integer form have their own conversion traits on
/// [`Uuid`]; this enum names the shapes a *string* can take.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Format {
    /// The 8-4-4-4-12 hyphenated form, 36 characters.
    Hyphenated,
    /// The bare hexadecimal form, 32 characters, no separators.
    Simple,
    /// The `urn:uuid:` prefix followed by the hyphenated form, 45 characters.
    Urn,
    /// The unsigned 128-bit decimal integer form, up to 39 digits.
    Decimal,
}

impl Format {
    /// Guesses the representation of `src` from its shape alone, without validating the content.
    ///
    /// A 32-character string of decimal digits is reported as [`Simple`](Format::Simple); pass
    /// [`Decimal`](Format::Decimal) to [`Uuid::parse_with`] explicitly to override that reading.
    pub fn detect(src: &str) -> Option<Self> {
        let bytes = src.as_bytes();
        match bytes.len() {
            36 if bytes[8] == b'-' => Some(Self::Hyphenated),
            45 if has_urn_prefix(src) => Some(Self::Urn),
            32 => Some(Self::Simple),
            1..=39 if bytes.iter().all(|e| e.is_ascii_digit()) => Some(Self::Decimal),
            _ => None,
        }
    }
}

fn has_urn_prefix(src: &str) -> bool {
    src.get(..9)
        .map_or(false, |p| p.eq_ignore_ascii_case("urn:uuid:"))
}

impl Uuid {
    /// Parses any of the three hexadecimal text shapes, choosing the shape by length: 36
    /// characters for the hyphenated form, 32 for the bare hexadecimal form, and 45 for the URN
    /// form.
    ///
    /// Decimal integer strings are not accepted here because short all-digit inputs are
    /// ambiguous; use [`Uuid::parse_decimal`] or [`Uuid::parse_with`] for those.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuidx::Uuid;
    ///
    /// let e = Uuid::parse("27433d43-011d-8a6a-9161-1550863792c9")?;
    /// assert_eq!(Uuid::parse("27433d43011d8a6a91611550863792c9")?, e);
    /// assert_eq!(Uuid::parse("urn:uuid:27433d43-011d-8a6a-9161-1550863792c9")?, e);
    /// # Ok::<(), uuidx::ParseError>(())
    /// ```
    pub fn parse(src: &str) -> Result<Self, ParseError> {
        match src.len() {
            36 => src.parse(),
            32 => Self::parse_hex(src),
            45 => Self::parse_urn(src),
            _ => Err(ParseError::new(ParseErrorKind::Length)),
        }
    }

    /// Parses `src` as the representation named by `format`.
    pub fn parse_with(src: &str, format: Format) -> Result<Self, ParseError> {
        match format {
            Format::Hyphenated => src.parse(),
            Format::Simple => Self::parse_hex(src),
            Format::Urn => Self::parse_urn(src),
            Format::Decimal => Self::parse_decimal(src),
        }
    }

    /// Creates an object from the 32-digit hexadecimal representation, case-insensitively.
    pub fn parse_hex(src: &str) -> Result<Self, ParseError> {
        if src.len() != 32 {
            return Err(ParseError::new(ParseErrorKind::Length));
        }
        const ERR: ParseError = ParseError::new(ParseErrorKind::Syntax);
        let mut dst = [0u8; 16];
        let mut iter = src.chars();
        for e in dst.iter_mut() {
            let hi = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            let lo = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            *e = (hi << 4) | lo;
        }
        if iter.next().is_none() {
            Ok(Self::from(dst))
        } else {
            Err(ERR)
        }
    }

    /// Creates an object from the URN representation: `urn:uuid:` (any case) followed by the
    /// hyphenated form.
    pub fn parse_urn(src: &str) -> Result<Self, ParseError> {
        if src.len() != 45 {
            return Err(ParseError::new(ParseErrorKind::Length));
        }
        if has_urn_prefix(src) {
            src[9..].parse()
        } else {
            Err(ParseError::new(ParseErrorKind::Syntax))
        }
    }

    /// Creates an object from the unsigned decimal integer representation.
    ///
    /// Only plain digit sequences are accepted, with no sign or separators; values of
    /// 2<sup>128</sup> and above fail with the [`Range`](ParseErrorKind::Range) kind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuidx::Uuid;
    ///
    /// let e = Uuid::parse_decimal("52189018260751461212961852937641366217")?;
    /// assert_eq!(&e.encode() as &str, "27433d43-011d-8a6a-9161-1550863792c9");
    /// # Ok::<(), uuidx::ParseError>(())
    /// ```
    pub fn parse_decimal(src: &str) -> Result<Self, ParseError> {
        if src.is_empty() {
            return Err(ParseError::new(ParseErrorKind::Length));
        }
        let mut acc: u128 = 0;
        for e in src.bytes() {
            if !e.is_ascii_digit() {
                return Err(ParseError::new(ParseErrorKind::Syntax));
            }
            acc = acc
                .checked_mul(10)
                .and_then(|v| v.checked_add(u128::from(e - b'0')))
                .ok_or(ParseError::new(ParseErrorKind::Range))?;
        }
        Ok(Self::from(acc))
    }

    /// Returns the 32-digit hexadecimal representation, without separators.
    pub const fn encode_hex(&self) -> FStr<32> {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";
        let bytes = self.as_bytes();
        let mut buffer = [0u8; 32];
        let mut i = 0;
        while i < 16 {
            let e = bytes[i] as usize;
            buffer[i * 2] = DIGITS[e >> 4];
            buffer[i * 2 + 1] = DIGITS[e & 15];
            i += 1;
        }
        // SAFETY: ok because buffer consists of ASCII bytes only
        unsafe { FStr::from_inner_unchecked(buffer) }
    }

    /// Returns the URN representation: `urn:uuid:` followed by the hyphenated form.
    pub const fn encode_urn(&self) -> FStr<45> {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";
        const PREFIX: &[u8; 9] = b"urn:uuid:";
        let bytes = self.as_bytes();
        let mut buffer = [0u8; 45];
        let mut i = 0;
        while i < 9 {
            buffer[i] = PREFIX[i];
            i += 1;
        }
        let mut r = 0;
        let mut w = 9;
        while r < 16 {
            let e = bytes[r] as usize;
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

    /// Renders `self` in the representation named by `format`.
    ///
    /// The decimal rendering is the unsigned big-endian 128-bit reading of the bytes, with no
    /// leading zeros except for the literal value `0`.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn render(&self, format: Format) -> String {
        match format {
            Format::Hyphenated => self.encode().to_string(),
            Format::Simple => self.encode_hex().to_string(),
            Format::Urn => self.encode_urn().to_string(),
            Format::Decimal => u128::from(*self).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Format;
    use crate::{ParseErrorKind, Uuid};

    /// Detects the representation of prepared inputs by shape
    #[test]
    fn detects_format_by_shape() {
        let cases: &[(&str, Option<Format>)] = &[
            (
                "a6a011d2-7433-6d43-9161-1550863792c9",
                Some(Format::Hyphenated),
            ),
            ("a6a011d274336d4391611550863792c9", Some(Format::Simple)),
            (
                "urn:uuid:a6a011d2-7433-6d43-9161-1550863792c9",
                Some(Format::Urn),
            ),
            (
                "URN:UUID:A6A011D2-7433-6D43-9161-1550863792C9",
                Some(Format::Urn),
            ),
            ("0", Some(Format::Decimal)),
            (
                "221482976272501429736935490600400556745",
                Some(Format::Decimal),
            ),
            // 32 decimal digits read as hexadecimal, by convention
            ("12345678901234567890123456789012", Some(Format::Simple)),
            ("", None),
            ("not-a-uuid", None),
            ("urn:oid:a6a011d2-7433-6d43-9161-1550863792c9", None),
        ];

        for (src, expected) in cases {
            assert_eq!(Format::detect(src), *expected, "{}", src);
        }
    }

    /// Parses every textual shape case-insensitively to the same value
    #[test]
    fn parses_every_text_shape_to_the_same_value() {
        let e = "a6a011d2-7433-6d43-9161-1550863792c9"
            .parse::<Uuid>()
            .unwrap();
        let cases = [
            "a6a011d2-7433-6d43-9161-1550863792c9",
            "A6A011D2-7433-6D43-9161-1550863792C9",
            "a6a011d274336d4391611550863792c9",
            "A6A011D274336D4391611550863792C9",
            "urn:uuid:a6a011d2-7433-6d43-9161-1550863792c9",
            "URN:UUID:a6a011d2-7433-6d43-9161-1550863792c9",
        ];

        for src in cases {
            assert_eq!(Uuid::parse(src), Ok(e), "{}", src);
        }
        assert_eq!(
            Uuid::parse_decimal("221482976272501429736935490600400556745"),
            Ok(e)
        );
        assert_eq!(
            Uuid::parse_with("221482976272501429736935490600400556745", Format::Decimal),
            Ok(e)
        );
    }

    /// Rejects malformed representations with the appropriate kind
    #[test]
    fn rejects_malformed_representations() {
        assert_eq!(
            Uuid::parse("a6a011d2-7433").unwrap_err().kind(),
            ParseErrorKind::Length
        );
        assert_eq!(
            Uuid::parse_hex("a6a011d274336d4391611550863792").unwrap_err().kind(),
            ParseErrorKind::Length
        );
        assert_eq!(
            Uuid::parse_hex("g6a011d274336d4391611550863792c9")
                .unwrap_err()
                .kind(),
            ParseErrorKind::Syntax
        );
        assert_eq!(
            Uuid::parse_urn("urn:oid:0a6a011d2-7433-6d43-9161-1550863792c9")
                .unwrap_err()
                .kind(),
            ParseErrorKind::Syntax
        );
        assert_eq!(
            Uuid::parse_decimal("").unwrap_err().kind(),
            ParseErrorKind::Length
        );
        assert_eq!(
            Uuid::parse_decimal("+1234").unwrap_err().kind(),
            ParseErrorKind::Syntax
        );
        assert_eq!(
            Uuid::parse_decimal("12_34").unwrap_err().kind(),
            ParseErrorKind::Syntax
        );
        // 2^128, one above the maximum value
        assert_eq!(
            Uuid::parse_decimal("340282366920938463463374607431768211456")
                .unwrap_err()
                .kind(),
            ParseErrorKind::Range
        );
    }

    /// Round-trips prepared values through every representation
    #[test]
    fn round_trips_every_representation() {
        let cases = [
            "00000000-0000-0000-0000-000000000000",
            "ffffffff-ffff-ffff-ffff-ffffffffffff",
            "c232ab00-9414-11ec-b3c8-9f6bdeced846",
            "a6a011d2-7433-6d43-9161-1550863792c9",
            "017f22e2-79b0-7cc3-98c4-dc0c0c07398f",
            "27433d43-011d-8a6a-9161-1550863792c9",
        ];

        for text in cases {
            let e = text.parse::<Uuid>().unwrap();
            assert_eq!(Uuid::parse(&e.encode()), Ok(e));
            assert_eq!(Uuid::parse_hex(&e.encode_hex()), Ok(e));
            assert_eq!(Uuid::parse_urn(&e.encode_urn()), Ok(e));
            assert_eq!(Uuid::try_from(e.as_bytes().as_slice()), Ok(e));
            assert_eq!(Uuid::from(u128::from(e)), e);
            #[cfg(feature = "std")]
            for format in [
                Format::Hyphenated,
                Format::Simple,
                Format::Urn,
                Format::Decimal,
            ] {
                assert_eq!(Uuid::parse_with(&e.render(format), format), Ok(e));
            }
        }
    }

    /// Renders the decimal and binary representations of prepared literal cases
    #[test]
    fn renders_prepared_literal_cases() {
        let v6 = "a6a011d2-7433-6d43-9161-1550863792c9"
            .parse::<Uuid>()
            .unwrap();
        assert_eq!(
            u128::from(v6),
            221482976272501429736935490600400556745u128
        );

        let v8 = "27433d43-011d-8a6a-9161-1550863792c9"
            .parse::<Uuid>()
            .unwrap();
        assert_eq!(
            v8.as_bytes(),
            b"\x27\x43\x3d\x43\x01\x1d\x8a\x6a\x91\x61\x15\x50\x86\x37\x92\xc9"
        );
        assert_eq!(u128::from(v8), 52189018260751461212961852937641366217u128);
        #[cfg(feature = "std")]
        assert_eq!(
            v8.render(Format::Decimal),
            "52189018260751461212961852937641366217"
        );

        assert_eq!(u128::from(Uuid::NIL), 0);
        #[cfg(feature = "std")]
        assert_eq!(Uuid::NIL.render(Format::Decimal), "0");
        assert_eq!(Uuid::parse_decimal("0"), Ok(Uuid::NIL));
        // 2^128 - 1
        assert_eq!(
            Uuid::parse_decimal("340282366920938463463374607431768211455"),
            Ok(Uuid::MAX)
        );
    }

    /// Renders lowercase regardless of input case
    #[test]
    fn renders_lowercase_output() {
        let e = Uuid::parse("A6A011D274336D4391611550863792C9").unwrap();
        assert_eq!(&e.encode() as &str, "a6a011d2-7433-6d43-9161-1550863792c9");
        assert_eq!(&e.encode_hex() as &str, "a6a011d274336d4391611550863792c9");
        assert_eq!(
            &e.encode_urn() as &str,
            "urn:uuid:a6a011d2-7433-6d43-9161-1550863792c9"
        );
    }
}
