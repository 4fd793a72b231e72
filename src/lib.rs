//! A library for parsing, inspecting, re-encoding, and ordering UUIDs of every version.
//!
//! All values share one canonical form, 16 big-endian bytes, and every other representation
//! converts to and from it losslessly: the 8-4-4-4-12 hyphenated text, the bare 32-digit
//! hexadecimal text, the `urn:uuid:` form, the unsigned 128-bit decimal integer, and the
//! Microsoft mixed-endian byte order.
//!
//! ```rust
//! use uuidx::Uuid;
//!
//! let e: Uuid = "a6a011d2-7433-6d43-9161-1550863792c9".parse()?;
//! assert_eq!(e.version(), Some(6));
//! assert_eq!(e.node(), Some(0x1550_863792c9));
//! assert_eq!(u128::from(e), 221482976272501429736935490600400556745);
//! # Ok::<(), uuidx::ParseError>(())
//! ```
//!
//! # Field and bit layout
//!
//! Every version places its fields inside the same 16-byte envelope; only the `ver` nibble and
//! the `var` bits sit at fixed positions:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                        version-specific                       |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |       version-specific        |  ver  |   version-specific    |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                    version-specific                       |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                        version-specific                       |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! [`Uuid::fields`] decodes the version-specific placements into their logical field values, and
//! the [`Fields`] variants document each layout. [`compare`] orders any mix of identifier
//! values, strings, bytes, and integers; [`Guid`] carries the mixed-endian re-encoding; the
//! [`generator`] collaborators assemble new identifiers from injected clock and entropy inputs.

#![cfg_attr(not(feature = "std"), no_std)]

mod codec;
mod fields;
mod guid;
mod id;
mod order;

pub use codec::Format;
pub use fields::{Domain, Fields, Timestamp};
pub use guid::Guid;
pub use id::{ParseError, ParseErrorKind, Uuid, Variant};
pub use order::{compare, equals, CanonicalBytes, NotComparable, Operand};

pub mod generator;
#[doc(inline)]
pub use generator::{V1Generator, V7Generator};

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{uuid4, uuid7};
