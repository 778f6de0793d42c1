//! Bit-level serialization for real-time networking payloads.
//!
//! Weft encodes structured values into a dense sequence of bits and
//! decodes them back, trading schema flexibility for wire size. Field
//! widths come from caller declarations rather than the data itself;
//! a boolean costs a single bit and a bounded integer only the bits
//! its declared range needs. Packets carry a 4-byte little-endian
//! bit-length header and an optional CRC-32 trailer; nothing else
//! frames the data.
//!
//! The format is deliberately not self-describing. The wire bytes
//! carry no type tags and no field names, so a [`PacketReader`] must
//! mirror the exact operation sequence of the [`PacketWriter`] that
//! produced the buffer, with the same widths and range parameters.
//! The [`Codec`] trait keeps both sides in one place for composite
//! types so they can only diverge at compile time.
//!
//! ```
//! use weft::{PacketReader, PacketWriter};
//!
//! let mut writer = PacketWriter::new();
//! writer.append_bool(true);
//! writer.append_fixed(420, 10);
//! let bytes = writer.pack(false);
//!
//! let mut reader = PacketReader::new(&bytes)?;
//! assert!(reader.read_bool()?);
//! assert_eq!(reader.read_fixed(10)?, 420);
//! # Ok::<(), weft::Error>(())
//! ```

#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use thiserror::Error as ThisError;

mod array;
pub use array::{BitArray, BoundedArray};

mod codec;
pub use codec::{Bytes, Codec, Enum, FixedWidth};

mod compress;
pub use compress::{DoubleCompressor, FloatCompressor, IntCompressor, UintCompressor};

pub mod crc;

mod reader;
pub use reader::PacketReader;

mod value;
pub use value::{Vec2, Vec3};

mod writer;
pub use writer::PacketWriter;

/// The default element bound for length-prefixed collections.
///
/// Writer and reader must agree on the bound in use; this is the
/// value the stock codecs assume when no explicit bound is declared.
pub const DEFAULT_MAX_COUNT: u32 = 1 << 29;

// The zeroed bytes every packet reserves up front for the bit-length
// header, and their size in bits.
pub(crate) const HEADER_BYTES: usize = 4;
pub(crate) const HEADER_BITS: usize = HEADER_BYTES << 3;

/// Errors that may occur while decoding a packet.
///
/// All errors surface synchronously from reader operations. The
/// cursor is not rolled back on failure; a reader that returned an
/// error should be considered poisoned and discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
pub enum Error {
    /// A read would advance the cursor past the end of the payload.
    #[error("attempted to read out of bounds")]
    TooShort,

    /// The bits were present but do not form a valid value.
    #[error("raw value '{0}' is not part of the declared universe")]
    Encoding(u64),

    /// The checksum trailer does not match the payload contents.
    #[error("CRC mismatch -- expected {expected}, got {actual}")]
    IncorrectChecksum {
        /// The checksum encoded in the trailer.
        expected: u32,
        /// The checksum computed over the received bytes.
        actual: u32,
    },
}

/// Computes the width in bits of a length field bounded by
/// `max_count`.
///
/// Both sides of the wire derive length prefixes through this one
/// helper, so they can only disagree when their declared bounds do.
/// Callers should pass a bound strictly greater than the largest
/// count they intend to store.
#[inline]
pub(crate) fn len_bits(max_count: u32) -> u32 {
    debug_assert!(
        0 < max_count && max_count <= DEFAULT_MAX_COUNT,
        "count bound {max_count} out of range"
    );
    u32::BITS - max_count.leading_zeros()
}

/// Computes the wire width of an enumeration universe of `variants`
/// members.
#[inline]
pub(crate) fn enum_bits(variants: u32) -> u32 {
    debug_assert!(variants > 0, "empty enum universe");
    u32::BITS - variants.leading_zeros()
}
