//! The protocol value types implement to compose onto packet
//! streams, and the stock codecs for common shapes.

use uuid::Uuid;

use crate::{DEFAULT_MAX_COUNT, Error, PacketReader, PacketWriter, array::BoundedArray};

/// A value with a fixed-width little-endian bit pattern.
///
/// Implementations describe how a primitive maps to and from the raw
/// bits carried on the wire. [`PacketWriter::append_full`] and
/// [`PacketReader::read_full`] are generic over this trait; one
/// method pair covers every integer and float width.
pub trait FixedWidth: Copy {
    /// The number of bits in the wire representation.
    const BITS: u32;

    /// Converts the value into its raw bit pattern.
    fn to_pattern(self) -> u64;

    /// Reinterprets a raw bit pattern as the value.
    ///
    /// Only the low [`Self::BITS`] bits of `raw` are meaningful.
    fn from_pattern(raw: u64) -> Self;
}

macro_rules! impl_fixed_width {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FixedWidth for $ty {
                const BITS: u32 = <$ty>::BITS;

                #[inline]
                fn to_pattern(self) -> u64 {
                    self as u64
                }

                #[inline]
                fn from_pattern(raw: u64) -> Self {
                    raw as $ty
                }
            }
        )*
    };
}

impl_fixed_width!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl FixedWidth for f32 {
    const BITS: u32 = 32;

    #[inline]
    fn to_pattern(self) -> u64 {
        self.to_bits() as u64
    }

    #[inline]
    fn from_pattern(raw: u64) -> Self {
        Self::from_bits(raw as u32)
    }
}

impl FixedWidth for f64 {
    const BITS: u32 = 64;

    #[inline]
    fn to_pattern(self) -> u64 {
        self.to_bits()
    }

    #[inline]
    fn from_pattern(raw: u64) -> Self {
        Self::from_bits(raw)
    }
}

impl FixedWidth for bool {
    const BITS: u32 = 1;

    #[inline]
    fn to_pattern(self) -> u64 {
        self as u64
    }

    #[inline]
    fn from_pattern(raw: u64) -> Self {
        raw & 1 != 0
    }
}

/// A value that can encode itself onto a packet stream and decode
/// itself back.
///
/// The wire carries no type information; `decode` must mirror the
/// exact operation sequence of `encode`. Implementing both sides in
/// one place is what keeps a protocol's writer and reader from
/// drifting apart.
pub trait Codec: Sized {
    /// Encodes the value onto the writer.
    fn encode(&self, writer: &mut PacketWriter);

    /// Decodes a value from the reader.
    fn decode(reader: &mut PacketReader<'_>) -> Result<Self, Error>;
}

macro_rules! impl_primitive_codec {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Codec for $ty {
                #[inline]
                fn encode(&self, writer: &mut PacketWriter) {
                    writer.append_full(*self);
                }

                #[inline]
                fn decode(reader: &mut PacketReader<'_>) -> Result<Self, Error> {
                    reader.read_full()
                }
            }
        )*
    };
}

impl_primitive_codec!(bool, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

impl<T: Codec> Codec for Option<T> {
    fn encode(&self, writer: &mut PacketWriter) {
        match self {
            Some(value) => {
                writer.append_bool(true);
                value.encode(writer);
            }
            None => writer.append_bool(false),
        }
    }

    fn decode(reader: &mut PacketReader<'_>) -> Result<Self, Error> {
        match reader.read_bool()? {
            true => T::decode(reader).map(Some),
            false => Ok(None),
        }
    }
}

impl<T: Codec> Codec for Vec<T> {
    fn encode(&self, writer: &mut PacketWriter) {
        BoundedArray::new(DEFAULT_MAX_COUNT).encode(writer, self);
    }

    fn decode(reader: &mut PacketReader<'_>) -> Result<Self, Error> {
        BoundedArray::new(DEFAULT_MAX_COUNT).decode(reader)
    }
}

impl Codec for String {
    fn encode(&self, writer: &mut PacketWriter) {
        writer.append_string(self, DEFAULT_MAX_COUNT);
    }

    fn decode(reader: &mut PacketReader<'_>) -> Result<Self, Error> {
        reader.read_string(DEFAULT_MAX_COUNT)
    }
}

/// An opaque byte buffer, encoded as a length prefix followed by
/// byte-aligned raw contents.
///
/// `Option<Bytes>` is the nullable flavor: one presence bit, then
/// the buffer when present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[repr(transparent)]
pub struct Bytes(pub Vec<u8>);

impl Codec for Bytes {
    fn encode(&self, writer: &mut PacketWriter) {
        writer.append_bytes(&self.0, DEFAULT_MAX_COUNT);
    }

    fn decode(reader: &mut PacketReader<'_>) -> Result<Self, Error> {
        reader
            .read_bytes(DEFAULT_MAX_COUNT)
            .map(|bytes| Self(bytes.to_vec()))
    }
}

impl Codec for Uuid {
    fn encode(&self, writer: &mut PacketWriter) {
        for byte in self.as_bytes() {
            writer.append_full(*byte);
        }
    }

    fn decode(reader: &mut PacketReader<'_>) -> Result<Self, Error> {
        let mut bytes = [0; 16];
        for byte in &mut bytes {
            *byte = reader.read_full()?;
        }

        Ok(Self::from_bytes(bytes))
    }
}

/// An enumeration with a closed universe of unsigned-backed
/// variants.
///
/// The wire width is derived from [`Self::VARIANTS`]; both sides
/// must declare the same universe. Decoding a raw value the universe
/// does not contain fails with [`Error::Encoding`].
pub trait Enum: Sized + Copy {
    /// The number of variants in the universe.
    const VARIANTS: u32;

    /// Converts the variant into its raw wire value.
    fn into_raw(self) -> u32;

    /// Looks up the variant for a raw wire value.
    fn from_raw(raw: u32) -> Option<Self>;
}
