use byteorder::{ByteOrder, LE};
use weft_bit_buf::BitReader;

use crate::{
    Error, HEADER_BITS, HEADER_BYTES,
    codec::{Codec, Enum, FixedWidth},
    crc, enum_bits, len_bits,
};

/// The readable half of a packet stream.
///
/// Construction decodes the bit-length header; reads never advance
/// the cursor past the bit count it promises and fail with
/// [`Error::TooShort`] instead. After any error the cursor position
/// is unspecified and the reader should be discarded.
///
/// The reader borrows the packed bytes and never copies them; the
/// same buffer may back any number of readers.
#[derive(Clone, Debug)]
pub struct PacketReader<'a> {
    inner: BitReader<'a>,

    // The total number of payload bits promised by the header,
    // the header itself included.
    end_bit: usize,
}

impl<'a> PacketReader<'a> {
    /// Creates a reader over a packed buffer without checksum
    /// validation.
    ///
    /// Fails with [`Error::TooShort`] when the buffer cannot hold
    /// the header, or when the header promises more bits than the
    /// buffer holds.
    pub fn new(bytes: &'a [u8]) -> Result<Self, Error> {
        if bytes.len() < HEADER_BYTES {
            return Err(Error::TooShort);
        }

        let mut inner = BitReader::new(bytes);
        let end_bit = inner.read(u32::BITS).ok_or(Error::TooShort)? as usize;
        if end_bit < HEADER_BITS || end_bit > bytes.len() << 3 {
            return Err(Error::TooShort);
        }

        Ok(Self { inner, end_bit })
    }

    /// Creates a reader after validating the CRC-32 trailer in the
    /// final four bytes against the preceding contents.
    ///
    /// Accepts the buffers produced by [`PacketWriter::pack`] with
    /// `with_crc` set, failing with [`Error::IncorrectChecksum`] when
    /// the trailer does not match.
    ///
    /// [`PacketWriter::pack`]: crate::PacketWriter::pack
    pub fn new_with_crc(bytes: &'a [u8]) -> Result<Self, Error> {
        let payload_len = match bytes.len().checked_sub(4) {
            Some(len) if len >= HEADER_BYTES => len,
            _ => return Err(Error::TooShort),
        };

        let (payload, trailer) = bytes.split_at(payload_len);
        let expected = LE::read_u32(trailer);
        let actual = crc::hash(payload);

        if expected != actual {
            log::warn!("rejecting packet with CRC mismatch: expected {expected}, got {actual}");
            return Err(Error::IncorrectChecksum { expected, actual });
        }

        Self::new(payload)
    }

    /// The current cursor position, in bits from the packet start.
    #[inline]
    pub fn position(&self) -> usize {
        self.inner.position()
    }

    /// The total number of bits promised by the header.
    #[inline]
    pub fn end_bit(&self) -> usize {
        self.end_bit
    }

    /// The number of unread payload bits.
    #[inline]
    pub fn remaining_bits(&self) -> usize {
        self.end_bit.saturating_sub(self.inner.position())
    }

    /// Reads a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<u8, Error> {
        self.read_fixed(1).map(|v| v as u8)
    }

    /// Reads a [`bool`] from a single bit.
    #[inline]
    pub fn read_bool(&mut self) -> Result<bool, Error> {
        self.read_fixed(1).map(|v| v != 0)
    }

    /// Reads `nbits` bits LSB-first into the low bits of a [`u64`].
    ///
    /// # Panics
    ///
    /// Panics when `nbits` is zero or exceeds 64.
    pub fn read_fixed(&mut self, nbits: u32) -> Result<u64, Error> {
        if self.inner.position() + nbits as usize > self.end_bit {
            return Err(Error::TooShort);
        }

        self.inner.read(nbits).ok_or(Error::TooShort)
    }

    /// Reads the whole-width bit pattern of `T`.
    #[inline]
    pub fn read_full<T: FixedWidth>(&mut self) -> Result<T, Error> {
        self.read_fixed(T::BITS).map(T::from_pattern)
    }

    /// Reads a length prefix bounded by `max_count`, realigns to the
    /// next byte boundary and borrows that many bytes from the
    /// underlying buffer.
    pub fn read_bytes(&mut self, max_count: u32) -> Result<&'a [u8], Error> {
        let count = self.read_fixed(len_bits(max_count))? as usize;
        self.align();

        if (count as u64) << 3 > self.remaining_bits() as u64 {
            return Err(Error::TooShort);
        }

        self.inner.read_bytes(count).ok_or(Error::TooShort)
    }

    /// Reads a length-prefixed UTF-8 string.
    ///
    /// Invalid UTF-8 sequences decode to replacement characters
    /// rather than failing.
    pub fn read_string(&mut self, max_count: u32) -> Result<String, Error> {
        self.read_bytes(max_count)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Reads an enumeration variant from a closed universe.
    ///
    /// Fails with [`Error::Encoding`] when the raw value is not part
    /// of the declared universe.
    pub fn read_enum<E: Enum>(&mut self) -> Result<E, Error> {
        let raw = self.read_fixed(enum_bits(E::VARIANTS))?;
        u32::try_from(raw)
            .ok()
            .and_then(E::from_raw)
            .ok_or(Error::Encoding(raw))
    }

    /// Reads any value which implements the [`Codec`] protocol.
    #[inline]
    pub fn read<T: Codec>(&mut self) -> Result<T, Error> {
        T::decode(self)
    }

    /// Rounds the cursor up to the next byte boundary.
    #[inline]
    pub fn align(&mut self) {
        self.inner.realign_to_byte();
    }
}
