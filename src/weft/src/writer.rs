use byteorder::{ByteOrder, LE};
use weft_bit_buf::BitWriter;

use crate::{
    HEADER_BYTES,
    codec::{Codec, Enum, FixedWidth},
    crc, enum_bits, len_bits,
};

/// The writable half of a packet stream.
///
/// A fresh writer reserves four zeroed header bytes and starts its
/// cursor behind them; [`Self::pack`] patches the total bit length
/// back into the header and optionally appends a CRC-32 trailer.
/// `pack` consumes the writer, so a finalized packet can no longer
/// be mutated.
///
/// Appending is infallible. Width and bound preconditions are caller
/// bugs and panic rather than surfacing as wire errors.
#[derive(Debug)]
pub struct PacketWriter {
    inner: BitWriter,
}

impl Default for PacketWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketWriter {
    /// Creates an empty packet writer.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty packet writer with space preallocated for
    /// `nbytes` bytes of payload plus framing.
    pub fn with_capacity(nbytes: usize) -> Self {
        let mut inner = BitWriter::with_capacity(HEADER_BYTES + nbytes + 4);
        inner.write_bytes(&[0; HEADER_BYTES]);

        Self { inner }
    }

    /// Resets the writer to its fresh state, keeping the underlying
    /// allocation for reuse.
    pub fn reset(&mut self) {
        self.inner.clear();
        self.inner.write_bytes(&[0; HEADER_BYTES]);
    }

    /// Gets the number of bits currently in the packet, the header
    /// included.
    #[inline]
    pub fn written_bits(&self) -> usize {
        self.inner.written_bits()
    }

    /// Appends the low bit of `bit`.
    #[inline]
    pub fn append_bit(&mut self, bit: u8) {
        self.inner.put(bit as u64, 1);
    }

    /// Appends a [`bool`] as a single bit, 1 for `true`.
    #[inline]
    pub fn append_bool(&mut self, value: bool) {
        self.append_bit(value as u8);
    }

    /// Appends the `nbits` low bits of `value`, LSB-first.
    ///
    /// # Panics
    ///
    /// Panics when `nbits` is zero or exceeds 64.
    #[inline]
    pub fn append_fixed(&mut self, value: u64, nbits: u32) {
        self.inner.put(value, nbits);
    }

    /// Appends the whole-width bit pattern of `value`.
    ///
    /// Signed integers contribute their two's-complement pattern,
    /// floats their IEEE-754 pattern.
    #[inline]
    pub fn append_full<T: FixedWidth>(&mut self, value: T) {
        self.inner.put(value.to_pattern(), T::BITS);
    }

    /// Appends a length prefix bounded by `max_count`, realigns to
    /// the next byte boundary and copies `bytes` verbatim.
    pub fn append_bytes(&mut self, bytes: &[u8], max_count: u32) {
        debug_assert!(bytes.len() <= max_count as usize);

        self.inner.put(bytes.len() as u64, len_bits(max_count));
        self.inner.realign_to_byte();
        self.inner.write_bytes(bytes);
    }

    /// Appends the UTF-8 bytes of `value` via [`Self::append_bytes`].
    #[inline]
    pub fn append_string(&mut self, value: &str, max_count: u32) {
        self.append_bytes(value.as_bytes(), max_count);
    }

    /// Appends an enumeration variant from a closed universe.
    pub fn append_enum<E: Enum>(&mut self, value: E) {
        self.inner
            .put(value.into_raw() as u64, enum_bits(E::VARIANTS));
    }

    /// Appends any value which implements the [`Codec`] protocol.
    #[inline]
    pub fn append<T: Codec>(&mut self, value: &T) {
        value.encode(self);
    }

    /// Skips ahead to the next byte boundary, leaving the padding
    /// bits zero.
    #[inline]
    pub fn align(&mut self) {
        self.inner.realign_to_byte();
    }

    /// Finalizes the packet.
    ///
    /// Patches the total bit length into the header and, when
    /// `with_crc` is set, appends a little-endian CRC-32 trailer
    /// computed over all preceding bytes.
    ///
    /// # Panics
    ///
    /// Panics when the packet exceeds [`u32::MAX`] bits.
    pub fn pack(self, with_crc: bool) -> Vec<u8> {
        let end_bit = self.inner.written_bits();
        assert!(
            end_bit <= u32::MAX as usize,
            "packet length overflows the header"
        );

        let mut bytes = self.inner.into_inner();
        LE::write_u32(&mut bytes[..HEADER_BYTES], end_bit as u32);

        if with_crc {
            let mut trailer = [0; 4];
            LE::write_u32(&mut trailer, crc::hash(&bytes));
            bytes.extend_from_slice(&trailer);
        }

        log::trace!("packed {end_bit} bits into {} bytes", bytes.len());
        bytes
    }
}
