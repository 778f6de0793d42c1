//! Length-prefixed array codecs with caller-declared bounds.

use std::marker::PhantomData;

use crate::{Error, PacketReader, PacketWriter, codec::Codec, len_bits};

/// A homogeneous array codec whose elements occupy a fixed number of
/// bits each.
///
/// The element width and count bound are declared up front and never
/// travel on the wire; writer and reader must construct the same
/// descriptor.
#[derive(Clone, Copy, Debug)]
pub struct BitArray {
    max_count: u32,
    value_bits: u32,
}

impl BitArray {
    /// Creates a descriptor for arrays of up to `max_count` elements
    /// of `value_bits` bits each.
    ///
    /// # Panics
    ///
    /// Panics when `max_count` is zero, or when `value_bits` is zero
    /// or exceeds 64.
    pub fn new(max_count: u32, value_bits: u32) -> Self {
        assert!(max_count > 0, "count bound must not be zero");
        assert!(
            0 < value_bits && value_bits <= u64::BITS,
            "bit count {value_bits} out of range"
        );

        Self {
            max_count,
            value_bits,
        }
    }

    /// Encodes the element count followed by every element in order.
    pub fn encode(&self, writer: &mut PacketWriter, values: &[u64]) {
        debug_assert!(values.len() <= self.max_count as usize);

        writer.append_fixed(values.len() as u64, len_bits(self.max_count));
        for &value in values {
            writer.append_fixed(value, self.value_bits);
        }
    }

    /// Decodes an array previously written with the same descriptor.
    pub fn decode(&self, reader: &mut PacketReader<'_>) -> Result<Vec<u64>, Error> {
        let count = reader.read_fixed(len_bits(self.max_count))? as usize;

        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(reader.read_fixed(self.value_bits)?);
        }

        Ok(values)
    }
}

/// A length-prefixed array whose elements compose through the
/// [`Codec`] protocol.
#[derive(Debug)]
pub struct BoundedArray<T> {
    max_count: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Codec> BoundedArray<T> {
    /// Creates a descriptor for arrays of up to `max_count`
    /// elements.
    ///
    /// # Panics
    ///
    /// Panics when `max_count` is zero.
    pub fn new(max_count: u32) -> Self {
        assert!(max_count > 0, "count bound must not be zero");

        Self {
            max_count,
            _marker: PhantomData,
        }
    }

    /// Encodes the element count followed by every element in order.
    pub fn encode(&self, writer: &mut PacketWriter, values: &[T]) {
        debug_assert!(values.len() <= self.max_count as usize);

        writer.append_fixed(values.len() as u64, len_bits(self.max_count));
        for value in values {
            value.encode(writer);
        }
    }

    /// Decodes an array previously written with the same descriptor.
    pub fn decode(&self, reader: &mut PacketReader<'_>) -> Result<Vec<T>, Error> {
        let count = reader.read_fixed(len_bits(self.max_count))? as usize;

        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(T::decode(reader)?);
        }

        Ok(values)
    }
}
