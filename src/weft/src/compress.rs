//! Range compressors which quantize values from a declared interval
//! into a minimal-width bit field.
//!
//! Widths are computed from the caller-declared range, never from
//! observed data, which keeps encoding and decoding O(1) per value.
//! Writer and reader must construct compressors with identical
//! parameters for a field to decode correctly; nothing on the wire
//! records them.

use crate::{
    Error, PacketReader, PacketWriter,
    value::{Vec2, Vec3},
};

/// Quantizes unsigned integers from a `[min, max]` interval.
///
/// Values are carried as their offset from `min` in the smallest
/// field that fits `max - min`; round-trips are exact.
#[derive(Clone, Copy, Debug)]
pub struct UintCompressor {
    min: u64,
    max: u64,
    bits: u32,
}

impl UintCompressor {
    /// Creates a compressor for values in `[min, max]`.
    ///
    /// # Panics
    ///
    /// Panics when `min >= max`.
    pub fn new(min: u64, max: u64) -> Self {
        assert!(min < max, "invalid value range");

        Self {
            min,
            max,
            bits: u64::BITS - (max - min).leading_zeros(),
        }
    }

    /// The width of the encoded bit field.
    #[inline]
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Encodes `value` as its offset from the range minimum.
    pub fn encode(&self, writer: &mut PacketWriter, value: u64) {
        debug_assert!(self.min <= value && value <= self.max);
        writer.append_fixed(value.wrapping_sub(self.min), self.bits);
    }

    /// Decodes a value previously encoded with the same parameters.
    pub fn decode(&self, reader: &mut PacketReader<'_>) -> Result<u64, Error> {
        reader
            .read_fixed(self.bits)
            .map(|v| self.min.wrapping_add(v))
    }
}

/// Quantizes signed integers from a `[min, max]` interval.
///
/// The offset from the range minimum is carried in unsigned wrapping
/// arithmetic, so even the full `[i64::MIN, i64::MAX]` range
/// round-trips exactly.
#[derive(Clone, Copy, Debug)]
pub struct IntCompressor {
    min: i64,
    max: i64,
    bits: u32,
}

impl IntCompressor {
    /// Creates a compressor for values in `[min, max]`.
    ///
    /// # Panics
    ///
    /// Panics when `min >= max`.
    pub fn new(min: i64, max: i64) -> Self {
        assert!(min < max, "invalid value range");

        let span = max.wrapping_sub(min) as u64;
        Self {
            min,
            max,
            bits: u64::BITS - span.leading_zeros(),
        }
    }

    /// The width of the encoded bit field.
    #[inline]
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Encodes `value` as its offset from the range minimum.
    pub fn encode(&self, writer: &mut PacketWriter, value: i64) {
        debug_assert!(self.min <= value && value <= self.max);
        writer.append_fixed(value.wrapping_sub(self.min) as u64, self.bits);
    }

    /// Decodes a value previously encoded with the same parameters.
    pub fn decode(&self, reader: &mut PacketReader<'_>) -> Result<i64, Error> {
        reader
            .read_fixed(self.bits)
            .map(|v| self.min.wrapping_add(v as i64))
    }
}

/// Quantizes single-precision floats from a `[min, max]` interval
/// into `bits` uniform steps.
///
/// The round-trip error is bounded by `(max - min) / (2^bits - 1)`.
#[derive(Clone, Copy, Debug)]
pub struct FloatCompressor {
    min: f32,
    max: f32,
    bits: u32,
    max_bit_value: f64,
}

impl FloatCompressor {
    /// Creates a compressor for values in `[min, max]` with `bits`
    /// of precision.
    ///
    /// # Panics
    ///
    /// Panics when `min >= max`, or when `bits` is zero or exceeds
    /// 64.
    pub fn new(min: f32, max: f32, bits: u32) -> Self {
        assert!(min < max, "invalid value range");
        assert!(
            0 < bits && bits <= u64::BITS,
            "bit count {bits} out of range"
        );

        Self {
            min,
            max,
            bits,
            max_bit_value: max_bit_value(bits),
        }
    }

    /// The width of the encoded bit field.
    #[inline]
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Encodes `value`, clamped into the declared range, as its
    /// nearest quantization step.
    pub fn encode(&self, writer: &mut PacketWriter, value: f32) {
        let span = f64::from(self.max) - f64::from(self.min);
        let ratio = ((f64::from(value) - f64::from(self.min)) / span).clamp(0.0, 1.0);

        writer.append_fixed((ratio * self.max_bit_value).round() as u64, self.bits);
    }

    /// Decodes a value previously encoded with the same parameters.
    pub fn decode(&self, reader: &mut PacketReader<'_>) -> Result<f32, Error> {
        let pattern = reader.read_fixed(self.bits)? as f64;
        let span = f64::from(self.max) - f64::from(self.min);

        Ok((pattern / self.max_bit_value * span + f64::from(self.min)) as f32)
    }

    /// Encodes a [`Vec2`], one component at a time.
    pub fn encode_vec2(&self, writer: &mut PacketWriter, v: Vec2) {
        self.encode(writer, v.x);
        self.encode(writer, v.y);
    }

    /// Decodes a [`Vec2`] previously encoded with the same
    /// parameters.
    pub fn decode_vec2(&self, reader: &mut PacketReader<'_>) -> Result<Vec2, Error> {
        Ok(Vec2 {
            x: self.decode(reader)?,
            y: self.decode(reader)?,
        })
    }

    /// Encodes a [`Vec3`], one component at a time.
    pub fn encode_vec3(&self, writer: &mut PacketWriter, v: Vec3) {
        self.encode(writer, v.x);
        self.encode(writer, v.y);
        self.encode(writer, v.z);
    }

    /// Decodes a [`Vec3`] previously encoded with the same
    /// parameters.
    pub fn decode_vec3(&self, reader: &mut PacketReader<'_>) -> Result<Vec3, Error> {
        Ok(Vec3 {
            x: self.decode(reader)?,
            y: self.decode(reader)?,
            z: self.decode(reader)?,
        })
    }
}

/// Quantizes double-precision floats from a `[min, max]` interval
/// into `bits` uniform steps.
///
/// The round-trip error is bounded by `(max - min) / (2^bits - 1)`.
#[derive(Clone, Copy, Debug)]
pub struct DoubleCompressor {
    min: f64,
    max: f64,
    bits: u32,
    max_bit_value: f64,
}

impl DoubleCompressor {
    /// Creates a compressor for values in `[min, max]` with `bits`
    /// of precision.
    ///
    /// # Panics
    ///
    /// Panics when `min >= max`, or when `bits` is zero or exceeds
    /// 64.
    pub fn new(min: f64, max: f64, bits: u32) -> Self {
        assert!(min < max, "invalid value range");
        assert!(
            0 < bits && bits <= u64::BITS,
            "bit count {bits} out of range"
        );

        Self {
            min,
            max,
            bits,
            max_bit_value: max_bit_value(bits),
        }
    }

    /// The width of the encoded bit field.
    #[inline]
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Encodes `value`, clamped into the declared range, as its
    /// nearest quantization step.
    pub fn encode(&self, writer: &mut PacketWriter, value: f64) {
        let ratio = ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0);
        writer.append_fixed((ratio * self.max_bit_value).round() as u64, self.bits);
    }

    /// Decodes a value previously encoded with the same parameters.
    pub fn decode(&self, reader: &mut PacketReader<'_>) -> Result<f64, Error> {
        let pattern = reader.read_fixed(self.bits)? as f64;
        Ok(pattern / self.max_bit_value * (self.max - self.min) + self.min)
    }
}

fn max_bit_value(bits: u32) -> f64 {
    match bits {
        u64::BITS => u64::MAX as f64,
        _ => ((1u64 << bits) - 1) as f64,
    }
}
