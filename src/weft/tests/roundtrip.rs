//! Round-trip laws over the primitive value types.

use std::fmt::Debug;

use rand::{Rng, SeedableRng, rngs::StdRng};
use weft::{Codec, Error, PacketReader, PacketWriter};

fn roundtrip_samples<T: Codec + PartialEq + Debug>(values: &[T]) {
    let mut writer = PacketWriter::new();
    for value in values {
        writer.append(value);
    }

    let bytes = writer.pack(false);
    let mut reader = PacketReader::new(&bytes).unwrap();
    for value in values {
        assert_eq!(&reader.read::<T>().unwrap(), value);
    }

    assert_eq!(reader.remaining_bits(), 0);
}

#[test]
fn exhaustive_u8_i8() {
    let mut writer = PacketWriter::new();
    for v in u8::MIN..=u8::MAX {
        writer.append_full(v);
        writer.append_full(v as i8);
    }

    let bytes = writer.pack(false);
    let mut reader = PacketReader::new(&bytes).unwrap();
    for v in u8::MIN..=u8::MAX {
        assert_eq!(reader.read_full::<u8>(), Ok(v));
        assert_eq!(reader.read_full::<i8>(), Ok(v as i8));
    }
}

#[test]
fn random_unsigned_widths() {
    let mut rng = StdRng::seed_from_u64(0x5EED);

    let mut u16s = vec![u16::MIN, 1, u16::MAX];
    u16s.extend((0..512).map(|_| rng.random::<u16>()));
    roundtrip_samples(&u16s);

    let mut u32s = vec![u32::MIN, 1, u32::MAX];
    u32s.extend((0..512).map(|_| rng.random::<u32>()));
    roundtrip_samples(&u32s);

    let mut u64s = vec![u64::MIN, 1, u64::MAX];
    u64s.extend((0..512).map(|_| rng.random::<u64>()));
    roundtrip_samples(&u64s);
}

#[test]
fn random_signed_widths() {
    let mut rng = StdRng::seed_from_u64(0xF00D);

    let mut i16s = vec![i16::MIN, -1, 0, 1, i16::MAX];
    i16s.extend((0..512).map(|_| rng.random::<i16>()));
    roundtrip_samples(&i16s);

    let mut i32s = vec![i32::MIN, -1, 0, 1, i32::MAX];
    i32s.extend((0..512).map(|_| rng.random::<i32>()));
    roundtrip_samples(&i32s);

    let mut i64s = vec![i64::MIN, -1, 0, 1, i64::MAX];
    i64s.extend((0..512).map(|_| rng.random::<i64>()));
    roundtrip_samples(&i64s);
}

#[test]
fn float_bit_patterns() {
    roundtrip_samples(&[
        0.0f32,
        -0.0,
        1.5,
        -1.5,
        f32::MIN,
        f32::MAX,
        f32::MIN_POSITIVE,
        f32::EPSILON,
        f32::INFINITY,
        f32::NEG_INFINITY,
    ]);

    roundtrip_samples(&[
        0.0f64,
        -0.0,
        1.5,
        -1.5,
        f64::MIN,
        f64::MAX,
        f64::MIN_POSITIVE,
        f64::EPSILON,
        f64::INFINITY,
        f64::NEG_INFINITY,
    ]);

    // NaN round-trips bit-exactly even though it compares unequal.
    let mut writer = PacketWriter::new();
    writer.append_full(f32::NAN);
    writer.append_full(f64::NAN);

    let bytes = writer.pack(false);
    let mut reader = PacketReader::new(&bytes).unwrap();
    assert_eq!(
        reader.read_full::<f32>().unwrap().to_bits(),
        f32::NAN.to_bits()
    );
    assert_eq!(
        reader.read_full::<f64>().unwrap().to_bits(),
        f64::NAN.to_bits()
    );
}

#[test]
fn mixed_bools_and_bits() {
    let mut writer = PacketWriter::new();
    writer.append_bool(true);
    writer.append_bit(0);
    writer.append_fixed(0x2BAD, 14);
    writer.append_bool(false);

    let bytes = writer.pack(false);
    let mut reader = PacketReader::new(&bytes).unwrap();
    assert_eq!(reader.read_bool(), Ok(true));
    assert_eq!(reader.read_bit(), Ok(0));
    assert_eq!(reader.read_fixed(14), Ok(0x2BAD));
    assert_eq!(reader.read_bool(), Ok(false));
}

#[test]
fn reading_past_end_is_too_short() {
    let mut writer = PacketWriter::new();
    writer.append_fixed(0b1010, 4);

    let bytes = writer.pack(false);
    let mut reader = PacketReader::new(&bytes).unwrap();
    assert_eq!(reader.read_fixed(4), Ok(0b1010));

    // Only padding is left; every further read fails and the cursor
    // stays within the advertised payload.
    assert_eq!(reader.read_fixed(1), Err(Error::TooShort));
    assert_eq!(reader.read_full::<u64>(), Err(Error::TooShort));
    assert!(reader.position() <= reader.end_bit());
}

#[test]
fn cursor_tracks_reads() {
    let mut writer = PacketWriter::new();
    writer.append_fixed(0x7F, 7);
    writer.append_full(0xFFFF_u16);

    let bytes = writer.pack(false);
    let mut reader = PacketReader::new(&bytes).unwrap();
    assert_eq!(reader.position(), 32);

    reader.read_fixed(7).unwrap();
    assert_eq!(reader.position(), 39);

    reader.read_full::<u16>().unwrap();
    assert_eq!(reader.position(), 55);
    assert_eq!(reader.remaining_bits(), 0);
}
