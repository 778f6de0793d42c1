//! Geometry value types commonly exchanged in real-time payloads.

use crate::{Error, PacketReader, PacketWriter, codec::Codec};

/// A 2D vector with single-precision components.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// A 3D vector with single-precision components.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Codec for Vec2 {
    fn encode(&self, writer: &mut PacketWriter) {
        writer.append_full(self.x);
        writer.append_full(self.y);
    }

    fn decode(reader: &mut PacketReader<'_>) -> Result<Self, Error> {
        Ok(Self {
            x: reader.read_full()?,
            y: reader.read_full()?,
        })
    }
}

impl Codec for Vec3 {
    fn encode(&self, writer: &mut PacketWriter) {
        writer.append_full(self.x);
        writer.append_full(self.y);
        writer.append_full(self.z);
    }

    fn decode(reader: &mut PacketReader<'_>) -> Result<Self, Error> {
        Ok(Self {
            x: reader.read_full()?,
            y: reader.read_full()?,
            z: reader.read_full()?,
        })
    }
}
