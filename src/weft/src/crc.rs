//! CRC-32 calculation for integrity-checking packed payloads.

/// Computes the IEEE-802.3 CRC-32 of `data`, as carried in the
/// optional packet trailer.
pub fn hash(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}
