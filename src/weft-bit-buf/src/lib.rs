//! Provides buffers for bit-level serialization and deserialization
//! of data.
//!
//! Dense bit packing keeps real-time payloads small: a boolean costs
//! one bit, a bounded integer only the bits its range needs. This
//! crate provides the reusable cursor machinery such encodings are
//! built from, leaving framing and value semantics to higher layers.
//!
//! Every operation starts reading or writing at a byte's LSB, working
//! towards the MSB. Multi-bit fields span byte boundaries without
//! padding.

#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod reader;
pub use reader::BitReader;

mod utils;

mod writer;
pub use writer::BitWriter;
