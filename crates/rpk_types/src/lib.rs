//! Core types and codec support for the `rpk-rs` project.
//!
//! # File Formats
//!
//! - **RPK**: A lossless raster image format. A 13-byte header (magic,
//!   dimensions, channel count, colorspace) is followed by a sequential
//!   stream of single-byte opcodes with variable-length payloads, and an
//!   8-byte end marker. The codec keeps a 128-entry color cache and a
//!   pending run on both sides, so every byte the encoder emits can be
//!   reproduced by the decoder without look-ahead.
//!
//! # Examples
//!
//! ```rust
//! use rpk_types::file::rpk::{Channels, compress, decompress};
//!
//! // A 2x1 RGB image: one red pixel, one green pixel.
//! let pixels = [255u8, 0, 0, 0, 255, 0];
//! let encoded = compress(&pixels, 2, 1, Channels::Rgb, 0).unwrap();
//!
//! let decoded = decompress(&encoded).unwrap();
//! assert_eq!(decoded.header().width(), 2);
//! assert_eq!(decoded.pixels(), &pixels);
//! ```

pub mod file;
pub mod prelude;

// Re-export commonly used file types at crate root for convenience
pub use file::{Channels, Decoder, Encoder, RpkError, RpkFile, RpkHeader};
