//! `.rpk` file format support for the `rpk-rs` project.
//!
//! ## File Layout
//!
//! | Offset | Size | Field        | Description                            |
//! |--------|------|--------------|----------------------------------------|
//! | 0x00   | 3    | `magic`      | "rpk" (0x72, 0x70, 0x6B)               |
//! | 0x03   | 4    | `width`      | Image width in pixels (big-endian)     |
//! | 0x07   | 4    | `height`     | Image height in pixels (big-endian)    |
//! | 0x0B   | 1    | `channels`   | 3 = RGB, 4 = RGBA                      |
//! | 0x0C   | 1    | `colorspace` | Stored verbatim, opaque to the codec   |
//! | 0x0D   | ...  | payload      | Opcode stream, strictly sequential     |
//! | end-8  | 8    | footer       | Seven 0x00 bytes followed by 0x01      |
//!
//! The payload is a sequence of single-byte opcodes with variable-length
//! argument payloads; the decoder module documents the opcode layout and
//! the encoder module documents the emission rules.

mod decode;
mod encode;
mod pixel;


use std::{
	fmt::Display,
	io::{Read, Write},
	path::Path,
};

use crate::file::RpkError;

pub use decode::{Decoder, decompress};
pub use encode::{Encoder, compress};

pub use constants::MAX_REPEAT_RUN;

mod constants {
	/// Magic bytes for `.rpk` files
	pub const MAGIC: [u8; 3] = *b"rpk";

	/// Header size for `.rpk` files
	pub const HEADER_SIZE: usize = 13;

	/// Trailing end marker: seven zero bytes and the 0x01 terminator
	pub const FOOTER: [u8; 8] = [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01];

	/// Number of slots in the color cache
	pub const CACHE_SIZE: usize = 128;

	/// Longest repeat run a single opcode can carry (2^19 + 2^11 + 16)
	pub const MAX_REPEAT_RUN: u32 = 526_352;

	/// Longest run of argument-carrying pixels a single opcode can carry
	pub const MAX_ARG_RUN: u32 = 32;
}

mod opcodes {
	/// MSB distinguishing run opcodes from cache-index opcodes
	pub const OP_RUN: u8 = 0x80;

	/// Run type occupies bits 5..=6 of a run opcode
	pub const RUN_TYPE_SHIFT: u8 = 5;

	/// Low five bits of a run opcode hold the length field
	pub const RUN_LENGTH_MASK: u8 = 0x1F;

	/// Set bits a whole-pixel XOR must avoid for every component delta to
	/// fit two bits
	pub const DIFF2_MASK: u32 = 0xFCFC_FCFC;

	/// Set bits a whole-pixel XOR must avoid for the 5/6/5 form: five bits
	/// of red and blue, six of green, alpha unchanged
	pub const DIFF565_MASK: u32 = 0xE0C0_E0FF;
}

/// Stored colorspace tags. The codec treats the byte as opaque.
pub mod colorspace {
	/// sRGB color channels
	pub const SRGB: u8 = 0;

	/// All channels linear
	pub const LINEAR: u8 = 1;
}

/// Kinds of pixel run the codec accumulates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum RunType {
	/// Repeat of the previous pixel, no argument bytes
	Repeat = 0,
	/// One argument byte per pixel: 2-bit XOR delta per component
	Diff2 = 1,
	/// Two argument bytes per pixel: 5/6/5-bit XOR delta over RGB
	Diff565 = 2,
	/// `channels` argument bytes per pixel: literal color
	Color = 3,
}

impl RunType {
	pub(crate) fn from_bits(bits: u8) -> Self {
		match bits & 3 {
			0 => RunType::Repeat,
			1 => RunType::Diff2,
			2 => RunType::Diff565,
			_ => RunType::Color,
		}
	}
}

/// Channel layouts supported by `.rpk` files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Channels {
	/// Three components per pixel, alpha implicitly 255
	Rgb = 3,

	/// Four components per pixel
	Rgba = 4,
}

impl Channels {
	/// Returns the number of bytes one pixel occupies in a scanline.
	pub const fn bytes_per_pixel(self) -> usize {
		self as usize
	}

	/// Returns `true` if pixels carry an explicit alpha component.
	pub const fn has_alpha(self) -> bool {
		matches!(self, Channels::Rgba)
	}

	fn from_u8(value: u8) -> Result<Self, RpkError> {
		match value {
			3 => Ok(Channels::Rgb),
			4 => Ok(Channels::Rgba),
			other => Err(RpkError::InvalidChannels(other)),
		}
	}
}

impl Display for Channels {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Channels::Rgb => write!(f, "RGB"),
			Channels::Rgba => write!(f, "RGBA"),
		}
	}
}

/// Header structure for `.rpk` files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
	width: u32,
	height: u32,
	channels: Channels,
	colorspace: u8,
}

impl Header {
	/// Size of the header in bytes
	pub const SIZE: usize = constants::HEADER_SIZE;

	/// Creates a new `.rpk` file header with the specified parameters.
	pub fn new(width: u32, height: u32, channels: Channels, colorspace: u8) -> Self {
		Self {
			width,
			height,
			channels,
			colorspace,
		}
	}

	/// Returns the width of the image in pixels.
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Returns the height of the image in pixels.
	pub fn height(&self) -> u32 {
		self.height
	}

	/// Returns the channel layout of the image.
	pub fn channels(&self) -> Channels {
		self.channels
	}

	/// Returns the stored colorspace byte.
	pub fn colorspace(&self) -> u8 {
		self.colorspace
	}

	/// Returns the total number of pixels the image declares.
	pub fn pixel_count(&self) -> u64 {
		u64::from(self.width) * u64::from(self.height)
	}

	/// Returns the byte length of one scanline.
	pub fn row_bytes(&self) -> usize {
		self.width as usize * self.channels.bytes_per_pixel()
	}

	/// Parses a `.rpk` file header from the given byte slice.
	pub fn from_bytes(data: &[u8]) -> Result<Header, RpkError> {
		if data.len() < constants::HEADER_SIZE {
			return Err(RpkError::Truncated);
		}

		let magic = [data[0], data[1], data[2]];
		if magic != constants::MAGIC {
			return Err(RpkError::InvalidMagic {
				expected: constants::MAGIC,
				actual: magic,
			});
		}

		let width = u32::from_be_bytes([data[3], data[4], data[5], data[6]]);
		let height = u32::from_be_bytes([data[7], data[8], data[9], data[10]]);
		let channels = Channels::from_u8(data[11])?;
		let colorspace = data[12];

		Ok(Header {
			width,
			height,
			channels,
			colorspace,
		})
	}

	/// Loads a `.rpk` file header from any reader
	///
	/// This allows you to peek at the header without decoding the payload,
	/// which is useful for validation or determining image properties before
	/// deciding whether to decode the full image.
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, RpkError> {
		let mut buffer = [0u8; constants::HEADER_SIZE];
		reader.read_exact(&mut buffer).map_err(RpkError::from_read)?;
		Self::from_bytes(&buffer)
	}

	/// Converts the `Header` to bytes
	pub fn to_bytes(&self) -> [u8; constants::HEADER_SIZE] {
		let mut bytes = [0u8; constants::HEADER_SIZE];

		bytes[0..3].copy_from_slice(&constants::MAGIC);
		bytes[3..7].copy_from_slice(&self.width.to_be_bytes());
		bytes[7..11].copy_from_slice(&self.height.to_be_bytes());
		bytes[11] = self.channels as u8;
		bytes[12] = self.colorspace;

		bytes
	}
}

impl Display for Header {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			".rpk File Header:\n\
			- Width: {} pixels\n\
			- Height: {} pixels\n\
			- Channels: {}\n\
			- Colorspace: {}",
			self.width, self.height, self.channels, self.colorspace,
		)
	}
}

/// Representation of a decoded `.rpk` file
#[derive(Debug)]
pub struct File {
	/// Header of the `.rpk` file
	header: Header,

	/// Pixel data of the `.rpk` file, `channels` bytes per pixel in raster
	/// order
	pixels: Vec<u8>,
}

impl File {
	/// Creates a `.rpk` file value from a header and a raw pixel buffer.
	///
	/// The buffer must hold exactly `width * height * channels` bytes.
	pub fn new(header: Header, pixels: Vec<u8>) -> Result<Self, RpkError> {
		let expected = header.pixel_count() as usize * header.channels().bytes_per_pixel();
		if pixels.len() != expected {
			return Err(RpkError::PixelBuffer {
				expected,
				actual: pixels.len(),
			});
		}

		Ok(Self { header, pixels })
	}

	/// Returns a reference to the header of the `.rpk` file
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Returns a reference to the pixel data of the `.rpk` file
	pub fn pixels(&self) -> &[u8] {
		&self.pixels
	}

	/// Consumes the file and returns the pixel data
	pub fn into_pixels(self) -> Vec<u8> {
		self.pixels
	}

	/// Opens and decodes a `.rpk` file from the specified path
	pub fn open(path: impl AsRef<Path>) -> Result<Self, RpkError> {
		let data = std::fs::read(path).map_err(RpkError::Source)?;
		decompress(&data)
	}

	/// Decodes a `.rpk` file from any reader
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, RpkError> {
		let mut decoder = Decoder::new(reader)?;
		let header = *decoder.header();

		let row_bytes = header.row_bytes();
		let mut pixels = vec![0u8; header.pixel_count() as usize * header.channels().bytes_per_pixel()];
		if row_bytes > 0 {
			for row in pixels.chunks_exact_mut(row_bytes) {
				decoder.read_row(row)?;
			}
		} else {
			for _ in 0..header.height() {
				decoder.read_row(&mut [])?;
			}
		}
		decoder.finish()?;

		Ok(Self { header, pixels })
	}

	/// Encodes the file and writes it to any writer
	pub fn to_writer<W: Write>(&self, writer: W) -> Result<W, RpkError> {
		let mut encoder = Encoder::new(writer, &self.header)?;
		if self.header.row_bytes() > 0 {
			for row in self.pixels.chunks_exact(self.header.row_bytes()) {
				encoder.write_row(row)?;
			}
		} else {
			for _ in 0..self.header.height() {
				encoder.write_row(&[])?;
			}
		}
		encoder.finish()
	}

	/// Encodes the file into a byte vector
	pub fn to_bytes(&self) -> Result<Vec<u8>, RpkError> {
		self.to_writer(Vec::new())
	}

	/// Encodes the file and saves it to the specified path
	pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RpkError> {
		let file = std::fs::File::create(path).map_err(RpkError::Sink)?;
		let mut writer = std::io::BufWriter::new(file);
		self.to_writer(&mut writer)?;
		writer.flush().map_err(RpkError::Sink)
	}
}
