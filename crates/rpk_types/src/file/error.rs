//! Error types for file format parsing and manipulation.

use thiserror::Error;

use super::rpk::MAX_REPEAT_RUN;

/// Errors that can occur when encoding or decoding RPK files
#[derive(Debug, Error)]
pub enum RpkError {
	/// Invalid magic bytes
	#[error("invalid magic bytes: expected {expected:02X?}, got {actual:02X?}")]
	InvalidMagic {
		/// Magic bytes a valid RPK file starts with
		expected: [u8; 3],
		/// Magic bytes actually present
		actual: [u8; 3],
	},

	/// Stream ended before the header, an opcode payload, or the declared
	/// pixel count was complete
	#[error("truncated stream: unexpected end of input")]
	Truncated,

	/// Header declares a channel count other than 3 or 4
	#[error("invalid channel count {0}: must be 3 (RGB) or 4 (RGBA)")]
	InvalidChannels(u8),

	/// A repeat-run length field decoded to a value no valid encoder emits
	#[error("repeat run of {0} pixels exceeds the maximum of {MAX_REPEAT_RUN}")]
	OversizeRun(u32),

	/// A supplied scanline has the wrong byte length
	#[error("row is {actual} bytes, expected {expected}")]
	RowLength {
		/// Expected number of bytes (`width * channels`)
		expected: usize,
		/// Actual number of bytes supplied
		actual: usize,
	},

	/// More or fewer rows than the header declares
	#[error("image declares {expected} rows, got {actual}")]
	RowCount {
		/// Number of rows the header declares
		expected: u32,
		/// Number of rows seen
		actual: u32,
	},

	/// A flat pixel buffer has the wrong byte length for its header
	#[error("pixel buffer is {actual} bytes, expected {expected}")]
	PixelBuffer {
		/// Expected number of bytes (`width * height * channels`)
		expected: usize,
		/// Actual number of bytes supplied
		actual: usize,
	},

	/// The upstream byte source reported failure
	#[error("failed to read from byte source")]
	Source(#[source] std::io::Error),

	/// The downstream byte sink reported failure
	#[error("failed to write to byte sink")]
	Sink(#[source] std::io::Error),
}

impl RpkError {
	/// Maps a read error, folding short reads into [`RpkError::Truncated`].
	pub(crate) fn from_read(err: std::io::Error) -> Self {
		if err.kind() == std::io::ErrorKind::UnexpectedEof {
			RpkError::Truncated
		} else {
			RpkError::Source(err)
		}
	}
}
