//! RPK Image Format Compression
//!
//! ## Overview
//!
//! The encoder consumes pixels in raster order and accumulates them into a
//! pending run. A run is flushed as one opcode byte plus its buffered
//! argument payload whenever an incompatible pixel arrives, the run reaches
//! its length cap, or the image ends.
//!
//! ## Operation Selection
//!
//! For each pixel, against the previous pixel `prev` and the whole-pixel
//! XOR `d`, the first matching rule wins:
//!
//! 1. Pixel equals `prev`: extend (or start) a repeat run. The cache is not
//!    touched.
//! 2. A 2-bit delta run is active, below its cap, and `d` fits two bits per
//!    component: extend it. The cache probe is skipped on this path; a
//!    one-byte index could not beat the one-byte delta and would end the
//!    run.
//! 3. The cache slot for the pixel holds the pixel: flush and emit the slot
//!    number as a single byte.
//! 4. `d` fits two bits per component and the active run is not the 5/6/5
//!    kind: append to (or start) a 2-bit delta run.
//! 5. `d` fits 5/6/5 over RGB with alpha unchanged: append to (or start) a
//!    5/6/5 run.
//! 6. Otherwise: append the literal color to (or start) a literal run.
//!
//! Every pixel that reaches rules 2, 4, 5 or 6 is written to its cache
//! slot, mirroring the decoder. This ordering is what makes the emitted
//! stream deterministic; reordering it produces different (if still
//! decodable) bytes.
//!
//! ## Run Lengths
//!
//! Repeat runs carry up to 526 352 pixels using the extended length forms
//! described in [`super::decode`]; the other run kinds carry at most 32
//! pixels and buffer their argument bytes until the flush.

use std::io::Write;

use crate::file::RpkError;

use super::{
	Channels, Header, RunType,
	constants::{FOOTER, MAX_ARG_RUN, MAX_REPEAT_RUN},
	opcodes::{DIFF2_MASK, DIFF565_MASK, OP_RUN, RUN_TYPE_SHIFT},
	pixel::{ColorCache, Pixel},
};

/// Packs a whole-pixel XOR whose components all fit two bits into one
/// argument byte, red in the top two bits.
fn diff2_byte(d: u32) -> u8 {
	let [dr, dg, db, da] = d.to_be_bytes();
	dr << 6 | dg << 4 | db << 2 | da
}

/// Packs a whole-pixel XOR that fits the 5/6/5 form into two argument
/// bytes: `[dr:5 | dg_hi:3] [dg_lo:3 | db:5]`.
fn diff565_bytes(d: u32) -> [u8; 2] {
	let [dr, dg, db, _] = d.to_be_bytes();
	[dr << 3 | dg >> 3, (dg & 7) << 5 | db]
}

/// Streaming RPK encoder.
///
/// Writes the header on construction, consumes one scanline per
/// [`write_row`](Encoder::write_row) call, and emits the final flush and
/// the 8-byte end marker in [`finish`](Encoder::finish). State is scoped to
/// one image; after any error the encoder must be discarded.
#[derive(Debug)]
pub struct Encoder<W: Write> {
	sink: W,
	width: u32,
	height: u32,
	channels: Channels,
	cache: ColorCache,
	prev: Pixel,
	run_type: Option<RunType>,
	run: u32,
	args: Vec<u8>,
	rows_written: u32,
}

impl<W: Write> Encoder<W> {
	/// Creates an encoder for one image and writes the file header.
	pub fn new(mut sink: W, header: &Header) -> Result<Self, RpkError> {
		sink.write_all(&header.to_bytes()).map_err(RpkError::Sink)?;

		Ok(Self {
			sink,
			width: header.width(),
			height: header.height(),
			channels: header.channels(),
			cache: ColorCache::new(),
			prev: Pixel::OPAQUE,
			run_type: None,
			run: 0,
			// 32 pixels of at most 4 argument bytes each
			args: Vec::with_capacity(MAX_ARG_RUN as usize * 4),
			rows_written: 0,
		})
	}

	/// Consumes one scanline of `width * channels` bytes.
	pub fn write_row(&mut self, row: &[u8]) -> Result<(), RpkError> {
		let expected = self.width as usize * self.channels.bytes_per_pixel();
		if row.len() != expected {
			return Err(RpkError::RowLength {
				expected,
				actual: row.len(),
			});
		}
		if self.rows_written == self.height {
			return Err(RpkError::RowCount {
				expected: self.height,
				actual: self.height + 1,
			});
		}

		for bytes in row.chunks_exact(self.channels.bytes_per_pixel()) {
			self.push_pixel(Pixel::from_row(bytes, self.channels))?;
		}
		self.rows_written += 1;

		Ok(())
	}

	/// Flushes the pending run, writes the end marker, and returns the sink.
	///
	/// Fails with [`RpkError::RowCount`] if fewer rows were supplied than
	/// the header declares.
	pub fn finish(mut self) -> Result<W, RpkError> {
		if self.rows_written != self.height {
			return Err(RpkError::RowCount {
				expected: self.height,
				actual: self.rows_written,
			});
		}

		self.flush_run()?;
		self.sink.write_all(&FOOTER).map_err(RpkError::Sink)?;
		self.sink.flush().map_err(RpkError::Sink)?;

		Ok(self.sink)
	}

	fn push_pixel(&mut self, px: Pixel) -> Result<(), RpkError> {
		if px == self.prev {
			if self.run_type == Some(RunType::Repeat) && self.run < MAX_REPEAT_RUN {
				self.run += 1;
			} else {
				self.flush_run()?;
				self.run_type = Some(RunType::Repeat);
				self.run = 1;
			}
			return Ok(());
		}

		let d = px.bits() ^ self.prev.bits();

		// Greedy continuation of an active 2-bit delta run, no cache probe
		if self.run_type == Some(RunType::Diff2) && self.run < MAX_ARG_RUN && d & DIFF2_MASK == 0 {
			self.args.push(diff2_byte(d));
			self.run += 1;
			self.cache.put(px);
			self.prev = px;
			return Ok(());
		}

		if self.cache.get(px.hash()) == px {
			self.flush_run()?;
			self.sink.write_all(&[px.hash()]).map_err(RpkError::Sink)?;
			self.prev = px;
			return Ok(());
		}

		if d & DIFF2_MASK == 0 && self.run_type != Some(RunType::Diff565) {
			self.start_or_extend(RunType::Diff2)?;
			self.args.push(diff2_byte(d));
		} else if d & DIFF565_MASK == 0 {
			self.start_or_extend(RunType::Diff565)?;
			self.args.extend_from_slice(&diff565_bytes(d));
		} else {
			self.start_or_extend(RunType::Color)?;
			self.args.extend_from_slice(&[px.r, px.g, px.b]);
			if self.channels.has_alpha() {
				self.args.push(px.a);
			}
		}
		self.run += 1;
		self.cache.put(px);
		self.prev = px;

		Ok(())
	}

	/// Flushes first if a different run kind is pending or the active one
	/// is full, then marks `kind` as the pending run kind.
	fn start_or_extend(&mut self, kind: RunType) -> Result<(), RpkError> {
		if self.run > 0 && (self.run_type != Some(kind) || self.run == MAX_ARG_RUN) {
			self.flush_run()?;
		}
		self.run_type = Some(kind);
		Ok(())
	}

	fn flush_run(&mut self) -> Result<(), RpkError> {
		let Some(kind) = self.run_type.take() else {
			return Ok(());
		};
		let run = self.run;
		self.run = 0;

		match kind {
			RunType::Repeat => self.write_repeat_opcode(run)?,
			_ => {
				let op = OP_RUN | (kind as u8) << RUN_TYPE_SHIFT | (run - 1) as u8;
				self.sink.write_all(&[op]).map_err(RpkError::Sink)?;
				self.sink.write_all(&self.args).map_err(RpkError::Sink)?;
			}
		}
		self.args.clear();

		Ok(())
	}

	/// Emits a repeat-run opcode, picking the shortest of the three length
	/// forms.
	fn write_repeat_opcode(&mut self, run: u32) -> Result<(), RpkError> {
		debug_assert!((1..=MAX_REPEAT_RUN).contains(&run));

		if run <= 16 {
			let op = OP_RUN | (run - 1) as u8;
			self.sink.write_all(&[op]).map_err(RpkError::Sink)
		} else if run <= 2064 {
			let v = run - 17;
			let op = OP_RUN | 0x10 | (v >> 8) as u8;
			self.sink.write_all(&[op, v as u8]).map_err(RpkError::Sink)
		} else {
			let v = run - 2065;
			let op = OP_RUN | 0x18 | (v >> 16) as u8;
			self.sink
				.write_all(&[op, (v >> 8) as u8, v as u8])
				.map_err(RpkError::Sink)
		}
	}
}

/// Compresses a raw pixel buffer into a complete RPK file.
///
/// `pixels` holds `width * height * channels` bytes in raster order;
/// 3-channel data carries no alpha bytes.
pub fn compress(
	pixels: &[u8],
	width: u32,
	height: u32,
	channels: Channels,
	colorspace: u8,
) -> Result<Vec<u8>, RpkError> {
	let header = Header::new(width, height, channels, colorspace);

	let expected = header.pixel_count() as usize * channels.bytes_per_pixel();
	if pixels.len() != expected {
		return Err(RpkError::PixelBuffer {
			expected,
			actual: pixels.len(),
		});
	}

	// Worst case is one opcode byte per literal pixel plus flush overhead
	let limit = Header::SIZE + expected + expected / channels.bytes_per_pixel() + FOOTER.len();
	let mut encoder = Encoder::new(Vec::with_capacity(limit), &header)?;
	if header.row_bytes() > 0 {
		for row in pixels.chunks_exact(header.row_bytes()) {
			encoder.write_row(row)?;
		}
	} else {
		for _ in 0..height {
			encoder.write_row(&[])?;
		}
	}

	encoder.finish()
}
