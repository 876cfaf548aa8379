//! PNG ↔ RPK conversion layer for the `rpk` command-line tool.
//!
//! The PNG side streams one scanline at a time in both directions:
//! [`png_to_rpk`] feeds progressive `png` reader rows into the RPK encoder,
//! and [`rpk_to_png`] feeds decoded RPK rows into a progressive `png`
//! stream writer. Only interlaced PNG input falls back to a whole-frame
//! buffer.

use std::{
	error::Error,
	fs::File,
	io::{BufReader, BufWriter, Write},
	path::Path,
};

use rpk_types::file::rpk::{Channels, Decoder, Encoder, Header, colorspace};

/// Widens a decoded PNG row to the scanline layout the codec consumes.
///
/// Gray and gray-alpha rows are replicated to RGB/RGBA; everything else is
/// already in channel order after 8-bit normalization.
fn widen_row(data: &[u8], color: png::ColorType, out: &mut Vec<u8>) {
	out.clear();
	match color {
		png::ColorType::Grayscale => {
			for &v in data {
				out.extend_from_slice(&[v, v, v]);
			}
		}
		png::ColorType::GrayscaleAlpha => {
			for pair in data.chunks_exact(2) {
				out.extend_from_slice(&[pair[0], pair[0], pair[0], pair[1]]);
			}
		}
		_ => out.extend_from_slice(data),
	}
}

/// Encodes a PNG file to RPK, row by row.
///
/// Sources with an alpha channel become 4-channel RPK files; everything
/// else becomes 3-channel. The colorspace byte is written as sRGB.
pub fn png_to_rpk(input: &Path, output: &Path) -> Result<(), Box<dyn Error>> {
	let mut png_decoder = png::Decoder::new(BufReader::new(File::open(input)?));
	png_decoder.set_transformations(png::Transformations::normalize_to_color8());
	let mut reader = png_decoder.read_info()?;

	let (color_type, bit_depth) = reader.output_color_type();
	if bit_depth != png::BitDepth::Eight {
		return Err(format!("unsupported PNG bit depth {bit_depth:?}").into());
	}
	let channels = match color_type {
		png::ColorType::Rgb | png::ColorType::Grayscale => Channels::Rgb,
		png::ColorType::Rgba | png::ColorType::GrayscaleAlpha => Channels::Rgba,
		png::ColorType::Indexed => {
			return Err("indexed PNG rows were not expanded".into());
		}
	};

	let info = reader.info();
	let header = Header::new(info.width, info.height, channels, colorspace::SRGB);
	log::debug!(
		"encoding {}x{} {} image to {}",
		header.width(),
		header.height(),
		header.channels(),
		output.display()
	);

	let mut encoder = Encoder::new(BufWriter::new(File::create(output)?), &header)?;
	let mut row_buf = Vec::with_capacity(header.row_bytes());
	if reader.info().interlaced {
		// Adam7 passes do not arrive in raster order; deinterlace through a
		// whole-frame buffer instead of streaming.
		let mut frame_buf = vec![0; reader.output_buffer_size()];
		let frame = reader.next_frame(&mut frame_buf)?;
		for row in frame_buf[..frame.buffer_size()].chunks_exact(frame.line_size) {
			widen_row(row, color_type, &mut row_buf);
			encoder.write_row(&row_buf)?;
		}
	} else {
		while let Some(row) = reader.next_row()? {
			widen_row(row.data(), color_type, &mut row_buf);
			encoder.write_row(&row_buf)?;
		}
	}
	encoder.finish()?;

	log::info!("encoded {} -> {}", input.display(), output.display());
	Ok(())
}

/// Decodes an RPK file to PNG, row by row.
///
/// The PNG is written at bit depth 8 with the color type matching the RPK
/// channel count (RGB or RGBA).
pub fn rpk_to_png(input: &Path, output: &Path) -> Result<(), Box<dyn Error>> {
	let mut decoder = Decoder::new(BufReader::new(File::open(input)?))?;
	let header = *decoder.header();
	log::debug!(
		"decoding {}x{} {} image to {}",
		header.width(),
		header.height(),
		header.channels(),
		output.display()
	);

	let mut png_encoder = png::Encoder::new(
		BufWriter::new(File::create(output)?),
		header.width(),
		header.height(),
	);
	png_encoder.set_color(match header.channels() {
		Channels::Rgb => png::ColorType::Rgb,
		Channels::Rgba => png::ColorType::Rgba,
	});
	png_encoder.set_depth(png::BitDepth::Eight);

	let mut writer = png_encoder.write_header()?;
	let mut stream = writer.stream_writer()?;

	let mut row = vec![0u8; header.row_bytes()];
	for _ in 0..header.height() {
		decoder.read_row(&mut row)?;
		stream.write_all(&row)?;
	}
	stream.finish()?;
	decoder.finish()?;

	log::info!("decoded {} -> {}", input.display(), output.display());
	Ok(())
}
