//! PNG round-trip tests for the conversion layer

use std::{fs, path::PathBuf};

use rpk_types::{Channels, RpkFile};

fn temp_path(name: &str) -> PathBuf {
	let mut path = std::env::temp_dir();
	path.push(format!("rpk-convert-{}-{name}", std::process::id()));
	path
}

fn write_png(path: &PathBuf, width: u32, height: u32, color: png::ColorType, data: &[u8]) {
	let file = fs::File::create(path).unwrap();
	let mut encoder = png::Encoder::new(std::io::BufWriter::new(file), width, height);
	encoder.set_color(color);
	encoder.set_depth(png::BitDepth::Eight);

	let mut writer = encoder.write_header().unwrap();
	writer.write_image_data(data).unwrap();
}

fn read_png(path: &PathBuf) -> (png::ColorType, Vec<u8>) {
	let decoder = png::Decoder::new(fs::File::open(path).unwrap());
	let mut reader = decoder.read_info().unwrap();
	let mut buf = vec![0; reader.output_buffer_size()];
	let info = reader.next_frame(&mut buf).unwrap();
	buf.truncate(info.buffer_size());

	(info.color_type, buf)
}

fn gradient(width: u32, height: u32, bpp: usize) -> Vec<u8> {
	let mut data = Vec::new();
	for y in 0..height {
		for x in 0..width {
			data.push((x * 11) as u8);
			if bpp > 1 {
				data.push((y * 7) as u8);
				data.push(((x + y) * 3) as u8);
			}
			if bpp == 4 {
				data.push(255 - (x as u8));
			}
		}
	}
	data
}

#[test]
fn test_png_round_trip_rgb() {
	let (width, height) = (23, 11);
	let data = gradient(width, height, 3);

	let src = temp_path("rgb-src.png");
	let packed = temp_path("rgb.rpk");
	let out = temp_path("rgb-out.png");

	write_png(&src, width, height, png::ColorType::Rgb, &data);
	rpk_rs::png_to_rpk(&src, &packed).unwrap();

	let rpk = RpkFile::open(&packed).unwrap();
	assert_eq!(rpk.header().width(), width);
	assert_eq!(rpk.header().height(), height);
	assert_eq!(rpk.header().channels(), Channels::Rgb);
	assert_eq!(rpk.pixels(), data);

	rpk_rs::rpk_to_png(&packed, &out).unwrap();
	let (color, decoded) = read_png(&out);
	assert_eq!(color, png::ColorType::Rgb);
	assert_eq!(decoded, data);

	for path in [src, packed, out] {
		let _ = fs::remove_file(path);
	}
}

#[test]
fn test_png_round_trip_rgba() {
	let (width, height) = (16, 16);
	let data = gradient(width, height, 4);

	let src = temp_path("rgba-src.png");
	let packed = temp_path("rgba.rpk");
	let out = temp_path("rgba-out.png");

	write_png(&src, width, height, png::ColorType::Rgba, &data);
	rpk_rs::png_to_rpk(&src, &packed).unwrap();

	let rpk = RpkFile::open(&packed).unwrap();
	assert_eq!(rpk.header().channels(), Channels::Rgba);
	assert_eq!(rpk.pixels(), data);

	rpk_rs::rpk_to_png(&packed, &out).unwrap();
	let (color, decoded) = read_png(&out);
	assert_eq!(color, png::ColorType::Rgba);
	assert_eq!(decoded, data);

	for path in [src, packed, out] {
		let _ = fs::remove_file(path);
	}
}

#[test]
fn test_grayscale_png_is_widened_to_rgb() {
	let (width, height) = (9, 5);
	let data = gradient(width, height, 1);

	let src = temp_path("gray-src.png");
	let packed = temp_path("gray.rpk");
	let out = temp_path("gray-out.png");

	write_png(&src, width, height, png::ColorType::Grayscale, &data);
	rpk_rs::png_to_rpk(&src, &packed).unwrap();

	let rpk = RpkFile::open(&packed).unwrap();
	assert_eq!(rpk.header().channels(), Channels::Rgb);
	let widened: Vec<u8> = data.iter().flat_map(|&v| [v, v, v]).collect();
	assert_eq!(rpk.pixels(), widened);

	rpk_rs::rpk_to_png(&packed, &out).unwrap();
	let (color, decoded) = read_png(&out);
	assert_eq!(color, png::ColorType::Rgb);
	assert_eq!(decoded, widened);

	for path in [src, packed, out] {
		let _ = fs::remove_file(path);
	}
}
