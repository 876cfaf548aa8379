//! Benchmark suite for the RPK codec
//!
//! Measures encode and decode throughput over synthetic images whose
//! patterns exercise the different run kinds, plus header parsing on its
//! own.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rpk_benches::{generate_flat, generate_gradient, generate_noise, sizes};
use rpk_types::file::rpk::{Channels, Header, compress, decompress};
use std::hint::black_box;

fn bench_compress(c: &mut Criterion) {
	let mut group = c.benchmark_group("rpk_compress");

	let (width, height) = sizes::SMALL;
	let inputs = [
		("flat", generate_flat(width, height, Channels::Rgb)),
		("gradient", generate_gradient(width, height, Channels::Rgb)),
		("noise", generate_noise(width, height, Channels::Rgb)),
	];

	for (name, pixels) in &inputs {
		group.throughput(Throughput::Elements(u64::from(width) * u64::from(height)));
		group.bench_with_input(BenchmarkId::new("compress", name), pixels, |b, pixels| {
			b.iter(|| {
				let result = compress(black_box(pixels), width, height, Channels::Rgb, 0);
				black_box(result)
			});
		});
	}

	group.finish();
}

fn bench_decompress(c: &mut Criterion) {
	let mut group = c.benchmark_group("rpk_decompress");

	let (width, height) = sizes::SMALL;
	let inputs = [
		("flat", generate_flat(width, height, Channels::Rgb)),
		("gradient", generate_gradient(width, height, Channels::Rgb)),
		("noise", generate_noise(width, height, Channels::Rgb)),
	];

	for (name, pixels) in &inputs {
		let encoded = compress(pixels, width, height, Channels::Rgb, 0).unwrap();

		group.throughput(Throughput::Elements(u64::from(width) * u64::from(height)));
		group.bench_with_input(BenchmarkId::new("decompress", name), &encoded, |b, data| {
			b.iter(|| {
				let result = decompress(black_box(data));
				black_box(result)
			});
		});
	}

	group.finish();
}

fn bench_header_parsing(c: &mut Criterion) {
	let mut group = c.benchmark_group("rpk_header");

	let data = Header::new(1024, 768, Channels::Rgba, 0).to_bytes();
	group.bench_function("parse_header", |b| {
		b.iter(|| {
			let result = Header::from_bytes(black_box(&data));
			black_box(result)
		});
	});

	group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress, bench_header_parsing);
criterion_main!(benches);
