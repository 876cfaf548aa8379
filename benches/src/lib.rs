//! Benchmark helper utilities for rpk-rs
//!
//! This module provides generators for synthetic test images. Each pattern
//! leans on a different part of the codec: flat images produce long repeat
//! runs, gradients produce delta runs, and noise forces literal colors and
//! cache traffic.

use rpk_types::Channels;

/// Generates a solid-color image (long repeat runs).
pub fn generate_flat(width: u32, height: u32, channels: Channels) -> Vec<u8> {
	let px: &[u8] = if channels.has_alpha() {
		&[180, 90, 45, 255]
	} else {
		&[180, 90, 45]
	};

	let count = (width as usize) * (height as usize);
	let mut pixels = Vec::with_capacity(count * channels.bytes_per_pixel());
	for _ in 0..count {
		pixels.extend_from_slice(px);
	}
	pixels
}

/// Generates a smooth two-axis gradient (delta runs).
pub fn generate_gradient(width: u32, height: u32, channels: Channels) -> Vec<u8> {
	let count = (width as usize) * (height as usize);
	let mut pixels = Vec::with_capacity(count * channels.bytes_per_pixel());

	for y in 0..height {
		for x in 0..width {
			pixels.push((x * 255 / width.max(1)) as u8);
			pixels.push((y * 255 / height.max(1)) as u8);
			pixels.push(((x + y) & 0xFF) as u8);
			if channels.has_alpha() {
				pixels.push(255);
			}
		}
	}
	pixels
}

/// Generates deterministic pseudo-random noise (literal runs and cache
/// churn). Uses a xorshift generator so benchmark inputs are stable across
/// runs without pulling in an RNG dependency.
pub fn generate_noise(width: u32, height: u32, channels: Channels) -> Vec<u8> {
	let count = (width as usize) * (height as usize);
	let mut pixels = Vec::with_capacity(count * channels.bytes_per_pixel());

	let mut state = 0x2545_F491_4F6C_DD1Du64;
	let mut next = || {
		state ^= state << 13;
		state ^= state >> 7;
		state ^= state << 17;
		(state >> 24) as u8
	};

	for _ in 0..count {
		pixels.push(next());
		pixels.push(next());
		pixels.push(next());
		if channels.has_alpha() {
			pixels.push(next());
		}
	}
	pixels
}

/// Common benchmark sizes for synthetic test data
pub mod sizes {
	/// Tiny image: 64x64 (4,096 pixels)
	pub const TINY: (u32, u32) = (64, 64);
	/// Small image: 256x256 (65,536 pixels)
	pub const SMALL: (u32, u32) = (256, 256);
	/// Medium image: 512x512 (262,144 pixels)
	pub const MEDIUM: (u32, u32) = (512, 512);
	/// Large image: 1024x768 (786,432 pixels)
	pub const LARGE: (u32, u32) = (1024, 768);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generators_fill_expected_lengths() {
		let (w, h) = sizes::TINY;
		assert_eq!(generate_flat(w, h, Channels::Rgb).len(), 64 * 64 * 3);
		assert_eq!(generate_gradient(w, h, Channels::Rgba).len(), 64 * 64 * 4);
		assert_eq!(generate_noise(w, h, Channels::Rgb).len(), 64 * 64 * 3);
	}

	#[test]
	fn test_noise_is_deterministic() {
		let a = generate_noise(16, 16, Channels::Rgba);
		let b = generate_noise(16, 16, Channels::Rgba);
		assert_eq!(a, b);
	}
}
