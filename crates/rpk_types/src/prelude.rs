//! Prelude module for `rpk_types`.
//!
//! This module provides a convenient way to import commonly used types,
//! traits, and constants.
//!
//! # Examples
//!
//! ```no_run
//! use rpk_types::prelude::*;
//!
//! let image = RpkFile::open("image.rpk").unwrap();
//! println!("{}", image.header());
//! ```

#[doc(inline)]
pub use crate::file::{
	Channels,
	Decoder,

	// Codec entry points
	Encoder,
	// Error type
	RpkError,

	// RPK types
	RpkFile,
	RpkHeader,
};

#[doc(inline)]
pub use crate::file::rpk::{compress, decompress};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
