//! File type support for the `rpk-rs` project.

mod error;

pub mod rpk;

// Re-export unified error type
pub use error::RpkError;

// Re-export main file types
pub use rpk::{
	Channels, Decoder, Encoder, File as RpkFile, Header as RpkHeader,
};
