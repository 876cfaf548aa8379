//! `rpk` — convert images between PNG and RPK.
//!
//! Inputs ending in `.png` are encoded to `.rpk`; any other input is
//! treated as an RPK file and decoded to `.png`. Exits non-zero on any
//! error.

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;

#[derive(Parser)]
#[command(name = "rpk")]
#[command(version)]
#[command(about = "Lossless RPK image codec - convert to and from PNG", long_about = None)]
struct Cli {
	/// Input image path (.png to encode, .rpk to decode)
	#[arg(value_name = "INPUT")]
	input: PathBuf,

	/// Output image path (.rpk when encoding, .png when decoding)
	#[arg(value_name = "OUTPUT")]
	output: PathBuf,
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
	let input_ext = cli.input.extension().and_then(std::ffi::OsStr::to_str);
	let output_ext = cli.output.extension().and_then(std::ffi::OsStr::to_str);

	if input_ext == Some("png") {
		if output_ext != Some("rpk") {
			return Err(format!("output '{}' must end in .rpk", cli.output.display()).into());
		}
		rpk_rs::png_to_rpk(&cli.input, &cli.output)
	} else {
		if output_ext != Some("png") {
			return Err(format!("output '{}' must end in .png", cli.output.display()).into());
		}
		rpk_rs::rpk_to_png(&cli.input, &cli.output)
	}
}

fn main() -> ExitCode {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	match run(&cli) {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			log::error!("{err}");
			ExitCode::FAILURE
		}
	}
}
