use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::debug;

use svg2ivg::{ConverterOptions, DEFAULT_OUTPUT_SIZE, ExclusionRule};

mod logger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    ///Raw IconVG bytes.
    Binary,
    ///A Rust byte array declaration.
    Rust,
}

///Converts an svg icon into IconVG.
#[derive(Debug, Parser)]
#[command(name = "svg2ivg", version, about)]
struct Cli {
    input: PathBuf,

    ///Output file, stdout if omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    ///Side length of the output canvas.
    #[arg(short = 's', long, default_value_t = DEFAULT_OUTPUT_SIZE)]
    size: f32,

    ///Skip paths with exactly this data and fill.
    #[arg(long, num_args = 2, value_names = ["D", "FILL"])]
    exclude: Vec<String>,

    ///Don't skip the usual transparent background rectangles.
    #[arg(long)]
    no_default_excludes: bool,

    #[arg(short, long, value_enum, default_value_t = Format::Binary)]
    format: Format,

    ///Name of the generated array, from the input file name by default.
    #[arg(long)]
    name: Option<String>,

    ///Repeat for more output.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> ConverterOptions {
	let mut options = ConverterOptions::new().with_output_size(self.size);
	if self.no_default_excludes {
	    options = options.with_exclude_paths(Vec::new());
	}

	for pair in self.exclude.chunks(2) {
	    if let [d, fill] = pair {
		options = options.with_exclude_path(ExclusionRule::new(d, fill));
	    }
	}

	options
    }
}

fn array_name(input: &Path) -> String {
    let stem = input.file_stem()
	.map(|s| s.to_string_lossy().into_owned())
	.unwrap_or_default();

    let mut name: String = stem.chars()
	.map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
	.collect();

    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
	name.insert_str(0, "ICON_");
    }

    name
}

fn rust_source(name: &str, bytes: &[u8]) -> String {
    let mut out = String::new();
    writeln!(out, "pub static {}: [u8; {}] = [", name, bytes.len()).ok();

    for line in bytes.chunks(12) {
	let hex: Vec<String> = line.iter().map(|b| format!("{:#04x},", b)).collect();
	writeln!(out, "\t{}", hex.join(" ")).ok();
    }

    out.push_str("];\n");
    out
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let options = cli.options();
    debug!("{:?}", options);

    let bytes = svg2ivg::from_file(&cli.input, &options)
	.with_context(|| format!("converting {}", cli.input.display()))?;

    let output = match cli.format {
	Format::Binary => bytes,
	Format::Rust => {
	    let name = cli.name.clone().unwrap_or_else(|| array_name(&cli.input));
	    rust_source(&name, &bytes).into_bytes()
	},
    };

    match &cli.output {
	Some(path) => fs::write(path, &output)
	    .with_context(|| format!("writing {}", path.display()))?,
	None => io::stdout().lock().write_all(&output)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_names() {
	assert_eq!(array_name(Path::new("icons/arrow-back.svg")), "ARROW_BACK");
	assert_eq!(array_name(Path::new("3d_rotation.svg")), "ICON_3D_ROTATION");
    }

    #[test]
    fn rust_arrays() {
	assert_eq!(rust_source("A", &[0x89, 0x49]), "pub static A: [u8; 2] = [\n\t0x89, 0x49,\n];\n");
    }

    #[test]
    fn exclusion_flags() {
	let cli = Cli::parse_from(["svg2ivg", "in.svg", "--no-default-excludes", "--exclude", "M1 1h2", "red"]);
	let options = cli.options();

	assert_eq!(options.exclude_paths, vec![ExclusionRule::new("M1 1h2", "red")]);
	assert_eq!(options.output_size, DEFAULT_OUTPUT_SIZE);

	let cli = Cli::parse_from(["svg2ivg", "in.svg", "-s", "64"]);
	assert_eq!(cli.options().exclude_paths.len(), 2);
	assert_eq!(cli.options().output_size, 64.0);
    }
}
