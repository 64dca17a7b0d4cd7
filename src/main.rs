use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use qrmint::{kanji_bytes, ECLevel, MaskPattern, QRBuilder, Version};

#[derive(Parser)]
#[command(name = "qrmint", version, about = "Generate QR Code symbols")]
struct Cli {
    /// Data to encode
    data: String,

    /// Error correction level
    #[arg(short, long, value_enum, default_value_t = Level::M)]
    ec_level: Level,

    /// Force a version between 1 and 40
    #[arg(long = "qr-version")]
    qr_version: Option<usize>,

    /// Force a mask pattern between 0 and 7
    #[arg(short, long)]
    mask: Option<u8>,

    /// Save a PNG instead of printing to the terminal
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pixels per module in the PNG, characters per module in the terminal
    #[arg(short, long)]
    scale: Option<u32>,

    /// Fail instead of truncating data that doesn't fit
    #[arg(long)]
    strict: bool,

    /// Print progress and a report while building
    #[arg(long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Level {
    L,
    M,
    Q,
    H,
}

impl From<Level> for ECLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::L => ECLevel::L,
            Level::M => ECLevel::M,
            Level::Q => ECLevel::Q,
            Level::H => ECLevel::H,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // Kanji only text goes in as Shift-JIS, anything else as UTF-8
    let data = kanji_bytes(&cli.data).unwrap_or_else(|| cli.data.clone().into_bytes());
    let mut builder = QRBuilder::new(&data);
    builder.ec_level(cli.ec_level.into()).strict(cli.strict).verbose(cli.verbose);
    if let Some(v) = cli.qr_version {
        builder.version(Version::new(v)?);
    }
    if let Some(m) = cli.mask {
        builder.mask(MaskPattern::new(m)?);
    }

    let symbol = builder.build()?;
    if symbol.truncated() > 0 {
        eprintln!("Warning: {} characters did not fit and were dropped", symbol.truncated());
    }

    match cli.output {
        Some(path) => {
            symbol.to_image(cli.scale.unwrap_or(8)).save(&path)?;
            println!("Saved {} to {}", symbol.metadata(), path.display());
        }
        None => print!("{}", symbol.to_str(cli.scale.unwrap_or(1) as usize)),
    }

    Ok(())
}
