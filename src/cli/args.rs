use crate::processors::InvalidCoordinatePolicy;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "coord-geocoder")]
#[command(about = "Process and geocode coordinates from a CSV file")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, help = "Input CSV file with coordinates")]
    pub input: PathBuf,

    #[arg(short, long, help = "Output CSV file for results")]
    pub output: PathBuf,

    #[arg(short, long, help = "Optional intermediate file for cleaned coordinates")]
    pub cleaned: Option<PathBuf>,

    #[arg(
        short,
        long,
        help = "CSV delimiter (auto-detect if not specified)"
    )]
    pub delimiter: Option<String>,

    #[arg(short = 'k', long, help = "Google Maps API key")]
    pub api_key: String,

    #[arg(
        short = 's',
        long,
        help = "Create a sample input file if it doesn't exist"
    )]
    pub create_sample: bool,

    #[arg(long, help = "Skip cleaning step if file is already cleaned")]
    pub skip_cleaning: bool,

    #[arg(
        long,
        value_enum,
        help = "How to handle out-of-range or non-numeric coordinates [default: geocode]"
    )]
    pub invalid_coordinates: Option<InvalidCoordinatePolicy>,

    #[arg(long, help = "Request timeout in seconds for each lookup")]
    pub timeout: Option<u64>,

    #[arg(long, help = "Language for formatted addresses (e.g. 'en')")]
    pub language: Option<String>,

    #[arg(long, help = "Settings file [default: coord-geocoder.toml if present]")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, help = "Hide the progress bar")]
    pub quiet: bool,

    #[arg(long, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}
