use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use simd_dsv::{Format, Reader};

#[derive(Debug, ValueEnum, Clone)]
enum Mode {
    /// Count the records
    Count,
    /// Print the header names
    Headers,
    /// Print the SIMD instruction set in use
    Simd,
}

#[derive(Parser, Debug)]
struct Args {
    /// What to do with the file
    #[arg(value_enum)]
    mode: Mode,

    /// Path to target DSV file
    path: PathBuf,

    /// Treat double quotes as quoting
    #[arg(short, long)]
    quoted: bool,

    /// 0-based index of the header row
    #[arg(long, default_value_t = 0)]
    header_row: usize,

    /// Prefetch-ahead distance in MiB
    #[arg(long, default_value_t = 16)]
    prefetch_mib: usize,
}

impl Args {
    fn delimiter(&self) -> u8 {
        match self.path.extension() {
            Some(ext) if ext == "tsv" => b'\t',
            _ => b',',
        }
    }

    fn format(&self) -> Format {
        let mut format = Format::new();

        format
            .delimiter(self.delimiter())
            .header_row(self.header_row);

        if self.quoted {
            format.quote(b'"');
        }

        format
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if matches!(args.mode, Mode::Simd) {
        println!("{}", simd_dsv::simd_instructions());
        return Ok(());
    }

    let mut reader = Reader::open(&args.path, args.format())?;
    reader.prefetch_ahead(args.prefetch_mib * 1024 * 1024);

    match args.mode {
        Mode::Count => {
            println!("{}", reader.count_records());
        }
        Mode::Headers => {
            for name in reader.headers() {
                println!("{}", name);
            }
        }
        Mode::Simd => unreachable!(),
    }

    Ok(())
}
