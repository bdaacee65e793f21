use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use huffpack::{Compressor, Config};
use tempfile::NamedTempFile;
use tracing::{info, Level};

/// Huffman-encode a file into a packed bit stream.
///
/// The output holds only code bits. Use --codebook to keep the code table,
/// which is needed to decode it.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// File to encode.
    input: PathBuf,

    /// Where to write the packed output.
    #[arg(short, long, default_value = "output.huff")]
    output: PathBuf,

    /// Print byte frequencies and assigned codes to stdout.
    #[arg(short, long)]
    debug: bool,

    /// Also write the code table, one `byte<TAB>code` line per symbol.
    #[arg(long, value_name = "PATH")]
    codebook: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Encode `args.input` and report to `out`. Returns the output path.
///
/// The packed output is staged in a temporary file beside the target and
/// only moved into place once encoding has succeeded, so a failed run leaves
/// any existing file at the output path untouched.
fn run<O: Write>(args: &Args, out: &mut O) -> Result<PathBuf> {
    let mut input = File::open(&args.input)
        .with_context(|| format!("opening input file {}", args.input.display()))?;

    let config = Config::new().with_diagnostics(args.debug);
    let prepared = Compressor::new(config)
        .with_diagnostics(&mut *out)
        .prepare(&mut input)
        .with_context(|| format!("encoding {}", args.input.display()))?;

    let dir = match args.output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)
        .with_context(|| format!("opening output file {}", args.output.display()))?;
    let summary = prepared
        .encode(&mut input, staged.as_file_mut())
        .with_context(|| format!("encoding {}", args.input.display()))?;
    staged
        .as_file()
        .sync_all()
        .with_context(|| format!("writing {}", args.output.display()))?;
    staged
        .persist(&args.output)
        .with_context(|| format!("opening output file {}", args.output.display()))?;

    if let Some(path) = &args.codebook {
        let file = File::create(path)
            .with_context(|| format!("opening codebook file {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        summary.codebook.write_table(&mut writer)?;
        writer
            .flush()
            .with_context(|| format!("writing codebook {}", path.display()))?;
    }

    info!(
        input_bytes = summary.input_bytes,
        output_bytes = summary.output_bytes,
        symbols = summary.distinct_symbols(),
        max_code_len = summary.max_code_len(),
        avg_bits = summary.average_code_len(),
        entropy = summary.entropy(),
        ratio = summary.ratio(),
        "summary"
    );

    writeln!(out, "Encoding complete. Output written to {}", args.output.display())?;
    Ok(args.output.clone())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    run(&args, &mut io::stdout().lock())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("huffpack").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let a = args(&["in.txt"]);
        assert_eq!(a.input, PathBuf::from("in.txt"));
        assert_eq!(a.output, PathBuf::from("output.huff"));
        assert!(!a.debug);
        assert!(a.codebook.is_none());
        assert_eq!(a.verbose, 0);
    }

    #[test]
    fn test_input_is_required() {
        assert!(Args::try_parse_from(["huffpack"]).is_err());
    }

    #[test]
    fn test_encodes_and_reports() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.huff");
        fs::write(&input, b"aab").unwrap();

        let mut report = Vec::new();
        let a = args(&[input.to_str().unwrap(), "-o", output.to_str().unwrap()]);
        let written = run(&a, &mut report).unwrap();

        assert_eq!(written, output);
        assert_eq!(fs::read(&output).unwrap(), vec![0xC0]);
        let text = String::from_utf8(report).unwrap();
        assert_eq!(
            text,
            format!("Encoding complete. Output written to {}\n", output.display())
        );
    }

    #[test]
    fn test_debug_listing_and_codebook_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.huff");
        let table = dir.path().join("codes.tsv");
        fs::write(&input, b"aab").unwrap();

        let mut report = Vec::new();
        let a = args(&[
            "-d",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--codebook",
            table.to_str().unwrap(),
        ]);
        run(&a, &mut report).unwrap();

        let text = String::from_utf8(report).unwrap();
        assert!(text.starts_with("Byte frequencies:\n'a' (0x61): 2\n'b' (0x62): 1\nCodes:\n"));
        assert!(text.contains("'a' (0x61): 1\n'b' (0x62): 0\n"));
        assert!(text.ends_with(&format!(
            "Encoding complete. Output written to {}\n",
            output.display()
        )));
        assert_eq!(fs::read_to_string(&table).unwrap(), "97\t1\n98\t0\n");
    }

    #[test]
    fn test_missing_input_is_reported() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        let output = dir.path().join("out.huff");
        let a = args(&[missing.to_str().unwrap(), "-o", output.to_str().unwrap()]);

        let err = run(&a, &mut Vec::new()).unwrap_err();
        assert!(format!("{err:#}").contains("opening input file"));
        assert!(!output.exists());
    }

    #[test]
    fn test_unwritable_output_is_reported() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.txt");
        fs::write(&input, b"abc").unwrap();
        let output = dir.path().join("no_such_dir").join("out.huff");
        let a = args(&[input.to_str().unwrap(), "-o", output.to_str().unwrap()]);

        let err = run(&a, &mut Vec::new()).unwrap_err();
        assert!(format!("{err:#}").contains("opening output file"));
    }

    #[test]
    fn test_empty_input_keeps_existing_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("empty.txt");
        let output = dir.path().join("output.huff");
        fs::write(&input, b"").unwrap();
        fs::write(&output, b"keep me").unwrap();

        let a = args(&[input.to_str().unwrap(), "-o", output.to_str().unwrap()]);
        let err = run(&a, &mut Vec::new()).unwrap_err();

        assert!(format!("{err:#}").contains("empty input"));
        assert_eq!(fs::read(&output).unwrap(), b"keep me");
        // No staging file left behind.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }
}
