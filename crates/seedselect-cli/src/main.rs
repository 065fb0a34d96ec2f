//! Command-line front end for `seedselect-core`.
//!
//! Assembles the round parameters from flags, reads candidate identifiers
//! from arguments, a file or STDIN, and prints the selected subset closest
//! first.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{ArgAction, Parser};
use seedselect_core::{generate_seed, select_with, KeyWidth, SelectionOptions};
use sha2::Sha256;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_SEED_SIZE: usize = 32;

#[derive(Debug, Parser)]
#[command(
    name = "seedselect",
    version,
    about = "Deterministically select N identifiers for a round.",
    override_usage = "seedselect [OPTION]... --round N -n COUNT [CANDIDATE]..."
)]
struct Cli {
    /// Domain tag separating independent selections that share a seed.
    #[arg(long = "name", default_value = "")]
    name: String,

    /// Round seed as hexadecimal bytes.
    #[arg(long = "seed", conflicts_with_all = ["seed_text", "seed_size"])]
    seed: Option<String>,

    /// Round seed taken verbatim from the UTF-8 text.
    #[arg(long = "seed-text", conflicts_with = "seed_size")]
    seed_text: Option<String>,

    /// Generate a fresh seed of this many bytes from the OS random source.
    #[arg(long = "seed-size")]
    seed_size: Option<usize>,

    /// Round (sequence) number shared by all participants.
    #[arg(short = 'r', long = "round")]
    round: u64,

    /// Number of identifiers to select; negative values select nothing.
    #[arg(short = 'n', long = "count", allow_negative_numbers = true)]
    count: i64,

    /// Ranking key width (`low64` or `full`).
    #[arg(long = "key-width")]
    key_width: Option<KeyWidth>,

    /// JSON-encoded selection options, e.g. '{"key_width":"full"}'.
    #[arg(long = "opts")]
    opts: Option<String>,

    /// Read candidates from FILE, one per line ("-" for STDIN).
    #[arg(short = 'c', long = "candidates")]
    candidates_file: Option<PathBuf>,

    /// Treat candidates as hex and rank their decoded bytes.
    #[arg(long = "hex-candidates", action = ArgAction::SetTrue)]
    hex_candidates: bool,

    /// Print the selection as a JSON array.
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Candidate identifiers.
    #[arg()]
    candidates: Vec<String>,
}

fn main() {
    match try_main() {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            let _ = writeln!(io::stderr(), "{err:#}");
            std::process::exit(1);
        }
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = build_options(&cli)?;
    let seed = resolve_seed(&cli)?;
    let candidates = collect_candidates(&cli)?;
    let ranked = if cli.hex_candidates {
        decode_hex_candidates(&candidates)?
    } else {
        candidates.iter().map(|candidate| candidate.as_bytes().to_vec()).collect()
    };
    let n = usize::try_from(cli.count.max(0)).context("count does not fit this platform")?;

    tracing::info!(
        name = %cli.name,
        round = cli.round,
        key_width = %options.key_width(),
        candidates = ranked.len(),
        n,
        "selecting"
    );

    let mut hasher = Sha256::default();
    let selected = select_with(&mut hasher, &options, &cli.name, &seed, cli.round, n, &ranked)
        .context("selection failed")?;
    let rendered: Vec<String> = selected
        .iter()
        .map(|bytes| render_candidate(bytes, cli.hex_candidates))
        .collect::<Result<_>>()?;

    let mut stdout = io::stdout().lock();
    if cli.json {
        let json = serde_json::to_string(&rendered).context("failed to serialize selection")?;
        writeln!(stdout, "{json}")?;
    } else {
        for item in &rendered {
            writeln!(stdout, "{item}")?;
        }
    }
    stdout.flush().ok();
    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder().with_default_directive(default_level.into()).from_env_lossy();
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .try_init();
}

fn build_options(cli: &Cli) -> Result<SelectionOptions> {
    let mut options = match &cli.opts {
        Some(raw) => parse_opts(raw)?,
        None => SelectionOptions::default(),
    };
    if let Some(width) = cli.key_width {
        options = options.with_key_width(width);
    }
    Ok(options)
}

fn parse_opts(raw: &str) -> Result<SelectionOptions> {
    let value: serde_json::Value = serde_json::from_str(raw.trim())
        .with_context(|| format!("failed to parse --opts JSON: {raw}"))?;
    if !value.is_object() {
        bail!("--opts must be a JSON object, got: {raw}");
    }
    serde_json::from_value(value).with_context(|| format!("invalid --opts: {raw}"))
}

fn resolve_seed(cli: &Cli) -> Result<Vec<u8>> {
    if let Some(raw) = &cli.seed {
        return decode_hex(raw).context("--seed must be hexadecimal");
    }
    if let Some(text) = &cli.seed_text {
        return Ok(text.as_bytes().to_vec());
    }
    let size = cli.seed_size.unwrap_or(DEFAULT_SEED_SIZE);
    let seed = generate_seed(size).context("failed to generate seed")?;
    writeln!(io::stderr(), "seed: {}", hex::encode(&seed))?;
    Ok(seed)
}

fn collect_candidates(cli: &Cli) -> Result<Vec<String>> {
    let mut candidates = cli.candidates.clone();
    match &cli.candidates_file {
        Some(path) if path.as_os_str() == "-" => candidates.extend(read_lines(&read_stdin()?)),
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            candidates.extend(read_lines(&text));
        }
        None if candidates.is_empty() => candidates.extend(read_lines(&read_stdin()?)),
        None => {}
    }
    Ok(candidates)
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).context("failed to read STDIN")?;
    Ok(buffer)
}

fn read_lines(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines().map(str::trim).filter(|line| !line.is_empty()).map(str::to_string)
}

fn decode_hex(raw: &str) -> Result<Vec<u8>> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    hex::decode(digits).map_err(|err| anyhow!("invalid hex {trimmed:?}: {err}"))
}

fn decode_hex_candidates(candidates: &[String]) -> Result<Vec<Vec<u8>>> {
    candidates.iter().map(|candidate| decode_hex(candidate)).collect()
}

fn render_candidate(bytes: &[u8], hex_candidates: bool) -> Result<String> {
    if hex_candidates {
        return Ok(hex::encode(bytes));
    }
    String::from_utf8(bytes.to_vec()).map_err(|_| anyhow!("candidate is not valid UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("seedselect").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn negative_count_is_accepted() {
        let cli = parse(&["--round", "1", "-n", "-3", "peer1"]);
        assert_eq!(cli.count, -3);
    }

    #[test]
    fn key_width_flag_overrides_opts() {
        let cli = parse(&[
            "-r",
            "1",
            "-n",
            "1",
            "--opts",
            r#"{"key_width":"full"}"#,
            "--key-width",
            "low64",
        ]);
        assert_eq!(build_options(&cli).unwrap().key_width(), KeyWidth::Low64);

        let cli = parse(&["-r", "1", "-n", "1", "--opts", r#"{"key_width":"full"}"#]);
        assert_eq!(build_options(&cli).unwrap().key_width(), KeyWidth::Full);
    }

    #[test]
    fn malformed_opts_are_rejected() {
        for raw in ["[]", r#"["full"]"#, "\"full\"", "null", "{", r#"{"weights":[1]}"#] {
            let cli = parse(&["-r", "1", "-n", "1", "--opts", raw]);
            assert!(build_options(&cli).is_err(), "accepted --opts {raw}");
        }
    }

    #[test]
    fn seed_sources_conflict() {
        let result = Cli::try_parse_from([
            "seedselect",
            "-r",
            "1",
            "-n",
            "1",
            "--seed",
            "00",
            "--seed-text",
            "x",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn hex_seed_accepts_prefix() {
        assert_eq!(decode_hex("0xdead").unwrap(), vec![0xde, 0xad]);
        assert!(decode_hex("zz").is_err());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let lines: Vec<String> = read_lines("peer1\n\n  peer2  \n").collect();
        assert_eq!(lines, vec!["peer1", "peer2"]);
    }
}
