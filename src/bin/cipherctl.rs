//! cipherctl - classical cipher command-line tool

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use classicrypt::config::{CipherConfig, CipherKind, VerseConfig};
use classicrypt::{AlphabetTag, Mode};

#[derive(Parser)]
#[command(name = "cipherctl")]
#[command(about = "Caesar, Trithemius and verse ciphers", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt text
    Encrypt(JobArgs),

    /// Decrypt text
    Decrypt(JobArgs),

    /// List built-in alphabets
    Alphabets,

    /// Show version information
    Version,
}

#[derive(Args)]
struct JobArgs {
    /// JSON job file; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cipher: caesar, trithemius or verse
    #[arg(long)]
    cipher: Option<CipherKind>,

    /// Alphabet: en or uk
    #[arg(long)]
    alphabet: Option<AlphabetTag>,

    /// Trithemius mode: linear, non_linear or passphrase
    #[arg(long)]
    mode: Option<Mode>,

    /// Caesar key
    #[arg(long, allow_hyphen_values = true)]
    key: Option<i64>,

    /// Coefficient A
    #[arg(long, allow_hyphen_values = true)]
    a: Option<i64>,

    /// Coefficient B
    #[arg(long, allow_hyphen_values = true)]
    b: Option<i64>,

    /// Coefficient C
    #[arg(long, allow_hyphen_values = true)]
    c: Option<i64>,

    /// Trithemius passphrase
    #[arg(long)]
    passphrase: Option<String>,

    /// Verse text
    #[arg(long, conflicts_with = "verse_file")]
    verse: Option<String>,

    /// File holding the verse text
    #[arg(long)]
    verse_file: Option<PathBuf>,

    /// Verse table rows
    #[arg(long)]
    rows: Option<usize>,

    /// Verse table columns
    #[arg(long)]
    cols: Option<usize>,

    /// Input file (stdin if omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl JobArgs {
    /// Merges the optional config file with the command-line overrides.
    fn to_config(&self) -> anyhow::Result<CipherConfig> {
        let mut config = match &self.config {
            Some(path) => CipherConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => CipherConfig::default(),
        };
        if let Some(cipher) = self.cipher {
            config.cipher = cipher;
        }
        if let Some(alphabet) = self.alphabet {
            config.alphabet = alphabet;
        }
        if self.mode.is_some() {
            config.mode = self.mode;
        }
        let params = &mut config.params;
        params.key = self.key.or(params.key);
        params.a = self.a.or(params.a);
        params.b = self.b.or(params.b);
        params.c = self.c.or(params.c);
        if let Some(passphrase) = &self.passphrase {
            params.passphrase = Some(passphrase.clone());
        }

        let verse_text = match (&self.verse, &self.verse_file) {
            (Some(text), _) => Some(text.clone()),
            (None, Some(path)) => Some(
                fs::read_to_string(path)
                    .with_context(|| format!("reading verse {}", path.display()))?,
            ),
            (None, None) => None,
        };
        if let Some(text) = verse_text {
            match config.verse.as_mut() {
                Some(verse) => verse.text = text,
                None => config.verse = Some(VerseConfig::new(text)),
            }
        }
        if let Some(verse) = config.verse.as_mut() {
            verse.max_rows = self.rows.unwrap_or(verse.max_rows);
            verse.max_cols = self.cols.unwrap_or(verse.max_cols);
        }
        Ok(config)
    }

    fn read_input(&self) -> anyhow::Result<String> {
        match &self.input {
            Some(path) => {
                fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
            }
            None => {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .context("reading stdin")?;
                Ok(text)
            }
        }
    }

    fn write_output(&self, text: &str) -> anyhow::Result<()> {
        match &self.output {
            Some(path) => {
                fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
                eprintln!("{} {}", "Wrote".green().bold(), path.display());
            }
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(text.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

fn run_job(args: &JobArgs, encrypt: bool) -> anyhow::Result<()> {
    let config = args.to_config()?;
    let text = args.read_input()?;
    info!(cipher = %config.cipher, alphabet = %config.alphabet, encrypt, "running job");
    let result = if encrypt {
        config.encrypt(&text)
    } else {
        config.decrypt(&text)
    }?;
    args.write_output(&result)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = match &cli.command {
        Commands::Encrypt(args) => run_job(args, true),
        Commands::Decrypt(args) => run_job(args, false),
        Commands::Alphabets => {
            for tag in AlphabetTag::ALL {
                let alphabet = tag.alphabet();
                println!("{} ({}): {}", tag.to_string().bold(), alphabet.len(), alphabet);
            }
            Ok(())
        }
        Commands::Version => {
            println!("cipherctl v{}", env!("CARGO_PKG_VERSION"));
            println!("\nCiphers:");
            println!("  • caesar: constant shift");
            println!("  • trithemius: linear, non_linear and passphrase schedules");
            println!("  • verse: row/col coordinates into a reference text");
            Ok(())
        }
    };

    if let Err(e) = outcome {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classicrypt::RawKeyParams;
    use tempfile::NamedTempFile;

    fn job(flags: &[&str]) -> JobArgs {
        let argv = ["cipherctl", "encrypt"].into_iter().chain(flags.iter().copied());
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Encrypt(args) => args,
            _ => unreachable!("encrypt subcommand"),
        }
    }

    fn config_file(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", json).unwrap();
        file
    }

    fn path_of(file: &NamedTempFile) -> &str {
        file.path().to_str().unwrap()
    }

    const FULL_JOB: &str = r#"{
        "cipher": "trithemius",
        "alphabet": "uk",
        "mode": "non_linear",
        "params": {"key": 1, "a": 2, "b": 3, "c": 4, "passphrase": "ключ"},
        "verse": {"text": "old verse text", "max_rows": 2, "max_cols": 3}
    }"#;

    #[test]
    fn test_no_flags_keeps_file_values() {
        let file = config_file(FULL_JOB);
        let merged = job(&["--config", path_of(&file)]).to_config().unwrap();
        assert_eq!(merged, CipherConfig::load(file.path()).unwrap());
    }

    #[test]
    fn test_no_config_uses_defaults() {
        assert_eq!(job(&[]).to_config().unwrap(), CipherConfig::default());
    }

    #[test]
    fn test_key_flags_override_file() {
        let file = config_file(FULL_JOB);
        let merged = job(&[
            "--config",
            path_of(&file),
            "--key",
            "9",
            "--a",
            "-5",
            "--c",
            "11",
            "--passphrase",
            "слово",
        ])
        .to_config()
        .unwrap();
        assert_eq!(
            merged.params,
            RawKeyParams {
                key: Some(9),
                a: Some(-5),
                b: Some(3),
                c: Some(11),
                passphrase: Some("слово".to_string()),
            }
        );
        assert_eq!(merged.mode, Some(Mode::NonLinear));
    }

    #[test]
    fn test_b_flag_overrides_file() {
        let file = config_file(FULL_JOB);
        let merged = job(&["--config", path_of(&file), "--b", "-7"])
            .to_config()
            .unwrap();
        assert_eq!(merged.params.a, Some(2));
        assert_eq!(merged.params.b, Some(-7));
    }

    #[test]
    fn test_selector_flags_override_file() {
        let file = config_file(FULL_JOB);
        let merged = job(&[
            "--config",
            path_of(&file),
            "--cipher",
            "caesar",
            "--alphabet",
            "en",
            "--mode",
            "linear",
        ])
        .to_config()
        .unwrap();
        assert_eq!(merged.cipher, CipherKind::Caesar);
        assert_eq!(merged.alphabet, AlphabetTag::En);
        assert_eq!(merged.mode, Some(Mode::Linear));
        assert_eq!(merged.encrypt("HELLO").unwrap(), "IFMMP");
    }

    #[test]
    fn test_verse_flag_keeps_file_bounds() {
        let file = config_file(FULL_JOB);
        let merged = job(&[
            "--config",
            path_of(&file),
            "--verse",
            "Your chosen verse here",
        ])
        .to_config()
        .unwrap();
        assert_eq!(
            merged.verse,
            Some(VerseConfig {
                text: "Your chosen verse here".to_string(),
                max_rows: 2,
                max_cols: 3,
            })
        );
    }

    #[test]
    fn test_verse_file_flag_without_config_verse() {
        let verse = config_file("Your chosen verse here\n");
        let merged = job(&["--cipher", "verse", "--verse-file", path_of(&verse)])
            .to_config()
            .unwrap();
        assert_eq!(
            merged.verse,
            Some(VerseConfig::new("Your chosen verse here\n"))
        );
        assert_eq!(merged.encrypt("Y").unwrap(), "1/1");
    }

    #[test]
    fn test_verse_file_flag_keeps_file_bounds() {
        let file = config_file(FULL_JOB);
        let verse = config_file("Your chosen verse here");
        let merged = job(&[
            "--config",
            path_of(&file),
            "--verse-file",
            path_of(&verse),
        ])
        .to_config()
        .unwrap();
        let verse = merged.verse.unwrap();
        assert_eq!(verse.text, "Your chosen verse here");
        assert_eq!((verse.max_rows, verse.max_cols), (2, 3));
    }

    #[test]
    fn test_rows_and_cols_override_bounds() {
        let file = config_file(FULL_JOB);
        let merged = job(&["--config", path_of(&file), "--rows", "1", "--cols", "2"])
            .to_config()
            .unwrap();
        let verse = merged.verse.unwrap();
        assert_eq!(verse.text, "old verse text");
        assert_eq!((verse.max_rows, verse.max_cols), (1, 2));

        let merged = job(&["--config", path_of(&file), "--cols", "5"])
            .to_config()
            .unwrap();
        let verse = merged.verse.unwrap();
        assert_eq!((verse.max_rows, verse.max_cols), (2, 5));
    }

    #[test]
    fn test_rows_without_verse_is_ignored() {
        let merged = job(&["--rows", "3"]).to_config().unwrap();
        assert_eq!(merged.verse, None);
    }

    #[test]
    fn test_verse_and_verse_file_conflict() {
        let result = Cli::try_parse_from([
            "cipherctl",
            "encrypt",
            "--verse",
            "a b",
            "--verse-file",
            "verse.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = job(&["--config", path.to_str().unwrap()])
            .to_config()
            .unwrap_err();
        assert!(format!("{:#}", err).starts_with("loading "));
    }
}
