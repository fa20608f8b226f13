//! edsign - detached Ed25519 signatures from the command line
//!
//! Usage:
//!   edsign generate > keys.json
//!   edsign sign                      # signs example.html with keys.json
//!   edsign sign --keys alice.json page.html
//!   edsign verify --signature <base64> page.html

use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod ui;

use commands::KeySource;
use edsign_core::config::Paths;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a keypair and print it as JSON
    Generate {
        /// Also write the keypair to this file (mode 0600)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Overwrite the file given with --out if it exists
        #[arg(long, requires = "out")]
        force: bool,
    },

    /// Sign a file and print the detached signature as base64
    Sign {
        /// Keypair file [default: keys.json]
        #[arg(short, long)]
        keys: Option<PathBuf>,

        /// File to sign [default: example.html]
        payload: Option<PathBuf>,
    },

    /// Verify a detached signature over a file
    Verify {
        /// Keypair file to take the public key from [default: keys.json]
        #[arg(short, long, conflicts_with = "public_key")]
        keys: Option<PathBuf>,

        /// Base64 public key, instead of reading a keypair file
        #[arg(short, long)]
        public_key: Option<String>,

        /// Base64 signature
        #[arg(short, long)]
        signature: String,

        /// Signed file [default: example.html]
        payload: Option<PathBuf>,
    },
}

/// `RUST_LOG` when set and valid. Otherwise `warn`, or `debug` with `--verbose`.
fn log_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_level.as_str()))
}

fn init_tracing(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref(), verbose))
        .with_writer(io::stderr)
        .init();
}

fn run(command: Command, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::Generate { out: path, force } => commands::generate(out, path.as_deref(), force),
        Command::Sign { keys, payload } => {
            let paths = Paths::default().with_overrides(keys, payload);
            commands::sign(out, &paths)
        }
        Command::Verify {
            keys,
            public_key,
            signature,
            payload,
        } => {
            let paths = Paths::default().with_overrides(keys, payload);
            let source = match public_key {
                Some(encoded) => KeySource::Inline(encoded),
                None => KeySource::File(paths.key_file.clone()),
            };
            commands::verify(out, &source, &signature, &paths.payload_file)
        }
    }
}

/// Run a command against `out` and map the outcome to an exit code.
///
/// Errors go to stderr; `out` only ever holds a complete result.
fn execute(command: Command, out: &mut impl Write) -> ExitCode {
    match run(command, &mut *out).and_then(|_| Ok(out.flush()?)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);
    debug!("{}", edsign_core::version_string());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(args.command, &mut out)
}
