//! Retail bank console: reads `login`, `topup`, `pay` and `exit` commands
//! from stdin and applies them to an in-memory ledger.

use std::ffi::OsString;
use std::io::{BufRead, Write};
use std::sync::Arc;

use clap::Parser;

use retailbank_infra::{BankService, InMemoryDirectory};
use retailbank_observability::LogFormat;

pub mod command;
pub mod console;
pub mod error;

pub use command::{Command, CommandAction, CommandError};
pub use console::{Console, OutputFormat};
pub use error::{CliError, CliResult};

/// Retail bank console
#[derive(Debug, Parser)]
#[command(name = "retailbank")]
#[command(about = "Retail bank ledger console", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log line format (text, json); filtering follows RUST_LOG
    #[arg(long, env = "RETAILBANK_LOG_FORMAT", default_value = "text")]
    pub log_format: LogFormat,

    /// Start with an empty directory instead of the Alice/Bob accounts
    #[arg(long, env = "RETAILBANK_NO_SEED")]
    pub no_seed: bool,

    /// Print account summaries as JSON lines
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Build a console over a fresh in-memory directory, seeded unless disabled.
pub fn build_console(cli: &Cli) -> CliResult<Console<Arc<InMemoryDirectory>>> {
    let bank = BankService::new(Arc::new(InMemoryDirectory::new()));
    if !cli.no_seed {
        bank.seed_defaults()?;
    }
    Ok(Console::new(bank, cli.output_format()))
}

/// Run using the current process arguments and stdio.
///
/// `--help` and `--version` print and exit here, like any clap binary.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    execute(&cli, stdin.lock(), &mut stdout)
}

/// Run using the provided arguments, input and output.
pub fn run_with_args<I, T, R, W>(args: I, input: R, out: &mut W) -> anyhow::Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    R: BufRead,
    W: Write,
{
    let cli = Cli::try_parse_from(args)?;
    execute(&cli, input, out)
}

fn execute<R: BufRead, W: Write>(cli: &Cli, input: R, out: &mut W) -> anyhow::Result<()> {
    retailbank_observability::init(cli.log_format);
    tracing::debug!(?cli, "starting console");

    let mut console = build_console(cli)?;
    console.run(input, out)?;
    Ok(())
}
