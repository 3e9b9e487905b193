//! Line-oriented console loop over any reader/writer pair.

use std::io::{BufRead, Write};

use tracing::{error, info, warn};

use retailbank_accounting::AccountSummary;
use retailbank_infra::{AccountDirectory, BankService};

use crate::command::{Command, CommandAction};
use crate::error::{CliError, CliResult};

/// How account summaries are printed after each command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub struct Console<D> {
    bank: BankService<D>,
    format: OutputFormat,
}

impl<D: AccountDirectory> Console<D> {
    pub fn new(bank: BankService<D>, format: OutputFormat) -> Self {
        Self { bank, format }
    }

    pub fn bank(&self) -> &BankService<D> {
        &self.bank
    }

    /// Read commands until `exit` or end of input.
    ///
    /// Bad commands and rejected operations are reported on `out` and the
    /// loop carries on; only IO failures end it early.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> CliResult<()> {
        writeln!(out, "===>Welcome to Retail Bank<===")?;
        writeln!(out, "Login to do Banking.")?;

        for line in input.lines() {
            let line = line?;
            match self.handle_line(&line, out) {
                Ok(true) => break,
                Ok(false) => {}
                Err(e) if e.is_recoverable() => {
                    report(&e);
                    writeln!(out, "Error: {e}. Please try again.")?;
                }
                Err(e) => return Err(e),
            }
        }

        writeln!(out, "Exiting, Thanks for using the application.")?;
        out.flush()?;
        Ok(())
    }

    /// Returns `true` when the console should stop.
    fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> CliResult<bool> {
        let command = Command::parse(line)?;
        info!(command = ?command, "command received");

        let summary = match command {
            Command::Exit => return Ok(true),
            Command::Login { name } => {
                let summary = self.bank.login(&name)?;
                if self.format == OutputFormat::Text {
                    writeln!(out, "Hello, {}!", summary.id)?;
                }
                summary
            }
            Command::Topup { amount } => {
                let summary = self.bank.deposit(amount)?;
                info!("{} action completed", CommandAction::Topup);
                summary
            }
            Command::Pay { target, amount } => {
                let summary = self.bank.pay(&target, amount)?;
                info!("{} action completed", CommandAction::Pay);
                summary
            }
        };

        self.print_summary(&summary, out)?;
        Ok(false)
    }

    fn print_summary<W: Write>(&self, summary: &AccountSummary, out: &mut W) -> CliResult<()> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, summary)?;
                writeln!(out)?;
            }
            OutputFormat::Text => {
                writeln!(out, "Your balance is {}.", summary.balance)?;
                for line in &summary.owes_to {
                    writeln!(out, "Owing {} to {}.", line.amount, line.peer)?;
                }
                for line in &summary.owes_from {
                    writeln!(out, "Owing {} from {}.", line.amount, line.peer)?;
                }
            }
        }
        Ok(())
    }
}

fn report(e: &CliError) {
    match e {
        CliError::Domain(d) if d.is_fatal() => error!(error = %e, "operation aborted"),
        _ => warn!(error = %e, "command rejected"),
    }
}
