//! Line-oriented interactive session.
//!
//! Each line is one user action, handled to completion before the next is
//! read. Errors are printed and the loop carries on; only `quit` or end of
//! input ends the session.

use std::{
    io::{BufRead, Write},
    path::PathBuf,
    str::FromStr,
};

use anyhow::Result;
use ltt_core::{City, RendererRegistry, Session};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::app::{export_session, render_screen};
use crate::logging::LoggingHandle;
use crate::utils::{parse_price, parse_yes_no};

pub const HELP: &str = "\
Commands:
  price <amount>        set the purchase price (e.g. 600,000)
  city <name>           set the city (see `cities`)
  first-time <yes|no>   set first-time buyer status
  submit                calculate the estimate
  export [directory]    save the summary document
  reset                 clear the form and results
  show                  show the form and session state
  cities                list supported cities
  log <filter>          change the log filter (e.g. debug)
  log-file <path|off>   start or stop writing logs to a file
  help                  show this text
  quit                  leave the session
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Price(Decimal),
    City(City),
    FirstTime(bool),
    Submit,
    Export(Option<PathBuf>),
    Reset,
    Show,
    Cities,
    LogLevel(String),
    LogFile(Option<PathBuf>),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}'; type `help` for a list")]
    Unknown(String),

    #[error("`{0}` needs a value")]
    MissingArgument(&'static str),

    #[error("{0}")]
    InvalidArgument(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));
        let required = |name: &'static str| {
            if rest.is_empty() {
                Err(CommandError::MissingArgument(name))
            } else {
                Ok(rest)
            }
        };

        match word.to_ascii_lowercase().as_str() {
            "price" => parse_price(required("price")?)
                .map(Command::Price)
                .map_err(|e| CommandError::InvalidArgument(e.to_string())),
            "city" => required("city")?
                .parse()
                .map(Command::City)
                .map_err(|e: ltt_core::UnknownCityError| {
                    CommandError::InvalidArgument(e.to_string())
                }),
            "first-time" | "first_time" | "ftb" => parse_yes_no(required("first-time")?)
                .map(Command::FirstTime)
                .map_err(|e| CommandError::InvalidArgument(e.to_string())),
            "submit" | "calculate" => Ok(Command::Submit),
            "export" => Ok(Command::Export((!rest.is_empty()).then(|| PathBuf::from(rest)))),
            "reset" => Ok(Command::Reset),
            "show" => Ok(Command::Show),
            "cities" => Ok(Command::Cities),
            "log" => required("log").map(|filter| Command::LogLevel(filter.to_string())),
            "log-file" => required("log-file").map(|target| {
                Command::LogFile((!target.eq_ignore_ascii_case("off")).then(|| PathBuf::from(target)))
            }),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }
}

/// What an interactive session needs besides the session itself.
pub struct ConsoleContext {
    pub registry: RendererRegistry,
    pub format: String,
    pub directory: PathBuf,
    /// Absent when no subscriber was installed, e.g. in tests.
    pub logging: Option<LoggingHandle>,
}

/// Runs commands from `input` until `quit` or end of input.
///
/// Returns the session as it was left, for inspection.
pub fn run_session<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    context: &ConsoleContext,
) -> Result<Session> {
    let mut session = Session::new();
    writeln!(out, "Ontario Land Transfer Tax & Legal Fee Calculator")?;
    writeln!(out, "Type `help` for commands.")?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        debug!(%line, "console command");

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        handle(command, &mut session, out, context)?;
    }

    Ok(session)
}

fn handle<W: Write>(
    command: Command,
    session: &mut Session,
    out: &mut W,
    context: &ConsoleContext,
) -> Result<()> {
    match command {
        Command::Price(price) => {
            session.form_mut().price = price;
            writeln!(out, "Price set to {price}.")?;
        }
        Command::City(city) => {
            session.form_mut().city = city;
            writeln!(out, "City set to {city}.")?;
        }
        Command::FirstTime(flag) => {
            session.form_mut().is_first_time_buyer = flag;
            writeln!(out, "First-time buyer: {}.", if flag { "yes" } else { "no" })?;
        }
        Command::Submit => match session.submit() {
            Ok(report) => write!(out, "{}", render_screen(report))?,
            Err(e) => writeln!(out, "Cannot calculate: {e}")?,
        },
        Command::Export(directory) => {
            if !session.can_export() {
                writeln!(out, "Nothing to export yet; run `submit` first.")?;
                return Ok(());
            }
            let directory = directory.unwrap_or_else(|| context.directory.clone());
            match export_session(session, &context.registry, &context.format, &directory) {
                Ok(path) => writeln!(out, "Saved {}.", path.display())?,
                Err(e) => writeln!(out, "Export failed: {e:#}. Results are still available.")?,
            }
        }
        Command::Reset => {
            session.reset();
            writeln!(out, "Calculator reset.")?;
        }
        Command::Show => {
            let form = session.form();
            writeln!(out, "Price: {}", form.price)?;
            writeln!(out, "City: {}", form.city)?;
            writeln!(
                out,
                "First-time buyer: {}",
                if form.is_first_time_buyer { "yes" } else { "no" }
            )?;
            writeln!(out, "State: {}", session.state().name())?;
        }
        Command::Cities => {
            let names: Vec<&str> = City::all().iter().map(City::name).collect();
            writeln!(out, "{}", names.join(", "))?;
        }
        Command::LogLevel(filter) => match &context.logging {
            Some(logging) => match logging.set_level(&filter) {
                Ok(()) => writeln!(out, "Log filter set to {filter}.")?,
                Err(e) => writeln!(out, "{e}")?,
            },
            None => writeln!(out, "Logging is not active.")?,
        },
        Command::LogFile(path) => match (&context.logging, path) {
            (Some(logging), Some(path)) => match logging.enable_file_logging(&path) {
                Ok(()) => writeln!(out, "Logging to {}.", path.display())?,
                Err(e) => writeln!(out, "{e:#}")?,
            },
            (Some(logging), None) => {
                logging.disable_file_logging();
                writeln!(out, "File logging off.")?;
            }
            (None, _) => writeln!(out, "Logging is not active.")?,
        },
        Command::Help => write!(out, "{HELP}")?,
        Command::Quit => {}
    }
    Ok(())
}
