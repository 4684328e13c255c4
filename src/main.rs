use std::io::{self, BufRead, Write};

use anyhow::Result;
use env_logger::Env;

use geocalc::config::Config;
use geocalc::interpreter::{Outcome, Table, run_command};
use geocalc::registry::Registry;

/// Print one command's result. Returns false when the session should end.
fn report(outcome: Outcome, config: &Config, out: &mut impl Write) -> io::Result<bool> {
    match outcome {
        Outcome::Nothing => {}
        Outcome::Confirmed => writeln!(out, "Ok!")?,
        Outcome::Value(value) => writeln!(out, "It's {}", value.render(config.precision))?,
        Outcome::Tables(tables) => {
            for table in &tables {
                write_table(table, out)?;
            }
        }
        Outcome::Message(message) => writeln!(out, "{message}")?,
        Outcome::Exit => return Ok(false),
    }
    Ok(true)
}

fn write_table(table: &Table, out: &mut impl Write) -> io::Result<()> {
    let (left, right) = table.widths();
    let rule = format!("+-{}-+-{}-+", "-".repeat(left), "-".repeat(right));

    writeln!(out, "{}", table.title)?;
    writeln!(out, "{rule}")?;
    writeln!(
        out,
        "| {:<left$} | {:<right$} |",
        table.headers.0, table.headers.1
    )?;
    writeln!(out, "{rule}")?;
    for (name, value) in &table.rows {
        writeln!(out, "| {name:<left$} | {value:<right$} |")?;
    }
    writeln!(out, "{rule}")
}

/// Run one line, printing errors instead of propagating them.
fn execute(line: &str, registry: &mut Registry, config: &Config, out: &mut impl Write) -> Result<bool> {
    match run_command(line, registry) {
        Ok(outcome) => Ok(report(outcome, config, out)?),
        Err(e) => {
            log::debug!("command failed: {e:?}");
            writeln!(out, "Error: {e}")?;
            Ok(true)
        }
    }
}

fn main() -> Result<()> {
    // Parse configuration from command line and environment
    let config = Config::from_args_and_env()?;

    env_logger::Builder::from_env(Env::default().default_filter_or(&config.log_level)).init();
    log::debug!("starting with {config:?}");

    let mut registry = Registry::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if config.is_batch() {
        for command in &config.commands {
            if !execute(command, &mut registry, &config, &mut out)? {
                break;
            }
        }
        return Ok(());
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut buf = Vec::new();
    loop {
        write!(out, "{}", config.prompt)?;
        out.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            writeln!(out, "\nExiting...")?;
            break;
        }
        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                log::debug!("rejected input line: {e}");
                writeln!(out, "Error: input is not valid UTF-8")?;
                continue;
            }
        };
        if !execute(line, &mut registry, &config, &mut out)? {
            break;
        }
    }

    Ok(())
}
