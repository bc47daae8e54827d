use equate::prelude::*;
use owo_colors::OwoColorize;
use std::io::{self, Write};

fn main() -> Result<(), io::Error> {
    env_logger::init();

    let mut stdout = io::stdout().lock();
    let mut lines = io::stdin().lines();

    loop {
        write!(stdout, "{} ", ">".green())?;
        stdout.flush()?;

        let Some(Ok(input)) = lines.next() else {
            writeln!(stdout, "{}", "exiting...".yellow())?;
            std::process::exit(0);
        };

        let (show_tree, src) = match input.trim().strip_prefix(":tree") {
            Some(rest) => (true, rest),
            None => (false, input.as_str()),
        };
        if src.trim().is_empty() {
            continue;
        }

        match Equation::parse(src) {
            Ok(eq) if show_tree => writeln!(stdout, "{eq}")?,
            Ok(eq) => writeln!(stdout, "{}", eq.eval())?,
            Err(e) => writeln!(stdout, "{} {e}", "error:".red())?,
        }
    }
}
