//! Output sinks for the composed prompt.

use std::convert::Infallible;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use colored::Colorize;

/// Where the prompt goes: `stdout`, or any other value taken as a file path.
#[derive(Debug, Clone)]
pub enum Sink {
    Stdout,
    File(PathBuf),
}

impl FromStr for Sink {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "stdout" => Sink::Stdout,
            path => Sink::File(PathBuf::from(path)),
        })
    }
}

pub fn write(sink: &Sink, body: &str) -> Result<()> {
    match sink {
        Sink::Stdout => {
            println!("{body}");
        }
        Sink::File(path) => {
            fs::write(path, body)
                .with_context(|| format!("failed to write prompt to {}", path.display()))?;
            println!("{} {}", "Prompt written to".green(), path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stdout_keyword_is_not_a_path() {
        assert!(matches!("stdout".parse::<Sink>().unwrap(), Sink::Stdout));
        assert!(matches!(
            "out/prompt.md".parse::<Sink>().unwrap(),
            Sink::File(_)
        ));
    }
}
