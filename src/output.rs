use std::io::{self, Write};

use serde::Serialize;

use crate::importer::ImportSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_import(summary: &ImportSummary) -> io::Result<()> {
        Self::print_json(summary)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

pub struct TextOutput;

impl TextOutput {
    pub fn print_import(summary: &ImportSummary) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        Self::write_import(&mut stdout, summary)
    }

    pub fn write_import<W: Write>(out: &mut W, summary: &ImportSummary) -> io::Result<()> {
        writeln!(
            out,
            "{} samples checked: {} imported, {} skipped, {} failed.",
            summary.examined, summary.imported, summary.skipped, summary.failed
        )?;
        for failure in &summary.failures {
            writeln!(out, "  {}: {}", failure.sample, failure.reason)?;
        }
        Ok(())
    }
}
