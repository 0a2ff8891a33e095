use crate::frontier::DominanceFrontier;
use crate::sequence::SizeSequence;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{BufRead, Write};

/// Reads the parameter `s` from the first line.
pub fn read_parameter<R: BufRead>(reader: &mut R) -> Result<usize> {
    let mut line = String::new();
    let read = reader.read_line(&mut line).context("read parameter line")?;
    if read == 0 {
        anyhow::bail!("Expected the parameter s on the first line, got end of input");
    }
    line.trim()
        .parse::<usize>()
        .with_context(|| format!("parse parameter s from {:?}", line.trim()))
}

/// Reads one size sequence per line until end of input. Blank lines are
/// skipped.
pub fn read_sequences<R: BufRead>(reader: R) -> Result<Vec<SizeSequence>> {
    let mut sequences = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("read sequence line {}", number + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let sequence = line
            .parse::<SizeSequence>()
            .with_context(|| format!("parse sequence on line {}: {:?}", number + 1, line))?;
        sequences.push(sequence);
    }
    Ok(sequences)
}

/// One sequence per line, whitespace-separated.
pub fn write_frontier<W: Write>(writer: &mut W, frontier: &DominanceFrontier) -> Result<()> {
    for sequence in frontier.iter() {
        writeln!(writer, "{sequence}").context("write frontier line")?;
    }
    writer.flush().context("flush frontier output")
}

pub fn write_json<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value).context("serialize JSON output")?;
    writeln!(writer).context("terminate JSON output")?;
    writer.flush().context("flush JSON output")
}
