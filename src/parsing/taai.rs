use regex::Regex;
use std::sync::OnceLock;

use crate::nonogram::consts::N;
use crate::nonogram::puzzle::Puzzle;
use crate::utils::prelude::*;

fn marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"^\$(\d+)").expect("static regex is valid"))
}

/// Parses one clue line: whitespace-separated positive run lengths, or an
/// empty/all-whitespace line for a zero-run clue (SPEC_FULL 4.6). Never
/// panics on bad input -- malformed tokens become a `MalformedInput`-style
/// `anyhow::Error` naming the puzzle and line.
fn parse_clue_line(line: &str, puzzle_index: usize, line_no: usize) -> Result<Vec<u16>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    trimmed
        .split_whitespace()
        .map(|tok| {
            tok.parse::<u16>()
                .map_err(|_| anyhow!("puzzle #{puzzle_index} line {line_no}: invalid run length {tok:?}"))
        })
        .collect()
}

/// Parses every `$<index>`-delimited puzzle out of a TAAI stream
/// (SPEC_FULL 4.6, section 6). Lines before the first marker are ignored as
/// preamble; everything else must line up into marker + 2N clue lines
/// (first N columns, then N rows) or parsing fails with the offending
/// puzzle index and line number.
pub fn parse_stream(input: &str) -> Result<Vec<Puzzle>> {
    let lines: Vec<&str> = input.lines().collect();
    let mut puzzles = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let Some(caps) = marker().captures(lines[i].trim()) else {
            i += 1;
            continue;
        };
        let source_index: usize = caps[1]
            .parse()
            .map_err(|_| anyhow!("line {}: puzzle marker index is not a valid number", i + 1))?;
        i += 1;

        if i + 2 * N > lines.len() {
            return Err(anyhow!(
                "puzzle #{source_index} (starting line {}): expected {} clue lines, only {} remain",
                i,
                2 * N,
                lines.len() - i
            ));
        }

        let mut col_runs = Vec::with_capacity(N);
        for _ in 0..N {
            col_runs.push(parse_clue_line(lines[i], source_index, i + 1)?);
            i += 1;
        }
        let mut row_runs = Vec::with_capacity(N);
        for _ in 0..N {
            row_runs.push(parse_clue_line(lines[i], source_index, i + 1)?);
            i += 1;
        }

        puzzles.push(Puzzle::new(source_index, col_runs, row_runs)?);
    }

    Ok(puzzles)
}

/// Parses a file holding exactly one puzzle, for the `solve`/`generate` CLI
/// commands (section 6): a bare marker is optional here, since there's only
/// ever one puzzle in the stream.
pub fn parse_single(input: &str) -> Result<Puzzle> {
    let owned;
    let with_marker: &str = if marker().is_match(input.trim_start()) {
        input
    } else {
        owned = format!("$0\n{input}");
        &owned
    };
    let mut puzzles = parse_stream(with_marker)?;
    if puzzles.is_empty() {
        return Err(anyhow!("no puzzle found in input"));
    }
    Ok(puzzles.remove(0))
}
