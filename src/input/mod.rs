//! Ranked count reader
//!
//! Input is whitespace-separated text with one header line. Each data line
//! carries `program _ tp fp [...]`; only columns 0, 2 and 3 are read.

use crate::models::{Counts, Record};
use std::io::{self, BufRead, Lines};
use std::num::ParseIntError;
use thiserror::Error;

const PROGRAM_COLUMN: usize = 0;
const TP_COLUMN: usize = 2;
const FP_COLUMN: usize = 3;

/// Errors raised while reading ranked counts
#[derive(Error, Debug)]
pub enum InputError {
    #[error("line {line}: expected at least {expected} fields, found {found}")]
    MissingField {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid {column} count '{value}': {source}")]
    InvalidCount {
        line: usize,
        column: &'static str,
        value: String,
        source: ParseIntError,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Streams [`Record`]s from a reader, one line at a time
pub struct RecordReader<R> {
    lines: Lines<R>,
    line: usize,
    header_skipped: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
            header_skipped: false,
        }
    }

    fn next_line(&mut self) -> Option<io::Result<String>> {
        let next = self.lines.next();
        if next.is_some() {
            self.line += 1;
        }
        next
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<Record, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.header_skipped {
            self.header_skipped = true;
            if let Err(e) = self.next_line()? {
                return Some(Err(e.into()));
            }
        }

        loop {
            let text = match self.next_line()? {
                Ok(text) => text,
                Err(e) => return Some(Err(e.into())),
            };
            // Trailing blank lines are common in pipeline output
            if text.trim().is_empty() {
                continue;
            }
            return Some(parse_line(&text, self.line));
        }
    }
}

/// Parse one data line into a [`Record`]
pub fn parse_line(text: &str, line: usize) -> Result<Record, InputError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() <= FP_COLUMN {
        return Err(InputError::MissingField {
            line,
            expected: FP_COLUMN + 1,
            found: fields.len(),
        });
    }

    let tp = parse_count(fields[TP_COLUMN], "tp", line)?;
    let fp = parse_count(fields[FP_COLUMN], "fp", line)?;

    Ok(Record {
        program: fields[PROGRAM_COLUMN].to_string(),
        counts: Counts::new(tp, fp),
        line,
    })
}

fn parse_count(value: &str, column: &'static str, line: usize) -> Result<u64, InputError> {
    value.parse().map_err(|source| InputError::InvalidCount {
        line,
        column,
        value: value.to_string(),
        source,
    })
}
