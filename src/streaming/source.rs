use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::marker::PhantomData;
use std::path::Path;
use std::str::FromStr;
use crate::error::{TriestError, Result};
use crate::streaming::events::{EdgeEvent, EdgeSign};

/// Lazy reader over a plain-text edge stream.
///
/// One event per line: `[+|-] u v`. The sign is optional and defaults to an
/// insertion, so SNAP-style edge lists (`u v`) read as insertion-only
/// streams. Blank lines and lines starting with `#` or `%` are skipped, and
/// columns after the two node ids are ignored.
#[derive(Debug)]
pub struct EdgeStreamReader<R, N = u64> {
    lines: Lines<R>,
    line_number: usize,
    _node: PhantomData<N>,
}

impl<N> EdgeStreamReader<BufReader<File>, N> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead, N> EdgeStreamReader<R, N> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
            _node: PhantomData,
        }
    }

    /// Number of lines consumed so far, including skipped ones
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R, N> Iterator for EdgeStreamReader<R, N>
where
    R: BufRead,
    N: FromStr,
    N::Err: Display,
{
    type Item = Result<EdgeEvent<N>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next = self.lines.next()?;
            self.line_number += 1;
            let line = match next {
                Ok(line) => line,
                Err(e) => return Some(Err(TriestError::parse(self.line_number, e.to_string()))),
            };

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('%') {
                continue;
            }
            return Some(parse_edge_line(trimmed, self.line_number));
        }
    }
}

/// Parse one non-comment line of an edge stream.
pub fn parse_edge_line<N>(line: &str, line_number: usize) -> Result<EdgeEvent<N>>
where
    N: FromStr,
    N::Err: Display,
{
    let mut tokens = line.split_whitespace();
    let first = tokens
        .next()
        .ok_or_else(|| TriestError::parse(line_number, "empty line"))?;

    let (sign, u_token) = match first {
        "+" => (EdgeSign::Insert, tokens.next()),
        "-" => (EdgeSign::Delete, tokens.next()),
        _ => (EdgeSign::Insert, Some(first)),
    };
    let v_token = tokens.next();

    let (Some(u_token), Some(v_token)) = (u_token, v_token) else {
        return Err(TriestError::parse(line_number, format!("expected two node ids in '{}'", line)));
    };

    let parse_node = |token: &str| {
        token.parse::<N>().map_err(|e| {
            TriestError::parse(line_number, format!("invalid node id '{}': {}", token, e))
        })
    };

    Ok(EdgeEvent::new(sign, parse_node(u_token)?, parse_node(v_token)?))
}

/// Read a whole edge stream file into memory.
pub fn read_edge_stream<P: AsRef<Path>>(path: P) -> Result<Vec<EdgeEvent<u64>>> {
    EdgeStreamReader::<_, u64>::open(path)?.collect()
}
