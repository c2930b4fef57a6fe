use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::{TriestError, Result};

/// Sign of a stream event: edge insertion (`+`) or deletion (`-`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeSign {
    Insert,
    Delete,
}

impl EdgeSign {
    /// Unit delta applied to signed counters
    pub fn delta(self) -> i64 {
        match self {
            EdgeSign::Insert => 1,
            EdgeSign::Delete => -1,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            EdgeSign::Insert => '+',
            EdgeSign::Delete => '-',
        }
    }
}

impl fmt::Display for EdgeSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for EdgeSign {
    type Err = TriestError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "+" => Ok(EdgeSign::Insert),
            "-" => Ok(EdgeSign::Delete),
            other => Err(TriestError::invalid_parameter(format!(
                "unknown edge sign '{}', expected '+' or '-'",
                other
            ))),
        }
    }
}

/// One event of a fully-dynamic edge stream.
/// Endpoints are kept as given; canonical ordering happens at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeEvent<N = u64> {
    pub sign: EdgeSign,
    pub u: N,
    pub v: N,
}

impl<N> EdgeEvent<N> {
    pub fn new(sign: EdgeSign, u: N, v: N) -> Self {
        Self { sign, u, v }
    }

    pub fn insert(u: N, v: N) -> Self {
        Self::new(EdgeSign::Insert, u, v)
    }

    pub fn delete(u: N, v: N) -> Self {
        Self::new(EdgeSign::Delete, u, v)
    }

    pub fn is_insert(&self) -> bool {
        self.sign == EdgeSign::Insert
    }
}

impl<N: fmt::Display> fmt::Display for EdgeEvent<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.sign, self.u, self.v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_parsing() {
        assert_eq!("+".parse::<EdgeSign>().unwrap(), EdgeSign::Insert);
        assert_eq!("-".parse::<EdgeSign>().unwrap(), EdgeSign::Delete);
        assert!("*".parse::<EdgeSign>().is_err());
    }

    #[test]
    fn test_sign_delta() {
        assert_eq!(EdgeSign::Insert.delta(), 1);
        assert_eq!(EdgeSign::Delete.delta(), -1);
    }

    #[test]
    fn test_event_display() {
        assert_eq!(EdgeEvent::insert(1u64, 2).to_string(), "+ 1 2");
        assert_eq!(EdgeEvent::delete(5u64, 3).to_string(), "- 5 3");
        assert!(!EdgeEvent::delete(5u64, 3).is_insert());
    }
}
