// src/core/storage/xset/range.rs

//! Score and lexicographical range specifications shared by both encodings.

use crate::core::FinityDBError;
use bytes::Bytes;
use std::fmt;

/// A score interval with independently open or closed endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
    /// True when the minimum is exclusive (written `(x`).
    pub minex: bool,
    /// True when the maximum is exclusive.
    pub maxex: bool,
}

impl ScoreRange {
    /// Parses the two textual bounds of a score range. A leading `(` marks
    /// an open bound; `+inf` / `-inf` / `inf` are accepted. NaN is not a
    /// valid bound.
    pub fn parse(min: &str, max: &str) -> Result<Self, FinityDBError> {
        let (min, minex) = Self::parse_bound(min)?;
        let (max, maxex) = Self::parse_bound(max)?;
        Ok(Self {
            min,
            max,
            minex,
            maxex,
        })
    }

    fn parse_bound(raw: &str) -> Result<(f64, bool), FinityDBError> {
        let (exclusive, num) = match raw.strip_prefix('(') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let value: f64 = num
            .parse()
            .map_err(|_| FinityDBError::InvalidScoreRange)?;
        if value.is_nan() {
            return Err(FinityDBError::InvalidScoreRange);
        }
        Ok((value, exclusive))
    }

    pub fn gte_min(&self, value: f64) -> bool {
        if self.minex {
            value > self.min
        } else {
            value >= self.min
        }
    }

    pub fn lte_max(&self, value: f64) -> bool {
        if self.maxex {
            value < self.max
        } else {
            value <= self.max
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.gte_min(value) && self.lte_max(value)
    }

    /// The textual form of the minimum bound, for argument round-trips.
    pub fn min_arg(&self) -> String {
        Self::bound_arg(self.min, self.minex)
    }

    pub fn max_arg(&self) -> String {
        Self::bound_arg(self.max, self.maxex)
    }

    fn bound_arg(value: f64, exclusive: bool) -> String {
        let body = if value == f64::INFINITY {
            "+inf".to_string()
        } else if value == f64::NEG_INFINITY {
            "-inf".to_string()
        } else {
            value.to_string()
        };
        if exclusive { format!("({body}") } else { body }
    }
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
            minex: false,
            maxex: false,
        }
    }
}

/// One endpoint of a lexicographical range.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LexBound {
    Inclusive(Bytes),
    Exclusive(Bytes),
    /// The `-` sentinel: less than every member.
    #[default]
    Min,
    /// The `+` sentinel: greater than every member.
    Max,
}

impl fmt::Display for LexBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexBound::Inclusive(b) => write!(f, "[{}", String::from_utf8_lossy(b)),
            LexBound::Exclusive(b) => write!(f, "({}", String::from_utf8_lossy(b)),
            LexBound::Min => write!(f, "-"),
            LexBound::Max => write!(f, "+"),
        }
    }
}

/// A byte-lexicographic member interval.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LexRange {
    pub min: LexBound,
    pub max: LexBound,
}

impl LexRange {
    /// Parses the two raw bounds of a lex range. Each bound must be the
    /// sentinel `-` or `+`, or a member prefixed with `[` (closed) or `(`
    /// (open).
    pub fn parse(min: &[u8], max: &[u8]) -> Result<Self, FinityDBError> {
        Ok(Self {
            min: Self::parse_bound(min)?,
            max: Self::parse_bound(max)?,
        })
    }

    fn parse_bound(raw: &[u8]) -> Result<LexBound, FinityDBError> {
        match raw {
            b"-" => Ok(LexBound::Min),
            b"+" => Ok(LexBound::Max),
            _ => match raw.first() {
                Some(b'[') => Ok(LexBound::Inclusive(Bytes::copy_from_slice(&raw[1..]))),
                Some(b'(') => Ok(LexBound::Exclusive(Bytes::copy_from_slice(&raw[1..]))),
                _ => Err(FinityDBError::InvalidLexRange),
            },
        }
    }

    pub fn gte_min(&self, member: &[u8]) -> bool {
        match &self.min {
            LexBound::Inclusive(b) => member >= b.as_ref(),
            LexBound::Exclusive(b) => member > b.as_ref(),
            LexBound::Min => true,
            LexBound::Max => false,
        }
    }

    pub fn lte_max(&self, member: &[u8]) -> bool {
        match &self.max {
            LexBound::Inclusive(b) => member <= b.as_ref(),
            LexBound::Exclusive(b) => member < b.as_ref(),
            LexBound::Max => true,
            LexBound::Min => false,
        }
    }

    pub fn contains(&self, member: &[u8]) -> bool {
        self.gte_min(member) && self.lte_max(member)
    }
}
