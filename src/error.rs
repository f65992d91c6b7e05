use thiserror::Error;

use crate::parser::ParseError;

/// Errors reported by the simplifier and its collaborators.
///
/// A law that simply does not apply is *not* an error: `simplify` returns `Ok(None)` for it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("variable `{0}` is not an input of the domain")]
    UnknownVariable(String),

    #[error("variable `{0}` is declared more than once")]
    DuplicateVariable(String),

    #[error("domain has no outputs")]
    NoOutputs,

    #[error("domain has {inputs} inputs ({rows} rows), but at most {max} are allowed")]
    DomainTooLarge { inputs: usize, rows: String, max: u32 },

    #[error("equivalence budget of {0} comparisons exhausted")]
    ComparisonLimit(usize),

    #[error("unknown {kind} `{name}`")]
    UnknownName { kind: &'static str, name: String },

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
