use thiserror::Error;

/// Subscripts and array entries.
pub type Nat = u64;

pub type Span = std::ops::Range<usize>;

#[derive(PartialEq, Eq, Clone, Copy, derive_more::Display, Debug)]
pub enum Expected {
    #[display(fmt = "{_0}")]
    Char(char),
    #[display(fmt = "a digit")]
    Digit,
    #[display(fmt = "a term")]
    Term,
    #[display(fmt = "end of the input")]
    EndOfInput,
}

/// Positions are 1-based and count characters of the input with all
/// whitespace removed.
#[derive(Error, PartialEq, Eq, Clone, Debug)]
pub enum Error {
    #[error("Empty input")]
    EmptyInput,
    #[error("Expected {expected} at position {position}, found {found}")]
    UnexpectedCharacter {
        position: usize,
        expected: Expected,
        found: char,
    },
    #[error("Expected {expected} at position {position}, but the input ended")]
    UnexpectedEndOfInput { position: usize, expected: Expected },
    #[error("0 cannot be added to other terms (position {position})")]
    InvalidZeroAddition { position: usize },
    #[error("Number at position {position} exceeds {limit}")]
    NumberTooLarge { position: usize, limit: Nat },
    #[error("Terms nested deeper than {limit} levels at position {position}")]
    NestingTooDeep { position: usize, limit: usize },
    #[error("Array value {value} at index {index} does not encode a term")]
    NegativeArrayValue { index: usize, value: Nat },
    #[error("Array value at index {index} exceeds {}", Nat::MAX)]
    ArrayValueOverflow { index: usize },
}

impl Error {
    /// 0-based character range of the offending input, if the error points
    /// into the text.
    pub fn span(&self) -> Option<Span> {
        match self {
            Error::UnexpectedCharacter { position, .. }
            | Error::InvalidZeroAddition { position }
            | Error::UnexpectedEndOfInput { position, .. }
            | Error::NumberTooLarge { position, .. }
            | Error::NestingTooDeep { position, .. } => Some(position - 1..*position),
            Error::EmptyInput
            | Error::NegativeArrayValue { .. }
            | Error::ArrayValueOverflow { .. } => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
