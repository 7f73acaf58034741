//! Conversion between ψ terms and their array form.
//!
//! A term is built from `0`, `ψ_a(b)` and `+`. Its array form lists the
//! subscripts in depth-first order, each one shifted by `a + 1` for every
//! enclosing `ψ_a`:
//!
//! ```
//! use psiarray::{parse_term, term_to_array};
//!
//! let term = parse_term("ψ_0(ψ_1(ψ_4(0)+ψ_1(1))+ψ_1(1))").unwrap();
//! assert_eq!(term_to_array(&term).unwrap(), vec![0, 2, 7, 4, 5, 2, 3]);
//! ```

pub mod parser;
pub mod prelude;
pub mod printer;
pub mod term;
pub mod translate;

pub use parser::{parse_array_literal, parse_term};
pub use prelude::{Error, Expected, Nat, Result};
pub use printer::{render, DisplayConfig, DisplayOption};
pub use term::{Principal, Sum, Term};
pub use translate::{array_to_term, term_to_array};

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Conversion {
    /// The input was an array literal.
    Decoded { array: Vec<Nat>, term: Term },
    /// The input was a term.
    Encoded { term: Term, array: Vec<Nat> },
}

impl Conversion {
    /// The converted side: the rendered term or the comma separated array.
    pub fn output(&self, config: &DisplayConfig) -> String {
        match self {
            Conversion::Decoded { term, .. } => config.wrap(&render(term, config)),
            Conversion::Encoded { array, .. } => array
                .iter()
                .map(Nat::to_string)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

/// Array literals are decoded, anything else is parsed as a term.
pub fn convert(input: &str) -> Result<Conversion> {
    if let Ok(array) = parse_array_literal(input) {
        let term = array_to_term(&array)?;
        return Ok(Conversion::Decoded { array, term });
    }
    let term = parse_term(input)?;
    let array = term_to_array(&term)?;
    Ok(Conversion::Encoded { term, array })
}
