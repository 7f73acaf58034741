use chumsky::prelude::*;

use crate::{
    prelude::*,
    term::{Principal, Term},
};

/// Largest decimal numeral accepted as a summand; `n` stands for `n` ones.
pub const MAX_NUMERAL: Nat = 1 << 16;

/// Largest number of applications a parsed term may nest.
pub const MAX_DEPTH: usize = 256;

pub trait SimpleParser<I: Clone + std::hash::Hash, O>: Parser<I, O, Error = Simple<I>> {}
impl<I: Clone + std::hash::Hash, O, T> SimpleParser<I, O> for T where
    T: Parser<I, O, Error = Simple<I>>
{
}

pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

fn array_literal_parser() -> impl SimpleParser<char, Vec<Nat>> {
    filter::<char, _, Simple<char>>(|c| c.is_ascii_digit())
        .repeated()
        .at_least(1)
        .collect::<String>()
        .from_str::<Nat>()
        .try_map(|r, span| r.map_err(|e| Simple::<char>::custom(span, format!("{e}"))))
        .labelled("number")
        .separated_by(just(','))
        .at_least(1)
        .then_ignore(end())
}

/// `a_0,a_1,...,a_n`. Whitespace is ignored and error spans point into the
/// text returned by [`strip_whitespace`].
pub fn parse_array_literal(s: &str) -> Result<Vec<Nat>, Vec<Simple<char>>> {
    array_literal_parser().parse(strip_whitespace(s).as_str())
}

pub fn parse_term(s: &str) -> Result<Term> {
    let mut scanner = Scanner::new(s);
    if scanner.chars.is_empty() {
        return Err(Error::EmptyInput);
    }
    let term = scanner.term()?;
    scanner.end()?;
    Ok(term)
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

impl Scanner {
    fn new(s: &str) -> Self {
        Self {
            chars: strip_whitespace(s).chars().collect(),
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn at_digit(&self) -> bool {
        self.peek().map_or(false, |c| c.is_ascii_digit())
    }

    fn consume(&mut self, c: char) -> bool {
        self.consume_any(&[c])
    }

    fn consume_any(&mut self, cs: &[char]) -> bool {
        match self.peek() {
            Some(c) if cs.contains(&c) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn error(&self, expected: Expected) -> Error {
        let position = self.pos + 1;
        match self.peek() {
            Some(found) => Error::UnexpectedCharacter {
                position,
                expected,
                found,
            },
            None => Error::UnexpectedEndOfInput { position, expected },
        }
    }

    fn expect(&mut self, c: char) -> Result<()> {
        if self.consume(c) {
            Ok(())
        } else {
            Err(self.error(Expected::Char(c)))
        }
    }

    fn end(&self) -> Result<()> {
        match self.peek() {
            Some(_) => Err(self.error(Expected::EndOfInput)),
            None => Ok(()),
        }
    }

    fn number(&mut self) -> Result<Nat> {
        if !self.at_digit() {
            return Err(self.error(Expected::Digit));
        }
        let position = self.pos + 1;
        let mut n: Nat = 0;
        while let Some(d) = self.peek().and_then(|c| c.to_digit(10)) {
            n = n
                .checked_mul(10)
                .and_then(|n| n.checked_add(Nat::from(d)))
                .ok_or(Error::NumberTooLarge {
                    position,
                    limit: Nat::MAX,
                })?;
            self.pos += 1;
        }
        Ok(n)
    }

    /// `0 | summand ('+' summand)*`
    fn term(&mut self) -> Result<Term> {
        let mut parts = self.summand()?;
        if parts.is_empty() {
            if self.peek() == Some('+') {
                return Err(Error::InvalidZeroAddition {
                    position: self.pos + 1,
                });
            }
            return Ok(Term::Zero);
        }
        while self.consume('+') {
            let position = self.pos + 1;
            let summand = self.summand()?;
            if summand.is_empty() {
                return Err(Error::InvalidZeroAddition { position });
            }
            parts.extend(summand);
        }
        Ok(Term::from_principals(parts))
    }

    /// Runs `f` one application deeper, right after its `(`.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth == MAX_DEPTH {
            return Err(Error::NestingTooDeep {
                position: self.pos,
                limit: MAX_DEPTH,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// A numeral expands to that many ones; anything else is one principal
    /// term.
    fn summand(&mut self) -> Result<Vec<Principal>> {
        if !self.at_digit() {
            return Ok(vec![self.principal()?]);
        }
        let position = self.pos + 1;
        let n = self.number()?;
        if n > MAX_NUMERAL {
            return Err(Error::NumberTooLarge {
                position,
                limit: MAX_NUMERAL,
            });
        }
        Ok(std::iter::repeat_with(Principal::one)
            .take(n as usize)
            .collect())
    }

    fn principal(&mut self) -> Result<Principal> {
        if self.consume_any(&['w', 'ω']) {
            return Ok(Principal::omega());
        }
        if self.consume_any(&['W', 'Ω']) {
            return Ok(Principal::big_omega());
        }
        let head = self.consume_any(&['ψ', 'p']);
        if self.consume('(') {
            return self.nested(Self::parenthesized);
        }
        let sub = if self.consume('{') {
            self.braced_subscript()?
        } else if !head {
            return Err(self.error(Expected::Term));
        } else if self.consume('_') && self.consume('{') {
            self.braced_subscript()?
        } else {
            self.number()?
        };
        self.expect('(')?;
        let arg = self.nested(Self::term)?;
        self.expect(')')?;
        Ok(Principal::new(sub, arg))
    }

    fn braced_subscript(&mut self) -> Result<Nat> {
        let sub = self.number()?;
        self.expect('}')?;
        Ok(sub)
    }

    /// After `(`: either `arg)` with subscript 0 or `sub,arg)`. The single
    /// argument reading is tried first; when it fails and the content starts
    /// with a digit, the cursor is rewound and the pair reading is tried.
    fn parenthesized(&mut self) -> Result<Principal> {
        let start = self.pos;
        let single = self.term().and_then(|arg| self.expect(')').map(|()| arg));
        let trial = match single {
            Ok(arg) => return Ok(Principal::new(0, arg)),
            Err(e) => e,
        };
        if !self.chars.get(start).map_or(false, char::is_ascii_digit) {
            return Err(trial);
        }
        self.pos = start;
        self.pair().map_err(|retry| {
            if position(&retry) > position(&trial) {
                retry
            } else {
                trial
            }
        })
    }

    fn pair(&mut self) -> Result<Principal> {
        let sub = self.number()?;
        self.expect(',')?;
        let arg = self.term()?;
        self.expect(')')?;
        Ok(Principal::new(sub, arg))
    }
}

fn position(e: &Error) -> Option<usize> {
    e.span().map(|span| span.start)
}
