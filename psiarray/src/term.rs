use crate::prelude::*;

/// `ψ_sub(arg)`
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Principal {
    sub: Nat,
    arg: Box<Term>,
}

impl Principal {
    pub fn new(sub: Nat, arg: Term) -> Self {
        Self {
            sub,
            arg: Box::new(arg),
        }
    }
    /// `1 = ψ_0(0)`
    pub fn one() -> Self {
        Self::new(0, Term::Zero)
    }
    /// `ω = ψ_0(1)`
    pub fn omega() -> Self {
        Self::new(0, Self::one().into())
    }
    /// `Ω = ψ_1(0)`
    pub fn big_omega() -> Self {
        Self::new(1, Term::Zero)
    }
    pub fn sub(&self) -> Nat {
        self.sub
    }
    pub fn arg(&self) -> &Term {
        &self.arg
    }
}

// Decoded arrays nest one application per entry.
impl Drop for Principal {
    fn drop(&mut self) {
        let mut stack = std::mem::replace(&mut *self.arg, Term::Zero).into_principals();
        while let Some(mut p) = stack.pop() {
            stack.extend(std::mem::replace(&mut *p.arg, Term::Zero).into_principals());
        }
    }
}

/// Sum of at least two principal terms, most significant first.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Sum(Vec<Principal>);

impl Sum {
    pub fn parts(&self) -> &[Principal] {
        &self.0
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Term {
    Zero,
    Apply(Principal),
    Sum(Sum),
}

impl Term {
    pub fn is_zero(&self) -> bool {
        matches!(self, Term::Zero)
    }

    /// Collapses an assembled list of summands: nothing is `0`, a single
    /// summand stands for itself.
    pub fn from_principals(mut parts: Vec<Principal>) -> Self {
        match parts.len() {
            0 => Term::Zero,
            1 => parts.pop().map_or(Term::Zero, Term::Apply),
            _ => Term::Sum(Sum(parts)),
        }
    }

    /// `1 + 1 + ... + 1` with `n` summands.
    pub fn numeral(n: usize) -> Self {
        Self::from_principals(std::iter::repeat_with(Principal::one).take(n).collect())
    }

    pub fn principals(&self) -> &[Principal] {
        match self {
            Term::Zero => &[],
            Term::Apply(p) => std::slice::from_ref(p),
            Term::Sum(sum) => sum.parts(),
        }
    }

    pub fn into_principals(self) -> Vec<Principal> {
        match self {
            Term::Zero => vec![],
            Term::Apply(p) => vec![p],
            Term::Sum(Sum(parts)) => parts,
        }
    }

    pub fn add(self, rhs: Term) -> Term {
        match (self, rhs) {
            (Term::Zero, rhs) => rhs,
            (lhs, Term::Zero) => lhs,
            (lhs, rhs) => {
                let mut parts = lhs.into_principals();
                parts.extend(rhs.into_principals());
                Term::Sum(Sum(parts))
            }
        }
    }
}

impl From<Principal> for Term {
    fn from(p: Principal) -> Self {
        Term::Apply(p)
    }
}

impl std::ops::Add for Term {
    type Output = Term;
    fn add(self, rhs: Term) -> Term {
        Term::add(self, rhs)
    }
}

impl std::ops::Add<Principal> for Term {
    type Output = Term;
    fn add(self, rhs: Principal) -> Term {
        Term::add(self, rhs.into())
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::printer::render(self, &Default::default()))
    }
}
