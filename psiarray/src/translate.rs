use crate::{
    prelude::*,
    term::{Principal, Term},
};

/// Depth-first walk: a subscript is written shifted by the offsets of all
/// enclosing applications, and each application shifts its argument by
/// `sub + 1`. Summands are concatenated without a shift.
pub fn term_to_array(term: &Term) -> Result<Vec<Nat>> {
    let mut out = Vec::new();
    let mut stack = vec![(term.principals().iter(), 0 as Nat)];
    while let Some((parts, offset)) = stack.last_mut() {
        let p = match parts.next() {
            Some(p) => p,
            None => {
                stack.pop();
                continue;
            }
        };
        let overflow = Error::ArrayValueOverflow { index: out.len() };
        let value = p.sub().checked_add(*offset).ok_or(overflow)?;
        out.push(value);
        if !p.arg().is_zero() {
            let overflow = Error::ArrayValueOverflow { index: out.len() };
            let offset = value.checked_add(1).ok_or(overflow)?;
            stack.push((p.arg().principals().iter(), offset));
        }
    }
    Ok(out)
}

/// An application still collecting its argument.
struct Open {
    value: Nat,
    sub: Nat,
    args: Vec<Principal>,
}

impl Open {
    fn close(self) -> Principal {
        Principal::new(self.sub, Term::from_principals(self.args))
    }
}

/// Inverse of [`term_to_array`].
///
/// The parent of an index is the nearest preceding index holding a smaller
/// value, and the index is then part of its parent's argument. An index
/// without a parent starts a new summand.
pub fn array_to_term(seq: &[Nat]) -> Result<Term> {
    let mut top = Vec::new();
    let mut open: Vec<Open> = Vec::new();
    for (index, &value) in seq.iter().enumerate() {
        while let Some(node) = open.pop() {
            if node.value < value {
                open.push(node);
                break;
            }
            attach(&mut open, &mut top, node.close());
        }
        let sub = match open.last() {
            Some(parent) => value
                .checked_sub(parent.value)
                .and_then(|d| d.checked_sub(1))
                .ok_or(Error::NegativeArrayValue { index, value })?,
            None => value,
        };
        open.push(Open {
            value,
            sub,
            args: Vec::new(),
        });
    }
    while let Some(node) = open.pop() {
        attach(&mut open, &mut top, node.close());
    }
    Ok(Term::from_principals(top))
}

fn attach(open: &mut [Open], top: &mut Vec<Principal>, p: Principal) {
    match open.last_mut() {
        Some(parent) => parent.args.push(p),
        None => top.push(p),
    }
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;

    fn psi(sub: Nat, arg: Term) -> Term {
        Principal::new(sub, arg).into()
    }

    /// Terms whose sums list their subscripts in non-increasing order: the
    /// image of `array_to_term`.
    fn term() -> impl Strategy<Value = Term> {
        Just(Term::Zero).prop_recursive(5, 48, 4, |inner| {
            prop::collection::vec((0..6 as Nat, inner), 1..4).prop_map(|mut parts| {
                parts.sort_by(|(a, _), (b, _)| b.cmp(a));
                Term::from_principals(
                    parts
                        .into_iter()
                        .map(|(sub, arg)| Principal::new(sub, arg))
                        .collect(),
                )
            })
        })
    }

    #[test]
    fn test_term_to_array() {
        assert_eq!(term_to_array(&Term::Zero).unwrap(), Vec::<Nat>::new());
        assert_eq!(term_to_array(&Principal::one().into()).unwrap(), vec![0]);
        assert_eq!(term_to_array(&Principal::omega().into()).unwrap(), vec![0, 1]);
        assert_eq!(term_to_array(&Principal::big_omega().into()).unwrap(), vec![1]);
        // ψ_0(ψ_1(ψ_4(0)+ψ_1(1))+ψ_1(1))
        let t = psi(
            0,
            psi(1, psi(4, Term::Zero) + psi(1, Principal::one().into()))
                + psi(1, Principal::one().into()),
        );
        assert_eq!(term_to_array(&t).unwrap(), vec![0, 2, 7, 4, 5, 2, 3]);
        assert_eq!(
            term_to_array(&(psi(1, Term::Zero) + psi(5, Term::Zero))).unwrap(),
            vec![1, 5]
        );
    }

    #[test]
    fn test_array_to_term() {
        assert_eq!(array_to_term(&[]).unwrap(), Term::Zero);
        assert_eq!(array_to_term(&[3]).unwrap(), psi(3, Term::Zero));
        assert_eq!(
            array_to_term(&[0, 2, 7, 4, 5, 2, 3]).unwrap(),
            psi(
                0,
                psi(1, psi(4, Term::Zero) + psi(1, Principal::one().into()))
                    + psi(1, Principal::one().into()),
            )
        );
    }

    #[test]
    fn test_split_points() {
        // equal values never nest
        assert_eq!(array_to_term(&[0, 0, 0]).unwrap(), Term::numeral(3));
        // a smaller value closes everything before it
        assert_eq!(
            array_to_term(&[2, 0]).unwrap(),
            psi(2, Term::Zero) + psi(0, Term::Zero)
        );
        // the parent is the nearest smaller value, not the smallest one
        assert_eq!(
            array_to_term(&[0, 1, 3, 2]).unwrap(),
            psi(0, psi(0, psi(1, Term::Zero) + psi(0, Term::Zero)))
        );
        // a larger value after a smaller one always nests
        assert_eq!(
            array_to_term(&[1, 5]).unwrap(),
            psi(1, psi(3, Term::Zero))
        );
    }

    #[test]
    fn test_largest_values() {
        let max = psi(Nat::MAX, Term::Zero);
        assert_eq!(term_to_array(&max).unwrap(), vec![Nat::MAX]);
        assert_eq!(array_to_term(&[Nat::MAX]).unwrap(), max);
        assert_eq!(
            array_to_term(&[Nat::MAX, Nat::MAX]).unwrap(),
            max.clone() + max
        );
        assert_eq!(
            array_to_term(&[0, Nat::MAX]).unwrap(),
            psi(0, psi(Nat::MAX - 1, Term::Zero))
        );
        assert_eq!(
            term_to_array(&psi(0, psi(Nat::MAX - 1, Term::Zero))).unwrap(),
            vec![0, Nat::MAX]
        );
    }

    #[test]
    fn test_overflowing_offsets() {
        assert_eq!(
            term_to_array(&psi(Nat::MAX, Principal::one().into())),
            Err(Error::ArrayValueOverflow { index: 1 })
        );
        assert_eq!(
            term_to_array(&psi(1, psi(Nat::MAX - 1, Term::Zero))),
            Err(Error::ArrayValueOverflow { index: 1 })
        );
        let big = 10_000_000_000_000_000_000;
        let t = Term::from(Principal::one()) + psi(0, psi(big, psi(big, Term::Zero)));
        assert_eq!(
            term_to_array(&t),
            Err(Error::ArrayValueOverflow { index: 3 })
        );
    }

    #[test]
    fn test_long_inputs() {
        let seq: Vec<Nat> = (0..100_000).collect();
        let term = array_to_term(&seq).unwrap();
        assert_eq!(term_to_array(&term).unwrap(), seq);
        let flat = vec![7; 100_000];
        assert_eq!(term_to_array(&array_to_term(&flat).unwrap()).unwrap(), flat);
        let sawtooth: Vec<Nat> = (0..300_000).map(|i| i % 1000).collect();
        assert_eq!(term_to_array(&array_to_term(&sawtooth).unwrap()).unwrap(), sawtooth);
    }

    proptest! {
        #[test]
        fn term_array_term(t in term()) {
            prop_assert_eq!(array_to_term(&term_to_array(&t).unwrap()).unwrap(), t);
        }

        #[test]
        fn array_term_array(seq in prop::collection::vec(0..10 as Nat, 0..32)) {
            let t = array_to_term(&seq).unwrap();
            prop_assert_eq!(term_to_array(&t).unwrap(), seq);
        }

        #[test]
        fn decoded_sums_are_normalized(seq in prop::collection::vec(0..4 as Nat, 0..24)) {
            fn check(t: &Term) -> bool {
                match t {
                    Term::Zero => true,
                    Term::Apply(p) => check(p.arg()),
                    Term::Sum(sum) => {
                        sum.parts().len() >= 2 && sum.parts().iter().all(|p| check(p.arg()))
                    }
                }
            }
            prop_assert!(check(&array_to_term(&seq).unwrap()));
        }
    }
}
