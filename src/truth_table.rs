//! Truth tables over a [`VariableDomain`].
//!
//! A table stores one output bit per input assignment, `2ⁿ` bits in total.
//! Row `i` assigns input `j` the value `(i >> (n-1-j)) & 1`, so the first input is the most
//! significant bit and rows appear in the usual top-down order (`00`, `01`, `10`, `11`).

use std::fmt;

use bitvec::prelude::*;

use crate::domain::VariableDomain;
use crate::error::{Error, Result};
use crate::expr::{Expr, ExprLayer, Op};

/// Hard limit on the number of inputs a table can be built for.
pub const MAX_INPUTS: u32 = 24;

type Bits = BitVec<u64, Lsb0>;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TruthTable {
    n: u32,
    bits: Bits,
}

impl TruthTable {
    /// Evaluate `expr` on every assignment of `domain`.
    ///
    /// Columns are computed bottom-up, one bit vector per node, so each node is visited once
    /// regardless of the number of rows.
    pub fn build(domain: &VariableDomain, expr: &Expr) -> Result<Self> {
        let n = domain.num_inputs();
        if n > MAX_INPUTS as usize {
            return Err(Error::DomainTooLarge {
                inputs: n,
                rows: domain.row_count().to_string(),
                max: MAX_INPUTS,
            });
        }
        domain.check(expr)?;

        let size = 1usize << n;
        let bits = expr.fold(&mut |layer: ExprLayer<'_, Bits>| match layer {
            ExprLayer::Var(name) => {
                // `check` guarantees every variable has an index.
                let j = domain.input_index(name).unwrap_or_default();
                column(n, j)
            }
            ExprLayer::Const(value) => BitVec::repeat(value, size),
            ExprLayer::Not(a) => !a,
            ExprLayer::Binary(op, a, b) => match op {
                Op::And => a & b,
                Op::Or => a | b,
                Op::Xor => a ^ b,
                Op::Xnor => !(a ^ b),
            },
        });

        Ok(TruthTable { n: n as u32, bits })
    }

    pub fn num_inputs(&self) -> u32 {
        self.n
    }

    /// Number of rows (`2ⁿ`).
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Output at row `row`, or `None` when out of range.
    pub fn get(&self, row: usize) -> Option<bool> {
        self.bits.get(row).map(|bit| *bit)
    }

    /// Number of satisfying rows.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().by_vals()
    }

    /// Input values of row `row`, in domain order.
    pub fn assignment(&self, row: usize) -> Vec<bool> {
        let n = self.n as usize;
        (0..n).map(|j| (row >> (n - 1 - j)) & 1 == 1).collect()
    }

    /// Rows on which `self` and `other` disagree.
    pub fn differences<'a>(&'a self, other: &'a TruthTable) -> impl Iterator<Item = usize> + 'a {
        self.iter()
            .zip(other.iter())
            .enumerate()
            .filter_map(|(row, (a, b))| (a != b).then_some(row))
    }
}

/// Projection column of input `j` among `n`.
fn column(n: usize, j: usize) -> Bits {
    let shift = n - 1 - j;
    (0..1usize << n).map(|i| (i >> shift) & 1 == 1).collect()
}

impl fmt::Debug for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TruthTable({}, {})", self.n, self)
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits.iter() {
            write!(f, "{}", if *bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn domain(names: &[&str]) -> VariableDomain {
        VariableDomain::from_inputs(names.iter().copied()).unwrap()
    }

    #[test]
    fn test_row_order_first_input_is_msb() {
        let d = domain(&["a", "b"]);
        let a = TruthTable::build(&d, &Expr::var("a")).unwrap();
        let b = TruthTable::build(&d, &Expr::var("b")).unwrap();
        assert_eq!(a.to_string(), "0011");
        assert_eq!(b.to_string(), "0101");
        assert_eq!(a.assignment(2), vec![true, false]);
    }

    #[test]
    fn test_connectives() {
        let d = domain(&["a", "b"]);
        let table = |e: Expr| TruthTable::build(&d, &e).unwrap().to_string();
        assert_eq!(table(Expr::and(Expr::var("a"), Expr::var("b"))), "0001");
        assert_eq!(table(Expr::or(Expr::var("a"), Expr::var("b"))), "0111");
        assert_eq!(table(Expr::xor(Expr::var("a"), Expr::var("b"))), "0110");
        assert_eq!(table(Expr::xnor(Expr::var("a"), Expr::var("b"))), "1001");
        assert_eq!(table(Expr::not(Expr::var("a"))), "1100");
        assert_eq!(table(Expr::one()), "1111");
        assert_eq!(table(Expr::zero()), "0000");
    }

    #[test]
    fn test_matches_eval() {
        let d = domain(&["a", "b", "c"]);
        let e = Expr::or(
            Expr::and(Expr::var("a"), Expr::not(Expr::var("c"))),
            Expr::xnor(Expr::var("b"), Expr::var("c")),
        );
        let t = TruthTable::build(&d, &e).unwrap();
        assert_eq!(t.len(), 8);
        assert_eq!(t.num_inputs(), 3);
        for row in 0..t.len() {
            let values = t.assignment(row);
            let expected = e.eval(|name| values[d.input_index(name).unwrap()]);
            assert_eq!(t.get(row), Some(expected), "row {}", row);
        }
        assert_eq!(t.get(8), None);
        assert_eq!(t.count_ones(), t.iter().filter(|&b| b).count());
    }

    #[test]
    fn test_unused_inputs_widen_the_table() {
        let d = domain(&["a", "b", "c"]);
        let t = TruthTable::build(&d, &Expr::var("b")).unwrap();
        assert_eq!(t.to_string(), "00110011");
    }

    #[test]
    fn test_empty_domain() {
        let d = domain(&[]);
        let t = TruthTable::build(&d, &Expr::one()).unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(t.to_string(), "1");
    }

    #[test]
    fn test_differences() {
        let d = domain(&["a", "b"]);
        let or = TruthTable::build(&d, &Expr::or(Expr::var("a"), Expr::var("b"))).unwrap();
        let xor = TruthTable::build(&d, &Expr::xor(Expr::var("a"), Expr::var("b"))).unwrap();
        assert_eq!(or.differences(&xor).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_errors() {
        let d = domain(&["a"]);
        assert_eq!(
            TruthTable::build(&d, &Expr::var("q")),
            Err(Error::UnknownVariable("q".to_string()))
        );

        let names: Vec<String> = (0..=MAX_INPUTS).map(|i| format!("x{}", i)).collect();
        let d = VariableDomain::from_inputs(names).unwrap();
        assert!(matches!(
            TruthTable::build(&d, &Expr::var("x0")),
            Err(Error::DomainTooLarge { inputs: 25, .. })
        ));
    }
}
