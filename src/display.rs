//! Textual rendering of expressions.
//!
//! Three notations are supported:
//!
//! | Notation | NOT | AND | OR | XOR | XNOR |
//! |----------|-----|-----|----|-----|------|
//! | [`Notation::Mathematical`] | `~a` | `a⋅b` | `a+b` | `a⊕b` | `a⊙b` |
//! | [`Notation::Logical`] | `¬a` | `a ∧ b` | `a ∨ b` | `a ⊕ b` | `a ↔ b` |
//! | [`Notation::Programming`] | `!a` | `a && b` | `a \|\| b` | `a ^ b` | `a == b` |
//!
//! Precedence is NOT > AND > XOR/XNOR > OR in every notation. A child is parenthesized when it
//! binds looser than its parent, or equally tight under a different connective. Runs of the same
//! connective are printed flat, since they are associative.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::expr::{Expr, Op};

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Notation {
    #[default]
    Mathematical,
    Logical,
    Programming,
}

impl Notation {
    pub const ALL: [Notation; 3] = [Notation::Mathematical, Notation::Logical, Notation::Programming];

    pub fn not_symbol(self) -> &'static str {
        match self {
            Notation::Mathematical => "~",
            Notation::Logical => "¬",
            Notation::Programming => "!",
        }
    }

    pub fn op_symbol(self, op: Op) -> &'static str {
        match (self, op) {
            (Notation::Mathematical, Op::And) => "⋅",
            (Notation::Mathematical, Op::Or) => "+",
            (Notation::Mathematical, Op::Xor) => "⊕",
            (Notation::Mathematical, Op::Xnor) => "⊙",
            (Notation::Logical, Op::And) => " ∧ ",
            (Notation::Logical, Op::Or) => " ∨ ",
            (Notation::Logical, Op::Xor) => " ⊕ ",
            (Notation::Logical, Op::Xnor) => " ↔ ",
            (Notation::Programming, Op::And) => " && ",
            (Notation::Programming, Op::Or) => " || ",
            (Notation::Programming, Op::Xor) => " ^ ",
            (Notation::Programming, Op::Xnor) => " == ",
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Notation::Mathematical => "mathematical",
            Notation::Logical => "logical",
            Notation::Programming => "programming",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Notation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Notation::ALL
            .into_iter()
            .find(|n| n.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownName {
                kind: "notation",
                name: s.to_string(),
            })
    }
}

/// Binding strength of a connective (higher binds tighter).
pub(crate) fn precedence(op: Op) -> u8 {
    match op {
        Op::Or => 1,
        Op::Xor | Op::Xnor => 2,
        Op::And => 3,
    }
}

fn needs_parens(parent: Op, child: &Expr) -> bool {
    match child.op() {
        Some(op) => precedence(op) < precedence(parent) || (precedence(op) == precedence(parent) && op != parent),
        None => false,
    }
}

/// Adapter returned by [`Expr::display`].
pub struct ExprDisplay<'a> {
    expr: &'a Expr,
    notation: Notation,
}

impl Expr {
    /// Render in the given notation.
    pub fn display(&self, notation: Notation) -> ExprDisplay<'_> {
        ExprDisplay { expr: self, notation }
    }

    pub fn to_string_with(&self, notation: Notation) -> String {
        self.display(notation).to_string()
    }
}

impl ExprDisplay<'_> {
    fn write(&self, f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
        match expr {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(value) => write!(f, "{}", u8::from(*value)),
            Expr::Not(a) => {
                write!(f, "{}", self.notation.not_symbol())?;
                if a.op().is_some() {
                    write!(f, "(")?;
                    self.write(f, a)?;
                    write!(f, ")")
                } else {
                    self.write(f, a)
                }
            }
            Expr::Binary(op, a, b) => {
                self.write_operand(f, *op, a)?;
                write!(f, "{}", self.notation.op_symbol(*op))?;
                self.write_operand(f, *op, b)
            }
        }
    }

    fn write_operand(&self, f: &mut fmt::Formatter<'_>, parent: Op, child: &Expr) -> fmt::Result {
        if needs_parens(parent, child) {
            write!(f, "(")?;
            self.write(f, child)?;
            write!(f, ")")
        } else {
            self.write(f, child)
        }
    }
}

impl fmt::Display for ExprDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, self.expr)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display(Notation::Mathematical), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn v(name: &str) -> Expr {
        Expr::var(name)
    }

    #[test]
    fn test_mathematical_precedence() {
        let e = Expr::or(Expr::and(Expr::not(v("b")), v("a")), Expr::and(v("b"), Expr::not(v("a"))));
        assert_eq!(e.to_string(), "~b⋅a+b⋅~a");

        let e = Expr::and(v("d"), Expr::or(v("a"), Expr::and(v("b"), v("c"))));
        assert_eq!(e.to_string(), "d⋅(a+b⋅c)");

        let e = Expr::not(Expr::and(v("b"), v("a")));
        assert_eq!(e.to_string(), "~(b⋅a)");
    }

    #[test]
    fn test_same_connective_is_flat() {
        let left = Expr::or(Expr::or(v("a"), v("b")), v("c"));
        let right = Expr::or(v("a"), Expr::or(v("b"), v("c")));
        assert_eq!(left.to_string(), "a+b+c");
        assert_eq!(right.to_string(), "a+b+c");
    }

    #[test]
    fn test_xor_and_xnor_do_not_mix_silently() {
        let e = Expr::xor(Expr::xnor(v("a"), v("b")), v("c"));
        assert_eq!(e.to_string(), "(a⊙b)⊕c");
        let e = Expr::and(Expr::xor(v("a"), v("b")), v("c"));
        assert_eq!(e.to_string(), "(a⊕b)⋅c");
        let e = Expr::or(Expr::xor(v("a"), v("b")), v("c"));
        assert_eq!(e.to_string(), "a⊕b+c");
    }

    #[test]
    fn test_constants_and_double_negation() {
        assert_eq!(Expr::one().to_string(), "1");
        assert_eq!(Expr::zero().to_string(), "0");
        assert_eq!(Expr::not(Expr::not(v("a"))).to_string(), "~~a");
    }

    #[test]
    fn test_other_notations() {
        let e = Expr::or(Expr::and(v("a"), Expr::not(v("b"))), Expr::xnor(v("c"), v("d")));
        assert_eq!(e.to_string_with(Notation::Logical), "a ∧ ¬b ∨ c ↔ d");
        assert_eq!(e.to_string_with(Notation::Programming), "a && !b || c == d");
    }

    #[test]
    fn test_notation_from_str() {
        assert_eq!("Logical".parse::<Notation>().unwrap(), Notation::Logical);
        assert_eq!(" programming ".parse::<Notation>().unwrap(), Notation::Programming);
        assert!("latex".parse::<Notation>().is_err());
    }
}
