//! Immutable Boolean expression trees.
//!
//! An [`Expr`] is a persistent tree: children are held behind [`Arc`], so a rewrite builds a new
//! root that shares every untouched subtree with the original instead of copying it.
//!
//! Traversal goes through [`Expr::fold`], a bottom-up fold that collapses one [`ExprLayer`] at a
//! time, so every consumer handles each variant exhaustively.

use std::collections::BTreeSet;
use std::ops::{BitAnd, BitOr, BitXor, Not};
use std::sync::Arc;

/// Binary connectives.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Op {
    And,
    Or,
    Xor,
    Xnor,
}

impl Op {
    pub const ALL: [Op; 4] = [Op::And, Op::Or, Op::Xor, Op::Xnor];

    /// The dual connective (AND ↔ OR), if any.
    pub fn dual(self) -> Option<Op> {
        match self {
            Op::And => Some(Op::Or),
            Op::Or => Some(Op::And),
            Op::Xor | Op::Xnor => None,
        }
    }

    /// Whether this is one of the lattice connectives (AND, OR).
    pub fn is_lattice(self) -> bool {
        matches!(self, Op::And | Op::Or)
    }

    /// Neutral element: `x op e = x`.
    pub fn identity(self) -> bool {
        match self {
            Op::And | Op::Xnor => true,
            Op::Or | Op::Xor => false,
        }
    }

    /// Absorbing element: `x op z = z`.
    pub fn annihilator(self) -> Option<bool> {
        match self {
            Op::And => Some(false),
            Op::Or => Some(true),
            Op::Xor | Op::Xnor => None,
        }
    }

    /// Value of `x op ¬x`.
    pub fn complement_value(self) -> bool {
        match self {
            Op::And | Op::Xnor => false,
            Op::Or | Op::Xor => true,
        }
    }

    pub fn apply(self, a: bool, b: bool) -> bool {
        match self {
            Op::And => a && b,
            Op::Or => a || b,
            Op::Xor => a ^ b,
            Op::Xnor => a == b,
        }
    }
}

/// A Boolean expression tree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Expr {
    /// Named input
    Var(Arc<str>),
    /// Constant 0 or 1
    Const(bool),
    /// Negation
    Not(Arc<Expr>),
    /// Binary connective
    Binary(Op, Arc<Expr>, Arc<Expr>),
}

/// One layer of an expression, with the children already folded into `R`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprLayer<'a, R> {
    Var(&'a str),
    Const(bool),
    Not(R),
    Binary(Op, R, R),
}

impl<'a, A> ExprLayer<'a, A> {
    pub fn fmap<B, F>(self, mut f: F) -> ExprLayer<'a, B>
    where
        F: FnMut(A) -> B,
    {
        match self {
            ExprLayer::Var(name) => ExprLayer::Var(name),
            ExprLayer::Const(value) => ExprLayer::Const(value),
            ExprLayer::Not(a) => ExprLayer::Not(f(a)),
            ExprLayer::Binary(op, a, b) => ExprLayer::Binary(op, f(a), f(b)),
        }
    }
}

impl Expr {
    pub fn var(name: impl AsRef<str>) -> Self {
        Expr::Var(Arc::from(name.as_ref()))
    }

    pub fn constant(value: bool) -> Self {
        Expr::Const(value)
    }

    pub fn zero() -> Self {
        Expr::Const(false)
    }

    pub fn one() -> Self {
        Expr::Const(true)
    }

    pub fn not(value: impl Into<Arc<Expr>>) -> Self {
        Expr::Not(value.into())
    }

    pub fn binary(op: Op, lhs: impl Into<Arc<Expr>>, rhs: impl Into<Arc<Expr>>) -> Self {
        Expr::Binary(op, lhs.into(), rhs.into())
    }

    pub fn and(lhs: impl Into<Arc<Expr>>, rhs: impl Into<Arc<Expr>>) -> Self {
        Expr::binary(Op::And, lhs, rhs)
    }

    pub fn or(lhs: impl Into<Arc<Expr>>, rhs: impl Into<Arc<Expr>>) -> Self {
        Expr::binary(Op::Or, lhs, rhs)
    }

    pub fn xor(lhs: impl Into<Arc<Expr>>, rhs: impl Into<Arc<Expr>>) -> Self {
        Expr::binary(Op::Xor, lhs, rhs)
    }

    pub fn xnor(lhs: impl Into<Arc<Expr>>, rhs: impl Into<Arc<Expr>>) -> Self {
        Expr::binary(Op::Xnor, lhs, rhs)
    }

    /// Left-nested chain `((e1 op e2) op e3) ...`, or `None` for an empty input.
    pub fn chain<I>(op: Op, operands: I) -> Option<Self>
    where
        I: IntoIterator<Item = Expr>,
    {
        operands.into_iter().reduce(|acc, e| Expr::binary(op, acc, e))
    }
}

impl Expr {
    /// Connective of a binary node.
    pub fn op(&self) -> Option<Op> {
        match self {
            Expr::Binary(op, _, _) => Some(*op),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<(Op, &Arc<Expr>, &Arc<Expr>)> {
        match self {
            Expr::Binary(op, a, b) => Some((*op, a, b)),
            _ => None,
        }
    }

    pub fn as_not(&self) -> Option<&Arc<Expr>> {
        match self {
            Expr::Not(a) => Some(a),
            _ => None,
        }
    }

    pub fn is_not(&self) -> bool {
        matches!(self, Expr::Not(_))
    }

    /// Whether this is exactly the constant `value`.
    pub fn is_const(&self, value: bool) -> bool {
        matches!(self, Expr::Const(v) if *v == value)
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Expr::Const(_))
    }
}

impl Expr {
    /// Bottom-up fold: `f` receives each node with its children already folded.
    pub fn fold<'a, R, F>(&'a self, f: &mut F) -> R
    where
        F: FnMut(ExprLayer<'a, R>) -> R,
    {
        let layer = self.layer().fmap(|child| child.fold(f));
        f(layer)
    }

    /// The top layer of this node, with children left unfolded.
    pub fn layer(&self) -> ExprLayer<'_, &Arc<Expr>> {
        match self {
            Expr::Var(name) => ExprLayer::Var(&**name),
            Expr::Const(value) => ExprLayer::Const(*value),
            Expr::Not(a) => ExprLayer::Not(a),
            Expr::Binary(op, a, b) => ExprLayer::Binary(*op, a, b),
        }
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.fold(&mut |layer: ExprLayer<'_, usize>| match layer {
            ExprLayer::Var(_) | ExprLayer::Const(_) => 1,
            ExprLayer::Not(a) => 1 + a,
            ExprLayer::Binary(_, a, b) => 1 + a + b,
        })
    }

    /// Depth of the tree (0 for leaves).
    pub fn depth(&self) -> usize {
        self.fold(&mut |layer: ExprLayer<'_, usize>| match layer {
            ExprLayer::Var(_) | ExprLayer::Const(_) => 0,
            ExprLayer::Not(a) => 1 + a,
            ExprLayer::Binary(_, a, b) => 1 + a.max(b),
        })
    }

    /// Names of all referenced variables, sorted.
    pub fn variables(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        self.fold(&mut |layer| {
            if let ExprLayer::Var(name) = layer {
                names.insert(name);
            }
        });
        names
    }

    /// Evaluate under an assignment given as a lookup function.
    pub fn eval<F>(&self, value_of: F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        self.fold(&mut |layer: ExprLayer<'_, bool>| match layer {
            ExprLayer::Var(name) => value_of(name),
            ExprLayer::Const(value) => value,
            ExprLayer::Not(a) => !a,
            ExprLayer::Binary(op, a, b) => op.apply(a, b),
        })
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Expr::Const(value)
    }
}

impl From<&str> for Expr {
    fn from(name: &str) -> Self {
        Expr::var(name)
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Self::Output {
        Expr::Not(Arc::new(self))
    }
}

impl BitAnd for Expr {
    type Output = Expr;

    fn bitand(self, rhs: Self) -> Self::Output {
        Expr::and(self, rhs)
    }
}

impl BitOr for Expr {
    type Output = Expr;

    fn bitor(self, rhs: Self) -> Self::Output {
        Expr::or(self, rhs)
    }
}

impl BitXor for Expr {
    type Output = Expr;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Expr::xor(self, rhs)
    }
}
