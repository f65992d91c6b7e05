//! Flattened views of same-operator runs.
//!
//! Every node of a tree is addressed by its pre-order index, a [`NodeId`]. The id of a child
//! is derived from its parent's id and the size of the left sibling, so the match finder and
//! the rebuilder agree on ids without storing them in the tree. Sizes come from a
//! [`SubtreeSizes`] table filled once per traversal.

use std::fmt;
use std::sync::Arc;

use crate::expr::{Expr, Op};

/// Pre-order position of a node within the tree being simplified.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }

    /// Id of the operand of a NOT node, or of the left child of a binary node.
    pub fn first_child(self) -> NodeId {
        NodeId(self.0 + 1)
    }

    /// Id of the right child of a binary node.
    pub fn second_child(self, sizes: &SubtreeSizes) -> NodeId {
        let first = self.first_child();
        NodeId(first.0 + sizes.get(first))
    }

    /// Ids occupied by the subtree rooted here.
    pub fn span(self, sizes: &SubtreeSizes) -> std::ops::Range<NodeId> {
        self..NodeId(self.0 + sizes.get(self))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Node counts of every subtree of one tree, indexed by pre-order id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtreeSizes(Vec<usize>);

impl SubtreeSizes {
    pub fn of(root: &Expr) -> Self {
        let mut sizes = Vec::new();
        fill(root, &mut sizes);
        SubtreeSizes(sizes)
    }

    /// Size of the subtree at `id`, or 0 past the end of the tree.
    pub fn get(&self, id: NodeId) -> usize {
        self.0.get(id.0).copied().unwrap_or_default()
    }
}

fn fill(node: &Expr, out: &mut Vec<usize>) -> usize {
    let slot = out.len();
    out.push(0);
    let size = 1 + match node {
        Expr::Var(_) | Expr::Const(_) => 0,
        Expr::Not(inner) => fill(inner, out),
        Expr::Binary(_, left, right) => fill(left, out) + fill(right, out),
    };
    out[slot] = size;
    size
}

/// An operand together with the slot it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolEntry {
    pub slot: NodeId,
    pub value: Arc<Expr>,
}

/// A maximal run of one binary connective, flattened into its operands.
///
/// `a+(b+c)+d` is one OR chain with operands `[a, b, c, d]`, in left-to-right order, whatever
/// the nesting. Operands are never themselves nodes of the chain's connective.
#[derive(Debug, Clone)]
pub struct Chain {
    pub root: PoolEntry,
    pub op: Op,
    pub operands: Vec<PoolEntry>,
}

impl Chain {
    /// Flatten the chain rooted at `node`, or `None` if `node` is not binary.
    ///
    /// `sizes` must be the table of the tree `id` is taken from.
    pub fn collect(id: NodeId, node: &Arc<Expr>, sizes: &SubtreeSizes) -> Option<Chain> {
        let (op, left, right) = node.as_binary()?;
        let mut operands = Vec::new();
        gather(op, id.first_child(), left, sizes, &mut operands);
        gather(op, id.second_child(sizes), right, sizes, &mut operands);
        Some(Chain {
            root: PoolEntry {
                slot: id,
                value: node.clone(),
            },
            op,
            operands,
        })
    }
}

fn gather(op: Op, id: NodeId, node: &Arc<Expr>, sizes: &SubtreeSizes, out: &mut Vec<PoolEntry>) {
    match node.as_binary() {
        Some((inner, left, right)) if inner == op => {
            gather(op, id.first_child(), left, sizes, out);
            gather(op, id.second_child(sizes), right, sizes, out);
        }
        _ => out.push(PoolEntry {
            slot: id,
            value: node.clone(),
        }),
    }
}
