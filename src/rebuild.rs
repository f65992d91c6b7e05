//! Applying substitutions to a tree.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::trace;

use crate::chain::{NodeId, SubtreeSizes};
use crate::expr::Expr;

/// What happens to the node at a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substitution {
    /// The node is replaced by a new expression.
    Replace(Arc<Expr>),
    /// The operand is dropped from its chain; its binary parent collapses to the sibling.
    Remove,
}

/// Sparse set of substitutions keyed by slot.
///
/// Each entry also records the expression the match finder saw at that slot, and the rebuilder
/// asserts it finds the same one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionMap {
    entries: BTreeMap<NodeId, (Arc<Expr>, Substitution)>,
}

impl SubstitutionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, slot: NodeId, expected: Arc<Expr>, value: impl Into<Arc<Expr>>) -> &mut Self {
        self.entries.insert(slot, (expected, Substitution::Replace(value.into())));
        self
    }

    pub fn remove(&mut self, slot: NodeId, expected: Arc<Expr>) -> &mut Self {
        self.entries.insert(slot, (expected, Substitution::Remove));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, slot: NodeId) -> Option<&Substitution> {
        self.entries.get(&slot).map(|(_, s)| s)
    }

    fn touches(&self, span: std::ops::Range<NodeId>) -> bool {
        self.entries.range(span).next().is_some()
    }
}

/// Build the tree obtained from `expr` by applying every substitution in `map`.
///
/// Subtrees without substitutions are shared with `expr`, not copied.
///
/// # Panics
///
/// Panics if an entry does not name a node of `expr`, if the node found at a slot differs from
/// the recorded one, if the operand of a NOT is removed, or if the whole tree is removed.
/// Any of these means the map was not produced by a match over this same tree.
pub fn rebuild(expr: &Expr, mut map: SubstitutionMap) -> Expr {
    let root = Arc::new(expr.clone());
    let sizes = SubtreeSizes::of(expr);
    let result = match apply(NodeId::ROOT, &root, &sizes, &mut map) {
        Some(result) => result,
        None => panic!("substitutions removed the entire expression `{}`", expr),
    };
    assert!(
        map.is_empty(),
        "substitutions for slots {:?} do not address nodes of `{}`",
        map.entries.keys().collect::<Vec<_>>(),
        expr
    );
    Arc::try_unwrap(result).unwrap_or_else(|shared| (*shared).clone())
}

/// Rebuild the subtree `node` at slot `id`; `None` when it is removed.
fn apply(id: NodeId, node: &Arc<Expr>, sizes: &SubtreeSizes, map: &mut SubstitutionMap) -> Option<Arc<Expr>> {
    if let Some((expected, substitution)) = map.entries.remove(&id) {
        assert_eq!(
            *expected, **node,
            "slot {} was matched as `{}` but holds `{}`",
            id, expected, node
        );
        trace!("slot {}: {:?}", id, substitution);
        return match substitution {
            Substitution::Replace(value) => Some(value),
            Substitution::Remove => None,
        };
    }

    if !map.touches(id.span(sizes)) {
        return Some(node.clone());
    }

    match &**node {
        Expr::Var(_) | Expr::Const(_) => Some(node.clone()),
        Expr::Not(inner) => match apply(id.first_child(), inner, sizes, map) {
            Some(new) if Arc::ptr_eq(&new, inner) => Some(node.clone()),
            Some(new) => Some(Arc::new(Expr::Not(new))),
            None => panic!("operand of `{}` at slot {} cannot be removed", node, id),
        },
        Expr::Binary(op, left, right) => {
            let new_left = apply(id.first_child(), left, sizes, map);
            let new_right = apply(id.second_child(sizes), right, sizes, map);
            match (new_left, new_right) {
                (Some(l), Some(r)) if Arc::ptr_eq(&l, left) && Arc::ptr_eq(&r, right) => Some(node.clone()),
                (Some(l), Some(r)) => Some(Arc::new(Expr::Binary(*op, l, r))),
                (Some(survivor), None) | (None, Some(survivor)) => Some(survivor),
                (None, None) => None,
            }
        }
    }
}
