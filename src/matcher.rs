//! Locating one application of a law.
//!
//! The match finder walks the tree in pre-order. At every binary node it flattens the maximal
//! chain of that connective (see [`Chain`]) and, for each operand `k` in left-to-right order:
//!
//! 1. probes the law against operand `k` alone (NULL),
//! 2. probes every pair `(j, k)` with `j < k`, for `j` ascending,
//! 3. descends into operand `k`.
//!
//! A NOT node is probed for DEMORGANS before its operand is visited. The first successful probe
//! ends the search, so at most one substitution is produced per call.
//!
//! Equality of operands is decided by an [`Equivalence`] oracle, never structurally, so `a+b`
//! and `b+a` are the same operand.

use std::sync::Arc;

use log::{debug, trace};

use crate::chain::{Chain, NodeId, PoolEntry, SubtreeSizes};
use crate::error::Result;
use crate::expr::{Expr, Op};
use crate::law::Law;
use crate::oracle::Equivalence;
use crate::rebuild::SubstitutionMap;

pub struct MatchFinder<'o, O> {
    oracle: &'o mut O,
    law: Law,
}

impl<'o, O: Equivalence> MatchFinder<'o, O> {
    pub fn new(oracle: &'o mut O, law: Law) -> Self {
        Self { oracle, law }
    }

    /// Find the first application of the law in `expr`.
    pub fn find(&mut self, expr: &Expr) -> Result<Option<SubstitutionMap>> {
        if self.law.is_structural() {
            return Ok(None);
        }
        let root = Arc::new(expr.clone());
        let sizes = SubtreeSizes::of(expr);
        self.visit(NodeId::ROOT, &root, &sizes)
    }

    fn visit(&mut self, id: NodeId, node: &Arc<Expr>, sizes: &SubtreeSizes) -> Result<Option<SubstitutionMap>> {
        match &**node {
            Expr::Var(_) | Expr::Const(_) => Ok(None),
            Expr::Not(inner) => {
                if let Some(found) = self.probe_not(id, node, inner) {
                    return Ok(Some(found));
                }
                self.visit(id.first_child(), inner, sizes)
            }
            Expr::Binary(..) => {
                let Some(chain) = Chain::collect(id, node, sizes) else {
                    return Ok(None);
                };
                for k in 0..chain.operands.len() {
                    if let Some(found) = self.probe(&chain, k)? {
                        return Ok(Some(found));
                    }
                    let operand = &chain.operands[k];
                    if let Some(found) = self.visit(operand.slot, &operand.value, sizes)? {
                        return Ok(Some(found));
                    }
                }
                Ok(None)
            }
        }
    }

    fn probe(&mut self, chain: &Chain, k: usize) -> Result<Option<SubstitutionMap>> {
        let cur = &chain.operands[k];
        if self.law == Law::Null {
            return Ok(self.null(chain, cur));
        }
        for ex in &chain.operands[..k] {
            trace!("{}: probing {} against {} in {:?} chain", self.law, ex.value, cur.value, chain.op);
            let found = match self.law {
                Law::Identity => self.identity(chain.op, ex, cur),
                Law::Idempotent => self.idempotent(chain.op, ex, cur)?,
                Law::Inverse => self.inverse(chain.op, ex, cur)?,
                Law::Distributive => self.distributive(chain.op, ex, cur)?,
                Law::InverseDistributive => self.inverse_distributive(chain.op, ex, cur)?,
                Law::Absorption => self.absorption(chain.op, ex, cur)?,
                Law::InverseDeMorgans => self.inverse_demorgans(chain.op, ex, cur),
                Law::Xor => self.xor(chain.op, ex, cur)?,
                Law::InverseXor => self.inverse_xor(chain.op, ex, cur),
                Law::Null | Law::DeMorgans | Law::Commutative | Law::Associative => None,
            };
            if let Some(found) = found {
                debug!("{} applies to {} and {} at {}", self.law, ex.value, cur.value, chain.root.slot);
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    fn eq(&mut self, a: &Expr, b: &Expr) -> Result<bool> {
        self.oracle.equivalent(a, b)
    }

    /// Whether `a` is equivalent to the negation of `b`.
    fn eq_not(&mut self, a: &Expr, b: &Arc<Expr>) -> Result<bool> {
        let negated = Expr::Not(b.clone());
        self.oracle.equivalent(a, &negated)
    }

    /// `x⋅1 = x`, `x+0 = x`, `x⊕0 = x`, `x⊙1 = x`
    fn identity(&mut self, op: Op, ex: &PoolEntry, cur: &PoolEntry) -> Option<SubstitutionMap> {
        let e = op.identity();
        let drop = if ex.value.is_const(e) && !cur.value.is_constant() {
            ex
        } else if cur.value.is_const(e) && !ex.value.is_constant() {
            cur
        } else {
            return None;
        };
        let mut map = SubstitutionMap::new();
        map.remove(drop.slot, drop.value.clone());
        Some(map)
    }

    /// `x⋅0 = 0`, `x+1 = 1`
    fn null(&mut self, chain: &Chain, cur: &PoolEntry) -> Option<SubstitutionMap> {
        let z = chain.op.annihilator()?;
        if !cur.value.is_const(z) {
            return None;
        }
        debug!("{} applies to {} at {}", self.law, cur.value, chain.root.slot);
        let mut map = SubstitutionMap::new();
        map.replace(chain.root.slot, chain.root.value.clone(), Expr::constant(z));
        Some(map)
    }

    /// `x⋅x = x`, `x+x = x`
    fn idempotent(&mut self, op: Op, ex: &PoolEntry, cur: &PoolEntry) -> Result<Option<SubstitutionMap>> {
        if !op.is_lattice() || !self.eq(&ex.value, &cur.value)? {
            return Ok(None);
        }
        let mut map = SubstitutionMap::new();
        map.remove(cur.slot, cur.value.clone());
        Ok(Some(map))
    }

    /// `x⋅~x = 0`, `x+~x = 1`, `x⊕~x = 1`, `x⊙~x = 0`
    fn inverse(&mut self, op: Op, ex: &PoolEntry, cur: &PoolEntry) -> Result<Option<SubstitutionMap>> {
        if !self.eq_not(&ex.value, &cur.value)? {
            return Ok(None);
        }
        let mut map = SubstitutionMap::new();
        map.remove(ex.slot, ex.value.clone())
            .replace(cur.slot, cur.value.clone(), Expr::constant(op.complement_value()));
        Ok(Some(map))
    }

    /// `x⋅(c0+c1) = x⋅c0+x⋅c1`, `x+c0⋅c1 = (x+c0)⋅(x+c1)`
    ///
    /// The later operand is tried as the distributed-over term first. Pairs where `x` already
    /// occurs in the inner term are left to ABSORPTION.
    fn distributive(&mut self, op: Op, ex: &PoolEntry, cur: &PoolEntry) -> Result<Option<SubstitutionMap>> {
        let Some(inner) = op.dual() else {
            return Ok(None);
        };
        for (x, y) in [(&ex.value, &cur.value), (&cur.value, &ex.value)] {
            let Some((y_op, c0, c1)) = y.as_binary() else {
                continue;
            };
            if y_op != inner || self.eq(c0, c1)? || self.eq(x, c0)? || self.eq(x, c1)? {
                continue;
            }
            let expansion = Expr::binary(
                inner,
                Expr::binary(op, x.clone(), c0.clone()),
                Expr::binary(op, x.clone(), c1.clone()),
            );
            let mut map = SubstitutionMap::new();
            map.replace(ex.slot, ex.value.clone(), expansion)
                .remove(cur.slot, cur.value.clone());
            return Ok(Some(map));
        }
        Ok(None)
    }

    /// `a⋅b+a⋅c = a⋅(b+c)`, `(a+b)⋅(a+c) = a+b⋅c`
    fn inverse_distributive(
        &mut self,
        op: Op,
        ex: &PoolEntry,
        cur: &PoolEntry,
    ) -> Result<Option<SubstitutionMap>> {
        let Some(inner) = op.dual() else {
            return Ok(None);
        };
        let (Some((ex_op, e0, e1)), Some((cur_op, c0, c1))) = (ex.value.as_binary(), cur.value.as_binary()) else {
            return Ok(None);
        };
        if ex_op != inner || cur_op != inner || self.eq(e0, e1)? || self.eq(c0, c1)? {
            return Ok(None);
        }

        // Find the one operand of `cur` shared with `ex`.
        let mut factored = None;
        for (shared, rest) in [(c0, c1), (c1, c0)] {
            let rest_shared = self.eq(rest, e0)? || self.eq(rest, e1)?;
            if rest_shared {
                continue;
            }
            if self.eq(shared, e0)? {
                factored = Some((shared, e1, rest));
                break;
            }
            if self.eq(shared, e1)? {
                factored = Some((shared, e0, rest));
                break;
            }
        }
        let Some((a, b, c)) = factored else {
            return Ok(None);
        };

        let factored = Expr::binary(inner, a.clone(), Expr::binary(op, b.clone(), c.clone()));
        let mut map = SubstitutionMap::new();
        map.remove(ex.slot, ex.value.clone())
            .replace(cur.slot, cur.value.clone(), factored);
        Ok(Some(map))
    }

    /// `x⋅(x+y) = x`, `x+x⋅y = x`
    fn absorption(&mut self, op: Op, ex: &PoolEntry, cur: &PoolEntry) -> Result<Option<SubstitutionMap>> {
        let Some(inner) = op.dual() else {
            return Ok(None);
        };

        if let Some((cur_op, c0, c1)) = cur.value.as_binary() {
            if cur_op == inner && (self.eq(&ex.value, c0)? || self.eq(&ex.value, c1)?) {
                let mut map = SubstitutionMap::new();
                map.remove(ex.slot, ex.value.clone())
                    .replace(cur.slot, cur.value.clone(), ex.value.clone());
                return Ok(Some(map));
            }
        }

        if let Some((ex_op, e0, e1)) = ex.value.as_binary() {
            if ex_op == inner && (self.eq(&cur.value, e0)? || self.eq(&cur.value, e1)?) {
                let mut map = SubstitutionMap::new();
                map.remove(ex.slot, ex.value.clone());
                return Ok(Some(map));
            }
        }

        Ok(None)
    }

    /// `~(a⋅b) = ~a+~b`, `~(a+b) = ~a⋅~b`
    fn probe_not(&mut self, id: NodeId, node: &Arc<Expr>, inner: &Arc<Expr>) -> Option<SubstitutionMap> {
        if self.law != Law::DeMorgans {
            return None;
        }
        let (op, a, b) = inner.as_binary()?;
        let dual = op.dual()?;
        debug!("{} applies to {} at {}", self.law, node, id);
        let mut map = SubstitutionMap::new();
        map.replace(
            id,
            node.clone(),
            Expr::binary(dual, Expr::Not(a.clone()), Expr::Not(b.clone())),
        );
        Some(map)
    }

    /// `~a+~b = ~(b⋅a)`, `~a⋅~b = ~(b+a)`
    fn inverse_demorgans(&mut self, op: Op, ex: &PoolEntry, cur: &PoolEntry) -> Option<SubstitutionMap> {
        let dual = op.dual()?;
        let p = ex.value.as_not()?;
        let q = cur.value.as_not()?;
        let mut map = SubstitutionMap::new();
        map.remove(ex.slot, ex.value.clone())
            .replace(cur.slot, cur.value.clone(), Expr::not(Expr::binary(dual, q.clone(), p.clone())));
        Some(map)
    }

    /// `~a⋅b+a⋅~b = a⊕b`, `(a+b)⋅(~a+~b) = a⊕b`
    fn xor(&mut self, op: Op, ex: &PoolEntry, cur: &PoolEntry) -> Result<Option<SubstitutionMap>> {
        let result = match op {
            Op::Or => self.xor_of_products(ex, cur)?,
            Op::And => self.xor_of_sums(ex, cur)?,
            Op::Xor | Op::Xnor => None,
        };
        Ok(result.map(|xor| {
            let mut map = SubstitutionMap::new();
            map.remove(ex.slot, ex.value.clone()).replace(cur.slot, cur.value.clone(), xor);
            map
        }))
    }

    fn xor_of_products(&mut self, ex: &PoolEntry, cur: &PoolEntry) -> Result<Option<Expr>> {
        let (Some((a_not, a_normal)), Some((b_not, b_normal))) = (split_product(&ex.value), split_product(&cur.value))
        else {
            return Ok(None);
        };
        if self.eq_not(a_not, b_normal)? && self.eq_not(b_not, a_normal)? {
            return Ok(Some(Expr::xor(b_normal.clone(), a_normal.clone())));
        }
        Ok(None)
    }

    fn xor_of_sums(&mut self, ex: &PoolEntry, cur: &PoolEntry) -> Result<Option<Expr>> {
        let (Some((Op::Or, a, b)), Some((Op::Or, c, d))) = (ex.value.as_binary(), cur.value.as_binary()) else {
            return Ok(None);
        };
        // One sum holds the negated literals and the other the plain ones.
        let (negated, plain) = if a.is_not() && b.is_not() && !c.is_not() && !d.is_not() {
            ((a, b), (c, d))
        } else if !a.is_not() && !b.is_not() && c.is_not() && d.is_not() {
            ((c, d), (a, b))
        } else {
            return Ok(None);
        };
        let ((n0, n1), (p0, p1)) = (negated, plain);
        let straight = self.eq_not(n0, p0)? && self.eq_not(n1, p1)?;
        if straight || (self.eq_not(n0, p1)? && self.eq_not(n1, p0)?) {
            return Ok(Some(Expr::xor(p0.clone(), p1.clone())));
        }
        Ok(None)
    }

    /// `a⊕b = ~b⋅a+b⋅~a`
    fn inverse_xor(&mut self, op: Op, ex: &PoolEntry, cur: &PoolEntry) -> Option<SubstitutionMap> {
        if op != Op::Xor {
            return None;
        }
        let x = &ex.value;
        let y = &cur.value;
        let expansion = Expr::or(
            Expr::and(Expr::Not(y.clone()), x.clone()),
            Expr::and(y.clone(), Expr::Not(x.clone())),
        );
        let mut map = SubstitutionMap::new();
        map.remove(ex.slot, ex.value.clone())
            .replace(cur.slot, cur.value.clone(), expansion);
        Some(map)
    }
}

/// Split an AND of exactly one negated and one plain operand into `(negated, plain)`.
fn split_product(e: &Expr) -> Option<(&Arc<Expr>, &Arc<Expr>)> {
    match e.as_binary()? {
        (Op::And, l, r) if l.is_not() && !r.is_not() => Some((l, r)),
        (Op::And, l, r) if r.is_not() && !l.is_not() => Some((r, l)),
        _ => None,
    }
}
