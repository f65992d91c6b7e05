//! Semantic equivalence of expressions.
//!
//! Laws are applied modulo semantics: two chain operands "match" when they denote the same
//! Boolean function over the domain, not when their trees are equal. The match finder only
//! depends on the [`Equivalence`] trait; [`TruthTableOracle`] is the exhaustive implementation.

use log::trace;

use crate::cache::Cache;
use crate::domain::VariableDomain;
use crate::error::{Error, Result};
use crate::expr::Expr;
use crate::truth_table::TruthTable;

/// Decides whether two expressions denote the same function.
pub trait Equivalence {
    fn equivalent(&mut self, a: &Expr, b: &Expr) -> Result<bool>;
}

/// Counters of a [`TruthTableOracle`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct OracleStats {
    /// Comparisons that had to look at truth tables.
    pub comparisons: usize,
    pub table_hits: usize,
    pub table_misses: usize,
    pub verdict_hits: usize,
    pub verdict_misses: usize,
}

/// Equivalence by exhaustive truth-table comparison over a [`VariableDomain`].
///
/// Truth tables are memoized per expression, and verdicts per unordered pair, for the lifetime
/// of the oracle. Structurally equal expressions are equivalent without building anything.
///
/// An optional budget bounds the number of table comparisons; once it is spent, further
/// comparisons fail with [`Error::ComparisonLimit`]. Cached verdicts stay free.
pub struct TruthTableOracle<'d> {
    domain: &'d VariableDomain,
    tables: Cache<Expr, TruthTable>,
    verdicts: Cache<(Expr, Expr), bool>,
    limit: Option<usize>,
    comparisons: usize,
}

impl<'d> TruthTableOracle<'d> {
    pub fn new(domain: &'d VariableDomain) -> Self {
        Self::with_limit(domain, None)
    }

    pub fn with_limit(domain: &'d VariableDomain, limit: Option<usize>) -> Self {
        Self {
            domain,
            tables: Cache::new(),
            verdicts: Cache::new(),
            limit,
            comparisons: 0,
        }
    }

    pub fn domain(&self) -> &'d VariableDomain {
        self.domain
    }

    /// Truth table of `expr`, built on first request.
    pub fn table(&mut self, expr: &Expr) -> Result<TruthTable> {
        if let Some(table) = self.tables.get(expr) {
            return Ok(table.clone());
        }
        let table = TruthTable::build(self.domain, expr)?;
        self.tables.insert(expr.clone(), table.clone());
        Ok(table)
    }

    /// Table comparisons made since creation or the last [`reset_budget`][Self::reset_budget].
    pub fn comparisons(&self) -> usize {
        self.comparisons
    }

    /// Start a fresh budget, keeping every memoized table and verdict.
    pub fn reset_budget(&mut self) {
        self.comparisons = 0;
    }

    pub fn stats(&self) -> OracleStats {
        OracleStats {
            comparisons: self.comparisons,
            table_hits: self.tables.hits(),
            table_misses: self.tables.misses(),
            verdict_hits: self.verdicts.hits(),
            verdict_misses: self.verdicts.misses(),
        }
    }
}

impl Equivalence for TruthTableOracle<'_> {
    fn equivalent(&mut self, a: &Expr, b: &Expr) -> Result<bool> {
        if a == b {
            return Ok(true);
        }

        let key = if a <= b { (a.clone(), b.clone()) } else { (b.clone(), a.clone()) };
        if let Some(&verdict) = self.verdicts.get(&key) {
            return Ok(verdict);
        }

        if let Some(limit) = self.limit {
            if self.comparisons >= limit {
                return Err(Error::ComparisonLimit(limit));
            }
        }
        self.comparisons += 1;

        let verdict = self.table(a)? == self.table(b)?;
        trace!("{} ≡ {}: {}", a, b, verdict);
        self.verdicts.insert(key, verdict);
        Ok(verdict)
    }
}

/// One-off equivalence check of `a` and `b` over `domain`.
pub fn equivalent(domain: &VariableDomain, a: &Expr, b: &Expr) -> Result<bool> {
    TruthTableOracle::new(domain).equivalent(a, b)
}
