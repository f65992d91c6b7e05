//! Single-step simplification.
//!
//! [`Simplifier::simplify`] applies one law once, [`Simplifier::possible_simplifications`]
//! collects one step per applicable law. Steps are never chained: picking among them is left to
//! the caller.

use std::fmt;

use log::debug;

use crate::config::SimplifierConfig;
use crate::display::Notation;
use crate::domain::VariableDomain;
use crate::error::{Error, Result};
use crate::expr::Expr;
use crate::law::Law;
use crate::matcher::MatchFinder;
use crate::oracle::{Equivalence, TruthTableOracle};
use crate::rebuild::rebuild;
use crate::truth_table::TruthTable;

/// One application of a law.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplificationStep {
    new_expression: Expr,
    old_expression: Expr,
    law: Law,
}

impl SimplificationStep {
    pub fn new_expression(&self) -> &Expr {
        &self.new_expression
    }

    pub fn old_expression(&self) -> &Expr {
        &self.old_expression
    }

    pub fn law(&self) -> Law {
        self.law
    }

    /// `LAW: expression`, with the new expression in `notation`.
    pub fn render(&self, notation: Notation) -> String {
        format!("{}: {}", self.law, self.new_expression.display(notation))
    }
}

impl fmt::Display for SimplificationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.law, self.new_expression)
    }
}

/// Truth tables of an expression and a proposed rewrite of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub equivalent: bool,
    pub original: TruthTable,
    pub candidate: TruthTable,
}

#[derive(Debug, Clone, Default)]
pub struct Simplifier {
    config: SimplifierConfig,
}

impl Simplifier {
    pub fn new(config: SimplifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimplifierConfig {
        &self.config
    }

    /// Apply `law` once to `expr`, or return `None` if it does not apply anywhere.
    pub fn simplify(&self, expr: &Expr, domain: &VariableDomain, law: Law) -> Result<Option<SimplificationStep>> {
        self.validate(domain, expr)?;
        let mut oracle = TruthTableOracle::with_limit(domain, self.config.max_comparisons);
        self.simplify_with(&mut oracle, expr, law)
    }

    /// Like [`simplify`][Self::simplify], deciding operand equality with `oracle`.
    pub fn simplify_with<O: Equivalence>(
        &self,
        oracle: &mut O,
        expr: &Expr,
        law: Law,
    ) -> Result<Option<SimplificationStep>> {
        let Some(substitutions) = MatchFinder::new(oracle, law).find(expr)? else {
            return Ok(None);
        };
        let new_expression = rebuild(expr, substitutions);
        debug!("{}: {} => {}", law, expr, new_expression);
        Ok(Some(SimplificationStep {
            new_expression,
            old_expression: expr.clone(),
            law,
        }))
    }

    /// One step for every law that applies to `expr`, in catalog order.
    ///
    /// Steps are not deduplicated: two laws yielding the same tree both appear.
    pub fn possible_simplifications(&self, expr: &Expr, domain: &VariableDomain) -> Result<Vec<SimplificationStep>> {
        self.validate(domain, expr)?;
        let mut oracle = TruthTableOracle::with_limit(domain, self.config.max_comparisons);
        let mut steps = Vec::new();
        for law in Law::ALL {
            oracle.reset_budget();
            if let Some(step) = self.simplify_with(&mut oracle, expr, law)? {
                steps.push(step);
            }
        }
        debug!("{} step(s) for {}, oracle: {:?}", steps.len(), expr, oracle.stats());
        Ok(steps)
    }

    /// Compare `candidate` against `original` over `domain`.
    pub fn compare(&self, domain: &VariableDomain, original: &Expr, candidate: &Expr) -> Result<Comparison> {
        self.validate(domain, original)?;
        self.validate(domain, candidate)?;
        let original = TruthTable::build(domain, original)?;
        let candidate = TruthTable::build(domain, candidate)?;
        Ok(Comparison {
            equivalent: original == candidate,
            original,
            candidate,
        })
    }

    fn validate(&self, domain: &VariableDomain, expr: &Expr) -> Result<()> {
        if domain.num_inputs() > self.config.max_inputs as usize {
            return Err(Error::DomainTooLarge {
                inputs: domain.num_inputs(),
                rows: domain.row_count().to_string(),
                max: self.config.max_inputs,
            });
        }
        domain.check(expr)
    }
}

/// [`Simplifier::simplify`] with the default configuration.
pub fn simplify(expr: &Expr, domain: &VariableDomain, law: Law) -> Result<Option<SimplificationStep>> {
    Simplifier::default().simplify(expr, domain, law)
}

/// [`Simplifier::possible_simplifications`] with the default configuration.
pub fn possible_simplifications(expr: &Expr, domain: &VariableDomain) -> Result<Vec<SimplificationStep>> {
    Simplifier::default().possible_simplifications(expr, domain)
}
