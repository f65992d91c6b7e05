//! # boolalg-rs: step-by-step Boolean algebra
//!
//! **`boolalg-rs`** rewrites Boolean expressions one algebraic law at a time.
//! Given an expression and a law from the catalog ([`Law`]), it finds at most one place where the
//! law applies, rewrites it, and returns the new tree together with the law that justified it.
//! Run over the whole catalog, it lists every single-step simplification available.
//!
//! ## Key Features
//!
//! - **Chain-aware matching**: `a+b+a` is one OR-chain of three operands whatever its nesting, so
//!   laws see through associativity and commutativity.
//! - **Semantic equality**: operands are compared by truth table ([`oracle`]), so `a+b` matches `b+a`.
//! - **Persistent trees**: a rewrite shares every untouched subtree with the original.
//! - **Sound by construction**: every law is restricted to the connectives under which it holds.
//!
//! ## Basic Usage
//!
//! ```rust
//! use boolalg_rs::{possible_simplifications, Expr, Law, VariableDomain};
//!
//! let e: Expr = "a⋅b⋅a".parse().unwrap();
//! let domain = VariableDomain::infer(&e);
//!
//! let steps = possible_simplifications(&e, &domain).unwrap();
//! assert_eq!(steps[0].law(), Law::Idempotent);
//! assert_eq!(steps[0].to_string(), "IDEMPOTENT: a⋅b");
//! ```
//!
//! ## Core Components
//!
//! - **[`simplifier`]**: the driver, [`Simplifier`] and [`SimplificationStep`].
//! - **[`matcher`]**: per-law predicates over flattened [`chain`]s.
//! - **[`rebuild`]**: applying a substitution map to a tree.
//! - **[`expr`]**, **[`display`]**, **[`parser`]**: the expression tree and its textual forms.
//! - **[`oracle`]**, **[`truth_table`]**, **[`domain`]**: semantic equivalence.

pub mod cache;
pub mod chain;
pub mod config;
pub mod display;
pub mod domain;
pub mod error;
pub mod expr;
pub mod law;
pub mod matcher;
pub mod oracle;
pub mod parser;
pub mod rebuild;
pub mod simplifier;
pub mod truth_table;

pub use config::SimplifierConfig;
pub use display::Notation;
pub use domain::VariableDomain;
pub use error::{Error, Result};
pub use expr::{Expr, Op};
pub use law::Law;
pub use oracle::{Equivalence, TruthTableOracle};
pub use simplifier::{possible_simplifications, simplify, Comparison, SimplificationStep, Simplifier};
pub use truth_table::TruthTable;
