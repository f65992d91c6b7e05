//! Per-law behavior of the simplifier.
//!
//! Every expression is simplified over the same five-input domain `a..e` with output `x`.

use boolalg_rs::{possible_simplifications, simplify, Expr, Law, SimplificationStep, VariableDomain};
use test_log::test;

fn domain() -> VariableDomain {
    VariableDomain::new(["a", "b", "c", "d", "e"], ["x"]).unwrap()
}

fn steps(text: &str) -> Vec<SimplificationStep> {
    let expr: Expr = text.parse().unwrap();
    possible_simplifications(&expr, &domain()).unwrap()
}

fn laws(steps: &[SimplificationStep]) -> Vec<Law> {
    steps.iter().map(|s| s.law()).collect()
}

/// The rewrite produced by `law`, printed in mathematical notation.
fn result(steps: &[SimplificationStep], law: Law) -> String {
    steps
        .iter()
        .find(|s| s.law() == law)
        .unwrap_or_else(|| panic!("no {} step among {:?}", law, laws(steps)))
        .new_expression()
        .to_string()
}

/// Assert `text` yields exactly one step, by `law`, producing `expected`.
fn assert_single(text: &str, law: Law, expected: &str) {
    let steps = steps(text);
    assert_eq!(laws(&steps), vec![law], "laws for {}", text);
    assert_eq!(steps[0].new_expression().to_string(), expected, "result for {}", text);
}

// ─── Identity and null ─────────────────────────────────────────────────────────

#[test]
fn identity_law() {
    assert_single("1 a", Law::Identity, "a");
    assert_single("0+a", Law::Identity, "a");
}

#[test]
fn null_law() {
    assert_single("0 a", Law::Null, "0");
    assert_single("1+a", Law::Null, "1");
}

// ─── Idempotent and inverse ────────────────────────────────────────────────────

#[test]
fn idempotent_law() {
    assert_single("a a", Law::Idempotent, "a");
    assert_single("a+a", Law::Idempotent, "a");
}

#[test]
fn idempotent_law_with_separate_terms() {
    assert_single("a b a", Law::Idempotent, "a⋅b");
    assert_single("a+b+a", Law::Idempotent, "a+b");
}

#[test]
fn inverse_law() {
    assert_single("a ~a", Law::Inverse, "0");
    assert_single("a+~a", Law::Inverse, "1");
}

// ─── Distributive ──────────────────────────────────────────────────────────────

#[test]
fn distributive_law() {
    assert_single("a+(b c)", Law::Distributive, "(a+b)⋅(a+c)");
    assert_single("a (b+c)", Law::Distributive, "a⋅b+a⋅c");
}

#[test]
fn inverse_distributive_law() {
    let s1 = steps("(a+b) (a+c)");
    let s2 = steps("(a b)+(a c)");
    assert_eq!(laws(&s1), vec![Law::Distributive, Law::InverseDistributive]);
    assert_eq!(laws(&s2), vec![Law::Distributive, Law::InverseDistributive]);
    assert_eq!(result(&s1, Law::InverseDistributive), "a+b⋅c");
    assert_eq!(result(&s2, Law::InverseDistributive), "a⋅(b+c)");
}

#[test]
fn inverse_distributive_law_preserves_semantics() {
    let d = domain();
    for text in ["(a+b) (a+c)", "(a b)+(a c)", "(a+b) d (a+c)", "(a b)+d+(a c)"] {
        let expr: Expr = text.parse().unwrap();
        let step = simplify(&expr, &d, Law::InverseDistributive).unwrap().unwrap();
        assert!(
            boolalg_rs::oracle::equivalent(&d, &expr, step.new_expression()).unwrap(),
            "{} -> {}",
            text,
            step.new_expression()
        );
    }
}

#[test]
fn inverse_distributive_law_with_separate_terms() {
    let s1 = steps("(a+b) d (a+c)");
    let s2 = steps("(a b)+d+(a c)");
    assert_eq!(s1.len(), 2);
    assert_eq!(s2.len(), 2);
    assert_eq!(s1[1].law(), Law::InverseDistributive);
    assert_eq!(s1[1].new_expression().to_string(), "d⋅(a+b⋅c)");
    assert_eq!(s2[1].law(), Law::InverseDistributive);
    assert_eq!(s2[1].new_expression().to_string(), "d+a⋅(b+c)");
    assert_eq!(result(&s1, Law::Distributive), "(d⋅a+d⋅b)⋅(a+c)");
}

#[test]
fn distributive_round_trip() {
    let d = domain();
    let original: Expr = "a+(b c)".parse().unwrap();
    let expanded = simplify(&original, &d, Law::Distributive).unwrap().unwrap();
    assert_eq!(expanded.new_expression().to_string(), "(a+b)⋅(a+c)");
    let factored = simplify(expanded.new_expression(), &d, Law::InverseDistributive)
        .unwrap()
        .unwrap();
    assert_eq!(factored.new_expression().to_string(), "a+b⋅c");
    assert!(boolalg_rs::oracle::equivalent(&d, &original, factored.new_expression()).unwrap());
}

// ─── Absorption ────────────────────────────────────────────────────────────────

#[test]
fn absorption_law() {
    assert_single("a (a+b)", Law::Absorption, "a");
    assert_single("a+a b", Law::Absorption, "a");
}

#[test]
fn absorption_law_with_separate_terms() {
    let s1 = steps("a d (a+b)");
    let s2 = steps("a+d+a b");
    assert_eq!(laws(&s1), vec![Law::Distributive, Law::Absorption]);
    assert_eq!(laws(&s2), vec![Law::Distributive, Law::Absorption]);
    assert_eq!(result(&s1, Law::Absorption), "d⋅a");
    assert_eq!(result(&s2, Law::Absorption), "d+a");
    assert_eq!(result(&s1, Law::Distributive), "a⋅(d⋅a+d⋅b)");
    assert_eq!(result(&s2, Law::Distributive), "a+(d+a)⋅(d+b)");
}

// ─── De Morgan ─────────────────────────────────────────────────────────────────

#[test]
fn demorgans_law() {
    assert_single("~(a b)", Law::DeMorgans, "~a+~b");
    assert_single("~(a+b)", Law::DeMorgans, "~a⋅~b");
}

#[test]
fn inverse_demorgans_law() {
    assert_single("~a+~b", Law::InverseDeMorgans, "~(b⋅a)");
    assert_single("~a ~b", Law::InverseDeMorgans, "~(b+a)");
}

// ─── Exclusive or ──────────────────────────────────────────────────────────────

#[test]
fn xor_simplification() {
    let s1 = steps("(~a b)+(a ~b)");
    let s2 = steps("(a+b) (~a+~b)");
    assert_eq!(laws(&s1), vec![Law::Distributive, Law::Xor]);
    assert_eq!(laws(&s2), vec![Law::Distributive, Law::InverseDeMorgans, Law::Xor]);
    assert_eq!(result(&s1, Law::Xor), "a⊕b");
    assert_eq!(result(&s2, Law::Xor), "a⊕b");
    assert_eq!(result(&s2, Law::InverseDeMorgans), "(a+b)⋅~(b⋅a)");
}

#[test]
fn inverse_xor_simplification() {
    assert_single("a⊕b", Law::InverseXor, "~b⋅a+b⋅~a");
}

// ─── Driver ────────────────────────────────────────────────────────────────────

#[test]
fn single_variable_has_no_simplification() {
    assert!(steps("a").is_empty());
    assert!(steps("~e").is_empty());
}

#[test]
fn steps_are_in_catalog_order() {
    for text in ["(a+b) (~a+~b)", "a d (a+b)", "(~a b)+(a ~b)", "1 a+a 0+~(c+d)"] {
        let laws = laws(&steps(text));
        assert!(laws.windows(2).all(|w| w[0] < w[1]), "{:?} for {}", laws, text);
    }
}

#[test]
fn step_display() {
    let s = steps("a+a");
    assert_eq!(s[0].to_string(), "IDEMPOTENT: a");
}
