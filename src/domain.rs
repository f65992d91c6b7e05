//! Variable domains.

use std::collections::HashMap;

use num_bigint::BigUint;

use crate::error::{Error, Result};
use crate::expr::Expr;

/// Default name of the single output when a domain is built from inputs only.
pub const DEFAULT_OUTPUT: &str = "out";

/// Ordered input and output names over which expressions are compared.
///
/// Two expressions are only comparable under the same domain: truth tables are indexed by the
/// position of each input in [`inputs()`][VariableDomain::inputs].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDomain {
    inputs: Vec<String>,
    outputs: Vec<String>,
    index: HashMap<String, usize>,
}

impl VariableDomain {
    pub fn new<I, O, S, T>(inputs: I, outputs: O) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        O: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        let inputs: Vec<String> = inputs.into_iter().map(Into::into).collect();
        let outputs: Vec<String> = outputs.into_iter().map(Into::into).collect();

        if outputs.is_empty() {
            return Err(Error::NoOutputs);
        }

        let mut index = HashMap::with_capacity(inputs.len());
        for (i, name) in inputs.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(Error::DuplicateVariable(name.clone()));
            }
        }
        for (i, name) in outputs.iter().enumerate() {
            if index.contains_key(name) || outputs[..i].contains(name) {
                return Err(Error::DuplicateVariable(name.clone()));
            }
        }

        Ok(Self { inputs, outputs, index })
    }

    /// Domain with the given inputs and a single output named [`DEFAULT_OUTPUT`].
    pub fn from_inputs<I, S>(inputs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(inputs, [DEFAULT_OUTPUT])
    }

    /// Domain whose inputs are the variables of `expr`, in sorted order.
    pub fn infer(expr: &Expr) -> Self {
        let inputs: Vec<String> = expr.variables().into_iter().map(str::to_string).collect();
        let index = inputs.iter().enumerate().map(|(i, name)| (name.clone(), i)).collect();
        Self {
            inputs,
            outputs: vec![DEFAULT_OUTPUT.to_string()],
            index,
        }
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn input_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Number of rows of a truth table over this domain, `2^inputs`.
    pub fn row_count(&self) -> BigUint {
        BigUint::from(1u32) << self.inputs.len()
    }

    /// Check that every variable of `expr` is an input of this domain.
    pub fn check(&self, expr: &Expr) -> Result<()> {
        match expr.variables().into_iter().find(|name| !self.index.contains_key(*name)) {
            Some(name) => Err(Error::UnknownVariable(name.to_string())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_new_domain() {
        let domain = VariableDomain::new(["a", "b", "c"], ["f"]).unwrap();
        assert_eq!(domain.inputs(), ["a", "b", "c"]);
        assert_eq!(domain.outputs(), ["f"]);
        assert_eq!(domain.num_inputs(), 3);
        assert_eq!(domain.input_index("b"), Some(1));
        assert_eq!(domain.input_index("f"), None);
        assert_eq!(domain.row_count(), BigUint::from(8u32));
    }

    #[test]
    fn test_rejects_duplicates_and_missing_outputs() {
        assert_eq!(
            VariableDomain::new(["a", "b", "a"], ["f"]),
            Err(Error::DuplicateVariable("a".to_string()))
        );
        assert_eq!(
            VariableDomain::new(["a", "f"], ["f"]),
            Err(Error::DuplicateVariable("f".to_string()))
        );
        assert_eq!(
            VariableDomain::new(["a"], ["f", "f"]),
            Err(Error::DuplicateVariable("f".to_string()))
        );
        assert_eq!(VariableDomain::new(["a"], Vec::<String>::new()), Err(Error::NoOutputs));
    }

    #[test]
    fn test_infer_sorts_variables() {
        let e = Expr::or(Expr::var("c"), Expr::and(Expr::var("a"), Expr::var("b")));
        let domain = VariableDomain::infer(&e);
        assert_eq!(domain.inputs(), ["a", "b", "c"]);
        assert_eq!(domain.outputs(), [DEFAULT_OUTPUT]);
        assert!(domain.check(&e).is_ok());
    }

    #[test]
    fn test_check_unknown_variable() {
        let domain = VariableDomain::from_inputs(["a"]).unwrap();
        let e = Expr::and(Expr::var("a"), Expr::var("z"));
        assert_eq!(domain.check(&e), Err(Error::UnknownVariable("z".to_string())));
    }

    #[test]
    fn test_row_count_is_arbitrary_precision() {
        let names: Vec<String> = (0..100).map(|i| format!("x{}", i)).collect();
        let domain = VariableDomain::from_inputs(names).unwrap();
        assert_eq!(domain.row_count(), BigUint::from(1u32) << 100usize);
    }
}
