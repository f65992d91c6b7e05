//! The law catalog.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A named identity of Boolean algebra.
///
/// Variants are listed in catalog order, which is also the order in which
/// [`Simplifier::possible_simplifications`][crate::Simplifier::possible_simplifications]
/// reports its steps.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Law {
    Identity,
    Null,
    Idempotent,
    Inverse,
    Commutative,
    Associative,
    Distributive,
    InverseDistributive,
    Absorption,
    DeMorgans,
    InverseDeMorgans,
    Xor,
    InverseXor,
}

impl Law {
    pub const ALL: [Law; 13] = [
        Law::Identity,
        Law::Null,
        Law::Idempotent,
        Law::Inverse,
        Law::Commutative,
        Law::Associative,
        Law::Distributive,
        Law::InverseDistributive,
        Law::Absorption,
        Law::DeMorgans,
        Law::InverseDeMorgans,
        Law::Xor,
        Law::InverseXor,
    ];

    /// Upper-case catalog name, e.g. `INVERSE_DEMORGANS`.
    pub fn name(self) -> &'static str {
        match self {
            Law::Identity => "IDENTITY",
            Law::Null => "NULL",
            Law::Idempotent => "IDEMPOTENT",
            Law::Inverse => "INVERSE",
            Law::Commutative => "COMMUTATIVE",
            Law::Associative => "ASSOCIATIVE",
            Law::Distributive => "DISTRIBUTIVE",
            Law::InverseDistributive => "INVERSE_DISTRIBUTIVE",
            Law::Absorption => "ABSORPTION",
            Law::DeMorgans => "DEMORGANS",
            Law::InverseDeMorgans => "INVERSE_DEMORGANS",
            Law::Xor => "XOR",
            Law::InverseXor => "INVERSE_XOR",
        }
    }

    /// Commutativity and associativity are built into chain flattening and never produce a
    /// step of their own.
    pub fn is_structural(self) -> bool {
        matches!(self, Law::Commutative | Law::Associative)
    }

    /// The identity in mathematical notation.
    pub fn description(self) -> &'static str {
        match self {
            Law::Identity => "a⋅1 = a, a+0 = a",
            Law::Null => "a⋅0 = 0, a+1 = 1",
            Law::Idempotent => "a⋅a = a, a+a = a",
            Law::Inverse => "a⋅~a = 0, a+~a = 1",
            Law::Commutative => "a⋅b = b⋅a, a+b = b+a",
            Law::Associative => "(a⋅b)⋅c = a⋅(b⋅c), (a+b)+c = a+(b+c)",
            Law::Distributive => "a⋅(b+c) = a⋅b+a⋅c, a+b⋅c = (a+b)⋅(a+c)",
            Law::InverseDistributive => "a⋅b+a⋅c = a⋅(b+c), (a+b)⋅(a+c) = a+b⋅c",
            Law::Absorption => "a⋅(a+b) = a, a+a⋅b = a",
            Law::DeMorgans => "~(a⋅b) = ~a+~b, ~(a+b) = ~a⋅~b",
            Law::InverseDeMorgans => "~a+~b = ~(a⋅b), ~a⋅~b = ~(a+b)",
            Law::Xor => "~a⋅b+a⋅~b = a⊕b, (a+b)⋅(~a+~b) = a⊕b",
            Law::InverseXor => "a⊕b = ~a⋅b+a⋅~b",
        }
    }
}

impl fmt::Display for Law {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Law {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        Law::ALL
            .into_iter()
            .find(|law| law.name().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| Error::UnknownName {
                kind: "law",
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_catalog_order() {
        assert_eq!(Law::ALL.len(), 13);
        assert_eq!(Law::ALL[0], Law::Identity);
        assert_eq!(Law::ALL[12], Law::InverseXor);
        assert!(Law::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_names_round_trip() {
        for law in Law::ALL {
            assert_eq!(law.to_string().parse::<Law>().unwrap(), law);
        }
        assert_eq!("inverse-demorgans".parse::<Law>().unwrap(), Law::InverseDeMorgans);
        assert_eq!(" Xor ".parse::<Law>().unwrap(), Law::Xor);
        assert!(matches!("commutativity".parse::<Law>(), Err(Error::UnknownName { kind: "law", .. })));
    }

    #[test]
    fn test_structural_laws() {
        let structural: Vec<Law> = Law::ALL.into_iter().filter(|l| l.is_structural()).collect();
        assert_eq!(structural, vec![Law::Commutative, Law::Associative]);
    }
}
