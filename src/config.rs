/// Limits applied by a [`Simplifier`][crate::Simplifier].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SimplifierConfig {
    /// Maximum number of domain inputs. Every equivalence check builds truth tables of
    /// `2^inputs` rows, so larger domains are rejected up front.
    pub max_inputs: u32,
    /// Maximum number of truth-table comparisons per law and expression, or `None` for no limit.
    pub max_comparisons: Option<usize>,
}

impl Default for SimplifierConfig {
    fn default() -> Self {
        Self {
            max_inputs: 16,
            max_comparisons: None,
        }
    }
}

impl SimplifierConfig {
    pub fn with_max_inputs(mut self, max_inputs: u32) -> Self {
        self.max_inputs = max_inputs;
        self
    }

    pub fn with_max_comparisons(mut self, max_comparisons: usize) -> Self {
        self.max_comparisons = Some(max_comparisons);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_defaults_and_setters() {
        let config = SimplifierConfig::default();
        assert_eq!(config.max_inputs, 16);
        assert_eq!(config.max_comparisons, None);

        let config = config.with_max_inputs(4).with_max_comparisons(10);
        assert_eq!(config.max_inputs, 4);
        assert_eq!(config.max_comparisons, Some(10));
    }
}
