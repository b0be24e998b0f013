use std::{collections::BTreeMap, ops::Index};

/// Named scalar parameters of a scenario.
pub type Parameters = BTreeMap<String, f64>;

/// A named, probability-weighted set of parameters.
///
/// Probabilities are weights in `[0, 1]`. They only need to sum to one when
/// a caller treats them as a distribution; solvers that compute expectations
/// normalize by the total weight.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    pub name: String,
    pub probability: f64,
    pub parameters: Parameters,
}

impl Scenario {
    /// Creates a scenario with no parameters.
    pub fn new(name: impl Into<String>, probability: f64) -> Self {
        Self {
            name: name.into(),
            probability,
            parameters: Parameters::new(),
        }
    }

    /// Creates a scenario with the given parameters.
    pub fn with_parameters(name: impl Into<String>, probability: f64, parameters: Parameters) -> Self {
        Self {
            name: name.into(),
            probability,
            parameters,
        }
    }

    /// Adds or replaces a parameter.
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: f64) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }

    /// Returns the parameter named `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        self.parameters.get(key).copied()
    }

    /// Iterates over parameter names in sorted order.
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.keys().map(String::as_str)
    }
}

impl Index<&str> for Scenario {
    type Output = f64;

    /// Returns the parameter named `key`.
    ///
    /// # Panics
    ///
    /// Panics if the scenario has no such parameter.
    fn index(&self, key: &str) -> &f64 {
        match self.parameters.get(key) {
            Some(value) => value,
            None => panic!("scenario '{}' has no parameter '{key}'", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_are_keyed_by_name() {
        let bull = Scenario::new("Bull", 0.3)
            .with_parameter("return", 0.20)
            .with_parameter("volatility", 0.15);

        assert_eq!(bull["return"], 0.20);
        assert_eq!(bull.get("volatility"), Some(0.15));
        assert_eq!(bull.get("missing"), None);
        assert_eq!(
            bull.parameter_names().collect::<Vec<_>>(),
            vec!["return", "volatility"]
        );
    }

    #[test]
    #[should_panic(expected = "has no parameter 'rate'")]
    fn missing_parameter_panics_on_index() {
        let base = Scenario::new("Base", 0.5);
        let _rate: f64 = base["rate"];
    }
}
