//! Module providing the ParameterTable, a map from rate constant symbols to values
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::configuration::CONFIGURATION;

/// Ordered table of rate constant symbols (such as `"kb"` or `"ktx"`) to values
///
/// Used both for global SBML parameters, and by mechanisms to look up the rates of the
/// reactions they generate.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterTable {
    values: IndexMap<String, f64>,
}

impl ParameterTable {
    pub fn new() -> Self {
        ParameterTable {
            values: IndexMap::new(),
        }
    }

    /// Set the value of a parameter, replacing any previous value
    pub fn insert<S: Into<String>>(&mut self, symbol: S, value: f64) -> Option<f64> {
        self.values.insert(symbol.into(), value)
    }

    /// Builder style version of [`ParameterTable::insert`]
    pub fn with<S: Into<String>>(mut self, symbol: S, value: f64) -> Self {
        self.insert(symbol, value);
        self
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.values.get(symbol).copied()
    }

    /// Value of a parameter, falling back to the global default for that symbol
    pub fn get_or_default(&self, symbol: &str) -> Option<f64> {
        self.get(symbol).or_else(|| match CONFIGURATION.read() {
            Ok(config) => config.default_rate(symbol),
            Err(poisoned) => poisoned.into_inner().default_rate(symbol),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ParameterTable {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        ParameterTable {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod parameter_tests {
    use super::*;

    #[test]
    fn lookup_with_defaults() {
        let table: ParameterTable = [("kb", 5.0), ("ktx", 2.0)].into_iter().collect();
        assert!((table.get_or_default("kb").unwrap() - 5.0).abs() < 1e-12);
        assert!((table.get_or_default("ku").unwrap() - 10.0).abs() < 1e-12);
        assert_eq!(table.get("ku"), None);
        assert_eq!(table.get_or_default("not_a_rate"), None);
        let symbols: Vec<&str> = table.iter().map(|(s, _)| s).collect();
        assert_eq!(symbols, vec!["kb", "ktx"]);
    }
}
