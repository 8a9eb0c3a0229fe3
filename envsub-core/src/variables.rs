//! Variable resolution seam used by the expansion evaluator.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// Supplies values for the variables a template references.
///
/// `None` means the variable is unset; `Some` of an empty string means it is
/// present with an empty value. The distinction drives default-value
/// substitution and strict-mode errors: a present-but-empty variable uses its
/// (empty) value, never its default.
pub trait VariableProvider {
    /// Looks up the value of the variable with the given name.
    fn lookup(&self, name: &str) -> Option<String>;
}

impl<T: VariableProvider + ?Sized> VariableProvider for &T {
    fn lookup(&self, name: &str) -> Option<String> {
        (**self).lookup(name)
    }
}

impl<K, V, S> VariableProvider for HashMap<K, V, S>
where
    K: Borrow<str> + Eq + Hash,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).map(|value| value.as_ref().to_owned())
    }
}

impl<K, V> VariableProvider for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).map(|value| value.as_ref().to_owned())
    }
}

/// Adapts a lookup closure into a [`VariableProvider`].
pub struct FnProvider<F>(F);

impl<F> FnProvider<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Wraps the given closure.
    pub const fn new(lookup: F) -> Self {
        Self(lookup)
    }
}

impl<F> VariableProvider for FnProvider<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, name: &str) -> Option<String> {
        (self.0)(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lookup_via_map() {
        let vars = HashMap::from([("present", "value"), ("empty", "")]);
        assert_eq!(vars.lookup("present"), Some("value".to_owned()));
        assert_eq!(vars.lookup("empty"), Some(String::new()));
        assert_eq!(vars.lookup("missing"), None);
    }

    #[test]
    fn lookup_via_closure() {
        let provider = FnProvider::new(|name| {
            (name == "answer").then(|| "42".to_owned())
        });
        assert_eq!(provider.lookup("answer"), Some("42".to_owned()));
        assert_eq!(provider.lookup("question"), None);
    }
}
