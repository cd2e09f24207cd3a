//! Signal-line identifiers and the first-seen registry.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a variable in its circuit's registry.
///
/// Ids are local to one circuit: a template and the circuit that
/// instantiates it number their lines independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VariableId(pub u32);

impl VariableId {
    /// The registry index as a `usize`.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<u32> for VariableId {
    fn from(id: u32) -> Self {
        VariableId(id)
    }
}

impl From<usize> for VariableId {
    fn from(id: usize) -> Self {
        VariableId(u32::try_from(id).expect("VariableId overflow: exceeds u32::MAX"))
    }
}

/// Unique signal-line names in first-use order.
///
/// The insertion order is the circuit's initial layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct VariableRegistry {
    names: Vec<String>,
    index: FxHashMap<String, VariableId>,
}

impl VariableRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a name, returning its id. Registering a known name is a no-op.
    pub fn register(&mut self, name: &str) -> VariableId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = VariableId::from(self.names.len());
        self.names.push(name.to_owned());
        self.index.insert(name.to_owned(), id);
        id
    }

    /// Look up the id of a registered name.
    pub fn get(&self, name: &str) -> Option<VariableId> {
        self.index.get(name).copied()
    }

    /// Check whether a name has been registered.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Get the name registered under an id.
    pub fn name(&self, id: VariableId) -> Option<&str> {
        self.names.get(id.index()).map(String::as_str)
    }

    /// All names in first-seen order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Iterate over `(id, name)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (VariableId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (VariableId::from(i), name.as_str()))
    }

    /// Number of registered variables.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if no variable has been registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl From<Vec<String>> for VariableRegistry {
    fn from(names: Vec<String>) -> Self {
        let mut registry = Self::new();
        for name in &names {
            registry.register(name);
        }
        registry
    }
}

impl From<VariableRegistry> for Vec<String> {
    fn from(registry: VariableRegistry) -> Self {
        registry.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_preserves_first_seen_order() {
        let mut reg = VariableRegistry::new();
        assert_eq!(reg.register("c"), VariableId(0));
        assert_eq!(reg.register("a"), VariableId(1));
        assert_eq!(reg.register("c"), VariableId(0));
        assert_eq!(reg.register("b"), VariableId(2));

        assert_eq!(reg.names(), &["c", "a", "b"]);
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn test_lookup() {
        let mut reg = VariableRegistry::new();
        reg.register("x");
        reg.register("y");

        assert_eq!(reg.get("y"), Some(VariableId(1)));
        assert_eq!(reg.get("z"), None);
        assert_eq!(reg.name(VariableId(0)), Some("x"));
        assert_eq!(reg.name(VariableId(7)), None);
        assert!(reg.contains("x"));
    }

    #[test]
    fn test_serde_as_name_list() {
        let mut reg = VariableRegistry::new();
        reg.register("a");
        reg.register("b");

        let json = serde_json::to_string(&reg).unwrap();
        assert_eq!(json, r#"["a","b"]"#);

        let back: VariableRegistry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reg);
    }
}
