//! Application field name → storage column name lookup.

use std::collections::HashMap;

/// Maps application field names (e.g. `firstName`) to column names (e.g. `first_name`).
///
/// Fields without an entry resolve to themselves. The mapped column names are
/// interpolated into SQL, so they must come from code, never from a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    columns: HashMap<String, String>,
}

impl ColumnMap {
    /// Create an empty map (every field resolves to itself).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mapping (builder style).
    pub fn with(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.insert(field, column);
        self
    }

    /// Add or replace a mapping.
    pub fn insert(&mut self, field: impl Into<String>, column: impl Into<String>) {
        self.columns.insert(field.into(), column.into());
    }

    /// The explicitly mapped column for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.columns.get(field).map(String::as_str)
    }

    /// Resolve `field` to its column name, falling back to `field` itself
    /// when it is unmapped or mapped to an empty name.
    pub fn resolve<'a>(&'a self, field: &'a str) -> &'a str {
        self.get(field).filter(|c| !c.is_empty()).unwrap_or(field)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ColumnMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<const N: usize> From<[(&str, &str); N]> for ColumnMap {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_mapped_field() {
        let map = ColumnMap::new().with("firstName", "first_name");
        assert_eq!(map.resolve("firstName"), "first_name");
    }

    #[test]
    fn unmapped_field_resolves_to_itself() {
        let map = ColumnMap::from([("firstName", "first_name")]);
        assert_eq!(map.resolve("age"), "age");
        assert_eq!(map.get("age"), None);
    }

    #[test]
    fn empty_map_is_identity() {
        let map = ColumnMap::new();
        assert!(map.is_empty());
        assert_eq!(map.resolve("email"), "email");
    }

    #[test]
    fn empty_mapping_falls_back_to_field() {
        let map = ColumnMap::from([("firstName", "")]);
        assert_eq!(map.get("firstName"), Some(""));
        assert_eq!(map.resolve("firstName"), "firstName");
    }

    #[test]
    fn insert_replaces_existing_mapping() {
        let mut map = ColumnMap::from([("logoUrl", "logo")]);
        map.insert("logoUrl", "logo_url");
        assert_eq!(map.len(), 1);
        assert_eq!(map.resolve("logoUrl"), "logo_url");
    }
}
