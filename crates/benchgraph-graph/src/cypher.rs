//! Parameterized Cypher statements.
//!
//! Statements are built as plain text plus named parameters and only turned
//! into a `neo4rs::Query` at execution time, so their shape can be checked
//! without a database.

use neo4rs::{BoltNull, BoltType, Query};

use benchgraph_core::{Label, NodeId};

/// A statement parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

impl Param {
    pub fn is_null(&self) -> bool {
        matches!(self, Param::Null)
    }
}

impl From<i64> for Param {
    fn from(v: i64) -> Self {
        Param::Int(v)
    }
}

impl From<f64> for Param {
    fn from(v: f64) -> Self {
        Param::Float(v)
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Param::Text(v)
    }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Param::Text(v.to_string())
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Param::Null)
    }
}

impl From<Param> for BoltType {
    fn from(p: Param) -> Self {
        match p {
            Param::Null => BoltType::Null(BoltNull),
            Param::Int(v) => v.into(),
            Param::Float(v) => v.into(),
            Param::Text(v) => v.into(),
        }
    }
}

/// Cypher text with its named parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    text: String,
    params: Vec<(&'static str, Param)>,
}

impl Statement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: Vec::new(),
        }
    }

    /// Bind a parameter. Rebinding a key replaces the earlier value.
    pub fn param(mut self, key: &'static str, value: impl Into<Param>) -> Self {
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.params.push((key, value)),
        }
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn params(&self) -> &[(&'static str, Param)] {
        &self.params
    }

    pub fn get(&self, key: &str) -> Option<&Param> {
        self.params.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn into_query(self) -> Query {
        self.params
            .into_iter()
            .fold(neo4rs::query(&self.text), |q, (k, v)| q.param(k, BoltType::from(v)))
    }
}

/// Builds the read statement behind a filtered resolver.
///
/// Every predicate is guarded with `$key IS NULL` so an unset filter is
/// always true and the statement text stays the same for a given label and
/// traversal mode. The matched node is bound to `m`; in linked mode the
/// node it must be adjacent to is bound to `n`.
pub struct FilteredMatch {
    label: Label,
    linked_id: Option<NodeId>,
    conditions: Vec<String>,
    params: Vec<(&'static str, Param)>,
}

impl FilteredMatch {
    pub fn new(label: Label, linked_id: Option<NodeId>) -> Self {
        Self {
            label,
            linked_id,
            conditions: Vec::new(),
            params: Vec::new(),
        }
    }

    /// Exact match on the store-assigned identity.
    pub fn id(mut self, id: Option<NodeId>) -> Self {
        self.conditions
            .push("(id(m) = $id OR $id IS NULL)".to_string());
        self.params.push(("id", id.into()));
        self
    }

    /// Case-sensitive containment on a text property.
    pub fn contains(mut self, property: &'static str, value: Option<String>) -> Self {
        self.conditions.push(format!(
            "(m.{property} CONTAINS ${property} OR ${property} IS NULL)"
        ));
        self.params.push((property, value.into()));
        self
    }

    /// Exact match on a property, bound under the property's own name.
    pub fn equals(self, property: &'static str, value: impl Into<Param>) -> Self {
        self.equals_as(property, property, value)
    }

    /// Exact match on a property, bound under a different parameter name.
    pub fn equals_as(
        mut self,
        property: &'static str,
        key: &'static str,
        value: impl Into<Param>,
    ) -> Self {
        self.conditions
            .push(format!("(m.{property} = ${key} OR ${key} IS NULL)"));
        self.params.push((key, value.into()));
        self
    }

    pub fn build(self) -> Statement {
        let label = self.label.as_str();
        let mut text = match self.linked_id {
            Some(_) => format!("MATCH (m:`{label}`)-[r]-(n)\nWHERE id(n) = $linked_id"),
            None => format!("MATCH (m:`{label}`)\nWHERE true"),
        };
        for condition in &self.conditions {
            text.push_str("\n  AND ");
            text.push_str(condition);
        }
        text.push_str("\nRETURN DISTINCT id(m) AS id, m");

        let mut stmt = Statement::new(text);
        for (key, value) in self.params {
            stmt = stmt.param(key, value);
        }
        if let Some(linked_id) = self.linked_id {
            stmt = stmt.param("linked_id", linked_id);
        }
        stmt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlinked_match_scans_label() {
        let stmt = FilteredMatch::new(Label::Drive, None)
            .id(None)
            .contains("name", Some("Sam".to_string()))
            .build();

        assert!(stmt.text().starts_with("MATCH (m:`Driver`)\n"));
        assert!(!stmt.text().contains("-[r]-"));
        assert!(stmt.text().contains("(m.name CONTAINS $name OR $name IS NULL)"));
        assert_eq!(stmt.get("name"), Some(&Param::Text("Sam".to_string())));
        assert_eq!(stmt.get("id"), Some(&Param::Null));
        assert_eq!(stmt.get("linked_id"), None);
    }

    #[test]
    fn linked_match_traverses_any_relationship() {
        let stmt = FilteredMatch::new(Label::Controller, Some(0)).id(None).build();

        assert!(stmt
            .text()
            .starts_with("MATCH (m:`ControllerMeta`)-[r]-(n)\nWHERE id(n) = $linked_id"));
        assert_eq!(stmt.get("linked_id"), Some(&Param::Int(0)));
    }

    #[test]
    fn equals_as_binds_custom_key() {
        let stmt = FilteredMatch::new(Label::MeasuredValue, Some(1))
            .equals_as("type", "record_type", Some("READ"))
            .build();

        assert!(stmt
            .text()
            .contains("(m.type = $record_type OR $record_type IS NULL)"));
        assert_eq!(stmt.get("record_type"), Some(&Param::Text("READ".to_string())));
    }

    #[test]
    fn text_is_stable_across_filter_values() {
        let a = FilteredMatch::new(Label::Drive, None)
            .contains("name", None)
            .equals("capacity", Some(500.0))
            .build();
        let b = FilteredMatch::new(Label::Drive, None)
            .contains("name", Some("x".to_string()))
            .equals("capacity", None::<f64>)
            .build();
        assert_eq!(a.text(), b.text());
        assert_ne!(a.params(), b.params());
    }

    #[test]
    fn rebinding_a_param_replaces_it() {
        let stmt = Statement::new("RETURN $x").param("x", 1_i64).param("x", 2_i64);
        assert_eq!(stmt.params().len(), 1);
        assert_eq!(stmt.get("x"), Some(&Param::Int(2)));
    }
}
