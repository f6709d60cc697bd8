//! Resolver filters.
//!
//! Every field is optional. An absent field never narrows a result set;
//! present fields are AND-ed. Text fields match by case-sensitive
//! containment, every other field by equality.
//!
//! `linked_id` restricts results to nodes adjacent (in either direction,
//! over any relationship) to the node with that id. It is resolved with
//! [`resolve_link`]: an explicit argument wins over the id of the parent
//! entity a nested field is resolved on.

use crate::types::{
    BenchmarkRun, Controller, Drive, MeasuredValue, NodeId, RecordName, RecordType, RecordUnit,
};

/// Pick the node a resolver is scoped to.
///
/// The explicit `linked_id` argument takes precedence over the parent id.
/// Presence is decided by `Option` alone, so id `0` is a valid link target.
pub fn resolve_link(explicit: Option<NodeId>, parent: Option<NodeId>) -> Option<NodeId> {
    explicit.or(parent)
}

fn contains(needle: &Option<String>, haystack: &Option<String>) -> bool {
    match (needle, haystack) {
        (None, _) => true,
        (Some(n), Some(h)) => h.contains(n.as_str()),
        (Some(_), None) => false,
    }
}

fn equals<T: PartialEq>(wanted: &Option<T>, actual: &Option<T>) -> bool {
    match wanted {
        None => true,
        Some(w) => actual.as_ref() == Some(w),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriveFilter {
    pub id: Option<NodeId>,
    pub name: Option<String>,
    pub model: Option<String>,
    pub vendor: Option<String>,
    pub capacity: Option<f64>,
    pub created_at: Option<i64>,
    pub linked_id: Option<NodeId>,
}

impl DriveFilter {
    /// Property predicates only; adjacency is checked by the store.
    pub fn matches(&self, drive: &Drive) -> bool {
        equals(&self.id, &Some(drive.id))
            && contains(&self.name, &drive.name)
            && contains(&self.model, &drive.model)
            && contains(&self.vendor, &drive.vendor)
            && equals(&self.capacity, &drive.capacity)
            && equals(&self.created_at, &drive.created_at)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControllerFilter {
    pub id: Option<NodeId>,
    pub model: Option<String>,
    pub vendor: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<i64>,
    pub linked_id: Option<NodeId>,
}

impl ControllerFilter {
    pub fn matches(&self, controller: &Controller) -> bool {
        equals(&self.id, &Some(controller.id))
            && contains(&self.model, &controller.model)
            && contains(&self.vendor, &controller.vendor)
            && contains(&self.description, &controller.description)
            && equals(&self.created_at, &controller.created_at)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkRunFilter {
    pub id: Option<NodeId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<i64>,
    pub linked_id: Option<NodeId>,
}

impl BenchmarkRunFilter {
    pub fn matches(&self, run: &BenchmarkRun) -> bool {
        equals(&self.id, &Some(run.id))
            && contains(&self.name, &Some(run.name.clone()))
            && contains(&self.description, &run.description)
            && equals(&self.created_at, &run.created_at)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasuredValueFilter {
    pub id: Option<NodeId>,
    pub record_type: Option<RecordType>,
    pub unit: Option<RecordUnit>,
    pub name: Option<RecordName>,
    pub value: Option<f64>,
    pub created_at: Option<i64>,
    pub linked_id: Option<NodeId>,
}

impl MeasuredValueFilter {
    pub fn matches(&self, value: &MeasuredValue) -> bool {
        equals(&self.id, &Some(value.id))
            && equals(&self.record_type, &Some(value.record_type))
            && equals(&self.unit, &Some(value.unit))
            && equals(&self.name, &Some(value.name))
            && equals(&self.value, &Some(value.value))
            && equals(&self.created_at, &value.created_at)
    }
}
