use indexmap::IndexMap;
use serde_derive::{Deserialize, Serialize};
use std::fmt::Display;

/// A value bound to a top-level generic.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenericValue {
    Bool(bool),
    Integer(i64),
    Real(f64),
    /// Written verbatim; callers pre-format vectors such as `4'b0101`.
    Text(String),
}

impl Display for GenericValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // vivado expects single-bit literals for booleans
            Self::Bool(b) => write!(f, "{}", if *b { "1'b1" } else { "1'b0" }),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Real(r) => write!(f, "{}", r),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for GenericValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for GenericValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for GenericValue {
    fn from(value: i32) -> Self {
        Self::Integer(value as i64)
    }
}

impl From<f64> for GenericValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<&str> for GenericValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for GenericValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Generic names mapped to their values in the order they were given.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Generics(IndexMap<String, GenericValue>);

impl Generics {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Binds `value` to the generic `name`.
    ///
    /// Rebinding an existing name replaces its value but keeps its position.
    pub fn set<V: Into<GenericValue>>(mut self, name: &str, value: V) -> Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Formats the bindings as the space-separated `name=value` list vivado
    /// reads from a fileset's `generic` property.
    pub fn to_tcl_list(&self) -> String {
        self.0
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<String>>()
            .join(" ")
    }
}
