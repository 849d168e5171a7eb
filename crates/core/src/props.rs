//! Props bag and prop values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const CLASS_PROP: &str = "class";
const CLASS_NAME_PROP: &str = "className";

/// A single prop value attached to an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum PropValue {
    /// A literal string value (from key="value").
    Text(String),
    /// A boolean flag (`inline`, `disabled`).
    Bool(bool),
    /// A numeric value.
    Number(f64),
    /// A JS expression (from key={expression}). Not evaluated.
    Expression(String),
}

impl PropValue {
    /// Creates a literal string prop value.
    pub fn text(value: impl Into<String>) -> Self {
        PropValue::Text(value.into())
    }

    /// Creates an expression prop value.
    pub fn expression(value: impl Into<String>) -> Self {
        PropValue::Expression(value.into())
    }

    /// Returns the string value for `Text` props.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the boolean value for `Bool` props.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns true if this is an expression.
    pub fn is_expression(&self) -> bool {
        matches!(self, PropValue::Expression(_))
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Number(value)
    }
}

impl From<u32> for PropValue {
    fn from(value: u32) -> Self {
        PropValue::Number(f64::from(value))
    }
}

/// Attribute name to value mapping for one element.
///
/// Keys are kept sorted so serialized output is stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Props(BTreeMap<String, PropValue>);

impl Props {
    /// Creates an empty props bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a prop, returning the previous value for the key.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropValue>,
    ) -> Option<PropValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Removes a prop.
    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        self.0.remove(key)
    }

    /// Looks up a prop.
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.0.get(key)
    }

    /// Looks up a `Text` prop.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropValue::as_text)
    }

    /// Returns true if the prop is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of props.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no props.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates props in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Applies `other` on top of `self`; keys in `other` win.
    pub fn overlay(&mut self, other: &Props) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Folds a `className` prop into `class`.
    ///
    /// When both are text they are joined with a space, `class` first.
    /// Otherwise the `className` value replaces `class`.
    pub fn normalize_class(&mut self) {
        let Some(class_name) = self.0.remove(CLASS_NAME_PROP) else {
            return;
        };
        let class = match (self.0.remove(CLASS_PROP), class_name) {
            (Some(PropValue::Text(class)), PropValue::Text(extra)) => {
                let joined: Vec<&str> = [class.as_str(), extra.as_str()]
                    .into_iter()
                    .filter(|part| !part.is_empty())
                    .collect();
                PropValue::Text(joined.join(" "))
            }
            (_, class_name) => class_name,
        };
        self.0.insert(CLASS_PROP.to_string(), class);
    }

    /// Shallow merge of two bags; `local` wins on key collision.
    pub fn merge(base: &Props, local: &Props) -> Props {
        let mut merged = base.clone();
        merged.overlay(local);
        merged
    }

    /// Shallow merge of any number of bags, later bags winning.
    pub fn merge_all<'a>(sources: impl IntoIterator<Item = &'a Props>) -> Props {
        let mut merged = Props::new();
        for source in sources {
            merged.overlay(source);
        }
        merged
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Props(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Props {
    type Item = (&'a String, &'a PropValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, PropValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
