use serde::{Deserialize, Serialize};

use crate::error::GroupError;

/// One bracketed node, `[type key=value ...]`.
///
/// Pairs keep their source order and keys may repeat; a repeated key models a
/// multi-valued attribute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    group_type: String,
    #[serde(rename = "properties")]
    property_pairs: Vec<PropertyPair>,
}

/// A single `key=value` entry of a [`Group`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PropertyPair {
    /// The key, without the trailing `=`.
    pub key: String,
    /// The value.
    pub property: Property,
}

/// The value half of a key/value pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Property {
    /// A nested group, owned by this property.
    Group(Group),
    /// An opaque blob (`\{...\}` or `AnimationCurve::\{...\}`), stored and
    /// replayed byte-for-byte.
    Json(String),
    /// Plain text with escapes already resolved.
    String(String),
}

impl Property {
    /// Short name of the variant (`"group"`, `"json"`, `"string"`).
    pub fn kind(&self) -> &'static str {
        match self {
            Property::Group(_) => "group",
            Property::Json(_) => "json",
            Property::String(_) => "string",
        }
    }

    /// The text of a string property.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Property::String(s) => Some(s),
            _ => None,
        }
    }

    /// The raw payload of a blob property.
    pub fn as_json(&self) -> Option<&str> {
        match self {
            Property::Json(s) => Some(s),
            _ => None,
        }
    }

    /// The nested group of a group property.
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Property::Group(g) => Some(g),
            _ => None,
        }
    }
}

impl From<Group> for Property {
    fn from(group: Group) -> Self {
        Property::Group(group)
    }
}

impl Group {
    /// Create an empty group of the given type.
    pub fn new(group_type: impl Into<String>) -> Self {
        Self {
            group_type: group_type.into(),
            property_pairs: Vec::new(),
        }
    }

    /// The command name, e.g. `"message"`.
    pub fn group_type(&self) -> &str {
        &self.group_type
    }

    /// All pairs in source order.
    pub fn property_pairs(&self) -> &[PropertyPair] {
        &self.property_pairs
    }

    /// Keys in source order, repeats included.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.property_pairs.iter().map(|p| p.key.as_str())
    }

    /// Append a pair at the end.
    pub fn append_property(&mut self, key: impl Into<String>, property: Property) {
        self.property_pairs.push(PropertyPair {
            key: key.into(),
            property,
        });
    }

    /// Builder form of [`append_property`](Group::append_property).
    pub fn with_property(mut self, key: impl Into<String>, property: Property) -> Self {
        self.append_property(key, property);
        self
    }

    /// The single value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent and
    /// [`GroupError::AmbiguousKey`] when it occurs more than once.
    pub fn get_property(&self, key: &str) -> Result<Option<&Property>, GroupError> {
        let mut found = self.matching(key);
        let Some(first) = found.next() else {
            return Ok(None);
        };
        let extra = found.count();
        if extra > 0 {
            return Err(GroupError::AmbiguousKey {
                key: key.to_string(),
                count: extra + 1,
            });
        }
        Ok(Some(first))
    }

    /// Like [`get_property`](Group::get_property), substituting `default` when
    /// the key is absent.
    pub fn get_property_or<'a>(
        &'a self,
        key: &str,
        default: &'a Property,
    ) -> Result<&'a Property, GroupError> {
        Ok(self.get_property(key)?.unwrap_or(default))
    }

    /// Every value stored under `key`, in insertion order.
    pub fn get_property_list(&self, key: &str) -> Vec<&Property> {
        self.matching(key).collect()
    }

    /// Replace the value of every pair keyed `key`, keeping each pair where it
    /// is. Absent keys are not inserted. Returns how many pairs changed.
    pub fn modify_property(&mut self, key: &str, property: Property) -> usize {
        let mut replaced = 0;
        for pair in self.property_pairs.iter_mut().filter(|p| p.key == key) {
            pair.property = property.clone();
            replaced += 1;
        }
        replaced
    }

    fn matching<'s>(&'s self, key: &str) -> impl Iterator<Item = &'s Property> {
        self.property_pairs
            .iter()
            .filter(move |p| p.key == key)
            .map(|p| &p.property)
    }
}
