//! Core, format-agnostic types for langport.
//! Source readers decode into these; the JSON writer serializes these.

use std::fmt::{self, Display};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, SeqAccess, Visitor},
    ser::SerializeMap,
};

/// One node of a translation tree: either a translatable string or a group
/// of keyed children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationNode {
    /// A terminal translation string.
    Leaf(String),

    /// Keyed children, in source order.
    Group(Group),
}

impl TranslationNode {
    /// Creates a leaf node.
    pub fn leaf(value: impl Into<String>) -> Self {
        TranslationNode::Leaf(value.into())
    }

    /// Creates an empty group node.
    pub fn group() -> Self {
        TranslationNode::Group(Group::new())
    }

    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            TranslationNode::Leaf(value) => Some(value),
            TranslationNode::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            TranslationNode::Group(group) => Some(group),
            TranslationNode::Leaf(_) => None,
        }
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            TranslationNode::Leaf(_) => 1,
            TranslationNode::Group(group) => group.iter().map(|(_, n)| n.leaf_count()).sum(),
        }
    }

    /// Looks up a node by a dotted key path, e.g. `"auth.failed"`.
    pub fn get_path(&self, path: &str) -> Option<&TranslationNode> {
        path.split('.').try_fold(self, |node, key| node.as_group()?.get(key))
    }
}

impl Display for TranslationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationNode::Leaf(value) => write!(f, "{}", value),
            TranslationNode::Group(group) => write!(f, "{{{} keys}}", group.len()),
        }
    }
}

/// Insertion-ordered key → node container.
///
/// Lists from the source are stored with their positional index as key, so
/// there is a single shape for both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Group {
    entries: Vec<(String, TranslationNode)>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&TranslationNode> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, n)| n)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Inserts a child. An existing key keeps its position and gets the new
    /// value; the previous value is returned.
    pub fn insert(&mut self, key: impl Into<String>, node: TranslationNode) -> Option<TranslationNode> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, node)),
            None => {
                self.entries.push((key, node));
                None
            }
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TranslationNode)> {
        self.entries.iter().map(|(k, n)| (k.as_str(), n))
    }
}

impl<K: Into<String>> FromIterator<(K, TranslationNode)> for Group {
    fn from_iter<I: IntoIterator<Item = (K, TranslationNode)>>(iter: I) -> Self {
        let mut group = Group::new();
        for (key, node) in iter {
            group.insert(key, node);
        }
        group
    }
}

impl IntoIterator for Group {
    type Item = (String, TranslationNode);
    type IntoIter = std::vec::IntoIter<(String, TranslationNode)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for TranslationNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TranslationNode::Leaf(value) => serializer.serialize_str(value),
            TranslationNode::Group(group) => group.serialize(serializer),
        }
    }
}

impl Serialize for Group {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, node) in &self.entries {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TranslationNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = TranslationNode;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a translation string, list or map")
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(TranslationNode::leaf(v))
    }

    fn visit_string<E: serde::de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(TranslationNode::Leaf(v))
    }

    fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(TranslationNode::Leaf(v.to_string()))
    }

    fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(TranslationNode::Leaf(v.to_string()))
    }

    fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(TranslationNode::Leaf(v.to_string()))
    }

    fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(TranslationNode::Leaf(v.to_string()))
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(TranslationNode::Leaf(String::new()))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut group = Group::new();
        let mut index = 0usize;
        while let Some(node) = seq.next_element::<TranslationNode>()? {
            group.insert(index.to_string(), node);
            index += 1;
        }
        Ok(TranslationNode::Group(group))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut group = Group::new();
        while let Some((key, node)) = map.next_entry::<String, TranslationNode>()? {
            group.insert(key, node);
        }
        Ok(TranslationNode::Group(group))
    }
}
