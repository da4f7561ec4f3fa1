//! Recursive traversal of a translation tree through the transform pipeline.
//!
//! The walker never mutates its input. It builds a fresh tree with the same
//! group structure, where each leaf turns into one or more sibling entries,
//! and collects per-leaf issues instead of failing.

use std::fmt::Display;

use serde::Serialize;

use crate::{
    options::TransformOptions,
    pipeline::{transform_leaf, transform_text},
    plural::PluralError,
    types::{Group, TranslationNode},
};

/// Non-fatal problem found while walking a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeafIssue {
    /// Dotted key path of the affected node (empty for the namespace root).
    pub path: String,
    pub kind: IssueKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    /// The leaf has `|` segments that are not valid plural forms. It is kept
    /// under its own key with the textual transforms applied.
    MalformedPluralSyntax {
        #[serde(serialize_with = "serialize_display")]
        error: PluralError,
    },
    /// A generated key replaced an existing sibling of the same name.
    DuplicateKey { key: String },
    /// The namespace has no translation strings at all.
    EmptyNamespace,
}

impl Display for LeafIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = if self.path.is_empty() { "<root>" } else { &self.path };
        match &self.kind {
            IssueKind::MalformedPluralSyntax { error } => {
                write!(f, "{}: malformed plural syntax: {}", path, error)
            }
            IssueKind::DuplicateKey { key } => {
                write!(f, "{}: key `{}` defined more than once", path, key)
            }
            IssueKind::EmptyNamespace => write!(f, "{}: namespace has no translations", path),
        }
    }
}

fn serialize_display<S: serde::Serializer>(
    value: &PluralError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Result of walking one tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkOutcome {
    pub tree: TranslationNode,
    pub issues: Vec<LeafIssue>,
}

impl WalkOutcome {
    /// Whether any leaf failed plural parsing.
    pub fn has_malformed_plurals(&self) -> bool {
        self.issues
            .iter()
            .any(|i| matches!(i.kind, IssueKind::MalformedPluralSyntax { .. }))
    }
}

/// Walks `root` and returns the transformed copy together with all issues.
pub fn walk(root: &TranslationNode, options: &TransformOptions) -> WalkOutcome {
    let mut issues = Vec::new();
    let tree = match root {
        TranslationNode::Leaf(text) => TranslationNode::Leaf(transform_text(text, options)),
        TranslationNode::Group(group) => {
            TranslationNode::Group(walk_group(group, "", options, &mut issues))
        }
    };

    if root.leaf_count() == 0 {
        issues.push(LeafIssue {
            path: String::new(),
            kind: IssueKind::EmptyNamespace,
        });
    }

    WalkOutcome { tree, issues }
}

fn walk_group(
    group: &Group,
    prefix: &str,
    options: &TransformOptions,
    issues: &mut Vec<LeafIssue>,
) -> Group {
    let mut out = Group::new();
    for (key, node) in group.iter() {
        let path = join_path(prefix, key);
        match node {
            TranslationNode::Group(child) => {
                let child = walk_group(child, &path, options, issues);
                insert_checked(&mut out, key.to_string(), TranslationNode::Group(child), prefix, issues);
            }
            TranslationNode::Leaf(text) => {
                let pairs = match transform_leaf(key, text, options) {
                    Ok(pairs) => pairs,
                    Err(error) => {
                        issues.push(LeafIssue {
                            path: path.clone(),
                            kind: IssueKind::MalformedPluralSyntax { error },
                        });
                        vec![(key.to_string(), transform_text(text, options))]
                    }
                };
                for (out_key, out_text) in pairs {
                    insert_checked(&mut out, out_key, TranslationNode::Leaf(out_text), prefix, issues);
                }
            }
        }
    }
    out
}

fn insert_checked(
    group: &mut Group,
    key: String,
    node: TranslationNode,
    prefix: &str,
    issues: &mut Vec<LeafIssue>,
) {
    let path = join_path(prefix, &key);
    if group.insert(key.clone(), node).is_some() {
        issues.push(LeafIssue {
            path,
            kind: IssueKind::DuplicateKey { key },
        });
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}
