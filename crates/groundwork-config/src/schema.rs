//! Declarative schema descriptions for configurable types.
//!
//! A [`Schema`] mirrors the shape of a target config struct: named groups for
//! nested fields, fragments for flattened composition, and leaves for scalar
//! fields. Walking a schema yields one [`LeafBinding`] per addressable leaf,
//! which is the unit the loader resolves, defaults, and validates.

use std::fmt;

/// Scalar kind held by a leaf.
///
/// Closed enumerations are `Str` leaves carrying a `one_of` constraint; they
/// travel as strings through every source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind {
    /// UTF-8 string.
    Str,
    /// Signed integer.
    Int,
    /// Boolean.
    Bool,
}

/// A declarative validation rule attached to a leaf.
///
/// Rules are evaluated independently; every failing rule on every leaf is
/// reported, none suppresses another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Fails on the kind's zero value (empty string, zero, false) or absence.
    Required,
    /// Fails unless the string parses as a well-formed URL.
    Url,
    /// Fails unless the string is a syntactically plausible email address.
    Email,
    /// Fails unless every character of the string is an ASCII digit.
    Numeric,
    /// Fails unless the string is exactly this many characters long.
    Len(usize),
    /// Lower bound: numeric for `Int` leaves, length for `Str` leaves.
    Min(i64),
    /// Numeric lower bound (inclusive).
    Gte(i64),
    /// Numeric upper bound (inclusive).
    Lte(i64),
    /// Fails unless the value equals one of the listed literals.
    OneOf(Vec<String>),
}

impl Constraint {
    /// Build a `OneOf` constraint from any set of literals.
    pub fn one_of<I, S>(literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Constraint::OneOf(literals.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Required => write!(f, "required"),
            Constraint::Url => write!(f, "url"),
            Constraint::Email => write!(f, "email"),
            Constraint::Numeric => write!(f, "numeric"),
            Constraint::Len(n) => write!(f, "len={n}"),
            Constraint::Min(n) => write!(f, "min={n}"),
            Constraint::Gte(n) => write!(f, "gte={n}"),
            Constraint::Lte(n) => write!(f, "lte={n}"),
            Constraint::OneOf(literals) => write!(f, "oneof={{{}}}", literals.join(",")),
        }
    }
}

/// A leaf field declaration: source key, scalar kind, optional default
/// literal, and constraints.
#[derive(Debug, Clone)]
pub struct Leaf {
    pub(crate) key: String,
    pub(crate) kind: LeafKind,
    pub(crate) default: Option<String>,
    pub(crate) constraints: Vec<Constraint>,
}

impl Leaf {
    fn new(key: impl Into<String>, kind: LeafKind) -> Self {
        Self {
            key: key.into(),
            kind,
            default: None,
            constraints: Vec::new(),
        }
    }

    /// Declare a string leaf.
    pub fn string(key: impl Into<String>) -> Self {
        Self::new(key, LeafKind::Str)
    }

    /// Declare an integer leaf.
    pub fn integer(key: impl Into<String>) -> Self {
        Self::new(key, LeafKind::Int)
    }

    /// Declare a boolean leaf.
    pub fn boolean(key: impl Into<String>) -> Self {
        Self::new(key, LeafKind::Bool)
    }

    /// Attach a default literal, applied when no source provides a value.
    pub fn default(mut self, literal: impl Into<String>) -> Self {
        self.default = Some(literal.into());
        self
    }

    /// Attach a validation constraint.
    pub fn constrain(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }
}

/// A node in the schema tree.
#[derive(Debug, Clone)]
enum SchemaNode {
    /// Named nesting; contributes one key-path segment.
    Group { key: String, children: Vec<SchemaNode> },
    /// Flattened composition; children attach directly under the parent path.
    Fragment { children: Vec<SchemaNode> },
    /// A scalar field.
    Leaf(Leaf),
}

/// Declarative description of a configurable type.
///
/// Built in code with [`Schema::new`] and the `leaf`/`group`/`fragment`
/// builder methods; every node carries an explicit source key except
/// fragments, which by construction have none and are always recursed.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    nodes: Vec<SchemaNode>,
}

impl Schema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a leaf field.
    pub fn leaf(mut self, leaf: Leaf) -> Self {
        self.nodes.push(SchemaNode::Leaf(leaf));
        self
    }

    /// Add a named nested group whose children live under `key.`.
    pub fn group(mut self, key: impl Into<String>, children: Schema) -> Self {
        self.nodes.push(SchemaNode::Group {
            key: key.into(),
            children: children.nodes,
        });
        self
    }

    /// Incorporate another schema's fields as if flattened into this one.
    ///
    /// Fragment children keep their own keys but gain no wrapping path
    /// segment, mirroring `#[serde(flatten)]` on the target struct.
    pub fn fragment(mut self, children: Schema) -> Self {
        self.nodes.push(SchemaNode::Fragment {
            children: children.nodes,
        });
        self
    }

    /// Derive the ordered leaf bindings reachable from this schema.
    ///
    /// Depth-first, declaration order; a pure function of the schema shape.
    /// An empty schema yields an empty list.
    pub fn bindings(&self) -> Vec<LeafBinding> {
        let mut out = Vec::new();
        collect_bindings(&self.nodes, "", &mut out);
        out
    }
}

/// An addressable leaf, bound to its key path and environment variable.
#[derive(Debug, Clone)]
pub struct LeafBinding {
    /// Dotted key path from the schema root.
    pub key_path: String,
    /// Environment variable that overrides this leaf.
    pub env_name: String,
    /// Declared scalar kind.
    pub kind: LeafKind,
    /// Default literal applied when no source provides a value.
    pub default: Option<String>,
    /// Constraints evaluated against the final value.
    pub constraints: Vec<Constraint>,
}

fn collect_bindings(nodes: &[SchemaNode], prefix: &str, out: &mut Vec<LeafBinding>) {
    for node in nodes {
        match node {
            SchemaNode::Leaf(leaf) => {
                let key_path = join_path(prefix, &leaf.key);
                out.push(LeafBinding {
                    env_name: env_name_for(&key_path),
                    key_path,
                    kind: leaf.kind,
                    default: leaf.default.clone(),
                    constraints: leaf.constraints.clone(),
                });
            }
            SchemaNode::Group { key, children } => {
                collect_bindings(children, &join_path(prefix, key), out);
            }
            SchemaNode::Fragment { children } => {
                collect_bindings(children, prefix, out);
            }
        }
    }
}

/// Canonical environment variable name for a dotted key path.
pub(crate) fn env_name_for(key_path: &str) -> String {
    key_path.to_ascii_uppercase().replace('.', "_")
}

/// Join nested key paths with a dot.
fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
