//! Namespace and qualified name value objects
//!
//! Outlets, options and variables are addressed by dotted qualified names
//! (`org.example.dataobject`: namespace `org.example`, name `dataobject`).
//! Lookups walk from the most specific namespace up to the root.

use std::fmt;
use std::str::FromStr;

/// Separator between namespace segments and between namespace and name.
pub const SEPARATOR: char = '.';

/// A qualified name or namespace string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid name '{input}': {reason}")]
pub struct InvalidNameError {
    pub input: String,
    pub reason: &'static str,
}

impl InvalidNameError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// Ordered list of namespace segments. The empty list is the root namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace {
    segments: Vec<String>,
}

impl Namespace {
    /// The root namespace
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dotted namespace. The empty string is the root namespace.
    pub fn parse(s: &str) -> Result<Self, InvalidNameError> {
        if s.is_empty() {
            return Ok(Self::root());
        }
        let segments = s
            .split(SEPARATOR)
            .map(|segment| {
                if segment.trim().is_empty() {
                    Err(InvalidNameError::new(s, "empty namespace segment"))
                } else {
                    Ok(segment.to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Parent namespace; the root has none.
    pub fn parent(&self) -> Option<Namespace> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Child namespace with one more trailing segment.
    pub fn child(&self, segment: &str) -> Result<Namespace, InvalidNameError> {
        if segment.is_empty() || segment.contains(SEPARATOR) {
            return Err(InvalidNameError::new(segment, "not a single namespace segment"));
        }
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Ok(Self { segments })
    }

    /// True if `self` is a prefix of (or equal to) `other`.
    pub fn is_ancestor_or_self_of(&self, other: &Namespace) -> bool {
        other.segments.len() >= self.segments.len()
            && other.segments[..self.segments.len()] == self.segments[..]
    }

    /// This namespace followed by each parent, ending with the root.
    pub fn ancestors_or_self(&self) -> impl Iterator<Item = Namespace> + '_ {
        (0..=self.segments.len()).rev().map(move |len| Namespace {
            segments: self.segments[..len].to_vec(),
        })
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl FromStr for Namespace {
    type Err = InvalidNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Namespace plus local name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    namespace: Namespace,
    name: String,
}

impl QualifiedName {
    pub fn new(namespace: Namespace, name: &str) -> Result<Self, InvalidNameError> {
        if name.trim().is_empty() {
            return Err(InvalidNameError::new(name, "name must not be empty"));
        }
        if name.contains(SEPARATOR) {
            return Err(InvalidNameError::new(name, "name must not contain '.'"));
        }
        Ok(Self {
            namespace,
            name: name.to_string(),
        })
    }

    /// Resolve a key against a default namespace.
    ///
    /// `a.b.c` always means namespace `a.b`, name `c`. A key without a
    /// separator lives in `default_namespace`.
    pub fn resolve(key: &str, default_namespace: &Namespace) -> Result<Self, InvalidNameError> {
        match key.rsplit_once(SEPARATOR) {
            Some((namespace, name)) => {
                if namespace.is_empty() {
                    return Err(InvalidNameError::new(key, "empty namespace segment"));
                }
                let namespace = Namespace::parse(namespace)
                    .map_err(|_| InvalidNameError::new(key, "empty namespace segment"))?;
                Self::new(namespace, name).map_err(|e| InvalidNameError::new(key, e.reason))
            }
            None => Self::new(default_namespace.clone(), key),
        }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Same name in a different namespace.
    pub fn with_namespace(&self, namespace: Namespace) -> Self {
        Self {
            namespace,
            name: self.name.clone(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_root() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}{}{}", self.namespace, SEPARATOR, self.name)
        }
    }
}

impl FromStr for QualifiedName {
    type Err = InvalidNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s, &Namespace::root())
    }
}
