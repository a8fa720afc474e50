//! Locations inside a tree being translated.
//!
//! A [`Path`] is a persistent cons-list: extending a path shares the parent
//! chain instead of copying it, so every recursion step can hold its own path
//! cheaply. Two paths are equal iff their full chains are equal.

use std::fmt;
use std::sync::Arc;

/// One step of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathKey {
    Field(String),
    Index(usize),
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

#[derive(Debug)]
struct Step {
    key: PathKey,
    parent: Path,
    depth: usize,
}

/// A chain of field/index steps from the tree root.
#[derive(Clone, Default)]
pub struct Path(Option<Arc<Step>>);

impl Path {
    /// The empty path.
    pub fn empty() -> Self {
        Self(None)
    }

    /// The path at which a translation starts: a single `root` step.
    pub fn root() -> Self {
        Self::empty().field("root")
    }

    pub fn field(&self, name: impl Into<String>) -> Self {
        self.push(PathKey::Field(name.into()))
    }

    pub fn index(&self, index: usize) -> Self {
        self.push(PathKey::Index(index))
    }

    fn push(&self, key: PathKey) -> Self {
        Self(Some(Arc::new(Step {
            key,
            parent: self.clone(),
            depth: self.depth() + 1,
        })))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Number of steps in the chain.
    pub fn depth(&self) -> usize {
        self.0.as_ref().map_or(0, |step| step.depth)
    }

    /// The last step, if any.
    pub fn key(&self) -> Option<&PathKey> {
        self.0.as_ref().map(|step| &step.key)
    }

    pub fn parent(&self) -> Option<&Path> {
        self.0.as_ref().map(|step| &step.parent)
    }

    /// Steps from root to leaf.
    pub fn keys(&self) -> Vec<&PathKey> {
        let mut keys = Vec::with_capacity(self.depth());
        let mut cursor = self;
        while let Some(step) = &cursor.0 {
            keys.push(&step.key);
            cursor = &step.parent;
        }
        keys.reverse();
        keys
    }

    /// Whether `prefix` is this path or one of its ancestors.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        let mut cursor = self;
        while cursor.depth() > prefix.depth() {
            match cursor.parent() {
                Some(parent) => cursor = parent,
                None => return false,
            }
        }
        cursor == prefix
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        let (mut a, mut b) = (self, other);
        loop {
            match (&a.0, &b.0) {
                (None, None) => return true,
                (Some(x), Some(y)) => {
                    if Arc::ptr_eq(x, y) {
                        return true;
                    }
                    if x.depth != y.depth || x.key != y.key {
                        return false;
                    }
                    a = &x.parent;
                    b = &y.parent;
                }
                _ => return false,
            }
        }
    }
}

impl Eq for Path {}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.keys().into_iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path({self})")
    }
}
