use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::wiki_word::is_single_wiki_word;

pub const PATH_SEPARATOR: char = '.';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("invalid page path: {0:?}")]
    InvalidPath(String),
}

/// Qualified name of a page: the simple names leading from a root to it.
///
/// The empty path addresses the root itself. Paths render as dot-joined
/// names (`ProjectDocs.ApiReference`) and parsing a rendered path always
/// yields the same sequence of names.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PagePath {
    names: Vec<String>,
}

impl PagePath {
    /// The path of the root page
    pub fn root() -> Self {
        Self { names: Vec::new() }
    }

    /// Parse a qualified name.
    ///
    /// A single leading `.` marks the path as absolute and is accepted
    /// but not kept. The empty string and a lone `.` parse to the root.
    pub fn parse(text: &str) -> Result<Self, PathError> {
        let trimmed = text.strip_prefix(PATH_SEPARATOR).unwrap_or(text);
        if trimmed.is_empty() {
            return Ok(Self::root());
        }

        let names = trimmed
            .split(PATH_SEPARATOR)
            .map(|name| {
                if is_single_wiki_word(name) {
                    Ok(name.to_string())
                } else {
                    Err(PathError::InvalidPath(text.to_string()))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { names })
    }

    /// Build a path from already-validated names
    pub fn from_names<I, S>(names: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if let Some(bad) = names.iter().find(|name| !is_single_wiki_word(name)) {
            return Err(PathError::InvalidPath(bad.clone()));
        }
        Ok(Self { names })
    }

    pub fn render(&self) -> String {
        self.names.join(&PATH_SEPARATOR.to_string())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_root(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The simple name of the addressed page, `None` for the root
    pub fn last(&self) -> Option<&str> {
        self.names.last().map(String::as_str)
    }

    pub fn parent_path(&self) -> Result<Self, PathError> {
        match self.names.split_last() {
            Some((_, parent)) => Ok(Self {
                names: parent.to_vec(),
            }),
            None => Err(PathError::InvalidPath(self.render())),
        }
    }

    /// Same path with its last name swapped for `name`
    pub fn with_last_replaced(&self, name: &str) -> Result<Self, PathError> {
        let mut parent = self.parent_path()?;
        parent.push(name)?;
        Ok(parent)
    }

    /// Append a child name
    pub fn push(&mut self, name: &str) -> Result<(), PathError> {
        if !is_single_wiki_word(name) {
            return Err(PathError::InvalidPath(name.to_string()));
        }
        self.names.push(name.to_string());
        Ok(())
    }

    /// Path of the child `name` of this path
    pub fn join(&self, name: &str) -> Result<Self, PathError> {
        let mut path = self.clone();
        path.push(name)?;
        Ok(path)
    }

    /// Whether `self` is `ancestor` or lies somewhere beneath it
    pub fn starts_with(&self, ancestor: &PagePath) -> bool {
        self.names.starts_with(&ancestor.names)
    }
}

impl fmt::Display for PagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl FromStr for PagePath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for PagePath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.render())
    }
}

impl<'de> Deserialize<'de> for PagePath {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
