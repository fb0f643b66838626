//! ScenePath parsing and formatting.
//!
//! A scene path is the slash-separated list of GameObject names leading from
//! some root object down to a descendant:
//!   "Armature/Hips/Spine" -> segments=["Armature","Hips","Spine"]
//!   ""                    -> the root itself (no segments)
//!
//! Animation clips bind curves by this relative path, so it is kept as plain
//! strings and never interpreted beyond segment splitting.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ScenePath {
    pub segments: Vec<String>,
}

impl ScenePath {
    /// The empty path, addressing the root object itself.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// Parse a path string. The empty string is the root path; any other
    /// input must not contain empty segments.
    pub fn parse(s: &str) -> Result<Self, String> {
        if s.is_empty() {
            return Ok(Self::root());
        }
        let parts: Vec<&str> = s.split('/').collect();
        if parts.iter().any(|seg| seg.is_empty()) {
            return Err(format!("invalid scene path '{s}': empty segment"));
        }
        Ok(Self {
            segments: parts.into_iter().map(str::to_string).collect(),
        })
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|s| s.as_str())
    }

    /// Last segment (the object name), `None` for the root path.
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(|s| s.as_str())
    }

    /// Append `other` below this path.
    pub fn join(&self, other: &ScenePath) -> ScenePath {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        ScenePath { segments }
    }

    pub fn parent(&self) -> Option<ScenePath> {
        if self.segments.is_empty() {
            return None;
        }
        let mut segments = self.segments.clone();
        segments.pop();
        Some(ScenePath { segments })
    }
}

impl fmt::Display for ScenePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl FromStr for ScenePath {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenePath::parse(s)
    }
}

impl Serialize for ScenePath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ScenePath {
    fn deserialize<D>(deserializer: D) -> Result<ScenePath, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ScenePath::parse(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_nested() {
        let p = ScenePath::parse("Armature/Hips/Spine").unwrap();
        assert_eq!(p.segments, vec!["Armature", "Hips", "Spine"]);
        assert_eq!(p.name(), Some("Spine"));
        assert_eq!(p.to_string(), "Armature/Hips/Spine");
    }

    #[test]
    fn empty_is_root() {
        let p = ScenePath::parse("").unwrap();
        assert!(p.is_root());
        assert_eq!(p.to_string(), "");
        assert!(p.parent().is_none());
    }

    #[test]
    fn rejects_empty_segments() {
        assert!(ScenePath::parse("a//b").is_err());
        assert!(ScenePath::parse("/a").is_err());
        assert!(ScenePath::parse("a/").is_err());
    }

    #[test]
    fn join_and_parent() {
        let base = ScenePath::parse("Wearable").unwrap();
        let p = base.join(&ScenePath::parse("Armature/Hips").unwrap());
        assert_eq!(p.to_string(), "Wearable/Armature/Hips");
        assert_eq!(p.parent().unwrap().to_string(), "Wearable/Armature");
    }
}
