//! Hierarchical property paths.

use core::fmt;

/// Slash-separated, normalised path into the property tree.
///
/// Empty segments are dropped, so `"/dboards//A/"` and `"dboards/A"` name
/// the same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PropertyPath(String);

impl PropertyPath {
    pub fn new(raw: &str) -> Self {
        let mut out = String::with_capacity(raw.len());
        for seg in raw.split('/').filter(|s| !s.is_empty()) {
            if !out.is_empty() {
                out.push('/');
            }
            out.push_str(seg);
        }
        Self(out)
    }

    /// The tree root (empty path).
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Append one or more segments.
    #[must_use]
    pub fn join(&self, seg: impl fmt::Display) -> Self {
        let tail = Self::new(&seg.to_string());
        match (self.0.is_empty(), tail.0.is_empty()) {
            (_, true) => self.clone(),
            (true, false) => tail,
            (false, false) => Self(format!("{}/{}", self.0, tail.0)),
        }
    }

    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            return None;
        }
        Some(match self.0.rfind('/') {
            Some(idx) => Self(self.0[..idx].to_owned()),
            None => Self::root(),
        })
    }

    /// Last segment, or `""` for the root.
    pub fn leaf(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or("")
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// True if `self` is `other` or lies below it.
    pub fn starts_with(&self, other: &PropertyPath) -> bool {
        other.0.is_empty()
            || self.0 == other.0
            || (self.0.starts_with(&other.0) && self.0.as_bytes().get(other.0.len()) == Some(&b'/'))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PropertyPath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<&PropertyPath> for PropertyPath {
    fn from(p: &PropertyPath) -> Self {
        p.clone()
    }
}

impl From<String> for PropertyPath {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalises_slashes() {
        assert_eq!(PropertyPath::new("/dboards//A/").as_str(), "dboards/A");
        assert_eq!(PropertyPath::new("///").as_str(), "");
    }

    #[test]
    fn join_and_parent() {
        let p = PropertyPath::new("dboards").join('A').join("rx_frontends/0");
        assert_eq!(p.as_str(), "dboards/A/rx_frontends/0");
        assert_eq!(p.leaf(), "0");
        assert_eq!(p.parent().unwrap().as_str(), "dboards/A/rx_frontends");
        assert_eq!(PropertyPath::new("x").parent(), Some(PropertyPath::root()));
        assert_eq!(PropertyPath::root().parent(), None);
        assert_eq!(PropertyPath::root().join("tick_rate").as_str(), "tick_rate");
    }

    #[test]
    fn prefix_respects_segment_boundaries() {
        let p = PropertyPath::new("dboards/AB/eeprom");
        assert!(p.starts_with(&PropertyPath::new("dboards/AB")));
        assert!(!p.starts_with(&PropertyPath::new("dboards/A")));
        assert!(p.starts_with(&PropertyPath::root()));
    }
}
