use std::{convert::Infallible, fmt::Display, str::FromStr};

/// The separator between path segments
pub const PATH_SEPARATOR: char = '/';

/// A normalized, `/`-delimited path into a DAG.
///
/// Empty segments (from leading, trailing or doubled separators) and `.`
/// segments carry no meaning and are dropped while parsing, so `/a//./b/`
/// and `a/b` are the same [Path]. The root path has no segments and renders
/// as the empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// The path with no segments
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse and normalize a `/`-delimited path
    pub fn parse(path: &str) -> Self {
        path.split(PATH_SEPARATOR)
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .collect()
    }

    /// True when no segments remain
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The number of segments in this path
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Same as [Path::is_root]
    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    /// The individual segments of this path
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The path that remains after the first `count` segments are consumed
    pub fn skip(&self, count: usize) -> Self {
        Self {
            segments: self.segments.iter().skip(count).cloned().collect(),
        }
    }

    /// The path made of the first `count` segments
    pub fn take(&self, count: usize) -> Self {
        Self {
            segments: self.segments.iter().take(count).cloned().collect(),
        }
    }

    /// Append the segments of `other` to this path
    pub fn join(&self, other: &Path) -> Self {
        Self {
            segments: self
                .segments
                .iter()
                .chain(other.segments.iter())
                .cloned()
                .collect(),
        }
    }
}

impl<S> FromIterator<S> for Path
where
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                write!(f, "{PATH_SEPARATOR}")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = Infallible;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        Ok(Path::parse(path))
    }
}

impl From<&str> for Path {
    fn from(path: &str) -> Self {
        Path::parse(path)
    }
}

impl From<String> for Path {
    fn from(path: String) -> Self {
        Path::parse(&path)
    }
}

impl PartialEq<str> for Path {
    fn eq(&self, other: &str) -> bool {
        *self == Path::parse(other)
    }
}

impl PartialEq<&str> for Path {
    fn eq(&self, other: &&str) -> bool {
        *self == Path::parse(other)
    }
}
