use ipld_core::{cid::Cid, ipld::Ipld};

/// The key that marks a one-key mapping as a link in formats that do not tag
/// links natively
pub const LINK_MARKER: &str = "/";

/// How a value produced by [crate::Format::resolve] relates to links
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkShape {
    /// Plain data
    Data,
    /// A link to the node identified by the [Cid]
    Link(Cid),
    /// A `{"/": ...}` mapping whose payload does not decode to a [Cid]
    Malformed,
}

impl LinkShape {
    /// Classify `value`.
    ///
    /// [`Ipld::Link`] is always a link. A mapping with exactly one entry keyed
    /// by [LINK_MARKER] is a link when its payload is a CID string, CID bytes
    /// or a tagged link, and [LinkShape::Malformed] otherwise.
    pub fn classify(value: &Ipld) -> Self {
        match value {
            Ipld::Link(cid) => LinkShape::Link(*cid),
            Ipld::Map(map) if map.len() == 1 => match map.get(LINK_MARKER) {
                None => LinkShape::Data,
                Some(Ipld::Link(cid)) => LinkShape::Link(*cid),
                Some(Ipld::String(encoded)) => Cid::try_from(encoded.as_str())
                    .map(LinkShape::Link)
                    .unwrap_or(LinkShape::Malformed),
                Some(Ipld::Bytes(encoded)) => Cid::try_from(encoded.as_slice())
                    .map(LinkShape::Link)
                    .unwrap_or(LinkShape::Malformed),
                Some(_) => LinkShape::Malformed,
            },
            _ => LinkShape::Data,
        }
    }

    /// The linked [Cid], if any
    pub fn cid(&self) -> Option<Cid> {
        match self {
            LinkShape::Link(cid) => Some(*cid),
            _ => None,
        }
    }

    /// True for anything other than [LinkShape::Data]
    pub fn is_link_shaped(&self) -> bool {
        !matches!(self, LinkShape::Data)
    }
}
