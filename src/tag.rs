use std::fmt;

/// One directive parsed from a field's annotation string.
///
/// Value-carrying variants hold the raw payload: an integer literal or the
/// name of a sibling field for lengths and offsets, the routine name for
/// [`Tag::Func`]. Only [`Tag::Element`] carries nested tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    /// `-`: skip the field entirely.
    Ignore,
    /// `len:V`
    Length(String),
    /// `offset:V`, relative to the current stream position.
    OffsetCurrent(String),
    /// `offsetStart:V`
    OffsetStart(String),
    /// `offsetEnd:V`
    OffsetEnd(String),
    /// `[...]`: the tags applied to each element of a container field.
    Element(Vec<Tag>),
    /// `func:Name` or a bare `Name`.
    Func(String),
}

/// The payload-free discriminant of a [`Tag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Ignore,
    Length,
    OffsetCurrent,
    OffsetStart,
    OffsetEnd,
    Element,
    Func,
}

pub(crate) const IGNORE_MARKER: &str = "-";

impl TagKind {
    /// Classifies a `key:value` directive key.
    ///
    /// Only value-carrying kinds have a key; `-` and bracket groups are
    /// recognized structurally.
    pub fn from_key(key: &str) -> Option<TagKind> {
        match key {
            "len" => Some(TagKind::Length),
            "offset" => Some(TagKind::OffsetCurrent),
            "offsetStart" => Some(TagKind::OffsetStart),
            "offsetEnd" => Some(TagKind::OffsetEnd),
            "func" => Some(TagKind::Func),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<&'static str> {
        match self {
            TagKind::Length => Some("len"),
            TagKind::OffsetCurrent => Some("offset"),
            TagKind::OffsetStart => Some("offsetStart"),
            TagKind::OffsetEnd => Some("offsetEnd"),
            TagKind::Func => Some("func"),
            TagKind::Ignore | TagKind::Element => None,
        }
    }
}

impl Tag {
    /// Builds a value-carrying tag of the given kind.
    ///
    /// Returns `None` for [`TagKind::Ignore`] and [`TagKind::Element`], which
    /// carry no string payload.
    pub fn with_value(kind: TagKind, value: impl Into<String>) -> Option<Tag> {
        let value = value.into();
        match kind {
            TagKind::Length => Some(Tag::Length(value)),
            TagKind::OffsetCurrent => Some(Tag::OffsetCurrent(value)),
            TagKind::OffsetStart => Some(Tag::OffsetStart(value)),
            TagKind::OffsetEnd => Some(Tag::OffsetEnd(value)),
            TagKind::Func => Some(Tag::Func(value)),
            TagKind::Ignore | TagKind::Element => None,
        }
    }

    pub fn kind(&self) -> TagKind {
        match self {
            Tag::Ignore => TagKind::Ignore,
            Tag::Length(_) => TagKind::Length,
            Tag::OffsetCurrent(_) => TagKind::OffsetCurrent,
            Tag::OffsetStart(_) => TagKind::OffsetStart,
            Tag::OffsetEnd(_) => TagKind::OffsetEnd,
            Tag::Element(_) => TagKind::Element,
            Tag::Func(_) => TagKind::Func,
        }
    }

    /// The raw string payload, if this tag carries one.
    pub fn value(&self) -> Option<&str> {
        match self {
            Tag::Length(v)
            | Tag::OffsetCurrent(v)
            | Tag::OffsetStart(v)
            | Tag::OffsetEnd(v)
            | Tag::Func(v) => Some(v),
            Tag::Ignore | Tag::Element(_) => None,
        }
    }

    /// The nested element tags, if this is an element descriptor.
    pub fn element_tags(&self) -> Option<&[Tag]> {
        match self {
            Tag::Element(tags) => Some(tags),
            _ => None,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Ignore => f.write_str(IGNORE_MARKER),
            Tag::Element(tags) => {
                f.write_str("[")?;
                for (i, tag) in tags.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{tag}")?;
                }
                f.write_str("]")
            }
            tag => {
                // Every remaining variant has both a key and a value.
                let key = tag.kind().key().unwrap_or_default();
                let value = tag.value().unwrap_or_default();
                write!(f, "{key}:{value}")
            }
        }
    }
}
