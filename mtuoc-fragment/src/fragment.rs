use serde::{Deserialize, Serialize};

/// Role of an inline code inside a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagType {
    /// Start of a span, e.g. `<b>`
    Opening,
    /// End of a span, e.g. `</b>`
    Closing,
    /// Standalone code, e.g. `<br/>` or `{1}`
    Placeholder,
}

/// An inline code: a non-text marker anchored at a position in the fragment.
///
/// The `data` field holds the original markup verbatim. It is carried through
/// translation untouched and never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Code {
    pub id: i32,
    pub tag_type: TagType,
    /// Short type label such as `"b"` or `"x-link"`
    pub kind: String,
    /// Raw markup payload
    pub data: String,
}

impl Code {
    pub fn new(tag_type: TagType, id: i32, kind: impl Into<String>, data: impl Into<String>) -> Self {
        Code {
            id,
            tag_type,
            kind: kind.into(),
            data: data.into(),
        }
    }

    pub fn opening(id: i32, kind: impl Into<String>, data: impl Into<String>) -> Self {
        Self::new(TagType::Opening, id, kind, data)
    }

    pub fn closing(id: i32, kind: impl Into<String>, data: impl Into<String>) -> Self {
        Self::new(TagType::Closing, id, kind, data)
    }

    pub fn placeholder(id: i32, kind: impl Into<String>, data: impl Into<String>) -> Self {
        Self::new(TagType::Placeholder, id, kind, data)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    Text(String),
    Code(Code),
}

/// One translatable piece of text: text runs interleaved with inline codes.
///
/// Consecutive text appends are merged into a single run, so two fragments
/// built from the same content compare equal regardless of how the text was
/// split while building.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFragment {
    segments: Vec<Segment>,
}

impl TextFragment {
    pub fn new() -> Self {
        TextFragment {
            segments: Vec::new(),
        }
    }

    /// Append text, merging with a trailing text run. Empty strings are ignored.
    pub fn append_text(&mut self, text: &str) -> &mut Self {
        if text.is_empty() {
            return self;
        }
        match self.segments.last_mut() {
            Some(Segment::Text(last)) => last.push_str(text),
            _ => self.segments.push(Segment::Text(text.to_owned())),
        }
        self
    }

    pub fn append_code(&mut self, code: Code) -> &mut Self {
        self.segments.push(Segment::Code(code));
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True if the fragment contains at least one non-whitespace text character.
    pub fn has_text(&self) -> bool {
        self.segments.iter().any(|segment| match segment {
            Segment::Text(text) => text.chars().any(|c| !c.is_whitespace()),
            Segment::Code(_) => false,
        })
    }

    pub fn has_code(&self) -> bool {
        self.codes().next().is_some()
    }

    pub fn codes(&self) -> impl Iterator<Item = &Code> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Code(code) => Some(code),
            Segment::Text(_) => None,
        })
    }

    pub fn code_count(&self) -> usize {
        self.codes().count()
    }

    /// Deep copies of the codes, in fragment order
    pub fn cloned_codes(&self) -> Vec<Code> {
        self.codes().cloned().collect()
    }

    /// Plain text with every code removed
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Text(text) => Some(text.as_str()),
                Segment::Code(_) => None,
            })
            .collect()
    }
}

impl From<&str> for TextFragment {
    fn from(text: &str) -> Self {
        let mut fragment = TextFragment::new();
        fragment.append_text(text);
        fragment
    }
}

impl From<String> for TextFragment {
    fn from(text: String) -> Self {
        TextFragment::from(text.as_str())
    }
}

/// Renders the fragment with each code's original markup in place.
impl std::fmt::Display for TextFragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => write!(f, "{}", text)?,
                Segment::Code(code) => write!(f, "{}", code.data)?,
            }
        }
        Ok(())
    }
}
