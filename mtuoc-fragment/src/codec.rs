//! Coded-HTML representation of text fragments
//!
//! MT engines that accept HTML tend to pass simple tags through untouched and
//! translate the text around them. Before a fragment is sent, its text is
//! entity-escaped and every inline code is replaced by an inert tag that only
//! carries the code id:
//!
//! | Code                                      | Placeholder        |
//! |-------------------------------------------|--------------------|
//! | Opening code with a matching closing code | `<u id='N'>`       |
//! | The matching closing code                 | `</u>`             |
//! | Opening code without a partner            | `<br id='bN'/>`    |
//! | Closing code without a partner            | `<br id='eN'/>`    |
//! | Placeholder code                          | `<br id='pN'/>`    |
//!
//! Decoding goes the other way, mapping each placeholder back onto a clone of
//! the code with the same id taken from the source fragment. The raw markup of
//! a code never leaves the process.
//!
//! # Example
//!
//! ```
//! use mtuoc_fragment::{Code, TextFragment, from_coded_html, to_coded_html};
//!
//! let mut source = TextFragment::new();
//! source
//!     .append_text("Hello ")
//!     .append_code(Code::opening(1, "b", "<b>"))
//!     .append_text("world")
//!     .append_code(Code::closing(1, "b", "</b>"));
//!
//! assert_eq!(to_coded_html(&source), "Hello <u id='1'>world</u>");
//!
//! let target = from_coded_html("Bonjour <u id='1'>le monde</u>", &source, true);
//! assert_eq!(target.to_string(), "Bonjour <b>le monde</b>");
//! ```

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::fragment::{Code, Segment, TagType, TextFragment};

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<u\s+id\s*=\s*['"](-?\d+)['"]\s*>|</u\s*>|<br\s+id\s*=\s*['"]([bep])(-?\d+)['"]\s*/?>"#,
    )
    .expect("placeholder pattern is valid")
});

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#[xX]([0-9a-fA-F]+)|#([0-9]+)|(amp|lt|gt|quot|apos));")
        .expect("entity pattern is valid")
});

/// Encode a fragment into the coded-HTML string sent to the MT engine.
pub fn to_coded_html(fragment: &TextFragment) -> String {
    let paired = find_paired_codes(fragment.segments());
    let mut html = String::new();

    for (index, segment) in fragment.segments().iter().enumerate() {
        match segment {
            Segment::Text(text) => escape_into(text, &mut html),
            Segment::Code(code) => {
                let placeholder = match (code.tag_type, paired[index]) {
                    (TagType::Opening, true) => format!("<u id='{}'>", code.id),
                    (TagType::Closing, true) => "</u>".to_string(),
                    (TagType::Opening, false) => format!("<br id='b{}'/>", code.id),
                    (TagType::Closing, false) => format!("<br id='e{}'/>", code.id),
                    (TagType::Placeholder, _) => format!("<br id='p{}'/>", code.id),
                };
                html.push_str(&placeholder);
            }
        }
    }

    html
}

/// Decode a coded-HTML string back into a fragment.
///
/// Codes are never rebuilt from the HTML: each placeholder is resolved against
/// `template` (normally the source fragment) and replaced by a clone of the
/// code with the same id and tag type. Placeholders that reference unknown
/// ids, that repeat an already-placed code, or `</u>` tags with no open
/// `<u>` are dropped.
///
/// With `add_missing_codes`, template codes that do not appear in `html` are
/// appended at the end in template order, so the result always carries the
/// same codes as the template.
pub fn from_coded_html(html: &str, template: &TextFragment, add_missing_codes: bool) -> TextFragment {
    let mut pool = CodePool::new(template.cloned_codes());
    let mut fragment = TextFragment::new();
    // Ids of open `<u>` spans; None for spans whose opening code was dropped
    let mut open_spans: Vec<Option<i32>> = Vec::new();
    let mut last_end = 0;

    for caps in PLACEHOLDER_RE.captures_iter(html) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        fragment.append_text(&unescape(&html[last_end..whole.start()]));
        last_end = whole.end();

        if let Some(id) = caps.get(1) {
            let placed = parse_id(id.as_str()).and_then(|id| pool.take(id, TagType::Opening));
            open_spans.push(placed.as_ref().map(|code| code.id));
            if let Some(code) = placed {
                fragment.append_code(code);
            }
        } else if let Some(prefix) = caps.get(2) {
            let tag_type = match prefix.as_str() {
                "b" => TagType::Opening,
                "e" => TagType::Closing,
                _ => TagType::Placeholder,
            };
            let placed = caps
                .get(3)
                .and_then(|id| parse_id(id.as_str()))
                .and_then(|id| pool.take(id, tag_type));
            if let Some(code) = placed {
                fragment.append_code(code);
            }
        } else if let Some(Some(id)) = open_spans.pop() {
            if let Some(code) = pool.take(id, TagType::Closing) {
                fragment.append_code(code);
            }
        }
    }
    fragment.append_text(&unescape(&html[last_end..]));

    if add_missing_codes {
        for code in pool.into_unused() {
            fragment.append_code(code);
        }
    }

    fragment
}

/// Marks the opening/closing codes that can be written as a `<u>` span.
///
/// A closing code pairs only with the innermost open span carrying its id, so
/// every emitted `</u>` closes the most recent `<u>` and decoding can use a
/// plain stack.
fn find_paired_codes(segments: &[Segment]) -> Vec<bool> {
    let mut paired = vec![false; segments.len()];
    let mut open: Vec<(usize, i32)> = Vec::new();

    for (index, segment) in segments.iter().enumerate() {
        let Segment::Code(code) = segment else {
            continue;
        };
        match code.tag_type {
            TagType::Opening => open.push((index, code.id)),
            TagType::Closing => {
                if let Some(&(open_index, id)) = open.last() {
                    if id == code.id {
                        open.pop();
                        paired[open_index] = true;
                        paired[index] = true;
                    }
                }
            }
            TagType::Placeholder => {}
        }
    }

    paired
}

fn parse_id(id: &str) -> Option<i32> {
    id.parse::<i32>().ok()
}

fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn unescape(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let decoded = if let Some(hex) = caps.get(1) {
                u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = caps.get(2) {
                dec.as_str().parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match caps.get(3).map(|m| m.as_str()) {
                    Some("amp") => Some('&'),
                    Some("lt") => Some('<'),
                    Some("gt") => Some('>'),
                    Some("quot") => Some('"'),
                    Some("apos") => Some('\''),
                    _ => None,
                }
            };
            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Template codes available for placement, each usable once.
struct CodePool {
    codes: Vec<Code>,
    used: Vec<bool>,
}

impl CodePool {
    fn new(codes: Vec<Code>) -> Self {
        let used = vec![false; codes.len()];
        CodePool { codes, used }
    }

    fn take(&mut self, id: i32, tag_type: TagType) -> Option<Code> {
        let index = self
            .codes
            .iter()
            .zip(&self.used)
            .position(|(code, used)| !used && code.id == id && code.tag_type == tag_type)?;
        self.used[index] = true;
        Some(self.codes[index].clone())
    }

    fn into_unused(self) -> impl Iterator<Item = Code> {
        self.codes
            .into_iter()
            .zip(self.used)
            .filter_map(|(code, used)| (!used).then_some(code))
    }
}
