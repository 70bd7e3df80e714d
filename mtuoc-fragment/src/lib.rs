//! Text fragments for MT connectors
//!
//! A [`TextFragment`] is one translatable unit of text: plain text runs
//! interleaved with inline [`Code`]s such as bold or link boundaries. Codes are
//! opaque to translation; they must come back from an MT engine in the right
//! place and unchanged.
//!
//! The [`codec`] module converts fragments to and from the coded-HTML string
//! that HTML-aware MT engines accept.

pub mod codec;
pub mod fragment;

pub use codec::{from_coded_html, to_coded_html};
pub use fragment::{Code, Segment, TagType, TextFragment};
