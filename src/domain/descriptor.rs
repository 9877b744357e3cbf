//! Type reference extraction from a single line of smali text.
//!
//! A type descriptor starts at an `L` and ends at the next `;`, e.g.
//! `Lcom/example/Foo;`. Generic signatures nest descriptors inside angle
//! brackets (`Lcom/a/Box<Lcom/a/Item;>;`); their arguments are scanned as an
//! independent piece of text.

use crate::domain::class_name::{ClassName, descriptor_to_class_name};
use std::collections::BTreeSet;
use tracing::debug;

const DESCRIPTOR_START: char = 'L';
const DESCRIPTOR_END: char = ';';
const GENERIC_OPEN: u8 = b'<';
const GENERIC_CLOSE: u8 = b'>';

/// Generic arguments nested deeper than this are not descended into.
pub const MAX_GENERIC_DEPTH: usize = 32;

/// A descriptor body as it appears in the text (`com/a/Foo`), before any
/// resolution or filtering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawReference(String);

impl RawReference {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The slash-separated form, as matched by path filters.
    pub fn as_path(&self) -> &str {
        &self.0
    }

    pub fn class_name(&self) -> ClassName {
        descriptor_to_class_name(&self.0)
    }
}

/// Distinct type references embedded in `line`.
pub fn extract_references(line: &str) -> BTreeSet<RawReference> {
    let mut found = BTreeSet::new();
    scan(line, 0, &mut found);
    found
}

/// Same as [`extract_references`], resolved to dotted class names.
pub fn extract_class_names(line: &str) -> BTreeSet<ClassName> {
    extract_references(line)
        .iter()
        .map(RawReference::class_name)
        .collect()
}

fn scan(text: &str, depth: usize, found: &mut BTreeSet<RawReference>) {
    let mut cursor = 0;
    while let Some(offset) = text[cursor..].find(DESCRIPTOR_START) {
        let body_start = cursor + offset + 1;
        let Some(length) = text[body_start..].find(DESCRIPTOR_END) else {
            // unterminated descriptor
            break;
        };
        let body_end = body_start + length;
        let candidate = &text[body_start..body_end];

        if !is_descriptor_body(candidate) {
            cursor = body_start;
            continue;
        }

        let Some(open) = generic_open(candidate) else {
            found.insert(RawReference::new(candidate));
            cursor = body_end + 1;
            continue;
        };

        if open > 0 {
            found.insert(RawReference::new(&candidate[..open]));
        }
        let open_in_text = body_start + open;
        let close = matching_close(text, open_in_text);
        let arguments_end = close.unwrap_or(text.len());

        if depth < MAX_GENERIC_DEPTH {
            scan(&text[open_in_text + 1..arguments_end], depth + 1, found);
        } else {
            debug!(depth, "generic nesting too deep, arguments skipped");
        }

        match close {
            Some(close) => cursor = close + 1,
            // unbalanced brackets: the arguments ran to the end of the text
            None => break,
        }
    }
}

fn is_descriptor_body(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'/' | b'$' | b'<' | b'>'))
}

/// Position of a `<` that opens generic arguments, i.e. is directly followed
/// by another descriptor.
fn generic_open(candidate: &str) -> Option<usize> {
    let open = candidate.find(GENERIC_OPEN as char)?;
    candidate[open + 1..]
        .starts_with(DESCRIPTOR_START)
        .then_some(open)
}

fn matching_close(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (index, byte) in text.bytes().enumerate().skip(open) {
        match byte {
            GENERIC_OPEN => depth += 1,
            GENERIC_CLOSE => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}
