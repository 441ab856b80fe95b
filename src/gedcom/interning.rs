//! Key Interning
//!
//!     Every GEDCOM line carries a tag and often an xref, and a file repeats the same few
//!     hundred of them hundreds of thousands of times. The lexer hands each of them to a
//!     [KeyTable], which returns a shared [Key]: the first occurrence allocates, every later
//!     occurrence returns the same instance. Two keys from one table are equal exactly when
//!     they are the same allocation, so hot comparisons can use [Rc::ptr_eq].
//!
//!     The table is a sorted vector searched with a binary search. Candidate spans have
//!     their leading whitespace skipped, and trailing whitespace does not take part in the
//!     comparison, so `"FOO "` and `"FOO"` intern to the same key.
//!
//!     A table belongs to one parse. The lexer owns two of them, one for tags and one for
//!     xrefs. Nothing is ever removed.

use std::cmp::Ordering;
use std::rc::Rc;

/// An interned tag or xref.
pub type Key = Rc<str>;

/// Sorted, append-only interning table.
#[derive(Debug, Clone)]
pub struct KeyTable {
    keys: Vec<Key>,
    empty: Key,
}

impl KeyTable {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            empty: Rc::from(""),
        }
    }

    /// Intern `length` bytes of `buffer` starting at `start`.
    ///
    /// Out of range spans are clamped to the buffer and widened to character boundaries.
    /// An empty (or all whitespace) span yields the shared empty key and is not stored.
    pub fn intern(&mut self, buffer: &str, start: usize, length: usize) -> Key {
        let candidate = clamp_span(buffer, start, length).trim_start();
        if candidate.trim_end().is_empty() {
            return self.empty.clone();
        }

        match self
            .keys
            .binary_search_by(|stored| compare_padded(stored, candidate))
        {
            Ok(index) => self.keys[index].clone(),
            Err(_) => {
                let trimmed = candidate.trim_end();
                // Re-locate with the trimmed text so the vector stays strictly sorted.
                let index = match self.keys.binary_search_by(|stored| (**stored).cmp(trimmed)) {
                    Ok(index) => return self.keys[index].clone(),
                    Err(index) => index,
                };
                let key: Key = Rc::from(trimmed);
                self.keys.insert(index, key.clone());
                key
            }
        }
    }

    /// Intern a whole string.
    pub fn intern_str(&mut self, text: &str) -> Key {
        self.intern(text, 0, text.len())
    }

    /// Look up a string without inserting it.
    pub fn get(&self, text: &str) -> Option<&Key> {
        let candidate = text.trim();
        self.keys
            .binary_search_by(|stored| (**stored).cmp(candidate))
            .ok()
            .map(|index| &self.keys[index])
    }

    pub fn contains(&self, text: &str) -> bool {
        self.get(text).is_some()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Interned strings in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|key| &**key)
    }
}

impl Default for KeyTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Order `stored` against `candidate`, treating trailing whitespace on the candidate as
/// padding.
fn compare_padded(stored: &str, candidate: &str) -> Ordering {
    let mut stored_chars = stored.chars();
    let mut candidate_chars = candidate.chars();
    loop {
        match (stored_chars.next(), candidate_chars.next()) {
            (None, None) => return Ordering::Equal,
            (Some(_), None) => return Ordering::Greater,
            (None, Some(next)) => {
                // The stored key is shorter: equal only if the rest is padding.
                if next.is_whitespace() && candidate_chars.all(char::is_whitespace) {
                    return Ordering::Equal;
                }
                return Ordering::Less;
            }
            (Some(left), Some(right)) => match left.cmp(&right) {
                Ordering::Equal => continue,
                other => return other,
            },
        }
    }
}

fn clamp_span(buffer: &str, start: usize, length: usize) -> &str {
    let mut end = start.saturating_add(length).min(buffer.len());
    let mut start = start.min(end);
    while !buffer.is_char_boundary(start) {
        start -= 1;
    }
    while !buffer.is_char_boundary(end) {
        end += 1;
    }
    &buffer[start..end]
}
