//! Character-level scanning of XML markup.
//!
//! Range resolvers use the [`Scanner`] to find the tag, attribute or entity
//! reference an error refers to. The scanner does not parse XML: it walks the
//! raw text around an offset and tolerates the malformed markup the errors
//! are about.

use std::ops::Range;

/// A half-open character-offset span.
pub(crate) type Span = Range<usize>;

/// An attribute found inside a start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Attribute {
    pub(crate) name: Span,
    /// Value span including its quotes; `None` when the attribute has no `=`
    /// or no opening quote.
    pub(crate) value: Option<Span>,
}

/// Scanner over the characters of a document.
pub(crate) struct Scanner {
    chars: Vec<char>,
}

impl Scanner {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }

    /// Name of the nearest start tag named `name` opening at or before `offset`.
    pub(crate) fn named_start_tag_before(&self, offset: usize, name: &str) -> Option<Span> {
        self.start_tags_before(offset)
            .filter_map(|lt| self.name_at(lt + 1))
            .find(|span| self.matches_name(span, name))
    }

    /// Name of the nearest start tag named `name` that is still open at
    /// `offset`. Same-named elements closed before `offset` and empty-element
    /// tags are skipped.
    pub(crate) fn unclosed_start_tag_before(&self, offset: usize, name: &str) -> Option<Span> {
        let end = offset.saturating_add(1).min(self.chars.len());
        let mut depth = 0usize;
        for i in (0..end).rev() {
            if self.chars[i] != '<' {
                continue;
            }
            if self.get(i + 1) == Some('/') {
                if self
                    .name_at(i + 2)
                    .is_some_and(|span| self.matches_name(&span, name))
                {
                    depth += 1;
                }
                continue;
            }

            let Some(span) = self.name_at(i + 1) else {
                continue;
            };
            if !self.matches_name(&span, name) || self.is_empty_element_tag(i) {
                continue;
            }
            if depth == 0 {
                return Some(span);
            }
            depth -= 1;
        }
        None
    }

    /// Name of the nearest end tag opening at or before `offset`.
    pub(crate) fn end_tag_name_before(&self, offset: usize) -> Option<Span> {
        let lt = self.end_tag_before(offset)?;
        self.name_at(lt + 2)
    }

    /// Text between the nearest end tag at or before `offset` and the markup
    /// preceding it. `None` when that text is empty.
    pub(crate) fn content_before_end_tag(&self, offset: usize) -> Option<Span> {
        let lt = self.end_tag_before(offset)?;
        let gt = (0..lt).rev().find(|&i| self.chars[i] == '>')?;
        (gt + 1 < lt).then(|| gt + 1..lt)
    }

    /// Name of the document's root start tag.
    pub(crate) fn root_start_tag_name(&self) -> Option<Span> {
        let lt = self.root_start_tag()?;
        self.name_at(lt + 1)
    }

    /// Attribute `name` of the document's root start tag.
    pub(crate) fn root_attribute(&self, name: &str) -> Option<Attribute> {
        let lt = self.root_start_tag()?;
        self.attributes(lt)
            .into_iter()
            .find(|attribute| self.matches_name(&attribute.name, name))
    }

    /// Attribute `name` of the nearest start tag opening at or before
    /// `offset` that carries it. When the tag repeats the attribute, the last
    /// occurrence starting at or before `offset` wins.
    ///
    /// A stray `<` inside an attribute value looks like a start tag, so tags
    /// without the attribute are skipped.
    pub(crate) fn attribute_before(&self, offset: usize, name: &str) -> Option<Attribute> {
        self.start_tags_before(offset).find_map(|lt| {
            self.attributes(lt)
                .into_iter()
                .rev()
                .filter(|attribute| attribute.name.start <= offset)
                .find(|attribute| self.matches_name(&attribute.name, name))
        })
    }

    /// Entity reference (`&name;` or an unterminated `&name`) ending at or
    /// around `offset`.
    pub(crate) fn entity_reference_before(&self, offset: usize) -> Option<Span> {
        let start = offset.min(self.chars.len().checked_sub(1)?);
        let mut i = start;
        loop {
            match self.chars[i] {
                '&' => break,
                ch if is_name_char(ch) || (i == start && ch == ';') => {}
                _ => return None,
            }
            i = i.checked_sub(1)?;
        }

        let name = self.name_at(i + 1)?;
        let end = if self.get(name.end) == Some(';') {
            name.end + 1
        } else {
            name.end
        };
        Some(i..end)
    }

    /// Offsets of `<` opening a start tag, nearest to `offset` first.
    fn start_tags_before(&self, offset: usize) -> impl Iterator<Item = usize> + '_ {
        let end = offset.saturating_add(1).min(self.chars.len());
        (0..end)
            .rev()
            .filter(|&i| self.chars[i] == '<' && self.get(i + 1).is_some_and(is_name_start))
    }

    fn end_tag_before(&self, offset: usize) -> Option<usize> {
        let end = offset.saturating_add(1).min(self.chars.len());
        (0..end)
            .rev()
            .find(|&i| self.chars[i] == '<' && self.get(i + 1) == Some('/'))
    }

    /// Returns `true` if the start tag opening at `lt` ends with `/>`.
    fn is_empty_element_tag(&self, lt: usize) -> bool {
        (lt + 1..self.chars.len())
            .find(|&i| matches!(self.chars[i], '<' | '>'))
            .is_some_and(|gt| self.chars[gt] == '>' && self.chars[gt - 1] == '/')
    }

    /// Offset of the `<` opening the root element, skipping the prolog.
    fn root_start_tag(&self) -> Option<usize> {
        let mut i = 0;
        while i < self.chars.len() {
            if self.starts_with(i, "<!--") {
                i = self.find_from(i + 4, "-->").map_or(self.chars.len(), |end| end + 3);
                continue;
            }
            if self.chars[i] == '<' && self.get(i + 1).is_some_and(is_name_start) {
                return Some(i);
            }
            i += 1;
        }
        None
    }

    /// Attributes of the start tag opening at `lt`.
    fn attributes(&self, lt: usize) -> Vec<Attribute> {
        let mut attributes = Vec::new();
        let Some(tag_name) = self.name_at(lt + 1) else {
            return attributes;
        };

        let mut i = tag_name.end;
        loop {
            i = self.skip_whitespace(i);
            let Some(name) = self.name_at(i) else {
                break;
            };

            i = self.skip_whitespace(name.end);
            let mut value = None;
            if self.get(i) == Some('=') {
                i = self.skip_whitespace(i + 1);
                if let Some(quote @ ('"' | '\'')) = self.get(i) {
                    // An unterminated value stops at the next markup.
                    let end = (i + 1..self.chars.len())
                        .find(|&j| self.chars[j] == quote || self.chars[j] == '<')
                        .map_or(self.chars.len(), |j| {
                            if self.chars[j] == quote { j + 1 } else { j }
                        });
                    value = Some(i..end);
                    i = end;
                }
            }

            attributes.push(Attribute { name, value });
        }

        attributes
    }

    fn name_at(&self, start: usize) -> Option<Span> {
        if !self.get(start).is_some_and(is_name_start) {
            return None;
        }
        let end = (start..self.chars.len())
            .find(|&i| !is_name_char(self.chars[i]))
            .unwrap_or(self.chars.len());
        Some(start..end)
    }

    /// Compare a span with `name`. An unprefixed `name` also matches the
    /// local part of a prefixed name.
    fn matches_name(&self, span: &Span, name: &str) -> bool {
        let found: String = self.chars[span.clone()].iter().collect();
        if found == name {
            return true;
        }
        !name.contains(':') && found.rsplit(':').next() == Some(name)
    }

    fn skip_whitespace(&self, mut i: usize) -> usize {
        while self.get(i).is_some_and(char::is_whitespace) {
            i += 1;
        }
        i
    }

    fn starts_with(&self, at: usize, pattern: &str) -> bool {
        pattern
            .chars()
            .enumerate()
            .all(|(k, ch)| self.get(at + k) == Some(ch))
    }

    fn find_from(&self, from: usize, pattern: &str) -> Option<usize> {
        (from..self.chars.len()).find(|&i| self.starts_with(i, pattern))
    }

    fn get(&self, i: usize) -> Option<char> {
        self.chars.get(i).copied()
    }
}

fn is_name_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == ':'
}

fn is_name_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | ':' | '-' | '.')
}
