//! Recursive-descent parser for the block markup dialect
use crate::ast::{Element, MarkupNode, is_void_element};
use crate::escape::unescape_html;

/// Structural inconsistency found while parsing. Offsets count characters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unmatched closing tag </{found}> at offset {offset}")]
    UnmatchedClosingTag {
        found: String,
        expected: Option<String>,
        offset: usize,
    },

    #[error("element <{tag}> opened at offset {offset} is never closed")]
    UnclosedElement { tag: String, offset: usize },

    #[error("unexpected end of input inside {context} at offset {offset}")]
    UnexpectedEof { context: &'static str, offset: usize },

    #[error("elements nested deeper than {limit} at offset {offset}")]
    NestingTooDeep { limit: usize, offset: usize },
}

/// Deepest element nesting accepted before parsing stops.
pub const MAX_NESTING_DEPTH: usize = 512;

pub struct Parser {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

impl Parser {
    pub fn new(input: &str) -> Self {
        Parser {
            chars: input.chars().collect(),
            pos: 0,
            depth: 0,
        }
    }

    /// Parse into a synthetic root element, stopping at the first
    /// inconsistency and keeping everything built up to that point.
    pub fn parse(self) -> Element {
        let (root, result) = self.parse_partial();
        if let Err(err) = result {
            tracing::debug!(error = %err, "markup parsing stopped early");
        }
        root
    }

    /// Parse, reporting the first inconsistency instead of hiding it.
    pub fn try_parse(self) -> Result<Element, ParseError> {
        let (root, result) = self.parse_partial();
        result.map(|()| root)
    }

    fn parse_partial(mut self) -> (Element, Result<(), ParseError>) {
        let mut root = Element::root();
        let result = self.parse_nodes(&mut root.children, None);
        (root, result)
    }

    /// Parse sibling nodes into `into` until the closing tag of `open`
    /// (or end of input for the root).
    fn parse_nodes(
        &mut self,
        into: &mut Vec<MarkupNode>,
        open: Option<(&str, usize)>,
    ) -> Result<(), ParseError> {
        loop {
            if self.at_end() {
                return match open {
                    None => Ok(()),
                    Some((tag, offset)) => Err(ParseError::UnclosedElement {
                        tag: tag.to_string(),
                        offset,
                    }),
                };
            }

            if self.starts_with("</") {
                let offset = self.pos;
                let found = self.parse_closing_tag()?;
                return match open {
                    Some((tag, _)) if tag == found => Ok(()),
                    _ => Err(ParseError::UnmatchedClosingTag {
                        found,
                        expected: open.map(|(tag, _)| tag.to_string()),
                        offset,
                    }),
                };
            }

            if self.starts_with("<!--") {
                self.skip_comment();
                continue;
            }

            if self.starts_with("<!") || self.starts_with("<?") {
                self.skip_past('>');
                continue;
            }

            if self.peek() == Some('<') && self.peek_at(1).is_some_and(|c| c.is_ascii_alphabetic())
            {
                let offset = self.pos;
                let (mut element, self_closing) = self.parse_open_tag()?;
                if self_closing || is_void_element(&element.tag) {
                    into.push(MarkupNode::Element(element));
                    continue;
                }
                if self.depth >= MAX_NESTING_DEPTH {
                    return Err(ParseError::NestingTooDeep {
                        limit: MAX_NESTING_DEPTH,
                        offset,
                    });
                }
                self.depth += 1;
                let child_open = Some((element.tag.as_str(), offset));
                let result = self.parse_nodes(&mut element.children, child_open);
                self.depth -= 1;
                into.push(MarkupNode::Element(element));
                result?;
                continue;
            }

            let text = self.parse_text();
            if !text.is_empty() {
                into.push(MarkupNode::Text(text));
            }
        }
    }

    /// Parse `<name attr="value" ...>` or `<name ... />`.
    fn parse_open_tag(&mut self) -> Result<(Element, bool), ParseError> {
        self.pos += 1; // '<'
        let mut element = Element::new(self.parse_name());

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => {
                    return Err(ParseError::UnexpectedEof {
                        context: "tag",
                        offset: self.pos,
                    });
                }
                Some('>') => {
                    self.pos += 1;
                    return Ok((element, false));
                }
                Some('/') if self.peek_at(1) == Some('>') => {
                    self.pos += 2;
                    return Ok((element, true));
                }
                Some(_) => {}
            }

            let name = self.parse_attribute_name();
            if name.is_empty() {
                // stray character such as a lone '/' or quote
                self.pos += 1;
                continue;
            }

            self.skip_whitespace();
            let value = if self.peek() == Some('=') {
                self.pos += 1;
                self.skip_whitespace();
                self.parse_attribute_value()?
            } else {
                String::new()
            };

            if element.attr(&name).is_none() {
                element.attributes.push((name, value));
            }
        }
    }

    fn parse_closing_tag(&mut self) -> Result<String, ParseError> {
        self.pos += 2; // "</"
        let name = self.parse_name();
        while let Some(c) = self.peek() {
            self.pos += 1;
            if c == '>' {
                return Ok(name);
            }
        }
        Err(ParseError::UnexpectedEof {
            context: "closing tag",
            offset: self.pos,
        })
    }

    fn parse_name(&mut self) -> String {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':')
        {
            self.pos += 1;
        }
        self.chars[start..self.pos]
            .iter()
            .collect::<String>()
            .to_ascii_lowercase()
    }

    fn parse_attribute_name(&mut self) -> String {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| !c.is_whitespace() && !matches!(c, '=' | '>' | '/' | '"' | '\''))
        {
            self.pos += 1;
        }
        self.chars[start..self.pos]
            .iter()
            .collect::<String>()
            .to_ascii_lowercase()
    }

    fn parse_attribute_value(&mut self) -> Result<String, ParseError> {
        let raw: String = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let start = self.pos;
                while self.peek().is_some_and(|c| c != quote) {
                    self.pos += 1;
                }
                if self.at_end() {
                    return Err(ParseError::UnexpectedEof {
                        context: "attribute value",
                        offset: self.pos,
                    });
                }
                let value = self.chars[start..self.pos].iter().collect();
                self.pos += 1; // closing quote
                value
            }
            _ => {
                let start = self.pos;
                while self.peek().is_some_and(|c| !c.is_whitespace() && c != '>') {
                    self.pos += 1;
                }
                self.chars[start..self.pos].iter().collect()
            }
        };
        Ok(unescape_html(&raw))
    }

    /// Character data up to the next tag-like `<`. A `<` that cannot start
    /// a tag is kept as text.
    fn parse_text(&mut self) -> String {
        let start = self.pos;
        // always consume at least one character so a lone '<' makes progress
        self.pos += 1;
        while let Some(c) = self.peek() {
            if c == '<'
                && self
                    .peek_at(1)
                    .is_some_and(|next| next.is_ascii_alphabetic() || matches!(next, '/' | '!' | '?'))
            {
                break;
            }
            self.pos += 1;
        }
        let raw: String = self.chars[start..self.pos].iter().collect();
        unescape_html(&raw)
    }

    fn skip_comment(&mut self) {
        self.pos += 4; // "<!--"
        while !self.at_end() {
            if self.starts_with("-->") {
                self.pos += 3;
                return;
            }
            self.pos += 1;
        }
    }

    fn skip_past(&mut self, end: char) {
        while let Some(c) = self.peek() {
            self.pos += 1;
            if c == end {
                return;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn starts_with(&self, s: &str) -> bool {
        let mut i = self.pos;
        for expected in s.chars() {
            if self.chars.get(i) != Some(&expected) {
                return false;
            }
            i += 1;
        }
        true
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }
}
