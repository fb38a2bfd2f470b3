//! A small CSS selector subset: compound selectors made of a tag name,
//! `#id`, `.class` and `[attr="value"]` parts, joined by descendant
//! combinators (whitespace).

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("Empty selector")]
    Empty,

    #[error("Unexpected character {found:?} at offset {offset} in {selector:?}")]
    UnexpectedChar {
        selector: String,
        offset: usize,
        found: char,
    },

    #[error("Unexpected end of selector {0:?}")]
    UnexpectedEnd(String),

    #[error("Unterminated attribute selector in {0:?}")]
    UnterminatedAttribute(String),
}

/// One compound selector, e.g. `meta[name="viewport"]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<AttributeMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AttributeMatch {
    pub name: String,
    /// `None` matches on presence alone
    pub value: Option<String>,
}

/// A chain of compounds, each a descendant of the previous one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    compounds: Vec<Compound>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let mut parser = Parser {
            source,
            chars: source.char_indices().peekable(),
        };
        let mut compounds = Vec::new();

        loop {
            parser.skip_whitespace();
            if parser.peek().is_none() {
                break;
            }
            compounds.push(parser.compound()?);
        }

        if compounds.is_empty() {
            return Err(SelectorError::Empty);
        }

        Ok(Self {
            source: source.to_string(),
            compounds,
        })
    }

    pub(crate) fn compounds(&self) -> &[Compound] {
        &self.compounds
    }

}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

struct Parser<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl Parser<'_> {
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.chars.next();
        }
    }

    fn unexpected(&mut self) -> SelectorError {
        match self.chars.peek() {
            Some(&(offset, found)) => SelectorError::UnexpectedChar {
                selector: self.source.to_string(),
                offset,
                found,
            },
            None => SelectorError::UnexpectedEnd(self.source.to_string()),
        }
    }

    fn ident(&mut self) -> Result<String, SelectorError> {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                out.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        if out.is_empty() {
            return Err(self.unexpected());
        }
        Ok(out)
    }

    fn compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();

        if self.peek().is_some_and(|c| c.is_alphabetic()) {
            compound.tag = Some(self.ident()?.to_ascii_lowercase());
        }

        while let Some(c) = self.peek() {
            match c {
                '#' => {
                    self.chars.next();
                    compound.id = Some(self.ident()?);
                }
                '.' => {
                    self.chars.next();
                    compound.classes.push(self.ident()?);
                }
                '[' => {
                    self.chars.next();
                    compound.attributes.push(self.attribute()?);
                }
                c if c.is_whitespace() => break,
                _ => return Err(self.unexpected()),
            }
        }

        Ok(compound)
    }

    fn attribute(&mut self) -> Result<AttributeMatch, SelectorError> {
        self.skip_whitespace();
        let name = self.ident()?;
        self.skip_whitespace();

        let value = match self.peek() {
            Some(']') => None,
            Some('=') => {
                self.chars.next();
                self.skip_whitespace();
                Some(self.attribute_value()?)
            }
            _ => return Err(self.unexpected()),
        };

        self.skip_whitespace();
        match self.chars.next() {
            Some((_, ']')) => Ok(AttributeMatch { name, value }),
            _ => Err(SelectorError::UnterminatedAttribute(self.source.to_string())),
        }
    }

    fn attribute_value(&mut self) -> Result<String, SelectorError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.chars.next();
                let mut value = String::new();
                for (_, c) in self.chars.by_ref() {
                    if c == quote {
                        return Ok(value);
                    }
                    value.push(c);
                }
                Err(SelectorError::UnterminatedAttribute(self.source.to_string()))
            }
            _ => self.ident(),
        }
    }
}
