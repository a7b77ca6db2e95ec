use std::sync::LazyLock;

use regex::Regex;

// A capitalized camel-case word: at least two humps, no two
//  capitals in a row, nothing but ASCII letters and digits.
static SINGLE_WIKI_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z](?:[a-z0-9]+[A-Z][a-z0-9]*)+$").unwrap());

/// Check whether `text` is exactly one wiki word, i.e. a valid simple page name.
///
/// ```
/// use common::page::is_single_wiki_word;
///
/// assert!(is_single_wiki_word("FrontPage"));
/// assert!(!is_single_wiki_word("Frontpage"));
/// assert!(!is_single_wiki_word("Front Page"));
/// ```
pub fn is_single_wiki_word(text: &str) -> bool {
    SINGLE_WIKI_WORD.is_match(text)
}

/// A piece of page content, as seen by reference matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A maximal run of ASCII letters and digits
    Word(&'a str),
    /// Everything between two words
    Gap(&'a str),
}

impl<'a> Token<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Token::Word(text) | Token::Gap(text) => text,
        }
    }
}

/// Split `text` into alternating words and gaps.
///  Concatenating the tokens yields `text` again.
pub fn tokens(text: &str) -> Tokens<'_> {
    Tokens { text, pos: 0 }
}

pub struct Tokens<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.text[self.pos..];
        let first = rest.chars().next()?;
        let in_word = first.is_ascii_alphanumeric();
        let len = rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_alphanumeric() != in_word)
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());

        let piece = &rest[..len];
        self.pos += len;
        Some(if in_word {
            Token::Word(piece)
        } else {
            Token::Gap(piece)
        })
    }
}
