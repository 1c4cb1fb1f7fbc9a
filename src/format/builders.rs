//! Type expression formatting with cross-links to documented elements.
//!
//! Provides both `write_*` methods (write to any buffer) and `format_*` methods
//! (return a `String`).

use crate::doc::Doc;
use crate::item::element::Returns;
use std::fmt::{self, Write};

/// Formats token sequences for display, linking tokens that name a top-level element.
pub struct TypeFormatter<'a> {
    doc: &'a Doc,
}

impl<'a> TypeFormatter<'a> {
    pub const fn new(doc: &'a Doc) -> Self {
        Self { doc }
    }

    pub const fn doc(&self) -> &'a Doc {
        self.doc
    }

    /// Write a type expression, bold-wrapped.
    ///
    /// Tokens containing `<`, `>` or `*` have those characters escaped. Any other
    /// token is linked when it names a top-level element and written as-is otherwise.
    /// A `|` is inserted between a token ending in a word character or `>` and a
    /// following token that starts with a word character.
    pub fn write_type<W: Write, S: AsRef<str>>(&self, w: &mut W, tokens: &[S]) -> fmt::Result {
        w.write_str("**")?;
        let mut previous: Option<&str> = None;
        for token in tokens {
            let token = token.as_ref();
            if needs_escape(token) {
                write_escaped(w, token)?;
            } else {
                if previous.is_some_and(ends_like_type) && starts_with_word(token) {
                    w.write_char('|')?;
                }
                match is_identifier(token)
                    .then(|| self.doc.find_child(token, &[]))
                    .flatten()
                {
                    Some(element) => w.write_str(&element.link())?,
                    None => write_escaped(w, token)?,
                }
            }
            previous = Some(token);
        }
        w.write_str("**")
    }

    pub fn format_type<S: AsRef<str>>(&self, tokens: &[S]) -> String {
        let mut output = String::new();
        let _ = self.write_type(&mut output, tokens);
        output
    }

    /// Write an `extends`/`implements` list, entries joined with ` and `.
    pub fn write_inherits<W: Write>(&self, w: &mut W, entries: &[Vec<String>]) -> fmt::Result {
        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                w.write_str(" and ")?;
            }
            self.write_type(w, entry)?;
        }
        Ok(())
    }

    pub fn format_inherits(&self, entries: &[Vec<String>]) -> String {
        let mut output = String::new();
        let _ = self.write_inherits(&mut output, entries);
        output
    }

    /// Write a return value: `**Void**` when absent, else the type and its description.
    pub fn write_returns<W: Write>(&self, w: &mut W, returns: Option<&Returns>) -> fmt::Result {
        let Some(returns) = returns.filter(|r| !r.tokens.is_empty()) else {
            return w.write_str("**Void**");
        };
        if returns.nullable {
            w.write_char('?')?;
        }
        self.write_type(w, &returns.tokens)?;
        if let Some(description) = &returns.description {
            write!(w, "\n{}", self.doc.resolve_links(description))?;
        }
        Ok(())
    }

    pub fn format_returns(&self, returns: Option<&Returns>) -> String {
        let mut output = String::new();
        let _ = self.write_returns(&mut output, returns);
        output
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_markup(c: char) -> bool {
    matches!(c, '<' | '>' | '*')
}

/// A token carrying generic or pointer punctuation, like `<`, `Array.<` or `*`.
fn needs_escape(token: &str) -> bool {
    token.chars().any(is_markup)
}

/// A token made only of word characters, the only kind worth looking up.
pub(crate) fn is_identifier(token: &str) -> bool {
    !token.is_empty() && token.chars().all(is_word_char)
}

fn ends_like_type(token: &str) -> bool {
    token.chars().last().is_some_and(|c| is_word_char(c) || c == '>')
}

fn starts_with_word(token: &str) -> bool {
    token.chars().next().is_some_and(is_word_char)
}

/// Backslash-escape `<`, `>` and `*`. Existing `\x` pairs are kept as they are and
/// a trailing lone `\` is doubled so it cannot escape what follows the token.
fn write_escaped<W: Write>(w: &mut W, token: &str) -> fmt::Result {
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) => {
                    w.write_char('\\')?;
                    w.write_char(escaped)?;
                }
                None => w.write_str("\\\\")?,
            },
            c if is_markup(c) => {
                w.write_char('\\')?;
                w.write_char(c)?;
            }
            c => w.write_char(c)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    fn escaped(token: &str) -> String {
        let mut output = String::new();
        write_escaped(&mut output, token).unwrap();
        output
    }

    #[rstest]
    #[case("<", "\\<")]
    #[case(">|", "\\>|")]
    #[case(", ", ", ")]
    #[case("Array.<", "Array.\\<")]
    #[case("\\<", "\\<")]
    #[case("\\<>", "\\<\\>")]
    #[case("\\", "\\\\")]
    #[case("a\\", "a\\\\")]
    fn test_escape(#[case] token: &str, #[case] expected: &str) {
        check!(escaped(token) == expected);
    }

    #[rstest]
    #[case("<>")]
    #[case("\\")]
    #[case("*")]
    fn escaping_is_idempotent(#[case] token: &str) {
        check!(escaped(&escaped(token)) == escaped(token));
    }

    #[rstest]
    #[case("<", true)]
    #[case("*", true)]
    #[case("Array.<", true)]
    #[case(", ", false)]
    #[case("|", false)]
    #[case("string", false)]
    #[case("", false)]
    fn test_needs_escape(#[case] token: &str, #[case] expected: bool) {
        check!(needs_escape(token) == expected);
    }

    #[rstest]
    #[case("User", true)]
    #[case("snake_case1", true)]
    #[case("Array.<", false)]
    #[case("*", false)]
    fn test_is_identifier(#[case] token: &str, #[case] expected: bool) {
        check!(is_identifier(token) == expected);
    }
}
