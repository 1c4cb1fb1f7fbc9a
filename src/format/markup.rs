//! Description markup pipeline.
//!
//! Stages run in a fixed order: inline links, newline collapsing, callouts, then
//! truncation. Each stage is a pure string transform.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Maximum description length, in characters, before truncation.
pub const DESCRIPTION_LIMIT: usize = 1500;

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{@link (.+?)\}").expect("valid link pattern"));

// Group 1: a fenced code block, kept verbatim. Group 2: a list item line before the newline.
static NEWLINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(```[\s\S]+?```)|(^[*-].+$)?\n").expect("valid newline pattern")
});

static CALLOUT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<info>([\s\S]+?)</info>|<warn>([\s\S]+?)</warn>").expect("valid callout pattern")
});

/// Run the full pipeline over a raw description.
///
/// `resolve` maps a `{@link}` target to its replacement; `url` is where the full
/// description can be read when it has to be truncated.
pub fn format_description(
    text: &str,
    resolve: impl Fn(&str) -> Option<String>,
    url: Option<&str>,
) -> String {
    let text = resolve_links(text, resolve);
    let text = collapse_newlines(&text);
    let text = emphasize_callouts(&text);
    truncate(text, DESCRIPTION_LIMIT, url)
}

/// Replace `{@link Target}` spans with the resolved link, or the bare target.
pub fn resolve_links(text: &str, resolve: impl Fn(&str) -> Option<String>) -> String {
    LINK_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let target = &caps[1];
            resolve(target).unwrap_or_else(|| target.to_string())
        })
        .into_owned()
}

/// Collapse single newlines into spaces.
///
/// Code blocks are kept intact, and a newline that ends a list item line or
/// precedes one (`*` or `-` at line start) is kept.
pub fn collapse_newlines(text: &str) -> String {
    NEWLINE_RE
        .replace_all(text, |caps: &Captures<'_>| {
            if let Some(block) = caps.get(1) {
                return block.as_str().to_string();
            }
            let whole = &caps[0];
            let end = caps.get(0).map_or(text.len(), |m| m.end());
            let before_list = text[end..].starts_with(['*', '-']);
            if caps.get(2).is_some() || before_list {
                whole.to_string()
            } else {
                " ".to_string()
            }
        })
        .into_owned()
}

/// Turn `<info>`/`<warn>` spans into bold text on their own line.
pub fn emphasize_callouts(text: &str) -> String {
    CALLOUT_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let inner = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            format!("\n**{inner}**\n")
        })
        .into_owned()
}

/// Cut `text` to `limit` characters and append a pointer to the full description.
pub fn truncate(text: String, limit: usize, url: Option<&str>) -> String {
    let Some((cut, _)) = text.char_indices().nth(limit) else {
        return text;
    };
    let mut output = text[..cut].to_string();
    output.push_str("...\nDescription truncated. ");
    match url {
        Some(url) => {
            output.push_str("View full description [here](");
            output.push_str(url);
            output.push_str(").");
        }
        None => output.push_str("View the documentation for the full description."),
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    fn no_links(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn links_resolve_or_fall_back_to_target() {
        let resolve = |target: &str| (target == "User").then(|| "[User](url)".to_string());
        check!(
            resolve_links("Owned by {@link User}, see {@link Missing}", resolve)
                == "Owned by [User](url), see Missing"
        );
    }

    #[rstest]
    #[case("one\ntwo", "one two")]
    #[case("intro\n- first\n- second", "intro\n- first\n- second")]
    #[case("* item\nafter", "* item\nafter")]
    #[case("before\n```js\nconst a = 1;\n```\nafter", "before ```js\nconst a = 1;\n``` after")]
    #[case("no newline", "no newline")]
    fn test_collapse_newlines(#[case] input: &str, #[case] expected: &str) {
        check!(collapse_newlines(input) == expected);
    }

    #[rstest]
    #[case("<info>Heads up</info>", "\n**Heads up**\n")]
    #[case("a <warn>Careful</warn> b", "a \n**Careful**\n b")]
    #[case("<info>one</info><warn>two</warn>", "\n**one**\n\n**two**\n")]
    fn test_emphasize_callouts(#[case] input: &str, #[case] expected: &str) {
        check!(emphasize_callouts(input) == expected);
    }

    #[test]
    fn text_at_limit_is_untouched() {
        let text = "a".repeat(DESCRIPTION_LIMIT);
        check!(truncate(text.clone(), DESCRIPTION_LIMIT, Some("u")) == text);
    }

    #[test]
    fn text_over_limit_is_cut_with_pointer() {
        let text = "a".repeat(DESCRIPTION_LIMIT + 1);
        let output = truncate(text, DESCRIPTION_LIMIT, Some("https://docs/x"));
        let expected = format!(
            "{}...\nDescription truncated. View full description [here](https://docs/x).",
            "a".repeat(DESCRIPTION_LIMIT)
        );
        check!(output == expected);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let text = "é".repeat(10);
        check!(truncate(text.clone(), 10, None) == text);
        check!(truncate(text, 5, None).starts_with("ééééé..."));
    }

    #[test]
    fn pipeline_runs_stages_in_order() {
        let output = format_description("Line one\nline two <info>{@link Note}</info>", no_links, None);
        check!(output == "Line one line two \n**Note**\n");
    }
}
