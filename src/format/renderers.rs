//! Rich-message rendering for elements and search results.
//!
//! An [`Embed`] is a transport-neutral card: title, author line, description and
//! named fields. [`Embed::to_markdown`] flattens one for plain-text transports.

use crate::doc::{Doc, LookupOptions};
use crate::item::{DocKind, ElementRef};
use serde::Serialize;
use std::fmt::Write as _;

/// Name used for continuation fields, rendered as an invisible heading.
pub const BLANK_FIELD_NAME: &str = "\u{200b}";

const PARAMS_PER_FIELD: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
}

impl EmbedField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Embed {
    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&EmbedField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Render as markdown. Continuation fields continue the previous heading.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        match (&self.title, &self.url) {
            (Some(title), Some(url)) => {
                let _ = writeln!(output, "# [{title}]({url})");
            }
            (Some(title), None) => {
                let _ = writeln!(output, "# {title}");
            }
            _ => {}
        }
        if let Some(author) = &self.author {
            match &author.url {
                Some(url) => {
                    let _ = writeln!(output, "_[{}]({url})_", author.name);
                }
                None => {
                    let _ = writeln!(output, "_{}_", author.name);
                }
            }
        }
        if let Some(description) = &self.description {
            let _ = writeln!(output, "\n{description}");
        }
        for field in &self.fields {
            if field.name == BLANK_FIELD_NAME {
                let _ = writeln!(output, "{}", field.value);
            } else {
                let _ = writeln!(output, "\n## {}\n{}", field.name, field.value);
            }
        }

        output
    }
}

/// The embed every response starts from: site branding for `doc`.
pub(crate) fn base_embed(doc: &Doc) -> Embed {
    let site = doc.site();
    Embed {
        author: Some(EmbedAuthor {
            name: format!("{} ({})", site.title, doc.branch()),
            url: doc.base_docs_url(),
            icon_url: doc.icon(),
        }),
        color: Some(site.color),
        ..Embed::default()
    }
}

/// Full card for a single element.
pub(crate) fn render_element(element: ElementRef<'_>, options: LookupOptions) -> Embed {
    let mut embed = base_embed(element.doc());
    embed.title = Some(element.doc().site().title.clone());
    embed.url = element.url();

    let mut heading = format!("__**{}**__", element.link());
    if let Some(extends) = element.formatted_extends() {
        let _ = write!(heading, " (extends {extends})");
    }
    if let Some(implements) = element.formatted_implements() {
        let _ = write!(heading, " (implements {implements})");
    }
    if element.is_private() {
        heading.push_str(" **PRIVATE**");
    }
    if element.is_deprecated() {
        heading.push_str(" **DEPRECATED**");
    }
    embed.description = Some(format!("{heading}\n{}", element.format_description()));

    attach_members(&mut embed, "Properties", element, DocKind::Prop, options.exclude_private);
    attach_members(&mut embed, "Methods", element, DocKind::Method, options.exclude_private);
    attach_members(&mut embed, "Events", element, DocKind::Event, false);
    attach_params(&mut embed, element);

    if let Some(ty) = element.formatted_type() {
        embed.fields.push(EmbedField::new("Type", ty));
    }
    if element.returns().is_some() {
        embed.fields.push(EmbedField::new("Returns", element.formatted_return()));
    }
    if let Some(examples) = element.examples().filter(|e| !e.is_empty()) {
        let value = examples
            .iter()
            .map(|example| format!("```js\n{example}\n```"))
            .collect::<Vec<_>>()
            .join("\n");
        embed.fields.push(EmbedField::new("Examples", value));
    }
    if let Some(source) = element.source_url() {
        embed
            .fields
            .push(EmbedField::new(BLANK_FIELD_NAME, format!("[View source]({source})")));
    }

    embed
}

/// Card listing search hits as links, best first.
pub(crate) fn render_search_results(doc: &Doc, results: &[ElementRef<'_>]) -> Embed {
    let mut embed = base_embed(doc);
    embed.title = Some("Search results:".to_string());
    embed.description = Some(
        results
            .iter()
            .map(|element| format!("**{}**", element.link()))
            .collect::<Vec<_>>()
            .join("\n"),
    );
    embed
}

fn attach_members(
    embed: &mut Embed,
    title: &str,
    element: ElementRef<'_>,
    kind: DocKind,
    exclude_private: bool,
) {
    let names: Vec<String> = element
        .members(kind)
        .filter(|member| !(exclude_private && member.is_private()))
        .map(|member| format!("`{}`", member.name()))
        .collect();
    if !names.is_empty() {
        embed.fields.push(EmbedField::new(title, names.join(" ")));
    }
}

fn attach_params(embed: &mut Embed, element: ElementRef<'_>) {
    let params: Vec<String> = element
        .members(DocKind::Param)
        .map(|param| {
            let mut entry = param.formatted_name();
            if let Some(ty) = param.formatted_type() {
                let _ = write!(entry, " {ty}");
            }
            if let Some(description) = param.description() {
                let _ = write!(entry, "\n{}", element.doc().resolve_links(description));
            }
            entry
        })
        .collect();

    for (i, chunk) in params.chunks(PARAMS_PER_FIELD).enumerate() {
        let name = if i == 0 { "Params" } else { BLANK_FIELD_NAME };
        embed.fields.push(EmbedField::new(name, chunk.join("\n\n")));
    }
}
