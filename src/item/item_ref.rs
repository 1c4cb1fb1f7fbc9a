//! Borrowed view of an element together with the tree that owns it.

use super::element::{Detail, DocElement, DocKind};
use crate::doc::{Doc, LookupOptions};
use crate::format::renderers::{self, Embed};
use crate::format::{TypeFormatter, is_identifier, markup};
use serde_json::{Map, Value, json};
use std::fmt::{self, Debug, Formatter};
use std::ops::Deref;

/// An element of a [`Doc`], carrying the tree so that links, URLs and type
/// references can be resolved.
///
/// Equality is identity: two refs are equal when they point at the same node.
#[derive(Clone, Copy)]
pub struct ElementRef<'a> {
    doc: &'a Doc,
    element: &'a DocElement,
}

impl<'a> ElementRef<'a> {
    pub(crate) const fn new(doc: &'a Doc, element: &'a DocElement) -> Self {
        Self { doc, element }
    }

    pub const fn doc(&self) -> &'a Doc {
        self.doc
    }

    pub const fn element(&self) -> &'a DocElement {
        self.element
    }

    pub fn name(&self) -> &'a str {
        &self.element.name
    }

    /// Whether this ref points at `element`.
    pub fn is(&self, element: &DocElement) -> bool {
        std::ptr::eq(self.element, element)
    }

    fn wrap(&self, element: &'a DocElement) -> Self {
        Self::new(self.doc, element)
    }

    /// Resolve one path term against this element's children.
    pub fn find_child(&self, term: &str, exclude: &[ElementRef<'_>]) -> Option<Self> {
        self.element
            .children
            .find(term, |child| exclude.iter().any(|e| e.is(child)))
            .map(|child| self.wrap(child))
    }

    pub fn children(&self) -> impl Iterator<Item = ElementRef<'a>> + use<'a> {
        let doc = self.doc;
        self.element
            .children
            .iter()
            .map(move |child| ElementRef::new(doc, child))
    }

    /// Children of one kind, in declaration order.
    pub fn members(&self, kind: DocKind) -> impl Iterator<Item = ElementRef<'a>> + use<'a> {
        let doc = self.doc;
        self.element
            .children
            .of_kind(kind)
            .map(move |child| ElementRef::new(doc, child))
    }

    pub fn props(&self) -> impl Iterator<Item = ElementRef<'a>> + use<'a> {
        self.members(DocKind::Prop)
    }

    pub fn methods(&self) -> impl Iterator<Item = ElementRef<'a>> + use<'a> {
        self.members(DocKind::Method)
    }

    pub fn events(&self) -> impl Iterator<Item = ElementRef<'a>> + use<'a> {
        self.members(DocKind::Event)
    }

    pub fn params(&self) -> impl Iterator<Item = ElementRef<'a>> + use<'a> {
        self.members(DocKind::Param)
    }

    /// The first identifier in this element's type that names a top-level element.
    pub fn type_element(&self) -> Option<Self> {
        self.element
            .type_tokens()?
            .iter()
            .filter(|token| is_identifier(token))
            .find_map(|token| self.doc.find_child(token, &[]))
    }

    /// Documentation page URL, absent when the site has no base URL.
    pub fn url(&self) -> Option<String> {
        let base = self.doc.base_docs_url()?;
        Some(match &self.element.parent {
            Some(parent) => format!(
                "{base}/{}/{}?scrollTo={}{}",
                parent.kind,
                parent.name,
                if self.is_static() { "s-" } else { "" },
                self.element.name
            ),
            None => format!("{base}/{}/{}", self.kind(), self.element.name),
        })
    }

    /// Link to the declaring line in the repository.
    pub fn source_url(&self) -> Option<String> {
        let meta = self.element.meta()?;
        Some(format!(
            "{}/{}/{}#L{}",
            self.doc.repo_url(),
            meta.path,
            meta.file,
            meta.line
        ))
    }

    pub fn formatted_name(&self) -> String {
        let name = &self.element.name;
        let parent = self.element.parent.as_ref().map_or("", |p| p.name.as_str());
        let separator = if self.is_static() { '.' } else { '#' };
        match self.detail() {
            Detail::Prop { .. } => format!("{parent}{separator}{name}"),
            Detail::Method { .. } => format!("{parent}{separator}{name}()"),
            Detail::Event => format!("{parent}#{name}"),
            Detail::Param { optional: true, .. } => format!("`[{name}]`"),
            Detail::Param { .. } => format!("`{name}`"),
            Detail::Class(_) | Detail::Interface(_) | Detail::Typedef { .. } => name.clone(),
        }
    }

    /// Markdown link to this element, or the plain formatted name without a URL.
    pub fn link(&self) -> String {
        let name = self.formatted_name();
        match self.url() {
            Some(url) => format!("[{name}]({url})"),
            None => name,
        }
    }

    pub fn formatted_type(&self) -> Option<String> {
        let tokens = self.element.type_tokens()?;
        let variadic = matches!(self.detail(), Detail::Param { variable: true, .. });
        Some(format!(
            "{}{}{}",
            if self.is_nullable() { "?" } else { "" },
            if variadic { "..." } else { "" },
            self.doc.format_type(tokens)
        ))
    }

    /// Formatted return value; `**Void**` when there is none.
    pub fn formatted_return(&self) -> String {
        TypeFormatter::new(self.doc).format_returns(self.element.returns())
    }

    pub fn formatted_extends(&self) -> Option<String> {
        let extends = self.element.heritage()?.extends.as_deref()?;
        Some(TypeFormatter::new(self.doc).format_inherits(extends))
    }

    pub fn formatted_implements(&self) -> Option<String> {
        let implements = self.element.heritage()?.implements.as_deref()?;
        Some(TypeFormatter::new(self.doc).format_inherits(implements))
    }

    /// The description run through the markup pipeline; empty when undocumented.
    pub fn format_description(&self) -> String {
        let Some(description) = self.element.description() else {
            return String::new();
        };
        markup::format_description(
            description,
            |target| self.doc.get_path(target).map(|e| e.link()),
            self.url().as_deref(),
        )
    }

    pub fn embed(&self, options: LookupOptions) -> Embed {
        renderers::render_element(*self, options)
    }

    /// Structural JSON dump of this element and its params.
    pub fn dump(&self) -> Value {
        let mut json = Map::new();
        json.insert("name".into(), json!(self.element.name));
        json.insert("description".into(), json!(self.element.description));
        json.insert("internal_type".into(), json!(self.kind().as_str()));

        for (key, kind) in [
            ("props", DocKind::Prop),
            ("methods", DocKind::Method),
            ("events", DocKind::Event),
        ] {
            let names: Vec<&str> = self.members(kind).map(|member| member.name()).collect();
            if !names.is_empty() {
                json.insert(key.into(), json!(names));
            }
        }
        if let Some(parent) = &self.element.parent {
            json.insert("parent".into(), json!(parent.name));
        }
        let params: Vec<Value> = self.params().map(|param| param.dump()).collect();
        if !params.is_empty() {
            json.insert("params".into(), Value::Array(params));
        }
        if let Some(tokens) = self.element.type_tokens() {
            json.insert("type".into(), json!(tokens.concat()));
        }
        if let Some(examples) = self.element.examples() {
            json.insert("examples".into(), json!(examples));
        }

        Value::Object(json)
    }
}

impl Deref for ElementRef<'_> {
    type Target = DocElement;

    fn deref(&self) -> &Self::Target {
        self.element
    }
}

impl PartialEq for ElementRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && std::ptr::eq(self.element, other.element)
    }
}

impl Eq for ElementRef<'_> {}

impl Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("name", &self.element.name)
            .field("kind", &self.kind())
            .field("parent", &self.element.parent.as_ref().map(|p| &p.name))
            .finish()
    }
}
