//! Documented elements and the closed set of element kinds.

use super::children::Children;
use crate::raw::{RawElement, RawMeta, RawReturns, TypeNode, flatten_inherits};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// DO NOT rename variants: the lowercase form appears in documentation URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    Class,
    Interface,
    Typedef,
    Prop,
    Method,
    Event,
    Param,
}

impl DocKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Typedef => "typedef",
            Self::Prop => "prop",
            Self::Method => "method",
            Self::Event => "event",
            Self::Param => "param",
        }
    }

    /// Whether elements of this kind appear at the top level of a [`Doc`](crate::Doc).
    pub const fn is_top_level(self) -> bool {
        matches!(self, Self::Class | Self::Interface | Self::Typedef)
    }
}

impl Display for DocKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    #[default]
    Public,
    Private,
}

impl Access {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("private") => Self::Private,
            _ => Self::Public,
        }
    }
}

/// Source location of an element inside the documented repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Meta {
    pub path: String,
    pub file: String,
    pub line: u32,
}

impl From<RawMeta> for Meta {
    fn from(raw: RawMeta) -> Self {
        Self {
            path: raw.path,
            file: raw.file,
            line: raw.line,
        }
    }
}

/// Non-owning back-reference from a member to the element that owns it.
///
/// Holds the owner's identity only; ownership always flows from parent to child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRef {
    pub name: String,
    pub kind: DocKind,
}

/// A return value: a flattened type expression plus optional details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Returns {
    pub tokens: Vec<String>,
    pub description: Option<String>,
    pub nullable: bool,
}

impl From<RawReturns> for Returns {
    fn from(raw: RawReturns) -> Self {
        match raw {
            RawReturns::Types(types) => Self {
                tokens: flatten_all(&types),
                description: None,
                nullable: false,
            },
            RawReturns::Detailed {
                types,
                description,
                nullable,
            } => Self {
                tokens: flatten_all(&types),
                description,
                nullable: nullable.unwrap_or(false),
            },
        }
    }
}

fn flatten_all(nodes: &[TypeNode]) -> Vec<String> {
    nodes.iter().flat_map(TypeNode::flatten).collect()
}

/// Base classes and implemented interfaces, one token sequence per entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Heritage {
    pub extends: Option<Vec<Vec<String>>>,
    pub implements: Option<Vec<Vec<String>>>,
}

/// Kind-specific data. Each variant carries only the fields its kind has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detail {
    Class(Heritage),
    Interface(Heritage),
    Typedef { returns: Option<Returns> },
    Prop { readonly: bool },
    Method { returns: Option<Returns>, is_async: bool },
    Event,
    Param { optional: bool, variable: bool },
}

impl Detail {
    pub const fn kind(&self) -> DocKind {
        match self {
            Self::Class(_) => DocKind::Class,
            Self::Interface(_) => DocKind::Interface,
            Self::Typedef { .. } => DocKind::Typedef,
            Self::Prop { .. } => DocKind::Prop,
            Self::Method { .. } => DocKind::Method,
            Self::Event => DocKind::Event,
            Self::Param { .. } => DocKind::Param,
        }
    }
}

/// A single documented entity: a top-level class, interface or typedef, or a member.
///
/// Elements that own members (classes own props, methods and events; methods own
/// params) keep them in [`Children`], keyed by lowercased name.
#[derive(Debug, Clone)]
pub struct DocElement {
    pub(crate) name: String,
    pub(crate) parent: Option<ParentRef>,
    pub(crate) description: Option<String>,
    pub(crate) meta: Option<Meta>,
    pub(crate) access: Access,
    pub(crate) deprecated: bool,
    pub(crate) scope: Option<String>,
    pub(crate) ty: Option<Vec<String>>,
    pub(crate) nullable: Option<bool>,
    pub(crate) examples: Option<Vec<String>>,
    pub(crate) children: Children,
    pub(crate) detail: Detail,
}

impl DocElement {
    /// Build an element of `kind` from its raw record, adopting nested members.
    pub(crate) fn from_raw(kind: DocKind, raw: RawElement, parent: Option<ParentRef>) -> Self {
        let RawElement {
            name,
            description,
            meta,
            access,
            deprecated,
            scope,
            ty,
            nullable,
            optional,
            variable,
            readonly,
            is_async,
            examples,
            extends,
            implements,
            returns,
            props,
            methods,
            events,
            params,
        } = raw;

        let heritage = || Heritage {
            extends: extends.as_deref().map(flatten_inherits),
            implements: implements.as_deref().map(flatten_inherits),
        };

        let detail = match kind {
            DocKind::Class => Detail::Class(heritage()),
            DocKind::Interface => Detail::Interface(heritage()),
            DocKind::Typedef => Detail::Typedef {
                returns: returns.map(Returns::from),
            },
            DocKind::Prop => Detail::Prop { readonly },
            DocKind::Method => Detail::Method {
                returns: returns.map(Returns::from),
                is_async,
            },
            DocKind::Event => Detail::Event,
            DocKind::Param => Detail::Param { optional, variable },
        };

        let mut element = Self {
            name,
            parent,
            description,
            meta: meta.map(Meta::from),
            access: Access::parse(access.as_deref()),
            deprecated,
            scope,
            ty: ty.as_ref().map(TypeNode::flatten),
            nullable,
            examples,
            children: Children::default(),
            detail,
        };

        match kind {
            DocKind::Class | DocKind::Interface => {
                element.adopt_all(props, DocKind::Prop);
                element.adopt_all(methods, DocKind::Method);
                element.adopt_all(events, DocKind::Event);
            }
            DocKind::Typedef => {
                element.adopt_all(props, DocKind::Prop);
                element.adopt_all(params, DocKind::Param);
            }
            DocKind::Method | DocKind::Event => element.adopt_all(params, DocKind::Param),
            DocKind::Prop | DocKind::Param => {}
        }

        element
    }

    /// Instantiate each raw record as a `kind` member of this element.
    fn adopt_all(&mut self, records: Vec<RawElement>, kind: DocKind) {
        for record in records {
            let parent = ParentRef {
                name: self.name.clone(),
                kind: self.kind(),
            };
            self.children
                .insert(Self::from_raw(kind, record, Some(parent)));
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn kind(&self) -> DocKind {
        self.detail.kind()
    }

    pub const fn detail(&self) -> &Detail {
        &self.detail
    }

    pub const fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub const fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    pub const fn access(&self) -> Access {
        self.access
    }

    pub const fn is_private(&self) -> bool {
        matches!(self.access, Access::Private)
    }

    pub const fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    pub fn is_static(&self) -> bool {
        self.scope.as_deref() == Some("static")
    }

    /// The flattened type expression, if this element is typed.
    pub fn type_tokens(&self) -> Option<&[String]> {
        self.ty.as_deref()
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable.unwrap_or(false)
    }

    pub fn examples(&self) -> Option<&[String]> {
        self.examples.as_deref()
    }

    pub const fn children(&self) -> &Children {
        &self.children
    }

    pub const fn heritage(&self) -> Option<&Heritage> {
        match &self.detail {
            Detail::Class(heritage) | Detail::Interface(heritage) => Some(heritage),
            _ => None,
        }
    }

    pub const fn returns(&self) -> Option<&Returns> {
        match &self.detail {
            Detail::Typedef { returns } | Detail::Method { returns, .. } => returns.as_ref(),
            _ => None,
        }
    }

    /// Whether this element's kind can carry a return value at all.
    pub const fn has_returns(&self) -> bool {
        matches!(self.detail, Detail::Typedef { .. } | Detail::Method { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawElement {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn class_adopts_members_with_back_references() {
        let class = DocElement::from_raw(
            DocKind::Class,
            raw(json!({
                "name": "Guild",
                "props": [{ "name": "owner", "type": [[["User"]]] }],
                "methods": [{ "name": "fetch", "params": [{ "name": "force", "optional": true }] }],
                "events": [{ "name": "update" }]
            })),
            None,
        );

        check!(class.children().len() == 3);
        for child in class.children().iter() {
            let_assert!(Some(parent) = child.parent());
            check!(parent.name == "Guild");
            check!(parent.kind == DocKind::Class);
        }

        let_assert!(Some(fetch) = class.children().get("fetch"));
        check!(fetch.kind() == DocKind::Method);
        let_assert!(Some(force) = fetch.children().get("force"));
        check!(force.detail() == &Detail::Param { optional: true, variable: false });
        check!(force.parent().map(|p| p.kind) == Some(DocKind::Method));
    }

    #[test]
    fn prop_ignores_nested_records() {
        let prop = DocElement::from_raw(
            DocKind::Prop,
            raw(json!({ "name": "owner", "params": [{ "name": "ignored" }] })),
            None,
        );
        check!(prop.children().is_empty());
    }

    #[test]
    fn common_fields_are_carried_over() {
        let prop = DocElement::from_raw(
            DocKind::Prop,
            raw(json!({
                "name": "id",
                "access": "private",
                "scope": "static",
                "nullable": true,
                "type": [[["Snowflake"]]],
                "meta": { "line": 12, "file": "Guild.js", "path": "src/structures" }
            })),
            None,
        );

        check!(prop.is_private());
        check!(prop.is_static());
        check!(prop.is_nullable());
        check!(prop.type_tokens() == Some(&["Snowflake".to_string()][..]));
        check!(prop.meta().map(|m| m.line) == Some(12));
        check!(prop.returns().is_none());
    }

    #[test]
    fn heritage_and_returns_are_kind_specific() {
        let class = DocElement::from_raw(
            DocKind::Class,
            raw(json!({ "name": "Client", "extends": ["BaseClient"], "returns": [[["ignored"]]] })),
            None,
        );
        let_assert!(Some(heritage) = class.heritage());
        check!(heritage.extends == Some(vec![vec!["BaseClient".to_string()]]));
        check!(class.returns().is_none());

        let method = DocElement::from_raw(
            DocKind::Method,
            raw(json!({
                "name": "fetch",
                "returns": { "types": [[["Promise", "<"], ["Guild", ">"]]], "nullable": true }
            })),
            None,
        );
        let_assert!(Some(returns) = method.returns());
        check!(returns.tokens == ["Promise", "<", "Guild", ">"]);
        check!(returns.nullable);
    }
}
