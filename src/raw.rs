//! Serde model of the docgen JSON payload.
//!
//! Only the parts the index needs are modelled. Unknown keys are ignored, and every
//! collection is optional so that partial payloads still deserialize.

use serde::{Deserialize, Deserializer, Serialize};

/// The full payload: top-level elements grouped by kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDocs {
    #[serde(default)]
    pub classes: Vec<RawElement>,
    #[serde(default)]
    pub typedefs: Vec<RawElement>,
    #[serde(default)]
    pub interfaces: Vec<RawElement>,
}

/// One documented element of any kind.
///
/// Kind-specific fields are simply absent for kinds that don't carry them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawElement {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub meta: Option<RawMeta>,
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default, deserialize_with = "flag_or_message")]
    pub deprecated: bool,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default, rename = "type")]
    pub ty: Option<TypeNode>,
    #[serde(default)]
    pub nullable: Option<bool>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub variable: bool,
    #[serde(default)]
    pub readonly: bool,
    #[serde(default, rename = "async")]
    pub is_async: bool,
    #[serde(default)]
    pub examples: Option<Vec<String>>,
    #[serde(default)]
    pub extends: Option<Vec<TypeNode>>,
    #[serde(default)]
    pub implements: Option<Vec<TypeNode>>,
    #[serde(default)]
    pub returns: Option<RawReturns>,
    #[serde(default)]
    pub props: Vec<RawElement>,
    #[serde(default)]
    pub methods: Vec<RawElement>,
    #[serde(default)]
    pub events: Vec<RawElement>,
    #[serde(default)]
    pub params: Vec<RawElement>,
}

/// Source location of an element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMeta {
    pub line: u32,
    pub file: String,
    pub path: String,
}

/// A type expression as emitted by docgen: strings nested in arrays of any depth.
///
/// `Array<string>` arrives as `[[["Array", "<"], ["string", ">"]]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeNode {
    Token(String),
    Group(Vec<TypeNode>),
}

impl TypeNode {
    /// Flatten depth-first into a token sequence.
    pub fn flatten(&self) -> Vec<String> {
        let mut tokens = Vec::new();
        self.flatten_into(&mut tokens);
        tokens
    }

    fn flatten_into(&self, tokens: &mut Vec<String>) {
        match self {
            Self::Token(token) => tokens.push(token.clone()),
            Self::Group(nodes) => {
                for node in nodes {
                    node.flatten_into(tokens);
                }
            }
        }
    }
}

/// Flatten an inheritance list (`extends` / `implements`) into one token sequence per entry.
pub fn flatten_inherits(nodes: &[TypeNode]) -> Vec<Vec<String>> {
    nodes.iter().map(TypeNode::flatten).collect()
}

/// Return value description: either bare types or an object with details.
///
/// `Types` must stay first: derived structs also deserialize from sequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawReturns {
    Types(Vec<TypeNode>),
    Detailed {
        #[serde(default)]
        types: Vec<TypeNode>,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        nullable: Option<bool>,
    },
}

/// `deprecated` is either a boolean or a deprecation message.
fn flag_or_message<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FlagOrMessage {
        Flag(bool),
        Message(String),
    }

    Ok(match Option::<FlagOrMessage>::deserialize(deserializer)? {
        Some(FlagOrMessage::Flag(flag)) => flag,
        Some(FlagOrMessage::Message(_)) => true,
        None => false,
    })
}
