use serde::Serialize;
use serde_json::{json, Value};

use crate::chain::codec::MessageCodec;
use crate::chain::proto::{Delegation, Params, Post};
use crate::error::CodecError;

/// One field of a stored type, as seen by a JSON consumer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldStructure {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// Field names and JSON kinds of `T`, read off its default instance.
/// Fields come back in key order of the JSON object.
pub fn structure_of<T: MessageCodec>() -> Result<Vec<FieldStructure>, CodecError> {
    let template = T::from_partial(&json!({}))?.to_json()?;
    let fields = match template {
        Value::Object(map) => map
            .into_iter()
            .map(|(name, value)| FieldStructure {
                name,
                kind: kind_of(&value),
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(fields)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        Value::Null | Value::Array(_) | Value::Object(_) => "object",
    }
}

/// Structures of every type the store holds, keyed by type name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeStructures {
    pub delegation: Vec<FieldStructure>,
    pub params: Vec<FieldStructure>,
    pub post: Vec<FieldStructure>,
}

impl TypeStructures {
    pub fn build() -> Result<Self, CodecError> {
        Ok(Self {
            delegation: structure_of::<Delegation>()?,
            params: structure_of::<Params>()?,
            post: structure_of::<Post>()?,
        })
    }

    pub fn get(&self, type_name: &str) -> Option<&[FieldStructure]> {
        match type_name {
            "Delegation" => Some(&self.delegation),
            "Params" => Some(&self.params),
            "Post" => Some(&self.post),
            _ => None,
        }
    }
}
