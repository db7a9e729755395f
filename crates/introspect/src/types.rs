//! Serde types for introspection responses.
//!
//! These mirror the shape of the standard introspection query result in
//! [`crate::INTROSPECTION_QUERY`].

use serde::{Deserialize, Serialize};

/// Top-level introspection response: `{data: {__schema: ...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectionReply {
    pub data: IntrospectionData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectionData {
    #[serde(rename = "__schema")]
    pub schema: RemoteSchema,
}

/// Complete schema description as returned by introspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSchema {
    pub query_type: Option<RootTypeRef>,
    pub mutation_type: Option<RootTypeRef>,
    pub subscription_type: Option<RootTypeRef>,
    pub types: Vec<TypeDescriptor>,
    pub directives: Vec<DirectiveDescriptor>,
}

/// Reference to a root operation type by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootTypeRef {
    pub name: String,
}

/// One type definition, discriminated by its introspection `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TypeDescriptor {
    #[serde(rename = "SCALAR")]
    Scalar(ScalarDescriptor),
    #[serde(rename = "OBJECT")]
    Object(ObjectDescriptor),
    #[serde(rename = "INTERFACE")]
    Interface(InterfaceDescriptor),
    #[serde(rename = "UNION")]
    Union(UnionDescriptor),
    #[serde(rename = "ENUM")]
    Enum(EnumDescriptor),
    #[serde(rename = "INPUT_OBJECT")]
    InputObject(InputObjectDescriptor),
}

impl TypeDescriptor {
    /// The type's name regardless of kind.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(t) => &t.name,
            Self::Object(t) => &t.name,
            Self::Interface(t) => &t.name,
            Self::Union(t) => &t.name,
            Self::Enum(t) => &t.name,
            Self::InputObject(t) => &t.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalarDescriptor {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDescriptor {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<FieldDescriptor>,
    pub interfaces: Vec<RootTypeRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceDescriptor {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<FieldDescriptor>,
    pub interfaces: Vec<RootTypeRef>,
    pub possible_types: Option<Vec<RootTypeRef>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnionDescriptor {
    pub name: String,
    pub description: Option<String>,
    pub possible_types: Vec<RootTypeRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDescriptor {
    pub name: String,
    pub description: Option<String>,
    pub enum_values: Vec<EnumValueDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputObjectDescriptor {
    pub name: String,
    pub description: Option<String>,
    pub input_fields: Vec<InputValueDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: String,
    pub description: Option<String>,
    pub args: Vec<InputValueDescriptor>,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputValueDescriptor {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValueDescriptor {
    pub name: String,
    pub description: Option<String>,
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectiveDescriptor {
    pub name: String,
    pub description: Option<String>,
    pub locations: Vec<String>,
    pub args: Vec<InputValueDescriptor>,
}

/// A (possibly wrapped) type reference: `kind` plus nested `ofType`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub kind: TypeRefKind,
    pub name: Option<String>,
    pub of_type: Option<Box<TypeRef>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum TypeRefKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl TypeRef {
    /// Render the reference as GraphQL type syntax.
    ///
    /// Unwraps `NonNull` and `List` wrappers, producing e.g. `String`,
    /// `String!`, `[String]`, or `[String!]!`.
    #[must_use]
    pub fn render(&self) -> String {
        match self.kind {
            TypeRefKind::NonNull => self
                .of_type
                .as_ref()
                .map_or_else(|| "!".to_string(), |inner| format!("{}!", inner.render())),
            TypeRefKind::List => self
                .of_type
                .as_ref()
                .map_or_else(|| "[]".to_string(), |inner| format!("[{}]", inner.render())),
            _ => self.name.as_deref().unwrap_or_default().to_string(),
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}
