//! Schema Definition Language rendering of introspection responses.

use std::fmt::Write;

use crate::types::{
    DirectiveDescriptor, FieldDescriptor, InputValueDescriptor, IntrospectionReply, RemoteSchema,
    TypeDescriptor,
};

/// Built-in scalars that never appear in generated SDL.
const BUILTIN_SCALARS: &[&str] = &["Int", "Float", "String", "Boolean", "ID"];

/// Built-in directives that every server implements implicitly.
const BUILTIN_DIRECTIVES: &[&str] = &["skip", "include", "deprecated", "specifiedBy"];

/// Render an introspection response as SDL.
///
/// Built-in scalars, built-in directives and `__`-prefixed introspection
/// types are filtered out; descriptions, deprecations and custom directives
/// are preserved. The result parses with apollo-compiler's schema parser.
#[must_use]
#[tracing::instrument(skip(reply), fields(types = reply.data.schema.types.len()))]
pub fn introspection_to_sdl(reply: &IntrospectionReply) -> String {
    let mut writer = SdlWriter::default();
    writer.schema(&reply.data.schema);
    writer.finish()
}

/// Incremental SDL text builder.
#[derive(Default)]
struct SdlWriter {
    out: String,
}

impl SdlWriter {
    fn finish(self) -> String {
        self.out.trim_end().to_string()
    }

    fn schema(&mut self, schema: &RemoteSchema) {
        // A `schema { ... }` block is only needed when a root type deviates
        // from its conventional name.
        let unconventional_roots = schema.query_type.as_ref().is_some_and(|t| t.name != "Query")
            || schema
                .mutation_type
                .as_ref()
                .is_some_and(|t| t.name != "Mutation")
            || schema
                .subscription_type
                .as_ref()
                .is_some_and(|t| t.name != "Subscription");

        if unconventional_roots {
            self.out.push_str("schema {\n");
            for (root, label) in [
                (&schema.query_type, "query"),
                (&schema.mutation_type, "mutation"),
                (&schema.subscription_type, "subscription"),
            ] {
                if let Some(ty) = root {
                    let _ = writeln!(self.out, "  {label}: {}", ty.name);
                }
            }
            self.out.push_str("}\n\n");
        }

        for directive in &schema.directives {
            if BUILTIN_DIRECTIVES.contains(&directive.name.as_str()) {
                continue;
            }
            self.directive(directive);
        }

        for type_def in &schema.types {
            let name = type_def.name();
            if name.starts_with("__") || BUILTIN_SCALARS.contains(&name) {
                continue;
            }
            self.type_definition(type_def);
            self.out.push_str("\n\n");
        }
    }

    fn directive(&mut self, directive: &DirectiveDescriptor) {
        self.description(directive.description.as_deref(), 0);
        let _ = write!(self.out, "directive @{}", directive.name);
        self.argument_list(&directive.args);
        self.out.push_str(" on ");
        self.out.push_str(&directive.locations.join(" | "));
        self.out.push_str("\n\n");
    }

    fn type_definition(&mut self, type_def: &TypeDescriptor) {
        match type_def {
            TypeDescriptor::Scalar(t) => {
                self.description(t.description.as_deref(), 0);
                let _ = writeln!(self.out, "scalar {}", t.name);
            }
            TypeDescriptor::Object(t) => {
                self.description(t.description.as_deref(), 0);
                let _ = write!(self.out, "type {}", t.name);
                self.implements(&t.interfaces);
                self.field_block(&t.fields);
            }
            TypeDescriptor::Interface(t) => {
                self.description(t.description.as_deref(), 0);
                let _ = write!(self.out, "interface {}", t.name);
                self.implements(&t.interfaces);
                self.field_block(&t.fields);
            }
            TypeDescriptor::Union(t) => {
                self.description(t.description.as_deref(), 0);
                let _ = write!(self.out, "union {} = ", t.name);
                let members: Vec<&str> =
                    t.possible_types.iter().map(|m| m.name.as_str()).collect();
                self.out.push_str(&members.join(" | "));
            }
            TypeDescriptor::Enum(t) => {
                self.description(t.description.as_deref(), 0);
                let _ = writeln!(self.out, "enum {} {{", t.name);
                for value in &t.enum_values {
                    self.description(value.description.as_deref(), 1);
                    let _ = write!(self.out, "  {}", value.name);
                    self.deprecation(value.is_deprecated, value.deprecation_reason.as_deref());
                    self.out.push('\n');
                }
                self.out.push('}');
            }
            TypeDescriptor::InputObject(t) => {
                self.description(t.description.as_deref(), 0);
                let _ = writeln!(self.out, "input {} {{", t.name);
                for field in &t.input_fields {
                    self.description(field.description.as_deref(), 1);
                    let _ = write!(self.out, "  {}: {}", field.name, field.type_ref.render());
                    if let Some(default) = &field.default_value {
                        let _ = write!(self.out, " = {default}");
                    }
                    self.out.push('\n');
                }
                self.out.push('}');
            }
        }
    }

    fn implements(&mut self, interfaces: &[crate::types::RootTypeRef]) {
        if interfaces.is_empty() {
            return;
        }
        self.out.push_str(" implements ");
        let names: Vec<&str> = interfaces.iter().map(|i| i.name.as_str()).collect();
        self.out.push_str(&names.join(" & "));
    }

    fn field_block(&mut self, fields: &[FieldDescriptor]) {
        self.out.push_str(" {\n");
        for field in fields {
            self.description(field.description.as_deref(), 1);
            let _ = write!(self.out, "  {}", field.name);
            self.argument_list(&field.args);
            let _ = write!(self.out, ": {}", field.type_ref.render());
            self.deprecation(field.is_deprecated, field.deprecation_reason.as_deref());
            self.out.push('\n');
        }
        self.out.push('}');
    }

    fn argument_list(&mut self, args: &[InputValueDescriptor]) {
        if args.is_empty() {
            return;
        }
        self.out.push('(');
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            let _ = write!(self.out, "{}: {}", arg.name, arg.type_ref.render());
            if let Some(default) = &arg.default_value {
                let _ = write!(self.out, " = {default}");
            }
        }
        self.out.push(')');
    }

    fn deprecation(&mut self, is_deprecated: bool, reason: Option<&str>) {
        if !is_deprecated {
            return;
        }
        match reason {
            Some(reason) => {
                let _ = write!(self.out, " @deprecated(reason: \"{}\")", escape(reason));
            }
            None => self.out.push_str(" @deprecated"),
        }
    }

    fn description(&mut self, description: Option<&str>, indent: usize) {
        let Some(desc) = description else { return };
        let pad = "  ".repeat(indent);
        if desc.contains('\n') {
            let _ = writeln!(self.out, "{pad}\"\"\"\n{desc}\n{pad}\"\"\"");
        } else {
            let _ = writeln!(self.out, "{pad}\"{}\"", escape(desc));
        }
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        EnumDescriptor, EnumValueDescriptor, IntrospectionData, ObjectDescriptor, RootTypeRef,
        ScalarDescriptor, TypeRef, TypeRefKind,
    };

    fn reply_with_types(types: Vec<TypeDescriptor>) -> IntrospectionReply {
        IntrospectionReply {
            data: IntrospectionData {
                schema: RemoteSchema {
                    query_type: Some(RootTypeRef {
                        name: "Query".to_string(),
                    }),
                    mutation_type: None,
                    subscription_type: None,
                    types,
                    directives: Vec::new(),
                },
            },
        }
    }

    #[test]
    fn renders_an_object_type_with_a_described_field() {
        let reply = reply_with_types(vec![TypeDescriptor::Object(ObjectDescriptor {
            name: "Query".to_string(),
            description: None,
            fields: vec![FieldDescriptor {
                name: "hello".to_string(),
                description: Some("A greeting.".to_string()),
                args: Vec::new(),
                type_ref: TypeRef {
                    kind: TypeRefKind::Scalar,
                    name: Some("String".to_string()),
                    of_type: None,
                },
                is_deprecated: false,
                deprecation_reason: None,
            }],
            interfaces: Vec::new(),
        })]);

        let sdl = introspection_to_sdl(&reply);
        assert!(sdl.contains("type Query {"));
        assert!(sdl.contains("\"A greeting.\""));
        assert!(sdl.contains("hello: String"));
    }

    #[test]
    fn filters_builtin_scalars_and_introspection_types() {
        let reply = reply_with_types(vec![
            TypeDescriptor::Scalar(ScalarDescriptor {
                name: "String".to_string(),
                description: None,
            }),
            TypeDescriptor::Scalar(ScalarDescriptor {
                name: "__TypeKind".to_string(),
                description: None,
            }),
            TypeDescriptor::Scalar(ScalarDescriptor {
                name: "DateTime".to_string(),
                description: None,
            }),
        ]);

        let sdl = introspection_to_sdl(&reply);
        assert!(!sdl.contains("scalar String"));
        assert!(!sdl.contains("__TypeKind"));
        assert!(sdl.contains("scalar DateTime"));
    }

    #[test]
    fn marks_deprecated_enum_values() {
        let reply = reply_with_types(vec![TypeDescriptor::Enum(EnumDescriptor {
            name: "Episode".to_string(),
            description: None,
            enum_values: vec![
                EnumValueDescriptor {
                    name: "JEDI".to_string(),
                    description: None,
                    is_deprecated: false,
                    deprecation_reason: None,
                },
                EnumValueDescriptor {
                    name: "EMPIRE".to_string(),
                    description: None,
                    is_deprecated: true,
                    deprecation_reason: Some("use \"JEDI\"".to_string()),
                },
            ],
        })]);

        let sdl = introspection_to_sdl(&reply);
        assert!(sdl.contains("enum Episode {"));
        assert!(sdl.contains("EMPIRE @deprecated(reason: \"use \\\"JEDI\\\"\")"));
    }

    #[test]
    fn escapes_special_characters() {
        assert_eq!(escape("hello"), "hello");
        assert_eq!(escape("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape("line\nbreak"), "line\\nbreak");
        assert_eq!(escape("C:\\path"), "C:\\\\path");
    }
}
