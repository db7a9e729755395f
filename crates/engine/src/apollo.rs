//! [`AnalysisEngine`] implementation over apollo-rs.

use std::fmt::Write as _;

use apollo_compiler::ast;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::validation::DiagnosticList;
use apollo_compiler::ExecutableDocument;
use async_trait::async_trait;
use workbench_types::{Diagnostic, EnginePosition, EngineRange};

use crate::cursor::{self, CursorSymbol};
use crate::line_index::LineIndex;
use crate::{AnalysisEngine, CancelToken, EngineError, SharedSchema, Suggestion};

/// Source path label used for operation documents in error output.
const DOCUMENT_PATH: &str = "operation.graphql";

/// The default engine: apollo-compiler for validation, apollo-parser for
/// cursor-context lookups on incomplete documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApolloEngine;

impl ApolloEngine {
    /// Creates the engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AnalysisEngine for ApolloEngine {
    #[tracing::instrument(skip_all, fields(source_len = source.len(), has_schema = schema.is_some()))]
    async fn diagnostics(
        &self,
        source: &str,
        schema: Option<&SharedSchema>,
    ) -> Result<Vec<Diagnostic>, EngineError> {
        let diagnostics = match schema {
            Some(schema) => {
                match ExecutableDocument::parse_and_validate(schema.as_ref(), source, DOCUMENT_PATH)
                {
                    Ok(_) => Vec::new(),
                    Err(with_errors) => convert_diagnostics(&with_errors.errors),
                }
            }
            // Schema-less sessions still get syntax errors.
            None => match ast::Document::parse(source, DOCUMENT_PATH) {
                Ok(_) => Vec::new(),
                Err(with_errors) => convert_diagnostics(&with_errors.errors),
            },
        };

        tracing::debug!(count = diagnostics.len(), "diagnostics computed");
        Ok(diagnostics)
    }

    #[tracing::instrument(skip_all, fields(line = position.line, character = position.character))]
    async fn hover(
        &self,
        schema: &SharedSchema,
        source: &str,
        position: EnginePosition,
        cancel: Option<&CancelToken>,
    ) -> Result<Option<String>, EngineError> {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(EngineError::Cancelled);
        }

        let Some(offset) = LineIndex::new(source).offset(position) else {
            return Ok(None);
        };
        let Some(symbol) = cursor::symbol_at(source, offset) else {
            return Ok(None);
        };

        let contents = match symbol {
            CursorSymbol::Field { name } => {
                let Some(parent) = cursor::parent_type_at(schema.as_ref(), source, offset) else {
                    return Ok(None);
                };
                let Ok(field) = schema.type_field(&parent, &name) else {
                    return Ok(None);
                };
                let mut text = format!("**Field:** `{name}`\n\n**Type:** `{}`", field.ty);
                if let Some(description) = &field.description {
                    let _ = write!(text, "\n\n---\n\n{description}");
                }
                text
            }
            CursorSymbol::TypeCondition { name } => {
                let Some(type_def) = schema.types.get(name.as_str()) else {
                    return Ok(None);
                };
                let mut text = format!("**Type:** `{name}`\n\n**Kind:** {}", kind_label(type_def));
                if let Some(description) = type_def.description() {
                    let _ = write!(text, "\n\n---\n\n{description}");
                }
                text
            }
            CursorSymbol::Variable { name } => {
                let declared = cursor::declared_variables(source);
                let Some(variable) = declared.iter().find(|v| v.name == name) else {
                    return Ok(None);
                };
                match &variable.ty {
                    Some(ty) => format!("**Variable:** `${name}`\n\n**Type:** `{ty}`"),
                    None => format!("**Variable:** `${name}`"),
                }
            }
            CursorSymbol::FragmentSpread { name } => {
                let Some(condition) = cursor::fragment_type_condition(source, &name) else {
                    return Ok(None);
                };
                format!("**Fragment:** `{name}`\n\n**On Type:** `{condition}`")
            }
        };

        Ok(Some(contents))
    }

    #[tracing::instrument(skip_all, fields(line = position.line, character = position.character))]
    async fn completions(
        &self,
        schema: &SharedSchema,
        source: &str,
        position: EnginePosition,
        cancel: Option<&CancelToken>,
    ) -> Result<Vec<Suggestion>, EngineError> {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(EngineError::Cancelled);
        }

        let Some(offset) = LineIndex::new(source).offset(position) else {
            return Ok(Vec::new());
        };

        // A `$` sigil wins over the surrounding selection context.
        if let Some(prefix) = cursor::variable_prefix(source, offset) {
            let suggestions = cursor::declared_variables(source)
                .into_iter()
                .filter(|v| v.name.starts_with(&prefix))
                .map(|v| Suggestion {
                    label: v.name,
                    detail: v.ty,
                    deprecated: false,
                })
                .collect();
            return Ok(suggestions);
        }

        let Some(parent) = cursor::parent_type_at(schema.as_ref(), source, offset) else {
            return Ok(Vec::new());
        };
        let suggestions = match schema.types.get(parent.as_str()) {
            Some(ExtendedType::Object(object)) => field_suggestions(object.fields.iter()),
            Some(ExtendedType::Interface(interface)) => field_suggestions(interface.fields.iter()),
            _ => Vec::new(),
        };

        tracing::debug!(parent = %parent, count = suggestions.len(), "field completions");
        Ok(suggestions)
    }
}

fn field_suggestions<'a, I>(fields: I) -> Vec<Suggestion>
where
    I: Iterator<
        Item = (
            &'a apollo_compiler::Name,
            &'a apollo_compiler::schema::Component<ast::FieldDefinition>,
        ),
    >,
{
    fields
        .map(|(name, field)| Suggestion {
            label: name.to_string(),
            detail: Some(field.ty.to_string()),
            deprecated: field.directives.get("deprecated").is_some(),
        })
        .collect()
}

const fn kind_label(type_def: &ExtendedType) -> &'static str {
    match type_def {
        ExtendedType::Scalar(_) => "Scalar",
        ExtendedType::Object(_) => "Object",
        ExtendedType::Interface(_) => "Interface",
        ExtendedType::Union(_) => "Union",
        ExtendedType::Enum(_) => "Enum",
        ExtendedType::InputObject(_) => "Input Object",
    }
}

/// Converts apollo-compiler diagnostics into the engine-convention shape.
///
/// apollo-compiler reports 1-based lines and columns; the engine contract
/// is 0-based on both axes.
fn convert_diagnostics(errors: &DiagnosticList) -> Vec<Diagnostic> {
    errors
        .iter()
        .map(|diag| {
            let range = diag.line_column_range().map_or_else(EngineRange::default, |r| {
                EngineRange::new(
                    EnginePosition::new(
                        r.start.line.saturating_sub(1) as u32,
                        r.start.column.saturating_sub(1) as u32,
                    ),
                    EnginePosition::new(
                        r.end.line.saturating_sub(1) as u32,
                        r.end.column.saturating_sub(1) as u32,
                    ),
                )
            });
            Diagnostic::error(diag.error.to_string(), range)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_schema;

    fn film_schema() -> SharedSchema {
        build_schema(
            "type Query { allFilms(skip: Int): [Film] film(id: ID!): Film }\n\
             type Film {\n\
               \"The film's title.\"\n\
               title: String\n\
               episode: Int @deprecated(reason: \"use title\")\n\
             }",
            "schema.graphql",
        )
        .expect("test schema is valid")
    }

    #[tokio::test]
    async fn valid_document_has_no_diagnostics() {
        let engine = ApolloEngine::new();
        let schema = film_schema();
        let diagnostics = engine
            .diagnostics("query { allFilms { title } }", Some(&schema))
            .await
            .unwrap();
        assert!(diagnostics.is_empty());
    }

    #[tokio::test]
    async fn unknown_field_is_reported_zero_based() {
        let engine = ApolloEngine::new();
        let schema = film_schema();
        let diagnostics = engine
            .diagnostics("query { allFilms { nope } }", Some(&schema))
            .await
            .unwrap();

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("nope"));
        assert_eq!(diagnostics[0].range.start.line, 0);
        assert_eq!(diagnostics[0].range.start.character, 19);
    }

    #[tokio::test]
    async fn without_a_schema_only_syntax_is_checked() {
        let engine = ApolloEngine::new();
        let valid = engine
            .diagnostics("query { completelyMadeUp }", None)
            .await
            .unwrap();
        assert!(valid.is_empty());

        let broken = engine.diagnostics("query {", None).await.unwrap();
        assert!(!broken.is_empty());
    }

    #[tokio::test]
    async fn hover_describes_a_field() {
        let engine = ApolloEngine::new();
        let schema = film_schema();
        let source = "query { allFilms { title } }";
        let position = EnginePosition::new(0, source.find("title").unwrap() as u32);

        let contents = engine
            .hover(&schema, source, position, None)
            .await
            .unwrap()
            .expect("hover content");
        assert!(contents.contains("**Field:** `title`"));
        assert!(contents.contains("`String`"));
        assert!(contents.contains("The film's title."));
    }

    #[tokio::test]
    async fn hover_outside_any_symbol_is_none() {
        let engine = ApolloEngine::new();
        let schema = film_schema();
        let contents = engine
            .hover(&schema, "query { allFilms { title } }", EnginePosition::new(5, 0), None)
            .await
            .unwrap();
        assert!(contents.is_none());
    }

    #[tokio::test]
    async fn completions_list_parent_type_fields() {
        let engine = ApolloEngine::new();
        let schema = film_schema();
        let source = "query { allFilms {  } }";
        let position = EnginePosition::new(0, 19);

        let suggestions = engine
            .completions(&schema, source, position, None)
            .await
            .unwrap();
        let labels: Vec<&str> = suggestions.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["title", "episode"]);

        let episode = &suggestions[1];
        assert!(episode.deprecated);
        assert_eq!(episode.detail.as_deref(), Some("Int"));
    }

    #[tokio::test]
    async fn variable_sigil_completes_declared_variables() {
        let engine = ApolloEngine::new();
        let schema = film_schema();
        let source =
            "query($filmSkip: Int, $speciesSkip: Int) { allFilms(skip: $film) { title } }";
        let cursor = source.find("$film)").unwrap() + "$film".len();
        let position = EnginePosition::new(0, cursor as u32);

        let suggestions = engine
            .completions(&schema, source, position, None)
            .await
            .unwrap();
        let labels: Vec<&str> = suggestions.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["filmSkip"]);
        assert_eq!(suggestions[0].detail.as_deref(), Some("Int"));
    }

    #[tokio::test]
    async fn cancelled_requests_fail_fast() {
        let engine = ApolloEngine::new();
        let schema = film_schema();
        let token = CancelToken::new();
        token.cancel();

        let result = engine
            .completions(&schema, "query {  }", EnginePosition::new(0, 8), Some(&token))
            .await;
        assert_eq!(result, Err(EngineError::Cancelled));
    }
}
