//! Completions and JSON-schema configuration for the variables document.

use async_trait::async_trait;
use workbench_facts::{extract, QueryFacts};
use workbench_types::{CompletionItem, CompletionKind, EditorPosition};

use crate::providers::{CompletionProvider, ProviderContext};

/// Offers the query's declared variables inside the variables JSON model.
///
/// Reads the query model through the context, never the JSON text it is
/// attached to. One item per declared variable: the label is the variable
/// type's description when it has one, else the type name; the insert text
/// is the variable name itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct VariablesCompletionProvider;

impl VariablesCompletionProvider {
    /// Creates the provider.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CompletionProvider for VariablesCompletionProvider {
    async fn completions(
        &self,
        ctx: ProviderContext<'_>,
        _position: EditorPosition,
    ) -> Vec<CompletionItem> {
        let Ok(facts) = extract(ctx.schema.map(|s| s.as_ref()), ctx.query_source) else {
            return Vec::new();
        };
        let Some(variable_to_type) = &facts.variable_to_type else {
            return Vec::new();
        };

        variable_to_type
            .iter()
            .map(|(name, ty)| {
                let label = ty.description.clone().unwrap_or_else(|| ty.name.clone());
                CompletionItem::new(label, name.clone(), CompletionKind::Variable)
            })
            .collect()
    }
}

/// Derives the declarative JSON-schema contract for the variables document.
///
/// Every declared variable becomes a string-typed property; variables
/// declared non-null become required. Configuration data for the host's
/// JSON tooling, not executable logic.
#[must_use]
pub fn variables_json_schema(facts: &QueryFacts) -> serde_json::Value {
    let properties: serde_json::Map<String, serde_json::Value> = facts
        .variable_to_type
        .as_ref()
        .map(|variables| {
            variables
                .keys()
                .map(|name| (name.clone(), serde_json::json!({ "type": "string" })))
                .collect()
        })
        .unwrap_or_default();

    let mut required: Vec<&str> = Vec::new();
    for operation in &facts.operations {
        for variable in &operation.variables {
            if variable.non_null && !required.contains(&variable.name.as_str()) {
                required.push(&variable.name);
            }
        }
    }

    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

#[cfg(test)]
mod tests {
    use workbench_engine::build_schema;
    use workbench_test_utils::{film_schema, NAMED_QUERY};

    use super::*;

    fn provider_ctx<'a>(
        query_source: &'a str,
        schema: Option<&'a workbench_engine::SharedSchema>,
    ) -> ProviderContext<'a> {
        ProviderContext {
            source: "{}",
            query_source,
            schema,
        }
    }

    #[tokio::test]
    async fn one_item_per_declared_variable() {
        let schema = film_schema();
        let items = VariablesCompletionProvider::new()
            .completions(provider_ctx(NAMED_QUERY, Some(&schema)), EditorPosition::new(1, 1))
            .await;

        assert_eq!(items.len(), 2);
        let species: Vec<_> = items
            .iter()
            .filter(|i| i.insert_text == "speciesSkip")
            .collect();
        assert_eq!(species.len(), 1);
        assert_eq!(species[0].kind, CompletionKind::Variable);
    }

    #[tokio::test]
    async fn label_prefers_the_type_description() {
        let schema = build_schema(
            "\"How many to skip.\"\nscalar Skip\ntype Query { films(skip: Skip): Int }",
            "schema.graphql",
        )
        .unwrap();
        let items = VariablesCompletionProvider::new()
            .completions(
                provider_ctx("query($s: Skip) { films(skip: $s) }", Some(&schema)),
                EditorPosition::new(1, 1),
            )
            .await;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label, "How many to skip.");
        assert_eq!(items[0].insert_text, "s");
    }

    #[tokio::test]
    async fn absent_schema_yields_no_items() {
        let items = VariablesCompletionProvider::new()
            .completions(provider_ctx(NAMED_QUERY, None), EditorPosition::new(1, 1))
            .await;
        assert!(items.is_empty());
    }

    #[test]
    fn json_schema_requires_non_null_variables() {
        let schema = film_schema();
        let facts = extract(Some(schema.as_ref()), NAMED_QUERY).unwrap();
        let value = variables_json_schema(&facts);

        assert_eq!(value["type"], "object");
        assert!(value["properties"]["filmSkip"].is_object());
        assert!(value["properties"]["speciesSkip"].is_object());
        let required: Vec<&str> = value["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(serde_json::Value::as_str)
            .collect();
        assert_eq!(required, vec!["filmSkip", "speciesSkip"]);
    }
}
