//! Query fact extraction.
//!
//! Given a query document's source text and (optionally) a schema, this crate
//! produces a lightweight fact set: the mapping from declared variable names
//! to their named types, and the list of operation definitions in document
//! order. Parse failure is a recoverable, expected condition during active
//! typing and is reported as an [`ExtractError`] rather than a panic.

use std::collections::BTreeMap;

use apollo_compiler::ast;
use apollo_compiler::validation::Valid;
use apollo_compiler::Schema;
use thiserror::Error;

/// Why fact extraction produced no facts.
///
/// Both variants are recoverable; callers typically degrade to "no facts"
/// behavior (no variable completions, no variables schema).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The source text was empty or whitespace-only.
    #[error("document is empty")]
    EmptySource,
    /// The source text does not parse as a GraphQL document.
    #[error("document does not parse")]
    Unparseable,
}

/// Named-type descriptor for a declared variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableType {
    /// The named (unwrapped) type, e.g. `Int` for `[Int!]!`.
    pub name: String,
    /// The type's schema description, when it has one.
    pub description: Option<String>,
}

/// A variable declaration as it appears on an operation definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableFacts {
    /// Variable name without the `$` sigil.
    pub name: String,
    /// Whether the declared type is non-null at the outermost level.
    pub non_null: bool,
}

/// Which kind of operation a definition declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl From<ast::OperationType> for OperationKind {
    fn from(value: ast::OperationType) -> Self {
        match value {
            ast::OperationType::Query => Self::Query,
            ast::OperationType::Mutation => Self::Mutation,
            ast::OperationType::Subscription => Self::Subscription,
        }
    }
}

/// One operation definition, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationFacts {
    pub name: Option<String>,
    pub kind: OperationKind,
    pub variables: Vec<VariableFacts>,
}

/// Facts extracted from a query document.
///
/// Produced fresh on every extraction call and never mutated afterwards.
/// The default value carries no facts at all: no schema, no operations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryFacts {
    /// Variable name to named-type descriptor.
    ///
    /// `None` when no schema was supplied — explicitly distinct from an empty
    /// map, which means "schema loaded, zero variables resolved".
    pub variable_to_type: Option<BTreeMap<String, VariableType>>,
    /// Every operation definition, in document order.
    pub operations: Vec<OperationFacts>,
}

impl QueryFacts {
    /// Names of all declared variables across every operation, in document
    /// order, without duplicates.
    #[must_use]
    pub fn declared_variable_names(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for op in &self.operations {
            for var in &op.variables {
                if !seen.contains(&var.name.as_str()) {
                    seen.push(var.name.as_str());
                }
            }
        }
        seen
    }
}

/// Extract facts from a query document.
///
/// Parses `source` and walks each operation definition's declared variables.
/// With a schema present, each variable's inner named type is resolved
/// against it; variables whose type is unknown to the schema are omitted from
/// the mapping (keys are never null-valued). Operations are collected
/// regardless of schema presence.
///
/// Identical input always yields an equivalent output.
pub fn extract(
    schema: Option<&Valid<Schema>>,
    source: &str,
) -> Result<QueryFacts, ExtractError> {
    if source.trim().is_empty() {
        return Err(ExtractError::EmptySource);
    }

    let Ok(document) = ast::Document::parse(source, "query.graphql") else {
        tracing::debug!("query document does not parse, no facts extracted");
        return Err(ExtractError::Unparseable);
    };

    let operations: Vec<OperationFacts> = document
        .definitions
        .iter()
        .filter_map(|definition| {
            let ast::Definition::OperationDefinition(op) = definition else {
                return None;
            };
            Some(OperationFacts {
                name: op.name.as_ref().map(|n| n.as_str().to_string()),
                kind: op.operation_type.into(),
                variables: op
                    .variables
                    .iter()
                    .map(|var| VariableFacts {
                        name: var.name.as_str().to_string(),
                        non_null: matches!(
                            *var.ty,
                            ast::Type::NonNullNamed(_) | ast::Type::NonNullList(_)
                        ),
                    })
                    .collect(),
            })
        })
        .collect();

    let variable_to_type = schema.map(|schema| collect_variables(schema, &document));

    Ok(QueryFacts {
        variable_to_type,
        operations,
    })
}

/// Resolve every declared variable's named type against the schema.
///
/// Variables whose inner named type is not defined by the schema are omitted.
fn collect_variables(
    schema: &Valid<Schema>,
    document: &ast::Document,
) -> BTreeMap<String, VariableType> {
    let mut variable_to_type = BTreeMap::new();

    for definition in &document.definitions {
        let ast::Definition::OperationDefinition(op) = definition else {
            continue;
        };
        for var in &op.variables {
            let named = var.ty.inner_named_type();
            let Some(type_def) = schema.types.get(named.as_str()) else {
                tracing::debug!(
                    variable = var.name.as_str(),
                    r#type = named.as_str(),
                    "declared variable type not found in schema, omitting"
                );
                continue;
            };
            variable_to_type.insert(
                var.name.as_str().to_string(),
                VariableType {
                    name: named.as_str().to_string(),
                    description: type_def.description().map(|d| (**d).to_string()),
                },
            );
        }
    }

    variable_to_type
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA_SDL: &str = r"
        type Query {
          allFilms(skip: Int): [Film]
        }

        type Film {
          title: String
          species(skip: Int): [Species]
        }

        type Species {
          name: String
        }
    ";

    const QUERY: &str = r"
        query NamedQuery($filmSkip: Int!, $speciesSkip: Int!) {
          films: allFilms(skip: $filmSkip) {
            title
            species(skip: $speciesSkip) {
              name
            }
          }
        }
    ";

    fn schema() -> Valid<Schema> {
        Schema::parse_and_validate(SCHEMA_SDL, "schema.graphql")
            .expect("test schema should be valid")
    }

    #[test]
    fn extracts_variables_and_operations() {
        let schema = schema();
        let facts = extract(Some(&schema), QUERY).expect("query should parse");

        let variables = facts.variable_to_type.expect("schema was supplied");
        assert_eq!(variables.len(), 2);
        assert_eq!(variables["filmSkip"].name, "Int");
        assert_eq!(variables["speciesSkip"].name, "Int");

        assert_eq!(facts.operations.len(), 1);
        let op = &facts.operations[0];
        assert_eq!(op.name.as_deref(), Some("NamedQuery"));
        assert_eq!(op.kind, OperationKind::Query);
        assert_eq!(op.variables.len(), 2);
        assert!(op.variables.iter().all(|v| v.non_null));
    }

    #[test]
    fn absent_schema_leaves_variable_mapping_absent_not_empty() {
        let facts = extract(None, QUERY).expect("query should parse");
        assert!(facts.variable_to_type.is_none());
        assert_eq!(facts.operations.len(), 1);
    }

    #[test]
    fn unknown_variable_type_is_omitted() {
        let schema = schema();
        let facts = extract(
            Some(&schema),
            "query Q($skip: Int!, $what: Mystery) { allFilms(skip: $skip) { title } }",
        )
        .expect("query should parse");

        let variables = facts.variable_to_type.expect("schema was supplied");
        assert!(variables.contains_key("skip"));
        assert!(!variables.contains_key("what"));
    }

    #[test]
    fn zero_variables_with_schema_is_empty_not_absent() {
        let schema = schema();
        let facts = extract(Some(&schema), "{ allFilms { title } }").expect("should parse");
        let variables = facts.variable_to_type.expect("schema was supplied");
        assert!(variables.is_empty());
    }

    #[test]
    fn unparseable_text_returns_error_not_panic() {
        let schema = schema();
        assert_eq!(
            extract(Some(&schema), "{ malformed"),
            Err(ExtractError::Unparseable)
        );
    }

    #[test]
    fn empty_source_is_distinct_from_unparseable() {
        assert_eq!(extract(None, ""), Err(ExtractError::EmptySource));
        assert_eq!(extract(None, "   \n  "), Err(ExtractError::EmptySource));
    }

    #[test]
    fn extraction_is_idempotent() {
        let schema = schema();
        let first = extract(Some(&schema), QUERY).expect("query should parse");
        let second = extract(Some(&schema), QUERY).expect("query should parse");
        assert_eq!(first, second);
    }

    #[test]
    fn operations_preserve_document_order() {
        let facts = extract(
            None,
            "query A { __typename } mutation B { __typename } query C { __typename }",
        )
        .expect("should parse");
        let names: Vec<_> = facts
            .operations
            .iter()
            .map(|op| op.name.as_deref().unwrap_or(""))
            .collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(facts.operations[1].kind, OperationKind::Mutation);
    }

    #[test]
    fn declared_variable_names_deduplicates_across_operations() {
        let facts = extract(
            None,
            "query A($skip: Int) { __typename } query B($skip: Int, $first: Int) { __typename }",
        )
        .expect("should parse");
        assert_eq!(facts.declared_variable_names(), ["skip", "first"]);
    }
}
