//! Cursor context resolution over the apollo-parser CST.
//!
//! apollo-parser is error tolerant, so these lookups work on documents that
//! are still being typed. Offsets are byte offsets into the source text.

use apollo_compiler::ast::OperationType;
use apollo_compiler::validation::Valid;
use apollo_compiler::Schema;
use apollo_parser::cst::{self, CstNode};
use apollo_parser::Parser;

/// The symbol under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CursorSymbol {
    /// A field selection.
    Field { name: String },
    /// A type condition on a fragment or inline fragment.
    TypeCondition { name: String },
    /// A fragment spread.
    FragmentSpread { name: String },
    /// A variable reference or declaration.
    Variable { name: String },
}

/// A variable declared in an operation's variable definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DeclaredVariable {
    pub name: String,
    /// Rendered type text, e.g. `Int!`, when the declaration has one.
    pub ty: Option<String>,
}

/// Returns the partial variable name being typed at `offset`, when the
/// cursor sits directly after a `$` sigil (possibly with a name prefix).
pub(crate) fn variable_prefix(source: &str, offset: usize) -> Option<String> {
    let head = source.get(..offset)?;
    let prefix_len = head
        .chars()
        .rev()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .map(char::len_utf8)
        .sum::<usize>();
    let before = head[..head.len() - prefix_len].chars().next_back()?;
    (before == '$').then(|| head[head.len() - prefix_len..].to_string())
}

/// Collects every variable declared by any operation in the document, in
/// document order, first declaration winning on duplicate names.
pub(crate) fn declared_variables(source: &str) -> Vec<DeclaredVariable> {
    let tree = Parser::new(source).parse();
    let mut variables: Vec<DeclaredVariable> = Vec::new();

    for definition in tree.document().definitions() {
        let cst::Definition::OperationDefinition(op) = definition else {
            continue;
        };
        let Some(defs) = op.variable_definitions() else {
            continue;
        };
        for def in defs.variable_definitions() {
            let Some(name) = def.variable().and_then(|v| v.name()) else {
                continue;
            };
            let name = name.text().to_string();
            if variables.iter().any(|v| v.name == name) {
                continue;
            }
            let ty = def.ty().map(|t| t.syntax().text().to_string());
            variables.push(DeclaredVariable { name, ty });
        }
    }

    variables
}

/// Finds the symbol whose source range contains `offset`.
pub(crate) fn symbol_at(source: &str, offset: usize) -> Option<CursorSymbol> {
    let tree = Parser::new(source).parse();

    for definition in tree.document().definitions() {
        let symbol = match definition {
            cst::Definition::OperationDefinition(op) => operation_symbol(&op, offset),
            cst::Definition::FragmentDefinition(frag) => fragment_symbol(&frag, offset),
            _ => None,
        };
        if symbol.is_some() {
            return symbol;
        }
    }

    None
}

fn operation_symbol(op: &cst::OperationDefinition, offset: usize) -> Option<CursorSymbol> {
    if let Some(defs) = op.variable_definitions() {
        for def in defs.variable_definitions() {
            let Some(name) = def.variable().and_then(|v| v.name()) else {
                continue;
            };
            if contains(&name, offset) {
                return Some(CursorSymbol::Variable {
                    name: name.text().to_string(),
                });
            }
        }
    }

    op.selection_set()
        .and_then(|set| selection_symbol(&set, offset))
}

fn fragment_symbol(frag: &cst::FragmentDefinition, offset: usize) -> Option<CursorSymbol> {
    if let Some(name) = frag.type_condition().and_then(|c| c.named_type()).and_then(|t| t.name()) {
        if contains(&name, offset) {
            return Some(CursorSymbol::TypeCondition {
                name: name.text().to_string(),
            });
        }
    }

    frag.selection_set()
        .and_then(|set| selection_symbol(&set, offset))
}

fn selection_symbol(set: &cst::SelectionSet, offset: usize) -> Option<CursorSymbol> {
    for selection in set.selections() {
        match selection {
            cst::Selection::Field(field) => {
                if let Some(name) = field.name() {
                    if contains(&name, offset) {
                        return Some(CursorSymbol::Field {
                            name: name.text().to_string(),
                        });
                    }
                }
                if let Some(arguments) = field.arguments() {
                    for arg in arguments.arguments() {
                        if let Some(cst::Value::Variable(var)) = arg.value() {
                            if let Some(name) = var.name() {
                                if contains(&name, offset) {
                                    return Some(CursorSymbol::Variable {
                                        name: name.text().to_string(),
                                    });
                                }
                            }
                        }
                    }
                }
                if let Some(symbol) = field
                    .selection_set()
                    .and_then(|nested| selection_symbol(&nested, offset))
                {
                    return Some(symbol);
                }
            }
            cst::Selection::FragmentSpread(spread) => {
                if let Some(name) = spread.fragment_name().and_then(|n| n.name()) {
                    if contains(&name, offset) {
                        return Some(CursorSymbol::FragmentSpread {
                            name: name.text().to_string(),
                        });
                    }
                }
            }
            cst::Selection::InlineFragment(inline) => {
                if let Some(name) = inline
                    .type_condition()
                    .and_then(|c| c.named_type())
                    .and_then(|t| t.name())
                {
                    if contains(&name, offset) {
                        return Some(CursorSymbol::TypeCondition {
                            name: name.text().to_string(),
                        });
                    }
                }
                if let Some(symbol) = inline
                    .selection_set()
                    .and_then(|nested| selection_symbol(&nested, offset))
                {
                    return Some(symbol);
                }
            }
        }
    }

    None
}

/// Resolves the schema type whose fields are selectable at `offset`.
///
/// Walks the definition enclosing the offset from its root type, descending
/// through nested selection sets and inline fragment type conditions.
pub(crate) fn parent_type_at(
    schema: &Valid<Schema>,
    source: &str,
    offset: usize,
) -> Option<String> {
    let tree = Parser::new(source).parse();

    for definition in tree.document().definitions() {
        match definition {
            cst::Definition::OperationDefinition(op) => {
                let Some(set) = op.selection_set() else { continue };
                if !contains(&set, offset) {
                    continue;
                }
                let root = root_type(schema, op.operation_type())?;
                return walk_selection_set(schema, &set, offset, &root);
            }
            cst::Definition::FragmentDefinition(frag) => {
                let Some(set) = frag.selection_set() else { continue };
                if !contains(&set, offset) {
                    continue;
                }
                let root = frag
                    .type_condition()
                    .and_then(|c| c.named_type())
                    .and_then(|t| t.name())?
                    .text()
                    .to_string();
                return walk_selection_set(schema, &set, offset, &root);
            }
            _ => {}
        }
    }

    None
}

/// The type condition of the named fragment definition, when present.
pub(crate) fn fragment_type_condition(source: &str, fragment_name: &str) -> Option<String> {
    let tree = Parser::new(source).parse();

    for definition in tree.document().definitions() {
        let cst::Definition::FragmentDefinition(frag) = definition else {
            continue;
        };
        let Some(name) = frag.fragment_name().and_then(|n| n.name()) else {
            continue;
        };
        if name.text() != fragment_name {
            continue;
        }
        return frag
            .type_condition()
            .and_then(|c| c.named_type())
            .and_then(|t| t.name())
            .map(|n| n.text().to_string());
    }

    None
}

fn walk_selection_set(
    schema: &Valid<Schema>,
    set: &cst::SelectionSet,
    offset: usize,
    parent: &str,
) -> Option<String> {
    for selection in set.selections() {
        match selection {
            cst::Selection::Field(field) => {
                let Some(nested) = field.selection_set() else {
                    continue;
                };
                if !contains(&nested, offset) {
                    continue;
                }
                let name = field.name()?.text().to_string();
                let field_type = schema
                    .type_field(parent, &name)
                    .ok()?
                    .ty
                    .inner_named_type()
                    .to_string();
                return walk_selection_set(schema, &nested, offset, &field_type);
            }
            cst::Selection::InlineFragment(inline) => {
                let Some(nested) = inline.selection_set() else {
                    continue;
                };
                if !contains(&nested, offset) {
                    continue;
                }
                let condition = inline
                    .type_condition()
                    .and_then(|c| c.named_type())
                    .and_then(|t| t.name())
                    .map(|n| n.text().to_string());
                let next = condition.as_deref().unwrap_or(parent);
                return walk_selection_set(schema, &nested, offset, next);
            }
            cst::Selection::FragmentSpread(_) => {}
        }
    }

    // Inside this selection set's braces but not on any nested selection.
    Some(parent.to_string())
}

fn root_type(schema: &Valid<Schema>, op_type: Option<cst::OperationType>) -> Option<String> {
    let kind = match op_type {
        Some(t) if t.mutation_token().is_some() => OperationType::Mutation,
        Some(t) if t.subscription_token().is_some() => OperationType::Subscription,
        _ => OperationType::Query,
    };
    schema.root_operation(kind).map(ToString::to_string)
}

fn contains<T: CstNode>(node: &T, offset: usize) -> bool {
    let range = node.syntax().text_range();
    let start: usize = range.start().into();
    let end: usize = range.end().into();
    offset >= start && offset <= end
}
