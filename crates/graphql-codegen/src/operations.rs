//! Operation extraction: walks parsed operation documents into named
//! operations with mapped variable definitions and fragment-free body text.

use std::collections::HashMap;
use std::fmt::Write as _;

use async_graphql_parser::types as ast;
use async_graphql_value::ConstValue;
use graphql_declarations::OperationKind;
use indexmap::IndexMap;
use itertools::Itertools;

use crate::{
    analyze::AnalyzedSchema,
    error::{ExtractError, FragmentResolutionError},
    mapping::TypeRef,
};

/// One named operation found in a document, with fragments already inlined.
#[derive(Debug, Clone)]
pub struct OperationDef {
    pub name: String,
    pub kind: OperationKind,
    /// Variables in declaration order; order determines generated parameter
    /// order.
    pub variables: IndexMap<String, VariableDef>,
    /// The operation rendered back to GraphQL text, fragment spreads
    /// substituted by their selection sets.
    pub body_text: String,
    /// The top-level response keys selected on the root type.
    pub root_fields: Vec<RootField>,
}

#[derive(Debug, Clone)]
pub struct VariableDef {
    pub r#type: TypeRef,
    pub default: Option<ConstValue>,
}

#[derive(Debug, Clone)]
pub struct RootField {
    /// Alias if given, field name otherwise.
    pub response_key: String,
    pub field_name: String,
}

/// Extracts all operations from a parsed document. Operations are returned
/// in name order so regeneration is deterministic regardless of how the
/// parser stores them.
pub fn extract(schema: &AnalyzedSchema, document: &ast::ExecutableDocument) -> Result<Vec<OperationDef>, ExtractError> {
    let fragments: HashMap<&str, &ast::FragmentDefinition> = document
        .fragments
        .iter()
        .map(|(name, fragment)| (name.as_str(), &fragment.node))
        .collect();

    let operations = match &document.operations {
        ast::DocumentOperations::Single(_) => return Err(ExtractError::AnonymousOperation),
        ast::DocumentOperations::Multiple(operations) => operations
            .iter()
            .sorted_by(|(a, _), (b, _)| a.as_str().cmp(b.as_str()))
            .map(|(name, operation)| extract_one(schema, name.as_str(), &operation.node, &fragments))
            .collect::<Result<Vec<_>, _>>()?,
    };

    Ok(operations)
}

fn extract_one(
    schema: &AnalyzedSchema,
    name: &str,
    operation: &ast::OperationDefinition,
    fragments: &HashMap<&str, &ast::FragmentDefinition>,
) -> Result<OperationDef, FragmentResolutionError> {
    let kind = match operation.ty {
        ast::OperationType::Query => OperationKind::Query,
        ast::OperationType::Mutation => OperationKind::Mutation,
        ast::OperationType::Subscription => OperationKind::Subscription,
    };

    let mut variables = IndexMap::new();

    for variable in &operation.variable_definitions {
        variables.insert(
            variable.node.name.node.to_string(),
            VariableDef {
                r#type: schema.type_ref(&variable.node.var_type.node),
                default: variable.node.default_value.as_ref().map(|value| value.node.clone()),
            },
        );
    }

    let body_text = render_operation(name, kind, &variables, &operation.selection_set.node, fragments)?;
    let root_fields = collect_root_fields(name, &operation.selection_set.node, fragments, &mut Vec::new())?;

    Ok(OperationDef {
        name: name.to_owned(),
        kind,
        variables,
        body_text,
        root_fields,
    })
}

fn render_operation(
    name: &str,
    kind: OperationKind,
    variables: &IndexMap<String, VariableDef>,
    selection_set: &ast::SelectionSet,
    fragments: &HashMap<&str, &ast::FragmentDefinition>,
) -> Result<String, FragmentResolutionError> {
    let mut out = format!("{kind} {name}");

    if !variables.is_empty() {
        out.push('(');

        for (i, (variable, definition)) in variables.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }

            let _ = write!(out, "${variable}: {}", definition.r#type.to_graphql());

            if let Some(default) = &definition.default {
                let _ = write!(out, " = {default}");
            }
        }

        out.push(')');
    }

    out.push(' ');
    write_selection_set(&mut out, name, selection_set, fragments, &mut Vec::new(), 0)?;

    Ok(out)
}

fn write_selection_set(
    out: &mut String,
    operation: &str,
    selection_set: &ast::SelectionSet,
    fragments: &HashMap<&str, &ast::FragmentDefinition>,
    active: &mut Vec<String>,
    depth: usize,
) -> Result<(), FragmentResolutionError> {
    out.push_str("{\n");

    for selection in &selection_set.items {
        write_selection(out, operation, &selection.node, fragments, active, depth + 1)?;
    }

    indent(out, depth);
    out.push('}');

    Ok(())
}

fn write_selection(
    out: &mut String,
    operation: &str,
    selection: &ast::Selection,
    fragments: &HashMap<&str, &ast::FragmentDefinition>,
    active: &mut Vec<String>,
    depth: usize,
) -> Result<(), FragmentResolutionError> {
    match selection {
        ast::Selection::Field(field) => {
            let field = &field.node;
            indent(out, depth);

            if let Some(alias) = &field.alias {
                let _ = write!(out, "{}: ", alias.node);
            }

            out.push_str(field.name.node.as_str());

            if !field.arguments.is_empty() {
                out.push('(');

                for (i, (name, value)) in field.arguments.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }

                    let _ = write!(out, "{}: {}", name.node, value.node);
                }

                out.push(')');
            }

            if !field.selection_set.node.items.is_empty() {
                out.push(' ');
                write_selection_set(out, operation, &field.selection_set.node, fragments, active, depth)?;
            }

            out.push('\n');
        }
        ast::Selection::FragmentSpread(spread) => {
            let fragment_name = spread.node.fragment_name.node.as_str();

            if active.iter().any(|name| name.as_str() == fragment_name) {
                return Err(FragmentResolutionError::Cycle {
                    fragment: fragment_name.to_owned(),
                });
            }

            let fragment = fragments
                .get(fragment_name)
                .ok_or_else(|| FragmentResolutionError::Undefined {
                    operation: operation.to_owned(),
                    fragment: fragment_name.to_owned(),
                })?;

            indent(out, depth);
            let _ = write!(out, "... on {} ", fragment.type_condition.node.on.node);

            active.push(fragment_name.to_owned());
            write_selection_set(out, operation, &fragment.selection_set.node, fragments, active, depth)?;
            active.pop();

            out.push('\n');
        }
        ast::Selection::InlineFragment(inline) => {
            indent(out, depth);

            match &inline.node.type_condition {
                Some(condition) => {
                    let _ = write!(out, "... on {} ", condition.node.on.node);
                }
                None => out.push_str("... "),
            }

            write_selection_set(out, operation, &inline.node.selection_set.node, fragments, active, depth)?;
            out.push('\n');
        }
    }

    Ok(())
}

fn collect_root_fields(
    operation: &str,
    selection_set: &ast::SelectionSet,
    fragments: &HashMap<&str, &ast::FragmentDefinition>,
    active: &mut Vec<String>,
) -> Result<Vec<RootField>, FragmentResolutionError> {
    let mut root_fields = Vec::new();

    for selection in &selection_set.items {
        match &selection.node {
            ast::Selection::Field(field) => {
                let field_name = field.node.name.node.to_string();

                if field_name.starts_with("__") {
                    continue;
                }

                let response_key = field
                    .node
                    .alias
                    .as_ref()
                    .map(|alias| alias.node.to_string())
                    .unwrap_or_else(|| field_name.clone());

                root_fields.push(RootField {
                    response_key,
                    field_name,
                });
            }
            ast::Selection::FragmentSpread(spread) => {
                let fragment_name = spread.node.fragment_name.node.as_str();

                if active.iter().any(|name| name.as_str() == fragment_name) {
                    return Err(FragmentResolutionError::Cycle {
                        fragment: fragment_name.to_owned(),
                    });
                }

                let fragment = fragments
                    .get(fragment_name)
                    .ok_or_else(|| FragmentResolutionError::Undefined {
                        operation: operation.to_owned(),
                        fragment: fragment_name.to_owned(),
                    })?;

                active.push(fragment_name.to_owned());
                root_fields.extend(collect_root_fields(
                    operation,
                    &fragment.selection_set.node,
                    fragments,
                    active,
                )?);
                active.pop();
            }
            ast::Selection::InlineFragment(inline) => {
                root_fields.extend(collect_root_fields(
                    operation,
                    &inline.node.selection_set.node,
                    fragments,
                    active,
                )?);
            }
        }
    }

    Ok(root_fields)
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::analyze;
    use expect_test::expect;
    use indoc::indoc;

    fn extract_from(sdl: &str, operations: &str) -> Result<Vec<OperationDef>, ExtractError> {
        let schema = analyze(&async_graphql_parser::parse_schema(sdl).unwrap());
        let document = async_graphql_parser::parse_query(operations).unwrap();
        extract(&schema, &document)
    }

    const SDL: &str = indoc! {r#"
        type Query { user(id: ID!): User, users: [User!]! }
        type User { id: ID!, name: String, email: String }
    "#};

    #[test]
    fn variables_keep_declaration_order() {
        let operations = extract_from(
            SDL,
            "query GetUser($id: ID!, $verbose: Boolean = false) { user(id: $id) { id name } }",
        )
        .unwrap();

        let [operation] = operations.as_slice() else {
            panic!("expected one operation")
        };

        let variables: Vec<_> = operation.variables.keys().collect();
        assert_eq!(variables, ["id", "verbose"]);
    }

    #[test]
    fn fragments_are_inlined_into_body_text() {
        let operations = extract_from(
            SDL,
            indoc! {r#"
                query GetUser($id: ID!) {
                  user(id: $id) {
                    ...userParts
                  }
                }

                fragment userParts on User {
                  id
                  name
                }
            "#},
        )
        .unwrap();

        let expected = expect![[r#"
            query GetUser($id: ID!) {
              user(id: $id) {
                ... on User {
                  id
                  name
                }
              }
            }"#]];

        expected.assert_eq(&operations[0].body_text);
    }

    #[test]
    fn dangling_fragment_is_an_error() {
        let error = extract_from(SDL, "query GetUser { user(id: \"1\") { ...missing } }").unwrap_err();

        assert_eq!(
            error.to_string(),
            "operation `GetUser` references undefined fragment `missing`"
        );
    }

    #[test]
    fn mutually_recursive_fragments_are_an_error() {
        let error = extract_from(
            SDL,
            indoc! {r#"
                query GetUser($id: ID!) {
                  user(id: $id) {
                    ...parts
                  }
                }

                fragment parts on User {
                  id
                  ...more
                }

                fragment more on User {
                  ...parts
                }
            "#},
        )
        .unwrap_err();

        assert_eq!(
            error.to_string(),
            "fragment `parts` spreads itself, directly or indirectly"
        );
    }

    #[test]
    fn anonymous_operations_are_rejected() {
        let error = extract_from(SDL, "{ users { id } }").unwrap_err();
        assert!(matches!(error, ExtractError::AnonymousOperation));
    }

    #[test]
    fn operations_are_sorted_by_name() {
        let operations = extract_from(
            SDL,
            "query Zeta { users { id } } query Alpha { users { id } }",
        )
        .unwrap();

        let names: Vec<_> = operations.iter().map(|operation| operation.name.as_str()).collect();
        assert_eq!(names, ["Alpha", "Zeta"]);
    }

    #[test]
    fn root_fields_use_aliases_and_see_through_fragments() {
        let operations = extract_from(
            SDL,
            indoc! {r#"
                query Snapshot {
                  everyone: users { id }
                  ...me
                }

                fragment me on Query {
                  user(id: "1") { id }
                }
            "#},
        )
        .unwrap();

        let keys: Vec<_> = operations[0]
            .root_fields
            .iter()
            .map(|field| (field.response_key.as_str(), field.field_name.as_str()))
            .collect();

        assert_eq!(keys, [("everyone", "users"), ("user", "user")]);
    }
}
