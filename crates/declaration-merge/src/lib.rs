//! Regeneration-aware merging of declaration lists.
//!
//! [`merge`] takes the declarations from the previous generator run and the
//! freshly generated ones, correlates them by kind and name, and produces one
//! list in which the regenerated declaration wins member by member while
//! hand-added material (docs the generator lost, extra methods, rewritten
//! function bodies, whole declarations with no regenerated counterpart) is
//! preserved. The merge never fails. Drift that could break consumers of the
//! generated code, such as a required field disappearing or a signature
//! changing, is reported as [`MergeWarning`]s alongside the result.
//!
//! Merging is deterministic and idempotent: merging a list into itself
//! returns the same list and no warnings.

mod members;
mod warning;

pub use warning::{MergeWarning, WarningKind};

use graphql_declarations::{Category, Declaration, Document, MatchKey};

use members::{merge_classes, merge_enums, merge_functions, merge_interfaces, merge_records, merge_unions};

/// The outcome of one merge: the combined declaration list plus everything
/// the caller should surface to the user.
#[derive(Debug)]
pub struct MergeResult {
    pub document: Document,
    pub warnings: Vec<MergeWarning>,
}

/// Merges the previous run's declarations with the freshly generated ones.
///
/// The result is emitted in category order. Within each category the
/// regenerated declarations come first, in their generated order, followed by
/// previous declarations with no regenerated counterpart. Functions and other
/// uncategorized declarations additionally sort fresh, unmatched entries
/// after the carried-over ones, so brand new operations land at the end of
/// the output.
pub fn merge(previous: &[Declaration], next: &[Declaration]) -> MergeResult {
    let mut warnings = Vec::new();
    let mut merged: Vec<Declaration> = Vec::new();

    let find_previous =
        |key: MatchKey<'_>| previous.iter().find(|declaration| declaration.match_key() == key);

    for category in Category::ALL {
        let carried_over = previous.iter().filter(|declaration| {
            declaration.category() == category
                && !next.iter().any(|candidate| candidate.match_key() == declaration.match_key())
        });

        if category == Category::Other {
            let mut fresh = Vec::new();

            for declaration in next.iter().filter(|declaration| declaration.category() == category) {
                match find_previous(declaration.match_key()) {
                    Some(prev) => merged.push(merge_pair(prev, declaration, &mut warnings)),
                    None => fresh.push(declaration.clone()),
                }
            }

            merged.extend(carried_over.cloned());
            merged.extend(fresh);
        } else {
            for declaration in next.iter().filter(|declaration| declaration.category() == category) {
                match find_previous(declaration.match_key()) {
                    Some(prev) => merged.push(merge_pair(prev, declaration, &mut warnings)),
                    None => merged.push(declaration.clone()),
                }
            }

            merged.extend(carried_over.cloned());
        }
    }

    MergeResult {
        document: Document::from(merged),
        warnings,
    }
}

fn merge_pair(previous: &Declaration, next: &Declaration, warnings: &mut Vec<MergeWarning>) -> Declaration {
    match (previous, next) {
        (Declaration::Record(prev), Declaration::Record(next)) => merge_records(prev, next, warnings).into(),
        (Declaration::Interface(prev), Declaration::Interface(next)) => merge_interfaces(prev, next, warnings).into(),
        (Declaration::Enum(prev), Declaration::Enum(next)) => merge_enums(prev, next, warnings).into(),
        (Declaration::Union(prev), Declaration::Union(next)) => merge_unions(prev, next, warnings).into(),
        (Declaration::Class(prev), Declaration::Class(next)) => merge_classes(prev, next, warnings).into(),
        (Declaration::Function(prev), Declaration::Function(next)) => merge_functions(prev, next, warnings).into(),
        // Match keys include the kind, so mismatched pairs never correlate.
        _ => next.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;
    use graphql_codegen::{analyze, generate_service, GenerateConfig};
    use indoc::indoc;

    fn service_declarations(sdl: &str) -> Vec<Declaration> {
        let schema = analyze(&async_graphql_parser::parse_schema(sdl).unwrap());
        let output = generate_service(&schema, &GenerateConfig::new());
        assert!(!output.has_errors());
        output.document.into_iter().collect()
    }

    #[test]
    fn merging_a_list_with_itself_changes_nothing() {
        let declarations = service_declarations(indoc! {r#"
            type Query { user(id: ID!): User }
            type User { id: ID!, name: String }
            enum Role { ADMIN USER }
            union Principal = User
            input UserFilter { role: Role }
        "#});

        let result = merge(&declarations, &declarations);

        assert!(result.warnings.is_empty());
        assert_eq!(result.document.declarations(), &declarations[..]);
    }

    #[test]
    fn merge_is_idempotent() {
        let previous = service_declarations(indoc! {r#"
            type Query { version: String! }
            enum Role { ADMIN USER GUEST }
        "#});
        let next = service_declarations(indoc! {r#"
            type Query { version: String! }
            enum Role { ADMIN USER }
        "#});

        let once = merge(&previous, &next);
        let twice = merge(once.document.declarations(), &next);

        assert_eq!(once.document, twice.document);
    }

    #[test]
    fn warning_rendering() {
        let warnings = [
            MergeWarning::new("User.name", WarningKind::RequiredFieldRemoved),
            MergeWarning::new(
                "User.name",
                WarningKind::FieldTypeChanged {
                    previous: "string?".to_owned(),
                    next: "string".to_owned(),
                },
            ),
            MergeWarning::new("Role.GUEST", WarningKind::EnumMemberRemoved),
            MergeWarning::new("Principal.Bot", WarningKind::UnionMemberRemoved),
            MergeWarning::new(
                "getUser",
                WarningKind::FunctionSignatureChanged {
                    previous: "(id: string): GetUserResponse | RequestError".to_owned(),
                    next: "(): GetUserResponse | RequestError".to_owned(),
                },
            ),
        ];

        let rendered = warnings.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n");

        let expected = expect![[r#"
            required field `User.name` was removed
            field `User.name` changed type from `string?` to `string`
            enum member `Role.GUEST` was removed
            union member `Principal.Bot` was removed
            function `getUser` changed signature from `(id: string): GetUserResponse | RequestError` to `(): GetUserResponse | RequestError`"#]];

        expected.assert_eq(&rendered);
    }
}
