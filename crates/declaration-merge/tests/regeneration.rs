#[cfg(feature = "serde")]
use serde as _;

use declaration_merge::{merge, WarningKind};
use expect_test::expect;
use graphql_codegen::{analyze, generate_service, GenerateConfig};
use graphql_declarations::{
    ClassDecl, Declaration, FunctionBody, FunctionDecl, MethodDecl, OperationKind, Parameter, TargetType,
};
use indoc::indoc;

fn service_declarations(sdl: &str) -> Vec<Declaration> {
    let schema = analyze(&async_graphql_parser::parse_schema(sdl).unwrap());
    let output = generate_service(&schema, &GenerateConfig::new().with_records_for_objects(true));
    assert!(!output.has_errors());
    output.document.into_iter().collect()
}

#[test]
fn tightened_field_warns_and_additions_flow_through() {
    let mut previous = service_declarations(indoc! {r#"
        type Query { user(id: ID!): User }
        type User { id: ID!, name: String }
    "#});

    // A helper the user wrote into the previous output by hand.
    previous.push(
        FunctionDecl::new(
            "formatUser",
            TargetType::required("string"),
            FunctionBody::Verbatim("return user.name".to_owned()),
        )
        .with_param(Parameter::required("user", TargetType::required("User")))
        .into(),
    );

    let next = service_declarations(indoc! {r#"
        type Query { user(id: ID!): User }
        type User { id: ID!, name: String!, email: String }
    "#});

    let result = merge(&previous, &next);

    let warnings = result.warnings.iter().map(ToString::to_string).collect::<Vec<_>>();
    assert_eq!(warnings, ["field `User.name` changed type from `string?` to `string`"]);

    let expected = expect![[r#"
        record User {
          id: string
          name: string
          email: string?
        }

        class GraphqlService {
          query user(id: string): User?
        }

        function formatUser(user: User): string {
          return user.name
        }

    "#]];

    expected.assert_eq(&result.document.to_string());
}

#[test]
fn removed_required_field_warns() {
    let previous = service_declarations(indoc! {r#"
        type Query { user: User }
        type User { id: ID!, name: String }
    "#});
    let next = service_declarations(indoc! {r#"
        type Query { user: User }
        type User { name: String }
    "#});

    let result = merge(&previous, &next);

    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].path, "User.id");
    assert_eq!(result.warnings[0].kind, WarningKind::RequiredFieldRemoved);
}

#[test]
fn removed_enum_and_union_members_warn() {
    let previous = service_declarations(indoc! {r#"
        type Query { version: String! }
        type User { id: ID! }
        type Bot { id: ID! }
        enum Role { ADMIN USER GUEST }
        union Principal = User | Bot
    "#});
    let next = service_declarations(indoc! {r#"
        type Query { version: String! }
        type User { id: ID! }
        type Bot { id: ID! }
        enum Role { ADMIN USER }
        union Principal = User
    "#});

    let result = merge(&previous, &next);

    let warnings = result.warnings.iter().map(ToString::to_string).collect::<Vec<_>>();
    assert_eq!(
        warnings,
        [
            "enum member `Role.GUEST` was removed",
            "union member `Principal.Bot` was removed",
        ]
    );
}

#[test]
fn hand_added_methods_survive_regeneration() {
    let previous: Vec<Declaration> = vec![ClassDecl::new("User")
        .with_method(MethodDecl::new("name", TargetType::nullable("string")))
        .with_method(MethodDecl::new("displayName", TargetType::required("string")))
        .into()];

    let next: Vec<Declaration> = vec![ClassDecl::new("User")
        .with_method(MethodDecl::new("name", TargetType::required("string")))
        .into()];

    let result = merge(&previous, &next);

    let warnings = result.warnings.iter().map(ToString::to_string).collect::<Vec<_>>();
    assert_eq!(
        warnings,
        ["method `User.name` changed signature from `(): string?` to `(): string`"]
    );

    let expected = expect![[r#"
        class User {
          name(): string
          displayName(): string
        }

    "#]];

    expected.assert_eq(&result.document.to_string());
}

#[test]
fn root_field_moving_to_a_streaming_accessor_is_a_signature_change() {
    let previous: Vec<Declaration> = vec![ClassDecl::new("GraphqlService")
        .with_method(MethodDecl::new("userChanged", TargetType::required("User")).with_operation(OperationKind::Query))
        .into()];

    let next: Vec<Declaration> = vec![ClassDecl::new("GraphqlService")
        .with_method(
            MethodDecl::new("userChanged", TargetType::required("User")).with_operation(OperationKind::Subscription),
        )
        .into()];

    let result = merge(&previous, &next);

    let warnings = result.warnings.iter().map(ToString::to_string).collect::<Vec<_>>();
    assert_eq!(
        warnings,
        ["method `GraphqlService.userChanged` changed signature from `query (): User` to `subscription (): User`"]
    );
}

#[test]
fn rewritten_function_body_is_kept_while_the_signature_matches() {
    let generated = FunctionDecl::new(
        "getUser",
        TargetType::required("GetUserResponse"),
        FunctionBody::Operation {
            kind: OperationKind::Query,
            document: "query GetUser($id: ID!) {\n  user(id: $id) {\n    id\n  }\n}".to_owned(),
        },
    )
    .with_param(Parameter::required("id", TargetType::required("string")))
    .with_failure_type("RequestError");

    let mut edited = generated.clone();
    edited.body = FunctionBody::Verbatim("return cache.lookup(id)".to_owned());

    let previous: Vec<Declaration> = vec![edited.clone().into()];
    let next: Vec<Declaration> = vec![generated.clone().into()];

    let result = merge(&previous, &next);

    assert!(result.warnings.is_empty());
    assert_eq!(result.document.declarations(), &[Declaration::Function(edited)]);
}

#[test]
fn changed_function_signature_warns_and_regenerates_the_body() {
    let previous: Vec<Declaration> = vec![FunctionDecl::new(
        "getUser",
        TargetType::required("GetUserResponse"),
        FunctionBody::Verbatim("return cache.lookup(id)".to_owned()),
    )
    .with_param(Parameter::required("id", TargetType::required("string")))
    .into()];

    let regenerated = FunctionDecl::new(
        "getUser",
        TargetType::required("GetUserResponse"),
        FunctionBody::Operation {
            kind: OperationKind::Query,
            document: "query GetUser {\n  user {\n    id\n  }\n}".to_owned(),
        },
    );

    let next: Vec<Declaration> = vec![regenerated.clone().into()];

    let result = merge(&previous, &next);

    let warnings = result.warnings.iter().map(ToString::to_string).collect::<Vec<_>>();
    assert_eq!(
        warnings,
        ["function `getUser` changed signature from `(id: string): GetUserResponse` to `(): GetUserResponse`"]
    );

    assert_eq!(result.document.declarations(), &[Declaration::Function(regenerated)]);
}

#[test]
fn brand_new_operations_land_after_carried_over_functions() {
    let previous: Vec<Declaration> = vec![
        FunctionDecl::new(
            "formatUser",
            TargetType::required("string"),
            FunctionBody::Verbatim("return user.name".to_owned()),
        )
        .into(),
        FunctionDecl::new(
            "getUser",
            TargetType::required("GetUserResponse"),
            FunctionBody::Verbatim("return cache.lookup(id)".to_owned()),
        )
        .into(),
    ];

    let next: Vec<Declaration> = vec![
        FunctionDecl::new(
            "getUser",
            TargetType::required("GetUserResponse"),
            FunctionBody::Verbatim("return cache.lookup(id)".to_owned()),
        )
        .into(),
        FunctionDecl::new(
            "listUsers",
            TargetType::required("ListUsersResponse"),
            FunctionBody::Verbatim("return []".to_owned()),
        )
        .into(),
    ];

    let result = merge(&previous, &next);

    let names: Vec<&str> = result
        .document
        .declarations()
        .iter()
        .map(Declaration::name)
        .collect();

    assert_eq!(names, ["getUser", "formatUser", "listUsers"]);
}
