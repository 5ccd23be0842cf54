use async_graphql_value as _;
use heck as _;
use indexmap as _;
use itertools as _;
use thiserror as _;

use expect_test::expect;
use graphql_codegen::{analyze, extract, generate_client, AuthScheme, GenerateConfig};
use indoc::indoc;

const SDL: &str = indoc! {r#"
    type Query { user(id: ID!): User, users(filter: UserFilter): [User!]! }
    type Mutation { rename(id: ID!, name: String!): User }
    type User { id: ID!, name: String, role: Role }
    enum Role { ADMIN USER }
    input UserFilter { role: Role, limit: Int }
"#};

const OPERATIONS: &str = indoc! {r#"
    query GetUser($id: ID!, $withRole: Boolean = false) {
      user(id: $id) {
        id
        name
      }
    }

    mutation RenameUser($id: ID!, $name: String!) {
      renamed: rename(id: $id, name: $name) {
        id
      }
    }

    query ListUsers($filter: UserFilter) {
      users(filter: $filter) {
        id
      }
    }
"#};

fn build(config: &GenerateConfig) -> graphql_codegen::BuildOutput {
    let schema = analyze(&async_graphql_parser::parse_schema(SDL).unwrap());
    let operations = extract(&schema, &async_graphql_parser::parse_query(OPERATIONS).unwrap()).unwrap();
    generate_client(&schema, &operations, config)
}

#[test]
fn full_client_surface() {
    let output = build(&GenerateConfig::new());

    assert!(!output.has_errors());

    let expected = expect![[r#"
        input record UserFilter {
          role: Role?
          limit: int?
        }

        enum Role {
          ADMIN
          USER
        }

        record ClientOptions {
          url: string
        }

        # Returned when the server answers with errors instead of data.
        record RequestError {
          message: string
          path: [string?]?
        }

        record GetUserResponse {
          user: User?
        }

        record ListUsersResponse {
          users: [User]
        }

        record RenameUserResponse {
          renamed: User?
        }

        function getUser(id: string, withRole: boolean? = false): GetUserResponse | RequestError {
          query:
          query GetUser($id: ID!, $withRole: Boolean = false) {
            user(id: $id) {
              id
              name
            }
          }
        }

        function listUsers(filter: UserFilter? = null): ListUsersResponse | RequestError {
          query:
          query ListUsers($filter: UserFilter) {
            users(filter: $filter) {
              id
            }
          }
        }

        function renameUser(id: string, name: string): RenameUserResponse | RequestError {
          mutation:
          mutation RenameUser($id: ID!, $name: String!) {
            renamed: rename(id: $id, name: $name) {
              id
            }
          }
        }

    "#]];

    expected.assert_eq(&output.document.to_string());
}

#[test]
fn auth_schemes_and_headers_extend_the_options_record() {
    let config = GenerateConfig::new()
        .with_auth_scheme(AuthScheme::ApiKey)
        .with_auth_scheme(AuthScheme::BearerToken)
        .with_extra_header("x-tenant", "acme");

    let output = build(&config);
    let rendered = output.document.to_string();

    let expected = expect![[r#"
        record ClientOptions {
          url: string
          apiKey: string?
          bearerToken: string?
          # Extra headers sent with every request: x-tenant
          headers: [string?]?
        }"#]];

    let options = rendered
        .split("\n\n")
        .find(|block| block.contains("record ClientOptions"))
        .unwrap();

    expected.assert_eq(options);
}

#[test]
fn operations_are_generated_in_name_order() {
    let output = build(&GenerateConfig::new());

    let functions: Vec<&str> = output
        .document
        .declarations()
        .iter()
        .filter_map(|declaration| match declaration {
            graphql_declarations::Declaration::Function(function) => Some(function.name.as_str()),
            _ => None,
        })
        .collect();

    assert_eq!(functions, ["getUser", "listUsers", "renameUser"]);
}
