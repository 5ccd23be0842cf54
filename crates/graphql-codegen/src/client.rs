//! The client builder: one callable per operation, plus the supporting
//! response, input and options records.

use graphql_declarations::{
    Declaration, DeclarationKind, FunctionBody, FunctionDecl, ListWrapper, Literal, OperationKind, Parameter,
    RecordDecl, RecordField, RecordKind, TargetType,
};
use heck::{ToLowerCamelCase, ToUpperCamelCase};

use crate::{
    analyze::{AnalyzedSchema, EnumDef, InputDef},
    common::{build_error, enum_declaration, input_record},
    config::{AuthScheme, GenerateConfig},
    error::{BuildError, DeclarationBuildError, TypeMappingError},
    mapping::{literal_from_const, TypeMapper, TypeRef},
    operations::OperationDef,
    order_by_category, BuildOutput,
};

/// The failure type every generated operation call is union-ed with.
pub const FAILURE_TYPE: &str = "RequestError";

/// The record holding endpoint, auth and header facts for the client.
pub const OPTIONS_TYPE: &str = "ClientOptions";

/// Builds the client declaration set for a schema and its operations.
///
/// Declarations that cannot be mapped are skipped and reported in the
/// returned [`BuildOutput::errors`]; the rest of the run proceeds.
pub fn generate_client(
    schema: &AnalyzedSchema,
    operations: &[OperationDef],
    config: &GenerateConfig,
) -> BuildOutput {
    let mapper = TypeMapper::new(schema);
    let mut declarations: Vec<Declaration> = Vec::new();
    let mut errors: Vec<BuildError> = Vec::new();

    declarations.push(options_record(config).into());
    declarations.push(failure_record().into());

    for reachable in reachable_from_variables(schema, operations) {
        match reachable {
            Reachable::Input(input) => match input_record(&mapper, input) {
                Ok(record) => declarations.push(record.into()),
                Err(error) => errors.push(error.into()),
            },
            Reachable::Enum(r#enum) => declarations.push(enum_declaration(r#enum)),
        }
    }

    for operation in operations {
        let response_name = format!("{}Response", operation.name.to_upper_camel_case());

        match response_record(schema, &mapper, operation, &response_name) {
            Ok(record) => declarations.push(record.into()),
            Err(error) => errors.push(error.into()),
        }

        match operation_function(&mapper, operation, &response_name) {
            Ok(function) => declarations.push(function.into()),
            Err(error) => errors.push(error.into()),
        }
    }

    BuildOutput {
        document: order_by_category(declarations),
        errors,
    }
}

fn options_record(config: &GenerateConfig) -> RecordDecl {
    let mut record = RecordDecl::new(OPTIONS_TYPE, RecordKind::Object)
        .with_field(RecordField::new("url", TargetType::required("string")));

    for scheme in &config.auth_schemes {
        let field = match scheme {
            AuthScheme::ApiKey => RecordField::new("apiKey", TargetType::nullable("string")),
            AuthScheme::BearerToken => RecordField::new("bearerToken", TargetType::nullable("string")),
            AuthScheme::Basic => RecordField::new("basicCredentials", TargetType::nullable("string")),
        };

        record = record.with_field(field);
    }

    if !config.extra_headers.is_empty() {
        let names = config
            .extra_headers
            .iter()
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        record = record.with_field(
            RecordField::new(
                "headers",
                TargetType::nullable("string").wrapped_in(ListWrapper::NullableList),
            )
            .with_docs(format!("Extra headers sent with every request: {names}")),
        );
    }

    record
}

fn failure_record() -> RecordDecl {
    RecordDecl::new(FAILURE_TYPE, RecordKind::Object)
        .with_docs("Returned when the server answers with errors instead of data.")
        .with_field(RecordField::new("message", TargetType::required("string")))
        .with_field(RecordField::new(
            "path",
            TargetType::nullable("string").wrapped_in(ListWrapper::NullableList),
        ))
}

enum Reachable<'a> {
    Input(&'a InputDef),
    Enum(&'a EnumDef),
}

/// Input types and enums transitively reachable from operation variables, in
/// first-encounter order.
fn reachable_from_variables<'a>(schema: &'a AnalyzedSchema, operations: &[OperationDef]) -> Vec<Reachable<'a>> {
    let mut seen: Vec<&str> = Vec::new();
    let mut found = Vec::new();

    fn visit<'a>(
        schema: &'a AnalyzedSchema,
        r#type: &TypeRef,
        seen: &mut Vec<&'a str>,
        found: &mut Vec<Reachable<'a>>,
    ) {
        match r#type {
            TypeRef::List(inner) | TypeRef::NonNull(inner) => visit(schema, inner, seen, found),
            TypeRef::Input(name) => {
                let Some(input) = schema.input(name) else { return };

                if seen.contains(&input.name.as_str()) {
                    return;
                }

                seen.push(&input.name);
                found.push(Reachable::Input(input));

                for field in &input.fields {
                    visit(schema, &field.r#type, seen, found);
                }
            }
            TypeRef::Enum(name) => {
                let Some(r#enum) = schema.r#enum(name) else { return };

                if seen.contains(&r#enum.name.as_str()) {
                    return;
                }

                seen.push(&r#enum.name);
                found.push(Reachable::Enum(r#enum));
            }
            _ => (),
        }
    }

    for operation in operations {
        for variable in operation.variables.values() {
            visit(schema, &variable.r#type, &mut seen, &mut found);
        }
    }

    found
}

fn response_record(
    schema: &AnalyzedSchema,
    mapper: &TypeMapper<'_>,
    operation: &OperationDef,
    response_name: &str,
) -> Result<RecordDecl, DeclarationBuildError> {
    let root_type = match operation.kind {
        OperationKind::Query => schema.query_type.as_deref(),
        OperationKind::Mutation => schema.mutation_type.as_deref(),
        OperationKind::Subscription => schema.subscription_type.as_deref(),
    };

    let root = root_type.and_then(|name| schema.object(name));

    let mut record = RecordDecl::new(response_name, RecordKind::Object);

    for selected in &operation.root_fields {
        let path = format!("{}.{}", operation.name, selected.response_key);

        let field = root.and_then(|root| root.field(&selected.field_name)).ok_or_else(|| {
            build_error(
                DeclarationKind::Record,
                response_name,
                TypeMappingError {
                    path: path.clone(),
                    name: selected.field_name.clone(),
                },
            )
        })?;

        let r#type = mapper
            .map(&path, &field.r#type)
            .map_err(|source| build_error(DeclarationKind::Record, response_name, source))?;

        let mut record_field = RecordField::new(&selected.response_key, r#type);

        if let Some(docs) = &field.docs {
            record_field = record_field.with_docs(docs.clone());
        }

        record = record.with_field(record_field);
    }

    Ok(record)
}

fn operation_function(
    mapper: &TypeMapper<'_>,
    operation: &OperationDef,
    response_name: &str,
) -> Result<FunctionDecl, DeclarationBuildError> {
    let function_name = operation.name.to_lower_camel_case();

    let mut required = Vec::new();
    let mut optional = Vec::new();

    for (name, variable) in &operation.variables {
        let path = format!("{}.${name}", operation.name);
        let r#type = mapper
            .map(&path, &variable.r#type)
            .map_err(|source| build_error(DeclarationKind::Function, &function_name, source))?;

        let has_default = variable.default.is_some();

        if variable.r#type.is_required() && !has_default {
            required.push(Parameter::required(name, r#type));
        } else {
            let default = variable
                .default
                .as_ref()
                .and_then(|value| literal_from_const(value).ok())
                .unwrap_or_else(Literal::absent);

            optional.push(Parameter::optional(name, r#type).with_default(default));
        }
    }

    let mut function = FunctionDecl::new(
        function_name,
        TargetType::required(response_name),
        FunctionBody::Operation {
            kind: operation.kind,
            document: operation.body_text.clone(),
        },
    )
    .with_failure_type(FAILURE_TYPE);

    for param in required.into_iter().chain(optional) {
        function = function.with_param(param);
    }

    Ok(function)
}
