//! The service builder: one handler method per root-type field, plus the
//! declaration for every other named type in the schema.

use graphql_declarations::{
    ClassDecl, Declaration, DeclarationKind, InterfaceDecl, MethodDecl, OperationKind, RecordDecl, RecordField,
    RecordKind,
};

use crate::{
    analyze::{AnalyzedSchema, InterfaceDef, ObjectDef},
    common::{build_error, enum_declaration, field_method, input_record, union_declaration},
    config::GenerateConfig,
    error::{BuildError, ServiceSurfaceError},
    mapping::TypeMapper,
    order_by_category, BuildOutput,
};

/// Builds the service declaration set for a schema.
///
/// Declarations that cannot be mapped are skipped and reported in the
/// returned [`BuildOutput::errors`]; root-type fields that cannot be
/// expressed are reported as [`ServiceSurfaceError`]s and only the affected
/// method is dropped.
pub fn generate_service(schema: &AnalyzedSchema, config: &GenerateConfig) -> BuildOutput {
    let mapper = TypeMapper::new(schema);
    let mut declarations: Vec<Declaration> = Vec::new();
    let mut errors: Vec<BuildError> = Vec::new();

    for input in &schema.inputs {
        match input_record(&mapper, input) {
            Ok(record) => declarations.push(record.into()),
            Err(error) => errors.push(error.into()),
        }
    }

    for interface in &schema.interfaces {
        match interface_declaration(&mapper, interface) {
            Ok(declaration) => declarations.push(declaration),
            Err(error) => errors.push(error),
        }
    }

    for r#enum in &schema.enums {
        declarations.push(enum_declaration(r#enum));
    }

    for union in &schema.unions {
        declarations.push(union_declaration(union));
    }

    for object in &schema.objects {
        if schema.is_root_type(&object.name) {
            continue;
        }

        match object_declaration(&mapper, object, config) {
            Ok(declaration) => declarations.push(declaration),
            Err(error) => errors.push(error),
        }
    }

    declarations.push(service_class(schema, &mapper, config, &mut errors).into());

    BuildOutput {
        document: order_by_category(declarations),
        errors,
    }
}

/// Whether an object can be emitted as a plain data record: no argumented
/// fields and no interface implementations.
fn record_eligible(object: &ObjectDef) -> bool {
    object.interfaces.is_empty() && object.fields.iter().all(|field| !field.has_arguments())
}

fn object_declaration(
    mapper: &TypeMapper<'_>,
    object: &ObjectDef,
    config: &GenerateConfig,
) -> Result<Declaration, BuildError> {
    if config.use_records_for_objects && record_eligible(object) {
        return object_record(mapper, object).map(Into::into);
    }

    let mut class = ClassDecl::new(&object.name);

    if let Some(docs) = &object.docs {
        class = class.with_docs(docs.clone());
    }

    for parent in &object.interfaces {
        class = class.with_parent(parent.clone());
    }

    for method in type_methods(mapper, &object.name, &object.fields, DeclarationKind::Class)? {
        class = class.with_method(method);
    }

    Ok(class.into())
}

fn object_record(mapper: &TypeMapper<'_>, object: &ObjectDef) -> Result<RecordDecl, BuildError> {
    let mut record = RecordDecl::new(&object.name, RecordKind::Object);

    if let Some(docs) = &object.docs {
        record = record.with_docs(docs.clone());
    }

    for field in &object.fields {
        let path = format!("{}.{}", object.name, field.name);
        let r#type = mapper
            .map(&path, &field.r#type)
            .map_err(|source| build_error(DeclarationKind::Record, &object.name, source))?;

        let mut record_field = RecordField::new(&field.name, r#type);

        if let Some(docs) = &field.docs {
            record_field = record_field.with_docs(docs.clone());
        }

        if let Some(deprecation) = &field.deprecation {
            record_field = record_field.with_deprecation(deprecation.clone());
        }

        record = record.with_field(record_field);
    }

    Ok(record)
}

fn interface_declaration(mapper: &TypeMapper<'_>, interface: &InterfaceDef) -> Result<Declaration, BuildError> {
    let mut declaration = InterfaceDecl::new(&interface.name);

    if let Some(docs) = &interface.docs {
        declaration = declaration.with_docs(docs.clone());
    }

    for parent in &interface.interfaces {
        declaration = declaration.with_parent(parent.clone());
    }

    for method in type_methods(mapper, &interface.name, &interface.fields, DeclarationKind::Interface)? {
        declaration = declaration.with_method(method);
    }

    Ok(declaration.into())
}

/// Accessor methods for a type's own fields. Fields inherited unchanged from
/// an already-declared parent interface are omitted; a mapping failure aborts
/// the whole declaration.
fn type_methods(
    mapper: &TypeMapper<'_>,
    parent: &str,
    fields: &[crate::analyze::FieldDef],
    kind: DeclarationKind,
) -> Result<Vec<MethodDecl>, BuildError> {
    let mut methods = Vec::new();

    for field in fields {
        if field.inherited {
            continue;
        }

        let method = field_method(mapper, parent, field, None)
            .map_err(|error| BuildError::from(error.into_declaration_error(kind, parent)))?;

        methods.push(method);
    }

    Ok(methods)
}

fn service_class(
    schema: &AnalyzedSchema,
    mapper: &TypeMapper<'_>,
    config: &GenerateConfig,
    errors: &mut Vec<BuildError>,
) -> ClassDecl {
    let mut class = ClassDecl::new(config.service_name());

    let roots = [
        (schema.query_type.as_deref(), OperationKind::Query),
        (schema.mutation_type.as_deref(), OperationKind::Mutation),
        (schema.subscription_type.as_deref(), OperationKind::Subscription),
    ];

    for (root, kind) in roots {
        let Some(object) = root.and_then(|name| schema.object(name)) else {
            continue;
        };

        for field in &object.fields {
            match field_method(mapper, &object.name, field, Some(kind)) {
                Ok(method) => class = class.with_method(method),
                Err(error) => errors.push(
                    ServiceSurfaceError {
                        field: format!("{}.{}", object.name, field.name),
                        reason: error.reason(),
                    }
                    .into(),
                ),
            }
        }
    }

    class
}
