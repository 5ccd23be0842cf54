//! Declaration construction shared between the client and service builders.

use graphql_declarations::{
    Declaration, DeclarationKind, EnumDecl, EnumMember, MethodDecl, OperationKind, Parameter, RecordDecl, RecordField,
    RecordKind, UnionDecl,
};

use crate::{
    analyze::{EnumDef, FieldDef, InputDef, InputValueDef, UnionDef},
    error::{DeclarationBuildError, TypeMappingError},
    mapping::{literal_from_const, TypeMapper, UnsupportedLiteral},
};

pub(crate) fn input_record(mapper: &TypeMapper<'_>, input: &InputDef) -> Result<RecordDecl, DeclarationBuildError> {
    let mut record = RecordDecl::new(&input.name, RecordKind::Input);

    if let Some(docs) = &input.docs {
        record = record.with_docs(docs.clone());
    }

    for field in &input.fields {
        let path = format!("{}.{}", input.name, field.name);
        let r#type = mapper
            .map(&path, &field.r#type)
            .map_err(|source| build_error(DeclarationKind::Record, &input.name, source))?;

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

pub(crate) fn enum_declaration(r#enum: &EnumDef) -> Declaration {
    let mut declaration = EnumDecl::new(&r#enum.name);

    if let Some(docs) = &r#enum.docs {
        declaration = declaration.with_docs(docs.clone());
    }

    for value in &r#enum.values {
        let mut member = EnumMember::new(&value.name);

        if let Some(docs) = &value.docs {
            member = member.with_docs(docs.clone());
        }

        if let Some(deprecation) = &value.deprecation {
            member = member.with_deprecation(deprecation.clone());
        }

        declaration = declaration.with_member(member);
    }

    declaration.into()
}

pub(crate) fn union_declaration(union: &UnionDef) -> Declaration {
    let mut declaration = UnionDecl::new(&union.name);

    if let Some(docs) = &union.docs {
        declaration = declaration.with_docs(docs.clone());
    }

    for member in &union.members {
        declaration = declaration.with_member(member.clone());
    }

    declaration.into()
}

/// Builds the accessor method for one field, required parameters first.
pub(crate) fn field_method(
    mapper: &TypeMapper<'_>,
    parent: &str,
    field: &FieldDef,
    operation: Option<OperationKind>,
) -> Result<MethodDecl, MethodBuildError> {
    let path = format!("{parent}.{}", field.name);
    let returns = mapper.map(&path, &field.r#type).map_err(MethodBuildError::Mapping)?;

    let mut method = MethodDecl::new(&field.name, returns);

    if let Some(kind) = operation {
        method = method.with_operation(kind);
    }

    if let Some(docs) = &field.docs {
        method = method.with_docs(docs.clone());
    }

    if let Some(deprecation) = &field.deprecation {
        method = method.with_deprecation(deprecation.clone());
    }

    let (required, optional) = split_parameters(mapper, &path, &field.arguments)?;

    for param in required.into_iter().chain(optional) {
        method = method.with_param(param);
    }

    Ok(method)
}

/// Maps argument definitions into parameters, required before optional.
pub(crate) fn split_parameters(
    mapper: &TypeMapper<'_>,
    parent_path: &str,
    arguments: &[InputValueDef],
) -> Result<(Vec<Parameter>, Vec<Parameter>), MethodBuildError> {
    let mut required = Vec::new();
    let mut optional = Vec::new();

    for argument in arguments {
        let path = format!("{parent_path}({})", argument.name);
        let r#type = mapper.map(&path, &argument.r#type).map_err(MethodBuildError::Mapping)?;

        match &argument.default {
            None if argument.r#type.is_required() => required.push(Parameter::required(&argument.name, r#type)),
            None => optional.push(Parameter::optional(&argument.name, r#type)),
            Some(default) => {
                let default = literal_from_const(default)
                    .map_err(|unsupported| MethodBuildError::Literal { path, unsupported })?;

                optional.push(Parameter::optional(&argument.name, r#type).with_default(default));
            }
        }
    }

    Ok((required, optional))
}

pub(crate) enum MethodBuildError {
    Mapping(TypeMappingError),
    Literal { path: String, unsupported: UnsupportedLiteral },
}

impl MethodBuildError {
    pub(crate) fn reason(&self) -> String {
        match self {
            MethodBuildError::Mapping(error) => error.to_string(),
            MethodBuildError::Literal { path, unsupported } => {
                format!("unsupported default value literal kind `{}` at {path}", unsupported.kind)
            }
        }
    }

    pub(crate) fn into_declaration_error(self, kind: DeclarationKind, name: &str) -> DeclarationBuildError {
        let source = match self {
            MethodBuildError::Mapping(error) => error,
            MethodBuildError::Literal { path, unsupported } => TypeMappingError {
                path,
                name: format!("literal:{}", unsupported.kind),
            },
        };

        DeclarationBuildError {
            kind,
            name: name.to_owned(),
            source,
        }
    }
}

pub(crate) fn build_error(kind: DeclarationKind, name: &str, source: TypeMappingError) -> DeclarationBuildError {
    DeclarationBuildError {
        kind,
        name: name.to_owned(),
        source,
    }
}
