//! Type references and the mapper that turns them into target types.

use async_graphql_value::ConstValue;
use graphql_declarations::{ListWrapper, Literal, TargetType};
use indexmap::IndexMap;

use crate::{analyze::AnalyzedSchema, error::TypeMappingError};

/// A reference to a type as it appears on a field, argument or variable.
///
/// Variants other than `Scalar` are only ever constructed for names defined
/// in the schema, so an unknown name always surfaces as a `Scalar` and is
/// rejected by the mapper. `NonNull` never wraps another `NonNull`; list and
/// non-null wrapping nest to arbitrary depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Scalar(String),
    Object(String),
    Input(String),
    Interface(String),
    Enum(String),
    Union(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// The innermost named type.
    pub fn base_name(&self) -> &str {
        match self {
            TypeRef::Scalar(name)
            | TypeRef::Object(name)
            | TypeRef::Input(name)
            | TypeRef::Interface(name)
            | TypeRef::Enum(name)
            | TypeRef::Union(name) => name,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.base_name(),
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, TypeRef::NonNull(_))
    }

    /// Renders the reference back to GraphQL type syntax, e.g. `[Int!]!`.
    pub fn to_graphql(&self) -> String {
        match self {
            TypeRef::List(inner) => format!("[{}]", inner.to_graphql()),
            TypeRef::NonNull(inner) => format!("{}!", inner.to_graphql()),
            named => named.base_name().to_owned(),
        }
    }
}

/// Maps [`TypeRef`]s to [`TargetType`]s under the fixed scalar translation
/// table. Declared custom scalars and named types pass through unchanged;
/// anything else is a [`TypeMappingError`].
pub struct TypeMapper<'a> {
    schema: &'a AnalyzedSchema,
}

pub(crate) const BUILTIN_SCALARS: &[(&str, &str)] = &[
    ("ID", "string"),
    ("Int", "int"),
    ("Float", "float"),
    ("Boolean", "boolean"),
    ("String", "string"),
];

impl<'a> TypeMapper<'a> {
    pub fn new(schema: &'a AnalyzedSchema) -> Self {
        TypeMapper { schema }
    }

    pub fn map(&self, path: &str, r#type: &TypeRef) -> Result<TargetType, TypeMappingError> {
        self.map_level(path, r#type, true)
    }

    fn map_level(&self, path: &str, r#type: &TypeRef, nullable: bool) -> Result<TargetType, TypeMappingError> {
        match r#type {
            TypeRef::NonNull(inner) => self.map_level(path, inner, false),
            TypeRef::List(inner) => {
                let wrapper = if nullable {
                    ListWrapper::NullableList
                } else {
                    ListWrapper::NonNullList
                };

                Ok(self.map_level(path, inner, true)?.wrapped_in(wrapper))
            }
            TypeRef::Scalar(name) => {
                let base = BUILTIN_SCALARS
                    .iter()
                    .find(|(graphql, _)| graphql == name)
                    .map(|(_, target)| (*target).to_owned());

                let base = match base {
                    Some(base) => base,
                    None if self.schema.is_custom_scalar(name) => name.clone(),
                    None => {
                        return Err(TypeMappingError {
                            path: path.to_owned(),
                            name: name.clone(),
                        })
                    }
                };

                Ok(base_type(base, nullable))
            }
            TypeRef::Object(name)
            | TypeRef::Input(name)
            | TypeRef::Interface(name)
            | TypeRef::Enum(name)
            | TypeRef::Union(name) => Ok(base_type(name.clone(), nullable)),
        }
    }
}

fn base_type(base: String, nullable: bool) -> TargetType {
    if nullable {
        TargetType::nullable(base)
    } else {
        TargetType::required(base)
    }
}

/// Converts a parsed constant into the declaration literal tree. `Binary`
/// payloads have no GraphQL source syntax and are rejected.
pub(crate) fn literal_from_const(value: &ConstValue) -> Result<Literal, UnsupportedLiteral> {
    match value {
        ConstValue::Null => Ok(Literal::Null),
        ConstValue::Boolean(value) => Ok(Literal::Boolean(*value)),
        ConstValue::Number(number) => match (number.as_i64(), number.as_f64()) {
            (Some(int), _) => Ok(Literal::Int(int)),
            (None, Some(float)) => Ok(Literal::Float(float)),
            (None, None) => Err(UnsupportedLiteral { kind: "number" }),
        },
        ConstValue::String(value) => Ok(Literal::String(value.clone())),
        ConstValue::Enum(name) => Ok(Literal::Enum(name.to_string())),
        ConstValue::List(items) => {
            let items = items.iter().map(literal_from_const).collect::<Result<_, _>>()?;
            Ok(Literal::List(items))
        }
        ConstValue::Object(fields) => {
            let fields = fields
                .iter()
                .map(|(name, value)| Ok((name.to_string(), literal_from_const(value)?)))
                .collect::<Result<IndexMap<_, _>, UnsupportedLiteral>>()?;
            Ok(Literal::Object(fields))
        }
        ConstValue::Binary(_) => Err(UnsupportedLiteral { kind: "binary" }),
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct UnsupportedLiteral {
    pub(crate) kind: &'static str,
}
