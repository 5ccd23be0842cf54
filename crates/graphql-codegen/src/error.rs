use graphql_declarations::DeclarationKind;

/// A type reference that cannot be mapped to a target type: the name is
/// neither a builtin scalar, a declared custom scalar, nor a named type
/// defined in the schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported type `{name}` at {path}")]
pub struct TypeMappingError {
    /// The field or argument path the offending reference was found at.
    pub path: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FragmentResolutionError {
    #[error("operation `{operation}` references undefined fragment `{fragment}`")]
    Undefined { operation: String, fragment: String },
    #[error("fragment `{fragment}` spreads itself, directly or indirectly")]
    Cycle { fragment: String },
}

/// A [`TypeMappingError`] tagged with the declaration it occurred in.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("could not generate {} `{name}`: {source}", kind_label(*.kind))]
pub struct DeclarationBuildError {
    pub kind: DeclarationKind,
    pub name: String,
    #[source]
    pub source: TypeMappingError,
}

/// A root-type field that cannot be expressed as a service method.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot express root field `{field}`: {reason}")]
pub struct ServiceSurfaceError {
    pub field: String,
    pub reason: String,
}

/// Per-declaration failures collected by the builders. A failing declaration
/// is skipped and reported; it does not abort the rest of the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Declaration(#[from] DeclarationBuildError),
    #[error(transparent)]
    ServiceSurface(#[from] ServiceSurfaceError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error(transparent)]
    Fragment(#[from] FragmentResolutionError),
    #[error("operation documents must use named operations")]
    AnonymousOperation,
}

fn kind_label(kind: DeclarationKind) -> &'static str {
    match kind {
        DeclarationKind::Record => "record",
        DeclarationKind::Interface => "interface",
        DeclarationKind::Enum => "enum",
        DeclarationKind::Union => "union",
        DeclarationKind::Class => "class",
        DeclarationKind::Function => "function",
    }
}
