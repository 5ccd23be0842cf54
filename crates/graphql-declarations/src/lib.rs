//! The declaration model produced by GraphQL code generation.
//!
//! A [`Declaration`] is the target-language-shaped unit generated from one
//! schema entity: a record, interface, enum, union, class or free function.
//! Declarations are immutable value trees. Builders construct them once per
//! generation run; the merge engine only ever reads them and assembles new
//! lists, it never mutates a declaration in place.
//!
//! Rendering declarations to final target-language text is the job of an
//! emitter elsewhere. The [`std::fmt::Display`] impls here produce a compact
//! neutral notation used for snapshots and debugging.

mod class;
mod document;
mod r#enum;
mod function;
mod interface;
mod literal;
mod record;
mod target_type;
mod union;

use std::fmt;

pub use class::{ClassDecl, MethodDecl};
pub use document::Document;
pub use function::{FunctionBody, FunctionDecl, Parameter};
pub use interface::InterfaceDecl;
pub use literal::{Deprecation, Literal};
pub use r#enum::{EnumDecl, EnumMember};
pub use record::{RecordDecl, RecordField, RecordKind};
pub use target_type::{ListWrapper, TargetType};
pub use union::UnionDecl;

/// Which root operation type a generated accessor corresponds to. The
/// distinction is structural: subscription accessors are long-lived/streaming,
/// query and mutation accessors are one-shot request/response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Query => f.write_str("query"),
            OperationKind::Mutation => f.write_str("mutation"),
            OperationKind::Subscription => f.write_str("subscription"),
        }
    }
}

/// One generated declaration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Declaration {
    Record(RecordDecl),
    Interface(InterfaceDecl),
    Enum(EnumDecl),
    Union(UnionDecl),
    Class(ClassDecl),
    Function(FunctionDecl),
}

/// The discriminant of a [`Declaration`], used in match keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeclarationKind {
    Record,
    Interface,
    Enum,
    Union,
    Class,
    Function,
}

/// Output ordering bucket. Merged and freshly built declaration lists are
/// always emitted in this category order, regardless of source schema order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Inputs,
    Interfaces,
    Enums,
    Unions,
    Objects,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Inputs,
        Category::Interfaces,
        Category::Enums,
        Category::Unions,
        Category::Objects,
        Category::Other,
    ];
}

/// The identity of a declaration across regenerations of the same schema.
///
/// Matching is by kind and name, not by content: a schema entity keeps the
/// same generated declaration name across compatible edits, so `(kind, name)`
/// is what correlates the previous output with the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchKey<'a> {
    pub kind: DeclarationKind,
    pub name: &'a str,
}

impl fmt::Display for MatchKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.kind, self.name)
    }
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Record(decl) => &decl.name,
            Declaration::Interface(decl) => &decl.name,
            Declaration::Enum(decl) => &decl.name,
            Declaration::Union(decl) => &decl.name,
            Declaration::Class(decl) => &decl.name,
            Declaration::Function(decl) => &decl.name,
        }
    }

    pub fn kind(&self) -> DeclarationKind {
        match self {
            Declaration::Record(_) => DeclarationKind::Record,
            Declaration::Interface(_) => DeclarationKind::Interface,
            Declaration::Enum(_) => DeclarationKind::Enum,
            Declaration::Union(_) => DeclarationKind::Union,
            Declaration::Class(_) => DeclarationKind::Class,
            Declaration::Function(_) => DeclarationKind::Function,
        }
    }

    pub fn match_key(&self) -> MatchKey<'_> {
        MatchKey {
            kind: self.kind(),
            name: self.name(),
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Declaration::Record(decl) => match decl.kind {
                RecordKind::Input => Category::Inputs,
                RecordKind::Object => Category::Objects,
            },
            Declaration::Interface(_) => Category::Interfaces,
            Declaration::Enum(_) => Category::Enums,
            Declaration::Union(_) => Category::Unions,
            Declaration::Class(_) => Category::Objects,
            Declaration::Function(_) => Category::Other,
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Declaration::Record(decl) => decl.fmt(f),
            Declaration::Interface(decl) => decl.fmt(f),
            Declaration::Enum(decl) => decl.fmt(f),
            Declaration::Union(decl) => decl.fmt(f),
            Declaration::Class(decl) => decl.fmt(f),
            Declaration::Function(decl) => decl.fmt(f),
        }
    }
}

impl From<RecordDecl> for Declaration {
    fn from(value: RecordDecl) -> Self {
        Declaration::Record(value)
    }
}

impl From<InterfaceDecl> for Declaration {
    fn from(value: InterfaceDecl) -> Self {
        Declaration::Interface(value)
    }
}

impl From<EnumDecl> for Declaration {
    fn from(value: EnumDecl) -> Self {
        Declaration::Enum(value)
    }
}

impl From<UnionDecl> for Declaration {
    fn from(value: UnionDecl) -> Self {
        Declaration::Union(value)
    }
}

impl From<ClassDecl> for Declaration {
    fn from(value: ClassDecl) -> Self {
        Declaration::Class(value)
    }
}

impl From<FunctionDecl> for Declaration {
    fn from(value: FunctionDecl) -> Self {
        Declaration::Function(value)
    }
}

pub(crate) fn write_docs(f: &mut fmt::Formatter<'_>, docs: Option<&str>, indent: &str) -> fmt::Result {
    let Some(docs) = docs else { return Ok(()) };

    for line in docs.lines() {
        writeln!(f, "{indent}# {line}")?;
    }

    Ok(())
}
