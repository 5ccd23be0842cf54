//! Maps parsed GraphQL schemas and operation documents to target-language
//! declaration lists.
//!
//! The pipeline is a pure, synchronous tree transformation: [`analyze`]
//! normalizes a parsed schema, [`extract`] walks operation documents,
//! and [`generate_client`] / [`generate_service`] combine the two with
//! configuration facts into a [`graphql_declarations::Document`]. Rendering
//! the declarations to text and writing files happen elsewhere; regeneration
//! against existing output is the `declaration-merge` crate's job.

mod analyze;
mod client;
mod common;
mod config;
mod error;
mod mapping;
mod operations;
mod service;

use graphql_declarations::{Declaration, Document};
use itertools::Itertools;

pub use analyze::{
    analyze, AnalyzedSchema, EnumDef, EnumValueDef, FieldDef, InputDef, InputValueDef, InterfaceDef, ObjectDef,
    ScalarDef, UnionDef, RESERVED_PREFIX,
};
pub use client::{generate_client, FAILURE_TYPE, OPTIONS_TYPE};
pub use config::{AuthScheme, GenerateConfig};
pub use error::{
    BuildError, DeclarationBuildError, ExtractError, FragmentResolutionError, ServiceSurfaceError, TypeMappingError,
};
pub use mapping::{TypeMapper, TypeRef};
pub use operations::{extract, OperationDef, RootField, VariableDef};
pub use service::generate_service;

/// The outcome of one builder run: the generated declarations plus the
/// per-declaration failures that were skipped along the way.
#[derive(Debug)]
pub struct BuildOutput {
    pub document: Document,
    pub errors: Vec<BuildError>,
}

impl BuildOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// A human-readable summary of every declaration that failed, or `None`
    /// when the run was clean.
    pub fn error_summary(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }

        Some(self.errors.iter().map(|error| error.to_string()).join("\n"))
    }
}

/// Reorders declarations into the fixed category order: inputs, interfaces,
/// enums, unions, objects/classes, then everything else. Order within a
/// category is preserved.
pub(crate) fn order_by_category(mut declarations: Vec<Declaration>) -> Document {
    declarations.sort_by_key(|declaration| declaration.category());
    Document::from(declarations)
}
