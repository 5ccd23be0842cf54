//! Schema normalization: walks a parsed GraphQL schema into categorized
//! collections of named type definitions plus the root operation types.

use async_graphql_parser::{types as ast, Positioned};
use async_graphql_value::{ConstValue, Name};
use graphql_declarations::Deprecation;
use indexmap::IndexMap;

use crate::mapping::TypeRef;

/// Names with this prefix are reserved for introspection and excluded from
/// generation.
pub const RESERVED_PREFIX: &str = "__";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NamedKind {
    Scalar,
    Object,
    Input,
    Interface,
    Enum,
    Union,
}

#[derive(Debug, Default)]
pub(crate) struct TypeIndex {
    names: IndexMap<String, NamedKind>,
}

impl TypeIndex {
    fn from_document(document: &ast::ServiceDocument) -> Self {
        let mut names = IndexMap::new();

        for definition in &document.definitions {
            let ast::TypeSystemDefinition::Type(definition) = definition else {
                continue;
            };

            let name = definition.node.name.node.as_str();

            if name.starts_with(RESERVED_PREFIX) {
                continue;
            }

            let kind = match definition.node.kind {
                ast::TypeKind::Scalar => NamedKind::Scalar,
                ast::TypeKind::Object(_) => NamedKind::Object,
                ast::TypeKind::Interface(_) => NamedKind::Interface,
                ast::TypeKind::Union(_) => NamedKind::Union,
                ast::TypeKind::Enum(_) => NamedKind::Enum,
                ast::TypeKind::InputObject(_) => NamedKind::Input,
            };

            names.insert(name.to_owned(), kind);
        }

        TypeIndex { names }
    }

    pub(crate) fn classify(&self, name: &str) -> TypeRef {
        match self.names.get(name) {
            Some(NamedKind::Object) => TypeRef::Object(name.to_owned()),
            Some(NamedKind::Input) => TypeRef::Input(name.to_owned()),
            Some(NamedKind::Interface) => TypeRef::Interface(name.to_owned()),
            Some(NamedKind::Enum) => TypeRef::Enum(name.to_owned()),
            Some(NamedKind::Union) => TypeRef::Union(name.to_owned()),
            // Builtin scalars, declared scalars, and unknown names all land
            // here; the mapper rejects the unknown ones.
            Some(NamedKind::Scalar) | None => TypeRef::Scalar(name.to_owned()),
        }
    }

    pub(crate) fn type_ref(&self, r#type: &ast::Type) -> TypeRef {
        let inner = match &r#type.base {
            ast::BaseType::Named(name) => self.classify(name.as_str()),
            ast::BaseType::List(inner) => TypeRef::List(Box::new(self.type_ref(inner))),
        };

        if r#type.nullable {
            inner
        } else {
            TypeRef::NonNull(Box::new(inner))
        }
    }
}

/// The normalized view of a schema that the declaration builders consume.
#[derive(Debug)]
pub struct AnalyzedSchema {
    pub objects: Vec<ObjectDef>,
    pub inputs: Vec<InputDef>,
    pub interfaces: Vec<InterfaceDef>,
    pub enums: Vec<EnumDef>,
    pub unions: Vec<UnionDef>,
    pub custom_scalars: Vec<ScalarDef>,
    pub query_type: Option<String>,
    pub mutation_type: Option<String>,
    pub subscription_type: Option<String>,
    pub(crate) index: TypeIndex,
}

#[derive(Debug, Clone)]
pub struct ObjectDef {
    pub name: String,
    pub docs: Option<String>,
    pub interfaces: Vec<String>,
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone)]
pub struct InterfaceDef {
    pub name: String,
    pub docs: Option<String>,
    pub interfaces: Vec<String>,
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone)]
pub struct InputDef {
    pub name: String,
    pub docs: Option<String>,
    pub fields: Vec<InputValueDef>,
}

#[derive(Debug, Clone)]
pub struct EnumDef {
    pub name: String,
    pub docs: Option<String>,
    pub values: Vec<EnumValueDef>,
}

#[derive(Debug, Clone)]
pub struct EnumValueDef {
    pub name: String,
    pub docs: Option<String>,
    pub deprecation: Option<Deprecation>,
}

#[derive(Debug, Clone)]
pub struct UnionDef {
    pub name: String,
    pub docs: Option<String>,
    pub members: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ScalarDef {
    pub name: String,
    pub docs: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: String,
    pub r#type: TypeRef,
    pub arguments: Vec<InputValueDef>,
    pub docs: Option<String>,
    pub deprecation: Option<Deprecation>,
    /// True when a directly declared parent interface already declares this
    /// field with an identical signature. Such fields are omitted from the
    /// subtype's own generated member list.
    pub inherited: bool,
}

#[derive(Debug, Clone)]
pub struct InputValueDef {
    pub name: String,
    pub r#type: TypeRef,
    pub docs: Option<String>,
    pub default: Option<ConstValue>,
    pub deprecation: Option<Deprecation>,
}

impl ObjectDef {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl InterfaceDef {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl FieldDef {
    pub fn has_arguments(&self) -> bool {
        !self.arguments.is_empty()
    }

    fn same_signature(&self, other: &FieldDef) -> bool {
        self.name == other.name
            && self.r#type == other.r#type
            && self.arguments.len() == other.arguments.len()
            && self
                .arguments
                .iter()
                .zip(&other.arguments)
                .all(|(a, b)| a.name == b.name && a.r#type == b.r#type && a.default == b.default)
    }
}

impl AnalyzedSchema {
    pub fn object(&self, name: &str) -> Option<&ObjectDef> {
        self.objects.iter().find(|object| object.name == name)
    }

    pub fn input(&self, name: &str) -> Option<&InputDef> {
        self.inputs.iter().find(|input| input.name == name)
    }

    pub fn interface(&self, name: &str) -> Option<&InterfaceDef> {
        self.interfaces.iter().find(|interface| interface.name == name)
    }

    pub fn r#enum(&self, name: &str) -> Option<&EnumDef> {
        self.enums.iter().find(|r#enum| r#enum.name == name)
    }

    pub fn is_custom_scalar(&self, name: &str) -> bool {
        self.custom_scalars.iter().any(|scalar| scalar.name == name)
    }

    /// True when `name` is one of the root operation types.
    pub fn is_root_type(&self, name: &str) -> bool {
        [&self.query_type, &self.mutation_type, &self.subscription_type]
            .into_iter()
            .flatten()
            .any(|root| root == name)
    }

    pub(crate) fn type_ref(&self, r#type: &ast::Type) -> TypeRef {
        self.index.type_ref(r#type)
    }
}

/// Normalizes a parsed schema document.
pub fn analyze(document: &ast::ServiceDocument) -> AnalyzedSchema {
    let index = TypeIndex::from_document(document);

    let mut schema = AnalyzedSchema {
        objects: Vec::new(),
        inputs: Vec::new(),
        interfaces: Vec::new(),
        enums: Vec::new(),
        unions: Vec::new(),
        custom_scalars: Vec::new(),
        query_type: None,
        mutation_type: None,
        subscription_type: None,
        index,
    };

    let mut declared_roots: (Option<String>, Option<String>, Option<String>) = (None, None, None);

    for definition in &document.definitions {
        match definition {
            ast::TypeSystemDefinition::Schema(schema_definition) => {
                let node = &schema_definition.node;
                declared_roots.0 = node.query.as_ref().map(|name| name.node.to_string());
                declared_roots.1 = node.mutation.as_ref().map(|name| name.node.to_string());
                declared_roots.2 = node.subscription.as_ref().map(|name| name.node.to_string());
            }
            ast::TypeSystemDefinition::Type(definition) => ingest_type(&mut schema, &definition.node),
            ast::TypeSystemDefinition::Directive(_) => (),
        }
    }

    schema.query_type = resolve_root(&schema, declared_roots.0, "Query");
    schema.mutation_type = resolve_root(&schema, declared_roots.1, "Mutation");
    schema.subscription_type = resolve_root(&schema, declared_roots.2, "Subscription");

    mark_inherited_fields(&mut schema);

    schema
}

fn resolve_root(schema: &AnalyzedSchema, declared: Option<String>, default: &str) -> Option<String> {
    let name = declared.unwrap_or_else(|| default.to_owned());
    schema.object(&name).map(|object| object.name.clone())
}

fn ingest_type(schema: &mut AnalyzedSchema, definition: &ast::TypeDefinition) {
    let name = definition.name.node.to_string();

    if name.starts_with(RESERVED_PREFIX) {
        return;
    }

    let docs = docs(&definition.description);

    match &definition.kind {
        ast::TypeKind::Scalar => {
            if !schema.is_custom_scalar(&name) {
                schema.custom_scalars.push(ScalarDef { name, docs });
            }
        }
        ast::TypeKind::Object(object) => {
            let interfaces = names(&object.implements);
            let fields = object.fields.iter().map(|field| field_def(schema, &field.node)).collect();

            match schema.objects.iter_mut().find(|existing| existing.name == name) {
                // Type extension: fold the extra members into the base type.
                Some(existing) => extend_fields(&mut existing.interfaces, &mut existing.fields, interfaces, fields),
                None => schema.objects.push(ObjectDef {
                    name,
                    docs,
                    interfaces,
                    fields,
                }),
            }
        }
        ast::TypeKind::Interface(interface) => {
            let interfaces = names(&interface.implements);
            let fields = interface
                .fields
                .iter()
                .map(|field| field_def(schema, &field.node))
                .collect();

            match schema.interfaces.iter_mut().find(|existing| existing.name == name) {
                Some(existing) => extend_fields(&mut existing.interfaces, &mut existing.fields, interfaces, fields),
                None => schema.interfaces.push(InterfaceDef {
                    name,
                    docs,
                    interfaces,
                    fields,
                }),
            }
        }
        ast::TypeKind::Union(union) => {
            let members = names(&union.members);

            match schema.unions.iter_mut().find(|existing| existing.name == name) {
                Some(existing) => existing.members.extend(members),
                None => schema.unions.push(UnionDef { name, docs, members }),
            }
        }
        ast::TypeKind::Enum(r#enum) => {
            let values = r#enum
                .values
                .iter()
                .map(|value| EnumValueDef {
                    name: value.node.value.node.to_string(),
                    docs: self::docs(&value.node.description),
                    deprecation: deprecation(&value.node.directives),
                })
                .collect::<Vec<_>>();

            match schema.enums.iter_mut().find(|existing| existing.name == name) {
                Some(existing) => existing.values.extend(values),
                None => schema.enums.push(EnumDef { name, docs, values }),
            }
        }
        ast::TypeKind::InputObject(input) => {
            let fields = input
                .fields
                .iter()
                .map(|field| input_value_def(schema, &field.node))
                .collect::<Vec<_>>();

            match schema.inputs.iter_mut().find(|existing| existing.name == name) {
                Some(existing) => existing.fields.extend(fields),
                None => schema.inputs.push(InputDef { name, docs, fields }),
            }
        }
    }
}

fn extend_fields(
    interfaces: &mut Vec<String>,
    fields: &mut Vec<FieldDef>,
    extra_interfaces: Vec<String>,
    extra_fields: Vec<FieldDef>,
) {
    interfaces.extend(extra_interfaces);
    fields.extend(extra_fields);
}

fn field_def(schema: &AnalyzedSchema, field: &ast::FieldDefinition) -> FieldDef {
    FieldDef {
        name: field.name.node.to_string(),
        r#type: schema.type_ref(&field.ty.node),
        arguments: field
            .arguments
            .iter()
            .map(|argument| input_value_def(schema, &argument.node))
            .collect(),
        docs: docs(&field.description),
        deprecation: deprecation(&field.directives),
        inherited: false,
    }
}

fn input_value_def(schema: &AnalyzedSchema, value: &ast::InputValueDefinition) -> InputValueDef {
    InputValueDef {
        name: value.name.node.to_string(),
        r#type: schema.type_ref(&value.ty.node),
        docs: docs(&value.description),
        default: value.default_value.as_ref().map(|value| value.node.clone()),
        deprecation: deprecation(&value.directives),
    }
}

fn mark_inherited_fields(schema: &mut AnalyzedSchema) {
    let parents = schema.interfaces.clone();

    let lookup = |interfaces: &[String], field: &FieldDef| {
        interfaces.iter().any(|name| {
            parents
                .iter()
                .find(|parent| parent.name == *name)
                .and_then(|parent| parent.fields.iter().find(|candidate| candidate.name == field.name))
                .is_some_and(|candidate| candidate.same_signature(field))
        })
    };

    for object in &mut schema.objects {
        for field in &mut object.fields {
            field.inherited = lookup(&object.interfaces, field);
        }
    }

    for interface in &mut schema.interfaces {
        for field in &mut interface.fields {
            field.inherited = lookup(&interface.interfaces, field);
        }
    }
}

fn names(names: &[Positioned<Name>]) -> Vec<String> {
    names.iter().map(|name| name.node.to_string()).collect()
}

fn docs(description: &Option<Positioned<String>>) -> Option<String> {
    description.as_ref().map(|description| description.node.clone())
}

fn deprecation(directives: &[Positioned<ast::ConstDirective>]) -> Option<Deprecation> {
    let directive = directives
        .iter()
        .find(|directive| directive.node.name.node.as_str() == "deprecated")?;

    let reason = directive
        .node
        .arguments
        .iter()
        .find(|(name, _)| name.node.as_str() == "reason")
        .and_then(|(_, value)| match &value.node {
            ConstValue::String(reason) => Some(reason.clone()),
            _ => None,
        });

    Some(Deprecation { reason })
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn analyzed(sdl: &str) -> AnalyzedSchema {
        analyze(&async_graphql_parser::parse_schema(sdl).unwrap())
    }

    #[test]
    fn categorizes_definitions_and_resolves_roots() {
        let schema = analyzed(indoc! {r#"
            type Query { me: User }
            type Mutation { rename(name: String!): User }
            type User implements Node { id: ID!, name: String }
            interface Node { id: ID! }
            enum Role { ADMIN USER }
            union Principal = User
            input UserFilter { role: Role }
            scalar DateTime
        "#});

        assert_eq!(schema.query_type.as_deref(), Some("Query"));
        assert_eq!(schema.mutation_type.as_deref(), Some("Mutation"));
        assert_eq!(schema.subscription_type, None);

        assert_eq!(schema.objects.len(), 3);
        assert_eq!(schema.interfaces.len(), 1);
        assert_eq!(schema.enums.len(), 1);
        assert_eq!(schema.unions.len(), 1);
        assert_eq!(schema.inputs.len(), 1);
        assert_eq!(schema.custom_scalars.len(), 1);
    }

    #[test]
    fn reserved_names_are_excluded() {
        let schema = analyzed("type Query { me: String } type __Hidden { f: Int }");

        assert!(schema.object("__Hidden").is_none());
        assert_eq!(schema.objects.len(), 1);
    }

    #[test]
    fn schema_definition_overrides_root_type_names() {
        let schema = analyzed(indoc! {r#"
            schema { query: Root }
            type Root { version: String! }
        "#});

        assert_eq!(schema.query_type.as_deref(), Some("Root"));
    }

    #[test]
    fn identical_interface_fields_are_marked_inherited() {
        let schema = analyzed(indoc! {r#"
            type Query { node: Node }
            interface Node { id: ID! }
            type User implements Node { id: ID!, name: String }
            type Legacy implements Node { id: ID }
        "#});

        let user = schema.object("User").unwrap();
        assert!(user.field("id").unwrap().inherited);
        assert!(!user.field("name").unwrap().inherited);

        // Signature changed (nullability loosened), so it is re-declared.
        let legacy = schema.object("Legacy").unwrap();
        assert!(!legacy.field("id").unwrap().inherited);
    }

    #[test]
    fn deprecation_is_captured_with_reason() {
        let schema = analyzed(indoc! {r#"
            type Query { old: String @deprecated(reason: "use `new`") }
        "#});

        let field = schema.object("Query").unwrap().field("old").unwrap();
        let deprecation = field.deprecation.as_ref().unwrap();
        assert_eq!(deprecation.reason.as_deref(), Some("use `new`"));
    }
}
