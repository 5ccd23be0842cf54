use std::fmt;

use crate::{write_docs, Deprecation, TargetType};

/// Whether a record was generated from an input type or from an
/// object/response shape. Input records sort into the inputs category,
/// object records into the objects category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecordKind {
    Input,
    Object,
}

/// A plain data record: named fields, no behavior.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordDecl {
    pub name: String,
    pub kind: RecordKind,
    pub fields: Vec<RecordField>,
    pub docs: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordField {
    pub name: String,
    pub r#type: TargetType,
    pub docs: Option<String>,
    pub deprecation: Option<Deprecation>,
}

impl RecordDecl {
    pub fn new(name: impl Into<String>, kind: RecordKind) -> Self {
        RecordDecl {
            name: name.into(),
            kind,
            fields: Vec::new(),
            docs: None,
        }
    }

    #[must_use]
    pub fn with_docs(mut self, docs: impl Into<String>) -> Self {
        self.docs = Some(docs.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: RecordField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&RecordField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl RecordField {
    pub fn new(name: impl Into<String>, r#type: TargetType) -> Self {
        RecordField {
            name: name.into(),
            r#type,
            docs: None,
            deprecation: None,
        }
    }

    #[must_use]
    pub fn with_docs(mut self, docs: impl Into<String>) -> Self {
        self.docs = Some(docs.into());
        self
    }

    #[must_use]
    pub fn with_deprecation(mut self, deprecation: Deprecation) -> Self {
        self.deprecation = Some(deprecation);
        self
    }
}

impl fmt::Display for RecordDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_docs(f, self.docs.as_deref(), "")?;

        let keyword = match self.kind {
            RecordKind::Input => "input record",
            RecordKind::Object => "record",
        };

        writeln!(f, "{keyword} {} {{", self.name)?;

        for field in &self.fields {
            write_docs(f, field.docs.as_deref(), "  ")?;
            writeln!(f, "  {}: {}", field.name, field.r#type)?;
        }

        f.write_str("}")
    }
}
