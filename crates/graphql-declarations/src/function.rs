use std::fmt;

use crate::{write_docs, Literal, OperationKind, TargetType};

/// A free function, e.g. one generated client call per operation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<Parameter>,
    pub returns: TargetType,
    /// When set, the declared return type is the union of `returns` and this
    /// failure type.
    pub failure_type: Option<String>,
    pub body: FunctionBody,
    pub docs: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameter {
    pub name: String,
    pub r#type: TargetType,
    pub default: Option<Literal>,
}

/// What a generated function does. Operation bodies carry the rendered
/// GraphQL document; verbatim bodies hold user-authored text that the merge
/// engine preserves untouched.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FunctionBody {
    Operation { kind: OperationKind, document: String },
    Verbatim(String),
}

impl FunctionDecl {
    pub fn new(name: impl Into<String>, returns: TargetType, body: FunctionBody) -> Self {
        FunctionDecl {
            name: name.into(),
            params: Vec::new(),
            returns,
            failure_type: None,
            body,
            docs: None,
        }
    }

    #[must_use]
    pub fn with_param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    #[must_use]
    pub fn with_failure_type(mut self, name: impl Into<String>) -> Self {
        self.failure_type = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_docs(mut self, docs: impl Into<String>) -> Self {
        self.docs = Some(docs.into());
        self
    }

    /// Signature identity for merge comparisons: parameters, return type and
    /// failure type, but not the body.
    pub fn same_signature(&self, other: &FunctionDecl) -> bool {
        self.params == other.params && self.returns == other.returns && self.failure_type == other.failure_type
    }
}

impl Parameter {
    pub fn required(name: impl Into<String>, r#type: TargetType) -> Self {
        Parameter {
            name: name.into(),
            r#type,
            default: None,
        }
    }

    /// An optional parameter defaulting to the explicit absent literal.
    pub fn optional(name: impl Into<String>, r#type: TargetType) -> Self {
        Parameter {
            name: name.into(),
            r#type,
            default: Some(Literal::absent()),
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: Literal) -> Self {
        self.default = Some(default);
        self
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

impl fmt::Display for FunctionDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_docs(f, self.docs.as_deref(), "")?;
        write!(f, "function {}(", self.name)?;

        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            param.fmt(f)?;
        }

        write!(f, "): {}", self.returns)?;

        if let Some(failure) = &self.failure_type {
            write!(f, " | {failure}")?;
        }

        writeln!(f, " {{")?;

        match &self.body {
            FunctionBody::Operation { kind, document } => {
                writeln!(f, "  {kind}:")?;
                for line in document.lines() {
                    writeln!(f, "  {line}")?;
                }
            }
            FunctionBody::Verbatim(text) => {
                for line in text.lines() {
                    writeln!(f, "  {line}")?;
                }
            }
        }

        f.write_str("}")
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.r#type)?;

        if let Some(default) = &self.default {
            write!(f, " = {default}")?;
        }

        Ok(())
    }
}
