use std::fmt;

use crate::{write_docs, Deprecation, OperationKind, Parameter, TargetType};

/// A behavior-bearing type: either a generated service surface (one method
/// per root-type field) or an object type with argumented field accessors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassDecl {
    pub name: String,
    pub parents: Vec<String>,
    pub methods: Vec<MethodDecl>,
    pub docs: Option<String>,
}

/// One method of a class or interface.
///
/// `operation` is set on service methods and selects the accessor shape:
/// subscription methods are streaming accessors, query and mutation methods
/// are one-shot. Plain object accessors leave it unset.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodDecl {
    pub name: String,
    pub params: Vec<Parameter>,
    pub returns: TargetType,
    pub operation: Option<OperationKind>,
    pub docs: Option<String>,
    pub deprecation: Option<Deprecation>,
}

impl ClassDecl {
    pub fn new(name: impl Into<String>) -> Self {
        ClassDecl {
            name: name.into(),
            parents: Vec::new(),
            methods: Vec::new(),
            docs: None,
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parents.push(parent.into());
        self
    }

    #[must_use]
    pub fn with_docs(mut self, docs: impl Into<String>) -> Self {
        self.docs = Some(docs.into());
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    pub fn method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods.iter().find(|method| method.name == name)
    }
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, returns: TargetType) -> Self {
        MethodDecl {
            name: name.into(),
            params: Vec::new(),
            returns,
            operation: None,
            docs: None,
            deprecation: None,
        }
    }

    #[must_use]
    pub fn with_param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    #[must_use]
    pub fn with_operation(mut self, kind: OperationKind) -> Self {
        self.operation = Some(kind);
        self
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

    /// Signature identity for merge comparisons: parameters, return type and
    /// accessor shape. A root field moving between one-shot and streaming
    /// changes what callers hold, so `operation` is part of the identity.
    pub fn same_signature(&self, other: &MethodDecl) -> bool {
        self.operation == other.operation && self.params == other.params && self.returns == other.returns
    }
}

impl fmt::Display for ClassDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_docs(f, self.docs.as_deref(), "")?;
        write!(f, "class {}", self.name)?;

        if !self.parents.is_empty() {
            write!(f, ": {}", self.parents.join(", "))?;
        }

        writeln!(f, " {{")?;

        for method in &self.methods {
            write_docs(f, method.docs.as_deref(), "  ")?;
            writeln!(f, "  {method}")?;
        }

        f.write_str("}")
    }
}

impl fmt::Display for MethodDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(kind) = self.operation {
            write!(f, "{kind} ")?;
        }

        write!(f, "{}(", self.name)?;

        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            param.fmt(f)?;
        }

        write!(f, "): {}", self.returns)
    }
}
