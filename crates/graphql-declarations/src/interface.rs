use std::fmt;

use crate::{write_docs, MethodDecl};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterfaceDecl {
    pub name: String,
    pub parents: Vec<String>,
    pub methods: Vec<MethodDecl>,
    pub docs: Option<String>,
}

impl InterfaceDecl {
    pub fn new(name: impl Into<String>) -> Self {
        InterfaceDecl {
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

impl fmt::Display for InterfaceDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_docs(f, self.docs.as_deref(), "")?;
        write!(f, "interface {}", self.name)?;

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
