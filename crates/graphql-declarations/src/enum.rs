use std::fmt;

use crate::{write_docs, Deprecation};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumDecl {
    pub name: String,
    pub members: Vec<EnumMember>,
    pub docs: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumMember {
    pub name: String,
    pub docs: Option<String>,
    pub deprecation: Option<Deprecation>,
}

impl EnumDecl {
    pub fn new(name: impl Into<String>) -> Self {
        EnumDecl {
            name: name.into(),
            members: Vec::new(),
            docs: None,
        }
    }

    #[must_use]
    pub fn with_docs(mut self, docs: impl Into<String>) -> Self {
        self.docs = Some(docs.into());
        self
    }

    #[must_use]
    pub fn with_member(mut self, member: EnumMember) -> Self {
        self.members.push(member);
        self
    }

    pub fn member(&self, name: &str) -> Option<&EnumMember> {
        self.members.iter().find(|member| member.name == name)
    }
}

impl EnumMember {
    pub fn new(name: impl Into<String>) -> Self {
        EnumMember {
            name: name.into(),
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

impl fmt::Display for EnumDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_docs(f, self.docs.as_deref(), "")?;
        writeln!(f, "enum {} {{", self.name)?;

        for member in &self.members {
            write_docs(f, member.docs.as_deref(), "  ")?;
            writeln!(f, "  {}", member.name)?;
        }

        f.write_str("}")
    }
}
