use std::fmt;

use crate::write_docs;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnionDecl {
    pub name: String,
    pub members: Vec<String>,
    pub docs: Option<String>,
}

impl UnionDecl {
    pub fn new(name: impl Into<String>) -> Self {
        UnionDecl {
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
    pub fn with_member(mut self, member: impl Into<String>) -> Self {
        self.members.push(member.into());
        self
    }
}

impl fmt::Display for UnionDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_docs(f, self.docs.as_deref(), "")?;
        write!(f, "union {} = {}", self.name, self.members.join(" | "))
    }
}
