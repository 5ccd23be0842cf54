use std::fmt;

use crate::Declaration;

/// An ordered list of declarations destined for one output unit.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    declarations: Vec<Declaration>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, declaration: impl Into<Declaration>) {
        self.declarations.push(declaration.into());
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }
}

impl From<Vec<Declaration>> for Document {
    fn from(declarations: Vec<Declaration>) -> Self {
        Document { declarations }
    }
}

impl IntoIterator for Document {
    type Item = Declaration;
    type IntoIter = std::vec::IntoIter<Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.declarations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Declaration;
    type IntoIter = std::slice::Iter<'a, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.declarations.iter()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for declaration in &self.declarations {
            writeln!(f, "{declaration}")?;
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EnumDecl, EnumMember, RecordDecl, RecordField, RecordKind, TargetType};
    use expect_test::expect;

    #[test]
    fn renders_declarations_in_insertion_order() {
        let mut document = Document::new();

        document.push(
            RecordDecl::new("UserInput", RecordKind::Input)
                .with_field(RecordField::new("name", TargetType::required("string")))
                .with_field(RecordField::new("age", TargetType::nullable("int"))),
        );

        document.push(
            EnumDecl::new("Role")
                .with_member(EnumMember::new("ADMIN"))
                .with_member(EnumMember::new("USER")),
        );

        let expected = expect![[r#"
            input record UserInput {
              name: string
              age: int?
            }

            enum Role {
              ADMIN
              USER
            }

        "#]];

        expected.assert_eq(&document.to_string());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn declarations_serialize_with_field_order_intact() {
        let declaration: Declaration = RecordDecl::new("UserInput", RecordKind::Input)
            .with_field(RecordField::new("name", TargetType::required("string")))
            .with_field(RecordField::new("age", TargetType::nullable("int")))
            .into();

        let json = serde_json::to_string_pretty(&declaration).unwrap();

        let expected = expect![[r#"
            {
              "Record": {
                "name": "UserInput",
                "kind": "Input",
                "fields": [
                  {
                    "name": "name",
                    "type": {
                      "base": "string",
                      "inner_nullable": false,
                      "wrappers": []
                    },
                    "docs": null,
                    "deprecation": null
                  },
                  {
                    "name": "age",
                    "type": {
                      "base": "int",
                      "inner_nullable": true,
                      "wrappers": []
                    },
                    "docs": null,
                    "deprecation": null
                  }
                ],
                "docs": null
              }
            }"#]];

        expected.assert_eq(&json);
    }
}
