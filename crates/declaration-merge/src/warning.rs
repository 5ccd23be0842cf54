use std::fmt;

/// One observation made while merging a regenerated declaration list into the
/// previous one. Warnings never stop the merge; they exist so callers can
/// surface potentially breaking drift between two generator runs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergeWarning {
    /// Dotted path to the affected member, e.g. `User.name`.
    pub path: String,
    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WarningKind {
    /// A non-optional record field present in the previous run is gone.
    RequiredFieldRemoved,
    /// A record field exists in both runs with a different type.
    FieldTypeChanged { previous: String, next: String },
    /// A class or interface method exists in both runs with a different
    /// parameter list or return type.
    MethodSignatureChanged { previous: String, next: String },
    /// A function exists in both runs with a different signature.
    FunctionSignatureChanged { previous: String, next: String },
    EnumMemberRemoved,
    UnionMemberRemoved,
}

impl MergeWarning {
    pub(crate) fn new(path: impl Into<String>, kind: WarningKind) -> Self {
        MergeWarning { path: path.into(), kind }
    }
}

impl fmt::Display for MergeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = &self.path;

        match &self.kind {
            WarningKind::RequiredFieldRemoved => write!(f, "required field `{path}` was removed"),
            WarningKind::FieldTypeChanged { previous, next } => {
                write!(f, "field `{path}` changed type from `{previous}` to `{next}`")
            }
            WarningKind::MethodSignatureChanged { previous, next } => {
                write!(f, "method `{path}` changed signature from `{previous}` to `{next}`")
            }
            WarningKind::FunctionSignatureChanged { previous, next } => {
                write!(f, "function `{path}` changed signature from `{previous}` to `{next}`")
            }
            WarningKind::EnumMemberRemoved => write!(f, "enum member `{path}` was removed"),
            WarningKind::UnionMemberRemoved => write!(f, "union member `{path}` was removed"),
        }
    }
}
