//! Member-level merging for each declaration kind. The regenerated
//! declaration always provides the structure; the previous one contributes
//! docs that regeneration lost and members the generator does not know about.

use std::fmt::Write as _;

use graphql_declarations::{ClassDecl, EnumDecl, FunctionBody, FunctionDecl, InterfaceDecl, MethodDecl, RecordDecl, UnionDecl};

use crate::warning::{MergeWarning, WarningKind};

pub(crate) fn merge_records(prev: &RecordDecl, next: &RecordDecl, warnings: &mut Vec<MergeWarning>) -> RecordDecl {
    let mut merged = next.clone();

    if merged.docs.is_none() {
        merged.docs = prev.docs.clone();
    }

    for field in &mut merged.fields {
        let Some(previous) = prev.field(&field.name) else { continue };

        if field.docs.is_none() {
            field.docs = previous.docs.clone();
        }

        if field.r#type != previous.r#type {
            warnings.push(MergeWarning::new(
                format!("{}.{}", next.name, field.name),
                WarningKind::FieldTypeChanged {
                    previous: previous.r#type.to_string(),
                    next: field.r#type.to_string(),
                },
            ));
        }
    }

    for field in &prev.fields {
        if next.field(&field.name).is_none() && !field.r#type.is_optional() {
            warnings.push(MergeWarning::new(
                format!("{}.{}", prev.name, field.name),
                WarningKind::RequiredFieldRemoved,
            ));
        }
    }

    merged
}

pub(crate) fn merge_classes(prev: &ClassDecl, next: &ClassDecl, warnings: &mut Vec<MergeWarning>) -> ClassDecl {
    let mut merged = next.clone();

    if merged.docs.is_none() {
        merged.docs = prev.docs.clone();
    }

    merge_methods(&prev.methods, &mut merged.methods, &next.name, warnings);

    merged
}

pub(crate) fn merge_interfaces(
    prev: &InterfaceDecl,
    next: &InterfaceDecl,
    warnings: &mut Vec<MergeWarning>,
) -> InterfaceDecl {
    let mut merged = next.clone();

    if merged.docs.is_none() {
        merged.docs = prev.docs.clone();
    }

    merge_methods(&prev.methods, &mut merged.methods, &next.name, warnings);

    merged
}

fn merge_methods(
    prev_methods: &[MethodDecl],
    methods: &mut Vec<MethodDecl>,
    parent: &str,
    warnings: &mut Vec<MergeWarning>,
) {
    for method in methods.iter_mut() {
        let Some(previous) = prev_methods.iter().find(|prev| prev.name == method.name) else {
            continue;
        };

        if method.docs.is_none() {
            method.docs = previous.docs.clone();
        }

        if !method.same_signature(previous) {
            warnings.push(MergeWarning::new(
                format!("{parent}.{}", method.name),
                WarningKind::MethodSignatureChanged {
                    previous: method_signature(previous),
                    next: method_signature(method),
                },
            ));
        }
    }

    // Methods without a regenerated counterpart were added by hand; keep them.
    for previous in prev_methods {
        if !methods.iter().any(|method| method.name == previous.name) {
            methods.push(previous.clone());
        }
    }
}

pub(crate) fn merge_enums(prev: &EnumDecl, next: &EnumDecl, warnings: &mut Vec<MergeWarning>) -> EnumDecl {
    let mut merged = next.clone();

    if merged.docs.is_none() {
        merged.docs = prev.docs.clone();
    }

    for member in &mut merged.members {
        if let Some(previous) = prev.member(&member.name) {
            if member.docs.is_none() {
                member.docs = previous.docs.clone();
            }
        }
    }

    for previous in &prev.members {
        if next.member(&previous.name).is_none() {
            warnings.push(MergeWarning::new(
                format!("{}.{}", prev.name, previous.name),
                WarningKind::EnumMemberRemoved,
            ));
        }
    }

    merged
}

pub(crate) fn merge_unions(prev: &UnionDecl, next: &UnionDecl, warnings: &mut Vec<MergeWarning>) -> UnionDecl {
    let mut merged = next.clone();

    if merged.docs.is_none() {
        merged.docs = prev.docs.clone();
    }

    for previous in &prev.members {
        if !next.members.contains(previous) {
            warnings.push(MergeWarning::new(
                format!("{}.{previous}", prev.name),
                WarningKind::UnionMemberRemoved,
            ));
        }
    }

    merged
}

pub(crate) fn merge_functions(
    prev: &FunctionDecl,
    next: &FunctionDecl,
    warnings: &mut Vec<MergeWarning>,
) -> FunctionDecl {
    let mut merged = next.clone();

    if merged.docs.is_none() {
        merged.docs = prev.docs.clone();
    }

    if prev.same_signature(next) {
        // A hand-edited body survives regeneration while the call shape is
        // unchanged.
        if matches!(prev.body, FunctionBody::Verbatim(_)) {
            merged.body = prev.body.clone();
        }
    } else {
        warnings.push(MergeWarning::new(
            next.name.clone(),
            WarningKind::FunctionSignatureChanged {
                previous: function_signature(prev),
                next: function_signature(next),
            },
        ));
    }

    merged
}

fn method_signature(method: &MethodDecl) -> String {
    let mut rendered = String::new();

    if let Some(kind) = method.operation {
        let _ = write!(rendered, "{kind} ");
    }

    rendered.push('(');

    for (i, param) in method.params.iter().enumerate() {
        if i > 0 {
            rendered.push_str(", ");
        }
        let _ = write!(rendered, "{param}");
    }

    let _ = write!(rendered, "): {}", method.returns);

    rendered
}

fn function_signature(function: &FunctionDecl) -> String {
    let mut rendered = String::from("(");

    for (i, param) in function.params.iter().enumerate() {
        if i > 0 {
            rendered.push_str(", ");
        }
        let _ = write!(rendered, "{param}");
    }

    let _ = write!(rendered, "): {}", function.returns);

    if let Some(failure) = &function.failure_type {
        let _ = write!(rendered, " | {failure}");
    }

    rendered
}
