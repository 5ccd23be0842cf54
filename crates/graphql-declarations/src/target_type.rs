use std::fmt;

/// One list level around a mapped type. Nullability of the list itself is
/// independent of the nullability of its elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListWrapper {
    NullableList,
    NonNullList,
}

/// A fully resolved target-language type: a base name, whether the innermost
/// value is nullable, and a stack of list wrappers from innermost to
/// outermost, each with its own nullability.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetType {
    base: String,
    inner_nullable: bool,
    wrappers: Vec<ListWrapper>,
}

impl TargetType {
    /// A required (non-nullable) base type with no list wrapping.
    pub fn required(base: impl Into<String>) -> Self {
        TargetType {
            base: base.into(),
            inner_nullable: false,
            wrappers: Vec::new(),
        }
    }

    /// A nullable base type with no list wrapping.
    pub fn nullable(base: impl Into<String>) -> Self {
        TargetType {
            base: base.into(),
            inner_nullable: true,
            wrappers: Vec::new(),
        }
    }

    #[must_use]
    pub fn wrapped_in(mut self, wrapper: ListWrapper) -> Self {
        self.wrappers.push(wrapper);
        self
    }

    pub fn base_name(&self) -> &str {
        &self.base
    }

    pub fn inner_is_nullable(&self) -> bool {
        self.inner_nullable
    }

    pub fn list_depth(&self) -> usize {
        self.wrappers.len()
    }

    /// List wrappers from innermost to outermost.
    pub fn iter_list_wrappers(&self) -> impl ExactSizeIterator<Item = ListWrapper> + '_ {
        self.wrappers.iter().copied()
    }

    /// Whether the outermost level of the whole type is nullable.
    pub fn is_optional(&self) -> bool {
        match self.wrappers.last() {
            Some(wrapper) => *wrapper == ListWrapper::NullableList,
            None => self.inner_nullable,
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rendered = self.base.clone();

        if self.inner_nullable {
            rendered.push('?');
        }

        for wrapper in &self.wrappers {
            rendered = match wrapper {
                ListWrapper::NullableList => format!("[{rendered}]?"),
                ListWrapper::NonNullList => format!("[{rendered}]"),
            };
        }

        f.write_str(&rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn bare_scalar() {
        let ty = TargetType::nullable("string");
        assert!(ty.is_optional());
        assert_eq!(ty.list_depth(), 0);
        expect!["string?"].assert_eq(&ty.to_string());
    }

    #[test]
    fn required_list_of_nullable_elements() {
        let ty = TargetType::nullable("int").wrapped_in(ListWrapper::NonNullList);
        assert!(!ty.is_optional());
        assert!(ty.inner_is_nullable());
        expect!["[int?]"].assert_eq(&ty.to_string());
    }

    #[test]
    fn nested_lists_track_per_level_nullability() {
        let ty = TargetType::required("int")
            .wrapped_in(ListWrapper::NonNullList)
            .wrapped_in(ListWrapper::NullableList);

        assert!(ty.is_optional());
        assert_eq!(ty.list_depth(), 2);
        expect!["[[int]]?"].assert_eq(&ty.to_string());
    }
}
