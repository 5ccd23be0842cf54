/// Auth schemes the generated client surface accounts for. Validation of the
/// project configuration these come from happens upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    ApiKey,
    BearerToken,
    Basic,
}

/// Opaque configuration facts passed into the declaration builders.
#[derive(Debug, Clone, Default)]
pub struct GenerateConfig {
    pub(crate) auth_schemes: Vec<AuthScheme>,
    pub(crate) extra_headers: Vec<(String, String)>,
    pub(crate) use_records_for_objects: bool,
    pub(crate) service_name: Option<String>,
}

impl GenerateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_auth_scheme(mut self, scheme: AuthScheme) -> Self {
        self.auth_schemes.push(scheme);
        self
    }

    #[must_use]
    pub fn with_extra_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    /// Emit eligible object types (no argumented fields, no interface
    /// implementations) as plain data records instead of classes.
    #[must_use]
    pub fn with_records_for_objects(mut self, enabled: bool) -> Self {
        self.use_records_for_objects = enabled;
        self
    }

    #[must_use]
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    pub(crate) fn service_name(&self) -> &str {
        self.service_name.as_deref().unwrap_or("GraphqlService")
    }
}
