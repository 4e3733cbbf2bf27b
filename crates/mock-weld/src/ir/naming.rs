//! Naming strategy for generated declarations
//!
//! Every name the mock generator emits is derived here. The strategy is a
//! plain value passed to the generator, so independent runs never share
//! naming state.
//!
//! Templates accept three placeholders:
//!
//! - `{prefix}`: the configured mock prefix
//! - `{interface}`: the interface name with its first letter upper-cased
//! - `{method}`: the method name

use serde::{Deserialize, Serialize};

/// Overridable name templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NamingTemplates {
    /// Mock struct, e.g. `MockTestClient`
    pub mock_struct: String,
    /// Per-method controller struct, e.g. `TestClientDoFunc`
    pub controller_struct: String,
    /// Per-method call record struct, e.g. `TestClientDoFuncCall`
    pub call_struct: String,
    /// Field of the mock struct holding a controller, e.g. `DoFunc`
    pub proxy_field: String,
}

impl Default for NamingTemplates {
    fn default() -> Self {
        Self {
            mock_struct: "Mock{prefix}{interface}".to_string(),
            controller_struct: "{prefix}{interface}{method}Func".to_string(),
            call_struct: "{prefix}{interface}{method}FuncCall".to_string(),
            proxy_field: "{method}Func".to_string(),
        }
    }
}

/// Partial template overrides, as read from configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NamingOverrides {
    pub mock_struct: Option<String>,
    pub controller_struct: Option<String>,
    pub call_struct: Option<String>,
    pub proxy_field: Option<String>,
}

/// Names for the declarations of one mock
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingStrategy {
    pub prefix: String,
    pub constructor_prefix: String,
    pub templates: NamingTemplates,
}

impl NamingStrategy {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    /// Set the prefix inserted after `New`/`NewStrict` in constructor names
    pub fn constructor_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.constructor_prefix = prefix.into();
        self
    }

    /// Replace the templates named in `overrides`
    pub fn with_overrides(mut self, overrides: &NamingOverrides) -> Self {
        let NamingOverrides {
            mock_struct,
            controller_struct,
            call_struct,
            proxy_field,
        } = overrides;

        if let Some(t) = mock_struct {
            self.templates.mock_struct = t.clone();
        }
        if let Some(t) = controller_struct {
            self.templates.controller_struct = t.clone();
        }
        if let Some(t) = call_struct {
            self.templates.call_struct = t.clone();
        }
        if let Some(t) = proxy_field {
            self.templates.proxy_field = t.clone();
        }
        self
    }

    fn expand(&self, template: &str, interface: &str, method: &str) -> String {
        template
            .replace("{prefix}", &self.prefix)
            .replace("{interface}", interface)
            .replace("{method}", method)
    }

    /// Mock struct name for an interface title
    pub fn mock_struct(&self, interface: &str) -> String {
        self.expand(&self.templates.mock_struct, interface, "")
    }

    pub fn controller_struct(&self, interface: &str, method: &str) -> String {
        self.expand(&self.templates.controller_struct, interface, method)
    }

    pub fn call_struct(&self, interface: &str, method: &str) -> String {
        self.expand(&self.templates.call_struct, interface, method)
    }

    pub fn proxy_field(&self, method: &str) -> String {
        self.expand(&self.templates.proxy_field, "", method)
    }

    /// Zero-returning constructor
    pub fn zero_constructor(&self, mock_struct: &str) -> String {
        format!("New{}{}", self.constructor_prefix, mock_struct)
    }

    /// Panicking constructor
    pub fn strict_constructor(&self, mock_struct: &str) -> String {
        format!("NewStrict{}{}", self.constructor_prefix, mock_struct)
    }

    /// Delegating constructor
    pub fn delegating_constructor(&self, mock_struct: &str) -> String {
        format!("New{}{}From", self.constructor_prefix, mock_struct)
    }

    /// Local copy of an unexported interface
    pub fn surrogate_interface(&self, interface: &str) -> String {
        format!("surrogateMock{}", interface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        let naming = NamingStrategy::new("Test");
        assert_eq!(naming.mock_struct("Client"), "MockTestClient");
        assert_eq!(naming.controller_struct("Client", "Do"), "TestClientDoFunc");
        assert_eq!(naming.call_struct("Client", "Do"), "TestClientDoFuncCall");
        assert_eq!(naming.proxy_field("Do"), "DoFunc");
        assert_eq!(naming.zero_constructor("MockTestClient"), "NewMockTestClient");
        assert_eq!(naming.surrogate_interface("Client"), "surrogateMockClient");
    }

    #[test]
    fn test_constructor_prefix() {
        let naming = NamingStrategy::new("").constructor_prefix("Fake");
        assert_eq!(naming.strict_constructor("MockClient"), "NewStrictFakeMockClient");
        assert_eq!(naming.delegating_constructor("MockClient"), "NewFakeMockClientFrom");
    }

    #[test]
    fn test_overrides() {
        let overrides = NamingOverrides {
            mock_struct: Some("Fake{interface}".to_string()),
            proxy_field: Some("{method}Hook".to_string()),
            ..NamingOverrides::default()
        };
        let naming = NamingStrategy::new("X").with_overrides(&overrides);
        assert_eq!(naming.mock_struct("Store"), "FakeStore");
        assert_eq!(naming.proxy_field("Get"), "GetHook");
        assert_eq!(naming.controller_struct("Store", "Get"), "XStoreGetFunc");
    }
}
