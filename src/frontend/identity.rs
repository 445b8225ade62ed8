//! API naming
//!
//! Every name the generator emits is derived from the native module name
//! (`s3eMyExt`): the wrapper namespace (`myExt`), the output file prefix
//! (`QMyExt`), the callback enum type and the Register/UnRegister entry
//! points.

use serde::Serialize;

use crate::config::Config;
use crate::utils::{Error, Result};

/// Names of the native API and the wrapper generated for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiIdentity {
    /// Verbatim native prefix, e.g. `s3eMyExt`
    pub source_api_name: String,
    /// Wrapper namespace, e.g. `myExt`
    pub wrapper_api_name: String,
    /// Output file stem, e.g. `QMyExt`
    pub wrapper_file_prefix: String,
    /// Generic prefix shared by all native modules, e.g. `s3e`
    pub generic_prefix: String,
}

impl ApiIdentity {
    pub fn new(source_api_name: &str, config: &Config) -> Result<Self> {
        let mut wrapper = source_api_name
            .strip_prefix(config.generic_prefix.as_str())
            .unwrap_or(source_api_name)
            .to_string();

        if !config.platform_prefix.is_empty() {
            if let Some(rest) = wrapper.strip_prefix(config.platform_prefix.as_str()) {
                wrapper = format!("{}{}", config.platform_prefix.to_lowercase(), rest);
            }
        }

        if wrapper.is_empty() {
            return Err(Error::InvalidApiName { name: source_api_name.to_string() });
        }

        let wrapper_api_name = lower_first(&wrapper);
        let wrapper_file_prefix =
            format!("{}{}", config.file_marker, upper_first(&wrapper_api_name));

        Ok(Self {
            source_api_name: source_api_name.to_string(),
            wrapper_api_name,
            wrapper_file_prefix,
            generic_prefix: config.generic_prefix.clone(),
        })
    }

    /// `<source>Callback`, the type name of the callback enum
    pub fn callback_enum_type(&self) -> String {
        format!("{}Callback", self.source_api_name)
    }

    /// Native name of the callback registration function
    pub fn register_name(&self) -> String {
        format!("{}Register", self.source_api_name)
    }

    /// Native name of the callback unregistration function
    pub fn unregister_name(&self) -> String {
        format!("{}UnRegister", self.source_api_name)
    }

    /// Upper-cased file prefix used in include guards
    pub fn guard_name(&self) -> String {
        self.wrapper_file_prefix.to_uppercase()
    }
}

/// Lower-case the first character, keep the rest
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Upper-case the first character, keep the rest
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn identity(name: &str) -> ApiIdentity {
        ApiIdentity::new(name, &Config::default()).unwrap()
    }

    #[test]
    fn test_generic_prefix_stripped() {
        let id = identity("s3eMyExt");
        assert_eq!(id.wrapper_api_name, "myExt");
        assert_eq!(id.wrapper_file_prefix, "QMyExt");
        assert_eq!(id.guard_name(), "QMYEXT");
    }

    #[test]
    fn test_platform_prefix_lowercased() {
        let id = identity("s3eIOSGameCenter");
        assert_eq!(id.wrapper_api_name, "iosGameCenter");
        assert_eq!(id.wrapper_file_prefix, "QIosGameCenter");
    }

    #[test]
    fn test_name_without_generic_prefix() {
        let id = identity("GameCircle");
        assert_eq!(id.wrapper_api_name, "gameCircle");
        assert_eq!(id.wrapper_file_prefix, "QGameCircle");
    }

    #[test]
    fn test_entry_point_names() {
        let id = identity("s3eMyExt");
        assert_eq!(id.callback_enum_type(), "s3eMyExtCallback");
        assert_eq!(id.register_name(), "s3eMyExtRegister");
        assert_eq!(id.unregister_name(), "s3eMyExtUnRegister");
    }

    #[test]
    fn test_bare_prefix_is_rejected() {
        let result = ApiIdentity::new("s3e", &Config::default());
        assert!(matches!(result, Err(Error::InvalidApiName { .. })));
    }

    #[test]
    fn test_case_helpers() {
        assert_eq!(lower_first("Available"), "available");
        assert_eq!(upper_first("foo"), "Foo");
        assert_eq!(upper_first(""), "");
    }
}
