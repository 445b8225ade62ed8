//! Ordered substring strip rules used to normalize callback constant names
//!
//! Rules run in declaration order over an already lower-cased name. Each rule
//! removes every occurrence of its needle. Order matters: once the generic
//! prefix is gone the full source name can no longer match, which is why the
//! wrapper name rule follows it.

use crate::frontend::identity::ApiIdentity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripRule {
    needle: String,
}

impl StripRule {
    pub fn new(needle: &str) -> Self {
        Self { needle: needle.to_lowercase() }
    }

    pub fn apply(&self, name: &str) -> String {
        if self.needle.is_empty() {
            return name.to_string();
        }
        name.replace(&self.needle, "")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripRules {
    rules: Vec<StripRule>,
}

impl StripRules {
    /// Generic prefix, source name, wrapper name, then the word `callback`
    pub fn for_callbacks(identity: &ApiIdentity) -> Self {
        Self {
            rules: vec![
                StripRule::new(&identity.generic_prefix),
                StripRule::new(&identity.source_api_name),
                StripRule::new(&identity.wrapper_api_name),
                StripRule::new("callback"),
            ],
        }
    }

    /// Lower-case `name` and run every rule over it
    pub fn apply(&self, name: &str) -> String {
        self.rules
            .iter()
            .fold(name.to_lowercase(), |acc, rule| rule.apply(&acc))
    }
}
