//! Callback name resolution
//!
//! Turns the members of the `<source>Callback` enum into the PascalCase names
//! used for generated trampolines, e.g. `S3E_MYEXT_CALLBACK_FOO_BAR` under
//! `s3eMyExt` becomes `FooBar` (trampoline `FooBarCallback`).

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::frontend::identity::ApiIdentity;
use crate::frontend::strip::StripRules;

static COMMENT_RE: OnceLock<Regex> = OnceLock::new();

fn comment_re() -> &'static Regex {
    COMMENT_RE.get_or_init(|| {
        Regex::new(r"(?s)/\*.*?\*/|//[^\n]*").expect("comment pattern is valid")
    })
}

/// Suffix marking the member that counts the others
const SENTINEL_SUFFIX: &str = "MAX";

/// A callback id and the name derived from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallbackEntry {
    /// Enum member exactly as written, e.g. `S3E_MYEXT_CALLBACK_FOO`
    pub raw_constant_name: String,
    /// PascalCase name, e.g. `Foo`
    pub derived_name: String,
}

impl CallbackEntry {
    /// Name of the generated trampoline function
    pub fn trampoline_name(&self) -> String {
        format!("{}Callback", self.derived_name)
    }

    /// Value of the `type` field of the raised event
    pub fn event_type(&self) -> String {
        self.derived_name.to_lowercase()
    }
}

/// Resolve every non-sentinel member of the enum body into a callback entry
pub fn resolve_callbacks(members_text: &str, identity: &ApiIdentity) -> Vec<CallbackEntry> {
    let rules = StripRules::for_callbacks(identity);
    let members = comment_re().replace_all(members_text, "");

    let mut entries = Vec::new();
    for member in members.split(',') {
        let name = member.split('=').next().unwrap_or("").trim();
        if name.is_empty() {
            continue;
        }
        if name.ends_with(SENTINEL_SUFFIX) {
            log::debug!("dropping sentinel callback member {}", name);
            continue;
        }

        let mut derived = pascal_case(&rules.apply(name));
        if derived.is_empty() {
            log::warn!("callback member {} is empty once stripped, using it unstripped", name);
            derived = pascal_case(&name.to_lowercase());
        }

        entries.push(CallbackEntry {
            raw_constant_name: name.to_string(),
            derived_name: derived,
        });
    }
    entries
}

/// `foo_bar` -> `FooBar`; empty segments vanish, the rest keeps its case
pub fn pascal_case(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(crate::frontend::identity::upper_first)
        .collect()
}
