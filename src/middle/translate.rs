//! Signature translation
//!
//! Maps each scanned native declaration onto a wrapper [`FunctionRecord`]:
//! wrapper name, simplified types, and the notes explaining any guesses.

use crate::frontend::identity::lower_first;
use crate::frontend::scanner::{RawDeclaration, ScannedHeader};
use crate::frontend::{ApiIdentity, CallbackEntry};
use crate::middle::record::{FunctionRecord, ParameterSpec, RecordId, WrapperUnit};
use crate::types::TypeRules;

pub struct SignatureTranslator<'a> {
    identity: &'a ApiIdentity,
    rules: TypeRules,
}

impl<'a> SignatureTranslator<'a> {
    pub fn new(identity: &'a ApiIdentity) -> Self {
        Self {
            identity,
            rules: TypeRules::new(&identity.source_api_name),
        }
    }

    /// Register/UnRegister are wired into lifecycle functions, never bound
    pub fn is_excluded(&self, decl: &RawDeclaration) -> bool {
        decl.name == self.identity.register_name() || decl.name == self.identity.unregister_name()
    }

    /// Translate every bindable declaration, in header order
    pub fn translate_all(
        &self,
        scanned: &ScannedHeader,
        callbacks: Vec<CallbackEntry>,
    ) -> WrapperUnit {
        let mut unit = WrapperUnit::new(callbacks);
        for decl in &scanned.declarations {
            if self.is_excluded(decl) {
                log::debug!("holding back {} for lifecycle wiring", decl.name);
                continue;
            }
            unit.push(self.translate(decl));
        }
        unit
    }

    pub fn translate(&self, decl: &RawDeclaration) -> FunctionRecord {
        let ret = self.rules.map_return(&decl.return_type);
        let mut notes = Vec::new();
        notes.extend(ret.note);

        let mut parameters = Vec::new();
        for (i, param) in decl.params().into_iter().enumerate() {
            let name = param.name.unwrap_or_else(|| format!("arg{}", i));
            let mapped = self.rules.map_param(&param.native_type, &name);
            notes.extend(mapped.note);
            parameters.push(ParameterSpec {
                native_type: param.native_type,
                wrapper_type: mapped.wrapper_type,
                name,
            });
        }

        let wrapper_name = wrapper_function_name(&decl.name, &self.identity.source_api_name);
        log::debug!("{} -> {} ({} notes)", decl.name, wrapper_name, notes.len());

        FunctionRecord {
            id: RecordId(usize::MAX),
            native_name: Some(decl.name.clone()),
            wrapper_name,
            native_return_type: decl.return_type.clone(),
            wrapper_return_type: ret.wrapper_type,
            return_transform: ret.transform,
            parameters,
            notes,
            registration: None,
            span: Some(decl.span),
        }
    }
}

/// `s3eMyExtGetName` -> `getName`, with `available` renamed `isAvailable`
pub fn wrapper_function_name(native: &str, source_api_name: &str) -> String {
    let stripped = match native.strip_prefix(source_api_name) {
        Some(rest) if !rest.is_empty() => rest,
        _ => native,
    };
    let name = lower_first(stripped);
    if name == "available" {
        "isAvailable".to_string()
    } else {
        name
    }
}
