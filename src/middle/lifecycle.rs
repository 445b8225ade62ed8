//! Lifecycle wiring
//!
//! Callbacks are registered from the extension's init/start function and
//! unregistered from terminate/stop, so scripts never see Register or
//! UnRegister. Placement rules:
//!
//! - register goes into `init`/`initialise`/`initialize` when a `terminate`
//!   exists to pair it with, otherwise into `start`;
//! - unregister goes into `terminate` when register went into the init
//!   family, otherwise into `stop`;
//! - a missing `start` is synthesized after the init-family function (or at
//!   the end), a missing `stop` right after the register target (or at the
//!   end).

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::frontend::scanner::{RawDeclaration, ScannedHeader};
use crate::frontend::ApiIdentity;
use crate::middle::record::{
    FunctionRecord, RecordId, RegistrationSnippet, SnippetKind, WrapperUnit,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LifecycleRole {
    Init,
    Initialise,
    Initialize,
    Start,
    Terminate,
    Stop,
}

impl LifecycleRole {
    pub const ALL: [LifecycleRole; 6] = [
        Self::Init,
        Self::Initialise,
        Self::Initialize,
        Self::Start,
        Self::Terminate,
        Self::Stop,
    ];

    /// Init-family roles in order of preference
    pub const INIT_FAMILY: [LifecycleRole; 3] = [Self::Init, Self::Initialise, Self::Initialize];

    /// Wrapper name that fills this role
    pub fn function_name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Initialise => "initialise",
            Self::Initialize => "initialize",
            Self::Start => "start",
            Self::Terminate => "terminate",
            Self::Stop => "stop",
        }
    }

    pub fn from_function_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.function_name() == name)
    }
}

/// Which record fills each lifecycle role, by id
#[derive(Debug, Clone, Default)]
pub struct LifecycleIndex {
    roles: HashMap<LifecycleRole, RecordId>,
}

impl LifecycleIndex {
    /// Built once from the translated list; a later record with the same
    /// role replaces an earlier one
    pub fn build(unit: &WrapperUnit) -> Self {
        let mut roles = HashMap::new();
        for record in &unit.functions {
            if let Some(role) = LifecycleRole::from_function_name(&record.wrapper_name) {
                if roles.insert(role, record.id).is_some() {
                    log::debug!("{} is filled twice, using the later record", role.function_name());
                }
            }
        }
        Self { roles }
    }

    pub fn get(&self, role: LifecycleRole) -> Option<RecordId> {
        self.roles.get(&role).copied()
    }

    /// First init-family function present, in preference order
    pub fn init_family(&self) -> Option<(LifecycleRole, RecordId)> {
        LifecycleRole::INIT_FAMILY
            .into_iter()
            .find_map(|role| self.get(role).map(|id| (role, id)))
    }
}

/// Where a snippet ended up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub function: String,
    pub synthesized: bool,
}

impl fmt::Display for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.function)?;
        if self.synthesized {
            write!(f, " (synthesized)")?;
        }
        Ok(())
    }
}

/// Decisions made while wiring, for logs and the report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WiringOutcome {
    pub register: Option<Attachment>,
    pub unregister: Option<Attachment>,
    /// Reasons callback wiring was partly or wholly skipped
    pub warnings: Vec<String>,
}

/// Build the registration snippet for `decl`, if callbacks can be wired
/// through it.
fn build_snippet(
    kind: SnippetKind,
    decl: Option<&RawDeclaration>,
    enum_type: &str,
    unit: &WrapperUnit,
    warnings: &mut Vec<String>,
) -> Option<RegistrationSnippet> {
    let decl = decl?;

    let first_type = decl.params().into_iter().next().map(|p| p.native_type);
    if first_type.as_deref() != Some(enum_type) {
        warnings.push(format!(
            "{} does not take {} as its first parameter; callbacks not wired",
            decl.name, enum_type
        ));
        return None;
    }

    if unit.callbacks.is_empty() {
        warnings.push(format!(
            "{} found but {} has no callbacks; nothing to wire",
            decl.name, enum_type
        ));
        return None;
    }

    Some(RegistrationSnippet::new(kind, &decl.name, &unit.callbacks))
}

fn attach(
    unit: &mut WrapperUnit,
    id: RecordId,
    snippet: RegistrationSnippet,
) -> Option<Attachment> {
    let record = unit.get_mut(id)?;
    record.registration = Some(snippet);
    Some(Attachment {
        function: record.wrapper_name.clone(),
        synthesized: record.is_synthesized(),
    })
}

/// Weave callback registration into the lifecycle functions of `unit`
pub fn wire_lifecycle(
    unit: &mut WrapperUnit,
    scanned: &ScannedHeader,
    identity: &ApiIdentity,
) -> WiringOutcome {
    let mut outcome = WiringOutcome::default();
    let enum_type = identity.callback_enum_type();

    let register_decl = scanned.find(&identity.register_name());
    let unregister_decl = scanned.find(&identity.unregister_name());

    if scanned.callback_enum.is_none() {
        if register_decl.is_some() || unregister_decl.is_some() {
            outcome.warnings.push(format!("no {} enum found; callbacks not wired", enum_type));
        }
        log::debug!("no callback enum {}", enum_type);
    } else if register_decl.is_none() {
        outcome.warnings.push(format!(
            "{} declared but {} not found; callbacks not registered",
            enum_type,
            identity.register_name()
        ));
    }

    let register = build_snippet(
        SnippetKind::Register,
        register_decl,
        &enum_type,
        unit,
        &mut outcome.warnings,
    );
    let unregister = build_snippet(
        SnippetKind::Unregister,
        unregister_decl,
        &enum_type,
        unit,
        &mut outcome.warnings,
    );

    let index = LifecycleIndex::build(unit);
    let init = index.init_family();
    let terminate = index.get(LifecycleRole::Terminate);
    let mut uses_init_family = false;
    let mut register_target = None;

    if let Some(snippet) = register {
        uses_init_family = init.is_some() && terminate.is_some();
        if init.is_some() && !uses_init_family {
            log::debug!("init-family function without terminate; registering in start instead");
        }

        let start = || FunctionRecord::synthesized(LifecycleRole::Start.function_name());
        let target = match (init, index.get(LifecycleRole::Start)) {
            (Some((_, id)), _) if uses_init_family => id,
            (_, Some(existing)) => existing,
            (Some((_, init_id)), None) => unit.insert_after(init_id, start()),
            (None, None) => unit.push(start()),
        };

        register_target = Some(target);
        outcome.register = attach(unit, target, snippet);
        if let Some(a) = &outcome.register {
            log::info!("registering callbacks in {}", a);
        }
    }

    if let Some(snippet) = unregister {
        let target = match (terminate, index.get(LifecycleRole::Stop)) {
            (Some(id), _) if uses_init_family => id,
            (_, Some(stop)) => stop,
            _ => {
                let stop = FunctionRecord::synthesized(LifecycleRole::Stop.function_name());
                match register_target {
                    Some(anchor) => unit.insert_after(anchor, stop),
                    None => unit.push(stop),
                }
            }
        };

        outcome.unregister = attach(unit, target, snippet);
        if let Some(a) = &outcome.unregister {
            log::info!("unregistering callbacks in {}", a);
        }
    }

    for warning in &outcome.warnings {
        log::warn!("{}", warning);
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::frontend::{resolve_callbacks, scan_header};
    use crate::middle::translate::SignatureTranslator;
    use pretty_assertions::assert_eq;

    const ENUM: &str = "
typedef enum s3eMyExtCallback
{
    S3E_MYEXT_CALLBACK_FOO = 0,
    S3E_MYEXT_CALLBACK_MAX
} s3eMyExtCallback;
";

    const REGISTER: &str = "
s3eResult s3eMyExtRegister(s3eMyExtCallback cbid, s3eCallback fn, void* userData);
s3eResult s3eMyExtUnRegister(s3eMyExtCallback cbid, s3eCallback fn);
";

    fn wire(functions: &str) -> (WrapperUnit, WiringOutcome) {
        wire_text(&format!("{}{}{}", ENUM, functions, REGISTER))
    }

    fn wire_text(text: &str) -> (WrapperUnit, WiringOutcome) {
        let identity = ApiIdentity::new("s3eMyExt", &Config::default()).unwrap();
        let scanned = scan_header(text, &identity);
        let callbacks = scanned
            .callback_enum
            .as_ref()
            .map(|e| resolve_callbacks(&e.members_text, &identity))
            .unwrap_or_default();
        let mut unit = SignatureTranslator::new(&identity).translate_all(&scanned, callbacks);
        let outcome = wire_lifecycle(&mut unit, &scanned, &identity);
        (unit, outcome)
    }

    fn find<'a>(unit: &'a WrapperUnit, name: &str) -> Option<&'a FunctionRecord> {
        unit.functions.iter().find(|f| f.wrapper_name == name)
    }

    fn snippet_kind(unit: &WrapperUnit, name: &str) -> Option<SnippetKind> {
        find(unit, name)?.registration.as_ref().map(|s| s.kind)
    }

    #[test]
    fn test_init_and_terminate_preferred() {
        let (unit, outcome) = wire(
            "
s3eResult s3eMyExtInit();
void s3eMyExtTerminate();
s3eResult s3eMyExtStart();
void s3eMyExtStop();
",
        );
        assert_eq!(unit.wrapper_names(), vec!["init", "terminate", "start", "stop"]);
        assert_eq!(snippet_kind(&unit, "init"), Some(SnippetKind::Register));
        assert_eq!(snippet_kind(&unit, "terminate"), Some(SnippetKind::Unregister));
        assert_eq!(snippet_kind(&unit, "start"), None);
        assert_eq!(snippet_kind(&unit, "stop"), None);
        assert!(!outcome.register.unwrap().synthesized);
    }

    #[test]
    fn test_initialise_spelling() {
        let (unit, _) = wire("s3eResult s3eMyExtInitialise();\nvoid s3eMyExtTerminate();\n");
        assert_eq!(snippet_kind(&unit, "initialise"), Some(SnippetKind::Register));
        assert_eq!(snippet_kind(&unit, "terminate"), Some(SnippetKind::Unregister));
    }

    #[test]
    fn test_initialize_spelling() {
        let (unit, outcome) =
            wire("s3eResult s3eMyExtInitialize();\nvoid s3eMyExtTerminate();\n");
        assert_eq!(unit.wrapper_names(), vec!["initialize", "terminate"]);
        assert_eq!(snippet_kind(&unit, "initialize"), Some(SnippetKind::Register));
        assert_eq!(snippet_kind(&unit, "terminate"), Some(SnippetKind::Unregister));
        assert_eq!(outcome.register.unwrap().function, "initialize");
    }

    #[test]
    fn test_init_preferred_over_other_spellings() {
        let (unit, _) = wire(
            "
s3eResult s3eMyExtInitialise();
s3eResult s3eMyExtInit();
void s3eMyExtTerminate();
",
        );
        assert_eq!(snippet_kind(&unit, "init"), Some(SnippetKind::Register));
        assert_eq!(snippet_kind(&unit, "initialise"), None);
        assert_eq!(snippet_kind(&unit, "terminate"), Some(SnippetKind::Unregister));
    }

    #[test]
    fn test_later_record_fills_a_shared_role() {
        let (unit, _) = wire("void s3eMyExtStart();\nvoid Start();\n");
        assert_eq!(unit.wrapper_names(), vec!["start", "start", "stop"]);
        assert!(unit.functions[0].registration.is_none());
        assert_eq!(unit.functions[1].native_name.as_deref(), Some("Start"));
        assert_eq!(
            unit.functions[1].registration.as_ref().map(|s| s.kind),
            Some(SnippetKind::Register)
        );
    }

    #[test]
    fn test_start_only_synthesizes_stop_after_it() {
        let (unit, outcome) = wire(
            "
s3eResult s3eMyExtStart();
s3eBool s3eMyExtAvailable();
",
        );
        assert_eq!(unit.wrapper_names(), vec!["start", "stop", "isAvailable"]);
        assert_eq!(snippet_kind(&unit, "start"), Some(SnippetKind::Register));
        assert_eq!(snippet_kind(&unit, "stop"), Some(SnippetKind::Unregister));
        assert!(find(&unit, "stop").unwrap().is_synthesized());
        assert_eq!(
            outcome.unregister,
            Some(Attachment { function: "stop".to_string(), synthesized: true })
        );
    }

    #[test]
    fn test_nothing_present_appends_start_then_stop() {
        let (unit, _) = wire("s3eBool s3eMyExtAvailable();\nint32 s3eMyExtGetCount();\n");
        assert_eq!(unit.wrapper_names(), vec!["isAvailable", "getCount", "start", "stop"]);
        assert!(find(&unit, "start").unwrap().is_synthesized());
        assert_eq!(snippet_kind(&unit, "start"), Some(SnippetKind::Register));
        assert_eq!(snippet_kind(&unit, "stop"), Some(SnippetKind::Unregister));
    }

    #[test]
    fn test_init_without_terminate_gets_start_after_it() {
        let (unit, _) = wire(
            "
s3eResult s3eMyExtInit();
s3eBool s3eMyExtAvailable();
",
        );
        assert_eq!(unit.wrapper_names(), vec!["init", "start", "stop", "isAvailable"]);
        assert_eq!(snippet_kind(&unit, "init"), None);
        assert_eq!(snippet_kind(&unit, "start"), Some(SnippetKind::Register));
        assert_eq!(snippet_kind(&unit, "stop"), Some(SnippetKind::Unregister));
    }

    #[test]
    fn test_first_record_can_be_a_lifecycle_target() {
        let (unit, _) = wire("s3eResult s3eMyExtInit();\ns3eResult s3eMyExtTerminate();\n");
        assert_eq!(unit.wrapper_names(), vec!["init", "terminate"]);
        assert_eq!(snippet_kind(&unit, "init"), Some(SnippetKind::Register));
    }

    #[test]
    fn test_existing_stop_used() {
        let (unit, _) = wire("void s3eMyExtStop();\ns3eResult s3eMyExtStart();\n");
        assert_eq!(unit.wrapper_names(), vec!["stop", "start"]);
        assert_eq!(snippet_kind(&unit, "stop"), Some(SnippetKind::Unregister));
    }

    #[test]
    fn test_register_and_unregister_never_emitted() {
        let (unit, _) = wire("s3eResult s3eMyExtStart();\n");
        assert!(find(&unit, "register").is_none());
        assert!(find(&unit, "unRegister").is_none());
        assert!(unit.functions.iter().all(|f| {
            f.native_name.as_deref() != Some("s3eMyExtRegister")
                && f.native_name.as_deref() != Some("s3eMyExtUnRegister")
        }));
    }

    #[test]
    fn test_no_enum_skips_wiring() {
        let (unit, outcome) = wire_text(&format!("s3eResult s3eMyExtStart();\n{}", REGISTER));
        assert_eq!(unit.wrapper_names(), vec!["start"]);
        assert!(unit.functions[0].registration.is_none());
        assert!(outcome.register.is_none());
        assert_eq!(outcome.warnings.len(), 3);
    }

    #[test]
    fn test_first_param_mismatch_skips_wiring() {
        let text = format!(
            "{}{}{}",
            ENUM,
            "s3eResult s3eMyExtStart();\n",
            "s3eResult s3eMyExtRegister(int32 cbid, s3eCallback fn);\n"
        );
        let (unit, outcome) = wire_text(&text);
        assert_eq!(unit.wrapper_names(), vec!["start"]);
        assert!(outcome.register.is_none());
        assert!(outcome.warnings[0].contains("s3eMyExtRegister"));
    }

    #[test]
    fn test_header_without_callbacks_is_quiet() {
        let (unit, outcome) = wire_text("s3eResult s3eMyExtStart();\n");
        assert_eq!(unit.wrapper_names(), vec!["start"]);
        assert_eq!(outcome, WiringOutcome::default());
    }

    #[test]
    fn test_attachment_display() {
        let existing = Attachment { function: "start".to_string(), synthesized: false };
        let synthesized = Attachment { function: "stop".to_string(), synthesized: true };
        assert_eq!(existing.to_string(), "start");
        assert_eq!(synthesized.to_string(), "stop (synthesized)");
    }

    #[test]
    fn test_roles_are_case_sensitive() {
        let index = LifecycleIndex::build(&{
            let mut unit = WrapperUnit::new(Vec::new());
            unit.push(FunctionRecord::synthesized("Start"));
            unit
        });
        assert_eq!(index.get(LifecycleRole::Start), None);
        assert_eq!(LifecycleRole::from_function_name("terminate"), Some(LifecycleRole::Terminate));
    }
}
