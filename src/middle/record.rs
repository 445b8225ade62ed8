//! Wrapper function records
//!
//! The ordered list of functions the wrapper will expose. Records are
//! addressed by [`RecordId`], which stays valid when lifecycle wiring inserts
//! new records; list positions are only looked up at insertion and render
//! time.

use serde::Serialize;

use crate::frontend::CallbackEntry;
use crate::types::{Note, ReturnTransform};
use crate::utils::Span;

/// Stable handle of a record inside a [`WrapperUnit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RecordId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterSpec {
    pub native_type: String,
    pub wrapper_type: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SnippetKind {
    Register,
    Unregister,
}

/// Generated block of Register/UnRegister calls, one per callback
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationSnippet {
    pub kind: SnippetKind,
    /// Native Register/UnRegister function being called
    pub native_name: String,
    pub calls: Vec<String>,
}

impl RegistrationSnippet {
    pub fn new(kind: SnippetKind, native_name: &str, callbacks: &[CallbackEntry]) -> Self {
        let calls = callbacks
            .iter()
            .map(|cb| match kind {
                SnippetKind::Register => format!(
                    "{}({}, {}, NULL);",
                    native_name,
                    cb.raw_constant_name,
                    cb.trampoline_name()
                ),
                SnippetKind::Unregister => {
                    format!("{}({}, {});", native_name, cb.raw_constant_name, cb.trampoline_name())
                }
            })
            .collect();

        Self { kind, native_name: native_name.to_string(), calls }
    }

    /// Comment line followed by the calls
    pub fn lines(&self) -> Vec<String> {
        let header = match self.kind {
            SnippetKind::Register => "//Register all callbacks here:",
            SnippetKind::Unregister => "//Un-register all callbacks here:",
        };
        std::iter::once(header.to_string())
            .chain(self.calls.iter().cloned())
            .collect()
    }
}

/// One wrapper entry point
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionRecord {
    pub id: RecordId,
    /// `None` for lifecycle functions synthesized by the generator
    pub native_name: Option<String>,
    pub wrapper_name: String,
    pub native_return_type: String,
    pub wrapper_return_type: String,
    pub return_transform: ReturnTransform,
    pub parameters: Vec<ParameterSpec>,
    pub notes: Vec<Note>,
    pub registration: Option<RegistrationSnippet>,
    /// Where the declaration was found in the header
    #[serde(skip)]
    pub span: Option<Span>,
}

impl FunctionRecord {
    /// A `void name()` record with no native call behind it
    pub fn synthesized(name: &str) -> Self {
        Self {
            id: RecordId(usize::MAX),
            native_name: None,
            wrapper_name: name.to_string(),
            native_return_type: "void".to_string(),
            wrapper_return_type: "void".to_string(),
            return_transform: ReturnTransform::Discard,
            parameters: Vec::new(),
            notes: Vec::new(),
            registration: None,
            span: None,
        }
    }

    pub fn is_synthesized(&self) -> bool {
        self.native_name.is_none()
    }

    /// `bool start(const char* name)`
    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| format!("{} {}", p.wrapper_type, p.name))
            .collect();
        format!("{} {}({})", self.wrapper_return_type, self.wrapper_name, params.join(", "))
    }

    /// `s3eMyExtStart(name)`, or `None` for synthesized records
    pub fn native_call(&self) -> Option<String> {
        let native = self.native_name.as_ref()?;
        let args: Vec<&str> = self.parameters.iter().map(|p| p.name.as_str()).collect();
        Some(format!("{}({})", native, args.join(", ")))
    }

    /// A register snippet on a result-code function: the native call becomes
    /// a guard and the wrapper returns a literal `true` afterwards
    pub fn guards_registration(&self) -> bool {
        !self.is_synthesized()
            && self.return_transform == ReturnTransform::ResultCode
            && matches!(&self.registration, Some(s) if s.kind == SnippetKind::Register)
    }
}

/// The translated wrapper: ordered records plus the callbacks they reference
#[derive(Debug, Clone, Default, Serialize)]
pub struct WrapperUnit {
    pub functions: Vec<FunctionRecord>,
    pub callbacks: Vec<CallbackEntry>,
    #[serde(skip)]
    next_id: usize,
}

impl WrapperUnit {
    pub fn new(callbacks: Vec<CallbackEntry>) -> Self {
        Self { functions: Vec::new(), callbacks, next_id: 0 }
    }

    fn assign_id(&mut self, record: &mut FunctionRecord) -> RecordId {
        let id = RecordId(self.next_id);
        self.next_id += 1;
        record.id = id;
        id
    }

    /// Append a record at the end
    pub fn push(&mut self, mut record: FunctionRecord) -> RecordId {
        let id = self.assign_id(&mut record);
        self.functions.push(record);
        id
    }

    /// Insert a record right after `anchor`; appends if `anchor` is unknown
    pub fn insert_after(&mut self, anchor: RecordId, mut record: FunctionRecord) -> RecordId {
        let id = self.assign_id(&mut record);
        match self.position(anchor) {
            Some(pos) => self.functions.insert(pos + 1, record),
            None => self.functions.push(record),
        }
        id
    }

    pub fn position(&self, id: RecordId) -> Option<usize> {
        self.functions.iter().position(|f| f.id == id)
    }

    pub fn get_mut(&mut self, id: RecordId) -> Option<&mut FunctionRecord> {
        self.functions.iter_mut().find(|f| f.id == id)
    }

    pub fn wrapper_names(&self) -> Vec<&str> {
        self.functions.iter().map(|f| f.wrapper_name.as_str()).collect()
    }
}
