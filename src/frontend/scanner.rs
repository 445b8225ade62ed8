//! Header scanner
//!
//! Pattern-based extraction of function declarations and the callback enum
//! from raw header text. This is deliberately not a C parser: declarations
//! that do not fit the single-line `type name(params);` shape are never seen,
//! and ones that fit by accident are accepted as-is. Everything downstream
//! only depends on [`ScannedHeader`], so a real parser can replace this file.

use std::sync::OnceLock;

use regex::Regex;

use crate::frontend::identity::ApiIdentity;
use crate::utils::Span;

/// `ret name(params);` with a single-token (possibly starred) return type.
/// Parameters stay on one line; the gap before the name may span lines.
static FUNCTION_RE: OnceLock<Regex> = OnceLock::new();

fn function_re() -> &'static Regex {
    FUNCTION_RE.get_or_init(|| {
        Regex::new(r"(\S+)\s+(\S+)\((.*?)\);").expect("function pattern is valid")
    })
}

/// Type tokens that can never be a parameter name
const TYPE_KEYWORDS: &[&str] = &[
    "void", "char", "short", "int", "long", "float", "double", "bool", "signed", "unsigned",
    "int8", "uint8", "int16", "uint16", "int32", "uint32", "int64", "uint64",
];

/// Tokens that only qualify the type that follows them
const QUALIFIERS: &[&str] = &["const", "volatile", "struct", "enum", "union", "signed", "unsigned"];

/// A function declaration as matched in the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDeclaration {
    pub return_type: String,
    pub name: String,
    /// Parameter text between the parentheses, untouched
    pub params_text: String,
    pub span: Span,
}

impl RawDeclaration {
    /// Split the parameter text into typed, optionally named parameters
    pub fn params(&self) -> Vec<RawParam> {
        split_params(&self.params_text)
    }
}

/// One parameter of a raw declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawParam {
    /// Normalized type text: single spaces, `*` attached (`const char*`)
    pub native_type: String,
    pub name: Option<String>,
}

/// The `typedef enum <source>Callback { ... }` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackEnum {
    pub type_name: String,
    /// Raw text between the braces
    pub members_text: String,
    pub span: Span,
}

/// Something that matched the declaration pattern but was discarded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDeclaration {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedHeader {
    pub declarations: Vec<RawDeclaration>,
    pub callback_enum: Option<CallbackEnum>,
    /// Function-pointer typedefs and similar non-declarations
    pub skipped: Vec<SkippedDeclaration>,
}

impl ScannedHeader {
    pub fn find(&self, name: &str) -> Option<&RawDeclaration> {
        self.declarations.iter().find(|d| d.name == name)
    }
}

/// Scan header text for declarations and the callback enum of `identity`
pub fn scan_header(text: &str, identity: &ApiIdentity) -> ScannedHeader {
    let mut scanned = ScannedHeader::default();

    for caps in function_re().captures_iter(text) {
        let (Some(whole), Some(ret), Some(name), Some(params)) =
            (caps.get(0), caps.get(1), caps.get(2), caps.get(3))
        else {
            continue;
        };
        let span = Span::new(whole.start(), whole.end());

        // `int32 (*s3eCallback)(void*, void*);` and friends
        if name.as_str().starts_with('(') {
            log::debug!(
                "skipping function pointer {} at line {}",
                name.as_str(),
                span.line_in(text)
            );
            scanned.skipped.push(SkippedDeclaration { name: name.as_str().to_string(), span });
            continue;
        }

        log::debug!("scanned {} {}({})", ret.as_str(), name.as_str(), params.as_str());
        scanned.declarations.push(RawDeclaration {
            return_type: ret.as_str().to_string(),
            name: name.as_str().to_string(),
            params_text: params.as_str().to_string(),
            span,
        });
    }

    scanned.callback_enum = find_callback_enum(text, &identity.callback_enum_type());
    scanned
}

/// Find `typedef enum <type_name> { ... }` anywhere in `text`
pub fn find_callback_enum(text: &str, type_name: &str) -> Option<CallbackEnum> {
    let pattern = format!(r"(?s)typedef\s+enum\s+({})\s*\{{(.*?)\}}", regex::escape(type_name));
    let re = Regex::new(&pattern).expect("escaped enum pattern is valid");

    let caps = re.captures(text)?;
    let whole = caps.get(0)?;
    Some(CallbackEnum {
        type_name: caps.get(1)?.as_str().to_string(),
        members_text: caps.get(2)?.as_str().to_string(),
        span: Span::new(whole.start(), whole.end()),
    })
}

/// Split a parameter list into types and names.
///
/// A `*` always belongs to the type, so `char *name` and `char* name` both
/// give `char*` / `name`. Parameters without a name (`void*`, `int`,
/// `s3eMyExtCallback`) come back with `name: None`.
pub fn split_params(text: &str) -> Vec<RawParam> {
    let text = text.trim();
    if text.is_empty() || text == "void" {
        return Vec::new();
    }

    text.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(split_param)
        .collect()
}

fn split_param(param: &str) -> RawParam {
    let name_start = param
        .rfind(|c: char| c == '*' || c.is_ascii_whitespace())
        .map(|i| i + 1)
        .unwrap_or(0);
    let (prefix, candidate) = param.split_at(name_start);
    let prefix = prefix.trim();

    let unnamed = prefix.is_empty()
        || candidate.is_empty()
        || TYPE_KEYWORDS.contains(&candidate)
        || prefix.split_whitespace().all(|t| QUALIFIERS.contains(&t));

    if unnamed {
        RawParam { native_type: normalize_type(param), name: None }
    } else {
        RawParam { native_type: normalize_type(prefix), name: Some(candidate.to_string()) }
    }
}

/// Collapse whitespace and attach `*` to the preceding token
pub fn normalize_type(ty: &str) -> String {
    let mut out = ty.split_whitespace().collect::<Vec<_>>().join(" ");
    while out.contains(" *") {
        out = out.replace(" *", "*");
    }
    out
}
