//! Native to wrapper type rules
//!
//! One table drives both return and parameter translation. A rule yields the
//! wrapper type, how the native call result is turned into the wrapper
//! result, and an optional note for the generated code when the mapping is
//! lossy or a guess.

use serde::Serialize;

/// Native boolean type, returned as `bool` through a cast
pub const BOOL_TYPE: &str = "s3eBool";
/// Native result-code type (0 = success)
pub const RESULT_TYPE: &str = "s3eResult";
pub const RESULT_SUCCESS: &str = "S3E_RESULT_SUCCESS";
pub const RESULT_ERROR: &str = "S3E_RESULT_ERROR";
/// What enums and callback pointers become on the wrapper side
pub const STRING_TYPE: &str = "const char*";
pub const CALLBACK_FN_SUFFIX: &str = "CallbackFn";

const WIDE_INT_TYPES: &[&str] = &["int64", "uint64"];

/// Severity tag printed in front of a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoteKind {
    Fixme,
    Warning,
    Todo,
}

impl NoteKind {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Fixme => "FIXME",
            Self::Warning => "WARNING",
            Self::Todo => "TODO",
        }
    }
}

/// A diagnostic emitted verbatim as comments into the generated body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub kind: NoteKind,
    pub lines: Vec<String>,
}

impl Note {
    pub fn new(kind: NoteKind, lines: &[String]) -> Self {
        Self { kind, lines: lines.to_vec() }
    }

    /// One `//` comment per line, the first one tagged
    pub fn comment_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                if i == 0 {
                    format!("//{}: {}", self.kind.tag(), line)
                } else {
                    format!("//{}", line)
                }
            })
            .collect()
    }

    /// All lines joined, for reports
    pub fn message(&self) -> String {
        self.lines.join(" ")
    }
}

/// How the native call's result becomes the wrapper's return value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReturnTransform {
    /// `void`: call without `return`
    Discard,
    /// `return native(...);`
    Forward,
    /// `return (bool)native(...);`
    CastBool,
    /// `return native(...) == S3E_RESULT_SUCCESS ? true : false;`
    ResultCode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnMapping {
    pub wrapper_type: String,
    pub transform: ReturnTransform,
    pub note: Option<Note>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamMapping {
    pub wrapper_type: String,
    pub note: Option<Note>,
}

/// The rule table, specialised for one native API prefix
#[derive(Debug, Clone)]
pub struct TypeRules {
    source_api_name: String,
}

impl TypeRules {
    pub fn new(source_api_name: &str) -> Self {
        Self { source_api_name: source_api_name.to_string() }
    }

    fn is_api_type(&self, ty: &str) -> bool {
        ty.starts_with(&self.source_api_name)
    }

    pub fn map_return(&self, native: &str) -> ReturnMapping {
        let passthrough = |transform, note| ReturnMapping {
            wrapper_type: native.to_string(),
            transform,
            note,
        };

        if native == "void" {
            return passthrough(ReturnTransform::Discard, None);
        }

        if self.is_api_type(native) {
            if native.ends_with('*') {
                return passthrough(
                    ReturnTransform::Forward,
                    note(
                        NoteKind::Fixme,
                        format!(
                            "Returns {}, which looks like a struct pointer or similar.",
                            native
                        ),
                        &["Consider custom Lua code that turns the struct into a table."],
                    ),
                );
            }
            return ReturnMapping {
                wrapper_type: STRING_TYPE.to_string(),
                transform: ReturnTransform::Forward,
                note: note(
                    NoteKind::Fixme,
                    format!("Returning a string instead of {}, assumed to be an enum.", native),
                    &["The enum value needs converting to a string."],
                ),
            };
        }

        match native {
            BOOL_TYPE => ReturnMapping {
                wrapper_type: "bool".to_string(),
                transform: ReturnTransform::CastBool,
                note: None,
            },
            RESULT_TYPE => ReturnMapping {
                wrapper_type: "bool".to_string(),
                transform: ReturnTransform::ResultCode,
                note: None,
            },
            _ if WIDE_INT_TYPES.contains(&native) => passthrough(
                ReturnTransform::Forward,
                Some(wide_int_note(&format!("Returning a {}", native))),
            ),
            _ => passthrough(ReturnTransform::Forward, None),
        }
    }

    pub fn map_param(&self, native: &str, name: &str) -> ParamMapping {
        let passthrough = |note| ParamMapping { wrapper_type: native.to_string(), note };

        if native.ends_with(CALLBACK_FN_SUFFIX) {
            return ParamMapping {
                wrapper_type: STRING_TYPE.to_string(),
                note: note(
                    NoteKind::Fixme,
                    format!("Looks like '{}' is a callback function pointer.", name),
                    &["Consider an event registered in the init/start function instead."],
                ),
            };
        }

        if self.is_api_type(native) {
            if native.ends_with('*') {
                return passthrough(note(
                    NoteKind::Fixme,
                    format!("Looks like '{}' is a callback or struct pointer.", name),
                    &[
                        "Consider an event registered in the init/start function instead,",
                        "or custom Lua code that turns a table into the struct.",
                    ],
                ));
            }
            return ParamMapping {
                wrapper_type: STRING_TYPE.to_string(),
                note: note(
                    NoteKind::Fixme,
                    format!(
                        "'{}' takes a string instead of {}, assumed to be an enum.",
                        name, native
                    ),
                    &["The string needs converting to the enum value."],
                ),
            };
        }

        match native {
            BOOL_TYPE => ParamMapping { wrapper_type: "bool".to_string(), note: None },
            RESULT_TYPE => ParamMapping {
                wrapper_type: "bool".to_string(),
                note: note(
                    NoteKind::Todo,
                    format!(
                        "'{}' is a bool but the native call expects {} (0 = success).",
                        name, RESULT_TYPE
                    ),
                    &["It is passed through unconverted; negate it by hand."],
                ),
            },
            _ if WIDE_INT_TYPES.contains(&native) => {
                passthrough(Some(wide_int_note(&format!("Param {} uses {}", name, native))))
            }
            _ => passthrough(None),
        }
    }
}

/// A note whose first line is formatted and the rest fixed
fn note(kind: NoteKind, first: String, rest: &[&str]) -> Option<Note> {
    let lines: Vec<String> = std::iter::once(first)
        .chain(rest.iter().map(|line| line.to_string()))
        .collect();
    Some(Note::new(kind, &lines))
}

fn wide_int_note(subject: &str) -> Note {
    Note::new(
        NoteKind::Warning,
        &[
            format!("{} - this may have issues if the value is outside", subject),
            "the range Lua can represent. Lua numbers are doubles, which lose".to_string(),
            "precision well before the int64 limits.".to_string(),
        ],
    )
}
