//! Quick wrapper generator
//!
//! Renders a [`WrapperUnit`] into the `Q<Api>.h` / `Q<Api>.cpp` pair read by
//! tolua: a namespace of plain functions plus one trampoline per callback
//! that forwards native callbacks as Lua events.

use crate::backend::codegen::{CodeGen, GeneratedSources};
use crate::config::Config;
use crate::frontend::{ApiIdentity, CallbackEntry};
use crate::middle::record::{FunctionRecord, WrapperUnit};
use crate::types::type_rules::{RESULT_ERROR, RESULT_SUCCESS};
use crate::types::ReturnTransform;

const SECTION_RULE: &str =
    "//------------------------------------------------------------------------------";

/// Generator for Lua "quick" wrappers
pub struct QuickCodeGen {
    identity: ApiIdentity,
    helper_namespace: String,
    helper_header: String,
    output: String,
    indent: usize,
}

impl QuickCodeGen {
    pub fn new(identity: &ApiIdentity, config: &Config) -> Self {
        Self {
            identity: identity.clone(),
            helper_namespace: config.helper_namespace.clone(),
            helper_header: config.helper_header.clone(),
            output: String::new(),
            indent: 0,
        }
    }

    /// Write indented line
    fn writeln(&mut self, line: &str) {
        if !line.is_empty() {
            for _ in 0..self.indent {
                self.output.push_str("    ");
            }
        }
        self.output.push_str(line);
        self.output.push('\n');
    }

    /// Write several lines at the current indent
    fn write_lines(&mut self, lines: &[String]) {
        for line in lines {
            self.writeln(line);
        }
    }

    /// Header body: include guard, tolua markers, one declaration per function
    pub fn generate_header(&mut self, unit: &WrapperUnit) -> String {
        self.output.clear();
        let guard = self.identity.guard_name();
        let namespace = self.identity.wrapper_api_name.clone();

        self.writeln(&format!("#ifndef __{}_H", guard));
        self.writeln(&format!("#define __{}_H", guard));
        self.writeln("");
        self.writeln("// tolua_begin");
        self.writeln("");
        self.writeln(&format!("namespace {} {{", namespace));
        self.writeln("");

        self.indent += 1;
        for func in &unit.functions {
            self.writeln(&format!("{};", func.signature()));
        }
        self.indent -= 1;

        self.writeln("");
        self.writeln(&format!("}} //namespace {}", namespace));
        self.writeln("");
        self.writeln("// tolua_end");
        self.writeln("");
        self.writeln(&format!("#endif // {}_H", guard));

        std::mem::take(&mut self.output)
    }

    /// Source body: includes, callback trampolines, function bodies
    pub fn generate_source(&mut self, unit: &WrapperUnit) -> String {
        self.output.clear();
        let namespace = self.identity.wrapper_api_name.clone();

        self.writeln(&format!("#include \"{}.h\"", self.identity.wrapper_file_prefix));
        self.writeln(&format!("#include \"{}.h\"", self.identity.source_api_name));
        self.writeln(&format!("#include \"{}\"", self.helper_header));
        self.writeln("#include \"lua.h\"");
        self.writeln("");
        self.writeln(&format!("using namespace {};", self.helper_namespace));
        self.writeln("");
        self.writeln(&format!("namespace {} {{", namespace));

        if !unit.callbacks.is_empty() {
            self.writeln("");
            self.writeln(SECTION_RULE);
            self.writeln("//C++ callbacks -> Lua events:");
            for callback in &unit.callbacks {
                self.writeln("");
                self.generate_trampoline(callback);
            }
        }

        self.writeln("");
        self.writeln(SECTION_RULE);
        self.writeln("//Functions:");
        for func in &unit.functions {
            self.writeln("");
            self.generate_function(func);
        }

        self.writeln("");
        self.writeln(&format!("}} //namespace {}", namespace));

        std::mem::take(&mut self.output)
    }

    fn generate_trampoline(&mut self, callback: &CallbackEntry) {
        self.writeln(&format!(
            "int32 {}(void* systemData, void* userData)",
            callback.trampoline_name()
        ));
        self.writeln("{");
        self.indent += 1;
        self.writeln(&format!("LUA_EVENT_PREPARE(\"{}\");", self.identity.wrapper_api_name));
        self.writeln(&format!("LUA_EVENT_SET_STRING(\"type\", \"{}\");", callback.event_type()));
        self.writeln("//LUA_EVENT_SET_BOOLEAN(\"???\", ???);");
        self.writeln("//LUA_EVENT_SET_STRING(\"???\", ???);");
        self.writeln("//LUA_EVENT_SET_INTEGER(\"???\", ???);");
        self.writeln("LUA_EVENT_SEND();");
        self.writeln("lua_pop(g_L, 1);");
        self.writeln("");
        self.writeln("return 0;");
        self.indent -= 1;
        self.writeln("}");
    }

    /// Body blocks are separated by a blank line: registration, notes, then
    /// the native call. A guarded register target checks the native result
    /// and returns a literal `true` instead of calling it again.
    fn generate_function(&mut self, func: &FunctionRecord) {
        let mut blocks: Vec<Vec<String>> = Vec::new();

        if let Some(snippet) = &func.registration {
            blocks.push(snippet.lines());
        }

        if !func.notes.is_empty() {
            blocks.push(func.notes.iter().flat_map(|n| n.comment_lines()).collect());
        }

        if let Some(call) = func.native_call() {
            if func.guards_registration() {
                blocks.push(vec![
                    format!("if({} == {})", call, RESULT_ERROR),
                    "    return false;".to_string(),
                ]);
                blocks.push(vec!["return true;".to_string()]);
            } else {
                blocks.push(vec![wrap_call(&call, func.return_transform)]);
            }
        }

        self.writeln(&func.signature());
        self.writeln("{");
        self.indent += 1;
        for (i, block) in blocks.iter().enumerate() {
            if i > 0 {
                self.writeln("");
            }
            self.write_lines(block);
        }
        self.indent -= 1;
        self.writeln("}");
    }
}

/// Turn a native call into the wrapper's return statement
fn wrap_call(call: &str, transform: ReturnTransform) -> String {
    match transform {
        ReturnTransform::Discard => format!("{};", call),
        ReturnTransform::Forward => format!("return {};", call),
        ReturnTransform::CastBool => format!("return (bool){};", call),
        ReturnTransform::ResultCode => {
            format!("return {} == {} ? true : false;", call, RESULT_SUCCESS)
        }
    }
}

impl CodeGen for QuickCodeGen {
    fn generate(&mut self, unit: &WrapperUnit) -> GeneratedSources {
        GeneratedSources {
            header: self.generate_header(unit),
            source: self.generate_source(unit),
        }
    }

    fn name(&self) -> &str {
        "quick"
    }
}
