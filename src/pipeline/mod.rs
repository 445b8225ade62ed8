//! Header to wrapper pipeline
//!
//! scan -> resolve callbacks -> translate -> wire lifecycle -> generate.
//! Everything here works on text already in memory and never fails; file
//! handling lives in [`crate::project`].

use crate::backend::{CodeGen, QuickCodeGen};
use crate::config::Config;
use crate::feedback::GenerationReport;
use crate::frontend::{resolve_callbacks, scan_header, ApiIdentity};
use crate::middle::{wire_lifecycle, SignatureTranslator, WrapperUnit};

/// Everything produced for one header
#[derive(Debug, Clone)]
pub struct WrapperOutput {
    pub header: String,
    pub source: String,
    pub unit: WrapperUnit,
    pub report: GenerationReport,
}

/// Transform native header text into the wrapper header and source
pub fn transform(header_text: &str, identity: &ApiIdentity, config: &Config) -> WrapperOutput {
    let scanned = scan_header(header_text, identity);
    log::info!(
        "scanned {} declarations from {}",
        scanned.declarations.len(),
        identity.source_api_name
    );

    let callbacks = scanned
        .callback_enum
        .as_ref()
        .map(|e| resolve_callbacks(&e.members_text, identity))
        .unwrap_or_default();
    log::info!("resolved {} callbacks", callbacks.len());

    let mut unit = SignatureTranslator::new(identity).translate_all(&scanned, callbacks);
    let outcome = wire_lifecycle(&mut unit, &scanned, identity);
    log::debug!("wrapper functions: {}", unit.wrapper_names().join(", "));

    let mut codegen = QuickCodeGen::new(identity, config);
    let sources = codegen.generate(&unit);
    log::debug!("generated sources with the {} backend", codegen.name());

    let report = GenerationReport::build(identity, header_text, &scanned, &unit, &outcome);

    WrapperOutput {
        header: sources.header,
        source: sources.source,
        unit,
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::Severity;
    use pretty_assertions::assert_eq;

    fn identity() -> ApiIdentity {
        ApiIdentity::new("s3eMyExt", &Config::default()).unwrap()
    }

    const ROUND_TRIP: &str = "
typedef enum s3eMyExtCallback { S3E_MYEXT_CALLBACK_FOO = 0, S3E_MYEXT_CALLBACK_FOO_MAX } s3eMyExtCallback;

s3eResult s3eMyExtStart();
void s3eMyExtStop();
s3eResult s3eMyExtRegister(s3eMyExtCallback,s3eCallback,void*);
s3eResult s3eMyExtUnRegister(s3eMyExtCallback,s3eCallback);
bool s3eMyExtAvailable();
";

    #[test]
    fn test_round_trip_functions() {
        let out = transform(ROUND_TRIP, &identity(), &Config::default());
        assert_eq!(out.unit.wrapper_names(), vec!["start", "stop", "isAvailable"]);
        assert_eq!(out.unit.callbacks.len(), 1);
        assert_eq!(out.unit.callbacks[0].derived_name, "Foo");
    }

    #[test]
    fn test_round_trip_header() {
        let out = transform(ROUND_TRIP, &identity(), &Config::default());
        let declarations = "    bool start();\n    void stop();\n    bool isAvailable();\n";
        assert!(out.header.contains(declarations));
        assert!(!out.header.contains("register"));
        assert!(!out.header.contains("Register"));
    }

    #[test]
    fn test_round_trip_source() {
        let out = transform(ROUND_TRIP, &identity(), &Config::default());
        let source = &out.source;

        assert!(source.contains("int32 FooCallback(void* systemData, void* userData)"));
        assert!(source.contains("LUA_EVENT_SET_STRING(\"type\", \"foo\");"));

        assert_eq!(source.matches("s3eMyExtRegister(").count(), 1);
        let register_call = "    s3eMyExtRegister(S3E_MYEXT_CALLBACK_FOO, FooCallback, NULL);";
        assert!(source.contains(register_call));
        assert_eq!(source.matches("s3eMyExtUnRegister(").count(), 1);
        assert!(source.contains("    s3eMyExtUnRegister(S3E_MYEXT_CALLBACK_FOO, FooCallback);"));

        let start = source.find("bool start()").unwrap();
        let register = source.find("s3eMyExtRegister(S3E_MYEXT_CALLBACK_FOO").unwrap();
        let native_start = source.find("s3eMyExtStart()").unwrap();
        let stop = source.find("void stop()").unwrap();
        assert!(start < register && register < native_start && native_start < stop);
        let guard = "    if(s3eMyExtStart() == S3E_RESULT_ERROR)\n\
                     \x20       return false;\n\
                     \n\
                     \x20   return true;";
        assert!(source.contains(guard));

        let unregister = source.find("s3eMyExtUnRegister(S3E_MYEXT").unwrap();
        let native_stop = source.find("    s3eMyExtStop();").unwrap();
        assert!(stop < unregister && unregister < native_stop);

        // `bool` is not an API type, so the native result is forwarded as-is
        assert!(source.contains("bool isAvailable()\n{\n    return s3eMyExtAvailable();\n}"));
    }

    #[test]
    fn test_trampolines_precede_functions() {
        let out = transform(ROUND_TRIP, &identity(), &Config::default());
        let trampoline = out.source.find("FooCallback(void*").unwrap();
        let functions = out.source.find("//Functions:").unwrap();
        assert!(trampoline < functions);
    }

    #[test]
    fn test_header_without_enum_or_register() {
        let text = "s3eBool s3eMyExtAvailable();\nuint64 s3eMyExtGetTime();\n";
        let out = transform(text, &identity(), &Config::default());
        assert_eq!(out.unit.wrapper_names(), vec!["isAvailable", "getTime"]);
        assert!(!out.source.contains("C++ callbacks"));
        assert!(!out.source.contains("Register"));
        assert_eq!(out.report.count(Severity::Warning), 1);
        assert!(out.source.contains("//WARNING: Returning a uint64"));
    }

    #[test]
    fn test_empty_header() {
        let out = transform("", &identity(), &Config::default());
        assert!(out.unit.functions.is_empty());
        assert!(out.header.contains("namespace myExt {"));
        assert!(out.source.contains("//Functions:"));
    }
}
