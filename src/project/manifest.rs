//! Build manifest for the generated wrapper

use crate::frontend::ApiIdentity;

/// `.mkf` project pulling in the native extension and the two wrapper files
pub fn render_manifest(identity: &ApiIdentity) -> String {
    format!(
        "# Simple project to include extension and quick wrapper files\n\
         \n\
         subprojects\n\
         {{\n\
         \x20   {source}\n\
         }}\n\
         \n\
         files\n\
         {{\n\
         \x20   {prefix}.h\n\
         \x20   {prefix}.cpp\n\
         }}\n",
        source = identity.source_api_name,
        prefix = identity.wrapper_file_prefix,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_manifest() {
        let identity = ApiIdentity::new("s3eMyExt", &Config::default()).unwrap();
        assert_eq!(
            render_manifest(&identity),
            "# Simple project to include extension and quick wrapper files\n\
             \n\
             subprojects\n\
             {\n\
             \x20   s3eMyExt\n\
             }\n\
             \n\
             files\n\
             {\n\
             \x20   QMyExt.h\n\
             \x20   QMyExt.cpp\n\
             }\n"
        );
    }
}
