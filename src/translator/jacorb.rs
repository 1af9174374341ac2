//! Support for JacORB's IDL compiler.
//!
//! JacORB is never bundled with a JDK, so there is no vendor lookup and no archive
//! fallback: its jar must already be on the configured classpath.

use super::invocation::invoke_compiler;
use super::outcome::classify;
use super::{command_line, CompilationRequest, CompilerFamily, CompilerTranslator, TranslatorSettings};
use crate::loader::ClassLoaderFacade;
use crate::utils::file_system::fix_separator;
use crate::Error;

pub const JACORB_IDL_COMPILER: &str = "org.jacorb.idl.parser";

pub struct JacorbTranslator {
    loader: Box<dyn ClassLoaderFacade>,
    settings: TranslatorSettings,
}

impl JacorbTranslator {
    pub fn new(loader: Box<dyn ClassLoaderFacade>, settings: TranslatorSettings) -> Self {
        JacorbTranslator { loader, settings }
    }
}

pub fn jacorb_arguments(request: &CompilationRequest<'_>) -> Vec<String> {
    let source = request.source;
    let mut args: Vec<String> = Vec::new();

    args.push(format!("-I{}", request.source_directory.display()));
    for include_dir in request.include_dirs {
        args.push(format!("-I{}", include_dir.display()));
    }

    args.push("-d".to_string());
    args.push(fix_separator(&request.target_directory.to_string_lossy()));

    if source.emit_skeletons == Some(false) {
        args.push("-noskel".to_string());
    }
    if source.emit_stubs == Some(false) {
        args.push("-nostub".to_string());
    }

    if let Some(prefix) = &source.package_prefix {
        args.push("-i2jpackage".to_string());
        args.push(format!(":{}", prefix));
    }
    for prefix in &source.package_prefixes {
        args.push("-i2jpackage".to_string());
        args.push(format!("{}:{}.{}", prefix.type_name, prefix.prefix, prefix.type_name));
    }

    for define in &source.defines {
        match &define.value {
            Some(value) => args.push(format!("-D{}={}", define.symbol, value)),
            None => args.push(format!("-D{}", define.symbol)),
        }
    }

    if source.compatible == Some(true) {
        log::warn!("JacORB has no compatible mode, ignoring option");
    }

    args.extend(source.additional_arguments.iter().cloned());
    args.push(request.idl_file.to_string_lossy().into_owned());
    args
}

impl CompilerTranslator for JacorbTranslator {
    fn family(&self) -> CompilerFamily {
        CompilerFamily::Jacorb
    }

    fn arguments(&self, request: &CompilationRequest<'_>) -> Result<Vec<String>, Error> {
        Ok(jacorb_arguments(request))
    }

    fn compile(&mut self, request: &CompilationRequest<'_>) -> Result<(), Error> {
        let args = self.arguments(request)?;

        let compiler = self.loader.load_class(JACORB_IDL_COMPILER).map_err(|source| {
            Error::CompilerUnavailable {
                class_name: JACORB_IDL_COMPILER.to_string(),
                source,
            }
        })?;

        if self.settings.debug {
            log::info!("{}", command_line(compiler.name(), &args));
        }

        let invocation = invoke_compiler(&compiler, &args)?;
        classify(&invocation, self.settings.fail_on_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::{Define, PackagePrefix, Source};
    use pretty_assertions::assert_eq;
    use std::path::{Path, PathBuf};

    #[test]
    fn builds_jacorb_style_arguments() {
        let source = Source {
            package_prefixes: vec![PackagePrefix {
                type_name: "Bank".to_string(),
                prefix: "com.acme".to_string(),
            }],
            defines: vec![
                Define { symbol: "A".to_string(), value: None },
                Define { symbol: "B".to_string(), value: Some("2".to_string()) },
            ],
            emit_skeletons: Some(false),
            compatible: Some(true),
            ..Default::default()
        };
        let includes = vec![PathBuf::from("/inc")];
        let request = CompilationRequest {
            source_directory: Path::new("/p/idl"),
            include_dirs: &includes,
            target_directory: Path::new(r"target\idl"),
            idl_file: PathBuf::from("/p/idl/bank.idl"),
            source: &source,
        };
        assert_eq!(
            jacorb_arguments(&request),
            vec![
                "-I/p/idl",
                "-I/inc",
                "-d",
                "target/idl",
                "-noskel",
                "-i2jpackage",
                "Bank:com.acme.Bank",
                "-DA",
                "-DB=2",
                "/p/idl/bank.idl"
            ]
        );
    }

    #[test]
    fn single_prefix_is_supported() {
        let source = Source {
            package_prefix: Some("com.acme".to_string()),
            emit_stubs: Some(false),
            ..Default::default()
        };
        let request = CompilationRequest {
            source_directory: Path::new("idl"),
            include_dirs: &[],
            target_directory: Path::new("out"),
            idl_file: PathBuf::from("idl/a.idl"),
            source: &source,
        };
        let args = jacorb_arguments(&request);
        assert_eq!(&args[3..6], &["-nostub", "-i2jpackage", ":com.acme"]);
    }
}
