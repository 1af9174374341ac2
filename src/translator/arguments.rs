//! Argument synthesis for the idlj family.
//!
//! The vector is built in the order idlj parses it: include paths, target directory,
//! package prefixes, defines, the stub/skeleton mode, the compatibility flag, extra
//! arguments, and finally the IDL file.

use super::{CompilationRequest, TranslatorSettings};
use crate::utils::file_system::to_relative_and_fix_separator;
use crate::Error;

/// Picks idlj's generation mode; the first matching row wins.
pub fn stub_skeleton_flag(emit_stubs: Option<bool>, emit_skeletons: Option<bool>) -> &'static str {
    match (emit_stubs == Some(true), emit_skeletons == Some(true)) {
        (true, true) => "-fall",
        (true, false) => "-fclient",
        (false, true) => "-fserver",
        (false, false) => "-fserverTIE",
    }
}

pub fn idlj_arguments(
    request: &CompilationRequest<'_>,
    settings: &TranslatorSettings,
) -> Result<Vec<String>, Error> {
    let source = request.source;
    let mut args: Vec<String> = Vec::new();

    args.push("-i".to_string());
    args.push(request.source_directory.to_string_lossy().into_owned());
    for include_dir in request.include_dirs {
        args.push("-i".to_string());
        args.push(include_dir.to_string_lossy().into_owned());
    }

    args.push("-td".to_string());
    args.push(to_relative_and_fix_separator(
        &settings.working_dir,
        request.target_directory,
        false,
    ));

    if source.package_prefix.is_some() {
        return Err(Error::Config("idlj compiler does not support packagePrefix".to_string()));
    }
    for prefix in &source.package_prefixes {
        args.push("-pkgPrefix".to_string());
        args.push(prefix.type_name.clone());
        args.push(prefix.prefix.clone());
    }

    for define in &source.defines {
        if define.value.is_some() {
            return Err(Error::Config(format!(
                "idlj compiler unable to define symbol values (symbol {})",
                define.symbol
            )));
        }
        args.push("-d".to_string());
        args.push(define.symbol.clone());
    }

    args.push(stub_skeleton_flag(source.emit_stubs, source.emit_skeletons).to_string());

    if source.compatible == Some(true) {
        let runtime = &settings.runtime;
        log::debug!("JDK Version: {}", runtime.specification_version);
        if runtime.is_legacy_specification() {
            log::debug!("OPTION IGNORED: compatible");
        } else {
            args.push("-oldImplBase".to_string());
        }
    }

    args.extend(source.additional_arguments.iter().cloned());
    args.push(request.idl_file.to_string_lossy().into_owned());

    if settings.debug {
        args.insert(0, "-verbose".to_string());
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::{Define, PackagePrefix, Source};
    use crate::runtime::JvmRuntime;
    use pretty_assertions::assert_eq;
    use std::path::{Path, PathBuf};

    fn settings(dir: &Path, version: &str) -> TranslatorSettings {
        TranslatorSettings {
            fail_on_error: true,
            debug: false,
            working_dir: dir.to_path_buf(),
            runtime: JvmRuntime {
                vendor: "Oracle Corporation".to_string(),
                vm_name: "OpenJDK 64-Bit Server VM".to_string(),
                specification_version: version.to_string(),
                home: PathBuf::from("/opt/jdk/jre"),
            },
        }
    }

    fn synthesize(source: &Source, include_dirs: &[PathBuf], settings: &TranslatorSettings) -> Result<Vec<String>, Error> {
        let source_dir = PathBuf::from("/project/src/main/idl");
        let target = settings.working_dir.join("target/idl");
        let request = CompilationRequest {
            source_directory: &source_dir,
            include_dirs,
            target_directory: &target,
            idl_file: PathBuf::from("/project/src/main/idl/bank.idl"),
            source,
        };
        idlj_arguments(&request, settings)
    }

    #[test]
    fn minimal_request_has_fixed_shape() {
        let dir = tempfile::tempdir().unwrap();
        let args = synthesize(&Source::default(), &[], &settings(dir.path(), "1.8")).unwrap();
        assert_eq!(
            args,
            vec![
                "-i",
                "/project/src/main/idl",
                "-td",
                "target/idl",
                "-fserverTIE",
                "/project/src/main/idl/bank.idl"
            ]
        );
    }

    #[test]
    fn include_dirs_keep_their_order() {
        let dir = tempfile::tempdir().unwrap();
        let includes = vec![PathBuf::from("/inc/b"), PathBuf::from("/inc/a")];
        let args = synthesize(&Source::default(), &includes, &settings(dir.path(), "1.8")).unwrap();
        assert_eq!(
            &args[..7],
            &["-i", "/project/src/main/idl", "-i", "/inc/b", "-i", "/inc/a", "-td"]
        );
    }

    #[test]
    fn decision_table_is_exhaustive() {
        let cases = [
            (Some(true), Some(true), "-fall"),
            (Some(true), Some(false), "-fclient"),
            (Some(true), None, "-fclient"),
            (Some(false), Some(true), "-fserver"),
            (None, Some(true), "-fserver"),
            (None, None, "-fserverTIE"),
            (Some(false), Some(false), "-fserverTIE"),
            (None, Some(false), "-fserverTIE"),
        ];
        for (stubs, skeletons, flag) in cases {
            assert_eq!(stub_skeleton_flag(stubs, skeletons), flag, "{:?}/{:?}", stubs, skeletons);
        }
    }

    #[test]
    fn prefixes_and_defines_follow_target_directory() {
        let dir = tempfile::tempdir().unwrap();
        let source = Source {
            package_prefixes: vec![
                PackagePrefix { type_name: "Foo".to_string(), prefix: "com.a".to_string() },
                PackagePrefix { type_name: "Bar".to_string(), prefix: "com.b".to_string() },
            ],
            defines: vec![Define { symbol: "DEBUG".to_string(), value: None }],
            emit_stubs: Some(true),
            additional_arguments: vec!["-keep".to_string(), "-emitAll".to_string()],
            ..Default::default()
        };
        let args = synthesize(&source, &[], &settings(dir.path(), "1.8")).unwrap();
        assert_eq!(
            &args[4..],
            &[
                "-pkgPrefix", "Foo", "com.a", "-pkgPrefix", "Bar", "com.b", "-d", "DEBUG",
                "-fclient", "-keep", "-emitAll", "/project/src/main/idl/bank.idl"
            ]
        );
    }

    #[test]
    fn single_package_prefix_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let source = Source { package_prefix: Some("com.acme".to_string()), ..Default::default() };
        let err = synthesize(&source, &[], &settings(dir.path(), "1.8")).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("packagePrefix")));
    }

    #[test]
    fn define_with_value_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let source = Source {
            defines: vec![Define { symbol: "LEVEL".to_string(), value: Some("2".to_string()) }],
            ..Default::default()
        };
        assert!(matches!(
            synthesize(&source, &[], &settings(dir.path(), "1.8")),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn compatible_adds_old_impl_base_on_modern_runtimes() {
        let dir = tempfile::tempdir().unwrap();
        let source = Source { compatible: Some(true), ..Default::default() };
        let args = synthesize(&source, &[], &settings(dir.path(), "1.8")).unwrap();
        assert!(args.contains(&"-oldImplBase".to_string()));
    }

    #[test]
    fn compatible_is_ignored_on_legacy_runtimes() {
        let dir = tempfile::tempdir().unwrap();
        let source = Source { compatible: Some(true), ..Default::default() };
        let args = synthesize(&source, &[], &settings(dir.path(), "1.2")).unwrap();
        assert!(!args.contains(&"-oldImplBase".to_string()));
    }

    #[test]
    fn debug_puts_verbose_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = settings(dir.path(), "1.8");
        settings.debug = true;
        let args = synthesize(&Source::default(), &[], &settings).unwrap();
        assert_eq!(args[0], "-verbose");
        assert_eq!(args[1], "-i");
    }
}
