//! `idl_translator` drives external IDL compilers (the JDK's `idlj` or JacORB's parser)
//! from a declarative build description. It synthesizes each compiler's command line,
//! finds the compiler inside the installed Java runtime, runs it, captures what it
//! prints and decides whether the run succeeded.
//!
//! ## Features
//! - Argument synthesis for idlj (include paths, package prefixes, defines,
//!   stub/skeleton modes, compatibility mode) and for JacORB.
//! - Vendor-aware compiler lookup (Sun or IBM idlj) with a fallback to the JDK tools archive.
//! - Output capture and failure detection that also catches compilers exiting 0 on bad arguments.
//! - Dry runs that print the planned compiler invocations as JSON.
//!
//! ## Usage (CLI)
//! ```bash
//! idl_translator --description idl.toml [--compiler jacorb] [--debug] [--dry-run]
//! ```

pub mod app_config;
pub mod description;
pub mod loader;
pub mod runtime;
pub mod translator;
pub mod utils;

use std::path::{Path, PathBuf};

use serde::Serialize;

use app_config::AppConfig;
use description::BuildDescription;
use loader::jvm::JvmClassLoader;
use loader::LoadError;
use runtime::JvmRuntime;
use translator::{create_translator, CompilationRequest, CompilerFamily, CompilerTranslator, TranslatorSettings};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to render dry-run plan: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid build description: {0}")]
    Description(String),
    #[error("Java runtime probe failed: {0}")]
    Probe(String),
    #[error("IDL compiler not available: {class_name}")]
    CompilerUnavailable {
        class_name: String,
        #[source]
        source: LoadError,
    },
    #[error("Compiler {0} has no main method")]
    EntryPointMissing(String),
    #[error("{message}")]
    CompilationFailed {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// One compiler run as it would be performed, reported by dry runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedInvocation {
    pub compiler: String,
    pub idl_file: String,
    pub arguments: Vec<String>,
}

fn absolute(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn for_each_request<F>(
    description: &BuildDescription,
    working_dir: &Path,
    mut f: F,
) -> Result<usize, Error>
where
    F: FnMut(&CompilationRequest<'_>) -> Result<(), Error>,
{
    let source_directory = absolute(working_dir, &description.source_directory);
    let target_directory = absolute(working_dir, &description.target_directory);
    let include_dirs: Vec<PathBuf> = description
        .include_dirs
        .iter()
        .map(|dir| absolute(working_dir, dir))
        .collect();

    let mut count = 0;
    for (source, files) in description.compilation_units(&source_directory)? {
        for idl_file in files {
            let request = CompilationRequest {
                source_directory: &source_directory,
                include_dirs: &include_dirs,
                target_directory: &target_directory,
                idl_file,
                source,
            };
            f(&request)?;
            count += 1;
        }
    }
    Ok(count)
}

/// Compiles every IDL file the description covers, stopping at the first failure.
///
/// Returns the number of files compiled.
pub fn compile_all(
    description: &BuildDescription,
    translator: &mut dyn CompilerTranslator,
    working_dir: &Path,
) -> Result<usize, Error> {
    utils::file_system::ensure_dir_exists(&absolute(working_dir, &description.target_directory))?;
    for_each_request(description, working_dir, |request| {
        log::info!("Compiling {}", request.idl_file.display());
        translator.compile(request)
    })
}

/// Synthesizes the argument vectors for every IDL file without running anything.
pub fn plan_all(
    description: &BuildDescription,
    translator: &dyn CompilerTranslator,
    working_dir: &Path,
) -> Result<Vec<PlannedInvocation>, Error> {
    let mut planned = Vec::new();
    for_each_request(description, working_dir, |request| {
        planned.push(PlannedInvocation {
            compiler: translator.family().to_string(),
            idl_file: request.idl_file.to_string_lossy().into_owned(),
            arguments: translator.arguments(request)?,
        });
        Ok(())
    })?;
    Ok(planned)
}

pub fn run() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init().ok();

    let config = AppConfig::new();
    log::debug!("Using configuration: {:?}", config);

    let description = BuildDescription::load(&config.description)?;
    let family = CompilerFamily::select(config.compiler.as_deref().or(description.compiler.as_deref()))?;

    let mut overrides = description.runtime.clone();
    if config.java_home.is_some() {
        overrides.java_home = config.java_home.clone();
    }
    let runtime = JvmRuntime::probe(&overrides)?;
    log::info!(
        "Using {} compiler on {} {} (specification {})",
        family, runtime.vendor, runtime.vm_name, runtime.specification_version
    );

    let working_dir = std::env::current_dir()?;
    let settings = TranslatorSettings {
        fail_on_error: config.fail_on_error.unwrap_or(description.fail_on_error),
        debug: config.debug || description.debug,
        working_dir: working_dir.clone(),
        runtime: runtime.clone(),
    };
    let loader = JvmClassLoader::new(runtime, description.classpath.clone(), working_dir.clone());
    let mut translator = create_translator(family, Box::new(loader), settings);

    if config.dry_run {
        let planned = plan_all(&description, translator.as_ref(), &working_dir)?;
        let json = serde_json::to_string_pretty(&planned)?;
        println!("{}", json);
        return Ok(());
    }

    let compiled = compile_all(&description, translator.as_mut(), &working_dir)?;
    log::info!(
        "IDL compilation finished: {} file(s) compiled into {:?}",
        compiled, description.target_directory
    );
    Ok(())
}
