//! The `translator` module turns compilation requests into invocations of an external
//! IDL compiler and reports how they went.
//!
//! Each supported compiler family has its own [`CompilerTranslator`]; the build picks
//! one with [`CompilerFamily`] and [`create_translator`] and then feeds it one request
//! per IDL file.

pub mod arguments;
pub mod idlj;
pub mod invocation;
pub mod jacorb;
pub mod outcome;
pub mod resolver;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::description::Source;
use crate::loader::ClassLoaderFacade;
use crate::runtime::JvmRuntime;
use crate::Error;

/// Everything needed to compile one IDL file. Borrowed from the build description.
#[derive(Debug, Clone)]
pub struct CompilationRequest<'a> {
    pub source_directory: &'a Path,
    pub include_dirs: &'a [PathBuf],
    pub target_directory: &'a Path,
    pub idl_file: PathBuf,
    pub source: &'a Source,
}

/// Build-wide switches read by every translator at invocation time.
#[derive(Debug, Clone)]
pub struct TranslatorSettings {
    pub fail_on_error: bool,
    pub debug: bool,
    /// Directory the target directory is expressed relative to.
    pub working_dir: PathBuf,
    pub runtime: JvmRuntime,
}

/// A strategy that drives one family of IDL compilers.
pub trait CompilerTranslator {
    fn family(&self) -> CompilerFamily;

    /// Builds the compiler's argument vector for `request` without running anything.
    fn arguments(&self, request: &CompilationRequest<'_>) -> Result<Vec<String>, Error>;

    /// Compiles `request`, failing if the compiler is missing, crashes, or (when
    /// failing on errors) reports a problem.
    fn compile(&mut self, request: &CompilationRequest<'_>) -> Result<(), Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompilerFamily {
    /// The JDK's own `idlj` (Sun or IBM flavour).
    #[default]
    Idlj,
    /// JacORB's IDL compiler.
    Jacorb,
}

impl FromStr for CompilerFamily {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idlj" => Ok(CompilerFamily::Idlj),
            "jacorb" => Ok(CompilerFamily::Jacorb),
            other => Err(Error::Config(format!("unsupported compiler: {}", other))),
        }
    }
}

impl fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompilerFamily::Idlj => f.write_str("idlj"),
            CompilerFamily::Jacorb => f.write_str("jacorb"),
        }
    }
}

impl CompilerFamily {
    /// Parses an optional configuration string, defaulting to idlj when absent.
    pub fn select(name: Option<&str>) -> Result<Self, Error> {
        name.map_or(Ok(CompilerFamily::default()), str::parse)
    }
}

pub fn create_translator(
    family: CompilerFamily,
    loader: Box<dyn ClassLoaderFacade>,
    settings: TranslatorSettings,
) -> Box<dyn CompilerTranslator> {
    match family {
        CompilerFamily::Idlj => Box::new(idlj::IdljTranslator::new(loader, settings)),
        CompilerFamily::Jacorb => Box::new(jacorb::JacorbTranslator::new(loader, settings)),
    }
}

/// Renders `class_name` and `args` the way they would be typed on a command line.
pub(crate) fn command_line(class_name: &str, args: &[String]) -> String {
    std::iter::once(class_name)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
