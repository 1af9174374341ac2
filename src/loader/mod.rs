//! The `loader` module isolates compiler resolution from how classes are actually found.
//!
//! Translators only ever talk to a [`ClassLoaderFacade`]; the production
//! [`jvm::JvmClassLoader`] inspects a real Java runtime, while tests substitute a
//! recording fake.

pub mod jvm;

use std::fmt;
use std::path::PathBuf;

/// Failure to locate a compiler class.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("class {0} not found")]
    ClassNotFound(String),
    #[error("unable to look up class {class}: {source}")]
    Io {
        class: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failure while running a compiler entry point.
#[derive(thiserror::Error, Debug)]
pub enum InvocationError {
    /// The entry point ran and raised; carries what it raised.
    #[error("{0}")]
    Target(Box<dyn std::error::Error + Send + Sync>),
    /// The entry point could not be run at all.
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// What an entry point handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnValue {
    Int(i32),
    Void,
}

impl fmt::Display for ReturnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnValue::Int(code) => write!(f, "{}", code),
            ReturnValue::Void => f.write_str("null"),
        }
    }
}

/// Text written by a compiler during exactly one invocation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CapturedOutput {
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// A compiler's command-line entry, i.e. its `main(String[])`.
pub trait EntryPoint {
    /// Runs the compiler with `args`, writing its diagnostics into `output`.
    fn invoke(
        &self,
        args: &[String],
        output: &mut CapturedOutput,
    ) -> Result<ReturnValue, InvocationError>;
}

/// A resolved compiler class. Resolved fresh for every compilation and dropped afterwards.
pub struct CompilerClass {
    name: String,
    main: Option<Box<dyn EntryPoint>>,
}

impl CompilerClass {
    pub fn new(name: impl Into<String>, main: Option<Box<dyn EntryPoint>>) -> Self {
        CompilerClass { name: name.into(), main }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The public static `main(String[])` method, if the class has one.
    pub fn main_method(&self) -> Option<&dyn EntryPoint> {
        self.main.as_deref()
    }
}

impl fmt::Debug for CompilerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompilerClass")
            .field("name", &self.name)
            .field("has_main", &self.main.is_some())
            .finish()
    }
}

/// Loads compiler classes by name from an adjustable search path.
pub trait ClassLoaderFacade {
    fn load_class(&mut self, class_name: &str) -> Result<CompilerClass, LoadError>;

    /// Puts `locations` (archives or directories) ahead of everything already searched.
    fn prepend_urls(&mut self, locations: &[PathBuf]);
}
