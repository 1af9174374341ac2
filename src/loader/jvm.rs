use std::ffi::OsString;
use std::path::PathBuf;

use super::{
    CapturedOutput, ClassLoaderFacade, CompilerClass, EntryPoint, InvocationError, LoadError,
    ReturnValue,
};
use crate::runtime::JvmRuntime;
use crate::utils::command_runner::run_command;

const UNCAUGHT_EXCEPTION_PREFIX: &str = "Exception in thread \"main\"";

/// An exception that escaped a compiler's `main` in the launched JVM.
#[derive(thiserror::Error, Debug)]
#[error("{0}")]
pub struct JavaException(pub String);

/// Finds classes with the JDK's `javap` and runs them with `java`.
///
/// The search path is passed explicitly to every tool invocation, so archives
/// prepended during fallback are also visible to the compiler's own resource lookups.
/// Both tools run in `working_dir`, the directory relative target paths are computed against.
pub struct JvmClassLoader {
    runtime: JvmRuntime,
    search_path: Vec<PathBuf>,
    working_dir: PathBuf,
}

impl JvmClassLoader {
    pub fn new(runtime: JvmRuntime, classpath: Vec<PathBuf>, working_dir: PathBuf) -> Self {
        JvmClassLoader {
            runtime,
            search_path: classpath,
            working_dir,
        }
    }

    #[cfg(test)]
    fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }
}

fn join_classpath(entries: &[PathBuf]) -> Result<Option<OsString>, std::env::JoinPathsError> {
    if entries.is_empty() {
        return Ok(None);
    }
    std::env::join_paths(entries).map(Some)
}

impl ClassLoaderFacade for JvmClassLoader {
    fn load_class(&mut self, class_name: &str) -> Result<CompilerClass, LoadError> {
        let io_error = |source: std::io::Error| LoadError::Io {
            class: class_name.to_string(),
            source,
        };

        let mut args: Vec<OsString> = vec!["-public".into()];
        let classpath = join_classpath(&self.search_path).map_err(|e| {
            io_error(std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
        })?;
        if let Some(classpath) = &classpath {
            args.push("-classpath".into());
            args.push(classpath.clone());
        }
        args.push(class_name.into());

        let output = run_command(&self.runtime.javap(), &args, Some(&self.working_dir))
            .map_err(io_error)?;
        if !output.status.success() {
            log::debug!(
                "javap could not find {}: {}",
                class_name,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Err(LoadError::ClassNotFound(class_name.to_string()));
        }

        let listing = String::from_utf8_lossy(&output.stdout);
        let main: Option<Box<dyn EntryPoint>> = if has_main_method(&listing) {
            Some(Box::new(JavaMain {
                java: self.runtime.java(),
                class_name: class_name.to_string(),
                classpath,
                working_dir: self.working_dir.clone(),
            }))
        } else {
            None
        };
        Ok(CompilerClass::new(class_name, main))
    }

    fn prepend_urls(&mut self, locations: &[PathBuf]) {
        for location in locations.iter().rev() {
            self.search_path.retain(|existing| existing != location);
            self.search_path.insert(0, location.clone());
        }
        log::debug!("Compiler search path is now {:?}", self.search_path);
    }
}

/// Whether a `javap -public` listing declares `public static ... main(java.lang.String[])`.
pub fn has_main_method(listing: &str) -> bool {
    listing.lines().map(str::trim).any(|line| {
        line.starts_with("public static ")
            && (line.contains(" main(java.lang.String[])")
                || line.contains(" main(java.lang.String...)"))
    })
}

/// The `main` method of a class, run in a fresh JVM.
struct JavaMain {
    java: PathBuf,
    class_name: String,
    classpath: Option<OsString>,
    working_dir: PathBuf,
}

impl EntryPoint for JavaMain {
    fn invoke(
        &self,
        args: &[String],
        output: &mut CapturedOutput,
    ) -> Result<ReturnValue, InvocationError> {
        let mut command_args: Vec<OsString> = Vec::with_capacity(args.len() + 3);
        if let Some(classpath) = &self.classpath {
            command_args.push("-classpath".into());
            command_args.push(classpath.clone());
        }
        command_args.push(self.class_name.as_str().into());
        command_args.extend(args.iter().map(OsString::from));

        let result = run_command(&self.java, &command_args, Some(&self.working_dir))
            .map_err(|e| InvocationError::Other(Box::new(e)))?;
        output.stdout.extend_from_slice(&result.stdout);
        output.stderr.extend_from_slice(&result.stderr);

        if let Some(exception) = uncaught_exception(&String::from_utf8_lossy(&result.stderr)) {
            return Err(InvocationError::Target(Box::new(JavaException(exception))));
        }
        match result.status.code() {
            Some(code) => Ok(ReturnValue::Int(code)),
            None => Err(InvocationError::Other(
                format!("{} was terminated by a signal ({})", self.class_name, result.status)
                    .into(),
            )),
        }
    }
}

fn uncaught_exception(stderr: &str) -> Option<String> {
    stderr.lines().find_map(|line| {
        line.strip_prefix(UNCAUGHT_EXCEPTION_PREFIX)
            .map(|rest| rest.trim().to_string())
    })
}
