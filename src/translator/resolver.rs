//! Locates the idlj implementation matching the running JVM.
//!
//! The compiler normally lives in the JDK's tools archive, which is not on the
//! default search path, so a failed lookup is retried once with that archive prepended.

use crate::loader::{ClassLoaderFacade, CompilerClass, LoadError};
use crate::runtime::JvmRuntime;
use crate::Error;

pub const SUN_IDL_COMPILER: &str = "com.sun.tools.corba.se.idl.toJavaPortable.Compile";
pub const IBM_IDL_COMPILER: &str = "com.ibm.idl.toJavaPortable.Compile";

/// Loaded after the tools archive is added on HotSpot so idlj can find its include files.
pub const FILE_LOCATOR: &str = "com.sun.tools.corba.se.idl.som.cff.FileLocator";

pub fn idl_compiler_class(runtime: &JvmRuntime) -> &'static str {
    if runtime.is_ibm() {
        IBM_IDL_COMPILER
    } else {
        SUN_IDL_COMPILER
    }
}

pub struct CompilerResolver<'a> {
    loader: &'a mut dyn ClassLoaderFacade,
    runtime: &'a JvmRuntime,
}

impl<'a> CompilerResolver<'a> {
    pub fn new(loader: &'a mut dyn ClassLoaderFacade, runtime: &'a JvmRuntime) -> Self {
        CompilerResolver { loader, runtime }
    }

    /// Loads the vendor's compiler class, falling back to the tools archive.
    pub fn resolve(&mut self) -> Result<CompilerClass, Error> {
        let class_name = idl_compiler_class(self.runtime);
        log::debug!("Resolving IDL compiler {}", class_name);

        let first_attempt = if self.runtime.is_apple() {
            self.add_tools_archive()
                .and_then(|()| self.loader.load_class(class_name))
        } else {
            self.loader.load_class(class_name)
        };

        match first_attempt {
            Ok(class) => Ok(class),
            Err(original @ LoadError::ClassNotFound(_)) => {
                log::debug!("{}; retrying with the tools archive", original);
                self.add_tools_archive()
                    .and_then(|()| self.loader.load_class(class_name))
                    .map_err(|retry| {
                        log::debug!("Retry failed: {}", retry);
                        Error::CompilerUnavailable {
                            class_name: class_name.to_string(),
                            source: original,
                        }
                    })
            }
            Err(other) => Err(Error::CompilerUnavailable {
                class_name: class_name.to_string(),
                source: other,
            }),
        }
    }

    fn add_tools_archive(&mut self) -> Result<(), LoadError> {
        let archive = self.runtime.tools_archive();
        log::debug!("Adding {} to the compiler search path", archive.display());
        self.loader.prepend_urls(&[archive]);
        if self.runtime.is_hotspot() {
            self.loader.load_class(FILE_LOCATOR)?;
        }
        Ok(())
    }
}
