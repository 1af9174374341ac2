use super::arguments::idlj_arguments;
use super::invocation::invoke_compiler;
use super::outcome::classify;
use super::resolver::CompilerResolver;
use super::{command_line, CompilationRequest, CompilerFamily, CompilerTranslator, TranslatorSettings};
use crate::loader::ClassLoaderFacade;
use crate::Error;

/// Drives the JDK's idlj compiler (Sun or IBM flavour, chosen from the runtime vendor).
pub struct IdljTranslator {
    loader: Box<dyn ClassLoaderFacade>,
    settings: TranslatorSettings,
}

impl IdljTranslator {
    pub fn new(loader: Box<dyn ClassLoaderFacade>, settings: TranslatorSettings) -> Self {
        IdljTranslator { loader, settings }
    }
}

impl CompilerTranslator for IdljTranslator {
    fn family(&self) -> CompilerFamily {
        CompilerFamily::Idlj
    }

    fn arguments(&self, request: &CompilationRequest<'_>) -> Result<Vec<String>, Error> {
        idlj_arguments(request, &self.settings)
    }

    fn compile(&mut self, request: &CompilationRequest<'_>) -> Result<(), Error> {
        let args = self.arguments(request)?;

        let compiler =
            CompilerResolver::new(self.loader.as_mut(), &self.settings.runtime).resolve()?;

        log::debug!("Current dir : {}", self.settings.working_dir.display());
        if self.settings.debug {
            log::info!("{}", command_line(compiler.name(), &args));
        }

        let invocation = invoke_compiler(&compiler, &args)?;
        classify(&invocation, self.settings.fail_on_error)
    }
}
