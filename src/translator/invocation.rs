use super::outcome::log_captured;
use crate::loader::{CapturedOutput, CompilerClass, InvocationError, ReturnValue};
use crate::Error;

/// A compiler run that returned normally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub exit_code: i32,
    pub output: CapturedOutput,
}

/// Runs `class`'s `main` with `args`, capturing everything it prints.
///
/// The capture buffers live only for this call. If the entry point raises, the
/// captured text is logged before the failure is returned, so diagnostics are never lost.
///
/// The compiler writes into a [`CapturedOutput`] it is handed, never into this process's
/// standard streams. Nothing is redirected, so stdout and stderr are the same after the
/// call whether it returned, failed or raised.
pub fn invoke_compiler(class: &CompilerClass, args: &[String]) -> Result<Invocation, Error> {
    let main = class
        .main_method()
        .ok_or_else(|| Error::EntryPointMissing(class.name().to_string()))?;

    let mut output = CapturedOutput::default();
    let result = main.invoke(args, &mut output);

    let return_value = match result {
        Ok(value) => value,
        Err(err) => {
            log_captured(&output);
            let cause = match err {
                InvocationError::Target(cause) | InvocationError::Other(cause) => cause,
            };
            return Err(Error::CompilationFailed {
                message: "IDL compilation failed".to_string(),
                source: Some(cause),
            });
        }
    };

    log::info!("Completed with code {}", return_value);
    let exit_code = match return_value {
        ReturnValue::Int(code) => code,
        ReturnValue::Void => 0,
    };
    Ok(Invocation { exit_code, output })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::EntryPoint;

    struct Scripted {
        stdout: &'static str,
        stderr: &'static str,
        result: fn() -> Result<ReturnValue, InvocationError>,
    }

    impl EntryPoint for Scripted {
        fn invoke(
            &self,
            _args: &[String],
            output: &mut CapturedOutput,
        ) -> Result<ReturnValue, InvocationError> {
            output.stdout.extend_from_slice(self.stdout.as_bytes());
            output.stderr.extend_from_slice(self.stderr.as_bytes());
            (self.result)()
        }
    }

    fn class(result: fn() -> Result<ReturnValue, InvocationError>) -> CompilerClass {
        CompilerClass::new(
            "Compile",
            Some(Box::new(Scripted { stdout: "generated", stderr: "", result })),
        )
    }

    #[test]
    fn integer_return_is_the_exit_code() {
        let run = invoke_compiler(&class(|| Ok(ReturnValue::Int(3))), &[]).unwrap();
        assert_eq!(run.exit_code, 3);
        assert_eq!(run.output.stdout_text(), "generated");
    }

    #[test]
    fn void_return_is_success() {
        let run = invoke_compiler(&class(|| Ok(ReturnValue::Void)), &[]).unwrap();
        assert_eq!(run.exit_code, 0);
    }

    #[test]
    fn missing_main_is_reported() {
        let class = CompilerClass::new("org.example.NoMain", None);
        let err = invoke_compiler(&class, &[]).unwrap_err();
        assert!(matches!(err, Error::EntryPointMissing(name) if name == "org.example.NoMain"));
    }

    #[test]
    fn raised_target_is_unwrapped_into_the_failure() {
        let err = invoke_compiler(
            &class(|| Err(InvocationError::Target("java.lang.NullPointerException".into()))),
            &[],
        )
        .unwrap_err();
        match err {
            Error::CompilationFailed { source: Some(cause), .. } => {
                assert_eq!(cause.to_string(), "java.lang.NullPointerException");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn other_failures_keep_their_cause() {
        let err = invoke_compiler(
            &class(|| Err(InvocationError::Other("could not spawn java".into()))),
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, Error::CompilationFailed { source: Some(_), .. }));
    }

    #[test]
    fn capture_does_not_outlive_a_raising_call() {
        let raising = CompilerClass::new(
            "Compile",
            Some(Box::new(Scripted {
                stdout: "partial",
                stderr: "Exception in thread \"main\"",
                result: || Err(InvocationError::Target("boom".into())),
            })),
        );
        assert!(invoke_compiler(&raising, &[]).is_err());

        let run = invoke_compiler(&class(|| Ok(ReturnValue::Void)), &[]).unwrap();
        assert_eq!(run.output.stdout_text(), "generated");
        assert_eq!(run.output.stderr_text(), "");
    }
}
