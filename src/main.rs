use std::error::Error as _;

use idl_translator::Error;

fn main() {
    if let Err(e) = idl_translator::run() {
        log::error!("Application error: {}", e);
        match &e {
            Error::Io(io_err) => eprintln!("Error: A file system I/O error occurred: {}", io_err),
            Error::Json(json_err) => eprintln!("Error: Could not render the dry-run plan: {}", json_err),
            Error::Config(msg) => eprintln!("Error: Configuration issue: {}", msg),
            Error::Description(msg) => eprintln!("Error: Invalid build description: {}", msg),
            Error::Probe(msg) => eprintln!("Error: Could not inspect the Java runtime: {}", msg),
            Error::CompilerUnavailable { class_name, source } => {
                eprintln!("Error: IDL compiler {} not available: {}", class_name, source)
            }
            Error::EntryPointMissing(class) => {
                eprintln!("Error: Compiler {} had no main method", class)
            }
            Error::CompilationFailed { message, .. } => match e.source() {
                Some(cause) => eprintln!("Error: {}: {}", message, cause),
                None => eprintln!("Error: {}", message),
            },
        }
        std::process::exit(1);
    }
}
