use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct AppConfig {
    /// Path to the IDL build description (TOML)
    #[clap(short, long, value_parser, default_value = "idl.toml")]
    pub description: PathBuf,

    /// Compiler family to use (idlj, jacorb); overrides the description
    #[clap(short, long)]
    pub compiler: Option<String>,

    /// Fail the build on compiler errors (true/false); overrides the description
    #[clap(long, action = clap::ArgAction::Set)]
    pub fail_on_error: Option<bool>,

    /// Run the compiler in verbose mode and log each command line
    #[clap(long)]
    pub debug: bool,

    /// Java installation hosting the IDL compiler (defaults to JAVA_HOME, then PATH)
    #[clap(long, value_parser)]
    pub java_home: Option<PathBuf>,

    /// Print the compiler arguments as JSON instead of compiling
    #[clap(long)]
    pub dry_run: bool,
}

impl AppConfig {
    pub fn new() -> Self {
        AppConfig::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AppConfig::parse_from(["idl_translator"]);
        assert_eq!(config.description, PathBuf::from("idl.toml"));
        assert_eq!(config.compiler, None);
        assert_eq!(config.fail_on_error, None);
        assert!(!config.debug && !config.dry_run);
    }

    #[test]
    fn overrides() {
        let config = AppConfig::parse_from([
            "idl_translator",
            "--description",
            "build/idl.toml",
            "--compiler",
            "jacorb",
            "--fail-on-error",
            "false",
            "--debug",
            "--dry-run",
        ]);
        assert_eq!(config.compiler.as_deref(), Some("jacorb"));
        assert_eq!(config.fail_on_error, Some(false));
        assert!(config.debug && config.dry_run);
    }
}
