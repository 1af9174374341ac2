//! The IDL build description, read from a TOML file.
//!
//! ```toml
//! compiler = "idlj"
//! source_directory = "src/main/idl"
//! target_directory = "target/generated-sources/idl"
//! include_dirs = ["src/main/idl-include"]
//!
//! [[sources]]
//! emit_stubs = true
//! emit_skeletons = true
//! package_prefixes = [{ type = "Bank", prefix = "com.acme" }]
//! defines = [{ symbol = "NO_LEGACY" }]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::runtime::RuntimeOverrides;
use crate::utils::file_system::find_idl_files;
use crate::Error;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackagePrefix {
    #[serde(rename = "type")]
    pub type_name: String,
    pub prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Define {
    pub symbol: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// Options shared by a group of IDL files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Source {
    /// Single-prefix form; only JacORB understands it.
    pub package_prefix: Option<String>,
    pub package_prefixes: Vec<PackagePrefix>,
    pub defines: Vec<Define>,
    pub emit_stubs: Option<bool>,
    pub emit_skeletons: Option<bool>,
    /// Generate old-style implementation bases.
    pub compatible: Option<bool>,
    pub additional_arguments: Vec<String>,
    /// IDL files to compile, relative to the source directory. Empty means all of them.
    pub files: Vec<PathBuf>,
}

fn default_source_directory() -> PathBuf {
    PathBuf::from("src/main/idl")
}

fn default_target_directory() -> PathBuf {
    PathBuf::from("target/generated-sources/idl")
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildDescription {
    pub compiler: Option<String>,
    #[serde(default = "default_source_directory")]
    pub source_directory: PathBuf,
    #[serde(default = "default_target_directory")]
    pub target_directory: PathBuf,
    #[serde(default)]
    pub include_dirs: Vec<PathBuf>,
    /// Extra locations searched for compiler classes.
    #[serde(default)]
    pub classpath: Vec<PathBuf>,
    #[serde(default = "default_true")]
    pub fail_on_error: bool,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub runtime: RuntimeOverrides,
    #[serde(default)]
    pub sources: Vec<Source>,
}

impl BuildDescription {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read build description {:?}: {}", path, e),
            ))
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, Error> {
        let mut description: BuildDescription =
            toml::from_str(text).map_err(|e| Error::Description(e.to_string()))?;
        if description.sources.is_empty() {
            description.sources.push(Source::default());
        }
        Ok(description)
    }

    /// Pairs every source with the IDL files it covers under `source_directory`.
    pub fn compilation_units(
        &self,
        source_directory: &Path,
    ) -> Result<Vec<(&Source, Vec<PathBuf>)>, Error> {
        let mut units = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            let files = if source.files.is_empty() {
                find_idl_files(source_directory)?
            } else {
                source.files.iter().map(|file| source_directory.join(file)).collect()
            };
            units.push((source, files));
        }
        Ok(units)
    }
}
