//! Identity of the Java runtime that hosts the external IDL compilers.
//!
//! The runtime is interrogated once per build with
//! `java -XshowSettings:properties -version`, whose property dump (printed on stderr)
//! carries everything compiler resolution and argument synthesis depend on.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::utils::command_runner::{resolve_tool, run_command};
use crate::Error;

/// Vendor/version facts about a Java runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JvmRuntime {
    /// `java.vm.vendor`
    pub vendor: String,
    /// `java.vm.name`
    pub vm_name: String,
    /// `java.specification.version`
    pub specification_version: String,
    /// `java.home`
    pub home: PathBuf,
}

/// Values from the build description that replace probed ones.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuntimeOverrides {
    pub java_home: Option<PathBuf>,
    pub vendor: Option<String>,
    pub vm_name: Option<String>,
    pub specification_version: Option<String>,
}

impl RuntimeOverrides {
    fn is_complete(&self) -> bool {
        self.java_home.is_some()
            && self.vendor.is_some()
            && self.vm_name.is_some()
            && self.specification_version.is_some()
    }
}

impl JvmRuntime {
    pub fn is_ibm(&self) -> bool {
        self.vendor.contains("IBM")
    }

    pub fn is_apple(&self) -> bool {
        self.vendor.contains("Apple")
    }

    pub fn is_hotspot(&self) -> bool {
        self.vm_name.contains("HotSpot")
    }

    /// True for specification versions `0.0` through `1.3`, whose runtimes already
    /// generate old-style implementation bases.
    pub fn is_legacy_specification(&self) -> bool {
        let mut parts = self.specification_version.split('.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(major), Some(minor), None) => {
                matches!(major, "0" | "1") && matches!(minor, "0" | "1" | "2" | "3")
            }
            _ => false,
        }
    }

    /// Directories searched for `java`/`javap` belonging to this runtime.
    ///
    /// On older JDKs `java.home` points at the bundled `jre`, with the JDK tools one level up.
    pub fn tool_dirs(&self) -> Vec<PathBuf> {
        vec![self.home.join("bin"), self.home.join("..").join("bin")]
    }

    pub fn java(&self) -> PathBuf {
        resolve_tool("java", &self.tool_dirs())
    }

    pub fn javap(&self) -> PathBuf {
        resolve_tool("javap", &self.tool_dirs())
    }

    /// Probes the runtime found at `java_home` (or `JAVA_HOME`, or `PATH`), then applies `overrides`.
    ///
    /// When every field is overridden no process is launched at all.
    pub fn probe(overrides: &RuntimeOverrides) -> Result<Self, Error> {
        if overrides.is_complete() {
            log::debug!("Runtime fully described by overrides, skipping probe");
            return Ok(Self::from_properties("", overrides));
        }

        let home = overrides
            .java_home
            .clone()
            .or_else(|| std::env::var_os("JAVA_HOME").map(PathBuf::from));
        let java = match &home {
            Some(home) => resolve_tool("java", &[home.join("bin")]),
            None => PathBuf::from("java"),
        };

        let output = run_command(&java, &["-XshowSettings:properties", "-version"], None)
            .map_err(|e| Error::Probe(e.to_string()))?;
        if !output.status.success() {
            return Err(Error::Probe(format!(
                "{} exited with {}: {}",
                java.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let dump = String::from_utf8_lossy(&output.stderr);
        let runtime = Self::from_properties(&dump, overrides);
        if runtime.specification_version.is_empty() {
            return Err(Error::Probe(format!(
                "{} did not report java.specification.version",
                java.display()
            )));
        }
        log::debug!("Probed Java runtime: {:?}", runtime);
        Ok(runtime)
    }

    /// Builds a runtime from a `-XshowSettings:properties` dump, preferring `overrides`.
    pub fn from_properties(dump: &str, overrides: &RuntimeOverrides) -> Self {
        let property = |key: &str| property_value(dump, key).unwrap_or_default();
        JvmRuntime {
            vendor: overrides.vendor.clone().unwrap_or_else(|| property("java.vm.vendor")),
            vm_name: overrides.vm_name.clone().unwrap_or_else(|| property("java.vm.name")),
            specification_version: overrides
                .specification_version
                .clone()
                .unwrap_or_else(|| property("java.specification.version")),
            home: overrides
                .java_home
                .clone()
                .unwrap_or_else(|| PathBuf::from(property("java.home"))),
        }
    }

    /// Location, relative to the runtime home, of the archive holding the vendor's IDL compiler.
    pub fn tools_archive(&self) -> PathBuf {
        let relative = if self.is_apple() {
            Path::new("..").join("Classes").join("classes.jar")
        } else {
            Path::new("..").join("lib").join("tools.jar")
        };
        self.home.join(relative)
    }
}

/// Looks up `key` in a property dump made of `    key = value` lines.
///
/// Multi-valued properties continue on indented lines without `=`; only the first value is kept.
fn property_value(dump: &str, key: &str) -> Option<String> {
    dump.lines().find_map(|line| {
        let (name, value) = line.split_once('=')?;
        (name.trim() == key).then(|| value.trim().to_string())
    })
}
