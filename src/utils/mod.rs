//! The `utils` module provides helper functions for running the Java tools and for
//! path handling (relativization, separator fixing, IDL file discovery). These
//! utilities are used by the runtime probe, the JVM class loader and the translators.

pub mod command_runner;
pub mod file_system;
