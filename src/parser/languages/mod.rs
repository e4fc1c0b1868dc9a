//! Language-specific doc extractors.
//!
//! Each language module provides a factory function and a `register` hook
//! binding it to a file extension.

pub mod java;
pub mod javascript;
pub mod python;
pub mod rust_lang;
pub mod typescript;

/// Register all available doc extractors.
pub fn register_all() {
    java::register();
    javascript::register();
    python::register();
    rust_lang::register();
    typescript::register();
}
