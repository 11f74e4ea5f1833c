//! Manifest loading and parsing.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use envgate::config::{load_project_manifest, DEFAULT_MANIFEST};
//! use envgate::environment::Mode;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(
//!     temp.path().join(DEFAULT_MANIFEST),
//!     "context:\n  mode: dev\ncomponents:\n  - name: debug-toolbar\n    tags: [mode=dev]\n",
//! )
//! .unwrap();
//!
//! let manifest = load_project_manifest(temp.path(), None).unwrap();
//! assert_eq!(manifest.context.mode, Some(Mode::Dev));
//! assert_eq!(manifest.descriptors().unwrap()[0].name, "debug-toolbar");
//! ```

pub mod loader;
pub mod schema;

pub use loader::{
    find_manifest, load_manifest, load_project_manifest, parse_manifest, DEFAULT_MANIFEST,
};
pub use schema::{ComponentConfig, ContextConfig, Manifest, TagDeclaration};
