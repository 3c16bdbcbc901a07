//! Extension-keyed file-type classification
//!
//! This crate classifies a path by its extension into a category/MIME-type
//! descriptor. A [`FileTypeRegistry`] is an explicitly constructed lookup
//! table passed by reference — there is no process-wide instance — so
//! embedders and tests can hold isolated tables with their own custom
//! definitions layered over the builtin set.
//!
//! # Examples
//!
//! ```rust
//! use filekit_registry::{FileCategory, FileTypeRegistry};
//!
//! let registry = FileTypeRegistry::with_builtin_types();
//! let info = registry.resolve("assets/title.png");
//! assert_eq!(info.category(), FileCategory::Image);
//! assert_eq!(info.primary_mime_type(), "image/png");
//! ```
//!
//! # Features
//!
//! - `serde`: enable serialization of categories and definitions

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod category;
pub mod definition;
pub mod registry;

pub use category::FileCategory;
pub use definition::{FileTypeDefinition, DEFAULT_MIME_TYPE};
pub use registry::FileTypeRegistry;
