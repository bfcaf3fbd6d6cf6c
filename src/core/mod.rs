//! Core data structures for tskit-build.
//!
//! This module contains the foundational types:
//! - The version fragment and its resolved string
//! - The fixed source manifest and vendor layout
//! - Platform profiles and the extension descriptor

pub mod descriptor;
pub mod error;
pub mod language;
pub mod manifest;
pub mod platform;
pub mod version;

pub use descriptor::{ExtensionBuilder, ExtensionDescriptor};
pub use error::ExtensionError;
pub use language::{CStandard, Define};
pub use manifest::{SourceManifest, VendorLayout};
pub use platform::{HostSystem, PlatformProfile};
pub use version::{resolve_version, VersionString};
