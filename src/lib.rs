//
// Copyright (c) The yangkit Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! Rust bindings for the [libyang3] YANG data modeling library.
//!
//! The raw FFI layer is provided by [libyang3-sys]; this crate wraps it with
//! safe, lifetime-checked handles.
//!
//! [libyang3]: https://github.com/CESNET/libyang
//! [libyang3-sys]: https://crates.io/crates/libyang3-sys
//!
//! ## Design Goals
//! * High-level bindings for libyang3 using idiomatic Rust
//! * Use Rust's ownership system to detect API misuse problems at compile
//!   time
//! * Automatic resource management
//! * Zero-cost abstractions
//!
//! ## Feature flags
//! By default, yangkit uses pre-generated FFI bindings and dynamic linking to
//! load libyang3. The following feature flags can be used to change that
//! behavior:
//! * **bundled**: instructs cargo to download and build libyang3 from the
//!   sources. The resulting objects are grouped into a static archive linked
//!   to this crate.
//! * **bindgen**: generate new C FFI bindings dynamically instead of using
//!   the pre-generated ones. Useful when updating this crate to use newer
//!   libyang3 versions.
//!
//! ## Example
//!
//! A minimal program that loads a schema from a YIN file, parses an XML
//! instance document against it, and inspects the result:
//!
//! ```no_run
//! use yangkit::context::{Context, ContextFlags};
//! use yangkit::data::{DataFormat, DataParserFlags, DataTree,
//!     DataValidationFlags};
//! use yangkit::schema::SchemaInputFormat;
//!
//! let mut ctx =
//!     Context::with_searchdir("./assets/yang", ContextFlags::NO_YANGLIBRARY)
//!         .expect("Failed to create context");
//! let module = ctx
//!     .parse_module_path(
//!         "./assets/yang/sensor-grid.yin",
//!         SchemaInputFormat::YIN,
//!         &[],
//!     )
//!     .expect("Failed to parse module");
//! println!("{}", module.name());
//!
//! let dtree = DataTree::parse_path(
//!     &ctx,
//!     "./assets/data/sensor-grid.xml",
//!     DataFormat::XML,
//!     DataParserFlags::empty(),
//!     DataValidationFlags::empty(),
//! )
//! .expect("Failed to parse instance data");
//! ```
//!
//! More complete programs can be found in the `demos` directory.

mod error;

pub mod context;
pub mod data;
pub mod iter;
pub mod logging;
pub mod schema;
pub mod utils;

pub use crate::error::Error;

// Re-export the raw FFI bindings for convenience.
pub use libyang3_sys as ffi;
