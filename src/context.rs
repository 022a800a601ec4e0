//
// Copyright (c) The yangkit Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! YANG schema context.

use bitflags::bitflags;
use std::ffi::CString;
use std::os::raw::c_char;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::AsRawFd;
use std::path::Path;

use crate::error::{Error, Result};
use crate::iter::SchemaModules;
use crate::logging;
use crate::logging::{DefaultLogger, LogCallback, LoggingCallbackAlreadySet};
use crate::schema::{SchemaInputFormat, SchemaModule, SchemaNode};
use crate::utils::*;
use libyang3_sys as ffi;

/// Context of the YANG schemas.
///
/// The context holds the full set of data-model definitions (schema modules
/// and their internal bookkeeping) against which instance data is parsed and
/// validated. Applications are usually expected to work with a single
/// context.
///
/// All handles derived from a context (modules, schema nodes, data trees)
/// borrow it, so the borrow checker guarantees the context outlives them.
#[derive(Debug)]
pub struct Context {
    pub(crate) raw: *mut ffi::ly_ctx,
}

bitflags! {
    /// Options to change context behavior.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct ContextFlags: u16 {
        /// All the imported modules of the schema being parsed are
        /// implemented.
        const ALL_IMPLEMENTED = ffi::LY_CTX_ALL_IMPLEMENTED as u16;

        /// Implement all imported modules "referenced" from an implemented
        /// module. Normally, leafrefs, augment and deviation targets are
        /// implemented as specified by YANG 1.1. In addition to this,
        /// implement any modules of nodes referenced by when and must
        /// conditions and by any default values.
        const REF_IMPLEMENTED = ffi::LY_CTX_REF_IMPLEMENTED as u16;

        /// Do not internally implement the ietf-yang-library module. This
        /// option cannot be changed on an existing context.
        const NO_YANGLIBRARY = ffi::LY_CTX_NO_YANGLIBRARY as u16;

        /// Do not search for schemas in the context's searchdirs nor in the
        /// current working directory.
        const DISABLE_SEARCHDIRS = ffi::LY_CTX_DISABLE_SEARCHDIRS as u16;

        /// Do not automatically search for schemas in the current working
        /// directory.
        const DISABLE_SEARCHDIR_CWD = ffi::LY_CTX_DISABLE_SEARCHDIR_CWD as u16;
    }
}

impl Context {
    /// Create a new libyang context with no search path configured.
    pub fn new(options: ContextFlags) -> Result<Context> {
        let mut context = std::ptr::null_mut();

        let ret = unsafe {
            ffi::ly_ctx_new(std::ptr::null(), options.bits(), &mut context)
        };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            // No context to read the error list from.
            return Err(Error::from_errcode(ret));
        }

        Ok(Context { raw: context })
    }

    /// Create a new libyang context given a directory where to search for
    /// imported or included schema modules.
    pub fn with_searchdir<P: AsRef<Path>>(
        search_dir: P,
        options: ContextFlags,
    ) -> Result<Context> {
        let search_dir =
            CString::new(search_dir.as_ref().as_os_str().as_bytes()).unwrap();
        let mut context = std::ptr::null_mut();

        let ret = unsafe {
            ffi::ly_ctx_new(search_dir.as_ptr(), options.bits(), &mut context)
        };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::from_errcode(ret));
        }

        Ok(Context { raw: context })
    }

    /// Add a search path to the context.
    pub fn set_searchdir<P: AsRef<Path>>(
        &mut self,
        search_dir: P,
    ) -> Result<()> {
        let search_dir =
            CString::new(search_dir.as_ref().as_os_str().as_bytes()).unwrap();
        let ret =
            unsafe { ffi::ly_ctx_set_searchdir(self.raw, search_dir.as_ptr()) };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::new(self));
        }

        Ok(())
    }

    /// Remove a specific search path from the context.
    pub fn unset_searchdir<P: AsRef<Path>>(
        &mut self,
        search_dir: P,
    ) -> Result<()> {
        let search_dir =
            CString::new(search_dir.as_ref().as_os_str().as_bytes()).unwrap();
        let ret = unsafe {
            ffi::ly_ctx_unset_searchdir(self.raw, search_dir.as_ptr())
        };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::new(self));
        }

        Ok(())
    }

    /// Remove all search paths from the context.
    pub fn unset_searchdirs(&mut self) -> Result<()> {
        let ret =
            unsafe { ffi::ly_ctx_unset_searchdir(self.raw, std::ptr::null()) };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::new(self));
        }

        Ok(())
    }

    /// Remove the `count` most recently added search path(s) from the
    /// context.
    pub fn unset_searchdir_last(&mut self, count: u32) -> Result<()> {
        let ret = unsafe { ffi::ly_ctx_unset_searchdir_last(self.raw, count) };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::new(self));
        }

        Ok(())
    }

    /// List the search paths currently set on the context.
    pub fn searchdirs(&self) -> impl Iterator<Item = &str> {
        let mut dirs = Vec::new();

        // NULL-terminated array of directories.
        let mut sdir = unsafe { ffi::ly_ctx_get_searchdirs(self.raw) };
        if !sdir.is_null() {
            unsafe {
                while !(*sdir).is_null() {
                    dirs.push(char_ptr_to_str(*sdir));
                    sdir = sdir.add(1);
                }
            }
        }

        dirs.into_iter()
    }

    /// Get the currently set context options.
    pub fn get_options(&self) -> ContextFlags {
        let options = unsafe { ffi::ly_ctx_get_options(self.raw) };
        ContextFlags::from_bits_truncate(options)
    }

    /// Set some of the context options.
    pub fn set_options(&mut self, options: ContextFlags) -> Result<()> {
        let ret = unsafe { ffi::ly_ctx_set_options(self.raw, options.bits()) };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::new(self));
        }

        Ok(())
    }

    /// Unset some of the context options.
    pub fn unset_options(&mut self, options: ContextFlags) -> Result<()> {
        let ret =
            unsafe { ffi::ly_ctx_unset_options(self.raw, options.bits()) };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::new(self));
        }

        Ok(())
    }

    /// Parse a schema module from a string.
    ///
    /// `features` lists the names of the features to enable on the parsed
    /// module. The module itself is made implemented.
    pub fn parse_module_string(
        &mut self,
        data: &str,
        format: SchemaInputFormat,
        features: &[&str],
    ) -> Result<SchemaModule<'_>> {
        let data = CString::new(data).unwrap();
        let mut input = std::ptr::null_mut();

        let ret =
            unsafe { ffi::ly_in_new_memory(data.as_ptr(), &mut input) };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::new(self));
        }

        self.parse_module(input, format, features)
    }

    /// Parse a schema module from an open file.
    pub fn parse_module_file<F: AsRawFd>(
        &mut self,
        file: F,
        format: SchemaInputFormat,
        features: &[&str],
    ) -> Result<SchemaModule<'_>> {
        let mut input = std::ptr::null_mut();

        let ret =
            unsafe { ffi::ly_in_new_fd(file.as_raw_fd(), &mut input) };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::new(self));
        }

        self.parse_module(input, format, features)
    }

    /// Parse a schema module from a file path.
    pub fn parse_module_path<P: AsRef<Path>>(
        &mut self,
        path: P,
        format: SchemaInputFormat,
        features: &[&str],
    ) -> Result<SchemaModule<'_>> {
        let path =
            CString::new(path.as_ref().as_os_str().as_bytes()).unwrap();
        let mut input = std::ptr::null_mut();

        let ret =
            unsafe { ffi::ly_in_new_filepath(path.as_ptr(), 0, &mut input) };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::new(self));
        }

        self.parse_module(input, format, features)
    }

    fn parse_module(
        &mut self,
        input: *mut ffi::ly_in,
        format: SchemaInputFormat,
        features: &[&str],
    ) -> Result<SchemaModule<'_>> {
        let features_cstr = features
            .iter()
            .map(|feature| CString::new(*feature).unwrap())
            .collect::<Vec<_>>();
        let mut features_ptr = features_cstr
            .iter()
            .map(|feature| feature.as_ptr())
            .chain(std::iter::once(std::ptr::null::<c_char>()))
            .collect::<Vec<_>>();

        let mut module = std::ptr::null_mut();
        let ret = unsafe {
            ffi::lys_parse(
                self.raw,
                input,
                format as u32,
                features_ptr.as_mut_ptr(),
                &mut module,
            )
        };
        unsafe { ffi::ly_in_free(input, 0) };
        if ret != ffi::LY_ERR::LY_SUCCESS {
            return Err(Error::new(self));
        }

        Ok(unsafe { SchemaModule::from_raw(self, module as *mut _) })
    }

    /// Search for a module in the search paths and load it into the context.
    ///
    /// If the revision is not specified, the latest revision found is loaded.
    /// `features` lists the names of the features to enable on the loaded
    /// module.
    pub fn load_module(
        &mut self,
        name: &str,
        revision: Option<&str>,
        features: &[&str],
    ) -> Result<SchemaModule<'_>> {
        let name = CString::new(name).unwrap();
        let revision_cstr;

        let revision_ptr = match revision {
            Some(revision) => {
                revision_cstr = CString::new(revision).unwrap();
                revision_cstr.as_ptr()
            }
            None => std::ptr::null(),
        };

        let features_cstr = features
            .iter()
            .map(|feature| CString::new(*feature).unwrap())
            .collect::<Vec<_>>();
        let mut features_ptr = features_cstr
            .iter()
            .map(|feature| feature.as_ptr())
            .chain(std::iter::once(std::ptr::null::<c_char>()))
            .collect::<Vec<_>>();

        let module = unsafe {
            ffi::ly_ctx_load_module(
                self.raw,
                name.as_ptr(),
                revision_ptr,
                features_ptr.as_mut_ptr(),
            )
        };
        if module.is_null() {
            return Err(Error::new(self));
        }

        Ok(unsafe { SchemaModule::from_raw(self, module as *mut _) })
    }

    /// Get the YANG module of the given name and revision.
    ///
    /// If the revision is not specified, the schema with no revision is
    /// returned (if it is present in the context).
    pub fn get_module(
        &self,
        name: &str,
        revision: Option<&str>,
    ) -> Option<SchemaModule<'_>> {
        let name = CString::new(name).unwrap();
        let revision_cstr;

        let revision_ptr = match revision {
            Some(revision) => {
                revision_cstr = CString::new(revision).unwrap();
                revision_cstr.as_ptr()
            }
            None => std::ptr::null(),
        };

        let module = unsafe {
            ffi::ly_ctx_get_module(self.raw, name.as_ptr(), revision_ptr)
        };
        unsafe { SchemaModule::from_raw_opt(self, module as *mut _) }
    }

    /// Get the latest revision of the YANG module specified by its name.
    ///
    /// YANG modules with no revision are supposed to be the oldest ones.
    pub fn get_module_latest(&self, name: &str) -> Option<SchemaModule<'_>> {
        let name = CString::new(name).unwrap();
        let module =
            unsafe { ffi::ly_ctx_get_module_latest(self.raw, name.as_ptr()) };
        unsafe { SchemaModule::from_raw_opt(self, module as *mut _) }
    }

    /// Get the (only) implemented YANG module specified by its name.
    pub fn get_module_implemented(
        &self,
        name: &str,
    ) -> Option<SchemaModule<'_>> {
        let name = CString::new(name).unwrap();
        let module = unsafe {
            ffi::ly_ctx_get_module_implemented(self.raw, name.as_ptr())
        };
        unsafe { SchemaModule::from_raw_opt(self, module as *mut _) }
    }

    /// Returns an iterator over all modules loaded in the context, including
    /// the internal ones.
    pub fn modules(&self) -> SchemaModules<'_> {
        SchemaModules::new(self)
    }

    /// Returns an iterator over all data nodes from all modules in the
    /// context (depth-first search algorithm).
    pub fn traverse(&self) -> impl Iterator<Item = SchemaNode<'_>> {
        self.modules()
            .flat_map(|module| module.data())
            .flat_map(|snode| snode.traverse())
    }

    /// Get a single schema node based on the given data path (JSON format).
    pub fn find_single(&self, path: &str) -> Result<SchemaNode<'_>> {
        let path = CString::new(path).unwrap();

        let rnode = unsafe {
            ffi::lys_find_path(self.raw, std::ptr::null(), path.as_ptr(), 0)
        };
        if rnode.is_null() {
            return Err(Error::new(self));
        }

        Ok(unsafe { SchemaNode::from_raw(self, rnode as *mut _) })
    }

    /// Number of internal modules, i.e. the modules loaded during the context
    /// creation.
    pub fn internal_module_count(&self) -> u32 {
        unsafe { ffi::ly_ctx_internal_modules_count(self.raw) }
    }

    /// Set the libyang log level to `error`.
    pub fn set_log_level_error(&self) {
        logging::set_log_level_error();
    }

    /// Set the libyang log level to `warning`.
    pub fn set_log_level_warn(&self) {
        logging::set_log_level_warn();
    }

    /// Set the libyang log level to `verbose`.
    pub fn set_log_level_debug(&self) {
        logging::set_log_level_debug();
    }

    /// Set the libyang log level to `debug`.
    pub fn set_log_level_trace(&self) {
        logging::set_log_level_trace();
    }

    /// Register a custom callback to receive libyang log messages.
    ///
    /// The callback is global and can only be registered once per process.
    pub fn init_logger<C>(
        &mut self,
        callback: C,
    ) -> std::result::Result<(), LoggingCallbackAlreadySet>
    where
        C: LogCallback,
    {
        logging::init_logger(callback)
    }

    /// Route libyang log messages to the `log` crate facade.
    pub fn init_default_logger(
        &mut self,
    ) -> std::result::Result<(), LoggingCallbackAlreadySet> {
        logging::init_logger(DefaultLogger::default())
    }
}

unsafe impl Send for Context {}
unsafe impl Sync for Context {}

impl Drop for Context {
    fn drop(&mut self) {
        unsafe { ffi::ly_ctx_destroy(self.raw) };
    }
}
