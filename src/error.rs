//
// Copyright (c) The yangkit Core Contributors
//
// SPDX-License-Identifier: MIT
//

use crate::context::Context;
use crate::utils::*;
use libyang3_sys as ffi;

/// A convenience wrapper around `Result` for `yangkit::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Detailed error information, lifted from the last entry of the context's
/// error list.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    /// Error code.
    pub errcode: ffi::LY_ERR::Type,
    /// Validation error code.
    pub vecode: ffi::LY_VECODE::Type,
    /// Error message.
    pub msg: Option<String>,
    /// Path to the data node where the error occurred.
    pub data_path: Option<String>,
    /// Path to the schema node where the error occurred.
    pub schema_path: Option<String>,
    /// Line of the input where the error occurred.
    pub line: u64,
    /// The value of the error-app-tag statement, if any.
    pub apptag: Option<String>,
}

impl Error {
    pub fn new(ctx: &Context) -> Error {
        let eitem = unsafe { ffi::ly_err_last(ctx.raw) };
        if eitem.is_null() {
            return Error::from_errcode(ffi::LY_ERR::LY_EOTHER);
        }

        let errcode = unsafe { (*eitem).err };
        let vecode = unsafe { (*eitem).vecode };
        let msg = char_ptr_to_opt_string(unsafe { (*eitem).msg });
        let data_path = char_ptr_to_opt_string(unsafe { (*eitem).data_path });
        let schema_path =
            char_ptr_to_opt_string(unsafe { (*eitem).schema_path });
        let line = unsafe { (*eitem).line };
        let apptag = char_ptr_to_opt_string(unsafe { (*eitem).apptag });

        Error {
            errcode,
            vecode,
            msg,
            data_path,
            schema_path,
            line,
            apptag,
        }
    }

    // Used when no context is available to read the error list from (e.g.
    // context creation failed).
    pub(crate) fn from_errcode(errcode: ffi::LY_ERR::Type) -> Error {
        Error {
            errcode,
            vecode: ffi::LY_VECODE::LYVE_SUCCESS,
            msg: None,
            data_path: None,
            schema_path: None,
            line: 0,
            apptag: None,
        }
    }
}

impl std::fmt::Display for Error {
    // Print only the base error message by default.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(msg) = &self.msg {
            write!(f, "{}", msg)
        } else {
            write!(f, "Unknown error: {}", self.errcode)
        }
    }
}

impl std::error::Error for Error {}
