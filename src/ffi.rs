//! C-ABI Foreign Function Interface for ooxml-validator.
//!
//! This module exposes the JSON request contract to C, C#, Python and any
//! other language with C FFI support.
//!
//! # Memory Management
//!
//! Strings returned by `ooxml_validator_invoke` must be freed using
//! `ooxml_validator_free_string`.
//!
//! # Error Handling
//!
//! `ooxml_validator_invoke` returns either a result string or null, never
//! both. On null, `ooxml_validator_last_error` holds the error message.
//!
//! # Example (C)
//!
//! ```c
//! #include <stdio.h>
//! #include "ooxml_validator.h"
//!
//! int main() {
//!     char* json = ooxml_validator_invoke(
//!         "{\"fileName\": \"report.docx\", \"format\": \"2\"}");
//!     if (!json) {
//!         fprintf(stderr, "Error: %s\n", ooxml_validator_last_error());
//!         return 1;
//!     }
//!
//!     printf("%s\n", json);
//!     ooxml_validator_free_string(json);
//!     return 0;
//! }
//! ```
//!
//! # Example (C#)
//!
//! ```csharp
//! using System;
//! using System.Runtime.InteropServices;
//!
//! public class OoxmlValidator {
//!     [DllImport("ooxml_validator")]
//!     public static extern IntPtr ooxml_validator_invoke(string request);
//!
//!     [DllImport("ooxml_validator")]
//!     public static extern IntPtr ooxml_validator_last_error();
//!
//!     [DllImport("ooxml_validator")]
//!     public static extern void ooxml_validator_free_string(IntPtr str);
//! }
//! ```

use std::cell::RefCell;
use std::ffi::{c_char, CStr, CString};
use std::panic::catch_unwind;
use std::ptr;

// Thread-local storage for the last error message.
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last error message.
fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg.replace('\0', " ")).ok();
    });
}

/// Clear the last error message.
fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Get the version of the library.
///
/// # Safety
///
/// Returns a static string that must not be freed.
#[no_mangle]
pub extern "C" fn ooxml_validator_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}

/// Get the last error message.
///
/// # Safety
///
/// Returns a pointer to a thread-local error string, or null when the last
/// call succeeded. The pointer is valid until the next call to any
/// ooxml_validator function on the same thread.
#[no_mangle]
pub extern "C" fn ooxml_validator_last_error() -> *const c_char {
    LAST_ERROR.with(|e| {
        e.borrow()
            .as_ref()
            .map(|s| s.as_ptr())
            .unwrap_or(ptr::null())
    })
}

/// Validate the document named by a JSON request and return the findings
/// as JSON.
///
/// # Safety
///
/// - `request` must be a valid null-terminated UTF-8 string.
/// - Returns null on error. Use `ooxml_validator_last_error` to get the error message.
/// - The returned string must be freed with `ooxml_validator_free_string`.
#[no_mangle]
pub unsafe extern "C" fn ooxml_validator_invoke(request: *const c_char) -> *mut c_char {
    clear_last_error();

    if request.is_null() {
        set_last_error("request is null");
        return ptr::null_mut();
    }

    let result = catch_unwind(|| {
        let request = CStr::from_ptr(request).to_str().map_err(|e| e.to_string())?;
        crate::invoke(request).map_err(|e| e.to_string())
    });

    match result {
        Ok(Ok(json)) => match CString::new(json) {
            Ok(s) => s.into_raw(),
            Err(_) => {
                set_last_error("output contains null byte");
                ptr::null_mut()
            }
        },
        Ok(Err(e)) => {
            set_last_error(&e);
            ptr::null_mut()
        }
        Err(_) => {
            set_last_error("panic occurred during validation");
            ptr::null_mut()
        }
    }
}

/// Free a string allocated by this library.
///
/// # Safety
///
/// - `s` must be a pointer returned by an ooxml_validator function, or null.
/// - After calling this function, the pointer is invalid and must not be used.
#[no_mangle]
pub unsafe extern "C" fn ooxml_validator_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = CString::from_raw(s);
    }
}
