//! C-FFI layer for v6canon — used by cgo and other FFI consumers.
//!
//! ZERO logic here. All calls delegate to `v6canon-core`.
//!
//! # Memory Contract
//!
//! All functions that return `*mut c_char` allocate via `CString`.
//! The caller MUST free the returned string by calling `v6canon_free_string()`.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use v6canon_core::FilterTable;

/// Result from a v6canon FFI call.
/// If `error` is null, the call succeeded and `result` contains the output.
/// If `error` is non-null, the call failed and `error` contains the error message.
/// The caller MUST free both `result` and `error` with `v6canon_free_string()`.
#[repr(C)]
pub struct V6Result {
    pub result: *mut c_char,
    pub error: *mut c_char,
}

impl V6Result {
    fn ok(value: String) -> Self {
        match CString::new(value) {
            Ok(c) => V6Result {
                result: c.into_raw(),
                error: std::ptr::null_mut(),
            },
            Err(_) => Self::err("output contains an interior NUL byte".into()),
        }
    }

    fn err(msg: String) -> Self {
        // NULs are stripped, so construction cannot fail
        let c = CString::new(msg.replace('\0', "")).unwrap_or_default();
        V6Result {
            result: std::ptr::null_mut(),
            error: c.into_raw(),
        }
    }
}

/// Helper: convert a C string pointer to a Rust &str.
/// Returns None if the pointer is null or not valid UTF-8.
unsafe fn cstr_to_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

/// Simplify a fully expanded IPv6 address to its compressed form.
///
/// # Safety
/// `address` must be a valid null-terminated UTF-8 C string.
/// The caller must free the returned strings with `v6canon_free_string()`.
#[no_mangle]
pub unsafe extern "C" fn v6canon_simplify(address: *const c_char) -> V6Result {
    let address = match cstr_to_str(address) {
        Some(s) => s,
        None => return V6Result::err("null or invalid UTF-8 input".into()),
    };

    match v6canon_core::simplify(address) {
        Ok(simplified) => V6Result::ok(simplified),
        Err(e) => V6Result::err(e.to_string()),
    }
}

/// Filter rows with inclusive column filters.
///
/// `rows_json` is a JSON array of string arrays; `filters_json` is a JSON
/// array of `[column, value]` pairs. Returns the filtered rows as JSON.
/// Out-of-range filter columns are ignored, as in the core table.
///
/// # Safety
/// `rows_json` and `filters_json` must be valid null-terminated UTF-8 C strings.
/// The caller must free the returned strings with `v6canon_free_string()`.
#[no_mangle]
pub unsafe extern "C" fn v6canon_filter_rows(
    rows_json: *const c_char,
    filters_json: *const c_char,
) -> V6Result {
    let rows_json = match cstr_to_str(rows_json) {
        Some(s) => s,
        None => return V6Result::err("null or invalid UTF-8 rows".into()),
    };
    let filters_json = match cstr_to_str(filters_json) {
        Some(s) => s,
        None => return V6Result::err("null or invalid UTF-8 filters".into()),
    };

    let rows: Vec<Vec<String>> = match serde_json::from_str(rows_json) {
        Ok(rows) => rows,
        Err(e) => return V6Result::err(format!("Invalid rows JSON: {}", e)),
    };
    let filters: Vec<(usize, String)> = match serde_json::from_str(filters_json) {
        Ok(filters) => filters,
        Err(e) => return V6Result::err(format!("Invalid filters JSON: {}", e)),
    };

    let mut table = match FilterTable::new(rows) {
        Ok(table) => table,
        Err(e) => return V6Result::err(e.to_string()),
    };
    for (column, value) in filters {
        table.add_filter(column, value);
    }

    match serde_json::to_string(&table.filtered_rows()) {
        Ok(json) => V6Result::ok(json),
        Err(e) => V6Result::err(format!("Serialization error: {}", e)),
    }
}

/// Free a string previously returned by a v6canon FFI function.
///
/// # Safety
/// `ptr` must be a pointer previously returned by a v6canon FFI function,
/// or null (in which case this is a no-op).
#[no_mangle]
pub unsafe extern "C" fn v6canon_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}
