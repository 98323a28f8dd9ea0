// FFI functions are inherently unsafe; callers must ensure pointer validity.
// Safety contracts are documented per-function in the public API comments.
#![allow(clippy::missing_safety_doc)]

// spellreg-ffi: C-compatible FFI layer for the dictionary registry.
//
// Lets an editor written in another language own a `Registry` and query
// dictionaries through a stable C ABI.
//
// Memory management rules:
// - Opaque `Registry` pointer: created by `spellreg_new`, freed by `spellreg_free`.
// - `Dictionary` pointers are borrowed from the registry. They stay valid
//   until `spellreg_clear_cache` or `spellreg_free` is called on it.
// - Returned string arrays: caller must free with `spellreg_free_str_array`.
// - Returned catalogs: caller must free with `spellreg_free_catalog`.
// - All input strings are UTF-8 encoded, null-terminated C strings.
// - A registry must not be used from two threads at once.

use std::ffi::{CStr, CString, c_char, c_int, c_void};
use std::ptr;

use spellreg::{Dictionary, Registry, SearchPaths, SubscriptionId};
use tracing::debug;

// ── Registry lifecycle ──────────────────────────────────────────

/// Create a registry.
///
/// `search_path_list` is a platform path list (`:`-separated on Unix, `;` on
/// Windows) of dictionary directories in priority order. NULL selects the
/// default user and system directories.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spellreg_new(search_path_list: *const c_char) -> *mut Registry {
    let search_paths = if search_path_list.is_null() {
        SearchPaths::system_default()
    } else {
        let Some(list) = cstr_to_str(search_path_list) else {
            return ptr::null_mut();
        };
        SearchPaths::from_path_list(list)
    };
    Box::into_raw(Box::new(Registry::with_hunspell(search_paths)))
}

/// Free a registry created by `spellreg_new`, with every dictionary it loaded.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spellreg_free(registry: *mut Registry) {
    if !registry.is_null() {
        drop(unsafe { Box::from_raw(registry) });
    }
}

// ── Catalog ─────────────────────────────────────────────────────

/// Catalog snapshot. `names[i]` was found at `paths[i]`.
#[repr(C)]
pub struct SpellregCatalog {
    /// NULL-terminated array of display names (C strings).
    pub names: *mut *mut c_char,
    /// NULL-terminated array of canonical `.dic` paths, parallel to `names`.
    pub paths: *mut *mut c_char,
    pub count: usize,
}

/// Copy the registry's catalog, rescanning the search paths if
/// `force_reload` is non-zero or no catalog exists yet.
///
/// Free the result with `spellreg_free_catalog`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spellreg_catalog(
    registry: *mut Registry,
    force_reload: c_int,
) -> SpellregCatalog {
    let Some(registry) = (unsafe { registry.as_mut() }) else {
        return SpellregCatalog {
            names: ptr::null_mut(),
            paths: ptr::null_mut(),
            count: 0,
        };
    };
    let catalog = registry.catalog(force_reload != 0);
    let names: Vec<String> = catalog.iter().map(|e| e.name.clone()).collect();
    let paths: Vec<String> = catalog
        .iter()
        .map(|e| e.path.to_string_lossy().into_owned())
        .collect();
    SpellregCatalog {
        count: names.len(),
        names: strings_to_c_array(&names),
        paths: strings_to_c_array(&paths),
    }
}

/// Free a catalog returned by `spellreg_catalog`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spellreg_free_catalog(catalog: SpellregCatalog) {
    free_null_terminated_array(catalog.names);
    free_null_terminated_array(catalog.paths);
}

/// Callback invoked after each catalog rebuild.
pub type SpellregCatalogCallback = extern "C" fn(user_data: *mut c_void);

/// Register `callback` to run after every catalog rebuild.
///
/// Returns a subscription id for `spellreg_remove_catalog_callback`, or
/// `u64::MAX` if `registry` is NULL. `user_data` is passed through untouched.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spellreg_add_catalog_callback(
    registry: *mut Registry,
    callback: SpellregCatalogCallback,
    user_data: *mut c_void,
) -> u64 {
    let Some(registry) = (unsafe { registry.as_mut() }) else {
        return u64::MAX;
    };
    let target = CallbackTarget {
        callback,
        user_data,
    };
    registry.subscribe(move || target.call()).into_raw()
}

/// Remove a callback. Returns 1 if it was registered, 0 otherwise.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spellreg_remove_catalog_callback(
    registry: *mut Registry,
    subscription: u64,
) -> c_int {
    let Some(registry) = (unsafe { registry.as_mut() }) else {
        return 0;
    };
    registry.unsubscribe(SubscriptionId::from_raw(subscription)) as c_int
}

// ── Dictionaries ────────────────────────────────────────────────

/// Look up (and load on first use) the dictionary for `language`.
///
/// Returns NULL for an empty code or when no dictionary files exist. The
/// pointer is owned by the registry.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spellreg_dictionary(
    registry: *mut Registry,
    language: *const c_char,
) -> *mut Dictionary {
    let Some(registry) = (unsafe { registry.as_mut() }) else {
        return ptr::null_mut();
    };
    let Some(language) = cstr_to_str(language) else {
        return ptr::null_mut();
    };
    match registry.dictionary(language) {
        Some(dict) => dict as *mut Dictionary,
        None => ptr::null_mut(),
    }
}

/// Returns 1 if the engine opened the dictionary, 0 if it is degraded, -1 on error.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spellreg_dictionary_is_loaded(dict: *const Dictionary) -> c_int {
    let Some(dict) = (unsafe { dict.as_ref() }) else {
        return -1;
    };
    dict.is_loaded() as c_int
}

/// Drop every cached dictionary. Invalidates all `Dictionary` pointers.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spellreg_clear_cache(registry: *mut Registry) {
    if let Some(registry) = unsafe { registry.as_mut() } {
        registry.clear_cache();
    }
}

// ── Spell checking ──────────────────────────────────────────────

/// Check whether a word is correctly spelled.
/// Returns 1 for correct, 0 for incorrect, -1 on error.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spellreg_spell(dict: *const Dictionary, word: *const c_char) -> c_int {
    let Some(dict) = (unsafe { dict.as_ref() }) else {
        return -1;
    };
    let Some(word) = cstr_to_str(word) else {
        return -1;
    };
    if dict.is_word_correct(word) { 1 } else { 0 }
}

/// Generate spelling suggestions, best first.
///
/// Returns a NULL-terminated array of C strings. Caller must free with
/// `spellreg_free_str_array`. Returns NULL on error.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spellreg_suggest(
    dict: *const Dictionary,
    word: *const c_char,
) -> *mut *mut c_char {
    let Some(dict) = (unsafe { dict.as_ref() }) else {
        return ptr::null_mut();
    };
    let Some(word) = cstr_to_str(word) else {
        return ptr::null_mut();
    };
    strings_to_c_array(&dict.suggestions_for_word(word))
}

/// Accept a word for the lifetime of the dictionary.
/// Returns 0 on success, -1 on error.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spellreg_ignore_word(dict: *mut Dictionary, word: *const c_char) -> c_int {
    let Some(dict) = (unsafe { dict.as_mut() }) else {
        return -1;
    };
    let Some(word) = cstr_to_str(word) else {
        return -1;
    };
    dict.ignore_word(word);
    0
}

/// Free a NULL-terminated array of C strings.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spellreg_free_str_array(arr: *mut *mut c_char) {
    free_null_terminated_array(arr);
}

// ── Internal helpers ────────────────────────────────────────────

struct CallbackTarget {
    callback: SpellregCatalogCallback,
    user_data: *mut c_void,
}

// The registry is single-threaded per the rules above; `user_data` is only
// ever passed back to the caller's own callback.
unsafe impl Send for CallbackTarget {}

impl CallbackTarget {
    fn call(&self) {
        (self.callback)(self.user_data);
    }
}

fn cstr_to_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    let s = unsafe { CStr::from_ptr(s) }.to_str();
    if s.is_err() {
        debug!("rejecting non-UTF-8 string from caller");
    }
    s.ok()
}

fn str_to_c(s: &str) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

fn free_c_str(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

fn strings_to_c_array(strings: &[String]) -> *mut *mut c_char {
    let mut ptrs: Vec<*mut c_char> = strings.iter().map(|s| str_to_c(s)).collect();
    ptrs.push(ptr::null_mut());
    let mut ptrs = ptrs.into_boxed_slice();
    let ptr = ptrs.as_mut_ptr();
    std::mem::forget(ptrs);
    ptr
}

fn free_null_terminated_array(arr: *mut *mut c_char) {
    if arr.is_null() {
        return;
    }
    let mut len = 0;
    loop {
        let p = unsafe { *arr.add(len) };
        if p.is_null() {
            break;
        }
        free_c_str(p);
        len += 1;
    }
    // Allocated as a boxed slice of len + 1 (NULL terminator included).
    drop(unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(arr, len + 1)) });
}
