//! Case- and diacritic-insensitive text folding.
//!
//! # Responsibility
//! - Provide the folding rule behind title substring search.
//! - Expose the rule to SQL as `fold_text(text)` so predicates run in store.
//!
//! # Invariants
//! - Folding is deterministic and idempotent.
//! - `NULL` input folds to `NULL`.

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// SQL name of the folding function registered on every store connection.
pub const FOLD_FUNCTION_NAME: &str = "fold_text";

/// Folds text for "contains" comparisons.
///
/// Decomposes to NFD, drops combining marks and lowercases, so `"Café"` and
/// `"CAFE"` both fold to `"cafe"`.
pub fn fold_text(value: &str) -> String {
    value
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Returns whether `haystack` contains `needle` under [`fold_text`] rules.
pub fn folded_contains(haystack: &str, needle: &str) -> bool {
    fold_text(haystack).contains(fold_text(needle).as_str())
}

/// Registers `fold_text(text)` on the given connection.
pub fn register_fold_function(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        FOLD_FUNCTION_NAME,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value = ctx.get::<Option<String>>(0)?;
            Ok(value.map(|text| fold_text(&text)))
        },
    )
}
