//! Warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the CSS and stacking components to report unsupported input.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about an unsupported feature (prints once per unique message).
///
/// Returns `true` if this call printed the warning, `false` if the same
/// message had already been reported.
///
/// # Example
/// ```ignore
/// warn_once("CSS", "unknown property 'flex-flow'");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{}", format!("[Strata {component}] ⚠ {message}").yellow());
    }
    should_print
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_once_deduplicates() {
        assert!(warn_once("test", "dedup-check-message"));
        assert!(!warn_once("test", "dedup-check-message"));
        assert!(warn_once("other", "dedup-check-message"));
    }
}
