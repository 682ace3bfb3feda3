//! Address plausibility check.
//!
//! Purely syntactic: four dot-separated groups of 1-3 digits, or eight
//! colon-separated groups of 1-4 hex digits. Octet ranges are not checked
//! (`999.1.1.1` passes) and IPv6 `::` compression is not accepted. Anything
//! subtler is left to the upstream service.

use std::sync::LazyLock;

use regex::Regex;

use crate::error_handling::ValidationError;

const ADDRESS_PATTERN: &str =
    r"^(?:[0-9]{1,3}\.){3}[0-9]{1,3}$|^(?:[0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}$";

static ADDRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ADDRESS_PATTERN).expect("address pattern is valid"));

/// Returns true if `candidate` looks like an IPv4 or full-form IPv6 literal.
pub fn is_plausible_address(candidate: &str) -> bool {
    ADDRESS_RE.is_match(candidate)
}

/// Checks `candidate` and returns the user-facing error when it fails.
pub fn validate_address(candidate: &str) -> Result<(), ValidationError> {
    if is_plausible_address(candidate) {
        Ok(())
    } else {
        Err(ValidationError {
            input: candidate.to_string(),
        })
    }
}
