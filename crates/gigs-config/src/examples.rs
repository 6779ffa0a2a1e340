// crates/gigs-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example harness configuration.
// Purpose: Deterministic example for docs and tests.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example of a `gigs.toml` file listing every setting with its
//! default value, except for the log sink which writes to a file.

/// Returns a canonical example `gigs.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[tolerance]
relative = 1e-7

[options]
preserve_user_values = true
skip_identification_check = false
validation_enabled = true
standard_alias_supported = true
dependency_identification_supported = true

[log]
sink = "file"
path = "gigs-events.jsonl"
"#,
    )
}
