//! Stable identifiers for checks and finding codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_FSD_LAYER_IMPORTS: &str = "fsd.layer_imports";

// Codes: fsd.layer_imports
pub const CODE_INVALID_LAYER_IMPORT: &str = "invalid_layer_import";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
