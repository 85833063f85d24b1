//! Exit code constants for the promptamp CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, uninitialized library)
//! - 2: Validation failure (prompt draft rejected)
//! - 3: Storage failure (document store read/write)
//! - 4: Prompt not found
//! - 5: Bundled script template failed to render

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid library state.
pub const USER_ERROR: i32 = 1;

/// Validation failure: a prompt draft violates the edit-boundary rules.
pub const VALIDATION_FAILURE: i32 = 2;

/// Storage failure: a prompt document or library file could not be read or written.
pub const STORAGE_FAILURE: i32 = 3;

/// The requested prompt id does not exist in the user's library.
pub const NOT_FOUND: i32 = 4;

/// Internal failure rendering the bundled userscript fragments.
pub const TEMPLATE_FAILURE: i32 = 5;
