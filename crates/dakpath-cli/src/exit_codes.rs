//! Exit codes for the `dakpath` binary.
//! These codes are part of the public contract; scripts branch on them.

pub const SUCCESS: i32 = 0;
pub const VALIDATION_FAILED: i32 = 1; // One or more form fields rejected; nothing sent
pub const CONFIG_ERROR: i32 = 2; // Missing key, bad URL, unusable flags
pub const TRACKING_FAILED: i32 = 3; // Upstream or parse failure (same banner to the user)
// 4 is reserved for `TrackError::Busy`; the CLI runs one submission per process.
