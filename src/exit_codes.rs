//! Exit code constants for the pipecfg CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable files, unknown variant)
//! - 2: Configuration error (parse failure, schema or glob validation)
//! - 3: Referenced files are missing from the project

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable files, or an unknown variant.
pub const USER_ERROR: i32 = 1;

/// The configuration could not be parsed or failed validation.
pub const CONFIG_ERROR: i32 = 2;

/// The configuration references files that do not exist.
pub const MISSING_REFERENCES: i32 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, CONFIG_ERROR, MISSING_REFERENCES];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }
}
