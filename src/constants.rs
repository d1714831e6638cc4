//! Protocol constants for Triton-Lite communication.
//!
//! Serial port configuration, timing parameters and the text command
//! prefixes understood by the vehicle firmware.

/// Baud rate (9600 bps)
pub const BAUD_RATE: u32 = 9600;

/// Read timeout in milliseconds
pub const TIMEOUT_MS: u64 = 1000;

/// Time given to the device to answer a command before draining replies
pub const SETTLE_DELAY_MS: u64 = 100;

/// Command prefix for the surface delay
pub const SURFACE_DELAY_CMD: &str = "SUP_START";

/// Command prefix for the dive delay
pub const DIVE_DELAY_CMD: &str = "EXH_START";

/// Separator between command prefix and value
pub const CMD_SEPARATOR: char = ':';

/// Line terminator for commands and responses
pub const LINE_TERMINATOR: u8 = b'\n';

/// Surface delay shown before the operator edits it, in seconds
pub const DEFAULT_SURFACE_DELAY: &str = "30";

/// Dive delay shown before the operator edits it, in seconds
pub const DEFAULT_DIVE_DELAY: &str = "30";

/// Timestamp format used by the session log
pub const LOG_TIME_FORMAT: &str = "%H:%M:%S";
