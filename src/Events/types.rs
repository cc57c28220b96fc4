// Event type codes.
//
// The numbering is not a global registry: what a code means is settled
// between the producer and the handler that receives it. The framework block
// below is the typical mapping from interrupt sources to events.

pub const NULL_TYPE: u8 = 0;

// Digital pins
pub const FALLING_TYPE: u8 = 1;
pub const RISING_TYPE: u8 = 2;
pub const CHANGE_TYPE: u8 = 3;

// Analog pins
pub const SAMPLE_REQUEST_TYPE: u8 = 4;
pub const SAMPLE_COMPLETED_TYPE: u8 = 5;

// Watchdog and timers
pub const WATCHDOG_TYPE: u8 = 6;
pub const TIMEOUT_TYPE: u8 = 7;

// Finite state machines
pub const BEGIN_TYPE: u8 = 8;
pub const END_TYPE: u8 = 9;

// Threads
pub const RUN_TYPE: u8 = 10;

// Device drivers and protocol stacks
pub const CONNECT_TYPE: u8 = 11;
pub const DISCONNECT_TYPE: u8 = 12;
pub const RECEIVE_REQUEST_TYPE: u8 = 13;
pub const RECEIVE_COMPLETED_TYPE: u8 = 14;
pub const SEND_REQUEST_TYPE: u8 = 15;
pub const SEND_COMPLETED_TYPE: u8 = 16;

// Device drivers and storage
pub const OPEN_TYPE: u8 = 17;
pub const CLOSE_TYPE: u8 = 18;
pub const READ_REQUEST_TYPE: u8 = 19;
pub const READ_COMPLETED_TYPE: u8 = 20;
pub const WRITE_REQUEST_TYPE: u8 = 21;
pub const WRITE_COMPLETED_TYPE: u8 = 22;
pub const COMMAND_REQUEST_TYPE: u8 = 23;
pub const COMMAND_COMPLETED_TYPE: u8 = 24;

// Servers
pub const SERVICE_REQUEST_TYPE: u8 = 25;
pub const SERVICE_RESPONSE_TYPE: u8 = 26;

/// First code of the application range (64..=254).
pub const USER_TYPE: u8 = 64;

/// Generic error signal.
pub const ERROR_TYPE: u8 = 255;

const RESERVED_NAMES: [&str; 27] = [
    "null",
    "falling",
    "rising",
    "change",
    "sample_request",
    "sample_completed",
    "watchdog",
    "timeout",
    "begin",
    "end",
    "run",
    "connect",
    "disconnect",
    "receive_request",
    "receive_completed",
    "send_request",
    "send_completed",
    "open",
    "close",
    "read_request",
    "read_completed",
    "write_request",
    "write_completed",
    "command_request",
    "command_completed",
    "service_request",
    "service_response",
];

/// True for codes the framework assigns a meaning to (including null and error).
#[inline]
pub const fn is_reserved(kind: u8) -> bool {
    kind <= SERVICE_RESPONSE_TYPE || kind == ERROR_TYPE
}

/// True for the application range 64..=254.
#[inline]
pub const fn is_user(kind: u8) -> bool {
    kind >= USER_TYPE && kind < ERROR_TYPE
}

/// Returns `USER_TYPE + offset`, or `None` if that would leave the user range.
pub const fn user_type(offset: u8) -> Option<u8> {
    if offset < ERROR_TYPE - USER_TYPE {
        Some(USER_TYPE + offset)
    } else {
        None
    }
}

/// Short snake_case name of a reserved code, for log lines and debug output.
pub fn type_name(kind: u8) -> Option<&'static str> {
    match kind {
        ERROR_TYPE => Some("error"),
        _ => RESERVED_NAMES.get(kind as usize).copied(),
    }
}

