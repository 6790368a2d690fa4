//! Fuzz target for frame classification
//!
//! Decodes arbitrary text as an inbound frame.
//!
//! # Invariants
//!
//! - NEVER panic
//! - Non-list events keep the whole frame
//! - A user list joined back with `,` reproduces the frame minus its prefix

#![no_main]

use libfuzzer_sys::fuzz_target;
use relaychat_proto::{InboundEvent, USERS_PREFIX, decode};

fuzz_target!(|frame: &str| {
    match decode(frame) {
        InboundEvent::UserListUpdated { users } => {
            let rest = frame.strip_prefix(USERS_PREFIX).expect("list without prefix");
            assert_eq!(users.join(","), rest);
        }
        other => assert_eq!(other.text(), Some(frame)),
    }
});
