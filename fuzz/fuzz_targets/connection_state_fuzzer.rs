//! Fuzz target for the connection state machine
//!
//! Feeds arbitrary sequences of transport, timer and user events to a
//! [`ConnectionManager`] and checks its invariants after every step.
//!
//! # Invariants
//!
//! - NEVER panic
//! - `reconnect_attempts` never exceeds the cap
//! - `reconnect_attempts` is 0 whenever the state is `Connected`
//! - `Send` is only emitted while `Connected`
//! - `Open` is only emitted on the way into `Connecting`
//! - `Failed` is terminal and only ever reports diagnostics

#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use relaychat_core::{
    ConnectionAction, ConnectionConfig, ConnectionManager, ConnectionState, DisplayName,
};

#[derive(Debug, Clone, Arbitrary)]
enum Op {
    Connect,
    Opened,
    Closed,
    Error(String),
    Message(String),
    TimerElapsed,
    SendText(String),
    SetName(String),
}

#[derive(Debug, Arbitrary)]
struct Input {
    max_reconnect_attempts: u8,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let config = ConnectionConfig {
        url: "ws://fuzz.test:8765".to_string(),
        max_reconnect_attempts: u32::from(input.max_reconnect_attempts % 8),
        reconnect_delay: Duration::from_millis(3000),
    };
    let max = config.max_reconnect_attempts;
    let mut conn = ConnectionManager::new(config);

    for op in input.ops {
        let before = conn.state();

        let actions = match op {
            Op::Connect => conn.connect(),
            Op::Opened => conn.handle_open(),
            Op::Closed => conn.handle_close(),
            Op::Error(diagnostic) => conn.handle_error(diagnostic),
            Op::Message(frame) => conn.handle_message(frame),
            Op::TimerElapsed => conn.handle_reconnect_timer(),
            Op::SendText(text) => conn.send_text(text),
            Op::SetName(raw) => match DisplayName::new(&raw) {
                Ok(name) => conn.set_name(name),
                Err(_) => vec![],
            },
        };

        let after = conn.state();

        assert!(conn.reconnect_attempts() <= max);
        if after == ConnectionState::Connected {
            assert_eq!(conn.reconnect_attempts(), 0);
        }
        if before == ConnectionState::Failed {
            assert_eq!(after, ConnectionState::Failed);
            assert!(actions.iter().all(|a| matches!(a, ConnectionAction::Diagnostic(_))));
        }

        for action in &actions {
            match action {
                ConnectionAction::Send(_) => assert_eq!(after, ConnectionState::Connected),
                ConnectionAction::Open { .. } => assert_eq!(after, ConnectionState::Connecting),
                _ => {}
            }
        }
    }
});
