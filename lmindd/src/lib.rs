//! Control-loop daemon for the led-minder system: composes the relay
//! sync channel, the LED actuator and the synthetic telemetry feed,
//! and drives them from a single cooperative event loop. One loop
//! iteration applies at most one pending link event or one timer tick;
//! commands drained in an iteration are always applied before that
//! iteration's telemetry goes out.

pub mod config;
pub mod event;
pub mod minder;
pub mod scheduler;
pub mod sim;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedMinderError {
    #[error("I/O Error")]
    Io(#[from] std::io::Error),
    #[error("Config parse Error")]
    Config(#[from] toml::de::Error),
    #[error("Relay Transport Error")]
    Transport(#[from] lmind_relay::RelayTransportError),
    #[error("Relay Handle Error")]
    Handle(#[from] lmind_relay::RelayHandleError),
    #[error("Actix mailbox Error")]
    Mailbox(#[from] actix::MailboxError),
    #[error("Event Handling Error")]
    EventError,
}
