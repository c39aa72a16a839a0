//! The `lmind-relay` crate defines the device-side sync layer for the
//! led-minder system: the protocol core that keeps local actuator state
//! and remote app state in agreement across a managed cloud relay.
//!
//! The crate defines a top-level [`RelayChannel`] object which owns the
//! link [`ConnectionState`] and mediates all traffic with the relay:
//! 1. Inbound command events addressed to the command control point are
//!    dispatched to the [`Actuator`], which drives the LED pin and hands
//!    back a status string that is published upstream as an ack.
//! 2. Outbound publishes (status strings, telemetry readings) are
//!    attempted best-effort and silently dropped while the link is down;
//!    nothing is queued for retry.
//! 3. On every transition into Connected the channel issues a sync
//!    request for the command point before anything else, so remote
//!    state wins after a reconnect rather than whatever the device last
//!    cached locally.
//!
//! The actual session/transport is an external collaborator behind the
//! [`RelayTransport`] trait; link and command events are injected into
//! the control loop's event queue either directly or via the
//! [`RelayHandle`] actor.

mod actuator;
mod channel;
mod handle;
mod link;
mod transport;

pub use actuator::Actuator;
pub use channel::RelayChannel;
pub use handle::{CommandReceived, LinkDown, LinkUp, RelayHandle, RelayHandleError};
pub use link::{ConnectionState, LinkEvent};
pub use transport::{RelayOp, RelayTransport, RelayTransportError, SimRelay, Value};

/// Identifies a control point: a named, typed slot in the relay through
/// which values flow between device and remote app
pub type PointId = u8;

/// Inbound command point: integer, 0 = LED off, nonzero = LED on
pub const COMMAND_POINT: PointId = 0;
/// Outbound status point: human-readable status string
pub const STATUS_POINT: PointId = 1;
/// Outbound telemetry points, one decimal place when rendered
pub const TEMPERATURE_POINT: PointId = 2;
pub const HUMIDITY_POINT: PointId = 3;

pub const STATUS_ON: &str = "LED Status: ON";
pub const STATUS_OFF: &str = "LED Status: OFF";
pub const STATUS_ONLINE: &str = "System Online - Ready!";

/// Fixed telemetry publish cadence while connected
pub const TELEMETRY_PERIOD_MILLIS: u64 = 2000;
