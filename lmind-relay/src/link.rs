use crate::PointId;

/// [`ConnectionState`] tracks whether the relay session is up. Owned
/// exclusively by [`RelayChannel`](`crate::channel::RelayChannel`);
/// every other component only reads it, so no locking is needed under
/// the single-threaded control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

/// [`LinkEvent`] condenses everything the external session collaborator
/// can signal into a single enum that the control loop drains
/// synchronously each iteration. Draining explicitly (rather than
/// letting the transport invoke callbacks re-entrantly) is what makes
/// the command-before-telemetry ordering observable and testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent {
    /// Session handshake succeeded
    Up,
    /// Transport-level loss; publishes are suppressed until the next Up
    Down,
    /// Inbound value written to a control point by the remote app
    Command { point: PointId, value: i64 },
}
