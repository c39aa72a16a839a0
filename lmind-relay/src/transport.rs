//! Transport seam for the cloud relay. The real session library lives
//! outside this crate; everything here talks to it through the
//! [`RelayTransport`] trait so the protocol core can run against the
//! in-memory [`SimRelay`] in simulation and in tests.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex},
};
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

use crate::{LinkEvent, PointId};

#[derive(Error, Debug)]
pub enum RelayTransportError {
    #[error("I/O Error")]
    Io(#[from] std::io::Error),
    #[error("Frame encode Error")]
    Encode(#[from] serde_json::Error),
    #[error("Relay Transport Error {0}")]
    Transport(String),
}

/// A value carried by a control point. Floats render to one decimal
/// place, matching what the remote app gauges display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Int(i64),
    Float(f32),
    Text(String),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v:}"),
            Value::Float(v) => write!(f, "{v:.1}"),
            Value::Text(v) => write!(f, "{v:}"),
        }
    }
}

/// Transport-level operations in the order the relay saw them, so
/// tests can assert sequencing (sync request before the online
/// announcement, for one)
#[derive(Debug, Clone, PartialEq)]
pub enum RelayOp {
    Publish(PointId, Value),
    Sync(PointId),
}

/// One publish as it would appear on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishFrame {
    pub point: PointId,
    pub value: Value,
    pub ts: i64,
}

/// Trait to allow different implementations of the relay session layer.
/// Both operations are best-effort from the protocol core's point of
/// view: errors are logged by the caller and never escalated.
pub trait RelayTransport: Send {
    /// Push a value to an outbound control point
    fn publish(&mut self, point: PointId, value: &Value) -> Result<(), RelayTransportError>;

    /// Ask the relay to re-deliver the current remote value of an
    /// inbound control point; the answer arrives later as a
    /// [`LinkEvent::Command`]
    fn sync_request(&mut self, point: PointId) -> Result<(), RelayTransportError>;
}

/// In-memory stand-in for the cloud relay, used by the simulation
/// binary and the test suites. Holds the relay-side cache of the last
/// value written to each control point, a full publish log, and
/// (optionally) a sender with which sync requests are answered by
/// echoing the cached command value back as a [`LinkEvent::Command`].
///
/// Clones share state, so callers can keep one handle for inspection
/// while the channel owns another.
#[derive(Clone, Default)]
pub struct SimRelay {
    points: Arc<Mutex<HashMap<PointId, Value>>>,
    publishes: Arc<Mutex<Vec<(PointId, Value)>>>,
    sync_requests: Arc<Mutex<Vec<PointId>>>,
    ops: Arc<Mutex<Vec<RelayOp>>>,
    echo: Option<UnboundedSender<LinkEvent>>,
}

impl SimRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sync requests will be answered by sending the cached command
    /// value into the provided event queue
    pub fn with_echo(echo: UnboundedSender<LinkEvent>) -> Self {
        Self {
            echo: Some(echo),
            ..Self::default()
        }
    }

    /// Pre-load the remote-side value of an inbound point, as if the
    /// app had written it while the device was away
    pub fn seed_point(&self, point: PointId, value: Value) {
        self.points.lock().unwrap().insert(point, value);
    }

    pub fn last_value(&self, point: PointId) -> Option<Value> {
        self.points.lock().unwrap().get(&point).cloned()
    }

    /// All publishes observed so far, oldest first
    pub fn publishes(&self) -> Vec<(PointId, Value)> {
        self.publishes.lock().unwrap().clone()
    }

    pub fn publish_count(&self) -> usize {
        self.publishes.lock().unwrap().len()
    }

    pub fn sync_requests(&self) -> Vec<PointId> {
        self.sync_requests.lock().unwrap().clone()
    }

    pub fn ops(&self) -> Vec<RelayOp> {
        self.ops.lock().unwrap().clone()
    }
}

impl RelayTransport for SimRelay {
    fn publish(&mut self, point: PointId, value: &Value) -> Result<(), RelayTransportError> {
        let frame = PublishFrame {
            point,
            value: value.clone(),
            ts: Local::now().timestamp(),
        };
        log::debug!("sim relay wire frame {:}", serde_json::to_string(&frame)?);

        self.points.lock().unwrap().insert(point, value.clone());
        self.publishes.lock().unwrap().push((point, value.clone()));
        self.ops
            .lock()
            .unwrap()
            .push(RelayOp::Publish(point, value.clone()));
        Ok(())
    }

    fn sync_request(&mut self, point: PointId) -> Result<(), RelayTransportError> {
        self.sync_requests.lock().unwrap().push(point);
        self.ops.lock().unwrap().push(RelayOp::Sync(point));

        if let Some(echo) = &self.echo {
            if let Some(Value::Int(value)) = self.last_value(point) {
                echo.send(LinkEvent::Command { point, value }).map_err(|_| {
                    RelayTransportError::Transport("sync echo queue closed".to_string())
                })?;
            }
        }
        Ok(())
    }
}
