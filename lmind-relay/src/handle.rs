use actix::prelude::*;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

use crate::{LinkEvent, PointId};

#[derive(Error, Debug)]
pub enum RelayHandleError {
    #[error("Link event queue closed")]
    QueueClosed,
}

/// [`RelayHandle`] is the injection surface handed to the external
/// session collaborator: an actor whose messages are forwarded into
/// the unbounded queue the control loop drains each iteration. The
/// collaborator never touches [`ConnectionState`](`crate::ConnectionState`)
/// directly; it only reports what happened on the wire.
pub struct RelayHandle(UnboundedSender<LinkEvent>);

impl RelayHandle {
    pub fn new(events: UnboundedSender<LinkEvent>) -> Self {
        Self(events)
    }

    fn forward(&self, event: LinkEvent) -> Result<(), RelayHandleError> {
        self.0.send(event).map_err(|e| {
            log::error!("Error forwarding link event to control loop {e:}");
            RelayHandleError::QueueClosed
        })
    }
}

impl Actor for RelayHandle {
    type Context = Context<Self>;
}

#[derive(Message)]
#[rtype(result = "LinkUpResponse")]
pub struct LinkUp;
type LinkUpResponse = Result<(), RelayHandleError>;

impl Handler<LinkUp> for RelayHandle {
    type Result = LinkUpResponse;

    fn handle(&mut self, _msg: LinkUp, _ctx: &mut Self::Context) -> Self::Result {
        self.forward(LinkEvent::Up)
    }
}

#[derive(Message)]
#[rtype(result = "LinkDownResponse")]
pub struct LinkDown;
type LinkDownResponse = Result<(), RelayHandleError>;

impl Handler<LinkDown> for RelayHandle {
    type Result = LinkDownResponse;

    fn handle(&mut self, _msg: LinkDown, _ctx: &mut Self::Context) -> Self::Result {
        self.forward(LinkEvent::Down)
    }
}

#[derive(Message)]
#[rtype(result = "CommandReceivedResponse")]
pub struct CommandReceived {
    pub point: PointId,
    pub value: i64,
}
type CommandReceivedResponse = Result<(), RelayHandleError>;

impl Handler<CommandReceived> for RelayHandle {
    type Result = CommandReceivedResponse;

    fn handle(&mut self, msg: CommandReceived, _ctx: &mut Self::Context) -> Self::Result {
        self.forward(LinkEvent::Command {
            point: msg.point,
            value: msg.value,
        })
    }
}
