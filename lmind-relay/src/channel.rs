use embedded_hal::digital::OutputPin;
use lmind_sensor::TelemetrySample;

use crate::{
    Actuator, ConnectionState, LinkEvent, PointId, RelayTransport, Value, COMMAND_POINT,
    HUMIDITY_POINT, STATUS_ONLINE, STATUS_POINT, TEMPERATURE_POINT,
};

/// [`RelayChannel`] is the single owner of the link
/// [`ConnectionState`] and the only path through which values cross
/// the relay in either direction.
///
/// All failure handling is local state-gating: while the link is down,
/// inbound commands are dropped (they were addressed to a session that
/// no longer exists) and outbound publishes are dropped (not queued);
/// while it is up, publishes are best-effort with transport errors
/// logged and swallowed. Nothing escalates to the caller as a hard
/// failure.
pub struct RelayChannel {
    /// Dynamic trait object so the session layer is swappable
    /// (simulated relay in tests and sim builds)
    transport: Box<dyn RelayTransport>,
    state: ConnectionState,
}

impl RelayChannel {
    pub fn new(transport: Box<dyn RelayTransport>) -> Self {
        Self {
            transport,
            state: ConnectionState::Disconnected,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    /// Apply one drained link event. Commands mutate the actuator and
    /// ack with a status publish; Up/Down are the only transitions the
    /// connection state ever takes.
    pub fn handle_event<P: OutputPin>(&mut self, event: LinkEvent, actuator: &mut Actuator<P>) {
        match event {
            LinkEvent::Up => {
                self.state = ConnectionState::Connected;
                log::info!("Relay session up, syncing command point from remote");

                // Remote wins after a reconnect: pull the app's current
                // command value before announcing ourselves
                self.transport
                    .sync_request(COMMAND_POINT)
                    .map_err(|e| log::error!("Sync request failed {e:}"))
                    .ok();

                self.publish(STATUS_POINT, Value::text(STATUS_ONLINE));
            }
            LinkEvent::Down => {
                self.state = ConnectionState::Disconnected;
                log::warn!("Relay session down, publishes suppressed until reconnect");
            }
            LinkEvent::Command { point, value } => {
                if !self.is_connected() {
                    log::debug!("Dropping stale command for point {point:} while disconnected");
                    return;
                }
                if point != COMMAND_POINT {
                    log::warn!("Command addressed to untracked point {point:}, ignoring");
                    return;
                }

                let status = actuator.apply_command(value);
                log::info!("Command {value:} applied, LED on: {:}", actuator.is_on());
                self.publish(STATUS_POINT, Value::text(status));
            }
        }
    }

    /// Best-effort publish: dropped without trace while disconnected,
    /// no delivery confirmation while connected
    pub fn publish(&mut self, point: PointId, value: Value) {
        if !self.is_connected() {
            log::trace!("Dropping publish to point {point:} while disconnected");
            return;
        }

        self.transport
            .publish(point, &value)
            .map_err(|e| log::error!("Publish to point {point:} failed {e:}"))
            .ok();
    }

    /// Push one telemetry sample to the temperature and humidity
    /// points, in that order
    pub fn publish_sample(&mut self, sample: &TelemetrySample) {
        log::info!(
            "Telemetry #{:}: temp {:.1} C, hum {:.1} %",
            sample.sample_index,
            sample.temperature,
            sample.humidity
        );
        self.publish(TEMPERATURE_POINT, Value::Float(sample.temperature));
        self.publish(HUMIDITY_POINT, Value::Float(sample.humidity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SimRelay, STATUS_OFF, STATUS_ON};

    #[derive(Default)]
    struct TestPin(bool);

    impl embedded_hal::digital::ErrorType for TestPin {
        type Error = core::convert::Infallible;
    }

    impl OutputPin for TestPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.0 = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.0 = true;
            Ok(())
        }
    }

    fn channel_with_relay() -> (RelayChannel, SimRelay, Actuator<TestPin>) {
        let relay = SimRelay::new();
        let channel = RelayChannel::new(Box::new(relay.clone()));
        (channel, relay, Actuator::new(TestPin::default()))
    }

    #[test]
    fn starts_disconnected() {
        let (channel, relay, _) = channel_with_relay();
        assert_eq!(channel.state(), ConnectionState::Disconnected);
        assert_eq!(relay.publish_count(), 0);
    }

    #[test]
    fn publishes_dropped_while_disconnected() {
        let (mut channel, relay, _) = channel_with_relay();
        channel.publish(STATUS_POINT, Value::text("should not appear"));
        channel.publish(TEMPERATURE_POINT, Value::Float(25.0));
        assert_eq!(relay.publish_count(), 0);
    }

    #[test]
    fn commands_dropped_while_disconnected() {
        let (mut channel, relay, mut actuator) = channel_with_relay();
        channel.handle_event(
            LinkEvent::Command {
                point: COMMAND_POINT,
                value: 1,
            },
            &mut actuator,
        );
        assert!(!actuator.is_on());
        assert_eq!(relay.publish_count(), 0);
    }

    #[test]
    fn link_up_syncs_once_then_announces_once() {
        let (mut channel, relay, mut actuator) = channel_with_relay();
        channel.handle_event(LinkEvent::Up, &mut actuator);

        assert!(channel.is_connected());
        // Exactly one sync fetch, then exactly one online publish, in
        // that order
        assert_eq!(
            relay.ops(),
            vec![
                crate::RelayOp::Sync(COMMAND_POINT),
                crate::RelayOp::Publish(STATUS_POINT, Value::text(STATUS_ONLINE)),
            ]
        );
    }

    #[test]
    fn connected_command_drives_actuator_and_acks() {
        let (mut channel, relay, mut actuator) = channel_with_relay();
        channel.handle_event(LinkEvent::Up, &mut actuator);

        channel.handle_event(
            LinkEvent::Command {
                point: COMMAND_POINT,
                value: 1,
            },
            &mut actuator,
        );
        assert!(actuator.is_on());
        assert_eq!(
            relay.last_value(STATUS_POINT),
            Some(Value::text(STATUS_ON))
        );

        channel.handle_event(
            LinkEvent::Command {
                point: COMMAND_POINT,
                value: 0,
            },
            &mut actuator,
        );
        assert!(!actuator.is_on());
        assert_eq!(
            relay.last_value(STATUS_POINT),
            Some(Value::text(STATUS_OFF))
        );
    }

    #[test]
    fn command_for_other_point_is_ignored() {
        let (mut channel, relay, mut actuator) = channel_with_relay();
        channel.handle_event(LinkEvent::Up, &mut actuator);
        let baseline = relay.publish_count();

        channel.handle_event(
            LinkEvent::Command {
                point: TEMPERATURE_POINT,
                value: 1,
            },
            &mut actuator,
        );
        assert!(!actuator.is_on());
        assert_eq!(relay.publish_count(), baseline);
    }

    #[test]
    fn down_suppresses_telemetry_until_reconnect() {
        let (mut channel, relay, mut actuator) = channel_with_relay();
        channel.handle_event(LinkEvent::Up, &mut actuator);

        let sample = TelemetrySample {
            temperature: 25.0,
            humidity: 55.0,
            sample_index: 1,
        };
        channel.publish_sample(&sample);
        assert_eq!(relay.last_value(TEMPERATURE_POINT), Some(Value::Float(25.0)));
        assert_eq!(relay.last_value(HUMIDITY_POINT), Some(Value::Float(55.0)));

        channel.handle_event(LinkEvent::Down, &mut actuator);
        let baseline = relay.publish_count();
        channel.publish_sample(&sample);
        assert_eq!(relay.publish_count(), baseline);

        channel.handle_event(LinkEvent::Up, &mut actuator);
        assert_eq!(relay.sync_requests(), vec![COMMAND_POINT, COMMAND_POINT]);
    }
}
