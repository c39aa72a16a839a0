use embedded_hal::digital::OutputPin;

use crate::{STATUS_OFF, STATUS_ON};

/// Device-side state of the controlled output. Mutated only by inbound
/// command events dispatched through the
/// [`RelayChannel`](`crate::channel::RelayChannel`); each apply drives
/// the pin to match exactly, so repeating a command is a no-op rather
/// than a toggle.
pub struct Actuator<P: OutputPin> {
    pin: P,
    is_on: bool,
}

impl<P: OutputPin> Actuator<P> {
    /// Takes ownership of the LED pin and drives it low, matching the
    /// power-on state the remote app expects before the first sync
    pub fn new(mut pin: P) -> Self {
        pin.set_low()
            .map_err(|e| log::error!("Unable to drive LED pin low at startup {e:?}"))
            .ok();
        Self { pin, is_on: false }
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// Apply a raw inbound command value: zero deactivates, anything
    /// nonzero (negatives included) activates. The remote button only
    /// ever writes 0 or 1, but the relay does not enforce that and
    /// neither do we. Returns the status string to publish upstream.
    pub fn apply_command(&mut self, raw: i64) -> &'static str {
        let on = raw != 0;

        let driven = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        driven
            .map_err(|e| log::error!("Unable to drive LED pin {e:?}"))
            .ok();

        self.is_on = on;
        if on {
            STATUS_ON
        } else {
            STATUS_OFF
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct TestPin {
        high: bool,
        writes: u32,
    }

    impl embedded_hal::digital::ErrorType for TestPin {
        type Error = core::convert::Infallible;
    }

    impl OutputPin for TestPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn zero_deactivates_nonzero_activates() {
        let mut actuator = Actuator::new(TestPin::default());
        assert!(!actuator.is_on());

        assert_eq!(actuator.apply_command(1), STATUS_ON);
        assert!(actuator.is_on());

        assert_eq!(actuator.apply_command(0), STATUS_OFF);
        assert!(!actuator.is_on());
    }

    #[test]
    fn any_nonzero_value_means_on() {
        let mut actuator = Actuator::new(TestPin::default());
        for raw in [1, 2, 255, -1, i64::MIN, i64::MAX] {
            assert_eq!(actuator.apply_command(raw), STATUS_ON);
            assert!(actuator.is_on());
        }
    }

    #[test]
    fn repeated_command_is_idempotent_not_a_toggle() {
        let mut actuator = Actuator::new(TestPin::default());
        assert_eq!(actuator.apply_command(1), STATUS_ON);
        assert_eq!(actuator.apply_command(1), STATUS_ON);
        assert!(actuator.is_on());
        assert!(actuator.pin.high);

        assert_eq!(actuator.apply_command(0), STATUS_OFF);
        assert_eq!(actuator.apply_command(0), STATUS_OFF);
        assert!(!actuator.is_on());
        assert!(!actuator.pin.high);
    }

    #[test]
    fn pin_is_driven_once_per_apply() {
        let mut actuator = Actuator::new(TestPin::default());
        let baseline = actuator.pin.writes;
        actuator.apply_command(1);
        assert_eq!(actuator.pin.writes, baseline + 1);
        actuator.apply_command(1);
        assert_eq!(actuator.pin.writes, baseline + 2);
    }
}
