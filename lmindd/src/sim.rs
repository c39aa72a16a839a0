//! Simulation stand-ins for the two out-of-scope collaborators: the
//! physical LED pin and the cloud session library. These let the
//! daemon run the full sync loop end to end with no hardware and no
//! network, the way the original device runs under a simulator.

use actix::Addr;
use tokio::time::{sleep, Duration};

use lmind_relay::{CommandReceived, LinkDown, LinkUp, RelayHandle, COMMAND_POINT};

use crate::minder::LedMinderResult;

/// LED "pin" that logs level changes instead of driving a GPIO
#[derive(Debug, Default)]
pub struct SimLed {
    high: bool,
}

impl SimLed {
    pub fn is_high(&self) -> bool {
        self.high
    }
}

impl embedded_hal::digital::ErrorType for SimLed {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for SimLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.high {
            log::info!("LED off");
        }
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if !self.high {
            log::info!("LED on");
        }
        self.high = true;
        Ok(())
    }
}

/// Scripted session lifecycle, delivered through the [`RelayHandle`]
/// actor the way the real session library would signal its callbacks:
/// connect, toggle the command point a few times per cycle, then drop
/// and re-establish the link to exercise the re-sync path.
pub async fn run_link_script(handle: Addr<RelayHandle>, cycles: u32) -> LedMinderResult<()> {
    sleep(Duration::from_millis(500)).await;
    handle.send(LinkUp).await??;

    for cycle in 0..cycles {
        for value in [1, 0, 1] {
            sleep(Duration::from_millis(3000)).await;
            handle
                .send(CommandReceived {
                    point: COMMAND_POINT,
                    value,
                })
                .await??;
        }

        log::info!("Sim link cycle {cycle:}: dropping session");
        handle.send(LinkDown).await??;
        sleep(Duration::from_millis(2000)).await;
        handle.send(LinkUp).await??;
    }

    Ok(())
}
