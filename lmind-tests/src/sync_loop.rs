//! Exerciser for the full sync loop against the simulated relay:
//! runs a few scripted connect / command / disconnect cycles at real
//! time and dumps what the relay saw. Run with RUST_LOG=debug for the
//! wire frames.

use actix::Actor;
use tokio::sync::mpsc::unbounded_channel;

use lmind_relay::{RelayHandle, SimRelay, HUMIDITY_POINT, STATUS_POINT, TEMPERATURE_POINT};
use lmindd::{
    event::{Event, EventHandler},
    minder::LedMinder,
    sim::{run_link_script, SimLed},
};

#[actix::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    log::info!("Initializing sim relay and control loop");

    let (link_tx, link_rx) = unbounded_channel();
    let relay = SimRelay::with_echo(link_tx.clone());

    let mut app = LedMinder::new(Box::new(relay.clone()), SimLed::default());

    let handle = RelayHandle::new(link_tx).start();
    let script = tokio::spawn(async move { run_link_script(handle, 2).await });

    let mut events = EventHandler::new(250, link_rx);

    while app.running {
        if script.is_finished() {
            app.quit();
            continue;
        }
        match events.next().await {
            Ok(Event::Tick(now)) => app.tick(now),
            Ok(Event::Link(evt)) => app.handle_link_event(evt),
            Err(e) => {
                log::error!("Error in exerciser event loop {e:}, exiting");
                break;
            }
        }
    }

    log::info!(
        "Script complete: {:} publishes, {:} sync fetches",
        relay.publish_count(),
        relay.sync_requests().len()
    );
    log::info!("Last status: {:?}", relay.last_value(STATUS_POINT));
    log::info!(
        "Last telemetry: temp {:?}, hum {:?}",
        relay.last_value(TEMPERATURE_POINT),
        relay.last_value(HUMIDITY_POINT)
    );

    Ok(())
}
