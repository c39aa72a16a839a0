use actix::Actor;
use tokio::sync::mpsc::unbounded_channel;

use lmind_relay::{RelayHandle, SimRelay};
use lmindd::{
    config::RelayConfig,
    event::{Event, EventHandler},
    minder::{LedMinder, LedMinderResult},
    sim::{run_link_script, SimLed},
};

use tracing_appender::rolling;
use tracing_subscriber::FmtSubscriber;

use tracing_log::LogTracer;

#[actix::main]
async fn main() -> LedMinderResult<()> {
    LogTracer::init().expect("Unable to set up log tracer");

    let log = rolling::daily("./logs", "debug");
    let (nb, _guard) = tracing_appender::non_blocking(log);

    let sub = FmtSubscriber::builder()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(nb)
        .finish();

    tracing::subscriber::set_global_default(sub).expect("Unable to set up tracing subscriber");

    let config = RelayConfig::load_or_default("led-minder.toml");
    log::info!(
        "led-minder starting, relay {:}:{:} ssid {:}",
        config.relay_host,
        config.relay_port,
        config.wifi_ssid
    );

    // One queue feeds the control loop; the sim relay answers sync
    // requests into the same queue so re-sync works end to end
    let (link_tx, link_rx) = unbounded_channel();
    let relay = SimRelay::with_echo(link_tx.clone());

    let mut app = LedMinder::new(Box::new(relay.clone()), SimLed::default());

    let handle = RelayHandle::new(link_tx).start();
    tokio::spawn(async move {
        if let Err(e) = run_link_script(handle, u32::MAX).await {
            log::error!("Sim link script exiting {e:}");
        }
    });

    let mut events = EventHandler::new(250, link_rx);

    log::info!("System Ready");
    while app.running {
        match events.next().await {
            Ok(Event::Tick(now)) => app.tick(now),
            Ok(Event::Link(evt)) => app.handle_link_event(evt),
            Err(e) => {
                log::error!("Error in app event loop {e:}, exiting");
                break;
            }
        }
    }

    Ok(())
}
