//! Headless list viewer: fetch every event once and print it.

use event_app::{EventService, ListState, RefreshController};
use event_core::{ClientConfig, Event};
use log::info;

fn print_event(event: &Event) {
    let id = event.id.as_deref().unwrap_or("-");
    print!(
        "{id:>4}  {} {}  {:<9} {}  @ {}",
        event.date, event.time, event.status, event.title, event.location
    );
    if let Some(capacity) = event.capacity {
        print!("  ({capacity} seats)");
    }
    println!();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    event_logging::init_logger()?;

    let config = ClientConfig::from_env()?;
    info!("using {}", config.base_url);
    let service = EventService::from_config(&config)?;
    let (controller, _notices) = RefreshController::new(service);

    controller.refresh();
    let state = controller
        .subscribe()
        .wait_for(|state| !state.is_loading())
        .await?
        .clone();

    match state {
        ListState::Loaded(events) if events.is_empty() => println!("no events"),
        ListState::Loaded(events) => events.iter().for_each(print_event),
        ListState::Error(message) => return Err(message.into()),
        ListState::Loading => {}
    }
    Ok(())
}
