//! One-shot push delivery to the desktop.

use pushgate_config::Config;
use pushgate_protocols::{data_keys, HostCapabilities, PushPayload};
use pushgate_worker::{DeliveryOutcome, EventOutcome, WorkerEvent};

use crate::cli::PushArgs;
use crate::server::{build_worker, desktop_host};

/// Build the payload from `--payload` and the field flags.
pub(crate) fn build_payload(args: &PushArgs) -> Result<PushPayload, Box<dyn std::error::Error>> {
    let mut payload = match &args.payload {
        Some(path) => PushPayload::from_slice(&std::fs::read(path)?)?,
        None => PushPayload::default(),
    };

    let fields = [
        (data_keys::TITLE, &args.title),
        (data_keys::BODY, &args.body),
        (data_keys::CLICK_ACTION, &args.click_action),
    ];
    for (key, value) in fields {
        if let Some(value) = value {
            payload = payload.with_data_field(key, value.as_str());
        }
    }
    Ok(payload)
}

/// Handle `push`: show one notification through the desktop host.
pub(crate) async fn handle_push_command(
    args: &PushArgs,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let payload = build_payload(args)?;
    let host = HostCapabilities::from_host(desktop_host(&config.host));
    let worker = build_worker(config, host);

    let outcomes = worker.handle(WorkerEvent::push(payload)).settle().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
        return Ok(());
    }

    for outcome in &outcomes {
        match outcome {
            EventOutcome::Delivery(DeliveryOutcome::Shown { notification }) => {
                println!("Shown: {} ({})", notification.content.title, notification.id);
            }
            EventOutcome::Delivery(DeliveryOutcome::Dropped { reason }) => {
                println!("Dropped: {}", reason);
            }
            EventOutcome::Delivery(DeliveryOutcome::Duplicate { message_id }) => {
                println!("Duplicate: {}", message_id);
            }
            EventOutcome::Route(route) => {
                println!("Routed: {}", route.click_action());
            }
        }
    }
    Ok(())
}
