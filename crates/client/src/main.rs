//! Mech combat action client binary.
//!
//! Composition root: loads a world catalog, seeds an in-memory document store,
//! assembles the flow services and resolves one tech attack (or prints an
//! inventory).
//!
//! # Examples
//!
//! ```bash
//! # Bare tech attack against two targets, rolling with a fixed seed
//! cargo run -p mech-client -- -a everest -t grunt -t sniper --seed 7
//!
//! # Invade with a system action, answering the prompt automatically
//! cargo run -p mech-client -- -a everest -i scanner --action system.actions.1 -t grunt --yes
//! ```
mod args;
mod display;
mod logging;
mod prompt;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use game_content::{ContentFactory, WorldLoader};
use game_core::DocumentId;
use runtime::{
    Event, EventBus, FlowServices, InMemoryDocumentStore, LogNotifier, PromptChannel,
    RuntimeConfig, StaticTargets, TechAttackData, TechAttackFlow, TechAttackOptions, Topic,
};

use crate::args::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let _log_guard = logging::setup_logging()?;
    let args = Args::parse();

    let catalog = match &args.world {
        Some(path) => WorldLoader::load(path)?,
        None => ContentFactory::new(&args.data_dir).load_world()?,
    };
    tracing::info!(
        actors = catalog.actors.len(),
        items = catalog.items.len(),
        "world loaded"
    );

    if args.inventory {
        display::print_inventory(&catalog, &args.attacker)?;
        return Ok(());
    }

    let mut config = RuntimeConfig::from_env();
    if let Some(seed) = args.seed {
        config = config.with_dice_seed(seed);
    }

    let events = EventBus::with_capacity(config.event_capacity);
    let notifier = Arc::new(LogNotifier::new(config.message_capacity, events.clone()));
    let store = Arc::new(InMemoryDocumentStore::with_documents(
        catalog.actors,
        catalog.items,
    ));
    let targets = StaticTargets::new(args.targets.iter().map(DocumentId::new));

    let mut builder = FlowServices::builder()
        .config(config)
        .documents(store)
        .notifier(notifier.clone())
        .targets(Arc::new(targets))
        .events(events.clone());
    let prompt_task = if args.yes {
        None
    } else {
        let (channel, requests) = PromptChannel::new(1);
        builder = builder.prompt(Arc::new(channel));
        Some(prompt::spawn_terminal_prompt(requests))
    };
    let services = builder.build()?;
    let mut cards = events.subscribe(Topic::Chat);

    let flow = match &args.item {
        Some(item) => {
            TechAttackFlow::for_item(&services, &DocumentId::new(item), TechAttackData::default())
                .await?
        }
        None => TechAttackFlow::for_actor(
            &services,
            args.attacker.as_str(),
            TechAttackData::default(),
        )?,
    };
    if flow.state().actor_id().as_str() != args.attacker {
        anyhow::bail!(
            "'{}' belongs to '{}', not '{}'",
            args.item.as_deref().unwrap_or_default(),
            flow.state().actor_id(),
            args.attacker
        );
    }

    let options = TechAttackOptions {
        action_path: args.action.clone(),
        ..TechAttackOptions::default()
    };
    let report = flow.begin(&options).await;

    if let Some(task) = prompt_task {
        task.abort();
    }

    while let Ok(event) = cards.try_recv() {
        if let Event::Chat(artifact) = event {
            println!("{}", artifact.content);
        }
    }
    display::print_notifications(&notifier.entries());

    let aborted_at = report.aborted_at().map(str::to_string);
    match report.into_result() {
        Ok(true) => {}
        Ok(false) => tracing::info!(?aborted_at, "tech attack did not resolve"),
        Err(fault) => return Err(anyhow::Error::new(fault).context("tech attack failed")),
    }
    Ok(())
}
