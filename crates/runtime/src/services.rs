//! Collaborators shared by every flow.
//!
//! [`FlowServices`] is a cheap-to-clone bundle of the external interfaces a
//! flow talks to. Steps hold their own clone; nothing in the bundle is
//! per-run, so any number of flows may share it.
use std::sync::Arc;

use flow_engine::HookBus;
use tracing::debug;

use crate::api::{AccDiffPrompt, AutoConfirm, Result, RuntimeError, StaticTargets, TargetSource};
use crate::config::RuntimeConfig;
use crate::dice::{DiceRoller, SeededDice};
use crate::events::{EventBus, EventRelay};
use crate::flows::TechAttackCard;
use crate::notify::{LogNotifier, Notifier};
use crate::render::{ChatRenderer, Renderer};
use crate::repository::DocumentStore;

#[derive(Clone)]
pub struct FlowServices {
    pub config: Arc<RuntimeConfig>,
    pub documents: Arc<dyn DocumentStore>,
    pub notifier: Arc<dyn Notifier>,
    pub targets: Arc<dyn TargetSource>,
    pub prompt: Arc<dyn AccDiffPrompt>,
    pub dice: Arc<dyn DiceRoller>,
    pub renderer: Arc<dyn Renderer>,
    pub events: EventBus,
    pub hooks: HookBus,
}

impl FlowServices {
    pub fn builder() -> FlowServicesBuilder {
        FlowServicesBuilder::new()
    }
}

/// Builder for [`FlowServices`].
///
/// Only the document store is required. Everything else falls back to a
/// default driven by [`RuntimeConfig`]: a [`LogNotifier`], an empty target
/// selection, [`AutoConfirm`], [`SeededDice`], and a [`ChatRenderer`] with
/// the tech attack card registered.
pub struct FlowServicesBuilder {
    config: RuntimeConfig,
    documents: Option<Arc<dyn DocumentStore>>,
    notifier: Option<Arc<dyn Notifier>>,
    targets: Option<Arc<dyn TargetSource>>,
    prompt: Option<Arc<dyn AccDiffPrompt>>,
    dice: Option<Arc<dyn DiceRoller>>,
    renderer: Option<Arc<dyn Renderer>>,
    events: Option<EventBus>,
    hooks: Option<HookBus>,
    relay_events: bool,
}

impl FlowServicesBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            documents: None,
            notifier: None,
            targets: None,
            prompt: None,
            dice: None,
            renderer: None,
            events: None,
            hooks: None,
            relay_events: true,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required document store
    pub fn documents(mut self, documents: Arc<dyn DocumentStore>) -> Self {
        self.documents = Some(documents);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn targets(mut self, targets: Arc<dyn TargetSource>) -> Self {
        self.targets = Some(targets);
        self
    }

    pub fn prompt(mut self, prompt: Arc<dyn AccDiffPrompt>) -> Self {
        self.prompt = Some(prompt);
        self
    }

    pub fn dice(mut self, dice: Arc<dyn DiceRoller>) -> Self {
        self.dice = Some(dice);
        self
    }

    pub fn renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Share an existing event bus instead of creating one.
    pub fn events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Share an existing hook bus instead of creating one.
    pub fn hooks(mut self, hooks: HookBus) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Whether lifecycle phases are relayed onto the event bus (default: on).
    pub fn relay_events(mut self, relay: bool) -> Self {
        self.relay_events = relay;
        self
    }

    pub fn build(self) -> Result<FlowServices> {
        let documents = self
            .documents
            .ok_or(RuntimeError::MissingService("document store"))?;
        let config = self.config;
        let events = self
            .events
            .unwrap_or_else(|| EventBus::with_capacity(config.event_capacity));
        let hooks = self.hooks.unwrap_or_default();

        if self.relay_events {
            hooks.subscribe(Arc::new(EventRelay::new(events.clone())));
        }

        let notifier = self.notifier.unwrap_or_else(|| {
            Arc::new(LogNotifier::new(config.message_capacity, events.clone()))
        });
        let targets = self
            .targets
            .unwrap_or_else(|| Arc::new(StaticTargets::default()));
        let prompt = self.prompt.unwrap_or_else(|| Arc::new(AutoConfirm));
        let dice = self
            .dice
            .unwrap_or_else(|| Arc::new(SeededDice::new(config.dice_seed)));
        let renderer = self.renderer.unwrap_or_else(|| {
            Arc::new(
                ChatRenderer::new(events.clone())
                    .with_template(config.tech_template.clone(), TechAttackCard),
            )
        });

        debug!(
            target: "runtime::services",
            seeded = config.dice_seed.is_some(),
            hooks = hooks.len(),
            "flow services built"
        );

        Ok(FlowServices {
            config: Arc::new(config),
            documents,
            notifier,
            targets,
            prompt,
            dice,
            renderer,
            events,
            hooks,
        })
    }
}
