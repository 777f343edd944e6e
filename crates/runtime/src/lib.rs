//! Runtime collaborators and concrete flows for mech combat actions.
//!
//! This crate plugs the generic [`flow_engine`] orchestrator into the game:
//! it defines the external interfaces a flow talks to, ships in-memory and
//! default implementations of each, and implements the concrete flows.
//! Consumers assemble a [`FlowServices`] bundle once and build flows from it.
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes errors and operator-facing provider traits
//! - [`repository`] reads and updates actor/item documents
//! - [`events`] provides the topic-based event bus and hook relay
//! - [`notify`], [`dice`], and [`render`] are the remaining collaborators
//! - [`flows`] hosts [`TechAttackFlow`] and the steps it registers
pub mod api;
pub mod config;
pub mod dice;
pub mod events;
pub mod flows;
pub mod notify;
pub mod render;
pub mod repository;
pub mod services;

pub use api::{
    AccDiffPrompt, AutoConfirm, PromptChannel, PromptRequest, Result, RuntimeError, StaticTargets,
    TargetSource,
};
pub use config::{DEFAULT_TECH_TEMPLATE, RuntimeConfig};
pub use dice::{DiceError, DiceRoller, SeededDice};
pub use events::{Event, EventBus, EventRelay, FlowEvent, Topic};
pub use flows::{TechAttackCard, TechAttackData, TechAttackFlow, TechAttackOptions};
pub use notify::{LogNotifier, MessageEntry, MessageLevel, MessageLog, Notifier};
pub use render::{
    AttackMetadata, CardTemplate, ChatArtifact, ChatRenderer, RenderError, RenderMetadata,
    Renderer, TargetFlag,
};
pub use repository::{DocumentError, DocumentStore, InMemoryDocumentStore};
pub use services::{FlowServices, FlowServicesBuilder};
