//! Output rendering.
//!
//! A [`Renderer`] turns a template reference plus the final flow data into a
//! [`ChatArtifact`] and shares it with other participants. [`ChatRenderer`]
//! renders plain-text cards from registered [`CardTemplate`]s and publishes
//! them on [`Topic::Chat`](crate::events::Topic::Chat).
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use flow_engine::{DocumentId, Subject};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::events::{Event, EventBus};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown template `{0}`")]
    UnknownTemplate(String),

    #[error("payload is missing `{0}`")]
    MissingField(&'static str),

    #[error("payload could not be serialized")]
    Payload(#[from] serde_json::Error),
}

/// Target flag carried alongside a rendered attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetFlag {
    pub id: DocumentId,
    pub lock_on_consumed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackMetadata {
    pub origin: DocumentId,
    pub targets: Vec<TargetFlag>,
}

/// Machine-readable flags attached to an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderMetadata {
    pub attack_data: AttackMetadata,
}

/// A rendered card as shared with other participants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatArtifact {
    pub id: u64,
    pub speaker: DocumentId,
    pub template: String,
    pub content: String,
    pub payload: Value,
    pub metadata: RenderMetadata,
}

#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(
        &self,
        subject: &Subject,
        template: &str,
        payload: Value,
        metadata: RenderMetadata,
    ) -> Result<ChatArtifact, RenderError>;
}

/// Turns a payload into card text.
pub trait CardTemplate: Send + Sync {
    fn render(&self, payload: &Value, metadata: &RenderMetadata) -> Result<String, RenderError>;
}

/// Renders registered templates and publishes the cards.
pub struct ChatRenderer {
    templates: HashMap<String, Arc<dyn CardTemplate>>,
    events: EventBus,
    next_id: AtomicU64,
}

impl ChatRenderer {
    pub fn new(events: EventBus) -> Self {
        Self {
            templates: HashMap::new(),
            events,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn with_template(
        mut self,
        name: impl Into<String>,
        template: impl CardTemplate + 'static,
    ) -> Self {
        self.register(name, template);
        self
    }

    pub fn register(&mut self, name: impl Into<String>, template: impl CardTemplate + 'static) {
        self.templates.insert(name.into(), Arc::new(template));
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }
}

#[async_trait]
impl Renderer for ChatRenderer {
    async fn render(
        &self,
        subject: &Subject,
        template: &str,
        payload: Value,
        metadata: RenderMetadata,
    ) -> Result<ChatArtifact, RenderError> {
        let card = self
            .templates
            .get(template)
            .ok_or_else(|| RenderError::UnknownTemplate(template.to_string()))?;
        let content = card.render(&payload, &metadata)?;

        let artifact = ChatArtifact {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            speaker: subject.actor_id().clone(),
            template: template.to_string(),
            content,
            payload,
            metadata,
        };
        debug!(target: "runtime::render", id = artifact.id, template, "card rendered");
        self.events.publish(Event::Chat(Box::new(artifact.clone())));
        Ok(artifact)
    }
}
