//! Shared fixtures for runtime integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use flow_engine::{DocumentId, Subject};
use game_core::{
    AccDiffData, ActionData, ActivationType, Actor, ActorSystem, DeployableData, Item, ItemSystem,
    MechData, MechSystemData, NpcData, NpcFeatureData, NpcTechData, PilotData, ResourceMeter,
    Tag, Uses, lids,
};
use runtime::{
    AccDiffPrompt, AutoConfirm, ChatArtifact, EventBus, FlowServices, InMemoryDocumentStore,
    LogNotifier, RenderError, RenderMetadata, Renderer, RuntimeConfig, StaticTargets,
};
use serde_json::Value;

// ============================================================================
// Documents
// ============================================================================

pub fn mech(id: &str, tech_attack: i32) -> Actor {
    Actor::new(
        id,
        "Nightjar",
        ActorSystem::Mech(MechData {
            tech_attack,
            e_defense: 10,
            heat: ResourceMeter::new(0, 6),
            frame: None,
            pilot: Some(DocumentId::new("pilot")),
            ll: 2,
        }),
    )
}

pub fn npc(id: &str, tier: u8) -> Actor {
    Actor::new(
        id,
        "Grunt",
        ActorSystem::Npc(NpcData {
            tier,
            sys: 1,
            e_defense: 8,
            heat: ResourceMeter::new(0, 4),
        }),
    )
}

pub fn pilot(id: &str) -> Actor {
    Actor::new(
        id,
        "Ace",
        ActorSystem::Pilot(PilotData {
            tech_attack: 1,
            e_defense: 10,
            ll: 2,
        }),
    )
}

pub fn drone(id: &str) -> Actor {
    Actor::new(id, "Drone", ActorSystem::Deployable(DeployableData { e_defense: 10 }))
}

/// Mech system with one quick tech action and one invade action.
pub fn scanner(id: &str, owner: &str) -> Item {
    Item::new(
        id,
        "Scanner Swarm",
        ItemSystem::MechSystem(MechSystemData {
            effect: "Scan a target.".into(),
            tags: Vec::new(),
            actions: vec![
                ActionData {
                    name: "Scan".into(),
                    activation: ActivationType::QuickTech,
                    detail: "Learn everything.".into(),
                },
                ActionData {
                    name: "Hijack".into(),
                    activation: ActivationType::Invade,
                    detail: "Take control of a system.".into(),
                },
            ],
            destroyed: false,
            uses: None,
        }),
    )
    .owned_by(owner)
}

pub fn with_system(mut item: Item, edit: impl FnOnce(&mut MechSystemData)) -> Item {
    if let ItemSystem::MechSystem(data) = &mut item.system {
        edit(data);
    }
    item
}

pub fn limited(uses: i32, max: i32) -> impl FnOnce(&mut MechSystemData) {
    move |data| {
        data.tags.push(Tag::with_val(lids::LIMITED, max));
        data.uses = Some(Uses { value: uses, max });
    }
}

/// NPC tech feature with tier tables `[0, 1, 2]` / `[2, 3, 4]`.
pub fn npc_tech(id: &str, owner: &str) -> Item {
    let feature = NpcFeatureData::tech(NpcTechData {
        accuracy: vec![0, 1, 2],
        attack_bonus: vec![2, 3, 4],
        effect: "The target becomes Impaired.".into(),
    });
    Item::new(id, "Hex", ItemSystem::NpcFeature(feature)).owned_by(owner)
}

pub fn with_feature(mut item: Item, edit: impl FnOnce(&mut NpcFeatureData)) -> Item {
    if let ItemSystem::NpcFeature(data) = &mut item.system {
        edit(data);
    }
    item
}

// ============================================================================
// Collaborators
// ============================================================================

/// Renderer that records what it was asked to render.
#[derive(Default)]
pub struct RecordingRenderer {
    pub fail: bool,
    rendered: Mutex<Vec<(String, Value, RenderMetadata)>>,
}

impl RecordingRenderer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn count(&self) -> usize {
        self.rendered.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<(String, Value, RenderMetadata)> {
        self.rendered.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Renderer for RecordingRenderer {
    async fn render(
        &self,
        subject: &Subject,
        template: &str,
        payload: Value,
        metadata: RenderMetadata,
    ) -> Result<ChatArtifact, RenderError> {
        if self.fail {
            return Err(RenderError::UnknownTemplate(template.to_string()));
        }
        let mut rendered = self.rendered.lock().unwrap();
        rendered.push((template.to_string(), payload.clone(), metadata.clone()));
        Ok(ChatArtifact {
            id: rendered.len() as u64,
            speaker: subject.actor_id().clone(),
            template: template.to_string(),
            content: String::new(),
            payload,
            metadata,
        })
    }
}

/// Operator that always cancels.
#[derive(Default)]
pub struct CancelPrompt {
    pub calls: AtomicUsize,
}

#[async_trait]
impl AccDiffPrompt for CancelPrompt {
    async fn confirm(&self, _data: &AccDiffData) -> Option<AccDiffData> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        None
    }
}

/// Operator that consumes lock on for every target that has it.
pub struct ConsumeLockOn;

#[async_trait]
impl AccDiffPrompt for ConsumeLockOn {
    async fn confirm(&self, data: &AccDiffData) -> Option<AccDiffData> {
        let mut data = data.clone();
        for target in &mut data.targets {
            target.consume_lock_on = target.lock_on_available;
        }
        Some(data)
    }
}

// ============================================================================
// Harness
// ============================================================================

pub struct Harness {
    pub services: FlowServices,
    pub store: Arc<InMemoryDocumentStore>,
    pub notifier: Arc<LogNotifier>,
    pub renderer: Arc<RecordingRenderer>,
    pub targets: Arc<StaticTargets>,
}

pub struct HarnessBuilder {
    actors: Vec<Actor>,
    items: Vec<Item>,
    targets: Vec<DocumentId>,
    prompt: Arc<dyn AccDiffPrompt>,
    renderer: RecordingRenderer,
    seed: u64,
}

impl HarnessBuilder {
    pub fn actor(mut self, actor: Actor) -> Self {
        self.actors.push(actor);
        self
    }

    pub fn item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn target(mut self, id: &str) -> Self {
        self.targets.push(DocumentId::new(id));
        self
    }

    pub fn prompt(mut self, prompt: Arc<dyn AccDiffPrompt>) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn renderer(mut self, renderer: RecordingRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Harness {
        let events = EventBus::new();
        let store = Arc::new(InMemoryDocumentStore::with_documents(self.actors, self.items));
        let notifier = Arc::new(LogNotifier::new(32, events.clone()));
        let renderer = Arc::new(self.renderer);
        let targets = Arc::new(StaticTargets::new(self.targets));

        let services = FlowServices::builder()
            .config(RuntimeConfig::default().with_dice_seed(self.seed))
            .documents(store.clone())
            .notifier(notifier.clone())
            .targets(targets.clone())
            .prompt(self.prompt)
            .renderer(renderer.clone())
            .events(events)
            .build()
            .expect("services build");

        Harness {
            services,
            store,
            notifier,
            renderer,
            targets,
        }
    }
}

impl Harness {
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder {
            actors: Vec::new(),
            items: Vec::new(),
            targets: Vec::new(),
            prompt: Arc::new(AutoConfirm),
            renderer: RecordingRenderer::default(),
            seed: 7,
        }
    }
}
