//! Runtime configuration.
use std::env;

/// Template used for tech attack cards unless a flow is told otherwise.
pub const DEFAULT_TECH_TEMPLATE: &str = "chat/tech-attack-card";

/// Runtime configuration shared by every flow.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Fixed dice seed; `None` seeds from entropy.
    pub dice_seed: Option<u64>,
    /// Broadcast capacity per event topic.
    pub event_capacity: usize,
    /// Number of notifications retained for display.
    pub message_capacity: usize,
    pub tech_template: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            dice_seed: None,
            event_capacity: 64,
            message_capacity: 64,
            tech_template: DEFAULT_TECH_TEMPLATE.to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Construct runtime configuration from environment variables.
    ///
    /// Environment variables:
    /// - `MECHFLOW_DICE_SEED` - Dice seed (default: entropy)
    /// - `MECHFLOW_EVENT_CAPACITY` - Event topic capacity (default: 64)
    /// - `MECHFLOW_MESSAGE_CAPACITY` - Retained notifications (default: 64)
    /// - `MECHFLOW_TECH_TEMPLATE` - Tech attack card template
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("MECHFLOW_DICE_SEED") {
            config.dice_seed = Some(seed);
        }
        if let Some(capacity) = read_env::<usize>("MECHFLOW_EVENT_CAPACITY") {
            config.event_capacity = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("MECHFLOW_MESSAGE_CAPACITY") {
            config.message_capacity = capacity.max(1);
        }
        if let Some(template) = read_env::<String>("MECHFLOW_TECH_TEMPLATE")
            && !template.trim().is_empty()
        {
            config.tech_template = template;
        }

        config
    }

    pub fn with_dice_seed(mut self, seed: u64) -> Self {
        self.dice_seed = Some(seed);
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
