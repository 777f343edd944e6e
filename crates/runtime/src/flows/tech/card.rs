//! The tech attack chat card.

use async_trait::async_trait;
use flow_engine::{FlowState, Step, StepResult};
use serde_json::Value;
use tracing::error;

use super::{TechAttackData, TechAttackOptions};
use crate::render::{AttackMetadata, CardTemplate, RenderError, RenderMetadata, TargetFlag};
use crate::services::FlowServices;

/// Renders the final card. Always the last step.
///
/// A render failure is reported to the operator but does not fail the run:
/// by now every side effect has been committed.
pub struct PrintTechAttackCard {
    services: FlowServices,
}

impl PrintTechAttackCard {
    pub fn new(services: FlowServices) -> Self {
        Self { services }
    }

    fn metadata(state: &FlowState<TechAttackData>) -> RenderMetadata {
        RenderMetadata {
            attack_data: AttackMetadata {
                origin: state.actor_id().clone(),
                targets: state
                    .data
                    .attack_rolls
                    .targeted
                    .iter()
                    .map(|roll| TargetFlag {
                        id: roll.target.clone(),
                        lock_on_consumed: roll.used_lock_on,
                    })
                    .collect(),
            },
        }
    }

    async fn render(
        &self,
        state: &FlowState<TechAttackData>,
        template: &str,
    ) -> Result<u64, RenderError> {
        let payload = serde_json::to_value(&state.data)?;
        let artifact = self
            .services
            .renderer
            .render(state.subject(), template, payload, Self::metadata(state))
            .await?;
        Ok(artifact.id)
    }
}

#[async_trait]
impl Step<TechAttackData, TechAttackOptions> for PrintTechAttackCard {
    async fn run(
        &self,
        state: &mut FlowState<TechAttackData>,
        options: &TechAttackOptions,
    ) -> StepResult {
        let template = options
            .template
            .as_deref()
            .unwrap_or(&self.services.config.tech_template);

        if let Err(err) = self.render(state, template).await {
            error!(
                target: "runtime::tech",
                template,
                error = %err,
                "tech attack card failed to render"
            );
            self.services
                .notifier
                .error(&format!("Could not render the tech attack card: {err}"));
        }
        Ok(true)
    }
}

/// Plain-text layout of a tech attack.
///
/// ```text
/// == Scanner Swarm ==
/// Roll: 1d20+2
/// vs Grunt: 17 HIT (lock on)
/// Tags: tg_limited 2
/// Effect: Scan a target.
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TechAttackCard;

impl CardTemplate for TechAttackCard {
    fn render(&self, payload: &Value, _metadata: &RenderMetadata) -> Result<String, RenderError> {
        let title = payload["title"]
            .as_str()
            .ok_or(RenderError::MissingField("title"))?;

        let mut lines = vec![format!("== {title} ==")];
        if let Some(roll) = payload["roll_str"].as_str().filter(|roll| !roll.is_empty()) {
            lines.push(format!("Roll: {roll}"));
        }

        let hits = payload["hit_results"]
            .as_array()
            .map(Vec::as_slice)
            .unwrap_or_default();
        if hits.is_empty() {
            lines.extend(
                payload["attack_results"]
                    .as_array()
                    .into_iter()
                    .flatten()
                    .map(|result| format!("Result: {}", result["total"])),
            );
        }
        lines.extend(hits.iter().map(|hit| {
            let verdict = match (hit["crit"].as_bool(), hit["hit"].as_bool()) {
                (Some(true), _) => "CRIT",
                (_, Some(true)) => "HIT",
                _ => "MISS",
            };
            let name = hit["name"].as_str().unwrap_or("?");
            let lock_on = if hit["used_lock_on"].as_bool() == Some(true) {
                " (lock on)"
            } else {
                ""
            };
            format!("vs {name}: {} {verdict}{lock_on}", hit["total"])
        }));

        let tags: Vec<String> = payload["tags"]
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|tag| {
                let lid = tag["lid"].as_str()?;
                Some(match tag["val"].as_str() {
                    Some(val) => format!("{lid} {val}"),
                    None => lid.to_string(),
                })
            })
            .collect();
        if !tags.is_empty() {
            lines.push(format!("Tags: {}", tags.join(", ")));
        }
        if let Some(effect) = payload["effect"].as_str().filter(|effect| !effect.is_empty()) {
            lines.push(format!("Effect: {effect}"));
        }

        Ok(lines.join("\n"))
    }
}
