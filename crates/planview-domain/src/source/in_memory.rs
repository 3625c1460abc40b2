use super::DataSource;
use crate::{
    LiveObjective, Objective, ObjectiveContent, ObjectiveDetail, ObjectiveId, PaginatedResponse,
    Plan, PlanId, SubObjective,
};
use async_trait::async_trait;
use planview_core::{PlanviewError, PlanviewResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

const VERBS: [&str; 5] = ["Improve", "Develop", "Optimize", "Build", "Research"];
const PAST_VERBS: [&str; 5] = ["improved", "developed", "optimized", "built", "researched"];
const TOPICS: [&str; 5] = [
    "customer experience",
    "platform stability",
    "team productivity",
    "system performance",
    "data quality",
];
const INPUT_SUBJECTS: [&str; 5] = [
    "user feedback",
    "system metrics",
    "competitor data",
    "market trends",
    "technical requirements",
];
const OUTPUT_KINDS: [&str; 5] = [
    "actionable insights",
    "detailed recommendations",
    "implementation plan",
    "risk assessment",
    "success metrics",
];

const OBJECTIVE_ID_STRIDE: u64 = 10_000;
const SUB_OBJECTIVE_ID_STRIDE: u64 = 1_000;

/// Deterministic source with three plans of generated objectives.
///
/// Objective `i` of plan `p` has id `p * 10000 + i` and counter `i`; every
/// objective carries the same number of execution steps. Content is generated
/// on demand.
pub struct InMemorySource {
    plans: Vec<Plan>,
    objectives_per_plan: u32,
    steps_per_objective: usize,
    latency: Duration,
    live: AtomicBool,
}

impl Default for InMemorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySource {
    pub fn new() -> Self {
        Self {
            plans: vec![
                Plan::new(1, "Q1 2026 Strategy").with_description("Strategic objectives for Q1"),
                Plan::new(2, "Product Roadmap")
                    .with_description("Product development milestones"),
                Plan::new(3, "Engineering Excellence").with_description("Technical improvements"),
            ],
            objectives_per_plan: 1500,
            steps_per_objective: 500,
            latency: Duration::ZERO,
            live: AtomicBool::new(true),
        }
    }

    pub fn with_objectives_per_plan(mut self, count: u32) -> Self {
        self.objectives_per_plan = count;
        self
    }

    pub fn with_steps_per_objective(mut self, count: usize) -> Self {
        self.steps_per_objective = count;
        self
    }

    /// Delay every call by `latency`, to exercise loading states.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn set_live(&self, live: bool) {
        self.live.store(live, Ordering::Relaxed);
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Relaxed)
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn plan(&self, plan_id: PlanId) -> PlanviewResult<&Plan> {
        self.plans
            .iter()
            .find(|p| p.id == plan_id)
            .ok_or_else(|| PlanviewError::NotFound(format!("Plan {} not found", plan_id)))
    }

    /// Counter of `objective_id`, if it names a generated objective.
    fn locate(&self, objective_id: ObjectiveId) -> Option<(PlanId, u32)> {
        let plan_id = objective_id / OBJECTIVE_ID_STRIDE;
        let counter = u32::try_from(objective_id % OBJECTIVE_ID_STRIDE).ok()?;
        let known_plan = self.plans.iter().any(|p| p.id == plan_id);
        (known_plan && (1..=self.objectives_per_plan).contains(&counter))
            .then_some((plan_id, counter))
    }

    fn objective(plan_id: PlanId, counter: u32) -> Objective {
        let slot = counter as usize % 5;
        Objective::new(
            plan_id * OBJECTIVE_ID_STRIDE + u64::from(counter),
            counter,
            format!("{} {}", VERBS[slot], TOPICS[slot]),
        )
    }

    fn content(counter: u32) -> ObjectiveContent {
        let slot = counter as usize % 5;
        let verb = VERBS[slot].to_lowercase();
        let topic = TOPICS[slot];
        let task = format!(
            "## Objective Overview\n\n\
             Work on {verb} {topic} this quarter.\n\n\
             ### Key Requirements\n\n\
             - **Primary goal**: measurable gains in {topic}\n\
             - **Timeline**: Q{quarter} 2026\n\
             - **Stakeholders**: Engineering, Product, Design\n\n\
             ### Approach\n\n\
             1. Baseline the current metrics\n\
             2. Prototype the change behind a flag\n\
             3. Roll out gradually and watch the indicators\n\n\
             > Done when the target metric improves by 20% with no critical regressions.",
            quarter = counter % 4 + 1,
        );
        let result = format!(
            "## Results\n\n\
             Successfully {past} the {topic}.\n\n\
             | Metric | Before | After |\n\
             |--------|--------|-------|\n\
             | Latency | 2.5s | 1.2s |\n\
             | Success rate | 87% | 96% |\n\n\
             ### Learnings\n\n\
             - Early prototyping paid off\n\
             - Short feedback loops kept the scope honest\n\n\
             ```rust\n\
             let report = collect_metrics(objective_id).await?;\n\
             ```",
            past = PAST_VERBS[slot],
        );
        ObjectiveContent {
            task: Some(task),
            result: Some(result),
            contextual_data: Some(format!(
                "Contextual data for objective {}: purpose, scope and requirements.",
                counter
            )),
        }
    }

    fn sub_objective(objective_id: ObjectiveId, step: usize) -> SubObjective {
        let slot = step % 5;
        SubObjective {
            id: objective_id * SUB_OBJECTIVE_ID_STRIDE + step as u64,
            input: format!("Input {}: Research and analyze {}", step, INPUT_SUBJECTS[slot]),
            output: format!("Output {}: Completed analysis with {}", step, OUTPUT_KINDS[slot]),
        }
    }

    fn live_objective() -> LiveObjective {
        LiveObjective {
            counter: 0,
            title: "Current active objective in progress".to_string(),
            content: ObjectiveContent {
                task: Some(
                    "## Current Task\n\n\
                     This is the **currently active objective**.\n\n\
                     - Analyzing requirements\n\
                     - Implementing solution\n\
                     - Testing and validation"
                        .to_string(),
                ),
                result: Some("### Progress\n\nCurrently in progress...".to_string()),
                contextual_data: None,
            },
        }
    }
}

#[async_trait]
impl DataSource for InMemorySource {
    async fn list_plans(&self) -> PlanviewResult<Vec<Plan>> {
        self.delay().await;
        Ok(self.plans.clone())
    }

    async fn get_plan(&self, plan_id: PlanId) -> PlanviewResult<Plan> {
        self.delay().await;
        self.plan(plan_id).cloned()
    }

    async fn list_objectives(&self, plan_id: PlanId) -> PlanviewResult<Vec<Objective>> {
        self.delay().await;
        self.plan(plan_id)?;
        Ok((1..=self.objectives_per_plan)
            .rev()
            .map(|counter| Self::objective(plan_id, counter))
            .collect())
    }

    async fn get_objective(
        &self,
        plan_id: PlanId,
        objective_id: ObjectiveId,
    ) -> PlanviewResult<ObjectiveDetail> {
        self.delay().await;
        self.plan(plan_id)?;
        match self.locate(objective_id) {
            Some((owner, counter)) if owner == plan_id => Ok(ObjectiveDetail {
                objective: Self::objective(plan_id, counter),
                content: Self::content(counter),
            }),
            _ => Err(PlanviewError::NotFound(format!(
                "Objective {} not found",
                objective_id
            ))),
        }
    }

    async fn fetch_sub_objectives(
        &self,
        objective_id: ObjectiveId,
        limit: usize,
        offset: usize,
    ) -> PlanviewResult<PaginatedResponse<SubObjective>> {
        self.delay().await;
        if self.locate(objective_id).is_none() {
            return Err(PlanviewError::NotFound(format!(
                "Objective {} not found",
                objective_id
            )));
        }
        let steps: Vec<SubObjective> = (1..=self.steps_per_objective)
            .map(|step| Self::sub_objective(objective_id, step))
            .collect();
        Ok(PaginatedResponse::from_slice(&steps, limit, offset))
    }

    async fn poll_live(&self, plan_id: PlanId) -> PlanviewResult<Option<LiveObjective>> {
        self.delay().await;
        self.plan(plan_id)?;
        Ok(self.is_live().then(Self::live_objective))
    }
}
