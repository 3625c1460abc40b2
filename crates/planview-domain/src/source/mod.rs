//! The data source collaborator.
//!
//! Everything the navigator displays comes through [`DataSource`]. Transport
//! and storage are the implementor's business; the only implementation shipped
//! here is the deterministic [`InMemorySource`].

mod in_memory;

pub use in_memory::InMemorySource;

use crate::{
    LiveObjective, Objective, ObjectiveDetail, ObjectiveId, PaginatedResponse, Plan, PlanId,
    SubObjective,
};
use async_trait::async_trait;
use planview_core::{Page, PageSource, PlanviewResult};
use std::sync::Arc;

#[async_trait]
pub trait DataSource: Send + Sync {
    async fn list_plans(&self) -> PlanviewResult<Vec<Plan>>;

    /// Fails with `NotFound` for an unknown plan.
    async fn get_plan(&self, plan_id: PlanId) -> PlanviewResult<Plan>;

    /// The plan's full objective list, newest first.
    async fn list_objectives(&self, plan_id: PlanId) -> PlanviewResult<Vec<Objective>>;

    async fn get_objective(
        &self,
        plan_id: PlanId,
        objective_id: ObjectiveId,
    ) -> PlanviewResult<ObjectiveDetail>;

    /// One page of an objective's execution log. `offset + limit` may run past
    /// the end, in which case the data is truncated.
    async fn fetch_sub_objectives(
        &self,
        objective_id: ObjectiveId,
        limit: usize,
        offset: usize,
    ) -> PlanviewResult<PaginatedResponse<SubObjective>>;

    /// `Ok(None)` means nothing is live right now; it is not an error.
    async fn poll_live(&self, plan_id: PlanId) -> PlanviewResult<Option<LiveObjective>>;
}

/// Exposes an objective's execution log to a page cursor.
pub struct SubObjectivePages<S: ?Sized> {
    source: Arc<S>,
}

impl<S: ?Sized> SubObjectivePages<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }
}

impl<S: ?Sized> Clone for SubObjectivePages<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

#[async_trait]
impl<S> PageSource<ObjectiveId, SubObjective> for SubObjectivePages<S>
where
    S: DataSource + ?Sized,
{
    async fn fetch_page(
        &self,
        key: &ObjectiveId,
        limit: usize,
        offset: usize,
    ) -> PlanviewResult<Page<SubObjective>> {
        let response = self.source.fetch_sub_objectives(*key, limit, offset).await?;
        Ok(response.into_page())
    }
}
