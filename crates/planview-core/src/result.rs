use crate::error::PlanviewError;

pub type PlanviewResult<T> = Result<T, PlanviewError>;
