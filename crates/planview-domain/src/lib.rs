pub mod objective;
pub mod pagination;
pub mod plan;
pub mod search;
pub mod source;
pub mod sub_objective;

pub use objective::{
    LiveObjective, Objective, ObjectiveContent, ObjectiveDetail, ObjectiveId, Selection,
};
pub use pagination::{PaginatedResponse, PaginationMeta};
pub use plan::{Plan, PlanId};
pub use search::{
    CompositeSearcher, CounterSearcher, DebouncedFilter, FilterChange, FilteredView,
    ObjectiveSearcher, SearchBy, TitleSearcher,
};
pub use source::{DataSource, InMemorySource, SubObjectivePages};
pub use sub_objective::{SubObjective, SubObjectiveId};
