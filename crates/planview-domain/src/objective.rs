use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type ObjectiveId = u64;

/// An entry of a plan's objective list.
///
/// `counter` is the display sequence number shown as `#N`; identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    pub id: ObjectiveId,
    pub counter: u32,
    pub title: String,
}

impl Objective {
    pub fn new(id: ObjectiveId, counter: u32, title: impl Into<String>) -> Self {
        Self {
            id,
            counter,
            title: title.into(),
        }
    }
}

/// Markdown sections attached to an objective. Any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contextual_data: Option<String>,
}

/// A fully fetched objective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveDetail {
    #[serde(flatten)]
    pub objective: Objective,
    #[serde(flatten)]
    pub content: ObjectiveContent,
}

impl ObjectiveDetail {
    pub fn id(&self) -> ObjectiveId {
        self.objective.id
    }

    pub fn title(&self) -> &str {
        &self.objective.title
    }
}

/// The objective currently being executed, if any.
///
/// It has no numeric id and is never part of the objective list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveObjective {
    pub counter: u32,
    pub title: String,
    #[serde(flatten)]
    pub content: ObjectiveContent,
}

/// What the detail pane is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    Live,
    Objective(ObjectiveId),
}

impl Selection {
    pub fn objective_id(&self) -> Option<ObjectiveId> {
        match self {
            Self::Live => None,
            Self::Objective(id) => Some(*id),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Objective(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for Selection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("live") {
            return Ok(Self::Live);
        }
        s.parse::<ObjectiveId>()
            .map(Self::Objective)
            .map_err(|_| format!("expected 'live' or an objective id, got '{}'", s))
    }
}
