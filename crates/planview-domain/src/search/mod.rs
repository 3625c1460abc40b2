//! Objective search and the filtered view over an objective list.
//!
//! Matching is plain substring containment: the query matches an objective if
//! its counter, written in decimal, contains the query, or its title contains
//! the query ignoring case. An empty query matches everything.

mod debounced;

pub use debounced::{DebouncedFilter, FilterChange};

use crate::{Objective, ObjectiveId};

/// Trait for deciding whether an objective matches a query.
pub trait ObjectiveSearcher {
    fn matches(&self, objective: &Objective) -> bool;
}

/// Search objectives by title (case-insensitive).
pub struct TitleSearcher {
    query: String,
}

impl TitleSearcher {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into().to_lowercase(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

impl ObjectiveSearcher for TitleSearcher {
    fn matches(&self, objective: &Objective) -> bool {
        if self.query.is_empty() {
            return true;
        }
        objective.title.to_lowercase().contains(&self.query)
    }
}

/// Search objectives by the decimal digits of their counter.
///
/// `"42"` matches 42, 142 and 420 alike; this is not numeric equality.
pub struct CounterSearcher {
    query: String,
}

impl CounterSearcher {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into().to_lowercase(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

impl ObjectiveSearcher for CounterSearcher {
    fn matches(&self, objective: &Objective) -> bool {
        if self.query.is_empty() {
            return true;
        }
        objective.counter.to_string().contains(&self.query)
    }
}

/// Enum dispatch over the built-in searchers.
pub enum SearchBy {
    Title(TitleSearcher),
    Counter(CounterSearcher),
}

impl SearchBy {
    fn matches(&self, objective: &Objective) -> bool {
        match self {
            Self::Title(s) => s.matches(objective),
            Self::Counter(s) => s.matches(objective),
        }
    }
}

/// Matches if any sub-searcher matches.
pub struct CompositeSearcher {
    searchers: Vec<SearchBy>,
}

impl CompositeSearcher {
    /// An empty composite matches every objective.
    pub fn new() -> Self {
        Self {
            searchers: Vec::new(),
        }
    }

    /// Counter and title searchers for the same query.
    pub fn all(query: impl Into<String>) -> Self {
        let query = query.into();
        Self {
            searchers: vec![
                SearchBy::Counter(CounterSearcher::new(query.clone())),
                SearchBy::Title(TitleSearcher::new(query)),
            ],
        }
    }

    pub fn with_search(mut self, searcher: SearchBy) -> Self {
        self.searchers.push(searcher);
        self
    }
}

impl Default for CompositeSearcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectiveSearcher for CompositeSearcher {
    fn matches(&self, objective: &Objective) -> bool {
        if self.searchers.is_empty() {
            return true;
        }
        self.searchers.iter().any(|s| s.matches(objective))
    }
}

/// Order-preserving subsequence of an objective list, held as source indices.
///
/// The view does not own the objectives; accessors take the source slice it
/// was computed from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    indices: Vec<usize>,
}

impl FilteredView {
    /// Every objective, in source order.
    pub fn identity(len: usize) -> Self {
        Self {
            indices: (0..len).collect(),
        }
    }

    pub fn compute(objectives: &[Objective], query: &str) -> Self {
        if query.is_empty() {
            return Self::identity(objectives.len());
        }
        Self::with_searcher(objectives, &CompositeSearcher::all(query))
    }

    pub fn with_searcher(objectives: &[Objective], searcher: &impl ObjectiveSearcher) -> Self {
        Self {
            indices: objectives
                .iter()
                .enumerate()
                .filter(|(_, objective)| searcher.matches(objective))
                .map(|(i, _)| i)
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Source index of the objective at `position` in the view.
    pub fn source_index(&self, position: usize) -> Option<usize> {
        self.indices.get(position).copied()
    }

    pub fn get<'a>(&self, objectives: &'a [Objective], position: usize) -> Option<&'a Objective> {
        self.source_index(position).and_then(|i| objectives.get(i))
    }

    pub fn iter<'a>(&'a self, objectives: &'a [Objective]) -> impl Iterator<Item = &'a Objective> + 'a {
        self.indices.iter().filter_map(move |&i| objectives.get(i))
    }

    /// Position in the view of the objective with `id`, if it is retained.
    pub fn position_of(&self, objectives: &[Objective], id: ObjectiveId) -> Option<usize> {
        self.indices
            .iter()
            .position(|&i| objectives.get(i).is_some_and(|o| o.id == id))
    }
}
