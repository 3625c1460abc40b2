//! Offset/limit pagination wire types.

use planview_core::Page;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub limit: usize,
    pub offset: usize,
    pub total: usize,
}

impl PaginationMeta {
    /// Offset of the following page, if one exists.
    pub fn next_offset(&self) -> Option<usize> {
        let next = self.offset + self.limit;
        (next < self.total).then_some(next)
    }
}

/// One page of a sub-collection as returned by a data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T: Clone> PaginatedResponse<T> {
    /// Slice `all` at `offset..offset+limit`, truncated to what exists.
    pub fn from_slice(all: &[T], limit: usize, offset: usize) -> Self {
        let start = offset.min(all.len());
        let end = offset.saturating_add(limit).min(all.len());
        Self {
            data: all[start..end].to_vec(),
            meta: PaginationMeta {
                limit,
                offset,
                total: all.len(),
            },
        }
    }
}

impl<T> PaginatedResponse<T> {
    pub fn into_page(self) -> Page<T> {
        Page {
            offset: self.meta.offset,
            limit: self.meta.limit,
            items: self.data,
            total: self.meta.total,
        }
    }
}
