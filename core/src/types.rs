//! DTOs for the posts API.
//!
//! # Design
//! These mirror the mock-server's schema but are defined independently;
//! integration tests catch any drift between the two crates.

use serde::{Deserialize, Serialize};

use crate::query::QueryParams;

/// Page size used when a caller does not pick one.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// A single post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub body: String,
}

/// Request payload for creating a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub body: String,
}

/// One page of posts plus the totals needed to fetch the next one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostsPage {
    pub posts: Vec<Post>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

impl PostsPage {
    pub fn has_more(&self) -> bool {
        self.skip.saturating_add(self.posts.len() as u64) < self.total
    }

    /// The request for the page after this one, if any remain.
    pub fn next_page(&self) -> Option<PageRequest> {
        self.has_more().then(|| PageRequest {
            skip: self.skip.saturating_add(self.posts.len() as u64),
            limit: self.limit,
        })
    }
}

/// Offset-based page selector, sent as `?skip=..&limit=..`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub skip: u64,
    pub limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Zero-based page `index` of `size` items.
    pub fn page(index: u64, size: u64) -> Self {
        Self {
            skip: index.saturating_mul(size),
            limit: size,
        }
    }

    pub fn query(&self) -> QueryParams {
        QueryParams::new()
            .with("skip", self.skip)
            .with("limit", self.limit)
    }
}
