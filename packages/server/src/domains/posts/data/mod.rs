//! Request/response payloads for the posts domain.

use serde::{Deserialize, Serialize};

use crate::domains::posts::models::{Comment, PostDetails, PostFeedItem};

/// Body of `POST /posts`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitPostInput {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub details: PostDetails,
}

/// Body of `PUT /posts/:id`. All fields optional; the variant payload is
/// replaced as a whole when present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditPostInput {
    pub title: Option<String>,
    pub body: Option<String>,
    pub images: Option<Vec<String>>,
    pub details: Option<PostDetails>,
}

/// Body of `POST /posts/:id/comments`.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentInput {
    pub body: String,
}

/// Body of `POST /posts/:id/report`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportInput {
    pub reason: String,
}

/// Response of `GET /posts/:id`: the feed item plus its comment thread.
#[derive(Debug, Clone, Serialize)]
pub struct PostWithComments {
    #[serde(flatten)]
    pub post: PostFeedItem,
    pub comments: Vec<Comment>,
}
