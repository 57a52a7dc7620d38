//! Typed ID definitions for all domain entities.
//!
//! This module defines type aliases for each domain entity, providing
//! compile-time type safety for ID usage throughout the application.

// Re-export the core Id type
pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Member entities (platform users).
pub struct Member;

/// Marker type for Post entities (confessions, events, cultural events, news).
pub struct Post;

/// Marker type for Comment entities (comments on posts).
pub struct Comment;

/// Marker type for Registration entities (event signups).
pub struct Registration;

/// Marker type for Notification entities (workflow side-effect records).
pub struct Notification;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for Member entities.
pub type MemberId = Id<Member>;

/// Typed ID for Post entities.
pub type PostId = Id<Post>;

/// Typed ID for Comment entities.
pub type CommentId = Id<Comment>;

/// Typed ID for Registration entities.
pub type RegistrationId = Id<Registration>;

/// Typed ID for Notification entities.
pub type NotificationId = Id<Notification>;
