//! Public consultation comments: submission gates, moderation
//! transitions, and per-role visibility.

use super::domain::UserRole;
use super::model::{Act, Comment, Identity};
use chrono::{DateTime, Utc};

/// Why a comment submission was refused.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommentError {
    #[error("only citizens may submit consultation comments")]
    RoleNotAllowed,
    #[error("the consultation window for this act is closed")]
    ConsultationClosed,
    #[error("comment content must not be empty")]
    EmptyContent,
}

/// Build a new, unapproved comment for an act, enforcing the submission
/// gates: citizen author, open consultation window, non-blank content.
/// The id is assigned by the repository layer.
pub fn draft_comment(
    act: &Act,
    author: &Identity,
    content: &str,
    now: DateTime<Utc>,
) -> Result<Comment, CommentError> {
    if author.role != UserRole::Citizen {
        return Err(CommentError::RoleNotAllowed);
    }
    if !act.consultation_open(now.date_naive()) {
        return Err(CommentError::ConsultationClosed);
    }
    let content = content.trim();
    if content.is_empty() {
        return Err(CommentError::EmptyContent);
    }

    Ok(Comment {
        id: String::new(),
        act_id: act.id.clone(),
        author: author.name.clone(),
        author_email: author.email.clone(),
        author_role: author.role,
        content: content.to_string(),
        created_at: now,
        approved: false,
    })
}

/// Visibility rule for a single comment. Officers and admins see
/// everything, including the moderation queue; citizens see only their
/// own comments, approved or still pending.
pub fn is_visible_to(comment: &Comment, viewer: &Identity) -> bool {
    if viewer.role.can_moderate() {
        return true;
    }
    comment.author_email == viewer.email
}

/// The subset of comments the viewer may see, preserving input order.
pub fn visible_comments<'a>(comments: &'a [Comment], viewer: &Identity) -> Vec<&'a Comment> {
    comments
        .iter()
        .filter(|comment| is_visible_to(comment, viewer))
        .collect()
}

/// Comments still awaiting moderation, for the officer/admin queue.
pub fn pending_comments(comments: &[Comment]) -> Vec<&Comment> {
    comments.iter().filter(|comment| !comment.approved).collect()
}
