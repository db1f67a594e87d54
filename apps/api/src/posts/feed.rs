//! Pure edits on a post document: likes and comments.

use chrono::Utc;
use sqlx::types::Json;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::post::{Comment, Like, Post};
use crate::models::user::User;

pub fn new_post(author: &User, text: &str) -> Post {
    Post {
        id: Uuid::new_v4(),
        user_id: author.id,
        text: text.to_string(),
        name: author.name.clone(),
        avatar: author.avatar.clone(),
        likes: Json(Vec::new()),
        comments: Json(Vec::new()),
        created_at: Utc::now(),
    }
}

pub fn ensure_author(post: &Post, user_id: Uuid) -> Result<(), AppError> {
    if post.user_id != user_id {
        return Err(AppError::forbidden());
    }
    Ok(())
}

pub fn has_liked(post: &Post, user_id: Uuid) -> bool {
    post.likes.iter().any(|l| l.user_id == user_id)
}

/// One like per user per post.
pub fn like(post: &mut Post, user_id: Uuid) -> Result<(), AppError> {
    if has_liked(post, user_id) {
        return Err(AppError::field("alreadyLiked", "User already liked this post"));
    }
    post.likes.insert(0, Like { user_id });
    Ok(())
}

pub fn unlike(post: &mut Post, user_id: Uuid) -> Result<(), AppError> {
    let index = post
        .likes
        .iter()
        .position(|l| l.user_id == user_id)
        .ok_or_else(|| AppError::field("notLiked", "You have not yet liked this post"))?;
    post.likes.remove(index);
    Ok(())
}

/// Prepends a comment by `author`. Returns the comment's id.
pub fn add_comment(post: &mut Post, author: &User, text: &str) -> Uuid {
    let id = Uuid::new_v4();
    post.comments.insert(
        0,
        Comment {
            id,
            user_id: author.id,
            text: text.to_string(),
            name: author.name.clone(),
            avatar: author.avatar.clone(),
            created_at: Utc::now(),
        },
    );
    id
}

pub fn no_comment() -> AppError {
    AppError::not_found("commentNotFound", "Comment not found")
}

/// Only the comment's author may remove it.
pub fn remove_comment(post: &mut Post, comment_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
    let index = post
        .comments
        .iter()
        .position(|c| c.id == comment_id)
        .ok_or_else(no_comment)?;
    if post.comments[index].user_id != user_id {
        return Err(AppError::forbidden());
    }
    post.comments.remove(index);
    Ok(())
}
