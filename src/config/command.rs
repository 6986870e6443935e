use std::fmt;

use clap::Subcommand;
use comment_board::{Comment, PostStore, Storage, StorageError};
use log::warn;

#[derive(Debug, Clone, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Print every post with its comments
    List,
    /// Add a comment on top of a post
    Comment { post_id: String, content: String },
    /// Reply to a comment at any depth
    Reply {
        post_id: String,
        comment_id: String,
        content: String,
    },
    /// Delete a comment and all of its replies
    Delete { post_id: String, comment_id: String },
}

impl Command {
    /// Text typed by the user, if the command carries any.
    ///
    /// Whitespace-only text counts as missing.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Comment { content, .. } | Self::Reply { content, .. } => {
                Some(content.as_str()).filter(|content| !content.trim().is_empty())
            }
            Self::List | Self::Delete { .. } => None,
        }
    }

    pub const fn requires_content(&self) -> bool {
        matches!(self, Self::Comment { .. } | Self::Reply { .. })
    }

    /// Run the command against `store`.
    ///
    /// Returns whether the store was changed; blank text and unknown posts
    /// are skipped with a warning.
    pub fn apply<S: Storage>(&self, store: &mut PostStore<S>) -> Result<bool, StorageError> {
        if self.requires_content() && self.content().is_none() {
            warn!("Refusing to {} with empty content", self);
            return Ok(false);
        }

        match self {
            Self::List => return Ok(false),
            Self::Comment { post_id, content } => {
                let Some(post) = store.post(post_id) else {
                    warn!("Post {} not found", post_id);
                    return Ok(false);
                };
                let mut comments = vec![Comment::root(content)];
                comments.extend(post.comments.iter().cloned());
                store.update_post_comments(post_id, comments)?;
            }
            Self::Reply {
                post_id,
                comment_id,
                content,
            } => store.add_reply_to_comment(post_id, comment_id, Comment::reply(content))?,
            Self::Delete {
                post_id,
                comment_id,
            } => store.delete_comment(post_id, comment_id)?,
        }
        Ok(true)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Comment { .. } => write!(f, "comment"),
            Self::Reply { .. } => write!(f, "reply"),
            Self::Delete { .. } => write!(f, "delete"),
        }
    }
}
