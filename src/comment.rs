use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

const ROOT_AUTHOR: &str = "Current User";
const ROOT_AUTHOR_IMG_URL: &str = "https://ui-avatars.com/api/?name=Current+User";
const REPLY_AUTHOR: &str = "guest";
const REPLY_AUTHOR_IMG_URL: &str = "https://ui-avatars.com/api/?name=Guest";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub author_img_url: String,
    /// ISO-8601 creation time
    pub timestamp: String,
    pub content: String,
    pub replies: Vec<Comment>,
}

impl Comment {
    /// Create a comment stamped with the current time.
    ///
    /// The id is the creation time in milliseconds, so two comments created
    /// within the same millisecond share an id.
    pub fn new(author: &str, author_img_url: &str, content: &str) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis().to_string(),
            author: author.to_string(),
            author_img_url: author_img_url.to_string(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            content: content.to_string(),
            replies: vec![],
        }
    }
    /// A top-level comment written by the current user
    pub fn root(content: &str) -> Self {
        Self::new(ROOT_AUTHOR, ROOT_AUTHOR_IMG_URL, content)
    }
    /// A reply written by a guest
    pub fn reply(content: &str) -> Self {
        Self::new(REPLY_AUTHOR, REPLY_AUTHOR_IMG_URL, content)
    }

    /// Number of comments in this subtree, including itself
    pub fn subtree_size(&self) -> usize {
        1 + count(&self.replies)
    }

    fn clone_without_replies(&self) -> Self {
        Self {
            id: self.id.clone(),
            author: self.author.clone(),
            author_img_url: self.author_img_url.clone(),
            timestamp: self.timestamp.clone(),
            content: self.content.clone(),
            replies: vec![],
        }
    }
}

//==============================================================================
// Tree
//==============================================================================

/// Return a copy of `comments` where `reply` is appended to the replies of
/// the comment with id `comment_id`.
///
/// Missing ids leave the tree unchanged.
pub fn add_reply(comments: &[Comment], comment_id: &str, reply: &Comment) -> Vec<Comment> {
    comments
        .iter()
        .map(|comment| {
            let mut node = comment.clone_without_replies();
            if comment.id == comment_id {
                node.replies = comment.replies.clone();
                node.replies.push(reply.clone());
            } else {
                node.replies = add_reply(&comment.replies, comment_id, reply);
            }
            node
        })
        .collect()
}

/// Return a copy of `comments` without the comment `comment_id` and
/// everything below it.
///
/// Replies of a deleted comment are dropped with it, never moved up.
pub fn delete_comment(comments: &[Comment], comment_id: &str) -> Vec<Comment> {
    comments
        .iter()
        .filter(|comment| comment.id != comment_id)
        .map(|comment| Comment {
            replies: delete_comment(&comment.replies, comment_id),
            ..comment.clone_without_replies()
        })
        .collect()
}

/// First comment with `comment_id`, depth first
pub fn find<'a>(comments: &'a [Comment], comment_id: &str) -> Option<&'a Comment> {
    comments.iter().find_map(|comment| {
        if comment.id == comment_id {
            Some(comment)
        } else {
            find(&comment.replies, comment_id)
        }
    })
}

pub fn contains(comments: &[Comment], comment_id: &str) -> bool {
    find(comments, comment_id).is_some()
}

/// Total number of comments at every depth
pub fn count(comments: &[Comment]) -> usize {
    comments.iter().map(Comment::subtree_size).sum()
}
