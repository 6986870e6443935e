use log::info;
use serde::{Deserialize, Serialize};

use crate::comment::{count, Comment};

const SEED_AUTHOR_IMG_URL: &str = "https://ui-avatars.com/api/?name=John+Doe";
const SEED_DESC: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Duis dignissim id tellus eu lobortis. Integer dui lacus, ultrices ac varius quis, varius sed lorem. In molestie elementum nisl eget pulvinar";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub desc: String,
    pub author: String,
    pub timestamp: String,
    pub comments: Vec<Comment>,
}

/// Posts written to an empty storage on first start
pub fn default_posts() -> Vec<Post> {
    fn seed_comment(
        id: &str,
        author: &str,
        timestamp: &str,
        content: &str,
        replies: Vec<Comment>,
    ) -> Comment {
        Comment {
            id: id.to_string(),
            author: author.to_string(),
            author_img_url: SEED_AUTHOR_IMG_URL.to_string(),
            timestamp: timestamp.to_string(),
            content: content.to_string(),
            replies,
        }
    }

    let reply = seed_comment(
        "21",
        "guest",
        "2024-06-08T19:58:43.987Z",
        "this is sub comment",
        vec![],
    );

    vec![Post {
        id: "1".to_string(),
        title: "Post Title".to_string(),
        desc: SEED_DESC.to_string(),
        author: "Author".to_string(),
        timestamp: "2024-06-06T12:00:00Z".to_string(),
        comments: vec![
            seed_comment(
                "1",
                "user1",
                "2024-06-08T21:58:43.987Z",
                "This is a main comment",
                vec![],
            ),
            seed_comment(
                "2",
                "guest",
                "2024-06-08T20:58:43.987Z",
                "This is another main comment",
                vec![reply],
            ),
        ],
    }]
}

pub fn display_posts(posts: &[Post]) {
    if !log::log_enabled!(log::Level::Info) {
        return;
    }

    for post in posts {
        info!("+-[{}]---------------------------------------- - -", post.id);
        info!("| {}", post.title);
        info!("| by {} at {}", post.author, post.timestamp);
        info!("| {}", post.desc);
        info!("+-- {} comments", count(&post.comments));
        display_comments(&post.comments, 1);
        info!("");
    }
}

fn display_comments(comments: &[Comment], depth: usize) {
    let indent = "  ".repeat(depth);
    for comment in comments {
        info!(
            "{}- [{}] {} ({}): {}",
            indent, comment.id, comment.author, comment.timestamp, comment.content
        );
        if !comment.replies.is_empty() {
            info!("{}  {} replies", indent, comment.replies.len());
            display_comments(&comment.replies, depth + 1);
        }
    }
}
