use log::{debug, info};
use serde::Deserialize;

use crate::{
    comment::{self, Comment},
    post::{default_posts, Post},
    storage::{Storage, StorageError},
};

/// Storage key holding the whole post collection
pub const STORAGE_KEY: &str = "post";

/// The post collection, written back to storage after every change
#[derive(Debug)]
pub struct PostStore<S: Storage> {
    storage: S,
    posts: Vec<Post>,
    initialized: bool,
}

impl<S: Storage> PostStore<S> {
    /// Create a store that has not read its storage yet
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            posts: vec![],
            initialized: false,
        }
    }

    /// Create a store and load the posts from `storage`
    pub fn load(storage: S) -> Result<Self, StorageError> {
        let mut store = Self::new(storage);
        store.init()?;
        Ok(store)
    }

    /// Load the posts once; later calls do nothing.
    ///
    /// An empty storage is filled with the default posts.
    pub fn init(&mut self) -> Result<(), StorageError> {
        if self.initialized {
            return Ok(());
        }

        let posts = self.read()?;
        if posts.is_empty() {
            info!("No stored posts, writing defaults");
            self.posts = default_posts();
            self.persist()?;
        } else {
            self.posts = posts;
        }

        self.initialized = true;
        info!("Loaded {} posts", self.posts.len());
        Ok(())
    }

    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, post_id: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == post_id)
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Replace the top-level comments of a post
    pub fn update_post_comments(
        &mut self,
        post_id: &str,
        comments: Vec<Comment>,
    ) -> Result<(), StorageError> {
        self.update_comments(post_id, |_| comments)
    }

    /// Append `reply` to the replies of `comment_id`, at any depth
    pub fn add_reply_to_comment(
        &mut self,
        post_id: &str,
        comment_id: &str,
        reply: Comment,
    ) -> Result<(), StorageError> {
        self.update_comments(post_id, |comments| {
            comment::add_reply(comments, comment_id, &reply)
        })
    }

    /// Remove `comment_id` together with all of its replies
    pub fn delete_comment(&mut self, post_id: &str, comment_id: &str) -> Result<(), StorageError> {
        self.update_comments(post_id, |comments| {
            comment::delete_comment(comments, comment_id)
        })
    }

    fn update_comments<F>(&mut self, post_id: &str, update: F) -> Result<(), StorageError>
    where
        F: FnOnce(&[Comment]) -> Vec<Comment>,
    {
        self.init()?;

        match self.posts.iter_mut().find(|post| post.id == post_id) {
            Some(post) => {
                post.comments = update(&post.comments);
                debug!("Post {} has {} comments", post.id, comment::count(&post.comments));
            }
            None => debug!("Post {} not found", post_id),
        }

        self.persist()
    }

    fn read(&self) -> Result<Vec<Post>, StorageError> {
        match self.storage.get_item(STORAGE_KEY)? {
            Some(value) if !value.is_empty() => parse_posts(&value),
            _ => Ok(vec![]),
        }
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let value = serde_json::to_string(&self.posts)?;
        self.storage.set_item(STORAGE_KEY, &value)
    }
}

/// Parse a stored collection, however deeply its replies are nested
fn parse_posts(value: &str) -> Result<Vec<Post>, StorageError> {
    let mut json = serde_json::Deserializer::from_str(value);
    json.disable_recursion_limit();
    let posts = Vec::<Post>::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    Ok(posts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn stored_posts(store: &PostStore<MemoryStorage>) -> Vec<Post> {
        let value = store.storage().get_item(STORAGE_KEY).unwrap().unwrap();
        serde_json::from_str(&value).unwrap()
    }

    #[test]
    fn first_load_writes_defaults() {
        let store = PostStore::load(MemoryStorage::new()).unwrap();
        assert!(store.is_initialized());
        assert_eq!(store.posts(), default_posts().as_slice());
        assert_eq!(stored_posts(&store), default_posts());
    }

    #[test]
    fn empty_string_and_empty_array_count_as_first_run() {
        for value in ["", "[]"] {
            let mut storage = MemoryStorage::new();
            storage.set_item(STORAGE_KEY, value).unwrap();
            let store = PostStore::load(storage).unwrap();
            assert_eq!(store.posts(), default_posts().as_slice());
        }
    }

    #[test]
    fn malformed_json_is_an_error() {
        let mut storage = MemoryStorage::new();
        storage.set_item(STORAGE_KEY, "{not json").unwrap();
        let err = PostStore::load(storage).unwrap_err();
        assert!(matches!(err, StorageError::Json(_)));
    }

    #[test]
    fn deep_reply_chain_reloads() {
        let mut store = PostStore::load(MemoryStorage::new()).unwrap();
        let mut parent = "21".to_string();
        for depth in 0..200 {
            let id = format!("deep-{}", depth);
            let reply = Comment {
                id: id.clone(),
                ..Comment::reply("deeper")
            };
            store.add_reply_to_comment("1", &parent, reply).unwrap();
            parent = id;
        }

        let storage = store.storage().clone();
        let reloaded = PostStore::load(storage).unwrap();
        assert_eq!(reloaded.posts(), store.posts());
        assert!(comment::contains(&reloaded.post("1").unwrap().comments, "deep-199"));
    }

    #[test]
    fn trailing_garbage_is_an_error() {
        let mut storage = MemoryStorage::new();
        storage.set_item(STORAGE_KEY, "[] []").unwrap();
        assert!(matches!(PostStore::load(storage), Err(StorageError::Json(_))));
    }

    #[test]
    fn init_reads_storage_once() {
        let mut store = PostStore::new(MemoryStorage::new());
        assert!(!store.is_initialized());
        assert!(store.posts().is_empty());

        store.init().unwrap();
        store.delete_comment("1", "1").unwrap();
        store.init().unwrap();
        assert_eq!(store.post("1").unwrap().comments.len(), 1);
    }

    #[test]
    fn mutation_initializes_first() {
        let mut store = PostStore::new(MemoryStorage::new());
        store.delete_comment("1", "21").unwrap();

        assert!(store.is_initialized());
        assert!(store.post("1").unwrap().comments[1].replies.is_empty());
    }

    #[test]
    fn unknown_post_is_noop() {
        let mut store = PostStore::load(MemoryStorage::new()).unwrap();
        store.add_reply_to_comment("404", "2", Comment::reply("lost")).unwrap();
        store.delete_comment("404", "2").unwrap();
        store.update_post_comments("404", vec![]).unwrap();

        assert_eq!(store.posts(), default_posts().as_slice());
        assert_eq!(stored_posts(&store), default_posts());
    }
}
