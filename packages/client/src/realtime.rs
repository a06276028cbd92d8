use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::entity::recipe_comment;

/// Buffered comments per topic before a slow subscriber starts lagging.
const CHANNEL_CAPACITY: usize = 64;

/// In-process fan-out of newly appended comments, keyed by recipe.
///
/// A detail view subscribes while it is on screen; dropping the
/// subscription releases the topic once its last receiver is gone, so a
/// remount never double-delivers.
#[derive(Clone, Default)]
pub struct CommentFeed {
    channels: Arc<DashMap<Uuid, broadcast::Sender<recipe_comment::Model>>>,
}

impl CommentFeed {
    pub fn new() -> Self {
        Self {
            channels: Arc::new(DashMap::new()),
        }
    }

    /// Open a live feed of comments appended to one recipe.
    pub fn subscribe(&self, recipe_id: Uuid) -> CommentSubscription {
        let rx = self
            .channels
            .entry(recipe_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe();
        CommentSubscription {
            feed: self.clone(),
            recipe_id,
            rx: Some(rx),
        }
    }

    /// Deliver a stored comment to current subscribers of its recipe.
    /// A topic nobody watches is skipped.
    pub(crate) fn publish(&self, comment: &recipe_comment::Model) {
        if let Some(tx) = self.channels.get(&comment.recipe_id) {
            let _ = tx.send(comment.clone());
        }
    }

    fn release(&self, recipe_id: Uuid) {
        self.channels
            .remove_if(&recipe_id, |_, tx| tx.receiver_count() == 0);
    }

    #[cfg(test)]
    fn topic_count(&self) -> usize {
        self.channels.len()
    }
}

/// Live append-only comment feed scoped to one recipe.
///
/// Unsubscribes deterministically on drop.
pub struct CommentSubscription {
    feed: CommentFeed,
    recipe_id: Uuid,
    rx: Option<broadcast::Receiver<recipe_comment::Model>>,
}

impl CommentSubscription {
    pub fn recipe_id(&self) -> Uuid {
        self.recipe_id
    }

    /// Wait for the next appended comment. Returns `None` once the feed
    /// is closed. A lagged subscriber skips to the oldest retained
    /// comment instead of erroring.
    pub async fn recv(&mut self) -> Option<recipe_comment::Model> {
        let rx = self.rx.as_mut()?;
        loop {
            match rx.recv().await {
                Ok(comment) => return Some(comment),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "comment subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

impl Drop for CommentSubscription {
    fn drop(&mut self) {
        // Receiver must be gone before the topic can be reclaimed.
        self.rx.take();
        self.feed.release(self.recipe_id);
    }
}
