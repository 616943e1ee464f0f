use crate::storage::buffer::buffer_pool_manager::FrameId;
use std::collections::HashMap;

#[derive(Debug)]
struct Node {
    prev: Option<FrameId>,
    next: Option<FrameId>,
}

/// Tracks the subset of frames that are resident and currently unpinned,
/// ordered from most- to least-recently-unpinned, and picks eviction
/// victims from the least-recently-unpinned end.
///
/// Implemented as an intrusive doubly-linked list (nodes indexed by
/// `FrameId` rather than raw pointers) paired with the node map itself for
/// O(1) `pin`/`unpin`/`victim`. `head` is the most-recently-unpinned frame,
/// `tail` is the next victim.
#[derive(Debug, Default)]
pub struct LruReplacer {
    nodes: HashMap<FrameId, Node>,
    head: Option<FrameId>,
    tail: Option<FrameId>,
}

impl LruReplacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits `frame_id` as the most-recently-unpinned eviction candidate.
    /// No-op if `frame_id` is already tracked: a duplicate unpin must not
    /// refresh recency, or victim order becomes nondeterministic when a
    /// caller drops the last pin on the same frame more than once.
    pub fn unpin(&mut self, frame_id: FrameId) {
        if self.nodes.contains_key(&frame_id) {
            return;
        }
        self.push_front(frame_id);
    }

    /// Removes `frame_id` from the candidate set, if present.
    pub fn pin(&mut self, frame_id: FrameId) {
        if !self.nodes.contains_key(&frame_id) {
            return;
        }
        self.unlink(&frame_id);
        self.nodes.remove(&frame_id);
    }

    /// Removes and returns the least-recently-unpinned frame, or `None` if
    /// no frame is currently evictable.
    pub fn victim(&mut self) -> Option<FrameId> {
        let frame_id = self.tail?;
        self.unlink(&frame_id);
        self.nodes.remove(&frame_id);
        Some(frame_id)
    }

    /// Number of frames currently tracked as evictable.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    fn push_front(&mut self, frame_id: FrameId) {
        let old_head = self.head;
        self.nodes.insert(
            frame_id,
            Node {
                prev: None,
                next: old_head,
            },
        );
        if let Some(old_head) = old_head {
            self.nodes.get_mut(&old_head).expect("head node tracked").prev = Some(frame_id);
        }
        self.head = Some(frame_id);
        if self.tail.is_none() {
            self.tail = Some(frame_id);
        }
    }

    fn unlink(&mut self, frame_id: &FrameId) {
        let (prev, next) = match self.nodes.get(frame_id) {
            Some(node) => (node.prev, node.next),
            None => return,
        };
        match prev {
            Some(prev_id) => self.nodes.get_mut(&prev_id).expect("prev node tracked").next = next,
            None => self.head = next,
        }
        match next {
            Some(next_id) => self.nodes.get_mut(&next_id).expect("next node tracked").prev = prev,
            None => self.tail = prev,
        }
    }
}
