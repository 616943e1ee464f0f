use crate::common::constants::INVALID_PAGE_ID;
use crate::config::config::RUSTY_DB_PAGE_SIZE_BYTES;
use crate::storage::disk::disk_manager::{PageBuffer, PageId};
use std::sync::{Arc, RwLock};

/// A pinned reference to a frame. Cloning a handle is cheap (an `Arc` bump);
/// the buffer pool hands out clones of the same handle to every pinner of a
/// page, so concurrent mutation of the buffer's contents is the callers'
/// responsibility; this layer only guarantees the frame itself isn't reused
/// while pinned.
pub type FrameHandle = Arc<RwLock<Frame>>;

/// A fixed-size slot in the buffer pool: a page-sized data buffer plus the
/// metadata the buffer pool manager needs to track it (page id, pin count,
/// dirty flag). One frame holds at most one resident page at a time.
#[derive(Debug, Clone)]
pub struct Frame {
    page_id: PageId,
    pin_count: usize,
    is_dirty: bool,
    data: Box<PageBuffer>,
}

impl Frame {
    /// A frame with no resident page, born into the free list.
    pub fn empty() -> Self {
        Frame {
            page_id: INVALID_PAGE_ID,
            pin_count: 0,
            is_dirty: false,
            data: Box::new([0; RUSTY_DB_PAGE_SIZE_BYTES]),
        }
    }

    pub fn new_handle() -> FrameHandle {
        Arc::new(RwLock::new(Self::empty()))
    }

    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    pub fn pin_count(&self) -> usize {
        self.pin_count
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// Raw read access to the page's contents.
    pub fn data(&self) -> &PageBuffer {
        &self.data
    }

    /// Raw write access to the page's contents. Does not touch the dirty
    /// flag; callers mark a page dirty via `unpin`'s sticky, caller-driven
    /// dirty bit.
    pub fn data_mut(&mut self) -> &mut PageBuffer {
        &mut self.data
    }

    pub(crate) fn set_dirty(&mut self, is_dirty: bool) {
        self.is_dirty = is_dirty;
    }

    pub(crate) fn increment_pin_count(&mut self) {
        self.pin_count += 1;
    }

    pub(crate) fn decrement_pin_count(&mut self) {
        if self.pin_count == 0 {
            panic!("pin count already at zero, cannot decrement");
        }
        self.pin_count -= 1;
    }

    /// Re-homes this frame to hold `page_id`'s freshly read-in (or
    /// freshly-allocated, zeroed) bytes, with pin count 1 and a clean dirty
    /// bit. Used by the shard when bringing a page into a frame.
    pub(crate) fn reset_for(&mut self, page_id: PageId, data: PageBuffer) {
        self.page_id = page_id;
        self.data = Box::new(data);
        self.pin_count = 1;
        self.is_dirty = false;
    }

    /// Returns this frame to the "no resident page" state: a frame is always
    /// in exactly one of free list / replacer set / pinned, and this marks it
    /// as belonging to none until the free list claims it.
    pub(crate) fn clear(&mut self) {
        self.page_id = INVALID_PAGE_ID;
        self.pin_count = 0;
        self.is_dirty = false;
        self.data = Box::new([0; RUSTY_DB_PAGE_SIZE_BYTES]);
    }
}
