use crate::common::constants::SHARD_INDEX_OUT_OF_RANGE_MSG;
use crate::config::config::RUSTY_DB_PAGE_SIZE_BYTES;
use crate::storage::buffer::replacer::LruReplacer;
use crate::storage::disk::disk_manager::{DiskManager, PageBuffer, PageId};
use crate::storage::log::{LogManager, LogSequenceNumber, NoOpLogManager};
use crate::storage::page::{Frame, FrameHandle};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

pub type FrameId = usize;

/// A single buffer pool instance: a fixed array of frames, a page table,
/// a free list, and a replacer, all guarded by whatever mutex the owner
/// (typically [`crate::storage::buffer::sharded_buffer_pool::ShardedBufferPool`])
/// wraps this struct in. `BufferPoolManager` itself does no internal
/// locking; the replacer is only ever touched while that outer mutex is
/// held.
#[derive(Debug)]
pub struct BufferPoolManager {
    shard_index: u32,
    num_shards: u32,
    next_page_id: PageId,
    frames: Vec<FrameHandle>,
    page_table: HashMap<PageId, FrameId>,
    free_list: VecDeque<FrameId>,
    replacer: LruReplacer,
    disk_manager: Arc<Mutex<DiskManager>>,
    log_manager: Arc<dyn LogManager>,
}

#[derive(Default)]
pub struct BufferPoolManagerBuilder {
    pool_size: Option<usize>,
    shard_index: Option<u32>,
    num_shards: Option<u32>,
    disk_manager: Option<Arc<Mutex<DiskManager>>>,
    log_manager: Option<Arc<dyn LogManager>>,
}

impl BufferPoolManagerBuilder {
    pub fn pool_size(&mut self, pool_size: usize) -> &mut Self {
        self.pool_size = Some(pool_size);
        self
    }

    pub fn shard_index(&mut self, shard_index: u32) -> &mut Self {
        self.shard_index = Some(shard_index);
        self
    }

    pub fn num_shards(&mut self, num_shards: u32) -> &mut Self {
        self.num_shards = Some(num_shards);
        self
    }

    pub fn disk_manager(&mut self, disk_manager: Arc<Mutex<DiskManager>>) -> &mut Self {
        self.disk_manager = Some(disk_manager);
        self
    }

    pub fn log_manager(&mut self, log_manager: Arc<dyn LogManager>) -> &mut Self {
        self.log_manager = Some(log_manager);
        self
    }

    pub fn build(&self) -> BufferPoolManager {
        let pool_size = self
            .pool_size
            .expect("`pool_size` not initialized before build.");
        let disk_manager = self
            .disk_manager
            .clone()
            .expect("`disk_manager` not initialized before build.");
        let shard_index = self.shard_index.unwrap_or(0);
        let num_shards = self.num_shards.unwrap_or(1);
        let log_manager = self
            .log_manager
            .clone()
            .unwrap_or_else(|| Arc::new(NoOpLogManager));

        BufferPoolManager::new(pool_size, shard_index, num_shards, disk_manager, log_manager)
    }
}

impl BufferPoolManager {
    pub fn new(
        pool_size: usize,
        shard_index: u32,
        num_shards: u32,
        disk_manager: Arc<Mutex<DiskManager>>,
        log_manager: Arc<dyn LogManager>,
    ) -> Self {
        assert!(shard_index < num_shards, "{SHARD_INDEX_OUT_OF_RANGE_MSG}");

        BufferPoolManager {
            shard_index,
            num_shards,
            next_page_id: shard_index as PageId,
            frames: (0..pool_size).map(|_| Frame::new_handle()).collect(),
            page_table: HashMap::new(),
            free_list: (0..pool_size).collect(),
            replacer: LruReplacer::new(),
            disk_manager,
            log_manager,
        }
    }

    pub fn builder() -> BufferPoolManagerBuilder {
        BufferPoolManagerBuilder::default()
    }

    pub fn shard_index(&self) -> u32 {
        self.shard_index
    }

    pub fn pool_size(&self) -> usize {
        self.frames.len()
    }

    /// Fetches the page identified by `page_id`, bringing it in from disk if
    /// it isn't already resident. Returns `None` if the page is not resident
    /// and every frame is pinned.
    pub fn fetch(&mut self, page_id: PageId) -> Option<FrameHandle> {
        if let Some(&frame_id) = self.page_table.get(&page_id) {
            let handle = Arc::clone(&self.frames[frame_id]);
            handle.write().unwrap().increment_pin_count();
            self.replacer.pin(frame_id);
            return Some(handle);
        }

        let frame_id = self.evict_frame()?;

        let mut buffer: PageBuffer = [0u8; RUSTY_DB_PAGE_SIZE_BYTES];
        self.disk_manager
            .lock()
            .unwrap()
            .read_page(page_id, &mut buffer);

        let handle = Arc::clone(&self.frames[frame_id]);
        handle.write().unwrap().reset_for(page_id, buffer);
        self.page_table.insert(page_id, frame_id);
        self.replacer.pin(frame_id);

        log::trace!("fetched page {page_id} into frame {frame_id}");
        Some(handle)
    }

    /// Allocates a fresh page and a frame to hold it. The page is born in
    /// memory; nothing is read from disk. Returns `None` if every frame is
    /// pinned.
    pub fn new_page(&mut self) -> Option<(PageId, FrameHandle)> {
        let frame_id = self.evict_frame()?;
        let page_id = self.allocate_page_id();

        let handle = Arc::clone(&self.frames[frame_id]);
        handle
            .write()
            .unwrap()
            .reset_for(page_id, [0u8; RUSTY_DB_PAGE_SIZE_BYTES]);
        self.page_table.insert(page_id, frame_id);
        self.replacer.pin(frame_id);

        log::trace!("allocated page {page_id} in frame {frame_id}");
        Some((page_id, handle))
    }

    /// Returns `false` if `page_id` is not resident, or its pin count is
    /// already 0. Otherwise decrements the pin count, ORs `is_dirty` into the
    /// frame's dirty flag, and admits the frame to the replacer once the pin
    /// count reaches 0.
    pub fn unpin(&mut self, page_id: PageId, is_dirty: bool) -> bool {
        let Some(&frame_id) = self.page_table.get(&page_id) else {
            return false;
        };

        let handle = Arc::clone(&self.frames[frame_id]);
        let mut frame = handle.write().unwrap();
        if frame.pin_count() == 0 {
            return false;
        }

        if is_dirty {
            frame.set_dirty(true);
        }
        frame.decrement_pin_count();
        let now_evictable = frame.pin_count() == 0;
        drop(frame);

        if now_evictable {
            self.replacer.unpin(frame_id);
        }
        true
    }

    /// Writes the resident page to disk unconditionally and clears its dirty
    /// flag. Returns `false` if the page is not resident.
    pub fn flush(&mut self, page_id: PageId) -> bool {
        let Some(&frame_id) = self.page_table.get(&page_id) else {
            return false;
        };
        self.write_back(frame_id, page_id);
        true
    }

    /// Flushes every resident page, regardless of dirty flag, and does not
    /// clear dirty flags, preserved as an observable quirk for test
    /// determinism. Use [`Self::flush`] if a cleared flag is needed.
    pub fn flush_all(&mut self) {
        let page_ids: Vec<PageId> = self.page_table.keys().copied().collect();
        for page_id in page_ids {
            let frame_id = self.page_table[&page_id];
            self.write_back_unconditionally(frame_id, page_id);
        }
    }

    /// Returns `true` if the page is not resident (vacuously deleted) or was
    /// successfully deleted. Returns `false` if the page is resident and
    /// pinned.
    pub fn delete(&mut self, page_id: PageId) -> bool {
        let Some(&frame_id) = self.page_table.get(&page_id) else {
            return true;
        };

        let handle = Arc::clone(&self.frames[frame_id]);
        if handle.read().unwrap().pin_count() > 0 {
            return false;
        }

        if handle.read().unwrap().is_dirty() {
            self.write_back(frame_id, page_id);
        }
        handle.write().unwrap().clear();

        self.page_table.remove(&page_id);
        self.replacer.pin(frame_id);
        self.disk_manager.lock().unwrap().deallocate_page(page_id);
        self.free_list.push_back(frame_id);
        true
    }

    /// Prefers the free list over eviction; returns `None` if both the free
    /// list and the replacer are exhausted (every frame pinned).
    fn evict_frame(&mut self) -> Option<FrameId> {
        if let Some(frame_id) = self.free_list.pop_front() {
            return Some(frame_id);
        }

        let frame_id = match self.replacer.victim() {
            Some(frame_id) => frame_id,
            None => {
                log::warn!(
                    "shard {} exhausted: all {} frames pinned",
                    self.shard_index,
                    self.frames.len()
                );
                return None;
            }
        };

        let handle = Arc::clone(&self.frames[frame_id]);
        let old_page_id = handle.read().unwrap().page_id();
        if handle.read().unwrap().is_dirty() {
            self.write_back(frame_id, old_page_id);
        }
        self.page_table.remove(&old_page_id);
        Some(frame_id)
    }

    fn allocate_page_id(&mut self) -> PageId {
        let page_id = self.next_page_id;
        self.next_page_id += self.num_shards;
        debug_assert_eq!(
            page_id % self.num_shards,
            self.shard_index,
            "allocated page id must belong to this shard"
        );
        page_id
    }

    fn write_back(&mut self, frame_id: FrameId, page_id: PageId) {
        let handle = Arc::clone(&self.frames[frame_id]);
        let mut frame = handle.write().unwrap();
        self.log_manager.flush(frame_id as LogSequenceNumber);
        self.disk_manager
            .lock()
            .unwrap()
            .write_page(page_id, frame.data());
        frame.set_dirty(false);
        log::debug!("wrote back page {page_id} (frame {frame_id})");
    }

    fn write_back_unconditionally(&mut self, frame_id: FrameId, page_id: PageId) {
        let handle = Arc::clone(&self.frames[frame_id]);
        let frame = handle.write().unwrap();
        self.log_manager.flush(frame_id as LogSequenceNumber);
        self.disk_manager
            .lock()
            .unwrap()
            .write_page(page_id, frame.data());
    }
}
