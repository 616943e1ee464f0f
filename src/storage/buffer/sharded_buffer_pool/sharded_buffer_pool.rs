use crate::storage::buffer::buffer_pool_manager::BufferPoolManager;
use crate::storage::disk::disk_manager::{DiskManager, PageId};
use crate::storage::log::{LogManager, NoOpLogManager};
use crate::storage::page::FrameHandle;
use std::sync::{Arc, Mutex};

/// Partitions the page-id space across `num_shards` independent
/// [`BufferPoolManager`] instances by `page_id % num_shards`, and spreads
/// `new_page` allocations round-robin across shards.
#[derive(Debug)]
pub struct ShardedBufferPool {
    shards: Vec<Mutex<BufferPoolManager>>,
    cursor: Mutex<usize>,
}

#[derive(Default)]
pub struct ShardedBufferPoolBuilder {
    num_shards: Option<u32>,
    shard_pool_size: Option<usize>,
    disk_manager: Option<Arc<Mutex<DiskManager>>>,
    log_manager: Option<Arc<dyn LogManager>>,
}

impl ShardedBufferPoolBuilder {
    pub fn num_shards(&mut self, num_shards: u32) -> &mut Self {
        self.num_shards = Some(num_shards);
        self
    }

    pub fn shard_pool_size(&mut self, shard_pool_size: usize) -> &mut Self {
        self.shard_pool_size = Some(shard_pool_size);
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

    pub fn build(&self) -> ShardedBufferPool {
        let num_shards = self
            .num_shards
            .expect("`num_shards` not initialized before build.");
        let shard_pool_size = self
            .shard_pool_size
            .expect("`shard_pool_size` not initialized before build.");
        let disk_manager = self
            .disk_manager
            .clone()
            .expect("`disk_manager` not initialized before build.");
        let log_manager = self
            .log_manager
            .clone()
            .unwrap_or_else(|| Arc::new(NoOpLogManager));

        ShardedBufferPool::new(num_shards, shard_pool_size, disk_manager, log_manager)
    }
}

impl ShardedBufferPool {
    pub fn new(
        num_shards: u32,
        shard_pool_size: usize,
        disk_manager: Arc<Mutex<DiskManager>>,
        log_manager: Arc<dyn LogManager>,
    ) -> Self {
        let shards = (0..num_shards)
            .map(|shard_index| {
                Mutex::new(BufferPoolManager::new(
                    shard_pool_size,
                    shard_index,
                    num_shards,
                    Arc::clone(&disk_manager),
                    Arc::clone(&log_manager),
                ))
            })
            .collect();

        ShardedBufferPool {
            shards,
            cursor: Mutex::new(0),
        }
    }

    pub fn builder() -> ShardedBufferPoolBuilder {
        ShardedBufferPoolBuilder::default()
    }

    pub fn num_shards(&self) -> usize {
        self.shards.len()
    }

    pub fn pool_size(&self) -> usize {
        self.shards
            .iter()
            .map(|shard| shard.lock().unwrap().pool_size())
            .sum()
    }

    fn shard_for(&self, page_id: PageId) -> &Mutex<BufferPoolManager> {
        let shard_index = page_id as usize % self.shards.len();
        &self.shards[shard_index]
    }

    pub fn fetch(&self, page_id: PageId) -> Option<FrameHandle> {
        self.shard_for(page_id).lock().unwrap().fetch(page_id)
    }

    pub fn unpin(&self, page_id: PageId, is_dirty: bool) -> bool {
        self.shard_for(page_id)
            .lock()
            .unwrap()
            .unpin(page_id, is_dirty)
    }

    pub fn flush(&self, page_id: PageId) -> bool {
        self.shard_for(page_id).lock().unwrap().flush(page_id)
    }

    pub fn delete(&self, page_id: PageId) -> bool {
        self.shard_for(page_id).lock().unwrap().delete(page_id)
    }

    /// Tries shards in round-robin order starting at the pool's cursor. The
    /// cursor advances by exactly one per call to this method regardless of
    /// how many shards end up being attempted, so allocation traffic stays
    /// spread out even when some shards are momentarily full.
    pub fn new_page(&self) -> Option<(PageId, FrameHandle)> {
        let num_shards = self.shards.len();
        if num_shards == 0 {
            return None;
        }

        let start = {
            let mut cursor = self.cursor.lock().unwrap();
            let start = *cursor;
            *cursor = (*cursor + 1) % num_shards;
            start
        };

        for offset in 0..num_shards {
            let shard_index = (start + offset) % num_shards;
            if let Some(result) = self.shards[shard_index].lock().unwrap().new_page() {
                return Some(result);
            }
        }
        log::warn!("sharded buffer pool exhausted: all {num_shards} shards full");
        None
    }

    pub fn flush_all(&self) {
        for shard in &self.shards {
            shard.lock().unwrap().flush_all();
        }
    }
}
