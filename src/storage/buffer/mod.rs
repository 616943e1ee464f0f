mod buffer_pool_manager;
mod replacer;
mod sharded_buffer_pool;

pub use buffer_pool_manager::{BufferPoolManager, BufferPoolManagerBuilder, FrameId};
pub use replacer::LruReplacer;
pub use sharded_buffer_pool::{ShardedBufferPool, ShardedBufferPoolBuilder};
