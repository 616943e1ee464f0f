mod buffer_pool_manager;

pub use buffer_pool_manager::{BufferPoolManager, BufferPoolManagerBuilder, FrameId};
