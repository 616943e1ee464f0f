mod sharded_buffer_pool;
#[cfg(test)]
mod tests;

pub use sharded_buffer_pool::{ShardedBufferPool, ShardedBufferPoolBuilder};
