// DiskManager / PageId
pub const INVALID_PAGE_ID: u32 = u32::MAX;

// BufferPoolManager
pub const SHARD_INDEX_OUT_OF_RANGE_MSG: &str = "shard_index must be less than num_shards.";
