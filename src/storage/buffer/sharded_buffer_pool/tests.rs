use super::*;
use crate::storage::disk::disk_manager::DiskManager;

fn pool_with(num_shards: u32, shard_pool_size: usize) -> ShardedBufferPool {
    ShardedBufferPool::builder()
        .num_shards(num_shards)
        .shard_pool_size(shard_pool_size)
        .disk_manager(DiskManager::new_with_handle_for_test())
        .build()
}

#[test]
fn round_robin_allocation_spreads_across_shards() {
    let pool = pool_with(4, 1);

    let mut remainders = Vec::new();
    for _ in 0..4 {
        let (page_id, _) = pool.new_page().unwrap();
        remainders.push(page_id % 4);
    }

    remainders.sort();
    assert_eq!(remainders, vec![0, 1, 2, 3]);
}

#[test]
fn new_page_returns_none_once_every_shard_is_full() {
    let pool = pool_with(2, 1);

    pool.new_page().unwrap();
    pool.new_page().unwrap();
    assert!(pool.new_page().is_none());
}

#[test]
fn point_operations_route_by_page_id_modulo_shard_count() {
    let pool = pool_with(4, 5);

    let (page_id, _) = pool.new_page().unwrap();
    assert!(pool.unpin(page_id, false));
    assert!(pool.fetch(page_id).is_some());
    assert!(pool.unpin(page_id, false));
    assert!(pool.flush(page_id));
    assert!(pool.delete(page_id));
}

#[test]
fn pool_size_is_shard_count_times_shard_pool_size() {
    let pool = pool_with(3, 10);
    assert_eq!(pool.pool_size(), 30);
}

#[test]
fn flush_all_reaches_every_shard() {
    let pool = pool_with(3, 2);

    let page_ids: Vec<_> = (0..3).map(|_| pool.new_page().unwrap().0).collect();
    for &page_id in &page_ids {
        assert!(pool.unpin(page_id, true));
    }

    pool.flush_all();

    for &page_id in &page_ids {
        assert!(pool.fetch(page_id).is_some());
    }
}
