use super::LruReplacer;

#[test]
fn victim_on_empty_replacer_returns_none() {
    let mut replacer = LruReplacer::new();
    assert_eq!(replacer.victim(), None);
}

#[test]
fn victim_returns_least_recently_unpinned_first() {
    let mut replacer = LruReplacer::new();
    replacer.unpin(1);
    replacer.unpin(2);
    replacer.unpin(3);

    assert_eq!(replacer.victim(), Some(1));
    assert_eq!(replacer.victim(), Some(2));
    assert_eq!(replacer.victim(), Some(3));
    assert_eq!(replacer.victim(), None);
}

#[test]
fn duplicate_unpin_does_not_refresh_recency() {
    let mut replacer = LruReplacer::new();
    replacer.unpin(1);
    replacer.unpin(2);
    replacer.unpin(1);

    assert_eq!(replacer.victim(), Some(1));
    assert_eq!(replacer.victim(), Some(2));
}

#[test]
fn pin_removes_frame_from_candidate_set() {
    let mut replacer = LruReplacer::new();
    replacer.unpin(1);
    replacer.unpin(2);
    replacer.pin(1);

    assert_eq!(replacer.size(), 1);
    assert_eq!(replacer.victim(), Some(2));
    assert_eq!(replacer.victim(), None);
}

#[test]
fn pin_on_untracked_frame_is_a_no_op() {
    let mut replacer = LruReplacer::new();
    replacer.unpin(1);
    replacer.pin(42);

    assert_eq!(replacer.size(), 1);
}

#[test]
fn size_tracks_evictable_frame_count() {
    let mut replacer = LruReplacer::new();
    assert_eq!(replacer.size(), 0);

    replacer.unpin(1);
    replacer.unpin(2);
    assert_eq!(replacer.size(), 2);

    replacer.victim();
    assert_eq!(replacer.size(), 1);

    replacer.pin(2);
    assert_eq!(replacer.size(), 0);
}

#[test]
fn unlinking_middle_frame_preserves_remaining_order() {
    let mut replacer = LruReplacer::new();
    replacer.unpin(1);
    replacer.unpin(2);
    replacer.unpin(3);
    replacer.pin(2);

    assert_eq!(replacer.victim(), Some(1));
    assert_eq!(replacer.victim(), Some(3));
    assert_eq!(replacer.victim(), None);
}
