//! The scoring driver: advances one worker's chunk of the seed space through
//! a compiled filter tree eight seeds at a time.
//!
//! Each batch runs the cheap prefilter across all eight lanes, narrows to the
//! survivors with a [`VectorMask`], then re-runs only those lanes through the
//! exact verify pass. A lane that passes both is scored and handed to the
//! caller's sink if it clears the session's current cutoff.

use seedscan_core::mask::{VectorMask, LANES};
use seedscan_core::streams::{ItemStreamSource, ScalarItemStreamSource};
use seedscan_core::{SeedBatch, SEED_SPACE_SIZE};
use seedscan_filter::FilterTree;

use crate::error::SearchError;
use crate::result::SearchResult;
use crate::session::SearchSession;

/// Scans `count` seeds starting at `start_index`, calling `on_result` for
/// every seed that clears `tree` and the session's cutoff.
///
/// Stops early (returning `Ok`) if `session` is cancelled mid-range. The
/// caller is expected to have already partitioned the full seed space into
/// disjoint `(start_index, count)` chunks, one per worker thread.
pub fn search_range<S, F>(
    source: &S,
    tree: &FilterTree<S>,
    start_index: u64,
    count: u64,
    session: &SearchSession,
    mut on_result: F,
) -> Result<(), SearchError>
where
    S: ItemStreamSource + ScalarItemStreamSource<LaneState = <S as ItemStreamSource>::LaneState>,
    F: FnMut(SearchResult),
{
    if tree.must.is_empty() && tree.must_not.is_empty() && tree.should.is_empty() {
        return Err(SearchError::EmptyFilterTree);
    }
    let end = start_index
        .checked_add(count)
        .filter(|&end| end <= SEED_SPACE_SIZE)
        .ok_or(SearchError::RangeOverflow { start: start_index, count, space_size: SEED_SPACE_SIZE })?;

    let mut cursor = start_index;
    while cursor < end {
        if session.is_cancelled() {
            log::debug!("search cancelled at seed index {cursor}");
            return Ok(());
        }
        let batch_len = core::cmp::min(LANES as u64, end - cursor) as usize;
        scan_batch(source, tree, cursor, batch_len, session, &mut on_result);
        cursor += batch_len as u64;
    }
    Ok(())
}

fn scan_batch<S, F>(
    source: &S,
    tree: &FilterTree<S>,
    batch_start: u64,
    batch_len: usize,
    session: &SearchSession,
    on_result: &mut F,
) where
    S: ItemStreamSource + ScalarItemStreamSource<LaneState = <S as ItemStreamSource>::LaneState>,
    F: FnMut(SearchResult),
{
    let batch = SeedBatch::from_index(batch_start);
    let mut lanes = source.open_lanes(&batch);

    let live_bits = if batch_len >= LANES { u8::MAX } else { (1u8 << batch_len) - 1 };
    let initial = VectorMask::from_bits(live_bits);

    let alive = tree.prefilter_batch(source, &mut lanes, initial);
    if alive.is_empty() {
        return;
    }

    for i in alive.iter_indices() {
        if !tree.verify_lane(source, lanes.get_mut(i)) {
            continue;
        }
        let (score, per_clause_counts) = tree.score_lane(source, lanes.get_mut(i));
        session.observe_score(score);
        if score < session.cutoff() {
            continue;
        }
        session.record_result();
        on_result(SearchResult { seed: batch.lane(i), score, per_clause_counts });
    }
}
