//! Randomized partitioning of a focus budget into cue offsets

use rand::Rng;

use super::CuePlan;

/// Seconds between a break-start cue and the matching break-end cue, on
/// top of the configured break length
const BREAK_END_MARGIN_SECS: u64 = 3;

/// Split `total_secs` into a strictly increasing sequence of offsets.
///
/// A cursor advances from zero by a uniform random step drawn from
/// `[min_step, max_step]` inclusive, recording every stop. The last stop
/// is the one that reached or passed the budget, so it is dropped; every
/// returned offset is strictly below `total_secs`. Degenerate bounds
/// yield no offsets.
pub fn partition_interval<R: Rng>(
    total_secs: u64,
    min_step: u64,
    max_step: u64,
    rng: &mut R,
) -> Vec<u64> {
    if min_step == 0 || max_step < min_step {
        return Vec::new();
    }

    let mut offsets = Vec::new();
    let mut current = 0;
    while current < total_secs {
        current += rng.gen_range(min_step..=max_step);
        offsets.push(current);
    }
    offsets.pop();
    offsets
}

/// Build the cue plan for (re)entering the running state.
///
/// The budget still to focus is the session length minus what is already
/// deposited; a session already over budget gets an empty plan. Each
/// break-end cue trails its break-start cue by the break length plus a
/// fixed margin, and the long-interval cue fires when the whole budget
/// runs out.
pub fn derive_plan<R: Rng>(
    total_budget_secs: u64,
    deposited_secs: u64,
    min_step: u64,
    max_step: u64,
    short_break_secs: u64,
    rng: &mut R,
) -> CuePlan {
    let remaining = total_budget_secs.saturating_sub(deposited_secs);
    if remaining == 0 {
        return CuePlan::empty();
    }

    let interval_start = partition_interval(remaining, min_step, max_step, rng);
    let shift = BREAK_END_MARGIN_SECS + short_break_secs;
    let interval_end = interval_start.iter().map(|offset| offset + shift).collect();

    CuePlan {
        interval_start,
        interval_end,
        long_interval: Some(remaining),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    #[test]
    fn offsets_stay_below_the_budget_and_increase() {
        let mut rng = thread_rng();
        for _ in 0..50 {
            let offsets = partition_interval(5400, 180, 300, &mut rng);
            assert!(!offsets.is_empty());
            let mut previous = 0;
            for &offset in &offsets {
                assert!(offset < 5400);
                let step = offset - previous;
                assert!((180..=300).contains(&step));
                previous = offset;
            }
            // one more step from the last offset must be able to reach the budget
            assert!(previous + 300 >= 5400);
        }
    }

    #[test]
    fn equal_bounds_walk_the_multiples() {
        let mut rng = thread_rng();
        assert_eq!(partition_interval(10, 3, 3, &mut rng), vec![3, 6, 9]);
        // a stop landing exactly on the budget is dropped too
        assert_eq!(partition_interval(9, 3, 3, &mut rng), vec![3, 6]);
    }

    #[test]
    fn zero_budget_yields_no_offsets() {
        let mut rng = thread_rng();
        assert!(partition_interval(0, 180, 300, &mut rng).is_empty());
    }

    #[test]
    fn budget_within_one_step_yields_no_offsets() {
        let mut rng = thread_rng();
        assert!(partition_interval(180, 180, 300, &mut rng).is_empty());
        assert!(partition_interval(100, 180, 300, &mut rng).is_empty());
    }

    #[test]
    fn degenerate_bounds_yield_no_offsets() {
        let mut rng = thread_rng();
        assert!(partition_interval(5400, 0, 300, &mut rng).is_empty());
        assert!(partition_interval(5400, 300, 180, &mut rng).is_empty());
    }

    #[test]
    fn plan_shifts_break_end_cues_by_break_plus_margin() {
        let mut rng = thread_rng();
        let plan = derive_plan(5400, 0, 180, 300, 10, &mut rng);
        assert_eq!(plan.interval_end.len(), plan.interval_start.len());
        for (start, end) in plan.interval_start.iter().zip(&plan.interval_end) {
            assert_eq!(end - start, 13);
        }
        assert_eq!(plan.long_interval, Some(5400));
    }

    #[test]
    fn plan_budget_shrinks_by_the_deposit() {
        let mut rng = thread_rng();
        let plan = derive_plan(5400, 1800, 180, 300, 10, &mut rng);
        assert_eq!(plan.long_interval, Some(3600));
        assert!(plan.interval_start.iter().all(|&offset| offset < 3600));
    }

    #[test]
    fn overspent_budget_yields_an_empty_plan() {
        let mut rng = thread_rng();
        assert!(derive_plan(5400, 5400, 180, 300, 10, &mut rng).is_empty());
        assert!(derive_plan(5400, 9000, 180, 300, 10, &mut rng).is_empty());
    }
}
