// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Property-based tests for summary rendering

use proptest::prelude::*;
use tapwatch::report::progress_bar;
use tapwatch_core::{Statistics, Status};

fn statistics() -> impl Strategy<Value = Statistics> {
    (0usize..50, 0usize..50, 0usize..50, 0usize..50, 0usize..50).prop_map(
        |(pass, skip, fail, xpass, xfail)| Statistics {
            pass,
            skip,
            fail,
            xpass,
            xfail,
        },
    )
}

fn segment(status: Status) -> char {
    match status {
        Status::Pass => '#',
        Status::Skip => 's',
        Status::XFail => 'x',
        Status::XPass => 'X',
        Status::Fail => 'F',
    }
}

proptest! {
    /// Property: the bar always has exactly `width` cells
    #[test]
    fn prop_bar_has_fixed_width(
        stats in statistics(),
        plan in prop::option::of(0u64..300),
        width in 1usize..80,
    ) {
        let bar = progress_bar(&stats, plan, width);
        let cells: String = bar.chars().skip(1).take_while(|&c| c != ']').collect();
        prop_assert_eq!(cells.chars().count(), width);
    }

    /// Property: segments appear in pass, skip, xfail, xpass, fail order
    #[test]
    fn prop_segments_are_ordered(stats in statistics(), width in 1usize..80) {
        let bar = progress_bar(&stats, None, width);
        let order: Vec<char> = Status::ALL.iter().map(|&s| segment(s)).collect();

        let mut last = 0;
        for c in bar.chars().skip(1).take_while(|&c| c != ']' && c != ' ') {
            let rank = order.iter().position(|&o| o == c).expect("segment char");
            prop_assert!(rank >= last);
            last = rank;
        }
    }

    /// Property: without a plan a non-empty bar is completely filled
    #[test]
    fn prop_unplanned_bar_is_full(stats in statistics(), width in 1usize..80) {
        prop_assume!(stats.total() > 0);
        let bar = progress_bar(&stats, None, width);
        let cells: String = bar.chars().skip(1).take_while(|&c| c != ']').collect();
        prop_assert!(!cells.contains(' '));
    }
}
