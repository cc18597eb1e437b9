// Copyright (c) The boxtree Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    raw::{RawSuite, RawTest},
    status::TestStatus,
    tree::{DecoratedSuite, DecoratedTest},
};
use proptest::{collection::vec, option, prelude::*};

pub(crate) fn arb_status() -> impl Strategy<Value = TestStatus> {
    prop_oneof![
        // Weight passes more heavily so that fully-passing subtrees show up.
        4 => Just(TestStatus::Passed),
        2 => Just(TestStatus::Failed),
        1 => Just(TestStatus::Pending),
        1 => Just(TestStatus::Todo),
    ]
}

pub(crate) fn arb_raw_test() -> impl Strategy<Value = RawTest> {
    ("[a-z]{1,8}", arb_status(), option::of(0.0f64..5000.0)).prop_map(
        |(title, status, duration)| RawTest {
            title,
            status,
            duration,
        },
    )
}

pub(crate) fn arb_raw_suite() -> impl Strategy<Value = RawSuite> {
    let leaf = ("[a-z]{0,8}", vec(arb_raw_test(), 0..4)).prop_map(|(title, tests)| RawSuite {
        title,
        tests,
        suites: Vec::new(),
    });
    leaf.prop_recursive(4, 48, 4, |inner| {
        ("[a-z]{0,8}", vec(arb_raw_test(), 0..4), vec(inner, 0..4)).prop_map(
            |(title, tests, suites)| RawSuite {
                title,
                tests,
                suites,
            },
        )
    })
}

/// Returns true if any test in this suite or below it failed.
pub(crate) fn any_descendant_failed(suite: &RawSuite) -> bool {
    suite.all_tests().any(|test| test.status.is_failure())
}

/// A node among a suite's children, in drawing order.
pub(crate) enum Child<'a> {
    Test(&'a DecoratedTest),
    Suite(&'a DecoratedSuite),
}

impl Child<'_> {
    pub(crate) fn is_last(&self) -> bool {
        match self {
            Child::Test(test) => test.is_last(),
            Child::Suite(suite) => suite.is_last(),
        }
    }

    pub(crate) fn is_failure(&self) -> bool {
        match self {
            Child::Test(test) => test.status().is_failure(),
            Child::Suite(suite) => suite.status().is_failure(),
        }
    }

    pub(crate) fn later_sibling_fails(&self) -> bool {
        match self {
            Child::Test(test) => test.later_sibling_fails(),
            Child::Suite(suite) => suite.later_sibling_fails(),
        }
    }
}

/// Returns a suite's children in drawing order: tests first, then suites.
pub(crate) fn children(suite: &DecoratedSuite) -> Vec<Child<'_>> {
    suite
        .tests()
        .iter()
        .map(Child::Test)
        .chain(suite.suites().iter().map(Child::Suite))
        .collect()
}

/// Calls `f` on every suite in the tree, root first.
pub(crate) fn for_each_suite(suite: &DecoratedSuite, f: &mut dyn FnMut(&DecoratedSuite)) {
    f(suite);
    for child in suite.suites() {
        for_each_suite(child, f);
    }
}

/// Counts the number of tests and non-skipped suites in a tree.
pub(crate) fn count_nodes(suite: &DecoratedSuite) -> (usize, usize) {
    let mut tests = 0;
    let mut suites = 0;
    for_each_suite(suite, &mut |suite| {
        tests += suite.tests().len();
        if !suite.is_skipped() {
            suites += 1;
        }
    });
    (tests, suites)
}
