// Copyright (c) The boxtree Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decorated result trees.
//!
//! A [`DecoratedSuite`] is built from a [`RawSuite`] in a single bottom-up pass.
//! Building computes everything that depends on the shape of the tree and the
//! statuses within it:
//!
//! - **Aggregate status:** a suite fails iff a direct child test failed or a
//!   direct child suite failed.
//! - **Lastness:** children are drawn tests first, then suites. A test is last
//!   only if it's the final test and there are no child suites.
//! - **Later-sibling failures:** whether anything drawn after a node, among its
//!   siblings, failed. This decides whether the branch connector leading past
//!   the node is drawn as part of a failure path.
//!
//! Indent prefixes are assigned afterwards by
//! [`IndentPropagator`](crate::IndentPropagator), once aggregate statuses are
//! known for the whole tree.

use crate::{
    raw::{RawSuite, RawTest},
    status::{AggregateStatus, TestStatus},
};

/// A test result, decorated with its position in the tree.
#[derive(Clone, Debug, PartialEq)]
pub struct DecoratedTest {
    pub(crate) title: String,
    pub(crate) status: TestStatus,
    pub(crate) duration: Option<f64>,
    pub(crate) is_last: bool,
    pub(crate) later_sibling_fails: bool,
    pub(crate) indent: String,
}

impl DecoratedTest {
    fn new(raw: &RawTest, is_last: bool) -> Self {
        Self {
            title: raw.title.clone(),
            status: raw.status,
            duration: raw.duration,
            is_last,
            later_sibling_fails: false,
            indent: String::new(),
        }
    }

    /// The title of the test.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The status of the test.
    pub fn status(&self) -> TestStatus {
        self.status
    }

    /// The duration of the test in milliseconds, if known.
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// True if this is the last node drawn among its siblings.
    pub fn is_last(&self) -> bool {
        self.is_last
    }

    /// True if a test or suite drawn after this one, among its siblings, failed.
    pub fn later_sibling_fails(&self) -> bool {
        self.later_sibling_fails
    }

    /// The left-margin prefix for this test. Empty until indents are propagated.
    pub fn indent(&self) -> &str {
        &self.indent
    }
}

/// A suite of tests, decorated with its aggregate status and position in the tree.
#[derive(Clone, Debug, PartialEq)]
pub struct DecoratedSuite {
    pub(crate) title: String,
    pub(crate) skip: bool,
    pub(crate) tests: Vec<DecoratedTest>,
    pub(crate) suites: Vec<DecoratedSuite>,
    pub(crate) status: AggregateStatus,
    pub(crate) is_last: bool,
    pub(crate) later_sibling_fails: bool,
    pub(crate) indent: String,
}

impl DecoratedSuite {
    /// Builds the synthetic root of a result tree.
    ///
    /// The root wraps the whole run: its own title isn't drawn, and it's always
    /// last.
    pub fn build_root(raw: &RawSuite) -> Self {
        Self::build_impl(raw, true, true)
    }

    /// Builds a suite that is drawn with its title boxed.
    pub fn build(raw: &RawSuite, is_last: bool) -> Self {
        Self::build_impl(raw, is_last, false)
    }

    fn build_impl(raw: &RawSuite, is_last: bool, skip: bool) -> Self {
        // Suites are always drawn after tests, so a test can only be last if
        // there are no suites.
        let has_suites = !raw.suites.is_empty();
        let test_count = raw.tests.len();
        let mut tests: Vec<_> = raw
            .tests
            .iter()
            .enumerate()
            .map(|(idx, test)| DecoratedTest::new(test, !has_suites && idx + 1 == test_count))
            .collect();

        let mut suites: Vec<DecoratedSuite> = Vec::with_capacity(raw.suites.len());
        let last_idx = raw.suites.len().saturating_sub(1);
        for (idx, child) in raw.suites.iter().enumerate() {
            let item = Self::build_impl(child, idx == last_idx, false);
            // A failing suite only affects siblings drawn before it.
            if item.status.is_failure() {
                for earlier in &mut suites {
                    earlier.later_sibling_fails = true;
                }
            }
            suites.push(item);
        }

        let some_suite_failed = suites.iter().any(|suite| suite.status.is_failure());
        let some_test_failed = tests.iter().any(|test| test.status.is_failure());
        let status = AggregateStatus::from_failed(some_test_failed || some_suite_failed);

        let mut later_failed = some_suite_failed;
        for test in tests.iter_mut().rev() {
            test.later_sibling_fails = later_failed;
            later_failed |= test.status.is_failure();
        }

        Self {
            title: raw.title.clone(),
            skip,
            tests,
            suites,
            status,
            is_last,
            later_sibling_fails: false,
            indent: String::new(),
        }
    }

    /// The title of the suite.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// True for the synthetic root, whose title isn't drawn.
    pub fn is_skipped(&self) -> bool {
        self.skip
    }

    /// Tests directly inside this suite, in drawing order.
    pub fn tests(&self) -> &[DecoratedTest] {
        &self.tests
    }

    /// Suites directly inside this suite, in drawing order.
    pub fn suites(&self) -> &[DecoratedSuite] {
        &self.suites
    }

    /// The aggregate status of this suite.
    pub fn status(&self) -> AggregateStatus {
        self.status
    }

    /// True if this is the last node drawn among its siblings.
    pub fn is_last(&self) -> bool {
        self.is_last
    }

    /// True if a suite drawn after this one, among its siblings, failed.
    pub fn later_sibling_fails(&self) -> bool {
        self.later_sibling_fails
    }

    /// The left-margin prefix inherited from ancestors. Empty until indents
    /// are propagated.
    pub fn indent(&self) -> &str {
        &self.indent
    }

    /// Returns the index of the last failing child, counting tests first and
    /// then suites, or `None` if no child failed.
    pub fn max_failed_index(&self) -> Option<usize> {
        let suite_failures = self
            .suites
            .iter()
            .rposition(|suite| suite.status.is_failure())
            .map(|idx| self.tests.len() + idx);
        suite_failures.or_else(|| {
            self.tests
                .iter()
                .rposition(|test| test.status.is_failure())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{any_descendant_failed, arb_raw_suite, children, for_each_suite};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use test_strategy::proptest;

    fn passed(title: &str) -> RawTest {
        RawTest::new(title, TestStatus::Passed)
    }

    fn failed(title: &str) -> RawTest {
        RawTest::new(title, TestStatus::Failed)
    }

    #[test]
    fn test_root_is_skipped_and_last() {
        let root = DecoratedSuite::build_root(&RawSuite::default());
        assert!(root.is_skipped());
        assert!(root.is_last());
        assert_eq!(root.status(), AggregateStatus::Passed);
        assert_eq!(root.max_failed_index(), None);
    }

    #[test]
    fn test_single_passing_suite() {
        let raw = RawSuite::default().with_suite(RawSuite::new("S").with_test(passed("t1")));
        let root = DecoratedSuite::build_root(&raw);

        let suite = &root.suites()[0];
        assert!(!suite.is_skipped());
        assert!(suite.is_last());
        assert_eq!(suite.status(), AggregateStatus::Passed);
        let test = &suite.tests()[0];
        assert_eq!(test.title(), "t1");
        assert!(test.is_last());
        assert!(!test.later_sibling_fails());
    }

    #[test]
    fn test_failed_then_passed_tests() {
        let raw = RawSuite::default().with_suite(
            RawSuite::new("S")
                .with_test(failed("t1"))
                .with_test(passed("t2")),
        );
        let root = DecoratedSuite::build_root(&raw);

        let suite = &root.suites()[0];
        assert_eq!(suite.status(), AggregateStatus::Failed);
        assert_eq!(suite.max_failed_index(), Some(0));
        assert!(!suite.later_sibling_fails());

        let tests = suite.tests();
        assert!(!tests[0].is_last());
        assert!(!tests[0].later_sibling_fails());
        assert!(tests[1].is_last());
        assert!(!tests[1].later_sibling_fails());
    }

    #[test]
    fn test_passed_then_failed_tests() {
        let raw = RawSuite::new("S")
            .with_test(passed("t1"))
            .with_test(failed("t2"));
        let suite = DecoratedSuite::build(&raw, true);

        assert_eq!(suite.max_failed_index(), Some(1));
        assert!(suite.tests()[0].later_sibling_fails());
        assert!(!suite.tests()[1].later_sibling_fails());
    }

    #[test]
    fn test_tests_are_never_last_when_suites_follow() {
        let raw = RawSuite::new("S")
            .with_test(passed("t1"))
            .with_test(passed("t2"))
            .with_suite(RawSuite::new("inner").with_test(failed("t3")));
        let suite = DecoratedSuite::build(&raw, true);

        assert!(suite.tests().iter().all(|test| !test.is_last()));
        assert!(suite.suites()[0].is_last());
        // The failing suite is drawn after both tests.
        assert!(suite.tests().iter().all(|test| test.later_sibling_fails()));
        assert_eq!(suite.max_failed_index(), Some(2));
    }

    #[test]
    fn test_failing_suite_flags_earlier_siblings_only() {
        let raw = RawSuite::default()
            .with_suite(RawSuite::new("A").with_test(passed("a")))
            .with_suite(RawSuite::new("B").with_test(failed("b")))
            .with_suite(RawSuite::new("C").with_test(passed("c")));
        let root = DecoratedSuite::build_root(&raw);

        let flags: Vec<_> = root
            .suites()
            .iter()
            .map(|suite| (suite.title(), suite.later_sibling_fails()))
            .collect();
        assert_eq!(flags, vec![("A", true), ("B", false), ("C", false)]);
        assert_eq!(root.status(), AggregateStatus::Failed);
        assert_eq!(root.max_failed_index(), Some(1));
    }

    #[test]
    fn test_failed_suite_before_passing_suite() {
        let raw = RawSuite::default()
            .with_suite(RawSuite::new("A").with_test(failed("a")))
            .with_suite(RawSuite::new("B").with_test(passed("b")));
        let root = DecoratedSuite::build_root(&raw);

        let (a, b) = (&root.suites()[0], &root.suites()[1]);
        assert_eq!(a.status(), AggregateStatus::Failed);
        assert!(!a.later_sibling_fails());
        assert!(!a.is_last());
        assert_eq!(b.status(), AggregateStatus::Passed);
        assert!(!b.later_sibling_fails());
        assert!(b.is_last());
    }

    #[test]
    fn test_failure_propagates_through_levels() {
        let raw = RawSuite::default().with_suite(
            RawSuite::new("outer").with_suite(
                RawSuite::new("middle").with_suite(RawSuite::new("inner").with_test(failed("t"))),
            ),
        );
        let root = DecoratedSuite::build_root(&raw);

        let mut failed_titles = Vec::new();
        for_each_suite(&root, &mut |suite| {
            if suite.status().is_failure() {
                failed_titles.push(suite.title().to_owned());
            }
        });
        assert_eq!(failed_titles, vec!["", "outer", "middle", "inner"]);
    }

    #[test]
    fn test_pending_and_todo_do_not_fail() {
        let raw = RawSuite::new("S")
            .with_test(RawTest::new("p", TestStatus::Pending))
            .with_test(RawTest::new("t", TestStatus::Todo));
        let suite = DecoratedSuite::build(&raw, false);
        assert_eq!(suite.status(), AggregateStatus::Passed);
        assert!(!suite.is_last());
        assert!(suite.tests().iter().all(|test| !test.later_sibling_fails()));
    }

    #[proptest]
    fn proptest_aggregate_status(#[strategy(arb_raw_suite())] raw: RawSuite) {
        fn check(raw: &RawSuite, suite: &DecoratedSuite) -> bool {
            suite.status().is_failure() == any_descendant_failed(raw)
                && raw
                    .suites
                    .iter()
                    .zip(suite.suites())
                    .all(|(raw, suite)| check(raw, suite))
        }

        let root = DecoratedSuite::build_root(&raw);
        prop_assert!(check(&raw, &root));
    }

    #[proptest]
    fn proptest_exactly_one_last(#[strategy(arb_raw_suite())] raw: RawSuite) {
        let root = DecoratedSuite::build_root(&raw);
        let mut ok = true;
        for_each_suite(&root, &mut |suite| {
            let children = children(suite);
            if children.is_empty() {
                return;
            }
            let last_count = children.iter().filter(|child| child.is_last()).count();
            ok &= last_count == 1;
            ok &= children.last().is_some_and(|child| child.is_last());
        });
        prop_assert!(ok);
    }

    #[proptest]
    fn proptest_later_sibling_fails(#[strategy(arb_raw_suite())] raw: RawSuite) {
        let root = DecoratedSuite::build_root(&raw);
        let mut ok = true;
        for_each_suite(&root, &mut |suite| {
            let children = children(suite);
            for (idx, child) in children.iter().enumerate() {
                let expected = children[idx + 1..].iter().any(|later| later.is_failure());
                ok &= child.later_sibling_fails() == expected;
            }

            let expected_max = children.iter().rposition(|child| child.is_failure());
            ok &= suite.max_failed_index() == expected_max;
        });
        prop_assert!(ok);
    }
}
