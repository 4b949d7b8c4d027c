//! Self-test scenario for slotlist.
//!
//! [`run_scenario`] drives a capacity-10 list through the same sequence the
//! integration tests cover and records every assertion in a [`Report`]
//! instead of panicking, so the binary can print the full list of failures.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use slotlist::{validate, ListError, NodeView, SlotList, Validity};

/// Dump file written when no path is given.
pub const DEFAULT_DOT_PATH: &str = "unitTestingDump.dot";

/// One recorded assertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Check {
    /// Source text of the asserted expression.
    pub expr: &'static str,
    /// Line of the assertion.
    pub line: u32,
    /// Whether it held.
    pub passed: bool,
}

/// Outcome of a scenario run.
#[derive(Clone, Debug, Default)]
pub struct Report {
    checks: Vec<Check>,
}

impl Report {
    /// Record one assertion.
    pub fn record(&mut self, expr: &'static str, line: u32, passed: bool) {
        if passed {
            tracing::info!(line, "ok: {expr}");
        } else {
            tracing::error!(line, "failed: {expr}");
        }
        self.checks.push(Check { expr, line, passed });
    }

    /// All recorded assertions, in order.
    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// Assertions that did not hold.
    pub fn failures(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(|c| !c.passed)
    }

    /// `true` when every assertion held.
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }
}

/// Record `cond` in `report` under its source text.
#[macro_export]
macro_rules! check {
    ($report:expr, $cond:expr) => {
        $report.record(stringify!($cond), line!(), $cond)
    };
}

/// Result of [`run_scenario`]: the assertion report and the Graphviz dump
/// of the final list.
#[derive(Clone, Debug)]
pub struct ScenarioRun {
    pub report: Report,
    pub dot: String,
}

fn head(list: &SlotList<i32>) -> Option<u32> {
    list.front_handle().map(|h| h.index())
}

fn tail(list: &SlotList<i32>) -> Option<u32> {
    list.back_handle().map(|h| h.index())
}

fn slot_at(list: &SlotList<i32>, position: usize) -> Option<u32> {
    list.handle_at(position).map(|h| h.index())
}

fn exhausted<H>(result: Result<H, ListError>) -> bool {
    matches!(result, Err(ListError::CapacityExhausted { .. }))
}

/// Render a node as `{VALUE|v}|{NEXT|n}|{PREVIOUS|p}`, with `-1` for a
/// missing link.
pub fn render_node(node: &NodeView<'_, i32>) -> String {
    let link = |l: Option<u32>| l.map_or(-1, i64::from);
    format!(
        "{{VALUE|{}}}|{{NEXT|{}}}|{{PREVIOUS|{}}}",
        node.value,
        link(node.next),
        link(node.prev)
    )
}

/// Run the capacity-10 scenario.
///
/// Assertion failures are recorded, not returned. An `Err` means an
/// operation the scenario relies on was refused, so the run stopped early.
pub fn run_scenario() -> Result<ScenarioRun, ListError> {
    let mut report = Report::default();
    let vals = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
    let mut list = SlotList::with_capacity(10)?;
    check!(report, head(&list).is_none());
    check!(report, tail(&list).is_none());

    let h1 = list.push_front(vals[1])?;
    check!(report, head(&list) == Some(0));
    check!(report, tail(&list) == Some(0));
    check!(report, list.len() == 1);

    let h8 = list.push_back(vals[8])?;
    check!(report, tail(&list) == Some(1));
    check!(report, head(&list) == Some(0));
    check!(report, list.len() == 2);

    list.insert_after(h8, vals[9])?;
    check!(report, list.len() == 3);
    check!(report, tail(&list) == Some(2));
    check!(report, head(&list) == Some(0));

    list.insert_before(h1, vals[0])?;
    check!(report, list.len() == 4);
    check!(report, tail(&list) == Some(2));
    check!(report, head(&list) == Some(3));

    check!(report, slot_at(&list, 0) == Some(3));
    check!(report, slot_at(&list, 1) == Some(0));
    check!(report, slot_at(&list, 2) == Some(1));
    check!(report, slot_at(&list, 3) == Some(2));

    for i in 2..8 {
        if let Some(anchor) = list.handle_at(i - 1) {
            list.insert_after(anchor, vals[i])?;
        }
        check!(report, list.get_at(i) == Some(&vals[i]));
    }

    check!(report, list.len() == 10);
    check!(report, exhausted(list.push_front(0)));
    check!(report, exhausted(list.push_back(0)));
    check!(report, exhausted(list.insert_after(h1, 0)));
    check!(report, exhausted(list.insert_before(h1, 0)));

    let old_head = list.handle_of(3)?;
    list.remove(old_head)?;
    check!(report, list.len() == 9);
    check!(report, head(&list) == Some(0));

    let old_tail = list.handle_of(2)?;
    list.remove(old_tail)?;
    check!(report, list.len() == 8);
    check!(report, tail(&list) == Some(1));

    check!(report, validate(Some(&list)) == Validity::Ok);
    list.sort();
    check!(report, list.iter().copied().eq(2..=9));
    check!(report, list.check_integrity().is_ok());

    let mut dot = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = list.dump_with(&mut dot, render_node);
    let dot = String::from_utf8_lossy(&dot).into_owned();
    list.destroy();

    Ok(ScenarioRun { report, dot })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_passes() {
        let run = run_scenario().unwrap();
        let failed: Vec<_> = run.report.failures().map(|c| c.expr).collect();
        assert!(failed.is_empty(), "failed checks: {failed:?}");
        assert!(run.report.checks().len() > 30);
    }

    #[test]
    fn scenario_dump_renders_payloads() {
        let run = run_scenario().unwrap();
        assert!(run.dot.starts_with("digraph {\n"));
        assert!(run
            .dot
            .contains("node0[label=\"{{0}|{{VALUE|2}|{NEXT|4}|{PREVIOUS|-1}}}\",shape=record];"));
        assert!(run.dot.ends_with("Head -> node0;\nnode1 -> Tail;\n}"));
    }

    #[test]
    fn report_tracks_failures() {
        let mut report = Report::default();
        check!(report, 1 + 1 == 2);
        check!(report, 1 > 2);
        assert!(!report.passed());
        let failed: Vec<_> = report.failures().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].expr, "1 > 2");
    }
}
