//! Terminal rendering of workflow progress

use parking_lot::Mutex;
use serde::Serialize;
use statclean_workflow::{ActivityEntry, Step, WorkflowObserver, WorkflowSnapshot};
use std::fmt;

/// Display state of one step in the progress bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepBadge {
    Completed,
    Active,
    Pending,
}

impl fmt::Display for StepBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Completed => "Completed",
            Self::Active => "Active",
            Self::Pending => "Pending",
        })
    }
}

#[must_use]
pub fn badge_for(step: Step, current: Step) -> StepBadge {
    match step.number().cmp(&current.number()) {
        std::cmp::Ordering::Less => StepBadge::Completed,
        std::cmp::Ordering::Equal => StepBadge::Active,
        std::cmp::Ordering::Greater => StepBadge::Pending,
    }
}

/// Share of the workflow reached, `current / 6 * 100`
#[must_use]
pub fn progress_percent(current: Step) -> f64 {
    f64::from(current.number()) / f64::from(Step::COUNT) * 100.0
}

/// One-line progress bar, e.g. `[x] Upload  [>] Clean  [ ] Validate ...`
#[must_use]
pub fn step_bar(current: Step) -> String {
    Step::ALL
        .iter()
        .map(|&step| {
            let mark = match badge_for(step, current) {
                StepBadge::Completed => 'x',
                StepBadge::Active => '>',
                StepBadge::Pending => ' ',
            };
            format!("[{mark}] {}", step.label())
        })
        .collect::<Vec<_>>()
        .join("  ")
}

#[must_use]
pub fn format_entry(entry: &ActivityEntry) -> String {
    format!("[{}] {}: {}", entry.clock_label(), entry.action, entry.details)
}

/// Format a whole log, oldest first
#[must_use]
pub fn render_log(entries: &[ActivityEntry]) -> Vec<String> {
    entries.iter().map(format_entry).collect()
}

#[derive(Debug, Default)]
struct RenderState {
    last_step: Option<Step>,
    rendered_entries: usize,
    lines: Vec<String>,
}

/// Observer that turns snapshots into terminal lines.
///
/// Only new entries are printed; a shrinking log means the session was
/// reset, and rendering starts over.
#[derive(Debug, Default)]
pub struct ConsoleRenderer {
    state: Mutex<RenderState>,
}

impl ConsoleRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every line rendered so far
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.state.lock().lines.clone()
    }

    fn render(&self, snapshot: &WorkflowSnapshot) {
        let mut state = self.state.lock();

        if snapshot.activity_log.len() < state.rendered_entries {
            state.rendered_entries = 0;
            state.last_step = None;
            state.lines.push("-- workflow reset --".to_string());
            tracing::info!("workflow reset");
        }

        if state.last_step != Some(snapshot.current_step) {
            let step = snapshot.current_step;
            let line = format!(
                "Step {step} {:.0}%  {}",
                progress_percent(step),
                step_bar(step)
            );
            tracing::info!(step = step.number(), badge = %StepBadge::Active, "{line}");
            state.lines.push(line);
            state.last_step = Some(step);
        }

        let fresh: Vec<String> = snapshot.activity_log[state.rendered_entries..]
            .iter()
            .map(format_entry)
            .collect();
        for line in fresh {
            tracing::info!("{line}");
            state.lines.push(line);
        }
        state.rendered_entries = snapshot.activity_log.len();
    }
}

impl WorkflowObserver for ConsoleRenderer {
    fn on_change(&self, snapshot: &WorkflowSnapshot) {
        self.render(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statclean_workflow::{DatasetDescriptor, DatasetSource, WorkflowController};
    use std::sync::Arc;

    #[test]
    fn badges_split_around_current_step() {
        let badges: Vec<StepBadge> = Step::ALL
            .iter()
            .map(|&s| badge_for(s, Step::Validate))
            .collect();
        assert_eq!(
            badges,
            vec![
                StepBadge::Completed,
                StepBadge::Completed,
                StepBadge::Active,
                StepBadge::Pending,
                StepBadge::Pending,
                StepBadge::Pending,
            ]
        );
    }

    #[test]
    fn progress_is_share_of_six() {
        assert!((progress_percent(Step::Upload) - 100.0 / 6.0).abs() < 1e-9);
        assert!((progress_percent(Step::Validate) - 50.0).abs() < 1e-9);
        assert!((progress_percent(Step::Report) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn step_bar_marks_active_step() {
        let bar = step_bar(Step::Clean);
        assert!(bar.starts_with("[x] Upload  [>] Clean  [ ] Validate"));
    }

    #[test]
    fn renderer_prints_each_entry_once_and_restarts_after_reset() {
        let renderer = Arc::new(ConsoleRenderer::new());
        let mut controller = WorkflowController::new();
        controller.subscribe(renderer.clone());

        controller
            .load_dataset(DatasetSource::Demo, DatasetDescriptor::demo())
            .unwrap();
        controller.advance_step().unwrap();

        let lines = renderer.lines();
        let entry_lines = lines.iter().filter(|l| l.starts_with('[')).count();
        assert_eq!(entry_lines, 2);
        assert!(lines.iter().any(|l| l.contains("Demo data loaded: 15 records")));
        assert!(lines.iter().any(|l| l.starts_with("Step 2 (Clean) 33%")));

        controller.reset_workflow();
        let lines = renderer.lines();
        assert!(lines.iter().any(|l| l == "-- workflow reset --"));
        assert!(lines.last().unwrap().starts_with("Step 1 (Upload) 17%"));
    }
}
