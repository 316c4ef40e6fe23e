mod common;
use common::d;

use rplanner::core::calendar::{CalendarFilter, CalendarLogic, CalendarSource};
use rplanner::errors::{AppError, AppResult};
use rplanner::models::calendar_event::EventKind;
use rplanner::models::leave::Leave;
use rplanner::models::project::Project;
use rplanner::models::status::LeaveStatus;
use rplanner::models::task::Task;
use rplanner::utils::date::{DateWindow, parse_period};

#[derive(Default)]
struct FakeSource {
    tasks: Vec<Task>,
    leaves: Vec<Leave>,
    projects: Vec<Project>,
    broken_leaves: bool,
}

impl CalendarSource for FakeSource {
    fn tasks_in(&mut self, _window: &DateWindow) -> AppResult<Vec<Task>> {
        Ok(self.tasks.clone())
    }

    fn leaves_in(&mut self, _window: &DateWindow) -> AppResult<Vec<Leave>> {
        if self.broken_leaves {
            return Err(AppError::Other("leave service unavailable".into()));
        }
        Ok(self.leaves.clone())
    }

    fn projects_in(&mut self, _window: &DateWindow) -> AppResult<Vec<Project>> {
        Ok(self.projects.clone())
    }
}

fn task(id: i32, start: &str, due: &str) -> Task {
    let mut t = Task::new(format!("task {id}"));
    t.id = id;
    t.start_date = Some(d(start));
    t.due_date = Some(d(due));
    t
}

fn approved_leave(id: i32, start: &str, end: &str) -> Leave {
    let mut l = Leave::new("bob", d(start), d(end));
    l.id = id;
    l.status = LeaveStatus::Approved;
    l
}

#[test]
fn test_events_are_clipped_to_window_keeping_span_numbers() {
    let mut source = FakeSource {
        tasks: vec![task(1, "2025-01-30", "2025-02-02")],
        ..FakeSource::default()
    };
    let window = parse_period("2025-02").expect("period");

    let view = CalendarLogic::materialize(&mut source, &window, &CalendarFilter::all());
    let events = view.into_events();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].date, d("2025-02-01"));
    assert_eq!(events[0].span_day, Some(3));
    assert_eq!(events[1].span_day, Some(4));
    assert!(events.iter().all(|e| e.total_span_days == Some(4)));
}

#[test]
fn test_failed_fetch_keeps_other_kinds() {
    let mut source = FakeSource {
        tasks: vec![task(1, "2025-03-03", "2025-03-04")],
        leaves: vec![approved_leave(1, "2025-03-03", "2025-03-03")],
        broken_leaves: true,
        ..FakeSource::default()
    };
    let window = parse_period("2025-03").expect("period");

    let view = CalendarLogic::materialize(&mut source, &window, &CalendarFilter::all());

    assert_eq!(view.event_count(), 2);
    assert!(
        view.into_events()
            .iter()
            .all(|e| e.kind == EventKind::Task)
    );
}

#[test]
fn test_materialize_groups_and_filters() {
    let mut p = Project::new("Apollo");
    p.id = 4;
    p.start_date = Some(d("2025-03-03"));
    p.end_date = Some(d("2025-03-05"));

    let mut source = FakeSource {
        tasks: vec![task(1, "2025-03-04", "2025-03-04")],
        leaves: vec![approved_leave(2, "2025-03-04", "2025-03-06")],
        projects: vec![p],
        ..FakeSource::default()
    };
    let window = DateWindow::new(d("2025-03-01"), d("2025-03-31")).expect("window");
    let filter = CalendarFilter {
        kinds: vec![EventKind::Leave, EventKind::Project],
        ..CalendarFilter::default()
    };

    let view = CalendarLogic::materialize(&mut source, &window, &filter);

    let days: Vec<String> = view.days.keys().map(|k| k.to_string()).collect();
    assert_eq!(days, ["2025-03-03", "2025-03-04", "2025-03-05", "2025-03-06"]);
    assert_eq!(view.days[&d("2025-03-04")].len(), 2);
    assert_eq!(view.event_count(), 6);
}

#[test]
fn test_empty_source_gives_empty_view() {
    let mut source = FakeSource::default();
    let window = DateWindow::day(d("2025-03-01"));

    let view = CalendarLogic::materialize(&mut source, &window, &CalendarFilter::default());
    assert!(view.is_empty());
    assert_eq!(view.event_count(), 0);
}
