mod common;
use common::d;

use chrono::NaiveTime;
use rplanner::core::calendar::CalendarFilter;
use rplanner::core::calendar::expander::{
    expand_all, expand_all_in, expand_leave, expand_project, expand_task,
};
use rplanner::core::calendar::group::group_by_date;
use rplanner::models::calendar_event::{CalendarEvent, EventKind, HalfDayType};
use rplanner::models::category::TaskCategory;
use rplanner::models::leave::Leave;
use rplanner::models::project::Project;
use rplanner::models::status::{LeaveStatus, TaskStatus};
use rplanner::models::task::Task;
use rplanner::utils::date::parse_period;

fn task(id: i32, start: Option<&str>, due: Option<&str>) -> Task {
    let mut t = Task::new(format!("task {id}"));
    t.id = id;
    t.start_date = start.map(d);
    t.due_date = due.map(d);
    t
}

fn leave(id: i32, start: &str, end: &str, half_start: bool, half_end: bool) -> Leave {
    let mut l = Leave::new("alice", d(start), d(end));
    l.id = id;
    l.status = LeaveStatus::Approved;
    l.half_day_start = half_start;
    l.half_day_end = half_end;
    l
}

fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").expect("valid test time")
}

#[test]
fn test_task_spanning_three_days() {
    let events = expand_task(&task(7, Some("2025-01-10"), Some("2025-01-12")));

    let dates: Vec<String> = events.iter().map(|e| e.date_str()).collect();
    assert_eq!(dates, ["2025-01-10", "2025-01-11", "2025-01-12"]);

    let days: Vec<Option<u32>> = events.iter().map(|e| e.span_day).collect();
    assert_eq!(days, [Some(1), Some(2), Some(3)]);
    assert!(events.iter().all(|e| e.total_span_days == Some(3)));
    assert!(events.iter().all(|e| e.original_entity_id == 7));
    assert_eq!(events[0].id, "task-7-2025-01-10");
}

#[test]
fn test_event_count_matches_inclusive_day_count() {
    for (start, end, n) in [
        ("2025-01-01", "2025-01-01", 1),
        ("2025-01-30", "2025-02-02", 4),
        ("2024-02-27", "2024-03-01", 4),
        ("2025-12-31", "2026-01-01", 2),
    ] {
        let events = expand_task(&task(1, Some(start), Some(end)));
        assert_eq!(events.len(), n, "{start}..{end}");
        assert_eq!(events.last().and_then(|e| e.span_day), Some(n as u32));
    }
}

#[test]
fn test_inverted_range_collapses_to_start_day() {
    let events = expand_task(&task(1, Some("2025-01-12"), Some("2025-01-10")));
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].date, d("2025-01-12"));
    assert_eq!(events[0].total_span_days, Some(1));

    let events = expand_leave(&leave(1, "2025-05-05", "2025-05-01", false, false));
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].date, d("2025-05-05"));
}

#[test]
fn test_backlog_task_produces_nothing() {
    assert!(expand_task(&task(1, None, None)).is_empty());
}

#[test]
fn test_task_without_start_uses_creation_day() {
    let mut tk = task(3, None, Some("2025-01-10"));
    tk.created_at = "2025-01-08T10:00:00+01:00".to_string();

    let events = expand_task(&tk);
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].date, d("2025-01-08"));
}

#[test]
fn test_task_without_due_is_single_day() {
    let events = expand_task(&task(1, Some("2025-01-10"), None));
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].date, d("2025-01-10"));
}

#[test]
fn test_simple_task_kind_and_copied_times() {
    let mut simple = task(4, Some("2025-01-10"), Some("2025-01-11"));
    simple.category = TaskCategory::SimpleTask;
    simple.start_time = Some(t("09:00"));
    simple.end_time = Some(t("10:00"));

    let events = expand_task(&simple);
    assert!(events.iter().all(|e| e.kind == EventKind::SimpleTask));
    assert!(events.iter().all(|e| e.start_time == Some(t("09:00"))));
    assert!(events.iter().all(|e| e.end_time == Some(t("10:00"))));
}

#[test]
fn test_project_falls_back_to_creation_day() {
    let mut p = Project::new("Apollo");
    p.id = 2;
    p.created_at = "2025-02-01T08:00:00+00:00".to_string();
    p.end_date = Some(d("2025-02-03"));

    let events = expand_project(&p);
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| e.kind == EventKind::Project));
    assert!(events.iter().all(|e| e.project_id == Some(2)));
}

#[test]
fn test_leave_half_day_start_over_three_days() {
    let halves: Vec<Option<HalfDayType>> = expand_leave(&leave(1, "2025-04-01", "2025-04-03", true, false))
        .iter()
        .map(|e| e.half_day_type)
        .collect();
    assert_eq!(
        halves,
        [
            Some(HalfDayType::Afternoon),
            Some(HalfDayType::Full),
            Some(HalfDayType::Full)
        ]
    );

    let last = expand_leave(&leave(1, "2025-04-01", "2025-04-03", true, true))
        .last()
        .and_then(|e| e.half_day_type);
    assert_eq!(last, Some(HalfDayType::Morning));
}

#[test]
fn test_single_day_leave_half_days() {
    let kind = |hs, he| expand_leave(&leave(1, "2025-04-01", "2025-04-01", hs, he))[0].half_day_type;

    assert_eq!(kind(false, false), Some(HalfDayType::Full));
    assert_eq!(kind(true, false), Some(HalfDayType::Afternoon));
    assert_eq!(kind(false, true), Some(HalfDayType::Morning));
    // the start flag wins
    assert_eq!(kind(true, true), Some(HalfDayType::Afternoon));
}

#[test]
fn test_rejected_leave_is_hidden() {
    let mut l = leave(1, "2025-04-01", "2025-04-03", false, false);
    l.status = LeaveStatus::Rejected;
    assert!(expand_leave(&l).is_empty());
}

fn sample_events() -> Vec<CalendarEvent> {
    let mut simple = task(2, Some("2025-01-10"), None);
    simple.category = TaskCategory::SimpleTask;
    simple.project_id = Some(9);

    let mut normal = task(1, Some("2025-01-10"), None);
    normal.project_id = Some(5);
    normal.service = Some("Web".to_string());

    let mut done = task(3, Some("2025-01-10"), None);
    done.status = TaskStatus::Done;

    let mut p = Project::new("Apollo");
    p.id = 5;
    p.start_date = Some(d("2025-01-10"));

    expand_all(
        &[normal, simple, done],
        &[leave(1, "2025-01-10", "2025-01-10", false, false)],
        &[p],
    )
}

#[test]
fn test_filter_simple_task_category_keeps_leaves() {
    let filter = CalendarFilter {
        category: Some(TaskCategory::SimpleTask),
        ..CalendarFilter::all()
    };

    let kinds: Vec<EventKind> = filter.apply(sample_events()).iter().map(|e| e.kind).collect();
    assert_eq!(kinds, [EventKind::SimpleTask, EventKind::Leave]);
}

#[test]
fn test_filter_task_category_keeps_projects() {
    let filter = CalendarFilter {
        category: Some(TaskCategory::Task),
        ..CalendarFilter::all()
    };

    let kinds: Vec<EventKind> = filter.apply(sample_events()).iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        [EventKind::Task, EventKind::Task, EventKind::Leave, EventKind::Project]
    );
}

#[test]
fn test_filter_project_and_service_exempt_leaves() {
    let by_project = CalendarFilter {
        project_id: Some(5),
        ..CalendarFilter::all()
    };
    let ids: Vec<String> = by_project.apply(sample_events()).into_iter().map(|e| e.id).collect();
    assert_eq!(ids, ["task-1-2025-01-10", "leave-1-2025-01-10", "project-5-2025-01-10"]);

    let by_service = CalendarFilter {
        service: Some("web".to_string()),
        ..CalendarFilter::all()
    };
    let kinds: Vec<EventKind> = by_service.apply(sample_events()).iter().map(|e| e.kind).collect();
    assert_eq!(kinds, [EventKind::Task, EventKind::Leave]);
}

#[test]
fn test_filter_kinds_applies_to_leaves() {
    let filter = CalendarFilter {
        kinds: CalendarFilter::parse_kinds("project, simple").expect("valid kinds"),
        ..CalendarFilter::all()
    };
    let kinds: Vec<EventKind> = filter.apply(sample_events()).iter().map(|e| e.kind).collect();
    assert_eq!(kinds, [EventKind::SimpleTask, EventKind::Project]);

    assert!(CalendarFilter::parse_kinds("task,meeting").is_err());
}

#[test]
fn test_filter_hides_done_tasks_unless_included() {
    let hidden = CalendarFilter::default().apply(sample_events());
    assert!(hidden.iter().all(|e| e.original_entity_id != 3 || e.kind != EventKind::Task));
    assert_eq!(hidden.len(), 4);

    assert_eq!(CalendarFilter::all().apply(sample_events()).len(), 5);
}

#[test]
fn test_group_orders_timed_before_untimed() {
    let mut untimed = task(1, Some("2025-01-10"), None);
    untimed.title = "untimed".into();
    let mut late = task(2, Some("2025-01-10"), None);
    late.title = "14:00".into();
    late.start_time = Some(t("14:00"));
    let mut early = task(3, Some("2025-01-10"), None);
    early.title = "09:00".into();
    early.start_time = Some(t("09:00"));
    let mut untimed2 = task(4, Some("2025-01-10"), None);
    untimed2.title = "untimed 2".into();

    let days = group_by_date(expand_all(&[untimed, late, early, untimed2], &[], &[]));
    let titles: Vec<&str> = days[&d("2025-01-10")].iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, ["09:00", "14:00", "untimed", "untimed 2"]);
}

#[test]
fn test_group_keys_are_ordered_by_date() {
    let events = expand_all(
        &[task(1, Some("2025-01-12"), None), task(2, Some("2025-01-10"), Some("2025-01-11"))],
        &[],
        &[],
    );
    let days: Vec<String> = group_by_date(events).keys().map(|k| k.to_string()).collect();
    assert_eq!(days, ["2025-01-10", "2025-01-11", "2025-01-12"]);
}

#[test]
fn test_parse_period_shapes() {
    let w = parse_period("2025").expect("year");
    assert_eq!((w.start, w.end), (d("2025-01-01"), d("2025-12-31")));

    let w = parse_period("2024-02").expect("month");
    assert_eq!(w.end, d("2024-02-29"));

    let w = parse_period("2025-03-01:2025-03-15").expect("range");
    assert_eq!(w.days().count(), 15);

    assert!(parse_period("2025-03:2025-04-01").is_err());
    assert!(parse_period("2025-04:2025-03").is_err());
    assert!(parse_period("2025-13").is_err());
}

#[test]
fn test_long_span_only_expands_days_in_window() {
    let long_leave = leave(1, "2025-01-01", "9999-12-31", true, true);
    let long_task = task(2, Some("2025-01-01"), Some("9999-12-31"));
    let total = (d("9999-12-31") - d("2025-01-01")).num_days() as u32 + 1;

    let march = parse_period("2025-03").expect("month");
    let events = expand_all_in(&[long_task], &[long_leave.clone()], &[], &march);
    assert_eq!(events.len(), 62);
    assert!(events.iter().all(|e| march.contains(e.date)));
    assert!(events.iter().all(|e| e.total_span_days == Some(total)));

    let first_leave = events
        .iter()
        .find(|e| e.kind == EventKind::Leave)
        .expect("leave event");
    assert_eq!(first_leave.date, d("2025-03-01"));
    assert_eq!(first_leave.span_day, Some(60));
    assert_eq!(first_leave.half_day_type, Some(HalfDayType::Full));

    let last_month = parse_period("9999-12").expect("month");
    let tail = expand_all_in(&[], &[long_leave.clone()], &[], &last_month);
    assert_eq!(tail.len(), 31);
    let last = tail.last().expect("last day");
    assert_eq!(last.span_day, Some(total));
    assert_eq!(last.half_day_type, Some(HalfDayType::Morning));

    let before = parse_period("2024-12").expect("month");
    assert!(expand_all_in(&[], &[long_leave], &[], &before).is_empty());
}
