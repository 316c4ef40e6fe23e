use rplanner::core::board::{Board, Placement, TaskWriter};
use rplanner::db::initialize::init_db;
use rplanner::db::pool::DbPool;
use rplanner::db::tasks;
use rplanner::errors::{AppError, AppResult};
use rplanner::models::status::TaskStatus;
use rplanner::models::task::Task;

fn card(id: i32, status: TaskStatus, position: i32) -> Task {
    let mut t = Task::new(format!("card {id}"));
    t.id = id;
    t.status = status;
    t.position = position;
    t
}

fn ids(board: &Board, status: TaskStatus) -> Vec<i32> {
    board.column(status).iter().map(|t| t.id).collect()
}

fn sample_board() -> Board {
    Board::from_tasks(vec![
        card(1, TaskStatus::Todo, 1),
        card(2, TaskStatus::Todo, 0),
        card(3, TaskStatus::InProgress, 0),
        card(4, TaskStatus::Done, 0),
        card(5, TaskStatus::Todo, 1),
    ])
}

#[derive(Default)]
struct RecordingWriter {
    saved: Vec<Placement>,
}

impl TaskWriter for RecordingWriter {
    fn save_placements(&mut self, placements: &[Placement]) -> AppResult<()> {
        self.saved.extend_from_slice(placements);
        Ok(())
    }
}

struct FailingWriter;

impl TaskWriter for FailingWriter {
    fn save_placements(&mut self, _placements: &[Placement]) -> AppResult<()> {
        Err(AppError::Other("disk full".into()))
    }
}

#[test]
fn test_columns_in_workflow_order_sorted_by_position() {
    let board = sample_board();

    let statuses: Vec<TaskStatus> = board.columns().map(|(s, _)| s).collect();
    assert_eq!(statuses, TaskStatus::ALL);
    // position first, id breaks ties
    assert_eq!(ids(&board, TaskStatus::Todo), [2, 1, 5]);
    assert!(board.column(TaskStatus::Review).is_empty());
    assert_eq!(board.task_count(), 5);
}

#[test]
fn test_move_to_other_column_at_index() {
    let mut board = sample_board();
    let mut writer = RecordingWriter::default();

    board
        .move_task(&mut writer, 1, TaskStatus::InProgress, Some(0))
        .expect("move succeeds");

    assert_eq!(ids(&board, TaskStatus::Todo), [2, 5]);
    assert_eq!(ids(&board, TaskStatus::InProgress), [1, 3]);
    assert_eq!(board.column(TaskStatus::InProgress)[0].status, TaskStatus::InProgress);

    let positions: Vec<(i32, i32)> = writer.saved.iter().map(|p| (p.task_id, p.position)).collect();
    assert_eq!(positions, [(2, 0), (5, 1), (1, 0), (3, 1)]);
}

#[test]
fn test_move_without_index_appends_and_clamps() {
    let mut board = sample_board();
    let mut writer = RecordingWriter::default();

    board
        .move_task(&mut writer, 2, TaskStatus::Done, None)
        .expect("append");
    assert_eq!(ids(&board, TaskStatus::Done), [4, 2]);

    board
        .move_task(&mut writer, 3, TaskStatus::Done, Some(99))
        .expect("clamped");
    assert_eq!(ids(&board, TaskStatus::Done), [4, 2, 3]);
}

#[test]
fn test_reorder_inside_one_column() {
    let mut board = sample_board();
    let mut writer = RecordingWriter::default();

    board
        .move_task(&mut writer, 5, TaskStatus::Todo, Some(0))
        .expect("reorder");

    assert_eq!(ids(&board, TaskStatus::Todo), [5, 2, 1]);
    // only the touched column is persisted
    assert_eq!(writer.saved.len(), 3);
}

#[test]
fn test_failed_persist_restores_board() {
    let mut board = sample_board();
    let before = board.clone();

    let res = board.move_task(&mut FailingWriter, 1, TaskStatus::Review, Some(0));

    assert!(res.is_err());
    assert_eq!(board, before);
}

#[test]
fn test_unknown_task_leaves_board_untouched() {
    let mut board = sample_board();
    let before = board.clone();
    let mut writer = RecordingWriter::default();

    let res = board.move_task(&mut writer, 42, TaskStatus::Done, None);

    assert!(matches!(res, Err(AppError::NotFound { id: 42, .. })));
    assert_eq!(board, before);
    assert!(writer.saved.is_empty());
}

#[test]
fn test_move_is_persisted_in_sqlite() {
    let mut pool = DbPool::in_memory().expect("in-memory db");
    init_db(&pool.conn).expect("migrations");

    for title in ["a", "b", "c"] {
        let mut t = Task::new(title);
        t.position = tasks::next_position(&pool.conn, t.status).expect("position");
        tasks::insert_task(&pool.conn, &t).expect("insert");
    }

    let mut board = Board::from_tasks(tasks::load_tasks(&pool.conn, None).expect("load"));
    board
        .move_task(&mut pool, 3, TaskStatus::Review, None)
        .expect("move");
    board
        .move_task(&mut pool, 2, TaskStatus::Todo, Some(0))
        .expect("reorder");

    let reloaded = Board::from_tasks(tasks::load_tasks(&pool.conn, None).expect("reload"));
    assert_eq!(reloaded, board);
    assert_eq!(ids(&reloaded, TaskStatus::Todo), [2, 1]);
    assert_eq!(ids(&reloaded, TaskStatus::Review), [3]);
}

#[test]
fn test_sqlite_writer_rejects_missing_rows() {
    let mut pool = DbPool::in_memory().expect("in-memory db");
    init_db(&pool.conn).expect("migrations");

    // a board card the database never stored
    let mut board = Board::from_tasks(vec![card(7, TaskStatus::Todo, 0)]);
    let before = board.clone();

    assert!(board.move_task(&mut pool, 7, TaskStatus::Done, None).is_err());
    assert_eq!(board, before);
}

#[test]
fn test_status_change_keeps_positions_contiguous() {
    let pool = DbPool::in_memory().expect("in-memory db");
    init_db(&pool.conn).expect("migrations");

    for title in ["a", "b", "c"] {
        let mut t = Task::new(title);
        t.position = tasks::next_position(&pool.conn, t.status).expect("position");
        tasks::insert_task(&pool.conn, &t).expect("insert");
    }

    tasks::update_task_status(&pool.conn, 1, TaskStatus::Done).expect("to done");
    tasks::update_task_status(&pool.conn, 3, TaskStatus::Done).expect("to done");

    let positions = |status: TaskStatus| -> Vec<(i32, i32)> {
        let board = Board::from_tasks(tasks::load_tasks(&pool.conn, None).expect("load"));
        board.column(status).iter().map(|t| (t.id, t.position)).collect()
    };
    assert_eq!(positions(TaskStatus::Todo), [(2, 0)]);
    assert_eq!(positions(TaskStatus::Done), [(1, 0), (3, 1)]);

    assert!(matches!(
        tasks::update_task_status(&pool.conn, 42, TaskStatus::Done),
        Err(AppError::NotFound { id: 42, .. })
    ));
}
