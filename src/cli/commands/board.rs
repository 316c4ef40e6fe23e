use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::board::Board;
use crate::db::pool::DbPool;
use crate::db::tasks;
use crate::errors::AppResult;
use crate::models::task::Task;
use crate::ui::messages::header;
use crate::utils::colors::{GREY, RESET, color_for_priority};
use crate::utils::formatting::truncate;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Board { project } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let board = Board::from_tasks(tasks::load_tasks(&pool.conn, *project)?);
        print_board(&board, *project, cfg);
    }

    Ok(())
}

/// Print every column with its cards; `project` hides cards of other projects.
pub(crate) fn print_board(board: &Board, project: Option<i32>, cfg: &Config) {
    let sep = if cfg.separator_char.is_empty() {
        "-"
    } else {
        cfg.separator_char.as_str()
    };

    for (status, column) in board.columns() {
        let cards: Vec<&Task> = column
            .iter()
            .filter(|t| project.is_none() || t.project_id == project)
            .collect();

        println!();
        header(format!("{} ({})", status.label(), cards.len()), sep);

        if cards.is_empty() {
            println!("  {GREY}(empty){RESET}");
            continue;
        }

        for t in cards {
            let due = t
                .due_date
                .map(|d| format!(" {GREY}due {d}{RESET}"))
                .unwrap_or_default();
            println!(
                "  #{:<4} {}{}{} [{}]{}",
                t.id,
                color_for_priority(t.priority),
                truncate(&t.title, 50),
                RESET,
                t.priority,
                due
            );
        }
    }
    println!();
}
