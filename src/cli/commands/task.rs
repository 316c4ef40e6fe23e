use crate::cli::commands::ask_confirmation;
use crate::cli::commands::board::print_board;
use crate::cli::commands::project::separator;
use crate::cli::parser::TaskCmd;
use crate::config::Config;
use crate::core::board::Board;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::{projects, tasks};
use crate::errors::{AppError, AppResult};
use crate::models::category::TaskCategory;
use crate::models::priority::Priority;
use crate::models::status::TaskStatus;
use crate::models::task::Task;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{RESET, color_for_priority, color_for_status};
use crate::utils::date::parse_optional_date;
use crate::utils::table::Table;
use crate::utils::time::parse_optional_time;

fn parse_status(s: &str) -> AppResult<TaskStatus> {
    TaskStatus::from_code(s).ok_or_else(|| AppError::invalid_code("status", s))
}

pub fn handle(cmd: &TaskCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;

    match cmd {
        TaskCmd::Add {
            title,
            project,
            service,
            category,
            status,
            priority,
            start_date,
            due_date,
            start_time,
            end_time,
        } => {
            let mut t = Task::new(title.trim());

            if let Some(pid) = project {
                // fail early on a dangling project id
                projects::find_project(&pool.conn, *pid)?;
                t.project_id = Some(*pid);
            }
            t.service = service.clone();
            if let Some(c) = category {
                t.category =
                    TaskCategory::from_code(c).ok_or_else(|| AppError::invalid_code("category", c))?;
            }
            if let Some(s) = status {
                t.status = parse_status(s)?;
            }
            let prio = priority.as_deref().unwrap_or(cfg.default_priority.as_str());
            t.priority =
                Priority::from_code(prio).ok_or_else(|| AppError::invalid_code("priority", prio))?;
            t.start_date = parse_optional_date(start_date.as_ref())?;
            t.due_date = parse_optional_date(due_date.as_ref())?;
            t.start_time = parse_optional_time(start_time.as_ref())?;
            t.end_time = parse_optional_time(end_time.as_ref())?;

            if let (Some(s), Some(d)) = (t.start_date, t.due_date)
                && d < s
            {
                warning(format!(
                    "Due date {} precedes start date {}: the calendar shows it on {} only.",
                    d, s, s
                ));
            }

            t.position = tasks::next_position(&pool.conn, t.status)?;
            let id = tasks::insert_task(&pool.conn, &t)?;
            audit(&pool.conn, "add", &format!("task #{id}"), &t.title);

            if t.is_scheduled() {
                success(format!("Task #{} '{}' added.", id, t.title));
            } else {
                success(format!("Task #{} '{}' added to the backlog.", id, t.title));
            }
        }

        TaskCmd::List { project, status } => {
            let filter_status = status.as_deref().map(parse_status).transpose()?;
            let list: Vec<Task> = tasks::load_tasks(&pool.conn, *project)?
                .into_iter()
                .filter(|t| filter_status.is_none_or(|s| t.status == s))
                .collect();

            if list.is_empty() {
                info("No tasks.");
                return Ok(());
            }

            let mut table = Table::new(&[
                "ID", "TITLE", "PROJECT", "CATEGORY", "STATUS", "PRIORITY", "START", "DUE",
            ]);
            for t in &list {
                table.add_row(vec![
                    t.id.to_string(),
                    t.title.clone(),
                    t.project_id.map(|p| p.to_string()).unwrap_or_default(),
                    t.category.to_string(),
                    t.status.to_string(),
                    t.priority.to_string(),
                    t.start_date.map(|d| d.to_string()).unwrap_or_default(),
                    t.due_date.map(|d| d.to_string()).unwrap_or_default(),
                ]);
            }
            print!("{}", table.render(separator(cfg)));

            let urgent = list
                .iter()
                .filter(|t| t.priority == Priority::Urgent && t.status != TaskStatus::Done)
                .count();
            if urgent > 0 {
                println!(
                    "{}{} urgent task(s) open{}",
                    color_for_priority(Priority::Urgent),
                    urgent,
                    RESET
                );
            }
        }

        TaskCmd::Del { id, yes } => {
            let t = tasks::find_task(&pool.conn, *id)?;

            let prompt = format!("Delete task #{} '{}'? This action is irreversible.", t.id, t.title);
            if !*yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            if tasks::delete_task(&pool.conn, *id)? {
                audit(&pool.conn, "del", &format!("task #{id}"), &t.title);
                success(format!("Task #{} has been deleted.", id));
            }
        }

        TaskCmd::Status { id, status } => {
            let s = parse_status(status)?;
            tasks::update_task_status(&pool.conn, *id, s)?;
            audit(
                &pool.conn,
                "status",
                &format!("task #{id}"),
                &format!("Status set to {s}"),
            );
            success(format!(
                "Task #{} is now {}{}{}.",
                id,
                color_for_status(s),
                s.label(),
                RESET
            ));
        }

        TaskCmd::Move { id, to, index } => {
            let to = parse_status(to)?;
            let current = tasks::find_task(&pool.conn, *id)?;

            // positions are per column across all projects
            let mut board = Board::from_tasks(tasks::load_tasks(&pool.conn, None)?);
            board.move_task(&mut pool, *id, to, *index)?;

            audit(
                &pool.conn,
                "move",
                &format!("task #{id}"),
                &format!("{} → {}", current.status, to),
            );
            success(format!("Task #{} moved to {}.", id, to.label()));
            print_board(&board, current.project_id, cfg);
        }
    }

    Ok(())
}
