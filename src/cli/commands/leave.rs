use crate::cli::commands::ask_confirmation;
use crate::cli::commands::project::separator;
use crate::cli::parser::LeaveCmd;
use crate::config::Config;
use crate::db::leaves;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::leave::{Leave, LeaveKind};
use crate::models::status::LeaveStatus;
use crate::ui::messages::{info, success, warning};
use crate::utils::date::parse_date;
use crate::utils::table::Table;

fn required_date(s: &str) -> AppResult<chrono::NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

pub fn handle(cmd: &LeaveCmd, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;

    match cmd {
        LeaveCmd::Add {
            start,
            end,
            user,
            kind,
            status,
            half_day_start,
            half_day_end,
            note,
        } => {
            let start = required_date(start)?;
            let end = match end {
                Some(e) => required_date(e)?,
                None => start,
            };
            if end < start {
                warning(format!(
                    "End date {} precedes start date {}: the calendar shows it on {} only.",
                    end, start, start
                ));
            }

            let user = user.clone().unwrap_or_else(|| cfg.default_user.clone());
            let mut l = Leave::new(user, start, end);
            if let Some(k) = kind {
                l.kind = LeaveKind::from_code(k).ok_or_else(|| AppError::invalid_code("kind", k))?;
            }
            if let Some(s) = status {
                l.status =
                    LeaveStatus::from_code(s).ok_or_else(|| AppError::invalid_code("status", s))?;
            }
            l.half_day_start = *half_day_start;
            l.half_day_end = *half_day_end;
            l.note = note.clone().unwrap_or_default();

            let id = leaves::insert_leave(&pool.conn, &l)?;
            audit(
                &pool.conn,
                "add",
                &format!("leave #{id}"),
                &format!("{} {}..{}", l.title(), l.start_date, l.end_date),
            );
            success(format!(
                "Leave #{} for {} added ({} → {}).",
                id, l.user, l.start_date, l.end_date
            ));
        }

        LeaveCmd::List { user } => {
            let list = leaves::load_leaves(&pool.conn, user.as_deref())?;
            if list.is_empty() {
                info("No leaves.");
                return Ok(());
            }

            let mut table = Table::new(&["ID", "USER", "KIND", "STATUS", "FROM", "TO", "HALF", "NOTE"]);
            for l in list {
                let half = match (l.half_day_start, l.half_day_end) {
                    (true, true) => "start+end",
                    (true, false) => "start",
                    (false, true) => "end",
                    (false, false) => "",
                };
                table.add_row(vec![
                    l.id.to_string(),
                    l.user,
                    l.kind.to_string(),
                    l.status.to_string(),
                    l.start_date.to_string(),
                    l.end_date.to_string(),
                    half.to_string(),
                    l.note,
                ]);
            }
            print!("{}", table.render(separator(cfg)));
        }

        LeaveCmd::Del { id, yes } => {
            let l = leaves::find_leave(&pool.conn, *id)?;

            let prompt = format!(
                "Delete leave #{} of {} ({} → {})? This action is irreversible.",
                l.id, l.user, l.start_date, l.end_date
            );
            if !*yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            if leaves::delete_leave(&pool.conn, *id)? {
                audit(&pool.conn, "del", &format!("leave #{id}"), &l.title());
                success(format!("Leave #{} has been deleted.", id));
            }
        }

        LeaveCmd::Status { id, status } => {
            let s = LeaveStatus::from_code(status)
                .ok_or_else(|| AppError::invalid_code("status", status.as_str()))?;
            leaves::update_leave_status(&pool.conn, *id, s)?;
            audit(
                &pool.conn,
                "status",
                &format!("leave #{id}"),
                &format!("Status set to {s}"),
            );
            success(format!("Leave #{} is now {}.", id, s));
        }
    }

    Ok(())
}
