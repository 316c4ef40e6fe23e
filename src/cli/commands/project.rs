use crate::cli::commands::ask_confirmation;
use crate::cli::parser::ProjectCmd;
use crate::config::Config;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::projects;
use crate::errors::{AppError, AppResult};
use crate::models::project::Project;
use crate::models::status::ProjectStatus;
use crate::ui::messages::{info, success, warning};
use crate::utils::date::parse_optional_date;
use crate::utils::table::Table;

pub fn handle(cmd: &ProjectCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;

    match cmd {
        ProjectCmd::Add {
            name,
            service,
            status,
            start_date,
            end_date,
        } => {
            let mut p = Project::new(name.trim());
            p.service = service.clone();
            if let Some(s) = status {
                p.status =
                    ProjectStatus::from_code(s).ok_or_else(|| AppError::invalid_code("status", s))?;
            }
            p.start_date = parse_optional_date(start_date.as_ref())?;
            p.end_date = parse_optional_date(end_date.as_ref())?;

            if let (Some(s), Some(e)) = (p.start_date, p.end_date)
                && e < s
            {
                warning(format!(
                    "End date {} precedes start date {}: the calendar shows it on {} only.",
                    e, s, s
                ));
            }

            let id = projects::insert_project(&pool.conn, &p)?;
            audit(&pool.conn, "add", &format!("project #{id}"), &p.name);
            success(format!("Project #{} '{}' added.", id, p.name));
        }

        ProjectCmd::List => {
            let list = projects::load_projects(&pool.conn)?;
            if list.is_empty() {
                info("No projects.");
                return Ok(());
            }

            let mut table = Table::new(&["ID", "NAME", "SERVICE", "STATUS", "START", "END"]);
            for p in list {
                table.add_row(vec![
                    p.id.to_string(),
                    p.name,
                    p.service.unwrap_or_default(),
                    p.status.to_string(),
                    p.start_date.map(|d| d.to_string()).unwrap_or_default(),
                    p.end_date.map(|d| d.to_string()).unwrap_or_default(),
                ]);
            }
            print!("{}", table.render(separator(cfg)));
        }

        ProjectCmd::Del { id, yes } => {
            let p = projects::find_project(&pool.conn, *id)?;

            let prompt = format!(
                "Delete project #{} '{}'? Its tasks are kept without a project.",
                p.id, p.name
            );
            if !*yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            if projects::delete_project(&mut pool.conn, *id)? {
                audit(&pool.conn, "del", &format!("project #{id}"), &p.name);
                success(format!("Project #{} has been deleted.", id));
            }
        }
    }

    Ok(())
}

pub(crate) fn separator(cfg: &Config) -> char {
    cfg.separator_char.chars().next().unwrap_or('-')
}
