use crate::cli::commands::calendar::{build_filter, resolve_window};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        filter,
        force,
    } = cmd
    {
        let window = resolve_window(range.as_deref())?;
        let filter = build_filter(filter, cfg)?;

        let mut pool = DbPool::new(&cfg.database)?;
        let n = ExportLogic::export(&mut pool, *format, file, &window, &filter, *force)?;

        if n > 0 {
            audit(
                &pool.conn,
                "export",
                file,
                &format!(
                    "{} event(s) {} → {} as {}",
                    n,
                    window.start_str(),
                    window.end_str(),
                    format.as_str()
                ),
            );
        }
    }
    Ok(())
}
