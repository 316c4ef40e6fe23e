use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::{ColumnMap, ImportDefaults, ImportLogic};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::priority::Priority;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import {
        entity,
        file,
        map,
        dry_run,
    } = cmd
    {
        let map = match map {
            Some(m) => ColumnMap::parse(m, *entity)?,
            None => ColumnMap::default(),
        };

        let defaults = ImportDefaults {
            user: cfg.default_user.clone(),
            priority: Priority::from_code(&cfg.default_priority)
                .ok_or_else(|| AppError::invalid_code("default_priority", cfg.default_priority.as_str()))?,
            known_projects: None,
        };

        let mut pool = DbPool::new(&cfg.database)?;
        ImportLogic::import(&mut pool, file, *entity, &map, &defaults, *dry_run)?;
    }

    Ok(())
}
