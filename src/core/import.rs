//! CSV import of projects, tasks and leaves with configurable column mapping.

use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::{leaves, projects, tasks};
use crate::errors::{AppError, AppResult};
use crate::models::category::TaskCategory;
use crate::models::leave::{Leave, LeaveKind};
use crate::models::priority::Priority;
use crate::models::project::Project;
use crate::models::status::{LeaveStatus, ProjectStatus, TaskStatus};
use crate::models::task::Task;
use crate::ui::messages::{info, success, warning};
use crate::utils::date::parse_date;
use crate::utils::time::parse_time;
use chrono::{NaiveDate, NaiveTime};
use clap::ValueEnum;
use csv::StringRecord;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ImportEntity {
    Tasks,
    Projects,
    Leaves,
}

impl ImportEntity {
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            ImportEntity::Tasks => &[
                "title",
                "project_id",
                "service",
                "category",
                "status",
                "priority",
                "start_date",
                "due_date",
                "start_time",
                "end_time",
            ],
            ImportEntity::Projects => &["name", "service", "status", "start_date", "end_date"],
            ImportEntity::Leaves => &[
                "user",
                "kind",
                "status",
                "start_date",
                "end_date",
                "half_day_start",
                "half_day_end",
                "note",
            ],
        }
    }

    pub fn required(&self) -> &'static [&'static str] {
        match self {
            ImportEntity::Tasks => &["title"],
            ImportEntity::Projects => &["name"],
            ImportEntity::Leaves => &["start_date", "end_date"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImportEntity::Tasks => "tasks",
            ImportEntity::Projects => "projects",
            ImportEntity::Leaves => "leaves",
        }
    }
}

/// Field → CSV header overrides. Unmapped fields use their own name as header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMap {
    overrides: HashMap<String, String>,
}

impl ColumnMap {
    /// Parse `field=Header,field2=Other Header` for the given entity.
    pub fn parse(mapping: &str, entity: ImportEntity) -> AppResult<Self> {
        let mut overrides = HashMap::new();

        for pair in mapping.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (field, header) = pair
                .split_once('=')
                .ok_or_else(|| AppError::Import(format!("invalid mapping '{pair}', use field=Header")))?;
            let field = field.trim();
            if !entity.fields().contains(&field) {
                return Err(AppError::Import(format!(
                    "unknown field '{}' for {} (known: {})",
                    field,
                    entity.as_str(),
                    entity.fields().join(", ")
                )));
            }
            overrides.insert(field.to_string(), header.trim().to_string());
        }

        Ok(Self { overrides })
    }

    pub fn header_for<'a>(&'a self, field: &'a str) -> &'a str {
        self.overrides.get(field).map(String::as_str).unwrap_or(field)
    }
}

/// A validated CSV row, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportRow {
    Task(Task),
    Project(Project),
    Leave(Leave),
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub rows: Vec<ImportRow>,
    /// `(line, reason)` of every rejected row.
    pub skipped: Vec<(u64, String)>,
    pub imported: usize,
}

/// Defaults for fields a CSV row may leave empty.
#[derive(Debug, Clone)]
pub struct ImportDefaults {
    pub user: String,
    pub priority: Priority,
    /// Project ids a task row may reference. `None` disables the check.
    pub known_projects: Option<HashSet<i32>>,
}

impl Default for ImportDefaults {
    fn default() -> Self {
        Self {
            user: "me".to_string(),
            priority: Priority::Medium,
            known_projects: None,
        }
    }
}

/// Column lookup over one record.
struct RowView<'a> {
    index: &'a HashMap<&'a str, usize>,
    record: &'a StringRecord,
}

impl RowView<'_> {
    fn get(&self, field: &str) -> Option<&str> {
        let idx = *self.index.get(field)?;
        self.record.get(idx).map(str::trim).filter(|s| !s.is_empty())
    }

    fn required(&self, field: &str) -> Result<&str, String> {
        self.get(field).ok_or_else(|| format!("missing {field}"))
    }

    fn date(&self, field: &str) -> Result<Option<NaiveDate>, String> {
        self.get(field)
            .map(|s| parse_date(s).ok_or_else(|| format!("invalid {field} '{s}'")))
            .transpose()
    }

    fn time(&self, field: &str) -> Result<Option<NaiveTime>, String> {
        self.get(field)
            .map(|s| parse_time(s).ok_or_else(|| format!("invalid {field} '{s}'")))
            .transpose()
    }

    fn code<T>(&self, field: &str, decode: fn(&str) -> Option<T>) -> Result<Option<T>, String> {
        self.get(field)
            .map(|s| decode(s).ok_or_else(|| format!("invalid {field} '{s}'")))
            .transpose()
    }

    fn flag(&self, field: &str) -> Result<bool, String> {
        match self.get(field).map(str::to_lowercase).as_deref() {
            None | Some("0") | Some("false") | Some("no") | Some("n") => Ok(false),
            Some("1") | Some("true") | Some("yes") | Some("y") | Some("x") => Ok(true),
            Some(other) => Err(format!("invalid {field} '{other}'")),
        }
    }
}

fn parse_task(row: &RowView, defaults: &ImportDefaults) -> Result<Task, String> {
    let mut t = Task::new(row.required("title")?);
    t.project_id = row
        .get("project_id")
        .map(|s| s.parse::<i32>().map_err(|_| format!("invalid project_id '{s}'")))
        .transpose()?;
    if let (Some(id), Some(known)) = (t.project_id, &defaults.known_projects)
        && !known.contains(&id)
    {
        return Err(format!("unknown project_id {id}"));
    }
    t.service = row.get("service").map(str::to_string);
    t.category = row
        .code("category", TaskCategory::from_code)?
        .unwrap_or(TaskCategory::Task);
    t.status = row.code("status", TaskStatus::from_code)?.unwrap_or(TaskStatus::Todo);
    t.priority = row
        .code("priority", Priority::from_code)?
        .unwrap_or(defaults.priority);
    t.start_date = row.date("start_date")?;
    t.due_date = row.date("due_date")?;
    t.start_time = row.time("start_time")?;
    t.end_time = row.time("end_time")?;
    Ok(t)
}

fn parse_project(row: &RowView) -> Result<Project, String> {
    let mut p = Project::new(row.required("name")?);
    p.service = row.get("service").map(str::to_string);
    p.status = row
        .code("status", ProjectStatus::from_code)?
        .unwrap_or(ProjectStatus::Active);
    p.start_date = row.date("start_date")?;
    p.end_date = row.date("end_date")?;
    Ok(p)
}

fn parse_leave(row: &RowView, defaults: &ImportDefaults) -> Result<Leave, String> {
    let user = row.get("user").unwrap_or(defaults.user.as_str());
    let start = row.date("start_date")?.ok_or("missing start_date")?;
    let end = row.date("end_date")?.ok_or("missing end_date")?;

    let mut l = Leave::new(user, start, end);
    l.kind = row.code("kind", LeaveKind::from_code)?.unwrap_or(LeaveKind::Vacation);
    l.status = row
        .code("status", LeaveStatus::from_code)?
        .unwrap_or(LeaveStatus::Pending);
    l.half_day_start = row.flag("half_day_start")?;
    l.half_day_end = row.flag("half_day_end")?;
    l.note = row.get("note").unwrap_or_default().to_string();
    Ok(l)
}

pub struct ImportLogic;

impl ImportLogic {
    /// Parse and validate every row; nothing is written.
    pub fn parse<R: Read>(
        reader: R,
        entity: ImportEntity,
        map: &ColumnMap,
        defaults: &ImportDefaults,
    ) -> AppResult<ImportReport> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for &field in entity.fields() {
            let wanted = map.header_for(field);
            if let Some(pos) = headers.iter().position(|h| h.eq_ignore_ascii_case(wanted)) {
                index.insert(field, pos);
            }
        }

        for field in entity.required() {
            if !index.contains_key(field) {
                return Err(AppError::Import(format!(
                    "column '{}' for required field '{}' not found in CSV header",
                    map.header_for(field),
                    field
                )));
            }
        }

        let mut report = ImportReport::default();

        for result in rdr.records() {
            let record = match result {
                Ok(r) => r,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    let line = e.position().map(|p| p.line()).unwrap_or(0);
                    let reason = match e.kind() {
                        csv::ErrorKind::Utf8 { .. } => "row is not valid UTF-8".to_string(),
                        _ => format!("unreadable row: {e}"),
                    };
                    report.skipped.push((line, reason));
                    continue;
                }
            };
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let view = RowView {
                index: &index,
                record: &record,
            };

            let parsed = match entity {
                ImportEntity::Tasks => parse_task(&view, defaults).map(ImportRow::Task),
                ImportEntity::Projects => parse_project(&view).map(ImportRow::Project),
                ImportEntity::Leaves => parse_leave(&view, defaults).map(ImportRow::Leave),
            };

            match parsed {
                Ok(row) => report.rows.push(row),
                Err(reason) => report.skipped.push((line, reason)),
            }
        }

        Ok(report)
    }

    /// Store the parsed rows in one transaction.
    pub fn store(pool: &mut DbPool, rows: &[ImportRow]) -> AppResult<usize> {
        let tx = pool.conn.transaction()?;
        for row in rows {
            match row {
                ImportRow::Task(t) => {
                    let mut t = t.clone();
                    t.position = tasks::next_position(&tx, t.status)?;
                    tasks::insert_task(&tx, &t)?;
                }
                ImportRow::Project(p) => {
                    projects::insert_project(&tx, p)?;
                }
                ImportRow::Leave(l) => {
                    leaves::insert_leave(&tx, l)?;
                }
            }
        }
        tx.commit()?;
        Ok(rows.len())
    }

    pub fn import(
        pool: &mut DbPool,
        file: &str,
        entity: ImportEntity,
        map: &ColumnMap,
        defaults: &ImportDefaults,
        dry_run: bool,
    ) -> AppResult<ImportReport> {
        let path = Path::new(file);
        info(format!("Importing {} from {}", entity.as_str(), path.display()));

        let mut defaults = defaults.clone();
        if entity == ImportEntity::Tasks {
            defaults.known_projects = Some(projects::project_ids(&pool.conn)?);
        }

        let mut report = Self::parse(File::open(path)?, entity, map, &defaults)?;

        for (line, reason) in &report.skipped {
            warning(format!("Line {line} skipped: {reason}"));
        }

        if dry_run {
            info(format!(
                "Dry run: {} row(s) valid, {} skipped, nothing written.",
                report.rows.len(),
                report.skipped.len()
            ));
            return Ok(report);
        }

        report.imported = Self::store(pool, &report.rows)?;

        audit(
            &pool.conn,
            "import",
            entity.as_str(),
            &format!(
                "Imported {} row(s) from {} ({} skipped)",
                report.imported,
                path.display(),
                report.skipped.len()
            ),
        );

        success(format!(
            "Imported {} {}, {} skipped.",
            report.imported,
            entity.as_str(),
            report.skipped.len()
        ));

        Ok(report)
    }
}
