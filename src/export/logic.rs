// src/export/logic.rs

use crate::core::calendar::{CalendarFilter, CalendarLogic, CalendarSource};
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::CalendarEventExport;
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use crate::utils::date::DateWindow;
use crate::utils::path::expand_tilde;

/// High level export of the materialized calendar.
pub struct ExportLogic;

impl ExportLogic {
    /// Flat rows of the filtered calendar over `window`, ordered by day and
    /// then by display order inside the day.
    pub fn collect<S: CalendarSource>(
        source: &mut S,
        window: &DateWindow,
        filter: &CalendarFilter,
    ) -> Vec<CalendarEventExport> {
        CalendarLogic::materialize(source, window, filter)
            .into_events()
            .iter()
            .map(CalendarEventExport::from)
            .collect()
    }

    /// Export the calendar events of `window` to `file`.
    ///
    /// - `file` must be an absolute path (`~/` is expanded)
    /// - an existing file is overwritten only with `force` or after confirmation
    ///
    /// Returns the number of exported rows; nothing is written when there are none.
    pub fn export<S: CalendarSource>(
        source: &mut S,
        format: ExportFormat,
        file: &str,
        window: &DateWindow,
        filter: &CalendarFilter,
        force: bool,
    ) -> AppResult<usize> {
        let path = expand_tilde(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        ensure_writable(&path, force)?;

        let rows = Self::collect(source, window, filter);

        if rows.is_empty() {
            warning(format!(
                "No events found between {} and {}, nothing exported.",
                window.start_str(),
                window.end_str()
            ));
            return Ok(0);
        }

        match format {
            ExportFormat::Csv => export_csv(&rows, &path)?,
            ExportFormat::Json => export_json(&rows, &path)?,
            ExportFormat::Xlsx => export_xlsx(&rows, &path)?,
        }

        Ok(rows.len())
    }
}
