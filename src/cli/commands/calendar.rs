use crate::cli::parser::{Commands, FilterArgs};
use crate::config::Config;
use crate::core::calendar::{CalendarFilter, CalendarLogic, CalendarView};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::calendar_event::EventKind;
use crate::models::category::TaskCategory;
use crate::ui::messages::{header, info};
use crate::utils::colors::{
    GREY, RESET, color_for_half_day, color_for_kind, color_for_priority, colorize_optional,
};
use crate::utils::date::{DateWindow, parse_period, weekday_label};
use crate::utils::formatting::{bold, describe_kind, event_details, pad_right};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Calendar { period, filter } = cmd {
        let window = resolve_window(period.as_deref())?;
        let filter = build_filter(filter, cfg)?;

        let mut pool = DbPool::new(&cfg.database)?;
        let view = CalendarLogic::materialize(&mut pool, &window, &filter);

        print_calendar(&view, cfg);
    }

    Ok(())
}

/// Window of a period expression, the current month when absent.
pub(crate) fn resolve_window(period: Option<&str>) -> AppResult<DateWindow> {
    match period {
        Some(p) => parse_period(p),
        None => DateWindow::current_month(),
    }
}

pub(crate) fn build_filter(args: &FilterArgs, cfg: &Config) -> AppResult<CalendarFilter> {
    let kinds = match &args.kinds {
        Some(list) => CalendarFilter::parse_kinds(list)?,
        None => Vec::new(),
    };

    let category = args
        .category
        .as_deref()
        .map(|c| TaskCategory::from_code(c).ok_or_else(|| AppError::invalid_code("category", c)))
        .transpose()?;

    Ok(CalendarFilter {
        kinds,
        project_id: args.project,
        service: args.service.clone(),
        category,
        include_done: args.all || cfg.include_done,
    })
}

fn print_calendar(view: &CalendarView, cfg: &Config) {
    let sep = if cfg.separator_char.is_empty() {
        "-"
    } else {
        cfg.separator_char.as_str()
    };

    header(
        format!(
            "Calendar {} → {} ({} event(s))",
            view.window.start_str(),
            view.window.end_str(),
            view.event_count()
        ),
        sep,
    );

    if view.is_empty() {
        info("No events in this period.");
        return;
    }

    for (day, events) in &view.days {
        let wd = weekday_label(*day, &cfg.show_weekday);
        let label = if wd.is_empty() {
            day.to_string()
        } else {
            format!("{} {}", day, wd)
        };
        println!("\n{}", bold(&label));

        for ev in events {
            let color = match ev.kind {
                EventKind::Leave => color_for_half_day(ev.half_day_type),
                _ => ev.priority.map(color_for_priority).unwrap_or(RESET),
            };

            let details = event_details(ev);
            let details = if details.is_empty() {
                String::new()
            } else {
                format!(" {GREY}({details}){RESET}")
            };

            println!(
                "  {}{}{} {} {}{}{}{}",
                color_for_kind(ev.kind),
                pad_right(describe_kind(ev.kind), 4),
                RESET,
                colorize_optional(&pad_right(&ev.time_range(), 11)),
                color,
                ev.title,
                RESET,
                details
            );
        }
    }
    println!();
}
