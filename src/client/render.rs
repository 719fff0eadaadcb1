use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::apply::apply_actions;
use super::pagination::{PageItem, has_next, has_previous, visible_pages};
use super::state::{LoadStatus, SearchState};
use crate::api::jobs::Job;

/// Publication dates come as plain dates or timestamps; both print as `dd.mm.yyyy`.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|d| d.date())
        });

    match date {
        Some(date) => date.format("%d.%m.%Y").to_string(),
        None => raw.to_string(),
    }
}

/// Plain-text rendering of the whole search screen
pub fn render(state: &SearchState) -> String {
    Screen(state).to_string()
}

struct Screen<'a>(&'a SearchState);

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        writeln!(f, "Search: \"{}\" in \"{}\"", state.filters.was, state.filters.wo)?;

        match &state.status {
            LoadStatus::Loading => return writeln!(f, "Searching..."),
            LoadStatus::LoadingMore => return writeln!(f, "Loading page..."),
            LoadStatus::Failed(message) => writeln!(f, "Error: {message}")?,
            LoadStatus::Idle => {}
        }

        writeln!(f, "{} opportunities found", state.total_jobs)?;
        if state.total_jobs > 0 {
            writeln!(
                f,
                "Page {} of {} | {} jobs shown",
                state.current_page,
                state.total_pages(),
                state.jobs.len()
            )?;
        }
        writeln!(f)?;

        for job in &state.jobs {
            write!(f, "{}", Card(job))?;
        }

        let bar = pagination_bar(state.current_page, state.total_pages());
        if !bar.is_empty() {
            writeln!(f, "{bar}")?;
        }
        Ok(())
    }
}

struct Card<'a>(&'a Job);

impl fmt::Display for Card<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let job = self.0;
        writeln!(f, "== {}", job.title)?;
        if let Some(employer) = &job.employer {
            writeln!(f, "   {employer}")?;
        }

        let place = [job.city(), job.region()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");
        if !place.is_empty() {
            writeln!(f, "   Location:  {place}")?;
        }
        if let Some(occupation) = &job.occupation {
            writeln!(f, "   Field:     {occupation}")?;
        }
        if let Some(published) = &job.published_at {
            writeln!(f, "   Published: {}", format_date(published))?;
        }

        for action in apply_actions(job) {
            writeln!(f, "   -> {}: {}", action.label(), action.url())?;
        }
        writeln!(f)
    }
}

/// `<- Previous  1 ... 4 5 [6] 7 8 ... 20  Next ->`, disabled ends in parentheses
pub fn pagination_bar(current: u32, total: u32) -> String {
    let pages = visible_pages(current, total);
    if pages.is_empty() {
        return String::new();
    }

    let mut parts = Vec::with_capacity(pages.len() + 2);
    parts.push(if has_previous(current) {
        "<- Previous".to_string()
    } else {
        "(<- Previous)".to_string()
    });
    parts.extend(pages.into_iter().map(|item| match item {
        PageItem::Page(p) if p == current => format!("[{p}]"),
        PageItem::Page(p) => p.to_string(),
        PageItem::Gap => "...".to_string(),
    }));
    parts.push(if has_next(current, total) {
        "Next ->".to_string()
    } else {
        "(Next ->)".to_string()
    });

    parts.join(" ")
}
