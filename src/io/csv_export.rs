use std::path::Path;

use chrono::{Local, TimeZone};

use crate::error::ExportError;
use crate::model::Project;

const HEADER: [&str; 7] = [
    "Code",
    "Client",
    "Name",
    "Owner",
    "Created",
    "Recurring Tasks",
    "Note",
];

fn created_date<Tz: TimeZone>(project: &Project, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    tz.timestamp_millis_opt(project.date_created)
        .single()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Write projects as semicolon-delimited CSV with a header row. Dates are
/// rendered in `tz`. Returns the number of projects written.
pub fn write_csv<W, Tz>(projects: &[Project], writer: W, tz: &Tz) -> Result<usize, ExportError>
where
    W: std::io::Write,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(HEADER)?;
    for project in projects {
        wtr.write_record([
            project.code.to_string(),
            project.client.clone(),
            project.name.clone(),
            project.owner.clone(),
            created_date(project, tz),
            project.recurring_tasks.len().to_string(),
            project.note.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(projects.len())
}

/// Export the project list to `path`, dates in local time.
pub fn export_csv(projects: &[Project], path: &Path) -> Result<usize, ExportError> {
    if projects.is_empty() {
        return Err(ExportError::Empty);
    }
    let file = std::fs::File::create(path)?;
    write_csv(projects, file, &Local)
}
