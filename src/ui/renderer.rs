//! Plain-text rendering of list and detail views.
//!
//! The renderer writes to any [`Write`] sink so the binary can target stdout and
//! tests can target a buffer. Layout is a fixed-width table; long cells are cut with
//! an ellipsis on character boundaries.
//!
//! # Example
//!
//! ```rust
//! use eventboard::app::EventListState;
//! use eventboard::ui::{render, EventListView};
//!
//! let view = EventListView::from_state(&EventListState::new());
//! let mut out = Vec::new();
//! render(&view, &mut out)?;
//! assert!(String::from_utf8_lossy(&out).contains("No events found"));
//! # Ok::<(), std::io::Error>(())
//! ```

use crate::domain::Event;
use crate::ui::viewmodel::{EventListView, EventRow};
use std::io::{self, Write};

const DATE_WIDTH: usize = 10;
const TIME_WIDTH: usize = 11;
const TITLE_WIDTH: usize = 32;
const LOCATION_WIDTH: usize = 24;
const PRICE_WIDTH: usize = 9;

/// Renders the list view: header, optional error banner, table or empty state,
/// and the pagination footer.
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn render(view: &EventListView, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", view.header.title.trim())?;

    if let Some(error) = &view.error_banner {
        writeln!(out, "! {error}")?;
    }

    if let Some(empty) = &view.empty_state {
        writeln!(out)?;
        writeln!(out, "  {}", empty.message)?;
        writeln!(out, "  {}", empty.subtitle)?;
    } else {
        write_columns(out, ["DATE", "TIME", "TITLE", "LOCATION", "PRICE"], "ATTIRE")?;
        for row in &view.rows {
            render_row(row, out)?;
        }
    }

    if !view.footer.status.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", view.footer.status)?;
    }
    Ok(())
}

fn render_row(row: &EventRow, out: &mut impl Write) -> io::Result<()> {
    let date = truncate(&row.date, DATE_WIDTH);
    let time = truncate(&row.time, TIME_WIDTH);
    let title = truncate(&row.title, TITLE_WIDTH);
    let location = truncate(&row.location, LOCATION_WIDTH);
    let price = truncate(&row.price, PRICE_WIDTH);
    write_columns(out, [&date, &time, &title, &location, &price], &row.attire)
}

fn write_columns(out: &mut impl Write, cells: [&str; 5], attire: &str) -> io::Result<()> {
    let [date, time, title, location, price] = cells;
    writeln!(
        out,
        "{date:<DATE_WIDTH$} {time:<TIME_WIDTH$} {title:<TITLE_WIDTH$} \
         {location:<LOCATION_WIDTH$} {price:>PRICE_WIDTH$} {attire}"
    )
}

/// Renders every field of a single event.
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn render_event_details(event: &Event, out: &mut impl Write) -> io::Result<()> {
    let row = EventRow::from(event);

    writeln!(out, "{}", event.title)?;
    writeln!(out, "{}", "=".repeat(event.title.chars().count().max(1)))?;
    writeln!(out, "Id:        {}", event.id)?;
    writeln!(out, "Date:      {}", row.date)?;
    if !row.time.is_empty() {
        writeln!(out, "Time:      {}", row.time)?;
    }
    writeln!(out, "Location:  {}", event.location)?;
    writeln!(out, "Price:     {}", row.price)?;
    if !row.attire.is_empty() {
        writeln!(out, "Attire:    {}", row.attire)?;
    }

    if !event.description.trim().is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", event.description.trim())?;
    }

    if !event.organizers.is_empty() {
        writeln!(out)?;
        writeln!(out, "Organizers:")?;
        for organizer in &event.organizers {
            let contact: Vec<&str> = [organizer.email.as_deref(), organizer.phone.as_deref()]
                .into_iter()
                .flatten()
                .collect();
            if contact.is_empty() {
                writeln!(out, "  - {}", organizer.name)?;
            } else {
                writeln!(out, "  - {} ({})", organizer.name, contact.join(", "))?;
            }
        }
    }

    if !event.images.is_empty() {
        writeln!(out)?;
        writeln!(out, "Images:")?;
        for image in &event.images {
            writeln!(out, "  - {image}")?;
        }
    }
    Ok(())
}

/// Cuts `text` to `width` characters, ending in `...` when shortened.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut cut: String = text.chars().take(keep).collect();
    cut.push_str("...");
    cut
}
