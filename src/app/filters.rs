//! Client-side filter state and the filter/sort pipeline.
//!
//! [`FilterState`] holds every predicate the user can set on the event list. It is
//! always fully defined: unset text predicates are empty strings, never missing.
//! [`FilterAction`] is the tagged union accepted by
//! [`EventListState::dispatch`](crate::app::EventListState::dispatch); each variant
//! replaces exactly one field.
//!
//! [`visible_events`] is the pure pipeline that turns the accumulated collection
//! into the list shown to the user.
//!
//! # Filtering Algorithm
//!
//! Predicates run in a fixed order and stop at the first failure:
//!
//! 1. **Past events**: unless `show_past`, drop events dated strictly before
//!    yesterday (today and yesterday stay visible)
//! 2. **Search**: trimmed, case-folded text in title, description or location
//! 3. **City**: substring of location
//! 4. **Date range**: inclusive `date_from` / `date_to`
//! 5. **Price range**: only events with a parseable price are bounded
//! 6. **Attire**: substring of the dress code
//!
//! Malformed event fields never abort the computation: events with unparseable
//! dates pass the date predicates and events with unknown prices pass the price
//! predicates.

use crate::app::modes::SortMode;
use crate::domain::{parse_calendar_date, parse_price, Event};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Complete filter and sort selection for the event list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search_text: String,
    pub city: String,
    /// Inclusive lower date bound, `YYYY-MM-DD`.
    pub date_from: String,
    /// Inclusive upper date bound, `YYYY-MM-DD`.
    pub date_to: String,
    pub price_min: String,
    pub price_max: String,
    pub attire: String,
    pub show_past: bool,
    pub sort_by: SortMode,
}

/// A single-field change to [`FilterState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    SetSearchText(String),
    SetCity(String),
    SetDateFrom(String),
    SetDateTo(String),
    SetPriceMin(String),
    SetPriceMax(String),
    SetAttire(String),
    SetShowPast(bool),
    SetSortBy(SortMode),
    /// Resets every field to its default at once.
    Clear,
}

impl FilterState {
    /// Applies an action, touching only the field it names.
    pub fn apply(&mut self, action: FilterAction) {
        match action {
            FilterAction::SetSearchText(value) => self.search_text = value,
            FilterAction::SetCity(value) => self.city = value,
            FilterAction::SetDateFrom(value) => self.date_from = value,
            FilterAction::SetDateTo(value) => self.date_to = value,
            FilterAction::SetPriceMin(value) => self.price_min = value,
            FilterAction::SetPriceMax(value) => self.price_max = value,
            FilterAction::SetAttire(value) => self.attire = value,
            FilterAction::SetShowPast(value) => self.show_past = value,
            FilterAction::SetSortBy(value) => self.sort_by = value,
            FilterAction::Clear => *self = Self::default(),
        }
    }

    /// Returns `true` when no predicate narrows the list.
    ///
    /// The sort mode and the past-events toggle are not considered filters.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        [
            &self.search_text,
            &self.city,
            &self.date_from,
            &self.date_to,
            &self.price_min,
            &self.price_max,
            &self.attire,
        ]
        .iter()
        .all(|value| value.trim().is_empty())
    }

    fn compile(&self, today: NaiveDate) -> CompiledFilters {
        CompiledFilters {
            hide_before: if self.show_past {
                None
            } else {
                today.checked_sub_days(Days::new(1))
            },
            search: folded(&self.search_text),
            city: folded(&self.city),
            date_from: parse_calendar_date(&self.date_from),
            date_to: parse_calendar_date(&self.date_to),
            price_min: parse_price(&self.price_min),
            price_max: parse_price(&self.price_max),
            attire: folded(&self.attire),
        }
    }
}

/// Filter predicates with their inputs parsed once per recomputation.
struct CompiledFilters {
    hide_before: Option<NaiveDate>,
    search: Option<String>,
    city: Option<String>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    price_min: Option<f64>,
    price_max: Option<f64>,
    attire: Option<String>,
}

impl CompiledFilters {
    fn matches(&self, event: &Event) -> bool {
        let date = event.calendar_date();

        if let (Some(hide_before), Some(date)) = (self.hide_before, date) {
            if date < hide_before {
                return false;
            }
        }

        if let Some(search) = &self.search {
            let hit = [&event.title, &event.description, &event.location]
                .iter()
                .any(|field| field.to_lowercase().contains(search.as_str()));
            if !hit {
                return false;
            }
        }

        if let Some(city) = &self.city {
            if !event.location.to_lowercase().contains(city.as_str()) {
                return false;
            }
        }

        if let Some(date) = date {
            if self.date_from.is_some_and(|from| date < from) {
                return false;
            }
            if self.date_to.is_some_and(|to| date > to) {
                return false;
            }
        }

        if let Some(price) = event.parsed_price() {
            if self.price_min.is_some_and(|min| price < min) {
                return false;
            }
            if self.price_max.is_some_and(|max| price > max) {
                return false;
            }
        }

        if let Some(attire) = &self.attire {
            let dress_code = event.attire.as_deref().unwrap_or_default().to_lowercase();
            if !dress_code.contains(attire.as_str()) {
                return false;
            }
        }

        true
    }
}

fn folded(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// Filters and sorts `events` for display.
///
/// `today` is the local calendar day used for the past-events cutoff and as the
/// sort key of undated events. The input slice is never modified.
#[must_use]
pub fn visible_events(events: &[Event], filters: &FilterState, today: NaiveDate) -> Vec<Event> {
    let compiled = filters.compile(today);

    let mut visible: Vec<Event> = events
        .iter()
        .filter(|event| compiled.matches(event))
        .cloned()
        .collect();

    sort_events(&mut visible, filters.sort_by, today);
    visible
}

/// Sorts events in place with a stable sort.
pub fn sort_events(events: &mut [Event], sort_by: SortMode, today: NaiveDate) {
    match sort_by {
        SortMode::Nearest => {
            events.sort_by_cached_key(|event| event.calendar_date().unwrap_or(today));
        }
        SortMode::Newest => {
            events.sort_by_cached_key(|event| {
                std::cmp::Reverse(event.calendar_date().unwrap_or(today))
            });
        }
        SortMode::Cheapest => {
            events.sort_by(|a, b| compare_prices(a.parsed_price(), b.parsed_price()));
        }
    }
}

/// Unknown prices compare greater than every known price.
fn compare_prices(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
