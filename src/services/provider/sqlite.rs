use std::path::Path;
use std::sync::mpsc::{self, Receiver};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local, NaiveTime};
use rusqlite::{Connection, OptionalExtension};

use super::CalendarDataProvider;
use crate::models::calendar_date::CalendarDate;
use crate::models::grid::EventCounts;
use crate::utils::date::add_days;

const COUNT_EVENTS_FOR_DAY: &str = "SELECT COUNT(*) FROM events
     WHERE start_datetime < ?1 AND end_datetime > ?2";

/// Read-only event counts from an `events` table.
///
/// Rows carry RFC 3339 `start_datetime` / `end_datetime` text columns; an
/// event counts toward every local day it overlaps.
pub struct SqliteEventStore {
    conn: Connection,
}

impl SqliteEventStore {
    /// Opens the SQLite database at `path` (or ":memory:").
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .context(format!("Failed to open event store at {}", path.display()))?;
        Ok(Self { conn })
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn has_events_table(&self) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'events'",
                [],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .context("Failed to inspect event store schema")?;
        Ok(found.is_some())
    }
}

impl CalendarDataProvider for SqliteEventStore {
    fn request_authorization(&self) -> Receiver<bool> {
        let (tx, rx) = mpsc::channel();
        let granted = match self.has_events_table() {
            Ok(found) => {
                if !found {
                    log::warn!("Event store has no events table; denying access");
                }
                found
            }
            Err(err) => {
                log::warn!("Event store authorization failed: {err:?}");
                false
            }
        };
        let _ = tx.send(granted);
        rx
    }

    fn event_count(&self, date: CalendarDate) -> Result<u32> {
        let (start, end) = local_day_bounds(date)?;
        let count: i64 = self
            .conn
            .query_row(
                COUNT_EVENTS_FOR_DAY,
                [end.to_rfc3339(), start.to_rfc3339()],
                |row| row.get(0),
            )
            .context(format!("Failed to count events on {}", date))?;
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    fn event_counts(&self, dates: &[CalendarDate]) -> Result<EventCounts> {
        let mut stmt = self
            .conn
            .prepare_cached(COUNT_EVENTS_FOR_DAY)
            .context("Failed to prepare event count query")?;

        let mut counts = EventCounts::with_capacity(dates.len());
        for &date in dates {
            let (start, end) = local_day_bounds(date)?;
            let count: i64 = stmt
                .query_row([end.to_rfc3339(), start.to_rfc3339()], |row| row.get(0))
                .context(format!("Failed to count events on {}", date))?;
            if count > 0 {
                counts.insert(date, u32::try_from(count).unwrap_or(u32::MAX));
            }
        }
        Ok(counts)
    }
}

/// Local midnight of `date` and of the following day.
fn local_day_bounds(date: CalendarDate) -> Result<(DateTime<Local>, DateTime<Local>)> {
    let midnight = |day: CalendarDate| {
        day.as_naive()
            .and_time(NaiveTime::MIN)
            .and_local_timezone(Local)
            .earliest()
            .ok_or_else(|| anyhow!("No local midnight on {}", day))
    };
    Ok((midnight(date)?, midnight(add_days(date, 1))?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ymd(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    fn at(date: CalendarDate, hour: u32) -> DateTime<Local> {
        date.as_naive()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
            .and_local_timezone(Local)
            .earliest()
            .unwrap()
    }

    fn setup_store() -> SqliteEventStore {
        let store = SqliteEventStore::open(":memory:").unwrap();
        store
            .connection()
            .execute(
                "CREATE TABLE events (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    title TEXT NOT NULL,
                    start_datetime TEXT NOT NULL,
                    end_datetime TEXT NOT NULL
                )",
                [],
            )
            .unwrap();
        store
    }

    fn insert(store: &SqliteEventStore, title: &str, start: DateTime<Local>, end: DateTime<Local>) {
        store
            .connection()
            .execute(
                "INSERT INTO events (title, start_datetime, end_datetime) VALUES (?1, ?2, ?3)",
                [title.to_string(), start.to_rfc3339(), end.to_rfc3339()],
            )
            .unwrap();
    }

    #[test]
    fn test_counts_events_overlapping_day() {
        let store = setup_store();
        let day = ymd(2024, 6, 12);
        insert(&store, "Standup", at(day, 9), at(day, 10));
        insert(&store, "Lunch", at(day, 12), at(day, 13));
        insert(&store, "Overnight", at(ymd(2024, 6, 11), 22), at(day, 2));
        insert(&store, "Next day", at(ymd(2024, 6, 13), 9), at(ymd(2024, 6, 13), 10));

        assert_eq!(store.event_count(day).unwrap(), 3);
        assert_eq!(store.event_count(ymd(2024, 6, 11)).unwrap(), 1);
        assert_eq!(store.event_count(ymd(2024, 6, 14)).unwrap(), 0);
    }

    #[test]
    fn test_event_ending_at_midnight_stays_on_its_day() {
        let store = setup_store();
        let day = ymd(2024, 6, 12);
        let next = ymd(2024, 6, 13);
        insert(&store, "Late", at(day, 22), at(day, 22) + Duration::hours(2));

        assert_eq!(store.event_count(day).unwrap(), 1);
        assert_eq!(store.event_count(next).unwrap(), 0);
    }

    #[test]
    fn test_batch_counts() {
        let store = setup_store();
        let day = ymd(2024, 6, 12);
        for hour in [8, 9, 10, 11] {
            insert(&store, "Block", at(day, hour), at(day, hour) + Duration::minutes(30));
        }

        let dates = [ymd(2024, 6, 11), day];
        let counts = store.event_counts(&dates).unwrap();
        assert_eq!(counts.get(&day), Some(&4));
        assert!(!counts.contains_key(&ymd(2024, 6, 11)));
    }

    #[test]
    fn test_authorization_requires_events_table() {
        let empty = SqliteEventStore::open(":memory:").unwrap();
        assert!(!empty.request_authorization().recv().unwrap());

        let store = setup_store();
        assert!(store.request_authorization().recv().unwrap());
    }

    #[test]
    fn test_missing_table_is_an_error() {
        let empty = SqliteEventStore::open(":memory:").unwrap();
        assert!(empty.event_count(ymd(2024, 6, 12)).is_err());
    }
}
