use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn connect(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open database {}", path.display()))?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS jobs (
            id                   INTEGER PRIMARY KEY,
            title                TEXT NOT NULL,
            company_name         TEXT,
            company_url          TEXT,
            location_raw         TEXT,
            location_type        TEXT,
            location_restriction TEXT,
            compensation_type    TEXT CHECK(compensation_type IN ('hourly','monthly','annual')),
            compensation_min     REAL,
            compensation_max     REAL,
            hourly_rate_min      REAL,
            hourly_rate_max      REAL,
            hours_per_week_min   REAL,
            hours_per_week_max   REAL,
            function_category    TEXT,
            seniority_tier       TEXT,
            date_posted          TEXT,
            date_scraped         TEXT,
            last_seen            TEXT,
            description_raw      TEXT,
            description_snippet  TEXT,
            source               TEXT NOT NULL,
            source_id            TEXT NOT NULL,
            source_url           TEXT,
            is_active            BOOLEAN NOT NULL DEFAULT 1,
            UNIQUE(source, source_id)
        );
        CREATE INDEX IF NOT EXISTS idx_jobs_active ON jobs(is_active);
        CREATE INDEX IF NOT EXISTS idx_jobs_posted ON jobs(date_posted);

        CREATE TABLE IF NOT EXISTS listing_snapshots (
            id             INTEGER PRIMARY KEY,
            source         TEXT NOT NULL,
            snapshot_date  TEXT NOT NULL,
            total_listings INTEGER,
            new_today      INTEGER,
            removed_today  INTEGER,
            UNIQUE(source, snapshot_date)
        );
        ",
    )?;
    Ok(())
}

/// Raw database-variant job record, column-for-column.
#[derive(Debug, Clone)]
pub struct DbJob {
    pub title: String,
    pub company_name: Option<String>,
    pub company_url: Option<String>,
    pub location_raw: Option<String>,
    pub location_type: Option<String>,
    pub location_restriction: Option<String>,
    pub compensation_type: Option<String>,
    pub compensation_min: Option<f64>,
    pub compensation_max: Option<f64>,
    pub hourly_rate_min: Option<f64>,
    pub hourly_rate_max: Option<f64>,
    pub hours_per_week_min: Option<f64>,
    pub hours_per_week_max: Option<f64>,
    pub function_category: Option<String>,
    pub seniority_tier: Option<String>,
    pub date_posted: Option<String>,
    pub date_scraped: Option<String>,
    pub last_seen: Option<String>,
    pub description_raw: Option<String>,
    pub description_snippet: Option<String>,
    pub source: String,
    pub source_id: String,
    pub source_url: Option<String>,
}

/// Active listings, newest first. Export order is posting date descending.
pub fn fetch_active_jobs(conn: &Connection) -> Result<Vec<DbJob>> {
    let mut stmt = conn.prepare(
        "SELECT title, company_name, company_url, location_raw, location_type,
                location_restriction, compensation_type, compensation_min,
                compensation_max, hourly_rate_min, hourly_rate_max,
                hours_per_week_min, hours_per_week_max, function_category,
                seniority_tier, date_posted, date_scraped, last_seen,
                description_raw, description_snippet, source, source_id,
                source_url
         FROM jobs
         WHERE is_active = 1
         ORDER BY date_posted DESC",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(DbJob {
                title: row.get(0)?,
                company_name: row.get(1)?,
                company_url: row.get(2)?,
                location_raw: row.get(3)?,
                location_type: row.get(4)?,
                location_restriction: row.get(5)?,
                compensation_type: row.get(6)?,
                compensation_min: row.get(7)?,
                compensation_max: row.get(8)?,
                hourly_rate_min: row.get(9)?,
                hourly_rate_max: row.get(10)?,
                hours_per_week_min: row.get(11)?,
                hours_per_week_max: row.get(12)?,
                function_category: row.get(13)?,
                seniority_tier: row.get(14)?,
                date_posted: row.get(15)?,
                date_scraped: row.get(16)?,
                last_seen: row.get(17)?,
                description_raw: row.get(18)?,
                description_snippet: row.get(19)?,
                source: row.get(20)?,
                source_id: row.get(21)?,
                source_url: row.get(22)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn count_active(conn: &Connection) -> Result<usize> {
    let count: usize =
        conn.query_row("SELECT COUNT(*) FROM jobs WHERE is_active = 1", [], |r| {
            r.get(0)
        })?;
    Ok(count)
}

/// Disclosed hourly rates among active listings, for the market snapshot.
pub fn fetch_hourly_rates(conn: &Connection) -> Result<Vec<f64>> {
    let mut stmt = conn.prepare(
        "SELECT hourly_rate_min FROM jobs
         WHERE is_active = 1 AND hourly_rate_min IS NOT NULL",
    )?;
    let rates = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<f64>, _>>()?;
    Ok(rates)
}

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub snapshot_date: String,
    pub new_today: Option<i64>,
    pub removed_today: Option<i64>,
}

/// Most recent all-sources snapshot, if the trends table has one.
pub fn fetch_latest_snapshot(conn: &Connection) -> Result<Option<Snapshot>> {
    let mut stmt = conn.prepare(
        "SELECT snapshot_date, new_today, removed_today
         FROM listing_snapshots
         WHERE source = 'all'
         ORDER BY snapshot_date DESC
         LIMIT 1",
    )?;
    let snapshot = stmt
        .query_map([], |row| {
            Ok(Snapshot {
                snapshot_date: row.get(0)?,
                new_today: row.get(1)?,
                removed_today: row.get(2)?,
            })
        })?
        .next()
        .transpose()?;
    Ok(snapshot)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    fn insert_job(conn: &Connection, title: &str, date_posted: &str, active: bool) {
        conn.execute(
            "INSERT INTO jobs (title, source, source_id, date_posted, is_active, hourly_rate_min)
             VALUES (?1, 'linkedin', ?2, ?3, ?4, ?5)",
            rusqlite::params![title, title, date_posted, active, 150.0],
        )
        .unwrap();
    }

    #[test]
    fn active_jobs_newest_first() {
        let conn = memory_db();
        insert_job(&conn, "Fractional CFO", "2025-05-01", true);
        insert_job(&conn, "Fractional CMO", "2025-06-01", true);
        insert_job(&conn, "Fractional CTO", "2025-04-01", false);

        let jobs = fetch_active_jobs(&conn).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].title, "Fractional CMO");
        assert_eq!(jobs[1].title, "Fractional CFO");
        assert_eq!(count_active(&conn).unwrap(), 2);
    }

    #[test]
    fn hourly_rates_only_from_active() {
        let conn = memory_db();
        insert_job(&conn, "Fractional CFO", "2025-05-01", true);
        insert_job(&conn, "Fractional CTO", "2025-04-01", false);
        conn.execute(
            "INSERT INTO jobs (title, source, source_id, is_active)
             VALUES ('VP Sales', 'x', 'y', 1)",
            [],
        )
        .unwrap();

        let rates = fetch_hourly_rates(&conn).unwrap();
        assert_eq!(rates, vec![150.0]);
    }

    #[test]
    fn latest_snapshot_wins() {
        let conn = memory_db();
        assert!(fetch_latest_snapshot(&conn).unwrap().is_none());

        conn.execute(
            "INSERT INTO listing_snapshots (source, snapshot_date, new_today, removed_today)
             VALUES ('all', '2025-06-01', 3, 1), ('all', '2025-06-02', 5, 2),
                    ('indeed', '2025-06-03', 9, 9)",
            [],
        )
        .unwrap();

        let snap = fetch_latest_snapshot(&conn).unwrap().unwrap();
        assert_eq!(snap.snapshot_date, "2025-06-02");
        assert_eq!(snap.new_today, Some(5));
        assert_eq!(snap.removed_today, Some(2));
    }
}
