use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::error::RowSkip;
use crate::model::Record;
use crate::sink::RecordSink;

pub fn connect(path: &Path) -> Result<Connection> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {:?}", dir))?;
    }
    let conn = Connection::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS laptops (
            name           TEXT PRIMARY KEY,
            brand          TEXT NOT NULL,
            cpu            TEXT,
            ram_gb         TEXT,
            screen_size_in TEXT,
            weight_kg      TEXT,
            price_aud      TEXT NOT NULL,
            gpu_brand      TEXT,
            gpu_discrete   BOOLEAN,
            gpu_raw        TEXT,
            gpu_tier       TEXT,
            gpu_tier_power INTEGER,
            gpu_model      TEXT,
            gpu_memory_gb  INTEGER,
            gpu_name       TEXT,
            intro          TEXT NOT NULL,
            url            TEXT NOT NULL,
            updated_at     TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_laptops_brand ON laptops(brand);

        CREATE TABLE IF NOT EXISTS storage_devices (
            id             INTEGER PRIMARY KEY,
            laptop_name    TEXT NOT NULL REFERENCES laptops(name) ON DELETE CASCADE,
            ordinal        INTEGER NOT NULL,
            capacity_gb    INTEGER NOT NULL,
            is_solid_state BOOLEAN NOT NULL,
            UNIQUE(laptop_name, ordinal)
        );

        CREATE TABLE IF NOT EXISTS row_skips (
            id         INTEGER PRIMARY KEY,
            url        TEXT NOT NULL,
            reason     TEXT NOT NULL,
            skipped_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;
    Ok(())
}

// ── Writing ──

pub fn save_records(conn: &Connection, records: &[Record]) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    {
        let mut laptop = tx.prepare(
            "INSERT OR REPLACE INTO laptops
             (name, brand, cpu, ram_gb, screen_size_in, weight_kg, price_aud,
              gpu_brand, gpu_discrete, gpu_raw, gpu_tier, gpu_tier_power, gpu_model, gpu_memory_gb, gpu_name,
              intro, url)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
        )?;
        let mut clear = tx.prepare("DELETE FROM storage_devices WHERE laptop_name = ?1")?;
        let mut device = tx.prepare(
            "INSERT INTO storage_devices (laptop_name, ordinal, capacity_gb, is_solid_state)
             VALUES (?1, ?2, ?3, ?4)",
        )?;

        for r in records {
            let gpu = r.graphics_card.as_ref();
            clear.execute([&r.name])?;
            laptop.execute(rusqlite::params![
                r.name,
                r.brand,
                r.cpu,
                r.ram_gb,
                r.screen_size_in,
                r.weight_kg,
                r.price_aud,
                gpu.map(|g| g.brand.as_str()),
                gpu.map(|g| g.discrete),
                gpu.map(|g| g.raw_text.as_str()),
                gpu.and_then(|g| g.tier).map(|t| t.as_str()),
                gpu.and_then(|g| g.tier_power),
                gpu.and_then(|g| g.model_number.as_deref()),
                gpu.and_then(|g| g.memory_gb),
                gpu.map(|g| g.display_name.as_str()),
                r.intro,
                r.url,
            ])?;
            for (i, d) in r.storage.iter().enumerate() {
                device.execute(rusqlite::params![r.name, i as i64, d.capacity_gb, d.is_solid_state])?;
            }
        }
    }
    tx.commit()?;
    Ok(())
}

pub fn save_skips(conn: &Connection, skips: &[RowSkip]) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt = tx.prepare("INSERT INTO row_skips (url, reason) VALUES (?1, ?2)")?;
        for s in skips {
            stmt.execute(rusqlite::params![s.url, s.reason()])?;
        }
    }
    tx.commit()?;
    Ok(())
}

/// Buffers rows and writes them a transaction at a time.
pub struct SqliteSink {
    conn: Connection,
    records: Vec<Record>,
    skips: Vec<RowSkip>,
    batch_size: usize,
}

impl SqliteSink {
    pub fn new(conn: Connection, batch_size: usize) -> Result<Self> {
        init_schema(&conn)?;
        Ok(SqliteSink {
            conn,
            records: Vec::new(),
            skips: Vec::new(),
            batch_size: batch_size.max(1),
        })
    }

    pub fn open(path: &Path, batch_size: usize) -> Result<Self> {
        Self::new(connect(path)?, batch_size)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn flush(&mut self) -> Result<()> {
        if !self.records.is_empty() {
            save_records(&self.conn, &self.records)?;
            self.records.clear();
        }
        if !self.skips.is_empty() {
            save_skips(&self.conn, &self.skips)?;
            self.skips.clear();
        }
        Ok(())
    }
}

impl RecordSink for SqliteSink {
    fn accept(&mut self, record: &Record) -> Result<()> {
        self.records.push(record.clone());
        if self.records.len() >= self.batch_size {
            self.flush()?;
        }
        Ok(())
    }

    fn skip(&mut self, skip: &RowSkip) -> Result<()> {
        self.skips.push(skip.clone());
        if self.skips.len() >= self.batch_size {
            self.flush()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.flush()
    }
}

// ── Stats ──

pub struct Stats {
    pub laptops: i64,
    pub skips: i64,
    pub discrete_gpus: i64,
    pub storage_devices: i64,
    pub by_brand: Vec<(String, i64)>,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let count = |sql: &str| -> Result<i64> { Ok(conn.query_row(sql, [], |r| r.get(0))?) };
    let mut stmt = conn.prepare(
        "SELECT brand, COUNT(*) FROM laptops GROUP BY brand ORDER BY COUNT(*) DESC, brand",
    )?;
    let by_brand = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Stats {
        laptops: count("SELECT COUNT(*) FROM laptops")?,
        skips: count("SELECT COUNT(*) FROM row_skips")?,
        discrete_gpus: count("SELECT COUNT(*) FROM laptops WHERE gpu_discrete = 1")?,
        storage_devices: count("SELECT COUNT(*) FROM storage_devices")?,
        by_brand,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;
    use crate::model::RawRow;
    use crate::parser::extract;

    fn sink() -> SqliteSink {
        SqliteSink::new(Connection::open_in_memory().unwrap(), 2).unwrap()
    }

    fn record(intro: &str) -> Record {
        extract(&RawRow::new(intro, "$1299.00", "/p")).unwrap()
    }

    #[test]
    fn saves_records_devices_and_skips() {
        let mut s = sink();
        s.accept(&record("ASUS ROG Strix, i7, 16GB, 512GB SSD + 1TB HDD, 15.6inch, GeForce RTX 2070 8GB, 2.4kg"))
            .unwrap();
        s.accept(&record("HP 14, i3, 4GB, 128GB SSD, 14inch, Intel UHD Graphics, 1.5kg"))
            .unwrap();
        s.skip(&RowSkip::new("/gone", ExtractError::MissingPrice)).unwrap();
        s.finish().unwrap();

        let stats = get_stats(s.connection()).unwrap();
        assert_eq!(stats.laptops, 2);
        assert_eq!(stats.skips, 1);
        assert_eq!(stats.discrete_gpus, 1);
        assert_eq!(stats.storage_devices, 3);
        assert_eq!(stats.by_brand.len(), 2);
    }

    #[test]
    fn same_name_replaces_previous_row() {
        let mut s = sink();
        s.accept(&record("Dell G3, i5, 8GB, 256GB SSD + 1TB HDD")).unwrap();
        s.accept(&record("Dell G3, i7, 16GB, 512GB SSD")).unwrap();
        s.finish().unwrap();

        let stats = get_stats(s.connection()).unwrap();
        assert_eq!(stats.laptops, 1);
        assert_eq!(stats.storage_devices, 1);
        let cpu: String = s
            .connection()
            .query_row("SELECT cpu FROM laptops WHERE name = 'Dell G3'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(cpu, "i7");
    }
}
