//! Local card collection backed by DuckDB.
//!
//! [`CollectionStore`] is the narrow persistence seam the rest of the SDK
//! depends on. [`Collection`] implements it over a DuckDB database file (or
//! an in-memory database for tests) and adds the bookkeeping operations the
//! desktop app uses: updates, deletes, local search, sets and prices.

use duckdb::{params, Connection as DuckDbConnection, Row};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PokemasterError, Result};
use crate::mapper::normalize_quantity;
use crate::models::{CollectionRecord, CollectionSet, Condition, PriceRecord};

/// Persistence operations the SDK needs from a collection backend.
pub trait CollectionStore {
    /// All stored cards, newest first.
    fn list_cards(&self) -> Result<Vec<CollectionRecord>>;

    /// Store a new card and return its assigned id.
    ///
    /// Any `id` or date already on `record` is ignored.
    fn add_card(&self, record: &CollectionRecord) -> Result<i64>;

    /// Insert a set row, replacing any existing row with the same id.
    fn upsert_set(&self, set: &CollectionSet) -> Result<()>;

    /// Store price snapshots and return the number of rows written.
    fn add_prices(&self, prices: &[PriceRecord]) -> Result<usize>;
}

const SCHEMA: &str = r#"
CREATE SEQUENCE IF NOT EXISTS cards_id_seq START 1;
CREATE SEQUENCE IF NOT EXISTS prices_id_seq START 1;

CREATE TABLE IF NOT EXISTS sets (
    id VARCHAR PRIMARY KEY,
    name VARCHAR NOT NULL,
    series VARCHAR,
    printed_total INTEGER,
    total INTEGER,
    release_date VARCHAR,
    symbol_url VARCHAR,
    logo_url VARCHAR,
    date_added TIMESTAMP DEFAULT current_timestamp
);

CREATE TABLE IF NOT EXISTS cards (
    id BIGINT PRIMARY KEY DEFAULT nextval('cards_id_seq'),
    name VARCHAR NOT NULL,
    set_id VARCHAR NOT NULL,
    set_name VARCHAR NOT NULL,
    number VARCHAR,
    rarity VARCHAR,
    "type" VARCHAR,
    supertype VARCHAR,
    subtype VARCHAR,
    hp INTEGER,
    image_url VARCHAR,
    small_image_url VARCHAR,
    large_image_url VARCHAR,
    tcgplayer_id VARCHAR,
    cardmarket_id VARCHAR,
    condition VARCHAR DEFAULT 'Near Mint',
    grade VARCHAR,
    quantity INTEGER DEFAULT 1,
    notes VARCHAR,
    date_added TIMESTAMP DEFAULT current_timestamp,
    date_updated TIMESTAMP DEFAULT current_timestamp
);

CREATE TABLE IF NOT EXISTS prices (
    id BIGINT PRIMARY KEY DEFAULT nextval('prices_id_seq'),
    card_id BIGINT NOT NULL,
    source VARCHAR NOT NULL,
    finish VARCHAR,
    low_price DOUBLE,
    mid_price DOUBLE,
    high_price DOUBLE,
    market_price DOUBLE,
    direct_low_price DOUBLE,
    trend_price DOUBLE,
    currency VARCHAR DEFAULT 'USD',
    last_updated VARCHAR
);
"#;

const CARD_COLUMNS: &str = "id, name, set_id, set_name, number, rarity, \"type\", supertype, \
     subtype, hp, image_url, small_image_url, large_image_url, tcgplayer_id, cardmarket_id, \
     condition, grade, quantity, notes, \
     CAST(date_added AS VARCHAR) AS date_added, CAST(date_updated AS VARCHAR) AS date_updated";

/// A user's card collection stored in DuckDB.
pub struct Collection {
    conn: DuckDbConnection,
    path: Option<PathBuf>,
}

impl Collection {
    /// Open (or create) a collection database at `path`.
    ///
    /// Parent directories are created as needed and the schema is applied
    /// idempotently.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let conn = DuckDbConnection::open(&path)?;
        conn.execute_batch(SCHEMA)?;
        info!("Opened collection at {}", path.display());
        Ok(Self {
            conn,
            path: Some(path),
        })
    }

    /// Open a throwaway in-memory collection.
    pub fn open_in_memory() -> Result<Self> {
        let conn = DuckDbConnection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn, path: None })
    }

    /// Database file path, or `None` for an in-memory collection.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // -- Cards -------------------------------------------------------------

    /// Fetch one stored card by id.
    pub fn get_card(&self, id: i64) -> Result<Option<CollectionRecord>> {
        let sql = format!("SELECT {} FROM cards WHERE id = ?", CARD_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => Ok(Some(card_from_row(row)?)),
            None => Ok(None),
        }
    }

    /// Replace every user-editable field of card `id` and bump `date_updated`.
    pub fn update_card(&self, id: i64, record: &CollectionRecord) -> Result<()> {
        let updated = self.conn.execute(
            r#"
            UPDATE cards SET
                name = ?, set_id = ?, set_name = ?, number = ?, rarity = ?,
                "type" = ?, supertype = ?, subtype = ?, hp = ?, image_url = ?,
                small_image_url = ?, large_image_url = ?, tcgplayer_id = ?,
                cardmarket_id = ?, condition = ?, grade = ?, quantity = ?,
                notes = ?, date_updated = current_timestamp
            WHERE id = ?
            "#,
            params![
                record.name,
                record.set_id,
                record.set_name,
                record.number,
                record.rarity,
                record.type_field,
                record.supertype,
                record.subtype,
                record.hp,
                record.image_url,
                record.small_image_url,
                record.large_image_url,
                record.tcgplayer_id,
                record.cardmarket_id,
                condition_text(record.condition),
                record.grade,
                normalize_quantity(record.quantity),
                record.notes,
                id,
            ],
        )?;
        if updated == 0 {
            return Err(PokemasterError::NotFound(format!("Collection card {}", id)));
        }
        info!("Updated collection card {}", id);
        Ok(())
    }

    /// Remove card `id` together with its stored prices.
    pub fn delete_card(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM prices WHERE card_id = ?", params![id])?;
        let deleted = self
            .conn
            .execute("DELETE FROM cards WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(PokemasterError::NotFound(format!("Collection card {}", id)));
        }
        info!("Deleted collection card {}", id);
        Ok(())
    }

    /// Case-insensitive substring search over card name and set name,
    /// ordered by name. `text` is matched literally.
    pub fn search_cards(&self, text: &str) -> Result<Vec<CollectionRecord>> {
        let needle = text.to_lowercase();
        let sql = format!(
            "SELECT {} FROM cards \
             WHERE contains(lower(name), ?) OR contains(lower(set_name), ?) \
             ORDER BY name, id",
            CARD_COLUMNS
        );
        self.query_cards(&sql, params![needle, needle])
    }

    fn query_cards(
        &self,
        sql: &str,
        params: &[&dyn duckdb::ToSql],
    ) -> Result<Vec<CollectionRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(card_from_row(row)?);
        }
        Ok(out)
    }

    // -- Sets --------------------------------------------------------------

    /// All stored sets, most recently released first.
    pub fn list_sets(&self) -> Result<Vec<CollectionSet>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, series, printed_total, total, release_date, symbol_url, logo_url \
             FROM sets ORDER BY release_date DESC NULLS LAST, id",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(CollectionSet {
                id: row.get("id")?,
                name: row.get("name")?,
                series: row.get("series")?,
                printed_total: row.get("printed_total")?,
                total: row.get("total")?,
                release_date: row.get("release_date")?,
                symbol_url: row.get("symbol_url")?,
                logo_url: row.get("logo_url")?,
            });
        }
        Ok(out)
    }

    // -- Prices ------------------------------------------------------------

    /// Price snapshots for one card, newest first.
    pub fn prices_for_card(&self, card_id: i64) -> Result<Vec<PriceRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, card_id, source, finish, low_price, mid_price, high_price, market_price, \
                    direct_low_price, trend_price, currency, last_updated \
             FROM prices WHERE card_id = ? ORDER BY last_updated DESC, id",
        )?;
        let mut rows = stmt.query(params![card_id])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(PriceRecord {
                id: row.get("id")?,
                card_id: row.get("card_id")?,
                source: row.get("source")?,
                finish: row.get("finish")?,
                low_price: row.get("low_price")?,
                mid_price: row.get("mid_price")?,
                high_price: row.get("high_price")?,
                market_price: row.get("market_price")?,
                direct_low_price: row.get("direct_low_price")?,
                trend_price: row.get("trend_price")?,
                currency: row.get("currency")?,
                last_updated: row.get("last_updated")?,
            });
        }
        Ok(out)
    }
}

impl CollectionStore for Collection {
    fn list_cards(&self) -> Result<Vec<CollectionRecord>> {
        let sql = format!(
            "SELECT {} FROM cards ORDER BY cards.date_added DESC, cards.id DESC",
            CARD_COLUMNS
        );
        self.query_cards(&sql, &[])
    }

    fn add_card(&self, record: &CollectionRecord) -> Result<i64> {
        let id: i64 = self.conn.query_row(
            r#"
            INSERT INTO cards (
                name, set_id, set_name, number, rarity, "type", supertype, subtype,
                hp, image_url, small_image_url, large_image_url, tcgplayer_id,
                cardmarket_id, condition, grade, quantity, notes
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, COALESCE(?, 'Near Mint'), ?, ?, ?)
            RETURNING id
            "#,
            params![
                record.name,
                record.set_id,
                record.set_name,
                record.number,
                record.rarity,
                record.type_field,
                record.supertype,
                record.subtype,
                record.hp,
                record.image_url,
                record.small_image_url,
                record.large_image_url,
                record.tcgplayer_id,
                record.cardmarket_id,
                condition_text(record.condition),
                record.grade,
                normalize_quantity(record.quantity),
                record.notes,
            ],
            |row| row.get(0),
        )?;
        info!("Added {} ({}) to collection as {}", record.name, record.set_id, id);
        Ok(id)
    }

    fn upsert_set(&self, set: &CollectionSet) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO sets \
             (id, name, series, printed_total, total, release_date, symbol_url, logo_url) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                set.id,
                set.name,
                set.series,
                set.printed_total,
                set.total,
                set.release_date,
                set.symbol_url,
                set.logo_url,
            ],
        )?;
        Ok(())
    }

    /// Missing `last_updated` values are stamped with the current date in
    /// the catalog's `YYYY/MM/DD` form so stored dates sort together.
    fn add_prices(&self, prices: &[PriceRecord]) -> Result<usize> {
        let mut written = 0;
        for p in prices {
            written += self.conn.execute(
                "INSERT INTO prices \
                 (card_id, source, finish, low_price, mid_price, high_price, market_price, \
                  direct_low_price, trend_price, currency, last_updated) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, COALESCE(?, 'USD'), \
                         COALESCE(?, strftime(current_date, '%Y/%m/%d')))",
                params![
                    p.card_id,
                    p.source,
                    p.finish,
                    p.low_price,
                    p.mid_price,
                    p.high_price,
                    p.market_price,
                    p.direct_low_price,
                    p.trend_price,
                    p.currency,
                    p.last_updated,
                ],
            )?;
        }
        Ok(written)
    }
}

fn condition_text(condition: Option<Condition>) -> Option<&'static str> {
    condition.map(|c| c.as_str())
}

fn card_from_row(row: &Row<'_>) -> Result<CollectionRecord> {
    let id: Option<i64> = row.get("id")?;
    let condition: Option<String> = row.get("condition")?;
    let condition = match condition {
        Some(text) => match text.parse::<Condition>() {
            Ok(c) => Some(c),
            Err(_) => {
                warn!("Collection card {:?} has unknown condition {:?}", id, text);
                None
            }
        },
        None => None,
    };

    Ok(CollectionRecord {
        id,
        name: row.get("name")?,
        set_id: row.get("set_id")?,
        set_name: row.get("set_name")?,
        number: row.get("number")?,
        rarity: row.get("rarity")?,
        type_field: row.get("type")?,
        supertype: row.get("supertype")?,
        subtype: row.get("subtype")?,
        hp: row.get("hp")?,
        image_url: row.get("image_url")?,
        small_image_url: row.get("small_image_url")?,
        large_image_url: row.get("large_image_url")?,
        tcgplayer_id: row.get("tcgplayer_id")?,
        cardmarket_id: row.get("cardmarket_id")?,
        condition,
        grade: row.get("grade")?,
        quantity: row.get("quantity")?,
        notes: row.get("notes")?,
        date_added: row.get("date_added")?,
        date_updated: row.get("date_updated")?,
    })
}
