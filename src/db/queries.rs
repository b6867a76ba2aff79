use crate::db::Database;
use crate::error::{HiveOpsError, Result};
use crate::models::{
    format_hive_id, parse_hive_sequence, Hive, HiveSnapshot, Product, ProductSnapshot,
    Recommendation, SubjectKind,
};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use serde::de::DeserializeOwned;
use tracing::warn;

// Hive Queries

impl Database {
    pub fn create_hive(&self, beekeeper: &str, snapshot: &HiveSnapshot) -> Result<Hive> {
        let payload = serde_json::to_string(snapshot)?;
        let now = Utc::now();

        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let id = next_hive_id(&tx)?;
            tx.execute(
                r#"
                INSERT INTO hives (id, beekeeper, hive_name, location, payload, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
                params![
                    id,
                    beekeeper,
                    snapshot.hive_name,
                    snapshot.location,
                    payload,
                    now.to_rfc3339(),
                    now.to_rfc3339(),
                ],
            )?;
            tx.commit()?;

            Ok(Hive {
                id,
                beekeeper: beekeeper.to_string(),
                snapshot: snapshot.clone(),
                created_at: now,
                updated_at: now,
            })
        })
    }

    pub fn get_hive(&self, beekeeper: &str, id: &str) -> Result<Option<Hive>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT * FROM hives WHERE id = ?1 AND beekeeper = ?2",
                params![id, beekeeper],
                row_to_hive,
            )
            .optional()
            .map_err(Into::into)
        })
    }

    pub fn list_hives(&self, beekeeper: &str) -> Result<Vec<Hive>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM hives WHERE beekeeper = ?1 ORDER BY created_at DESC, id DESC",
            )?;
            let hives = stmt
                .query_map([beekeeper], row_to_hive)?
                .filter_map(|r| {
                    r.map_err(|e| warn!(error = %e, "Skipping unreadable hive row"))
                        .ok()
                })
                .collect();
            Ok(hives)
        })
    }

    /// Replace a hive's snapshot. Only the owner may update it.
    pub fn update_hive(&self, beekeeper: &str, id: &str, snapshot: &HiveSnapshot) -> Result<Hive> {
        let payload = serde_json::to_string(snapshot)?;

        let updated = self.with_conn(|conn| {
            Ok(conn.execute(
                r#"
                UPDATE hives SET hive_name = ?1, location = ?2, payload = ?3, updated_at = ?4
                WHERE id = ?5 AND beekeeper = ?6
                "#,
                params![
                    snapshot.hive_name,
                    snapshot.location,
                    payload,
                    Utc::now().to_rfc3339(),
                    id,
                    beekeeper,
                ],
            )?)
        })?;

        if updated == 0 {
            return Err(HiveOpsError::NotFound(format!(
                "Hive {} not found or access denied",
                id
            )));
        }

        self.get_hive(beekeeper, id)?
            .ok_or_else(|| HiveOpsError::NotFound(format!("Hive {}", id)))
    }

    pub fn delete_hive(&self, beekeeper: &str, id: &str) -> Result<()> {
        let deleted = self.with_conn(|conn| {
            Ok(conn.execute(
                "DELETE FROM hives WHERE id = ?1 AND beekeeper = ?2",
                params![id, beekeeper],
            )?)
        })?;

        if deleted == 0 {
            return Err(HiveOpsError::NotFound(format!(
                "Hive {} not found or access denied",
                id
            )));
        }
        Ok(())
    }
}

/// Next free hive id: one past the highest existing sequence number.
fn next_hive_id(conn: &Connection) -> Result<String> {
    let mut stmt = conn.prepare("SELECT id FROM hives")?;
    let highest = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .filter_map(|r| r.ok())
        .filter_map(|id| parse_hive_sequence(&id))
        .max()
        .unwrap_or(0);

    let next = highest
        .checked_add(1)
        .ok_or_else(|| HiveOpsError::InvalidData("Hive id sequence exhausted".into()))?;
    Ok(format_hive_id(next))
}

fn row_to_hive(row: &Row) -> rusqlite::Result<Hive> {
    Ok(Hive {
        id: row.get("id")?,
        beekeeper: row.get("beekeeper")?,
        snapshot: payload_column(row, "payload")?,
        created_at: timestamp_column(row, "created_at")?,
        updated_at: timestamp_column(row, "updated_at")?,
    })
}

// Product Queries

impl Database {
    pub fn create_product(&self, beekeeper: &str, snapshot: &ProductSnapshot) -> Result<Product> {
        let payload = serde_json::to_string(snapshot)?;
        let now = Utc::now();

        let id = self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO products
                    (beekeeper, product_name, product_type, harvest_date, payload, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![
                    beekeeper,
                    snapshot.product_name,
                    snapshot.product_type.map(|t| t.as_str()),
                    snapshot.harvest_date.map(|d| d.to_string()),
                    payload,
                    now.to_rfc3339(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })?;

        Ok(Product {
            id,
            beekeeper: beekeeper.to_string(),
            snapshot: snapshot.clone(),
            created_at: now,
        })
    }

    pub fn get_product(&self, beekeeper: &str, id: i64) -> Result<Option<Product>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT * FROM products WHERE id = ?1 AND beekeeper = ?2",
                params![id, beekeeper],
                row_to_product,
            )
            .optional()
            .map_err(Into::into)
        })
    }

    /// Replace a product's snapshot. Only the owner may update it.
    pub fn update_product(
        &self,
        beekeeper: &str,
        id: i64,
        snapshot: &ProductSnapshot,
    ) -> Result<Product> {
        let payload = serde_json::to_string(snapshot)?;

        let updated = self.with_conn(|conn| {
            Ok(conn.execute(
                r#"
                UPDATE products
                SET product_name = ?1, product_type = ?2, harvest_date = ?3, payload = ?4
                WHERE id = ?5 AND beekeeper = ?6
                "#,
                params![
                    snapshot.product_name,
                    snapshot.product_type.map(|t| t.as_str()),
                    snapshot.harvest_date.map(|d| d.to_string()),
                    payload,
                    id,
                    beekeeper,
                ],
            )?)
        })?;

        if updated == 0 {
            return Err(HiveOpsError::NotFound(format!(
                "Product {} not found or access denied",
                id
            )));
        }

        self.get_product(beekeeper, id)?
            .ok_or_else(|| HiveOpsError::NotFound(format!("Product {}", id)))
    }

    pub fn list_products(&self, beekeeper: &str) -> Result<Vec<Product>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM products WHERE beekeeper = ?1 ORDER BY created_at DESC, id DESC",
            )?;
            let products = stmt
                .query_map([beekeeper], row_to_product)?
                .filter_map(|r| {
                    r.map_err(|e| warn!(error = %e, "Skipping unreadable product row"))
                        .ok()
                })
                .collect();
            Ok(products)
        })
    }

    /// Products harvested within `[start, end]`, oldest harvest first.
    pub fn products_harvested_between(
        &self,
        beekeeper: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Product>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT * FROM products
                WHERE beekeeper = ?1 AND harvest_date >= ?2 AND harvest_date <= ?3
                ORDER BY harvest_date ASC, id ASC
                "#,
            )?;
            let products = stmt
                .query_map(
                    params![beekeeper, start.to_string(), end.to_string()],
                    row_to_product,
                )?
                .filter_map(|r| {
                    r.map_err(|e| warn!(error = %e, "Skipping unreadable product row"))
                        .ok()
                })
                .collect();
            Ok(products)
        })
    }

    pub fn delete_product(&self, beekeeper: &str, id: i64) -> Result<()> {
        let deleted = self.with_conn(|conn| {
            Ok(conn.execute(
                "DELETE FROM products WHERE id = ?1 AND beekeeper = ?2",
                params![id, beekeeper],
            )?)
        })?;

        if deleted == 0 {
            return Err(HiveOpsError::NotFound(format!(
                "Product {} not found or access denied",
                id
            )));
        }
        Ok(())
    }
}

fn row_to_product(row: &Row) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get("id")?,
        beekeeper: row.get("beekeeper")?,
        snapshot: payload_column(row, "payload")?,
        created_at: timestamp_column(row, "created_at")?,
    })
}

// Recommendation Queries

impl Database {
    pub fn save_recommendation(&self, recommendation: &Recommendation) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO recommendations
                    (subject_kind, subject_id, beekeeper, recommendations, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    recommendation.subject_kind.as_str(),
                    recommendation.subject_id,
                    recommendation.beekeeper,
                    recommendation.recommendations,
                    recommendation.created_at.to_rfc3339(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// All recommendations for a beekeeper, newest first.
    pub fn list_recommendations(&self, beekeeper: &str) -> Result<Vec<Recommendation>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT * FROM recommendations WHERE beekeeper = ?1
                ORDER BY created_at DESC, id DESC
                "#,
            )?;
            let recs = stmt
                .query_map([beekeeper], row_to_recommendation)?
                .filter_map(|r| {
                    r.map_err(|e| warn!(error = %e, "Skipping unreadable recommendation row"))
                        .ok()
                })
                .collect();
            Ok(recs)
        })
    }
}

fn row_to_recommendation(row: &Row) -> rusqlite::Result<Recommendation> {
    let kind_str: String = row.get("subject_kind")?;
    let subject_kind = SubjectKind::from_str(&kind_str).unwrap_or_else(|| {
        warn!(subject_kind = %kind_str, "Unknown subject_kind in database, defaulting to Hive");
        SubjectKind::Hive
    });

    Ok(Recommendation {
        id: Some(row.get("id")?),
        subject_kind,
        subject_id: row.get("subject_id")?,
        beekeeper: row.get("beekeeper")?,
        recommendations: row.get("recommendations")?,
        created_at: timestamp_column(row, "created_at")?,
    })
}

fn payload_column<T: DeserializeOwned>(row: &Row, column: &str) -> rusqlite::Result<T> {
    let raw: String = row.get(column)?;
    serde_json::from_str(&raw).map_err(|e| {
        let idx = row.as_ref().column_index(column).unwrap_or(0);
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
    })
}

fn timestamp_column(row: &Row, column: &str) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(column)?;
    Ok(DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now()))
}

trait OptionalExt<T> {
    fn optional(self) -> rusqlite::Result<Option<T>>;
}

impl<T> OptionalExt<T> for rusqlite::Result<T> {
    fn optional(self) -> rusqlite::Result<Option<T>> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DiseaseSign, ProductType, QueenStatus};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn insert_raw_hive_id(db: &Database, id: &str) {
        db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO hives (id, beekeeper, payload) VALUES (?1, 'alice', '{}')",
                [id],
            )?;
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn hive_ids_are_sequential() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.with_conn(next_hive_id).unwrap(), "H0001");

        let first = db.create_hive("alice", &HiveSnapshot::default()).unwrap();
        let second = db.create_hive("bob", &HiveSnapshot::default()).unwrap();
        assert_eq!(first.id, "H0001");
        assert_eq!(second.id, "H0002");
        assert_eq!(db.with_conn(next_hive_id).unwrap(), "H0003");
    }

    #[test]
    fn hive_ids_continue_past_gaps_and_skip_foreign_ids() {
        let db = Database::open_in_memory().unwrap();
        insert_raw_hive_id(&db, "H0041");
        insert_raw_hive_id(&db, "legacy-7");

        let hive = db.create_hive("alice", &HiveSnapshot::default()).unwrap();
        assert_eq!(hive.id, "H0042");
    }

    #[test]
    fn exhausted_hive_sequence_is_an_error() {
        let db = Database::open_in_memory().unwrap();
        insert_raw_hive_id(&db, &format!("H{}", u32::MAX));

        assert!(matches!(
            db.create_hive("alice", &HiveSnapshot::default()),
            Err(HiveOpsError::InvalidData(_))
        ));
    }

    #[test]
    fn hive_round_trip_preserves_snapshot() {
        let db = Database::open_in_memory().unwrap();
        let snapshot = HiveSnapshot::default()
            .with_strength(2)
            .with_queen_status(QueenStatus::Unknown)
            .with_disease(DiseaseSign::VarroaMites)
            .with_location("City rooftop");

        let hive = db.create_hive("alice", &snapshot).unwrap();
        let loaded = db.get_hive("alice", &hive.id).unwrap().unwrap();
        assert_eq!(loaded.snapshot, snapshot);
        assert_eq!(loaded.beekeeper, "alice");
    }

    #[test]
    fn hives_are_owner_scoped() {
        let db = Database::open_in_memory().unwrap();
        let hive = db.create_hive("alice", &HiveSnapshot::default()).unwrap();

        assert!(db.get_hive("bob", &hive.id).unwrap().is_none());
        assert!(db.list_hives("bob").unwrap().is_empty());
        assert!(matches!(
            db.delete_hive("bob", &hive.id),
            Err(HiveOpsError::NotFound(_))
        ));
        assert!(matches!(
            db.update_hive("bob", &hive.id, &HiveSnapshot::default()),
            Err(HiveOpsError::NotFound(_))
        ));

        db.delete_hive("alice", &hive.id).unwrap();
        assert!(db.list_hives("alice").unwrap().is_empty());
    }

    #[test]
    fn update_hive_replaces_snapshot() {
        let db = Database::open_in_memory().unwrap();
        let hive = db.create_hive("alice", &HiveSnapshot::default()).unwrap();

        let updated = db
            .update_hive(
                "alice",
                &hive.id,
                &HiveSnapshot::default().with_location("windy hill"),
            )
            .unwrap();
        assert_eq!(updated.snapshot.location, "windy hill");
        assert!(updated.updated_at >= hive.updated_at);
    }

    #[test]
    fn products_in_range_oldest_first() {
        let db = Database::open_in_memory().unwrap();
        let make = |name: &str, harvested: NaiveDate| {
            ProductSnapshot::new(name, ProductType::Honey, 30).with_harvest_date(harvested)
        };

        db.create_product("alice", &make("June", date(2024, 6, 20))).unwrap();
        db.create_product("alice", &make("March", date(2024, 3, 1))).unwrap();
        db.create_product("alice", &make("Next year", date(2025, 1, 2))).unwrap();
        db.create_product("bob", &make("Bob's", date(2024, 5, 5))).unwrap();

        let names: Vec<String> = db
            .products_harvested_between("alice", date(2024, 1, 1), date(2024, 12, 31))
            .unwrap()
            .into_iter()
            .map(|p| p.snapshot.product_name)
            .collect();
        assert_eq!(names, vec!["March", "June"]);
        assert_eq!(db.list_products("alice").unwrap().len(), 3);
    }

    #[test]
    fn products_are_owner_scoped() {
        let db = Database::open_in_memory().unwrap();
        let product = db
            .create_product("alice", &ProductSnapshot::new("Raw Honey", ProductType::Honey, 20))
            .unwrap();

        let loaded = db.get_product("alice", product.id).unwrap().unwrap();
        assert_eq!(loaded.snapshot, product.snapshot);
        assert!(db.get_product("bob", product.id).unwrap().is_none());
        assert!(matches!(
            db.update_product("bob", product.id, &ProductSnapshot::default()),
            Err(HiveOpsError::NotFound(_))
        ));
        assert!(matches!(
            db.update_product("alice", product.id + 100, &ProductSnapshot::default()),
            Err(HiveOpsError::NotFound(_))
        ));
    }

    #[test]
    fn update_product_replaces_snapshot_and_harvest_index() {
        let db = Database::open_in_memory().unwrap();
        let product = db
            .create_product(
                "alice",
                &ProductSnapshot::new("Raw Honey", ProductType::Honey, 20)
                    .with_harvest_date(date(2024, 3, 1)),
            )
            .unwrap();

        let updated = db
            .update_product(
                "alice",
                product.id,
                &ProductSnapshot::new("Comb Honey", ProductType::Honey, 35)
                    .with_harvest_date(date(2024, 9, 10)),
            )
            .unwrap();
        assert_eq!(updated.id, product.id);
        assert_eq!(updated.snapshot.product_name, "Comb Honey");
        assert_eq!(updated.snapshot.quantity(), 35);

        let march = db
            .products_harvested_between("alice", date(2024, 3, 1), date(2024, 3, 31))
            .unwrap();
        assert!(march.is_empty());
        let september = db
            .products_harvested_between("alice", date(2024, 9, 1), date(2024, 9, 30))
            .unwrap();
        assert_eq!(september.len(), 1);
    }

    #[test]
    fn unreadable_rows_are_skipped() {
        let db = Database::open_in_memory().unwrap();
        db.create_product(
            "alice",
            &ProductSnapshot::new("Raw Honey", ProductType::Honey, 20)
                .with_harvest_date(date(2024, 5, 1)),
        )
        .unwrap();
        db.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO products (beekeeper, product_name, harvest_date, payload, created_at)
                VALUES ('alice', 'Broken', '2024-05-02', 'not json', '2024-05-02T00:00:00+00:00')
                "#,
                [],
            )?;
            Ok(())
        })
        .unwrap();

        let products = db
            .products_harvested_between("alice", date(2024, 5, 1), date(2024, 5, 31))
            .unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].snapshot.product_name, "Raw Honey");
    }

    #[test]
    fn delete_product_checks_owner() {
        let db = Database::open_in_memory().unwrap();
        let product = db
            .create_product("alice", &ProductSnapshot::new("Wax", ProductType::Beeswax, 4))
            .unwrap();

        assert!(db.delete_product("bob", product.id).is_err());
        db.delete_product("alice", product.id).unwrap();
        assert!(db.list_products("alice").unwrap().is_empty());
    }

    #[test]
    fn recommendations_newest_first() {
        let db = Database::open_in_memory().unwrap();
        let mut older = Recommendation::new(SubjectKind::Hive, "H0001", "alice", "older");
        older.created_at = Utc::now() - chrono::Duration::days(1);
        let newer = Recommendation::new(SubjectKind::Product, "7", "alice", "newer");

        db.save_recommendation(&older).unwrap();
        db.save_recommendation(&newer).unwrap();
        db.save_recommendation(&Recommendation::new(SubjectKind::Hive, "H0009", "bob", "x"))
            .unwrap();

        let recs = db.list_recommendations("alice").unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].recommendations, "newer");
        assert_eq!(recs[0].subject_kind, SubjectKind::Product);
        assert_eq!(recs[1].subject_id, "H0001");
    }
}
