//! Zone Repository

use super::{Affected, BaseRepository, RepoResult, ZoneStore};
use async_trait::async_trait;
use serde::Serialize;
use shared::models::Zone;
use shared::util::name_key;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const ZONE_FIELDS: &str = "meta::id(id) AS id, event_id, venue_id, template_zone_id, name, \
     name_key, kind, capacity, numbering, price, status, created_at, updated_at";

/// Mutable part of a zone document, written with MERGE
#[derive(Debug, Serialize)]
struct ZoneChanges {
    name: String,
    name_key: String,
    price: Option<f64>,
    status: String,
    updated_at: i64,
}

#[derive(Clone)]
pub struct ZoneRepository {
    base: BaseRepository,
}

impl ZoneRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl ZoneStore for ZoneRepository {
    async fn create(&self, zone: Zone) -> RepoResult<()> {
        self.base
            .db()
            .query("INSERT INTO zone $data RETURN NONE")
            .bind(("data", zone))
            .await?
            .check()?;
        Ok(())
    }

    async fn find(&self, event_id: &str, zone_id: &str) -> RepoResult<Option<Zone>> {
        let zones: Vec<Zone> = self
            .base
            .db()
            .query(format!(
                "SELECT {ZONE_FIELDS} FROM type::thing('zone', $zone_id) WHERE event_id = $event_id"
            ))
            .bind(("zone_id", zone_id.to_string()))
            .bind(("event_id", event_id.to_string()))
            .await?
            .take(0)?;
        Ok(zones.into_iter().next())
    }

    async fn list_by_event(&self, event_id: &str) -> RepoResult<Vec<Zone>> {
        let zones: Vec<Zone> = self
            .base
            .db()
            .query(format!(
                "SELECT {ZONE_FIELDS} FROM zone WHERE event_id = $event_id ORDER BY created_at, name"
            ))
            .bind(("event_id", event_id.to_string()))
            .await?
            .take(0)?;
        Ok(zones)
    }

    async fn update(&self, zone: &Zone) -> RepoResult<bool> {
        let changes = ZoneChanges {
            name: zone.name.clone(),
            name_key: zone.name_key.clone(),
            price: zone.price,
            status: zone.status.clone(),
            updated_at: zone.updated_at,
        };
        let touched: Vec<Affected> = self
            .base
            .db()
            .query(
                "UPDATE type::thing('zone', $zone_id) MERGE $changes \
                 WHERE event_id = $event_id RETURN event_id",
            )
            .bind(("zone_id", zone.id.clone()))
            .bind(("event_id", zone.event_id.clone()))
            .bind(("changes", changes))
            .await?
            .take(0)?;
        Ok(!touched.is_empty())
    }

    async fn delete(&self, event_id: &str, zone_id: &str) -> RepoResult<bool> {
        let removed: Vec<Affected> = self
            .base
            .db()
            .query(
                "DELETE type::thing('zone', $zone_id) WHERE event_id = $event_id RETURN BEFORE",
            )
            .bind(("zone_id", zone_id.to_string()))
            .bind(("event_id", event_id.to_string()))
            .await?
            .take(0)?;
        Ok(!removed.is_empty())
    }

    async fn exists_by_name(&self, event_id: &str, name: &str) -> RepoResult<bool> {
        let found: Vec<Affected> = self
            .base
            .db()
            .query(
                "SELECT event_id FROM zone WHERE event_id = $event_id AND name_key = $name_key LIMIT 1",
            )
            .bind(("event_id", event_id.to_string()))
            .bind(("name_key", name_key(name)))
            .await?
            .take(0)?;
        Ok(!found.is_empty())
    }
}
