//! Zone read side
//!
//! Filters run in memory over the event's zones. Each view gets its
//! placement block (a zeroed, visible default when the block is missing)
//! and, for seated zones only, the seat list when asked for.

use futures::future::try_join_all;
use shared::error::ErrorCode;
use shared::models::{PlacementView, SeatView, Zone, ZoneFilter, ZoneView};

use super::InventoryStores;
use super::error::{InventoryError, InventoryResult, Operation, RepoResultExt};

pub struct ZoneQueryService {
    stores: InventoryStores,
}

impl ZoneQueryService {
    pub fn new(stores: InventoryStores) -> Self {
        Self { stores }
    }

    pub async fn list_zones(
        &self,
        event_id: &str,
        filter: &ZoneFilter,
    ) -> InventoryResult<Vec<ZoneView>> {
        self.try_list_zones(event_id, filter)
            .await
            .inspect_err(|e| e.log_failure(event_id, "*"))
    }

    async fn try_list_zones(
        &self,
        event_id: &str,
        filter: &ZoneFilter,
    ) -> InventoryResult<Vec<ZoneView>> {
        let zones = self
            .stores
            .zones
            .list_by_event(event_id)
            .await
            .during(Operation::ZoneQuery)?;

        let matcher = ZoneMatcher::new(filter);
        let views = zones
            .into_iter()
            .filter(|z| z.event_id == event_id && matcher.matches(z))
            .map(|z| self.assemble(z, filter.include_seats));
        try_join_all(views).await
    }

    /// `NotFound` when the zone does not exist for the event
    pub async fn get_zone(
        &self,
        event_id: &str,
        zone_id: &str,
        include_seats: bool,
    ) -> InventoryResult<ZoneView> {
        self.try_get_zone(event_id, zone_id, include_seats)
            .await
            .inspect_err(|e| e.log_failure(event_id, zone_id))
    }

    async fn try_get_zone(
        &self,
        event_id: &str,
        zone_id: &str,
        include_seats: bool,
    ) -> InventoryResult<ZoneView> {
        let zone = self
            .stores
            .zones
            .find(event_id, zone_id)
            .await
            .during(Operation::ZoneQuery)?
            .filter(|z| z.event_id == event_id)
            .ok_or_else(|| {
                InventoryError::not_found(
                    ErrorCode::ZoneNotFound,
                    format!("Zone {zone_id} not found for event {event_id}"),
                )
            })?;
        self.assemble(zone, include_seats).await
    }

    /// Seats of (event, zone), row-major.
    ///
    /// Empty when the zone has none or does not exist for the event.
    pub async fn list_seats(&self, event_id: &str, zone_id: &str) -> InventoryResult<Vec<SeatView>> {
        self.try_list_seats(event_id, zone_id)
            .await
            .inspect_err(|e| e.log_failure(event_id, zone_id))
    }

    async fn try_list_seats(&self, event_id: &str, zone_id: &str) -> InventoryResult<Vec<SeatView>> {
        if !self.zone_exists(event_id, zone_id).await? {
            return Ok(Vec::new());
        }
        self.seats_of(event_id, zone_id).await
    }

    /// 0 when the zone does not exist for the event
    pub async fn count_seats(&self, event_id: &str, zone_id: &str) -> InventoryResult<u64> {
        self.try_count_seats(event_id, zone_id)
            .await
            .inspect_err(|e| e.log_failure(event_id, zone_id))
    }

    async fn try_count_seats(&self, event_id: &str, zone_id: &str) -> InventoryResult<u64> {
        if !self.zone_exists(event_id, zone_id).await? {
            return Ok(0);
        }
        self.stores
            .seats
            .count_by_zone(event_id, zone_id)
            .await
            .during(Operation::SeatQuery)
    }

    /// Seats left behind by a removed zone never count as inventory
    async fn zone_exists(&self, event_id: &str, zone_id: &str) -> InventoryResult<bool> {
        let zone = self
            .stores
            .zones
            .find(event_id, zone_id)
            .await
            .during(Operation::SeatQuery)?;
        Ok(zone.is_some_and(|z| z.event_id == event_id))
    }

    async fn seats_of(&self, event_id: &str, zone_id: &str) -> InventoryResult<Vec<SeatView>> {
        let seats = self
            .stores
            .seats
            .list_by_zone(event_id, zone_id)
            .await
            .during(Operation::SeatQuery)?;
        Ok(seats
            .into_iter()
            .filter(|s| s.belongs_to(event_id, zone_id))
            .map(SeatView::from)
            .collect())
    }

    async fn assemble(&self, zone: Zone, include_seats: bool) -> InventoryResult<ZoneView> {
        let placement = self
            .stores
            .placements
            .find_by_zone(&zone.event_id, &zone.id)
            .await
            .during(Operation::ZoneQuery)?
            .filter(|p| p.event_id == zone.event_id && p.zone_id == zone.id)
            .map(PlacementView::from)
            .unwrap_or_default();

        let seats = if include_seats && zone.kind.is_seated() {
            Some(self.seats_of(&zone.event_id, &zone.id).await?)
        } else {
            None
        };
        let has_seats = match &seats {
            Some(list) => !list.is_empty(),
            None => self
                .stores
                .seats
                .exists_for_zone(&zone.event_id, &zone.id)
                .await
                .during(Operation::SeatQuery)?,
        };

        Ok(ZoneView {
            zone,
            placement,
            has_seats,
            seats,
        })
    }
}

/// Case-insensitive in-memory filter; blank criteria match everything
struct ZoneMatcher {
    kind: Option<String>,
    status: Option<String>,
    search: Option<String>,
}

impl ZoneMatcher {
    fn new(filter: &ZoneFilter) -> Self {
        let normalize = |v: &Option<String>| {
            v.as_deref()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
        };
        Self {
            kind: normalize(&filter.kind),
            status: normalize(&filter.status),
            search: normalize(&filter.search),
        }
    }

    fn matches(&self, zone: &Zone) -> bool {
        if let Some(kind) = &self.kind
            && zone.kind.as_str() != kind.as_str()
        {
            return false;
        }
        if let Some(status) = &self.status
            && zone.status.to_lowercase() != *status
        {
            return false;
        }
        if let Some(search) = &self.search
            && !zone.name.to_lowercase().contains(search.as_str())
        {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{PlacementStore, SeatStore, ZoneStore};
    use crate::inventory::ZoneLifecycleManager;
    use crate::inventory::test_support::{EVENT, Fixture, general_zone, seated_zone};
    use shared::models::{GridRect, SEAT_STATUS_AVAILABLE, Seat, ZoneUpdate};

    async fn setup() -> (Fixture, ZoneQueryService, String, String) {
        let fx = Fixture::new();
        let zones = ZoneLifecycleManager::new(fx.stores.clone());
        let platea = zones
            .create_zone(seated_zone("Platea Central", 2, 3, 6))
            .await
            .unwrap();
        let pista = zones.create_zone(general_zone("Pista", 800)).await.unwrap();
        zones
            .update_zone(
                EVENT,
                &pista,
                ZoneUpdate {
                    status: Some("oculta".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let query = ZoneQueryService::new(fx.stores.clone());
        (fx, query, platea, pista)
    }

    fn filter(kind: Option<&str>, status: Option<&str>, search: Option<&str>) -> ZoneFilter {
        ZoneFilter {
            kind: kind.map(String::from),
            status: status.map(String::from),
            search: search.map(String::from),
            include_seats: false,
        }
    }

    #[tokio::test]
    async fn test_list_filters_are_case_insensitive() {
        let (_fx, q, platea, pista) = setup().await;

        let all = q.list_zones(EVENT, &ZoneFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);

        let seated = q.list_zones(EVENT, &filter(Some("SENTADO"), None, None)).await.unwrap();
        assert_eq!(seated.len(), 1);
        assert_eq!(seated[0].zone.id, platea);

        let hidden = q.list_zones(EVENT, &filter(None, Some("Oculta"), None)).await.unwrap();
        assert_eq!(hidden.len(), 1);
        assert_eq!(hidden[0].zone.id, pista);

        let search = q.list_zones(EVENT, &filter(None, None, Some("central"))).await.unwrap();
        assert_eq!(search.len(), 1);

        let blank = q.list_zones(EVENT, &filter(Some("  "), None, None)).await.unwrap();
        assert_eq!(blank.len(), 2);

        let none = q.list_zones("e2", &ZoneFilter::default()).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_seats_only_attached_to_seated_zones() {
        let (_fx, q, platea, pista) = setup().await;
        let with_seats = ZoneFilter {
            include_seats: true,
            ..Default::default()
        };

        let views = q.list_zones(EVENT, &with_seats).await.unwrap();
        let p = views.iter().find(|v| v.zone.id == platea).unwrap();
        let g = views.iter().find(|v| v.zone.id == pista).unwrap();
        assert_eq!(p.seats.as_ref().map(Vec::len), Some(6));
        assert!(p.has_seats);
        assert!(g.seats.is_none());
        assert!(!g.has_seats);

        let without = q.get_zone(EVENT, &platea, false).await.unwrap();
        assert!(without.seats.is_none());
        assert!(without.has_seats);
    }

    #[tokio::test]
    async fn test_missing_placement_defaults() {
        let (fx, q, platea, _) = setup().await;
        fx.placements.delete_by_zone(EVENT, &platea).await.unwrap();

        let view = q.get_zone(EVENT, &platea, false).await.unwrap();
        assert_eq!(view.placement.grid, GridRect::default());
        assert!(view.placement.visible);
        assert!(view.placement.color.is_none());
    }

    #[tokio::test]
    async fn test_get_zone_not_found() {
        let (_fx, q, platea, _) = setup().await;
        let err = q.get_zone("e2", &platea, true).await.unwrap_err();
        assert!(matches!(
            err,
            InventoryError::NotFound {
                code: ErrorCode::ZoneNotFound,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_list_and_count_seats() {
        let (_fx, q, platea, pista) = setup().await;
        let seats = q.list_seats(EVENT, &platea).await.unwrap();
        let labels: Vec<_> = seats.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["A-1", "A-2", "A-3", "B-1", "B-2", "B-3"]);
        assert_eq!(q.count_seats(EVENT, &platea).await.unwrap(), 6);

        assert!(q.list_seats(EVENT, &pista).await.unwrap().is_empty());
        assert_eq!(q.count_seats("e2", &platea).await.unwrap(), 0);
    }

    fn stray_seat(zone_id: &str, label: &str) -> Seat {
        Seat {
            id: format!("stray-{label}"),
            event_id: EVENT.into(),
            zone_id: zone_id.into(),
            row_index: None,
            column_index: None,
            label: label.into(),
            status: SEAT_STATUS_AVAILABLE.into(),
            metadata: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[tokio::test]
    async fn test_seats_without_zone_are_not_inventory() {
        let (fx, q, platea, _) = setup().await;
        fx.seats.create(stray_seat("ghost-zone", "X-1")).await.unwrap();

        assert!(q.list_seats(EVENT, "ghost-zone").await.unwrap().is_empty());
        assert_eq!(q.count_seats(EVENT, "ghost-zone").await.unwrap(), 0);

        // zone row removed behind the manager's back, seats left in place
        assert!(fx.zones.delete(EVENT, &platea).await.unwrap());
        assert!(q.list_seats(EVENT, &platea).await.unwrap().is_empty());
        assert_eq!(q.count_seats(EVENT, &platea).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_query_failure_is_wrapped() {
        let (fx, q, platea, _) = setup().await;
        fx.seats.break_store();
        let err = q.list_seats(EVENT, &platea).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::SeatQueryFailed);
    }
}
