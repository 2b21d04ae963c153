//! Vendor enrichment: vendor name and distance for each selected item.

use futures::stream::{self, StreamExt};
use tracing::{debug, instrument, warn};

use crate::geo;
use crate::model::{EnrichedItem, GeoPoint, MenuItem, Vendor};
use crate::sources::VendorDirectory;

/// Default fan-out for vendor lookups.
pub const DEFAULT_ENRICH_CONCURRENCY: usize = 8;

/// Enriches `items` for a user at `user`.
///
/// Output has the same length and order as the input. Failed lookups fall back
/// to the raw vendor reference; distances are only computed when both points
/// are known and none of their coordinates is zero.
#[instrument(skip_all, fields(items = items.len(), has_location = user.is_some()))]
pub async fn enrich_items(
    items: Vec<MenuItem>,
    user: Option<GeoPoint>,
    vendors: &dyn VendorDirectory,
    concurrency: usize,
) -> Vec<EnrichedItem> {
    let mut enriched: Vec<(usize, EnrichedItem)> = stream::iter(items.into_iter().enumerate())
        .map(|(idx, item)| async move {
            let vendor = match vendors.get_vendor(&item.vendor_id).await {
                Ok(vendor) => vendor,
                Err(err) => {
                    warn!(vendor_id = %item.vendor_id, error = %err, "vendor lookup failed");
                    None
                }
            };
            (idx, enrich_one(item, vendor.as_ref(), user))
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    enriched.sort_by_key(|(idx, _)| *idx);
    debug!(count = enriched.len(), "items enriched");
    enriched.into_iter().map(|(_, item)| item).collect()
}

/// Builds one enriched item from an already resolved vendor.
pub fn enrich_one(item: MenuItem, vendor: Option<&Vendor>, user: Option<GeoPoint>) -> EnrichedItem {
    let vendor_name = vendor
        .map(|v| v.name.clone())
        .unwrap_or_else(|| item.vendor_id.clone());

    let distance_km = match (user, vendor.and_then(Vendor::location)) {
        (Some(user), Some(at)) if user.is_truthy() && at.is_truthy() => {
            match geo::distance_km(&user, &at) {
                Ok(km) => Some(km),
                Err(err) => {
                    warn!(item_id = %item.id, error = %err, "distance not computed");
                    None
                }
            }
        }
        _ => None,
    };

    EnrichedItem {
        item,
        vendor_name,
        distance_km,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use crate::sources::SourceFuture;
    use std::time::Duration;

    fn item(id: &str, vendor_id: &str) -> MenuItem {
        MenuItem {
            id: id.into(),
            title: format!("Dish {id}"),
            description: None,
            availability: "lunch".into(),
            rating: 4.0,
            vendor_id: vendor_id.into(),
        }
    }

    fn vendor(id: &str, lat: Option<f64>, lng: Option<f64>) -> Vendor {
        Vendor {
            id: id.into(),
            name: format!("Vendor {id}"),
            latitude: lat,
            longitude: lng,
            address: None,
            phone: None,
            category: None,
        }
    }

    /// Directory where `v-slow` answers late, `v-err` fails and `v-none` is unknown.
    struct Directory;

    impl VendorDirectory for Directory {
        fn get_vendor<'a>(&'a self, id: &'a str) -> SourceFuture<'a, Option<Vendor>> {
            Box::pin(async move {
                match id {
                    "v-err" => Err(SourceError::Unavailable("down".into())),
                    "v-none" => Ok(None),
                    "v-slow" => {
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        Ok(Some(vendor(id, Some(13.0), Some(77.6))))
                    }
                    "v-zero" => Ok(Some(vendor(id, Some(0.0), Some(77.6)))),
                    "v-bad" => Ok(Some(vendor(id, Some(123.0), Some(77.6)))),
                    "v-noloc" => Ok(Some(vendor(id, None, Some(77.6)))),
                    _ => Ok(Some(vendor(id, Some(12.9716), Some(77.5946)))),
                }
            })
        }

        fn list_vendors(&self) -> SourceFuture<'_, Vec<Vendor>> {
            Box::pin(async { Ok(Vec::new()) })
        }
    }

    #[tokio::test]
    async fn preserves_order_and_cardinality() {
        let items = vec![
            item("1", "v-slow"),
            item("2", "v-ok"),
            item("3", "v-err"),
            item("4", "v-none"),
        ];
        let user = Some(GeoPoint::new(12.9716, 77.5946));
        for location in [user, None] {
            let out = enrich_items(items.clone(), location, &Directory, 4).await;
            let ids: Vec<_> = out.iter().map(|e| e.item.id.as_str()).collect();
            assert_eq!(ids, ["1", "2", "3", "4"]);
        }
    }

    #[tokio::test]
    async fn failed_lookup_falls_back_to_vendor_reference() {
        let out = enrich_items(
            vec![item("1", "v-err"), item("2", "v-none"), item("3", "v-ok")],
            None,
            &Directory,
            2,
        )
        .await;
        assert_eq!(out[0].vendor_name, "v-err");
        assert_eq!(out[1].vendor_name, "v-none");
        assert_eq!(out[2].vendor_name, "Vendor v-ok");
        assert!(out.iter().all(|e| e.distance_km.is_none()));
    }

    #[tokio::test]
    async fn distance_rules() {
        let user = Some(GeoPoint::new(12.9716, 77.5946));
        let out = enrich_items(
            vec![
                item("same", "v-ok"),
                item("far", "v-slow"),
                item("zero", "v-zero"),
                item("bad", "v-bad"),
                item("noloc", "v-noloc"),
            ],
            user,
            &Directory,
            8,
        )
        .await;

        assert_eq!(out[0].distance_km, Some(0.0));
        let far = out[1].distance_km.unwrap();
        assert!(far > 0.0);
        assert_eq!(far, (far * 100.0).round() / 100.0);
        assert_eq!(out[2].distance_km, None);
        assert_eq!(out[3].distance_km, None);
        assert_eq!(out[4].distance_km, None);
    }

    #[test]
    fn zero_user_coordinate_suppresses_distance() {
        let v = vendor("v", Some(1.0), Some(1.0));
        let e = enrich_one(item("1", "v"), Some(&v), Some(GeoPoint::new(0.0, 1.0)));
        assert_eq!(e.distance_km, None);
        assert_eq!(e.vendor_name, "Vendor v");
    }

    #[tokio::test]
    async fn empty_input_is_empty_output() {
        assert!(enrich_items(Vec::new(), None, &Directory, 0).await.is_empty());
    }
}
