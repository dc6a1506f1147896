use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use railmap_engine::scene::{PrimitiveId, Surface};

use crate::config::Config;
use crate::model::TrainsResponse;
use crate::projection::MapHost;
use crate::renderer::TrainRenderer;

/// What one [`TrainLayer::sync`] changed.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct SyncStats {
    pub created: usize,
    pub updated: usize,
    pub removed: usize,
}

/// Map overlay container: one [`Surface`] per tracked train id.
#[derive(Debug)]
pub struct TrainLayer {
    renderer: TrainRenderer,
    surfaces: HashMap<String, Surface>,
}

impl TrainLayer {
    pub fn new(config: Arc<Config>) -> Self {
        Self { renderer: TrainRenderer::new(config), surfaces: HashMap::new() }
    }

    #[inline]
    pub fn renderer(&self) -> &TrainRenderer {
        &self.renderer
    }

    /// Brings the layer in line with `snapshot`.
    ///
    /// New trains get a surface, every listed train is updated, and trains missing
    /// from the snapshot are dropped together with their surfaces.
    pub fn sync(&mut self, snapshot: &TrainsResponse, host: &dyn MapHost) -> SyncStats {
        let mut stats = SyncStats::default();
        let mut seen: HashSet<&str> = HashSet::with_capacity(snapshot.trains.len());

        for train in &snapshot.trains {
            if !seen.insert(train.id.as_str()) {
                log::warn!("snapshot lists train {} more than once", train.id);
            }

            let surface = self.surfaces.entry(train.id.clone()).or_insert_with(|| {
                stats.created += 1;
                self.renderer.create(train)
            });
            self.renderer.update(train, surface, host);
            stats.updated += 1;
        }

        let before = self.surfaces.len();
        self.surfaces.retain(|id, _| seen.contains(id.as_str()));
        stats.removed = before - self.surfaces.len();

        log::debug!(
            "layer sync: {} created, {} updated, {} removed",
            stats.created,
            stats.updated,
            stats.removed,
        );
        stats
    }

    pub fn get(&self, id: &str) -> Option<&Surface> {
        self.surfaces.get(id)
    }

    /// Tracked surfaces in unspecified order.
    pub fn surfaces(&self) -> impl Iterator<Item = (&str, &Surface)> {
        self.surfaces.iter().map(|(id, s)| (id.as_str(), s))
    }

    /// Ids of every primitive currently owned by the layer.
    pub fn primitive_ids(&self) -> HashSet<PrimitiveId> {
        self.surfaces
            .values()
            .flat_map(|s| s.slots())
            .flat_map(|slot| [slot.visible.id(), slot.hidden.id()])
            .collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use railmap_engine::coords::{LatLng, Point3};

    use super::*;
    use crate::model::{Car, Location, Train};

    struct TestMap;

    impl MapHost for TestMap {
        fn world_name(&self) -> &str {
            "world"
        }

        fn to_lat_lng(&self, p: Point3) -> LatLng {
            LatLng::with_alt(p.x, p.z, p.y)
        }
    }

    fn train(id: &str, cars: usize) -> Train {
        let dim = Config::default().worlds["world"].clone();
        Train {
            id: id.into(),
            name: String::new(),
            owner: None,
            cars: (0..cars as u64)
                .map(|i| Car {
                    id: i,
                    leading: Location::new(dim.clone(), Point3::new(0.0, 64.0, -(i as f64) * 8.0)),
                    trailing: Location::new(dim.clone(), Point3::new(0.0, 64.0, -(i as f64) * 8.0 - 6.0)),
                })
                .collect(),
            backwards: false,
            stopped: false,
        }
    }

    fn snapshot(trains: Vec<Train>) -> TrainsResponse {
        TrainsResponse { trains }
    }

    fn layer() -> TrainLayer {
        TrainLayer::new(Arc::new(Config::default()))
    }

    #[test]
    fn new_trains_get_a_surface() {
        let mut l = layer();
        let stats = l.sync(&snapshot(vec![train("a", 2), train("b", 1)]), &TestMap);
        assert_eq!(stats, SyncStats { created: 2, updated: 2, removed: 0 });
        assert_eq!(l.len(), 2);
        assert_eq!(l.get("a").map(Surface::slot_count), Some(2));
    }

    #[test]
    fn known_trains_are_updated_in_place() {
        let mut l = layer();
        l.sync(&snapshot(vec![train("a", 1)]), &TestMap);
        let id = l.get("a").map(|s| s.slots()[0].visible.id());

        let stats = l.sync(&snapshot(vec![train("a", 2)]), &TestMap);
        assert_eq!(stats.created, 0);
        assert_eq!(l.get("a").map(|s| s.slots()[0].visible.id()), id);
        assert_eq!(l.get("a").map(Surface::slot_count), Some(2));
    }

    #[test]
    fn departed_trains_are_dropped() {
        let mut l = layer();
        l.sync(&snapshot(vec![train("a", 1), train("b", 1)]), &TestMap);
        let stats = l.sync(&snapshot(vec![train("b", 1)]), &TestMap);

        assert_eq!(stats.removed, 1);
        assert!(l.get("a").is_none());
        assert!(l.get("b").is_some());
    }

    #[test]
    fn empty_snapshot_clears_layer() {
        let mut l = layer();
        l.sync(&snapshot(vec![train("a", 3)]), &TestMap);
        l.sync(&TrainsResponse::default(), &TestMap);
        assert!(l.is_empty());
        assert!(l.primitive_ids().is_empty());
    }

    #[test]
    fn primitive_ids_cover_both_halves_of_every_slot() {
        let mut l = layer();
        l.sync(&snapshot(vec![train("a", 2), train("b", 1)]), &TestMap);
        assert_eq!(l.primitive_ids().len(), 6);
    }
}
