//! Train geometry: car outlines, direction arrow, styling and overlay placement.

use std::sync::Arc;

use railmap_engine::coords::{directional_vector, perpendicular_vector, GeoBounds, Point3};
use railmap_engine::paint::Paint;
use railmap_engine::scene::{Path, Style, Surface, Transition};

use crate::config::Config;
use crate::model::Train;
use crate::projection::MapHost;

/// Lowers the geometry one block so cars sit on the track instead of above it.
pub const TRAIN_OFFSET: Point3 = Point3::new(0.0, -1.0, 0.0);

/// Which end of a car carries the direction arrow.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Arrow {
    /// Tip ahead of the leading end.
    Forward,
    /// Tip behind the trailing end.
    Backward,
}

/// World-space outline of one car.
///
/// Returns the quad `[leading+side+fwd, leading-side+fwd, trailing-side-fwd, trailing+side-fwd]`
/// where `fwd` is half a block along the car's heading and `side` is half of `width`
/// across it. With an arrow, a fifth vertex one `width` beyond the tip end is inserted
/// between that end's two corners.
pub fn car_outline(leading: Point3, trailing: Point3, width: f64, arrow: Option<Arrow>) -> Vec<Point3> {
    let heading = directional_vector(trailing, leading, 1.0);
    let fwd = heading * 0.5;
    let side = perpendicular_vector(heading) * (width * 0.5);

    let neg_fwd = fwd.mul_mask(Point3::NEG_POS);
    let neg_side = side.mul_mask(Point3::NEG_POS);

    let mut points = vec![
        leading + side + fwd,
        leading + neg_side + fwd,
        trailing + neg_side + neg_fwd,
        trailing + side + neg_fwd,
    ];

    match arrow {
        Some(Arrow::Forward) => points.insert(1, leading + heading * width),
        Some(Arrow::Backward) => points.insert(3, trailing + heading.mul_mask(Point3::NEG_POS) * width),
        None => {}
    }

    points
}

/// Builds and incrementally updates one overlay [`Surface`] per train.
#[derive(Debug, Clone)]
pub struct TrainRenderer {
    config: Arc<Config>,
}

impl TrainRenderer {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Creates the empty surface for `train`. Cars are added by [`update`](Self::update).
    pub fn create(&self, train: &Train) -> Surface {
        log::debug!("creating surface for train {} ({:?})", train.id, train.name);
        Surface::new(GeoBounds::placeholder())
    }

    /// Rewrites `surface` to show `train` as projected by `host`.
    ///
    /// Slot `i` always belongs to car `i`. Existing primitives are reused; slots
    /// are only appended. Cars outside the map's dimension are skipped and keep
    /// whatever they showed before.
    pub fn update(&self, train: &Train, surface: &mut Surface, host: &dyn MapHost) {
        let Some(first) = train.cars.first() else {
            log::warn!("train {} has no cars; leaving its overlay unchanged", train.id);
            return;
        };

        let dimension = self.config.dimension_for(host.world_name());
        let lead = train.lead_car_index();
        let transition = Transition::linear(self.config.transition());

        for (i, car) in train.cars.iter().enumerate() {
            let Some(dimension) = dimension else {
                log::trace!("world {:?} has no dimension; skipping car {}", host.world_name(), car.id);
                continue;
            };
            if car.leading.dimension != dimension || car.trailing.dimension != dimension {
                log::trace!("train {} car {} is not in {dimension}", train.id, car.id);
                continue;
            }

            let is_lead = lead == Some(i);
            let arrow = is_lead.then_some(if train.backwards { Arrow::Backward } else { Arrow::Forward });

            let outline = car_outline(
                car.leading.position,
                car.trailing.position,
                self.config.train_width,
                arrow,
            );
            let path = Path::new(
                outline
                    .into_iter()
                    .map(|p| host.to_lat_lng(p + TRAIN_OFFSET))
                    .collect(),
            );

            let fill = if is_lead { self.config.lead_car_color } else { self.config.train_color };

            let slot = surface.ensure_slot(i);
            slot.visible.set_style(Style {
                fill: Paint::Solid(fill),
                opacity: 1.0,
                transition: Some(transition),
            });
            slot.hidden.set_path(path.clone());
            slot.visible.set_path(path);
        }

        let cleared = surface.clear_slots_from(train.cars.len());
        if cleared > 0 {
            log::debug!("train {} lost {cleared} car(s); slots cleared", train.id);
        }

        self.place(surface, host.to_lat_lng(first.leading.position).alt);
    }

    /// Fits the view box, rotation pivot and map bounds to the surface's current paths.
    fn place(&self, surface: &mut Surface, alt: Option<f64>) {
        let Some(inner) = surface.hidden_bbox() else {
            return;
        };

        surface.set_view_box(surface.content_bbox().unwrap_or(inner));
        surface.set_transform_origin(inner.center());
        surface.set_bounds(GeoBounds::from_rect(inner, alt));
    }
}
