use std::time::Instant;

use railmap_engine::coords::{GeoRect, Vec2, Viewport};
use railmap_engine::core::{App, AppControl, FrameCtx};
use railmap_engine::input::{InputFrame, InputState, Key, MouseButton};
use railmap_engine::paint::Color;
use railmap_engine::render::FillRenderer;
use railmap_engine::scene::{DrawList, PathAnimator, ZIndex};
use railmap_trains::{MapHost, StaticMap, TrainLayer, TrainsResponse};

use crate::camera::MapCamera;
use crate::poller::SnapshotPoller;

/// Logical pixels moved per arrow key press.
const PAN_STEP: f32 = 48.0;

/// Zoom factor per `+`/`-` press.
const ZOOM_STEP: f64 = 1.25;

/// Zoom factor per logical pixel of wheel scroll.
const WHEEL_ZOOM_BASE: f64 = 1.0025;

const BOUNDS_OUTLINE: f32 = 1.0;

fn background() -> Color {
    Color::from_srgb(0.09, 0.10, 0.12, 1.0)
}

fn bounds_color() -> Color {
    Color::from_srgb(0.95, 0.30, 0.35, 0.85)
}

/// Windowed train viewer: polls a snapshot, syncs the layer and paints it.
pub struct Viewer {
    map: StaticMap,
    layer: TrainLayer,
    poller: SnapshotPoller,
    animator: PathAnimator,
    camera: MapCamera,

    draw_list: DrawList,
    fill: FillRenderer,

    show_bounds: bool,
    needs_fit: bool,
}

impl Viewer {
    pub fn new(map: StaticMap, layer: TrainLayer, poller: SnapshotPoller, show_bounds: bool) -> Self {
        Self {
            map,
            layer,
            poller,
            animator: PathAnimator::new(),
            camera: MapCamera::default(),
            draw_list: DrawList::new(),
            fill: FillRenderer::new(),
            show_bounds,
            needs_fit: true,
        }
    }

    fn apply(&mut self, snapshot: &TrainsResponse) {
        let stats = self.layer.sync(snapshot, &self.map);
        if stats.created > 0 || stats.removed > 0 {
            log::info!(
                "{} train(s) on {} (+{} -{})",
                self.layer.len(),
                self.map.world_name(),
                stats.created,
                stats.removed,
            );
        }

        let alive = self.layer.primitive_ids();
        self.animator.retain(|id| alive.contains(&id));
    }

    fn title(&self) -> String {
        format!("railmap: {} train(s) on {}", self.layer.len(), self.map.world_name())
    }

    fn handle_input(
        &mut self,
        input: &InputState,
        frame: &InputFrame,
        vp: Viewport,
        now: Instant,
    ) -> AppControl {
        if frame.pressed(Key::Escape) {
            return AppControl::Exit;
        }

        if frame.pressed(Key::B) {
            self.show_bounds = !self.show_bounds;
            log::debug!("bounds overlay {}", if self.show_bounds { "on" } else { "off" });
        }
        if frame.pressed(Key::R) {
            self.needs_fit = true;
        }
        if frame.pressed(Key::Space) {
            if let Some(snapshot) = self.poller.refresh(now) {
                self.apply(&snapshot);
            }
        }

        let mut pan = Vec2::zero();
        if frame.pressed(Key::ArrowLeft) {
            pan.x += PAN_STEP;
        }
        if frame.pressed(Key::ArrowRight) {
            pan.x -= PAN_STEP;
        }
        if frame.pressed(Key::ArrowUp) {
            pan.y += PAN_STEP;
        }
        if frame.pressed(Key::ArrowDown) {
            pan.y -= PAN_STEP;
        }
        if input.button_down(MouseButton::Left) || input.button_down(MouseButton::Middle) {
            pan = pan + frame.drag;
        }
        if pan != Vec2::zero() {
            self.camera.pan(pan);
        }

        let anchor = input
            .pointer_pos
            .map_or(vp.center(), |(x, y)| Vec2::new(x, y));
        if frame.wheel != 0.0 {
            self.camera.zoom_at(WHEEL_ZOOM_BASE.powf(frame.wheel as f64), anchor, vp);
        }
        if frame.pressed(Key::Plus) {
            self.camera.zoom_at(ZOOM_STEP, vp.center(), vp);
        }
        if frame.pressed(Key::Minus) {
            self.camera.zoom_at(1.0 / ZOOM_STEP, vp.center(), vp);
        }

        AppControl::Continue
    }
}

impl App for Viewer {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let vp = ctx.viewport();
        let now = ctx.time.now;

        if let Some(snapshot) = self.poller.poll(now) {
            self.apply(&snapshot);
            ctx.runtime.set_title(self.title());
        }

        if self.handle_input(ctx.input, ctx.input_frame, vp, now) == AppControl::Exit {
            return AppControl::Exit;
        }

        if self.needs_fit {
            if let Some(extent) = layer_extent(&self.layer) {
                self.camera.fit(extent, vp);
                self.needs_fit = false;
            }
        }

        self.draw_list.clear();
        paint_layer(
            &self.layer,
            &mut self.animator,
            &self.camera,
            vp,
            now,
            self.show_bounds,
            &mut self.draw_list,
        );

        let Self { draw_list, fill, .. } = self;
        ctx.render(background(), |rctx, target| fill.render(rctx, target, draw_list))
    }

    fn on_exit(&mut self) {
        log::info!("viewer closed tracking {} train(s)", self.layer.len());
    }
}

/// Map extent covered by every placed train.
fn layer_extent(layer: &TrainLayer) -> Option<GeoRect> {
    layer
        .surfaces()
        .filter_map(|(_, s)| s.hidden_bbox())
        .fold(None, GeoRect::union_opt)
}

/// Appends the layer's visible primitives (and, optionally, each train's bounds) to `dl`.
///
/// Trains are painted in id order so overlaps are stable between frames.
fn paint_layer(
    layer: &TrainLayer,
    animator: &mut PathAnimator,
    camera: &MapCamera,
    vp: Viewport,
    now: Instant,
    show_bounds: bool,
    dl: &mut DrawList,
) {
    let mut surfaces: Vec<_> = layer.surfaces().collect();
    surfaces.sort_unstable_by_key(|(id, _)| *id);

    dl.push_clip(vp.rect());
    for (i, (_, surface)) in surfaces.iter().enumerate() {
        let z = ZIndex::OVERLAY.above(i as i32);

        for slot in surface.slots() {
            let prim = &slot.visible;
            let path = animator.sample(prim, now);
            let Some(color) = prim.style().fill.resolve(prim.style().opacity) else { continue };
            if path.len() < 3 {
                continue;
            }

            let points = path.points().iter().map(|ll| camera.to_screen(*ll, vp)).collect();
            dl.push_solid_polygon(z, points, color);
        }

        if show_bounds && surface.hidden_bbox().is_some() {
            let r = camera.to_screen_rect(surface.bounds().to_rect(), vp);
            dl.push_rect_outline(ZIndex::DEBUG, r.inflate(BOUNDS_OUTLINE), BOUNDS_OUTLINE, bounds_color());
        }
    }
    dl.pop_clip();
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use railmap_engine::coords::Point3;
    use railmap_engine::scene::DrawCmd;
    use railmap_trains::{Car, Config, DynmapProjection, Location, ProjectionConfig, Train};

    use super::*;

    const VP: Viewport = Viewport::new(800.0, 600.0);

    fn map() -> StaticMap {
        StaticMap::new("world", DynmapProjection::from(&ProjectionConfig::default()))
    }

    fn train(id: &str, cars: usize, dimension: &str) -> Train {
        Train {
            id: id.into(),
            name: String::new(),
            owner: None,
            cars: (0..cars as u64)
                .map(|i| {
                    let z = -(i as f64) * 10.0;
                    Car {
                        id: i,
                        leading: Location::new(dimension, Point3::new(100.0, 64.0, z)),
                        trailing: Location::new(dimension, Point3::new(100.0, 64.0, z - 8.0)),
                    }
                })
                .collect(),
            backwards: false,
            stopped: false,
        }
    }

    fn synced(trains: Vec<Train>) -> TrainLayer {
        let mut layer = TrainLayer::new(Arc::new(Config::default()));
        layer.sync(&TrainsResponse { trains }, &map());
        layer
    }

    fn fitted(layer: &TrainLayer) -> MapCamera {
        let mut cam = MapCamera::default();
        if let Some(extent) = layer_extent(layer) {
            cam.fit(extent, VP);
        }
        cam
    }

    fn count(dl: &DrawList, pred: impl Fn(&DrawCmd) -> bool) -> usize {
        dl.items().iter().filter(|item| pred(&item.cmd)).count()
    }

    fn paint(layer: &TrainLayer, show_bounds: bool) -> DrawList {
        let mut dl = DrawList::new();
        paint_layer(
            layer,
            &mut PathAnimator::new(),
            &fitted(layer),
            VP,
            Instant::now(),
            show_bounds,
            &mut dl,
        );
        dl
    }

    // ── painting ──────────────────────────────────────────────────────────

    #[test]
    fn one_polygon_per_visible_car() {
        let layer = synced(vec![train("a", 3, "minecraft:overworld"), train("b", 1, "minecraft:overworld")]);
        let dl = paint(&layer, false);
        assert_eq!(count(&dl, |c| matches!(c, DrawCmd::Polygon(_))), 4);
        assert_eq!(count(&dl, |c| matches!(c, DrawCmd::Rect(_))), 0);
    }

    #[test]
    fn cars_in_other_dimensions_are_not_painted() {
        let layer = synced(vec![train("a", 2, "minecraft:the_nether")]);
        assert!(paint(&layer, false).items().is_empty());
    }

    #[test]
    fn bounds_overlay_outlines_each_placed_train() {
        let layer = synced(vec![train("a", 2, "minecraft:overworld"), train("b", 1, "minecraft:the_end")]);
        let dl = paint(&layer, true);
        // Four edges for "a"; "b" has no placement.
        assert_eq!(count(&dl, |c| matches!(c, DrawCmd::Rect(_))), 4);
    }

    #[test]
    fn painted_trains_are_clipped_to_the_viewport() {
        let layer = synced(vec![train("a", 1, "minecraft:overworld")]);
        let dl = paint(&layer, false);
        assert!(dl.items().iter().all(|item| item.clip_rect == Some(VP.rect())));
    }

    #[test]
    fn fitted_trains_land_inside_the_viewport() {
        let layer = synced(vec![train("a", 4, "minecraft:overworld")]);
        let dl = paint(&layer, false);
        let bounds = VP.rect();
        for item in dl.items() {
            if let DrawCmd::Polygon(cmd) = &item.cmd {
                assert!(cmd.points.iter().all(|p| bounds.contains(*p)));
            }
        }
    }

    // ── extent ────────────────────────────────────────────────────────────

    #[test]
    fn empty_layer_has_no_extent() {
        assert!(layer_extent(&synced(Vec::new())).is_none());
    }
}
