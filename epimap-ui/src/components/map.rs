//! World Map Component
//!
//! Draws the projected world map on an HTML5 Canvas: country outlines
//! from a GeoJSON asset, one proportional marker per country, a hover
//! tooltip, and a callout annotation on the hotspot country.
//!
//! Every redraw starts from a cleared canvas, so no markers from a
//! previously selected date survive a reload.

use leptos::*;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::state::global::{format_count, CountrySummary, GlobalState};

/// Canvas dimensions
const WIDTH: f64 = 1200.0;
const HEIGHT: f64 = 800.0;

/// Projection scale
const SCALE: f64 = 200.0;

/// Mercator blows up at the poles; clamp latitudes like d3 does
const MAX_LAT: f64 = 85.0511;

const OCEAN_FILL: &str = "#1f2937"; // gray-800
const LAND_FILL: &str = "#cccccc";
const LAND_STROKE: &str = "#333333";
const GRID_STROKE: &str = "#374151"; // gray-700
const MARKER_FILL: &str = "rgba(239, 68, 68, 0.55)"; // red-500
const MARKER_STROKE: &str = "#b91c1c"; // red-700
const ANNOTATION_COLOR: &str = "#ef4444"; // red-500

/// Web Mercator projection translated to the canvas center
#[derive(Clone, Copy)]
pub struct Mercator {
    scale: f64,
    tx: f64,
    ty: f64,
}

impl Mercator {
    pub fn new(scale: f64, tx: f64, ty: f64) -> Self {
        Self { scale, tx, ty }
    }

    /// Project (lon, lat) in degrees to canvas coordinates
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let lam = lon.to_radians();
        let phi = lat.clamp(-MAX_LAT, MAX_LAT).to_radians();

        let x = self.tx + self.scale * lam;
        let y = self.ty - self.scale * (std::f64::consts::FRAC_PI_4 + phi / 2.0).tan().ln();
        (x, y)
    }
}

fn map_projection() -> Mercator {
    Mercator::new(SCALE, WIDTH / 2.0, HEIGHT / 2.0)
}

// ============ World outlines (GeoJSON) ============

/// A closed ring of (lon, lat) positions
type Ring = Vec<(f64, f64)>;

#[derive(serde::Deserialize)]
struct WorldGeo {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(serde::Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
}

#[derive(serde::Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Vec<f64>>>> },
    #[serde(other)]
    Other,
}

/// Flatten a GeoJSON feature collection into plain outline rings
fn collect_rings(world: WorldGeo) -> Vec<Ring> {
    fn ring_of(positions: Vec<Vec<f64>>) -> Option<Ring> {
        let ring: Ring = positions
            .into_iter()
            .filter_map(|p| match p.as_slice() {
                [lon, lat, ..] => Some((*lon, *lat)),
                _ => None,
            })
            .collect();
        (ring.len() >= 3).then_some(ring)
    }

    let mut rings = Vec::new();
    for feature in world.features {
        match feature.geometry {
            Some(Geometry::Polygon { coordinates }) => {
                rings.extend(coordinates.into_iter().filter_map(ring_of));
            }
            Some(Geometry::MultiPolygon { coordinates }) => {
                for polygon in coordinates {
                    rings.extend(polygon.into_iter().filter_map(ring_of));
                }
            }
            _ => {}
        }
    }
    rings
}

/// Fetch the world outline asset; `None` if unavailable
async fn fetch_world() -> Option<Vec<Ring>> {
    let response = gloo_net::http::Request::get("assets/world.geojson")
        .send()
        .await
        .ok()?;
    if !response.ok() {
        return None;
    }
    let world: WorldGeo = response.json().await.ok()?;
    Some(collect_rings(world))
}

// ============ Markers ============

/// A marker already placed in canvas coordinates, kept for hit-testing
#[derive(Clone, Debug)]
struct PlacedMarker {
    country: String,
    confirmed: u64,
    deaths: u64,
    x: f64,
    y: f64,
    r: f64,
}

/// Tooltip contents and CSS position within the map container
#[derive(Clone, Debug)]
struct TooltipState {
    country: String,
    confirmed: u64,
    deaths: u64,
    left: i32,
    top: i32,
}

/// World map with proportional per-country markers
#[component]
pub fn WorldMap() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();

    let world = create_rw_signal(None::<Rc<Vec<Ring>>>);
    let markers = create_rw_signal(Vec::<PlacedMarker>::new());
    let tooltip = create_rw_signal(None::<TooltipState>);

    // Fetch country outlines once; markers render fine without them
    spawn_local(async move {
        match fetch_world().await {
            Some(rings) => world.set(Some(Rc::new(rings))),
            None => {
                web_sys::console::warn_1(
                    &"assets/world.geojson missing, drawing graticule only".into(),
                );
            }
        }
    });

    // Redraw whenever the snapshot or the outlines change
    let state_for_draw = state.clone();
    create_effect(move |_| {
        let countries = state_for_draw.countries.get();
        let hotspot = state_for_draw.hotspot.get();
        let rings = world.get();

        if let Some(canvas) = canvas_ref.get() {
            tooltip.set(None);
            let placed = draw_map(&canvas, rings.as_deref(), &countries, hotspot.as_deref());
            markers.set(placed);
        }
    });

    let on_mousemove = move |ev: web_sys::MouseEvent| {
        let Some(canvas) = canvas_ref.get() else {
            tooltip.set(None);
            return;
        };

        // Canvas is CSS-scaled; convert event offsets to canvas space
        let rect = canvas.get_bounding_client_rect();
        if rect.width() <= 0.0 {
            return;
        }
        let sx = WIDTH / rect.width();
        let sy = HEIGHT / rect.height();
        let x = ev.offset_x() as f64 * sx;
        let y = ev.offset_y() as f64 * sy;

        let hit = markers.with(|placed| {
            // Topmost marker wins: scan in reverse draw order
            placed.iter().rev().find(|m| {
                let hit_r = m.r.max(3.0);
                let (dx, dy) = (x - m.x, y - m.y);
                dx * dx + dy * dy <= hit_r * hit_r
            }).cloned()
        });

        match hit {
            Some(marker) => tooltip.set(Some(TooltipState {
                country: marker.country,
                confirmed: marker.confirmed,
                deaths: marker.deaths,
                left: ev.offset_x() + 5,
                top: ev.offset_y() - 28,
            })),
            None => tooltip.set(None),
        }
    };

    view! {
        <div class="relative">
            <canvas
                node_ref=canvas_ref
                width="1200"
                height="800"
                class="w-full rounded-lg"
                on:mousemove=on_mousemove
                on:mouseleave=move |_| tooltip.set(None)
            />

            // Single tooltip element, repositioned on hover
            {move || {
                tooltip.get().map(|t| view! {
                    <div
                        class="absolute pointer-events-none bg-gray-900 border border-gray-600 rounded px-3 py-2 text-sm z-10"
                        style=format!("left: {}px; top: {}px", t.left, t.top)
                    >
                        <div class="font-semibold">{t.country}</div>
                        <div>"Confirmed: " {format_count(t.confirmed)}</div>
                        <div>"Deaths: " {format_count(t.deaths)}</div>
                    </div>
                })
            }}
        </div>
    }
}

/// Draw one full frame; returns the placed markers for hit-testing
fn draw_map(
    canvas: &HtmlCanvasElement,
    rings: Option<&Vec<Ring>>,
    countries: &[CountrySummary],
    hotspot: Option<&str>,
) -> Vec<PlacedMarker> {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    let projection = map_projection();

    // Clear previous frame
    ctx.set_fill_style(&OCEAN_FILL.into());
    ctx.fill_rect(0.0, 0.0, WIDTH, HEIGHT);

    match rings {
        Some(rings) => draw_outlines(&ctx, &projection, rings),
        None => draw_graticule(&ctx, &projection),
    }

    let placed = draw_markers(&ctx, &projection, countries);

    if let Some(name) = hotspot {
        if let Some(target) = placed.iter().find(|m| m.country == name) {
            draw_annotation(&ctx, target);
        }
    }

    placed
}

/// Country outlines from the GeoJSON rings
fn draw_outlines(ctx: &CanvasRenderingContext2d, projection: &Mercator, rings: &[Ring]) {
    ctx.set_fill_style(&LAND_FILL.into());
    ctx.set_stroke_style(&LAND_STROKE.into());
    ctx.set_line_width(0.5);

    for ring in rings {
        ctx.begin_path();
        for (i, (lon, lat)) in ring.iter().enumerate() {
            let (x, y) = projection.project(*lon, *lat);
            if i == 0 {
                ctx.move_to(x, y);
            } else {
                ctx.line_to(x, y);
            }
        }
        ctx.close_path();
        ctx.fill();
        ctx.stroke();
    }
}

/// Fallback base layer when no outline asset is available
fn draw_graticule(ctx: &CanvasRenderingContext2d, projection: &Mercator) {
    ctx.set_stroke_style(&GRID_STROKE.into());
    ctx.set_line_width(1.0);

    for lon in (-180..=180).step_by(30) {
        ctx.begin_path();
        let (x, y0) = projection.project(lon as f64, MAX_LAT);
        let (_, y1) = projection.project(lon as f64, -MAX_LAT);
        ctx.move_to(x, y0);
        ctx.line_to(x, y1);
        ctx.stroke();
    }

    for lat in (-60..=80).step_by(20) {
        ctx.begin_path();
        let (x0, y) = projection.project(-180.0, lat as f64);
        let (x1, _) = projection.project(180.0, lat as f64);
        ctx.move_to(x0, y);
        ctx.line_to(x1, y);
        ctx.stroke();
    }
}

/// One circle per country, area keyed to confirmed cases via sqrt
fn draw_markers(
    ctx: &CanvasRenderingContext2d,
    projection: &Mercator,
    countries: &[CountrySummary],
) -> Vec<PlacedMarker> {
    ctx.set_fill_style(&MARKER_FILL.into());
    ctx.set_stroke_style(&MARKER_STROKE.into());
    ctx.set_line_width(0.5);

    let mut placed = Vec::new();

    for summary in countries {
        let (Some(lat), Some(lon)) = (summary.lat, summary.lon) else {
            continue;
        };

        let (x, y) = projection.project(lon, lat);
        let r = (summary.confirmed as f64).sqrt() / 100.0;
        if r <= 0.0 {
            continue;
        }

        ctx.begin_path();
        let _ = ctx.arc(x, y, r, 0.0, std::f64::consts::PI * 2.0);
        ctx.fill();
        ctx.stroke();

        placed.push(PlacedMarker {
            country: summary.country.clone(),
            confirmed: summary.confirmed,
            deaths: summary.deaths,
            x,
            y,
            r,
        });
    }

    placed
}

/// Elbow callout pointing at the hotspot marker
fn draw_annotation(ctx: &CanvasRenderingContext2d, target: &PlacedMarker) {
    let (dx, dy) = (-100.0, 50.0);
    let (ex, ey) = (target.x + dx, target.y + dy);

    ctx.set_stroke_style(&ANNOTATION_COLOR.into());
    ctx.set_fill_style(&ANNOTATION_COLOR.into());
    ctx.set_line_width(1.5);

    // Elbow: diagonal away from the marker, then horizontal to the label
    ctx.begin_path();
    ctx.move_to(target.x, target.y);
    ctx.line_to(target.x + dx / 2.0, ey);
    ctx.line_to(ex, ey);
    ctx.stroke();

    // Arrowhead at the marker end
    let angle = (ey - target.y).atan2(dx / 2.0);
    let (ax, ay) = (target.x, target.y);
    ctx.begin_path();
    ctx.move_to(ax, ay);
    ctx.line_to(
        ax + 10.0 * (angle - 0.4).cos(),
        ay + 10.0 * (angle - 0.4).sin(),
    );
    ctx.line_to(
        ax + 10.0 * (angle + 0.4).cos(),
        ay + 10.0 * (angle + 0.4).sin(),
    );
    ctx.close_path();
    ctx.fill();

    ctx.set_text_align("right");
    ctx.set_font("bold 14px sans-serif");
    let _ = ctx.fill_text("Covid-19", ex - 6.0, ey - 8.0);
    ctx.set_font("13px sans-serif");
    let _ = ctx.fill_text(
        &format!("Highest confirmed cases: {}", target.country),
        ex - 6.0,
        ey + 10.0,
    );
    ctx.set_text_align("left");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_centers_origin() {
        let projection = map_projection();
        let (x, y) = projection.project(0.0, 0.0);
        assert!((x - WIDTH / 2.0).abs() < 1e-9);
        assert!((y - HEIGHT / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_projection_orientation() {
        let projection = map_projection();
        let (x_east, _) = projection.project(10.0, 0.0);
        let (x_west, _) = projection.project(-10.0, 0.0);
        assert!(x_east > x_west);

        let (_, y_north) = projection.project(0.0, 40.0);
        let (_, y_south) = projection.project(0.0, -40.0);
        // Canvas y grows downward
        assert!(y_north < y_south);
    }

    #[test]
    fn test_projection_clamps_poles() {
        let projection = map_projection();
        let (_, y) = projection.project(0.0, 90.0);
        assert!(y.is_finite());
    }

    #[test]
    fn test_collect_rings_handles_both_polygon_kinds() {
        let geojson = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": {"type": "Polygon",
                 "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]}},
                {"type": "Feature", "geometry": {"type": "MultiPolygon",
                 "coordinates": [[[[2.0, 2.0], [3.0, 2.0], [3.0, 3.0], [2.0, 2.0]]]]}},
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [5.0, 5.0]}},
                {"type": "Feature", "geometry": null}
            ]
        }"#;

        let world: WorldGeo = serde_json::from_str(geojson).unwrap();
        let rings = collect_rings(world);
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0][0], (0.0, 0.0));
    }
}
