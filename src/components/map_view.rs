//! Map rendering: records become markers, markers become canvas labels.
//!
//! `markers` is the pure projection from screen state to what the map
//! shows: one pin per record, keyed by the record id, each carrying a
//! callout with the record name and the route its activation leads to.
//! `Viewport` converts between terminal cells and map coordinates so the
//! same geometry drives drawing and mouse hit-testing. `MapView` draws it
//! all on a ratatui `Canvas` over the world coastline map.

use crate::models::{Coordinate, LocationRecord, Region};
use crate::navigation::Route;
use crate::styles::theme;
use ratatui::layout::{Position, Rect};
use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Map, MapResolution};

/// Offset of a callout from its pin, in marker cells: above and to the right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalloutAnchor {
    pub x: f64,
    pub y: f64,
}

pub const CALLOUT_ANCHOR: CalloutAnchor = CalloutAnchor { x: 2.9, y: 0.9 };

/// Pin image. Decorative and identical for every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerIcon {
    Pin,
}

impl MarkerIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            MarkerIcon::Pin => "●",
        }
    }

    pub fn selected_glyph(&self) -> &'static str {
        match self {
            MarkerIcon::Pin => "◉",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Callout {
    pub title: String,
    pub anchor: CalloutAnchor,
    /// Where activating the callout navigates to
    pub on_press: Route,
}

impl Callout {
    /// The bubble text as drawn on the map
    pub fn label(&self) -> String {
        format!(" {} › ", self.title)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    /// Stable identity across re-renders: the record id
    pub key: i64,
    pub coordinate: Coordinate,
    pub icon: MarkerIcon,
    pub callout: Callout,
}

/// One marker per record, in record order.
pub fn markers(records: &[LocationRecord]) -> Vec<MarkerSpec> {
    records
        .iter()
        .map(|record| MarkerSpec {
            key: record.id,
            coordinate: record.coordinate(),
            icon: MarkerIcon::Pin,
            callout: Callout {
                title: record.name.clone(),
                anchor: CALLOUT_ANCHOR,
                on_press: Route::OrphanagesDetails { id: record.id },
            },
        })
        .collect()
}

/// Cell/coordinate mapping for a region drawn into a terminal area.
///
/// Mirrors how the canvas places text labels: positions are scaled over
/// `width - 1` columns and `height - 1` rows and truncated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub region: Region,
    pub area: Rect,
}

impl Viewport {
    pub fn new(region: Region, area: Rect) -> Self {
        Self { region, area }
    }

    fn usable(&self) -> bool {
        self.area.width >= 2 && self.area.height >= 2
    }

    /// Degrees covered by one cell, as (longitude, latitude)
    pub fn cell_degrees(&self) -> Option<(f64, f64)> {
        if !self.usable() {
            return None;
        }
        Some((
            self.region.longitude_delta / f64::from(self.area.width - 1),
            self.region.latitude_delta / f64::from(self.area.height - 1),
        ))
    }

    /// Terminal cell of a coordinate, or `None` when it falls outside the region.
    pub fn to_cell(&self, coordinate: Coordinate) -> Option<Position> {
        if !self.usable() || !self.region.contains(coordinate) {
            return None;
        }
        let [west, _] = self.region.x_bounds();
        let [_, north] = self.region.y_bounds();
        let col = (coordinate.longitude - west) * f64::from(self.area.width - 1)
            / self.region.longitude_delta;
        let row = (north - coordinate.latitude) * f64::from(self.area.height - 1)
            / self.region.latitude_delta;
        Some(Position::new(
            self.area.x + col as u16,
            self.area.y + row as u16,
        ))
    }

    /// Coordinate at the middle of the given terminal cell, or `None`
    /// outside the area.
    pub fn to_coordinate(&self, position: Position) -> Option<Coordinate> {
        if !self.usable() || !self.area.contains(position) {
            return None;
        }
        let [west, _] = self.region.x_bounds();
        let [_, north] = self.region.y_bounds();
        let (lon_step, lat_step) = self.cell_degrees()?;
        let col = f64::from(position.x - self.area.x) + 0.5;
        let row = f64::from(position.y - self.area.y) + 0.5;
        Some(self.region.clamp(Coordinate {
            latitude: north - row * lat_step,
            longitude: west + col * lon_step,
        }))
    }

    /// Where a callout starts, kept inside the region so it is always drawn.
    pub fn callout_position(&self, pin: Coordinate, anchor: CalloutAnchor) -> Coordinate {
        let Some((lon_step, lat_step)) = self.cell_degrees() else {
            return pin;
        };
        self.region.clamp(Coordinate {
            latitude: pin.latitude + anchor.y * lat_step,
            longitude: pin.longitude + anchor.x * lon_step,
        })
    }

    /// Cells covered by a marker's callout bubble (clipped to the area)
    pub fn callout_rect(&self, marker: &MarkerSpec) -> Option<Rect> {
        let start = self.callout_position(marker.coordinate, marker.callout.anchor);
        let cell = self.to_cell(start)?;
        let width = marker.callout.label().chars().count() as u16;
        let available = self.area.right().saturating_sub(cell.x);
        Some(Rect::new(cell.x, cell.y, width.min(available), 1))
    }

    /// Nearest marker within one cell of `position`
    pub fn hit_test<'m>(&self, markers: &'m [MarkerSpec], position: Position) -> Option<&'m MarkerSpec> {
        markers
            .iter()
            .filter_map(|marker| {
                let cell = self.to_cell(marker.coordinate)?;
                let dx = cell.x.abs_diff(position.x);
                let dy = cell.y.abs_diff(position.y);
                (dx <= 1 && dy <= 1).then_some((dx.max(dy), marker))
            })
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, marker)| marker)
    }
}

/// Canvas widget drawing the coastline, the pins, the selected pin's callout
/// and an optional picker crosshair.
pub struct MapView<'a> {
    region: Region,
    markers: &'a [MarkerSpec],
    selected: Option<i64>,
    cursor: Option<Coordinate>,
}

impl<'a> MapView<'a> {
    pub fn new(region: Region, markers: &'a [MarkerSpec]) -> Self {
        Self {
            region,
            markers,
            selected: None,
            cursor: None,
        }
    }

    pub fn selected(mut self, key: Option<i64>) -> Self {
        self.selected = key;
        self
    }

    pub fn cursor(mut self, cursor: Option<Coordinate>) -> Self {
        self.cursor = cursor;
        self
    }
}

impl Widget for MapView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let t = theme();
        let viewport = Viewport::new(self.region, area);
        let selected = self
            .selected
            .and_then(|key| self.markers.iter().find(|m| m.key == key));

        Canvas::default()
            .background_color(t.background)
            .marker(Marker::Braille)
            .x_bounds(self.region.x_bounds())
            .y_bounds(self.region.y_bounds())
            .paint(|ctx| {
                ctx.draw(&Map {
                    color: t.land_color(),
                    resolution: MapResolution::High,
                });
                ctx.layer();

                for marker in self.markers {
                    let glyph = if Some(marker.key) == self.selected {
                        marker.icon.selected_glyph()
                    } else {
                        marker.icon.glyph()
                    };
                    ctx.print(
                        marker.coordinate.longitude,
                        marker.coordinate.latitude,
                        Span::styled(glyph, t.marker_style()),
                    );
                }

                if let Some(marker) = selected {
                    let at = viewport.callout_position(marker.coordinate, marker.callout.anchor);
                    ctx.print(
                        at.longitude,
                        at.latitude,
                        Span::styled(marker.callout.label(), t.callout_style()),
                    );
                }

                if let Some(cursor) = self.cursor {
                    ctx.print(
                        cursor.longitude,
                        cursor.latitude,
                        Span::styled("✚", t.title_style()),
                    );
                }
            })
            .render(area, buf);
    }
}
