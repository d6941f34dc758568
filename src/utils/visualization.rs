//! Visualization utilities for highway_planner
//!
//! Road-scene plotting on top of gnuplot: lane lines, planned trajectory,
//! ego and traffic markers.

use gnuplot::{AutoOption, AxesCommon, Caption, Color, Figure, LineWidth, PointSize, PointSymbol};

use crate::behavior::lane::{LANE_COUNT, LANE_WIDTH};
use crate::common::{Point2D, Trajectory};
use crate::map::HighwayMap;

/// Color palette for consistent styling
pub mod colors {
    pub const LANE_LINE: &str = "#808080";
    pub const CENTERLINE: &str = "#000000";
    pub const TRAJECTORY: &str = "#FF0000";
    pub const EGO: &str = "#00FFFF";
    pub const TRAFFIC: &str = "#0000FF";
}

/// Style for path rendering
#[derive(Debug, Clone)]
pub struct PathStyle {
    pub color: String,
    pub line_width: f64,
    pub caption: String,
}

impl PathStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            line_width: 2.0,
            caption: caption.to_string(),
        }
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }
}

/// Style for point rendering
#[derive(Debug, Clone)]
pub struct PointStyle {
    pub color: String,
    pub size: f64,
    pub symbol: char,
    pub caption: String,
}

impl PointStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            size: 1.0,
            symbol: 'O',
            caption: caption.to_string(),
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_symbol(mut self, symbol: char) -> Self {
        self.symbol = symbol;
        self
    }
}

/// Road-scene plotter
pub struct Visualizer {
    figure: Figure,
    title: String,
}

impl Visualizer {
    pub fn new(title: &str) -> Self {
        Self {
            figure: Figure::new(),
            title: title.to_string(),
        }
    }

    /// Draw the track centerline and the lane boundary lines, offset along
    /// the waypoint normals.
    pub fn plot_road(&mut self, map: &HighwayMap) -> &mut Self {
        let n = map.len();
        let cx: Vec<f64> = (0..n).map(|i| map.waypoint(i).x).collect();
        let cy: Vec<f64> = (0..n).map(|i| map.waypoint(i).y).collect();
        self.figure.axes2d().lines(
            &cx,
            &cy,
            &[Caption("Centerline"), Color(colors::CENTERLINE), LineWidth(1.0)],
        );

        for boundary in 0..=LANE_COUNT {
            let d = LANE_WIDTH * boundary as f64;
            let mut bx = Vec::with_capacity(n);
            let mut by = Vec::with_capacity(n);
            for i in 0..n {
                let wp = map.waypoint(i);
                let (dx, dy) = map.waypoint_normal(i);
                bx.push(wp.x + d * dx);
                by.push(wp.y + d * dy);
            }
            self.figure.axes2d().lines(
                &bx,
                &by,
                &[Color(colors::LANE_LINE), LineWidth(0.5)],
            );
        }
        self
    }

    /// Draw a planned trajectory.
    pub fn plot_trajectory(&mut self, trajectory: &Trajectory, style: &PathStyle) -> &mut Self {
        self.figure.axes2d().lines(
            &trajectory.x_coords(),
            &trajectory.y_coords(),
            &[
                Caption(&style.caption),
                Color(&style.color),
                LineWidth(style.line_width),
            ],
        );
        self
    }

    /// Draw vehicle markers.
    pub fn plot_vehicles(&mut self, positions: &[Point2D], style: &PointStyle) -> &mut Self {
        let x: Vec<f64> = positions.iter().map(|p| p.x).collect();
        let y: Vec<f64> = positions.iter().map(|p| p.y).collect();
        self.figure.axes2d().points(
            &x,
            &y,
            &[
                Caption(&style.caption),
                Color(&style.color),
                PointSymbol(style.symbol),
                PointSize(style.size),
            ],
        );
        self
    }

    /// Draw the ego vehicle.
    pub fn plot_ego(&mut self, position: Point2D) -> &mut Self {
        self.plot_vehicles(
            &[position],
            &PointStyle::new(colors::EGO, "Ego").with_size(1.5).with_symbol('T'),
        )
    }

    /// Save the scene to a PNG file.
    pub fn save_png(&mut self, path: &str, width: u32, height: u32) -> Result<(), String> {
        self.apply_settings();
        self.figure
            .save_to_png(path, width, height)
            .map_err(|e| e.to_string())
    }

    fn apply_settings(&mut self) {
        self.figure
            .axes2d()
            .set_title(&self.title, &[])
            .set_x_label("X [m]", &[])
            .set_y_label("Y [m]", &[])
            .set_aspect_ratio(AutoOption::Fix(1.0));
    }
}
