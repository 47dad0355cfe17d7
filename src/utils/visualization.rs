//! Visualization utilities for rust_kinoplan
//!
//! Plots workspaces, poses and solution paths using gnuplot.

use gnuplot::{AutoOption, AxesCommon, Caption, Color, Figure, LineWidth, PointSize, PointSymbol};

use crate::common::{Path2D, PlanningError, PlanningResult, Point2D, Pose2D};
use crate::control_planning::PoseSpace;

/// Color palette for consistent styling
pub mod colors {
    pub const BLACK: &str = "#000000";
    pub const RED: &str = "#FF0000";
    pub const GREEN: &str = "#00FF00";
    pub const BLUE: &str = "#0000FF";
    pub const CYAN: &str = "#00FFFF";
    pub const GRAY: &str = "#808080";

    // Semantic colors
    pub const BOUNDS: &str = BLACK;
    pub const START: &str = GREEN;
    pub const GOAL: &str = BLUE;
    pub const PATH: &str = RED;
    pub const HEADING: &str = CYAN;
    pub const TOLERANCE: &str = GRAY;
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

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: colors::PATH.to_string(),
            line_width: 2.0,
            caption: "Path".to_string(),
        }
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
}

/// One recorded plot element, drawn onto the shared axes when rendering
#[derive(Debug, Clone)]
enum PlotItem {
    Lines {
        x: Vec<f64>,
        y: Vec<f64>,
        caption: String,
        color: String,
        width: f64,
    },
    Points {
        x: Vec<f64>,
        y: Vec<f64>,
        style: PointStyle,
    },
}

/// Main visualizer struct
///
/// Plot calls only record elements; everything is drawn on a single 2-D
/// axes when the figure is rendered.
pub struct Visualizer {
    items: Vec<PlotItem>,
    title: String,
    x_label: String,
    y_label: String,
    x_range: Option<(f64, f64)>,
    y_range: Option<(f64, f64)>,
    aspect_ratio: Option<f64>,
}

impl Visualizer {
    /// Create a new visualizer
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            title: String::new(),
            x_label: "X".to_string(),
            y_label: "Y".to_string(),
            x_range: None,
            y_range: None,
            aspect_ratio: Some(1.0),
        }
    }

    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    pub fn set_x_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.x_range = Some((min, max));
        self
    }

    pub fn set_y_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.y_range = Some((min, max));
        self
    }

    fn add_lines(&mut self, x: Vec<f64>, y: Vec<f64>, caption: &str, color: &str, width: f64) {
        self.items.push(PlotItem::Lines {
            x,
            y,
            caption: caption.to_string(),
            color: color.to_string(),
            width,
        });
    }

    /// Plot a path
    pub fn plot_path(&mut self, path: &Path2D, style: &PathStyle) -> &mut Self {
        self.add_lines(path.x_coords(), path.y_coords(), &style.caption, &style.color, style.line_width);
        self
    }

    /// Plot a single point (start, goal, etc.)
    pub fn plot_point(&mut self, point: Point2D, style: &PointStyle) -> &mut Self {
        self.items.push(PlotItem::Points {
            x: vec![point.x],
            y: vec![point.y],
            style: style.clone(),
        });
        self
    }

    /// Plot a pose as a point with a heading tick of length `size`
    pub fn plot_pose(&mut self, pose: &Pose2D, size: f64, style: &PointStyle) -> &mut Self {
        self.plot_point(pose.position(), style);

        let end_x = pose.x + size * pose.yaw.cos();
        let end_y = pose.y + size * pose.yaw.sin();
        self.add_lines(vec![pose.x, end_x], vec![pose.y, end_y], "", colors::HEADING, 2.0);
        self
    }

    /// Outline the position bounds of a pose space
    pub fn plot_bounds(&mut self, space: &PoseSpace) -> &mut Self {
        let low = space.bounds().low();
        let high = space.bounds().high();
        let x = vec![low[0], high[0], high[0], low[0], low[0]];
        let y = vec![low[1], low[1], high[1], high[1], low[1]];
        self.add_lines(x, y, "Bounds", colors::BOUNDS, 1.0);

        let margin = 0.05 * (high[0] - low[0]).max(high[1] - low[1]);
        self.set_x_range(low[0] - margin, high[0] + margin);
        self.set_y_range(low[1] - margin, high[1] + margin)
    }

    /// Circle of radius `tolerance` around the goal position
    pub fn plot_goal_region(&mut self, goal: Point2D, tolerance: f64) -> &mut Self {
        let (x, y): (Vec<f64>, Vec<f64>) = (0..=36)
            .map(|i| {
                let t = i as f64 * std::f64::consts::PI / 18.0;
                (goal.x + tolerance * t.cos(), goal.y + tolerance * t.sin())
            })
            .unzip();

        self.add_lines(x, y, "Goal tolerance", colors::TOLERANCE, 1.0);
        self
    }

    pub fn plot_start(&mut self, pose: &Pose2D) -> &mut Self {
        self.plot_pose(pose, 0.1, &PointStyle::new(colors::START, "Start").with_size(1.5))
    }

    pub fn plot_goal(&mut self, pose: &Pose2D) -> &mut Self {
        self.plot_pose(pose, 0.1, &PointStyle::new(colors::GOAL, "Goal").with_size(1.5))
    }

    /// Save plot to PNG file
    pub fn save_png(&self, path: &str, width: u32, height: u32) -> PlanningResult<()> {
        self.render()
            .save_to_png(path, width, height)
            .map_err(|e| PlanningError::VisualizationError(e.to_string()))
    }

    /// Build a figure with every recorded element on one axes
    fn render(&self) -> Figure {
        let mut figure = Figure::new();
        let axes = figure.axes2d();

        for item in &self.items {
            match item {
                PlotItem::Lines { x, y, caption, color, width } => {
                    axes.lines(x, y, &[Caption(caption.as_str()), Color(color.as_str()), LineWidth(*width)]);
                }
                PlotItem::Points { x, y, style } => {
                    axes.points(x, y, &[
                        Caption(style.caption.as_str()),
                        Color(style.color.as_str()),
                        PointSymbol(style.symbol),
                        PointSize(style.size),
                    ]);
                }
            }
        }

        if !self.title.is_empty() {
            axes.set_title(&self.title, &[]);
        }
        axes.set_x_label(&self.x_label, &[]);
        axes.set_y_label(&self.y_label, &[]);

        if let Some((min, max)) = self.x_range {
            axes.set_x_range(AutoOption::Fix(min), AutoOption::Fix(max));
        }
        if let Some((min, max)) = self.y_range {
            axes.set_y_range(AutoOption::Fix(min), AutoOption::Fix(max));
        }
        if let Some(ratio) = self.aspect_ratio {
            axes.set_aspect_ratio(AutoOption::Fix(ratio));
        }
        figure
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visualizer_creation() {
        let vis = Visualizer::new();
        assert!(vis.aspect_ratio.is_some());
        assert!(vis.x_range.is_none());
    }

    #[test]
    fn test_plot_bounds_sets_ranges() {
        let space = PoseSpace::square(-1.0, 1.0).unwrap();
        let mut vis = Visualizer::new();
        vis.plot_bounds(&space);
        let (xmin, xmax) = vis.x_range.unwrap();
        assert!((xmin + 1.1).abs() < 1e-10);
        assert!((xmax - 1.1).abs() < 1e-10);
    }

    #[test]
    fn test_renders_single_axes() {
        let space = PoseSpace::square(-1.0, 1.0).unwrap();
        let path = Path2D::from_poses(&[Pose2D::new(-0.5, 0.0, 0.0), Pose2D::new(0.0, 0.5, 0.0)]);
        let mut vis = Visualizer::new();
        vis.set_title("Kinematic Car Planning")
            .plot_bounds(&space)
            .plot_goal_region(Point2D::new(0.0, 0.5), 0.05)
            .plot_path(&path, &PathStyle::default())
            .plot_start(&Pose2D::new(-0.5, 0.0, 0.0))
            .plot_goal(&Pose2D::new(0.0, 0.5, 0.0));
        assert_eq!(vis.items.len(), 7);

        let mut script = Vec::new();
        vis.render().echo(&mut script);
        let script = String::from_utf8_lossy(&script);
        assert!(!script.contains("multiplot"));
        assert!(script.contains("set size ratio"));
        assert!(script.contains("Kinematic Car Planning"));
    }

    #[test]
    fn test_path_style() {
        let style = PathStyle::new(colors::RED, "Solution").with_line_width(3.0);
        assert_eq!(style.line_width, 3.0);
        assert_eq!(style.color, colors::RED);
    }
}
