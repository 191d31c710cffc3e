//! SVG bar chart of gzip sizes.
//!
//! Output is a pure function of the measured records and the footer timestamp:
//! rendering the same report twice yields identical bars, positions and colours.

use crate::fmt::group_thousands;
use crate::report::MeasuredApp;

use super::palette::Palette;

/// Canvas width in pixels
pub const CHART_WIDTH: f64 = 1200.0;
/// Canvas height in pixels
pub const CHART_HEIGHT: f64 = 600.0;

const PADDING_TOP: f64 = 60.0;
const PADDING_RIGHT: f64 = 40.0;
const PADDING_BOTTOM: f64 = 80.0;
const PADDING_LEFT: f64 = 80.0;

/// Number of intervals on the y axis (grid lines = intervals + 1)
const GRID_STEPS: u32 = 10;

/// Fraction of each bar slot left empty on either side of the bar
const BAR_PADDING_RATIO: f64 = 0.1;

const STYLE: &str = r#"  <defs>
    <style>
      * { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif; }
      .title { font-size: 24px; font-weight: bold; fill: #333; }
      .subtitle { font-size: 14px; fill: #666; }
      .label { font-size: 12px; fill: #333; }
      .axis-label { font-size: 12px; fill: #666; }
      .grid-line { stroke: #e0e0e0; stroke-width: 1; }
      .axis { stroke: #333; stroke-width: 2; }
      .bar-label { font-size: 13px; fill: #333; font-weight: 500; }
      .value-label { font-size: 12px; fill: #333; font-weight: bold; }
    </style>
  </defs>
"#;

/// Y-axis maximum: the largest value rounded up to a multiple of ten, at least ten
pub fn y_axis_max(max_value: f64) -> f64 {
    ((max_value / 10.0).ceil() * 10.0).max(10.0)
}

/// Local time in the en-US style used for the chart footer
pub fn generation_timestamp() -> String {
    chrono::Local::now()
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

/// Escape text for use in SVG character data and attribute values
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Renders measured applications as a bar chart, one bar per application in order
#[derive(Debug, Clone, Default)]
pub struct ChartRenderer {
    palette: Palette,
}

impl ChartRenderer {
    /// Create a renderer with the given palette
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Render `apps` to an SVG document with `generated_at` in the footer.
    ///
    /// # Examples
    ///
    /// ```
    /// use bundle_compare::chart::ChartRenderer;
    /// use bundle_compare::report::MeasuredApp;
    ///
    /// let apps = vec![MeasuredApp {
    ///     name: "vue".to_string(),
    ///     size_kb: 80.0,
    ///     gzip_size_kb: 30.5,
    ///     files: Vec::new(),
    /// }];
    /// let svg = ChartRenderer::default().render(&apps, "1/1/2025, 9:00:00 AM");
    /// assert!(svg.contains("fill=\"#42B883\""));
    /// ```
    pub fn render(&self, apps: &[MeasuredApp], generated_at: &str) -> String {
        let width = CHART_WIDTH;
        let height = CHART_HEIGHT;
        let chart_width = width - PADDING_LEFT - PADDING_RIGHT;
        let chart_height = height - PADDING_TOP - PADDING_BOTTOM;
        let baseline = height - PADDING_BOTTOM;

        let max_value = apps
            .iter()
            .map(|app| app.gzip_size_kb.max(0.0))
            .fold(0.0, f64::max);
        let y_max = y_axis_max(max_value);
        let to_pixel_y = |value: f64| chart_height - (value / y_max) * chart_height;

        let mut svg = String::new();
        svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {w} {h}\" width=\"{w}\" height=\"{h}\">\n",
            w = width,
            h = height
        ));
        svg.push_str(STYLE);

        svg.push_str("\n  <!-- Background -->\n");
        svg.push_str(&format!(
            "  <rect width=\"{}\" height=\"{}\" fill=\"#ffffff\"/>\n",
            width, height
        ));

        svg.push_str("\n  <!-- Title -->\n");
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"40\" text-anchor=\"middle\" class=\"title\">Framework Bundle Size Comparison</text>\n",
            width / 2.0
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"55\" text-anchor=\"middle\" class=\"subtitle\">JavaScript bundle size (gzipped) in KB</text>\n",
            width / 2.0
        ));

        svg.push_str("\n  <!-- Y-axis -->\n");
        svg.push_str(&format!(
            "  <line x1=\"{l}\" y1=\"{t}\" x2=\"{l}\" y2=\"{b}\" class=\"axis\"/>\n",
            l = PADDING_LEFT,
            t = PADDING_TOP,
            b = baseline
        ));

        svg.push_str("\n  <!-- X-axis -->\n");
        svg.push_str(&format!(
            "  <line x1=\"{l}\" y1=\"{b}\" x2=\"{r}\" y2=\"{b}\" class=\"axis\"/>\n",
            l = PADDING_LEFT,
            b = baseline,
            r = width - PADDING_RIGHT
        ));

        svg.push_str("\n  <!-- Y-axis grid lines and labels -->");
        for i in 0..=GRID_STEPS {
            let value = f64::from(i) / f64::from(GRID_STEPS) * y_max;
            let y = PADDING_TOP + to_pixel_y(value);
            svg.push_str(&format!(
                "\n  <!-- Grid line {i} -->\n  <line x1=\"{l}\" y1=\"{y}\" x2=\"{r}\" y2=\"{y}\" class=\"grid-line\"/>\n  <text x=\"{lx}\" y=\"{ly}\" text-anchor=\"end\" class=\"axis-label\">{label}</text>",
                i = i,
                l = PADDING_LEFT,
                r = width - PADDING_RIGHT,
                y = y,
                lx = PADDING_LEFT - 10.0,
                ly = y + 5.0,
                label = value.round()
            ));
        }

        svg.push_str(&format!(
            "\n  <text x=\"20\" y=\"{m}\" text-anchor=\"middle\" transform=\"rotate(-90 20 {m})\" class=\"axis-label\">Size (KB)</text>",
            m = height / 2.0
        ));

        let slot_width = chart_width / apps.len().max(1) as f64;
        let bar_padding = slot_width * BAR_PADDING_RATIO;
        let bar_width = slot_width - bar_padding * 2.0;

        for (index, app) in apps.iter().enumerate() {
            let value = app.gzip_size_kb.max(0.0);
            let x = PADDING_LEFT + index as f64 * slot_width + bar_padding;
            let bar_height = (value / y_max) * chart_height;
            let y = PADDING_TOP + chart_height - bar_height;
            let colour = escape_xml(self.palette.colour_for(&app.name));

            svg.push_str(&format!(
                "\n  <!-- Bar {index} -->\n  <rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" fill=\"{c}\" opacity=\"0.9\" rx=\"4\"/>\n\n  <!-- Value above bar -->\n  <text x=\"{vx}\" y=\"{vy}\" text-anchor=\"middle\" class=\"value-label\">{v}</text>",
                index = index,
                x = x,
                y = y,
                w = bar_width,
                h = bar_height,
                c = colour,
                vx = x + bar_width / 2.0,
                vy = y - 8.0,
                v = group_thousands(value)
            ));
        }

        for (index, app) in apps.iter().enumerate() {
            svg.push_str(&format!(
                "\n  <text x=\"{x}\" y=\"{y}\" text-anchor=\"middle\" class=\"bar-label\">{name}</text>",
                x = PADDING_LEFT + index as f64 * slot_width + slot_width / 2.0,
                y = baseline + 30.0,
                name = escape_xml(&app.name)
            ));
        }

        svg.push_str(&format!(
            "\n  <text x=\"{x}\" y=\"{y}\" text-anchor=\"middle\" class=\"axis-label\">Framework</text>",
            x = width / 2.0,
            y = height - 15.0
        ));

        svg.push_str(&format!(
            "\n  <text x=\"{x}\" y=\"{y}\" text-anchor=\"end\" font-size=\"10\" fill=\"#999\">Generated on {ts}</text>",
            x = width - PADDING_RIGHT,
            y = height - 10.0,
            ts = escape_xml(generated_at)
        ));

        svg.push_str("\n</svg>");
        svg
    }
}
