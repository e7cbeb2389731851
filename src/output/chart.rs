//! Bar chart rendering of probe durations
//!
//! Rendering is optional. [`select_renderer`] probes the environment once at
//! startup and hands back either the real bitmap renderer or a no-op renderer
//! that only explains why no chart was produced.

use crate::{error::Result, models::Measurement};
use std::path::{Path, PathBuf};

/// Chart title drawn above the bars
pub const CHART_TITLE: &str = "DNS Resolution Time (ms)";

/// Y axis description
pub const Y_AXIS_LABEL: &str = "ms";

/// Environment variable naming a TrueType font to draw text with
pub const FONT_ENV_VAR: &str = "DNS_IMPACT_FONT";

/// Capability interface for the visualization stage
pub trait ChartRenderer: Send + Sync {
    /// Render one bar per measurement; `Ok(None)` means nothing was written
    fn render(&self, measurements: &[Measurement], destination: &Path) -> Result<Option<PathBuf>>;

    /// Whether this renderer produces files
    fn is_available(&self) -> bool;
}

/// Renderer used when charting is unavailable
#[derive(Debug, Clone)]
pub struct NoopChartRenderer {
    reason: String,
}

impl NoopChartRenderer {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Notice shown instead of a chart
    pub fn notice(&self) -> String {
        format!("[Plot] {}, skipping plot.", self.reason)
    }
}

impl ChartRenderer for NoopChartRenderer {
    fn render(&self, _measurements: &[Measurement], _destination: &Path) -> Result<Option<PathBuf>> {
        println!();
        println!("{}", self.notice());
        Ok(None)
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Pick the renderer for this run
pub fn select_renderer(enabled: bool) -> Box<dyn ChartRenderer> {
    if !enabled {
        return Box::new(NoopChartRenderer::new("charts disabled"));
    }

    probe_bitmap_renderer()
}

#[cfg(feature = "chart")]
fn probe_bitmap_renderer() -> Box<dyn ChartRenderer> {
    match bitmap::BitmapChartRenderer::discover() {
        Ok(renderer) => Box::new(renderer),
        Err(reason) => Box::new(NoopChartRenderer::new(reason)),
    }
}

#[cfg(not(feature = "chart"))]
fn probe_bitmap_renderer() -> Box<dyn ChartRenderer> {
    Box::new(NoopChartRenderer::new(
        "chart support not compiled in (rebuild with --features chart)",
    ))
}

/// Well-known font locations tried when no font is configured
pub const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Locate a font file: the configured override wins, then the candidate list
pub fn find_font(configured: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = configured {
        let path = PathBuf::from(path);
        return path.is_file().then_some(path);
    }

    FONT_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

#[cfg(feature = "chart")]
pub use bitmap::BitmapChartRenderer;

#[cfg(feature = "chart")]
mod bitmap {
    use super::*;
    use crate::error::AppError;
    use plotters::prelude::*;
    use plotters::style::text_anchor::{HPos, Pos, VPos};
    use plotters::style::{register_font, FontStyle, FontTransform};

    const FONT_FAMILY: &str = "sans-serif";
    const CHART_SIZE: (u32, u32) = (900, 520);

    /// PNG bar chart renderer backed by plotters
    #[derive(Debug, Clone)]
    pub struct BitmapChartRenderer {
        font_path: PathBuf,
    }

    impl BitmapChartRenderer {
        /// Find and register a usable font, or explain why charting is unavailable
        pub fn discover() -> std::result::Result<Self, String> {
            let configured = std::env::var(FONT_ENV_VAR).ok();
            let font_path = find_font(configured.as_deref()).ok_or_else(|| match &configured {
                Some(path) => format!("font {} from {} not found", path, FONT_ENV_VAR),
                None => format!("no usable font found (set {})", FONT_ENV_VAR),
            })?;

            Self::with_font(&font_path)
        }

        /// Build a renderer that draws text with the given TrueType font
        pub fn with_font(font_path: &Path) -> std::result::Result<Self, String> {
            let data = std::fs::read(font_path)
                .map_err(|e| format!("cannot read font {}: {}", font_path.display(), e))?;
            // plotters keeps registered fonts for the life of the process
            let bytes: &'static [u8] = Box::leak(data.into_boxed_slice());

            register_font(FONT_FAMILY, FontStyle::Normal, bytes)
                .map_err(|_| format!("invalid font file {}", font_path.display()))?;

            Ok(Self {
                font_path: font_path.to_path_buf(),
            })
        }

        pub fn font_path(&self) -> &Path {
            &self.font_path
        }

        fn draw(&self, measurements: &[Measurement], destination: &Path) -> std::result::Result<(), String> {
            let peak = measurements
                .iter()
                .map(|m| m.duration_ms())
                .fold(0.0_f64, f64::max);
            let y_max = if peak > 0.0 { peak * 1.1 } else { 1.0 };

            let root = BitMapBackend::new(destination, CHART_SIZE).into_drawing_area();
            root.fill(&WHITE).map_err(|e| e.to_string())?;

            let mut chart = ChartBuilder::on(&root)
                .caption(CHART_TITLE, (FONT_FAMILY, 22).into_font())
                .margin(12)
                .x_label_area_size(220)
                .y_label_area_size(60)
                .build_cartesian_2d(bar_slots(measurements.len()).into_segmented(), 0.0..y_max)
                .map_err(|e| e.to_string())?;

            // Rotated labels hang below the axis instead of centering on it
            let label_style = TextStyle::from((FONT_FAMILY, 13).into_font().transform(FontTransform::Rotate90))
                .pos(Pos::new(HPos::Left, VPos::Center));

            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(measurements.len())
                .x_label_style(label_style)
                .x_label_formatter(&|v| bar_label(measurements, v))
                .y_desc(Y_AXIS_LABEL)
                .axis_desc_style((FONT_FAMILY, 15).into_font())
                .draw()
                .map_err(|e| e.to_string())?;

            chart
                .draw_series(
                    Histogram::vertical(&chart)
                        .style(BLUE.mix(0.7).filled())
                        .margin(12)
                        .data(measurements.iter().enumerate().map(|(i, m)| (i, m.duration_ms()))),
                )
                .map_err(|e| e.to_string())?;

            root.present().map_err(|e| e.to_string())?;
            Ok(())
        }
    }

    /// Integer range whose segmented axis has exactly one slot per bar
    ///
    /// plotters treats integer ranges as inclusive, so `0..count - 1` yields
    /// `count` segments.
    pub(super) fn bar_slots(count: usize) -> std::ops::Range<usize> {
        0..count.saturating_sub(1)
    }

    /// Domain shown under the bar at `value`
    pub(super) fn bar_label(measurements: &[Measurement], value: &SegmentValue<usize>) -> String {
        match value {
            SegmentValue::CenterOf(i) => measurements
                .get(*i)
                .map(|m| m.domain().to_string())
                .unwrap_or_default(),
            _ => String::new(),
        }
    }

    impl ChartRenderer for BitmapChartRenderer {
        fn render(&self, measurements: &[Measurement], destination: &Path) -> Result<Option<PathBuf>> {
            if measurements.is_empty() {
                return Err(AppError::chart("no measurements to plot"));
            }

            self.draw(measurements, destination).map_err(|e| {
                AppError::chart(format!("failed to write {}: {}", destination.display(), e))
            })?;

            Ok(Some(destination.to_path_buf()))
        }

        fn is_available(&self) -> bool {
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn sample() -> Vec<Measurement> {
        vec![
            Measurement::success("google.com", Duration::from_millis(12), vec![]),
            Measurement::success("github.com", Duration::from_millis(30), vec![]),
            Measurement::failed("bad.invalid", Duration::from_millis(45), "host not found"),
        ]
    }

    #[test]
    fn test_noop_renderer_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dns_times.png");

        let renderer = NoopChartRenderer::new("charts disabled");
        let result = renderer.render(&sample(), &path).unwrap();

        assert!(result.is_none());
        assert!(!path.exists());
        assert!(!renderer.is_available());
        assert_eq!(renderer.notice(), "[Plot] charts disabled, skipping plot.");
    }

    #[test]
    fn test_disabled_selection_is_noop() {
        let renderer = select_renderer(false);
        assert!(!renderer.is_available());
    }

    #[test]
    fn test_find_font_configured_missing() {
        assert!(find_font(Some("/definitely/not/here.ttf")).is_none());
    }

    #[test]
    fn test_find_font_configured_present() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("font.ttf");
        std::fs::write(&path, b"not really a font").unwrap();

        assert_eq!(find_font(Some(path.to_str().unwrap())), Some(path));
    }

    #[cfg(feature = "chart")]
    #[test]
    fn test_invalid_font_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();

        let result = BitmapChartRenderer::with_font(&path);
        assert!(result.unwrap_err().contains("invalid font file"));
    }

    #[cfg(feature = "chart")]
    #[test]
    fn test_missing_font_file_rejected() {
        let result = BitmapChartRenderer::with_font(Path::new("/definitely/not/here.ttf"));
        assert!(result.unwrap_err().contains("cannot read font"));
    }

    #[cfg(feature = "chart")]
    #[test]
    fn test_one_bar_slot_per_measurement_in_probe_order() {
        use plotters::prelude::{DiscreteRanged, IntoSegmentedCoord, SegmentValue};

        let measurements = sample();
        let axis = bitmap::bar_slots(measurements.len()).into_segmented();

        let slots: Vec<usize> = (0..axis.size())
            .filter_map(|i| axis.from_index(i))
            .filter_map(|v| match v {
                SegmentValue::Exact(i) => Some(i),
                _ => None,
            })
            .collect();
        assert_eq!(slots, vec![0, 1, 2]);

        let labels: Vec<String> = slots
            .iter()
            .map(|i| bitmap::bar_label(&measurements, &SegmentValue::CenterOf(*i)))
            .collect();
        assert_eq!(labels, vec!["google.com", "github.com", "bad.invalid"]);

        assert_eq!(bitmap::bar_label(&measurements, &SegmentValue::Last), "");
        assert_eq!(bitmap::bar_label(&measurements, &SegmentValue::Exact(0)), "");
    }

    #[cfg(feature = "chart")]
    #[test]
    fn test_single_measurement_gets_single_slot() {
        use plotters::prelude::{DiscreteRanged, IntoSegmentedCoord};

        let axis = bitmap::bar_slots(1).into_segmented();
        // one bar plus the trailing end marker
        assert_eq!(axis.size(), 2);
    }

    #[cfg(feature = "chart")]
    #[test]
    fn test_bitmap_renderer_writes_png_when_font_available() {
        let Some(font) = find_font(std::env::var(FONT_ENV_VAR).ok().as_deref()) else {
            // No font on this machine: the capability is legitimately absent
            return;
        };

        let renderer = BitmapChartRenderer::with_font(&font).unwrap();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dns_times.png");

        let written = renderer.render(&sample(), &path).unwrap();
        assert_eq!(written.as_deref(), Some(path.as_path()));

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[cfg(feature = "chart")]
    #[test]
    fn test_bitmap_renderer_unwritable_destination() {
        let Some(font) = find_font(std::env::var(FONT_ENV_VAR).ok().as_deref()) else {
            return;
        };

        let renderer = BitmapChartRenderer::with_font(&font).unwrap();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("dns_times.png");

        let result = renderer.render(&sample(), &path);
        assert!(matches!(result, Err(crate::error::AppError::Chart(_))));
    }
}
