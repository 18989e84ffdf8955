//! Backend-neutral chart descriptions and the sinks that show them.

use std::convert::Infallible;

use vello::peniko::Color;

use crate::layout::Bounds;

/// Line colours, cycled by walk index.
pub const PALETTE: [Color; 10] = [
    Color::from_rgb8(0x1f, 0x77, 0xb4),
    Color::from_rgb8(0xff, 0x7f, 0x0e),
    Color::from_rgb8(0x2c, 0xa0, 0x2c),
    Color::from_rgb8(0xd6, 0x27, 0x28),
    Color::from_rgb8(0x94, 0x67, 0xbd),
    Color::from_rgb8(0x8c, 0x56, 0x4b),
    Color::from_rgb8(0xe3, 0x77, 0xc2),
    Color::from_rgb8(0x7f, 0x7f, 0x7f),
    Color::from_rgb8(0xbc, 0xbd, 0x22),
    Color::from_rgb8(0x17, 0xbe, 0xcf),
];

pub fn palette_color(i: usize) -> Color {
    PALETTE[i % PALETTE.len()]
}

#[derive(Debug, Clone)]
pub enum DataLayer {
    Line {
        xs: Vec<f64>,
        ys: Vec<f64>,
        color: Color,
        width: f64,
    },
    Bar {
        /// `(left, right)` edge of each bar.
        xs: Vec<(f64, f64)>,
        ys: Vec<f64>,
        color: Color,
    },
}

impl DataLayer {
    pub fn bounds(&self) -> Bounds {
        match self {
            DataLayer::Line { xs, ys, .. } => xs
                .iter()
                .zip(ys)
                .fold(Bounds::EMPTY, |b, (&x, &y)| b.include(x, y)),
            // bars always rise from zero
            DataLayer::Bar { xs, ys, .. } => xs
                .iter()
                .zip(ys)
                .fold(Bounds::EMPTY, |b, (&(x0, x1), &y)| {
                    b.include(x0, 0.0).include(x1, y)
                }),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            DataLayer::Line { xs, .. } => xs.len(),
            DataLayer::Bar { xs, .. } => xs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One figure: labelled axes and the layers drawn inside them.
#[derive(Debug, Clone, Default)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub data_layers: Vec<DataLayer>,
}

impl Chart {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = label.into();
        self
    }

    pub fn with_y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }

    pub fn with_layer(mut self, layer: DataLayer) -> Self {
        self.data_layers.push(layer);
        self
    }

    /// Smallest bounds holding every layer, or `None` for a chart with no
    /// data points.
    pub fn data_bounds(&self) -> Option<Bounds> {
        let bounds = self
            .data_layers
            .iter()
            .map(DataLayer::bounds)
            .fold(Bounds::EMPTY, Bounds::union);
        (!bounds.is_empty()).then_some(bounds)
    }
}

/// Where finished charts go.
///
/// Implementations block until the chart has been shown; the plotting
/// functions call `render` once per chart.
pub trait ChartSink {
    type Error: std::error::Error + Send + Sync + 'static;

    fn render(&mut self, chart: &Chart) -> Result<(), Self::Error>;
}

impl<S: ChartSink + ?Sized> ChartSink for &mut S {
    type Error = S::Error;

    fn render(&mut self, chart: &Chart) -> Result<(), Self::Error> {
        (**self).render(chart)
    }
}

/// Headless sink: logs a summary of each chart instead of drawing it.
#[derive(Debug, Default)]
pub struct LogSink {
    rendered: usize,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Charts seen so far.
    pub fn rendered(&self) -> usize {
        self.rendered
    }
}

impl ChartSink for LogSink {
    type Error = Infallible;

    fn render(&mut self, chart: &Chart) -> Result<(), Infallible> {
        self.rendered += 1;
        let points: usize = chart.data_layers.iter().map(DataLayer::len).sum();
        match chart.data_bounds() {
            Some(b) => tracing::info!(
                title = %chart.title,
                x_label = %chart.x_label,
                y_label = %chart.y_label,
                layers = chart.data_layers.len(),
                points,
                x_min = b.x.min,
                x_max = b.x.max,
                y_min = b.y.min,
                y_max = b.y.max,
                "chart"
            ),
            None => tracing::info!(title = %chart.title, layers = 0, "empty chart"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Interval;

    fn line(xs: Vec<f64>, ys: Vec<f64>) -> DataLayer {
        DataLayer::Line {
            xs,
            ys,
            color: palette_color(0),
            width: 1.0,
        }
    }

    #[test]
    fn line_bounds() {
        let b = line(vec![0.0, 1.0, 2.0], vec![0.0, -3.0, 4.0]).bounds();
        assert_eq!(b.x, Interval { min: 0.0, max: 2.0 });
        assert_eq!(b.y, Interval { min: -3.0, max: 4.0 });
    }

    #[test]
    fn bar_bounds_include_baseline() {
        let bar = DataLayer::Bar {
            xs: vec![(1.0, 2.0), (2.0, 3.0)],
            ys: vec![0.5, 0.25],
            color: palette_color(0),
        };
        let b = bar.bounds();
        assert_eq!(b.x, Interval { min: 1.0, max: 3.0 });
        assert_eq!(b.y, Interval { min: 0.0, max: 0.5 });
        assert_eq!(bar.len(), 2);
    }

    #[test]
    fn chart_bounds_union_layers() {
        let chart = Chart::new("t")
            .with_layer(line(vec![0.0, 1.0], vec![0.0, 1.0]))
            .with_layer(line(vec![0.0, 5.0], vec![0.0, -2.0]));
        let b = chart.data_bounds().unwrap();
        assert_eq!(b.x, Interval { min: 0.0, max: 5.0 });
        assert_eq!(b.y, Interval { min: -2.0, max: 1.0 });
    }

    #[test]
    fn empty_chart_has_no_bounds() {
        assert!(Chart::new("nothing").data_bounds().is_none());
        let chart = Chart::new("empty line").with_layer(line(vec![], vec![]));
        assert!(chart.data_bounds().is_none());
    }

    #[test]
    fn builder_sets_labels() {
        let chart = Chart::new("Title").with_x_label("x").with_y_label("y");
        assert_eq!(chart.title, "Title");
        assert_eq!(chart.x_label, "x");
        assert_eq!(chart.y_label, "y");
    }

    #[test]
    fn palette_cycles() {
        assert_eq!(
            palette_color(0).to_rgba8(),
            palette_color(PALETTE.len()).to_rgba8()
        );
    }

    #[test]
    fn log_sink_counts() {
        let mut sink = LogSink::new();
        let chart = Chart::new("t").with_layer(line(vec![0.0, 1.0], vec![1.0, 2.0]));
        sink.render(&chart).unwrap();
        sink.render(&Chart::new("empty")).unwrap();
        assert_eq!(sink.rendered(), 2);
    }
}
