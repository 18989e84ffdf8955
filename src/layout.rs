#[derive(Debug, Clone, PartialEq)]
pub struct PlotLayout {
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
    /// Fraction of the data range added on each side when bounds are fitted.
    pub margin: f64,
}

impl PlotLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Fixes the layout for one chart shown at `scale_factor`.
    pub(crate) fn instantiate(
        &self,
        scale_factor: f64,
        data_bounds: Option<Bounds>,
    ) -> PlotInstanceLayout {
        let data_bounds = data_bounds
            .map(|b| b.expand(self.margin))
            .unwrap_or(Bounds::UNIT);

        PlotInstanceLayout {
            logical_width: self.width,
            logical_height: self.height,
            padding: self.padding,
            data_bounds,
            scale_factor,
        }
    }
}

impl Default for PlotLayout {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            padding: Padding {
                top: 48.0,
                bottom: 64.0,
                left: 80.0,
                right: 24.0,
            },
            margin: 0.05,
        }
    }
}

/// Layout of a chart on screen, in logical pixels with y pointing down.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlotInstanceLayout {
    pub(crate) logical_width: f64,
    pub(crate) logical_height: f64,
    pub(crate) padding: Padding,

    pub(crate) data_bounds: Bounds,

    pub(crate) scale_factor: f64,
}

impl PlotInstanceLayout {
    pub(crate) fn inner_width(&self) -> f64 {
        self.logical_width - self.padding.left - self.padding.right
    }

    pub(crate) fn inner_height(&self) -> f64 {
        self.logical_height - self.padding.top - self.padding.bottom
    }

    pub(crate) fn inner_left(&self) -> f64 {
        self.padding.left
    }

    pub(crate) fn inner_right(&self) -> f64 {
        self.logical_width - self.padding.right
    }

    pub(crate) fn inner_top(&self) -> f64 {
        self.padding.top
    }

    pub(crate) fn inner_bottom(&self) -> f64 {
        self.logical_height - self.padding.bottom
    }

    pub(crate) fn transform_x(&self, x: f64) -> f64 {
        let xs = self.data_bounds.x;
        self.padding.left + (x - xs.min) / xs.size() * self.inner_width()
    }

    pub(crate) fn transform_y(&self, y: f64) -> f64 {
        let ys = self.data_bounds.y;
        self.inner_bottom() - (y - ys.min) / ys.size() * self.inner_height()
    }

    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        self.logical_width = width as f64 / self.scale_factor;
        self.logical_height = height as f64 / self.scale_factor;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: Interval,
    pub y: Interval,
}

impl Bounds {
    pub const UNIT: Self = Self {
        x: Interval::UNIT,
        y: Interval::UNIT,
    };

    pub const EMPTY: Self = Self {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
    };

    #[inline]
    pub fn include(self, x: f64, y: f64) -> Self {
        Self {
            x: self.x.include(x),
            y: self.y.include(y),
        }
    }

    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self {
            x: self.x.union(other.x),
            y: self.y.union(other.y),
        }
    }

    #[inline]
    pub fn expand(self, fraction: f64) -> Self {
        Self {
            x: self.x.expand(fraction),
            y: self.y.expand(fraction),
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.x.is_empty() || self.y.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub const UNIT: Self = Self { min: 0.0, max: 1.0 };

    pub const EMPTY: Self = Self {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    #[inline]
    pub fn size(self) -> f64 {
        self.max - self.min
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.min > self.max
    }

    #[inline]
    pub fn include(self, value: f64) -> Self {
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }

    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Widens both ends by `fraction` of the size. A zero-width interval
    /// grows to one unit around its value.
    #[inline]
    pub fn expand(self, fraction: f64) -> Self {
        let pad = if self.size() > 0.0 {
            self.size() * fraction
        } else {
            0.5
        };
        Self {
            min: self.min - pad,
            max: self.max + pad,
        }
    }

    /// Round tick positions inside the interval, at most about `target`
    /// of them, spaced 1, 2 or 5 times a power of ten.
    pub fn ticks(self, target: usize) -> Vec<f64> {
        if self.is_empty() || self.size() <= 0.0 || target == 0 {
            return Vec::new();
        }
        let step = nice_step(self.size() / target as f64);
        let first = (self.min / step).ceil() as i64;
        let last = (self.max / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Formats a tick value without trailing zeros.
pub(crate) fn tick_label(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    if rounded == 0.0 {
        return "0".to_string();
    }
    if rounded.fract() == 0.0 && rounded.abs() < 1e15 {
        return format!("{}", rounded as i64);
    }
    let text = format!("{rounded:.6}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn instance() -> PlotInstanceLayout {
        PlotLayout::new()
            .with_width(200.0)
            .with_height(100.0)
            .with_padding(Padding {
                top: 10.0,
                bottom: 10.0,
                left: 20.0,
                right: 20.0,
            })
            .with_margin(0.0)
            .instantiate(
                1.0,
                Some(Bounds {
                    x: Interval { min: 0.0, max: 10.0 },
                    y: Interval {
                        min: -5.0,
                        max: 5.0,
                    },
                }),
            )
    }

    #[test]
    fn transform_maps_corners() {
        let layout = instance();
        assert_abs_diff_eq!(layout.transform_x(0.0), 20.0);
        assert_abs_diff_eq!(layout.transform_x(10.0), 180.0);
        assert_abs_diff_eq!(layout.transform_y(-5.0), 90.0);
        assert_abs_diff_eq!(layout.transform_y(5.0), 10.0);
        assert_abs_diff_eq!(layout.transform_y(0.0), 50.0);
    }

    #[test]
    fn resize_uses_scale_factor() {
        let mut layout = PlotLayout::new().instantiate(2.0, None);
        layout.resize(1000, 800);
        assert_abs_diff_eq!(layout.logical_width, 500.0);
        assert_abs_diff_eq!(layout.logical_height, 400.0);
    }

    #[test]
    fn fitted_bounds_get_margin() {
        let data = Bounds::EMPTY.include(0.0, -10.0).include(100.0, 10.0);
        let layout = PlotLayout::new().with_margin(0.1).instantiate(1.0, Some(data));
        assert_abs_diff_eq!(layout.data_bounds.x.min, -10.0);
        assert_abs_diff_eq!(layout.data_bounds.x.max, 110.0);
        assert_abs_diff_eq!(layout.data_bounds.y.min, -12.0);
        assert_abs_diff_eq!(layout.data_bounds.y.max, 12.0);
    }

    #[test]
    fn no_data_falls_back_to_unit_bounds() {
        let layout = PlotLayout::new().instantiate(1.0, None);
        assert_eq!(layout.data_bounds, Bounds::UNIT);
    }

    #[test]
    fn degenerate_interval_expands_to_unit() {
        let i = Interval::EMPTY.include(3.0).expand(0.05);
        assert_abs_diff_eq!(i.min, 2.5);
        assert_abs_diff_eq!(i.max, 3.5);
    }

    #[test]
    fn empty_interval() {
        assert!(Interval::EMPTY.is_empty());
        assert!(!Interval::UNIT.is_empty());
        assert!(Bounds::EMPTY.is_empty());
        assert!(Interval::EMPTY.ticks(5).is_empty());
    }

    #[test]
    fn ticks_are_round() {
        let ticks = Interval {
            min: -3.0,
            max: 1003.0,
        }
        .ticks(6);
        assert_eq!(ticks, vec![0.0, 200.0, 400.0, 600.0, 800.0, 1000.0]);
    }

    #[test]
    fn ticks_small_range() {
        let ticks = Interval { min: 0.0, max: 0.9 }.ticks(5);
        assert_eq!(ticks.len(), 5);
        assert_abs_diff_eq!(ticks[1], 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(ticks[4], 0.8, epsilon = 1e-12);
    }

    #[test]
    fn tick_labels() {
        assert_eq!(tick_label(0.0), "0");
        assert_eq!(tick_label(-0.0), "0");
        assert_eq!(tick_label(200.0), "200");
        assert_eq!(tick_label(-40.0), "-40");
        assert_eq!(tick_label(0.2), "0.2");
        assert_eq!(tick_label(0.6000000000000001), "0.6");
        assert_eq!(tick_label(0.025), "0.025");
    }
}
