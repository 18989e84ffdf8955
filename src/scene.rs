use std::f64::consts::FRAC_PI_2;

use itertools::zip_eq;
use vello::{
    Scene,
    kurbo::{self, Affine, BezPath, Cap, Join, Point},
    peniko::{self, Color, Mix},
};

use crate::{
    chart::{Chart, DataLayer},
    layout::{PlotInstanceLayout, tick_label},
    text::{Anchor, TextStyle, Typeface},
};

const AXIS_WIDTH: f64 = 1.5;
const TICK_LENGTH: f64 = 6.0;
const TICK_COUNT: usize = 6;
const TITLE_SIZE: f32 = 16.0;
const LABEL_SIZE: f32 = 13.0;
const TICK_LABEL_SIZE: f32 = 11.0;

const TITLE: TextStyle = TextStyle::new(TITLE_SIZE, Anchor::BaselineCenter);
const AXIS_LABEL: TextStyle = TextStyle::new(LABEL_SIZE, Anchor::BaselineCenter);
const X_TICK_LABEL: TextStyle = TextStyle::new(TICK_LABEL_SIZE, Anchor::TopCenter);
const Y_TICK_LABEL: TextStyle = TextStyle::new(TICK_LABEL_SIZE, Anchor::MiddleRight);

/// Builds vello scenes for one chart.
pub(crate) struct ChartPainter<'a> {
    pub(crate) chart: &'a Chart,
    pub(crate) layout: &'a PlotInstanceLayout,
    pub(crate) typeface: Option<&'a Typeface>,
}

impl ChartPainter<'_> {
    /// Paints the whole chart in logical coordinates, scaled to the window's
    /// physical pixels.
    pub(crate) fn paint(&self) -> Scene {
        let mut scene = Scene::new();
        let transform = Affine::scale(self.layout.scale_factor);

        let inner = kurbo::Rect {
            x0: self.layout.inner_left(),
            y0: self.layout.inner_top(),
            x1: self.layout.inner_right(),
            y1: self.layout.inner_bottom(),
        };
        scene.push_layer(Mix::Clip, 1.0, transform, &inner);

        for layer in &self.chart.data_layers {
            match layer {
                DataLayer::Bar { xs, ys, color } => {
                    self.draw_bar(
                        xs.iter().copied(),
                        ys.iter().copied(),
                        *color,
                        &mut scene,
                        transform,
                    );
                }
                DataLayer::Line {
                    xs,
                    ys,
                    color,
                    width,
                } => {
                    self.draw_line(
                        xs.iter().copied(),
                        ys.iter().copied(),
                        *color,
                        *width,
                        &mut scene,
                        transform,
                    );
                }
            }
        }

        scene.pop_layer();

        self.draw_x_axis(&mut scene, transform);
        self.draw_y_axis(&mut scene, transform);
        self.draw_labels(&mut scene, transform);

        scene
    }

    pub(crate) fn draw_bar<I, J>(
        &self,
        xs: I,
        ys: J,
        color: Color,
        scene: &mut Scene,
        transform: Affine,
    ) where
        I: Iterator<Item = (f64, f64)>,
        J: Iterator<Item = f64>,
    {
        let baseline = self.layout.transform_y(0.0);
        let edge = kurbo::Stroke::new(0.5);
        zip_eq(xs, ys).for_each(|((x0, x1), y)| {
            let rect = kurbo::Rect {
                x0: self.layout.transform_x(x0),
                y0: self.layout.transform_y(y),
                x1: self.layout.transform_x(x1),
                y1: baseline,
            };

            scene.fill(
                peniko::Fill::NonZero,
                transform,
                peniko::BrushRef::Solid(color),
                None,
                &rect,
            );
            scene.stroke(
                &edge,
                transform,
                peniko::BrushRef::Solid(Color::WHITE),
                None,
                &rect,
            );
        });
    }

    pub(crate) fn draw_line<I, J>(
        &self,
        x: I,
        y: J,
        colour: Color,
        width: f64,
        scene: &mut Scene,
        transform: Affine,
    ) where
        I: Iterator<Item = f64>,
        J: Iterator<Item = f64>,
    {
        let mut path = BezPath::new();
        for (i, (xi, yi)) in zip_eq(x, y).enumerate() {
            let point = Point::new(self.layout.transform_x(xi), self.layout.transform_y(yi));
            if i == 0 {
                path.move_to(point);
            } else {
                path.line_to(point);
            }
        }
        if path.elements().is_empty() {
            return;
        }

        let style = kurbo::Stroke::new(width)
            .with_caps(Cap::Round)
            .with_join(Join::Round);
        scene.stroke(
            &style,
            transform,
            peniko::BrushRef::Solid(colour),
            None,
            &path,
        );
    }

    fn stroke_segment(&self, scene: &mut Scene, transform: Affine, from: Point, to: Point) {
        scene.stroke(
            &kurbo::Stroke::new(AXIS_WIDTH).with_caps(Cap::Square),
            transform,
            peniko::BrushRef::Solid(Color::BLACK),
            None,
            &kurbo::Line::new(from, to),
        );
    }

    fn draw_x_axis(&self, scene: &mut Scene, transform: Affine) {
        let y = self.layout.inner_bottom();
        self.stroke_segment(
            scene,
            transform,
            Point::new(self.layout.inner_left(), y),
            Point::new(self.layout.inner_right(), y),
        );

        for tick in self.layout.data_bounds.x.ticks(TICK_COUNT) {
            let x = self.layout.transform_x(tick);
            self.stroke_segment(
                scene,
                transform,
                Point::new(x, y),
                Point::new(x, y + TICK_LENGTH),
            );
            if let Some(face) = self.typeface {
                face.draw(
                    scene,
                    transform,
                    &tick_label(tick),
                    Point::new(x, y + TICK_LENGTH + 2.0),
                    &X_TICK_LABEL,
                );
            }
        }
    }

    fn draw_y_axis(&self, scene: &mut Scene, transform: Affine) {
        let x = self.layout.inner_left();
        self.stroke_segment(
            scene,
            transform,
            Point::new(x, self.layout.inner_bottom()),
            Point::new(x, self.layout.inner_top()),
        );

        for tick in self.layout.data_bounds.y.ticks(TICK_COUNT) {
            let y = self.layout.transform_y(tick);
            self.stroke_segment(
                scene,
                transform,
                Point::new(x - TICK_LENGTH, y),
                Point::new(x, y),
            );
            if let Some(face) = self.typeface {
                face.draw(
                    scene,
                    transform,
                    &tick_label(tick),
                    Point::new(x - TICK_LENGTH - 3.0, y),
                    &Y_TICK_LABEL,
                );
            }
        }
    }

    fn draw_labels(&self, scene: &mut Scene, transform: Affine) {
        let Some(face) = self.typeface else {
            return;
        };
        let layout = self.layout;
        let center_x = (layout.inner_left() + layout.inner_right()) / 2.0;
        let center_y = (layout.inner_top() + layout.inner_bottom()) / 2.0;

        face.draw(
            scene,
            transform,
            &self.chart.title,
            Point::new(center_x, layout.inner_top() - 14.0),
            &TITLE,
        );
        face.draw(
            scene,
            transform,
            &self.chart.x_label,
            Point::new(center_x, layout.logical_height - 14.0),
            &AXIS_LABEL,
        );
        face.draw(
            scene,
            transform,
            &self.chart.y_label,
            Point::new(22.0, center_y),
            &AXIS_LABEL.rotated(-FRAC_PI_2),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::palette_color;
    use crate::layout::PlotLayout;

    fn paint(chart: &Chart) -> Scene {
        let layout = PlotLayout::new().instantiate(2.0, chart.data_bounds());
        ChartPainter {
            chart,
            layout: &layout,
            typeface: None,
        }
        .paint()
    }

    #[test]
    fn paints_lines_and_bars() {
        let chart = Chart::new("mixed")
            .with_layer(DataLayer::Line {
                xs: vec![0.0, 1.0, 2.0],
                ys: vec![0.0, 1.0, 0.0],
                color: palette_color(1),
                width: 1.0,
            })
            .with_layer(DataLayer::Bar {
                xs: vec![(0.0, 1.0), (1.0, 2.0)],
                ys: vec![0.3, 0.7],
                color: palette_color(0),
            });
        assert!(!paint(&chart).encoding().is_empty());
    }

    #[test]
    fn paints_axes_for_empty_chart() {
        let scene = paint(&Chart::new("empty").with_x_label("x").with_y_label("y"));
        assert!(!scene.encoding().is_empty());
    }

    #[test]
    fn single_point_line() {
        let chart = Chart::new("dot").with_layer(DataLayer::Line {
            xs: vec![0.0],
            ys: vec![0.0],
            color: palette_color(2),
            width: 1.0,
        });
        paint(&chart);
    }
}
