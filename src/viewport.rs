use common::{Point, Segment};

const MARGIN_RATIO: f64 = 0.05;
// Fallback margin for an axis where every coordinate is equal, so the
// visible range always has positive extent.
const MIN_MARGIN: f64 = 0.5;

/// Visible coordinate range derived from the data, padded by 5% per axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Viewport {
    pub fn from_segments(segments: &[Segment]) -> Option<Viewport> {
        let first = segments.first()?;
        let mut x_min = first.src.x;
        let mut x_max = first.src.x;
        let mut y_min = first.src.y;
        let mut y_max = first.src.y;
        for segment in segments {
            for point in &[segment.src, segment.dst] {
                x_min = x_min.min(point.x);
                x_max = x_max.max(point.x);
                y_min = y_min.min(point.y);
                y_max = y_max.max(point.y);
            }
        }
        let (x_min, x_max) = pad(x_min, x_max);
        let (y_min, y_max) = pad(y_min, y_max);
        Some(Viewport { x_min, x_max, y_min, y_max })
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Uniform data-to-screen scale, centered, so equal data distances
    /// render equal on both axes.
    pub fn fit(&self, screen_w: f64, screen_h: f64) -> Mapping {
        let scale = (screen_w / self.width()).min(screen_h / self.height());
        Mapping {
            scale,
            x_min: self.x_min,
            y_min: self.y_min,
            origin_x: (screen_w - self.width() * scale) / 2.0,
            origin_y: screen_h - (screen_h - self.height() * scale) / 2.0,
        }
    }

    /// Grid spacing from the 1/2/5 ladder, sized so the larger axis
    /// carries roughly 5-10 lines.
    pub fn grid_step(&self) -> f64 {
        let raw = self.width().max(self.height()) / 8.0;
        let magnitude = 10f64.powf(raw.log10().floor());
        let scaled = raw / magnitude;
        let unit = if scaled < 1.5 {
            1.0
        } else if scaled < 3.5 {
            2.0
        } else if scaled < 7.5 {
            5.0
        } else {
            10.0
        };
        unit * magnitude
    }
}

fn pad(min: f64, max: f64) -> (f64, f64) {
    let margin = (max - min) * MARGIN_RATIO;
    let margin = if margin > 0.0 { margin } else { MIN_MARGIN };
    (min - margin, max + margin)
}

/// Data-to-screen transform produced by [`Viewport::fit`]. Screen y grows
/// downward, so the y axis is flipped.
#[derive(Clone, Copy, Debug)]
pub struct Mapping {
    scale: f64,
    x_min: f64,
    y_min: f64,
    origin_x: f64,
    origin_y: f64,
}

impl Mapping {
    pub fn apply(&self, point: Point) -> [f64; 2] {
        [
            self.origin_x + (point.x - self.x_min) * self.scale,
            self.origin_y - (point.y - self.y_min) * self.scale,
        ]
    }
}

/// Multiples of `step` falling inside `[min, max]`, in ascending order.
pub fn grid_marks(min: f64, max: f64, step: f64) -> Vec<f64> {
    let mut marks = Vec::new();
    let mut value = (min / step).ceil() * step;
    while value <= max {
        marks.push(value);
        value += step;
    }
    marks
}

#[cfg(test)]
mod tests {
    use super::{grid_marks, Viewport};
    use common::{Point, Segment};

    fn segment(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
        Segment {
            src: Point { x: x1, y: y1 },
            dst: Point { x: x2, y: y2 },
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {} to be close to {}",
            actual,
            expected
        );
    }

    #[test]
    fn empty_collection_has_no_viewport() {
        assert_eq!(Viewport::from_segments(&[]), None);
    }

    #[test]
    fn bounds_are_padded_five_percent_per_axis() {
        let vp = Viewport::from_segments(&[segment(0.0, 0.0, 10.0, 20.0)]).unwrap();
        assert_close(vp.x_min, -0.5);
        assert_close(vp.x_max, 10.5);
        assert_close(vp.y_min, -1.0);
        assert_close(vp.y_max, 21.0);
    }

    #[test]
    fn bounds_cover_both_endpoints_of_every_segment() {
        let vp = Viewport::from_segments(&[
            segment(5.0, 5.0, 6.0, 6.0),
            segment(-10.0, 2.0, 5.0, 30.0),
        ]).unwrap();
        assert!(vp.x_min < -10.0 && vp.x_max > 6.0);
        assert!(vp.y_min < 2.0 && vp.y_max > 30.0);
    }

    #[test]
    fn degenerate_axis_falls_back_to_minimum_margin() {
        let vp = Viewport::from_segments(&[segment(3.0, 0.0, 3.0, 10.0)]).unwrap();
        assert_close(vp.x_min, 2.5);
        assert_close(vp.x_max, 3.5);
        assert!(vp.width() > 0.0 && vp.height() > 0.0);
    }

    #[test]
    fn single_point_dataset_still_has_positive_extent() {
        let vp = Viewport::from_segments(&[segment(7.0, -2.0, 7.0, -2.0)]).unwrap();
        assert_close(vp.x_min, 6.5);
        assert_close(vp.x_max, 7.5);
        assert_close(vp.y_min, -2.5);
        assert_close(vp.y_max, -1.5);
    }

    #[test]
    fn fit_centers_the_short_axis_and_flips_y() {
        let vp = Viewport { x_min: 0.0, x_max: 10.0, y_min: 0.0, y_max: 10.0 };
        let mapping = vp.fit(100.0, 50.0);
        assert_eq!(mapping.apply(Point { x: 0.0, y: 0.0 }), [25.0, 50.0]);
        assert_eq!(mapping.apply(Point { x: 10.0, y: 10.0 }), [75.0, 0.0]);
        assert_eq!(mapping.apply(Point { x: 5.0, y: 5.0 }), [50.0, 25.0]);
    }

    #[test]
    fn fit_preserves_aspect_ratio() {
        let vp = Viewport { x_min: 0.0, x_max: 40.0, y_min: 0.0, y_max: 10.0 };
        let mapping = vp.fit(200.0, 200.0);
        let a = mapping.apply(Point { x: 0.0, y: 0.0 });
        let b = mapping.apply(Point { x: 10.0, y: 0.0 });
        let c = mapping.apply(Point { x: 0.0, y: 10.0 });
        // a unit square in data space stays square on screen
        assert_close(b[0] - a[0], a[1] - c[1]);
    }

    #[test]
    fn grid_step_follows_the_one_two_five_ladder() {
        let unit = Viewport { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 };
        assert_close(unit.grid_step(), 0.1);
        let wide = Viewport { x_min: 0.0, x_max: 700.0, y_min: 0.0, y_max: 500.0 };
        assert_close(wide.grid_step(), 100.0);
        let mid = Viewport { x_min: 0.0, x_max: 20.0, y_min: 0.0, y_max: 20.0 };
        assert_close(mid.grid_step(), 2.0);
    }

    #[test]
    fn grid_marks_stay_inside_the_range() {
        let marks = grid_marks(-0.5, 10.5, 1.0);
        assert_eq!(marks.len(), 11);
        assert_close(marks[0], 0.0);
        assert_close(marks[10], 10.0);
    }
}
