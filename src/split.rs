/// Layout of the two result panes and the gutter between them.
///
/// Sizes are kept as percentages of the space left after the gutter, so a
/// window resize keeps the proportions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Split {
    pub min_size: f64,
    pub gutter_size: f64,
    pub snap_offset: f64,
    pub drag_interval: f64,
    left_percent: f64,
}

impl Default for Split {
    fn default() -> Self {
        Split {
            min_size: 300.0,
            gutter_size: 10.0,
            snap_offset: 30.0,
            drag_interval: 1.0,
            left_percent: 50.0,
        }
    }
}

impl Split {
    /// (left, right) in percent.
    pub fn sizes(&self) -> (f64, f64) {
        (self.left_percent, 100.0 - self.left_percent)
    }

    /// Move the gutter so its centre follows the pointer. `pointer_offset`
    /// is relative to the left edge of the container.
    pub fn resize(&mut self, container_width: f64, pointer_offset: f64) {
        let available = container_width - self.gutter_size;

        if available < 2.0 * self.min_size {
            self.left_percent = 50.0;
            return;
        }

        let mut left = pointer_offset - self.gutter_size / 2.0;

        if self.drag_interval > 0.0 {
            left = (left / self.drag_interval).round() * self.drag_interval;
        }

        let max = available - self.min_size;

        if left <= self.min_size + self.snap_offset {
            left = self.min_size;
        } else if left >= max - self.snap_offset {
            left = max;
        }

        self.left_percent = left / available * 100.0;
    }

    /// Inline style for a pane of `percent` width.
    pub fn pane_style(&self, percent: f64) -> String {
        format!(
            "flex-basis: calc({}% - {}px);",
            percent,
            self.gutter_size / 2.0
        )
    }

    pub fn gutter_style(&self) -> String {
        format!("flex: 0 0 {}px; cursor: col-resize;", self.gutter_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn left_px(split: &Split, container_width: f64) -> f64 {
        split.sizes().0 / 100.0 * (container_width - split.gutter_size)
    }

    #[test]
    fn starts_even() {
        let split = Split::default();
        assert_eq!(split.sizes(), (50.0, 50.0));
        assert_eq!(split.pane_style(50.0), "flex-basis: calc(50% - 5px);");
    }

    #[test]
    fn follows_the_pointer() {
        let mut split = Split::default();
        split.resize(1010.0, 505.0);
        assert_eq!(split.sizes(), (50.0, 50.0));

        split.resize(1010.0, 405.0);
        assert_eq!(left_px(&split, 1010.0), 400.0);
    }

    #[test]
    fn rounds_to_the_drag_interval() {
        let mut split = Split::default();
        split.resize(1010.0, 455.4);
        assert_eq!(left_px(&split, 1010.0), 450.0);
    }

    #[test]
    fn snaps_to_the_minimum_near_either_edge() {
        let mut split = Split::default();

        split.resize(1010.0, 330.0);
        assert_eq!(left_px(&split, 1010.0), 300.0);

        split.resize(1010.0, 0.0);
        assert_eq!(left_px(&split, 1010.0), 300.0);

        split.resize(1010.0, 690.0);
        assert_eq!(left_px(&split, 1010.0), 700.0);

        split.resize(1010.0, 2000.0);
        assert_eq!(left_px(&split, 1010.0), 700.0);
    }

    #[test]
    fn narrow_containers_split_evenly() {
        let mut split = Split::default();
        split.resize(1010.0, 405.0);
        split.resize(600.0, 100.0);
        assert_eq!(split.sizes(), (50.0, 50.0));
    }
}
