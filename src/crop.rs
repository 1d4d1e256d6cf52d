//! Center-crop geometry and box relocation.
//!
//! A `CropWindow` is recomputed per image because source images may vary in
//! size within one dataset. Boxes are rejected rather than clipped when they
//! touch the crop boundary: a clipped box would carry a label for a
//! partially visible light, which downstream training must not see.

use crate::types::{BoundingBox, CroppedBox};

/// A centered crop region inside a specific source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    pub margin_left: u32,
    pub margin_top: u32,
    pub width: u32,
    pub height: u32,
}

/// Surviving boxes of one record, plus per-box drop counts.
#[derive(Debug, Default)]
pub struct FilterResult {
    pub boxes: Vec<CroppedBox>,
    pub dropped_degenerate: usize,
    pub dropped_outside: usize,
}

// Round half away from zero, the rounding rule used for all annotation
// coordinates. f64::round already implements it.
fn round_coord(value: f64) -> i64 {
    value.round() as i64
}

// Integer span of a box, or None when it is degenerate. Swapped min/max
// coordinates collapse to a non-positive extent and are treated the same.
fn rounded_span(bx: &BoundingBox) -> Option<(i64, i64, i64, i64)> {
    let x_min = round_coord(bx.x_min);
    let y_min = round_coord(bx.y_min);
    let x_max = round_coord(bx.x_max);
    let y_max = round_coord(bx.y_max);
    if x_max - x_min <= 0 || y_max - y_min <= 0 {
        return None;
    }
    Some((x_min, y_min, x_max, y_max))
}

impl CropWindow {
    /// Compute the centered crop for a source image, trimming any odd
    /// remainder from the bottom/right. Returns `None` when the image is
    /// smaller than the target along either axis; padding is out of scope.
    pub fn centered(
        orig_width: u32,
        orig_height: u32,
        target_width: u32,
        target_height: u32,
    ) -> Option<Self> {
        if orig_width < target_width || orig_height < target_height {
            return None;
        }
        Some(Self {
            margin_left: (orig_width - target_width) / 2,
            margin_top: (orig_height - target_height) / 2,
            width: target_width,
            height: target_height,
        })
    }

    // A coordinate survives only strictly inside the window span; exact
    // contact with either edge is a rejection, not a clip.
    fn inside(&self, x_min: i64, y_min: i64, x_max: i64, y_max: i64) -> bool {
        let left = self.margin_left as i64;
        let right = left + self.width as i64;
        let top = self.margin_top as i64;
        let bottom = top + self.height as i64;
        [x_min, x_max].iter().all(|&x| x > left && x < right)
            && [y_min, y_max].iter().all(|&y| y > top && y < bottom)
    }

    /// Translate one box into crop-local coordinates, or `None` when it is
    /// degenerate or not entirely inside the window.
    pub fn relocate(&self, bx: &BoundingBox) -> Option<CroppedBox> {
        let (x_min, y_min, x_max, y_max) = rounded_span(bx)?;
        if !self.inside(x_min, y_min, x_max, y_max) {
            return None;
        }
        Some(CroppedBox {
            label: bx.label.clone(),
            occluded: bx.occluded,
            x_max: x_max - self.margin_left as i64,
            x_min: x_min - self.margin_left as i64,
            y_max: y_max - self.margin_top as i64,
            y_min: y_min - self.margin_top as i64,
            extra: bx.extra.clone(),
        })
    }

    /// Filter and translate all boxes of one record, counting the drops.
    pub fn filter_boxes(&self, boxes: &[BoundingBox]) -> FilterResult {
        let mut result = FilterResult::default();
        for bx in boxes {
            if rounded_span(bx).is_none() {
                result.dropped_degenerate += 1;
            } else {
                match self.relocate(bx) {
                    Some(cropped) => result.boxes.push(cropped),
                    None => result.dropped_outside += 1,
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_box(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> BoundingBox {
        BoundingBox {
            label: "Green".to_string(),
            occluded: Some(false),
            x_max,
            x_min,
            y_max,
            y_min,
            extra: Default::default(),
        }
    }

    #[test]
    fn test_centered_margins() {
        let window = CropWindow::centered(1280, 720, 960, 720).unwrap();
        assert_eq!(window.margin_left, 160);
        assert_eq!(window.margin_top, 0);

        // Odd remainders are floored, trimming more from the bottom/right.
        let window = CropWindow::centered(1281, 723, 960, 720).unwrap();
        assert_eq!(window.margin_left, 160);
        assert_eq!(window.margin_top, 1);
    }

    #[test]
    fn test_centered_rejects_small_images() {
        assert!(CropWindow::centered(959, 720, 960, 720).is_none());
        assert!(CropWindow::centered(960, 719, 960, 720).is_none());
        assert!(CropWindow::centered(960, 720, 960, 720).is_some());
    }

    #[test]
    fn test_translation() {
        let window = CropWindow::centered(1200, 720, 960, 720).unwrap();
        assert_eq!(window.margin_left, 120);
        let relocated = window.relocate(&make_box(200.0, 50.0, 260.0, 90.0)).unwrap();
        assert_eq!(
            (relocated.x_min, relocated.y_min, relocated.x_max, relocated.y_max),
            (80, 50, 140, 90)
        );
        assert_eq!(relocated.label, "Green");
        assert_eq!(relocated.occluded, Some(false));
    }

    #[test]
    fn test_straddling_box_rejected() {
        let window = CropWindow::centered(1200, 720, 960, 720).unwrap();
        // Straddles the cropped-away left strip.
        assert!(window.relocate(&make_box(100.0, 10.0, 200.0, 50.0)).is_none());
        // Straddles the right edge.
        assert!(window.relocate(&make_box(1000.0, 10.0, 1100.0, 50.0)).is_none());
    }

    #[test]
    fn test_boundary_contact_rejected_not_clipped() {
        let window = CropWindow::centered(1200, 900, 960, 720).unwrap();
        assert_eq!((window.margin_left, window.margin_top), (120, 90));
        // Exactly on the left edge.
        assert!(window.relocate(&make_box(120.0, 100.0, 150.0, 140.0)).is_none());
        // Exactly on the right edge (margin_left + width = 1080).
        assert!(window.relocate(&make_box(1000.0, 100.0, 1080.0, 140.0)).is_none());
        // Exactly on the top and bottom edges.
        assert!(window.relocate(&make_box(200.0, 90.0, 250.0, 140.0)).is_none());
        assert!(window.relocate(&make_box(200.0, 700.0, 250.0, 810.0)).is_none());
        // One pixel inside all four edges survives.
        assert!(window.relocate(&make_box(121.0, 91.0, 1079.0, 809.0)).is_some());
    }

    #[test]
    fn test_degenerate_and_swapped_boxes_rejected() {
        let window = CropWindow::centered(1200, 900, 960, 720).unwrap();
        assert!(window.relocate(&make_box(300.0, 300.0, 300.0, 340.0)).is_none());
        assert!(window.relocate(&make_box(300.0, 300.0, 340.0, 300.0)).is_none());
        // Swapped min/max collapses to a non-positive extent.
        assert!(window.relocate(&make_box(340.0, 300.0, 300.0, 360.0)).is_none());
    }

    #[test]
    fn test_fractional_coordinates_round_half_away_from_zero() {
        let window = CropWindow::centered(1200, 900, 960, 720).unwrap();
        let relocated = window
            .relocate(&make_box(200.5, 100.4, 260.5, 140.6))
            .unwrap();
        assert_eq!(
            (relocated.x_min, relocated.y_min, relocated.x_max, relocated.y_max),
            (201 - 120, 100 - 90, 261 - 120, 141 - 90)
        );
    }

    #[test]
    fn test_filter_boxes_counts_drops() {
        let window = CropWindow::centered(1200, 900, 960, 720).unwrap();
        let boxes = vec![
            make_box(200.0, 100.0, 260.0, 140.0), // inside
            make_box(100.0, 100.0, 200.0, 140.0), // straddles left strip
            make_box(300.0, 300.0, 300.0, 340.0), // zero width
        ];
        let result = window.filter_boxes(&boxes);
        assert_eq!(result.boxes.len(), 1);
        assert_eq!(result.dropped_outside, 1);
        assert_eq!(result.dropped_degenerate, 1);
    }

    #[test]
    fn test_zero_margin_passthrough() {
        let window = CropWindow::centered(960, 720, 960, 720).unwrap();
        let relocated = window.relocate(&make_box(80.0, 50.0, 140.0, 90.0)).unwrap();
        assert_eq!(
            (relocated.x_min, relocated.y_min, relocated.x_max, relocated.y_max),
            (80, 50, 140, 90)
        );
    }
}
