use std::collections::HashSet;

use super::*;

#[test]
fn single_record_sits_on_band_bottom() {
    let vp = Viewport::default();
    let p = layout(1, vp, 10);
    assert_eq!(p.len(), 1);
    assert_eq!((p[0].row, p[0].col), (0, 0));
    assert!(p[0].x.is_finite() && p[0].y.is_finite());
    assert_eq!(p[0].x, 140.0);
    assert!((p[0].y - 900.0 * 0.92).abs() < 1e-9);
}

#[test]
fn no_two_records_share_a_cell() {
    let vp = Viewport::default();
    for n in 0..=500 {
        let positions = layout(n, vp, 10);
        let expected = if n == 0 { PLACEHOLDER_SLOTS } else { n };
        assert_eq!(positions.len(), expected);
        let cells: HashSet<(usize, usize)> = positions.iter().map(|p| (p.row, p.col)).collect();
        assert_eq!(cells.len(), positions.len(), "n={n}");
        assert!(positions.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }
}

#[test]
fn columns_span_between_margins() {
    let vp = Viewport::default();
    let p = layout(10, vp, 10);
    assert_eq!(p[0].x, 140.0);
    assert!((p[9].x - (1600.0 - 140.0)).abs() < 1e-9);
    assert!(p.iter().all(|q| q.row == 0));
}

#[test]
fn higher_rows_sit_above_lower_rows() {
    let vp = Viewport::default();
    let p = layout(25, vp, 10);
    assert_eq!((p[24].row, p[24].col), (2, 4));
    assert!(p[10].y < p[0].y);
    assert!(p[20].y < p[10].y);
    assert!((p[20].y - 900.0 * 0.66).abs() < 1e-9);
}

#[test]
fn single_column_pins_to_center() {
    let vp = Viewport::new(400.0, 300.0).unwrap();
    let p = layout(3, vp, 1);
    assert!(p.iter().all(|q| q.x == 200.0 && q.col == 0));
    assert_eq!(p.iter().map(|q| q.row).collect::<Vec<_>>(), vec![0, 1, 2]);
}

#[test]
fn zero_columns_is_treated_as_one() {
    let p = layout(2, Viewport::default(), 0);
    assert_eq!(p.iter().map(|q| (q.row, q.col)).collect::<Vec<_>>(), vec![(0, 0), (1, 0)]);
}

#[test]
fn placeholder_grid_is_fixed() {
    let vp = Viewport::default();
    assert_eq!(layout(0, vp, 10), layout(PLACEHOLDER_SLOTS, vp, 10));
}

#[test]
fn narrow_viewport_keeps_points_inside() {
    let vp = Viewport::new(100.0, 100.0).unwrap();
    for p in layout(30, vp, 10) {
        assert!((0.0..=100.0).contains(&p.x));
        assert!((0.0..=100.0).contains(&p.y));
    }
}
