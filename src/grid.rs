use crate::Float;

use std::ops::Index;

use anyhow::ensure;

/// Uniformly spaced cell boundaries over `[x_min, x_max]`.
///
/// A grid of `n_x` points defines `n_x - 1` half-open cells `[grid[j], grid[j + 1])`.
/// The last point is the right edge of the domain and belongs to no cell.
#[derive(Clone, Debug)]
pub struct Grid {
    points: Vec<Float>,
    dx: Float,
}

impl Grid {
    pub fn uniform(n_x: usize, x_min: Float, x_max: Float) -> anyhow::Result<Self> {
        ensure!(n_x >= 2, "a grid needs at least 2 points, got {}", n_x);
        ensure!(
            x_min.is_finite() && x_max.is_finite(),
            "grid bounds must be finite, got [{}, {}]",
            x_min,
            x_max
        );
        ensure!(
            x_max > x_min,
            "grid upper bound {} must be greater than lower bound {}",
            x_max,
            x_min
        );
        let width = x_max - x_min;
        ensure!(
            width.is_finite(),
            "grid width of [{}, {}] overflows",
            x_min,
            x_max
        );

        let dx = width / (n_x - 1) as Float;
        ensure!(
            dx > 0.0,
            "{} points over [{}, {}] leave no spacing between them",
            n_x,
            x_min,
            x_max
        );
        let mut points: Vec<Float> = (0..n_x).map(|j| x_min + dx * j as Float).collect();
        // x_min + (n_x - 1) * dx can miss x_max by an ulp
        points[n_x - 1] = x_max;
        ensure!(
            points.windows(2).all(|w| w[0] < w[1]),
            "grid spacing {} is below float resolution on [{}, {}]",
            dx,
            x_min,
            x_max
        );

        debug!("built grid with {} points, dx = {}", n_x, dx);
        Ok(Grid { points, dx })
    }

    pub fn points(&self) -> &[Float] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn num_cells(&self) -> usize {
        self.points.len() - 1
    }

    pub fn dx(&self) -> Float {
        self.dx
    }

    pub fn x_min(&self) -> Float {
        self.points[0]
    }

    pub fn x_max(&self) -> Float {
        self.points[self.points.len() - 1]
    }

    /// Bounds of cell `j`, or `None` past the last cell.
    pub fn cell_bounds(&self, j: usize) -> Option<(Float, Float)> {
        if j < self.num_cells() {
            Some((self.points[j], self.points[j + 1]))
        } else {
            None
        }
    }

    /// Whether `x` lies in one of the half-open cells, i.e. in `[x_min, x_max)`.
    pub fn covers(&self, x: Float) -> bool {
        self.x_min() <= x && x < self.x_max()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Float> {
        self.points.iter()
    }
}

impl Index<usize> for Grid {
    type Output = Float;
    fn index(&self, index: usize) -> &Float {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Float;
    type IntoIter = std::slice::Iter<'a, Float>;
    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_small_grid_values() {
        let grid = Grid::uniform(5, 0.0, 4.0).unwrap();
        assert_eq!(grid.points(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(grid.num_cells(), 4);
        assert_eq!(grid.dx(), 1.0);
        assert_eq!(grid.cell_bounds(2), Some((2.0, 3.0)));
        assert_eq!(grid.cell_bounds(4), None);
    }

    #[test]
    fn test_grid_is_strictly_increasing() {
        for &n_x in &[2, 3, 7, 1024, 4097] {
            let grid = Grid::uniform(n_x, -PI, PI).unwrap();
            assert_eq!(grid.len(), n_x);
            assert!(grid.points().windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_grid_endpoints() {
        let grid = Grid::uniform(1000, -PI, PI).unwrap();
        assert_eq!(grid.x_min(), -PI);
        assert_eq!(grid.x_max(), PI);
        assert_abs_diff_eq!(grid[1] - grid[0], 2.0 * PI / 999.0, epsilon = 1e-12);
        assert_abs_diff_eq!(grid[998] + grid.dx(), PI, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_too_few_points() {
        assert!(Grid::uniform(0, 0.0, 1.0).is_err());
        let err = Grid::uniform(1, 0.0, 1.0).unwrap_err();
        assert!(err.to_string().contains("at least 2 points"));
    }

    #[test]
    fn test_rejects_bad_bounds() {
        assert!(Grid::uniform(10, 1.0, 1.0).is_err());
        assert!(Grid::uniform(10, 2.0, 1.0).is_err());
        assert!(Grid::uniform(10, 0.0, f64::INFINITY).is_err());
        assert!(Grid::uniform(10, f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_rejects_overflowing_width() {
        let err = Grid::uniform(3, -1e308, 1e308).unwrap_err();
        assert!(err.to_string().contains("overflows"));
        assert!(Grid::uniform(2, -f64::MAX, f64::MAX).is_err());
        // wide but representable
        let grid = Grid::uniform(3, -1e307, 1e307).unwrap();
        assert_eq!(grid.points(), &[-1e307, 0.0, 1e307]);
    }

    #[test]
    fn test_rejects_spacing_below_resolution() {
        // smallest subnormal split in two rounds the spacing away
        assert!(Grid::uniform(3, 0.0, 5e-324).is_err());
        // spacing smaller than an ulp of 1.0 repeats points
        assert!(Grid::uniform(1000, 1.0, 1.0 + 1e-14).is_err());
        assert!(Grid::uniform(2, 1.0, 1.0 + f64::EPSILON).is_ok());
    }

    #[test]
    fn test_covers() {
        let grid = Grid::uniform(5, 0.0, 4.0).unwrap();
        assert!(grid.covers(0.0));
        assert!(grid.covers(3.999));
        assert!(!grid.covers(4.0));
        assert!(!grid.covers(-0.1));
        assert!(!grid.covers(f64::NAN));
    }
}
