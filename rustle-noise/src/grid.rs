//! Lazy ranges and grids for sampling a noise field onto a raster.

/// A lazy range over `[start, end)` with an arbitrary, possibly negative or
/// fractional, step.
///
/// Values are computed as `start + i·step`, so long ranges do not
/// accumulate rounding error. A zero or wrongly signed step yields nothing.
#[derive(Debug, Clone)]
pub struct Range {
    start: f64,
    step: f64,
    index: usize,
    len: usize,
}

/// Creates a [`Range`] over `[start, end)` advancing by `step`.
#[must_use]
pub fn range(start: f64, end: f64, step: f64) -> Range {
    let steps = (end - start - f64::EPSILON) / step;
    let len = if steps > 0.0 && steps.is_finite() {
        steps.ceil() as usize
    } else {
        0
    };
    Range {
        start,
        step,
        index: 0,
        len,
    }
}

impl Iterator for Range {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            return None;
        }
        let value = self.start + self.index as f64 * self.step;
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Range {}

/// Row-major iterator applying a function over the product of two ranges.
///
/// Yields `f(x, y)` for every `x` of the outer range and every `y` of the
/// inner range, with `y` varying fastest.
#[derive(Debug, Clone)]
pub struct FlatGrid<F> {
    xs: Range,
    ys: Range,
    row: Range,
    x: Option<f64>,
    f: F,
}

/// Creates a [`FlatGrid`] over `x_range × y_range`.
pub fn flat_grid<T, F>(x_range: Range, y_range: Range, f: F) -> FlatGrid<F>
where
    F: FnMut(f64, f64) -> T,
{
    FlatGrid {
        xs: x_range,
        row: y_range.clone(),
        ys: y_range,
        x: None,
        f,
    }
}

impl<T, F> Iterator for FlatGrid<F>
where
    F: FnMut(f64, f64) -> T,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            if let Some(x) = self.x
                && let Some(y) = self.row.next()
            {
                return Some((self.f)(x, y));
            }
            self.x = Some(self.xs.next()?);
            self.row = self.ys.clone();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let current = if self.x.is_some() { self.row.len() } else { 0 };
        match self
            .xs
            .len()
            .checked_mul(self.ys.len())
            .and_then(|rest| rest.checked_add(current))
        {
            Some(remaining) => (remaining, Some(remaining)),
            None => (usize::MAX, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rounded(values: impl Iterator<Item = f64>) -> Vec<String> {
        values.map(|value| format!("{value:.1}")).collect()
    }

    #[test]
    fn test_includes_start_excludes_end() {
        assert_eq!(range(0.0, 1.0, 1.0).collect::<Vec<_>>(), vec![0.0]);
        assert_eq!(range(0.0, 10.0, 1.0).len(), 10);
        assert_eq!(range(8.0, 12.0, 1.0).collect::<Vec<_>>(), vec![8.0, 9.0, 10.0, 11.0]);
    }

    #[test]
    fn test_integer_steps() {
        assert_eq!(
            range(0.0, 10.0, 2.0).collect::<Vec<_>>(),
            vec![0.0, 2.0, 4.0, 6.0, 8.0]
        );
    }

    #[test]
    fn test_fractional_steps() {
        assert_eq!(range(2.0, 4.0, 0.5).collect::<Vec<_>>(), vec![2.0, 2.5, 3.0, 3.5]);
        let expected: Vec<String> = (0..20).map(|i| format!("{:.1}", f64::from(i) / 10.0)).collect();
        assert_eq!(rounded(range(0.0, 2.0, 0.1)), expected);
        assert_eq!(range(0.0, 1.0, 0.1).len(), 10);
    }

    #[test]
    fn test_negative_steps() {
        assert_eq!(
            range(4.0, -3.0, -1.0).collect::<Vec<_>>(),
            vec![4.0, 3.0, 2.0, 1.0, 0.0, -1.0, -2.0]
        );
        assert_eq!(
            rounded(range(40.0, 38.0, -0.2)),
            ["40.0", "39.8", "39.6", "39.4", "39.2", "39.0", "38.8", "38.6", "38.4", "38.2"]
        );
    }

    #[test]
    fn test_empty_ranges() {
        assert_eq!(range(4.0, 5.0, -1.0).count(), 0);
        assert_eq!(range(5.0, 4.0, 1.0).count(), 0);
        assert_eq!(range(0.0, 4.0, 0.0).count(), 0);
        assert_eq!(range(0.0, f64::NAN, 1.0).count(), 0);
    }

    #[test]
    fn test_flat_grid_order() {
        let cells: Vec<(f64, f64)> =
            flat_grid(range(0.0, 2.0, 1.0), range(0.0, 3.0, 1.0), |x, y| (x, y)).collect();
        assert_eq!(
            cells,
            vec![(0.0, 0.0), (0.0, 1.0), (0.0, 2.0), (1.0, 0.0), (1.0, 1.0), (1.0, 2.0)]
        );
    }

    #[test]
    fn test_flat_grid_fractional() {
        let grid = flat_grid(range(0.0, 2.0, 1.0), range(0.0, 1.0, 0.1), |_, y| y);
        assert_eq!(grid.size_hint(), (20, Some(20)));
        assert_eq!(grid.count(), 20);
    }

    #[test]
    fn test_flat_grid_large() {
        let grid = flat_grid(range(0.0, 100.0, 0.1), range(0.0, 100.0, 0.1), |_, _| ());
        assert_eq!(grid.count(), 1_000 * 1_000);
    }

    #[test]
    fn test_flat_grid_size_hint_saturates() {
        let huge = || range(0.0, 1e18, 1.0);
        let grid = flat_grid(huge(), huge(), |x, y| x + y);
        assert_eq!(grid.size_hint(), (usize::MAX, None));

        let mut grid = flat_grid(range(0.0, 3.0, 1.0), range(0.0, 4.0, 1.0), |x, y| x + y);
        grid.next();
        assert_eq!(grid.size_hint(), (11, Some(11)));
    }

    #[test]
    fn test_flat_grid_empty_rows() {
        let grid = flat_grid(range(0.0, 5.0, 1.0), range(0.0, 0.0, 1.0), |x, y| x + y);
        assert_eq!(grid.count(), 0);
    }
}
