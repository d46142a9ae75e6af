//! Evenly spaced Decimal grids for batch curve evaluation.

use rust_decimal::Decimal;

use crate::error::SocialFinanceError;
use crate::SocialFinanceResult;

/// Build an inclusive, evenly spaced grid of `steps` points from `start` to
/// `stop`. The final point is pinned to `stop` exactly so threshold overlays
/// line up with the grid endpoints.
pub fn linspace(start: Decimal, stop: Decimal, steps: usize) -> SocialFinanceResult<Vec<Decimal>> {
    if steps < 2 {
        return Err(SocialFinanceError::InvalidParameter {
            field: "steps".into(),
            reason: "A grid needs at least two points".into(),
        });
    }
    if stop < start {
        return Err(SocialFinanceError::InvalidParameter {
            field: "stop".into(),
            reason: format!("Grid end {} lies below grid start {}", stop, start),
        });
    }

    let step = (stop - start) / Decimal::from((steps - 1) as i64);
    let mut points = Vec::with_capacity(steps);
    for i in 0..steps - 1 {
        points.push(start + step * Decimal::from(i as i64));
    }
    points.push(stop);
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_linspace_endpoints_and_length() {
        let g = linspace(dec!(0), dec!(140), 50).unwrap();
        assert_eq!(g.len(), 50);
        assert_eq!(g[0], dec!(0));
        assert_eq!(*g.last().unwrap(), dec!(140));
    }

    #[test]
    fn test_linspace_even_spacing() {
        let g = linspace(dec!(10), dec!(20), 5).unwrap();
        assert_eq!(g, vec![dec!(10), dec!(12.5), dec!(15), dec!(17.5), dec!(20)]);
    }

    #[test]
    fn test_linspace_rejects_single_point() {
        assert!(linspace(dec!(0), dec!(1), 1).is_err());
    }

    #[test]
    fn test_linspace_rejects_inverted_range() {
        assert!(linspace(dec!(5), dec!(1), 10).is_err());
    }
}
