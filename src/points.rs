//! The tiered formula for converting a purchase price into reward points.

/// Calculate the reward points earned for a purchase of `price` dollars.
///
/// Points are awarded in two bands: one point per whole dollar spent over $50
/// up to $100, then two points per dollar spent over $100 on top of the 50
/// points the first band maxes out at. Fractional points are floored, so
/// $100.40 earns 50 points while $100.60 earns 51.
///
/// Prices that are not finite or not greater than zero earn zero points
/// rather than producing an error.
pub fn reward_points(price: f64) -> u64 {
    if !price.is_finite() || price <= 0.0 {
        return 0;
    }

    let points = if price > 100.0 {
        50.0 + (price - 100.0) * 2.0
    } else if price > 50.0 {
        price - 50.0
    } else {
        0.0
    };

    points.floor() as u64
}
