/// Tolerance used for every numeric equality and integrality check in the
/// language. Two numbers closer than this are considered equal; a number this
/// close to a whole value is considered integral.
pub const EPSILON: f64 = 1e-10;

/// Compares two numbers for equality within [`EPSILON`].
///
/// This is the only notion of numeric equality the language has: `==`, the
/// inclusive comparison operators, division-by-zero detection and range
/// stepping all go through it.
///
/// # Example
/// ```
/// use rill::util::num::nums_equal;
///
/// assert!(nums_equal(0.1 + 0.2, 0.3));
/// assert!(!nums_equal(1.0, 1.001));
/// ```
#[must_use]
pub fn nums_equal(left: f64, right: f64) -> bool {
    (left - right).abs() < EPSILON
}

/// Returns `true` when the number is within [`EPSILON`] of a whole value.
///
/// # Example
/// ```
/// use rill::util::num::is_integral;
///
/// assert!(is_integral(3.0));
/// assert!(is_integral(2.999_999_999_999_9));
/// assert!(!is_integral(2.5));
/// ```
#[must_use]
pub fn is_integral(value: f64) -> bool {
    nums_equal(value, value.round())
}

/// Rounds a number to the nearest integer the way the indexing rules expect.
///
/// Callers check [`is_integral`] first; this merely performs the rounding
/// with a saturating cast so absurd inputs cannot wrap.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_to_int(value: f64) -> i64 {
    value.round() as i64
}
