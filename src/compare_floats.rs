pub fn max_of_2<T: PartialOrd + Copy>(first: T, second: T) -> T {
    if first > second {
        first
    } else {
        second
    }
}

/// Floors a value at zero. NaN inputs come back as zero.
pub(crate) fn clamp_non_negative(value: f64) -> f64 {
    max_of_2(value, 0.)
}
