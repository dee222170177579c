/// Capacity lost per week of delayed maintenance, as a fraction of nominal.
pub const DECAY_PER_WEEK: f64 = 0.1;
pub const MIN_CAPACITY_FACTOR: f64 = 0.2;

pub fn capacity_factor(weeks: u32) -> f64 {
    (1.0 - DECAY_PER_WEEK * weeks as f64).max(MIN_CAPACITY_FACTOR)
}

pub fn effective_capacity(base_capacity_gal: f64, weeks: u32) -> f64 {
    base_capacity_gal * capacity_factor(weeks)
}
