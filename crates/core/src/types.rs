/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Round a value to one decimal place for display.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
