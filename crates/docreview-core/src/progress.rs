/// Upload progress as a percentage in [0, 100].
///
/// An unknown (or zero) total falls back to `loaded`, so progress reads 100 rather than
/// dividing by zero.
pub fn progress_percent(loaded: u64, total: Option<u64>) -> f64 {
    let total = match total {
        Some(t) if t > 0 => t,
        _ => loaded,
    };
    if total == 0 {
        return 0.0;
    }
    (loaded as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}
