//! Axis tick placement and labels.

/// Picks evenly spaced "nice" tick values (steps of 1, 2, 2.5 or 5 times a
/// power of ten) covering `[lo, hi]`, aiming for about `target` intervals.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn nice_ticks(lo: f32, hi: f32, target: usize) -> Vec<f32> {
    let step = nice_step(lo, hi, target);
    if step <= 0.0 {
        return Vec::new();
    }
    let (lo, hi) = (f64::from(lo), f64::from(hi));
    let first = (lo / step).ceil() as i64;
    let last = (hi / step + 1e-9).floor() as i64;
    (first..=last).map(|k| (k as f64 * step) as f32).collect()
}

/// Tick spacing used by [`nice_ticks`], or 0 when the range is empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn nice_step(lo: f32, hi: f32, target: usize) -> f64 {
    let span = f64::from(hi) - f64::from(lo);
    if !span.is_finite() || span <= 0.0 || target == 0 {
        return 0.0;
    }
    let raw = span / target as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let norm = raw / magnitude;
    let nice = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .find(|&n| n >= norm - 1e-9)
        .unwrap_or(10.0);
    nice * magnitude
}

/// Formats a tick value with just enough decimals for the step size.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn format_tick(value: f32, step: f64) -> String {
    let decimals = (0..=6)
        .find(|&d| {
            let scaled = step * 10f64.powi(d);
            (scaled - scaled.round()).abs() < 1e-6 * scaled.max(1.0)
        })
        .unwrap_or(6);
    let text = format!("{:.*}", decimals as usize, value);
    // Avoid "-0" and "-0.00".
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_string()
    } else {
        text
    }
}
