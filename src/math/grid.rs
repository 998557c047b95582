//! Sample grids and phase unwrapping.

/// `n` evenly spaced samples over `[start, end]`, both ends included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n as f64 - 1.0);
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// `n` log-spaced samples from `10^start_decade` to `10^end_decade`.
pub fn logspace(start_decade: f64, end_decade: f64, n: usize) -> Vec<f64> {
    linspace(start_decade, end_decade, n)
        .into_iter()
        .map(|e| 10f64.powf(e))
        .collect()
}

/// Unwrap a phase sequence (degrees) so consecutive samples differ by at most 180°.
pub fn unwrap_degrees(phases: &mut [f64]) {
    let mut offset = 0.0;
    for i in 1..phases.len() {
        let prev = phases[i - 1];
        let mut current = phases[i] + offset;
        let mut delta = current - prev;
        while delta > 180.0 {
            offset -= 360.0;
            current -= 360.0;
            delta -= 360.0;
        }
        while delta < -180.0 {
            offset += 360.0;
            current += 360.0;
            delta += 360.0;
        }
        phases[i] = current;
    }
}
