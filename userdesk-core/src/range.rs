//! Bounds handling for range filters.

/// Range used when a column declares none and no values are known.
pub const FALLBACK_RANGE: (f64, f64) = (0.0, 100.0);

/// Which end of a range is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Min,
    Max,
}

/// Bounds for a range column: the declared range, else the observed
/// min/max of the column values, else [`FALLBACK_RANGE`].
pub fn resolve_range(declared: Option<(f64, f64)>, values: &[f64]) -> (f64, f64) {
    if let Some((min, max)) = declared.filter(|(min, max)| min <= max) {
        return (min, max);
    }
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let observed = finite.fold(None, |acc: Option<(f64, f64)>, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    });
    observed.unwrap_or(FALLBACK_RANGE)
}

/// Apply typed text to one bound of a range value.
///
/// Empty text always clears the bound. A number is accepted when it lies
/// inside the bounds and does not cross the other end; a blank or
/// unparseable other end counts as the outer bound. Returns `None` when
/// the input is rejected.
pub fn range_bound_update(
    current: (&str, &str),
    bound: Bound,
    raw: &str,
    (min, max): (f64, f64),
) -> Option<(String, String)> {
    let raw = raw.trim();
    let (from, to) = current;
    let other = match bound {
        Bound::Min => to,
        Bound::Max => from,
    };

    if !raw.is_empty() {
        let value: f64 = raw.parse().ok().filter(|v: &f64| v.is_finite())?;
        let other_num = other.trim().parse::<f64>().ok().filter(|v| v.is_finite());
        let accepted = match bound {
            Bound::Min => value >= min && value <= other_num.unwrap_or(max),
            Bound::Max => value <= max && value >= other_num.unwrap_or(min),
        };
        if !accepted {
            return None;
        }
    }

    Some(match bound {
        Bound::Min => (raw.to_string(), other.to_string()),
        Bound::Max => (other.to_string(), raw.to_string()),
    })
}

/// Slider step for a range: fine for narrow spans, coarser for wide ones.
pub fn slider_step(min: f64, max: f64) -> f64 {
    let span = max - min;
    if span <= 20.0 {
        1.0
    } else if span <= 100.0 {
        (span / 20.0).ceil()
    } else {
        (span / 50.0).ceil()
    }
}

/// Display text of a bound, without fractional digits.
pub fn format_bound(text: &str) -> String {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => format!("{:.0}", v),
        _ => String::new(),
    }
}
