//! Shared helpers for width-mapped progress bars.

use crate::shared::de::clamp_percent;

/// CSS width for a percentage, clamped to `[0, 100]`. Whole values drop the fraction.
pub fn width(percent: f64) -> String {
    let p = clamp_percent(percent);
    if p.fract() == 0.0 {
        format!("{}%", p as u32)
    } else {
        format!("{:.1}%", p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_are_clamped_and_trimmed() {
        assert_eq!(width(0.0), "0%");
        assert_eq!(width(42.0), "42%");
        assert_eq!(width(42.26), "42.3%");
        assert_eq!(width(250.0), "100%");
        assert_eq!(width(-5.0), "0%");
        assert_eq!(width(f64::NAN), "0%");
    }
}
