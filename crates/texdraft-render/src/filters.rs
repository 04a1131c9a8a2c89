//! Typesetting filters for numeric values.
//!
//! Registered on the [`LatexEngine`](crate::LatexEngine) so template
//! expressions can format numbers for LaTeX, e.g. `\VAR{flux|latex_exp}`.

/// Format a number in scientific notation with a typeset exponent.
///
/// `1.4123e-4` becomes `1.4$\times$10$^{-4}$`.
pub(crate) fn latex_exp(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    let mut exponent = value.abs().log10().floor() as i32;
    let mut mantissa = value / 10f64.powi(exponent);
    // Rounding to one decimal can push the mantissa to 10.0.
    if (mantissa * 10.0).round().abs() >= 100.0 {
        mantissa /= 10.0;
        exponent += 1;
    }
    format!("{mantissa:.1}$\\times$10$^{{{exponent}}}$")
}

/// General-purpose number formatting.
///
/// Values with a decimal exponent between -2 and 3 are written out in
/// plain decimal form; anything else falls back to [`latex_exp`].
pub(crate) fn latex_g(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    let exponent = value.abs().log10().floor() as i32;
    if (-2..=3).contains(&exponent) {
        value.to_string()
    } else {
        latex_exp(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn exp_negative_exponent() {
        assert_eq!(latex_exp(1.4123e-4), "1.4$\\times$10$^{-4}$");
    }

    #[test]
    fn exp_positive_exponent() {
        assert_eq!(latex_exp(6.022e23), "6.0$\\times$10$^{23}$");
    }

    #[test]
    fn exp_negative_value() {
        assert_eq!(latex_exp(-2.5e3), "-2.5$\\times$10$^{3}$");
    }

    #[test]
    fn exp_zero() {
        assert_eq!(latex_exp(0.0), "0");
    }

    #[test]
    fn exp_mantissa_rounds_up_to_next_decade() {
        assert_eq!(latex_exp(9.97e5), "1.0$\\times$10$^{6}$");
    }

    #[test]
    fn g_small_values_stay_plain() {
        assert_eq!(latex_g(0.25), "0.25");
        assert_eq!(latex_g(1400.0), "1400");
    }

    #[test]
    fn g_large_values_use_exp_form() {
        assert_eq!(latex_g(1.4123e-4), "1.4$\\times$10$^{-4}$");
        assert_eq!(latex_g(5.0e7), "5.0$\\times$10$^{7}$");
    }
}
