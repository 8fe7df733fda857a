//! DecimalFormat-style number rendering.
//!
//! Patterns follow the familiar subset: `#` optional digit, `0` required
//! digit, `,` grouping, `.` fraction separator, `%` percent scaling, `¤`
//! currency-symbol placeholder. Rendering substitutes the locale's decimal
//! and grouping separators and rounds half-up to the pattern's maximum
//! fraction digits.

use crate::locale::NumberSymbols;
use crate::Error;

/// A compiled number pattern bound to a set of separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    prefix: String,
    suffix: String,
    group_size: usize,
    min_integer: usize,
    min_fraction: usize,
    max_fraction: usize,
    multiplier: i32,
    symbols: NumberSymbols,
}

impl NumberFormat {
    /// Compiles `pattern`, substituting `currency` for the `¤` placeholder.
    ///
    /// Fails with [`Error::InvalidPattern`] when the pattern contains no
    /// digit positions.
    pub fn new(pattern: &str, symbols: NumberSymbols, currency: &str) -> Result<NumberFormat, Error> {
        let core_start = match pattern.find(|c| c == '#' || c == '0') {
            Some(at) => at,
            None => return Err(Error::InvalidPattern),
        };
        let core_end = pattern
            .rfind(|c| c == '#' || c == '0' || c == ',' || c == '.')
            .map(|at| at + 1)
            .expect("a digit position was found above");

        let affix = |s: &str| s.replace('\u{a4}', currency);
        let prefix = affix(&pattern[..core_start]);
        let suffix = affix(&pattern[core_end..]);
        let multiplier = if pattern.contains('%') { 100 } else { 1 };

        let core = &pattern[core_start..core_end];
        let (integer, fraction) = match core.split_once('.') {
            Some((i, f)) => (i, f),
            None => (core, ""),
        };

        let group_size = match integer.rfind(',') {
            Some(at) => integer.len() - at - 1,
            None => 0,
        };
        let min_integer = integer.chars().filter(|&c| c == '0').count().max(1);
        let min_fraction = fraction.chars().filter(|&c| c == '0').count();
        let max_fraction = fraction.chars().filter(|&c| c == '0' || c == '#').count();

        Ok(NumberFormat {
            prefix,
            suffix,
            group_size,
            min_integer,
            min_fraction,
            max_fraction,
            multiplier,
            symbols,
        })
    }

    /// Renders a value against this pattern.
    pub fn format(&self, value: f64) -> String {
        let scaled = value * f64::from(self.multiplier);
        let negative = scaled < 0.0;

        // round half-up at the maximum fraction width, then work in integers
        let factor = 10f64.powi(self.max_fraction as i32);
        let units = (scaled.abs() * factor).round() as u128;
        let integer = units / factor as u128;
        let fraction = units % factor as u128;

        let mut out = String::new();
        if negative && units > 0 {
            out.push('-');
        }
        out.push_str(&self.prefix);
        self.write_grouped(&mut out, integer);

        if self.max_fraction > 0 {
            let mut digits = format!("{:0width$}", fraction, width = self.max_fraction);
            while digits.len() > self.min_fraction && digits.ends_with('0') {
                digits.pop();
            }
            if !digits.is_empty() {
                out.push_str(self.symbols.decimal);
                out.push_str(&digits);
            }
        }

        out.push_str(&self.suffix);
        out
    }

    fn write_grouped(&self, out: &mut String, integer: u128) {
        let digits = format!("{:0width$}", integer, width = self.min_integer);
        if self.group_size == 0 {
            out.push_str(&digits);
            return;
        }
        let len = digits.len();
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (len - i) % self.group_size == 0 {
                out.push_str(self.symbols.group);
            }
            out.push(c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en() -> NumberSymbols {
        NumberSymbols { decimal: ".", group: "," }
    }

    fn de() -> NumberSymbols {
        NumberSymbols { decimal: ",", group: "." }
    }

    fn compile(pattern: &str) -> NumberFormat {
        NumberFormat::new(pattern, en(), "$").unwrap()
    }

    #[test]
    fn plain_numbers_group_and_trim() {
        let format = compile("#,##0.###");
        assert_eq!(format.format(1234567.5), "1,234,567.5");
        assert_eq!(format.format(0.125), "0.125");
        assert_eq!(format.format(42.0), "42");
    }

    #[test]
    fn required_fraction_digits_are_kept() {
        let format = compile("#,##0.00");
        assert_eq!(format.format(5.0), "5.00");
        assert_eq!(format.format(5.675), "5.68");
    }

    #[test]
    fn percent_scales_by_one_hundred() {
        let format = compile("#,##0%");
        assert_eq!(format.format(0.73), "73%");
        assert_eq!(format.format(1.0), "100%");
    }

    #[test]
    fn currency_symbol_substitutes_the_placeholder() {
        let format = NumberFormat::new("\u{a4}#,##0.00", en(), "$").unwrap();
        assert_eq!(format.format(1999.99), "$1,999.99");

        let euro = NumberFormat::new("\u{a4}#,##0.00", de(), "\u{20ac}").unwrap();
        assert_eq!(euro.format(1999.99), "\u{20ac}1.999,99");
    }

    #[test]
    fn negative_values_carry_a_leading_sign() {
        let format = compile("#,##0.0#");
        assert_eq!(format.format(-1234.5), "-1,234.5");
    }

    #[test]
    fn rounding_can_erase_the_sign() {
        let format = compile("0.0");
        assert_eq!(format.format(-0.01), "0.0");
    }

    #[test]
    fn patterns_without_digits_are_rejected() {
        assert_eq!(NumberFormat::new("abc", en(), "$").unwrap_err(), Error::InvalidPattern);
        assert_eq!(NumberFormat::new("", en(), "$").unwrap_err(), Error::InvalidPattern);
    }
}
