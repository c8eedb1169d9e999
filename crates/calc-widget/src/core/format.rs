//! Number text: operand parsing, result printing and screen formatting
//!
//! The engine stores the screen as text, so every computation round-trips
//! through these three functions. The conventions are the ones a browser
//! calculator shows: `Infinity`/`NaN` spelled out, exponents written as
//! `e+N`, and a leading-prefix parse that tolerates a trailing `.`.

/// Raw display text longer than this switches to exponential notation
pub const MAX_PLAIN_LEN: usize = 12;

/// Fractional digits used in exponential notation
pub const EXPONENT_PRECISION: usize = 6;

/// Parses the longest numeric prefix of `text`.
///
/// Accepts `[+-]digits[.digits][e[+-]digits]` and `[+-]Infinity` after
/// optional leading whitespace. Anything else, including a bare sign, is
/// NaN. Trailing garbage after a valid prefix is ignored.
#[must_use]
pub fn parse_operand(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Prints a result the way it is written back onto the screen.
///
/// Uses the shortest digits that round-trip. Decimal exponents from -6
/// through 20 print positionally, everything else as `d.ddde+N`.
#[must_use]
pub fn number_to_text(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let (digits, exponent) = shortest_digits(value.abs());
    let k = digits.len() as i32;
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{int_part}.{frac_part}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let (lead, rest) = digits.split_at(1);
        let exp_sign = if exponent >= 0 { '+' } else { '-' };
        if rest.is_empty() {
            format!("{lead}e{exp_sign}{}", exponent.abs())
        } else {
            format!("{lead}.{rest}e{exp_sign}{}", exponent.abs())
        }
    };

    format!("{sign}{body}")
}

/// Splits a positive finite value into its shortest significant digits and
/// the decimal exponent of the first digit.
fn shortest_digits(value: f64) -> (String, i32) {
    let sci = format!("{value:e}");
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let digits = mantissa.chars().filter(char::is_ascii_digit).collect();
    (digits, exponent.parse().unwrap_or(0))
}

/// Significant digits that cover the exact decimal expansion of any `f64`
const EXACT_DIGITS: usize = 800;

/// Formats `value` in exponential notation with `precision` fractional
/// digits and an explicitly signed exponent, e.g. `1.234568e+12`.
///
/// Rounds the exact decimal value half away from zero, so a tie such as
/// `1000000.5` at six digits shows `1.000001e+6`. Negative zero prints
/// without its sign.
#[must_use]
pub fn to_exponential(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return number_to_text(value);
    }
    let sign = if value < 0.0 { "-" } else { "" };

    let exact = format!("{:.*e}", EXACT_DIGITS, value.abs());
    let (mantissa, exponent) = exact.split_once('e').unwrap_or((exact.as_str(), "0"));
    let mut exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: Vec<u8> = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();

    let mut kept: Vec<u8> = digits.iter().copied().take(precision + 1).collect();
    kept.resize(precision + 1, 0);
    if digits.get(precision + 1).is_some_and(|&d| d >= 5) && round_up(&mut kept) {
        exponent += 1;
    }

    let mut text = String::with_capacity(precision + 8);
    text.push_str(sign);
    for (i, d) in kept.iter().enumerate() {
        if i == 1 {
            text.push('.');
        }
        text.push(char::from(b'0' + d));
    }
    let exp_sign = if exponent >= 0 { '+' } else { '-' };
    text.push('e');
    text.push(exp_sign);
    text.push_str(&exponent.abs().to_string());
    text
}

/// Adds one unit in the last place. Returns true when the carry ran off the
/// front, leaving `1000...` and shifting the exponent.
fn round_up(digits: &mut [u8]) -> bool {
    for d in digits.iter_mut().rev() {
        if *d == 9 {
            *d = 0;
        } else {
            *d += 1;
            return false;
        }
    }
    if let Some(first) = digits.first_mut() {
        *first = 1;
    }
    true
}

/// Inserts a `,` before every group of three integer digits.
///
/// The sign and everything from the first non-digit on (fraction, exponent,
/// `Infinity`) pass through unchanged.
#[must_use]
pub fn group_thousands(text: &str) -> String {
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let int_len = count_digits(rest.as_bytes());
    let (int_part, tail) = rest.split_at(int_len);

    let mut out = String::with_capacity(text.len() + int_len / 3);
    out.push_str(sign);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push_str(tail);
    out
}

/// Renders raw display text for the screen.
///
/// Text longer than [`MAX_PLAIN_LEN`] characters is shown in exponential
/// form with [`EXPONENT_PRECISION`] fractional digits; shorter text gets
/// thousands separators. Pure: it never touches engine state.
#[must_use]
pub fn format_for_display(display: &str) -> String {
    if display.chars().count() > MAX_PLAIN_LEN {
        to_exponential(parse_operand(display), EXPONENT_PRECISION)
    } else {
        group_thousands(display)
    }
}
