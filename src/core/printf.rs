//! Message rendering for the print-style and printf-style logging methods
//!
//! `sprint` concatenates operands, inserting a space between two operands
//! when neither is a string. `sprintf` understands the usual printf verbs
//! (`%v %s %q %d %b %o %x %X %c %e %E %f %F %g %G %t %T %%`) with flags,
//! width and precision. It never fails: a missing operand renders as
//! `%!d(MISSING)`, a verb that does not fit its operand as `%!d(str=abc)`,
//! and surplus operands are appended as `%!(EXTRA i64=1, str=x)`.

use super::fields::Value;
use std::fmt::Write;
use std::iter::Peekable;
use std::str::Chars;

const MAX_WIDTH: usize = 1_000_000;

#[derive(Debug, Default, Clone, Copy)]
struct Directive {
    minus: bool,
    plus: bool,
    sharp: bool,
    zero: bool,
    space: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

/// Concatenate operands the way a print-style call does
pub fn sprint(args: &[Value<'_>]) -> String {
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 && !arg.is_string() && !args[i - 1].is_string() {
            out.push(' ');
        }
        let _ = write!(out, "{}", arg);
    }
    out
}

/// Substitute `args` into `format`
pub fn sprintf(format: &str, args: &[Value<'_>]) -> String {
    let mut out = String::with_capacity(format.len() + 16 * args.len());
    let mut next = 0;
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut directive = Directive::default();
        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => directive.minus = true,
                '+' => directive.plus = true,
                '#' => directive.sharp = true,
                '0' => directive.zero = true,
                ' ' => directive.space = true,
                _ => break,
            }
            chars.next();
        }
        directive.width = parse_number(&mut chars);
        if chars.peek() == Some(&'.') {
            chars.next();
            directive.precision = Some(parse_number(&mut chars).unwrap_or(0));
        }

        let Some(verb) = chars.next() else {
            out.push_str("%!(NOVERB)");
            break;
        };
        if verb == '%' {
            out.push('%');
            continue;
        }

        match args.get(next) {
            Some(arg) => {
                next += 1;
                format_arg(&mut out, &directive, verb, arg);
            }
            None => {
                let _ = write!(out, "%!{}(MISSING)", verb);
            }
        }
    }

    if next < args.len() {
        out.push_str("%!(EXTRA ");
        for (i, arg) in args[next..].iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}={}", arg.type_name(), arg);
        }
        out.push(')');
    }

    out
}

fn parse_number(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        chars.next();
        let current = value.unwrap_or(0);
        value = Some(
            current
                .saturating_mul(10)
                .saturating_add(digit as usize)
                .min(MAX_WIDTH),
        );
    }
    value
}

fn format_arg(out: &mut String, directive: &Directive, verb: char, arg: &Value<'_>) {
    match (verb, arg) {
        ('v' | 'd' | 'b' | 'o' | 'x' | 'X' | 'c', Value::Int(i)) => {
            format_integer(out, directive, verb, *i < 0, i.unsigned_abs())
        }
        ('v' | 'd' | 'b' | 'o' | 'x' | 'X' | 'c', Value::Uint(u)) => {
            format_integer(out, directive, verb, false, *u)
        }
        ('v', Value::Float(f)) => format_float(out, directive, 'g', *f),
        ('e' | 'E' | 'f' | 'F' | 'g' | 'G', Value::Float(f)) => format_float(out, directive, verb, *f),
        ('x' | 'X', Value::Str(s)) => {
            let mut hex = String::with_capacity(s.len() * 2 + 2);
            if directive.sharp {
                hex.push_str(if verb == 'x' { "0x" } else { "0X" });
            }
            for byte in s.bytes() {
                let _ = if verb == 'x' {
                    write!(hex, "{:02x}", byte)
                } else {
                    write!(hex, "{:02X}", byte)
                };
            }
            pad(out, directive, "", "", &hex);
        }
        ('q', Value::Str(_) | Value::Display(_)) => {
            let text = truncate(directive, &arg.to_string());
            pad(out, directive, "", "", &format!("{:?}", text));
        }
        ('v' | 's', Value::Str(_) | Value::Display(_)) | ('v' | 't', Value::Bool(_)) | ('v', Value::Null) => {
            let text = arg.to_string();
            pad(out, directive, "", "", &truncate(directive, &text));
        }
        ('T', _) => pad(out, directive, "", "", arg.type_name()),
        _ => {
            let _ = write!(out, "%!{}({}={})", verb, arg.type_name(), arg);
        }
    }
}

fn truncate(directive: &Directive, text: &str) -> String {
    match directive.precision {
        Some(p) => text.chars().take(p).collect(),
        None => text.to_string(),
    }
}

fn sign_of(directive: &Directive, negative: bool) -> &'static str {
    if negative {
        "-"
    } else if directive.plus {
        "+"
    } else if directive.space {
        " "
    } else {
        ""
    }
}

fn format_integer(out: &mut String, directive: &Directive, verb: char, negative: bool, magnitude: u64) {
    if verb == 'c' {
        let c = if negative {
            char::REPLACEMENT_CHARACTER
        } else {
            u32::try_from(magnitude)
                .ok()
                .and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER)
        };
        pad(out, directive, "", "", c.encode_utf8(&mut [0u8; 4]));
        return;
    }

    let mut digits = match verb {
        'b' => format!("{:b}", magnitude),
        'o' => format!("{:o}", magnitude),
        'x' => format!("{:x}", magnitude),
        'X' => format!("{:X}", magnitude),
        _ => magnitude.to_string(),
    };
    if let Some(p) = directive.precision {
        if p == 0 && magnitude == 0 {
            digits.clear();
        } else if digits.len() < p {
            digits = format!("{}{}", "0".repeat(p - digits.len()), digits);
        }
    }

    let prefix = match (directive.sharp, verb) {
        (true, 'b') => "0b",
        (true, 'o') if !digits.starts_with('0') => "0",
        (true, 'x') => "0x",
        (true, 'X') => "0X",
        _ => "",
    };

    pad(out, directive, sign_of(directive, negative), prefix, &digits);
}

fn format_float(out: &mut String, directive: &Directive, verb: char, value: f64) {
    if value.is_nan() {
        pad(out, &Directive { zero: false, ..*directive }, "", "", "NaN");
        return;
    }
    let negative = value.is_sign_negative();
    let abs = value.abs();
    if abs.is_infinite() {
        let sign = if negative { "-" } else { "+" };
        pad(out, &Directive { zero: false, ..*directive }, sign, "", "Inf");
        return;
    }

    let body = match verb {
        'f' | 'F' => format!("{:.*}", directive.precision.unwrap_or(6), abs),
        'e' => exponent_form(abs, directive.precision.unwrap_or(6)),
        'E' => exponent_form(abs, directive.precision.unwrap_or(6)).to_uppercase(),
        'G' => general_form(abs, directive.precision).to_uppercase(),
        _ => general_form(abs, directive.precision),
    };

    pad(out, directive, sign_of(directive, negative), "", &body);
}

/// `1.5e3` -> `1.5e+03`
fn fix_exponent(rendered: &str) -> String {
    match rendered.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.abs())
        }
        None => rendered.to_string(),
    }
}

fn exponent_form(abs: f64, precision: usize) -> String {
    fix_exponent(&format!("{:.*e}", precision, abs))
}

fn exponent_of(rendered: &str) -> i32 {
    rendered
        .split_once('e')
        .and_then(|(_, exp)| exp.parse().ok())
        .unwrap_or(0)
}

fn trim_fraction(text: &str) -> String {
    match text.split_once('e') {
        Some((mantissa, exp)) => format!("{}e{}", trim_fraction(mantissa), exp),
        None if text.contains('.') => text.trim_end_matches('0').trim_end_matches('.').to_string(),
        None => text.to_string(),
    }
}

fn general_form(abs: f64, precision: Option<usize>) -> String {
    if abs == 0.0 {
        return "0".to_string();
    }
    match precision {
        None => {
            let shortest = format!("{:e}", abs);
            let exp = exponent_of(&shortest);
            if !(-4..21).contains(&exp) {
                fix_exponent(&shortest)
            } else {
                format!("{}", abs)
            }
        }
        Some(p) => {
            let p = p.max(1);
            let rounded = format!("{:.*e}", p - 1, abs);
            let exp = exponent_of(&rounded);
            if exp < -4 || exp >= p as i32 {
                fix_exponent(&trim_fraction(&rounded))
            } else {
                let decimals = (p as i32 - 1 - exp).max(0) as usize;
                trim_fraction(&format!("{:.*}", decimals, abs))
            }
        }
    }
}

fn pad(out: &mut String, directive: &Directive, sign: &str, prefix: &str, body: &str) {
    let len = sign.chars().count() + prefix.chars().count() + body.chars().count();
    let fill = directive.width.map(|w| w.saturating_sub(len)).unwrap_or(0);

    if fill == 0 {
        out.push_str(sign);
        out.push_str(prefix);
        out.push_str(body);
    } else if directive.minus {
        out.push_str(sign);
        out.push_str(prefix);
        out.push_str(body);
        out.extend(std::iter::repeat(' ').take(fill));
    } else if directive.zero && directive.precision.is_none() {
        out.push_str(sign);
        out.push_str(prefix);
        out.extend(std::iter::repeat('0').take(fill));
        out.push_str(body);
    } else {
        out.extend(std::iter::repeat(' ').take(fill));
        out.push_str(sign);
        out.push_str(prefix);
        out.push_str(body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values;

    #[test]
    fn test_sprint_spacing() {
        assert_eq!(sprint(&values!["a", "b"]), "ab");
        assert_eq!(sprint(&values!["count:", 3]), "count:3");
        assert_eq!(sprint(&values![1, 2, "x", 3, true]), "1 2x3 true");
        assert_eq!(sprint(&[]), "");
    }

    #[test]
    fn test_basic_verbs() {
        assert_eq!(sprintf("count=%d", &values![7]), "count=7");
        assert_eq!(sprintf("%s=%v", &values!["key", 1.5]), "key=1.5");
        assert_eq!(sprintf("%t|%v", &values![true, false]), "true|false");
        assert_eq!(sprintf("%q", &values!["hi\n"]), "\"hi\\n\"");
        assert_eq!(sprintf("100%%", &[]), "100%");
        assert_eq!(sprintf("%T %T", &values!["s", 1_u8]), "str u64");
    }

    #[test]
    fn test_integer_formatting() {
        assert_eq!(sprintf("%5d|%-5d|%05d", &values![42, 42, -42]), "   42|42   |-0042");
        assert_eq!(sprintf("%+d %x %X %o %b", &values![5, 255, 255, 8, 5]), "+5 ff FF 10 101");
        assert_eq!(sprintf("%#x %#o %#b", &values![255, 8, 5]), "0xff 010 0b101");
        assert_eq!(sprintf("%.3d", &values![7]), "007");
        assert_eq!(sprintf("%c", &values![65]), "A");
        assert_eq!(sprintf("%x", &values!["hi"]), "6869");
        assert_eq!(sprintf("%d", &values![i64::MIN]), "-9223372036854775808");
    }

    #[test]
    fn test_float_formatting() {
        assert_eq!(sprintf("%f", &values![3.5]), "3.500000");
        assert_eq!(sprintf("%.2f", &values![3.14159]), "3.14");
        assert_eq!(sprintf("%8.3f|", &values![-1.5]), "  -1.500|");
        assert_eq!(sprintf("%e", &values![1234.5678]), "1.234568e+03");
        assert_eq!(sprintf("%E", &values![0.00012]), "1.200000E-04");
        assert_eq!(sprintf("%g", &values![100000.0]), "100000");
        assert_eq!(sprintf("%g", &values![1e21]), "1e+21");
        assert_eq!(sprintf("%.3g", &values![3.14159]), "3.14");
        assert_eq!(sprintf("%.2g", &values![12345.0]), "1.2e+04");
        assert_eq!(sprintf("%v %v", &values![f64::NAN, f64::NEG_INFINITY]), "NaN -Inf");
    }

    #[test]
    fn test_string_width_and_precision() {
        assert_eq!(sprintf("[%6s]", &values!["abc"]), "[   abc]");
        assert_eq!(sprintf("[%-6s]", &values!["abc"]), "[abc   ]");
        assert_eq!(sprintf("[%.2s]", &values!["abcdef"]), "[ab]");
    }

    #[test]
    fn test_missing_operands() {
        assert_eq!(sprintf("%d and %s", &values![1]), "1 and %!s(MISSING)");
        assert_eq!(sprintf("%d", &[]), "%!d(MISSING)");
    }

    #[test]
    fn test_extra_operands() {
        assert_eq!(sprintf("x=%d", &values![1, 2, "three"]), "x=1%!(EXTRA i64=2, str=three)");
        assert_eq!(sprintf("plain", &values![true]), "plain%!(EXTRA bool=true)");
    }

    #[test]
    fn test_mismatched_verbs() {
        assert_eq!(sprintf("%d", &values!["abc"]), "%!d(str=abc)");
        assert_eq!(sprintf("%s", &values![5]), "%!s(i64=5)");
        assert_eq!(sprintf("%f", &values![5]), "%!f(i64=5)");
        assert_eq!(sprintf("%z", &values![true]), "%!z(bool=true)");
    }

    #[test]
    fn test_trailing_percent() {
        assert_eq!(sprintf("50%", &[]), "50%!(NOVERB)");
    }

    #[test]
    fn test_huge_width_is_clamped() {
        let out = sprintf("%99999999999999999999d", &values![1]);
        assert_eq!(out.len(), MAX_WIDTH);
    }
}
