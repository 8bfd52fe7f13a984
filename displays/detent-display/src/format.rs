//! Text formatting helpers
//!
//! Fixed-width numeric formatting without a heap or `core::fmt` overhead;
//! every helper writes into a small heapless string sized for its worst
//! case.

use heapless::String;

/// Format seconds as a clock readout
///
/// Under a minute: `00:SS` (seconds). Otherwise `HH:MM`, growing a digit
/// for prints past 99 hours.
pub fn format_duration(total_secs: u32) -> String<8> {
    let hours = total_secs / 3600;
    let mins = (total_secs / 60) % 60;
    let secs = total_secs % 60;

    let mut out = String::new();
    if hours == 0 && mins == 0 {
        let _ = out.push('0');
        let _ = out.push('0');
        let _ = out.push(':');
        push_two_digits(&mut out, secs);
    } else {
        if hours > 99 {
            let _ = out.push((b'0' + (hours / 100 % 10) as u8) as char);
        }
        push_two_digits(&mut out, hours % 100);
        let _ = out.push(':');
        push_two_digits(&mut out, mins);
    }
    out
}

/// Format a length with one decimal, e.g. `-12.5`
pub fn format_mm(value_mm: f32) -> String<8> {
    let mut tenths = (value_mm * 10.0 + if value_mm < 0.0 { -0.5 } else { 0.5 }) as i32;
    let mut out = String::new();
    if tenths < 0 {
        let _ = out.push('-');
        tenths = -tenths;
    }
    push_decimal(&mut out, (tenths / 10) as u32);
    let _ = out.push('.');
    let _ = out.push((b'0' + (tenths % 10) as u8) as char);
    out
}

/// Format an integer with a `%` suffix
pub fn format_pct(value: u8) -> String<8> {
    let mut out = String::new();
    push_decimal(&mut out, value as u32);
    let _ = out.push('%');
    out
}

/// Format a temperature pair as `current/target`
pub fn format_temp_pair(current_c: i16, target_c: i16) -> String<10> {
    let mut out = String::new();
    push_signed(&mut out, current_c);
    let _ = out.push('/');
    push_signed(&mut out, target_c);
    out
}

fn push_two_digits<const N: usize>(out: &mut String<N>, value: u32) {
    let _ = out.push((b'0' + (value / 10 % 10) as u8) as char);
    let _ = out.push((b'0' + (value % 10) as u8) as char);
}

fn push_decimal<const N: usize>(out: &mut String<N>, value: u32) {
    let mut divisor = 1u32;
    while value / divisor >= 10 {
        divisor *= 10;
    }
    let mut rest = value;
    while divisor > 0 {
        let _ = out.push((b'0' + (rest / divisor) as u8) as char);
        rest %= divisor;
        divisor /= 10;
    }
}

fn push_signed<const N: usize>(out: &mut String<N>, value: i16) {
    if value < 0 {
        let _ = out.push('-');
        push_decimal(out, (-(value as i32)) as u32);
    } else {
        push_decimal(out, value as u32);
    }
}
