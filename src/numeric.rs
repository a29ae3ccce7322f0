//! Exact-rational views of instance numbers.
//!
//! Numeric keywords compare values as arbitrary-precision rationals, so a
//! decimal literal is never rounded through binary floating point before a
//! bound or divisibility check. Machine integers keep a cheap fast path.
use fraction::{BigFraction, BigUint};
use num_cmp::NumCmp;
use serde_json::Number;

/// Parse a JSON number literal into an exact rational.
///
/// Accepts the JSON number grammar (optional sign, integer digits, optional
/// fraction, optional exponent). Returns `None` for exponents too large to
/// materialize.
#[must_use]
pub fn parse_decimal(literal: &str) -> Option<BigFraction> {
    let (negative, unsigned) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal),
    };
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(at) => {
            let exponent = unsigned[at + 1..]
                .trim_start_matches('+')
                .parse::<i64>()
                .ok()?;
            (&unsigned[..at], exponent)
        }
        None => (unsigned, 0),
    };
    let (digits, scale) = match mantissa.find('.') {
        Some(at) => {
            let mut digits = String::with_capacity(mantissa.len() - 1);
            digits.push_str(&mantissa[..at]);
            digits.push_str(&mantissa[at + 1..]);
            (digits, (mantissa.len() - at - 1) as i64)
        }
        None => (mantissa.to_string(), 0),
    };
    let digits = digits.parse::<BigUint>().ok()?;
    let shift = exponent.checked_sub(scale)?;
    let magnitude = u32::try_from(shift.unsigned_abs()).ok()?;
    let fraction = if shift >= 0 {
        BigFraction::new(digits * pow10(magnitude), BigUint::from(1_u8))
    } else {
        BigFraction::new(digits, pow10(magnitude))
    };
    if negative && fraction != BigFraction::new(BigUint::from(0_u8), BigUint::from(1_u8)) {
        Some(-fraction)
    } else {
        Some(fraction)
    }
}

fn pow10(mut exponent: u32) -> BigUint {
    let mut base = BigUint::from(10_u8);
    let mut result = BigUint::from(1_u8);
    while exponent > 0 {
        if exponent & 1 == 1 {
            result *= &base;
        }
        base = &base * &base;
        exponent >>= 1;
    }
    result
}

/// The exact rational value of an instance number.
pub(crate) fn rational(number: &Number) -> Option<BigFraction> {
    // With `arbitrary_precision` the original literal is preserved, so this
    // parse loses nothing.
    parse_decimal(&number.to_string())
}

/// Whether the rational has no fractional part.
pub(crate) fn is_integral(value: &BigFraction) -> bool {
    value.denom().map_or(false, |denom| denom == &BigUint::from(1_u8))
}

/// Whether the number is mathematically an integer (`3.0` and `1e2` are).
pub(crate) fn is_integer(number: &Number) -> bool {
    if number.is_i64() || number.is_u64() {
        return true;
    }
    rational(number).as_ref().map_or(false, is_integral)
}

#[derive(Clone, Copy)]
enum Machine {
    Unsigned(u64),
    Signed(i64),
}

fn machine(number: &Number) -> Option<Machine> {
    number
        .as_u64()
        .map(Machine::Unsigned)
        .or_else(|| number.as_i64().map(Machine::Signed))
}

/// Exact numeric equality.
pub(crate) fn equal(left: &Number, right: &Number) -> bool {
    match (machine(left), machine(right)) {
        (Some(Machine::Unsigned(a)), Some(Machine::Unsigned(b))) => a == b,
        (Some(Machine::Signed(a)), Some(Machine::Signed(b))) => a == b,
        (Some(Machine::Unsigned(a)), Some(Machine::Signed(b))) => NumCmp::num_eq(a, b),
        (Some(Machine::Signed(a)), Some(Machine::Unsigned(b))) => NumCmp::num_eq(a, b),
        _ => match (rational(left), rational(right)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    }
}
