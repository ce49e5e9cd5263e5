//! The validation pipeline shared by declaration defaults and writes.
//!
//! Checks run in order and stop at the first failure:
//!
//! 1. enumerated values, or else the type constraint
//! 2. upper bound
//! 3. lower bound
//! 4. custom validator
//!
//! A null value on a slot that allows null skips the whole pipeline.

use std::cmp::Ordering;

use crate::error::{ErrorKind, Violation};
use crate::slot::OptionSlot;
use crate::value::{repr_list, OptionValue, ValueType};

type Check = fn(&OptionSlot, &OptionValue) -> Result<(), ErrorKind>;

const PIPELINE: [Check; 4] = [check_allowed, check_upper, check_lower, check_custom];

/// Validate `value` against every constraint declared on `slot`.
pub(crate) fn validate(slot: &OptionSlot, value: &OptionValue) -> Result<(), ErrorKind> {
    if value.is_none() && slot.allow_none {
        return Ok(());
    }
    PIPELINE.iter().try_for_each(|check| check(slot, value))
}

fn invalid_value(slot: &OptionSlot, value: &OptionValue, violation: Violation) -> ErrorKind {
    ErrorKind::InvalidValue {
        name: slot.name.clone(),
        value: value.repr(),
        violation,
    }
}

fn invalid_type(slot: &OptionSlot, value: &OptionValue, expected: Vec<ValueType>) -> ErrorKind {
    ErrorKind::InvalidType {
        name: slot.name.clone(),
        value: value.repr(),
        found: value.type_name().to_string(),
        expected,
    }
}

fn check_allowed(slot: &OptionSlot, value: &OptionValue) -> Result<(), ErrorKind> {
    if let Some(values) = &slot.values {
        if !values.contains(value) {
            let allowed = repr_list(values);
            return Err(invalid_value(slot, value, Violation::NotOneOf { allowed }));
        }
    } else if let Some(types) = &slot.types {
        if !types.iter().any(|ty| ty.matches(value)) {
            return Err(invalid_type(slot, value, types.clone()));
        }
    }
    Ok(())
}

/// Order `value` against a bound. `None` when either side is NaN.
///
/// Integers are compared exactly, without rounding through `f64`.
fn compare(
    slot: &OptionSlot,
    value: &OptionValue,
    bound: f64,
) -> Result<Option<Ordering>, ErrorKind> {
    match value {
        OptionValue::Int(n) => Ok(compare_int(*n, bound)),
        OptionValue::Float(x) => Ok(x.partial_cmp(&bound)),
        _ => Err(invalid_type(slot, value, vec![ValueType::Number])),
    }
}

/// 2^63, the first float past `i64::MAX`.
const I64_END: f64 = 9_223_372_036_854_775_808.0;

fn compare_int(n: i64, bound: f64) -> Option<Ordering> {
    if bound.is_nan() {
        return None;
    }
    if bound >= I64_END {
        return Some(Ordering::Less);
    }
    if bound < -I64_END {
        return Some(Ordering::Greater);
    }
    // |whole| < 2^63 and integral, so the cast is exact.
    let whole = bound.trunc();
    match n.cmp(&(whole as i64)) {
        Ordering::Equal => whole.partial_cmp(&bound),
        other => Some(other),
    }
}

fn check_upper(slot: &OptionSlot, value: &OptionValue) -> Result<(), ErrorKind> {
    let Some(upper) = slot.upper else {
        return Ok(());
    };
    if compare(slot, value, upper)? == Some(Ordering::Greater) {
        return Err(invalid_value(slot, value, Violation::AboveUpper { upper }));
    }
    Ok(())
}

fn check_lower(slot: &OptionSlot, value: &OptionValue) -> Result<(), ErrorKind> {
    let Some(lower) = slot.lower else {
        return Ok(());
    };
    if compare(slot, value, lower)? == Some(Ordering::Less) {
        return Err(invalid_value(slot, value, Violation::BelowLower { lower }));
    }
    Ok(())
}

fn check_custom(slot: &OptionSlot, value: &OptionValue) -> Result<(), ErrorKind> {
    let Some(check) = &slot.check_valid else {
        return Ok(());
    };
    check(&slot.name, value).map_err(|reason| invalid_value(slot, value, Violation::Rejected { reason }))
}
