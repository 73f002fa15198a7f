//! Volume and mass quantities with their persisted string form.
//!
//! Values are stored as integer counts of the smallest unit (milliliters and
//! milligrams). Addition saturates instead of overflowing. On write the
//! largest unit that divides the value evenly is used.

use crate::utils::error::{ContentsError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Volume(i64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mass(i64);

impl Volume {
    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn from_milliliter(ml: i64) -> Self {
        Self(ml)
    }

    pub const fn from_liter(l: i64) -> Self {
        Self(l * 1000)
    }

    pub const fn milliliters(self) -> i64 {
        self.0
    }
}

impl Mass {
    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn from_milligram(mg: i64) -> Self {
        Self(mg)
    }

    pub const fn from_gram(g: i64) -> Self {
        Self(g * 1000)
    }

    pub const fn from_kilogram(kg: i64) -> Self {
        Self(kg * 1_000_000)
    }

    pub const fn milligrams(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 1000 == 0 {
            write!(f, "{} L", self.0 / 1000)
        } else {
            write!(f, "{} ml", self.0)
        }
    }
}

impl fmt::Display for Mass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 1_000_000 == 0 {
            write!(f, "{} kg", self.0 / 1_000_000)
        } else if self.0 % 1000 == 0 {
            write!(f, "{} g", self.0 / 1000)
        } else {
            write!(f, "{} mg", self.0)
        }
    }
}

/// Splits `"250 ml"` / `"250ml"` into amount and unit. Amounts are never negative.
fn split_quantity(input: &str) -> Result<(i64, &str)> {
    let trimmed = input.trim();
    let unit_start = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (amount, unit) = trimmed.split_at(unit_start);
    if amount.is_empty() && unit.starts_with('-') {
        return Err(ContentsError::InvalidUnit {
            value: input.to_string(),
            reason: "amount cannot be negative".to_string(),
        });
    }

    let amount = amount.parse::<i64>().map_err(|e| ContentsError::InvalidUnit {
        value: input.to_string(),
        reason: format!("invalid amount: {}", e),
    })?;

    Ok((amount, unit.trim()))
}

fn checked_scale(input: &str, amount: i64, factor: i64) -> Result<i64> {
    amount
        .checked_mul(factor)
        .ok_or_else(|| ContentsError::InvalidUnit {
            value: input.to_string(),
            reason: "value out of range".to_string(),
        })
}

impl FromStr for Volume {
    type Err = ContentsError;

    fn from_str(s: &str) -> Result<Self> {
        let (amount, unit) = split_quantity(s)?;
        match unit {
            "ml" => Ok(Self(amount)),
            "L" | "l" => Ok(Self(checked_scale(s, amount, 1000)?)),
            other => Err(ContentsError::InvalidUnit {
                value: s.to_string(),
                reason: format!("unknown volume unit '{}'", other),
            }),
        }
    }
}

impl FromStr for Mass {
    type Err = ContentsError;

    fn from_str(s: &str) -> Result<Self> {
        let (amount, unit) = split_quantity(s)?;
        match unit {
            "mg" => Ok(Self(amount)),
            "g" => Ok(Self(checked_scale(s, amount, 1000)?)),
            "kg" => Ok(Self(checked_scale(s, amount, 1_000_000)?)),
            other => Err(ContentsError::InvalidUnit {
                value: s.to_string(),
                reason: format!("unknown mass unit '{}'", other),
            }),
        }
    }
}

macro_rules! quantity_impls {
    ($ty:ident) => {
        impl Add for $ty {
            type Output = $ty;

            fn add(self, rhs: $ty) -> $ty {
                $ty(self.0.saturating_add(rhs.0))
            }
        }

        impl AddAssign for $ty {
            fn add_assign(&mut self, rhs: $ty) {
                self.0 = self.0.saturating_add(rhs.0);
            }
        }

        impl Sum for $ty {
            fn sum<I: Iterator<Item = $ty>>(iter: I) -> $ty {
                iter.fold($ty::zero(), Add::add)
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<$ty, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

quantity_impls!(Volume);
quantity_impls!(Mass);
