//! Weight arithmetic and the aggregation policy shared by every node of a tree.

use std::fmt;
use std::ops::{Add, Div, Sub};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::AutocompleteError;

/// Numeric type usable as a leaf weight.
///
/// Aggregation needs addition (SUM), subtraction (subtree removal) and
/// division by a leaf count (AVERAGE). Integer weights average with
/// truncating division.
pub trait Weight:
    Copy
    + PartialOrd
    + fmt::Debug
    + fmt::Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + Div<Output = Self>
{
    const ZERO: Self;

    /// Converts a leaf count into the weight domain.
    fn from_count(count: usize) -> Self;

    /// `true` for weights a leaf may carry: strictly positive, and finite for
    /// floats. NaN and infinities are rejected.
    fn is_strictly_positive(self) -> bool;

    /// `self + other`, or `None` if the sum leaves the representable finite
    /// range.
    fn checked_add(self, other: Self) -> Option<Self>;
}

macro_rules! impl_float_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                const ZERO: Self = 0.0;

                #[inline]
                fn from_count(count: usize) -> Self {
                    count as $t
                }

                #[inline]
                fn is_strictly_positive(self) -> bool {
                    self > 0.0 && self.is_finite()
                }

                #[inline]
                fn checked_add(self, other: Self) -> Option<Self> {
                    let sum = self + other;
                    sum.is_finite().then_some(sum)
                }
            }
        )*
    };
}

macro_rules! impl_int_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                const ZERO: Self = 0;

                #[inline]
                fn from_count(count: usize) -> Self {
                    count as $t
                }

                #[inline]
                fn is_strictly_positive(self) -> bool {
                    self > 0
                }

                #[inline]
                fn checked_add(self, other: Self) -> Option<Self> {
                    <$t>::checked_add(self, other)
                }
            }
        )*
    };
}

impl_float_weight!(f32, f64);
impl_int_weight!(u32, u64);

/// How a branch derives its weight from the leaves beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightPolicy {
    #[default]
    Sum,
    Average,
}

impl WeightPolicy {
    #[inline]
    pub fn aggregate<W: Weight>(self, leaf_sum: W, leaf_count: usize) -> W {
        match self {
            Self::Sum => leaf_sum,
            Self::Average if leaf_count > 0 => leaf_sum / W::from_count(leaf_count),
            Self::Average => W::ZERO,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Average => "average",
        }
    }
}

impl fmt::Display for WeightPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightPolicy {
    type Err = AutocompleteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sum" => Ok(Self::Sum),
            "average" => Ok(Self::Average),
            _ => Err(AutocompleteError::InvalidPolicy(s.to_string())),
        }
    }
}
