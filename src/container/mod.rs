//! Numeric container for machine values.
//!
//! Machines speak in their own typed values. When values of different machines
//! have to be handled uniformly (the equivalence harness, heterogeneous
//! collections of machines) they are lowered into a [`Numeric`]: a scalar, a
//! flat array, or a fixed mapping of named numerics.

mod codec;

pub use codec::{FromNumeric, ToNumeric};

use crate::core::ShapeError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque numeric value: a scalar, an array, or a nested named mapping.
///
/// Arithmetic is elementwise. A scalar broadcasts over arrays and over every
/// leaf of a mapping; arrays must agree in length and mappings in keys.
///
/// # Example
///
/// ```rust
/// use stepwise::container::Numeric;
///
/// let a = Numeric::Array(vec![1.0, 2.0]);
/// let b = Numeric::Scalar(10.0);
///
/// assert_eq!(a.try_add(&b).unwrap(), Numeric::Array(vec![11.0, 12.0]));
/// assert!(a.try_add(&Numeric::Array(vec![1.0])).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Numeric {
    Scalar(f64),
    Array(Vec<f64>),
    Map(BTreeMap<String, Numeric>),
}

/// Structure of a [`Numeric`] with the values stripped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    Scalar,
    Array(usize),
    Map(BTreeMap<String, Shape>),
}

/// Absolute and relative tolerance for comparing real values.
///
/// Two leaves `a` and `b` agree when `|a - b| <= absolute + relative * max(|a|, |b|)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub absolute: f64,
    pub relative: f64,
}

impl Tolerance {
    /// Bit-for-bit agreement, for integer and boolean data.
    pub fn exact() -> Self {
        Self {
            absolute: 0.0,
            relative: 0.0,
        }
    }

    /// Whether this tolerance admits no difference at all.
    pub fn is_exact(&self) -> bool {
        self.absolute == 0.0 && self.relative == 0.0
    }

    pub fn accepts(&self, a: f64, b: f64) -> bool {
        if a == b || (a.is_nan() && b.is_nan()) {
            return true;
        }
        if !a.is_finite() || !b.is_finite() {
            return false;
        }
        (a - b).abs() <= self.absolute + self.relative * a.abs().max(b.abs())
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            absolute: 1e-9,
            relative: 1e-9,
        }
    }
}

impl Numeric {
    /// Build a mapping from `(name, value)` pairs.
    pub fn record<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Numeric)>,
    {
        Numeric::Map(
            fields
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Numeric::Scalar(_) => "scalar",
            Numeric::Array(_) => "array",
            Numeric::Map(_) => "map",
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Numeric::Scalar(_) => Shape::Scalar,
            Numeric::Array(values) => Shape::Array(values.len()),
            Numeric::Map(fields) => Shape::Map(
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), value.shape()))
                    .collect(),
            ),
        }
    }

    /// Number of scalar leaves.
    pub fn len(&self) -> usize {
        match self {
            Numeric::Scalar(_) => 1,
            Numeric::Array(values) => values.len(),
            Numeric::Map(fields) => fields.values().map(Numeric::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_scalar(&self) -> Result<f64, ShapeError> {
        match self {
            Numeric::Scalar(value) => Ok(*value),
            other => Err(ShapeError::KindMismatch {
                expected: "scalar",
                found: other.kind(),
            }),
        }
    }

    pub fn as_array(&self) -> Result<&[f64], ShapeError> {
        match self {
            Numeric::Array(values) => Ok(values),
            other => Err(ShapeError::KindMismatch {
                expected: "array",
                found: other.kind(),
            }),
        }
    }

    /// Borrow the fields of a mapping, requiring exactly the `expected` keys.
    pub fn fields(&self, expected: &[&str]) -> Result<&BTreeMap<String, Numeric>, ShapeError> {
        let Numeric::Map(fields) = self else {
            return Err(ShapeError::KindMismatch {
                expected: "map",
                found: self.kind(),
            });
        };

        let matches = fields.len() == expected.len()
            && expected.iter().all(|key| fields.contains_key(*key));
        if !matches {
            let mut expected: Vec<String> = expected.iter().map(|key| key.to_string()).collect();
            expected.sort();
            return Err(ShapeError::FieldMismatch {
                expected,
                found: fields.keys().cloned().collect(),
            });
        }

        Ok(fields)
    }

    /// Apply `f` to every leaf.
    pub fn map(&self, f: impl Fn(f64) -> f64 + Copy) -> Numeric {
        match self {
            Numeric::Scalar(value) => Numeric::Scalar(f(*value)),
            Numeric::Array(values) => Numeric::Array(values.iter().copied().map(f).collect()),
            Numeric::Map(fields) => Numeric::Map(
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), value.map(f)))
                    .collect(),
            ),
        }
    }

    /// Combine two values leaf by leaf, broadcasting scalars.
    pub fn zip_with(
        &self,
        other: &Numeric,
        f: impl Fn(f64, f64) -> f64 + Copy,
    ) -> Result<Numeric, ShapeError> {
        match (self, other) {
            (Numeric::Scalar(a), Numeric::Scalar(b)) => Ok(Numeric::Scalar(f(*a, *b))),
            (Numeric::Scalar(a), rhs) => Ok(rhs.map(|b| f(*a, b))),
            (lhs, Numeric::Scalar(b)) => Ok(lhs.map(|a| f(a, *b))),
            (Numeric::Array(a), Numeric::Array(b)) => {
                if a.len() != b.len() {
                    return Err(ShapeError::LengthMismatch {
                        what: "array",
                        expected: a.len(),
                        found: b.len(),
                    });
                }
                Ok(Numeric::Array(
                    a.iter().zip(b).map(|(x, y)| f(*x, *y)).collect(),
                ))
            }
            (Numeric::Map(a), Numeric::Map(b)) => {
                if a.len() != b.len() || a.keys().any(|key| !b.contains_key(key)) {
                    return Err(ShapeError::FieldMismatch {
                        expected: a.keys().cloned().collect(),
                        found: b.keys().cloned().collect(),
                    });
                }
                a.iter()
                    .map(|(key, lhs)| Ok((key.clone(), lhs.zip_with(&b[key], f)?)))
                    .collect::<Result<BTreeMap<_, _>, ShapeError>>()
                    .map(Numeric::Map)
            }
            (lhs, rhs) => Err(ShapeError::KindMismatch {
                expected: lhs.kind(),
                found: rhs.kind(),
            }),
        }
    }

    pub fn try_add(&self, other: &Numeric) -> Result<Numeric, ShapeError> {
        self.zip_with(other, |a, b| a + b)
    }

    pub fn try_sub(&self, other: &Numeric) -> Result<Numeric, ShapeError> {
        self.zip_with(other, |a, b| a - b)
    }

    pub fn try_mul(&self, other: &Numeric) -> Result<Numeric, ShapeError> {
        self.zip_with(other, |a, b| a * b)
    }

    pub fn scale(&self, factor: f64) -> Numeric {
        self.map(|value| value * factor)
    }

    /// Largest absolute leaf, `0.0` for an empty value.
    pub fn max_abs(&self) -> f64 {
        match self {
            Numeric::Scalar(value) => value.abs(),
            Numeric::Array(values) => values.iter().fold(0.0, |acc, v| acc.max(v.abs())),
            Numeric::Map(fields) => fields.values().fold(0.0, |acc, v| acc.max(v.max_abs())),
        }
    }

    /// Largest absolute leaf-wise difference between two values of equal shape.
    pub fn deviation(&self, other: &Numeric) -> Result<f64, ShapeError> {
        if self.shape() != other.shape() {
            return Err(ShapeError::KindMismatch {
                expected: self.kind(),
                found: other.kind(),
            });
        }
        Ok(self.try_sub(other)?.max_abs())
    }

    /// Structural equality with real leaves compared under `tolerance`.
    ///
    /// Values of different shape are never equal; scalars do not broadcast here.
    pub fn approx_eq(&self, other: &Numeric, tolerance: &Tolerance) -> bool {
        match (self, other) {
            (Numeric::Scalar(a), Numeric::Scalar(b)) => tolerance.accepts(*a, *b),
            (Numeric::Array(a), Numeric::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| tolerance.accepts(*x, *y))
            }
            (Numeric::Map(a), Numeric::Map(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, lhs)| {
                        b.get(key)
                            .is_some_and(|rhs| lhs.approx_eq(rhs, tolerance))
                    })
            }
            _ => false,
        }
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Numeric::Scalar(value)
    }
}

impl From<Vec<f64>> for Numeric {
    fn from(values: Vec<f64>) -> Self {
        Numeric::Array(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(sum: f64, count: f64) -> Numeric {
        Numeric::record([
            ("total_sum", Numeric::Scalar(sum)),
            ("count", Numeric::Scalar(count)),
        ])
    }

    #[test]
    fn arrays_add_elementwise() {
        let a = Numeric::Array(vec![1.0, 2.0, 3.0]);
        let b = Numeric::Array(vec![0.5, 0.5, 0.5]);

        assert_eq!(a.try_add(&b).unwrap(), Numeric::Array(vec![1.5, 2.5, 3.5]));
        assert_eq!(a.try_sub(&b).unwrap(), Numeric::Array(vec![0.5, 1.5, 2.5]));
        assert_eq!(a.try_mul(&b).unwrap(), Numeric::Array(vec![0.5, 1.0, 1.5]));
    }

    #[test]
    fn scalar_broadcasts_over_maps() {
        let doubled = pair(10.0, 2.0).try_mul(&Numeric::Scalar(2.0)).unwrap();
        assert_eq!(doubled, pair(20.0, 4.0));
        assert_eq!(pair(10.0, 2.0).scale(0.5), pair(5.0, 1.0));
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let a = Numeric::Array(vec![1.0, 2.0]);
        let b = Numeric::Array(vec![1.0]);

        assert_eq!(
            a.try_add(&b),
            Err(ShapeError::LengthMismatch {
                what: "array",
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn mismatched_keys_are_rejected() {
        let other = Numeric::record([("total_sum", Numeric::Scalar(1.0))]);
        assert!(matches!(
            pair(1.0, 1.0).try_add(&other),
            Err(ShapeError::FieldMismatch { .. })
        ));
    }

    #[test]
    fn array_and_map_do_not_combine() {
        let result = Numeric::Array(vec![1.0]).try_add(&pair(1.0, 1.0));
        assert_eq!(
            result,
            Err(ShapeError::KindMismatch {
                expected: "array",
                found: "map",
            })
        );
    }

    #[test]
    fn shape_and_len_describe_structure() {
        let value = Numeric::record([
            ("temperature", Numeric::Scalar(20.0)),
            ("history", Numeric::Array(vec![1.0, 2.0, 3.0])),
        ]);

        assert_eq!(value.len(), 4);
        match value.shape() {
            Shape::Map(fields) => {
                assert_eq!(fields["temperature"], Shape::Scalar);
                assert_eq!(fields["history"], Shape::Array(3));
            }
            other => panic!("expected map shape, got {other:?}"),
        }
        assert!(Numeric::Array(vec![]).is_empty());
    }

    #[test]
    fn approx_eq_respects_tolerance() {
        let a = Numeric::Array(vec![1.0, 2.0]);
        let b = Numeric::Array(vec![1.0, 2.0 + 1e-12]);

        assert!(a.approx_eq(&b, &Tolerance::default()));
        assert!(!a.approx_eq(&b, &Tolerance::exact()));
        assert!(!a.approx_eq(&Numeric::Array(vec![1.0]), &Tolerance::default()));
        assert!(!Numeric::Scalar(1.0).approx_eq(&a, &Tolerance::default()));
    }

    #[test]
    fn only_zero_tolerance_is_exact() {
        assert!(Tolerance::exact().is_exact());
        assert!(!Tolerance::default().is_exact());
        assert!(!Tolerance {
            absolute: 0.0,
            relative: 1e-12,
        }
        .is_exact());
    }

    #[test]
    fn approx_eq_treats_nan_as_equal_to_nan() {
        let a = Numeric::Scalar(f64::NAN);
        assert!(a.approx_eq(&a.clone(), &Tolerance::exact()));
        assert!(!a.approx_eq(&Numeric::Scalar(0.0), &Tolerance::default()));
    }

    #[test]
    fn deviation_reports_largest_difference() {
        let a = pair(10.0, 2.0);
        let b = pair(10.5, 2.0);

        assert_eq!(a.deviation(&b).unwrap(), 0.5);
        assert!(a.deviation(&Numeric::Scalar(1.0)).is_err());
    }

    #[test]
    fn fields_requires_exact_keys() {
        let value = pair(1.0, 2.0);
        assert!(value.fields(&["count", "total_sum"]).is_ok());
        assert!(value.fields(&["count"]).is_err());
        assert!(Numeric::Scalar(1.0).fields(&["count"]).is_err());
    }
}
