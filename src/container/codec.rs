//! Conversions between typed machine values and [`Numeric`].

use super::Numeric;
use crate::core::ShapeError;
use nalgebra::DVector;

/// Lower a typed value into a [`Numeric`].
pub trait ToNumeric {
    fn to_numeric(&self) -> Numeric;
}

/// Rebuild a typed value from a [`Numeric`], checking its shape.
pub trait FromNumeric: Sized {
    fn from_numeric(value: &Numeric) -> Result<Self, ShapeError>;
}

fn whole_number(what: &'static str, value: f64) -> Result<f64, ShapeError> {
    if value.is_finite() && value.fract() == 0.0 {
        Ok(value)
    } else {
        Err(ShapeError::InvalidValue { what, value })
    }
}

impl ToNumeric for f64 {
    fn to_numeric(&self) -> Numeric {
        Numeric::Scalar(*self)
    }
}

impl FromNumeric for f64 {
    fn from_numeric(value: &Numeric) -> Result<Self, ShapeError> {
        value.as_scalar()
    }
}

impl ToNumeric for u64 {
    fn to_numeric(&self) -> Numeric {
        Numeric::Scalar(*self as f64)
    }
}

impl FromNumeric for u64 {
    fn from_numeric(value: &Numeric) -> Result<Self, ShapeError> {
        let raw = whole_number("unsigned integer", value.as_scalar()?)?;
        if raw < 0.0 {
            return Err(ShapeError::InvalidValue {
                what: "unsigned integer",
                value: raw,
            });
        }
        Ok(raw as u64)
    }
}

impl ToNumeric for i64 {
    fn to_numeric(&self) -> Numeric {
        Numeric::Scalar(*self as f64)
    }
}

impl FromNumeric for i64 {
    fn from_numeric(value: &Numeric) -> Result<Self, ShapeError> {
        Ok(whole_number("integer", value.as_scalar()?)? as i64)
    }
}

impl ToNumeric for Vec<f64> {
    fn to_numeric(&self) -> Numeric {
        Numeric::Array(self.clone())
    }
}

impl FromNumeric for Vec<f64> {
    fn from_numeric(value: &Numeric) -> Result<Self, ShapeError> {
        Ok(value.as_array()?.to_vec())
    }
}

impl ToNumeric for Vec<i64> {
    fn to_numeric(&self) -> Numeric {
        Numeric::Array(self.iter().map(|v| *v as f64).collect())
    }
}

impl FromNumeric for Vec<i64> {
    fn from_numeric(value: &Numeric) -> Result<Self, ShapeError> {
        value
            .as_array()?
            .iter()
            .map(|v| whole_number("integer", *v).map(|v| v as i64))
            .collect()
    }
}

/// Absence is an empty array, presence a one-element array.
impl ToNumeric for Option<f64> {
    fn to_numeric(&self) -> Numeric {
        Numeric::Array(self.iter().copied().collect())
    }
}

impl FromNumeric for Option<f64> {
    fn from_numeric(value: &Numeric) -> Result<Self, ShapeError> {
        match value.as_array()? {
            [] => Ok(None),
            [single] => Ok(Some(*single)),
            more => Err(ShapeError::LengthMismatch {
                what: "optional value",
                expected: 1,
                found: more.len(),
            }),
        }
    }
}

impl ToNumeric for DVector<f64> {
    fn to_numeric(&self) -> Numeric {
        Numeric::Array(self.iter().copied().collect())
    }
}

impl FromNumeric for DVector<f64> {
    fn from_numeric(value: &Numeric) -> Result<Self, ShapeError> {
        Ok(DVector::from_column_slice(value.as_array()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_reject_fractions() {
        assert_eq!(u64::from_numeric(&Numeric::Scalar(3.0)), Ok(3));
        assert!(u64::from_numeric(&Numeric::Scalar(2.5)).is_err());
        assert!(u64::from_numeric(&Numeric::Scalar(-1.0)).is_err());
        assert_eq!(i64::from_numeric(&Numeric::Scalar(-4.0)), Ok(-4));
    }

    #[test]
    fn optional_values_use_array_length() {
        assert_eq!(None::<f64>.to_numeric(), Numeric::Array(vec![]));
        assert_eq!(Some(3.0).to_numeric(), Numeric::Array(vec![3.0]));
        assert_eq!(Option::<f64>::from_numeric(&Numeric::Array(vec![])), Ok(None));
        assert!(Option::<f64>::from_numeric(&Numeric::Array(vec![1.0, 2.0])).is_err());
    }

    #[test]
    fn vectors_convert_to_arrays() {
        let vector = DVector::from_vec(vec![1.0, 2.0]);
        let numeric = vector.to_numeric();

        assert_eq!(numeric, Numeric::Array(vec![1.0, 2.0]));
        assert_eq!(DVector::<f64>::from_numeric(&numeric).unwrap(), vector);
        assert!(Vec::<f64>::from_numeric(&Numeric::Scalar(1.0)).is_err());
    }

    #[test]
    fn integer_arrays_reject_fractions() {
        assert_eq!(
            Vec::<i64>::from_numeric(&Numeric::Array(vec![1.0, -3.0])),
            Ok(vec![1, -3])
        );
        assert!(Vec::<i64>::from_numeric(&Numeric::Array(vec![1.5])).is_err());
    }
}
