//! On-disk encoding of numeric arrays and floats.
//!
//! Arrays keep ndarray's `{v, dim, data}` layout with `data` in logical
//! (row-major) order. Finite floats are plain JSON numbers; NaN and the
//! infinities are written as the strings `"NaN"`, `"inf"` and `"-inf"`, which
//! JSON numbers cannot express.

use std::fmt;

use ndarray::{ArrayD, IxDyn, ShapeError};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::NdArray;

const NAN: &str = "NaN";
const INF: &str = "inf";
const NEG_INF: &str = "-inf";

/// Version tag of the array layout.
const ARRAY_VERSION: u8 = 1;

/// A float that survives a JSON round trip even when non-finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireFloat(pub f64);

impl Serialize for WireFloat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let v = self.0;
        if v.is_nan() {
            serializer.serialize_str(NAN)
        } else if v.is_infinite() {
            serializer.serialize_str(if v > 0.0 { INF } else { NEG_INF })
        } else {
            serializer.serialize_f64(v)
        }
    }
}

impl<'de> Deserialize<'de> for WireFloat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FloatVisitor;

        impl Visitor<'_> for FloatVisitor {
            type Value = WireFloat;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number or one of \"NaN\", \"inf\", \"-inf\"")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<WireFloat, E> {
                Ok(WireFloat(v))
            }

            #[allow(clippy::cast_precision_loss)]
            fn visit_i64<E: de::Error>(self, v: i64) -> Result<WireFloat, E> {
                Ok(WireFloat(v as f64))
            }

            #[allow(clippy::cast_precision_loss)]
            fn visit_u64<E: de::Error>(self, v: u64) -> Result<WireFloat, E> {
                Ok(WireFloat(v as f64))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<WireFloat, E> {
                match v {
                    NAN => Ok(WireFloat(f64::NAN)),
                    INF => Ok(WireFloat(f64::INFINITY)),
                    NEG_INF => Ok(WireFloat(f64::NEG_INFINITY)),
                    other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
                }
            }
        }

        deserializer.deserialize_any(FloatVisitor)
    }
}

/// `serde(with)` adapter for scalar `f64` fields.
pub mod float {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::WireFloat;

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        WireFloat(*value).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        WireFloat::deserialize(deserializer).map(|w| w.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrayRepr<T> {
    v: u8,
    dim: Vec<usize>,
    data: Vec<T>,
}

impl<T> ArrayRepr<T> {
    fn from_array<A: Copy>(array: &ArrayD<A>, convert: impl Fn(A) -> T) -> Self {
        Self {
            v: ARRAY_VERSION,
            dim: array.shape().to_vec(),
            data: array.iter().copied().map(convert).collect(),
        }
    }

    fn into_array<A>(self, convert: impl Fn(T) -> A) -> Result<ArrayD<A>, ShapeError> {
        let data = self.data.into_iter().map(convert).collect();
        ArrayD::from_shape_vec(IxDyn(&self.dim), data)
    }
}

/// Serialized form of [`NdArray`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NdArrayRepr {
    Float32(ArrayRepr<WireFloat>),
    Float64(ArrayRepr<WireFloat>),
    Int64(ArrayRepr<i64>),
}

impl From<NdArray> for NdArrayRepr {
    fn from(array: NdArray) -> Self {
        match array {
            NdArray::Float32(a) => Self::Float32(ArrayRepr::from_array(&a, |v| WireFloat(f64::from(v)))),
            NdArray::Float64(a) => Self::Float64(ArrayRepr::from_array(&a, WireFloat)),
            NdArray::Int64(a) => Self::Int64(ArrayRepr::from_array(&a, |v| v)),
        }
    }
}

impl TryFrom<NdArrayRepr> for NdArray {
    type Error = ShapeError;

    #[allow(clippy::cast_possible_truncation)]
    fn try_from(repr: NdArrayRepr) -> Result<Self, Self::Error> {
        Ok(match repr {
            NdArrayRepr::Float32(r) => NdArray::Float32(r.into_array(|w| w.0 as f32)?),
            NdArrayRepr::Float64(r) => NdArray::Float64(r.into_array(|w| w.0)?),
            NdArrayRepr::Int64(r) => NdArray::Int64(r.into_array(|v| v)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_non_finite_floats_as_strings() {
        let array = NdArray::Float64(arr1(&[1.5, f64::NAN, f64::INFINITY, f64::NEG_INFINITY]).into_dyn());
        let json = serde_json::to_value(&array).unwrap();
        assert_eq!(json["float64"]["data"], serde_json::json!([1.5, "NaN", "inf", "-inf"]));
    }

    #[test]
    fn test_float32_non_finite_round_trip() {
        let array = NdArray::Float32(arr2(&[[0.1_f32, f32::NAN], [f32::INFINITY, -2.5]]).into_dyn());
        let text = serde_json::to_string(&array).unwrap();
        let NdArray::Float32(back) = serde_json::from_str::<NdArray>(&text).unwrap() else {
            panic!("dtype changed");
        };
        assert_eq!(back.shape(), &[2, 2]);
        assert_eq!(back[[0, 0]].to_bits(), 0.1_f32.to_bits());
        assert!(back[[0, 1]].is_nan());
        assert_eq!(back[[1, 0]], f32::INFINITY);
        assert_eq!(back[[1, 1]], -2.5);
    }

    #[test]
    fn test_rejects_unknown_float_string() {
        let json = r#"{"float64": {"v": 1, "dim": [1], "data": ["nan?"]}}"#;
        assert!(serde_json::from_str::<NdArray>(json).is_err());
    }

    #[test]
    fn test_rejects_inconsistent_dim() {
        let json = r#"{"int64": {"v": 1, "dim": [2, 2], "data": [1, 2, 3]}}"#;
        assert!(serde_json::from_str::<NdArray>(json).is_err());
    }
}
