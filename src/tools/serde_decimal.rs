//! Serde helpers serializing big integers as base-10 strings.
//!
//! Every integer field of the public wire types goes through these modules
//! via `#[serde(with = ...)]`. In JSON the value is a decimal string (JSON
//! numbers would silently lose precision); in the binary encoding the same
//! decimal text travels as a length-prefixed byte string.

use core::fmt;

use num_bigint::BigUint;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

struct AsDecimal<'a>(&'a BigUint);

impl Serialize for AsDecimal<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_str_radix(10))
    }
}

struct FromDecimal(BigUint);

impl<'de> Deserialize<'de> for FromDecimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DecimalVisitor;

        impl de::Visitor<'_> for DecimalVisitor {
            type Value = FromDecimal;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a base-10 integer string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                BigUint::parse_bytes(v.as_bytes(), 10)
                    .map(FromDecimal)
                    .ok_or_else(|| E::custom(format!("invalid base-10 integer {v:?}")))
            }
        }

        deserializer.deserialize_str(DecimalVisitor)
    }
}

pub(crate) fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
    AsDecimal(value).serialize(serializer)
}

pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
    FromDecimal::deserialize(deserializer).map(|v| v.0)
}

pub(crate) mod vec {
    //! `#[serde(with = ...)]` helper for `Vec<BigUint>` fields.

    use super::*;

    pub(crate) fn serialize<S: Serializer>(
        value: &[BigUint],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(value.iter().map(AsDecimal))
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<BigUint>, D::Error> {
        let values = Vec::<FromDecimal>::deserialize(deserializer)?;
        Ok(values.into_iter().map(|v| v.0).collect())
    }
}

pub(crate) mod mat {
    //! `#[serde(with = ...)]` helper for `Vec<Vec<BigUint>>` fields.

    use super::*;

    struct Row<'a>(&'a [BigUint]);

    impl Serialize for Row<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(self.0.iter().map(AsDecimal))
        }
    }

    pub(crate) fn serialize<S: Serializer>(
        value: &[Vec<BigUint>],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(value.iter().map(|row| Row(row)))
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Vec<BigUint>>, D::Error> {
        let rows = Vec::<Vec<FromDecimal>>::deserialize(deserializer)?;
        Ok(rows
            .into_iter()
            .map(|row| row.into_iter().map(|v| v.0).collect())
            .collect())
    }
}
