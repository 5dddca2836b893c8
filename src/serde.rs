//! # Serde module for Sketch
//!
//! Lets an external execution framework ship partial sketches between workers with any serde
//! format. No storage format is defined here; the sketch is exposed to serde as a tuple:
//! `(precision, seed, registers)`.
//!
//! During deserialization, the tuple is validated through `Sketch::from_registers`, so precision,
//! register count and register ranks must all be consistent.
//!
//! Refer to the serde documentation for more details on custom serialization and deserialization:
//! - [Serialization](https://serde.rs/impl-serialize.html)
//! - [Deserialization](https://serde.rs/impl-deserialize.html)
use serde::de::Error;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize};

use crate::config::SketchConfig;
use crate::sketch::Sketch;

impl Serialize for Sketch {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut tup = serializer.serialize_tuple(3)?;
        tup.serialize_element(&self.precision())?;
        tup.serialize_element(&self.seed())?;
        tup.serialize_element(self.registers())?;
        tup.end()
    }
}

impl<'de> Deserialize<'de> for Sketch {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let (precision, seed, registers): (u32, u32, Vec<u8>) =
            Deserialize::deserialize(deserializer)?;
        let config = SketchConfig::new(precision, seed).map_err(D::Error::custom)?;
        Sketch::from_registers(config, registers).map_err(D::Error::custom)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0; "empty set")]
    #[test_case(1; "single element")]
    #[test_case(100; "hundred distinct elements")]
    #[test_case(10000; "ten thousand distinct elements")]
    fn test_serde(n: usize) {
        let mut original = Sketch::new(6, 0x9747_b28c).unwrap();
        for i in 0..n {
            original.update(&format!("item{}", i)).unwrap();
        }

        let serialized = serde_json::to_string(&original).expect("serialization failed");
        assert!(
            serialized.starts_with("[6,2538058380,["),
            "unexpected layout: {serialized}"
        );

        let deserialized: Sketch =
            serde_json::from_str(&serialized).expect("deserialization failed");
        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_merge_after_transfer() {
        let mut lhs = Sketch::new(4, 0).unwrap();
        let mut rhs = Sketch::new(4, 0).unwrap();
        for i in 0..20 {
            lhs.update(&format!("lhs{i}")).unwrap();
            rhs.update(&format!("rhs{i}")).unwrap();
        }

        let shipped: Sketch = serde_json::from_str(&serde_json::to_string(&rhs).unwrap()).unwrap();
        assert_eq!(lhs.merged(&shipped).unwrap(), lhs.merged(&rhs).unwrap());
    }

    #[test_case("{ invalid_json_string }"; "invalid json")]
    #[test_case("[0,0,[0]]"; "zero precision")]
    #[test_case("[27,0,[]]"; "precision too large")]
    #[test_case("[2,0,[0,0,0]]"; "wrong register count")]
    #[test_case("[2,0,[0,0,0,32]]"; "rank above maximum")]
    #[test_case("[2,0,[0,0,0,256]]"; "register overflow")]
    #[test_case("[2,0]"; "missing registers")]
    fn test_failed_deserialization(input: &str) {
        let result: Result<Sketch, _> = serde_json::from_str(input);
        assert!(result.is_err());
    }
}
