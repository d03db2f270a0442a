//! Amount helpers.
//!
//! Amounts are wei-denominated `u128` values. TOML integers are 64-bit, so
//! amounts cross configuration and report files as decimal strings.

/// 1 ETH expressed in wei.
pub const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;

/// Serde adapter writing a `u128` as a decimal string and reading either a
/// decimal string or a plain integer.
///
/// Use with `#[serde(with = "oracle_types::amount::decimal")]`.
pub mod decimal {
    use serde::de::{self, Deserializer, Visitor};
    use serde::Serializer;
    use std::fmt;

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        deserializer.deserialize_any(DecimalVisitor)
    }

    struct DecimalVisitor;

    impl Visitor<'_> for DecimalVisitor {
        type Value = u128;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an unsigned integer or a decimal string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u128, E> {
            Ok(v as u128)
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<u128, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u128, E> {
            u128::try_from(v).map_err(|_| E::custom(format!("negative amount: {v}")))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u128, E> {
            v.trim()
                .replace('_', "")
                .parse::<u128>()
                .map_err(|e| E::custom(format!("invalid amount {v:?}: {e}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Holder {
        #[serde(with = "super::decimal")]
        amount: u128,
    }

    #[test]
    fn large_amounts_survive_toml() {
        let h = Holder {
            amount: 32 * super::WEI_PER_ETH * 1_000_000,
        };
        let text = toml::to_string(&h).unwrap();
        assert!(text.contains("\"32000000000000000000000000\""));
        let back: Holder = toml::from_str(&text).unwrap();
        assert_eq!(back, h);
    }

    #[test]
    fn plain_integers_are_accepted() {
        let back: Holder = toml::from_str("amount = 42").unwrap();
        assert_eq!(back.amount, 42);
        let back: Holder = serde_json::from_str(r#"{"amount": 7}"#).unwrap();
        assert_eq!(back.amount, 7);
    }

    #[test]
    fn underscores_and_negatives() {
        let back: Holder = toml::from_str("amount = \"1_000\"").unwrap();
        assert_eq!(back.amount, 1000);
        assert!(toml::from_str::<Holder>("amount = -1").is_err());
        assert!(serde_json::from_str::<Holder>(r#"{"amount": "abc"}"#).is_err());
    }
}
