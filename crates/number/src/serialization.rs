use {
    serde::{
        Deserialize,
        Deserializer,
        Serialize,
        Serializer,
        de::{self, Visitor},
    },
    std::fmt,
};

/// A human readable decimal amount as submitted by API callers.
///
/// Deserializes from a JSON string (`"1.5"`) or a JSON number (`1.5`) and
/// keeps the decimal text verbatim; scaling to base units happens in
/// [`crate::units::parse`] once the target contract is known.
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq)]
pub struct DecimalAmount(String);

impl DecimalAmount {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DecimalAmount {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for DecimalAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for DecimalAmount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DecimalAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DecimalAmountVisitor;

        impl Visitor<'_> for DecimalAmountVisitor {
            type Value = DecimalAmount;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(
                    formatter,
                    "a decimal amount encoded either as a string or as a number"
                )
            }

            fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(DecimalAmount(s.to_owned()))
            }

            fn visit_u64<E>(self, n: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(DecimalAmount(n.to_string()))
            }

            fn visit_i64<E>(self, n: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(DecimalAmount(n.to_string()))
            }

            fn visit_f64<E>(self, n: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if !n.is_finite() {
                    return Err(E::custom(format!("{n} is not a decimal amount")));
                }
                Ok(DecimalAmount(n.to_string()))
            }
        }

        deserializer.deserialize_any(DecimalAmountVisitor)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    #[test]
    fn accepts_strings_and_numbers() {
        for (value, expected) in [
            (json!("1.25"), "1.25"),
            (json!(100), "100"),
            (json!(-3), "-3"),
            (json!(0.5), "0.5"),
        ] {
            let amount: DecimalAmount = serde_json::from_value(value).unwrap();
            assert_eq!(amount.as_str(), expected);
        }
    }

    #[test]
    fn rejects_other_json_types() {
        assert!(serde_json::from_value::<DecimalAmount>(json!(null)).is_err());
        assert!(serde_json::from_value::<DecimalAmount>(json!(["1"])).is_err());
        assert!(serde_json::from_value::<DecimalAmount>(json!({"amount": 1})).is_err());
    }
}
