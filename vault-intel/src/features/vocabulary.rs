//! Fixed vocabulary behind the bag-of-words semantic vector.

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeTuple, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of vocabulary dimensions.
pub const VECTOR_DIMENSIONS: usize = 50;

/// Vocabulary terms in dimension order. Order is part of the vector format.
///
/// Terms shorter than three characters (`"ai"`) can never match a token and
/// always yield a zero dimension.
pub const VOCABULARY: [&str; VECTOR_DIMENSIONS] = [
    "ai",
    "data",
    "web",
    "development",
    "business",
    "tool",
    "service",
    "platform",
    "software",
    "app",
    "api",
    "database",
    "cloud",
    "analytics",
    "automation",
    "integration",
    "framework",
    "library",
    "productivity",
    "collaboration",
    "management",
    "optimization",
    "security",
    "design",
    "mobile",
    "enterprise",
    "startup",
    "marketing",
    "sales",
    "customer",
    "finance",
    "insurance",
    "maritime",
    "fintech",
    "saas",
    "marketplace",
    "ecommerce",
    "education",
    "health",
    "legal",
    "real",
    "estate",
    "property",
    "machine",
    "learning",
    "javascript",
    "python",
    "react",
    "node",
    "vue",
];

/// Binary presence vector over [`VOCABULARY`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SemanticVector([f64; VECTOR_DIMENSIONS]);

impl SemanticVector {
    /// Build the vector from a token stream.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut values = [0.0; VECTOR_DIMENSIONS];
        for (value, term) in values.iter_mut().zip(VOCABULARY.iter()) {
            if tokens.iter().any(|token| token.as_ref() == *term) {
                *value = 1.0;
            }
        }
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Vocabulary terms whose dimension is set.
    pub fn active_terms(&self) -> Vec<&'static str> {
        VOCABULARY
            .iter()
            .zip(self.0.iter())
            .filter(|(_, value)| **value > 0.0)
            .map(|(term, _)| *term)
            .collect()
    }

    pub fn magnitude(&self) -> f64 {
        self.0.iter().map(|v| v * v).sum::<f64>().sqrt()
    }
}

impl Default for SemanticVector {
    fn default() -> Self {
        Self([0.0; VECTOR_DIMENSIONS])
    }
}

impl Serialize for SemanticVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(VECTOR_DIMENSIONS)?;
        for value in &self.0 {
            tuple.serialize_element(value)?;
        }
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for SemanticVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct VectorVisitor;

        impl<'de> Visitor<'de> for VectorVisitor {
            type Value = SemanticVector;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a sequence of {} numbers", VECTOR_DIMENSIONS)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut values = [0.0; VECTOR_DIMENSIONS];
                for (index, value) in values.iter_mut().enumerate() {
                    *value = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(index, &self))?;
                }
                if seq.next_element::<f64>()?.is_some() {
                    return Err(de::Error::invalid_length(VECTOR_DIMENSIONS + 1, &self));
                }
                Ok(SemanticVector(values))
            }
        }

        deserializer.deserialize_tuple(VECTOR_DIMENSIONS, VectorVisitor)
    }
}
