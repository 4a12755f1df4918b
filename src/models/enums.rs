use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// Declaration order is the catalog order used for alias resolution
// and for deterministic iteration over per-document maps.
str_enum!(ParameterKey {
    Hemoglobin => "hemoglobin",
    Glucose => "glucose",
    Cholesterol => "cholesterol",
    RbcCount => "rbc_count",
    PlateletCount => "platelet_count",
    WbcCount => "wbc_count",
    Mchc => "mchc",
    Mcv => "mcv",
    Mch => "mch",
});

str_enum!(Verdict {
    Low => "low",
    Normal => "normal",
    High => "high",
    Unknown => "unknown",
});

// Ord puts Male first: the "first available" range fallback relies on it.
str_enum!(SexCategory {
    Male => "male",
    Female => "female",
    Any => "any",
});

impl ParameterKey {
    pub const ALL: [ParameterKey; 9] = [
        ParameterKey::Hemoglobin,
        ParameterKey::Glucose,
        ParameterKey::Cholesterol,
        ParameterKey::RbcCount,
        ParameterKey::PlateletCount,
        ParameterKey::WbcCount,
        ParameterKey::Mchc,
        ParameterKey::Mcv,
        ParameterKey::Mch,
    ];
}

impl SexCategory {
    /// Lenient parse for free-form sex/gender cells ("Male", " f ", "FEMALE").
    /// Anything unrecognised yields `None`, which callers treat as "no sex given".
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "male" | "m" => Some(Self::Male),
            "female" | "f" => Some(Self::Female),
            "any" => Some(Self::Any),
            _ => None,
        }
    }
}
