use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The string form doubles as the serde representation.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
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

// The four named collections of the store.
str_enum!(Collection {
    Medicines => "medicines",
    Patients => "patients",
    DiagnosisMedicine => "diagnosis_medicine",
    Purchases => "purchases",
});

// Diagnosis labels offered by the patient registration form.
str_enum!(Problem {
    Cold => "Cold",
    Cough => "Cough",
    Flu => "Flu",
    Headache => "Headache",
    Allergies => "Allergies",
    Heartburn => "Heartburn",
    MinorBurns => "Minor Burns",
    MusclePain => "Muscle Pain",
    Nausea => "Nausea",
    Insomnia => "Insomnia",
});
