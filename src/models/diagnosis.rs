use serde::{Deserialize, Serialize};

use super::enums::Problem;

/// One row of the problem → medicine recommendation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisMapping {
    pub problem: String,
    pub medicine: String,
}

/// Built-in recommendation table, written to the store at every session start.
pub const DEFAULT_DIAGNOSIS_TABLE: [(Problem, &str); 10] = [
    (Problem::Cold, "Antihistamines"),
    (Problem::Cough, "Dextromethorphan-based cough syrup"),
    (Problem::Flu, "Antiviral medications"),
    (Problem::Headache, "Ibuprofen"),
    (Problem::Allergies, "Antihistamines"),
    (Problem::Heartburn, "Antacids"),
    (Problem::MinorBurns, "Antiseptic Cream"),
    (Problem::MusclePain, "Ibuprofen"),
    (Problem::Nausea, "Antiemetics"),
    (Problem::Insomnia, "Over-the-counter Sleep Aids"),
];

pub fn default_diagnosis_mappings() -> Vec<DiagnosisMapping> {
    DEFAULT_DIAGNOSIS_TABLE
        .iter()
        .map(|(problem, medicine)| DiagnosisMapping {
            problem: problem.as_str().to_string(),
            medicine: (*medicine).to_string(),
        })
        .collect()
}
