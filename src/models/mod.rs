pub mod diagnosis;
pub mod enums;
pub mod medicine;
pub mod patient;
pub mod purchase;

pub use diagnosis::*;
pub use enums::*;
pub use medicine::*;
pub use patient::*;
pub use purchase::*;
