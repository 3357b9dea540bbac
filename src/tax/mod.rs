pub mod brackets;
pub mod engine;
pub mod reliefs;

pub use brackets::{apply_brackets, BracketSlice, BracketTax};
pub use engine::{compute_tax, gross_income, AllowanceMode, Calculator};
pub use reliefs::{resolve as resolve_relief, ResolvedRelief, RELIEF_RULES};
