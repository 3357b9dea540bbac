pub mod inputs;
pub mod outputs;
pub mod preset;
pub mod rules;
pub mod store;

// Flat public surface for domain types and functions.
pub use inputs::{
    CalcInputs, EarnerType, InputError, NonSalaryInputs, Period, ReliefClaim, ReliefType,
    SalaryInputs, MAX_INPUT_AMOUNT,
};
pub use outputs::{CalcOutputs, LineItem};
pub use preset::default_rules;
pub use rules::{
    AllowanceKind, Bracket, Ceiling, PayeRules, PersonalAllowance, ReliefGates, RulesError,
    UNBOUNDED_SENTINEL,
};
pub use store::{
    fingerprint, load_rules, read_rules_document, write_rules_document, RulesDocument,
    RulesSource,
};
