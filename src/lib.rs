//! PAYE personal income tax calculator.
//!
//! [`tax::compute_tax`] is a pure function of the inputs and a rules
//! document. It returns the tax due together with an ordered audit trail of
//! every deduction and bracket contribution.

pub mod batch;
pub mod core;
pub mod money;
pub mod tax;
