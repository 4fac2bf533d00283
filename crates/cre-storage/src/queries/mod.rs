//! Raw SQL per table. Business rules live in `cre-ledger`.

pub mod audit_ops;
pub mod claim_ops;
pub mod override_ops;
pub mod resolution_ops;
pub mod review_ops;
pub mod trust_ops;
