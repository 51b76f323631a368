//! Reusable UI widgets embedded in views.

mod transaction_view;

pub use transaction_view::{TransactionView, TxSummary};
