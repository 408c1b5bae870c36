pub mod catalog;
pub mod document;
pub mod outcome;
pub mod payload;

pub use catalog::{CatalogSnapshot, Customer, Product};
pub use document::{
    DocumentKind, DraftHeader, LineItem, PersistedDocument, PersistedLine, PurchaseHeader,
    SalesHeader,
};
pub use outcome::{Severity, WriteOutcome};
pub use payload::{DocumentPayload, PayloadLine};
