pub mod draft;
pub mod line_items;
pub mod session;
pub mod submit;

pub use draft::{OriginalSnapshot, WorkingDraft};
pub use line_items::{normalize_amount, LineItemSet};
pub use session::{CompositionSession, SessionDeps};
pub use submit::{SubmissionOrchestrator, SubmitPhase, CONTACT_ADMIN_MESSAGE};
