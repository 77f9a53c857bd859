//! Ontario land transfer tax estimator core.
//!
//! * [`calculations`]: provincial and municipal tax, rebates, legal fees.
//! * [`summary`]: assembles calculator output into a [`SummaryReport`].
//! * [`session`]: the submit / export / reset cycle of one user.
//! * [`render`]: the interface document backends implement.

pub mod calculations;
pub mod models;
pub mod render;
pub mod session;
pub mod summary;

pub use calculations::{
    CalculationError, compute_legal_fee, compute_municipal_tax, compute_provincial_tax,
    compute_rebate,
};
pub use models::*;
pub use render::{DocumentArtifact, DocumentRenderer, RenderError, RendererRegistry};
pub use session::{Session, SessionError, SessionState};
pub use summary::{SummaryAssembler, assemble};
