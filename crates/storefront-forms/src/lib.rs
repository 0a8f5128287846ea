// File: storefront-forms/src/lib.rs
// Purpose: Main entry point for the storefront form validation engine

//! # storefront-forms
//!
//! Client-side form validation for the storefront pages: fields are checked
//! when the visitor leaves them, errors clear as soon as they type again, and
//! a valid form goes through a simulated submission that reports back with a
//! self-dismissing banner.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use storefront_forms::{FormConfig, FormValidator, MemoryDocument, MemoryForm,
//!     SimulatedSubmitter, TokioRuntime};
//! use storefront_validation::FieldAttributes;
//!
//! let page = MemoryDocument::new().with_form(
//!     MemoryForm::new("newsletter-form")
//!         .with_field(FieldAttributes::named("email").kind("email").required(), "")
//!         .with_submit("Subscribe"),
//! );
//!
//! let config = FormConfig::load_default()?;
//! let submitter = SimulatedSubmitter::new(TokioRuntime, config.submit_delay());
//! let validator = FormValidator::attach(&page, "newsletter-form", submitter, TokioRuntime, config);
//!
//! // Inside a tokio LocalSet:
//! let outcome = validator.handle_submit().await;
//! ```

pub mod accessor;
pub mod banner;
pub mod config;
pub mod memory;
pub mod runtime;
pub mod state;
pub mod submit;
pub mod validator;

// Re-export main types
pub use accessor::{FormAccessor, FormHost};
pub use banner::{Banner, BannerId, BannerQueue, BannerSurface, BannerTiming, Placement, Severity};
pub use config::FormConfig;
pub use memory::{MemoryDocument, MemoryForm, PlacedBanner, SubmitControl};
pub use runtime::Runtime;
#[cfg(feature = "tokio")]
pub use runtime::TokioRuntime;
pub use state::{FieldId, FieldState};
pub use submit::{FormPayload, SimulatedSubmitter, SubmitError, Submitter};
pub use validator::{FormValidator, SubmitOutcome};
