//! External advisory collaborators and the contract their output must meet
pub mod advisory;

pub use advisory::{
    collect_advisory, parse_review_output, parse_review_text, Advisory, AdvisoryProvider,
    TextAdvisory,
};
