//! Legislative act tracking: the stage catalogue, per-act progress
//! derivation, filtering, public consultation comments, and the services
//! the HTTP layer composes over repository traits.

pub mod comments;
pub mod domain;
pub mod filter;
pub mod model;
pub mod service;
pub mod stages;

pub use filter::{filter_acts, FilterCriteria};
pub use model::{Act, ActId, Comment, Stage};
pub use service::{ActService, CommentService, SubscriptionService};
pub use stages::{current_stage, percent_complete, validate_chronology};
