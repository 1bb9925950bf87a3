//! Submission of cigar trees to a remote history store.
//!
//! [Publisher] is the capability the pipeline is given; it submits one
//! [CigarTree] under a family id and hands back the store's acknowledgement.
//!
//! * [HttpPublisher] - `POST <base>/<family-id>` with a JSON body
//! * [RecordingPublisher] - keeps submissions in memory (tests, dry runs)

mod http;
mod recording;

pub use self::http::{DEFAULT_BASE_URL, HttpPublisher};
pub use self::recording::{RecordingPublisher, Submission};

use crate::cigar_tree::CigarTree;
use serde_json::Value;
use thiserror::Error;

/// Response document of the store; `None` if it sent an empty body.
pub type Acknowledgement = Option<Value>;

/// Destination for built cigar trees.
///
/// A submission is attempted exactly once; there is no retry.
pub trait Publisher {
    /// Submits `tree` under `family_id`, an opaque identifier.
    fn submit(&self, family_id: &str, tree: &CigarTree) -> Result<Acknowledgement, PublishError>;
}

impl<P: Publisher + ?Sized> Publisher for &P {
    fn submit(&self, family_id: &str, tree: &CigarTree) -> Result<Acknowledgement, PublishError> {
        (**self).submit(family_id, tree)
    }
}

impl<P: Publisher + ?Sized> Publisher for Box<P> {
    fn submit(&self, family_id: &str, tree: &CigarTree) -> Result<Acknowledgement, PublishError> {
        (**self).submit(family_id, tree)
    }
}

/// Failures while submitting a cigar tree.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The base address cannot carry a family id segment
    #[error("invalid base URL '{0}'")]
    InvalidUrl(String),

    /// The request could not be completed
    #[error("request to history store failed")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a non-success status
    #[error("history store answered {status}: {body}")]
    Status { status: u16, body: String },

    /// The tree could not be serialized
    #[error("failed to encode cigar tree")]
    Encode(#[from] serde_json::Error),
}
