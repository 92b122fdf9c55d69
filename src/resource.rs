//! The fixed set of dashboard resources and their last-known values.

use serde::Serialize;
use serde_json::Value;
use std::str::FromStr;

/// One of the fixed named JSON data sets served by the dashboard backend.
///
/// The set is closed: the aggregator always fetches exactly these four
/// resources, one endpoint each, in a single fan-out per cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    /// Query rewriter metrics.
    Rewriter,
    /// Adoption metrics.
    Adoption,
    /// User feedback metrics.
    Feedback,
    /// Backend status and cache statistics.
    Status,
}

impl Resource {
    /// Every resource, in the order cycles dispatch them.
    pub const ALL: [Resource; 4] = [
        Resource::Rewriter,
        Resource::Adoption,
        Resource::Feedback,
        Resource::Status,
    ];

    /// Returns the endpoint path for this resource, relative to the API base URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Resource::Rewriter => "api/rewriter",
            Resource::Adoption => "api/adoption",
            Resource::Feedback => "api/feedback",
            Resource::Status => "api/status",
        }
    }
}

impl FromStr for Resource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rewriter" => Ok(Resource::Rewriter),
            "adoption" => Ok(Resource::Adoption),
            "feedback" => Ok(Resource::Feedback),
            "status" => Ok(Resource::Status),
            _ => Err(()),
        }
    }
}

/// Last-known JSON value per resource; `None` until the first successful cycle.
///
/// Values are replaced only as a complete set (all four at once) so a reader
/// never observes a mix of values from two different cycles.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResourceSet {
    rewriter: Option<Value>,
    adoption: Option<Value>,
    feedback: Option<Value>,
    status: Option<Value>,
}

impl ResourceSet {
    /// An empty set, as seen before any cycle has completed.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_values(
        rewriter: Value,
        adoption: Value,
        feedback: Value,
        status: Value,
    ) -> Self {
        Self {
            rewriter: Some(rewriter),
            adoption: Some(adoption),
            feedback: Some(feedback),
            status: Some(status),
        }
    }

    pub fn get(&self, resource: Resource) -> Option<&Value> {
        match resource {
            Resource::Rewriter => self.rewriter.as_ref(),
            Resource::Adoption => self.adoption.as_ref(),
            Resource::Feedback => self.feedback.as_ref(),
            Resource::Status => self.status.as_ref(),
        }
    }

    pub fn rewriter(&self) -> Option<&Value> {
        self.get(Resource::Rewriter)
    }

    pub fn adoption(&self) -> Option<&Value> {
        self.get(Resource::Adoption)
    }

    pub fn feedback(&self) -> Option<&Value> {
        self.get(Resource::Feedback)
    }

    pub fn status(&self) -> Option<&Value> {
        self.get(Resource::Status)
    }

    /// True once every resource has a value.
    pub fn is_complete(&self) -> bool {
        Resource::ALL.iter().all(|r| self.get(*r).is_some())
    }
}
