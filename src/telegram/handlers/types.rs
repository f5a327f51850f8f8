//! Handler types and dependencies

use std::sync::Arc;

use crate::bwh::TrafficSource;
use crate::telegram::auth::AccessList;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub traffic: Arc<dyn TrafficSource>,
    pub veids: Arc<Vec<String>>,
    pub access: AccessList,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(traffic: Arc<dyn TrafficSource>, veids: Vec<String>, access: AccessList) -> Self {
        Self {
            traffic,
            veids: Arc::new(veids),
            access,
        }
    }
}
