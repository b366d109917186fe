//! Per-request caller context.

use uuid::Uuid;

/// Identity of the caller, as validated by the upstream gateway.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    pub user_id: Uuid,
}

impl RequestContext {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}
