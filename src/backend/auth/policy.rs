/**
 * Authorization Policy
 *
 * Decides how an ownership mismatch is reported for each resource kind.
 * Books, listings and negotiations hide foreign rows behind a 404 so a
 * caller cannot discover ids they do not own. Exchange requests answer
 * with an explicit 403 because the requester already knows the id.
 */

use crate::backend::error::BackendError;

/// Resource kinds that carry an owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Book,
    Listing,
    ExchangeRequest,
    Negotiation,
}

impl ResourceKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Book => "Book",
            Self::Listing => "Listing",
            Self::ExchangeRequest => "Exchange request",
            Self::Negotiation => "Negotiation",
        }
    }
}

pub struct AuthorizationPolicy;

impl AuthorizationPolicy {
    /// Whether a foreign row is reported as missing
    pub fn mask_not_found(kind: ResourceKind) -> bool {
        !matches!(kind, ResourceKind::ExchangeRequest)
    }

    /// Error for a row that exists but belongs to someone else
    pub fn ownership_denied(kind: ResourceKind) -> BackendError {
        if Self::mask_not_found(kind) {
            Self::not_found(kind)
        } else {
            BackendError::forbidden("Not authorized to update this exchange request")
        }
    }

    /// Error for a row that is absent, or masked as absent
    pub fn not_found(kind: ResourceKind) -> BackendError {
        if Self::mask_not_found(kind) {
            BackendError::not_found(format!("{} not found or does not belong to you", kind.label()))
        } else {
            BackendError::not_found(format!("{} not found", kind.label()))
        }
    }
}
