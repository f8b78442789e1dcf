use std::collections::BTreeSet;

use crate::error::ServiceError;
use crate::models::{ContactDetails, Professional};
use crate::services::ContactRequester;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactGate {
    Hidden,
    Revealed,
}

impl ContactGate {
    pub fn of(pro: &Professional) -> Self {
        if pro.contact_hidden {
            Self::Hidden
        } else {
            Self::Revealed
        }
    }
}

/// Contact details, only when the professional has made them visible.
pub fn visible_contact(pro: &Professional) -> Option<&ContactDetails> {
    match ContactGate::of(pro) {
        ContactGate::Revealed => Some(&pro.contact),
        ContactGate::Hidden => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Sent,
    AlreadyRequested,
    /// Details are already visible, nothing to request.
    NotNeeded,
}

/// Professionals the user has asked for contact details this session.
///
/// Requesting never reveals anything by itself: the gate only opens when the
/// professional's own record stops being hidden.
#[derive(Debug, Clone, Default)]
pub struct ContactRequests {
    requested: BTreeSet<u32>,
}

impl ContactRequests {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_requested(&self, professional_id: u32) -> bool {
        self.requested.contains(&professional_id)
    }

    pub fn len(&self) -> usize {
        self.requested.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requested.is_empty()
    }

    pub fn button_label(&self, pro: &Professional) -> &'static str {
        match ContactGate::of(pro) {
            ContactGate::Revealed => "Contact Professional",
            ContactGate::Hidden if self.is_requested(pro.id) => "Request Sent",
            ContactGate::Hidden => "Request Contact",
        }
    }

    /// Disabled once a request is pending.
    pub fn button_enabled(&self, pro: &Professional) -> bool {
        !(ContactGate::of(pro) == ContactGate::Hidden && self.is_requested(pro.id))
    }

    /// Records the request and forwards it once. A failed forward leaves the
    /// professional unrequested so the user can try again.
    pub async fn request<R: ContactRequester>(
        &mut self,
        pro: &Professional,
        requester: &R,
    ) -> Result<RequestOutcome, ServiceError> {
        if ContactGate::of(pro) == ContactGate::Revealed {
            return Ok(RequestOutcome::NotNeeded);
        }
        if self.is_requested(pro.id) {
            tracing::debug!(professional_id = pro.id, "contact already requested");
            return Ok(RequestOutcome::AlreadyRequested);
        }

        requester.notify(pro.id).await?;
        self.requested.insert(pro.id);
        Ok(RequestOutcome::Sent)
    }
}
