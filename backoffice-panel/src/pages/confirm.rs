//! Explicit confirmation before a destructive call

use std::future::Future;

use backoffice_client::{ClientResult, Mutation, QueryCache, QueryKey};

use crate::error::PanelResult;

/// Delete confirmation dialog state.
///
/// Nothing is sent until [`confirm`](Self::confirm) runs with a pending
/// request; [`cancel`](Self::cancel) leaves everything untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDelete<Id> {
    pending: Option<Id>,
}

impl<Id> Default for ConfirmDelete<Id> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<Id> ConfirmDelete<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the dialog for `id`
    pub fn request(&mut self, id: Id) {
        self.pending = Some(id);
    }

    /// Close the dialog without deleting
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<&Id> {
        self.pending.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Run `delete` for the pending id and invalidate `list` on success.
    ///
    /// Returns `false` when no deletion was requested. On failure the
    /// dialog closes and the error is returned for inline display.
    pub async fn confirm<F, Fut>(
        &mut self,
        cache: &QueryCache,
        list: QueryKey,
        delete: F,
    ) -> PanelResult<bool>
    where
        F: FnOnce(Id) -> Fut,
        Fut: Future<Output = ClientResult<()>>,
    {
        let Some(id) = self.pending.take() else {
            return Ok(false);
        };
        let mut mutation = Mutation::new().invalidates(list);
        mutation.run(cache, delete(id)).await?;
        Ok(true)
    }
}
