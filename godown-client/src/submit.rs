//! Submission pipeline
//!
//! Upload-then-create as an explicit state machine. An image upload
//! failure is a hard stop: the product request is never issued without
//! the upload having succeeded. The draft survives every failure so the
//! user can retry without re-entering data.

use shared::models::Product;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::api::StockApi;
use crate::auth::{Action, ensure_can};
use crate::catalog::ProductCache;
use crate::draft::ProductDraft;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionStore;

/// Pipeline state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    /// Staged image upload in flight
    Uploading,
    /// Product create/update request in flight
    Submitting,
    Succeeded,
    Failed(String),
}

/// Orchestrates one draft submission at a time
#[derive(Debug)]
pub struct SubmissionPipeline {
    state: SubmitState,
    cancel: CancellationToken,
}

impl Default for SubmissionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionPipeline {
    pub fn new() -> Self {
        Self::with_cancellation(CancellationToken::new())
    }

    /// Tie the pipeline to the consuming view's lifetime: cancelling the
    /// token prevents a completed upload from turning into a submission
    /// after the view is gone.
    pub fn with_cancellation(cancel: CancellationToken) -> Self {
        Self {
            state: SubmitState::Idle,
            cancel,
        }
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    /// Signal that the consuming view has been torn down
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Return to `Idle` for a fresh draft
    pub fn reset(&mut self) {
        self.state = SubmitState::Idle;
    }

    /// Execute the two-phase submission for the draft.
    ///
    /// Order: re-entry guard, authorization gate, local validation (all
    /// before any network traffic), then image upload if one is staged,
    /// then the single create/update request carrying the embedded
    /// variants. A 401 anywhere invalidates the session; the mutation is
    /// reported failed, never retried automatically.
    pub async fn submit<A: StockApi + ?Sized>(
        &mut self,
        api: &mut A,
        session: &mut SessionStore,
        draft: &ProductDraft,
        products: &mut ProductCache,
    ) -> ClientResult<Product> {
        match self.state {
            SubmitState::Idle | SubmitState::Failed(_) => {}
            _ => {
                return Err(ClientError::InvalidState(
                    "a submission is already in progress".to_string(),
                ));
            }
        }

        let role = session.role().ok_or(ClientError::Unauthorized)?;
        ensure_can(role, Action::EditProduct)?;

        // Validation failures leave the pipeline state untouched.
        draft.validate()?;

        let image_url = if let Some(image) = draft.image.staged() {
            self.state = SubmitState::Uploading;
            info!(file = %image.file_name, "uploading staged image");
            match api.upload_image(image).await {
                Ok(url) => Some(url),
                Err(err) => {
                    return Err(self.fail(api, session, ClientError::Upload(Box::new(err))));
                }
            }
        } else {
            draft.image.persisted_url().map(str::to_string)
        };

        if self.cancel.is_cancelled() {
            // The view is gone; a completed upload must not become a
            // submission.
            self.state = SubmitState::Idle;
            return Err(ClientError::Cancelled);
        }

        self.state = SubmitState::Submitting;
        let payload = match draft.assemble(image_url) {
            Ok(payload) => payload,
            Err(err) => return Err(self.fail(api, session, err)),
        };

        let result = match draft.product_id() {
            Some(id) => api.update_product(id, &payload).await,
            None => api.create_product(&payload).await,
        };

        let product = match result {
            Ok(product) => product,
            Err(err) => return Err(self.fail(api, session, err)),
        };

        self.state = SubmitState::Succeeded;
        info!(item_id = %product.item_id, variants = product.variants.len(), "product submitted");

        // The submission already stands; a failed refresh is retryable on
        // its own.
        if let Err(err) = products.refresh(api).await {
            warn!(error = %err, "product list refresh failed after submit");
        }

        Ok(product)
    }

    fn fail<A: StockApi + ?Sized>(
        &mut self,
        api: &mut A,
        session: &mut SessionStore,
        err: ClientError,
    ) -> ClientError {
        if err.is_auth_error() {
            session.invalidate(api);
        }
        warn!(error = %err, "submission failed");
        self.state = SubmitState::Failed(err.to_string());
        err
    }
}
