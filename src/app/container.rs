use std::sync::Arc;
use std::time::Duration;

use crate::adapters::{ClientConfig, HttpTransferAdapter, TerminalPresenter};
use crate::app::workflow_controller::WorkflowController;
use crate::domain::errors::DomainError;
use crate::ports::{PresentationPort, TransferPort};

/// Wires the production adapters into a workflow controller
pub struct DefaultAppContainer {
    transfer: Arc<HttpTransferAdapter>,
    presenter: Arc<TerminalPresenter>,
}

impl DefaultAppContainer {
    pub fn new(config: &ClientConfig) -> Result<Self, DomainError> {
        let transfer = Arc::new(HttpTransferAdapter::new(config)?);
        let presenter = Arc::new(TerminalPresenter::stdout(Duration::from_secs(
            config.notice_duration_secs,
        )));

        Ok(Self {
            transfer,
            presenter,
        })
    }

    /// Fresh controller sharing this container's adapters
    pub fn workflow_controller(&self) -> WorkflowController {
        WorkflowController::new(
            Arc::clone(&self.transfer) as Arc<dyn TransferPort>,
            Arc::clone(&self.presenter) as Arc<dyn PresentationPort>,
        )
    }

    pub fn transfer(&self) -> Arc<HttpTransferAdapter> {
        Arc::clone(&self.transfer)
    }

    pub fn presenter(&self) -> Arc<TerminalPresenter> {
        Arc::clone(&self.presenter)
    }
}
