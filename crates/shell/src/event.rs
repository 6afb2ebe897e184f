use stunner_gateway_kernel::{FinalizeOutcome, RenderError, RenderOutcome};
use thiserror::Error;
use tokio::sync::oneshot;

pub type RenderReply = oneshot::Sender<Result<RenderOutcome, RenderError>>;
pub type FinalizeReply = oneshot::Sender<Result<FinalizeOutcome, RenderError>>;

/// A request to the operator, answered through its own completion channel.
#[derive(Debug)]
pub enum Event {
    /// Render one gateway class. `None` renders the class this controller owns.
    Render { class: Option<String>, reply: RenderReply },
    /// Invalidate every known gateway and the rendered configuration.
    Finalize { reply: FinalizeReply },
}

impl Event {
    pub fn render(class: Option<String>) -> (Self, oneshot::Receiver<Result<RenderOutcome, RenderError>>) {
        let (reply, rx) = oneshot::channel();
        (Event::Render { class, reply }, rx)
    }

    pub fn finalize() -> (Self, oneshot::Receiver<Result<FinalizeOutcome, RenderError>>) {
        let (reply, rx) = oneshot::channel();
        (Event::Finalize { reply }, rx)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Event::Render { .. } => "render",
            Event::Finalize { .. } => "finalize",
        }
    }
}

#[derive(Debug, Error)]
pub enum OperatorError {
    /// The operator stopped and takes no more events.
    #[error("operator is shut down")]
    Closed,
    /// The operator stopped before answering.
    #[error("operator dropped the request")]
    Canceled,
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl From<oneshot::error::RecvError> for OperatorError {
    fn from(_: oneshot::error::RecvError) -> Self {
        OperatorError::Canceled
    }
}
