use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use stunner_gateway_config::service::Store;
use stunner_gateway_kernel::{finalize, matcher, render_class, FinalizeOutcome, RenderError, RenderOutcome};
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::{
    config::OperatorConfig,
    event::{Event, OperatorError},
};

/// Number of passes currently running, readable from anywhere.
#[derive(Debug, Clone, Default)]
pub struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }

    fn enter(&self) -> InFlightGuard<'_> {
        self.0.fetch_add(1, Ordering::AcqRel);
        InFlightGuard(self)
    }
}

struct InFlightGuard<'a>(&'a InFlight);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0 .0.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Producer side of the operator, cheap to clone.
#[derive(Debug, Clone)]
pub struct OperatorHandle {
    tx: mpsc::Sender<Event>,
    in_flight: InFlight,
}

impl OperatorHandle {
    /// Queue an event, waiting while the queue is full.
    ///
    /// # Errors
    /// [`OperatorError::Closed`] once the operator has stopped.
    pub async fn send(&self, event: Event) -> Result<(), OperatorError> {
        self.tx.send(event).await.map_err(|_| OperatorError::Closed)
    }

    /// Render a gateway class and wait for the outcome. `None` renders the class this
    /// controller owns.
    pub async fn render(&self, class: Option<&str>) -> Result<RenderOutcome, OperatorError> {
        let (event, rx) = Event::render(class.map(str::to_string));
        self.send(event).await?;
        Ok(rx.await??)
    }

    pub async fn finalize(&self) -> Result<FinalizeOutcome, OperatorError> {
        let (event, rx) = Event::finalize();
        self.send(event).await?;
        Ok(rx.await??)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.count()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// The single consumer of the event queue.
///
/// Events are processed one at a time, in arrival order; a pass always runs to completion
/// before the next event is taken or a shutdown is honored. The in-flight count drops
/// before the requester is answered.
#[derive(Debug)]
pub struct Operator<S> {
    store: S,
    config: OperatorConfig,
    rx: mpsc::Receiver<Event>,
    in_flight: InFlight,
}

impl<S> Operator<S>
where
    S: Store + 'static,
{
    pub fn new(store: S, config: OperatorConfig) -> (Self, OperatorHandle) {
        let (tx, rx) = mpsc::channel(config.channel_capacity.max(1));
        let in_flight = InFlight::default();
        let handle = OperatorHandle {
            tx,
            in_flight: in_flight.clone(),
        };
        (
            Self {
                store,
                config,
                rx,
                in_flight,
            },
            handle,
        )
    }

    pub fn spawn(self, shutdown_signal: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown_signal))
    }

    /// Drain the queue until `shutdown_signal` fires or every handle is dropped.
    pub async fn run(mut self, shutdown_signal: CancellationToken) {
        tracing::info!("[SG.Operator] operator for controller {} started", self.config.controller_name);
        loop {
            let event = tokio::select! {
                biased;
                _ = shutdown_signal.cancelled() => {
                    tracing::info!("[SG.Operator] shutdown signal received");
                    break;
                }
                event = self.rx.recv() => {
                    match event {
                        Some(event) => event,
                        None => {
                            tracing::info!("[SG.Operator] every handle dropped");
                            break;
                        }
                    }
                }
            };
            self.handle(event);
        }
        self.rx.close();
        let mut dropped = 0;
        while self.rx.try_recv().is_ok() {
            dropped += 1;
        }
        if dropped > 0 {
            tracing::warn!("[SG.Operator] {dropped} queued event(s) dropped on shutdown");
        }
        tracing::info!("[SG.Operator] operator for controller {} stopped", self.config.controller_name);
    }

    fn handle(&self, event: Event) {
        tracing::debug!("[SG.Operator] processing {} event", event.kind());
        match event {
            Event::Render { class, reply } => {
                let result = {
                    let _guard = self.in_flight.enter();
                    self.handle_render(class)
                };
                if reply.send(result).is_err() {
                    tracing::debug!("[SG.Operator] render requester went away, outcome discarded");
                }
            }
            Event::Finalize { reply } => {
                let result = {
                    let _guard = self.in_flight.enter();
                    self.handle_finalize()
                };
                if reply.send(result).is_err() {
                    tracing::debug!("[SG.Operator] finalize requester went away, outcome discarded");
                }
            }
        }
    }

    #[instrument(skip(self), fields(controller = %self.config.controller_name))]
    fn handle_render(&self, class: Option<String>) -> Result<RenderOutcome, RenderError> {
        let controller_name = self.config.controller_name.as_str();
        let class = match class.as_deref() {
            Some(name) => matcher::class_by_name(&self.store, name, controller_name),
            None => matcher::select_class(&self.store, controller_name),
        };
        let result = class.and_then(|class| render_class(&self.store, controller_name, &class));
        if let Err(e) = &result {
            tracing::error!("[SG.Operator] render failed: {e}");
        }
        result
    }

    #[instrument(skip(self), fields(controller = %self.config.controller_name))]
    fn handle_finalize(&self) -> Result<FinalizeOutcome, RenderError> {
        let result = finalize(&self.store, &self.config.controller_name);
        if let Err(e) = &result {
            tracing::error!("[SG.Operator] finalize failed: {e}");
        }
        result
    }
}
