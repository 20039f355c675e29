//! Runtime bridge: controllers queue commands, a backend worker executes them
//! against the gateway, and completions come back one per command.

use client_core::{ApiGateway, GatewayFailure};
use tokio::sync::mpsc::{self, Receiver, Sender, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use crate::{
    calculator::{FormSubmissionController, SubmitDecision},
    commands::{BackendCommand, RequestId},
    events::{UiEvent, ViewEffect},
    form::BirthField,
    list_view::ListViewController,
    orchestration::dispatch_backend_command,
};

pub const COMMAND_QUEUE_DEPTH: usize = 32;

/// Runs one command to completion. Failures come back as failure outcomes.
pub async fn execute_command(gateway: &ApiGateway, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::FetchCharts { request } => UiEvent::ChartsLoaded {
            request,
            outcome: gateway.fetch_charts().await,
        },
        BackendCommand::CalculateChart { request, input } => UiEvent::ChartCalculated {
            request,
            outcome: gateway.calculate_chart(&input).await,
        },
    }
}

/// Spawns the backend worker. Must be called from inside a tokio runtime.
pub fn launch(
    gateway: ApiGateway,
    queue_depth: usize,
) -> (Sender<BackendCommand>, UnboundedReceiver<UiEvent>) {
    let (cmd_tx, cmd_rx) = mpsc::channel(queue_depth);
    let (ui_tx, ui_rx) = mpsc::unbounded_channel();
    tokio::spawn(run_backend(gateway, cmd_rx, ui_tx));
    (cmd_tx, ui_rx)
}

async fn run_backend(
    gateway: ApiGateway,
    mut cmd_rx: Receiver<BackendCommand>,
    ui_tx: UnboundedSender<UiEvent>,
) {
    debug!("chart backend worker started");
    while let Some(cmd) = cmd_rx.recv().await {
        let gateway = gateway.clone();
        let ui_tx = ui_tx.clone();
        tokio::spawn(async move {
            let event = execute_command(&gateway, cmd).await;
            let request = event.request();
            if ui_tx.send(event).is_err() {
                warn!(%request, "completion dropped: ui event receiver is gone");
            }
        });
    }
    debug!("chart backend worker stopped");
}

/// Completion applied by [`ChartApp::process_next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub request: RequestId,
    pub effect: Option<ViewEffect>,
}

/// Owns both controllers and applies completions on the caller's task.
pub struct ChartApp {
    list: ListViewController,
    calculator: FormSubmissionController,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: UnboundedReceiver<UiEvent>,
    pending: usize,
}

impl ChartApp {
    pub fn new(gateway: ApiGateway) -> Self {
        let (cmd_tx, ui_rx) = launch(gateway, COMMAND_QUEUE_DEPTH);
        Self::with_channels(cmd_tx, ui_rx)
    }

    pub fn with_channels(cmd_tx: Sender<BackendCommand>, ui_rx: UnboundedReceiver<UiEvent>) -> Self {
        Self {
            list: ListViewController::new(),
            calculator: FormSubmissionController::new(),
            cmd_tx,
            ui_rx,
            pending: 0,
        }
    }

    pub fn list(&self) -> &ListViewController {
        &self.list
    }

    pub fn calculator(&self) -> &FormSubmissionController {
        &self.calculator
    }

    /// Number of dispatched commands whose completion has not been applied yet.
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn activate_list(&mut self) -> bool {
        let cmd = self.list.activate();
        self.issue(cmd)
    }

    pub fn retry_list(&mut self) -> bool {
        let cmd = self.list.retry();
        self.issue(cmd)
    }

    pub fn refresh_list(&mut self) -> bool {
        let cmd = self.list.refresh();
        self.issue(cmd)
    }

    pub fn edit(&mut self, field: BirthField, value: impl Into<String>) -> bool {
        self.calculator.edit(field, value)
    }

    pub fn blur(&mut self, field: BirthField) {
        self.calculator.blur(field);
    }

    pub fn reset_form(&mut self) -> bool {
        self.calculator.reset_form()
    }

    pub fn clear_result(&mut self) {
        self.calculator.clear_result();
    }

    pub fn submit(&mut self) -> SubmitDecision {
        let decision = self.calculator.submit();
        if let SubmitDecision::Issued(cmd) = &decision {
            self.issue(Some(cmd.clone()));
        }
        decision
    }

    fn issue(&mut self, cmd: Option<BackendCommand>) -> bool {
        let Some(cmd) = cmd else {
            return false;
        };
        let request = cmd.request();
        let is_fetch = matches!(cmd, BackendCommand::FetchCharts { .. });

        match dispatch_backend_command(&self.cmd_tx, cmd) {
            Ok(()) => self.pending += 1,
            Err(err) => {
                // The controller is already busy; deliver its one completion here.
                let failure = GatewayFailure::transport(err.to_string());
                if is_fetch {
                    self.list.on_fetch_complete(request, Err(failure));
                } else {
                    let _ = self.calculator.on_submit_complete(request, Err(failure));
                }
            }
        }
        true
    }

    /// Waits for the next completion and applies it to its controller.
    /// Returns `None` once nothing is pending.
    pub async fn process_next(&mut self) -> Option<Applied> {
        if self.pending == 0 {
            return None;
        }
        let event = self.ui_rx.recv().await?;
        self.pending -= 1;
        Some(self.apply(event))
    }

    /// Applies every completion that is already queued, without waiting.
    pub fn drain_ready(&mut self) -> Vec<Applied> {
        let mut applied = Vec::new();
        while self.pending > 0 {
            match self.ui_rx.try_recv() {
                Ok(event) => {
                    self.pending -= 1;
                    applied.push(self.apply(event));
                }
                Err(_) => break,
            }
        }
        applied
    }

    fn apply(&mut self, event: UiEvent) -> Applied {
        match event {
            UiEvent::ChartsLoaded { request, outcome } => {
                self.list.on_fetch_complete(request, outcome);
                Applied {
                    request,
                    effect: None,
                }
            }
            UiEvent::ChartCalculated { request, outcome } => Applied {
                request,
                effect: self.calculator.on_submit_complete(request, outcome),
            },
        }
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
