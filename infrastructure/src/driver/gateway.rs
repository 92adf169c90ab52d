//! Agent-driver completion gateway
//!
//! Implements `CompletionGateway` by running one driver exchange per
//! turn. The driver holds the conversation context itself, so only the
//! new prompt and the resume identifier travel to it; the stored history
//! is the relay's own record, not the upstream payload.

use crate::config::DriverConfig;
use crate::driver::error::DriverError;
use crate::driver::protocol::DriverEvent;
use crate::driver::transport::{DriverInvocation, DriverProcess};
use async_trait::async_trait;
use relay_application::{Completion, CompletionGateway, CompletionRequest, GatewayError};
use relay_domain::SessionOrigin;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub struct AgentDriverGateway {
    config: DriverConfig,
    cancel: CancellationToken,
}

impl AgentDriverGateway {
    pub fn new(config: DriverConfig) -> Self {
        info!(command = %config.command, max_turns = config.max_turns, "Agent driver gateway initialized");
        Self {
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Token that aborts all in-flight exchanges when cancelled.
    pub fn abort_handle(&self) -> CancellationToken {
        self.cancel.clone()
    }

    fn abort_grace(&self) -> Duration {
        Duration::from_secs(self.config.abort_grace_secs)
    }

    async fn run_exchange(&self, invocation: DriverInvocation) -> Result<Completion, DriverError> {
        let mut process = DriverProcess::spawn(
            &invocation,
            self.cancel.child_token(),
            self.abort_grace(),
        )?;

        let mut session_id: Option<String> = None;
        let mut text = String::new();
        let mut outcome: Option<Result<(), DriverError>> = None;

        while let Some(event) = process.next_event().await? {
            match event {
                DriverEvent::System(system) => {
                    if system.is_init() {
                        debug!(session_id = ?system.session_id, "Driver session started");
                        session_id = system.session_id;
                    }
                }
                DriverEvent::Assistant(assistant) => {
                    text.push_str(&assistant.text());
                }
                DriverEvent::Result(result) => {
                    if session_id.is_none() {
                        session_id = result.session_id.clone();
                    }
                    outcome = Some(if result.is_success() {
                        Ok(())
                    } else {
                        Err(DriverError::DriverFailed(result.failure_message()))
                    });
                    // The result event is terminal; stop consuming.
                    break;
                }
                DriverEvent::Error(error) => {
                    outcome = Some(Err(DriverError::DriverFailed(
                        error.message.unwrap_or_else(|| "driver error".to_string()),
                    )));
                    break;
                }
                DriverEvent::Other => {}
            }
        }

        match outcome {
            Some(Ok(())) => {
                process.finish().await?;
                Ok(Completion {
                    text,
                    provider_session_id: session_id,
                })
            }
            Some(Err(e)) => {
                // Reap the child but surface the driver's failure.
                if let Err(wait_err) = process.finish().await {
                    warn!("Driver exit after failure: {}", wait_err);
                }
                Err(e)
            }
            // Stream ended without a result event.
            None => Err(process
                .finish()
                .await
                .err()
                .unwrap_or(DriverError::DriverFailed(
                    "driver stream ended without a result".to_string(),
                ))),
        }
    }
}

#[async_trait]
impl CompletionGateway for AgentDriverGateway {
    fn origin(&self) -> SessionOrigin {
        SessionOrigin::Provider
    }

    async fn complete(&self, request: CompletionRequest) -> Result<Completion, GatewayError> {
        // The driver replays its own context on resume; only the newest
        // user message is sent as the prompt.
        let prompt = request
            .messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();

        let invocation = DriverInvocation {
            command: self.config.command.clone(),
            prompt,
            system_prompt: request.system_prompt,
            max_turns: self.config.max_turns,
            resume: request.resume,
        };

        self.run_exchange(invocation).await.map_err(|e| match e {
            DriverError::Aborted => GatewayError::Timeout,
            DriverError::SpawnError(_) => GatewayError::ConnectionError(e.to_string()),
            other => GatewayError::RequestFailed(other.to_string()),
        })
    }
}
