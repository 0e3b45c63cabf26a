use crate::{ListenerState, SessionError};
use core_actions::{Finish, dispatch, translate_input};
use core_events::Event;
use core_hooks::{CommandRegistry, accept_reply};
use core_render::{RenderEngine, StyleSheet};
use core_template::{PromptResult, Template};
use core_terminal::PromptIo;
use tracing::{debug, info, trace, warn};

pub struct Session {
    template: Template,
    registry: CommandRegistry,
    engine: RenderEngine,
    io: PromptIo,
    listener: ListenerState,
}

impl Session {
    pub fn new(
        template: Template,
        registry: CommandRegistry,
        style: StyleSheet,
        io: PromptIo,
    ) -> Self {
        Self {
            template,
            registry,
            engine: RenderEngine::new(style),
            io,
            listener: ListenerState::default(),
        }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Run the prompt to completion. Raw mode is held for the duration and
    /// released on every exit path, errors included.
    pub async fn run(mut self) -> Result<PromptResult, SessionError> {
        info!(
            target: "session",
            placeholders = self.template.placeholder_count(),
            triggers = self.registry.len(),
            "session_start"
        );
        self.io.terminal().enter()?;
        let outcome = self.event_loop().await;
        let left = self.io.terminal().leave();
        self.io.close_input();

        let frames = self.engine.metrics_snapshot().frames;
        match &outcome {
            Ok(result) => info!(target: "session", frames, results = result.results.len(), "session_confirmed"),
            Err(e) => info!(target: "session", frames, kind = e.kind_label(), "session_ended"),
        }
        let result = outcome?;
        left?;
        Ok(result)
    }

    async fn event_loop(&mut self) -> Result<PromptResult, SessionError> {
        self.render()?;
        if !self.template.has_placeholders() {
            debug!(target: "session", "no_placeholders_finalize");
            return self.confirm();
        }

        loop {
            let input = match self.io.next_event().await {
                Some(Event::Input(input)) => input,
                Some(Event::Shutdown) | None => {
                    warn!(target: "session", "input_closed");
                    self.engine.erase(self.io.out())?;
                    return Err(SessionError::InputClosed);
                }
            };
            let action = translate_input(&input);
            trace!(target: "session", kind = input.kind_label(), action = action.label(), "input");
            let result = dispatch(&mut self.template, &action);
            match result.finish {
                Some(Finish::Confirmed) => return self.confirm(),
                Some(Finish::Interrupted) => {
                    self.engine.erase(self.io.out())?;
                    return Err(SessionError::Interrupted);
                }
                None => {}
            }
            if result.render {
                self.render()?;
            }
            if result.hook_check {
                self.run_hook().await?;
            }
        }
    }

    fn render(&mut self) -> Result<(), SessionError> {
        self.engine.render(&self.template, self.io.out())?;
        Ok(())
    }

    fn confirm(&mut self) -> Result<PromptResult, SessionError> {
        self.engine.erase(self.io.out())?;
        self.io.close_input();
        Ok(self.template.finish())
    }

    /// Invoke the handler whose trigger equals the selected value, if any.
    async fn run_hook(&mut self) -> Result<(), SessionError> {
        let Some(trigger) = self.template.selected().map(|p| p.value().to_string()) else {
            return Ok(());
        };
        let Some(handler) = self.registry.get(&trigger) else {
            return Ok(());
        };
        let row = self.io.anchor_row()?;
        debug!(target: "session.hook", handler = handler.name(), row, "hook_start");

        self.listener.suspend();
        let reply = handler.invoke(&mut self.io).await;
        let accepted = accept_reply(reply);

        let value = match accepted {
            Ok(value) => value,
            Err(reason) => {
                warn!(target: "session.hook", handler = handler.name(), %reason, "contract_violation");
                self.engine.reset_at_row(row, self.io.out())?;
                self.listener.resume();
                return Err(SessionError::ContractViolation { trigger, reason });
            }
        };
        debug!(target: "session.hook", handler = handler.name(), reply_len = value.len(), "hook_reply");
        if let Some(p) = self.template.selected_mut() {
            p.set_value(value);
        }
        self.engine.reset_at_row(row, self.io.out())?;
        self.render()?;
        self.listener.resume();
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("placeholders", &self.template.placeholder_count())
            .field("registry", &self.registry)
            .field("listener", &self.listener)
            .finish_non_exhaustive()
    }
}
