//! Application state for the TUI.
//!
//! `App` wraps the session's [`WorkflowController`] with the terminal-only
//! pieces: the text editor widget, the example list, service health and
//! notifications. Key handling returns an [`AppCommand`] when the event loop
//! has to start background work.

use crate::config::TuiConfig;
use crate::keys::{map_key, Action};
use crate::notifications::{Notification, NotificationLevel};
use crate::theme::{editor_border_color, SynthBruteTheme};
use crossterm::event::{KeyEvent, KeyEventKind};
use errlens_core::{
    built_in_examples, ClassificationResponse, ClassifyResult, ClassifyStart, Completion,
    ExampleEntry, HealthStatus, PendingClassification, Ticket, WorkflowController, WorkflowPhase,
};
use ratatui::{
    style::Style,
    widgets::{Block, Borders},
};
use tui_textarea::TextArea;

/// Background work requested by a key press.
#[derive(Debug, Clone)]
pub enum AppCommand {
    Quit,
    Classify(PendingClassification),
    CheckHealth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamplesSource {
    BuiltIn,
    Remote,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HealthView {
    Unknown,
    Checking,
    Reachable(HealthStatus),
    Unreachable(String),
}

impl HealthView {
    pub fn summary(&self) -> String {
        match self {
            HealthView::Unknown => "Service: unknown".to_string(),
            HealthView::Checking => "Service: checking...".to_string(),
            HealthView::Reachable(health) if health.model_loaded => {
                format!("Service: {} ({})", health.status, health.device)
            }
            HealthView::Reachable(health) => format!("Service: {} (model not loaded)", health.status),
            HealthView::Unreachable(reason) => format!("Service: unreachable ({})", reason),
        }
    }
}

pub struct App {
    pub config: TuiConfig,
    pub theme: SynthBruteTheme,
    pub controller: WorkflowController,
    pub editor: TextArea<'static>,
    pub examples: Vec<ExampleEntry>,
    pub examples_source: ExamplesSource,
    pub health: HealthView,
    pub notifications: Vec<Notification>,
}

impl App {
    pub fn new(config: TuiConfig) -> Self {
        let examples = built_in_examples().to_vec();
        let controller = WorkflowController::new(&examples);
        let editor = editor_from(controller.input_text());
        let mut app = Self {
            config,
            theme: SynthBruteTheme::synthbrute(),
            controller,
            editor,
            examples,
            examples_source: ExamplesSource::BuiltIn,
            health: HealthView::Unknown,
            notifications: Vec::new(),
        };
        app.restyle_editor();
        app
    }

    pub fn phase(&self) -> WorkflowPhase {
        self.controller.phase()
    }

    pub fn last_result(&self) -> Option<&ClassificationResponse> {
        self.controller.last_result()
    }

    pub fn handle_action(&mut self, action: Action) -> Option<AppCommand> {
        match action {
            Action::Quit => Some(AppCommand::Quit),
            Action::Classify => self.start_classification(),
            Action::LoadExample(index) => {
                self.load_example(index);
                None
            }
            Action::CheckHealth => {
                self.health = HealthView::Checking;
                Some(AppCommand::CheckHealth)
            }
        }
    }

    /// Route a key press to its action, or to the editor when unbound.
    ///
    /// Release events are dropped; some platforms report them alongside
    /// presses.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<AppCommand> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        match map_key(key) {
            Some(action) => self.handle_action(action),
            None => {
                self.handle_edit(key);
                None
            }
        }
    }

    /// Forward an unbound key to the editor.
    pub fn handle_edit(&mut self, key: KeyEvent) {
        if self.editor.input(key) {
            self.controller.edit_input(self.editor.lines().join("\n"));
        }
    }

    pub fn load_example(&mut self, index: usize) {
        let Some(entry) = self.examples.get(index).cloned() else {
            self.notify(
                NotificationLevel::Warning,
                format!("No example in slot {}", index + 1),
            );
            return;
        };
        self.controller.load_example(&entry);
        self.editor = editor_from(self.controller.input_text());
        self.restyle_editor();
        tracing::info!(example = %entry.name, "Example loaded into editor");
    }

    pub fn start_classification(&mut self) -> Option<AppCommand> {
        let start = self.controller.begin_classify();
        self.restyle_editor();
        match start {
            ClassifyStart::Dispatched(pending) => {
                tracing::info!(ticket = pending.ticket.generation(), "Classification started");
                Some(AppCommand::Classify(pending))
            }
            ClassifyStart::Rejected => {
                tracing::info!("Input rejected before dispatch");
                None
            }
            ClassifyStart::Ignored => None,
        }
    }

    pub fn apply_classification(
        &mut self,
        ticket: Ticket,
        outcome: ClassifyResult<ClassificationResponse>,
    ) {
        let completion = self.controller.complete_classify(ticket, outcome);
        self.restyle_editor();
        match completion {
            Completion::Applied(WorkflowPhase::Success) => {
                if let Some(result) = self.controller.last_result() {
                    tracing::info!(
                        label = %result.label,
                        confidence = result.confidence,
                        processing_time_ms = result.processing_time_ms,
                        "Classification result received"
                    );
                }
            }
            Completion::Applied(_) => {}
            Completion::Discarded => {
                tracing::debug!(ticket = ticket.generation(), "Stale classification ignored");
            }
        }
    }

    pub fn apply_health(&mut self, result: ClassifyResult<HealthStatus>) {
        self.health = match result {
            Ok(health) => {
                if health.is_ready() {
                    self.notify(
                        NotificationLevel::Success,
                        format!("Classifier ready on {}", health.device),
                    );
                } else if !health.model_loaded {
                    self.notify(NotificationLevel::Warning, "Service is up but the model is not loaded");
                }
                HealthView::Reachable(health)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Health check failed");
                self.notify(NotificationLevel::Error, format!("Health check failed: {}", err));
                HealthView::Unreachable(err.to_string())
            }
        };
    }

    /// Swap in the service's examples. The built-in list stays on failure.
    pub fn apply_remote_examples(&mut self, result: ClassifyResult<Vec<ExampleEntry>>) {
        match result {
            Ok(examples) if !examples.is_empty() => {
                let count = examples.len();
                self.examples = examples;
                self.examples_source = ExamplesSource::Remote;
                self.notify(
                    NotificationLevel::Info,
                    format!("Loaded {} examples from the service", count),
                );
            }
            Ok(_) => {
                self.notify(
                    NotificationLevel::Warning,
                    "Service published no examples; keeping built-in list",
                );
            }
            Err(err) => {
                self.notify(
                    NotificationLevel::Warning,
                    format!("Could not fetch examples: {}", err),
                );
            }
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
    }

    fn restyle_editor(&mut self) {
        let border = editor_border_color(self.controller.phase(), &self.theme);
        self.editor.set_block(
            Block::default()
                .title("Tool call (JSON)")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
        self.editor.set_style(Style::default().fg(self.theme.text));
    }
}

fn editor_from(text: &str) -> TextArea<'static> {
    TextArea::new(text.lines().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use errlens_core::{ClassificationRequest, ClassifyError, Probabilities};

    fn app() -> App {
        App::new(TuiConfig::default())
    }

    fn response() -> ClassificationResponse {
        ClassificationResponse {
            label: "Wrong_Tool".to_string(),
            confidence: 0.6,
            all_probabilities: Probabilities::new(),
            processing_time_ms: 9.0,
            category_color: "#F97316".to_string(),
        }
    }

    fn classify(app: &mut App) -> PendingClassification {
        match app.handle_action(Action::Classify) {
            Some(AppCommand::Classify(pending)) => pending,
            other => panic!("expected classify command, got {other:?}"),
        }
    }

    #[test]
    fn editor_starts_with_first_example() {
        let app = app();
        assert_eq!(app.editor.lines().join("\n"), app.controller.input_text());
        assert_eq!(app.examples_source, ExamplesSource::BuiltIn);
    }

    #[test]
    fn typing_updates_controller_input() {
        let mut app = app();
        app.load_example(0);
        app.handle_edit(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert_eq!(app.editor.lines().join("\n"), app.controller.input_text());
        assert!(app.controller.input_text().starts_with('x'));
    }

    #[test]
    fn release_events_never_reach_the_editor() {
        let mut app = app();
        let before = app.controller.input_text().to_string();

        let mut release = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(app.handle_key(release).is_none());
        assert_eq!(app.controller.input_text(), before);

        app.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert_eq!(app.controller.input_text(), format!("x{before}"));
    }

    #[test]
    fn release_of_a_bound_key_is_ignored() {
        let mut app = app();
        let mut release = KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(app.handle_key(release).is_none());
        assert_eq!(app.phase(), WorkflowPhase::Idle);
    }

    #[test]
    fn editor_keeps_its_block_across_reloads() {
        let mut app = app();
        assert!(app.editor.block().is_some());
        app.load_example(1);
        assert!(app.editor.block().is_some());
        classify(&mut app);
        assert!(app.editor.block().is_some());
    }

    #[test]
    fn classify_dispatches_parsed_request() {
        let mut app = app();
        let pending = classify(&mut app);
        assert_eq!(pending.request, app.examples[0].data);
        assert_eq!(app.phase(), WorkflowPhase::Loading);

        assert!(app.handle_action(Action::Classify).is_none());
    }

    #[test]
    fn outcome_is_applied_to_controller() {
        let mut app = app();
        let pending = classify(&mut app);
        app.apply_classification(pending.ticket, Ok(response()));
        assert_eq!(app.phase(), WorkflowPhase::Success);
        assert_eq!(app.last_result(), Some(&response()));
    }

    #[test]
    fn load_example_while_loading_discards_late_outcome() {
        let mut app = app();
        let pending = classify(&mut app);
        app.load_example(2);
        app.apply_classification(pending.ticket, Ok(response()));

        assert_eq!(app.phase(), WorkflowPhase::Idle);
        assert!(app.last_result().is_none());
        let parsed = ClassificationRequest::from_input(&app.editor.lines().join("\n")).unwrap();
        assert_eq!(parsed, app.examples[2].data);
    }

    #[test]
    fn out_of_range_example_notifies() {
        let mut app = app();
        app.load_example(7);
        assert_eq!(app.notifications.len(), 1);
        assert_eq!(app.notifications[0].level, NotificationLevel::Warning);
    }

    #[test]
    fn health_check_marks_checking_then_applies() {
        let mut app = app();
        assert!(matches!(
            app.handle_action(Action::CheckHealth),
            Some(AppCommand::CheckHealth)
        ));
        assert_eq!(app.health, HealthView::Checking);

        app.apply_health(Err(ClassifyError::transport("could not connect")));
        assert!(app.health.summary().contains("unreachable"));
        assert_eq!(
            app.notifications.last().map(|n| n.level),
            Some(NotificationLevel::Error)
        );
    }

    #[test]
    fn ready_service_is_announced() {
        let mut app = app();
        app.apply_health(Ok(HealthStatus {
            status: "healthy".to_string(),
            model_loaded: true,
            device: "cpu".to_string(),
        }));
        let last = app.notifications.last().cloned();
        assert_eq!(last.as_ref().map(|n| n.level), Some(NotificationLevel::Success));
        assert!(last.is_some_and(|n| n.message.contains("cpu")));
    }

    #[test]
    fn remote_examples_replace_builtin_only_when_present() {
        let mut app = app();
        app.apply_remote_examples(Ok(Vec::new()));
        assert_eq!(app.examples_source, ExamplesSource::BuiltIn);

        let remote = vec![app.examples[1].clone()];
        app.apply_remote_examples(Ok(remote.clone()));
        assert_eq!(app.examples, remote);
        assert_eq!(app.examples_source, ExamplesSource::Remote);
    }
}
