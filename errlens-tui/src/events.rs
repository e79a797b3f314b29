//! Event types for the TUI event loop.

use crossterm::event::KeyEvent;
use errlens_core::{ClassificationResponse, ClassifyResult, ExampleEntry, HealthStatus, Ticket};

#[derive(Debug, Clone)]
pub enum TuiEvent {
    Input(KeyEvent),
    Resize { width: u16, height: u16 },
    Classified {
        ticket: Ticket,
        outcome: ClassifyResult<ClassificationResponse>,
    },
    Health(ClassifyResult<HealthStatus>),
    RemoteExamples(ClassifyResult<Vec<ExampleEntry>>),
}
