//! Tool-call JSON editor.

use crate::state::App;
use ratatui::{layout::Rect, Frame};

/// The editor carries its own block, restyled by `App` on phase changes.
pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    f.render_widget(&app.editor, area);
}
