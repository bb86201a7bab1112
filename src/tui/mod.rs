//! Interactive terminal front end
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;
mod timestamps;

use std::sync::Arc;

use anyhow::Result;
pub use app::App;

use self::terminal::TerminalManager;
use crate::client::Classifier;
use crate::controller::AnalysisController;

/// Run the interactive TUI until the user quits
pub fn run_interactive(
    controller: AnalysisController,
    classifier: Arc<dyn Classifier>,
) -> Result<()> {
    let mut manager = TerminalManager::new()?;

    let mut app = App::new(controller, classifier);
    let res = app.run(manager.terminal_mut());

    manager.restore()?;
    res
}
