mod app_logic;
mod app_state;
mod event_handler;
mod ui_renderer;

pub use self::run_tui::run_tui;

// Main TUI loop and terminal setup/teardown
mod run_tui {
    use super::app_logic::TuiApp;
    use super::event_handler::handle_events;
    use super::ui_renderer::ui_frame;
    use crate::file_scanner::ExclusionRules;
    use crate::selection::SelectionTree;
    use anyhow::Result;
    use crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    };
    use ratatui::prelude::{CrosstermBackend, Terminal};
    use std::io::{self, Stdout};
    use std::path::Path;

    /// Runs the interactive tree until the user quits. Exports triggered from
    /// the UI are written in place; in dry-run mode confirming an export quits
    /// and hands the tree back so the caller can print it.
    pub fn run_tui(
        tree: SelectionTree,
        scan_root: &Path,
        export_dir: &Path,
        rules: ExclusionRules,
        dry_run: bool,
    ) -> Result<Option<SelectionTree>> {
        let mut app = TuiApp::new(
            tree,
            scan_root.to_path_buf(),
            export_dir.to_path_buf(),
            rules,
            dry_run,
        );

        let mut terminal = init_terminal()?;
        let loop_result = run_loop(&mut terminal, &mut app);
        restore_terminal(terminal)?;
        loop_result?;

        if app.confirmed {
            Ok(Some(app.tree))
        } else {
            Ok(None)
        }
    }

    fn run_loop(
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        app: &mut TuiApp,
    ) -> Result<()> {
        while !app.quit {
            terminal.draw(|frame| ui_frame(frame, app))?;
            handle_events(app)?;
        }
        Ok(())
    }

    fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor().map_err(Into::into)
    }
}
