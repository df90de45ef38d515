use super::app_state::{Notice, Row};
use crate::errors::ExportError;
use crate::exporter;
use crate::file_scanner::{self, ExclusionRules};
use crate::selection::SelectionTree;
use crate::tree_builder::build_tree_labels;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::path::PathBuf;
use tracing::{info, warn};

pub struct TuiApp {
    pub(super) tree: SelectionTree,
    pub(super) rows: Vec<Row>,
    pub(super) current_row: usize,
    pub(super) scroll_offset: usize,
    pub(super) list_viewport_height: usize,
    pub(super) list_area: Rect,
    pub(super) quit: bool,
    pub(super) confirmed: bool,
    pub(super) notice: Option<Notice>,
    pub(super) scan_root: PathBuf,
    pub(super) export_dir: PathBuf,
    pub(super) rules: ExclusionRules,
    pub(super) dry_run: bool,
}

impl TuiApp {
    pub fn new(
        tree: SelectionTree,
        scan_root: PathBuf,
        export_dir: PathBuf,
        rules: ExclusionRules,
        dry_run: bool,
    ) -> Self {
        let mut app = TuiApp {
            tree,
            rows: Vec::new(),
            current_row: 0,
            scroll_offset: 0,
            list_viewport_height: 0, // Will be updated by ui_renderer
            list_area: Rect::default(),
            quit: false,
            confirmed: false,
            notice: None,
            scan_root,
            export_dir,
            rules,
            dry_run,
        };
        app.rebuild_rows();
        app
    }

    fn rebuild_rows(&mut self) {
        self.rows = build_tree_labels(&self.tree)
            .into_iter()
            .map(|(id, label)| Row { id, label })
            .collect();
        self.current_row = self.current_row.min(self.rows.len().saturating_sub(1));
        self.ensure_selection_is_visible_in_viewport();
    }

    pub(super) fn checked_count(&self) -> usize {
        self.tree.checked_files().len()
    }

    pub(super) fn move_selection(&mut self, delta: i32) {
        if self.rows.is_empty() {
            return;
        }
        let len = self.rows.len() as i32;
        self.current_row = (self.current_row as i32 + delta).rem_euclid(len) as usize;
        self.ensure_selection_is_visible_in_viewport();
    }

    pub(super) fn jump_by(&mut self, delta: i32) {
        if self.rows.is_empty() {
            return;
        }
        let last = self.rows.len() as i32 - 1;
        self.current_row = (self.current_row as i32 + delta).clamp(0, last) as usize;
        self.ensure_selection_is_visible_in_viewport();
    }

    pub(super) fn jump_to(&mut self, row: usize) {
        if self.rows.is_empty() {
            return;
        }
        self.current_row = row.min(self.rows.len() - 1);
        self.ensure_selection_is_visible_in_viewport();
    }

    pub(super) fn toggle_current_item_selection(&mut self) {
        let Some(row) = self.rows.get(self.current_row) else {
            return;
        };
        self.tree.toggle(row.id);
    }

    pub(super) fn set_all(&mut self, checked: bool) {
        if !self.tree.is_empty() {
            self.tree.set_subtree(0, checked);
        }
    }

    pub(super) fn export_selection(&mut self) {
        if self.dry_run {
            if self.tree.checked_files().is_empty() {
                self.notice = Some(Notice::warning(ExportError::NoSelection.to_string()));
                return;
            }
            self.confirmed = true;
            self.quit = true;
            return;
        }

        self.notice = Some(
            match exporter::export_selection(&self.tree, &self.export_dir, Local::now()) {
                Ok(report) => {
                    let target = report
                        .output_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default();
                    if report.skipped.is_empty() {
                        Notice::info(format!("Exported {} files to {}", report.written, target))
                    } else {
                        Notice::warning(format!(
                            "Exported {} files to {} ({} unreadable skipped)",
                            report.written,
                            target,
                            report.skipped.len()
                        ))
                    }
                }
                Err(ExportError::NoSelection) => {
                    Notice::warning(ExportError::NoSelection.to_string())
                }
                Err(e) => {
                    warn!("Export failed: {}", e);
                    Notice::error(e.to_string())
                }
            },
        );
    }

    /// Discards the current tree and scans the project folder again. On
    /// failure the tree is left empty.
    pub(super) fn rescan(&mut self) {
        self.notice = Some(match file_scanner::scan_tree(&self.scan_root, &self.rules) {
            Ok(tree) => {
                self.tree = tree;
                info!("Rescanned {}", self.scan_root.display());
                Notice::info(format!("Rescanned {}", self.scan_root.display()))
            }
            Err(e) => {
                self.tree = SelectionTree::default();
                warn!("Rescan failed: {}", e);
                Notice::error(e.to_string())
            }
        });
        self.current_row = 0;
        self.scroll_offset = 0;
        self.rebuild_rows();
    }

    pub(super) fn ensure_selection_is_visible_in_viewport(&mut self) {
        if self.rows.is_empty() {
            self.scroll_offset = 0;
            return;
        }
        if self.list_viewport_height == 0 {
            return;
        }

        let list_height = self.list_viewport_height;
        if self.current_row < self.scroll_offset {
            self.scroll_offset = self.current_row;
        } else if self.current_row >= self.scroll_offset + list_height {
            self.scroll_offset = self.current_row + 1 - list_height;
        }

        let num_rows = self.rows.len();
        if num_rows <= list_height {
            self.scroll_offset = 0;
        } else {
            self.scroll_offset = self.scroll_offset.min(num_rows - list_height);
        }
    }

    /// Maps a terminal cell to a row index, if it falls inside the list body.
    pub(super) fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.list_area;
        let inner_top = area.y + 1;
        let inner_bottom = area.y + area.height.saturating_sub(1);
        let inner_left = area.x + 1;
        let inner_right = area.x + area.width.saturating_sub(1);
        if row < inner_top || row >= inner_bottom || column < inner_left || column >= inner_right {
            return None;
        }
        let idx = self.scroll_offset + (row - inner_top) as usize;
        (idx < self.rows.len()).then_some(idx)
    }

    // --- Event handling sub-methods ---
    pub(super) fn handle_key_input(&mut self, key_event: KeyEvent) {
        let page = self.list_viewport_height.max(1) as i32;
        match key_event.code {
            KeyCode::Char('c') if key_event.modifiers == KeyModifiers::CONTROL => self.quit = true,
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::PageDown => self.jump_by(page),
            KeyCode::PageUp => self.jump_by(-page),
            KeyCode::Home | KeyCode::Char('g') => self.jump_to(0),
            KeyCode::End | KeyCode::Char('G') => self.jump_to(usize::MAX),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_current_item_selection(),
            KeyCode::Char('a') => self.set_all(true),
            KeyCode::Char('d') => self.set_all(false),
            KeyCode::Char('e') | KeyCode::Char('y') => self.export_selection(),
            KeyCode::Char('r') => self.rescan(),
            _ => {}
        }
    }

    pub(super) fn handle_mouse_input(&mut self, mouse_event: MouseEvent) {
        match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(idx) = self.row_at(mouse_event.column, mouse_event.row) {
                    self.current_row = idx;
                    self.toggle_current_item_selection();
                }
            }
            MouseEventKind::ScrollDown => self.move_selection(1),
            MouseEventKind::ScrollUp => self.move_selection(-1),
            _ => {}
        }
    }
}
