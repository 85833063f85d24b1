//! Panel constants and a reference model of the in-page controller.
//!
//! The constants here are spliced into `runtime.js`, so the generated script
//! and this module always agree on storage keys, timings and element ids.
//!
//! [`PanelState`] mirrors the runtime's single `state` object and the
//! transitions its event handlers perform. Nothing executes it in the
//! browser; it exists so the panel's behaviour (list filtering, modal
//! exclusivity, preview stacking, drag, notification replacement) is pinned
//! by tests in the same language as the generator.

use super::data::ScriptRecord;
use crate::prompt::PromptType;
use std::collections::BTreeMap;

/// Storage key of the prompt array snapshot.
pub const PROMPTS_STORAGE_KEY: &str = "promptAmplifierEnhancedPrompts_v1";

/// Storage key of the per-hostname panel position map.
pub const POSITIONS_STORAGE_KEY: &str = "promptAmplifierPanelPositions_v1";

/// How long a notification stays visible.
pub const NOTIFICATION_DISMISS_MS: u64 = 5500;

/// z-index of the primary modal; previews stack above it.
pub const MODAL_BASE_Z: u32 = 10001;

pub const DEFAULT_PANEL_TOP: &str = "10px";
pub const DEFAULT_PANEL_LEFT: &str = "50%";

pub const LIST_MODAL_ID: &str = "prompt-list-modal";
pub const PREVIEW_MODAL_PREFIX: &str = "prompt-preview-modal-";

/// Element id of a prompt's preview modal.
///
/// Characters outside `[A-Za-z0-9_]` become `-` plus four hex digits per
/// UTF-16 unit, so distinct prompt ids never share a modal.
pub fn preview_modal_id(prompt_id: &str) -> String {
    let mut id = PREVIEW_MODAL_PREFIX.to_string();
    for c in prompt_id.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            id.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                id.push_str(&format!("-{:04x}", unit));
            }
        }
    }
    id
}

/// Label of the category button that opens a type's list.
pub fn list_button_label(prompt_type: PromptType) -> Option<&'static str> {
    match prompt_type {
        PromptType::SystemPrompt => Some("S-Prompts"),
        PromptType::AppStarterPrompt => Some("A-Prompts"),
        PromptType::QuickAction => None,
    }
}

/// CSS anchor of the floating panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelPosition {
    pub top: String,
    pub left: String,
}

impl PanelPosition {
    /// Top-center, used when no position is saved for the hostname.
    pub fn top_center() -> Self {
        Self {
            top: DEFAULT_PANEL_TOP.to_string(),
            left: DEFAULT_PANEL_LEFT.to_string(),
        }
    }

    fn pixels(top: f64, left: f64) -> Self {
        Self {
            top: format!("{}px", top.round() as i64),
            left: format!("{}px", left.round() as i64),
        }
    }

    /// Whether the default centering transform applies.
    pub fn is_centered(&self) -> bool {
        self.left == DEFAULT_PANEL_LEFT
    }
}

/// A point in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// What the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    MoveHandle,
    Button,
    PanelBackground,
}

#[derive(Debug, Clone, PartialEq)]
struct DragState {
    pointer_start: Point,
    panel_start: Point,
}

/// An open overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// The single primary list modal, filtered to one type.
    List { prompt_type: PromptType },
    /// A stacked preview of one prompt.
    Preview {
        id: String,
        prompt_id: String,
        z_index: u32,
    },
}

impl Modal {
    pub fn id(&self) -> &str {
        match self {
            Modal::List { .. } => LIST_MODAL_ID,
            Modal::Preview { id, .. } => id,
        }
    }

    pub fn z_index(&self) -> u32 {
        match self {
            Modal::List { .. } => MODAL_BASE_Z,
            Modal::Preview { z_index, .. } => *z_index,
        }
    }

    pub fn is_sub_modal(&self) -> bool {
        matches!(self, Modal::Preview { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    dismiss_at_ms: u64,
}

/// Host clipboard stand-in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clipboard {
    pub contents: Option<String>,
    /// Reject every write, as a page without clipboard permission does.
    pub deny_writes: bool,
}

/// Where a copy was triggered from; decides which modal closes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CopySource {
    ListRow,
    Preview(String),
    Template,
    Button,
}

/// Page the script was injected into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    pub hostname: String,
    pub href: String,
}

/// The runtime's state object and its handlers.
#[derive(Debug, Clone)]
#[cfg_attr(not(test), allow(dead_code))]
pub struct PanelState {
    initial_prompts: Vec<ScriptRecord>,
    pub stored_prompts: Vec<ScriptRecord>,
    pub open_modals_stack: Vec<Modal>,
    pub current_open_modal: Option<String>,
    pub positions: BTreeMap<String, PanelPosition>,
    drag_state: Option<DragState>,
    pub panel: PanelPosition,
    pub notification: Option<Notification>,
    pub clipboard: Clipboard,
    pub reload_requested: bool,
    z_counter: u32,
    clock_ms: u64,
    page: PageContext,
    edit_url: String,
}

impl PanelState {
    /// Initialize from the embedded records; storage is always overwritten.
    pub fn init(
        initial_prompts: Vec<ScriptRecord>,
        saved_positions: BTreeMap<String, PanelPosition>,
        page: PageContext,
        edit_url: impl Into<String>,
    ) -> Self {
        let panel = saved_positions
            .get(&page.hostname)
            .cloned()
            .unwrap_or_else(PanelPosition::top_center);

        Self {
            stored_prompts: initial_prompts.clone(),
            initial_prompts,
            open_modals_stack: Vec::new(),
            current_open_modal: None,
            positions: saved_positions,
            drag_state: None,
            panel,
            notification: None,
            clipboard: Clipboard::default(),
            reload_requested: false,
            z_counter: MODAL_BASE_Z,
            clock_ms: 0,
            page,
            edit_url: edit_url.into(),
        }
    }

    /// Stored prompts of one type, in stored order.
    pub fn prompts_of_type(&self, prompt_type: PromptType) -> Vec<&ScriptRecord> {
        let wanted = prompt_type.as_str();
        self.stored_prompts
            .iter()
            .filter(|p| p.prompt_type == wanted)
            .collect()
    }

    /// One button per quick action.
    pub fn quick_actions(&self) -> Vec<&ScriptRecord> {
        self.prompts_of_type(PromptType::QuickAction)
    }

    /// Type shown by the list modal, if it is open.
    pub fn open_list_type(&self) -> Option<PromptType> {
        self.open_modals_stack.iter().find_map(|m| match m {
            Modal::List { prompt_type } => Some(*prompt_type),
            Modal::Preview { .. } => None,
        })
    }

    /// Rows of the open list modal.
    pub fn list_items(&self) -> Vec<&ScriptRecord> {
        self.open_list_type()
            .map(|t| self.prompts_of_type(t))
            .unwrap_or_default()
    }

    /// `S-Prompts` / `A-Prompts` click.
    ///
    /// Same type open closes the list; another type open re-renders it in
    /// place. Previews are left alone either way.
    pub fn toggle_list(&mut self, prompt_type: PromptType) {
        let existing = self
            .open_modals_stack
            .iter()
            .enumerate()
            .find_map(|(i, m)| match m {
                Modal::List { prompt_type } => Some((i, *prompt_type)),
                Modal::Preview { .. } => None,
            });

        match existing {
            Some((i, open)) if open == prompt_type => {
                self.open_modals_stack.remove(i);
            }
            Some((i, _)) => {
                self.open_modals_stack.remove(i);
                self.open_modals_stack.push(Modal::List { prompt_type });
            }
            None => self.open_modals_stack.push(Modal::List { prompt_type }),
        }
        self.sync_current();
    }
}

// The browser runs the JS twins of these handlers; here only tests drive them.
#[cfg_attr(not(test), allow(dead_code))]
impl PanelState {
    pub fn primary_modal_count(&self) -> usize {
        self.open_modals_stack
            .iter()
            .filter(|m| !m.is_sub_modal())
            .count()
    }

    /// Click on a list row outside its preview button.
    pub fn click_row(&mut self, index: usize) -> bool {
        let Some(record) = self.list_items().get(index).map(|r| (*r).clone()) else {
            return false;
        };
        self.copy(&record.content, &record.title, CopySource::ListRow)
    }

    /// Preview button on a list row. Returns the preview's modal id.
    pub fn open_preview(&mut self, prompt_id: &str) -> Option<String> {
        let record = self.stored_prompts.iter().find(|p| p.id == prompt_id)?;
        let id = preview_modal_id(&record.id);
        let prompt_id = record.id.clone();

        // Reopening a preview recreates it on top.
        self.open_modals_stack.retain(|m| m.id() != id);
        self.z_counter += 1;
        self.open_modals_stack.push(Modal::Preview {
            id: id.clone(),
            prompt_id,
            z_index: self.z_counter,
        });
        self.sync_current();
        Some(id)
    }

    /// Copy button inside a preview.
    pub fn copy_from_preview(&mut self, modal_id: &str) -> bool {
        let record = self.open_modals_stack.iter().find_map(|m| match m {
            Modal::Preview { id, prompt_id, .. } if id == modal_id => self
                .stored_prompts
                .iter()
                .find(|p| &p.id == prompt_id)
                .cloned(),
            _ => None,
        });

        match record {
            Some(r) => self.copy(&r.content, &r.title, CopySource::Preview(modal_id.to_string())),
            None => false,
        }
    }

    /// "Copy Template" in the list modal footer. The list stays open.
    pub fn copy_template(&mut self, snippet: &str, title: &str) -> bool {
        self.copy(snippet, title, CopySource::Template)
    }

    /// Quick-action button click.
    pub fn click_quick_action(&mut self, prompt_id: &str) -> bool {
        let Some(record) = self
            .quick_actions()
            .into_iter()
            .find(|p| p.id == prompt_id)
            .cloned()
        else {
            return false;
        };
        self.copy(&record.content, &record.title, CopySource::Button)
    }

    /// `E` button: copies the script's edit URL.
    pub fn copy_edit_url(&mut self) -> bool {
        let url = self.edit_url.clone();
        self.copy_with_message(&url, CopySource::Button, "Script edit URL copied!")
    }

    /// `P` button: copies the current page URL.
    pub fn copy_page_url(&mut self) -> bool {
        let url = self.page.href.clone();
        self.copy_with_message(&url, CopySource::Button, "Current page URL copied!")
    }

    /// Close button, or backdrop click on the list modal.
    pub fn close_modal(&mut self, modal_id: &str) {
        self.open_modals_stack.retain(|m| m.id() != modal_id);
        self.sync_current();
    }

    pub fn pointer_down(&mut self, target: PointerTarget, pointer: Point, panel_origin: Point) {
        if target != PointerTarget::MoveHandle {
            return;
        }
        self.drag_state = Some(DragState {
            pointer_start: pointer,
            panel_start: panel_origin,
        });
    }

    pub fn pointer_move(&mut self, pointer: Point) {
        if let Some(drag) = &self.drag_state {
            let top = drag.panel_start.y + (pointer.y - drag.pointer_start.y);
            let left = drag.panel_start.x + (pointer.x - drag.pointer_start.x);
            self.panel = PanelPosition::pixels(top, left);
        }
    }

    /// Ends a drag and saves the position for the current hostname.
    pub fn pointer_up(&mut self) {
        if self.drag_state.take().is_none() {
            return;
        }
        self.positions
            .insert(self.page.hostname.clone(), self.panel.clone());
        self.notify("Panel position saved.", NotificationKind::Success);
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_state.is_some()
    }

    /// "Reset Panel Position" menu command.
    pub fn reset_position(&mut self) {
        self.positions.remove(&self.page.hostname);
        self.notify(
            "Panel position reset. Reloading...",
            NotificationKind::Warning,
        );
        self.reload_requested = true;
    }

    /// "Reset Prompts" menu command.
    pub fn reset_prompts(&mut self) {
        self.stored_prompts = self.initial_prompts.clone();
        self.notify(
            "Prompts reset to initial values from script.",
            NotificationKind::Warning,
        );
        self.reload_requested = true;
    }

    /// Let time pass; a due notification is dismissed.
    pub fn advance(&mut self, ms: u64) {
        self.clock_ms += ms;
        if self
            .notification
            .as_ref()
            .is_some_and(|n| n.dismiss_at_ms <= self.clock_ms)
        {
            self.notification = None;
        }
    }

    /// Show a notification, cancelling the previous one's dismissal.
    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) {
        self.notification = Some(Notification {
            message: message.into(),
            kind,
            dismiss_at_ms: self.clock_ms + NOTIFICATION_DISMISS_MS,
        });
    }

    fn copy(&mut self, text: &str, title: &str, source: CopySource) -> bool {
        let message = if source == CopySource::Template {
            format!(
                "Template `{}` copied.\nPaste into the initial prompts array and edit.",
                title
            )
        } else {
            format!("Copied `{}` to clipboard!", title)
        };
        self.copy_with_message(text, source, &message)
    }

    fn copy_with_message(&mut self, text: &str, source: CopySource, message: &str) -> bool {
        if self.clipboard.deny_writes {
            self.notify("Copy failed.", NotificationKind::Error);
            return false;
        }
        self.clipboard.contents = Some(text.to_string());

        let kind = if source == CopySource::Template {
            NotificationKind::Warning
        } else {
            NotificationKind::Success
        };
        self.notify(message, kind);

        match source {
            CopySource::ListRow => self.close_modal(LIST_MODAL_ID),
            CopySource::Preview(id) => self.close_modal(&id),
            CopySource::Template | CopySource::Button => {}
        }
        true
    }

    fn sync_current(&mut self) {
        self.current_open_modal = self.open_modals_stack.last().map(|m| m.id().to_string());
        if !self.open_modals_stack.iter().any(Modal::is_sub_modal) {
            self.z_counter = MODAL_BASE_Z;
        }
    }
}
