//! UI event callbacks.
//!
//! Every window, menu, tab strip and dialog event ends up in one method of
//! [`Callbacks`]. The methods only decide whether and when something happens;
//! the work itself is delegated to a [`TermitCore`].
//!
//! Dialogs are modal: opening one stores its state here, the app renders it
//! every frame through [`Callbacks::show_modal`], and the answer is resolved
//! in [`Callbacks::resolve_modal`]. Accepting performs the delegate call,
//! rejecting does nothing. While a dialog is open no other dialog can be
//! opened and the terminal does not receive keys.

use crate::core_api::TermitCore;
use crate::dialogs::{
    ColorDialog, ConfirmExitDialog, DialogResponse, FileChooser, FontDialog, NativeFileChooser,
    TabNameDialog,
};
use crate::menu::{ContextMenu, MenuAction};
use crate::tab::TabId;
use std::path::PathBuf;
use termit_config::{UserAction, UserMenuItem};
use termit_keybindings::KeybindingMatcher;

/// Title of the session save dialog
const SAVE_SESSION_TITLE: &str = "Save session";
/// Title of the session open dialog
const OPEN_SESSION_TITLE: &str = "Open session";
/// File name suggested when saving a session
const DEFAULT_SESSION_NAME: &str = "New session";

/// The dialog currently blocking the window
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    ConfirmExit(ConfirmExitDialog),
    TabName(TabNameDialog),
    ForegroundColor(ColorDialog),
    Font(FontDialog),
}

/// Kind of mouse press on the tab strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    Single,
    Double,
    Triple,
}

/// Event callbacks and the UI state they own
pub struct Callbacks {
    /// Open dialog, if any
    modal: Option<Modal>,
    /// Popup menu opened by a secondary click
    context_menu: ContextMenu,
    /// State of the Scrollbar check item in the View menu
    scrollbar_check: bool,
    file_chooser: Box<dyn FileChooser>,
    /// Folder the session choosers start in
    session_dir: PathBuf,
}

impl Callbacks {
    /// Callbacks using native file choosers and the XDG session folder
    pub fn new(scrollbar_check: bool) -> Self {
        Self::with_file_chooser(
            scrollbar_check,
            Box::new(NativeFileChooser),
            termit_config::session_data_dir(),
        )
    }

    pub fn with_file_chooser(
        scrollbar_check: bool,
        file_chooser: Box<dyn FileChooser>,
        session_dir: PathBuf,
    ) -> Self {
        Self {
            modal: None,
            context_menu: ContextMenu::default(),
            scrollbar_check,
            file_chooser,
            session_dir,
        }
    }

    // ========================================================================
    // Modal state
    // ========================================================================

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn modal_mut(&mut self) -> Option<&mut Modal> {
        self.modal.as_mut()
    }

    pub fn has_modal(&self) -> bool {
        self.modal.is_some()
    }

    pub fn context_menu_mut(&mut self) -> &mut ContextMenu {
        &mut self.context_menu
    }

    pub fn scrollbar_checked(&self) -> bool {
        self.scrollbar_check
    }

    /// Open `modal` unless another dialog is already up
    fn open_modal(&mut self, modal: Modal) -> bool {
        if let Some(open) = &self.modal {
            log::debug!("Ignoring dialog request, {:?} is already open", open);
            return false;
        }
        self.context_menu.close();
        self.modal = Some(modal);
        true
    }

    /// Render the open dialog and act on its answer
    pub fn show_modal(&mut self, ctx: &egui::Context, core: &mut dyn TermitCore) {
        let Some(modal) = self.modal.as_mut() else {
            return;
        };
        let response = match modal {
            Modal::ConfirmExit(dialog) => dialog.show(ctx),
            Modal::TabName(dialog) => dialog.show(ctx),
            Modal::ForegroundColor(dialog) => dialog.show(ctx),
            Modal::Font(dialog) => dialog.show(ctx),
        };
        self.resolve_modal(core, response);
    }

    /// Close the open dialog with `response`.
    ///
    /// Accept performs the delegate call the dialog was opened for; Reject
    /// only closes it. `DialogResponse::None` leaves the dialog open.
    pub fn resolve_modal(&mut self, core: &mut dyn TermitCore, response: DialogResponse) {
        if response == DialogResponse::None {
            return;
        }
        let Some(modal) = self.modal.take() else {
            return;
        };
        if response == DialogResponse::Reject {
            log::debug!("Dialog dismissed: {:?}", modal);
            return;
        }

        match modal {
            Modal::ConfirmExit(_) => core.quit(),
            Modal::TabName(dialog) => match core.notebook().page_of(dialog.tab) {
                Some(page) => core.set_tab_name(page, &dialog.text),
                None => log::info!("Tab {} closed before it could be renamed", dialog.tab),
            },
            Modal::ForegroundColor(dialog) => core.set_foreground_color(dialog.color),
            Modal::Font(dialog) => core.set_font(&dialog.font_name()),
        }
    }

    // ========================================================================
    // Window lifecycle
    // ========================================================================

    /// Whether exiting may proceed right away.
    ///
    /// With several tabs open this asks first and returns `false`; answering
    /// Yes quits. Any other open dialog is dismissed in favour of the question.
    pub fn confirm_exit(&mut self, core: &mut dyn TermitCore) -> bool {
        if core.notebook().n_pages() <= 1 {
            return true;
        }
        // Exiting outranks an unfinished dialog
        if let Some(open) = self.modal.take_if(|m| !matches!(m, Modal::ConfirmExit(_))) {
            log::info!("Exit requested, dropping {:?}", open);
        }
        self.open_modal(Modal::ConfirmExit(ConfirmExitDialog::new()));
        false
    }

    /// Window close request. Returns `true` when closing is inhibited.
    pub fn on_delete_event(&mut self, core: &mut dyn TermitCore) -> bool {
        !self.confirm_exit(core)
    }

    pub fn on_destroy(&mut self, core: &mut dyn TermitCore) {
        core.quit();
    }

    pub fn on_exit(&mut self, core: &mut dyn TermitCore) {
        if self.confirm_exit(core) {
            core.quit();
        }
    }

    // ========================================================================
    // Terminal events
    // ========================================================================

    /// The child of `tab_id` set a new window title
    pub fn on_window_title_changed(&mut self, core: &mut dyn TermitCore, tab_id: TabId) {
        let Some(page) = core.notebook().page_of(tab_id) else {
            return;
        };
        let Some(tab) = core.notebook_mut().tab_mut(page) else {
            return;
        };
        let Some(title) = tab.terminal.window_title() else {
            return;
        };
        log::debug!("Tab {} title: {:?} -> {:?}", tab_id, tab.title, title);
        tab.title = title.clone();

        if core.notebook().current_page() == Some(page) && core.config().allow_changing_title {
            core.set_window_title(&title);
        }
    }

    /// The child of `tab_id` exited: reap it and close its tab
    pub fn on_child_exited(&mut self, core: &mut dyn TermitCore, tab_id: TabId) {
        let Some(page) = core.notebook().page_of(tab_id) else {
            return;
        };
        if let Some(tab) = core.notebook_mut().tab_mut(page) {
            match tab.terminal.try_wait() {
                Ok(status) => log::info!("Tab {} child exited: {:?}", tab_id, status),
                Err(e) => log::warn!("Tab {}: {:#}", tab_id, e),
            }
        }
        core.close_tab(page);
    }

    // ========================================================================
    // Tab strip and notebook
    // ========================================================================

    /// Mouse press on the terminal or tab strip. Returns `true` when handled.
    pub fn on_popup(&mut self, button: egui::PointerButton, pos: egui::Pos2) -> bool {
        if button != egui::PointerButton::Secondary {
            return false;
        }
        if self.modal.is_none() {
            self.context_menu.open_at(pos);
        }
        true
    }

    /// Click on the empty part of the tab strip. Never consumes the event.
    pub fn on_double_click(&mut self, core: &mut dyn TermitCore, kind: ClickKind) -> bool {
        if kind == ClickKind::Double {
            self.on_new_tab(core);
        }
        false
    }

    /// `page` became the current page
    pub fn on_switch_page(&mut self, core: &mut dyn TermitCore, page: usize) {
        let Some(tab) = core.notebook().tab(page) else {
            return;
        };
        // Sync the check item only; toggling here would flip the tab's flag
        self.scrollbar_check = tab.scrollbar_is_shown;
        let title = tab.title.clone();

        core.set_statusbar_encoding(page);
        if core.config().allow_changing_title {
            core.set_window_title(&title);
        }
    }

    pub fn on_new_tab(&mut self, core: &mut dyn TermitCore) {
        if let Err(e) = core.append_tab() {
            log::error!("Failed to open tab: {:#}", e);
        }
    }

    pub fn on_close_tab(&mut self, core: &mut dyn TermitCore) {
        if let Some(page) = core.notebook().current_page() {
            core.close_tab(page);
        }
    }

    pub fn on_prev_tab(&mut self, core: &mut dyn TermitCore) {
        core.prev_tab();
    }

    pub fn on_next_tab(&mut self, core: &mut dyn TermitCore) {
        core.next_tab();
    }

    // ========================================================================
    // Menu items
    // ========================================================================

    pub fn on_toggle_scrollbar(&mut self, core: &mut dyn TermitCore) {
        let Some(tab) = core.notebook_mut().current_tab_mut() else {
            return;
        };
        tab.scrollbar_is_shown = !tab.scrollbar_is_shown;
        self.scrollbar_check = tab.scrollbar_is_shown;
        log::debug!("Tab {} scrollbar shown: {}", tab.id, tab.scrollbar_is_shown);
    }

    pub fn on_set_encoding(&mut self, core: &mut dyn TermitCore, encoding: &str) {
        if let Err(e) = core.set_encoding(encoding) {
            log::error!("Failed to set encoding {}: {:#}", encoding, e);
        }
    }

    pub fn on_copy(&mut self, core: &mut dyn TermitCore) {
        if let Err(e) = core.copy() {
            log::error!("Copy failed: {:#}", e);
        }
    }

    pub fn on_paste(&mut self, core: &mut dyn TermitCore) {
        if let Err(e) = core.paste() {
            log::error!("Paste failed: {:#}", e);
        }
    }

    /// Ask for a new label for the current page
    pub fn on_set_tab_name(&mut self, core: &mut dyn TermitCore) {
        let Some(tab) = core.notebook().current_tab() else {
            return;
        };
        self.open_modal(Modal::TabName(TabNameDialog::new(tab.id, tab.label())));
    }

    pub fn on_select_foreground_color(&mut self, core: &mut dyn TermitCore) {
        self.open_modal(Modal::ForegroundColor(ColorDialog::new(
            core.foreground_color(),
        )));
    }

    pub fn on_select_font(&mut self, core: &mut dyn TermitCore) {
        self.open_modal(Modal::Font(FontDialog::new(&core.font())));
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    pub fn on_save_session(&mut self, core: &mut dyn TermitCore) {
        if let Err(e) = std::fs::create_dir_all(&self.session_dir) {
            log::warn!(
                "Failed to create session folder {}: {}",
                self.session_dir.display(),
                e
            );
        }
        let Some(path) =
            self.file_chooser
                .save_file(SAVE_SESSION_TITLE, &self.session_dir, DEFAULT_SESSION_NAME)
        else {
            return;
        };
        if let Err(e) = core.save_session(&path) {
            log::error!("Failed to save session to {}: {:#}", path.display(), e);
        }
    }

    pub fn on_load_session(&mut self, core: &mut dyn TermitCore) {
        let Some(path) = self
            .file_chooser
            .open_file(OPEN_SESSION_TITLE, &self.session_dir)
        else {
            return;
        };
        if let Err(e) = core.load_session(&path) {
            log::error!("Failed to load session from {}: {:#}", path.display(), e);
        }
    }

    // ========================================================================
    // User menus and keys
    // ========================================================================

    pub fn on_user_menu_item_selected(&mut self, core: &mut dyn TermitCore, item: &UserMenuItem) {
        log::info!("User menu item {:?}: {}", item.name, item.action.describe());

        if let UserAction::Builtin { action } = &item.action {
            match MenuAction::from_name(action) {
                Some(menu_action) => self.dispatch(core, menu_action),
                None => log::warn!("Unknown built-in action {:?} in {:?}", action, item.name),
            }
            return;
        }
        if let Err(e) = core.execute_user_action(&item.action) {
            log::error!("User menu item {:?} failed: {:#}", item.name, e);
        }
    }

    /// Key press before it reaches the terminal. Returns `true` when a key
    /// binding consumed it.
    pub fn on_key_press(&mut self, core: &mut dyn TermitCore, key: &KeybindingMatcher) -> bool {
        match core.process_key(key) {
            Some(action) => {
                crate::debug_info!("KEYS", "Binding {:?} -> {:?}", key, action);
                self.dispatch(core, action);
                true
            }
            None => false,
        }
    }

    /// Run the callback behind a menu entry, key binding or built-in action
    pub fn dispatch(&mut self, core: &mut dyn TermitCore, action: MenuAction) {
        match action {
            MenuAction::NewTab => self.on_new_tab(core),
            MenuAction::CloseTab => self.on_close_tab(core),
            MenuAction::SaveSession => self.on_save_session(core),
            MenuAction::LoadSession => self.on_load_session(core),
            MenuAction::Exit => self.on_exit(core),
            MenuAction::Copy => self.on_copy(core),
            MenuAction::Paste => self.on_paste(core),
            MenuAction::SetTabName => self.on_set_tab_name(core),
            MenuAction::SelectFont => self.on_select_font(core),
            MenuAction::SelectForegroundColor => self.on_select_foreground_color(core),
            MenuAction::PreviousTab => self.on_prev_tab(core),
            MenuAction::NextTab => self.on_next_tab(core),
            MenuAction::ToggleScrollbar => self.on_toggle_scrollbar(core),
            MenuAction::SetEncoding(encoding) => self.on_set_encoding(core, &encoding),
            MenuAction::UserItem(item) => self.on_user_menu_item_selected(core, &item),
        }
    }
}
