//! Per-window state: the renderer, the tabs and the callbacks wired to them.
//!
//! Each window event is routed to a callback, and every frame the tabs are
//! polled for the things their PTY reader threads noticed: a new window
//! title or a child that went away.

use super::renderer::WindowRenderer;
use super::tab_strip::{TabStripEvent, tab_strip};
use super::terminal_view::{TerminalViewOutput, terminal_view};
use super::termit::Termit;
use crate::callbacks::Callbacks;
use crate::cli::RuntimeOptions;
use crate::core_api::TermitCore;
use crate::menu::{MenuModel, menu_bar};
use crate::tab::TabSpec;
use anyhow::{Context, Result, bail};
use std::sync::Arc;
use termit_config::Config;
use termit_keybindings::KeybindingMatcher;
use tokio::runtime::Runtime;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

/// Rough cell size per point of font size, used only for the first window size
const CELL_WIDTH_PER_POINT: f64 = 0.62;
const CELL_HEIGHT_PER_POINT: f64 = 1.4;
/// Space taken by the menu bar, tab strip and status bar
const CHROME_HEIGHT: f64 = 78.0;

pub struct WindowState {
    window: Arc<Window>,
    renderer: WindowRenderer,
    termit: Termit,
    callbacks: Callbacks,
    /// Current page at the end of the last sync, to detect page switches
    last_page: Option<usize>,
}

impl WindowState {
    /// Create the window and open the first tabs
    pub fn new(
        event_loop: &ActiveEventLoop,
        config: Config,
        runtime: Arc<Runtime>,
        options: &RuntimeOptions,
    ) -> Result<Self> {
        let font = config.font_description();
        let cell_w = f64::from(font.size) * CELL_WIDTH_PER_POINT;
        let cell_h = f64::from(font.size) * CELL_HEIGHT_PER_POINT;
        let inner_size = winit::dpi::LogicalSize::new(
            f64::from(config.columns) * cell_w + 16.0,
            f64::from(config.rows) * cell_h + CHROME_HEIGHT,
        );

        let mut termit = Termit::new(config, Arc::clone(&runtime));
        let window_attrs = Window::default_attributes()
            .with_title(termit.window_title())
            .with_inner_size(inner_size)
            .with_min_inner_size(winit::dpi::LogicalSize::new(200, 120));
        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .context("Failed to create window")?,
        );
        let renderer = runtime.block_on(WindowRenderer::new(Arc::clone(&window)))?;
        termit.attach_window(Arc::clone(&window));

        open_initial_tabs(&mut termit, options)?;

        let scrollbar = termit
            .notebook()
            .current_tab()
            .map(|tab| tab.scrollbar_is_shown)
            .unwrap_or(termit.config().show_scrollbar);

        let mut state = Self {
            window,
            renderer,
            termit,
            callbacks: Callbacks::new(scrollbar),
            last_page: None,
        };
        state.sync_tabs();
        Ok(state)
    }

    pub fn window_id(&self) -> WindowId {
        self.window.id()
    }

    /// Whether the main loop should stop
    pub fn should_exit(&self) -> bool {
        self.termit.quit_requested()
    }

    pub fn handle_window_event(&mut self, event: WindowEvent) {
        let consumed = self.renderer.on_window_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                if !self.callbacks.on_delete_event(&mut self.termit) {
                    self.callbacks.on_destroy(&mut self.termit);
                }
                self.window.request_redraw();
            }

            WindowEvent::Resized(size) => {
                self.renderer.resize(size.width, size.height);
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.termit.input.update_modifiers(modifiers);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(&event, consumed);
            }

            WindowEvent::RedrawRequested => {
                self.render();
            }

            _ => {}
        }

        self.sync_tabs();
    }

    fn handle_key(&mut self, event: &KeyEvent, consumed_by_egui: bool) {
        if event.state != ElementState::Pressed {
            return;
        }
        // Dialogs and the popup take the keyboard while open
        if self.callbacks.has_modal() || self.callbacks.context_menu_mut().is_open() {
            self.window.request_redraw();
            return;
        }
        if consumed_by_egui && self.renderer.egui_ctx().wants_keyboard_input() {
            return;
        }

        let matcher = KeybindingMatcher::from_event(event, &self.termit.input.modifiers);
        if self.callbacks.on_key_press(&mut self.termit, &matcher) {
            self.window.request_redraw();
            return;
        }

        let application_cursor = self
            .termit
            .notebook()
            .current_tab()
            .is_some_and(|tab| tab.terminal.application_cursor());
        if let Some(bytes) = self
            .termit
            .input
            .handle_key_event(event, application_cursor)
        {
            self.termit.write_to_current(&bytes);
        }
    }

    fn render(&mut self) {
        self.sync_tabs();
        crate::debug_trace!("RENDER", "Frame for {} tabs", self.termit.notebook().n_pages());

        let termit = &mut self.termit;
        let callbacks = &mut self.callbacks;
        let background = termit.config().background_color;
        let mut strip_events = Vec::new();
        let mut view = TerminalViewOutput::default();

        self.renderer.render(background, |ctx| {
            let picked = menu_bar(ctx, &menu_model(termit, callbacks.scrollbar_checked()));
            if let Some(action) = picked {
                callbacks.dispatch(termit, action);
            }

            strip_events.extend(tab_strip(ctx, termit.notebook()));

            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(termit.statusbar_encoding());
                });
            });

            let config = termit.config().clone();
            let output = terminal_view(ctx, termit.notebook_mut().current_tab_mut(), &config);
            view.grid_size = output.grid_size.or(view.grid_size);
            view.pointer = output.pointer.or(view.pointer);
            view.selection_finished |= output.selection_finished;

            let model = menu_model(termit, callbacks.scrollbar_checked());
            let picked = callbacks.context_menu_mut().show(ctx, &model);
            if let Some(action) = picked {
                callbacks.dispatch(termit, action);
            }

            callbacks.show_modal(ctx, termit);
        });

        if let Some((cols, rows)) = view.grid_size {
            self.termit.resize_grid(cols, rows);
        }
        if let Some((button, pos)) = view.pointer
            && self.callbacks.on_popup(button, pos)
        {
            self.window.request_redraw();
        }
        if view.selection_finished {
            self.copy_selection_to_primary();
        }
        for event in strip_events {
            self.handle_tab_strip_event(event);
        }
    }

    fn handle_tab_strip_event(&mut self, event: TabStripEvent) {
        match event {
            TabStripEvent::Select(page) => {
                self.termit.notebook_mut().set_current_page(page);
            }
            TabStripEvent::Click(kind) => {
                self.callbacks.on_double_click(&mut self.termit, kind);
            }
            TabStripEvent::Pointer(button, pos) => {
                self.callbacks.on_popup(button, pos);
            }
        }
        self.window.request_redraw();
    }

    fn copy_selection_to_primary(&mut self) {
        let Some(text) = self
            .termit
            .notebook()
            .current_tab()
            .and_then(|tab| tab.selected_text())
        else {
            return;
        };
        if let Err(e) = self.termit.input.copy_to_primary_selection(&text) {
            log::debug!("Primary selection unavailable: {:#}", e);
        }
    }

    /// Route terminal side changes to their callbacks
    fn sync_tabs(&mut self) {
        let mut retitled = Vec::new();
        let mut exited = Vec::new();
        for tab in self.termit.notebook().tabs() {
            if tab.terminal.take_title_change() {
                retitled.push(tab.id);
            }
            if tab.terminal.output_closed() {
                exited.push(tab.id);
            }
        }

        for id in retitled {
            crate::debug_log!("TAB", "Tab {} retitled", id);
            self.callbacks.on_window_title_changed(&mut self.termit, id);
        }
        for id in exited {
            crate::debug_info!("TAB", "Tab {} output closed", id);
            self.callbacks.on_child_exited(&mut self.termit, id);
        }

        let current = self.termit.notebook().current_page();
        if current != self.last_page {
            self.last_page = current;
            if let Some(page) = current {
                self.callbacks.on_switch_page(&mut self.termit, page);
            }
            self.window.request_redraw();
        }
    }
}

fn menu_model(termit: &Termit, scrollbar_checked: bool) -> MenuModel<'_> {
    let config = termit.config();
    MenuModel {
        encodings: &config.encodings,
        current_encoding: termit
            .notebook()
            .current_tab()
            .map(|tab| tab.encoding.as_str()),
        user_menus: &config.user_menus,
        scrollbar_checked,
        keybindings: termit.keybindings(),
    }
}

/// Open the tabs requested on the command line, or one shell
fn open_initial_tabs(termit: &mut Termit, options: &RuntimeOptions) -> Result<()> {
    if let Some(session) = &options.session
        && let Err(e) = termit.load_session(session)
    {
        log::error!("Failed to load session {}: {:#}", session.display(), e);
    }
    if options.execute.is_some() || termit.notebook().is_empty() {
        let spec = TabSpec {
            command: options.execute.clone(),
            ..TabSpec::default()
        };
        termit.open_tab(&spec)?;
    }
    if termit.notebook().is_empty() {
        bail!("No tab could be opened");
    }
    Ok(())
}
