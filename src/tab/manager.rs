//! The notebook: tabs addressed by page index

use super::{Tab, TabId};

/// Ordered collection of tabs with one current page
pub struct Notebook {
    /// All tabs, in page order
    tabs: Vec<Tab>,
    /// Index of the page being shown
    current_page: Option<usize>,
    /// Counter for generating unique tab IDs
    next_tab_id: TabId,
}

impl Notebook {
    /// Create a new empty notebook
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            current_page: None,
            next_tab_id: 1,
        }
    }

    /// Reserve an id for a tab about to be created
    pub fn next_id(&mut self) -> TabId {
        let id = self.next_tab_id;
        self.next_tab_id += 1;
        id
    }

    /// Add a tab as the last page and return its index.
    ///
    /// The first page becomes current; later pages do not switch.
    pub fn append(&mut self, tab: Tab) -> usize {
        self.next_tab_id = self.next_tab_id.max(tab.id + 1);
        self.tabs.push(tab);
        let page = self.tabs.len() - 1;
        if self.current_page.is_none() {
            self.current_page = Some(page);
        }
        log::info!("Appended page {} (total: {})", page, self.tabs.len());
        page
    }

    /// Remove the tab at `page` and hand it back.
    ///
    /// When the current page is removed, the page that slides into its slot
    /// becomes current, or the new last page.
    pub fn remove(&mut self, page: usize) -> Option<Tab> {
        if page >= self.tabs.len() {
            return None;
        }
        let tab = self.tabs.remove(page);
        log::info!("Removed page {} (tab {}, remaining: {})", page, tab.id, self.tabs.len());

        self.current_page = match self.current_page {
            _ if self.tabs.is_empty() => None,
            Some(current) if current > page => Some(current - 1),
            Some(current) => Some(current.min(self.tabs.len() - 1)),
            None => None,
        };
        Some(tab)
    }

    pub fn n_pages(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn current_page(&self) -> Option<usize> {
        self.current_page
    }

    /// Make `page` current; returns false for an out of range page
    pub fn set_current_page(&mut self, page: usize) -> bool {
        if page >= self.tabs.len() {
            log::debug!("Ignoring switch to missing page {}", page);
            return false;
        }
        self.current_page = Some(page);
        true
    }

    /// Switch to the next page (wraps around)
    pub fn next_page(&mut self) -> Option<usize> {
        let current = self.current_page?;
        if self.tabs.len() > 1 {
            self.current_page = Some((current + 1) % self.tabs.len());
        }
        self.current_page
    }

    /// Switch to the previous page (wraps around)
    pub fn prev_page(&mut self) -> Option<usize> {
        let current = self.current_page?;
        if self.tabs.len() > 1 {
            self.current_page = Some(if current == 0 {
                self.tabs.len() - 1
            } else {
                current - 1
            });
        }
        self.current_page
    }

    pub fn tab(&self, page: usize) -> Option<&Tab> {
        self.tabs.get(page)
    }

    pub fn tab_mut(&mut self, page: usize) -> Option<&mut Tab> {
        self.tabs.get_mut(page)
    }

    pub fn current_tab(&self) -> Option<&Tab> {
        self.current_page.and_then(|page| self.tabs.get(page))
    }

    pub fn current_tab_mut(&mut self) -> Option<&mut Tab> {
        self.current_page.and_then(|page| self.tabs.get_mut(page))
    }

    /// Page currently holding the tab with `id`
    pub fn page_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    /// Text shown on the tab strip for `page`
    pub fn tab_label_text(&self, page: usize) -> Option<&str> {
        self.tabs.get(page).map(Tab::label)
    }

    /// Give `page` a custom label; an empty name restores the title
    pub fn set_tab_label(&mut self, page: usize, name: &str) -> bool {
        let Some(tab) = self.tabs.get_mut(page) else {
            return false;
        };
        let name = name.trim();
        tab.custom_name = (!name.is_empty()).then(|| name.to_string());
        log::info!("Tab {} label set to {:?}", tab.id, tab.label());
        true
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn tabs_mut(&mut self) -> &mut [Tab] {
        &mut self.tabs
    }
}

impl Default for Notebook {
    fn default() -> Self {
        Self::new()
    }
}
