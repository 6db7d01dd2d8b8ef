use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;

use crate::config::AppConfig;
use crate::data::filter::{visible_ids, FilterCriteria};
use crate::data::loader::LoadCache;
use crate::data::model::{CellValue, Record, RecordId, Table};
use crate::data::sample::make_sample;
use crate::data::store::LocalStore;
use crate::data::url::sanitize_url;
use crate::data::{prepare, writer};

// ---------------------------------------------------------------------------
// Session-level enums
// ---------------------------------------------------------------------------

/// How the central panel shows the visible records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Dense editable grid.
    #[default]
    Grid,
    /// Card gallery with thumbnails.
    Gallery,
}

/// Per-record edit state. A record without an entry is being viewed.
#[derive(Debug, Clone, PartialEq)]
pub enum EditMode {
    Editing { draft: Record },
}

/// Row counts shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub visible: usize,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full session state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// The collection. Owned exclusively by this session.
    pub table: Table,

    pub filters: FilterCriteria,

    /// Ids of records passing the current filters (cached).
    pub visible: Vec<RecordId>,

    pub layout: Layout,

    /// Records currently open for editing in the gallery, keyed by id.
    pub edit_modes: HashMap<RecordId, EditMode>,

    /// File name offered when exporting.
    pub export_name: String,

    /// Also write the local file whenever an export happens.
    pub save_local_on_export: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    load_cache: LoadCache,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl AppState {
    /// Start a session on the built-in sample collection.
    pub fn new(config: AppConfig) -> Self {
        let mut state = Self {
            export_name: config.export_name.clone(),
            config,
            table: Table::default(),
            filters: FilterCriteria::default(),
            visible: Vec::new(),
            layout: Layout::default(),
            edit_modes: HashMap::new(),
            save_local_on_export: false,
            status_message: None,
            load_cache: LoadCache::new(),
        };
        state.set_table(make_sample());
        state
    }

    pub fn local_store(&self) -> LocalStore {
        LocalStore::new(&self.config.data_path)
    }

    /// Replace the collection. Pending edits are dropped.
    pub fn set_table(&mut self, mut table: Table) {
        for record in &mut table.records {
            record.clamp_numbers();
            record.image_url = sanitize_url(&record.image_url);
        }
        self.table = table;
        self.edit_modes.clear();
        self.refilter();
    }

    /// Recompute `visible` after a filter or data change.
    pub fn refilter(&mut self) {
        self.visible = visible_ids(&self.table, &self.filters);
    }

    pub fn summary(&self) -> Summary {
        Summary {
            total: self.table.len(),
            visible: self.visible.len(),
        }
    }

    // -- Import ---------------------------------------------------------------

    /// Load, normalize and install a spreadsheet picked by the user.
    pub fn import_file(&mut self, path: &Path) -> Result<()> {
        let raw = self.load_cache.load(path)?;
        let table = prepare(&raw);
        log::info!(
            "imported {} pins from {} (extra columns: {:?})",
            table.len(),
            path.display(),
            table.extra_columns
        );
        self.set_table(table);
        self.status_message = None;
        Ok(())
    }

    /// Load the local file if there is one, otherwise fall back to the sample.
    pub fn load_local(&mut self) -> Result<()> {
        let store = self.local_store();
        match store.load(&mut self.load_cache)? {
            Some(raw) => {
                self.set_table(prepare(&raw));
                self.status_message = Some(format!("Loaded {}", store.path().display()));
            }
            None => {
                self.set_table(make_sample());
                self.status_message = Some(format!(
                    "{} not found, showing sample data",
                    store.path().display()
                ));
            }
        }
        Ok(())
    }

    // -- Rows -------------------------------------------------------------------

    /// Append a blank record and return its id.
    ///
    /// Sets a status message when the active filters hide the new record.
    pub fn add_record(&mut self) -> RecordId {
        let id = self.table.add_blank();
        self.refilter();
        if !self.visible.contains(&id) {
            self.status_message = Some("New pin added but hidden by the current filters".into());
        }
        id
    }

    pub fn remove_record(&mut self, id: RecordId) -> Option<Record> {
        self.edit_modes.remove(&id);
        let removed = self.table.remove(id);
        self.refilter();
        removed
    }

    // -- Edit modes ----------------------------------------------------------------

    pub fn is_editing(&self, id: RecordId) -> bool {
        self.edit_modes.contains_key(&id)
    }

    /// Open a record for editing on a draft copy. No-op if already editing.
    pub fn begin_edit(&mut self, id: RecordId) {
        if self.is_editing(id) {
            return;
        }
        if let Some(record) = self.table.get(id) {
            let draft = record.clone();
            self.edit_modes.insert(id, EditMode::Editing { draft });
        }
    }

    pub fn draft_mut(&mut self, id: RecordId) -> Option<&mut Record> {
        match self.edit_modes.get_mut(&id) {
            Some(EditMode::Editing { draft }) => Some(draft),
            None => None,
        }
    }

    /// Write the draft back into the table and leave edit mode.
    pub fn commit_edit(&mut self, id: RecordId) -> bool {
        let Some(EditMode::Editing { mut draft }) = self.edit_modes.remove(&id) else {
            return false;
        };
        draft.id = id;
        draft.clamp_numbers();
        draft.image_url = sanitize_url(&draft.image_url);
        match self.table.get_mut(id) {
            Some(record) => {
                *record = draft;
                self.refilter();
                true
            }
            None => false,
        }
    }

    /// Drop the draft, leaving the record unchanged.
    pub fn cancel_edit(&mut self, id: RecordId) {
        self.edit_modes.remove(&id);
    }

    /// Merge an edited subset of records back into the table by id.
    ///
    /// Known ids are replaced in place, unknown ids are appended, and rows
    /// missing from `edited` are left untouched.
    pub fn merge_edits(&mut self, edited: Vec<Record>) {
        for mut record in edited {
            record.clamp_numbers();
            record.image_url = sanitize_url(&record.image_url);
            record.extra.resize(self.table.extra_columns.len(), CellValue::Null);
            match self.table.get_mut(record.id) {
                Some(existing) => *existing = record,
                None => self.table.push(record),
            }
        }
        self.refilter();
    }

    // -- Export ----------------------------------------------------------------------

    /// Write the collection to `path`, and to the local file when requested.
    pub fn export_to(&mut self, path: &Path) -> Result<()> {
        writer::write_file(path, &self.table)?;
        log::info!(
            "exported {} pins to {} ({})",
            self.table.len(),
            path.display(),
            writer::mime_for_path(path).unwrap_or("unknown type")
        );
        self.status_message = Some(format!("Exported to {}", path.display()));
        if self.save_local_on_export {
            self.save_local()?;
        }
        Ok(())
    }

    pub fn save_local(&mut self) -> Result<()> {
        let store = self.local_store();
        store.save(&self.table)?;
        self.status_message = Some(format!("Saved to {}", store.path().display()));
        Ok(())
    }
}
