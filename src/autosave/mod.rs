//! Debounced auto-save scheduling for the draft document.
//!
//! The scheduler decouples keystrokes from persistence: edits are merged
//! into an in-memory snapshot, a debounce deadline coalesces bursts of
//! typing, and a fixed interval catches anything the debounce missed.
//! Saves only fire when the candidate snapshot differs from the last one
//! handed to the save callback.
//!
//! All timing is driven by a caller-supplied `now_ms` logical clock, so
//! the scheduler itself never reads wall-clock time and tests can step
//! time explicitly.

use std::collections::HashSet;
use std::fmt;

/// A draft document as held in memory and persisted by the save callback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorDocument {
    pub title: String,
    pub content: String,
}

/// The independently patchable fields of an [`EditorDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Content,
}

/// A partial update to the document. `None` fields are left untouched,
/// so a patch can only ever name declared document fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl DocumentPatch {
    /// A patch touching only the title.
    pub fn title(text: impl Into<String>) -> Self {
        Self {
            title: Some(text.into()),
            content: None,
        }
    }

    /// A patch touching only the content.
    pub fn content(text: impl Into<String>) -> Self {
        Self {
            title: None,
            content: Some(text.into()),
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Timing knobs for the scheduler. The debounce should be shorter than
/// the interval; nothing enforces it, the interval just becomes the
/// effective cadence otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutosaveTiming {
    /// Quiet period after the last non-ignored edit before a save fires.
    pub debounce_ms: u64,
    /// Fixed background save period.
    pub interval_ms: u64,
}

impl AutosaveTiming {
    pub const DEFAULT_DEBOUNCE_MS: u64 = 750;
    pub const DEFAULT_INTERVAL_MS: u64 = 10_000;
}

impl Default for AutosaveTiming {
    fn default() -> Self {
        Self {
            debounce_ms: Self::DEFAULT_DEBOUNCE_MS,
            interval_ms: Self::DEFAULT_INTERVAL_MS,
        }
    }
}

/// Persistence callback. Fire-and-forget: the scheduler never observes
/// failures, so the callback must do its own logging or retrying.
pub type SaveFn = Box<dyn FnMut(&EditorDocument)>;

/// Coalesces document edits and invokes the save callback at most once
/// per detected change per debounce/interval/force event.
///
/// Fields flagged with `ignore_auto_save` are rolled back to their
/// last-saved value when building the snapshot handed to the callback,
/// until a later non-ignoring edit touches them or [`force_save`] runs.
///
/// [`force_save`]: AutosaveScheduler::force_save
pub struct AutosaveScheduler {
    document: EditorDocument,
    last_saved: EditorDocument,
    ignored: HashSet<Field>,
    timing: AutosaveTiming,
    /// Logical deadline for the pending debounce, if armed.
    debounce_due: Option<u64>,
    /// Logical deadline for the next interval save. Armed lazily on the
    /// first tick so the period is anchored to the running clock.
    interval_due: Option<u64>,
    save: SaveFn,
}

impl fmt::Debug for AutosaveScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutosaveScheduler")
            .field("document", &self.document)
            .field("ignored", &self.ignored)
            .field("timing", &self.timing)
            .field("debounce_due", &self.debounce_due)
            .field("interval_due", &self.interval_due)
            .finish_non_exhaustive()
    }
}

impl AutosaveScheduler {
    /// Create a scheduler whose last-saved snapshot is `initial`.
    pub fn new(initial: EditorDocument, timing: AutosaveTiming, save: SaveFn) -> Self {
        Self {
            document: initial.clone(),
            last_saved: initial,
            ignored: HashSet::new(),
            timing,
            debounce_due: None,
            interval_due: None,
            save,
        }
    }

    /// Merge `patch` into the in-memory document.
    ///
    /// With `ignore_auto_save` set, every patched field is flagged so
    /// automatic saves roll it back to its last-saved value; without it,
    /// patched fields are unflagged again. The debounce deadline is
    /// (re)armed only when some patched field ends up unflagged —
    /// last-write-wins on timing, merged snapshot on data.
    pub fn update(&mut self, patch: DocumentPatch, ignore_auto_save: bool, now_ms: u64) {
        let mut touched = Vec::with_capacity(2);
        if let Some(title) = patch.title {
            self.document.title = title;
            touched.push(Field::Title);
        }
        if let Some(content) = patch.content {
            self.document.content = content;
            touched.push(Field::Content);
        }
        if touched.is_empty() {
            return;
        }

        for field in &touched {
            if ignore_auto_save {
                self.ignored.insert(*field);
            } else {
                self.ignored.remove(field);
            }
        }

        if touched.iter().any(|field| !self.ignored.contains(field)) {
            self.debounce_due = Some(now_ms + self.timing.debounce_ms);
        }
    }

    /// Cancel the pending debounce, clear every ignore flag, and save the
    /// raw current document if it differs from the last-saved snapshot.
    pub fn force_save(&mut self) {
        self.debounce_due = None;
        self.ignored.clear();
        if self.document != self.last_saved {
            tracing::debug!("autosave: forced save");
            (self.save)(&self.document);
            self.last_saved = self.document.clone();
        }
    }

    /// Fire any due timer. The debounce and the interval share one
    /// compare-and-save routine, so both firing at the same instant still
    /// produce at most one save. Ticks never clear ignore flags.
    pub fn tick(&mut self, now_ms: u64) {
        if let Some(due) = self.debounce_due
            && now_ms >= due
        {
            self.debounce_due = None;
            self.attempt_save();
        }

        let interval_due = *self
            .interval_due
            .get_or_insert(now_ms + self.timing.interval_ms);
        if now_ms >= interval_due {
            self.interval_due = Some(now_ms + self.timing.interval_ms);
            self.attempt_save();
        }
    }

    /// Build the candidate snapshot (ignored fields rolled back to their
    /// last-saved value) and save it if it differs from the last-saved
    /// snapshot.
    fn attempt_save(&mut self) {
        let candidate = self.candidate();
        if candidate != self.last_saved {
            tracing::debug!("autosave: snapshot changed, saving");
            (self.save)(&candidate);
            self.last_saved = candidate;
        }
    }

    fn candidate(&self) -> EditorDocument {
        let mut doc = self.document.clone();
        if self.ignored.contains(&Field::Title) {
            doc.title.clone_from(&self.last_saved.title);
        }
        if self.ignored.contains(&Field::Content) {
            doc.content.clone_from(&self.last_saved.content);
        }
        doc
    }

    /// The current in-memory document.
    pub const fn document(&self) -> &EditorDocument {
        &self.document
    }

    /// The snapshot most recently handed to the save callback.
    pub const fn last_saved(&self) -> &EditorDocument {
        &self.last_saved
    }

    /// Whether the in-memory document differs from the last-saved one.
    pub fn is_dirty(&self) -> bool {
        self.document != self.last_saved
    }

    pub fn is_ignored(&self, field: Field) -> bool {
        self.ignored.contains(&field)
    }

    /// Earliest pending deadline, used by the event loop to size its poll
    /// timeout. The interval is unarmed until the first tick.
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.debounce_due, self.interval_due) {
            (Some(d), Some(i)) => Some(d.min(i)),
            (deadline, None) | (None, deadline) => deadline,
        }
    }
}
