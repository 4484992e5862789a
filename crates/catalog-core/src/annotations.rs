//! Sticky note annotations keyed by book position
//!
//! The store is the single owner of the notes. Every mutation rewrites the
//! whole snapshot to storage before returning; edits that reference a page or
//! id that no longer exists are ignored.

use crate::Result;
use crate::constants::{DEFAULT_STICKY_COLOR, STICKY_ID_PREFIX, STICKY_STORAGE_KEY};
use crate::storage::Storage;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

/// A positioned text note on one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickyNote {
    pub id: String,
    /// Offset from the left edge of the page, in pixels
    pub x: f32,
    /// Offset from the top edge of the page, in pixels
    pub y: f32,
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    DEFAULT_STICKY_COLOR.to_string()
}

/// Page number -> notes in creation order
pub type StickySnapshot = BTreeMap<u32, Vec<StickyNote>>;

pub struct AnnotationStore {
    notes: StickySnapshot,
    next_id: u64,
    storage: Arc<dyn Storage>,
}

impl AnnotationStore {
    /// Load the persisted snapshot; corrupt or missing data starts empty
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let notes = match storage.get(STICKY_STORAGE_KEY) {
            Ok(Some(json)) => parse_snapshot(&json).unwrap_or_else(|e| {
                log::warn!("Discarding unreadable sticky notes: {}", e);
                StickySnapshot::new()
            }),
            Ok(None) => StickySnapshot::new(),
            Err(e) => {
                log::warn!("Failed to read sticky notes: {}", e);
                StickySnapshot::new()
            }
        };
        let (notes, next_id) = match next_id_after(&notes) {
            Some(next_id) => (notes, next_id),
            None => {
                log::warn!("Discarding sticky notes with exhausted id counter");
                (StickySnapshot::new(), 0)
            }
        };

        Self {
            notes,
            next_id,
            storage,
        }
    }

    /// Counter value the next note will receive
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.notes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn notes_for(&self, page: u32) -> &[StickyNote] {
        self.notes.get(&page).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn find(&self, page: u32, id: &str) -> Option<&StickyNote> {
        self.notes_for(page).iter().find(|n| n.id == id)
    }

    /// Every note, ordered by page and then by creation
    pub fn list_all(&self) -> Vec<(u32, &StickyNote)> {
        self.notes
            .iter()
            .flat_map(|(page, notes)| notes.iter().map(move |note| (*page, note)))
            .collect()
    }

    /// Add an empty note in the default color
    pub fn add(&mut self, page: u32, x: f32, y: f32) -> String {
        self.add_with(page, x, y, "", DEFAULT_STICKY_COLOR)
    }

    pub fn add_with(
        &mut self,
        page: u32,
        x: f32,
        y: f32,
        text: impl Into<String>,
        color: impl Into<String>,
    ) -> String {
        let id = format!("{}{}", STICKY_ID_PREFIX, self.next_id);

        self.notes.entry(page).or_default().push(StickyNote {
            id: id.clone(),
            x,
            y,
            text: text.into(),
            color: color.into(),
        });
        self.next_id = match self.next_id.checked_add(1) {
            Some(next_id) => next_id,
            None => {
                log::warn!("Sticky note id counter exhausted, reusing free ids");
                lowest_free_id(&self.notes)
            }
        };
        self.persist();
        id
    }

    pub fn update_text(&mut self, page: u32, id: &str, text: impl Into<String>) {
        let text = text.into();
        self.mutate(page, id, |note| note.text = text);
    }

    pub fn update_color(&mut self, page: u32, id: &str, color: impl Into<String>) {
        let color = color.into();
        self.mutate(page, id, |note| note.color = color);
    }

    pub fn update_position(&mut self, page: u32, id: &str, x: f32, y: f32) {
        self.mutate(page, id, |note| {
            note.x = x;
            note.y = y;
        });
    }

    pub fn delete(&mut self, page: u32, id: &str) {
        let Some(notes) = self.notes.get_mut(&page) else {
            return;
        };
        let before = notes.len();
        notes.retain(|n| n.id != id);
        if notes.len() == before {
            return;
        }
        if notes.is_empty() {
            self.notes.remove(&page);
        }
        self.persist();
    }

    /// Serialized form: `{"3": [{"id": .., "x": .., "y": .., "text": .., "color": ..}]}`
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.notes)?)
    }

    fn mutate(&mut self, page: u32, id: &str, apply: impl FnOnce(&mut StickyNote)) {
        let Some(note) = self
            .notes
            .get_mut(&page)
            .and_then(|notes| notes.iter_mut().find(|n| n.id == id))
        else {
            return;
        };
        apply(note);
        self.persist();
    }

    fn persist(&self) {
        let result = self
            .to_json()
            .and_then(|json| self.storage.set(STICKY_STORAGE_KEY, &json));
        if let Err(e) = result {
            log::warn!("Failed to save sticky notes: {}", e);
        }
    }
}

pub fn parse_snapshot(json: &str) -> Result<StickySnapshot> {
    Ok(serde_json::from_str(json)?)
}

/// One past the highest numeric id suffix, 0 for an empty snapshot.
/// `None` when the highest suffix is already `u64::MAX`.
fn next_id_after(notes: &StickySnapshot) -> Option<u64> {
    match notes
        .values()
        .flatten()
        .filter_map(|note| id_number(&note.id))
        .max()
    {
        Some(max) => max.checked_add(1),
        None => Some(0),
    }
}

/// Smallest numeric suffix no note uses
fn lowest_free_id(notes: &StickySnapshot) -> u64 {
    let used: BTreeSet<u64> = notes
        .values()
        .flatten()
        .filter_map(|note| id_number(&note.id))
        .collect();
    (0..=u64::MAX).find(|n| !used.contains(n)).unwrap_or(0)
}

fn id_number(id: &str) -> Option<u64> {
    let digits_start = id
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    id[digits_start..].parse().ok()
}

/// Tracks which notes already have an on-screen element per page
#[derive(Debug, Default)]
pub struct StickyLayer {
    rendered: HashMap<u32, BTreeSet<String>>,
}

impl StickyLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sync a page with its notes.
    ///
    /// Returns the notes that still need an element; ids that disappeared
    /// from the page are dropped from the rendered set.
    pub fn render_page<'a>(&mut self, page: u32, notes: &'a [StickyNote]) -> Vec<&'a StickyNote> {
        let rendered = self.rendered.entry(page).or_default();
        rendered.retain(|id| notes.iter().any(|n| &n.id == id));

        notes
            .iter()
            .filter(|note| rendered.insert(note.id.clone()))
            .collect()
    }

    pub fn is_rendered(&self, page: u32, id: &str) -> bool {
        self.rendered
            .get(&page)
            .is_some_and(|ids| ids.contains(id))
    }
}

// =============================================================================
// Tests
// =============================================================================
