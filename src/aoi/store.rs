use super::schema::{Aoi, AoiPatch, NewAoi, Polygon};
use crate::db::kv;
use rusqlite::Connection;
use time::OffsetDateTime;
use tracing::{error, info};
use uuid::Uuid;

const STORAGE_KEY: &str = "aois";

type Observer = Box<dyn Fn(&[Aoi])>;

/// The single authoritative owner of the AOI collection.
///
/// All mutations happen synchronously on one thread: mutate in memory, write
/// the whole collection through to the kv layer, then notify observers.
/// Persistence failures are logged and swallowed, the in-memory state stays
/// authoritative for the running process.
///
/// Selection and the show-all flag are ephemeral view state and are never
/// persisted.
pub struct AoiStore {
    conn: Connection,
    aois: Vec<Aoi>,
    selected_id: Option<String>,
    show_all: bool,
    observers: Vec<Observer>,
}

impl AoiStore {
    /// Opens the store, loading any persisted collection. Corrupt or
    /// unreadable persisted state is non-fatal: the store logs and starts
    /// empty rather than blocking startup.
    pub fn open(conn: Connection) -> Self {
        let aois = load(&conn);
        info!(count = aois.len(), "Loaded AOIs");
        AoiStore {
            conn,
            aois,
            selected_id: None,
            show_all: true,
            observers: Vec::new(),
        }
    }

    /// Registers an observer invoked with the full collection after every
    /// mutation.
    pub fn subscribe(&mut self, observer: impl Fn(&[Aoi]) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Creates an AOI from the supplied fields, assigning a fresh id and
    /// `created_at`, and returns the stored record.
    pub fn add(&mut self, new_aoi: NewAoi) -> Aoi {
        let aoi = Aoi {
            id: Uuid::new_v4().to_string(),
            name: new_aoi.name,
            description: new_aoi.description,
            geometry: new_aoi.geometry,
            created_at: OffsetDateTime::now_utc(),
            updated_at: None,
            properties: new_aoi.properties,
        };
        self.aois.push(aoi.clone());
        self.persist();
        self.notify();
        aoi
    }

    /// Wraps a polygon completed by the drawing collaborator into an `add`
    /// with a timestamp-based placeholder name.
    pub fn add_drawn(&mut self, geometry: Polygon) -> Aoi {
        let now = OffsetDateTime::now_utc();
        let name = format!(
            "AOI {:02}:{:02}:{:02}",
            now.hour(),
            now.minute(),
            now.second()
        );
        self.add(NewAoi::new(name, geometry))
    }

    /// Merges the patch into the record with the given id and stamps a new
    /// `updated_at`. Unknown ids are a silent no-op.
    pub fn update(&mut self, id: &str, patch: AoiPatch) {
        let Some(aoi) = self.aois.iter_mut().find(|it| it.id == id) else {
            return;
        };
        if let Some(name) = patch.name {
            aoi.name = name;
        }
        if let Some(description) = patch.description {
            aoi.description = Some(description);
        }
        if let Some(geometry) = patch.geometry {
            aoi.geometry = geometry;
        }
        if let Some(properties) = patch.properties {
            aoi.properties = Some(properties);
        }
        aoi.updated_at = Some(OffsetDateTime::now_utc());
        self.persist();
        self.notify();
    }

    /// Removes the record with the given id, clearing selection if it was
    /// selected. Unknown ids are a silent no-op.
    pub fn delete(&mut self, id: &str) {
        let len_before = self.aois.len();
        self.aois.retain(|it| it.id != id);
        if self.aois.len() == len_before {
            return;
        }
        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = None;
        }
        self.persist();
        self.notify();
    }

    /// Empties the collection and clears selection.
    pub fn clear_all(&mut self) {
        self.aois.clear();
        self.selected_id = None;
        self.persist();
        self.notify();
    }

    /// Sets the selection pointer. The id is not validated: selecting a
    /// nonexistent id simply yields no visible match.
    pub fn select(&mut self, id: Option<String>) {
        self.selected_id = id;
    }

    pub fn set_show_all(&mut self, show_all: bool) {
        self.show_all = show_all;
    }

    pub fn aois(&self) -> &[Aoi] {
        &self.aois
    }

    pub fn selected(&self) -> Option<&Aoi> {
        let id = self.selected_id.as_deref()?;
        self.aois.iter().find(|it| it.id == id)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    /// AOIs the map should currently render. The show-all flag supersedes
    /// selection; with it off, only the selected AOI (if any) is visible.
    pub fn visible(&self) -> Vec<&Aoi> {
        let mut res: Vec<&Aoi> = if self.show_all {
            self.aois.iter().collect()
        } else {
            self.selected().into_iter().collect()
        };
        res.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        res
    }

    /// Read-only derived view: case-insensitive substring match against name
    /// and description, newest first.
    pub fn filter(&self, query: &str) -> Vec<&Aoi> {
        let query = query.to_lowercase();
        let mut res: Vec<&Aoi> = self
            .aois
            .iter()
            .filter(|it| {
                it.name.to_lowercase().contains(&query)
                    || it
                        .description
                        .as_ref()
                        .is_some_and(|d| d.to_lowercase().contains(&query))
            })
            .collect();
        res.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        res
    }

    fn persist(&self) {
        let json = match serde_json::to_string(&self.aois) {
            Ok(json) => json,
            Err(e) => {
                error!(error = e.to_string(), "Failed to serialize AOIs");
                return;
            }
        };
        if let Err(e) = kv::put(STORAGE_KEY, &json, &self.conn) {
            error!(error = e.to_string(), "Failed to persist AOIs");
        }
    }

    fn notify(&self) {
        for observer in &self.observers {
            observer(&self.aois);
        }
    }
}

fn load(conn: &Connection) -> Vec<Aoi> {
    let json = match kv::get(STORAGE_KEY, conn) {
        Ok(Some(json)) => json,
        Ok(None) => return Vec::new(),
        Err(e) => {
            error!(error = e.to_string(), "Failed to read persisted AOIs");
            return Vec::new();
        }
    };
    match serde_json::from_str(&json) {
        Ok(aois) => aois,
        Err(e) => {
            error!(error = e.to_string(), "Failed to parse persisted AOIs");
            Vec::new()
        }
    }
}
