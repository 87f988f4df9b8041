use std::cell::RefCell;

use hashbrown::HashMap;

use crate::font::{Font, FontFace, FontSource};

/// Fallback source backed by the system font database.
///
/// Faces are loaded lazily and cached per database ID. Not internally
/// synchronized; shaping is single-threaded and callers sharing a source
/// across threads must serialize externally.
pub struct SystemFontSource {
    db: fontdb::Database,
    faces: RefCell<HashMap<fontdb::ID, Option<FontFace>>>,
}

impl SystemFontSource {
    pub fn new() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::debug!("system font database loaded with {} faces", db.len());
        Self {
            db,
            faces: RefCell::new(HashMap::new()),
        }
    }

    /// A source over an explicit database, e.g. one restricted to bundled
    /// fonts.
    pub fn with_database(db: fontdb::Database) -> Self {
        Self {
            db,
            faces: RefCell::new(HashMap::new()),
        }
    }

    fn face_for(&self, id: fontdb::ID) -> Option<FontFace> {
        if let Some(cached) = self.faces.borrow().get(&id) {
            return cached.clone();
        }

        let loaded = self
            .db
            .with_face_data(id, |data, index| {
                FontFace::from_vec(data.to_vec(), index as usize).ok()
            })
            .flatten();

        self.faces.borrow_mut().insert(id, loaded.clone());
        loaded
    }
}

impl Default for SystemFontSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FontSource for SystemFontSource {
    fn find_substitute(&self, font: &Font, text: &str, _language: &str) -> Option<Font> {
        let ids: Vec<fontdb::ID> = self.db.faces().map(|info| info.id).collect();

        for id in ids {
            let Some(face) = self.face_for(id) else {
                continue;
            };
            if text.chars().all(|c| face.can_render(c)) {
                return Some(
                    Font::named(font.family(), font.size())
                        .with_face(face),
                );
            }
        }

        log::debug!("no fallback face covers {text:?}");
        None
    }
}
