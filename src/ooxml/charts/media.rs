//! Image registration for picture fills.
//!
//! The package layer owns image parts; charts only hand over bytes and get
//! back a stable id, which becomes the `r:embed` relationship id `rId<n>`.

use sha2::{Digest, Sha512};
use std::collections::HashMap;

/// Collaborator that stores embedded images.
pub trait MediaRegistry {
    /// Register an image and return its stable id. Registering identical
    /// bytes twice may return the same id.
    fn register_blip(&mut self, image: &[u8]) -> u32;
}

/// In-memory registry that deduplicates identical images.
#[derive(Debug, Default)]
pub struct MediaStore {
    images: Vec<Vec<u8>>,
    by_digest: HashMap<Vec<u8>, u32>,
}

impl MediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct images stored.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Image bytes for an id handed out by [`MediaRegistry::register_blip`].
    pub fn image(&self, id: u32) -> Option<&[u8]> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.images.get(index).map(Vec::as_slice)
    }
}

impl MediaRegistry for MediaStore {
    fn register_blip(&mut self, image: &[u8]) -> u32 {
        let digest = Sha512::digest(image).to_vec();
        if let Some(id) = self.by_digest.get(&digest) {
            return *id;
        }
        self.images.push(image.to_vec());
        let id = self.images.len() as u32;
        self.by_digest.insert(digest, id);
        id
    }
}

/// Relationship id for a registered blip.
#[inline]
pub fn relationship_id(id: u32) -> String {
    format!("rId{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_images_share_an_id() {
        let mut store = MediaStore::new();
        let a = store.register_blip(b"png-a");
        let b = store.register_blip(b"png-b");
        assert_eq!(store.register_blip(b"png-a"), a);
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
        assert_eq!(store.image(b), Some(&b"png-b"[..]));
        assert_eq!(store.image(0), None);
        assert_eq!(relationship_id(a), "rId1");
    }
}
