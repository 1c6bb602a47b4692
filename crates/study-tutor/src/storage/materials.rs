//! In-memory material registry
//!
//! Materials live for the process lifetime only. The registry is an
//! explicit object handed to request handlers through shared state, with
//! per-key serialization provided by the map's shard locks.

use dashmap::DashMap;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::{Material, MaterialListItem, MaterialSummary};

/// Registry of uploaded materials keyed by ID
pub struct MaterialStore {
    materials: DashMap<Uuid, Material>,
}

impl MaterialStore {
    pub fn new() -> Self {
        Self {
            materials: DashMap::new(),
        }
    }

    /// Parse a caller-supplied material ID
    ///
    /// An unparseable ID reads the same as an unknown one: the caller
    /// only learns the material is not there.
    pub fn parse_id(id: &str) -> Result<Uuid> {
        Uuid::parse_str(id).map_err(|_| Error::not_found(id))
    }

    /// Register a material, rejecting ID collisions
    pub fn insert(&self, material: Material) -> Result<()> {
        match self.materials.entry(material.id) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                Err(Error::duplicate(material.id.to_string()))
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                tracing::info!(
                    "Stored material {} ({}, {} chars)",
                    material.id,
                    material.raw.format,
                    material.content_length()
                );
                slot.insert(material);
                Ok(())
            }
        }
    }

    /// Fetch a full material by ID
    pub fn get(&self, id: &Uuid) -> Result<Material> {
        self.materials
            .get(id)
            .map(|entry| entry.clone())
            .ok_or_else(|| Error::not_found(id.to_string()))
    }

    /// Extracted text of a material
    pub fn full_text(&self, id: &Uuid) -> Result<String> {
        self.materials
            .get(id)
            .map(|entry| entry.raw.full_text.clone())
            .ok_or_else(|| Error::not_found(id.to_string()))
    }

    /// Summary view of a material
    pub fn summary(&self, id: &Uuid) -> Result<MaterialSummary> {
        self.materials
            .get(id)
            .map(|entry| MaterialSummary::from(entry.value()))
            .ok_or_else(|| Error::not_found(id.to_string()))
    }

    /// Remove a material, returning it
    pub fn remove(&self, id: &Uuid) -> Result<Material> {
        self.materials
            .remove(id)
            .map(|(_, material)| material)
            .ok_or_else(|| Error::not_found(id.to_string()))
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.materials.contains_key(id)
    }

    /// Listing rows for every stored material
    pub fn list_items(&self) -> Vec<MaterialListItem> {
        self.materials
            .iter()
            .map(|entry| MaterialListItem::from(entry.value()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for MaterialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MaterialFormat, RawDocument};

    fn sample_material(id: Uuid) -> Material {
        let raw = RawDocument::new(MaterialFormat::Pdf, "Newton's laws of motion".to_string());
        Material::new(
            id,
            "physics.pdf".to_string(),
            Some("Physics".to_string()),
            raw,
            None,
            "hash".to_string(),
            1024,
        )
    }

    #[test]
    fn test_insert_and_get() {
        let store = MaterialStore::new();
        let id = Uuid::new_v4();
        store.insert(sample_material(id)).unwrap();

        let material = store.get(&id).unwrap();
        assert_eq!(material.file_name, "physics.pdf");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let store = MaterialStore::new();
        let id = Uuid::new_v4();
        store.insert(sample_material(id)).unwrap();

        let err = store.insert(sample_material(id)).unwrap_err();
        assert!(matches!(err, Error::DuplicateMaterial(_)));
        // First copy survives
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_then_get_is_not_found() {
        let store = MaterialStore::new();
        let id = Uuid::new_v4();
        store.insert(sample_material(id)).unwrap();

        store.remove(&id).unwrap();
        assert!(matches!(
            store.get(&id).unwrap_err(),
            Error::MaterialNotFound(_)
        ));
        assert!(matches!(
            store.remove(&id).unwrap_err(),
            Error::MaterialNotFound(_)
        ));
    }

    #[test]
    fn test_parse_id_garbage_reads_as_not_found() {
        let err = MaterialStore::parse_id("not-a-uuid").unwrap_err();
        assert!(matches!(err, Error::MaterialNotFound(_)));
    }

    #[test]
    fn test_list_items_shape() {
        let store = MaterialStore::new();
        let id = Uuid::new_v4();
        store.insert(sample_material(id)).unwrap();

        let items = store.list_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].material_id, id);
        assert_eq!(items[0].file_name, "physics.pdf");
        assert_eq!(items[0].content_length, "Newton's laws of motion".chars().count());
    }
}
