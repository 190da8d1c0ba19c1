//! Keyed entity tables with link-only merging

use roast_domain::{Linked, Links};
use std::collections::HashMap;

/// Merge a later sighting into an existing entity
///
/// Only links are added; every other attribute keeps its first-seen value.
pub fn merge<E: Linked>(existing: &mut E, incoming: Links) {
    existing.links_mut().absorb(incoming);
}

/// Entities of one type keyed by natural key, in first-seen order
#[derive(Debug, Clone)]
pub struct EntityTable<E> {
    entities: Vec<E>,
    index: HashMap<String, usize>,
}

impl<E> Default for EntityTable<E> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<E: Linked> EntityTable<E> {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or extend the entity for `key`
    ///
    /// On first sight `build` materializes the entity; on later sightings it
    /// is not called. Either way `links` are merged in. Returns whether the
    /// entity was new.
    pub fn upsert<F, Err>(&mut self, key: &str, links: Links, build: F) -> Result<bool, Err>
    where
        F: FnOnce() -> Result<E, Err>,
    {
        if let Some(&idx) = self.index.get(key) {
            merge(&mut self.entities[idx], links);
            return Ok(false);
        }

        let mut entity = build()?;
        merge(&mut entity, links);
        self.index.insert(key.to_string(), self.entities.len());
        self.entities.push(entity);
        Ok(true)
    }

    /// Get the entity for `key`
    pub fn get(&self, key: &str) -> Option<&E> {
        self.index.get(key).map(|&idx| &self.entities[idx])
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Flatten into a list in first-seen order
    pub fn into_entities(self) -> Vec<E> {
        self.entities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roast_domain::ObjectId;

    #[derive(Debug)]
    struct Thing {
        value: u32,
        links: Links,
    }

    impl Linked for Thing {
        fn links(&self) -> &Links {
            &self.links
        }

        fn links_mut(&mut self) -> &mut Links {
            &mut self.links
        }
    }

    fn id(s: &str) -> ObjectId {
        ObjectId::digest(s, None)
    }

    fn thing(value: u32) -> Result<Thing, String> {
        Ok(Thing {
            value,
            links: Links::new(),
        })
    }

    #[test]
    fn test_first_write_wins() {
        let mut table = EntityTable::new();

        let created = table
            .upsert("a", Links::new().with_study("s1", id("s1")), || thing(1))
            .unwrap();
        assert!(created);

        let created = table
            .upsert("a", Links::new().with_study("s2", id("s2")), || thing(2))
            .unwrap();
        assert!(!created);

        let entity = table.get("a").unwrap();
        assert_eq!(entity.value, 1);
        assert_eq!(entity.links.studies.len(), 2);
    }

    #[test]
    fn test_build_not_called_for_known_key() {
        let mut table = EntityTable::new();
        table.upsert("a", Links::new(), || thing(1)).unwrap();

        let result: Result<bool, String> =
            table.upsert("a", Links::new(), || panic!("build called twice"));
        assert_eq!(result, Ok(false));
    }

    #[test]
    fn test_build_error_leaves_table_unchanged() {
        let mut table: EntityTable<Thing> = EntityTable::new();
        let result = table.upsert("a", Links::new(), || Err("boom".to_string()));

        assert_eq!(result, Err("boom".to_string()));
        assert!(table.is_empty());
    }

    #[test]
    fn test_first_seen_order() {
        let mut table = EntityTable::new();
        for (key, value) in [("b", 1), ("a", 2), ("b", 3), ("c", 4)] {
            table.upsert(key, Links::new(), || thing(value)).unwrap();
        }

        let values: Vec<_> = table.into_entities().iter().map(|t| t.value).collect();
        assert_eq!(values, vec![1, 2, 4]);
    }

    #[test]
    fn test_merge_keeps_existing_link_ids() {
        let mut entity = thing(1).unwrap();
        entity.links = Links::new().with_company("c", id("first"));

        merge(&mut entity, Links::new().with_company("c", id("second")));
        assert_eq!(entity.links.companies["c"], id("first"));
    }
}
