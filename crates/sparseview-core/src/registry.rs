//! Structure registry for managing registered structures.

use std::collections::HashMap;

use crate::error::{Result, SparseviewError};
use crate::structure::Structure;

/// Registry for managing all structures in the scene.
///
/// Structures are organized by type name and then by instance name.
#[derive(Default)]
pub struct Registry {
    /// Map from type name -> (instance name -> structure)
    structures: HashMap<String, HashMap<String, Box<dyn Structure>>>,
}

impl Registry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a structure with the registry.
    ///
    /// Returns an error if a structure with the same type and name already exists.
    pub fn register(&mut self, structure: Box<dyn Structure>) -> Result<()> {
        let type_name = structure.type_name().to_string();
        let name = structure.name().to_string();

        let type_map = self.structures.entry(type_name).or_default();

        if type_map.contains_key(&name) {
            return Err(SparseviewError::StructureExists(name));
        }

        type_map.insert(name, structure);
        Ok(())
    }

    /// Gets a reference to a structure by type and name.
    pub fn get(&self, type_name: &str, name: &str) -> Option<&dyn Structure> {
        self.structures
            .get(type_name)
            .and_then(|m| m.get(name))
            .map(|s| s.as_ref())
    }

    /// Gets a mutable reference to a structure by type and name.
    pub fn get_mut(&mut self, type_name: &str, name: &str) -> Option<&mut Box<dyn Structure>> {
        self.structures.get_mut(type_name)?.get_mut(name)
    }

    /// Checks if a structure with the given type and name exists.
    pub fn contains(&self, type_name: &str, name: &str) -> bool {
        self.structures
            .get(type_name)
            .is_some_and(|m| m.contains_key(name))
    }

    /// Removes a structure by type and name.
    pub fn remove(&mut self, type_name: &str, name: &str) -> Option<Box<dyn Structure>> {
        self.structures
            .get_mut(type_name)
            .and_then(|m| m.remove(name))
    }

    /// Removes all structures of a given type.
    pub fn remove_all_of_type(&mut self, type_name: &str) {
        self.structures.remove(type_name);
    }

    /// Removes all structures from the registry.
    pub fn clear(&mut self) {
        self.structures.clear();
    }

    /// Returns an iterator over all structures.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Structure> {
        self.structures
            .values()
            .flat_map(|m| m.values())
            .map(|s| s.as_ref())
    }

    /// Returns a mutable iterator over all structures.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Structure>> + '_ {
        self.structures.values_mut().flat_map(|m| m.values_mut())
    }

    /// Returns the total number of registered structures.
    pub fn len(&self) -> usize {
        self.structures.values().map(|m| m.len()).sum()
    }

    /// Returns true if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.structures.values().all(|m| m.is_empty())
    }

    /// Returns all structures of a given type.
    pub fn get_all_of_type(&self, type_name: &str) -> impl Iterator<Item = &dyn Structure> {
        self.structures
            .get(type_name)
            .into_iter()
            .flat_map(|m| m.values())
            .map(|s| s.as_ref())
    }

    /// Returns the number of structures of a given type.
    pub fn count_of_type(&self, type_name: &str) -> usize {
        self.structures.get(type_name).map_or(0, HashMap::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3};

    struct Dummy {
        name: String,
        enabled: bool,
        transform: Mat4,
    }

    impl Dummy {
        fn boxed(name: &str) -> Box<dyn Structure> {
            Box::new(Self {
                name: name.to_string(),
                enabled: true,
                transform: Mat4::IDENTITY,
            })
        }
    }

    impl Structure for Dummy {
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
        fn name(&self) -> &str {
            &self.name
        }
        fn type_name(&self) -> &'static str {
            "Dummy"
        }
        fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
            None
        }
        fn length_scale(&self) -> f32 {
            1.0
        }
        fn transform(&self) -> Mat4 {
            self.transform
        }
        fn set_transform(&mut self, transform: Mat4) {
            self.transform = transform;
        }
        fn is_enabled(&self) -> bool {
            self.enabled
        }
        fn set_enabled(&mut self, enabled: bool) {
            self.enabled = enabled;
        }
        fn refresh(&mut self) {}
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = Registry::new();
        registry.register(Dummy::boxed("a")).unwrap();
        registry.register(Dummy::boxed("b")).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("Dummy", "a"));
        assert!(registry.get("Dummy", "b").is_some());
        assert!(registry.get("Dummy", "c").is_none());
        assert_eq!(registry.count_of_type("Dummy"), 2);
        assert_eq!(registry.count_of_type("Other"), 0);
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut registry = Registry::new();
        registry.register(Dummy::boxed("a")).unwrap();
        let err = registry.register(Dummy::boxed("a")).unwrap_err();
        assert!(matches!(err, SparseviewError::StructureExists(_)));
    }

    #[test]
    fn remove_all_of_type_empties_registry() {
        let mut registry = Registry::new();
        registry.register(Dummy::boxed("a")).unwrap();
        registry.register(Dummy::boxed("b")).unwrap();
        registry.remove_all_of_type("Dummy");
        assert!(registry.is_empty());
        // removing an absent type is a no-op
        registry.remove_all_of_type("Dummy");
        assert_eq!(registry.len(), 0);
    }
}
