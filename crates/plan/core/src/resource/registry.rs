//! Resource catalog in declared priority order.

use crate::resource::{Resource, ResourceCategory};

/// Every known resource, scanned in registration order.
///
/// Registration order is the preference order: when two resources of the
/// same category both qualify, the earlier one wins.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    resources: Vec<Resource>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, resource: Resource) {
        self.resources.push(resource);
    }

    pub fn with(mut self, resource: Resource) -> Self {
        self.register(resource);
        self
    }

    /// Resources of one category, in registration order.
    pub fn in_category(&self, category: ResourceCategory) -> impl Iterator<Item = &Resource> {
        self.resources
            .iter()
            .filter(move |resource| resource.category == category)
    }

    pub fn get(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|resource| resource.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl FromIterator<Resource> for ResourceRegistry {
    fn from_iter<I: IntoIterator<Item = Resource>>(iter: I) -> Self {
        Self {
            resources: iter.into_iter().collect(),
        }
    }
}
