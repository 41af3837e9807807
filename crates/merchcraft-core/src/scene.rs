//! Ordered collection of placed elements.

use crate::elements::{DesignElement, ElementId, ElementKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// The elements of one designer instance, back to front.
///
/// Insertion order is z-order: the last element added is drawn on top.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    elements: Vec<DesignElement>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element on top and return its id.
    pub fn push(&mut self, element: DesignElement) -> ElementId {
        let id = element.id();
        self.elements.push(element);
        id
    }

    /// Remove an element, keeping the order of the rest.
    pub fn remove(&mut self, id: ElementId) -> Option<DesignElement> {
        let index = self.index_of(id)?;
        Some(self.elements.remove(index))
    }

    /// Get an element by ID.
    pub fn get(&self, id: ElementId) -> Option<&DesignElement> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// Get a mutable reference to an element by ID.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut DesignElement> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// Position of an element in z-order (0 = bottom).
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    /// Check if an element exists.
    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    /// Elements in z-order (back to front).
    pub fn iter(&self) -> impl Iterator<Item = &DesignElement> {
        self.elements.iter()
    }

    /// Element IDs in z-order.
    pub fn ids(&self) -> Vec<ElementId> {
        self.elements.iter().map(DesignElement::id).collect()
    }

    /// Element kinds in z-order.
    pub fn kinds(&self) -> impl Iterator<Item = ElementKind> + '_ {
        self.elements.iter().map(DesignElement::kind)
    }

    /// Topmost element under a canvas point.
    pub fn element_at(&self, point: Point, tolerance: f64) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.hit_test(point, tolerance))
            .map(DesignElement::id)
    }

    /// Count elements of one kind.
    pub fn count(&self, kind: ElementKind) -> usize {
        self.kinds().filter(|k| *k == kind).count()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }
}
