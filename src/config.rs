//! Drawing policy: node size and spacing.

use serde::Deserialize;

use crate::error::{DrawingError, Result};

/// Every node has unit diameter.
pub const DEFAULT_NODE_RADIUS: f64 = 0.5;

/// Center-to-center spacing between nodes on the same level: two diameters.
pub const DEFAULT_MIN_SEPARATION: f64 = 4.0 * DEFAULT_NODE_RADIUS;

/// Spacing between consecutive levels.
pub const DEFAULT_VERTICAL_SPACING: f64 = 2.0;

/// Configuration for a tree drawing.
///
/// Deserializes from a JS object with camelCase keys; missing keys take the
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DrawingConfig {
    /// Radius shared by every node in the tree.
    pub node_radius: f64,
    /// Minimum horizontal distance between two nodes on the same level.
    pub min_separation: f64,
    /// Vertical distance between a node and its children.
    pub vertical_spacing: f64,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            node_radius: DEFAULT_NODE_RADIUS,
            min_separation: DEFAULT_MIN_SEPARATION,
            vertical_spacing: DEFAULT_VERTICAL_SPACING,
        }
    }
}

impl DrawingConfig {
    pub fn with_node_radius(mut self, node_radius: f64) -> Self {
        self.node_radius = node_radius;
        self
    }

    pub fn with_min_separation(mut self, min_separation: f64) -> Self {
        self.min_separation = min_separation;
        self
    }

    pub fn with_vertical_spacing(mut self, vertical_spacing: f64) -> Self {
        self.vertical_spacing = vertical_spacing;
        self
    }

    /// Diameter of a node.
    #[inline]
    pub fn node_diameter(&self) -> f64 {
        2.0 * self.node_radius
    }

    /// Check that every distance is usable and that nodes on one level
    /// cannot overlap.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("node radius", self.node_radius),
            ("minimum separation", self.min_separation),
            ("vertical spacing", self.vertical_spacing),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DrawingError::InvalidSpacing { field, value });
            }
        }

        if self.min_separation < self.node_diameter() {
            return Err(DrawingError::SeparationTooSmall {
                separation: self.min_separation,
                diameter: self.node_diameter(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = DrawingConfig::default();
        assert_eq!(config.node_diameter(), 1.0);
        assert_eq!(config.min_separation, 2.0 * config.node_diameter());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_values() {
        let config = DrawingConfig::default().with_vertical_spacing(0.0);
        assert_eq!(
            config.validate(),
            Err(DrawingError::InvalidSpacing {
                field: "vertical spacing",
                value: 0.0
            })
        );

        let config = DrawingConfig::default().with_node_radius(f64::NAN);
        assert!(matches!(
            config.validate(),
            Err(DrawingError::InvalidSpacing { field: "node radius", .. })
        ));
    }

    #[test]
    fn test_rejects_overlapping_separation() {
        let config = DrawingConfig::default()
            .with_node_radius(2.0)
            .with_min_separation(3.0);
        assert_eq!(
            config.validate(),
            Err(DrawingError::SeparationTooSmall {
                separation: 3.0,
                diameter: 4.0
            })
        );
    }
}
