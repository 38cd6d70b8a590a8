//! Connector catalog: canonical keys to stable connector ids
//!
//! One catalog lives for one generation run and is handed to the module
//! compiler explicitly. Ids are appended monotonically and never removed, so
//! every module compiled against the same catalog agrees on what a given
//! boundary shape is called.

use crate::connector::cross_section::CrossSection;
use crate::connector::id::{BaseId, Connector, FlipClass, HorizontalForm};
use crate::io::configuration::WATER_LEVEL;
use crate::io::error::Result;
use crate::spatial::Direction;
use log::debug;
use std::collections::HashMap;

/// First horizontal index not taken by a built-in connector
const FIRST_HORIZONTAL_INDEX: u32 = 3;
/// First vertical index not taken by a built-in connector
const FIRST_VERTICAL_INDEX: u32 = 2;

/// Registered vertical shape
#[derive(Debug, Clone, Copy)]
enum VerticalEntry {
    Symmetric(BaseId),
    Oriented(BaseId, FlipClass),
}

impl VerticalEntry {
    /// Connector for a shape matching this entry after `rotation` quarter turns
    const fn at_rotation(self, rotation: u8) -> Connector {
        match self {
            Self::Symmetric(base) => Connector::vertical_symmetric(base),
            Self::Oriented(base, flip) => Connector::vertical_oriented(base, flip, rotation),
        }
    }
}

/// Growing table of known boundary shapes
///
/// Seeded with the built-in connectors: `EMPTY` (reserved, no shape), `FULL`
/// (the unit square), `FLAT` (lower half) and `WATER` (up to the water level).
#[derive(Debug, Clone)]
pub struct ConnectorCatalog {
    horizontal: HashMap<String, Connector>,
    vertical: HashMap<String, VerticalEntry>,
    next_horizontal: u32,
    next_vertical: u32,
}

impl Default for ConnectorCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectorCatalog {
    /// Create a catalog holding only the built-in connectors
    pub fn new() -> Self {
        let mut horizontal = HashMap::new();
        let mut vertical = HashMap::new();

        let full = CrossSection::rectangle(-0.5, -0.5, 0.5, 0.5).canonical_key();
        horizontal.insert(full.clone(), Connector::FULL_HORIZONTAL);
        vertical.insert(full, VerticalEntry::Symmetric(BaseId::Numbered(1)));

        let flat = CrossSection::rectangle(-0.5, -0.5, 0.5, 0.0).canonical_key();
        horizontal.insert(flat, Connector::FLAT_HORIZONTAL);

        let water = CrossSection::rectangle(-0.5, -0.5, 0.5, -0.5 + WATER_LEVEL).canonical_key();
        horizontal.insert(water, Connector::WATER_HORIZONTAL);

        Self {
            horizontal,
            vertical,
            next_horizontal: FIRST_HORIZONTAL_INDEX,
            next_vertical: FIRST_VERTICAL_INDEX,
        }
    }

    /// Number of registered horizontal shapes, built-ins included
    pub fn horizontal_shape_count(&self) -> usize {
        self.horizontal.len()
    }

    /// Number of registered vertical shapes, built-ins and mirror forms included
    pub fn vertical_shape_count(&self) -> usize {
        self.vertical.len()
    }

    /// Resolve a face cross-section, choosing the family from the face direction
    ///
    /// # Errors
    ///
    /// Returns an error if the cross-section is empty or malformed
    pub fn connector_for(
        &mut self,
        direction: Direction,
        section: &CrossSection,
    ) -> Result<Connector> {
        if direction.is_vertical() {
            self.vertical(section)
        } else {
            self.horizontal(section)
        }
    }

    /// Resolve a cross-section of a ±X or ±Z face
    ///
    /// Lookup order: exact key, then the mirror image (returned with the `f`
    /// form), then a new id that is symmetric when the shape equals its mirror.
    ///
    /// # Errors
    ///
    /// Returns an error if the cross-section is empty or malformed
    pub fn horizontal(&mut self, section: &CrossSection) -> Result<Connector> {
        section.validate()?;

        let key = section.canonical_key();
        if let Some(&connector) = self.horizontal.get(&key) {
            return Ok(connector);
        }

        let mirrored_key = section.mirrored().canonical_key();
        if let Some(&connector) = self.horizontal.get(&mirrored_key) {
            return Ok(connector.mirrored());
        }

        let base = BaseId::Numbered(self.next_horizontal);
        self.next_horizontal += 1;
        let form = if key == mirrored_key {
            HorizontalForm::Symmetric
        } else {
            HorizontalForm::Plain
        };
        let connector = Connector::horizontal(base, form);
        debug!("catalog: registered horizontal connector {connector} for {key}");
        self.horizontal.insert(key, connector);
        Ok(connector)
    }

    /// Resolve a cross-section of a ±Y face
    ///
    /// The shape is tried at each quarter turn and the first registered match
    /// wins, carrying the number of turns as its rotation class. Unknown
    /// shapes get a new id whose flip class records how the mirror image
    /// relates to the shape's own rotations. A mirror image that is none of
    /// the rotations is registered alongside: as the `f` form, or under the
    /// same id for a quarter-turn symmetric shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the cross-section is empty or malformed
    pub fn vertical(&mut self, section: &CrossSection) -> Result<Connector> {
        section.validate()?;

        let quarter = section.rotated();
        let half = quarter.rotated();
        let three_quarter = half.rotated();
        let keys = [
            section.canonical_key(),
            quarter.canonical_key(),
            half.canonical_key(),
            three_quarter.canonical_key(),
        ];

        for (rotation, key) in (0u8..).zip(keys.iter()) {
            if let Some(entry) = self.vertical.get(key) {
                return Ok(entry.at_rotation(rotation));
            }
        }

        let mirrored_key = section.mirrored().canonical_key();
        let mirror_is_rotation = keys.contains(&mirrored_key);
        let [key0, key1, key2, _] = keys;
        let base = BaseId::Numbered(self.next_vertical);
        self.next_vertical += 1;

        if key0 == key1 {
            debug!("catalog: registered symmetric vertical connector v{base}s for {key0}");
            if !mirror_is_rotation {
                self.vertical
                    .entry(mirrored_key)
                    .or_insert(VerticalEntry::Symmetric(base));
            }
            self.vertical.insert(key0, VerticalEntry::Symmetric(base));
            return Ok(Connector::vertical_symmetric(base));
        }

        let flip = if mirrored_key == key0 {
            FlipClass::MirrorX
        } else if mirrored_key == key2 {
            FlipClass::MirrorY
        } else {
            FlipClass::Plain
        };

        if !mirror_is_rotation {
            self.vertical
                .entry(mirrored_key)
                .or_insert(VerticalEntry::Oriented(base, FlipClass::Mirrored));
        }

        let connector = Connector::vertical_oriented(base, flip, 0);
        debug!("catalog: registered vertical connector {connector} for {key0}");
        self.vertical.insert(key0, VerticalEntry::Oriented(base, flip));
        Ok(connector)
    }
}
