//! Connector identifiers and their compatibility rules
//!
//! A connector names the boundary shape exposed on one face of a module
//! subcell. Horizontal faces (±X, ±Z) and vertical faces (±Y) use disjoint
//! families with different symmetry bookkeeping:
//!
//! - `h<base>` plain, `h<base>s` self-symmetric, `h<base>f` mirrored
//! - `v<base>s` symmetric, `v<base><tag>-<r>` oriented with rotation class
//!   `r` in `0..4` and flip-class tag `tag` in {``, `f`, `x`, `y`}
//!
//! The base is a catalog index, or `w` for the built-in water level.

use crate::io::error::{AlgorithmError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Catalog base identifier shared by all forms of one shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BaseId {
    /// Index allocated by the catalog
    Numbered(u32),
    /// Built-in water surface level
    Water,
}

impl fmt::Display for BaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numbered(index) => write!(f, "{index}"),
            Self::Water => f.write_str("w"),
        }
    }
}

/// Mirror bookkeeping of a horizontal connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HorizontalForm {
    /// Registered orientation of an asymmetric shape
    Plain,
    /// Shape equal to its own mirror image (`s`)
    Symmetric,
    /// Mirror image of the registered shape (`f`)
    Mirrored,
}

/// Flip-class tag of an oriented vertical connector
///
/// Records how the registered shape relates to its mirror image, which
/// decides how the rotation class changes when a module is flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FlipClass {
    /// Mirror image is a distinct registered shape (no tag)
    Plain,
    /// This is the mirror image of a plain shape (`f`)
    Mirrored,
    /// Mirror image equals the shape at rotation 0 (`x`)
    MirrorX,
    /// Mirror image equals the shape at rotation 2 (`y`)
    MirrorY,
}

/// Rotation bookkeeping of a vertical connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VerticalClass {
    /// Shape invariant under quarter turns (`s`)
    Symmetric,
    /// Shape with a rotation class
    Oriented {
        /// Relation to the mirror image
        flip: FlipClass,
        /// Quarter turns from the registered orientation, in `0..4`
        rotation: u8,
    },
}

/// Canonical identifier of a face's boundary shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Connector {
    /// Connector on a ±X or ±Z face
    Horizontal {
        /// Catalog base id
        base: BaseId,
        /// Mirror bookkeeping
        form: HorizontalForm,
    },
    /// Connector on a ±Y face
    Vertical {
        /// Catalog base id
        base: BaseId,
        /// Rotation bookkeeping
        class: VerticalClass,
    },
}

impl Connector {
    /// Horizontal face with no geometry (`h0s`)
    pub const EMPTY_HORIZONTAL: Self =
        Self::horizontal(BaseId::Numbered(0), HorizontalForm::Symmetric);
    /// Vertical face with no geometry (`v0s`)
    pub const EMPTY_VERTICAL: Self = Self::vertical_symmetric(BaseId::Numbered(0));
    /// Horizontal face covered entirely (`h1s`)
    pub const FULL_HORIZONTAL: Self =
        Self::horizontal(BaseId::Numbered(1), HorizontalForm::Symmetric);
    /// Vertical face covered entirely (`v1s`)
    pub const FULL_VERTICAL: Self = Self::vertical_symmetric(BaseId::Numbered(1));
    /// Horizontal face covered up to half height (`h2s`)
    pub const FLAT_HORIZONTAL: Self =
        Self::horizontal(BaseId::Numbered(2), HorizontalForm::Symmetric);
    /// Horizontal face covered up to the water level (`hws`)
    pub const WATER_HORIZONTAL: Self = Self::horizontal(BaseId::Water, HorizontalForm::Symmetric);

    /// Build a horizontal connector
    pub const fn horizontal(base: BaseId, form: HorizontalForm) -> Self {
        Self::Horizontal { base, form }
    }

    /// Build a symmetric vertical connector
    pub const fn vertical_symmetric(base: BaseId) -> Self {
        Self::Vertical {
            base,
            class: VerticalClass::Symmetric,
        }
    }

    /// Build an oriented vertical connector; the rotation is reduced mod 4
    pub const fn vertical_oriented(base: BaseId, flip: FlipClass, rotation: u8) -> Self {
        Self::Vertical {
            base,
            class: VerticalClass::Oriented {
                flip,
                rotation: rotation % 4,
            },
        }
    }

    /// Catalog base id
    pub const fn base(self) -> BaseId {
        match self {
            Self::Horizontal { base, .. } | Self::Vertical { base, .. } => base,
        }
    }

    /// Whether this connector belongs to the vertical family
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Vertical { .. })
    }

    /// Whether the shape is its own mirror (horizontal) or rotation-invariant (vertical)
    pub const fn is_symmetric(self) -> bool {
        matches!(
            self,
            Self::Horizontal {
                form: HorizontalForm::Symmetric,
                ..
            } | Self::Vertical {
                class: VerticalClass::Symmetric,
                ..
            }
        )
    }

    /// The value a touching face must expose for the two faces to connect
    ///
    /// Two horizontal faces look at each other, so each sees the other's
    /// cross-section mirrored. Vertical faces pair with identical values.
    #[must_use]
    pub const fn mate(self) -> Self {
        match self {
            Self::Horizontal { .. } => self.mirrored(),
            Self::Vertical { .. } => self,
        }
    }

    /// Connector after mirroring the owning module about the X axis
    #[must_use]
    pub const fn mirrored(self) -> Self {
        match self {
            Self::Horizontal { base, form } => {
                let form = match form {
                    HorizontalForm::Plain => HorizontalForm::Mirrored,
                    HorizontalForm::Mirrored => HorizontalForm::Plain,
                    HorizontalForm::Symmetric => HorizontalForm::Symmetric,
                };
                Self::Horizontal { base, form }
            }
            Self::Vertical {
                class: VerticalClass::Symmetric,
                ..
            } => self,
            Self::Vertical {
                base,
                class: VerticalClass::Oriented { flip, rotation },
            } => {
                let odd = rotation % 2 == 1;
                let turned = if odd { rotation + 2 } else { rotation };
                let (flip, rotation) = match flip {
                    FlipClass::MirrorX if odd => (flip, rotation + 2),
                    FlipClass::MirrorY if !odd => (flip, rotation + 2),
                    FlipClass::MirrorX | FlipClass::MirrorY => (flip, rotation),
                    FlipClass::Plain => (FlipClass::Mirrored, turned),
                    FlipClass::Mirrored => (FlipClass::Plain, turned),
                };
                Self::vertical_oriented(base, flip, rotation)
            }
        }
    }

    /// Connector after a quarter turn of the owning module about the Y axis
    ///
    /// Only oriented vertical connectors change; horizontal connectors move
    /// between faces instead, which the module transform handles.
    #[must_use]
    pub const fn rotated(self) -> Self {
        match self {
            Self::Vertical {
                base,
                class: VerticalClass::Oriented { flip, rotation },
            } => Self::vertical_oriented(base, flip, rotation + 1),
            _ => self,
        }
    }

    /// Strict compatibility used to decide whether two connectors may touch
    ///
    /// Horizontal connectors match when equal or when one is the `f` form of
    /// the other's base. Vertical connectors match only when equal, so
    /// rotation classes never mix.
    pub fn is_compatible(self, other: Self) -> bool {
        if self == other {
            return true;
        }
        match (self, other) {
            (
                Self::Horizontal {
                    base: a,
                    form: form_a,
                },
                Self::Horizontal {
                    base: b,
                    form: form_b,
                },
            ) => {
                a == b
                    && matches!(
                        (form_a, form_b),
                        (HorizontalForm::Plain, HorizontalForm::Mirrored)
                            | (HorizontalForm::Mirrored, HorizontalForm::Plain)
                    )
            }
            _ => false,
        }
    }

    /// Compatibility that ignores the rotation class of vertical connectors
    ///
    /// Meant for highlighting related faces in inspection tools. The solver
    /// never uses it.
    pub fn is_loosely_compatible(self, other: Self) -> bool {
        match (self, other) {
            (
                Self::Vertical {
                    base: a,
                    class: VerticalClass::Oriented { flip: flip_a, .. },
                },
                Self::Vertical {
                    base: b,
                    class: VerticalClass::Oriented { flip: flip_b, .. },
                },
            ) => a == b && flip_a == flip_b,
            _ => self.is_compatible(other),
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal { base, form } => {
                let suffix = match form {
                    HorizontalForm::Plain => "",
                    HorizontalForm::Symmetric => "s",
                    HorizontalForm::Mirrored => "f",
                };
                write!(f, "h{base}{suffix}")
            }
            Self::Vertical {
                base,
                class: VerticalClass::Symmetric,
            } => write!(f, "v{base}s"),
            Self::Vertical {
                base,
                class: VerticalClass::Oriented { flip, rotation },
            } => {
                let tag = match flip {
                    FlipClass::Plain => "",
                    FlipClass::Mirrored => "f",
                    FlipClass::MirrorX => "x",
                    FlipClass::MirrorY => "y",
                };
                write!(f, "v{base}{tag}-{rotation}")
            }
        }
    }
}

fn parse_base(text: &str) -> Option<BaseId> {
    if text == "w" {
        return Some(BaseId::Water);
    }
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok().map(BaseId::Numbered)
}

impl FromStr for Connector {
    type Err = AlgorithmError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &'static str| AlgorithmError::InvalidConnector {
            value: s.to_string(),
            reason,
        };

        if let Some(body) = s.strip_prefix('h') {
            let (base, form) = if let Some(base) = body.strip_suffix('s') {
                (base, HorizontalForm::Symmetric)
            } else if let Some(base) = body.strip_suffix('f') {
                (base, HorizontalForm::Mirrored)
            } else {
                (body, HorizontalForm::Plain)
            };
            let base = parse_base(base).ok_or_else(|| invalid("malformed base id"))?;
            return Ok(Self::horizontal(base, form));
        }

        let body = s
            .strip_prefix('v')
            .ok_or_else(|| invalid("expected an 'h' or 'v' family prefix"))?;

        if let Some(base) = body.strip_suffix('s') {
            let base = parse_base(base).ok_or_else(|| invalid("malformed base id"))?;
            return Ok(Self::vertical_symmetric(base));
        }

        let (head, rotation) = body
            .rsplit_once('-')
            .ok_or_else(|| invalid("oriented vertical connector needs a '-<rotation>' class"))?;
        let rotation = match rotation {
            "0" => 0,
            "1" => 1,
            "2" => 2,
            "3" => 3,
            _ => return Err(invalid("rotation class must be 0, 1, 2 or 3")),
        };
        let (base, flip) = if let Some(base) = head.strip_suffix('f') {
            (base, FlipClass::Mirrored)
        } else if let Some(base) = head.strip_suffix('x') {
            (base, FlipClass::MirrorX)
        } else if let Some(base) = head.strip_suffix('y') {
            (base, FlipClass::MirrorY)
        } else {
            (head, FlipClass::Plain)
        };
        let base = parse_base(base).ok_or_else(|| invalid("malformed base id"))?;
        Ok(Self::vertical_oriented(base, flip, rotation))
    }
}

impl Serialize for Connector {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Connector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
