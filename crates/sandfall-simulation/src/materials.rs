//! Material definitions and registry

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// RGBA color, one byte per channel
pub type Rgba = [u8; 4];

/// Closed set of material kinds a grid cell can hold
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// No substance (background)
    Empty,
    Sand,
    Water,
    Saltwater,
    Mud,
    Oil,
    Stone,
    Wood,
    Ice,
    Salt,
    Fire,
    Lava,
    Lightning,
    Steam,
    Glass,
    Wall,
}

impl Kind {
    /// Every kind, in definition order
    pub const ALL: [Kind; 16] = [
        Kind::Empty,
        Kind::Sand,
        Kind::Water,
        Kind::Saltwater,
        Kind::Mud,
        Kind::Oil,
        Kind::Stone,
        Kind::Wood,
        Kind::Ice,
        Kind::Salt,
        Kind::Fire,
        Kind::Lava,
        Kind::Lightning,
        Kind::Steam,
        Kind::Glass,
        Kind::Wall,
    ];

    /// Lowercase material name (matches the brush/scene vocabulary)
    pub fn name(self) -> &'static str {
        match self {
            Kind::Empty => "empty",
            Kind::Sand => "sand",
            Kind::Water => "water",
            Kind::Saltwater => "saltwater",
            Kind::Mud => "mud",
            Kind::Oil => "oil",
            Kind::Stone => "stone",
            Kind::Wood => "wood",
            Kind::Ice => "ice",
            Kind::Salt => "salt",
            Kind::Fire => "fire",
            Kind::Lava => "lava",
            Kind::Lightning => "lightning",
            Kind::Steam => "steam",
            Kind::Glass => "glass",
            Kind::Wall => "wall",
        }
    }

    pub fn is_empty(self) -> bool {
        self == Kind::Empty
    }

    /// Water in the broad sense: plain water and saltwater.
    ///
    /// Sand and mud soak up either; salt, fire, lava and lightning only
    /// react with `Kind::Water` itself.
    pub fn is_watery(self) -> bool {
        matches!(self, Kind::Water | Kind::Saltwater)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown material name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown material kind `{0}`")]
pub struct ParseKindError(pub String);

impl FromStr for Kind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Kind::ALL
            .into_iter()
            .find(|kind| kind.name() == lowered)
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}

/// Definition of a material's physical properties
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaterialDef {
    pub kind: Kind,

    /// Falls when unsupported
    pub gravity: bool,
    /// Flows sideways and mixes with other liquids
    pub liquid: bool,
    /// Rises and mixes with other gases
    pub gaseous: bool,
    /// Catches fire (informational; burning is driven by the reaction rules)
    pub flammable: bool,

    /// Buoyancy rank within a movement class; denser sinks
    pub density: i32,

    /// Base color (RGBA)
    pub color: Rgba,

    /// Single character used by text frame dumps
    pub glyph: char,
}

impl Default for MaterialDef {
    fn default() -> Self {
        Self {
            kind: Kind::Empty,
            gravity: false,
            liquid: false,
            gaseous: false,
            flammable: false,
            density: 0,
            color: [50, 50, 50, 255],
            glyph: ' ',
        }
    }
}

/// Registry of all material definitions, indexed by kind
pub struct Materials {
    materials: Vec<MaterialDef>,
}

impl Materials {
    pub fn new() -> Self {
        let mut materials = Self {
            materials: vec![MaterialDef::default(); Kind::ALL.len()],
        };
        materials.register_defaults();
        log::debug!("Registered {} material kinds", materials.materials.len());
        materials
    }

    fn register_defaults(&mut self) {
        // Empty (background)
        self.register(MaterialDef {
            kind: Kind::Empty,
            ..Default::default()
        });

        // POWDERS

        self.register(MaterialDef {
            kind: Kind::Sand,
            gravity: true,
            density: 5,
            color: [255, 228, 196, 255],
            glyph: '.',
            ..Default::default()
        });

        self.register(MaterialDef {
            kind: Kind::Mud,
            gravity: true,
            density: 5,
            color: [90, 78, 76, 255],
            glyph: 'm',
            ..Default::default()
        });

        // Stone falls twice per tick
        self.register(MaterialDef {
            kind: Kind::Stone,
            gravity: true,
            density: 7,
            color: [150, 150, 150, 255],
            glyph: 'o',
            ..Default::default()
        });

        self.register(MaterialDef {
            kind: Kind::Salt,
            gravity: true,
            density: 5,
            color: [250, 250, 250, 255],
            glyph: ':',
            ..Default::default()
        });

        // LIQUIDS

        self.register(MaterialDef {
            kind: Kind::Water,
            gravity: true,
            liquid: true,
            density: 4,
            color: [55, 75, 243, 255],
            glyph: '~',
            ..Default::default()
        });

        // Denser than water, tinted towards green
        self.register(MaterialDef {
            kind: Kind::Saltwater,
            gravity: true,
            liquid: true,
            density: 5,
            color: [90, 110, 243, 255],
            glyph: '=',
            ..Default::default()
        });

        self.register(MaterialDef {
            kind: Kind::Oil,
            gravity: true,
            liquid: true,
            flammable: true,
            density: 1,
            color: [106, 48, 48, 255],
            glyph: '%',
            ..Default::default()
        });

        self.register(MaterialDef {
            kind: Kind::Lava,
            gravity: true,
            liquid: true,
            density: 3,
            color: [243, 137, 0, 255],
            glyph: '&',
            ..Default::default()
        });

        // GASES (colors are jittered per particle)

        self.register(MaterialDef {
            kind: Kind::Fire,
            gaseous: true,
            density: 0,
            color: [238, 64, 15, 255],
            glyph: '^',
            ..Default::default()
        });

        self.register(MaterialDef {
            kind: Kind::Steam,
            gaseous: true,
            density: 1,
            color: [212, 212, 212, 255],
            glyph: '"',
            ..Default::default()
        });

        // ENERGY

        self.register(MaterialDef {
            kind: Kind::Lightning,
            gravity: true,
            density: 3,
            color: [247, 242, 0, 255],
            glyph: '!',
            ..Default::default()
        });

        // STATIC SOLIDS

        self.register(MaterialDef {
            kind: Kind::Wood,
            density: 5,
            color: [99, 60, 3, 255],
            glyph: 'w',
            ..Default::default()
        });

        self.register(MaterialDef {
            kind: Kind::Ice,
            density: 5,
            color: [186, 247, 255, 255],
            glyph: '*',
            ..Default::default()
        });

        // Translucent
        self.register(MaterialDef {
            kind: Kind::Glass,
            color: [223, 223, 223, 148],
            glyph: 'g',
            ..Default::default()
        });

        self.register(MaterialDef {
            kind: Kind::Wall,
            color: [83, 83, 83, 255],
            glyph: '#',
            ..Default::default()
        });
    }

    fn register(&mut self, material: MaterialDef) {
        let index = material.kind.index();
        self.materials[index] = material;
    }

    /// Get material definition by kind
    pub fn get(&self, kind: Kind) -> &MaterialDef {
        &self.materials[kind.index()]
    }

    /// Get base color for a material
    pub fn get_color(&self, kind: Kind) -> Rgba {
        self.get(kind).color
    }
}

impl Default for Materials {
    fn default() -> Self {
        Self::new()
    }
}
