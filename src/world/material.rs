// Wall materials and grid tiles.
// Maps are written with one ASCII digit per cell: '0' is open floor, '1'..'9'
// name a wall material.  Everything past the loader works with the enums below.

use std::fmt;

use crate::world::map::MapError;

/// Wall material.  The discriminant is the digit used in map files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "char", into = "char")]
#[repr(u8)]
pub enum Material {
    Brick = b'1',
    Moss = b'2',
    Clay = b'3',
    Sand = b'4',
    Rust = b'5',
    Ochre = b'6',
    Slate = b'7',
    Ivy = b'8',
    Cobalt = b'9',
}

impl Material {
    pub const ALL: [Material; 9] = [
        Material::Brick,
        Material::Moss,
        Material::Clay,
        Material::Sand,
        Material::Rust,
        Material::Ochre,
        Material::Slate,
        Material::Ivy,
        Material::Cobalt,
    ];

    /// Map-file digit for this material.
    #[inline]
    pub fn to_char(self) -> char {
        self as u8 as char
    }

    /// `None` for `'0'` and for anything that is not a digit.
    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.to_char() == c)
    }
}

impl TryFrom<char> for Material {
    type Error = MapError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_char(c).ok_or(MapError::BadMaterial(c))
    }
}

impl From<Material> for char {
    fn from(m: Material) -> char {
        m.to_char()
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.to_char())
    }
}

/// Content of one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    Empty,
    Wall(Material),
}

impl Tile {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Tile::Empty),
            _ => Material::from_char(c).map(Tile::Wall),
        }
    }

    #[inline]
    pub fn to_char(self) -> char {
        match self {
            Tile::Empty => '0',
            Tile::Wall(m) => m.to_char(),
        }
    }

    #[inline]
    pub fn is_solid(self) -> bool {
        matches!(self, Tile::Wall(_))
    }

    #[inline]
    pub fn material(self) -> Option<Material> {
        match self {
            Tile::Empty => None,
            Tile::Wall(m) => Some(m),
        }
    }
}
