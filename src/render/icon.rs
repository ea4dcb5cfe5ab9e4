//! Outline icons
//!
//! 24x24 stroke glyphs rendered inline as SVG.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Glyph {
    Plus,
    Minus,
    Pencil,
    PencilSquare,
    PlusCircle,
    MinusCircle,
    UserCircle,
}

impl Glyph {
    /// SVG path data
    pub fn path(&self) -> &'static str {
        match self {
            Glyph::Plus => "M12 4.5v15m7.5-7.5h-15",
            Glyph::Minus => "M19.5 12h-15",
            Glyph::Pencil => {
                "M16.862 4.487l1.687-1.688a1.875 1.875 0 112.652 2.652L6.832 19.82a4.5 4.5 0 01-1.897 1.13l-2.685.8.8-2.685a4.5 4.5 0 011.13-1.897L16.863 4.487zm0 0L19.5 7.125"
            }
            Glyph::PencilSquare => {
                "M16.862 4.487l1.687-1.688a1.875 1.875 0 112.652 2.652L10.582 16.07a4.5 4.5 0 01-1.897 1.13L6 18l.8-2.685a4.5 4.5 0 011.13-1.897l8.932-8.931zm0 0L19.5 7.125M18 14v4.75A2.25 2.25 0 0115.75 21H5.25A2.25 2.25 0 013 18.75V8.25A2.25 2.25 0 015.25 6H10"
            }
            Glyph::PlusCircle => "M12 9v6m3-3H9m12 0a9 9 0 11-18 0 9 9 0 0118 0z",
            Glyph::MinusCircle => "M15 12H9m12 0a9 9 0 11-18 0 9 9 0 0118 0z",
            Glyph::UserCircle => {
                "M17.982 18.725A7.488 7.488 0 0012 15.75a7.488 7.488 0 00-5.982 2.975m11.963 0a9 9 0 10-11.963 0m11.963 0A8.966 8.966 0 0112 21a8.966 8.966 0 01-5.982-2.275M15 9.75a3 3 0 11-6 0 3 3 0 016 0z"
            }
        }
    }
}

/// A glyph with its size and colour classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Icon {
    pub glyph: Glyph,
    pub class: &'static str,
    pub path: &'static str,
}

impl Icon {
    pub fn new(glyph: Glyph, class: &'static str) -> Self {
        Self {
            glyph,
            class,
            path: glyph.path(),
        }
    }
}
