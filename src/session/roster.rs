// Shipped roster and menu.
// Six frogs, six dishes; `deliver` generalizes to any roster whose cravings
// all resolve against the menu.
use super::{Food, Frog};

pub static FROGS: &[Frog] = &[
    Frog {
        id: "irina",
        name: "Irina the Frog",
        food: "prosciutto",
    },
    Frog {
        id: "katya",
        name: "Katya the Frog",
        food: "blini",
    },
    Frog {
        id: "dasha",
        name: "Dasha the Frog",
        food: "pelmeni",
    },
    Frog {
        id: "sasha",
        name: "Sasha the Frog",
        food: "pasta",
    },
    Frog {
        id: "veronika",
        name: "Veronika the Frog",
        food: "wine",
    },
    Frog {
        id: "olya",
        name: "Olya the Frog",
        food: "posikunchiki",
    },
];

pub static FOODS: &[Food] = &[
    Food {
        id: "prosciutto",
        label: "Prosciutto",
        glyph: "🥓",
    },
    Food {
        id: "wine",
        label: "Wine",
        glyph: "🍷",
    },
    Food {
        id: "pelmeni",
        label: "Pelmeni",
        glyph: "🥟",
    },
    Food {
        id: "posikunchiki",
        label: "Posikunchiki",
        glyph: "🥟",
    },
    Food {
        id: "pasta",
        label: "Pasta",
        glyph: "🍝",
    },
    Food {
        id: "blini",
        label: "Blini",
        glyph: "🥞",
    },
];

/// The food forced onto the tray when a round starts, so the opening reveal
/// is always the same playable state.
pub const OPENING_FOOD: &str = "wine";
