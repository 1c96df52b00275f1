//! Nord-based colors for the playback viewer.

use ratatui::style::Color;

/// Medium polar night shade.
pub const NORD_POLAR_NIGHT_3: Color = Color::Rgb(67, 76, 94);
/// Lightest polar night shade.
pub const NORD_POLAR_NIGHT_4: Color = Color::Rgb(76, 86, 106);
/// Primary snow storm shade.
pub const NORD_SNOW_STORM_1: Color = Color::Rgb(216, 222, 233);
/// Frost accent 2, cyan.
pub const NORD_FROST_2: Color = Color::Rgb(136, 192, 208);
/// Frost accent 4, deep blue.
pub const NORD_FROST_4: Color = Color::Rgb(94, 129, 172);
/// Aurora yellow.
pub const NORD_YELLOW: Color = Color::Rgb(235, 203, 139);
/// Aurora green.
pub const NORD_GREEN: Color = Color::Rgb(163, 190, 140);
/// Aurora red.
pub const NORD_RED: Color = Color::Rgb(191, 97, 106);

// === Semantic Color Aliases ===

/// Bone segments.
pub const BONE: Color = NORD_FROST_2;
/// Ground grid / axis guides.
pub const GUIDE: Color = NORD_POLAR_NIGHT_3;
/// Primary text color.
pub const TEXT_PRIMARY: Color = NORD_SNOW_STORM_1;
/// Secondary/muted text color.
pub const TEXT_SECONDARY: Color = NORD_POLAR_NIGHT_4;
/// Key hint color.
pub const ACCENT_PRIMARY: Color = NORD_FROST_2;
/// Canvas border.
pub const BORDER_FOCUSED: Color = NORD_FROST_4;
/// Playing state.
pub const SUCCESS: Color = NORD_GREEN;
/// Paused state.
pub const WARNING: Color = NORD_YELLOW;
/// Missing skeleton.
pub const ERROR: Color = NORD_RED;
