//! Box-drawing glyph set for the terminal table renderer

/// Border glyphs for one table style
#[derive(Debug, Clone, Copy)]
pub struct BoxGlyphs {
    pub horizontal: &'static str,
    pub vertical: &'static str,
    pub top_left: &'static str,
    pub top_sep: &'static str,
    pub top_right: &'static str,
    pub mid_left: &'static str,
    pub mid_sep: &'static str,
    pub mid_right: &'static str,
    pub bottom_left: &'static str,
    pub bottom_sep: &'static str,
    pub bottom_right: &'static str,
}

/// The fixed light box-drawing set used for tables
pub const BOX_LIGHT: BoxGlyphs = BoxGlyphs {
    horizontal: "─",
    vertical: "│",
    top_left: "┌",
    top_sep: "┬",
    top_right: "┐",
    mid_left: "├",
    mid_sep: "┼",
    mid_right: "┤",
    bottom_left: "└",
    bottom_sep: "┴",
    bottom_right: "┘",
};
