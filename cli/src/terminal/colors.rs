use colored::Color;

pub const PRIMARY: Color = Color::BrightCyan;
pub const ACCENT: Color = Color::BrightYellow;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const ADDED: Color = Color::BrightGreen;
pub const REMOVED: Color = Color::BrightRed;

pub const HTTPS: Color = Color::Green;
pub const HTTP: Color = Color::Yellow;
pub const FTP: Color = Color::Magenta;
