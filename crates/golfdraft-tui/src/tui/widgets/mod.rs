// TUI widget modules for each dashboard panel.

pub mod outside;
pub mod placeholder;
pub mod prompt;
pub mod quit_confirm;
pub mod roster_table;
pub mod status_bar;
pub mod tabs;
pub mod tiers;
