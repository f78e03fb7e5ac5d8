// Terminal front end for the golf draft: ratatui dashboard and key handling.

pub mod tui;
