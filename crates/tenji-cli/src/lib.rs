//! Command-line front ends for `tenji-core`: `tenjidic` builds and inspects
//! dictionaries, `tenji` converts text to braille.

pub mod commands;
pub mod trace_init;
