//! Japanese text to braille (tenji) conversion.
//!
//! The pipeline is: [`tokenizer`] splits a line into chunks, [`resolver`]
//! reads each chunk against a trie-indexed constant database ([`cdb`]), and
//! [`braille`] encodes the normalized katakana reading as 6-dot cells.
//! [`dict`] builds the database from a sorted `word reading` list.

pub mod braille;
pub mod cdb;
pub mod dict;
pub mod pipeline;
pub mod resolver;
pub mod settings;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod tokenizer;
pub mod unicode;
