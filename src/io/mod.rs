/*!
Helper functions for saving draws to disk.
*/

#[cfg(feature = "csv")]
pub mod csv;
