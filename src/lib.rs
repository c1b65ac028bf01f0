//! Spotify top tracks badge
//!
//! This library fetches a user's most played Spotify tracks and renders them
//! as themed SVG badges that can be embedded in a profile page.

/// Pure SVG rendering of track lists, themes and size classes
pub mod badge;
/// Client modules for the Spotify API and badge output
pub mod clients;
/// Renders and writes every requested theme and size combination
pub mod generator;
