/// Data entities for tracks and artists
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// Badge file output
pub mod output;
/// Spotify API client
pub mod spotify;

pub use output::BadgeWriter;
pub use spotify::SpotifyClient;
