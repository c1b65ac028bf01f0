use std::time::Duration;

use clap::ValueEnum;
use log::debug;

use crate::clients::{
    entities::{Artist, Track, spotify_url},
    errors::{Error, Result},
};
use rspotify::{
    AuthCodeSpotify, Config, Credentials, OAuth, Token,
    model::{FullTrack, TimeRange},
    prelude::*,
    scopes,
};

/// Time span over which Spotify computes the top tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RankingWindow {
    #[default]
    #[value(name = "short_term")]
    ShortTerm,
    #[value(name = "medium_term")]
    MediumTerm,
    #[value(name = "long_term")]
    LongTerm,
}

impl RankingWindow {
    pub fn as_str(self) -> &'static str {
        match self {
            RankingWindow::ShortTerm => "short_term",
            RankingWindow::MediumTerm => "medium_term",
            RankingWindow::LongTerm => "long_term",
        }
    }
}

impl From<RankingWindow> for TimeRange {
    fn from(w: RankingWindow) -> TimeRange {
        match w {
            RankingWindow::ShortTerm => TimeRange::ShortTerm,
            RankingWindow::MediumTerm => TimeRange::MediumTerm,
            RankingWindow::LongTerm => TimeRange::LongTerm,
        }
    }
}

fn track_from_full(rank: usize, f: FullTrack) -> Result<Track> {
    let url = spotify_url(f.external_urls, rank)?;
    Ok(Track {
        name: f.name,
        artists: f
            .artists
            .into_iter()
            .map(|a| Artist { name: a.name })
            .collect(),
        url,
    })
}

// Response order is the ranking; ranks in errors are 1-based.
fn tracks_from_page(items: Vec<FullTrack>) -> Result<Vec<Track>> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, t)| track_from_full(i + 1, t))
        .collect()
}

pub struct SpotifyClient {
    pub spotify: AuthCodeSpotify,
    timeout: Duration,
}

impl SpotifyClient {
    pub fn new(spotify: AuthCodeSpotify, timeout: Duration) -> Self {
        SpotifyClient { spotify, timeout }
    }

    // Build a client that authenticates with a long-lived refresh token instead of an
    // interactive authorization code prompt. Nothing is cached on disk.
    pub fn with_refresh_token(
        client_id: &str,
        client_secret: &str,
        refresh_token: &str,
        timeout: Duration,
    ) -> Result<Self> {
        for (name, value) in [
            ("SPOTIFY_CLIENT_ID", client_id),
            ("SPOTIFY_CLIENT_SECRET", client_secret),
            ("SPOTIFY_REFRESH_TOKEN", refresh_token),
        ] {
            if value.trim().is_empty() {
                return Err(Error::ConfigurationError(format!("{name} is empty")));
            }
        }

        let creds = Credentials::new(client_id, client_secret);
        let oauth = OAuth {
            scopes: scopes!("user-top-read"),
            ..Default::default()
        };
        let token = Token {
            refresh_token: Some(refresh_token.to_string()),
            ..Default::default()
        };
        let spotify = AuthCodeSpotify::from_token_with_config(
            token,
            creds,
            oauth,
            Config {
                token_cached: false,
                token_refreshing: false,
                ..Default::default()
            },
        );

        Ok(Self::new(spotify, timeout))
    }

    async fn bounded<T>(&self, operation: &'static str, fut: impl Future<Output = T>) -> Result<T> {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| Error::Timeout {
                operation,
                seconds: self.timeout.as_secs(),
            })
    }

    // Exchange the refresh token for a fresh access token
    pub async fn authorize_client(&self) -> Result<()> {
        debug!("Refreshing Spotify access token ...");
        self.bounded("Spotify token refresh", self.spotify.refresh_token())
            .await?
            .map_err(Error::Authentication)?;
        debug!("Spotify access token refreshed");
        Ok(())
    }

    // Fetch the ranked top tracks. Order of the response is the ranking and is kept as is.
    pub async fn get_top_tracks(&self, window: RankingWindow, limit: u32) -> Result<Vec<Track>> {
        debug!("Requesting top {limit} tracks for {}", window.as_str());
        let page = self
            .bounded(
                "Spotify top tracks request",
                self.spotify
                    .current_user_top_tracks_manual(Some(window.into()), Some(limit), None),
            )
            .await?
            .map_err(Error::Upstream)?;

        tracks_from_page(page.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    // A `/me/top/tracks` item as the API returns it.
    fn full_track(id: &str, name: &str, artists: &[&str], with_url: bool) -> FullTrack {
        let external_urls = if with_url {
            json!({ "spotify": format!("https://open.spotify.com/track/{id}") })
        } else {
            json!({})
        };
        let artists: Vec<_> = artists
            .iter()
            .map(|a| {
                json!({
                    "external_urls": { "spotify": "https://open.spotify.com/artist/0OdUWJ0sBjDrqHygGUXeCF" },
                    "href": "https://api.spotify.com/v1/artists/0OdUWJ0sBjDrqHygGUXeCF",
                    "id": "0OdUWJ0sBjDrqHygGUXeCF",
                    "name": a,
                    "type": "artist",
                    "uri": "spotify:artist:0OdUWJ0sBjDrqHygGUXeCF"
                })
            })
            .collect();
        serde_json::from_value(json!({
            "album": {
                "album_type": "album",
                "artists": artists.clone(),
                "available_markets": ["US"],
                "external_urls": { "spotify": "https://open.spotify.com/album/6akEvsycLGftJxYudPjmqK" },
                "href": "https://api.spotify.com/v1/albums/6akEvsycLGftJxYudPjmqK",
                "id": "6akEvsycLGftJxYudPjmqK",
                "images": [{ "height": 640, "url": "https://i.scdn.co/image/ab67616d0000b273", "width": 640 }],
                "name": "Album",
                "release_date": "2011-10-18",
                "release_date_precision": "day",
                "total_tracks": 22,
                "type": "album",
                "uri": "spotify:album:6akEvsycLGftJxYudPjmqK"
            },
            "artists": artists,
            "available_markets": ["US"],
            "disc_number": 1,
            "duration_ms": 243_960,
            "explicit": false,
            "external_ids": { "isrc": "FR6V81141061" },
            "external_urls": external_urls,
            "href": format!("https://api.spotify.com/v1/tracks/{id}"),
            "id": id,
            "is_local": false,
            "name": name,
            "popularity": 77,
            "preview_url": null,
            "track_number": 1,
            "type": "track",
            "uri": format!("spotify:track:{id}")
        }))
        .unwrap()
    }

    #[test]
    fn converts_full_track() {
        let track = track_from_full(1, full_track("6GyFP1nfCDB8lbD2bG0Hq9", "Midnight City", &["M83", "Guest"], true)).unwrap();
        assert_eq!(
            track,
            Track::new(
                "Midnight City",
                &["M83", "Guest"],
                "https://open.spotify.com/track/6GyFP1nfCDB8lbD2bG0Hq9"
            )
        );
    }

    #[test]
    fn page_keeps_ranking_order() {
        let items = vec![
            full_track("4iV5W9uYEdYUVa79Axb7Rh", "First", &["A"], true),
            full_track("6GyFP1nfCDB8lbD2bG0Hq9", "Second", &["B"], true),
            full_track("1eyzqe2QqGZUmfcPZtrIyt", "Third", &["C"], true),
        ];
        let names: Vec<String> = tracks_from_page(items)
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn missing_spotify_url_reports_rank() {
        let items = vec![
            full_track("4iV5W9uYEdYUVa79Axb7Rh", "First", &["A"], true),
            full_track("6GyFP1nfCDB8lbD2bG0Hq9", "No link", &["B"], false),
        ];
        match tracks_from_page(items) {
            Err(Error::MalformedTrack { rank, field }) => {
                assert_eq!(rank, 2);
                assert_eq!(field, "external_urls.spotify");
            }
            other => panic!("expected malformed track, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_call_times_out() {
        let client =
            SpotifyClient::with_refresh_token("id", "secret", "token", Duration::from_millis(10))
                .unwrap();
        let res = client
            .bounded("Spotify top tracks request", std::future::pending::<()>())
            .await;
        assert!(matches!(
            res,
            Err(Error::Timeout {
                operation: "Spotify top tracks request",
                seconds: 0
            })
        ));
    }

    #[tokio::test]
    async fn fast_call_passes_through() {
        let client =
            SpotifyClient::with_refresh_token("id", "secret", "token", Duration::from_secs(1))
                .unwrap();
        let res = client.bounded("noop", async { 7 }).await;
        assert!(matches!(res, Ok(7)));
    }

    #[test]
    fn window_names_match_api_values() {
        assert_eq!(RankingWindow::default(), RankingWindow::ShortTerm);
        for w in RankingWindow::value_variants() {
            let parsed = RankingWindow::from_str(w.as_str(), false).unwrap();
            assert_eq!(parsed, *w);
        }
    }

    #[test]
    fn empty_credentials_are_rejected() {
        let res = SpotifyClient::with_refresh_token("id", " ", "token", Duration::from_secs(30));
        match res {
            Err(Error::ConfigurationError(msg)) => assert!(msg.contains("SPOTIFY_CLIENT_SECRET")),
            Err(other) => panic!("unexpected error {other:?}"),
            Ok(_) => panic!("expected a configuration error"),
        }
    }
}
