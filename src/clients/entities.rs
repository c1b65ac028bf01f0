use std::collections::HashMap;

use serde::Deserialize;

use crate::clients::errors::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    pub name: String,
}

/// One ranked entry of the top-tracks list. Its rank is its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub artists: Vec<Artist>, // credited order
    pub url: String,
}

impl Track {
    pub fn new(name: impl Into<String>, artists: &[&str], url: impl Into<String>) -> Self {
        Track {
            name: name.into(),
            artists: artists
                .iter()
                .map(|a| Artist {
                    name: (*a).to_string(),
                })
                .collect(),
            url: url.into(),
        }
    }

    pub fn artist_line(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// Shape of an item in the `/me/top/tracks` response, trimmed to the fields we render.
#[derive(Deserialize, Debug)]
pub struct ApiArtist {
    pub name: String,
}

#[derive(Deserialize, Debug)]
pub struct ApiTrack {
    pub name: String,
    pub artists: Vec<ApiArtist>,
    #[serde(default)]
    pub external_urls: HashMap<String, String>,
}

#[derive(Deserialize, Debug)]
struct ApiTrackPage {
    items: Vec<ApiTrack>,
}

impl ApiTrack {
    pub fn into_track(self, rank: usize) -> Result<Track> {
        let url = spotify_url(self.external_urls, rank)?;
        Ok(Track {
            name: self.name,
            artists: self
                .artists
                .into_iter()
                .map(|a| Artist { name: a.name })
                .collect(),
            url,
        })
    }
}

pub(crate) fn spotify_url(mut external_urls: HashMap<String, String>, rank: usize) -> Result<String> {
    external_urls
        .remove("spotify")
        .ok_or(Error::MalformedTrack {
            rank,
            field: "external_urls.spotify",
        })
}

/// Parse a saved top-tracks payload: either the raw `items` array or the whole page object.
pub fn tracks_from_json(json: &str) -> Result<Vec<Track>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let items: Vec<ApiTrack> = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        serde_json::from_value::<ApiTrackPage>(value)?.items
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, t)| t.into_track(i + 1))
        .collect()
}
