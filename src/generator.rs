use chrono::{DateTime, Utc};
use futures::stream::{StreamExt, TryStreamExt, iter};
use log::{debug, info};
use std::path::PathBuf;

use crate::badge::{self, Header, size::SizeClass, theme::{Theme, ThemeRegistry}};
use crate::clients::{
    BadgeWriter,
    entities::Track,
    errors::{Error, Result},
};

/// Configuration for the [`Generator`]
pub struct Config {
    pub themes: Vec<Theme>,
    pub sizes: Vec<SizeClass>,
    pub window: String,
    pub writer: BadgeWriter,
    pub concurrency: usize,
}

/// Builder for [`Config`]; unset fields fall back to defaults in [`ConfigBuilder::build`].
#[derive(Default)]
pub struct ConfigBuilder {
    themes: Option<Vec<Theme>>,
    sizes: Option<Vec<SizeClass>>,
    window: Option<String>,
    writer: Option<BadgeWriter>,
    concurrency: Option<usize>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn themes(mut self, themes: Vec<Theme>) -> Self {
        self.themes = Some(themes);
        self
    }

    pub fn sizes(mut self, sizes: Vec<SizeClass>) -> Self {
        self.sizes = Some(sizes);
        self
    }

    pub fn window(mut self, window: impl Into<String>) -> Self {
        self.window = Some(window.into());
        self
    }

    pub fn writer(mut self, writer: BadgeWriter) -> Self {
        self.writer = Some(writer);
        self
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = Some(concurrency);
        self
    }

    pub fn build(self) -> Result<Config> {
        let mut themes = self.themes.unwrap_or_else(|| ThemeRegistry::builtin().all());
        let mut sizes = self.sizes.unwrap_or_else(|| vec![SizeClass::Medium]);
        if themes.is_empty() {
            return Err(Error::ConfigurationError("no themes requested".into()));
        }
        if sizes.is_empty() {
            return Err(Error::ConfigurationError("no sizes requested".into()));
        }
        // Same theme or size twice would write the same file twice
        let mut seen_themes: Vec<String> = Vec::with_capacity(themes.len());
        themes.retain(|t| {
            let fresh = !seen_themes.contains(&t.name);
            seen_themes.push(t.name.clone());
            fresh
        });
        let mut seen = Vec::with_capacity(sizes.len());
        sizes.retain(|s| {
            let fresh = !seen.contains(s);
            seen.push(*s);
            fresh
        });
        Ok(Config {
            themes,
            sizes,
            window: self.window.unwrap_or_else(|| "short_term".to_string()),
            writer: self.writer.unwrap_or_else(BadgeWriter::try_default),
            // Default concurrency for badge file writes
            concurrency: self.concurrency.unwrap_or(4).max(1),
        })
    }
}

/// One rendered badge, not yet written.
#[derive(Debug, Clone)]
pub struct Badge {
    pub theme: String,
    pub size: SizeClass,
    pub svg: String,
}

/// Renders the track list once per (theme, size) pair and writes the results
pub struct Generator {
    config: Config,
}

impl Generator {
    pub fn new(config: Config) -> Self {
        Generator { config }
    }

    pub fn render_all(&self, tracks: &[Track], generated_at: DateTime<Utc>) -> Vec<Badge> {
        let header = Header::new(self.config.window.clone(), generated_at);
        self.config
            .themes
            .iter()
            .flat_map(|theme| {
                let header = &header;
                self.config.sizes.iter().map(move |&size| Badge {
                    theme: theme.name.clone(),
                    size,
                    svg: badge::render(tracks, theme, size, header),
                })
            })
            .collect()
    }

    // A failed write aborts the run; badges written before it stay on disk.
    pub async fn generate(&self, tracks: &[Track], generated_at: DateTime<Utc>) -> Result<Vec<PathBuf>> {
        info!(
            "Rendering {} tracks into {} themes x {} sizes ...",
            tracks.len(),
            self.config.themes.len(),
            self.config.sizes.len()
        );
        let writer = &self.config.writer;
        writer.init_dir().await?;

        let badges = self.render_all(tracks, generated_at);
        debug!("Rendered {} badges", badges.len());

        let mut paths: Vec<PathBuf> = iter(badges)
            .map(|b| async move { writer.write(&b.theme, b.size, &b.svg).await })
            .buffer_unordered(self.config.concurrency)
            .try_collect()
            .await?;
        paths.sort();

        info!(
            "Wrote {} badges to {:?}",
            paths.len(),
            writer.dir()
        );
        Ok(paths)
    }
}
