//! Artwork series as published in the site's gallery JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A year as authored: either a number or free text ("c. 1998", "2003–05").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Number(u32),
    Text(String),
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Number(n) => write!(f, "{}", n),
            Year::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    /// Object name on the asset host; the host prefix is supplied by the page.
    pub filename: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<Year>,
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub series: Option<String>,
    #[serde(default)]
    pub collection: Option<String>,
}

fn join_present(parts: impl IntoIterator<Item = Option<String>>) -> String {
    parts
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Artwork {
    pub fn alt_text(&self) -> &str {
        self.title.as_deref().unwrap_or("Artwork")
    }

    /// Short hover label: title, year, medium.
    pub fn museum_label(&self) -> String {
        join_present([
            self.title.clone(),
            self.year.as_ref().map(Year::to_string),
            self.medium.clone(),
        ])
    }

    /// Full lightbox caption: title, year, medium, series, collection.
    pub fn caption(&self) -> String {
        join_present([
            self.title.clone(),
            self.year.as_ref().map(Year::to_string),
            self.medium.clone(),
            self.series.clone(),
            self.collection.clone(),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub images: Vec<Artwork>,
}

/// All series, in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gallery {
    series: Vec<Series>,
}

impl Gallery {
    /// Series without images are dropped so every index pair stays valid.
    pub fn new(series: Vec<Series>) -> Self {
        let series = series
            .into_iter()
            .filter(|s| {
                if s.images.is_empty() {
                    log::warn!("gallery: series '{}' has no images, skipping", s.title);
                }
                !s.images.is_empty()
            })
            .collect();
        Self { series }
    }

    /// Parse a JSON array of series.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let series: Vec<Series> = serde_json::from_str(json)?;
        Ok(Self::new(series))
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn get(&self, series: usize) -> Option<&Series> {
        self.series.get(series)
    }

    pub fn artwork(&self, series: usize, image: usize) -> Option<&Artwork> {
        self.series.get(series)?.images.get(image)
    }

    /// Number of images in `series`, zero when out of range.
    pub fn image_count(&self, series: usize) -> usize {
        self.series.get(series).map_or(0, |s| s.images.len())
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: &str = r#"[
        { "title": "Harbour", "subtitle": "2019–2021", "images": [
            { "filename": "harbour-1.jpg", "title": "Low Tide", "year": 2019, "medium": "Oil on linen" },
            { "filename": "harbour-2.jpg", "year": "c. 2020", "collection": "Private collection" }
        ]},
        { "title": "Empty", "images": [] },
        { "title": "Studies", "images": [ { "filename": "study.jpg" } ] }
    ]"#;

    #[test]
    fn parses_and_drops_empty_series() {
        let g = Gallery::from_json(JSON).unwrap();
        assert_eq!(g.len(), 2);
        assert_eq!(g.get(1).unwrap().title, "Studies");
        assert_eq!(g.image_count(0), 2);
        assert_eq!(g.image_count(9), 0);
    }

    #[test]
    fn label_and_caption_skip_missing_parts() {
        let g = Gallery::from_json(JSON).unwrap();
        let first = g.artwork(0, 0).unwrap();
        assert_eq!(first.museum_label(), "Low Tide, 2019, Oil on linen");
        let second = g.artwork(0, 1).unwrap();
        assert_eq!(second.caption(), "c. 2020, Private collection");
        assert_eq!(second.alt_text(), "Artwork");
        assert_eq!(g.artwork(1, 0).unwrap().caption(), "");
    }

    #[test]
    fn rejects_missing_filename() {
        assert!(Gallery::from_json(r#"[{ "title": "x", "images": [{ "title": "no file" }] }]"#).is_err());
    }
}
