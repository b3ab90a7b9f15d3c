//! Search result records, payload decoding and ordering

use std::cmp::Ordering;

use serde::Deserialize;

use crate::error::FetchError;

pub const UNKNOWN_ARTIST: &str = "Unknown";

/// One decoded store item
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "RawResult")]
pub struct ResultRecord {
    pub name: String,
    /// May be empty; rendered as [`UNKNOWN_ARTIST`]
    pub artist_name: String,
    /// Raw kind reported by the store, e.g. `song` or `software`
    pub kind: String,
    pub thumbnail_ref: String,
    pub artwork_large: String,
    pub store_url: String,
    pub price: Option<f64>,
    pub currency: String,
    pub genre: String,
}

impl ResultRecord {
    /// Human readable label for `kind`
    pub fn kind_label(&self) -> &str {
        kind_label(&self.kind)
    }

    /// Second line of a result row: `artist (kind)`, or the unknown fallback
    pub fn artist_line(&self) -> String {
        if self.artist_name.is_empty() {
            UNKNOWN_ARTIST.to_string()
        } else {
            format!("{} ({})", self.artist_name, self.kind_label())
        }
    }

    /// Total order used to sort a result page. Names compare case-insensitively
    /// with embedded numbers ordered by value; exact ties fall back to byte
    /// order so equal-looking names still sort deterministically.
    pub fn ordering(&self, other: &Self) -> Ordering {
        natord::compare_ignore_case(&self.name, &other.name)
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.artist_name.cmp(&other.artist_name))
    }
}

pub fn kind_label(kind: &str) -> &str {
    match kind {
        "album" => "Album",
        "audiobook" => "Audio Book",
        "book" => "Book",
        "ebook" => "E-Book",
        "feature-movie" => "Movie",
        "music-video" => "Music Video",
        "podcast" => "Podcast",
        "software" => "App",
        "song" => "Song",
        "tv-episode" => "TV Episode",
        other => other,
    }
}

/// Wire shape of a single result. Unknown fields are ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResult {
    track_name: Option<String>,
    collection_name: Option<String>,
    #[serde(default)]
    artist_name: String,
    kind: Option<String>,
    wrapper_type: Option<String>,
    #[serde(default)]
    artwork_url60: String,
    #[serde(default)]
    artwork_url100: String,
    track_view_url: Option<String>,
    collection_view_url: Option<String>,
    track_price: Option<f64>,
    collection_price: Option<f64>,
    price: Option<f64>,
    #[serde(default)]
    currency: String,
    #[serde(default)]
    primary_genre_name: String,
}

impl From<RawResult> for ResultRecord {
    fn from(raw: RawResult) -> Self {
        Self {
            name: raw.track_name.or(raw.collection_name).unwrap_or_default(),
            artist_name: raw.artist_name,
            kind: raw.kind.or(raw.wrapper_type).unwrap_or_default(),
            thumbnail_ref: raw.artwork_url60,
            artwork_large: raw.artwork_url100,
            store_url: raw.track_view_url.or(raw.collection_view_url).unwrap_or_default(),
            price: raw.track_price.or(raw.collection_price).or(raw.price),
            currency: raw.currency,
            genre: raw.primary_genre_name,
        }
    }
}

#[derive(Deserialize)]
struct ResultArray {
    results: Vec<ResultRecord>,
}

/// Decode a search payload into a sorted result page.
///
/// A payload without a `results` array is a decode error; an empty array is
/// a valid, empty page.
pub fn decode_sorted(payload: &[u8]) -> Result<Vec<ResultRecord>, FetchError> {
    let ResultArray { mut results } = serde_json::from_slice(payload)?;
    results.sort_by(ResultRecord::ordering);
    Ok(results)
}

#[cfg(test)]
pub(crate) fn record(name: &str, artist: &str) -> ResultRecord {
    ResultRecord {
        name: name.to_string(),
        artist_name: artist.to_string(),
        kind: "song".to_string(),
        thumbnail_ref: format!("http://img.test/{}.jpg", name),
        artwork_large: String::new(),
        store_url: String::new(),
        price: None,
        currency: String::new(),
        genre: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(records: &[ResultRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn sorts_case_insensitively() {
        let payload = br#"{"resultCount":3,"results":[
            {"trackName":"Zeta","artistName":"A","kind":"song"},
            {"trackName":"alpha","artistName":"B","kind":"song"},
            {"trackName":"Beta","artistName":"C","kind":"song"}
        ]}"#;
        let records = decode_sorted(payload).unwrap();
        assert_eq!(names(&records), vec!["alpha", "Beta", "Zeta"]);
    }

    #[test]
    fn numbers_sort_by_value() {
        let mut records = vec![record("Track 10", "x"), record("Track 9", "x"), record("track 1", "x")];
        records.sort_by(ResultRecord::ordering);
        assert_eq!(names(&records), vec!["track 1", "Track 9", "Track 10"]);
    }

    #[test]
    fn case_ties_are_deterministic() {
        let mut a = vec![record("abc", "x"), record("ABC", "x")];
        let mut b = vec![record("ABC", "x"), record("abc", "x")];
        a.sort_by(ResultRecord::ordering);
        b.sort_by(ResultRecord::ordering);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_results_decode_to_empty_page() {
        let records = decode_sorted(br#"{"resultCount":0,"results":[]}"#).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn missing_results_array_is_decode_error() {
        let err = decode_sorted(br#"{"resultCount":0}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));

        let err = decode_sorted(b"<html>not json</html>").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));

        let err = decode_sorted(br#"{"results":"nope"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn empty_artist_survives_decode_and_sort() {
        let payload = br#"{"results":[
            {"trackName":"b","artistName":"","kind":"song"},
            {"trackName":"a","kind":"ebook"}
        ]}"#;
        let records = decode_sorted(payload).unwrap();
        assert_eq!(names(&records), vec!["a", "b"]);
        assert!(records.iter().all(|r| r.artist_name.is_empty()));
        assert_eq!(records[0].artist_line(), UNKNOWN_ARTIST);
    }

    #[test]
    fn field_fallbacks_and_unknown_fields() {
        let payload = br#"{"results":[{
            "wrapperType":"audiobook",
            "collectionName":"Dune",
            "artistName":"Frank Herbert",
            "collectionViewUrl":"https://store.test/dune",
            "collectionPrice":9.99,
            "currency":"USD",
            "artworkUrl60":"https://img.test/60.jpg",
            "somethingNew":{"nested":true}
        }]}"#;
        let records = decode_sorted(payload).unwrap();
        let dune = &records[0];
        assert_eq!(dune.name, "Dune");
        assert_eq!(dune.kind, "audiobook");
        assert_eq!(dune.kind_label(), "Audio Book");
        assert_eq!(dune.store_url, "https://store.test/dune");
        assert_eq!(dune.price, Some(9.99));
        assert_eq!(dune.thumbnail_ref, "https://img.test/60.jpg");
        assert_eq!(dune.artist_line(), "Frank Herbert (Audio Book)");
    }

    #[test]
    fn kind_labels() {
        assert_eq!(kind_label("software"), "App");
        assert_eq!(kind_label("feature-movie"), "Movie");
        assert_eq!(kind_label("tv-episode"), "TV Episode");
        assert_eq!(kind_label("interactive-booklet"), "interactive-booklet");
    }
}
