//! User media tiles
//!
//! Each tile links to the photo's shareable page. The first tile is the hero
//! image and loads eagerly. The remove button only appears for untagged
//! media, and only when the caller has decided the viewer may remove it.

use serde::Serialize;

use super::links;
use crate::model::MediaWithTags;

/// Tile edge in CSS pixels
pub const TILE_SIZE: u32 = 300;

/// Builds the image URL for a preview of the given width
pub trait ImageLoader: Send + Sync {
    fn src(&self, media_url: &str, width: u32) -> String;
}

/// Square, center-cropped previews served from the media CDN
#[derive(Debug, Clone)]
pub struct SquarePreviewLoader {
    base_url: String,
    quality: u8,
}

impl SquarePreviewLoader {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            quality: 90,
        }
    }

    /// Builder method: set JPEG/WebP quality
    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = quality.min(100);
        self
    }
}

impl ImageLoader for SquarePreviewLoader {
    fn src(&self, media_url: &str, width: u32) -> String {
        let path = if media_url.starts_with('/') {
            media_url.to_string()
        } else {
            format!("/{}", media_url)
        };
        format!(
            "{}{}?w={}&h={}&q={}&format=webp",
            self.base_url, path, width, width, self.quality
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaTileView {
    pub media_url: String,
    pub image_src: String,
    pub share_href: String,
    pub is_hero: bool,
    pub loading: &'static str,
    pub can_remove: bool,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryView {
    pub uid: String,
    pub tiles: Vec<MediaTileView>,
}

/// Present one tile at `index` within the user's gallery
pub fn present_media(
    uid: &str,
    index: usize,
    media: &MediaWithTags,
    is_authorized: bool,
    loader: &dyn ImageLoader,
) -> MediaTileView {
    let is_hero = index == 0;

    MediaTileView {
        media_url: media.media_url.clone(),
        image_src: loader.src(&media.media_url, TILE_SIZE),
        share_href: links::media_share_path(uid, &media.media_url),
        is_hero,
        loading: if is_hero { "eager" } else { "lazy" },
        can_remove: media.entity_tags.is_empty() && is_authorized,
        size: TILE_SIZE,
    }
}

/// Present a gallery in input order
pub fn present_gallery(
    uid: &str,
    media: &[MediaWithTags],
    is_authorized: bool,
    loader: &dyn ImageLoader,
) -> GalleryView {
    GalleryView {
        uid: uid.to_string(),
        tiles: media
            .iter()
            .enumerate()
            .map(|(index, m)| present_media(uid, index, m, is_authorized, loader))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntityTag;

    fn media(url: &str, tags: usize) -> MediaWithTags {
        MediaWithTags {
            media_url: url.to_string(),
            entity_tags: vec![EntityTag::default(); tags],
        }
    }

    fn loader() -> SquarePreviewLoader {
        SquarePreviewLoader::new("https://media.example.org/")
    }

    #[test]
    fn test_tile() {
        let tile = present_media("u-1", 0, &media("/u/u-1/abc.jpg", 0), false, &loader());

        assert_eq!(tile.share_href, "/p/u-1/abc.jpg");
        assert!(tile.is_hero);
        assert_eq!(tile.loading, "eager");
        assert_eq!(
            tile.image_src,
            "https://media.example.org/u/u-1/abc.jpg?w=300&h=300&q=90&format=webp"
        );
    }

    #[test]
    fn test_remove_requires_no_tags_and_authorization() {
        let l = loader();

        assert!(present_media("u", 1, &media("a.jpg", 0), true, &l).can_remove);
        assert!(!present_media("u", 1, &media("a.jpg", 0), false, &l).can_remove);
        assert!(!present_media("u", 1, &media("a.jpg", 2), true, &l).can_remove);
    }

    #[test]
    fn test_gallery_order_and_hero() {
        let items = vec![media("one.jpg", 0), media("two.jpg", 1), media("three.jpg", 0)];

        let gallery = present_gallery("u-2", &items, false, &loader());

        let hrefs: Vec<_> = gallery.tiles.iter().map(|t| t.share_href.as_str()).collect();
        assert_eq!(hrefs, vec!["/p/u-2/one.jpg", "/p/u-2/two.jpg", "/p/u-2/three.jpg"]);
        assert!(gallery.tiles[0].is_hero);
        assert!(!gallery.tiles[1].is_hero);
        assert_eq!(gallery.tiles[2].loading, "lazy");
    }

    #[test]
    fn test_loader_quality_is_clamped() {
        let l = SquarePreviewLoader::new("https://cdn").quality(250);
        assert!(l.src("x.jpg", 100).ends_with("q=100&format=webp"));
    }
}
