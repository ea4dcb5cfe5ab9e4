//! Navigation targets
//!
//! Every dynamic path segment is percent-encoded.

use urlencoding::encode;

/// `/u/{username}`
pub fn profile_path(username: &str) -> String {
    format!("/u/{}", encode(username))
}

/// `/crag/{uuid}`
pub fn area_path(uuid: &str) -> String {
    format!("/crag/{}", encode(uuid))
}

/// `/climbs/{id}`
pub fn climb_path(id: &str) -> String {
    format!("/climbs/{}", encode(id))
}

/// `/p/{uid}/{basename}` for a user media file
pub fn media_share_path(uid: &str, media_url: &str) -> String {
    format!("/p/{}/{}", encode(uid), encode(basename(media_url)))
}

/// Last path component, ignoring trailing slashes
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(profile_path("vnc"), "/u/vnc");
        assert_eq!(area_path("6a7f-11"), "/crag/6a7f-11");
        assert_eq!(climb_path("c1"), "/climbs/c1");
    }

    #[test]
    fn test_segments_are_encoded() {
        assert_eq!(profile_path("jane doe"), "/u/jane%20doe");
        assert_eq!(climb_path("a/b"), "/climbs/a%2Fb");
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("/u/abc/photo.jpg"), "photo.jpg");
        assert_eq!(basename("photo.jpg"), "photo.jpg");
        assert_eq!(basename("/u/abc/dir/"), "dir");
        assert_eq!(basename(""), "");
    }

    #[test]
    fn test_media_share_path() {
        assert_eq!(
            media_share_path("user-1", "/u/user-1/hx83kd.jpeg"),
            "/p/user-1/hx83kd.jpeg"
        );
    }
}
