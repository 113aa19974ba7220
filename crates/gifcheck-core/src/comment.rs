//! Comment marker and body construction

use serde::{
    Deserialize,
    Serialize,
};

/// Footer appended to every comment the notifier posts. Cleanup matches
/// this exact substring to find its own comments among everyone else's.
pub const COMMENT_MARKER: &str = "<sub>;)</sub>";

/// A gif ready to be embedded in a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gif {
    pub title: String,
    pub url: String,
}

/// Whether a comment body was written by this notifier.
pub fn is_notifier_comment(body: &str) -> bool {
    body.contains(COMMENT_MARKER)
}

/// Builds the markdown body for a gif comment: the image with the gif
/// title as alt text, then the marker on its own line.
pub fn gif_comment_body(gif: &Gif) -> String {
    format!("![{}]({})\n\n{}", gif.title, gif.url, COMMENT_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_match() {
        assert!(!is_notifier_comment("hi"));
        assert!(is_notifier_comment("ok <sub>;)</sub>"));
        assert!(is_notifier_comment(&gif_comment_body(&Gif {
            title: "Party".to_string(),
            url: "https://gifs.example/party.gif".to_string(),
        })));
    }

    #[test]
    fn test_body_embeds_image_then_marker() {
        let gif = Gif {
            title: "Excited".to_string(),
            url: "https://gifs.example/excited.gif".to_string(),
        };

        let body = gif_comment_body(&gif);
        assert!(body.starts_with("![Excited](https://gifs.example/excited.gif)"));
        assert!(body.ends_with(COMMENT_MARKER));
    }
}
