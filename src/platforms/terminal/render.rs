use std::fmt::Write;

use crate::core::viewmodels::{AddVideoForm, NowPlaying};
use crate::models::{OperationStatus, Video, ViewState};

pub const HELP: &str = "\
Commands:
  login <email> <password>            sign in
  register <name> <email> <password>  create an account
  logout | whoami
  refresh                             reload videos from the server
  search [text]                       filter by title (empty clears)
  sort                                flip A → Z / Z → A
  title|desc|source <text>            fill the add-video form
  add                                 submit the form
  delete <row|id>                     remove a video
  play <row|id> | back
  help | quit";

pub fn status_line(status: &OperationStatus) -> Option<String> {
    match status {
        OperationStatus::Idle => None,
        OperationStatus::Loading => Some("… loading".to_string()),
        OperationStatus::Error(message) => Some(format!("✗ {message}")),
        OperationStatus::Success(message) => Some(format!("✓ {message}")),
    }
}

pub fn anonymous() -> String {
    "Not logged in. Use 'login <email> <password>' or 'register <name> <email> <password>'."
        .to_string()
}

/// Dashboard listing with the view controls and the pending form.
pub fn dashboard(rows: &[Video], total: usize, view: &ViewState, form: &AddVideoForm) -> String {
    let mut out = String::new();
    let _ = write!(out, "Videos ({total}) · sort {}", view.sort_order.label());
    if !view.search_text.is_empty() {
        let _ = write!(out, " · search \"{}\"", view.search_text);
    }
    out.push('\n');

    if rows.is_empty() {
        out.push_str("  (no videos)\n");
    }
    for (index, video) in rows.iter().enumerate() {
        let _ = writeln!(out, "  {}. {} [{}]", index + 1, video.title, video.id);
        if !video.description.is_empty() {
            let _ = writeln!(out, "     {}", video.description);
        }
        let _ = writeln!(out, "     {}", video.thumbnail());
    }

    if *form != AddVideoForm::default() {
        let _ = writeln!(
            out,
            "New video: title=\"{}\" description=\"{}\" source=\"{}\"",
            form.title, form.description, form.source_id
        );
    }
    out
}

pub fn player(now_playing: &NowPlaying) -> String {
    let video = &now_playing.video;
    let mut out = format!("▶ {}\n", video.title);
    if !video.description.is_empty() {
        let _ = writeln!(out, "  {}", video.description);
    }
    let _ = writeln!(out, "  stream: {}", now_playing.stream_url);
    out.push_str("  (type 'back' to return)\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PLACEHOLDER_THUMBNAIL_URL;
    use crate::models::{SortOrder, VideoId};

    fn video(id: &str, title: &str) -> Video {
        Video {
            id: VideoId::new(id),
            title: title.to_string(),
            description: String::new(),
            source_id: String::new(),
            thumbnail_url: None,
        }
    }

    #[test]
    fn test_status_line() {
        assert_eq!(status_line(&OperationStatus::Idle), None);
        assert_eq!(
            status_line(&OperationStatus::Error("Failed to load videos".into())).unwrap(),
            "✗ Failed to load videos"
        );
    }

    #[test]
    fn test_dashboard_rows_are_numbered() {
        let view = ViewState {
            search_text: "a".into(),
            sort_order: SortOrder::Descending,
            selected: None,
        };
        let out = dashboard(
            &[video("1", "Banana"), video("2", "apple")],
            5,
            &view,
            &AddVideoForm::default(),
        );

        assert!(out.starts_with("Videos (5) · sort Z → A · search \"a\"\n"));
        assert!(out.contains("  1. Banana [1]\n"));
        assert!(out.contains("  2. apple [2]\n"));
        assert!(out.contains(PLACEHOLDER_THUMBNAIL_URL));
        assert!(!out.contains("New video"));
    }

    #[test]
    fn test_dashboard_shows_pending_form() {
        let form = AddVideoForm {
            title: "Cats".into(),
            ..Default::default()
        };
        let out = dashboard(&[], 0, &ViewState::default(), &form);
        assert!(out.contains("(no videos)"));
        assert!(out.contains("title=\"Cats\""));
    }

    #[test]
    fn test_player() {
        let out = player(&NowPlaying {
            video: video("x", "Cats"),
            stream_url: "http://h/video/x/stream".into(),
        });
        assert!(out.starts_with("▶ Cats\n"));
        assert!(out.contains("stream: http://h/video/x/stream"));
    }
}
