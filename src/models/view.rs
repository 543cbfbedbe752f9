use super::Video;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Ascending => "A → Z",
            SortOrder::Descending => "Z → A",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Dashboard,
    Player,
}

/// Ephemeral UI inputs. Nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub search_text: String,
    pub sort_order: SortOrder,
    pub selected: Option<Video>,
}

impl ViewState {
    pub fn display_mode(&self) -> DisplayMode {
        if self.selected.is_some() {
            DisplayMode::Player
        } else {
            DisplayMode::Dashboard
        }
    }
}
