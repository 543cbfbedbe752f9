pub mod identifiers;
pub mod session;
pub mod status;
pub mod video;
pub mod view;

pub use identifiers::VideoId;
pub use session::{Credential, Session};
pub use status::{OperationStatus, StatusSnapshot};
pub use video::{NewVideo, UserProfile, Video, thumbnail_url_for};
pub use view::{DisplayMode, SortOrder, ViewState};
