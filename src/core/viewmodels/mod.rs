pub mod collection;
pub mod mutations;
pub mod playback;
pub mod property;
pub mod session;
pub mod status;

pub use collection::{CollectionSynchronizer, RefreshOutcome};
pub use mutations::{AddVideoForm, MutationGateway, MutationOutcome};
pub use playback::{NowPlaying, PlaybackSelector};
pub use property::{Property, PropertySubscriber};
pub use session::{LoginOutcome, SessionManager};
pub use status::StatusBoard;
