pub mod events_model;
pub mod events_traits;

pub use events_model::ViewEvent;
pub use events_traits::{ChannelViewNotifier, NoopViewNotifier, ViewNotifierTrait};
