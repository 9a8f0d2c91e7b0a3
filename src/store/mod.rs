pub mod background;
pub mod protocol;
pub mod url_store;

pub use background::{spawn_background, StoreError, StoreHandle};
pub use url_store::TrimPolicy;
