//! Terminal client: HTTP access, view-model state machine, rendering.

pub mod http;
pub mod state;
pub mod ui;

pub use http::{ApiClient, ClientError};
pub use state::{ApiEvent, AppModel, Command, EntryPhase, Focus, ListPhase};
