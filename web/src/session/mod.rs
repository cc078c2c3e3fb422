pub mod events;
pub mod manager;
pub mod state;

pub use events::{AuthEvent, AuthEvents, SubscriptionId};
pub use manager::{SessionError, SessionManager};
pub use state::{Credential, ROLE_KEY, SESSION_KEYS, TOKEN_KEY, USERNAME_KEY};
