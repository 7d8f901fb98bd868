//! # formfile-engine
//!
//! The non-visual half of a formfile session: deciding whether submitted
//! values are acceptable ([`validate`]), assembling a timestamped
//! [`ResponseRecord`], and writing it somewhere durable ([`persist`]).
//! [`session`] ties the pieces together around a presentation-layer seam;
//! the engine only ever sees plain strings and parsed items, never widgets.

pub mod persist;
pub mod record;
pub mod session;
pub mod validate;

pub use persist::{Dispatcher, PersistError, PersistenceTarget};
pub use record::{RecordError, ResponseRecord};
pub use session::{Presenter, Session, SessionError, SubmitOutcome};
pub use validate::{validate, ValidationError};
