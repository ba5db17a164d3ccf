#![forbid(unsafe_code)]

//! Core: vocabularies, token parsing, per-flap state machines, and row control.
//!
//! Nothing in this crate draws. Rendering is delegated to a
//! [`flap::FlapRenderer`] supplied by the host (see `flap-widgets` for the
//! terminal implementation).
//!
//! ```
//! use flap_core::splitflap::{DataSource, Splitflap};
//! use flap_core::flap::NullRenderer;
//!
//! struct Board;
//! impl DataSource for Board {
//!     fn number_of_flaps(&self) -> usize {
//!         5
//!     }
//! }
//!
//! let mut row: Splitflap<NullRenderer> = Splitflap::new().with_data_source(Board);
//! row.reload();
//! row.set_text(Some("hello"));
//! assert_eq!(row.text(), Some("hello"));
//! ```

pub mod animation;
pub mod cursor;
pub mod flap;
pub mod logging;
pub mod parser;
pub mod splitflap;
pub mod token;

pub use animation::{Completion, CompletionGroup};
pub use cursor::TokenCursor;
pub use flap::{Flap, FlapPhase, FlapRenderer};
pub use parser::TokenParser;
pub use splitflap::{DataSource, Delegate, FlapId, Splitflap};
pub use token::{Token, TokenSets, Vocabulary};
