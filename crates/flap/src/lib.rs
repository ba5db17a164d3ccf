#![forbid(unsafe_code)]

//! Split-flap display toolkit: public facade crate.
//!
//! ```
//! use flap::prelude::*;
//!
//! struct Departures;
//! impl DataSource for Departures {
//!     fn number_of_flaps(&self) -> usize {
//!         4
//!     }
//!     fn vocabulary(&self, _index: usize) -> Vocabulary {
//!         TokenSets::alphanumeric_and_space()
//!     }
//! }
//!
//! let mut row: Splitflap<FlapView> = Splitflap::new().with_data_source(Departures);
//! row.reload();
//! row.update_text(Some("GATE"), true, None);
//! while row.is_animating() {
//!     row.tick(Duration::from_millis(16));
//! }
//! assert_eq!(row.text(), Some("GATE"));
//! ```

pub use flap_core as core;
pub use flap_render as render;
pub use flap_widgets as widgets;

pub mod prelude {
    pub use flap_core::splitflap::{DataSource, Delegate, FlapId, Splitflap};
    pub use flap_core::{
        Completion, CompletionGroup, Flap, FlapRenderer, Token, TokenCursor, TokenParser,
        TokenSets, Vocabulary,
    };
    pub use flap_render::{Buffer, Cell, PackedRgba, Rect, StyleFlags};
    pub use flap_widgets::{Alignment, FlapStyle, FlapView, SplitflapBoard, Widget};
    pub use web_time::Duration;
}
