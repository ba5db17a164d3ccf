#![forbid(unsafe_code)]

//! Terminal widgets for split-flap boards.
//!
//! [`FlapView`] is the terminal implementation of the core's render
//! contract: plug it into a row as `Splitflap<FlapView>` and draw the row
//! with [`SplitflapBoard`].
//!
//! ```
//! use flap_core::splitflap::{DataSource, Splitflap};
//! use flap_render::Buffer;
//! use flap_widgets::{FlapView, SplitflapBoard, Widget};
//!
//! struct Three;
//! impl DataSource for Three {
//!     fn number_of_flaps(&self) -> usize {
//!         3
//!     }
//! }
//!
//! let mut row: Splitflap<FlapView> = Splitflap::new().with_data_source(Three);
//! row.reload();
//! row.set_text(Some("abc"));
//!
//! let mut buf = Buffer::new(5, 1);
//! SplitflapBoard::new(&row).render(buf.area(), &mut buf);
//! assert_eq!(buf.row_text(0), "a b c");
//! ```

pub mod board;
pub mod flap_view;
pub mod style;
pub mod tile;

pub use board::SplitflapBoard;
pub use flap_view::FlapView;
pub use style::{Alignment, FlapStyle};
pub use tile::{Tile, TilePair, TilePosition};

use flap_render::{Buffer, Rect};

/// Something that draws itself into a rectangle of a [`Buffer`].
pub trait Widget {
    /// Draw into `area`. Empty areas draw nothing.
    fn render(&self, area: Rect, buf: &mut Buffer);
}
