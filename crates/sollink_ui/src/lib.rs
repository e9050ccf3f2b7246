pub mod address;
pub mod controller;
pub mod header;
pub mod region;
pub mod view;

pub use address::format_address;
pub use controller::HeaderController;
pub use header::{Effect, Header, HeaderEvent, HeaderState};
pub use region::{Point, PointerHub, PointerListener, Rect, Region};
pub use view::{HeaderButton, HeaderView, ModalView, render_text};
