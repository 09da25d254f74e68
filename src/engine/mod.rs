//! Car filtering and pagination engine.
//!
//! Pure, synchronous building blocks: nothing in here performs I/O. The only
//! asynchronous piece is [`autoplay`], which owns a cancellable timer task.

pub mod autoplay;
pub mod browser;
pub mod filter;
pub mod gesture;
pub mod memo;
pub mod paginator;
pub mod summary;

pub use autoplay::{Autoplay, AutoplayHandle, AUTOPLAY_INTERVAL};
pub use browser::{CarBrowser, PageView};
pub use gesture::{GestureController, PageCommand, SWIPE_THRESHOLD};
pub use memo::FilterMemo;
pub use summary::{describe, format_price, FilterSummary};
