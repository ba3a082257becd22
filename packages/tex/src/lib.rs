//! # tex — editable math blocks without a UI framework
//!
//! The pieces a TeX block needs, kept free of any rendering toolkit so they can
//! be unit tested and reused by every frontend.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`math`] | Parse and render LaTeX through pulldown-latex (MathML output, escaped error fallback). |
//! | [`output`] | [`TypesetOutput`]: debounced, cancellable rendering onto a [`RenderSurface`]. |
//! | [`block`] | [`TexBlock`]: the viewing/editing state machine and its [`BlockHost`] callbacks. |
//! | [`view`] | [`TexBlockView`]: what a frontend draws for a block in its current state. |
//! | [`live`] | [`LiveEdits`]: which blocks are being edited, for the host document. |

pub mod block;
pub mod live;
pub mod math;
pub mod output;
pub mod view;

pub use block::{BlockHost, BlurOutcome, CommitError, Mode, TexBlock, TextDraft};
pub use live::LiveEdits;
pub use math::{MathError, MathResult};
pub use output::{RenderSurface, Scheduler, TickScheduler, TypesetOutput};
pub use view::{ButtonView, TexBlockView};
