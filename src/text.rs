/// Styled text segments, the input of a layout.
pub mod data;
/// The layout cache and its public mutation surface.
pub mod layout;
/// Runs and lines with their cached geometry.
pub mod line;
/// Content size resolution under padding and maximum size.
pub mod size;
/// Case transforms and word splitting.
pub mod transform;
/// The word-wrap accumulator.
pub mod wrap;

pub use data::StyledText;
pub use layout::StyledTextLayout;
pub use line::{Line, LineExtents, Run};
pub use size::{ClipMode, SizePolicy};
pub use transform::{split_words, transform};
pub use wrap::{LayoutMode, WrapSettings, append_segment};
