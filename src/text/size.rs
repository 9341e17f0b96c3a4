use euclid::default::{SideOffsets2D, Size2D};

use crate::text::line::LineExtents;

/// Whether the reported size may exceed the maximum size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClipMode {
    #[default]
    Clip,
    NoClip,
}

/// Inputs of the content size computation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizePolicy {
    pub padding: SideOffsets2D<f32>,
    /// Negative components are unconstrained.
    pub max_size: Size2D<f32>,
    pub clip_mode: ClipMode,
    /// Report the natural size instead of the full maximum size when the
    /// content is smaller.
    pub size_trimming: bool,
}

impl Default for SizePolicy {
    fn default() -> Self {
        Self {
            padding: SideOffsets2D::zero(),
            max_size: Size2D::new(-1.0, -1.0),
            clip_mode: ClipMode::Clip,
            size_trimming: false,
        }
    }
}

impl SizePolicy {
    /// The usable wrap width, `None` when unconstrained or when padding
    /// leaves no room.
    pub fn wrap_width(&self) -> Option<f32> {
        if self.max_size.width < 0.0 {
            return None;
        }
        let width = self.max_size.width - self.padding.horizontal();
        (width > 0.0).then_some(width)
    }

    /// Whether the size is held at the maximum instead of the content size.
    fn fixed(&self) -> bool {
        !self.size_trimming && self.clip_mode != ClipMode::NoClip
    }

    /// Computes the integer pixel size of the content.
    ///
    /// Takes each line's extents and leading offset. Lines only ever add
    /// height; a negative leading offset can't shrink the total.
    pub fn resolve(&self, lines: impl IntoIterator<Item = (LineExtents, f32)>) -> Size2D<i32> {
        let pad = self.padding;
        let max = self.max_size;
        let mut size = Size2D::new(0, 0);

        if max.width < 0.0 || pad.horizontal() <= max.width {
            let mut width = pad.horizontal();
            let mut height = pad.vertical();

            for (extents, leading_offset) in lines {
                width = width.max(extents.width + pad.horizontal());
                height = height.max(height + extents.height + leading_offset);
            }

            if max.width >= 0.0 {
                if self.fixed() {
                    width = max.width;
                } else if self.clip_mode == ClipMode::Clip {
                    width = width.min(max.width);
                }
            }

            let (w, h) = (width.ceil() as i32, height.ceil() as i32);
            if w >= 0 && h >= 0 {
                size = Size2D::new(w, h);
            }
        }

        if max.height >= 0.0 || pad.vertical() <= max.height {
            if self.fixed() {
                size.height = max.height.ceil() as i32;
            } else if self.clip_mode == ClipMode::Clip {
                size.height = (size.height as f32).min(max.height).ceil() as i32;
            }
            size.height = size.height.max(0);
        }

        log::debug!("Resolved text size {}x{}", size.width, size.height);
        size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(width: f32, height: f32) -> (LineExtents, f32) {
        (
            LineExtents {
                width,
                height,
                ..LineExtents::default()
            },
            0.0,
        )
    }

    fn policy(max: (f32, f32), clip_mode: ClipMode, size_trimming: bool) -> SizePolicy {
        SizePolicy {
            padding: SideOffsets2D::new(10.0, 10.0, 10.0, 10.0),
            max_size: Size2D::new(max.0, max.1),
            clip_mode,
            size_trimming,
        }
    }

    fn content() -> Vec<(LineExtents, f32)> {
        vec![line(50.5, 16.0), line(120.0, 16.0)]
    }

    #[test]
    fn unconstrained_uses_content_plus_padding() {
        let size = policy((-1.0, -1.0), ClipMode::Clip, false).resolve(content());
        assert_eq!(size, Size2D::new(140, 52));
    }

    #[test]
    fn clip_without_trimming_is_fixed_to_max() {
        let narrow = policy((200.0, 100.0), ClipMode::Clip, false).resolve(content());
        assert_eq!(narrow, Size2D::new(200, 100));

        let wide = policy((100.0, 40.0), ClipMode::Clip, false).resolve(content());
        assert_eq!(wide, Size2D::new(100, 40));
    }

    #[test]
    fn clip_with_trimming_is_capped() {
        let narrow = policy((200.0, 100.0), ClipMode::Clip, true).resolve(content());
        assert_eq!(narrow, Size2D::new(140, 52));

        let wide = policy((100.0, 40.0), ClipMode::Clip, true).resolve(content());
        assert_eq!(wide, Size2D::new(100, 40));
    }

    #[test]
    fn no_clip_reports_natural_size() {
        for trimming in [false, true] {
            let narrow = policy((200.0, 100.0), ClipMode::NoClip, trimming).resolve(content());
            assert_eq!(narrow, Size2D::new(140, 52));

            let wide = policy((100.0, 40.0), ClipMode::NoClip, trimming).resolve(content());
            assert_eq!(wide, Size2D::new(140, 52));
        }
    }

    #[test]
    fn padding_wider_than_max_width_gives_zero_width() {
        let mut p = policy((15.0, -1.0), ClipMode::Clip, true);
        assert_eq!(p.resolve(content()), Size2D::new(0, 0));
        assert_eq!(p.wrap_width(), None);

        p.max_size.height = 30.0;
        p.size_trimming = false;
        assert_eq!(p.resolve(content()), Size2D::new(0, 30));
    }

    #[test]
    fn negative_size_clamps_both_axes() {
        let p = SizePolicy {
            padding: SideOffsets2D::new(0.0, -30.0, 0.0, -30.0),
            ..SizePolicy::default()
        };
        assert_eq!(p.resolve([line(20.0, 16.0)]), Size2D::new(0, 0));
    }

    #[test]
    fn negative_leading_offset_never_shrinks_height() {
        let p = SizePolicy::default();
        let lines = [(LineExtents { height: 16.0, ..Default::default() }, -20.0), line(0.0, 16.0)];
        assert_eq!(p.resolve(lines).height, 16);
    }

    #[test]
    fn wrap_width_subtracts_horizontal_padding() {
        assert_eq!(policy((100.0, -1.0), ClipMode::Clip, false).wrap_width(), Some(80.0));
        assert_eq!(policy((-1.0, -1.0), ClipMode::Clip, false).wrap_width(), None);
        assert_eq!(policy((20.0, -1.0), ClipMode::Clip, false).wrap_width(), None);
    }
}
