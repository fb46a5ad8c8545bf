// SPDX-License-Identifier: MPL-2.0
//! CPU-side streaming texture.

use crate::application::port::VideoSurface;
use crate::domain::video::TextureSize;

/// Tightly packed YUV 4:2:0 planes sized once per opened file.
///
/// Every update overwrites the planes in place and bumps [`generation`],
/// which a renderer compares against to know when to re-upload.
///
/// [`generation`]: FrameSurface::generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSurface {
    size: TextureSize,
    y: Vec<u8>,
    u: Vec<u8>,
    v: Vec<u8>,
    generation: u64,
}

impl FrameSurface {
    /// Allocates black planes for `size`.
    #[must_use]
    pub fn new(size: TextureSize) -> Self {
        let (cw, ch) = size.chroma();
        let luma = size.width as usize * size.height as usize;
        let chroma = cw as usize * ch as usize;
        Self {
            size,
            y: vec![16; luma],
            u: vec![128; chroma],
            v: vec![128; chroma],
            generation: 0,
        }
    }

    #[must_use]
    pub fn size(&self) -> TextureSize {
        self.size
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Luma plane, `width` bytes per row.
    #[must_use]
    pub fn y_plane(&self) -> &[u8] {
        &self.y
    }

    /// Blue-difference plane, half width and height rounded up.
    #[must_use]
    pub fn u_plane(&self) -> &[u8] {
        &self.u
    }

    /// Red-difference plane, half width and height rounded up.
    #[must_use]
    pub fn v_plane(&self) -> &[u8] {
        &self.v
    }
}

/// Copies `rows` rows of `width` bytes from a strided source into a packed plane.
fn copy_plane(dst: &mut [u8], src: &[u8], src_stride: usize, width: usize, rows: usize) {
    if width == 0 || src_stride < width {
        return;
    }
    for (row, dst_row) in dst.chunks_exact_mut(width).take(rows).enumerate() {
        let start = row * src_stride;
        if let Some(src_row) = src.get(start..start + width) {
            dst_row.copy_from_slice(src_row);
        }
    }
}

impl VideoSurface for FrameSurface {
    fn dimensions(&self) -> (u32, u32) {
        (self.size.width, self.size.height)
    }

    fn update_yuv(
        &mut self,
        y: &[u8],
        y_stride: usize,
        u: &[u8],
        u_stride: usize,
        v: &[u8],
        v_stride: usize,
    ) {
        let (w, h) = (self.size.width as usize, self.size.height as usize);
        let (cw, ch) = self.size.chroma();
        let (cw, ch) = (cw as usize, ch as usize);
        copy_plane(&mut self.y, y, y_stride, w, h);
        copy_plane(&mut self.u, u, u_stride, cw, ch);
        copy_plane(&mut self.v, v, v_stride, cw, ch);
        self.generation += 1;
    }
}
