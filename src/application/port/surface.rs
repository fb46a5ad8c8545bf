// SPDX-License-Identifier: MPL-2.0
//! Presentation surface port definition.

/// A streaming planar YUV 4:2:0 texture the pipeline writes frames into.
pub trait VideoSurface {
    /// Luma width and height in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Replaces the surface contents with three planes.
    ///
    /// Each plane is given with its row stride in bytes, which may be wider
    /// than the visible row.
    fn update_yuv(
        &mut self,
        y: &[u8],
        y_stride: usize,
        u: &[u8],
        u_stride: usize,
        v: &[u8],
        v_stride: usize,
    );
}
