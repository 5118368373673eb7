//! Work distribution for the render loop.
//!
//! Workers pull pixels from a shared atomic cursor, so no two threads
//! ever shade or write the same pixel.

use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicUsize, Ordering};

use glint_core::Color;

/// Hands out the pixels of an `nx` by `ny` image, one claim at a time.
pub(crate) struct PixelCursor {
    next: AtomicUsize,
    nx: usize,
    total: usize,
    progress: bool,
}

impl PixelCursor {
    pub(crate) fn new(nx: usize, ny: usize, progress: bool) -> Self {
        Self {
            next: AtomicUsize::new(0),
            nx,
            total: nx * ny,
            progress,
        }
    }

    /// Claim the next pixel as `(row, col)`, or `None` once the image is
    /// exhausted.
    pub(crate) fn claim(&self) -> Option<(usize, usize)> {
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        if index >= self.total {
            return None;
        }
        if self.progress {
            let percent = (index + 1) * 100 / self.total;
            if percent > index * 100 / self.total {
                log::info!("Rendered {percent}%");
            }
        }
        Some((index / self.nx, index % self.nx))
    }
}

/// Framebuffer storage shared across the worker pool.
///
/// The cursor hands out each pixel index at most once, which is what
/// makes the unlocked writes sound.
pub(crate) struct SharedPixels<'a> {
    slots: &'a [UnsafeCell<Color>],
}

unsafe impl Sync for SharedPixels<'_> {}

impl<'a> SharedPixels<'a> {
    pub(crate) fn new(pixels: &'a mut [Color]) -> Self {
        // UnsafeCell<Color> has the same layout as Color.
        let slots = unsafe { &*(pixels as *mut [Color] as *const [UnsafeCell<Color>]) };
        Self { slots }
    }

    /// Store the color for the pixel at `index`.
    pub(crate) fn write(&self, index: usize, color: Color) {
        // SAFETY: each index is claimed by exactly one worker.
        unsafe { *self.slots[index].get() = color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::Vec3;
    use std::thread;

    #[test]
    fn test_cursor_walks_rows_in_order() {
        let cursor = PixelCursor::new(3, 2, false);
        assert_eq!(cursor.claim(), Some((0, 0)));
        assert_eq!(cursor.claim(), Some((0, 1)));
        assert_eq!(cursor.claim(), Some((0, 2)));
        assert_eq!(cursor.claim(), Some((1, 0)));
    }

    #[test]
    fn test_cursor_exhausts_after_every_pixel() {
        let cursor = PixelCursor::new(4, 3, false);
        let mut seen = Vec::new();
        while let Some((row, col)) = cursor.claim() {
            seen.push(row * 4 + col);
        }
        assert_eq!(seen, (0..12).collect::<Vec<_>>());
        assert_eq!(cursor.claim(), None);
    }

    #[test]
    fn test_concurrent_claims_cover_each_pixel_once() {
        let cursor = PixelCursor::new(16, 16, false);
        let mut all = Vec::new();
        thread::scope(|scope| {
            let mut handles = Vec::new();
            for _ in 0..4 {
                handles.push(scope.spawn(|| {
                    let mut mine = Vec::new();
                    while let Some((row, col)) = cursor.claim() {
                        mine.push(row * 16 + col);
                    }
                    mine
                }));
            }
            for handle in handles {
                all.extend(handle.join().unwrap());
            }
        });
        all.sort_unstable();
        assert_eq!(all, (0..256).collect::<Vec<_>>());
    }

    #[test]
    fn test_shared_slots_take_parallel_writes() {
        let mut pixels = vec![Color::ZERO; 4];
        {
            let slots = SharedPixels::new(&mut pixels);
            thread::scope(|scope| {
                scope.spawn(|| {
                    slots.write(0, Vec3::splat(1.0));
                    slots.write(1, Vec3::splat(2.0));
                });
                scope.spawn(|| {
                    slots.write(2, Vec3::splat(3.0));
                    slots.write(3, Vec3::splat(4.0));
                });
            });
        }
        assert_eq!(
            pixels,
            vec![
                Vec3::splat(1.0),
                Vec3::splat(2.0),
                Vec3::splat(3.0),
                Vec3::splat(4.0),
            ]
        );
    }
}
