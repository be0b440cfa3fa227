//! Camera frames and the shared detection buffer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Size and orientation of an image stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageGeometry {
    /// Clockwise rotation needed to display the image upright, in degrees
    pub rotation: u32,
    pub width: u32,
    pub height: u32,
}

impl ImageGeometry {
    pub fn new(rotation: u32, width: u32, height: u32) -> Self {
        Self {
            rotation,
            width,
            height,
        }
    }

    /// Default geometry of the low resolution scan stream
    pub fn default_scan() -> Self {
        Self::new(90, 640, 480)
    }

    /// Default geometry of full resolution photos
    pub fn default_photo() -> Self {
        Self::new(90, 4032, 3024)
    }

    /// Non-empty with a rotation that is a multiple of 90
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0 && self.rotation % 90 == 0 && self.rotation < 360
    }
}

impl fmt::Display for ImageGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}@{}", self.width, self.height, self.rotation)
    }
}

/// One camera image in NV21 layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub geometry: ImageGeometry,
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(geometry: ImageGeometry, data: Vec<u8>) -> Self {
        Self { geometry, data }
    }
}

/// The buffer handed to the detector on every call.
///
/// It is allocated with the capacity the detector asks for, reused across
/// frames and cleared before each reuse. After a scan the buffer also holds
/// the detector's context for the following photo extraction, so only a
/// scan frame replaces its contents.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    data: Vec<u8>,
}

impl FrameBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Clear the buffer and copy `frame` into it
    pub fn load(&mut self, frame: &[u8]) {
        self.data.clear();
        self.data.extend_from_slice(frame);
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Replace the buffer with an empty one of `capacity` bytes
    pub fn reallocate(&mut self, capacity: usize) {
        self.data = Vec::with_capacity(capacity);
    }

    /// Make room for at least `capacity` bytes without touching the contents
    pub fn ensure_capacity(&mut self, capacity: usize) {
        if capacity > self.data.capacity() {
            self.data.reserve(capacity - self.data.len());
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access for detectors that write their results in place
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_geometries() {
        assert_eq!(ImageGeometry::default_scan(), ImageGeometry::new(90, 640, 480));
        assert_eq!(ImageGeometry::default_photo(), ImageGeometry::new(90, 4032, 3024));
        assert_eq!(ImageGeometry::default_scan().to_string(), "640x480@90");
    }

    #[test]
    fn geometry_validation() {
        assert!(ImageGeometry::new(0, 1, 1).is_valid());
        assert!(ImageGeometry::new(270, 640, 480).is_valid());
        assert!(!ImageGeometry::new(45, 640, 480).is_valid());
        assert!(!ImageGeometry::new(360, 640, 480).is_valid());
        assert!(!ImageGeometry::new(90, 0, 480).is_valid());
    }

    #[test]
    fn load_replaces_previous_contents() {
        let mut buffer = FrameBuffer::with_capacity(8);
        buffer.load(&[1, 2, 3, 4, 5]);
        buffer.load(&[9, 9]);
        assert_eq!(buffer.as_slice(), &[9, 9]);
    }

    #[test]
    fn ensure_capacity_keeps_contents() {
        let mut buffer = FrameBuffer::with_capacity(4);
        buffer.load(&[1, 2, 3]);
        buffer.ensure_capacity(1024);
        assert!(buffer.capacity() >= 1024);
        assert_eq!(buffer.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn in_place_writes_survive_growth() {
        let mut buffer = FrameBuffer::with_capacity(4);
        buffer.load(&[1, 2, 3]);
        buffer.as_mut_slice()[1] = 42;
        buffer.ensure_capacity(256);
        assert_eq!(buffer.as_slice(), &[1, 42, 3]);
    }

    #[test]
    fn reallocate_drops_contents() {
        let mut buffer = FrameBuffer::with_capacity(4);
        buffer.load(&[1, 2, 3]);
        buffer.reallocate(64);
        assert!(buffer.is_empty());
        assert!(buffer.capacity() >= 64);
    }
}
