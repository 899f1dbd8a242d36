// Copyright (c) 2023 the Hearth contributors.
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::config::FieldMode;

/// A row-major grid of field samples. Row 0 is the bottom of glyph space.
#[derive(Clone, Debug, PartialEq)]
pub struct Plane<T> {
    pub data: Vec<T>,
    pub width: u32,
    pub height: u32,
}

impl<T: Copy + Default> Plane<T> {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![T::default(); width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn filled(width: u32, height: u32, value: T) -> Self {
        Self {
            data: vec![value; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Copies `self` into `dst` with its lower-left corner at `(x, y)`.
    pub fn copy_to(&self, dst: &mut Plane<T>, x: u32, y: u32) {
        if !fits_within(x, self.width, dst.width) || !fits_within(y, self.height, dst.height) {
            panic!("copy_to out-of-bounds");
        }

        let width = self.width as usize;
        let mut src_cursor = 0;
        let mut dst_cursor = y as usize * dst.width as usize + x as usize;
        for _ in 0..self.height {
            let src_range = src_cursor..(src_cursor + width);
            let dst_range = dst_cursor..(dst_cursor + width);
            dst.data[dst_range].copy_from_slice(&self.data[src_range]);
            src_cursor += width;
            dst_cursor += dst.width as usize;
        }
    }
}

/// Whether `len` texels starting at `pos` end at or before `limit`.
pub fn fits_within(pos: u32, len: u32, limit: u32) -> bool {
    pos.checked_add(len).map_or(false, |end| end <= limit)
}

/// A rendered distance field, either three-channel or single-channel.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldBitmap {
    Multi(Plane<[f32; 3]>),
    Single(Plane<f32>),
}

impl FieldBitmap {
    /// An empty (all zero) field of the layout `mode` renders to.
    pub fn blank(mode: FieldMode, width: u32, height: u32) -> Self {
        match mode {
            FieldMode::Msdf => FieldBitmap::Multi(Plane::new(width, height)),
            FieldMode::Sdf | FieldMode::PseudoSdf => FieldBitmap::Single(Plane::new(width, height)),
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            FieldBitmap::Multi(plane) => plane.width,
            FieldBitmap::Single(plane) => plane.width,
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            FieldBitmap::Multi(plane) => plane.height,
            FieldBitmap::Single(plane) => plane.height,
        }
    }

    pub fn channels(&self) -> usize {
        match self {
            FieldBitmap::Multi(_) => 3,
            FieldBitmap::Single(_) => 1,
        }
    }

    /// Blits `src` into `self` at `(x, y)`. Returns false if the two fields
    /// have different channel layouts.
    pub fn place(&mut self, x: u32, y: u32, src: &FieldBitmap) -> bool {
        match (self, src) {
            (FieldBitmap::Multi(dst), FieldBitmap::Multi(src)) => src.copy_to(dst, x, y),
            (FieldBitmap::Single(dst), FieldBitmap::Single(src)) => src.copy_to(dst, x, y),
            _ => return false,
        }

        true
    }

    /// Converts one row of samples to bytes, `channels()` bytes per texel.
    pub fn row_bytes(&self, row: u32, out: &mut Vec<u8>) {
        let width = self.width() as usize;
        let start = row as usize * width;
        match self {
            FieldBitmap::Multi(plane) => {
                for texel in &plane.data[start..start + width] {
                    out.extend(texel.iter().copied().map(to_byte));
                }
            }
            FieldBitmap::Single(plane) => {
                out.extend(plane.data[start..start + width].iter().copied().map(to_byte));
            }
        }
    }

    /// All texels as bytes, bottom row first.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            self.width() as usize * self.height() as usize * self.channels(),
        );

        for row in 0..self.height() {
            self.row_bytes(row, &mut out);
        }

        out
    }
}

/// Maps a field sample to a byte: `clamp(trunc(v * 256), 0, 255)`.
pub fn to_byte(v: f32) -> u8 {
    ((v * 256.0) as i32).clamp(0, 255) as u8
}
