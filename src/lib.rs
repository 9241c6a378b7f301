// polytess: polygon tessellation on a half-edge mesh
// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)

pub mod dict;
pub mod error;
pub mod geom;
pub mod mesh;
pub mod pool;
pub mod priorityq;
pub mod sweep;
pub mod tess;

pub use error::{Result, TessError};
pub use geom::{Point, Rect};
pub use tess::{
    Collected, FillRule, Polygon, Primitive, PrimitiveSink, TessConfig, TessMode, TessState,
    TessStats, Tessellator,
};
