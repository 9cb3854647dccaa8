// Level input: static collision brushes plus the committed nav graph.
//
// A `Brush` is a polygon in local space placed at a world `location`, tagged
// with how solid it is. The builder only reads brushes; it never edits them.
// `Level::navigator` holds the last successfully built graph, or `None`.
//
// Winding convention: vertices run clockwise in a y-up frame, so the outward
// normal of edge `v1 -> v2` is `perp(normalize(v2 - v1))`. A box spanning
// `x0..x1`, `y0..y1` is `[(x0,y0), (x0,y1), (x1,y1), (x1,y0)]`.
//
// See also: `builder.rs` which installs and clears `navigator`, `oracle.rs`
// which answers spatial queries over the solid brushes.

use crate::error::Result;
use crate::graph::NavGraph;
use ledgewalk_geom::Vec2;
use serde::{Deserialize, Serialize};

/// How a brush interacts with movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrushKind {
    /// Blocks everything.
    Solid,
    /// One-way platform: blocks only where its surface is walkable, never
    /// contains points.
    SemiSolid,
    /// Decoration or trigger volume. Ignored by the builder.
    NotSolid,
}

/// A polygonal piece of level geometry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Brush {
    /// Polygon in local space, clockwise in a y-up frame.
    pub vertices: Vec<Vec2>,
    /// World-space offset of the local origin.
    pub location: Vec2,
    pub kind: BrushKind,
}

impl Brush {
    pub fn new(vertices: Vec<Vec2>, location: Vec2, kind: BrushKind) -> Self {
        Self {
            vertices,
            location,
            kind,
        }
    }

    /// An axis-aligned box covering world `x0..x1`, `y0..y1`, with its local
    /// origin at the bottom-left corner.
    pub fn rect(x0: f32, y0: f32, x1: f32, y1: f32, kind: BrushKind) -> Self {
        let (w, h) = (x1 - x0, y1 - y0);
        Self::new(
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(0.0, h),
                Vec2::new(w, h),
                Vec2::new(w, 0.0),
            ],
            Vec2::new(x0, y0),
            kind,
        )
    }

    /// Solid or semi-solid brushes take part in path building.
    pub fn is_collidable(&self) -> bool {
        self.kind != BrushKind::NotSolid && self.vertices.len() >= 3
    }

    /// World-space vertex positions.
    pub fn world_vertices(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.vertices.iter().map(|&v| v + self.location)
    }
}

/// A level as the path builder sees it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub brushes: Vec<Brush>,
    /// The committed navigation graph. Never read from level files; a loaded
    /// level always starts without one.
    #[serde(skip)]
    pub navigator: Option<NavGraph>,
}

impl Level {
    pub fn new(name: impl Into<String>, brushes: Vec<Brush>) -> Self {
        Self {
            name: name.into(),
            brushes,
            navigator: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
