//! Mesh and sprite-sheet loading
//!
//! The core never reads files. A host `AssetLoader` turns paths into opaque
//! handles; `MeshSet` collects every handle the game draws with, either
//! failing fast or substituting placeholders so nothing draws with a bad handle.

use std::collections::HashMap;

use log::{info, warn};
use thiserror::Error;

use crate::consts::EXPLOSION_FRAMES;

pub const SHIP_MESH: &str = "meshes/player-ship.obj";
pub const ASTEROID_MESH: &str = "meshes/asteroid.obj";
pub const MISSILE_MESH: &str = "meshes/missile.obj";
pub const ENEMY_SHIP_MESH: &str = "meshes/enemy-ship.obj";
pub const ENEMY_MISSILE_MESH: &str = "meshes/enemy-missile.obj";
pub const EXPLOSION_SHEET: &str = "media/explosion.tga";

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// Invalid asset data
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Opaque renderable mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

/// Opaque sprite sheet of equally sized frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetHandle {
    pub id: u32,
    pub frames: usize,
}

/// Host-side loader for meshes and sheets
pub trait AssetLoader {
    fn load_mesh(&mut self, path: &str) -> Result<MeshHandle, AssetError>;
    fn load_sheet(&mut self, path: &str, frames: usize) -> Result<SheetHandle, AssetError>;
    /// Always-valid stand-in mesh (e.g. a unit cube)
    fn placeholder_mesh(&mut self) -> MeshHandle;
    /// Always-valid stand-in sheet
    fn placeholder_sheet(&mut self) -> SheetHandle;
}

/// Every handle the game draws with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshSet {
    pub ship: MeshHandle,
    pub asteroid: MeshHandle,
    pub missile: MeshHandle,
    pub enemy_ship: MeshHandle,
    pub enemy_missile: MeshHandle,
    pub explosion: SheetHandle,
}

impl MeshSet {
    /// Load everything, stopping at the first failure
    pub fn load(loader: &mut impl AssetLoader) -> Result<Self, AssetError> {
        let set = Self {
            ship: loader.load_mesh(SHIP_MESH)?,
            asteroid: loader.load_mesh(ASTEROID_MESH)?,
            missile: loader.load_mesh(MISSILE_MESH)?,
            enemy_ship: loader.load_mesh(ENEMY_SHIP_MESH)?,
            enemy_missile: loader.load_mesh(ENEMY_MISSILE_MESH)?,
            explosion: loader.load_sheet(EXPLOSION_SHEET, EXPLOSION_FRAMES)?,
        };
        info!("Loaded game meshes and explosion sheet");
        Ok(set)
    }

    /// Load everything, swapping failures for placeholders
    pub fn load_or_placeholder(loader: &mut impl AssetLoader) -> Self {
        let ship = mesh_or_placeholder(loader, SHIP_MESH);
        let asteroid = mesh_or_placeholder(loader, ASTEROID_MESH);
        let missile = mesh_or_placeholder(loader, MISSILE_MESH);
        let enemy_ship = mesh_or_placeholder(loader, ENEMY_SHIP_MESH);
        let enemy_missile = mesh_or_placeholder(loader, ENEMY_MISSILE_MESH);
        let explosion = match loader.load_sheet(EXPLOSION_SHEET, EXPLOSION_FRAMES) {
            Ok(sheet) => sheet,
            Err(e) => {
                warn!("{}; using placeholder sheet", e);
                loader.placeholder_sheet()
            }
        };

        Self {
            ship,
            asteroid,
            missile,
            enemy_ship,
            enemy_missile,
            explosion,
        }
    }
}

fn mesh_or_placeholder(loader: &mut impl AssetLoader, path: &str) -> MeshHandle {
    match loader.load_mesh(path) {
        Ok(handle) => handle,
        Err(e) => {
            warn!("{}; using placeholder mesh", e);
            loader.placeholder_mesh()
        }
    }
}

/// Loader over a fixed catalog of known paths; hands out sequential handles
#[derive(Debug, Clone, Default)]
pub struct CatalogLoader {
    known: HashMap<String, u32>,
    next_id: u32,
}

impl CatalogLoader {
    pub fn new<'a>(paths: impl IntoIterator<Item = &'a str>) -> Self {
        let mut loader = Self::default();
        for path in paths {
            loader.register(path);
        }
        loader
    }

    /// Catalog holding every asset the game uses
    pub fn with_game_assets() -> Self {
        Self::new([
            SHIP_MESH,
            ASTEROID_MESH,
            MISSILE_MESH,
            ENEMY_SHIP_MESH,
            ENEMY_MISSILE_MESH,
            EXPLOSION_SHEET,
        ])
    }

    pub fn register(&mut self, path: &str) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        *self.known.entry(path.to_string()).or_insert(id)
    }

    fn lookup(&self, path: &str) -> Result<u32, AssetError> {
        self.known
            .get(path)
            .copied()
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }
}

impl AssetLoader for CatalogLoader {
    fn load_mesh(&mut self, path: &str) -> Result<MeshHandle, AssetError> {
        if !path.ends_with(".obj") {
            return Err(AssetError::InvalidData(format!("{} is not a Wavefront mesh", path)));
        }
        self.lookup(path).map(MeshHandle)
    }

    fn load_sheet(&mut self, path: &str, frames: usize) -> Result<SheetHandle, AssetError> {
        if frames == 0 {
            return Err(AssetError::LoadFailed(format!("{} has no frames", path)));
        }
        let id = self.lookup(path)?;
        Ok(SheetHandle { id, frames })
    }

    fn placeholder_mesh(&mut self) -> MeshHandle {
        MeshHandle(self.register("<placeholder mesh>"))
    }

    fn placeholder_sheet(&mut self) -> SheetHandle {
        SheetHandle {
            id: self.register("<placeholder sheet>"),
            frames: 1,
        }
    }
}
