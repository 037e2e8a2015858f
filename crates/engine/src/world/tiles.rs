use super::map::MapConfigError;

pub type TileCode = u16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileDef {
    pub code: TileCode,
    pub name: String,
    pub walkable: bool,
    pub color: [u8; 4],
}

/// Flat lookup from tile code to its definition.
///
/// Codes are dense small integers, so the table is a `Vec` indexed by code.
/// Gaps in the code range stay `None` and read as unknown.
#[derive(Debug, Clone, Default)]
pub struct TileCatalog {
    defs: Vec<Option<TileDef>>,
}

impl TileCatalog {
    pub fn new(defs: Vec<TileDef>) -> Result<Self, MapConfigError> {
        let mut table: Vec<Option<TileDef>> = Vec::new();
        for def in defs {
            let index = def.code as usize;
            if table.len() <= index {
                table.resize(index + 1, None);
            }
            if table[index].is_some() {
                return Err(MapConfigError::DuplicateTileCode { code: def.code });
            }
            table[index] = Some(def);
        }
        Ok(Self { defs: table })
    }

    pub fn get(&self, code: TileCode) -> Option<&TileDef> {
        self.defs.get(code as usize).and_then(Option::as_ref)
    }

    pub fn contains(&self, code: TileCode) -> bool {
        self.get(code).is_some()
    }

    /// Unknown codes are treated as solid so movement resolution stays total.
    pub fn is_walkable(&self, code: TileCode) -> bool {
        self.get(code).is_some_and(|def| def.walkable)
    }

    pub fn len(&self) -> usize {
        self.defs.iter().filter(|def| def.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &TileDef> {
        self.defs.iter().filter_map(Option::as_ref)
    }
}
