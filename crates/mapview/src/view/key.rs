use mapview_core::schema::{
    app::{EntitySetId, ModelId},
    Extent,
};

/// Identifies a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewKey {
    /// The view of a whole extent
    Extent(Extent),

    /// The view of an entity set restricted to one type
    OfType(OfTypeKey),
}

/// Identifies the view of an entity set restricted to `ty`.
///
/// `include_subtypes` separates "of type" (instances of `ty` and its
/// subtypes) from "of type only".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OfTypeKey {
    pub entity_set: EntitySetId,
    pub ty: ModelId,
    pub include_subtypes: bool,
}

impl ViewKey {
    /// The extent the view belongs to.
    pub fn extent(&self) -> Extent {
        match self {
            Self::Extent(extent) => *extent,
            Self::OfType(key) => Extent::EntitySet(key.entity_set),
        }
    }

    pub fn as_of_type(&self) -> Option<&OfTypeKey> {
        match self {
            Self::OfType(key) => Some(key),
            Self::Extent(_) => None,
        }
    }
}

impl OfTypeKey {
    pub fn new(entity_set: EntitySetId, ty: ModelId, include_subtypes: bool) -> Self {
        Self {
            entity_set,
            ty,
            include_subtypes,
        }
    }
}

impl From<Extent> for ViewKey {
    fn from(value: Extent) -> Self {
        Self::Extent(value)
    }
}

impl From<OfTypeKey> for ViewKey {
    fn from(value: OfTypeKey) -> Self {
        Self::OfType(value)
    }
}
