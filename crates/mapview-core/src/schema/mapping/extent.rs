use super::{Fragment, FunctionMapping};
use crate::schema::{app::ModelId, Extent};

/// How a single conceptual extent is stored.
#[derive(Debug, Clone)]
pub struct ExtentMapping {
    /// The mapped entity set or association set.
    pub extent: Extent,

    /// User-authored query view for the whole extent. When present it
    /// replaces the generated view.
    pub query_view: Option<String>,

    /// User-authored query views restricted to a type within the extent.
    pub type_views: Vec<TypeQueryView>,

    /// Fragments grouped by the types they apply to. Association sets have a
    /// single entry with no types.
    pub type_mappings: Vec<TypeMapping>,

    /// Stored-procedure bindings used for modifications.
    pub functions: Vec<FunctionMapping>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeQueryView {
    pub ty: ModelId,

    /// "Of type" when set, "of type only" otherwise.
    pub include_subtypes: bool,

    pub text: String,
}

/// Fragments applying to a set of types.
#[derive(Debug, Clone, Default)]
pub struct TypeMapping {
    /// Types mapped exactly.
    pub types: Vec<ModelId>,

    /// Types mapped together with all of their subtypes.
    pub is_of_types: Vec<ModelId>,

    pub fragments: Vec<Fragment>,
}

impl ExtentMapping {
    pub fn new(extent: impl Into<Extent>) -> Self {
        Self {
            extent: extent.into(),
            query_view: None,
            type_views: vec![],
            type_mappings: vec![],
            functions: vec![],
        }
    }

    pub fn type_view(&self, ty: ModelId, include_subtypes: bool) -> Option<&TypeQueryView> {
        self.type_views
            .iter()
            .find(|view| view.ty == ty && view.include_subtypes == include_subtypes)
    }

    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> + '_ {
        self.type_mappings
            .iter()
            .flat_map(|type_mapping| type_mapping.fragments.iter())
    }
}

impl TypeMapping {
    /// Returns `true` if the type mapping covers `ty`, either exactly or
    /// through an "is of" entry naming one of `ty`'s ancestors.
    pub fn applies_to(&self, ty: ModelId, ancestors: &[ModelId]) -> bool {
        self.types.contains(&ty)
            || self
                .is_of_types
                .iter()
                .any(|is_of| *is_of == ty || ancestors.contains(is_of))
    }
}
