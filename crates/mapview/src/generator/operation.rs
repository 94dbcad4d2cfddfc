use crate::view::OfTypeKey;
use mapview_core::schema::app;

/// A generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Generate views for every extent of a container pair
    Container(GenerateContainer),

    /// Generate the view of one entity set restricted to one type
    OfType(GenerateOfType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateContainer {
    pub container: app::ContainerId,
}

/// A type-restricted request. A result without a view for the entity set, or
/// with error diagnostics, means the view cannot be generated for the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOfType {
    pub key: OfTypeKey,
}

impl Operation {
    pub fn as_container(&self) -> Option<&GenerateContainer> {
        match self {
            Self::Container(op) => Some(op),
            _ => None,
        }
    }

    pub fn as_of_type(&self) -> Option<&GenerateOfType> {
        match self {
            Self::OfType(op) => Some(op),
            _ => None,
        }
    }
}

impl From<GenerateContainer> for Operation {
    fn from(value: GenerateContainer) -> Self {
        Self::Container(value)
    }
}

impl From<GenerateOfType> for Operation {
    fn from(value: GenerateOfType) -> Self {
        Self::OfType(value)
    }
}
