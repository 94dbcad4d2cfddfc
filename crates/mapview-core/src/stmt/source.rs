use crate::schema::Extent;

/// Where a query view reads its rows from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Every row of a single extent.
    Scan(Extent),
}

impl Source {
    pub fn scan(extent: impl Into<Extent>) -> Self {
        Self::Scan(extent.into())
    }

    pub fn extent(&self) -> Extent {
        match self {
            Self::Scan(extent) => *extent,
        }
    }
}
