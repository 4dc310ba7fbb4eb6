//! Dimensions of the classification space: the three-level taxonomy plus
//! the flat enumerations.

use std::fmt;

/// A single axis along which tasks are classified.
///
/// `Category`, `Subcategory`, and `Technology` form the hierarchical
/// cascade; the remaining dimensions are flat enumerations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Top level of the taxonomy.
    Category,
    /// Middle level, scoped to a category.
    Subcategory,
    /// Leaf level, scoped to a subcategory.
    Technology,
    /// Workflow status of a task.
    Status,
    /// Priority of a task.
    Priority,
    /// Kind of work (wire name `type`).
    Kind,
    /// Difficulty or seniority level.
    Level,
    /// Origin of the task.
    Source,
}

impl Dimension {
    /// Every dimension, cascade levels first.
    pub const ALL: [Self; 8] = [
        Self::Category,
        Self::Subcategory,
        Self::Technology,
        Self::Status,
        Self::Priority,
        Self::Kind,
        Self::Level,
        Self::Source,
    ];

    /// The flat enumerations resolved alongside the taxonomy.
    pub const FLAT: [Self; 5] = [
        Self::Status,
        Self::Priority,
        Self::Kind,
        Self::Level,
        Self::Source,
    ];

    /// Returns the canonical lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Subcategory => "subcategory",
            Self::Technology => "technology",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::Kind => "type",
            Self::Level => "level",
            Self::Source => "source",
        }
    }

    /// Returns the parent dimension in the cascade, if any.
    #[must_use]
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::Subcategory => Some(Self::Category),
            Self::Technology => Some(Self::Subcategory),
            _ => None,
        }
    }

    /// Returns the child dimension in the cascade, if any.
    #[must_use]
    pub const fn child(self) -> Option<Self> {
        match self {
            Self::Category => Some(Self::Subcategory),
            Self::Subcategory => Some(Self::Technology),
            _ => None,
        }
    }

    /// Whether option lookups for this dimension require a parent scope.
    #[must_use]
    pub const fn is_scoped(self) -> bool {
        self.parent().is_some()
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cascade level whose change forces dependent lists to be refetched.
///
/// Only the two non-leaf taxonomy levels can act as parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CascadeParent {
    /// The category changed: subcategories refetch, technologies clear.
    Category,
    /// The subcategory changed: technologies refetch.
    Subcategory,
}

impl CascadeParent {
    /// Returns the dimension whose option list depends on this parent.
    #[must_use]
    pub const fn child_dimension(self) -> Dimension {
        match self {
            Self::Category => Dimension::Subcategory,
            Self::Subcategory => Dimension::Technology,
        }
    }

    /// Returns the dimension of the parent itself.
    #[must_use]
    pub const fn dimension(self) -> Dimension {
        match self {
            Self::Category => Dimension::Category,
            Self::Subcategory => Dimension::Subcategory,
        }
    }
}
