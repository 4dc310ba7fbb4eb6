//! Tests for the dimension lattice.

use crate::taxonomy::domain::{CascadeParent, Dimension};
use rstest::rstest;

#[rstest]
fn the_cascade_chains_category_to_technology() {
    assert_eq!(Dimension::Category.child(), Some(Dimension::Subcategory));
    assert_eq!(Dimension::Subcategory.child(), Some(Dimension::Technology));
    assert_eq!(Dimension::Technology.child(), None);
}

#[rstest]
fn parent_is_the_inverse_of_child() {
    for dimension in Dimension::ALL {
        if let Some(child) = dimension.child() {
            assert_eq!(child.parent(), Some(dimension));
        }
    }
}

#[rstest]
#[case(Dimension::Category, false)]
#[case(Dimension::Subcategory, true)]
#[case(Dimension::Technology, true)]
#[case(Dimension::Status, false)]
fn only_dependent_levels_are_scoped(#[case] dimension: Dimension, #[case] scoped: bool) {
    assert_eq!(dimension.is_scoped(), scoped);
}

#[rstest]
fn flat_dimensions_never_join_the_cascade() {
    for dimension in Dimension::FLAT {
        assert_eq!(dimension.parent(), None);
        assert_eq!(dimension.child(), None);
    }
}

#[rstest]
fn the_kind_dimension_keeps_its_wire_name() {
    assert_eq!(Dimension::Kind.as_str(), "type");
    assert_eq!(Dimension::Kind.to_string(), "type");
}

#[rstest]
#[case(CascadeParent::Category, Dimension::Subcategory)]
#[case(CascadeParent::Subcategory, Dimension::Technology)]
fn cascade_parents_name_their_dependent_list(
    #[case] parent: CascadeParent,
    #[case] child: Dimension,
) {
    assert_eq!(parent.child_dimension(), child);
    assert_eq!(parent.dimension().child(), Some(child));
}
