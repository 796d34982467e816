//! Binds the `shapecast` behavioural feature files to the step registry.

use crate::fixtures::{MappingState, mapping_state};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/extraction.feature",
    fixtures = [mapping_state: MappingState]
);
scenarios!(
    "tests/features/pipe.feature",
    fixtures = [mapping_state: MappingState]
);
