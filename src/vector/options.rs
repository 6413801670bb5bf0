/// Parameters for [`crate::vector::read_points_with_options`].
#[derive(Clone, Debug)]
pub struct ReadOptions<'a> {
    /// Feature property holding the class label of each point.
    pub label_field: &'a str,
}

const DEFAULT_LABEL_FIELD: &str = "class";

impl<'a> Default for ReadOptions<'a> {
    /// Labels are read from the `class` property.
    fn default() -> Self {
        ReadOptions {
            label_field: DEFAULT_LABEL_FIELD,
        }
    }
}
