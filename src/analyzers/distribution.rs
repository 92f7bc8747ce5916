use std::collections::HashMap;

use crate::analyzers::types::{CategoryCount, NumericGroup};
use crate::dataset::Dataset;
use crate::error::Result;

/// Counts records per distinct value of `field`, most frequent first.
///
/// Equal counts keep first-seen order. The counts always sum to the number of
/// records in the dataset. Numeric columns such as `cluster` are counted by
/// their text form.
pub fn categorical_distribution(dataset: &Dataset, field: &str) -> Result<Vec<CategoryCount>> {
    if dataset.is_empty() {
        return Ok(Vec::new());
    }
    dataset.require(field)?;

    let mut counts: Vec<CategoryCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in dataset.records() {
        let value = record.require_category(field)?;
        match index.get(value.as_ref()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(value.to_string(), counts.len());
                counts.push(CategoryCount {
                    category: value.into_owned(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    Ok(counts)
}

/// Partitions the values of `numeric_field` by `category_field`.
///
/// Groups appear in first-seen order and keep record order inside each group,
/// so the caller can draw box plots or call [`NumericGroup::summary`].
///
/// # Errors
///
/// [`crate::DatasetError::MissingField`] if either column is absent from a
/// non-empty dataset, and [`crate::DatasetError::DataType`] if a value of
/// `numeric_field` is not a number.
pub fn grouped_numeric(
    dataset: &Dataset,
    category_field: &str,
    numeric_field: &str,
) -> Result<Vec<NumericGroup>> {
    if dataset.is_empty() {
        return Ok(Vec::new());
    }
    dataset.require(category_field)?;
    dataset.require(numeric_field)?;

    let mut groups: Vec<NumericGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (i, record) in dataset.records().iter().enumerate() {
        let category = record.require_category(category_field)?;
        let value = record.numeric(numeric_field, i + 1)?;

        let slot = match index.get(category.as_ref()) {
            Some(&slot) => slot,
            None => {
                index.insert(category.to_string(), groups.len());
                groups.push(NumericGroup {
                    category: category.into_owned(),
                    values: Vec::new(),
                });
                groups.len() - 1
            }
        };
        groups[slot].values.push(value);
    }

    Ok(groups)
}
