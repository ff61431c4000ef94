//! Category list handling.
//!
//! The label file is newline-delimited UTF-8; the line number of a category
//! is its class index in the model output and in the final layer weights.

use std::path::Path;

use tch::Tensor;

use crate::CamError;

#[derive(Debug, Clone)]
pub struct Categories(Vec<String>);

impl Categories {
    /// Loads the ordered category list from a newline-delimited text file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CamError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| CamError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let names: Vec<String> =
            contents.lines().map(|line| line.trim_end().to_string()).collect();
        if names.is_empty() {
            return Err(CamError::EmptyCategories(path.to_path_buf()));
        }
        Ok(Self(names))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, class_index: i64) -> Option<&str> {
        self.0.get(class_index as usize).map(String::as_str)
    }

    /// Returns the top k categories with their probabilities, most probable
    /// first. Expects a 1-D probability tensor indexed by class.
    pub fn top(&self, probabilities: &Tensor, k: i64) -> Result<Vec<(f64, String)>, CamError> {
        let k = k.min(self.0.len() as i64);
        let (values, indexes) = probabilities.topk(k, -1, true, true);
        let mut result = Vec::with_capacity(k as usize);
        for i in 0..k {
            let probability = values.double_value(&[i]);
            let class_index = indexes.int64_value(&[i]);
            let name = self
                .get(class_index)
                .ok_or_else(|| {
                    CamError::Checkpoint(format!(
                        "class index {class_index} out of range for {} categories",
                        self.0.len()
                    ))
                })?
                .to_string();
            result.push((probability, name));
        }
        Ok(result)
    }
}
