//! Checkpoint loading.
//!
//! Checkpoints are named-tensor archives (`.ot` or `.safetensors`) converted
//! from the reference PyTorch state dict. Models trained with
//! `torch.nn.DataParallel` carry a `module.` prefix on every key which is
//! stripped before matching.

use std::collections::HashMap;
use std::path::Path;

use tch::nn::VarStore;
use tch::Tensor;

use crate::CamError;

const PARALLEL_PREFIX: &str = "module.";

fn read_named_tensors(path: &Path) -> Result<Vec<(String, Tensor)>, CamError> {
    let named = match path.extension().and_then(|ext| ext.to_str()) {
        Some("safetensors") => Tensor::read_safetensors(path)?,
        _ => Tensor::load_multi(path)?,
    };
    Ok(named)
}

fn strip_prefix(name: String) -> String {
    match name.strip_prefix(PARALLEL_PREFIX) {
        Some(stripped) => stripped.to_string(),
        None => name,
    }
}

/// Buffers the reference state dict tracks but the model does not need.
fn is_ignorable(name: &str) -> bool {
    name.ends_with("num_batches_tracked")
}

/// Loads a checkpoint into the variable store backing the model.
///
/// Every model parameter must be present in the checkpoint with a matching
/// shape; leftover checkpoint entries other than batch-norm bookkeeping
/// buffers are reported as a mismatch.
pub fn load_checkpoint(vs: &mut VarStore, path: &Path) -> Result<(), CamError> {
    let mut checkpoint: HashMap<String, Tensor> = read_named_tensors(path)?
        .into_iter()
        .map(|(name, tensor)| (strip_prefix(name), tensor))
        .collect();

    let mut variables = vs.variables();
    for (name, variable) in variables.iter_mut() {
        let source = checkpoint.remove(name).ok_or_else(|| {
            CamError::Checkpoint(format!("parameter {name} missing from {}", path.display()))
        })?;
        if source.size() != variable.size() {
            return Err(CamError::Checkpoint(format!(
                "shape mismatch for {name}: checkpoint has {:?}, model expects {:?}",
                source.size(),
                variable.size()
            )));
        }
        tch::no_grad(|| variable.f_copy_(&source))?;
    }

    if let Some(unexpected) = checkpoint.keys().find(|name| !is_ignorable(name)) {
        return Err(CamError::Checkpoint(format!(
            "unexpected parameter {unexpected} in {}",
            path.display()
        )));
    }
    log::info!("loaded checkpoint {}", path.display());
    Ok(())
}
