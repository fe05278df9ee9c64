use crate::model::SourceModel;
use crate::policy::EffectiveConfig;
use fsdguard_types::Finding;

mod layer_imports;
mod utils;


pub fn run_all(model: &SourceModel, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    layer_imports::run(model, cfg, out);
}
