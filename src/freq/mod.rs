pub mod classifier;
pub mod feature;
pub mod model;
pub mod scorer;
pub mod selector;
pub mod table;
pub mod tagger;
pub mod trainer;
