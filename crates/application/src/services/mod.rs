mod answer_shuffler;

pub use answer_shuffler::{shuffle, shuffle_with};
